pub mod types;

pub mod emit;
pub mod encode;
pub mod lex;
pub mod resolve;

pub use emit::emit;
pub use encode::encode;
pub use lex::lex;
pub use resolve::resolve;
