pub(crate) mod common;

pub mod isa;

pub mod assembler;

pub mod cli;
