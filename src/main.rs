use lc3asm::cli::command;
use structopt::StructOpt;

fn main() {
    command::terminal_init();
    env_logger::init();
    command::root(command::CommandRoot::from_args());
}
