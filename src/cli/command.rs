use crate::assembler;
use crate::isa::hw;
use ansi_term::Color::Red;
use anyhow::Context;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use structopt::StructOpt;

pub const DEFAULT_OUTPUT_EXT: &str = "hex";

#[cfg(windows)]
pub fn terminal_init() {
    ansi_term::enable_ansi_support().expect("Could enable terminal ANSI support");
}

#[cfg(not(windows))]
pub fn terminal_init() {}

#[derive(StructOpt, Debug)]
#[structopt(name = "lc3asm")]
pub struct CommandRoot {
    #[structopt(name = "in.asm", parse(from_os_str))]
    in_src: PathBuf,

    #[structopt(short = "o", name = "out.hex", parse(from_os_str))]
    out_hex: Option<PathBuf>,
}

pub fn root(cmd: CommandRoot) -> ! {
    match run(&cmd) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            eprintln!("{} {:#}", Red.paint("error:"), err);
            std::process::exit(1);
        }
    }
}

fn run(cmd: &CommandRoot) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&cmd.in_src)
        .with_context(|| format!("could not read {}", cmd.in_src.display()))?;

    let words = assembler::assemble(&source)?;

    let out_name = match &cmd.out_hex {
        Some(path) => path.clone(),
        None => default_output(&cmd.in_src),
    };

    std::fs::write(&out_name, hw::words_to_hex(&words))
        .with_context(|| format!("could not write {}", out_name.display()))?;

    println!("OK: {} words -> {}", words.len(), out_name.display());
    Ok(())
}

/// `foo.asm` and `foo.a` become `foo.hex`; any other input name gets `.hex`
/// appended rather than clobbering an extension that was not ours.
fn default_output(in_src: &Path) -> PathBuf {
    match in_src.extension().and_then(OsStr::to_str) {
        Some("asm") | Some("a") => in_src.with_extension(DEFAULT_OUTPUT_EXT),
        _ => {
            let mut name = in_src.as_os_str().to_owned();
            name.push(".");
            name.push(DEFAULT_OUTPUT_EXT);
            PathBuf::from(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::default_output;
    use std::path::{Path, PathBuf};

    #[test]
    fn default_output_replaces_asm_extensions() {
        assert_eq!(
            default_output(Path::new("prog.asm")),
            PathBuf::from("prog.hex")
        );
        assert_eq!(
            default_output(Path::new("dir/prog.a")),
            PathBuf::from("dir/prog.hex")
        );
    }

    #[test]
    fn default_output_appends_otherwise() {
        assert_eq!(
            default_output(Path::new("prog.s")),
            PathBuf::from("prog.s.hex")
        );
        assert_eq!(default_output(Path::new("prog")), PathBuf::from("prog.hex"));
        assert_eq!(
            default_output(Path::new("prog.ASM")),
            PathBuf::from("prog.ASM.hex")
        );
    }
}
