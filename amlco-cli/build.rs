use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs (build scripts can't reach src/ modules)
fn build_cli() -> Command {
    let file = |name: &'static str| {
        Arg::new(name)
            .required(true)
            .value_hint(ValueHint::FilePath)
    };
    let id = || Arg::new("id").required(true).value_hint(ValueHint::Other);

    Command::new("amlco")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert report content and drive the AMLCO report generator")
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("api-base")
                .long("api-base")
                .value_hint(ValueHint::Url)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .arg(file("input"))
                .arg(Arg::new("from").long("from"))
                .arg(Arg::new("to").long("to").required(true))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("escape-text")
                        .long("escape-text")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("upload")
                .arg(file("files").num_args(1..))
                .arg(Arg::new("source").long("source").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("annual-report")
                        .long("annual-report")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("sections"))
        .subcommand(
            Command::new("create")
                .arg(Arg::new("type").long("type"))
                .arg(Arg::new("excel-id").long("excel-id"))
                .arg(Arg::new("source-id").long("source-id"))
                .arg(Arg::new("annual-report-id").long("annual-report-id"))
                .arg(
                    Arg::new("sections")
                        .long("sections")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("generate")
                        .long("generate")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("generate").arg(Arg::new("type").long("type")))
        .subcommand(Command::new("reports").arg(Arg::new("query").long("query").short('q')))
        .subcommand(
            Command::new("show")
                .arg(id())
                .arg(Arg::new("text").long("text").action(ArgAction::SetTrue)),
        )
        .subcommand(Command::new("edit").arg(id()).arg(file("text-file")))
        .subcommand(Command::new("delete").arg(id()))
        .subcommand(
            Command::new("download").arg(id()).arg(
                Arg::new("output-dir")
                    .long("output-dir")
                    .short('o')
                    .value_hint(ValueHint::DirPath),
            ),
        )
        .subcommand(Command::new("status-label").arg(Arg::new("code")))
        .subcommand(Command::new("list-formats"))
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    generate_to(Bash, &mut cmd, "amlco", &outdir)?;
    generate_to(Zsh, &mut cmd, "amlco", &outdir)?;
    generate_to(Fish, &mut cmd, "amlco", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
