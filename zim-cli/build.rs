use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() in src/main.rs, which a build script cannot import.
fn build_cli() -> Command {
    Command::new("zim2obsidian")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Zim wiki notebooks into Obsidian vaults")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .help("Path to a zim2obsidian.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Log more detail (repeat for more)"),
        )
        .arg(
            Arg::new("no-frontmatter")
                .long("no-frontmatter")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Do not prefix notes with YAML front matter"),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a notebook into a vault (default command)")
                .arg(
                    Arg::new("src_dir")
                        .help("Notebook root folder")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("output_dir")
                        .help("Vault folder, created when missing")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("overwrite")
                        .long("overwrite")
                        .help("Replace files that already exist in the vault")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Show what would be written without touching the vault")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the report as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("page")
                .about("Print the Markdown for a single page")
                .arg(
                    Arg::new("src_dir")
                        .help("Notebook root folder")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("page")
                        .help("Page name, such as Projects:Alpha")
                        .required(true)
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    generate_to(Bash, &mut cmd, "zim2obsidian", &outdir)?;
    generate_to(Zsh, &mut cmd, "zim2obsidian", &outdir)?;
    generate_to(Fish, &mut cmd, "zim2obsidian", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
