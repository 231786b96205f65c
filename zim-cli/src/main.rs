// Command-line interface for zim2obsidian
//
// This binary converts a Zim desktop wiki notebook into an Obsidian vault. All of the translation
// work lives in the zim-babel crate; this crate parses arguments, loads configuration, sets up
// logging and reports what happened.
//
// Converting:
//
// A conversion needs the notebook folder and the vault folder. The vault is created when missing,
// and files already in it are left alone unless --overwrite is given.
// Usage:
//  zim2obsidian <src_dir> <output_dir> [--overwrite] [--dry-run] [--no-frontmatter]  - Convert (default)
//  zim2obsidian convert <src_dir> <output_dir> [...]   - Same as above (explicit)
//  zim2obsidian page <src_dir> <page>                  - Print one translated page
//
// Configuration:
//
// Defaults come from zim-config, then ./zim2obsidian.toml when present, then --config <PATH>,
// then the flags themselves.
//
// Logging:
//
// Warnings are logged by default. Each -v raises the level one step (info, debug, trace) and
// RUST_LOG, when set, takes precedence.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::Path;
use zim_babel::{
    convert, translate, ConvertReport, ConvertSpec, Notebook, PagePath, TranslateOptions,
};
use zim_config::{Loader, ZimConfig, USER_CONFIG_FILE};

const SUBCOMMANDS: &[&str] = &["convert", "page", "help"];

/// Planned outputs listed by a dry run
const PLANNED_SHOWN: usize = 20;

/// Warnings listed after a run
const WARNINGS_SHOWN: usize = 10;

/// Exit code when the conversion fails
const EXIT_FAILURE: i32 = 2;

fn build_cli() -> Command {
    Command::new("zim2obsidian")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Zim wiki notebooks into Obsidian vaults")
        .long_about(
            "Convert a Zim desktop wiki notebook into an Obsidian vault.\n\n\
            Every page is translated to Obsidian flavoured Markdown and every other file\n\
            is copied alongside, keeping the folder layout of the notebook.\n\n\
            Examples:\n  \
            zim2obsidian ~/Notebooks/Notes ~/Vault              # Convert a notebook\n  \
            zim2obsidian ~/Notebooks/Notes ~/Vault --dry-run    # Show what would be written\n  \
            zim2obsidian page ~/Notebooks/Notes Projects:Alpha  # Print one page",
        )
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
                .long_about(
                    "Convert a notebook folder into an Obsidian vault.\n\n\
                    Pages (.txt files starting with a Zim Content-Type header) become .md notes;\n\
                    all other files are copied unchanged. Existing files in the vault are\n\
                    skipped unless --overwrite is given.\n\n\
                    Examples:\n  \
                    zim2obsidian convert Notes Vault               # Convert\n  \
                    zim2obsidian Notes Vault --overwrite           # 'convert' is optional\n  \
                    zim2obsidian Notes Vault --dry-run --json      # Machine readable plan",
                )
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

/// Insert the default `convert` subcommand when the first argument is not one.
fn inject_convert(args: &[String]) -> Option<Vec<String>> {
    let at = 1 + leading_global_args(args.get(1..)?);
    let first = args.get(at)?;
    if first.starts_with('-') || SUBCOMMANDS.contains(&first.as_str()) {
        return None;
    }
    let mut injected = args[..at].to_vec();
    injected.push("convert".to_string());
    injected.extend_from_slice(&args[at..]);
    Some(injected)
}

/// Number of leading arguments taken by global flags, which clap accepts
/// before the subcommand name.
fn leading_global_args(args: &[String]) -> usize {
    let mut taken = 0;
    while let Some(arg) = args.get(taken) {
        taken += match arg.as_str() {
            "--config" => 2,
            "--verbose" | "--no-frontmatter" => 1,
            flag if flag.starts_with("--config=") => 1,
            flag if is_verbose_cluster(flag) => 1,
            _ => break,
        };
    }
    taken.min(args.len())
}

/// `-v`, `-vv`, `-vvv` ...
fn is_verbose_cluster(flag: &str) -> bool {
    flag.strip_prefix('-')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c == 'v'))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => match inject_convert(&args) {
            Some(injected) => match cli.try_get_matches_from(&injected) {
                Ok(m) => m,
                Err(e2) => e2.exit(),
            },
            None => e.exit(),
        },
    };

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => handle_convert_command(&matches, sub_matches),
        Some(("page", sub_matches)) => handle_page_command(&matches, sub_matches),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(level_for(verbosity))
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn handle_convert_command(matches: &ArgMatches, sub_matches: &ArgMatches) {
    let src_dir = sub_matches
        .get_one::<String>("src_dir")
        .expect("src_dir is required");
    let output_dir = sub_matches
        .get_one::<String>("output_dir")
        .expect("output_dir is required");
    let dry_run = sub_matches.get_flag("dry-run");

    let config = load_cli_config(matches, sub_matches.get_flag("overwrite"));
    let spec = ConvertSpec::new(src_dir, output_dir)
        .with_overwrite(config.output.overwrite)
        .with_dry_run(dry_run)
        .with_translate_options(TranslateOptions::from(&config.convert));

    let report = convert(&spec).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(EXIT_FAILURE);
    });

    if sub_matches.get_flag("json") {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(EXIT_FAILURE);
            }
        }
        return;
    }
    print!("{}", render_report(&report, Path::new(output_dir), dry_run));
}

fn handle_page_command(matches: &ArgMatches, sub_matches: &ArgMatches) {
    let src_dir = sub_matches
        .get_one::<String>("src_dir")
        .expect("src_dir is required");
    let name = sub_matches
        .get_one::<String>("page")
        .expect("page is required");

    let config = load_cli_config(matches, false);
    let notebook = Notebook::open(src_dir).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(EXIT_FAILURE);
    });
    let wanted = PagePath::parse(name).key();
    let Some(page) = notebook.pages().iter().find(|p| p.path.key() == wanted) else {
        eprintln!("Error: no page named '{name}' in {src_dir}");
        std::process::exit(EXIT_FAILURE);
    };

    let options = TranslateOptions::from(&config.convert);
    let result = translate(page, &notebook.index(), &options);
    for diagnostic in result.warnings() {
        eprintln!("{}: {diagnostic}", page.source.display());
    }
    print!("{}", result.markdown);
}

fn load_cli_config(matches: &ArgMatches, overwrite: bool) -> ZimConfig {
    let mut loader = Loader::new().with_optional_file(USER_CONFIG_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    let mut overrides = Vec::new();
    if overwrite {
        overrides.push(("output.overwrite", true));
    }
    if matches.get_flag("no-frontmatter") {
        overrides.push(("convert.front_matter", false));
    }

    overrides
        .into_iter()
        .try_fold(loader, |loader, (key, value)| loader.set_override(key, value))
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        })
}

fn render_report(report: &ConvertReport, output_dir: &Path, dry_run: bool) -> String {
    let mut out = String::new();
    if dry_run {
        out.push_str(&format!(
            "DRY RUN: would convert {} pages and copy {} files into: {}\n",
            report.pages_converted,
            report.attachments_copied,
            output_dir.display()
        ));
        if !report.planned.is_empty() {
            out.push_str("Planned outputs:\n");
            for path in report.planned.iter().take(PLANNED_SHOWN) {
                out.push_str(&format!(" - {}\n", path.display()));
            }
            if report.planned.len() > PLANNED_SHOWN {
                out.push_str(&format!(
                    " ... ({} more)\n",
                    report.planned.len() - PLANNED_SHOWN
                ));
            }
        }
    } else {
        out.push_str(&format!(
            "Converted {} pages and copied {} files into: {}\n",
            report.pages_converted,
            report.attachments_copied,
            output_dir.display()
        ));
        if !report.skipped.is_empty() {
            out.push_str(&format!(
                "Skipped {} existing files (use --overwrite to replace them)\n",
                report.skipped.len()
            ));
        }
    }

    if !report.warnings.is_empty() {
        out.push_str(&format!("Warnings: {}\n", report.warnings.len()));
        for warning in report.warnings.iter().take(WARNINGS_SHOWN) {
            out.push_str(&format!(" - {warning}\n"));
        }
    }
    out
}
