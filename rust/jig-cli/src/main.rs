//! jig CLI — an interactive Java shell and lightweight build tool.

mod colors;
mod config;
mod repl;
mod toolchain;

use clap::Parser as ClapParser;
use std::path::{Path, PathBuf};

use colors::{gray, green, magenta, red, status_label, yellow};
use config::JigConfig;
use toolchain::{COMPILER_TINT, PROGRAM_TINT};

const TITLE: &str = r"
          _ _
         (_|_)__ _
         | | / _` |    An interactive Java shell
        _/ |_\__, |    and lightweight build tool
       |__/  |___/
";

#[derive(ClapParser)]
#[command(
    name = "jig",
    version,
    about = "An interactive Java shell and lightweight build tool"
)]
struct Cli {
    /// .java files to compile; the first one is run
    files: Vec<PathBuf>,

    /// Compile every .java file in the current directory
    #[arg(short, long)]
    all: bool,

    /// Suppress the startup banner
    #[arg(short, long)]
    quiet: bool,

    /// Trace classification and brace depth
    #[arg(short, long)]
    debug: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Path to a jig.toml config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => match JigConfig::load_from(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{} {}", red("error:"), e);
                std::process::exit(1);
            }
        },
        None => JigConfig::load(),
    };
    config.debug |= cli.debug;
    config.no_color |= cli.no_color;

    if !cli.quiet {
        let banner = format!("{TITLE}            Version {}\n", env!("CARGO_PKG_VERSION"));
        if config.no_color {
            println!("{}", banner);
        } else {
            println!("{}", magenta(&banner));
        }
    }

    if cli.all {
        compile_all(&config);
    }

    if !cli.files.is_empty() {
        compile_and_run(&config, &cli.files);
    } else if !cli.all {
        std::process::exit(repl::run_repl(&config));
    }
}

/// Compile the given files in place; if every one of them compiles, run the
/// first (stripped of its `.java` suffix).
fn compile_and_run(config: &JigConfig, files: &[PathBuf]) {
    let cwd = Path::new(".");
    let mut compiled = true;
    for file in files {
        let name = file.display().to_string();
        println!("{} {}", status_label("Compiling"), name);
        compiled &= invoke_or_die(&config.javac, &name, cwd, COMPILER_TINT, config.no_color);
    }
    if !compiled {
        std::process::exit(1);
    }

    let first = files[0].display().to_string();
    let unit = first.trim_end_matches(".java");
    println!("{} {}", status_label("Running"), unit);
    if !invoke_or_die(&config.java, unit, cwd, PROGRAM_TINT, config.no_color) {
        std::process::exit(1);
    }
    println!("{} {}", green("✓"), gray("done"));
}

/// Compile every .java file in the current directory.
fn compile_all(config: &JigConfig) {
    let entries = std::fs::read_dir(".").unwrap_or_else(|e| {
        eprintln!("{} cannot read current directory: {}", red("error:"), e);
        std::process::exit(1);
    });

    let mut sources: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".java"))
        .collect();
    sources.sort();

    if sources.is_empty() {
        println!("{} no .java files in the current directory", yellow("warning:"));
        return;
    }

    for name in sources {
        println!("{} {}", status_label("Compiling"), name);
        invoke_or_die(
            &config.javac,
            &name,
            Path::new("."),
            COMPILER_TINT,
            config.no_color,
        );
    }
}

fn invoke_or_die(program: &str, arg: &str, cwd: &Path, tint: &str, no_color: bool) -> bool {
    toolchain::invoke(program, arg, cwd, tint, no_color).unwrap_or_else(|e| {
        eprintln!("{} cannot invoke `{}`: {}", red("error:"), program, e);
        std::process::exit(1);
    })
}
