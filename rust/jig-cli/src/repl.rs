//! Interactive shell: the read-accumulate-evaluate loop.

use std::fs;
use std::path::{Path, PathBuf};

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use jig_core::accumulator::LineAccumulator;
use jig_core::classify::classify;
use jig_core::turn::{self, Outcome};
use jig_core::SessionError;

use crate::colors::{gray, green, magenta, red};
use crate::config::JigConfig;
use crate::toolchain::JavaToolchain;

/// Java keywords for tab completion.
const KEYWORDS: &[&str] = &[
    "abstract",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "final",
    "finally",
    "float",
    "for",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "super",
    "switch",
    "this",
    "throw",
    "throws",
    "try",
    "void",
    "while",
];

/// Shell control commands for tab completion.
const COMMANDS: &[&str] = &["source(", "src(", "clear", "clr", "exit"];

/// Environment variable used to override shell history location.
const REPL_HISTORY_PATH_ENV: &str = "JIG_REPL_HISTORY_PATH";

/// Completer for the shell.
struct JigCompleter;

impl Completer for JigCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .rfind(|c: char| c.is_whitespace() || c == '(' || c == '{')
            .map(|i| i + 1)
            .unwrap_or(0);
        let word = &line[start..pos];

        if word.is_empty() {
            return Ok((start, Vec::new()));
        }

        let mut candidates = Vec::new();

        // Control commands only make sense at the start of a block
        if line.trim_start() == word {
            for &cmd in COMMANDS {
                if cmd.starts_with(word) {
                    candidates.push(Pair {
                        display: cmd.to_string(),
                        replacement: cmd.to_string(),
                    });
                }
            }
        }

        for &kw in KEYWORDS {
            if kw.starts_with(word) {
                candidates.push(Pair {
                    display: kw.to_string(),
                    replacement: kw.to_string(),
                });
            }
        }

        Ok((start, candidates))
    }
}

impl Hinter for JigCompleter {
    type Hint = String;
}

impl Highlighter for JigCompleter {}

impl Validator for JigCompleter {}

impl Helper for JigCompleter {}

/// Run the interactive shell until an exit command, end-of-input, or an
/// environment failure. Returns the process exit code.
pub fn run_repl(config: &JigConfig) -> i32 {
    println!(
        "{}\n",
        gray("Type exit to leave, source(name) to inspect a fragment.")
    );

    let rl_config = rustyline::Config::builder().auto_add_history(true).build();
    let mut rl: Editor<JigCompleter, rustyline::history::DefaultHistory> =
        Editor::with_config(rl_config).expect("Failed to create editor");
    rl.set_helper(Some(JigCompleter));

    // Load history from default or configured path.
    let history_path = get_history_path();
    if let Some(ref path) = history_path {
        if path.exists() {
            if let Err(err) = rl.load_history(path) {
                eprintln!(
                    "{} failed to load history from {}: {}",
                    red("Warning:"),
                    path.display(),
                    err
                );
            }
        }
    }

    let toolchain = JavaToolchain::new(config);
    let mut state = turn::new_session();
    let mut accumulator = LineAccumulator::new();
    let mut exit_code = 0;

    loop {
        let prompt = if accumulator.is_collecting() {
            format!("{}  ", gray(".."))
        } else {
            format!("{} ", magenta(">>"))
        };

        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() && !accumulator.is_collecting() {
                    continue;
                }

                let Some(block) = accumulator.push_line(&line) else {
                    if config.debug {
                        eprintln!("{}", gray(&format!("depth[{}]", accumulator.depth())));
                    }
                    continue;
                };
                if config.debug {
                    eprintln!("{}", gray(&format!("fragment[{:?}]", classify(&block))));
                }

                match turn::process_block(&mut state, &toolchain, &block) {
                    Ok(Outcome::Continue) => {}
                    Ok(Outcome::Show(text)) => println!("{}", green(&text)),
                    Ok(Outcome::Quit) => {
                        println!("{}", magenta("\n\tGoodbye ^.^"));
                        break;
                    }
                    Err(SessionError::UnknownFragment(name)) => {
                        eprintln!("{} nothing registered under `{}`", red("error:"), name);
                    }
                    Err(err @ SessionError::Toolchain(_)) => {
                        eprintln!("{} {}", red("fatal:"), err);
                        exit_code = 1;
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", gray("(Ctrl-D or exit to leave)"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{} {:?}", red("Error:"), err);
                exit_code = 1;
                break;
            }
        }
    }

    // Save history
    if let Some(ref path) = history_path {
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                eprintln!(
                    "{} failed to create history directory {}: {}",
                    red("Warning:"),
                    parent.display(),
                    err
                );
            }
        }
        if let Err(err) = rl.save_history(path) {
            eprintln!(
                "{} failed to save history to {}: {}",
                red("Warning:"),
                path.display(),
                err
            );
        }
    }

    exit_code
}

/// Resolve the path to the history file.
///
/// Rules:
/// - `JIG_REPL_HISTORY_PATH` set to an absolute path: use as-is.
/// - `JIG_REPL_HISTORY_PATH` set to `~/...`: resolve under HOME.
/// - `JIG_REPL_HISTORY_PATH` set to a relative path: resolve under HOME.
/// - Otherwise: `${HOME}/.jig/repl_history`.
fn resolve_history_path(home: Option<&Path>, override_path: Option<&str>) -> Option<PathBuf> {
    let home_path = || home.map(Path::to_path_buf);

    if let Some(raw) = override_path
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        if raw == "~" {
            return home_path();
        }
        if let Some(rest) = raw.strip_prefix("~/") {
            let mut path = home_path()?;
            path.push(rest);
            return Some(path);
        }

        let configured = PathBuf::from(raw);
        if configured.is_relative() {
            let mut base = home_path()?;
            base.push(configured);
            return Some(base);
        }
        return Some(configured);
    }

    let mut default_path = home_path()?;
    default_path.push(".jig");
    default_path.push("repl_history");
    Some(default_path)
}

fn get_history_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let override_path = std::env::var(REPL_HISTORY_PATH_ENV).ok();
    resolve_history_path(home.as_deref(), override_path.as_deref())
}
