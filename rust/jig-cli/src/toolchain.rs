//! Subprocess toolchain: `javac` and `java` against the workspace directory.
//!
//! Invoked processes inherit stdio so their output reaches the user
//! verbatim; the shell only tints it — compiler output magenta, program
//! output green — and reads back the exit status.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use jig_core::toolchain::{Toolchain, ToolchainError};

use crate::config::JigConfig;

pub const COMPILER_TINT: &str = "\x1b[35m";
pub const PROGRAM_TINT: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

pub struct JavaToolchain {
    javac: String,
    java: String,
    workspace: PathBuf,
    no_color: bool,
}

impl JavaToolchain {
    pub fn new(config: &JigConfig) -> Self {
        Self {
            javac: config.javac.clone(),
            java: config.java.clone(),
            workspace: config.workspace.clone(),
            no_color: config.no_color,
        }
    }
}

impl Toolchain for JavaToolchain {
    fn write_unit(&self, name: &str, source: &str) -> Result<(), ToolchainError> {
        let write_err = |source: io::Error| ToolchainError::Write {
            unit: name.to_string(),
            source,
        };
        fs::create_dir_all(&self.workspace).map_err(write_err)?;
        fs::write(self.workspace.join(format!("{name}.java")), source).map_err(write_err)
    }

    fn remove_unit(&self, name: &str) -> Result<(), ToolchainError> {
        fs::remove_file(self.workspace.join(format!("{name}.java"))).map_err(|e| {
            ToolchainError::Remove {
                unit: name.to_string(),
                source: e,
            }
        })
    }

    fn compile(&self, name: &str) -> Result<bool, ToolchainError> {
        invoke(
            &self.javac,
            &format!("{name}.java"),
            &self.workspace,
            COMPILER_TINT,
            self.no_color,
        )
        .map_err(|e| ToolchainError::Spawn {
            command: self.javac.clone(),
            source: e,
        })
    }

    fn run(&self, name: &str) -> Result<bool, ToolchainError> {
        invoke(&self.java, name, &self.workspace, PROGRAM_TINT, self.no_color).map_err(|e| {
            ToolchainError::Spawn {
                command: self.java.clone(),
                source: e,
            }
        })
    }
}

/// Run `program arg` in `cwd` with inherited stdio, tinting its output.
/// Returns whether it exited zero. Also used by the batch build mode.
pub fn invoke(
    program: &str,
    arg: &str,
    cwd: &Path,
    tint: &str,
    no_color: bool,
) -> io::Result<bool> {
    if !no_color {
        print!("{}", tint);
        io::stdout().flush().ok();
    }
    let status = Command::new(program).arg(arg).current_dir(cwd).status();
    if !no_color {
        print!("{}", RESET);
        io::stdout().flush().ok();
    }
    Ok(status?.success())
}
