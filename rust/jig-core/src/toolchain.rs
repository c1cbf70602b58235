//! The external compiler/runtime collaborator boundary.

use std::io;

use thiserror::Error;

/// Environment failures from the toolchain or its working directory.
///
/// These end the session; an ordinary non-zero exit from the compiler or the
/// program is not an error but `Ok(false)` from [`Toolchain::compile`] /
/// [`Toolchain::run`].
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("cannot write unit `{unit}`: {source}")]
    Write { unit: String, source: io::Error },
    #[error("cannot remove unit `{unit}`: {source}")]
    Remove { unit: String, source: io::Error },
    #[error("cannot invoke `{command}`: {source}")]
    Spawn { command: String, source: io::Error },
}

/// Compiles and runs program units in the shell's working directory.
///
/// One source file per unit, named after it. Both operations block until the
/// external process exits and report only its pass/fail status; whatever the
/// process printed has already streamed through to the user.
pub trait Toolchain {
    fn write_unit(&self, name: &str, source: &str) -> Result<(), ToolchainError>;
    fn remove_unit(&self, name: &str) -> Result<(), ToolchainError>;
    fn compile(&self, name: &str) -> Result<bool, ToolchainError>;
    fn run(&self, name: &str) -> Result<bool, ToolchainError>;
}
