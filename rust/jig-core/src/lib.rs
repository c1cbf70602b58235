//! Jig Core
//!
//! The incremental-session state machine behind the jig shell: line
//! accumulation, fragment classification, program synthesis, and the
//! compile/run turn driver with snapshot rollback.

pub mod accumulator;
pub mod classify;
pub mod session;
pub mod synth;
pub mod toolchain;
pub mod turn;

use thiserror::Error;

/// Name of the synthesized whole-program unit (`Jig.java`, class `Jig`).
/// Reserved — user type definitions get their own units named after the type.
pub const MAIN_UNIT: &str = "Jig";

/// Errors that escape a single turn.
///
/// Compile and run failures never show up here; they are recovered in place
/// by the turn driver. What remains is a failed `source(name)` lookup and
/// environment failures from the toolchain.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("nothing registered under `{0}`")]
    UnknownFragment(String),
    #[error(transparent)]
    Toolchain(#[from] toolchain::ToolchainError),
}
