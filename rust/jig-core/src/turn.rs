//! The per-turn state machine: classify, synthesize, compile (with one
//! bounded retry from the snapshot), run, and checkpoint or roll back.

use crate::classify::{classify, Fragment};
use crate::session::SessionState;
use crate::synth;
use crate::toolchain::Toolchain;
use crate::{SessionError, MAIN_UNIT};

/// What the caller should do after a turn.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading input.
    Continue,
    /// Print the stored source text for an introspection lookup.
    Show(String),
    /// The user asked to end the session.
    Quit,
}

/// Fresh session state with the empty program pre-registered, so
/// `source()` works before the first turn.
pub fn new_session() -> SessionState {
    let mut state = SessionState::new();
    let program = synth::render(&state);
    state.register("", &program);
    state
}

/// Process one closed input block through a full turn.
///
/// Compile and run failures are recovered here by rolling back to the last
/// known-good snapshot; only environment failures (unwritable workspace,
/// missing toolchain) and unknown `source(..)` lookups surface as errors.
pub fn process_block(
    state: &mut SessionState,
    toolchain: &dyn Toolchain,
    block: &str,
) -> Result<Outcome, SessionError> {
    match classify(block) {
        Fragment::Source(name) => {
            let text = state
                .lookup(&name)
                .ok_or_else(|| SessionError::UnknownFragment(name.clone()))?;
            return Ok(Outcome::Show(text.to_string()));
        }
        Fragment::Exit => return Ok(Outcome::Quit),
        Fragment::Clear => state.clear_statements(),
        Fragment::Import => {
            state.imports.push(block.trim_end().to_string());
            state.pending_expression.clear();
        }
        Fragment::Method { name } => {
            let method = block.trim_end().to_string();
            state.register(&name, &method);
            state.methods.push(method);
            state.pending_expression.clear();
        }
        Fragment::Type { name } => {
            define_type(state, toolchain, &name, block.trim_end())?;
            state.pending_expression.clear();
        }
        Fragment::Expression => {
            state.pending_expression = block.trim_end().to_string();
        }
    }
    run_cycle(state, toolchain)?;
    Ok(Outcome::Continue)
}

/// Compile a type definition as its own unit. A unit that fails to compile
/// is removed again and never registered.
fn define_type(
    state: &mut SessionState,
    toolchain: &dyn Toolchain,
    name: &str,
    source: &str,
) -> Result<(), SessionError> {
    toolchain.write_unit(name, source)?;
    if toolchain.compile(name)? {
        state.register(name, source);
    } else {
        toolchain.remove_unit(name)?;
    }
    Ok(())
}

/// Synthesize, compile (retrying once from the snapshot), run, and advance
/// the checkpoint. The snapshot only ever moves past a clean run.
fn run_cycle(state: &mut SessionState, toolchain: &dyn Toolchain) -> Result<(), SessionError> {
    if !synthesize_and_compile(state, toolchain)? {
        state.restore_snapshot();
        state.pending_expression.clear();
        synthesize_and_compile(state, toolchain)?;
    }
    if toolchain.run(MAIN_UNIT)? {
        state.take_snapshot();
    } else {
        state.restore_snapshot();
    }
    state.pending_expression.clear();
    Ok(())
}

fn synthesize_and_compile(
    state: &mut SessionState,
    toolchain: &dyn Toolchain,
) -> Result<bool, SessionError> {
    synth::shape_pending(state);
    let program = synth::render(state);
    state.register("", &program);
    toolchain.write_unit(MAIN_UNIT, &program)?;
    Ok(toolchain.compile(MAIN_UNIT)?)
}
