//! Program synthesis: session state to `Jig.java` source text.
//!
//! Shaping the pending expression is the one stateful step (a terminated
//! statement folds into the statement list for good); rendering after that
//! is pure text assembly and cannot fail.

use crate::session::SessionState;

/// Emitted in the expression slot when the turn's input was a terminated
/// statement, so every turn still prints exactly one line.
const NO_OP_PRINT: &str = "System.out.println();";

/// Fold or wrap the pending expression so it is ready for the template:
/// - ends in `;` or `}` → moved into `statements`, slot becomes a no-op
///   print (the turn's visible result is a blank line);
/// - two-line braceless `if` → the consequent is wrapped in a print, so it
///   shows only when the condition holds;
/// - anything else → wrapped whole in a print.
pub fn shape_pending(state: &mut SessionState) {
    let pending = state.pending_expression.trim_end().to_string();
    if pending.ends_with(';') || pending.ends_with('}') {
        state.statements.push(pending);
        state.pending_expression = NO_OP_PRINT.to_string();
    } else if let Some(guarded) = guarded_conditional(&pending) {
        state.pending_expression = guarded;
    } else {
        state.pending_expression = format!("System.out.println( {} );", pending);
    }
}

/// `if (cond)` on one line, the consequent expression on the next.
fn guarded_conditional(pending: &str) -> Option<String> {
    let first_word: String = pending
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if first_word != "if" {
        return None;
    }
    let mut lines = pending.lines();
    let header = lines.next()?;
    let consequent = lines.next()?.trim();
    Some(format!(
        "{}\n    System.out.println( {} );",
        header, consequent
    ))
}

/// Render the whole program around the shaped expression slot.
pub fn render(state: &SessionState) -> String {
    let imports = state.imports.join("\n");
    let statements = indent_following(&state.statements.join("\n"), "        ");
    let expression = indent_following(&state.pending_expression, "        ");
    let methods = indent_following(&state.methods.join("\n\n"), "    ");

    let mut program = String::new();
    program.push_str(&imports);
    program.push_str("\npublic class Jig {\n\n");
    program.push_str("    public static void main( String[] args ) {\n");
    program.push_str("        ");
    program.push_str(&statements);
    program.push_str("\n        ");
    program.push_str(&expression);
    program.push_str("\n    }\n\n    ");
    program.push_str(&methods);
    program.push_str("\n}\n");
    program
}

/// Indentation is a presentation concern: continuation lines pick up the
/// slot's padding, the first line uses the template's own.
fn indent_following(text: &str, pad: &str) -> String {
    text.replace('\n', &format!("\n{pad}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminated_statement_folds_and_leaves_a_blank_marker() {
        let mut state = SessionState::new();
        state.pending_expression = "int x = 7;".into();
        shape_pending(&mut state);
        assert_eq!(state.statements, vec!["int x = 7;".to_string()]);
        assert_eq!(state.pending_expression, "System.out.println();");
    }

    #[test]
    fn closing_brace_counts_as_terminated() {
        let mut state = SessionState::new();
        state.pending_expression = "for( int i = 0; i < 4; i++ ) {\n    System.out.println( i );\n}".into();
        shape_pending(&mut state);
        assert_eq!(state.statements.len(), 1);
        assert_eq!(state.pending_expression, "System.out.println();");
    }

    #[test]
    fn bare_expression_is_wrapped_in_a_print() {
        let mut state = SessionState::new();
        state.pending_expression = "1 + 2 * 3".into();
        shape_pending(&mut state);
        assert!(state.statements.is_empty());
        assert_eq!(
            state.pending_expression,
            "System.out.println( 1 + 2 * 3 );"
        );
    }

    #[test]
    fn guarded_conditional_prints_the_consequent() {
        let mut state = SessionState::new();
        state.pending_expression = "if ( x == 7 )\nx".into();
        shape_pending(&mut state);
        assert_eq!(
            state.pending_expression,
            "if ( x == 7 )\n    System.out.println( x );"
        );
    }

    #[test]
    fn single_line_if_falls_back_to_a_whole_wrap() {
        let mut state = SessionState::new();
        state.pending_expression = "if ( x == 7 ) x".into();
        shape_pending(&mut state);
        assert_eq!(
            state.pending_expression,
            "System.out.println( if ( x == 7 ) x );"
        );
    }

    #[test]
    fn empty_pending_still_prints_a_turn_marker() {
        let mut state = SessionState::new();
        shape_pending(&mut state);
        assert_eq!(state.pending_expression, "System.out.println(  );");
    }

    #[test]
    fn render_places_every_slot() {
        let mut state = SessionState::new();
        state.imports.push("import java.util.*;".into());
        state.statements.push("int x = 7;".into());
        state
            .methods
            .push("static int sqr( int x ) {\n    return x * x;\n}".into());
        state.pending_expression = "System.out.println( sqr(12) );".into();

        let program = render(&state);

        assert!(program.starts_with("import java.util.*;\n"));
        assert!(program.contains("public class Jig {"));
        assert!(program.contains("    public static void main( String[] args ) {"));
        assert!(program.contains("        int x = 7;"));
        assert!(program.contains("        System.out.println( sqr(12) );"));
        assert!(program.contains("    static int sqr( int x ) {"));
        assert!(program.contains("\n        return x * x;"));
        assert!(program.ends_with("}\n"));
    }

    #[test]
    fn render_of_the_empty_session_is_still_a_program() {
        let program = render(&SessionState::new());
        assert!(program.contains("public class Jig {"));
        assert!(program.contains("public static void main( String[] args ) {"));
    }
}
