//! Heuristic fragment classification.
//!
//! Only the first line of a closed block is inspected. Matchers run in a
//! fixed priority order; the first predicate that accepts the line wins and
//! its extractor produces the tagged fragment. Ambiguous input can land in
//! the wrong slot — that surfaces later as a compile failure, never here.

use std::sync::OnceLock;

use regex::Regex;

/// One classified unit of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// `source(name)` / `src(name)` — show the stored text for `name`.
    /// The empty name denotes the whole synthesized program.
    Source(String),
    /// `clear` / `clr` / `clear()` — drop statements and the pending expression.
    Clear,
    /// `exit` / `exit()` / `System.exit(..)` — end the session.
    Exit,
    /// An `import …;` line; the whole block is kept verbatim.
    Import,
    /// A method definition; `name` is the token before the parameter list.
    Method { name: String },
    /// A `class`/`interface` definition, compiled as its own unit.
    Type { name: String },
    /// Anything else: a statement or expression awaiting synthesis.
    Expression,
}

fn source_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(source|src)\s*\((.*)\)\s*;?\s*$").unwrap())
}

fn clear_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(clear|clr)\s*(\(\))?\s*;?\s*$").unwrap())
}

fn exit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(exit\s*(\(\))?|System\.exit\s*\(.*\))\s*;?\s*$").unwrap())
}

fn import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^import\b.*;\s*$").unwrap())
}

fn method_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(.*\)\s*\{").unwrap())
}

fn type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(class|interface)\s+\S.*\{").unwrap())
}

/// Classify a closed block by its first line.
pub fn classify(block: &str) -> Fragment {
    let first = block.lines().next().unwrap_or("").trim();

    if let Some(caps) = source_re().captures(first) {
        return Fragment::Source(caps[2].trim().to_string());
    }
    if clear_re().is_match(first) {
        return Fragment::Clear;
    }
    if exit_re().is_match(first) {
        return Fragment::Exit;
    }
    if import_re().is_match(first) {
        return Fragment::Import;
    }
    if !starts_with_control_keyword(first) && method_re().is_match(first) {
        if let Some(name) = method_name(first) {
            return Fragment::Method { name };
        }
    }
    if type_re().is_match(first) {
        if let Some(name) = type_name(first) {
            return Fragment::Type { name };
        }
    }
    Fragment::Expression
}

/// A leading `if`/`for`/`do`/`while` rules the method matcher out; control
/// headers carry parameter-list lookalikes.
fn starts_with_control_keyword(line: &str) -> bool {
    let word: String = line
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    matches!(word.as_str(), "if" | "for" | "do" | "while")
}

/// The token immediately preceding the parameter list.
fn method_name(line: &str) -> Option<String> {
    let head = &line[..line.find('(')?];
    let name = head.split_whitespace().last()?;
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// The identifier after the `class`/`interface` keyword, tolerating
/// `extends`/`implements` clauses and generics.
fn type_name(line: &str) -> Option<String> {
    let mut words = line.split_whitespace();
    while let Some(word) = words.next() {
        if word == "class" || word == "interface" {
            let raw = words.next()?;
            let cleaned = raw.split(&['{', '<', '('][..]).next().unwrap_or("");
            if cleaned.is_empty() {
                return None;
            }
            return Some(cleaned.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_lookup_extracts_name() {
        assert_eq!(classify("source(Point)\n"), Fragment::Source("Point".into()));
        assert_eq!(classify("src( sqr );\n"), Fragment::Source("sqr".into()));
        assert_eq!(classify("source()\n"), Fragment::Source(String::new()));
    }

    #[test]
    fn clear_variants() {
        assert_eq!(classify("clear\n"), Fragment::Clear);
        assert_eq!(classify("clr\n"), Fragment::Clear);
        assert_eq!(classify("clear()\n"), Fragment::Clear);
        assert_eq!(classify("clr();\n"), Fragment::Clear);
    }

    #[test]
    fn exit_variants() {
        assert_eq!(classify("exit\n"), Fragment::Exit);
        assert_eq!(classify("exit()\n"), Fragment::Exit);
        assert_eq!(classify("exit();\n"), Fragment::Exit);
        assert_eq!(classify("System.exit(0);\n"), Fragment::Exit);
    }

    #[test]
    fn import_line() {
        assert_eq!(classify("import java.util.*;\n"), Fragment::Import);
        assert_eq!(classify("import java.util.List;\n"), Fragment::Import);
    }

    #[test]
    fn method_definitions_extract_the_name() {
        assert_eq!(
            classify("public static int sqr( int x ) {\n    return x * x;\n}\n"),
            Fragment::Method { name: "sqr".into() }
        );
        assert_eq!(
            classify("private int increment( int x ) {\n    return x + 1;\n}\n"),
            Fragment::Method {
                name: "increment".into()
            }
        );
    }

    #[test]
    fn control_headers_are_not_methods() {
        assert_eq!(classify("if ( x ) {\n    y();\n}\n"), Fragment::Expression);
        assert_eq!(
            classify("for( int i = 0; i < 4; i++ ) {\n}\n"),
            Fragment::Expression
        );
        assert_eq!(classify("do {\n} while ( i-- > 0 );\n"), Fragment::Expression);
        assert_eq!(
            classify("while( i > 1 ) {\n    i--;\n}\n"),
            Fragment::Expression
        );
    }

    #[test]
    fn dowork_is_not_a_control_keyword() {
        assert_eq!(
            classify("void dowork( int x ) {\n}\n"),
            Fragment::Method {
                name: "dowork".into()
            }
        );
    }

    #[test]
    fn type_definitions_extract_the_name() {
        assert_eq!(
            classify("public class Point {\n}\n"),
            Fragment::Type {
                name: "Point".into()
            }
        );
        assert_eq!(
            classify("public class TestClass implements TestInterface {\n}\n"),
            Fragment::Type {
                name: "TestClass".into()
            }
        );
        assert_eq!(
            classify("public interface TestInterface {\n}\n"),
            Fragment::Type {
                name: "TestInterface".into()
            }
        );
        assert_eq!(
            classify("class Foo{\n}\n"),
            Fragment::Type { name: "Foo".into() }
        );
    }

    #[test]
    fn everything_else_is_an_expression() {
        assert_eq!(classify("1 + 2 * 3\n"), Fragment::Expression);
        assert_eq!(classify("int x = 7;\n"), Fragment::Expression);
        assert_eq!(classify("int[] A = {1, 2, 3, 4};\n"), Fragment::Expression);
        assert_eq!(classify("new JI().increment( 11 )\n"), Fragment::Expression);
        assert_eq!(classify("\n"), Fragment::Expression);
    }

    #[test]
    fn unbraced_guard_block_is_an_expression() {
        assert_eq!(classify("if ( x == 7 )\nx\n"), Fragment::Expression);
    }
}
