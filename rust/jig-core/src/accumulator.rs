//! Multi-line input accumulation.

use std::sync::OnceLock;

use regex::Regex;

/// A bare `if`/`for`/`while` header: parenthesized condition, no opening
/// brace, nothing after the closing paren. Such a line must be followed by
/// its guarded statement before the block can close.
fn bare_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(if|for|while)\s*\(.*\)\s*$").unwrap())
}

/// Collects raw input lines until they form a closed block.
///
/// Depth goes up when a trimmed line ends with `{` and down when it starts
/// with or ends with `}` (a `} else {` line nets zero). An excess of closing
/// braces drives the depth negative; that is carried forward rather than
/// rejected — malformed input degrades, it is not refused.
#[derive(Debug, Default)]
pub struct LineAccumulator {
    buffer: String,
    depth: i32,
}

impl LineAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while lines are being collected into an open block.
    pub fn is_collecting(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Current brace depth, negative when closing braces are in excess.
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Feed one raw line. Returns the whole block once it closes, clearing
    /// the buffer; `None` while more lines are needed.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim_end();
        self.buffer.push_str(line);
        self.buffer.push('\n');

        let trimmed = line.trim();
        if trimmed.starts_with('}') || trimmed.ends_with('}') {
            self.depth -= 1;
        }
        if trimmed.ends_with('{') {
            self.depth += 1;
        }

        if self.depth == 0 && !bare_header_re().is_match(line) {
            Some(std::mem::take(&mut self.buffer))
        } else {
            None
        }
    }
}
