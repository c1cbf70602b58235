//! Accumulated session state and its last-known-good snapshot.

use std::collections::HashMap;

/// The rollback target: the fragment lists as of the last turn whose program
/// both compiled and ran cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub imports: Vec<String>,
    pub methods: Vec<String>,
    pub statements: Vec<String>,
}

/// Everything folded into the running program so far.
///
/// The fragment lists are append-only within a turn; only an explicit clear
/// or a rollback rewrites them. At most one pending expression exists at a
/// time and it is consumed by every synthesis cycle.
#[derive(Debug, Default)]
pub struct SessionState {
    pub imports: Vec<String>,
    pub methods: Vec<String>,
    pub statements: Vec<String>,
    pub pending_expression: String,
    registry: HashMap<String, String>,
    snapshot: Snapshot,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop statements and the pending expression. Imports, methods, and the
    /// registry survive a clear.
    pub fn clear_statements(&mut self) {
        self.statements.clear();
        self.pending_expression.clear();
    }

    /// Record source text under a name for later `source(name)` lookup.
    /// The registry only ever grows; entries are overwritten, never removed.
    pub fn register(&mut self, name: &str, source: &str) {
        self.registry.insert(name.to_string(), source.to_string());
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.registry.get(name).map(String::as_str)
    }

    pub fn registry_len(&self) -> usize {
        self.registry.len()
    }

    /// Checkpoint the current fragment lists as the last known-good state.
    pub fn take_snapshot(&mut self) {
        self.snapshot = Snapshot {
            imports: self.imports.clone(),
            methods: self.methods.clone(),
            statements: self.statements.clone(),
        };
    }

    /// Roll the fragment lists back to the last known-good state. The
    /// snapshot itself is left untouched.
    pub fn restore_snapshot(&mut self) {
        self.imports = self.snapshot.imports.clone();
        self.methods = self.snapshot.methods.clone();
        self.statements = self.snapshot.statements.clone();
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}
