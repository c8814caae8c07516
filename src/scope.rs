use alloc::string::{String, ToString as _};
use alloc::vec::Vec;

use crate::parser::ScriptLine;

/// Target name used when the invocation does not request any.
pub const DEFAULT_TARGET: &str = "default";

/// Tracks which target segment of the script is being read and whether
/// the calls in it should run.
///
/// Calls before the first label always run. After that, a call runs only
/// if the most recent label names one of the requested targets.
#[derive(Debug, Clone)]
pub struct ExecutionScope {
    requested: Vec<String>,
    active: Option<String>,
}

impl ExecutionScope {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut requested: Vec<String> = targets.into_iter().map(Into::into).collect();
        if requested.is_empty() {
            requested.push(DEFAULT_TARGET.to_string());
        }
        Self {
            requested,
            active: None,
        }
    }

    pub fn requested(&self) -> &[String] {
        &self.requested
    }

    pub fn observe(&mut self, line: &ScriptLine) {
        if let ScriptLine::TargetLabel { name } = line {
            self.active = Some(name.clone());
        }
    }

    /// Whether the segment the scope currently sits in is selected.
    pub fn is_active(&self) -> bool {
        match &self.active {
            None => true,
            Some(label) => self.requested.iter().any(|target| target == label),
        }
    }

    pub fn applies(&self, line: &ScriptLine) -> bool {
        line.is_call() && self.is_active()
    }
}

impl Default for ExecutionScope {
    fn default() -> Self {
        Self::new(core::iter::empty::<String>())
    }
}
