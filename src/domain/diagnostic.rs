//! Recoverable problems recorded while translating a tree.

use serde::Serialize;

/// A call whose callee is not a plain identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("call target is not a plain name (found {kind})")]
pub struct UnresolvedCallTarget {
    /// Node kind found in callee position.
    pub kind: &'static str,
}

/// Diagnostic reported on the error channel; the compilation continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnresolvedCallTarget,
}

impl From<UnresolvedCallTarget> for Diagnostic {
    fn from(err: UnresolvedCallTarget) -> Self {
        Diagnostic {
            kind: DiagnosticKind::UnresolvedCallTarget,
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
