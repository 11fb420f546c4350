//! Identifier resolution for call targets.

use crate::domain::ast::SyntaxNode;
use crate::domain::diagnostic::UnresolvedCallTarget;

/// Callee name that produces a `Message` instead of a `CallTarget`.
pub const PRINT_BUILTIN: &str = "print";

/// Name of the callee if it is a plain identifier reference.
pub fn resolve_call_target(callee: &SyntaxNode) -> Result<&str, UnresolvedCallTarget> {
    match callee {
        SyntaxNode::Name(name) => Ok(name.id.as_str()),
        other => Err(UnresolvedCallTarget { kind: other.kind() }),
    }
}
