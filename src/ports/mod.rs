use crate::common::error::Result;
use crate::domain::ast::SyntaxNode;
use crate::domain::diagnostic::Diagnostic;

pub mod markup_writer;

pub use markup_writer::{ElementScope, MarkupWriter};

/// Turns source text into a syntax tree.
pub trait SourceParser {
    /// `source_path` is only used in error messages.
    fn parse(&self, source: &str, source_path: &str) -> Result<SyntaxNode>;
}

/// Receives each diagnostic the moment it is recorded, so diagnostics
/// survive a compilation that later fails.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}
