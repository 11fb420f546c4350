//! Node Translator
//!
//! Walks a [`SyntaxNode`] tree depth-first and streams markup for the three
//! recognized kinds. Everything else is descended generically.

use super::resolver::{resolve_call_target, PRINT_BUILTIN};
use super::CompileReport;
use crate::domain::ast::{Call, FunctionDef, SyntaxNode};
use crate::domain::diagnostic::Diagnostic;
use crate::domain::markup::ElementKind;
use crate::ports::{DiagnosticSink, MarkupWriter};
use std::io::{Result, Write};

#[derive(Default)]
pub struct Translator<'s> {
    targets: usize,
    diagnostics: Vec<Diagnostic>,
    sink: Option<&'s mut dyn DiagnosticSink>,
}

impl<'s> Translator<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translator that also forwards every diagnostic to `sink` as it is recorded.
    pub fn with_sink(sink: &'s mut dyn DiagnosticSink) -> Self {
        Self {
            sink: Some(sink),
            ..Self::default()
        }
    }

    pub fn visit<W: Write>(&mut self, node: &SyntaxNode, out: &mut MarkupWriter<W>) -> Result<()> {
        match node {
            SyntaxNode::FunctionDef(def) => self.visit_function_def(node, def, out),
            SyntaxNode::Call(call) => self.visit_call(node, call, out),
            SyntaxNode::Name(_) => Ok(()),
            SyntaxNode::Other(_) => self.generic_visit(node, out),
        }
    }

    /// Visit every child, emitting nothing for `node` itself.
    pub fn generic_visit<W: Write>(
        &mut self,
        node: &SyntaxNode,
        out: &mut MarkupWriter<W>,
    ) -> Result<()> {
        for child in node.children() {
            self.visit(child, out)?;
        }
        Ok(())
    }

    pub fn finish(self) -> CompileReport {
        CompileReport {
            targets: self.targets,
            diagnostics: self.diagnostics,
        }
    }

    fn visit_function_def<W: Write>(
        &mut self,
        node: &SyntaxNode,
        def: &FunctionDef,
        out: &mut MarkupWriter<W>,
    ) -> Result<()> {
        tracing::debug!(name = %def.name, depth = out.depth(), "translating target");
        self.targets += 1;

        let mut target = out.open_element(
            ElementKind::Target,
            &[("Name", def.name.as_str()), ("Returns", "")],
        )?;
        self.generic_visit(node, &mut *target)?;
        target.close()
    }

    fn visit_call<W: Write>(
        &mut self,
        node: &SyntaxNode,
        call: &Call,
        out: &mut MarkupWriter<W>,
    ) -> Result<()> {
        let name = match resolve_call_target(&call.callee) {
            Ok(name) => name,
            Err(err) => {
                tracing::debug!(%err, "skipping call");
                self.record(Diagnostic::from(err));
                return Ok(());
            }
        };

        if name == PRINT_BUILTIN {
            let text = message_text(&call.args);
            return out.emit_leaf(ElementKind::Message, &[("Text", text.as_str())]);
        }

        out.emit_leaf(ElementKind::CallTarget, &[("Targets", name)])?;
        self.generic_visit(node, out)
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.report(&diagnostic);
        }
        self.diagnostics.push(diagnostic);
    }
}

/// Diagnostic rendering of a `print` call's arguments.
fn message_text(args: &[SyntaxNode]) -> String {
    let rendered: Vec<String> = args.iter().map(SyntaxNode::describe).collect();
    format!("BONK from [{}]", rendered.join(", "))
}
