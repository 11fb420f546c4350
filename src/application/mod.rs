// Compile use case: source text in, project markup out.

pub mod resolver;
pub mod translator;

use crate::common::config::CompilerConfig;
use crate::common::error::Result;
use crate::domain::ast::SyntaxNode;
use crate::domain::diagnostic::Diagnostic;
use crate::domain::markup::ElementKind;
use crate::infrastructure::{PythonAstParser, SourceLoader};
use crate::ports::{DiagnosticSink, MarkupWriter, SourceParser};
use std::io::Write;
use std::path::Path;
use translator::Translator;

/// Outcome of a successful compilation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileReport {
    /// Number of `Target` elements written.
    pub targets: usize,
    /// Recovered problems, in traversal order.
    pub diagnostics: Vec<Diagnostic>,
}

pub struct CompileUsecase<'a> {
    pub parser: &'a dyn SourceParser,
    pub config: CompilerConfig,
}

impl<'a> CompileUsecase<'a> {
    /// Parse `source` and stream its markup into `out`.
    /// Nothing is written when parsing fails. Diagnostics reach `sink` as
    /// they are recorded, even if a later write fails.
    pub fn run<W: Write>(
        &self,
        source: &str,
        source_path: &str,
        out: W,
        sink: Option<&mut dyn DiagnosticSink>,
    ) -> Result<CompileReport> {
        let tree = self.parser.parse(source, source_path)?;
        let mut writer = MarkupWriter::with_indent(out, self.config.indent_unit());
        let report = compile_tree(&tree, &mut writer, &self.config, sink)?;
        writer.flush()?;
        Ok(report)
    }
}

/// Translate `tree` under a freshly opened `Project` element.
pub fn compile_tree<W: Write>(
    tree: &SyntaxNode,
    out: &mut MarkupWriter<W>,
    config: &CompilerConfig,
    sink: Option<&mut dyn DiagnosticSink>,
) -> Result<CompileReport> {
    let mut project = out.open_element(
        ElementKind::Project,
        &[("DefaultTargets", config.default_targets.as_str())],
    )?;
    let mut translator = match sink {
        Some(sink) => Translator::with_sink(sink),
        None => Translator::new(),
    };
    translator.visit(tree, &mut *project)?;
    project.close()?;

    let report = translator.finish();
    tracing::debug!(
        targets = report.targets,
        diagnostics = report.diagnostics.len(),
        "compilation finished"
    );
    Ok(report)
}

/// Compile Python source held in memory.
pub fn compile_str<W: Write>(source: &str, out: W, config: &CompilerConfig) -> Result<CompileReport> {
    let usecase = CompileUsecase {
        parser: &PythonAstParser,
        config: config.clone(),
    };
    usecase.run(source, "<string>", out, None)
}

/// Compile a Python source file.
pub fn compile_file<W: Write>(path: &Path, out: W, config: &CompilerConfig) -> Result<CompileReport> {
    compile_file_inner(path, out, config, None)
}

/// Like [`compile_file`], reporting each diagnostic to `sink` as soon as it
/// is recorded.
pub fn compile_file_with_sink<W: Write>(
    path: &Path,
    out: W,
    config: &CompilerConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<CompileReport> {
    compile_file_inner(path, out, config, Some(sink))
}

fn compile_file_inner<W: Write>(
    path: &Path,
    out: W,
    config: &CompilerConfig,
    sink: Option<&mut dyn DiagnosticSink>,
) -> Result<CompileReport> {
    let source = SourceLoader::load(path)?;
    let usecase = CompileUsecase {
        parser: &PythonAstParser,
        config: config.clone(),
    };
    usecase.run(&source, &path.display().to_string(), out, sink)
}
