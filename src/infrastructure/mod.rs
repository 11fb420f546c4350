// Infrastructure implementations for pymsbuild.

pub mod python_parser;
pub mod source_loader;

pub use python_parser::PythonAstParser;
pub use source_loader::SourceLoader;
