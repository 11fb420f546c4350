// Main library entry point for pymsbuild.

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{
    compile_file, compile_file_with_sink, compile_str, compile_tree, CompileReport, CompileUsecase,
};
pub use common::{CompileError, CompilerConfig};
