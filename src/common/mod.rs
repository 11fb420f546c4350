pub mod config;
pub mod error;

pub use config::CompilerConfig;
pub use error::CompileError;
