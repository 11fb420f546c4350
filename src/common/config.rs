/// Settings for one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Value of the root `Project` element's `DefaultTargets` attribute.
    pub default_targets: String,
    /// Spaces per nesting level.
    pub indent_width: usize,
}

impl CompilerConfig {
    pub const DEFAULT_TARGETS: &'static str = "Main";
    pub const DEFAULT_INDENT_WIDTH: usize = 2;

    pub fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            default_targets: Self::DEFAULT_TARGETS.to_string(),
            indent_width: Self::DEFAULT_INDENT_WIDTH,
        }
    }
}
