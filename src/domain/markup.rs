// Markup vocabulary emitted by pymsbuild.

/// Element names of the project-description format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Project,
    Target,
    CallTarget,
    Message,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Project => "Project",
            ElementKind::Target => "Target",
            ElementKind::CallTarget => "CallTarget",
            ElementKind::Message => "Message",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An attribute as written: name and verbatim value.
pub type Attribute<'a> = (&'a str, &'a str);
