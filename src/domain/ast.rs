// Syntax tree consumed by the pymsbuild translator.
// Parser adapters lower the host language AST into these nodes; only three
// kinds carry meaning, every other construct is kept as `Other` so its
// children can still be walked.

/// A node in the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    FunctionDef(FunctionDef),
    Call(Call),
    Name(Name),
    Other(Other),
}

/// `def name(...): body`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    /// Parameter annotations and default values.
    pub arguments: Vec<SyntaxNode>,
    pub body: Vec<SyntaxNode>,
    pub decorators: Vec<SyntaxNode>,
    pub returns: Option<Box<SyntaxNode>>,
}

/// `callee(args...)`
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Box<SyntaxNode>,
    /// Positional arguments followed by `keyword` wrapper nodes.
    pub args: Vec<SyntaxNode>,
}

/// A plain identifier reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    pub id: String,
}

/// Any construct without a dedicated variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Other {
    /// Host node kind, e.g. `If`, `Attribute`, `Constant`.
    pub kind: &'static str,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn function_def(name: impl Into<String>, body: Vec<SyntaxNode>) -> Self {
        SyntaxNode::FunctionDef(FunctionDef {
            name: name.into(),
            arguments: Vec::new(),
            body,
            decorators: Vec::new(),
            returns: None,
        })
    }

    pub fn call(callee: SyntaxNode, args: Vec<SyntaxNode>) -> Self {
        SyntaxNode::Call(Call {
            callee: Box::new(callee),
            args,
        })
    }

    pub fn name(id: impl Into<String>) -> Self {
        SyntaxNode::Name(Name { id: id.into() })
    }

    pub fn other(kind: &'static str, children: Vec<SyntaxNode>) -> Self {
        SyntaxNode::Other(Other { kind, children })
    }

    /// Root node wrapping a module's top-level statements.
    pub fn module(body: Vec<SyntaxNode>) -> Self {
        Self::other("Module", body)
    }

    /// Kind name as the host AST spells it.
    pub fn kind(&self) -> &'static str {
        match self {
            SyntaxNode::FunctionDef(_) => "FunctionDef",
            SyntaxNode::Call(_) => "Call",
            SyntaxNode::Name(_) => "Name",
            SyntaxNode::Other(other) => other.kind,
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&SyntaxNode> {
        match self {
            SyntaxNode::FunctionDef(def) => def
                .arguments
                .iter()
                .chain(def.body.iter())
                .chain(def.decorators.iter())
                .chain(def.returns.as_deref())
                .collect(),
            SyntaxNode::Call(call) => std::iter::once(call.callee.as_ref())
                .chain(call.args.iter())
                .collect(),
            SyntaxNode::Name(_) => Vec::new(),
            SyntaxNode::Other(other) => other.children.iter().collect(),
        }
    }

    /// Short human-readable rendering used in diagnostic text.
    /// Never includes literal values.
    pub fn describe(&self) -> String {
        match self {
            SyntaxNode::FunctionDef(def) => format!("FunctionDef(name='{}')", def.name),
            SyntaxNode::Call(call) => format!("Call(func={})", call.callee.describe()),
            SyntaxNode::Name(name) => format!("Name(id='{}')", name.id),
            SyntaxNode::Other(other) => other.kind.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(SyntaxNode::name("x").kind(), "Name");
        assert_eq!(SyntaxNode::function_def("f", vec![]).kind(), "FunctionDef");
        assert_eq!(SyntaxNode::call(SyntaxNode::name("f"), vec![]).kind(), "Call");
        assert_eq!(SyntaxNode::other("Attribute", vec![]).kind(), "Attribute");
        assert_eq!(SyntaxNode::module(vec![]).kind(), "Module");
    }

    #[test]
    fn test_function_children_follow_field_order() {
        let def = SyntaxNode::FunctionDef(FunctionDef {
            name: "f".to_string(),
            arguments: vec![SyntaxNode::call(SyntaxNode::name("setup"), vec![])],
            body: vec![SyntaxNode::other("Pass", vec![])],
            decorators: vec![SyntaxNode::name("decorator")],
            returns: Some(Box::new(SyntaxNode::name("int"))),
        });
        let kinds: Vec<String> = def.children().iter().map(|c| c.describe()).collect();
        assert_eq!(
            kinds,
            vec![
                "Call(func=Name(id='setup'))",
                "Pass",
                "Name(id='decorator')",
                "Name(id='int')"
            ]
        );
    }

    #[test]
    fn test_call_children_start_with_callee() {
        let call = SyntaxNode::call(
            SyntaxNode::name("foo"),
            vec![SyntaxNode::other("Constant", vec![])],
        );
        let children = call.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], &SyntaxNode::name("foo"));
    }

    #[test]
    fn test_describe() {
        let nested = SyntaxNode::call(SyntaxNode::name("g"), vec![]);
        assert_eq!(nested.describe(), "Call(func=Name(id='g'))");
        assert_eq!(SyntaxNode::other("Constant", vec![]).describe(), "Constant");
    }
}
