//! Python parser adapter.
//!
//! Runs `rustpython-parser` over the source text and lowers its AST into
//! [`SyntaxNode`]. Function definitions, calls and names keep their own
//! variants; every other construct becomes `Other` with its sub-nodes in
//! field order, so calls nested anywhere in a statement are still reachable.

use crate::common::error::{CompileError, Result};
use crate::domain::ast::{self, SyntaxNode};
use crate::ports::SourceParser;
use rustpython_parser::ast::{Arg, Arguments, Comprehension, ExceptHandler, Expr, Keyword, Stmt};
use rustpython_parser::Parse;

pub struct PythonAstParser;

impl SourceParser for PythonAstParser {
    fn parse(&self, source: &str, source_path: &str) -> Result<SyntaxNode> {
        let suite = rustpython_parser::ast::Suite::parse(source, source_path).map_err(|e| {
            CompileError::MalformedSource {
                path: source_path.to_string(),
                message: e.to_string(),
            }
        })?;
        tracing::debug!(path = source_path, statements = suite.len(), "parsed module");
        Ok(SyntaxNode::module(lower_stmts(&suite)))
    }
}

fn lower_stmts(stmts: &[Stmt]) -> Vec<SyntaxNode> {
    stmts.iter().map(lower_stmt).collect()
}

fn lower_exprs(exprs: &[Expr]) -> Vec<SyntaxNode> {
    exprs.iter().map(lower_expr).collect()
}

fn lower_opt(expr: &Option<Box<Expr>>) -> Option<SyntaxNode> {
    expr.as_deref().map(lower_expr)
}

fn lower_stmt(stmt: &Stmt) -> SyntaxNode {
    match stmt {
        Stmt::FunctionDef(def) => SyntaxNode::FunctionDef(ast::FunctionDef {
            name: def.name.as_str().to_string(),
            arguments: lower_arguments(&def.args),
            body: lower_stmts(&def.body),
            decorators: lower_exprs(&def.decorator_list),
            returns: lower_opt(&def.returns).map(Box::new),
        }),
        // `async def` is its own kind and gets no Target.
        Stmt::AsyncFunctionDef(def) => SyntaxNode::other(
            "AsyncFunctionDef",
            lower_arguments(&def.args)
                .into_iter()
                .chain(lower_stmts(&def.body))
                .chain(lower_exprs(&def.decorator_list))
                .chain(lower_opt(&def.returns))
                .collect(),
        ),
        Stmt::ClassDef(def) => SyntaxNode::other(
            "ClassDef",
            lower_exprs(&def.bases)
                .into_iter()
                .chain(def.keywords.iter().map(lower_keyword))
                .chain(lower_stmts(&def.body))
                .chain(lower_exprs(&def.decorator_list))
                .collect(),
        ),
        Stmt::Return(s) => SyntaxNode::other("Return", lower_opt(&s.value).into_iter().collect()),
        Stmt::Delete(s) => SyntaxNode::other("Delete", lower_exprs(&s.targets)),
        Stmt::Assign(s) => SyntaxNode::other(
            "Assign",
            lower_exprs(&s.targets)
                .into_iter()
                .chain(std::iter::once(lower_expr(&s.value)))
                .collect(),
        ),
        Stmt::AugAssign(s) => {
            SyntaxNode::other("AugAssign", vec![lower_expr(&s.target), lower_expr(&s.value)])
        }
        Stmt::AnnAssign(s) => SyntaxNode::other(
            "AnnAssign",
            vec![lower_expr(&s.target), lower_expr(&s.annotation)]
                .into_iter()
                .chain(lower_opt(&s.value))
                .collect(),
        ),
        Stmt::For(s) => lower_loop("For", &s.target, &s.iter, &s.body, &s.orelse),
        Stmt::AsyncFor(s) => lower_loop("AsyncFor", &s.target, &s.iter, &s.body, &s.orelse),
        Stmt::While(s) => lower_branch("While", &s.test, &s.body, &s.orelse),
        Stmt::If(s) => lower_branch("If", &s.test, &s.body, &s.orelse),
        Stmt::With(s) => SyntaxNode::other(
            "With",
            s.items
                .iter()
                .flat_map(|item| {
                    std::iter::once(lower_expr(&item.context_expr))
                        .chain(lower_opt(&item.optional_vars))
                })
                .chain(lower_stmts(&s.body))
                .collect(),
        ),
        Stmt::AsyncWith(s) => SyntaxNode::other(
            "AsyncWith",
            s.items
                .iter()
                .flat_map(|item| {
                    std::iter::once(lower_expr(&item.context_expr))
                        .chain(lower_opt(&item.optional_vars))
                })
                .chain(lower_stmts(&s.body))
                .collect(),
        ),
        Stmt::Match(s) => SyntaxNode::other(
            "Match",
            std::iter::once(lower_expr(&s.subject))
                .chain(s.cases.iter().map(|case| {
                    SyntaxNode::other(
                        "match_case",
                        lower_opt(&case.guard)
                            .into_iter()
                            .chain(lower_stmts(&case.body))
                            .collect(),
                    )
                }))
                .collect(),
        ),
        Stmt::Raise(s) => SyntaxNode::other(
            "Raise",
            lower_opt(&s.exc).into_iter().chain(lower_opt(&s.cause)).collect(),
        ),
        Stmt::Try(s) => lower_try("Try", &s.body, &s.handlers, &s.orelse, &s.finalbody),
        Stmt::TryStar(s) => lower_try("TryStar", &s.body, &s.handlers, &s.orelse, &s.finalbody),
        Stmt::Assert(s) => SyntaxNode::other(
            "Assert",
            std::iter::once(lower_expr(&s.test)).chain(lower_opt(&s.msg)).collect(),
        ),
        Stmt::Expr(s) => SyntaxNode::other("Expr", vec![lower_expr(&s.value)]),
        Stmt::Import(_) => SyntaxNode::other("Import", Vec::new()),
        Stmt::ImportFrom(_) => SyntaxNode::other("ImportFrom", Vec::new()),
        Stmt::Global(_) => SyntaxNode::other("Global", Vec::new()),
        Stmt::Nonlocal(_) => SyntaxNode::other("Nonlocal", Vec::new()),
        Stmt::Pass(_) => SyntaxNode::other("Pass", Vec::new()),
        Stmt::Break(_) => SyntaxNode::other("Break", Vec::new()),
        Stmt::Continue(_) => SyntaxNode::other("Continue", Vec::new()),
        Stmt::TypeAlias(s) => {
            SyntaxNode::other("TypeAlias", vec![lower_expr(&s.name), lower_expr(&s.value)])
        }
    }
}

/// Annotations and defaults of a parameter list, in host field order:
/// positional and keyword-only annotations, keyword-only defaults, then
/// positional defaults.
fn lower_arguments(arguments: &Arguments) -> Vec<SyntaxNode> {
    let positional = || arguments.posonlyargs.iter().chain(arguments.args.iter());

    positional()
        .filter_map(|param| lower_annotation(&param.def))
        .chain(arguments.vararg.as_deref().and_then(lower_annotation))
        .chain(arguments.kwonlyargs.iter().filter_map(|param| lower_annotation(&param.def)))
        .chain(arguments.kwonlyargs.iter().filter_map(|param| lower_opt(&param.default)))
        .chain(arguments.kwarg.as_deref().and_then(lower_annotation))
        .chain(positional().filter_map(|param| lower_opt(&param.default)))
        .collect()
}

fn lower_annotation(arg: &Arg) -> Option<SyntaxNode> {
    lower_opt(&arg.annotation)
}

fn lower_loop(
    kind: &'static str,
    target: &Expr,
    iter: &Expr,
    body: &[Stmt],
    orelse: &[Stmt],
) -> SyntaxNode {
    SyntaxNode::other(
        kind,
        vec![lower_expr(target), lower_expr(iter)]
            .into_iter()
            .chain(lower_stmts(body))
            .chain(lower_stmts(orelse))
            .collect(),
    )
}

fn lower_branch(kind: &'static str, test: &Expr, body: &[Stmt], orelse: &[Stmt]) -> SyntaxNode {
    SyntaxNode::other(
        kind,
        std::iter::once(lower_expr(test))
            .chain(lower_stmts(body))
            .chain(lower_stmts(orelse))
            .collect(),
    )
}

fn lower_try(
    kind: &'static str,
    body: &[Stmt],
    handlers: &[ExceptHandler],
    orelse: &[Stmt],
    finalbody: &[Stmt],
) -> SyntaxNode {
    SyntaxNode::other(
        kind,
        lower_stmts(body)
            .into_iter()
            .chain(handlers.iter().map(lower_handler))
            .chain(lower_stmts(orelse))
            .chain(lower_stmts(finalbody))
            .collect(),
    )
}

fn lower_handler(handler: &ExceptHandler) -> SyntaxNode {
    match handler {
        ExceptHandler::ExceptHandler(h) => SyntaxNode::other(
            "ExceptHandler",
            lower_opt(&h.type_).into_iter().chain(lower_stmts(&h.body)).collect(),
        ),
    }
}

fn lower_keyword(keyword: &Keyword) -> SyntaxNode {
    SyntaxNode::other("keyword", vec![lower_expr(&keyword.value)])
}

fn lower_comprehension(kind: &'static str, elts: Vec<SyntaxNode>, generators: &[Comprehension]) -> SyntaxNode {
    SyntaxNode::other(
        kind,
        elts.into_iter()
            .chain(generators.iter().map(|generator| {
                SyntaxNode::other(
                    "comprehension",
                    vec![lower_expr(&generator.target), lower_expr(&generator.iter)]
                        .into_iter()
                        .chain(lower_exprs(&generator.ifs))
                        .collect(),
                )
            }))
            .collect(),
    )
}

fn lower_expr(expr: &Expr) -> SyntaxNode {
    match expr {
        Expr::Call(c) => SyntaxNode::Call(ast::Call {
            callee: Box::new(lower_expr(&c.func)),
            args: lower_exprs(&c.args)
                .into_iter()
                .chain(c.keywords.iter().map(lower_keyword))
                .collect(),
        }),
        Expr::Name(n) => SyntaxNode::name(n.id.as_str()),
        Expr::BoolOp(e) => SyntaxNode::other("BoolOp", lower_exprs(&e.values)),
        Expr::NamedExpr(e) => {
            SyntaxNode::other("NamedExpr", vec![lower_expr(&e.target), lower_expr(&e.value)])
        }
        Expr::BinOp(e) => SyntaxNode::other("BinOp", vec![lower_expr(&e.left), lower_expr(&e.right)]),
        Expr::UnaryOp(e) => SyntaxNode::other("UnaryOp", vec![lower_expr(&e.operand)]),
        Expr::Lambda(e) => SyntaxNode::other(
            "Lambda",
            lower_arguments(&e.args)
                .into_iter()
                .chain(std::iter::once(lower_expr(&e.body)))
                .collect(),
        ),
        Expr::IfExp(e) => SyntaxNode::other(
            "IfExp",
            vec![lower_expr(&e.test), lower_expr(&e.body), lower_expr(&e.orelse)],
        ),
        // `**spread` entries have no key.
        Expr::Dict(e) => SyntaxNode::other(
            "Dict",
            e.keys
                .iter()
                .flatten()
                .map(lower_expr)
                .chain(lower_exprs(&e.values))
                .collect(),
        ),
        Expr::Set(e) => SyntaxNode::other("Set", lower_exprs(&e.elts)),
        Expr::ListComp(e) => lower_comprehension("ListComp", vec![lower_expr(&e.elt)], &e.generators),
        Expr::SetComp(e) => lower_comprehension("SetComp", vec![lower_expr(&e.elt)], &e.generators),
        Expr::DictComp(e) => lower_comprehension(
            "DictComp",
            vec![lower_expr(&e.key), lower_expr(&e.value)],
            &e.generators,
        ),
        Expr::GeneratorExp(e) => {
            lower_comprehension("GeneratorExp", vec![lower_expr(&e.elt)], &e.generators)
        }
        Expr::Await(e) => SyntaxNode::other("Await", vec![lower_expr(&e.value)]),
        Expr::Yield(e) => SyntaxNode::other("Yield", lower_opt(&e.value).into_iter().collect()),
        Expr::YieldFrom(e) => SyntaxNode::other("YieldFrom", vec![lower_expr(&e.value)]),
        Expr::Compare(e) => SyntaxNode::other(
            "Compare",
            std::iter::once(lower_expr(&e.left))
                .chain(lower_exprs(&e.comparators))
                .collect(),
        ),
        Expr::FormattedValue(e) => SyntaxNode::other(
            "FormattedValue",
            std::iter::once(lower_expr(&e.value))
                .chain(lower_opt(&e.format_spec))
                .collect(),
        ),
        Expr::JoinedStr(e) => SyntaxNode::other("JoinedStr", lower_exprs(&e.values)),
        Expr::Constant(_) => SyntaxNode::other("Constant", Vec::new()),
        Expr::Attribute(e) => SyntaxNode::other("Attribute", vec![lower_expr(&e.value)]),
        Expr::Subscript(e) => {
            SyntaxNode::other("Subscript", vec![lower_expr(&e.value), lower_expr(&e.slice)])
        }
        Expr::Starred(e) => SyntaxNode::other("Starred", vec![lower_expr(&e.value)]),
        Expr::List(e) => SyntaxNode::other("List", lower_exprs(&e.elts)),
        Expr::Tuple(e) => SyntaxNode::other("Tuple", lower_exprs(&e.elts)),
        Expr::Slice(e) => SyntaxNode::other(
            "Slice",
            lower_opt(&e.lower)
                .into_iter()
                .chain(lower_opt(&e.upper))
                .chain(lower_opt(&e.step))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> SyntaxNode {
        PythonAstParser.parse(source, "<test>").unwrap()
    }

    fn body(module: &SyntaxNode) -> Vec<&SyntaxNode> {
        module.children()
    }

    #[test]
    fn test_module_root() {
        let module = parse("x = 1\n");
        assert_eq!(module.kind(), "Module");
        assert_eq!(body(&module)[0].kind(), "Assign");
    }

    #[test]
    fn test_function_def_lowered() {
        let module = parse("@deco\ndef main():\n    foo(1, 2)\n");
        match body(&module)[0] {
            SyntaxNode::FunctionDef(def) => {
                assert_eq!(def.name, "main");
                assert_eq!(def.body.len(), 1);
                assert_eq!(def.decorators, vec![SyntaxNode::name("deco")]);
            }
            other => panic!("expected FunctionDef, found {}", other.kind()),
        }
    }

    #[test]
    fn test_call_lowered_with_keywords() {
        let module = parse("foo(a, key=b)\n");
        let stmt = body(&module)[0];
        assert_eq!(stmt.kind(), "Expr");
        match stmt.children()[0] {
            SyntaxNode::Call(call) => {
                assert_eq!(*call.callee, SyntaxNode::name("foo"));
                assert_eq!(call.args.len(), 2);
                assert_eq!(call.args[0], SyntaxNode::name("a"));
                assert_eq!(call.args[1].kind(), "keyword");
            }
            other => panic!("expected Call, found {}", other.kind()),
        }
    }

    #[test]
    fn test_parameters_lowered_before_body() {
        let module = parse("def main(x: int = setup(), *, y=other()):\n    run()\n");
        match body(&module)[0] {
            SyntaxNode::FunctionDef(def) => {
                let kinds: Vec<String> = def.arguments.iter().map(SyntaxNode::describe).collect();
                assert_eq!(
                    kinds,
                    vec![
                        "Name(id='int')",
                        "Call(func=Name(id='other'))",
                        "Call(func=Name(id='setup'))"
                    ]
                );
                assert_eq!(def.body.len(), 1);
            }
            other => panic!("expected FunctionDef, found {}", other.kind()),
        }
    }

    #[test]
    fn test_dict_keys_precede_values() {
        let module = parse("{key(): value(), **rest}\n");
        let dict = body(&module)[0].children()[0];
        assert_eq!(dict.kind(), "Dict");
        let kinds: Vec<String> = dict.children().iter().map(|c| c.describe()).collect();
        assert_eq!(
            kinds,
            vec![
                "Call(func=Name(id='key'))",
                "Call(func=Name(id='value'))",
                "Name(id='rest')"
            ]
        );
    }

    #[test]
    fn test_lambda_keeps_defaults() {
        let module = parse("lambda a=compute(): a\n");
        let lambda = body(&module)[0].children()[0];
        assert_eq!(lambda.kind(), "Lambda");
        assert_eq!(
            lambda.children()[0],
            &SyntaxNode::call(SyntaxNode::name("compute"), vec![])
        );
    }

    #[test]
    fn test_type_alias_value_lowered() {
        let module = parse("type Alias = make_alias()\n");
        let alias = body(&module)[0];
        assert_eq!(alias.kind(), "TypeAlias");
        assert_eq!(
            alias.children()[1],
            &SyntaxNode::call(SyntaxNode::name("make_alias"), vec![])
        );
    }

    #[test]
    fn test_async_def_is_not_function_def() {
        let module = parse("async def worker():\n    pass\n");
        assert_eq!(body(&module)[0].kind(), "AsyncFunctionDef");
    }

    #[test]
    fn test_attribute_callee_kept() {
        let module = parse("obj.method()\n");
        match body(&module)[0].children()[0] {
            SyntaxNode::Call(call) => assert_eq!(call.callee.kind(), "Attribute"),
            other => panic!("expected Call, found {}", other.kind()),
        }
    }

    #[test]
    fn test_malformed_source() {
        let err = PythonAstParser.parse("def broken(:\n", "bad.py").unwrap_err();
        match err {
            CompileError::MalformedSource { path, .. } => assert_eq!(path, "bad.py"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
