use super::*;
use crate::parser::parse_program;

fn build(src: &str) -> Program {
    build_program(parse_program(src).expect(src)).expect(src)
}

#[test]
fn test_program_smoke() {
    build("1;");
}

#[test]
fn test_variable_decl_and_arithmetic() {
    let program = build("let x = 1 + 2 * 3;");
    assert_eq!(program.body.len(), 1);
    match &program.body[0].kind {
        StatementKind::VariableDeclaration { kind, declarators } => {
            assert_eq!(*kind, DeclKind::Let);
            assert_eq!(declarators.len(), 1);
            match &declarators[0].init {
                Some(Expr {
                    kind: ExprKind::Binary { op: BinaryOp::Add, right, .. },
                    ..
                }) => match &right.kind {
                    ExprKind::Binary { op: BinaryOp::Mul, .. } => {}
                    other => panic!("expected Mul on the right of Add, got {:?}", other),
                },
                other => panic!("expected a Binary Add init, got {:?}", other),
            }
        }
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_exponent_is_right_associative() {
    let program = build("let x = 2 ** 3 ** 2;");
    match &program.body[0].kind {
        StatementKind::VariableDeclaration { declarators, .. } => match &declarators[0].init {
            Some(Expr {
                kind: ExprKind::Binary { op: BinaryOp::Pow, right, .. },
                ..
            }) => match &right.kind {
                ExprKind::Binary { op: BinaryOp::Pow, .. } => {}
                other => panic!("expected nested Pow on the right, got {:?}", other),
            },
            other => panic!("expected a Pow init, got {:?}", other),
        },
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_member_and_call_chain() {
    let program = build("a.b(1, 2);");
    match &program.body[0].kind {
        StatementKind::Expression(Expr {
            kind: ExprKind::Call { callee, arguments, optional: false },
            ..
        }) => {
            assert_eq!(arguments.len(), 2);
            match &callee.kind {
                ExprKind::Member { property: MemberKey::Identifier(name), optional: false, .. } => {
                    assert_eq!(name, "b");
                }
                other => panic!("expected a Member callee, got {:?}", other),
            }
        }
        other => panic!("expected a Call expression statement, got {:?}", other),
    }
}

#[test]
fn test_optional_chain_wraps_in_chain_expression() {
    let program = build("a?.b.c;");
    match &program.body[0].kind {
        StatementKind::Expression(Expr { kind: ExprKind::Chain(_), .. }) => {}
        other => panic!("expected a Chain expression wrapping the member access, got {:?}", other),
    }
}

#[test]
fn test_chain_not_wrapped_without_optional_link() {
    let program = build("a.b.c;");
    match &program.body[0].kind {
        StatementKind::Expression(Expr { kind: ExprKind::Member { .. }, .. }) => {}
        other => panic!("expected a plain Member chain with no Chain wrapper, got {:?}", other),
    }
}

#[test]
fn test_if_else_and_while() {
    build(
        r#"
        if (x < 5) {
            x = x + 1;
        } else {
            while (x > 0) {
                x = x - 1;
            }
        }
        "#,
    );
}

#[test]
fn test_function_declaration() {
    let program = build("function add(a, b) { return a + b; }");
    match &program.body[0].kind {
        StatementKind::FunctionDeclaration(def) => {
            assert_eq!(def.name.as_deref(), Some("add"));
            assert_eq!(def.params.len(), 2);
            assert!(!def.is_async);
        }
        other => panic!("expected a function declaration, got {:?}", other),
    }
}

#[test]
fn test_async_function_is_parsed_and_flagged() {
    let program = build("async function f() { return 1; }");
    match &program.body[0].kind {
        StatementKind::FunctionDeclaration(def) => assert!(def.is_async),
        other => panic!("expected a function declaration, got {:?}", other),
    }
}

#[test]
fn test_arrow_function_expression_body() {
    let program = build("let f = x => x + 1;");
    match &program.body[0].kind {
        StatementKind::VariableDeclaration { declarators, .. } => match &declarators[0].init {
            Some(Expr { kind: ExprKind::Arrow { params, body }, .. }) => {
                assert_eq!(params.len(), 1);
                assert!(matches!(body, FunctionBody::Expression(_)));
            }
            other => panic!("expected an arrow function init, got {:?}", other),
        },
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_object_and_array_literals_with_spread() {
    let program = build("let o = {a: 1, b, ...rest};");
    match &program.body[0].kind {
        StatementKind::VariableDeclaration { declarators, .. } => match &declarators[0].init {
            Some(Expr { kind: ExprKind::Object(props), .. }) => {
                assert_eq!(props.len(), 3);
                assert!(matches!(props[1], ObjectProp::Shorthand(_)));
                assert!(matches!(props[2], ObjectProp::Spread(_)));
            }
            other => panic!("expected an object literal init, got {:?}", other),
        },
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_template_literal_quasis_and_expressions() {
    let program = build("let s = `a ${x} b ${y} c`;");
    match &program.body[0].kind {
        StatementKind::VariableDeclaration { declarators, .. } => match &declarators[0].init {
            Some(Expr {
                kind: ExprKind::TemplateLiteral { quasis, expressions },
                ..
            }) => {
                assert_eq!(quasis, &vec!["a ".to_string(), " b ".to_string(), " c".to_string()]);
                assert_eq!(expressions.len(), 2);
            }
            other => panic!("expected a template literal init, got {:?}", other),
        },
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_destructuring_pattern_is_parsed_not_rejected() {
    let program = build("let [a, b] = pair;");
    match &program.body[0].kind {
        StatementKind::VariableDeclaration { declarators, .. } => {
            assert!(matches!(declarators[0].pattern, Pattern::Array(_)));
        }
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_delete_and_update_expressions() {
    let program = build("delete a.b;");
    assert!(matches!(
        program.body[0].kind,
        StatementKind::Expression(Expr { kind: ExprKind::Delete(_), .. })
    ));

    let program = build("++a;");
    match &program.body[0].kind {
        StatementKind::Expression(Expr {
            kind: ExprKind::Update { prefix: true, .. },
            ..
        }) => {}
        other => panic!("expected a prefix Update expression, got {:?}", other),
    }

    let program = build("a++;");
    match &program.body[0].kind {
        StatementKind::Expression(Expr {
            kind: ExprKind::Update { prefix: false, .. },
            ..
        }) => {}
        other => panic!("expected a postfix Update expression, got {:?}", other),
    }
}
