//! Walks the `pest` parse tree produced by `parser::ScriptParser` into the
//! node types in `ast::node`. Every function here mirrors one (or a small
//! family of) grammar rule(s); the precedence cascade in `grammar.pest`
//! collapses into left-associative `Binary`/`Logical` folds here.

use pest::iterators::Pair;

use crate::error::{EvalError, Position};
use crate::parser::Rule;

pub mod node;

#[cfg(test)]
mod test;

use node::*;

fn pos(pair: &Pair<Rule>) -> Position {
    let (line, column) = pair.as_span().start_pos().line_col();
    Position { line, column }
}

fn unexpected_pair(pair: &Pair<Rule>) -> EvalError {
    EvalError::SyntaxError {
        message: format!("unexpected grammar node: {:?}", pair.as_rule()),
        at: Some(pos(pair)),
    }
}

/// Entry point: the root `Rule::program` pair produced by `parse_program`.
pub fn build_program(pair: Pair<Rule>) -> Result<Program, EvalError> {
    let body = pair
        .into_inner()
        .filter(|p| p.as_rule() != Rule::EOI)
        .map(build_statement)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Program { body })
}

pub fn build_statement(pair: Pair<Rule>) -> Result<Statement, EvalError> {
    let at = pos(&pair);
    match pair.as_rule() {
        Rule::statement => build_statement(pair.into_inner().next().expect("statement body")),
        Rule::variable_decl => build_variable_decl(pair),
        Rule::return_stmt => build_return(pair),
        Rule::if_stmt => build_if(pair),
        Rule::while_stmt => build_while(pair),
        Rule::function_decl => Ok(Statement {
            kind: StatementKind::FunctionDeclaration(build_function_def(pair)?),
            at,
        }),
        Rule::block => Ok(Statement {
            kind: StatementKind::Block(build_block(pair)?),
            at,
        }),
        Rule::expr_stmt => Ok(Statement {
            kind: StatementKind::Expression(build_assign_expr(
                pair.into_inner().next().expect("expr_stmt body"),
            )?),
            at,
        }),
        _ => Err(unexpected_pair(&pair)),
    }
}

fn build_block(pair: Pair<Rule>) -> Result<Vec<Statement>, EvalError> {
    pair.into_inner().map(build_statement).collect()
}

/// `if_branch`/`while_branch` wrap either a `block` or a bare `statement`;
/// both reduce to a single `Statement`, the block case wrapped in `Block`.
fn build_branch(pair: Pair<Rule>) -> Result<Statement, EvalError> {
    let inner = pair.into_inner().next().expect("branch body");
    build_statement(inner)
}

fn build_variable_decl(pair: Pair<Rule>) -> Result<Statement, EvalError> {
    let at = pos(&pair);
    let mut inner = pair.into_inner();
    let kind = match inner.next().expect("decl_kind").as_str() {
        "let" => DeclKind::Let,
        "const" => DeclKind::Const,
        "var" => DeclKind::Var,
        other => {
            return Err(EvalError::SyntaxError {
                message: format!("unknown declaration keyword: {}", other),
                at: Some(at),
            })
        }
    };

    let declarators = inner.map(build_declarator).collect::<Result<Vec<_>, _>>()?;
    Ok(Statement {
        kind: StatementKind::VariableDeclaration { kind, declarators },
        at,
    })
}

fn build_declarator(pair: Pair<Rule>) -> Result<Declarator, EvalError> {
    let at = pos(&pair);
    let mut inner = pair.into_inner();
    let pattern = build_pattern(inner.next().expect("declarator pattern"))?;
    let init = inner.next().map(build_assign_expr).transpose()?;
    Ok(Declarator { pattern, init, at })
}

fn build_pattern(pair: Pair<Rule>) -> Result<Pattern, EvalError> {
    match pair.as_rule() {
        Rule::pattern => build_pattern(pair.into_inner().next().expect("pattern body")),
        Rule::identifier => Ok(Pattern::Identifier(pair.as_str().to_string())),
        Rule::array_pattern => {
            let elements = pair
                .into_inner()
                .map(build_pattern)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Pattern::Array(elements))
        }
        Rule::object_pattern => {
            let names = pair.into_inner().map(|p| p.as_str().to_string()).collect();
            Ok(Pattern::Object(names))
        }
        _ => Err(unexpected_pair(&pair)),
    }
}

fn build_return(pair: Pair<Rule>) -> Result<Statement, EvalError> {
    let at = pos(&pair);
    let argument = pair.into_inner().next().map(build_assign_expr).transpose()?;
    Ok(Statement {
        kind: StatementKind::Return(argument),
        at,
    })
}

fn build_if(pair: Pair<Rule>) -> Result<Statement, EvalError> {
    let at = pos(&pair);
    let mut inner = pair.into_inner();
    let test = build_assign_expr(inner.next().expect("if test"))?;
    let consequent = Box::new(build_branch(inner.next().expect("if consequent"))?);
    let alternate = inner
        .next()
        .map(build_branch)
        .transpose()?
        .map(Box::new);
    Ok(Statement {
        kind: StatementKind::If {
            test,
            consequent,
            alternate,
        },
        at,
    })
}

fn build_while(pair: Pair<Rule>) -> Result<Statement, EvalError> {
    let at = pos(&pair);
    let mut inner = pair.into_inner();
    let test = build_assign_expr(inner.next().expect("while test"))?;
    let body = Box::new(build_branch(inner.next().expect("while body"))?);
    Ok(Statement {
        kind: StatementKind::While { test, body },
        at,
    })
}

fn build_function_def(pair: Pair<Rule>) -> Result<ScriptFunctionDef, EvalError> {
    let mut inner = pair.into_inner().peekable();

    let is_async = matches!(inner.peek(), Some(p) if p.as_rule() == Rule::async_marker);
    if is_async {
        inner.next();
    }

    let name = match inner.peek() {
        Some(p) if p.as_rule() == Rule::identifier => {
            let name = inner.next().unwrap().as_str().to_string();
            Some(name)
        }
        _ => None,
    };

    let params = build_param_list(inner.next().expect("function params"))?;
    let body = FunctionBody::Block(build_block(inner.next().expect("function body"))?);

    Ok(ScriptFunctionDef {
        name,
        params,
        body,
        is_async,
    })
}

fn build_param_list(pair: Pair<Rule>) -> Result<Vec<ParamPattern>, EvalError> {
    pair.into_inner().map(build_param).collect()
}

fn build_param(pair: Pair<Rule>) -> Result<ParamPattern, EvalError> {
    let inner = pair.into_inner().next().expect("param body");
    match inner.as_rule() {
        Rule::rest_param => {
            let name = inner
                .into_inner()
                .next()
                .expect("rest_param identifier")
                .as_str()
                .to_string();
            Ok(ParamPattern::Rest(name))
        }
        Rule::pattern => Ok(ParamPattern::Plain(build_pattern(inner)?)),
        _ => Err(unexpected_pair(&inner)),
    }
}

// --- Expressions, following the precedence cascade in grammar.pest -----

pub fn build_assign_expr(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    let at = pos(&pair);
    let mut inner = pair.into_inner();
    let left = build_conditional_expr(inner.next().expect("assign_expr lhs"))?;

    match inner.next() {
        None => Ok(left),
        Some(op_pair) => {
            let op = assign_op(&op_pair)?;
            let value = build_assign_expr(inner.next().expect("assign_expr rhs"))?;
            Ok(Expr {
                kind: ExprKind::Assignment {
                    op,
                    target: Box::new(left),
                    value: Box::new(value),
                },
                at,
            })
        }
    }
}

fn assign_op(pair: &Pair<Rule>) -> Result<AssignOp, EvalError> {
    Ok(match pair.as_str() {
        "=" => AssignOp::Assign,
        "+=" => AssignOp::AddAssign,
        "-=" => AssignOp::SubAssign,
        "*=" => AssignOp::MulAssign,
        "/=" => AssignOp::DivAssign,
        "%=" => AssignOp::ModAssign,
        "**=" => AssignOp::PowAssign,
        "^=" => AssignOp::BitXorAssign,
        "&=" => AssignOp::BitAndAssign,
        "|=" => AssignOp::BitOrAssign,
        "<<=" => AssignOp::ShlAssign,
        ">>=" => AssignOp::ShrAssign,
        other => {
            return Err(EvalError::SyntaxError {
                message: format!("unknown assignment operator: {}", other),
                at: Some(pos(pair)),
            })
        }
    })
}

fn build_conditional_expr(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    let at = pos(&pair);
    let mut inner = pair.into_inner();
    let test = build_logical_or(inner.next().expect("conditional test"))?;

    match inner.next() {
        None => Ok(test),
        Some(consequent_pair) => {
            let consequent = build_assign_expr(consequent_pair)?;
            let alternate = build_assign_expr(inner.next().expect("conditional alternate"))?;
            Ok(Expr {
                kind: ExprKind::Conditional {
                    test: Box::new(test),
                    consequent: Box::new(consequent),
                    alternate: Box::new(alternate),
                },
                at,
            })
        }
    }
}

/// Builds a left-associative logical fold where every operand reduces via
/// `next` and the operator is implied by the rule (no inline operator
/// token is captured since there's only one choice at this precedence
/// level).
fn build_logical_chain(
    pair: Pair<Rule>,
    op: LogicalOp,
    next: fn(Pair<Rule>) -> Result<Expr, EvalError>,
) -> Result<Expr, EvalError> {
    let at = pos(&pair);
    let mut operands = pair.into_inner();
    let mut acc = next(operands.next().expect("logical chain lhs"))?;
    for operand in operands {
        let right = next(operand)?;
        acc = Expr {
            kind: ExprKind::Logical {
                op,
                left: Box::new(acc),
                right: Box::new(right),
            },
            at,
        };
    }
    Ok(acc)
}

fn build_logical_or(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    build_logical_chain(pair, LogicalOp::Or, build_logical_and)
}

fn build_logical_and(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    build_logical_chain(pair, LogicalOp::And, build_bitor)
}

fn build_bitor(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    build_binary_chain_fixed(pair, BinaryOp::BitOr, build_bitxor)
}

fn build_bitxor(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    build_binary_chain_fixed(pair, BinaryOp::BitXor, build_bitand)
}

fn build_bitand(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    build_binary_chain_fixed(pair, BinaryOp::BitAnd, build_equality)
}

/// Same shape as `build_logical_chain` but folding into `Binary` rather
/// than `Logical` nodes, for the bitwise levels where (like `||`/`&&`)
/// only one operator exists at that precedence so no operator token is
/// captured in the grammar.
fn build_binary_chain_fixed(
    pair: Pair<Rule>,
    op: BinaryOp,
    next: fn(Pair<Rule>) -> Result<Expr, EvalError>,
) -> Result<Expr, EvalError> {
    let at = pos(&pair);
    let mut operands = pair.into_inner();
    let mut acc = next(operands.next().expect("binary chain lhs"))?;
    for operand in operands {
        let right = next(operand)?;
        acc = Expr {
            kind: ExprKind::Binary {
                op,
                left: Box::new(acc),
                right: Box::new(right),
            },
            at,
        };
    }
    Ok(acc)
}

/// The general case: operands alternate with a named operator-token rule
/// (`equality_op`, `relational_op`, ...), so each fold step picks its own
/// operator from the stream instead of a single fixed one.
fn build_binary_chain_op(
    pair: Pair<Rule>,
    next: fn(Pair<Rule>) -> Result<Expr, EvalError>,
    op_of: fn(&Pair<Rule>) -> Result<BinaryOp, EvalError>,
) -> Result<Expr, EvalError> {
    let at = pos(&pair);
    let mut inner = pair.into_inner();
    let mut acc = next(inner.next().expect("binary chain lhs"))?;
    loop {
        match inner.next() {
            None => break,
            Some(op_pair) => {
                let op = op_of(&op_pair)?;
                let right = next(inner.next().expect("binary chain rhs"))?;
                acc = Expr {
                    kind: ExprKind::Binary {
                        op,
                        left: Box::new(acc),
                        right: Box::new(right),
                    },
                    at,
                };
            }
        }
    }
    Ok(acc)
}

fn equality_op(pair: &Pair<Rule>) -> Result<BinaryOp, EvalError> {
    Ok(match pair.as_str() {
        "===" => BinaryOp::StrictEq,
        "!==" => BinaryOp::StrictNe,
        "==" => BinaryOp::Eq,
        "!=" => BinaryOp::Ne,
        other => return Err(bad_operator(pair, other)),
    })
}

fn relational_op(pair: &Pair<Rule>) -> Result<BinaryOp, EvalError> {
    Ok(match pair.as_str() {
        "<=" => BinaryOp::Le,
        ">=" => BinaryOp::Ge,
        "<" => BinaryOp::Lt,
        ">" => BinaryOp::Gt,
        other => return Err(bad_operator(pair, other)),
    })
}

fn shift_op(pair: &Pair<Rule>) -> Result<BinaryOp, EvalError> {
    Ok(match pair.as_str() {
        "<<" => BinaryOp::Shl,
        ">>" => BinaryOp::Shr,
        other => return Err(bad_operator(pair, other)),
    })
}

fn additive_op(pair: &Pair<Rule>) -> Result<BinaryOp, EvalError> {
    Ok(match pair.as_str() {
        "+" => BinaryOp::Add,
        "-" => BinaryOp::Sub,
        other => return Err(bad_operator(pair, other)),
    })
}

fn multiplicative_op(pair: &Pair<Rule>) -> Result<BinaryOp, EvalError> {
    Ok(match pair.as_str() {
        "*" => BinaryOp::Mul,
        "/" => BinaryOp::Div,
        "%" => BinaryOp::Mod,
        other => return Err(bad_operator(pair, other)),
    })
}

fn bad_operator(pair: &Pair<Rule>, text: &str) -> EvalError {
    EvalError::SyntaxError {
        message: format!("unknown operator: {}", text),
        at: Some(pos(pair)),
    }
}

fn build_equality(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    build_binary_chain_op(pair, build_relational, equality_op)
}

fn build_relational(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    build_binary_chain_op(pair, build_shift, relational_op)
}

fn build_shift(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    build_binary_chain_op(pair, build_additive, shift_op)
}

fn build_additive(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    build_binary_chain_op(pair, build_multiplicative, additive_op)
}

fn build_multiplicative(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    build_binary_chain_op(pair, build_exponent, multiplicative_op)
}

/// `**` is right-associative, so unlike the other levels it recurses into
/// itself on the right rather than folding left.
fn build_exponent(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    let at = pos(&pair);
    let mut inner = pair.into_inner();
    let base = build_unary(inner.next().expect("exponent base"))?;
    match inner.next() {
        None => Ok(base),
        Some(rest) => {
            let exponent = build_exponent(rest)?;
            Ok(Expr {
                kind: ExprKind::Binary {
                    op: BinaryOp::Pow,
                    left: Box::new(base),
                    right: Box::new(exponent),
                },
                at,
            })
        }
    }
}

fn build_unary(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    let at = pos(&pair);
    match pair.as_rule() {
        Rule::unary_expr => {
            let mut inner = pair.into_inner();
            let first = inner.next().expect("unary_expr body");
            match first.as_rule() {
                Rule::unary_op => {
                    let op = match first.as_str() {
                        "!" => UnaryOp::Not,
                        "-" => UnaryOp::Minus,
                        "+" => UnaryOp::Plus,
                        other => return Err(bad_operator(&first, other)),
                    };
                    let argument = build_unary(inner.next().expect("unary operand"))?;
                    Ok(Expr {
                        kind: ExprKind::Unary {
                            op,
                            argument: Box::new(argument),
                        },
                        at,
                    })
                }
                Rule::delete_expr | Rule::update_prefix | Rule::postfix_expr => build_unary(first),
                _ => Err(unexpected_pair(&first)),
            }
        }
        Rule::delete_expr => {
            let argument = build_unary(pair.into_inner().next().expect("delete operand"))?;
            Ok(Expr {
                kind: ExprKind::Delete(Box::new(argument)),
                at,
            })
        }
        Rule::update_prefix => {
            let mut inner = pair.into_inner();
            let op = update_op(&inner.next().expect("update_prefix operator"))?;
            let argument = build_unary(inner.next().expect("update_prefix operand"))?;
            Ok(Expr {
                kind: ExprKind::Update {
                    op,
                    argument: Box::new(argument),
                    prefix: true,
                },
                at,
            })
        }
        Rule::postfix_expr => build_postfix(pair),
        _ => Err(unexpected_pair(&pair)),
    }
}

fn update_op(pair: &Pair<Rule>) -> Result<UpdateOp, EvalError> {
    Ok(match pair.as_str() {
        "++" => UpdateOp::Increment,
        "--" => UpdateOp::Decrement,
        other => return Err(bad_operator(pair, other)),
    })
}

fn build_postfix(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    let at = pos(&pair);
    let mut inner = pair.into_inner();
    let mut expr = build_primary(inner.next().expect("postfix_expr primary"))?;
    let mut has_optional = false;

    for p in inner {
        match p.as_rule() {
            Rule::postfix_op => {
                let op_at = pos(&p);
                let op = p.into_inner().next().expect("postfix_op variant");
                expr = match op.as_rule() {
                    Rule::call_op => Expr {
                        kind: ExprKind::Call {
                            callee: Box::new(expr),
                            arguments: build_arg_list(op)?,
                            optional: false,
                        },
                        at: op_at,
                    },
                    Rule::optional_call_op => {
                        has_optional = true;
                        Expr {
                            kind: ExprKind::Call {
                                callee: Box::new(expr),
                                arguments: build_arg_list(op)?,
                                optional: true,
                            },
                            at: op_at,
                        }
                    }
                    Rule::member_dot => Expr {
                        kind: ExprKind::Member {
                            object: Box::new(expr),
                            property: MemberKey::Identifier(
                                op.into_inner().next().expect("member_dot name").as_str().to_string(),
                            ),
                            optional: false,
                        },
                        at: op_at,
                    },
                    Rule::optional_member_dot => {
                        has_optional = true;
                        Expr {
                            kind: ExprKind::Member {
                                object: Box::new(expr),
                                property: MemberKey::Identifier(
                                    op.into_inner()
                                        .next()
                                        .expect("optional_member_dot name")
                                        .as_str()
                                        .to_string(),
                                ),
                                optional: true,
                            },
                            at: op_at,
                        }
                    }
                    Rule::member_index => Expr {
                        kind: ExprKind::Member {
                            object: Box::new(expr),
                            property: MemberKey::Computed(Box::new(build_assign_expr(
                                op.into_inner().next().expect("member_index expr"),
                            )?)),
                            optional: false,
                        },
                        at: op_at,
                    },
                    Rule::optional_member_index => {
                        has_optional = true;
                        Expr {
                            kind: ExprKind::Member {
                                object: Box::new(expr),
                                property: MemberKey::Computed(Box::new(build_assign_expr(
                                    op.into_inner().next().expect("optional_member_index expr"),
                                )?)),
                                optional: true,
                            },
                            at: op_at,
                        }
                    }
                    _ => return Err(unexpected_pair(&op)),
                };
            }
            Rule::update_postfix => {
                let op = update_op(&p.into_inner().next().expect("update_postfix operator"))?;
                expr = Expr {
                    kind: ExprKind::Update {
                        op,
                        argument: Box::new(expr),
                        prefix: false,
                    },
                    at,
                };
            }
            _ => return Err(unexpected_pair(&p)),
        }
    }

    if has_optional {
        expr = Expr {
            kind: ExprKind::Chain(Box::new(expr)),
            at,
        };
    }
    Ok(expr)
}

fn build_arg_list(call_op: Pair<Rule>) -> Result<Vec<ArrayElement>, EvalError> {
    match call_op.into_inner().next() {
        None => Ok(Vec::new()),
        Some(arg_list) => arg_list.into_inner().map(build_spread_or_expr).collect(),
    }
}

/// Shared by `arg_list`'s `spread_or_expr` and `array_literal`'s
/// `array_element`: both wrap `spread | assign_expr` identically.
fn build_spread_or_expr(pair: Pair<Rule>) -> Result<ArrayElement, EvalError> {
    let inner = pair.into_inner().next().expect("spread_or_expr/array_element body");
    match inner.as_rule() {
        Rule::spread => Ok(ArrayElement::Spread(build_assign_expr(
            inner.into_inner().next().expect("spread expr"),
        )?)),
        _ => Ok(ArrayElement::Item(build_assign_expr(inner)?)),
    }
}

fn build_primary(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    let at = pos(&pair);
    match pair.as_rule() {
        Rule::primary_expr => build_primary(pair.into_inner().next().expect("primary_expr body")),
        Rule::literal => Ok(Expr {
            kind: ExprKind::Literal(build_literal(pair)?),
            at,
        }),
        Rule::identifier => Ok(Expr {
            kind: ExprKind::Identifier(pair.as_str().to_string()),
            at,
        }),
        Rule::paren_expr => {
            let inner = build_assign_expr(pair.into_inner().next().expect("paren_expr body"))?;
            Ok(Expr {
                kind: ExprKind::Paren(Box::new(inner)),
                at,
            })
        }
        Rule::arrow_function => build_arrow_function(pair),
        Rule::function_expr => Ok(Expr {
            kind: ExprKind::Function(build_function_def(pair)?),
            at,
        }),
        Rule::object_literal => Ok(Expr {
            kind: ExprKind::Object(build_object_literal(pair)?),
            at,
        }),
        Rule::array_literal => {
            let elements = pair
                .into_inner()
                .map(build_spread_or_expr)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr {
                kind: ExprKind::Array(elements),
                at,
            })
        }
        Rule::template_literal => build_template_literal(pair),
        _ => Err(unexpected_pair(&pair)),
    }
}

fn build_arrow_function(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    let at = pos(&pair);
    let mut inner = pair.into_inner();
    let params_pair = inner.next().expect("arrow_params");
    let params = build_arrow_params(params_pair)?;

    let body_pair = inner.next().expect("arrow_body");
    let body_inner = body_pair.into_inner().next().expect("arrow_body inner");
    let body = match body_inner.as_rule() {
        Rule::block => FunctionBody::Block(build_block(body_inner)?),
        _ => FunctionBody::Expression(Box::new(build_assign_expr(body_inner)?)),
    };

    Ok(Expr {
        kind: ExprKind::Arrow { params, body },
        at,
    })
}

fn build_arrow_params(pair: Pair<Rule>) -> Result<Vec<ParamPattern>, EvalError> {
    let inner = pair.into_inner().next().expect("arrow_params body");
    match inner.as_rule() {
        Rule::identifier => Ok(vec![ParamPattern::Plain(Pattern::Identifier(
            inner.as_str().to_string(),
        ))]),
        Rule::param_list => build_param_list(inner),
        _ => Err(unexpected_pair(&inner)),
    }
}

fn build_object_literal(pair: Pair<Rule>) -> Result<Vec<ObjectProp>, EvalError> {
    pair.into_inner().map(build_object_member).collect()
}

fn build_object_member(pair: Pair<Rule>) -> Result<ObjectProp, EvalError> {
    let inner = pair.into_inner().next().expect("object_member body");
    match inner.as_rule() {
        Rule::spread_member => Ok(ObjectProp::Spread(build_assign_expr(
            inner.into_inner().next().expect("spread_member expr"),
        )?)),
        Rule::computed_member => {
            let mut parts = inner.into_inner();
            let key = build_assign_expr(parts.next().expect("computed_member key"))?;
            let value = build_assign_expr(parts.next().expect("computed_member value"))?;
            Ok(ObjectProp::KeyValue {
                key: PropertyKey::Computed(Box::new(key)),
                value,
            })
        }
        Rule::keyed_member => {
            let mut parts = inner.into_inner();
            let key = build_object_key(parts.next().expect("keyed_member key"))?;
            let value = build_assign_expr(parts.next().expect("keyed_member value"))?;
            Ok(ObjectProp::KeyValue { key, value })
        }
        Rule::shorthand_member => Ok(ObjectProp::Shorthand(
            inner.into_inner().next().expect("shorthand_member name").as_str().to_string(),
        )),
        _ => Err(unexpected_pair(&inner)),
    }
}

fn build_object_key(pair: Pair<Rule>) -> Result<PropertyKey, EvalError> {
    let inner = pair.into_inner().next().expect("object_key body");
    match inner.as_rule() {
        Rule::identifier => Ok(PropertyKey::Identifier(inner.as_str().to_string())),
        Rule::string_lit => Ok(PropertyKey::String(build_string_lit(inner)?)),
        _ => Err(unexpected_pair(&inner)),
    }
}

fn build_template_literal(pair: Pair<Rule>) -> Result<Expr, EvalError> {
    let at = pos(&pair);
    let mut quasis = Vec::new();
    let mut expressions = Vec::new();
    let mut current = String::new();

    for part in pair.into_inner() {
        let inner = part.into_inner().next().expect("template_part body");
        match inner.as_rule() {
            Rule::template_chars => current.push_str(&unescape(inner.as_str())),
            Rule::template_sub => {
                quasis.push(std::mem::take(&mut current));
                expressions.push(build_assign_expr(
                    inner.into_inner().next().expect("template_sub expr"),
                )?);
            }
            _ => return Err(unexpected_pair(&inner)),
        }
    }
    quasis.push(current);

    Ok(Expr {
        kind: ExprKind::TemplateLiteral { quasis, expressions },
        at,
    })
}

fn build_literal(pair: Pair<Rule>) -> Result<Literal, EvalError> {
    let inner = pair.into_inner().next().expect("literal body");
    match inner.as_rule() {
        Rule::number_lit => {
            let value: f64 = inner.as_str().parse().map_err(|_| EvalError::SyntaxError {
                message: format!("invalid number literal: {}", inner.as_str()),
                at: Some(pos(&inner)),
            })?;
            Ok(Literal::Number(value))
        }
        Rule::string_lit => Ok(Literal::String(build_string_lit(inner)?)),
        Rule::boolean_lit => Ok(Literal::Boolean(inner.as_str() == "true")),
        Rule::null_lit => Ok(Literal::Null),
        Rule::undefined_lit => Ok(Literal::Undefined),
        _ => Err(unexpected_pair(&inner)),
    }
}

fn build_string_lit(pair: Pair<Rule>) -> Result<String, EvalError> {
    let inner = pair.into_inner().next().expect("string_lit body");
    Ok(unescape(inner.as_str()))
}

/// Resolves the backslash escapes recognized inside string and template
/// literals. Unknown escapes pass the escaped character through verbatim.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
