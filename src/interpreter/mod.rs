//! The recursive evaluator: one arm per AST node kind, generalizing the
//! teacher's `eval`/`eval_env`/`eval_statement`/`eval_exp`/`eval_block`/
//! `eval_nest` family from a small flat language (no objects, no
//! closures-over-`this`, numeric-encoded booleans) to the node set in
//! `ast::node`. The teacher's shunting-yard postfix pass
//! (`shunting_yard.rs`) is not carried forward: the parser already hands
//! this evaluator a precedence-resolved tree of nested `Binary`/
//! `Logical` nodes, so there is nothing left for a postfix pass to do.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::node::*;
use crate::error::EvalError;
use crate::guard::ResourceGuard;

pub mod control;
mod operations;
pub mod value;

use control::{EvalResult, Signal};
pub use value::{Environment, HostObject, NativeFunction, ScriptFunction, Value};
use value::{host_object, to_bool, to_js_string, to_number};

/// A resolved assignment target: either a named binding or a specific
/// own key on an already-evaluated host object/array. Resolving this
/// once up front (rather than re-evaluating the object sub-expression
/// for both the read and the write half of a compound assignment) is
/// what keeps `a.b += f()` from calling `f()`'s object side twice.
enum Slot {
    Identifier(String),
    Member { object: Value, key: String },
}

/// Evaluates a full program against a fresh top-level frame, returning
/// the value of the last top-level statement, or the payload of a
/// top-level `return` when one is present (callers are expected to have
/// already rejected that case via `check_top_level_returns` if it's not
/// permitted).
pub fn eval_program(
    program: &Program,
    env: &Rc<RefCell<Environment>>,
    guard: &ResourceGuard,
) -> Result<Value, EvalError> {
    let mut last = Value::Undefined;
    for statement in &program.body {
        last = unwrap_top_level(eval_statement(statement, env, guard))?;
    }
    Ok(last)
}

/// Evaluates a single statement against a persistent environment, used
/// by the REPL to run one line at a time.
pub fn eval_top_level_statement(
    statement: &Statement,
    env: &Rc<RefCell<Environment>>,
    guard: &ResourceGuard,
) -> Result<Value, EvalError> {
    unwrap_top_level(eval_statement(statement, env, guard))
}

fn unwrap_top_level(result: EvalResult) -> Result<Value, EvalError> {
    match result {
        Ok(value) => Ok(value),
        Err(Signal::Return(value)) => Ok(value),
        Err(Signal::SafeNavigation) => Err(EvalError::UnsupportedFeature(
            "a chain expression's safe-navigation signal escaped to the top level".to_string(),
        )),
        Err(Signal::Error(err)) => Err(err),
    }
}

/// Walks top-level statements (descending into blocks/if/while but not
/// into function bodies) looking for a bare `return`, so `validate` can
/// reject it up front when `allow_return_outside_function` is false.
pub fn contains_top_level_return(statements: &[Statement]) -> bool {
    statements.iter().any(statement_has_top_level_return)
}

fn statement_has_top_level_return(statement: &Statement) -> bool {
    match &statement.kind {
        StatementKind::Return(_) => true,
        StatementKind::Block(body) => contains_top_level_return(body),
        StatementKind::If { consequent, alternate, .. } => {
            statement_has_top_level_return(consequent)
                || alternate.as_deref().map(statement_has_top_level_return).unwrap_or(false)
        }
        StatementKind::While { body, .. } => statement_has_top_level_return(body),
        StatementKind::FunctionDeclaration(_) => false,
        StatementKind::Expression(_) | StatementKind::VariableDeclaration { .. } => false,
    }
}

fn eval_statement(statement: &Statement, env: &Rc<RefCell<Environment>>, guard: &ResourceGuard) -> EvalResult {
    match &statement.kind {
        StatementKind::Expression(expr) => eval_expr(expr, env, guard),
        StatementKind::VariableDeclaration { kind, declarators } => {
            eval_variable_decl(*kind, declarators, env, guard)
        }
        StatementKind::Return(argument) => {
            let value = match argument {
                Some(expr) => eval_expr(expr, env, guard)?,
                None => Value::Undefined,
            };
            Err(Signal::Return(value))
        }
        StatementKind::If { test, consequent, alternate } => {
            eval_if(test, consequent, alternate.as_deref(), env, guard)
        }
        StatementKind::While { test, body } => eval_while(test, body, env, guard),
        StatementKind::FunctionDeclaration(def) => eval_function_declaration(def, env),
        StatementKind::Block(body) => eval_block(body, env, guard),
    }
}

/// Creates a child frame and runs `body` in it, yielding the last
/// statement's value.
fn eval_block(body: &[Statement], env: &Rc<RefCell<Environment>>, guard: &ResourceGuard) -> EvalResult {
    let child = Rc::new(RefCell::new(Environment::new_sub(env)));
    run_statements(body, &child, guard)
}

/// Runs `body` directly against `env` without creating a new frame --
/// used both by `eval_block` (against its freshly created child) and by
/// function invocation (against the frame already created for the
/// call, which also carries parameter bindings).
fn run_statements(body: &[Statement], env: &Rc<RefCell<Environment>>, guard: &ResourceGuard) -> EvalResult {
    let mut last = Value::Undefined;
    for statement in body {
        last = eval_statement(statement, env, guard)?;
    }
    Ok(last)
}

fn eval_variable_decl(
    kind: DeclKind,
    declarators: &[Declarator],
    env: &Rc<RefCell<Environment>>,
    guard: &ResourceGuard,
) -> EvalResult {
    let writable = kind != DeclKind::Const;
    for declarator in declarators {
        let value = match &declarator.init {
            Some(expr) => eval_expr(expr, env, guard)?,
            None => Value::Undefined,
        };
        match &declarator.pattern {
            Pattern::Identifier(name) => env.borrow_mut().declare(name, value, writable)?,
            other => return Err(EvalError::unsupported_pattern(other.kind_name()).into()),
        }
    }
    Ok(Value::Undefined)
}

/// A block branch (`if (x) { ... }`) propagates its last statement's
/// value like any other block. A bare, non-block branch
/// (`if (x) foo();`) still executes -- side effects and any propagating
/// `Return`/error included -- but its own expression value never
/// becomes the `if` statement's result.
fn eval_branch(branch: &Statement, env: &Rc<RefCell<Environment>>, guard: &ResourceGuard) -> EvalResult {
    match &branch.kind {
        StatementKind::Block(body) => eval_block(body, env, guard),
        _ => {
            eval_statement(branch, env, guard)?;
            Ok(Value::Undefined)
        }
    }
}

fn eval_if(
    test: &Expr,
    consequent: &Statement,
    alternate: Option<&Statement>,
    env: &Rc<RefCell<Environment>>,
    guard: &ResourceGuard,
) -> EvalResult {
    let test_value = eval_expr(test, env, guard)?;
    if to_bool(&test_value) {
        eval_branch(consequent, env, guard)
    } else {
        match alternate {
            Some(branch) => eval_branch(branch, env, guard),
            None => Ok(Value::Undefined),
        }
    }
}

fn eval_while(test: &Expr, body: &Statement, env: &Rc<RefCell<Environment>>, guard: &ResourceGuard) -> EvalResult {
    guard.while_allowed()?;
    let mut result = Value::Undefined;
    loop {
        let test_value = eval_expr(test, env, guard)?;
        if !to_bool(&test_value) {
            break;
        }
        guard.check()?;
        result = eval_branch(body, env, guard)?;
    }
    Ok(result)
}

fn eval_function_declaration(def: &ScriptFunctionDef, env: &Rc<RefCell<Environment>>) -> EvalResult {
    if def.is_async {
        return Err(EvalError::async_unsupported().into());
    }
    let name = def.name.clone().expect("function declarations always carry a name");
    let function = Value::Function(Rc::new(ScriptFunction {
        name: Some(name.clone()),
        params: def.params.clone(),
        body: def.body.clone(),
        env: Rc::clone(env),
        is_arrow: false,
    }));
    env.borrow_mut().declare(&name, function, false)?;
    Ok(Value::Undefined)
}

fn eval_expr(expr: &Expr, env: &Rc<RefCell<Environment>>, guard: &ResourceGuard) -> EvalResult {
    match &expr.kind {
        ExprKind::Literal(literal) => Ok(literal_to_value(literal)),
        ExprKind::Identifier(name) => env
            .borrow()
            .lookup(name)
            .ok_or_else(|| EvalError::unknown_variable(name).into()),
        ExprKind::TemplateLiteral { quasis, expressions } => {
            eval_template_literal(quasis, expressions, env, guard)
        }
        ExprKind::Array(elements) => eval_array_literal(elements, env, guard),
        ExprKind::Object(props) => eval_object_literal(props, env, guard),
        ExprKind::Function(def) => {
            if def.is_async {
                return Err(EvalError::async_unsupported().into());
            }
            Ok(Value::Function(Rc::new(ScriptFunction {
                name: def.name.clone(),
                params: def.params.clone(),
                body: def.body.clone(),
                env: Rc::clone(env),
                is_arrow: false,
            })))
        }
        ExprKind::Arrow { params, body } => Ok(Value::Function(Rc::new(ScriptFunction {
            name: None,
            params: params.clone(),
            body: body.clone(),
            env: Rc::clone(env),
            is_arrow: true,
        }))),
        ExprKind::Unary { op, argument } => {
            let value = eval_expr(argument, env, guard)?;
            Ok(operations::unary(*op, value)?)
        }
        ExprKind::Update { op, argument, prefix } => eval_update(*op, argument, *prefix, env, guard),
        ExprKind::Binary { op, left, right } => {
            let left_value = eval_expr(left, env, guard)?;
            let right_value = eval_expr(right, env, guard)?;
            Ok(operations::binary(*op, left_value, right_value)?)
        }
        ExprKind::Logical { op, left, right } => eval_logical(*op, left, right, env, guard),
        ExprKind::Assignment { op, target, value } => eval_assignment(*op, target, value, env, guard),
        ExprKind::Conditional { test, consequent, alternate } => {
            let test_value = eval_expr(test, env, guard)?;
            if to_bool(&test_value) {
                eval_expr(consequent, env, guard)
            } else {
                eval_expr(alternate, env, guard)
            }
        }
        ExprKind::Call { callee, arguments, optional } => eval_call(callee, arguments, *optional, env, guard),
        ExprKind::Member { .. } => {
            let slot = resolve_slot(expr, env, guard)?;
            read_slot(&slot, env)
        }
        ExprKind::Delete(argument) => eval_delete(argument, env, guard),
        ExprKind::Chain(inner) => match eval_expr(inner, env, guard) {
            Err(Signal::SafeNavigation) => Ok(Value::Undefined),
            other => other,
        },
        ExprKind::Paren(inner) => eval_expr(inner, env, guard),
    }
}

fn literal_to_value(literal: &Literal) -> Value {
    match literal {
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::String(s.clone()),
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Null => Value::Null,
        Literal::Undefined => Value::Undefined,
    }
}

fn eval_template_literal(
    quasis: &[String],
    expressions: &[Expr],
    env: &Rc<RefCell<Environment>>,
    guard: &ResourceGuard,
) -> EvalResult {
    let mut result = quasis[0].clone();
    for (expr, quasi) in expressions.iter().zip(quasis.iter().skip(1)) {
        let value = eval_expr(expr, env, guard)?;
        result.push_str(&to_js_string(&value));
        result.push_str(quasi);
    }
    Ok(Value::String(result))
}

fn eval_array_literal(elements: &[ArrayElement], env: &Rc<RefCell<Environment>>, guard: &ResourceGuard) -> EvalResult {
    let mut items = Vec::with_capacity(elements.len());
    for element in elements {
        match element {
            ArrayElement::Item(expr) => items.push(eval_expr(expr, env, guard)?),
            ArrayElement::Spread(expr) => {
                let value = eval_expr(expr, env, guard)?;
                match value {
                    Value::Array(arr) => items.extend(arr.borrow().iter().cloned()),
                    other => return Err(EvalError::TypeError(format!("{} is not iterable", other)).into()),
                }
            }
        }
    }
    Ok(Value::from(items))
}

fn eval_object_literal(props: &[ObjectProp], env: &Rc<RefCell<Environment>>, guard: &ResourceGuard) -> EvalResult {
    let object = Rc::new(RefCell::new(HostObject::new()));
    for prop in props {
        match prop {
            ObjectProp::KeyValue { key, value } => {
                let key = eval_property_key(key, env, guard)?;
                let value = eval_expr(value, env, guard)?;
                object.borrow_mut().own.insert(key, value);
            }
            ObjectProp::Shorthand(name) => {
                let value = env
                    .borrow()
                    .lookup(name)
                    .ok_or_else(|| EvalError::unknown_variable(name))?;
                object.borrow_mut().own.insert(name.clone(), value);
            }
            ObjectProp::Spread(expr) => {
                if let Value::Object(source) = eval_expr(expr, env, guard)? {
                    let entries: Vec<(String, Value)> =
                        source.borrow().own.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                    for (key, value) in entries {
                        object.borrow_mut().own.insert(key, value);
                    }
                }
            }
        }
    }
    Ok(Value::Object(object))
}

fn eval_property_key(key: &PropertyKey, env: &Rc<RefCell<Environment>>, guard: &ResourceGuard) -> Result<String, Signal> {
    Ok(match key {
        PropertyKey::Identifier(name) => name.clone(),
        PropertyKey::String(s) => s.clone(),
        PropertyKey::Computed(expr) => to_js_string(&eval_expr(expr, env, guard)?),
    })
}

fn eval_logical(
    op: LogicalOp,
    left: &Expr,
    right: &Expr,
    env: &Rc<RefCell<Environment>>,
    guard: &ResourceGuard,
) -> EvalResult {
    let left_value = eval_expr(left, env, guard)?;
    match op {
        LogicalOp::And if to_bool(&left_value) => eval_expr(right, env, guard),
        LogicalOp::And => Ok(left_value),
        LogicalOp::Or if to_bool(&left_value) => Ok(left_value),
        LogicalOp::Or => eval_expr(right, env, guard),
    }
}

fn eval_update(
    op: UpdateOp,
    argument: &Expr,
    prefix: bool,
    env: &Rc<RefCell<Environment>>,
    guard: &ResourceGuard,
) -> EvalResult {
    let slot = resolve_slot(argument, env, guard)?;
    let old_value = read_slot(&slot, env)?;
    let old_number = to_number(&old_value);
    let new_number = match op {
        UpdateOp::Increment => old_number + 1.0,
        UpdateOp::Decrement => old_number - 1.0,
    };
    write_slot(&slot, Value::Number(new_number), env)?;
    Ok(Value::Number(if prefix { new_number } else { old_number }))
}

fn eval_assignment(
    op: AssignOp,
    target: &Expr,
    value_expr: &Expr,
    env: &Rc<RefCell<Environment>>,
    guard: &ResourceGuard,
) -> EvalResult {
    let slot = resolve_slot(target, env, guard)?;
    let new_value = match op.as_binary_op() {
        None => eval_expr(value_expr, env, guard)?,
        Some(binary_op) => {
            let current = read_slot(&slot, env)?;
            let rhs = eval_expr(value_expr, env, guard)?;
            operations::binary(binary_op, current, rhs)?
        }
    };
    write_slot(&slot, new_value.clone(), env)?;
    Ok(new_value)
}

/// Resolves an assignment/update target exactly once: for an
/// identifier, just its name; for a member expression, the already
/// evaluated object value and stringified key, so the object
/// sub-expression is never evaluated twice by a read-then-write pair.
fn resolve_slot(target: &Expr, env: &Rc<RefCell<Environment>>, guard: &ResourceGuard) -> Result<Slot, Signal> {
    match &target.kind {
        ExprKind::Identifier(name) => Ok(Slot::Identifier(name.clone())),
        ExprKind::Member { object, property, optional } => {
            let object_value = eval_expr(object, env, guard)?;
            if matches!(object_value, Value::Undefined | Value::Null) {
                if *optional {
                    return Err(Signal::SafeNavigation);
                }
                let key = resolve_member_key(property, env, guard)?;
                return Err(EvalError::read_through_nullish(&key).into());
            }
            let key = resolve_member_key(property, env, guard)?;
            Ok(Slot::Member { object: object_value, key })
        }
        ExprKind::Paren(inner) => resolve_slot(inner, env, guard),
        _ => Err(EvalError::TypeError("Invalid assignment target".to_string()).into()),
    }
}

fn read_slot(slot: &Slot, env: &Rc<RefCell<Environment>>) -> Result<Value, Signal> {
    match slot {
        Slot::Identifier(name) => env
            .borrow()
            .lookup(name)
            .ok_or_else(|| EvalError::unknown_variable(name).into()),
        Slot::Member { object, key } => Ok(read_member(object.clone(), key)),
    }
}

fn write_slot(slot: &Slot, value: Value, env: &Rc<RefCell<Environment>>) -> Result<(), Signal> {
    match slot {
        Slot::Identifier(name) => {
            env.borrow_mut().redefine_owner_cell(name, value)?;
            Ok(())
        }
        Slot::Member { object, key } => {
            write_member(object.clone(), key, value)?;
            Ok(())
        }
    }
}

fn resolve_member_key(key: &MemberKey, env: &Rc<RefCell<Environment>>, guard: &ResourceGuard) -> Result<String, Signal> {
    Ok(match key {
        MemberKey::Identifier(name) => name.clone(),
        MemberKey::Computed(expr) => to_js_string(&eval_expr(expr, env, guard)?),
    })
}

/// Own keys first, then ancestry for host objects; numeric indexing
/// (plus a synthetic `length`) for arrays and strings; everything else
/// reads as `undefined` rather than erroring, matching a non-null
/// receiver with a missing key.
fn read_member(object: Value, key: &str) -> Value {
    match object {
        Value::Object(obj) => host_object::read(&obj, key).unwrap_or(Value::Undefined),
        Value::Array(arr) => {
            if key == "length" {
                return Value::Number(arr.borrow().len() as f64);
            }
            match key.parse::<usize>() {
                Ok(index) => arr.borrow().get(index).cloned().unwrap_or(Value::Undefined),
                Err(_) => Value::Undefined,
            }
        }
        Value::String(s) => {
            if key == "length" {
                return Value::Number(s.chars().count() as f64);
            }
            match key.parse::<usize>() {
                Ok(index) => s
                    .chars()
                    .nth(index)
                    .map(|c| Value::String(c.to_string()))
                    .unwrap_or(Value::Undefined),
                Err(_) => Value::Undefined,
            }
        }
        _ => Value::Undefined,
    }
}

/// Writes land on the immediate receiver for host objects (by way of
/// the owning-holder-or-root rule in `host_object::write`); array index
/// assignment extends the array in place.
fn write_member(object: Value, key: &str, value: Value) -> Result<(), EvalError> {
    match object {
        Value::Object(obj) => {
            host_object::write(&obj, key, value);
            Ok(())
        }
        Value::Array(arr) => match key.parse::<usize>() {
            Ok(index) => {
                let mut items = arr.borrow_mut();
                if index >= items.len() {
                    items.resize(index + 1, Value::Undefined);
                }
                items[index] = value;
                Ok(())
            }
            Err(_) => Err(EvalError::TypeError(format!("Cannot assign to property '{}' of an array", key))),
        },
        other => Err(EvalError::TypeError(format!("Cannot create property '{}' on {}", key, other))),
    }
}

fn eval_delete(argument: &Expr, env: &Rc<RefCell<Environment>>, guard: &ResourceGuard) -> EvalResult {
    match &argument.kind {
        ExprKind::Chain(inner) => match eval_delete(inner, env, guard) {
            Err(Signal::SafeNavigation) => Ok(Value::Boolean(true)),
            other => other,
        },
        ExprKind::Paren(inner) => eval_delete(inner, env, guard),
        ExprKind::Member { object, property, optional } => {
            let object_value = eval_expr(object, env, guard)?;
            if matches!(object_value, Value::Undefined | Value::Null) {
                if *optional {
                    return Err(Signal::SafeNavigation);
                }
                let key = resolve_member_key(property, env, guard)?;
                return Err(EvalError::read_through_nullish(&key).into());
            }
            let key = resolve_member_key(property, env, guard)?;
            delete_member(object_value, &key);
            Ok(Value::Boolean(true))
        }
        _ => Err(EvalError::TypeError("Invalid delete target".to_string()).into()),
    }
}

fn delete_member(object: Value, key: &str) {
    match object {
        Value::Object(obj) => host_object::delete_own(&obj, key),
        Value::Array(arr) => {
            if let Ok(index) = key.parse::<usize>() {
                let mut items = arr.borrow_mut();
                if index < items.len() {
                    items[index] = Value::Undefined;
                }
            }
        }
        _ => {}
    }
}

fn eval_call(
    callee: &Expr,
    arguments: &[ArrayElement],
    optional: bool,
    env: &Rc<RefCell<Environment>>,
    guard: &ResourceGuard,
) -> EvalResult {
    let (receiver, function, display_name) = resolve_callee(callee, env, guard)?;

    if matches!(function, Value::Undefined | Value::Null) {
        if optional {
            return Err(Signal::SafeNavigation);
        }
        return Err(EvalError::not_a_function(&display_name).into());
    }

    let args = eval_arguments(arguments, env, guard)?;

    match function {
        Value::Native(native) => native.call(receiver, &args).map_err(Signal::Error),
        Value::Function(script_function) => call_script_function(&script_function, &args, guard),
        _ => Err(EvalError::not_a_function(&display_name).into()),
    }
}

/// Resolves the callee of a call expression along with the receiver it
/// should be invoked with, matching the four forms spec.md names:
/// member access (receiver bound), identifier (no receiver), and
/// immediate function/arrow expressions (no receiver).
fn resolve_callee(
    callee: &Expr,
    env: &Rc<RefCell<Environment>>,
    guard: &ResourceGuard,
) -> Result<(Option<Value>, Value, String), Signal> {
    match &callee.kind {
        ExprKind::Member { object, property, optional } => {
            let object_value = eval_expr(object, env, guard)?;
            if matches!(object_value, Value::Undefined | Value::Null) {
                if *optional {
                    return Err(Signal::SafeNavigation);
                }
                let key = resolve_member_key(property, env, guard)?;
                return Err(EvalError::read_through_nullish(&key).into());
            }
            let key = resolve_member_key(property, env, guard)?;
            let function = read_member(object_value.clone(), &key);
            Ok((Some(object_value), function, key))
        }
        ExprKind::Identifier(name) => {
            let function = env
                .borrow()
                .lookup(name)
                .ok_or_else(|| EvalError::unknown_variable(name))?;
            Ok((None, function, name.clone()))
        }
        ExprKind::Chain(inner) => resolve_callee(inner, env, guard),
        ExprKind::Paren(inner) => resolve_callee(inner, env, guard),
        _ => {
            let function = eval_expr(callee, env, guard)?;
            Ok((None, function, "value".to_string()))
        }
    }
}

fn eval_arguments(
    arguments: &[ArrayElement],
    env: &Rc<RefCell<Environment>>,
    guard: &ResourceGuard,
) -> Result<Vec<Value>, Signal> {
    let mut args = Vec::with_capacity(arguments.len());
    for argument in arguments {
        match argument {
            ArrayElement::Item(expr) => args.push(eval_expr(expr, env, guard)?),
            ArrayElement::Spread(expr) => {
                let value = eval_expr(expr, env, guard)?;
                match value {
                    Value::Array(arr) => args.extend(arr.borrow().iter().cloned()),
                    other => return Err(EvalError::TypeError(format!("{} is not iterable", other)).into()),
                }
            }
        }
    }
    Ok(args)
}

/// The function-invocation protocol from spec.md §4.D: bump call depth
/// (dropped automatically on every exit via `CallGuard`), bind
/// parameters and `arguments` into a new frame off the captured
/// environment, run the body, and catch the `Return` carrier.
fn call_script_function(function: &Rc<ScriptFunction>, args: &[Value], guard: &ResourceGuard) -> EvalResult {
    let _call_depth = guard.enter_call()?;

    let call_env = Rc::new(RefCell::new(Environment::new_sub(&function.env)));
    bind_parameters(&function.params, args, &call_env)?;
    call_env.borrow_mut().declare("arguments", Value::from(args.to_vec()), false)?;

    match &function.body {
        FunctionBody::Block(statements) => match run_statements(statements, &call_env, guard) {
            Ok(_) => Ok(Value::Undefined),
            Err(Signal::Return(value)) => Ok(value),
            other => other,
        },
        FunctionBody::Expression(expr) => eval_expr(expr, &call_env, guard),
    }
}

fn bind_parameters(params: &[ParamPattern], args: &[Value], env: &Rc<RefCell<Environment>>) -> Result<(), Signal> {
    let mut index = 0;
    for param in params {
        match param {
            ParamPattern::Rest(name) => {
                let rest = args.get(index..).map(|slice| slice.to_vec()).unwrap_or_default();
                env.borrow_mut().declare(name, Value::from(rest), true)?;
                index = args.len();
            }
            ParamPattern::Plain(Pattern::Identifier(name)) => {
                let value = args.get(index).cloned().unwrap_or(Value::Undefined);
                env.borrow_mut().declare(name, value, true)?;
                index += 1;
            }
            ParamPattern::Plain(other) => return Err(EvalError::unsupported_pattern(other.kind_name()).into()),
        }
    }
    Ok(())
}
