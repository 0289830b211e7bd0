use super::class::InstancePtr;
use super::constants::{ADD_METHOD, INIT_METHOD};
use super::context::Context;
use super::errors::{ExecResult, ExecSignal, RuntimeError};
use super::grammar::{ArithmeticOp, Comparator, LogicalOp, Stmt};
use super::object::{self, is_true, Closure, Object, ObjectHolder};

use std::io::Write;

impl Stmt {
    /// Evaluates the node against a closure and an execution context.
    /// Side effects happen in program order; errors and the return signal
    /// propagate to the caller untouched.
    pub fn execute<W: Write>(&self, closure: &mut Closure, ctx: &mut Context<W>) -> ExecResult {
        match self {
            Stmt::NumericConst(value) => Ok(ObjectHolder::own(Object::Number(*value))),
            Stmt::StringConst(value) => Ok(ObjectHolder::own(Object::String(value.clone()))),
            Stmt::BoolConst(value) => Ok(ObjectHolder::own(Object::Boolean(*value))),
            Stmt::NoneConst => Ok(ObjectHolder::none()),
            Stmt::Variable(ids) => lookup_dotted(ids, closure),
            Stmt::Assignment(var, rv) => {
                let value = rv.execute(closure, ctx)?;
                closure.insert(var.clone(), value.clone());
                Ok(value)
            }
            Stmt::FieldAssignment(object_path, field, rv) => {
                let target = lookup_dotted(object_path, closure)?;
                let instance = target
                    .try_as_instance()
                    .ok_or_else(|| RuntimeError::NotAnInstance(target.clone()))?;
                let value = rv.execute(closure, ctx)?;
                instance.set_field(field, value.clone());
                Ok(value)
            }
            Stmt::Print(args) => eval_print(args, closure, ctx),
            Stmt::MethodCall(object, method, args) => {
                let target = object.execute(closure, ctx)?;
                let instance = target
                    .try_as_instance()
                    .ok_or_else(|| RuntimeError::NotAnInstance(target.clone()))?;
                let mut actual_args = Vec::with_capacity(args.len());
                for arg in args {
                    actual_args.push(arg.execute(closure, ctx)?);
                }
                instance.call(method, actual_args, ctx)
            }
            Stmt::NewInstance(class, args) => {
                let instance = InstancePtr::new(class);
                // Constructor arguments are only evaluated when a matching
                // __init__ exists.
                if instance.has_method(INIT_METHOD, args.len()) {
                    let mut actual_args = Vec::with_capacity(args.len());
                    for arg in args {
                        actual_args.push(arg.execute(closure, ctx)?);
                    }
                    instance.call(INIT_METHOD, actual_args, ctx)?;
                }
                Ok(ObjectHolder::own(Object::Instance(instance)))
            }
            Stmt::ClassDefinition(class) => {
                closure.insert(
                    class.name().to_owned(),
                    ObjectHolder::own(Object::Class(class.clone())),
                );
                Ok(ObjectHolder::none())
            }
            Stmt::Stringify(arg) => {
                let value = arg.execute(closure, ctx)?;
                if value.is_none() {
                    return Ok(ObjectHolder::own(Object::String("None".to_owned())));
                }
                let mut buf = Vec::new();
                value.print(&mut buf, ctx)?;
                Ok(ObjectHolder::own(Object::String(
                    String::from_utf8_lossy(&buf).into_owned(),
                )))
            }
            Stmt::Arithmetic(op, lhs, rhs) => {
                let lhs = lhs.execute(closure, ctx)?;
                let rhs = rhs.execute(closure, ctx)?;
                eval_arithmetic(*op, &lhs, &rhs, ctx)
            }
            Stmt::Comparison(cmp, lhs, rhs) => {
                let lhs = lhs.execute(closure, ctx)?;
                let rhs = rhs.execute(closure, ctx)?;
                let result = match cmp {
                    Comparator::Equal => object::equal(&lhs, &rhs, ctx)?,
                    Comparator::NotEqual => object::not_equal(&lhs, &rhs, ctx)?,
                    Comparator::Less => object::less(&lhs, &rhs, ctx)?,
                    Comparator::Greater => object::greater(&lhs, &rhs, ctx)?,
                    Comparator::LessOrEqual => object::less_or_equal(&lhs, &rhs, ctx)?,
                    Comparator::GreaterOrEqual => object::greater_or_equal(&lhs, &rhs, ctx)?,
                };
                Ok(ObjectHolder::own(Object::Boolean(result)))
            }
            Stmt::Logical(op, lhs, rhs) => {
                let lhs = lhs.execute(closure, ctx)?;
                // The right operand only runs when it can still decide the
                // outcome.
                let value = match op {
                    LogicalOp::Or => is_true(&lhs) || is_true(&rhs.execute(closure, ctx)?),
                    LogicalOp::And => is_true(&lhs) && is_true(&rhs.execute(closure, ctx)?),
                };
                Ok(ObjectHolder::own(Object::Boolean(value)))
            }
            Stmt::Not(arg) => {
                let value = arg.execute(closure, ctx)?;
                Ok(ObjectHolder::own(Object::Boolean(!is_true(&value))))
            }
            Stmt::Compound(stmts) => {
                for stmt in stmts {
                    stmt.execute(closure, ctx)?;
                }
                Ok(ObjectHolder::none())
            }
            Stmt::IfElse(condition, if_body, else_body) => {
                let condition = condition.execute(closure, ctx)?;
                if is_true(&condition) {
                    if_body.execute(closure, ctx)
                } else if let Some(else_body) = else_body {
                    else_body.execute(closure, ctx)
                } else {
                    Ok(ObjectHolder::none())
                }
            }
            Stmt::Return(rv) => {
                let value = rv.execute(closure, ctx)?;
                Err(ExecSignal::Return(value))
            }
            Stmt::MethodBody(body) => match body.execute(closure, ctx) {
                Err(ExecSignal::Return(value)) => Ok(value),
                result => result,
            },
        }
    }
}

/// Resolves a dotted path: the head in the closure, every subsequent
/// segment in the fields of the instance the previous one produced.
fn lookup_dotted(ids: &[String], closure: &Closure) -> ExecResult {
    let mut value = match closure.get(&ids[0]) {
        Some(holder) => holder.clone(),
        None => return Err(RuntimeError::UndefinedVariable(ids[0].clone()).into()),
    };
    for id in &ids[1..] {
        let instance = value
            .try_as_instance()
            .ok_or_else(|| RuntimeError::NotAnInstance(value.clone()))?;
        value = match instance.get_field(id) {
            Some(holder) => holder,
            None => return Err(RuntimeError::UndefinedVariable(id.clone()).into()),
        };
    }
    Ok(value)
}

fn eval_print<W: Write>(args: &[Stmt], closure: &mut Closure, ctx: &mut Context<W>) -> ExecResult {
    let mut line = Vec::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push(b' ');
        }
        let value = arg.execute(closure, ctx)?;
        value.print(&mut line, ctx)?;
    }
    line.push(b'\n');
    ctx.output()
        .write_all(&line)
        .map_err(|e| ExecSignal::from(RuntimeError::Io(e.to_string())))?;
    Ok(ObjectHolder::none())
}

fn eval_arithmetic<W: Write>(
    op: ArithmeticOp,
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    ctx: &mut Context<W>,
) -> ExecResult {
    if let (Some(a), Some(b)) = (lhs.try_as_number(), rhs.try_as_number()) {
        let value = match op {
            ArithmeticOp::Add => a.wrapping_add(b),
            ArithmeticOp::Sub => a.wrapping_sub(b),
            ArithmeticOp::Mult => a.wrapping_mul(b),
            ArithmeticOp::Div => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero.into());
                }
                a.wrapping_div(b)
            }
        };
        return Ok(ObjectHolder::own(Object::Number(value)));
    }

    if op == ArithmeticOp::Add {
        if let (Some(a), Some(b)) = (lhs.try_as_string(), rhs.try_as_string()) {
            return Ok(ObjectHolder::own(Object::String(format!("{}{}", a, b))));
        }
        if let Some(instance) = lhs.try_as_instance() {
            return instance.call(ADD_METHOD, vec![rhs.clone()], ctx);
        }
    }

    Err(RuntimeError::IllegalArithmetic(op, lhs.clone(), rhs.clone()).into())
}
