use super::class::{ClassPtr, InstancePtr, InstanceWeakPtr};
use super::constants::{EQ_METHOD, LT_METHOD};
use super::context::Context;
use super::errors::{ExecResult, RuntimeError};

use rustc_hash::FxHashMap;
use std::fmt;
use std::io::Write;

/// A runtime scope. Fresh per method call and never chained.
pub type Closure = FxHashMap<String, ObjectHolder>;

#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Number(i64),
    String(String),
    Boolean(bool),
    Class(ClassPtr),
    Instance(InstancePtr),
}

impl Object {
    pub fn print<W: Write>(&self, out: &mut dyn Write, ctx: &mut Context<W>) -> ExecResult<()> {
        match self {
            Object::Number(value) => write_out(out, format_args!("{}", value)),
            Object::String(value) => write_out(out, format_args!("{}", value)),
            Object::Boolean(true) => write_out(out, format_args!("True")),
            Object::Boolean(false) => write_out(out, format_args!("False")),
            Object::Class(class) => write_out(out, format_args!("Class {}", class.name())),
            Object::Instance(instance) => instance.print(out, ctx),
        }
    }
}

pub(crate) fn write_out(out: &mut dyn Write, args: fmt::Arguments) -> ExecResult<()> {
    out.write_fmt(args)
        .map_err(|e| RuntimeError::Io(e.to_string()).into())
}

/// Handle to a runtime value. `Shared` is a non-owning alias used to bind
/// `self`, so a method call never extends its instance's lifetime; `None`
/// is the language's none-value.
#[derive(Clone)]
pub enum ObjectHolder {
    Owned(Object),
    Shared(InstanceWeakPtr),
    None,
}

impl ObjectHolder {
    pub fn own(object: Object) -> Self {
        ObjectHolder::Owned(object)
    }

    pub fn share(instance: &InstancePtr) -> Self {
        ObjectHolder::Shared(instance.downgrade())
    }

    pub fn none() -> Self {
        ObjectHolder::None
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ObjectHolder::None)
    }

    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    pub fn try_as_number(&self) -> Option<i64> {
        match self {
            ObjectHolder::Owned(Object::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn try_as_bool(&self) -> Option<bool> {
        match self {
            ObjectHolder::Owned(Object::Boolean(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn try_as_string(&self) -> Option<&str> {
        match self {
            ObjectHolder::Owned(Object::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn try_as_class(&self) -> Option<ClassPtr> {
        match self {
            ObjectHolder::Owned(Object::Class(class)) => Some(class.clone()),
            _ => None,
        }
    }

    pub fn try_as_instance(&self) -> Option<InstancePtr> {
        match self {
            ObjectHolder::Owned(Object::Instance(instance)) => Some(instance.clone()),
            ObjectHolder::Shared(weak) => weak.upgrade(),
            _ => None,
        }
    }

    pub fn print<W: Write>(&self, out: &mut dyn Write, ctx: &mut Context<W>) -> ExecResult<()> {
        match self {
            ObjectHolder::Owned(object) => object.print(out, ctx),
            ObjectHolder::Shared(weak) => match weak.upgrade() {
                Some(instance) => instance.print(out, ctx),
                None => write_out(out, format_args!("None")),
            },
            ObjectHolder::None => write_out(out, format_args!("None")),
        }
    }
}

impl PartialEq for ObjectHolder {
    fn eq(&self, other: &Self) -> bool {
        // Handle equality, not the language's `==`: instances compare by
        // identity regardless of ownership mode.
        match (self, other) {
            (ObjectHolder::None, ObjectHolder::None) => true,
            (ObjectHolder::Shared(_), _) | (_, ObjectHolder::Shared(_)) => {
                match (self.try_as_instance(), other.try_as_instance()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
            (ObjectHolder::Owned(a), ObjectHolder::Owned(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for ObjectHolder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ObjectHolder::Owned(object) => object.fmt(f),
            ObjectHolder::Shared(weak) => match weak.upgrade() {
                Some(instance) => instance.fmt(f),
                None => write!(f, "<expired instance>"),
            },
            ObjectHolder::None => write!(f, "None"),
        }
    }
}

pub fn is_true(object: &ObjectHolder) -> bool {
    match object {
        ObjectHolder::Owned(Object::Number(value)) => *value != 0,
        ObjectHolder::Owned(Object::Boolean(value)) => *value,
        ObjectHolder::Owned(Object::String(value)) => !value.is_empty(),
        _ => false,
    }
}

pub fn equal<W: Write>(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    ctx: &mut Context<W>,
) -> ExecResult<bool> {
    if let (Some(a), Some(b)) = (lhs.try_as_number(), rhs.try_as_number()) {
        return Ok(a == b);
    }
    if let (Some(a), Some(b)) = (lhs.try_as_string(), rhs.try_as_string()) {
        return Ok(a == b);
    }
    if let (Some(a), Some(b)) = (lhs.try_as_bool(), rhs.try_as_bool()) {
        return Ok(a == b);
    }
    if let Some(instance) = lhs.try_as_instance() {
        let verdict = instance.call(EQ_METHOD, vec![rhs.clone()], ctx)?;
        return Ok(is_true(&verdict));
    }
    if lhs.is_none() && rhs.is_none() {
        return Ok(true);
    }
    Err(RuntimeError::NotComparable(lhs.clone(), rhs.clone()).into())
}

pub fn less<W: Write>(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    ctx: &mut Context<W>,
) -> ExecResult<bool> {
    if let (Some(a), Some(b)) = (lhs.try_as_number(), rhs.try_as_number()) {
        return Ok(a < b);
    }
    if let (Some(a), Some(b)) = (lhs.try_as_string(), rhs.try_as_string()) {
        return Ok(a < b);
    }
    if let (Some(a), Some(b)) = (lhs.try_as_bool(), rhs.try_as_bool()) {
        return Ok(a < b);
    }
    if let Some(instance) = lhs.try_as_instance() {
        let verdict = instance.call(LT_METHOD, vec![rhs.clone()], ctx)?;
        return Ok(is_true(&verdict));
    }
    Err(RuntimeError::NotComparable(lhs.clone(), rhs.clone()).into())
}

pub fn not_equal<W: Write>(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    ctx: &mut Context<W>,
) -> ExecResult<bool> {
    Ok(!equal(lhs, rhs, ctx)?)
}

pub fn greater<W: Write>(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    ctx: &mut Context<W>,
) -> ExecResult<bool> {
    Ok(!(less(lhs, rhs, ctx)? || equal(lhs, rhs, ctx)?))
}

pub fn less_or_equal<W: Write>(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    ctx: &mut Context<W>,
) -> ExecResult<bool> {
    Ok(!greater(lhs, rhs, ctx)?)
}

pub fn greater_or_equal<W: Write>(
    lhs: &ObjectHolder,
    rhs: &ObjectHolder,
    ctx: &mut Context<W>,
) -> ExecResult<bool> {
    Ok(!less(lhs, rhs, ctx)?)
}
