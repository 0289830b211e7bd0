use super::grammar::ArithmeticOp;
use super::object::ObjectHolder;

use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum RuntimeError {
    UndefinedVariable(String),
    NotAnInstance(ObjectHolder),
    NoSuchMethod(String, usize),
    IllegalArithmetic(ArithmeticOp, ObjectHolder, ObjectHolder),
    NotComparable(ObjectHolder, ObjectHolder),
    DivisionByZero,
    Io(String),
}

/// Outcome channel of `Stmt::execute`. `Error` carries real failures to the
/// outermost caller; `Return` is the non-error transfer raised by a
/// `return` statement, propagated unchanged by every composite node and
/// caught only by `Stmt::MethodBody`.
#[derive(Debug, PartialEq, Clone)]
pub enum ExecSignal {
    Error(RuntimeError),
    Return(ObjectHolder),
}

pub type ExecResult<T = ObjectHolder> = Result<T, ExecSignal>;

impl From<RuntimeError> for ExecSignal {
    fn from(error: RuntimeError) -> Self {
        ExecSignal::Error(error)
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuntimeError::UndefinedVariable(name) => {
                write!(f, "Undefined variable `{}`.", name)
            }
            RuntimeError::NotAnInstance(object) => {
                write!(f, "{:?} is not a class instance.", object)
            }
            RuntimeError::NoSuchMethod(name, argument_count) => {
                write!(
                    f,
                    "No method `{}` taking {} argument(s).",
                    name, argument_count
                )
            }
            RuntimeError::IllegalArithmetic(op, lhs, rhs) => {
                write!(
                    f,
                    "Cannot apply `{}` to {:?} and {:?}.",
                    op.symbol(),
                    lhs,
                    rhs
                )
            }
            RuntimeError::NotComparable(lhs, rhs) => {
                write!(f, "Cannot compare {:?} and {:?}.", lhs, rhs)
            }
            RuntimeError::DivisionByZero => write!(f, "Division by zero."),
            RuntimeError::Io(message) => write!(f, "Output error: {}.", message),
        }
    }
}

impl fmt::Display for ExecSignal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExecSignal::Error(error) => error.fmt(f),
            ExecSignal::Return(_) => write!(f, "Return outside of a method body."),
        }
    }
}
