use super::constants::{SELF_STR, STR_METHOD};
use super::context::Context;
use super::errors::{ExecResult, RuntimeError};
use super::grammar::Stmt;
use super::object::{write_out, Closure, ObjectHolder};

use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::rc::{Rc, Weak};

/// Bodies are expected to be wrapped in [`Stmt::MethodBody`] so that
/// `return` unwinds no further than the call that entered them.
#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub formal_params: Vec<String>,
    pub body: Stmt,
}

impl Method {
    pub fn new(name: String, formal_params: Vec<String>, body: Stmt) -> Self {
        Method {
            name,
            formal_params,
            body,
        }
    }

    pub fn arity(&self) -> usize {
        self.formal_params.len()
    }
}

struct ClassData {
    name: String,
    methods: Vec<Method>,
    parent: Option<ClassPtr>,
}

#[derive(Clone)]
pub struct ClassPtr(Rc<ClassData>);

impl ClassPtr {
    pub fn new(name: String, methods: Vec<Method>, parent: Option<ClassPtr>) -> Self {
        let data = ClassData {
            name,
            methods,
            parent,
        };
        ClassPtr(Rc::new(data))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// First match by name only; arity is checked at call sites.
    pub fn get_method(&self, name: &str) -> Option<&Method> {
        let method = self.0.methods.iter().find(|m| m.name == name);
        match &self.0.parent {
            Some(parent) => method.or_else(|| parent.get_method(name)),
            None => method,
        }
    }

    pub fn has_method(&self, name: &str, argument_count: usize) -> bool {
        self.get_method(name)
            .map_or(false, |m| m.arity() == argument_count)
    }
}

struct InstanceData {
    class: ClassPtr,
    fields: RefCell<Closure>,
}

#[derive(Clone)]
pub struct InstancePtr(Rc<InstanceData>);

/// Non-owning alias to an instance, used to bind `self`.
#[derive(Clone)]
pub struct InstanceWeakPtr(Weak<InstanceData>);

impl InstancePtr {
    pub fn new(class: &ClassPtr) -> Self {
        let data = InstanceData {
            class: class.clone(),
            fields: RefCell::new(Closure::default()),
        };
        InstancePtr(Rc::new(data))
    }

    pub fn class(&self) -> &ClassPtr {
        &self.0.class
    }

    pub fn get_field(&self, name: &str) -> Option<ObjectHolder> {
        self.0.fields.borrow().get(name).cloned()
    }

    pub fn set_field(&self, name: &str, value: ObjectHolder) {
        self.0.fields.borrow_mut().insert(name.to_owned(), value);
    }

    pub fn downgrade(&self) -> InstanceWeakPtr {
        InstanceWeakPtr(Rc::downgrade(&self.0))
    }

    pub fn has_method(&self, name: &str, argument_count: usize) -> bool {
        self.0.class.has_method(name, argument_count)
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(class = self.class().name(), method = name)
    )]
    pub fn call<W: Write>(
        &self,
        name: &str,
        actual_args: Vec<ObjectHolder>,
        ctx: &mut Context<W>,
    ) -> ExecResult {
        let method = self
            .0
            .class
            .get_method(name)
            .filter(|m| m.arity() == actual_args.len())
            .ok_or_else(|| RuntimeError::NoSuchMethod(name.to_owned(), actual_args.len()))?;

        let mut closure = Closure::default();
        closure.insert(SELF_STR.to_owned(), ObjectHolder::share(self));
        for (param, arg) in method.formal_params.iter().zip(actual_args) {
            closure.insert(param.clone(), arg);
        }

        method.body.execute(&mut closure, ctx)
    }

    pub(crate) fn print<W: Write>(
        &self,
        out: &mut dyn Write,
        ctx: &mut Context<W>,
    ) -> ExecResult<()> {
        if self.has_method(STR_METHOD, 0) {
            let rendered = self.call(STR_METHOD, Vec::new(), ctx)?;
            rendered.print(out, ctx)
        } else {
            write_out(
                out,
                format_args!(
                    "<instance of {} at {:p}>",
                    self.class().name(),
                    Rc::as_ptr(&self.0)
                ),
            )
        }
    }
}

impl InstanceWeakPtr {
    pub fn upgrade(&self) -> Option<InstancePtr> {
        self.0.upgrade().map(InstancePtr)
    }
}

impl PartialEq for ClassPtr {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for InstancePtr {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ClassPtr {}

impl Eq for InstancePtr {}

impl fmt::Debug for ClassPtr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<class {}>", self.0.name)
    }
}

impl fmt::Debug for InstancePtr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<instance of {}>", self.0.class.name())
    }
}
