//! Lexer and runtime for Mython, a small dynamically-typed scripting
//! language with Python-style indentation, classes, and dunder methods.
//!
//! The crate has two halves. [`frontend`] turns source text into a stream of
//! tokens, synthesizing `Indent` / `Dedent` / `Newline` / `Eof` tokens from
//! the layout of the input. [`runtime`] holds the dynamic object model and
//! evaluates statement trees against it. A parser sits between the two; it
//! consumes the token cursor and builds [`runtime::grammar::Stmt`] trees,
//! but is not part of this crate.

pub mod frontend;
pub mod runtime;
