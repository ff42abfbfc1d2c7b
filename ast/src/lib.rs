//! The name-resolved abstract syntax tree of a C-- program.
//!
//! Name analysis hands this tree to the later phases: every identifier
//! already carries the `Symbol` it was bound to, including the type it was
//! declared with. Nothing in here is mutated after name analysis.
pub mod ast;
pub mod build;
pub mod ops;
pub mod symbol;

pub use self::{
    ast::*,
    ops::{BinaryOp, BinaryOpKind, IncDecOp, UnaryOp},
    symbol::{Ident, Symbol, SymbolKind},
};
