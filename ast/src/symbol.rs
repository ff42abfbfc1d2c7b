use crate::ast::Type;
use std::rc::Rc;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SymbolKind {
    Var,
    Formal,
    Fn,
}

/// The declaration an identifier was bound to by name analysis.
///
/// Symbols are shared between the declaring identifier and all its uses.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: Type,
}

impl Symbol {
    pub fn new(name: &str, kind: SymbolKind, ty: Type) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            kind,
            ty,
        })
    }
}

/// A resolved identifier. There is no way to express an unbound one.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Ident {
    pub name: String,
    pub symbol: Rc<Symbol>,
}

impl Ident {
    pub fn new(symbol: &Rc<Symbol>) -> Self {
        Self {
            name: symbol.name.clone(),
            symbol: Rc::clone(symbol),
        }
    }

    pub fn declared_type(&self) -> &Type {
        &self.symbol.ty
    }
}
