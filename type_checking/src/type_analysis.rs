use crate::type_system::DataType;
use asciifile::Spanned;
use ast::{Decl, Expr, FormalDecl, Ident, Program, Stmt};
use std::{collections::HashMap, fmt};

/// Compares and hashes a node by address, not by content. Two structurally
/// identical expressions are still two nodes.
pub struct RefEquality<'a, T>(&'a T);

impl<'a, T> Clone for RefEquality<'a, T> {
    fn clone(&self) -> Self {
        RefEquality(self.0)
    }
}

impl<'a, T> Copy for RefEquality<'a, T> {}

impl<'a, T> std::hash::Hash for RefEquality<'a, T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: std::hash::Hasher,
    {
        (self.0 as *const T).hash(state)
    }
}

impl<'a, 'b, T> PartialEq<RefEquality<'b, T>> for RefEquality<'a, T> {
    fn eq(&self, other: &'_ RefEquality<'b, T>) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl<'a, T> Eq for RefEquality<'a, T> {}

/// Identity of a node that receives a type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef<'ast> {
    Program(RefEquality<'ast, Program>),
    Decl(RefEquality<'ast, Spanned<Decl>>),
    Formal(RefEquality<'ast, Spanned<FormalDecl>>),
    Stmt(RefEquality<'ast, Spanned<Stmt>>),
    Expr(RefEquality<'ast, Spanned<Expr>>),
    Ident(RefEquality<'ast, Spanned<Ident>>),
}

impl<'ast> From<&'ast Program> for NodeRef<'ast> {
    fn from(node: &'ast Program) -> Self {
        NodeRef::Program(RefEquality(node))
    }
}

impl<'ast> From<&'ast Spanned<Decl>> for NodeRef<'ast> {
    fn from(node: &'ast Spanned<Decl>) -> Self {
        NodeRef::Decl(RefEquality(node))
    }
}

impl<'ast> From<&'ast Spanned<FormalDecl>> for NodeRef<'ast> {
    fn from(node: &'ast Spanned<FormalDecl>) -> Self {
        NodeRef::Formal(RefEquality(node))
    }
}

impl<'ast> From<&'ast Spanned<Stmt>> for NodeRef<'ast> {
    fn from(node: &'ast Spanned<Stmt>) -> Self {
        NodeRef::Stmt(RefEquality(node))
    }
}

impl<'ast> From<&'ast Spanned<Expr>> for NodeRef<'ast> {
    fn from(node: &'ast Spanned<Expr>) -> Self {
        NodeRef::Expr(RefEquality(node))
    }
}

impl<'ast> From<&'ast Spanned<Ident>> for NodeRef<'ast> {
    fn from(node: &'ast Spanned<Ident>) -> Self {
        NodeRef::Ident(RefEquality(node))
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Program(_) => write!(f, "program"),
            NodeRef::Decl(decl) => write!(f, "declaration of `{}` at {}", decl.0.name().name, decl.0.span),
            NodeRef::Formal(formal) => write!(f, "formal `{}` at {}", formal.0.name.name, formal.0.span),
            NodeRef::Stmt(stmt) => write!(f, "statement at {}", stmt.0.span),
            NodeRef::Expr(expr) => write!(f, "expression at {}", expr.0.span),
            NodeRef::Ident(ident) => write!(f, "identifier `{}` at {}", ident.0.name, ident.0.span),
        }
    }
}

/// Maps every node of one program to its computed type.
///
/// Each node is typed exactly once, after all of its children.
#[derive(Default)]
pub struct TypeTable<'ast> {
    types: HashMap<NodeRef<'ast>, DataType>,
}

impl<'ast> TypeTable<'ast> {
    pub fn new() -> TypeTable<'ast> {
        TypeTable::default()
    }

    pub fn set_type(&mut self, node: impl Into<NodeRef<'ast>>, ty: DataType) {
        let node = node.into();
        let previous = self.types.insert(node, ty);
        assert!(previous.is_none(), "{:?} was typed twice", node);
    }

    /// Panics if `node` was not typed yet. The type checker types every node
    /// of the program, so after a completed pass this cannot fail for nodes of
    /// the checked program.
    pub fn get_type(&self, node: impl Into<NodeRef<'ast>>) -> &DataType {
        let node = node.into();
        self.types
            .get(&node)
            .unwrap_or_else(|| panic!("{:?} was queried before it was typed", node))
    }

    pub fn try_get_type(&self, node: impl Into<NodeRef<'ast>>) -> Option<&DataType> {
        self.types.get(&node.into())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeRef<'ast>, &DataType)> {
        self.types.iter().map(|(node, ty)| (*node, ty))
    }
}

/// Result of a completed type checking pass.
pub struct TypeAnalysis<'ast> {
    types: TypeTable<'ast>,
    well_typed: bool,
}

impl<'ast> TypeAnalysis<'ast> {
    pub fn new(types: TypeTable<'ast>, well_typed: bool) -> Self {
        Self { types, well_typed }
    }

    pub fn types(&self) -> &TypeTable<'ast> {
        &self.types
    }

    /// True iff the pass did not report a single type error.
    pub fn is_well_typed(&self) -> bool {
        self.well_typed
    }

    pub fn into_types(self) -> TypeTable<'ast> {
        self.types
    }
}
