use crate::{
    ops::{BinaryOp, IncDecOp, UnaryOp},
    symbol::Ident,
};
use asciifile::Spanned;
use strum_macros::{Display, EnumDiscriminants};

/// This is the top-level AST node. It stores all global declarations of the
/// C-- program in source order.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Program {
    pub globals: Vec<Spanned<Decl>>,
}

/// A global declaration is either a variable or a function.
#[derive(EnumDiscriminants, Debug, PartialEq, Eq, Clone)]
#[strum_discriminants(derive(Display))]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
}

/// Declaration of a global or local variable: `int x;`
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct VarDecl {
    pub ty: Spanned<Type>,
    pub name: Spanned<Ident>,
}

/// A formal parameter of a function declaration.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FormalDecl {
    pub ty: Spanned<Type>,
    pub name: Spanned<Ident>,
}

pub type FormalList = Vec<Spanned<FormalDecl>>;

/// `ret name(formals) { body }`
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FnDecl {
    pub ret: Spanned<Type>,
    pub name: Spanned<Ident>,
    pub formals: FormalList,
    pub body: Block,
}

/// A type as written in the source, or as recorded by name analysis for a
/// declared function.
///
/// * `Ptr(ty)`: a reference to a value of type `ty`, written `ptr ty`
/// * `Fn { formals, ret }`: the signature of a declared function. There is
/// no syntax for it, name analysis puts it on the symbol of every function.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Type {
    Int,
    Short,
    Bool,
    String,
    Void,
    Ptr(Box<Type>),
    Fn { formals: Vec<Type>, ret: Box<Type> },
}

/// A `Block` in the AST is just a vector of statements.
pub type Block = Vec<Spanned<Stmt>>;

/// A statement can have one of the kinds:
/// * `VarDecl`: declaration of a local variable
/// * `Expr`: an assignment, call or increment used as a statement
/// * `Read`: `take dst;`, reads a value from stdin into `dst`
/// * `Write`: `give src;`, prints `src` to stdout
/// * `If`, `IfElse`, `While`: conditional control flow
/// * `Return`: a return which can optionally return an expression
#[derive(EnumDiscriminants, Debug, PartialEq, Eq, Clone)]
#[strum_discriminants(derive(Display))]
pub enum Stmt {
    VarDecl(VarDecl),
    Expr(Box<Spanned<Expr>>),
    Read(Box<Spanned<Expr>>),
    Write(Box<Spanned<Expr>>),
    If(Box<Spanned<Expr>>, Block),
    IfElse(Box<Spanned<Expr>>, Block, Block),
    While(Box<Spanned<Expr>>, Block),
    Return(Option<Box<Spanned<Expr>>>),
}

/// An expression is either one of
/// * a literal: `IntLit`, `ShortLit`, `StrLit`, `True`, `False`
/// * `Id`: use of a variable, formal or function name
/// * `Call`: a call of a named function `f(a, b)`
/// * `Binary`: one of the binary operations defined in `BinaryOp`
/// * `Unary`: one of the unary operations defined in `UnaryOp`
/// * `Ref`: taking the address of a location, `&x`
/// * `Deref`: reading through a reference, `@p`
/// * `IncDec`: pre/post increment and decrement
/// * `Assign`: `dst = src`
#[derive(EnumDiscriminants, Debug, PartialEq, Eq, Clone)]
#[strum_discriminants(derive(Display))]
pub enum Expr {
    IntLit(i32),
    ShortLit(i16),
    StrLit(String),
    True,
    False,
    Id(Ident),
    Call(Spanned<Ident>, ArgumentList),
    Binary(BinaryOp, Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    Unary(UnaryOp, Box<Spanned<Expr>>),
    Ref(Box<Spanned<Expr>>),
    Deref(Box<Spanned<Expr>>),
    IncDec(IncDecOp, Box<Spanned<Expr>>),
    Assign(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
}

pub type ArgumentList = Vec<Spanned<Expr>>;

impl Expr {
    /// Whether the expression denotes storage that can be assigned to or
    /// referenced.
    pub fn is_lvalue(&self) -> bool {
        match self {
            Expr::Id(_) | Expr::Deref(_) => true,
            _ => false,
        }
    }
}

impl Decl {
    pub fn name(&self) -> &Spanned<Ident> {
        match self {
            Decl::Var(var_decl) => &var_decl.name,
            Decl::Fn(fn_decl) => &fn_decl.name,
        }
    }
}
