//! Constructors for resolved syntax trees.
//!
//! Front ends that already resolved names, and tests that need a resolved
//! program without running the parser, assemble trees with these helpers.
//! Every node gets its own single-character span on row 0, so two nodes
//! built on the same thread never share a position.
use crate::{
    ast::*,
    ops::{BinaryOp, IncDecOp, UnaryOp},
    symbol::{Ident, Symbol, SymbolKind},
};
use asciifile::{Position, Span, Spanned};
use std::{cell::Cell, rc::Rc};

thread_local! {
    static NEXT_COLUMN: Cell<usize> = Cell::new(0);
}

pub fn fresh_span() -> Span {
    NEXT_COLUMN.with(|next| {
        let column = next.get();
        next.set(column + 1);
        Position::new(0, column).to_single_char_span()
    })
}

pub fn spanned<T>(data: T) -> Spanned<T> {
    Spanned::new(fresh_span(), data)
}

// symbols and types

pub fn var_symbol(name: &str, ty: Type) -> Rc<Symbol> {
    Symbol::new(name, SymbolKind::Var, ty)
}

pub fn formal_symbol(name: &str, ty: Type) -> Rc<Symbol> {
    Symbol::new(name, SymbolKind::Formal, ty)
}

pub fn fn_symbol(name: &str, formals: Vec<Type>, ret: Type) -> Rc<Symbol> {
    Symbol::new(
        name,
        SymbolKind::Fn,
        Type::Fn {
            formals,
            ret: Box::new(ret),
        },
    )
}

pub fn ptr(ty: Type) -> Type {
    Type::Ptr(Box::new(ty))
}

pub fn ident(symbol: &Rc<Symbol>) -> Spanned<Ident> {
    spanned(Ident::new(symbol))
}

// expressions

pub fn int_lit(value: i32) -> Spanned<Expr> {
    spanned(Expr::IntLit(value))
}

pub fn short_lit(value: i16) -> Spanned<Expr> {
    spanned(Expr::ShortLit(value))
}

pub fn str_lit(value: &str) -> Spanned<Expr> {
    spanned(Expr::StrLit(value.to_string()))
}

pub fn true_lit() -> Spanned<Expr> {
    spanned(Expr::True)
}

pub fn false_lit() -> Spanned<Expr> {
    spanned(Expr::False)
}

pub fn id(symbol: &Rc<Symbol>) -> Spanned<Expr> {
    spanned(Expr::Id(Ident::new(symbol)))
}

pub fn call(callee: &Rc<Symbol>, args: Vec<Spanned<Expr>>) -> Spanned<Expr> {
    spanned(Expr::Call(ident(callee), args))
}

pub fn binary(op: BinaryOp, lhs: Spanned<Expr>, rhs: Spanned<Expr>) -> Spanned<Expr> {
    spanned(Expr::Binary(op, Box::new(lhs), Box::new(rhs)))
}

pub fn plus(lhs: Spanned<Expr>, rhs: Spanned<Expr>) -> Spanned<Expr> {
    binary(BinaryOp::Add, lhs, rhs)
}

pub fn unary(op: UnaryOp, operand: Spanned<Expr>) -> Spanned<Expr> {
    spanned(Expr::Unary(op, Box::new(operand)))
}

pub fn reference(operand: Spanned<Expr>) -> Spanned<Expr> {
    spanned(Expr::Ref(Box::new(operand)))
}

pub fn deref(operand: Spanned<Expr>) -> Spanned<Expr> {
    spanned(Expr::Deref(Box::new(operand)))
}

pub fn inc_dec(op: IncDecOp, operand: Spanned<Expr>) -> Spanned<Expr> {
    spanned(Expr::IncDec(op, Box::new(operand)))
}

pub fn assign(dst: Spanned<Expr>, src: Spanned<Expr>) -> Spanned<Expr> {
    spanned(Expr::Assign(Box::new(dst), Box::new(src)))
}

// statements

pub fn local(symbol: &Rc<Symbol>) -> Spanned<Stmt> {
    spanned(Stmt::VarDecl(var_decl(symbol)))
}

pub fn expr_stmt(expr: Spanned<Expr>) -> Spanned<Stmt> {
    spanned(Stmt::Expr(Box::new(expr)))
}

pub fn read(dst: Spanned<Expr>) -> Spanned<Stmt> {
    spanned(Stmt::Read(Box::new(dst)))
}

pub fn write(src: Spanned<Expr>) -> Spanned<Stmt> {
    spanned(Stmt::Write(Box::new(src)))
}

pub fn if_then(cond: Spanned<Expr>, body: Block) -> Spanned<Stmt> {
    spanned(Stmt::If(Box::new(cond), body))
}

pub fn if_else(cond: Spanned<Expr>, then_body: Block, else_body: Block) -> Spanned<Stmt> {
    spanned(Stmt::IfElse(Box::new(cond), then_body, else_body))
}

pub fn while_loop(cond: Spanned<Expr>, body: Block) -> Spanned<Stmt> {
    spanned(Stmt::While(Box::new(cond), body))
}

pub fn ret(value: Option<Spanned<Expr>>) -> Spanned<Stmt> {
    spanned(Stmt::Return(value.map(Box::new)))
}

// declarations

fn type_node(ty: &Type) -> Spanned<Type> {
    spanned(ty.clone())
}

pub fn var_decl(symbol: &Rc<Symbol>) -> VarDecl {
    VarDecl {
        ty: type_node(&symbol.ty),
        name: ident(symbol),
    }
}

pub fn global_var(symbol: &Rc<Symbol>) -> Spanned<Decl> {
    spanned(Decl::Var(var_decl(symbol)))
}

pub fn formal(symbol: &Rc<Symbol>) -> Spanned<FormalDecl> {
    spanned(FormalDecl {
        ty: type_node(&symbol.ty),
        name: ident(symbol),
    })
}

/// Declares the function `symbol` (built with `fn_symbol`) with the given
/// formals and body.
///
/// Panics if `symbol` does not carry a function signature.
pub fn fn_decl(symbol: &Rc<Symbol>, formals: &[Rc<Symbol>], body: Block) -> Spanned<Decl> {
    let ret = match &symbol.ty {
        Type::Fn { ret, .. } => (**ret).clone(),
        ty => panic!("function `{}` declared with non-function type {:?}", symbol.name, ty),
    };

    spanned(Decl::Fn(FnDecl {
        ret: type_node(&ret),
        name: ident(symbol),
        formals: formals.iter().map(formal).collect(),
        body,
    }))
}

pub fn program(globals: Vec<Spanned<Decl>>) -> Program {
    Program { globals }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_get_distinct_spans() {
        let a = int_lit(1);
        let b = int_lit(1);
        assert_eq!(a, b);
        assert_ne!(a.span, b.span);
    }

    #[test]
    fn fn_decl_uses_the_signature_return_type() {
        let x = formal_symbol("x", Type::Int);
        let f = fn_symbol("f", vec![Type::Int], Type::Bool);
        let decl = fn_decl(&f, &[x], vec![ret(Some(true_lit()))]);

        match &decl.data {
            Decl::Fn(fn_decl) => {
                assert_eq!(Type::Bool, fn_decl.ret.data);
                assert_eq!(1, fn_decl.formals.len());
                assert_eq!("x", fn_decl.formals[0].name.name);
                assert_eq!("f", decl.name().name);
            }
            Decl::Var(_) => panic!("expected a function declaration"),
        }
    }

    #[test]
    #[should_panic(expected = "non-function type")]
    fn fn_decl_rejects_variable_symbols() {
        let v = var_symbol("v", Type::Int);
        fn_decl(&v, &[], vec![]);
    }
}
