#![allow(dead_code)]

use asciifile::{Span, Spanned};
use ast::{build::*, Block, Decl, Expr, Program, Stmt, Type};
use compiler_shared::context::Context;
use type_checking::{NodeRef, TypeAnalysis, TypeError, TypeErrorKind};

pub struct Checked<'ast> {
    pub context: Context,
    pub analysis: TypeAnalysis<'ast>,
}

pub fn check(program: &Program) -> Checked<'_> {
    let _ = env_logger::try_init();

    let context = Context::dummy();
    let analysis = type_checking::check(program, &context);
    Checked { context, analysis }
}

impl<'ast> Checked<'ast> {
    pub fn errors(&self) -> Vec<TypeError> {
        self.context
            .diagnostics
            .messages()
            .iter()
            .map(|msg| {
                msg.downcast_ref::<TypeError>()
                    .expect("type analysis only reports type errors")
                    .clone()
            })
            .collect()
    }

    pub fn kinds(&self) -> Vec<TypeErrorKind> {
        self.errors().iter().map(TypeError::kind).collect()
    }

    /// Kinds and positions of all reported errors, in reporting order.
    pub fn reported(&self) -> Vec<(TypeErrorKind, Span)> {
        self.context
            .diagnostics
            .messages()
            .iter()
            .map(|msg| {
                let kind = msg
                    .downcast_ref::<TypeError>()
                    .expect("type analysis only reports type errors")
                    .kind();
                (kind, msg.span().expect("type errors carry a span"))
            })
            .collect()
    }

    pub fn type_of(&self, node: impl Into<NodeRef<'ast>>) -> String {
        self.analysis.types().get_type(node).to_string()
    }

    pub fn is_clean(&self) -> bool {
        self.analysis.is_well_typed() && !self.context.diagnostics.errored()
    }
}

/// `void main() { stmts }`
pub fn in_main(stmts: Block) -> Program {
    let main = fn_symbol("main", vec![], Type::Void);
    program(vec![fn_decl(&main, &[], stmts)])
}

/// `void main() { expr; }`
pub fn expr_program(expr: Spanned<Expr>) -> Program {
    in_main(vec![expr_stmt(expr)])
}

pub fn body(program: &Program, global: usize) -> &Block {
    match &program.globals[global].data {
        Decl::Fn(fn_decl) => &fn_decl.body,
        Decl::Var(_) => panic!("global {} is not a function", global),
    }
}

/// The expression wrapped by a statement.
pub fn wrapped(stmt: &Spanned<Stmt>) -> &Spanned<Expr> {
    match &stmt.data {
        Stmt::Expr(expr)
        | Stmt::Read(expr)
        | Stmt::Write(expr)
        | Stmt::If(expr, _)
        | Stmt::IfElse(expr, _, _)
        | Stmt::While(expr, _)
        | Stmt::Return(Some(expr)) => &**expr,
        Stmt::VarDecl(_) | Stmt::Return(None) => panic!("statement wraps no expression"),
    }
}

/// The expression of the only statement of `void main() { expr; }`
pub fn main_expr(program: &Program) -> &Spanned<Expr> {
    wrapped(&body(program, program.globals.len() - 1)[0])
}

pub fn operands(expr: &Spanned<Expr>) -> (&Spanned<Expr>, &Spanned<Expr>) {
    match &expr.data {
        Expr::Binary(_, lhs, rhs) | Expr::Assign(lhs, rhs) => (&**lhs, &**rhs),
        _ => panic!("not a binary expression"),
    }
}

pub fn operand(expr: &Spanned<Expr>) -> &Spanned<Expr> {
    match &expr.data {
        Expr::Unary(_, operand)
        | Expr::Ref(operand)
        | Expr::Deref(operand)
        | Expr::IncDec(_, operand) => &**operand,
        _ => panic!("not a unary expression"),
    }
}

pub fn args(expr: &Spanned<Expr>) -> &[Spanned<Expr>] {
    match &expr.data {
        Expr::Call(_, args) => args.as_slice(),
        _ => panic!("not a call"),
    }
}

pub fn callee(expr: &Spanned<Expr>) -> &Spanned<ast::Ident> {
    match &expr.data {
        Expr::Call(callee, _) => callee,
        _ => panic!("not a call"),
    }
}

/// Every node of `program` that has to receive a type.
pub fn all_nodes(program: &Program) -> Vec<NodeRef<'_>> {
    let mut nodes = vec![NodeRef::from(program)];
    for global in &program.globals {
        nodes.push(NodeRef::from(global));
        match &global.data {
            Decl::Var(var_decl) => nodes.push(NodeRef::from(&var_decl.name)),
            Decl::Fn(fn_decl) => {
                nodes.push(NodeRef::from(&fn_decl.name));
                for formal in &fn_decl.formals {
                    nodes.push(NodeRef::from(formal));
                    nodes.push(NodeRef::from(&formal.name));
                }
                block_nodes(&fn_decl.body, &mut nodes);
            }
        }
    }
    nodes
}

fn block_nodes<'ast>(block: &'ast Block, nodes: &mut Vec<NodeRef<'ast>>) {
    for stmt in block {
        nodes.push(NodeRef::from(stmt));
        match &stmt.data {
            Stmt::VarDecl(var_decl) => nodes.push(NodeRef::from(&var_decl.name)),
            Stmt::Expr(expr) | Stmt::Read(expr) | Stmt::Write(expr) | Stmt::Return(Some(expr)) => {
                expr_nodes(expr, nodes)
            }
            Stmt::If(cond, body) | Stmt::While(cond, body) => {
                expr_nodes(cond, nodes);
                block_nodes(body, nodes);
            }
            Stmt::IfElse(cond, then_body, else_body) => {
                expr_nodes(cond, nodes);
                block_nodes(then_body, nodes);
                block_nodes(else_body, nodes);
            }
            Stmt::Return(None) => {}
        }
    }
}

fn expr_nodes<'ast>(expr: &'ast Spanned<Expr>, nodes: &mut Vec<NodeRef<'ast>>) {
    nodes.push(NodeRef::from(expr));
    match &expr.data {
        Expr::IntLit(_)
        | Expr::ShortLit(_)
        | Expr::StrLit(_)
        | Expr::True
        | Expr::False
        | Expr::Id(_) => {}
        Expr::Call(callee, args) => {
            nodes.push(NodeRef::from(callee));
            for arg in args {
                expr_nodes(arg, nodes);
            }
        }
        Expr::Binary(_, lhs, rhs) | Expr::Assign(lhs, rhs) => {
            expr_nodes(lhs, nodes);
            expr_nodes(rhs, nodes);
        }
        Expr::Unary(_, operand)
        | Expr::Ref(operand)
        | Expr::Deref(operand)
        | Expr::IncDec(_, operand) => expr_nodes(operand, nodes),
    }
}
