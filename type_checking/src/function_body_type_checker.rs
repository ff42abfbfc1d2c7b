use crate::{
    checker::SemanticContext,
    type_analysis::TypeTable,
    type_error::TypeError,
    type_system::{DataType, FnType},
};
use asciifile::Spanned;
use ast::{Block, Expr, FnDecl, FormalDecl, Ident, Stmt};

/// The function whose body is being checked. `return` statements are
/// checked against its signature.
#[derive(Debug, Clone)]
pub struct FunctionContext {
    pub name: String,
    pub fn_type: FnType,
}

impl FunctionContext {
    pub fn new(name: &str, fn_type: FnType) -> Self {
        Self {
            name: name.to_string(),
            fn_type,
        }
    }

    pub fn ret(&self) -> &DataType {
        self.fn_type.ret()
    }
}

/// Gives a declared name its declared type.
pub(crate) fn declare<'ast>(types: &mut TypeTable<'ast>, name: &'ast Spanned<Ident>) {
    types.set_type(name, DataType::from(name.declared_type()));
}

pub struct FunctionBodyTypeChecker<'ctx, 'ana, 'ast> {
    pub context: &'ctx SemanticContext<'ctx>,
    pub types: &'ana mut TypeTable<'ast>,
}

impl<'ctx, 'ana, 'ast> FunctionBodyTypeChecker<'ctx, 'ana, 'ast> {
    /// Types the formals and the body of `fn_decl`, then binds the function's
    /// name to the signature built from the declared formal and return types.
    pub fn check_function(
        fn_decl: &'ast FnDecl,
        types: &'ana mut TypeTable<'ast>,
        context: &'ctx SemanticContext<'ctx>,
    ) {
        log::debug!("type checking function `{}`", fn_decl.name.name);

        let fn_type = FnType::new(
            fn_decl
                .formals
                .iter()
                .map(|formal| DataType::from(&formal.ty.data))
                .collect(),
            DataType::from(&fn_decl.ret.data),
        );
        let fn_context = FunctionContext::new(&fn_decl.name.name, fn_type.clone());

        let mut checker = FunctionBodyTypeChecker { context, types };

        for formal in &fn_decl.formals {
            checker.check_formal(formal);
        }
        checker.check_block(&fn_decl.body, &fn_context);

        checker.types.set_type(&fn_decl.name, DataType::Fn(fn_type));
    }

    fn check_formal(&mut self, formal: &'ast Spanned<FormalDecl>) {
        declare(self.types, &formal.name);
        self.types.set_type(formal, DataType::VOID);
    }

    pub fn check_block(&mut self, block: &'ast Block, fn_context: &FunctionContext) {
        for stmt in block {
            self.check_stmt(stmt, fn_context);
        }
    }

    pub fn check_stmt(&mut self, stmt: &'ast Spanned<Stmt>, fn_context: &FunctionContext) {
        let ty = match &stmt.data {
            Stmt::VarDecl(var_decl) => {
                declare(self.types, &var_decl.name);
                DataType::VOID
            }
            Stmt::Expr(expr) => {
                let ty = self.check_expr(expr);
                statement_type(&ty)
            }
            Stmt::Read(dst) => {
                let ty = self.check_expr(dst);
                if ty.as_fn().is_some() {
                    self.context
                        .report_error(dst.span, TypeError::ReadTargetIsFunction);
                    DataType::Error
                } else {
                    statement_type(&ty)
                }
            }
            Stmt::Write(src) => self.check_write(src),
            Stmt::If(cond, body) | Stmt::While(cond, body) => {
                let cond_ty = self.check_condition(cond);
                self.check_block(body, fn_context);
                cond_ty
            }
            Stmt::IfElse(cond, then_body, else_body) => {
                let cond_ty = self.check_condition(cond);
                self.check_block(then_body, fn_context);
                self.check_block(else_body, fn_context);
                cond_ty
            }
            Stmt::Return(value) => {
                self.check_return(stmt, value.as_ref().map(|v| &**v), fn_context)
            }
        };

        self.types.set_type(stmt, ty);
    }

    fn check_write(&mut self, src: &'ast Spanned<Expr>) -> DataType {
        let ty = self.check_expr(src);

        if ty.is_void() {
            self.context.report_error(src.span, TypeError::WriteVoidValue);
            DataType::Error
        } else if ty.as_fn().is_some() {
            self.context
                .report_error(src.span, TypeError::WriteFunctionValue);
            DataType::Error
        } else {
            statement_type(&ty)
        }
    }

    /// Type of the statement guarded by `cond`.
    fn check_condition(&mut self, cond: &'ast Spanned<Expr>) -> DataType {
        let ty = self.check_expr(cond);

        if ty.is_error() {
            log::trace!("absorbed error in condition at {}", cond.span);
            DataType::Error
        } else if ty.is_bool() {
            DataType::VOID
        } else {
            self.context
                .report_error(cond.span, TypeError::InvalidGuardCondition);
            DataType::Error
        }
    }

    fn check_return(
        &mut self,
        stmt: &'ast Spanned<Stmt>,
        value: Option<&'ast Spanned<Expr>>,
        fn_context: &FunctionContext,
    ) -> DataType {
        let expected = fn_context.ret();

        match value {
            None if expected.is_void() => DataType::VOID,
            None => {
                log::debug!("`{}` returns without a value", fn_context.name);
                self.context
                    .report_error(stmt.span, TypeError::MissingReturnValue);
                DataType::Error
            }
            Some(value) if expected.is_void() => {
                self.check_expr(value);
                self.context
                    .report_error(value.span, TypeError::ExtraReturnValue);
                DataType::Error
            }
            Some(value) => {
                let actual = self.check_expr(value);
                if actual.is_error() {
                    log::trace!("absorbed error in return value at {}", value.span);
                    DataType::Error
                } else if actual.compatible(expected) {
                    expected.clone()
                } else {
                    log::debug!(
                        "`{}` returns {} where {} is declared",
                        fn_context.name,
                        actual,
                        expected
                    );
                    self.context.report_error(
                        value.span,
                        TypeError::ReturnTypeMismatch {
                            expected: expected.clone(),
                            actual,
                        },
                    );
                    DataType::Error
                }
            }
        }
    }
}

/// A statement wrapping an ill-typed expression is ill-typed itself.
fn statement_type(wrapped: &DataType) -> DataType {
    if wrapped.is_error() {
        DataType::Error
    } else {
        DataType::VOID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_context_keeps_name_and_return_type() {
        let fn_type = FnType::new(vec![DataType::INT], DataType::BOOL);
        let fn_context = FunctionContext::new("is_even", fn_type);
        assert_eq!("is_even", fn_context.name);
        assert!(fn_context.ret().is_bool());
    }
}
