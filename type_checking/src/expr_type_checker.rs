use crate::{
    function_body_type_checker::FunctionBodyTypeChecker, type_error::TypeError,
    type_system::DataType,
};
use asciifile::Spanned;
use ast::{
    ArgumentList, BinaryOp, BinaryOpKind, Expr, ExprDiscriminants, Ident, IncDecOp, UnaryOp,
};

impl<'ctx, 'ana, 'ast> FunctionBodyTypeChecker<'ctx, 'ana, 'ast> {
    /// Types `expr` and all of its subexpressions. Returns the type recorded
    /// for `expr`.
    pub fn check_expr(&mut self, expr: &'ast Spanned<Expr>) -> DataType {
        use self::Expr::*;

        let ty = match &expr.data {
            IntLit(_) => DataType::INT,
            ShortLit(_) => DataType::SHORT,
            StrLit(_) => DataType::STRING,
            True | False => DataType::BOOL,
            Id(ident) => DataType::from(ident.declared_type()),
            Call(callee, args) => self.check_call(expr, callee, args),
            Binary(op, lhs, rhs) => self.check_binary(*op, lhs, rhs),
            Unary(op, operand) => self.check_unary(*op, operand),
            Ref(operand) => self.check_ref(operand),
            Deref(operand) => self.check_deref(operand),
            IncDec(op, operand) => self.check_inc_dec(*op, operand),
            Assign(dst, src) => self.check_assign(expr, dst, src),
        };

        log::trace!(
            "{} at {} has type {}",
            ExprDiscriminants::from(&expr.data),
            expr.span,
            ty
        );
        self.types.set_type(expr, ty.clone());
        ty
    }

    fn check_call(
        &mut self,
        call: &'ast Spanned<Expr>,
        callee: &'ast Spanned<Ident>,
        args: &'ast ArgumentList,
    ) -> DataType {
        let callee_ty = DataType::from(callee.declared_type());
        self.types.set_type(callee, callee_ty.clone());

        // arguments are checked even if the call itself is hopeless
        let arg_types: Vec<DataType> = args.iter().map(|arg| self.check_expr(arg)).collect();

        let fn_type = match callee_ty.as_fn() {
            Some(fn_type) => fn_type,
            None => {
                self.context.report_error(callee.span, TypeError::InvalidCallee);
                return DataType::Error;
            }
        };

        if arg_types.len() != fn_type.arity() {
            self.context.report_error(
                call.span,
                TypeError::ArgCountMismatch {
                    expected: fn_type.arity(),
                    actual: arg_types.len(),
                },
            );
            return DataType::Error;
        }

        if arg_types.iter().any(DataType::is_error) {
            log::trace!("absorbed error in arguments of call at {}", call.span);
            return DataType::Error;
        }

        let mismatch = arg_types
            .iter()
            .zip(&fn_type.formals)
            .position(|(actual, formal)| !actual.compatible(formal));

        match mismatch {
            Some(position) => {
                self.context.report_error(
                    args[position].span,
                    TypeError::ArgTypeMismatch {
                        position: position + 1,
                        expected: fn_type.formals[position].clone(),
                        actual: arg_types[position].clone(),
                    },
                );
                DataType::Error
            }
            None => fn_type.ret().clone(),
        }
    }

    fn check_binary(
        &mut self,
        op: BinaryOp,
        lhs: &'ast Spanned<Expr>,
        rhs: &'ast Spanned<Expr>,
    ) -> DataType {
        let lhs_ty = self.check_expr(lhs);
        let rhs_ty = self.check_expr(rhs);

        if lhs_ty.is_error() || rhs_ty.is_error() {
            log::trace!("absorbed error in operand of `{}`", op);
            return DataType::Error;
        }

        let matching = lhs_ty.compatible(&rhs_ty);
        let (valid, result, error) = match op.kind() {
            BinaryOpKind::Arithmetic => (
                matching && lhs_ty.is_numeric(),
                lhs_ty.clone(),
                TypeError::InvalidMathOperand,
            ),
            BinaryOpKind::Logical => (
                matching && lhs_ty.is_bool(),
                DataType::BOOL,
                TypeError::InvalidLogicalOperand,
            ),
            BinaryOpKind::Equality => (matching, DataType::BOOL, TypeError::InvalidEqualityOperand),
            BinaryOpKind::Relational => (
                matching && !lhs_ty.is_string() && !lhs_ty.is_void(),
                DataType::BOOL,
                TypeError::InvalidRelationalOperand,
            ),
        };

        if valid {
            result
        } else {
            self.context.report_error(rhs.span, error);
            DataType::Error
        }
    }

    fn check_unary(&mut self, op: UnaryOp, operand: &'ast Spanned<Expr>) -> DataType {
        let ty = self.check_expr(operand);

        let (valid, error) = match op {
            UnaryOp::Neg => (ty.is_numeric(), TypeError::InvalidMathOperand),
            UnaryOp::Not => (ty.is_bool(), TypeError::InvalidLogicalOperand),
        };

        self.expect_operand(operand, ty, valid, error)
    }

    fn check_ref(&mut self, operand: &'ast Spanned<Expr>) -> DataType {
        let ty = self.check_expr(operand);
        let valid = operand.is_lvalue() && ty.as_fn().is_none() && !ty.is_void();

        match self.expect_operand(operand, ty, valid, TypeError::InvalidRefOperand) {
            DataType::Error => DataType::Error,
            pointee => DataType::ptr(pointee),
        }
    }

    fn check_deref(&mut self, operand: &'ast Spanned<Expr>) -> DataType {
        let ty = self.check_expr(operand);
        let valid = ty.as_ptr().is_some();

        match self.expect_operand(operand, ty, valid, TypeError::InvalidDerefOperand) {
            DataType::Ptr(pointee) => *pointee,
            _ => DataType::Error,
        }
    }

    fn check_inc_dec(&mut self, op: IncDecOp, operand: &'ast Spanned<Expr>) -> DataType {
        let ty = self.check_expr(operand);
        let valid = operand.is_lvalue() && ty.is_numeric();

        log::trace!("checking `{}` on {}", op, ty);
        self.expect_operand(operand, ty, valid, TypeError::InvalidMathOperand)
    }

    /// Shared tail of the unary rules: absorbs an ill-typed operand, reports
    /// `error` at the operand if it is invalid and passes it through
    /// otherwise.
    fn expect_operand(
        &mut self,
        operand: &'ast Spanned<Expr>,
        ty: DataType,
        valid: bool,
        error: TypeError,
    ) -> DataType {
        if ty.is_error() {
            log::trace!("absorbed error in operand at {}", operand.span);
            DataType::Error
        } else if valid {
            ty
        } else {
            self.context.report_error(operand.span, error);
            DataType::Error
        }
    }

    fn check_assign(
        &mut self,
        assign: &'ast Spanned<Expr>,
        dst: &'ast Spanned<Expr>,
        src: &'ast Spanned<Expr>,
    ) -> DataType {
        let dst_ty = self.check_expr(dst);
        let src_ty = self.check_expr(src);

        if dst_ty.is_error() || src_ty.is_error() {
            log::trace!("absorbed error in assignment at {}", assign.span);
            return DataType::Error;
        }

        // functions cannot be rebound, not even to a function of the same
        // signature
        let rebinds_function = dst_ty.as_fn().is_some() && src_ty.as_fn().is_some();

        if dst.is_lvalue() && !rebinds_function && dst_ty.compatible(&src_ty) {
            dst_ty
        } else {
            self.context
                .report_error(assign.span, TypeError::InvalidAssignOperator);
            DataType::Error
        }
    }
}
