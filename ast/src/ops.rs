use derive_more::Display;

/// Binary operations: algebraic (`+`, `-`, `*`, `/`), logical (`&&`, `||`),
/// equality (`==`, `!=`) and relational comparisons (`<`, `<=`, `>`, `>=`).
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOp {
    #[display(fmt = "+")]
    Add,
    #[display(fmt = "-")]
    Sub,
    #[display(fmt = "*")]
    Mul,
    #[display(fmt = "/")]
    Div,

    #[display(fmt = "&&")]
    LogicalAnd,
    #[display(fmt = "||")]
    LogicalOr,

    #[display(fmt = "==")]
    Equals,
    #[display(fmt = "!=")]
    NotEquals,

    #[display(fmt = "<")]
    LessThan,
    #[display(fmt = "<=")]
    LessEquals,
    #[display(fmt = ">")]
    GreaterThan,
    #[display(fmt = ">=")]
    GreaterEquals,
}

/// The operator classes that share a typing rule.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOpKind {
    Arithmetic,
    Logical,
    Equality,
    Relational,
}

impl BinaryOp {
    pub fn kind(self) -> BinaryOpKind {
        use self::BinaryOp::*;
        match self {
            Add | Sub | Mul | Div => BinaryOpKind::Arithmetic,
            LogicalAnd | LogicalOr => BinaryOpKind::Logical,
            Equals | NotEquals => BinaryOpKind::Equality,
            LessThan | LessEquals | GreaterThan | GreaterEquals => BinaryOpKind::Relational,
        }
    }
}

/// One of the unary operations `!` and `-`
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum UnaryOp {
    #[display(fmt = "!")]
    Not,
    #[display(fmt = "-")]
    Neg,
}

#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum IncDecOp {
    #[display(fmt = "++ (prefix)")]
    PreInc,
    #[display(fmt = "-- (prefix)")]
    PreDec,
    #[display(fmt = "++")]
    PostInc,
    #[display(fmt = "--")]
    PostDec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_print_their_source_form() {
        assert_eq!("<=", BinaryOp::LessEquals.to_string());
        assert_eq!("||", BinaryOp::LogicalOr.to_string());
        assert_eq!("!", UnaryOp::Not.to_string());
        assert_eq!("--", IncDecOp::PostDec.to_string());
    }

    #[test]
    fn operator_kinds() {
        assert_eq!(BinaryOpKind::Arithmetic, BinaryOp::Div.kind());
        assert_eq!(BinaryOpKind::Logical, BinaryOp::LogicalAnd.kind());
        assert_eq!(BinaryOpKind::Equality, BinaryOp::NotEquals.kind());
        assert_eq!(BinaryOpKind::Relational, BinaryOp::GreaterThan.kind());
    }
}
