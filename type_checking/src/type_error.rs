use crate::type_system::DataType;
use failure::Fail;
use strum_macros::{Display, EnumDiscriminants};

/// A violation of a typing rule. Every variant is reported exactly once,
/// at the node that violates the rule.
#[derive(EnumDiscriminants, Debug, Fail, Clone, PartialEq)]
#[strum_discriminants(name(TypeErrorKind))]
#[strum_discriminants(derive(Display, Hash))]
pub enum TypeError {
    #[fail(display = "Arithmetic operator applied to invalid operand")]
    InvalidMathOperand,
    #[fail(display = "Logical operator applied to non-bool operand")]
    InvalidLogicalOperand,
    #[fail(display = "Relational operator applied to invalid operand")]
    InvalidRelationalOperand,
    #[fail(display = "Invalid equality operand")]
    InvalidEqualityOperand,
    #[fail(display = "Invalid assignment operation")]
    InvalidAssignOperator,
    #[fail(display = "Non-bool expression used as a condition")]
    InvalidGuardCondition,
    #[fail(display = "Attempt to call a non-function")]
    InvalidCallee,
    #[fail(
        display = "Function call with wrong number of args: expected {}, found {}",
        expected, actual
    )]
    ArgCountMismatch { expected: usize, actual: usize },
    #[fail(
        display = "Type of actual does not match type of formal {}: expected {}, found {}",
        position, expected, actual
    )]
    ArgTypeMismatch {
        position: usize,
        expected: DataType,
        actual: DataType,
    },
    #[fail(display = "Missing return value")]
    MissingReturnValue,
    #[fail(display = "Return with a value in void function")]
    ExtraReturnValue,
    #[fail(display = "Bad return value: expected {}, found {}", expected, actual)]
    ReturnTypeMismatch { expected: DataType, actual: DataType },
    #[fail(display = "Attempt to assign user input to function")]
    ReadTargetIsFunction,
    #[fail(display = "Attempt to output void")]
    WriteVoidValue,
    #[fail(display = "Attempt to output a function")]
    WriteFunctionValue,
    #[fail(display = "Attempt to take the address of an invalid operand")]
    InvalidRefOperand,
    #[fail(display = "Attempt to dereference a non-reference")]
    InvalidDerefOperand,
}

impl TypeError {
    pub fn kind(&self) -> TypeErrorKind {
        TypeErrorKind::from(self)
    }
}
