/// Why an expression could not be evaluated.
///
/// The `Display` text is meant to be shown to the user as-is.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("empty expression")]
    EmptyExpression,

    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),

    #[error("mismatched parentheses")]
    MismatchedParentheses,

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("not enough operands")]
    InsufficientOperands,

    #[error("division by zero")]
    DivisionByZero,

    #[error("malformed expression")]
    MalformedExpression,

    #[error("result is not a finite number")]
    InvalidResult,
}
