use std::fmt;

use super::EvalError;

/// Binary operators understood by the calculator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    /// Subtraction from the synthetic zero inserted for a unary minus.
    ///
    /// Binds tighter than `*` and `/` and associates to the right, so `3*-2`
    /// is `3*(0-2)` and `--5` is `0-(0-5)`.
    Neg,
}

impl Operator {
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub | Self::Neg => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Neg => 3,
        }
    }

    pub fn is_right_assoc(self) -> bool {
        matches!(self, Self::Neg)
    }

    /// Whether `top`, already waiting on the operator stack, must be emitted
    /// before `self` is pushed.
    pub fn yields_to(self, top: Operator) -> bool {
        if self.is_right_assoc() {
            top.precedence() > self.precedence()
        } else {
            top.precedence() >= self.precedence()
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
        let value = match self {
            Self::Add => lhs + rhs,
            Self::Sub | Self::Neg => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                lhs / rhs
            }
        };
        Ok(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Raw digits-and-dots run, validated only when evaluated.
    Number(String),
    Operator(Operator),
    LParen,
    RParen,
}

impl Token {
    pub fn number(text: impl Into<String>) -> Self {
        Self::Number(text.into())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(text) => f.write_str(text),
            Self::Operator(op) => write!(f, "{}", op.symbol()),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Split an infix expression into tokens.
///
/// Whitespace is dropped before scanning. Every unary minus comes out as
/// `Number("0")` followed by [`Operator::Neg`]; a leading `+` is left alone.
pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.is_empty() {
        return Err(EvalError::EmptyExpression);
    }

    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0usize;
    while i < chars.len() {
        let c = chars[i];
        if is_number_char(c) {
            let start = i;
            while i < chars.len() && is_number_char(chars[i]) {
                i += 1;
            }
            tokens.push(Token::Number(chars[start..i].iter().collect()));
            continue;
        }

        let token = match c {
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => match Operator::from_symbol(c) {
                Some(op) => Token::Operator(op),
                None => return Err(EvalError::UnexpectedCharacter(c)),
            },
        };
        tokens.push(token);
        i += 1;
    }

    Ok(rewrite_unary_minus(tokens))
}

fn rewrite_unary_minus(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len() + 2);
    for token in tokens {
        if token == Token::Operator(Operator::Sub) {
            let unary = matches!(
                out.last(),
                None | Some(Token::Operator(_)) | Some(Token::LParen)
            );
            if unary {
                out.push(Token::number("0"));
                out.push(Token::Operator(Operator::Neg));
                continue;
            }
        }
        out.push(token);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn strips_whitespace_and_splits() {
        let tokens = tokenize(" 12 +\t3.5*( 4 )\n").unwrap();
        assert_eq!(render(&tokens), "12 + 3.5 * ( 4 )");
    }

    #[test]
    fn whitespace_inside_numbers_joins_them() {
        assert_eq!(tokenize("1 2").unwrap(), vec![Token::number("12")]);
    }

    #[test]
    fn empty_and_blank_input_is_rejected() {
        assert_eq!(tokenize(""), Err(EvalError::EmptyExpression));
        assert_eq!(tokenize(" \t\n "), Err(EvalError::EmptyExpression));
    }

    #[test]
    fn unknown_characters_fail_immediately() {
        assert_eq!(tokenize("2+a"), Err(EvalError::UnexpectedCharacter('a')));
        assert_eq!(tokenize("1e5"), Err(EvalError::UnexpectedCharacter('e')));
        assert_eq!(tokenize("2^3"), Err(EvalError::UnexpectedCharacter('^')));
        assert_eq!(tokenize("½"), Err(EvalError::UnexpectedCharacter('½')));
    }

    #[test]
    fn malformed_number_runs_are_kept_whole() {
        assert_eq!(
            tokenize("1.2.3+1").unwrap(),
            vec![
                Token::number("1.2.3"),
                Token::Operator(Operator::Add),
                Token::number("1"),
            ]
        );
    }

    #[test]
    fn unary_minus_gets_a_zero_operand() {
        let neg = Token::Operator(Operator::Neg);
        assert_eq!(
            tokenize("-5").unwrap(),
            vec![Token::number("0"), neg.clone(), Token::number("5")]
        );
        assert_eq!(render(&tokenize("3*-2").unwrap()), "3 * 0 - 2");
        assert_eq!(tokenize("3*-2").unwrap()[3], neg);
        assert_eq!(tokenize("(-1)").unwrap()[2], neg);
        assert_eq!(render(&tokenize("--1").unwrap()), "0 - 0 - 1");
    }

    #[test]
    fn binary_minus_is_not_rewritten() {
        assert_eq!(
            tokenize("4-1").unwrap(),
            vec![
                Token::number("4"),
                Token::Operator(Operator::Sub),
                Token::number("1"),
            ]
        );
        assert_eq!(tokenize("(1)-1").unwrap()[3], Token::Operator(Operator::Sub));
    }

    #[test]
    fn leading_plus_is_not_rewritten() {
        assert_eq!(
            tokenize("+3").unwrap(),
            vec![Token::Operator(Operator::Add), Token::number("3")]
        );
    }

    #[test]
    fn unary_minus_binds_tighter_than_multiplication() {
        assert!(Operator::Mul.yields_to(Operator::Neg));
        assert!(!Operator::Neg.yields_to(Operator::Mul));
        assert!(!Operator::Neg.yields_to(Operator::Neg));
        assert!(Operator::Sub.yields_to(Operator::Sub));
    }
}
