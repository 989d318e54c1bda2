//! Pratt parser for template expressions
//!
//! Precedence-climbing over the token vector. All binary operators are
//! left-associative; the ternary is right-associative and handled at the
//! lowest binding power.

use super::error::{ParseError, ParseResult};
use super::span::Spanned;
use super::tokenizer::{Token, tokenize};
use crate::ast::{BinaryOperator, ExpressionNode, LiteralValue, UnaryOperator};

/// Operator precedence levels (higher = tighter binding)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Ternary `?:` (right associative)
    Ternary = 1,
    /// Logical OR
    Or = 2,
    /// Logical AND
    And = 3,
    /// Equality operators (`==`, `!=`)
    Equality = 4,
    /// Relational operators (`<`, `<=`, `>`, `>=`)
    Relational = 5,
    /// Additive operators (`+`, `-`)
    Additive = 6,
    /// Multiplicative operators (`*`, `/`, `%`)
    Multiplicative = 7,
    /// Unary prefix operators (`!`, `-`)
    Unary = 8,
}

impl Precedence {
    /// Convert precedence to raw u8 for comparisons
    #[inline(always)]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Precedence of a token in binary/ternary operator position
#[inline(always)]
fn get_precedence(token: &Token) -> Option<Precedence> {
    match token {
        Token::Question => Some(Precedence::Ternary),
        Token::Or => Some(Precedence::Or),
        Token::And => Some(Precedence::And),
        Token::Equal | Token::NotEqual => Some(Precedence::Equality),
        Token::LessThan
        | Token::LessThanOrEqual
        | Token::GreaterThan
        | Token::GreaterThanOrEqual => Some(Precedence::Relational),
        Token::Plus | Token::Minus => Some(Precedence::Additive),
        Token::Multiply | Token::Divide | Token::Percent => Some(Precedence::Multiplicative),
        _ => None,
    }
}

/// Convert an operator token to its binary operator
#[inline(always)]
fn token_to_binary_op(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Or => Some(BinaryOperator::Or),
        Token::And => Some(BinaryOperator::And),
        Token::Equal => Some(BinaryOperator::Equal),
        Token::NotEqual => Some(BinaryOperator::NotEqual),
        Token::LessThan => Some(BinaryOperator::LessThan),
        Token::LessThanOrEqual => Some(BinaryOperator::LessThanOrEqual),
        Token::GreaterThan => Some(BinaryOperator::GreaterThan),
        Token::GreaterThanOrEqual => Some(BinaryOperator::GreaterThanOrEqual),
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Subtract),
        Token::Multiply => Some(BinaryOperator::Multiply),
        Token::Divide => Some(BinaryOperator::Divide),
        Token::Percent => Some(BinaryOperator::Modulo),
        _ => None,
    }
}

/// Parse a template expression string into an AST
pub fn parse_expression(input: &str) -> ParseResult<ExpressionNode> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_binding_power(0)?;
    if let Some(trailing) = parser.peek() {
        return Err(ParseError::TrailingTokens {
            token: trailing.value.describe(),
            position: trailing.span.start,
        });
    }
    Ok(expr)
}

/// Pratt parser over a token vector
struct Parser {
    tokens: Vec<Spanned<Token>>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned<Token>>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Spanned<Token>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Spanned<Token>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token, description: &str) -> ParseResult<()> {
        match self.peek() {
            Some(spanned) if spanned.value == *expected => {
                self.pos += 1;
                Ok(())
            }
            Some(spanned) => Err(ParseError::ExpectedToken {
                expected: description.to_string(),
                position: spanned.span.start,
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    /// Core precedence-climbing loop
    fn parse_binding_power(&mut self, min_precedence: u8) -> ParseResult<ExpressionNode> {
        let mut left = self.parse_unary()?;

        while let Some(spanned) = self.peek() {
            let Some(precedence) = get_precedence(&spanned.value) else {
                break;
            };
            if precedence.as_u8() < min_precedence {
                break;
            }

            if spanned.value == Token::Question {
                // Right-associative: branches re-enter at ternary level
                self.pos += 1;
                let when_true = self.parse_binding_power(Precedence::Ternary.as_u8())?;
                self.expect(&Token::Colon, "':'")?;
                let when_false = self.parse_binding_power(Precedence::Ternary.as_u8())?;
                left = ExpressionNode::ternary(left, when_true, when_false);
                continue;
            }

            let op_token = self.advance().expect("operator token peeked");
            let op = token_to_binary_op(&op_token.value).expect("token has precedence");
            // Left-associative: right side binds one level tighter
            let right = self.parse_binding_power(precedence.as_u8() + 1)?;
            left = ExpressionNode::binary_op(op, left, right);
        }

        Ok(left)
    }

    /// Unary prefix operators, tighter than any binary operator
    fn parse_unary(&mut self) -> ParseResult<ExpressionNode> {
        match self.peek().map(|s| s.value.clone()) {
            Some(Token::Not) => {
                self.pos += 1;
                let operand = self.parse_unary()?;
                Ok(ExpressionNode::unary_op(UnaryOperator::Not, operand))
            }
            Some(Token::Minus) => {
                self.pos += 1;
                let operand = self.parse_unary()?;
                Ok(ExpressionNode::unary_op(UnaryOperator::Minus, operand))
            }
            _ => self.parse_primary(),
        }
    }

    /// Primary expressions: literals, identifiers, calls, parenthesized
    fn parse_primary(&mut self) -> ParseResult<ExpressionNode> {
        let Some(spanned) = self.advance() else {
            return Err(ParseError::UnexpectedEof);
        };

        match spanned.value {
            Token::Number(n) => Ok(ExpressionNode::literal(LiteralValue::Number(n))),
            Token::String(s) => Ok(ExpressionNode::literal(LiteralValue::String(s))),
            Token::True => Ok(ExpressionNode::literal(LiteralValue::Boolean(true))),
            Token::False => Ok(ExpressionNode::literal(LiteralValue::Boolean(false))),
            Token::Null => Ok(ExpressionNode::literal(LiteralValue::Null)),
            Token::Identifier(path) => {
                // An identifier directly followed by '(' is always a call
                if self.peek().map(|s| &s.value) == Some(&Token::LeftParen) {
                    self.pos += 1;
                    let args = self.parse_argument_list()?;
                    Ok(ExpressionNode::function_call(path, args))
                } else {
                    Ok(ExpressionNode::identifier(path))
                }
            }
            Token::LeftParen => {
                let inner = self.parse_binding_power(0)?;
                self.expect(&Token::RightParen, "')'")?;
                Ok(inner)
            }
            other => Err(ParseError::UnexpectedToken {
                token: other.describe(),
                position: spanned.span.start,
            }),
        }
    }

    /// Comma-separated expressions up to the closing parenthesis
    fn parse_argument_list(&mut self) -> ParseResult<Vec<ExpressionNode>> {
        let mut args = Vec::new();
        if self.peek().map(|s| &s.value) == Some(&Token::RightParen) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.parse_binding_power(0)?);
            match self.peek().map(|s| s.value.clone()) {
                Some(Token::Comma) => {
                    self.pos += 1;
                }
                Some(Token::RightParen) => {
                    self.pos += 1;
                    return Ok(args);
                }
                Some(other) => {
                    let position = self.peek().map(|s| s.span.start).unwrap_or_default();
                    return Err(ParseError::UnexpectedToken {
                        token: other.describe(),
                        position,
                    });
                }
                None => return Err(ParseError::UnexpectedEof),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn num(n: f64) -> ExpressionNode {
        ExpressionNode::literal(LiteralValue::Number(n))
    }

    #[test]
    fn test_precedence_multiplicative_over_additive() {
        let expr = parse_expression("10 + 5 * 2").unwrap();
        assert_eq!(
            expr,
            ExpressionNode::binary_op(
                BinaryOperator::Add,
                num(10.0),
                ExpressionNode::binary_op(BinaryOperator::Multiply, num(5.0), num(2.0)),
            )
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let expr = parse_expression("(10 + 5) * 2").unwrap();
        assert_eq!(
            expr,
            ExpressionNode::binary_op(
                BinaryOperator::Multiply,
                ExpressionNode::binary_op(BinaryOperator::Add, num(10.0), num(5.0)),
                num(2.0),
            )
        );
    }

    #[test]
    fn test_left_associativity() {
        let expr = parse_expression("8 - 4 - 2").unwrap();
        assert_eq!(
            expr,
            ExpressionNode::binary_op(
                BinaryOperator::Subtract,
                ExpressionNode::binary_op(BinaryOperator::Subtract, num(8.0), num(4.0)),
                num(2.0),
            )
        );
    }

    #[test]
    fn test_integer_literal_is_double() {
        let expr = parse_expression("42").unwrap();
        assert_eq!(expr.as_literal(), Some(&LiteralValue::Number(42.0)));
    }

    #[test]
    fn test_function_call_with_arguments() {
        let expr = parse_expression("substring(name, 0, 3)").unwrap();
        assert_eq!(
            expr,
            ExpressionNode::function_call(
                "substring",
                vec![ExpressionNode::identifier("name"), num(0.0), num(3.0)],
            )
        );
    }

    #[test]
    fn test_nested_function_calls() {
        let expr = parse_expression("toUpper(toLower(title))").unwrap();
        assert_eq!(
            expr,
            ExpressionNode::function_call(
                "toUpper",
                vec![ExpressionNode::function_call(
                    "toLower",
                    vec![ExpressionNode::identifier("title")],
                )],
            )
        );
    }

    #[test]
    fn test_identifier_followed_by_paren_is_always_a_call() {
        let expr = parse_expression("length(x)").unwrap();
        assert!(matches!(expr, ExpressionNode::FunctionCall { .. }));
    }

    #[test]
    fn test_ternary_right_associative() {
        let expr = parse_expression("a ? 1 : b ? 2 : 3").unwrap();
        assert_eq!(
            expr,
            ExpressionNode::ternary(
                ExpressionNode::identifier("a"),
                num(1.0),
                ExpressionNode::ternary(ExpressionNode::identifier("b"), num(2.0), num(3.0)),
            )
        );
    }

    #[test]
    fn test_ternary_binds_looser_than_logic() {
        let expr = parse_expression("age >= 18 ? 'adult' : 'minor'").unwrap();
        match expr {
            ExpressionNode::Ternary { condition, .. } => {
                assert!(matches!(
                    *condition,
                    ExpressionNode::BinaryOp {
                        op: BinaryOperator::GreaterThanOrEqual,
                        ..
                    }
                ));
            }
            _ => panic!("Expected ternary"),
        }
    }

    #[test]
    fn test_unary_negation() {
        let expr = parse_expression("-x + 1").unwrap();
        assert_eq!(
            expr,
            ExpressionNode::binary_op(
                BinaryOperator::Add,
                ExpressionNode::unary_op(UnaryOperator::Minus, ExpressionNode::identifier("x")),
                num(1.0),
            )
        );
    }

    #[test]
    fn test_double_negation() {
        let expr = parse_expression("!!flag").unwrap();
        assert_eq!(
            expr,
            ExpressionNode::unary_op(
                UnaryOperator::Not,
                ExpressionNode::unary_op(UnaryOperator::Not, ExpressionNode::identifier("flag")),
            )
        );
    }

    #[test]
    fn test_unbalanced_parens() {
        assert!(matches!(
            parse_expression("(1 + 2"),
            Err(ParseError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_missing_operand() {
        assert!(parse_expression("1 +").is_err());
        assert!(parse_expression("* 2").is_err());
    }

    #[test]
    fn test_trailing_tokens() {
        assert!(matches!(
            parse_expression("1 + 2 3"),
            Err(ParseError::TrailingTokens { .. })
        ));
    }

    #[test]
    fn test_missing_ternary_colon() {
        assert!(matches!(
            parse_expression("a ? 1"),
            Err(ParseError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_parse_twice_yields_equal_ast() {
        let a = parse_expression("min(a, b) + c * 2").unwrap();
        let b = parse_expression("min(a, b) + c * 2").unwrap();
        assert_eq!(a, b);
    }
}
