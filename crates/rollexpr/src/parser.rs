// ABOUTME: Recursive descent parser for dice expressions.
// ABOUTME: Converts the token stream into an AST rooted at Expr::Root.

use crate::ast::{Expr, Op};
use crate::error::{Error, Result};
use crate::lexer::{Lexer, Spanned, Token};
use tracing::trace;

/// Maximum nesting of parentheses, unary minus and `* x /` chains.
///
/// Parsing, rendering and evaluation all recurse once per level.
pub const MAX_DEPTH: usize = 256;

/// Parser for dice expressions.
///
/// Precedence from loosest to tightest: `,` then `+ -` then `* x /` then
/// `d` then unary `-`.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Option<Spanned>,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next();
        Self {
            lexer,
            current,
            depth: 0,
        }
    }

    /// Parse the whole input into a root expression.
    ///
    /// Illegal characters fail the parse even if the remaining tokens form
    /// a valid statement; all of them are reported together.
    pub fn parse(mut self) -> Result<Expr> {
        let result = self.statement().and_then(|expr| match self.current {
            None => Ok(expr),
            Some(_) => Err(self.unexpected("operator, ',' or end of input")),
        });

        // Drain the rest of the input so every illegal character is reported.
        self.lexer.by_ref().for_each(drop);
        let errors = self.lexer.into_errors();
        if !errors.is_empty() {
            return Err(Error::IllegalCharacters(errors));
        }

        let expr = result?;
        trace!(?expr, "parsed expression");
        Ok(Expr::root(expr))
    }

    fn advance(&mut self) {
        self.current = self.lexer.next();
    }

    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::TooDeep(MAX_DEPTH));
        }
        Ok(())
    }

    fn peek(&self) -> Option<Token> {
        self.current.map(|s| s.token)
    }

    fn check(&self, token: Token) -> bool {
        self.peek() == Some(token)
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        if self.check(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        match self.current {
            Some(Spanned { token, pos }) => Error::Expected {
                expected: expected.to_string(),
                found: token.to_string(),
                pos,
            },
            None => Error::UnexpectedEof {
                expected: expected.to_string(),
            },
        }
    }

    /// Parse a statement: one expression or a comma-separated list.
    fn statement(&mut self) -> Result<Expr> {
        let first = self.expression()?;
        if !self.check(Token::Comma) {
            return Ok(first);
        }

        let mut items = vec![first];
        while self.check(Token::Comma) {
            self.advance();
            items.push(self.expression()?);
        }

        Ok(Expr::List(items))
    }

    /// Parse an expression (handles + and -), flattening the chain into a Sum.
    fn expression(&mut self) -> Result<Expr> {
        let first = self.term()?;
        let mut rest = Vec::new();

        loop {
            let negate = match self.peek() {
                Some(Token::Plus) => false,
                Some(Token::Minus) => true,
                _ => break,
            };
            self.advance();
            let term = self.term()?;
            rest.push(if negate { Expr::neg(term) } else { term });
        }

        if rest.is_empty() {
            return Ok(first);
        }

        let mut terms = Vec::with_capacity(rest.len() + 1);
        terms.push(first);
        terms.append(&mut rest);
        Ok(Expr::Sum(terms))
    }

    /// Parse a term (handles *, x and /).
    fn term(&mut self) -> Result<Expr> {
        let mut left = self.unary()?;
        let mut chain = 0;

        loop {
            let op = match self.peek() {
                Some(Token::Times) => Op::Mul,
                Some(Token::Slash) => Op::Div,
                _ => break,
            };
            self.advance();
            // Each operator nests the chain so far one level deeper.
            self.descend()?;
            chain += 1;
            let right = self.unary()?;
            left = Expr::bin_op(op, left, right);
        }

        self.depth -= chain;
        Ok(left)
    }

    /// Parse a unary minus chain.
    fn unary(&mut self) -> Result<Expr> {
        if self.check(Token::Minus) {
            self.advance();
            self.descend()?;
            let inner = self.unary()?;
            self.depth -= 1;
            return Ok(Expr::neg(inner));
        }
        self.primary()
    }

    /// Parse a number, dice roll, or parenthesized expression.
    fn primary(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(Token::Integer(n)) => {
                self.advance();
                if !self.check(Token::D) {
                    return Ok(Expr::Number(n));
                }
                self.advance();
                let sides = self.integer("dice sides")?;
                Ok(Expr::dice(n, sides))
            }
            Some(Token::D) => {
                // "d6" is shorthand for "1d6"
                self.advance();
                let sides = self.integer("dice sides")?;
                Ok(Expr::dice(1, sides))
            }
            Some(Token::LParen) => {
                self.advance();
                self.descend()?;
                let expr = self.expression()?;
                self.expect(Token::RParen)?;
                self.depth -= 1;
                Ok(expr)
            }
            _ => Err(self.unexpected("number, dice roll, '-' or '('")),
        }
    }

    fn integer(&mut self, what: &str) -> Result<i64> {
        if let Some(Token::Integer(n)) = self.peek() {
            self.advance();
            Ok(n)
        } else {
            Err(self.unexpected(what))
        }
    }
}

/// Parse a dice expression string into a root expression.
pub fn parse(input: &str) -> Result<Expr> {
    Parser::new(input).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(input: &str) -> Expr {
        match parse(input).unwrap() {
            Expr::Root(inner) => *inner,
            other => panic!("Expected Root, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(body("42"), Expr::Number(42));
    }

    #[test]
    fn test_parse_basic_roll() {
        assert_eq!(body("2d6"), Expr::dice(2, 6));
    }

    #[test]
    fn test_parse_implicit_count() {
        assert_eq!(body("d6"), body("1d6"));
        assert_eq!(body("d6"), Expr::dice(1, 6));
    }

    #[test]
    fn test_parse_sum_is_flat() {
        assert_eq!(
            body("1+2-3+4"),
            Expr::Sum(vec![
                Expr::Number(1),
                Expr::Number(2),
                Expr::neg(Expr::Number(3)),
                Expr::Number(4),
            ])
        );
    }

    #[test]
    fn test_parse_precedence() {
        assert_eq!(
            body("1+2*3"),
            Expr::Sum(vec![
                Expr::Number(1),
                Expr::bin_op(Op::Mul, Expr::Number(2), Expr::Number(3)),
            ])
        );
    }

    #[test]
    fn test_parse_multiplicative_left_assoc() {
        assert_eq!(
            body("8/2x3"),
            Expr::bin_op(
                Op::Mul,
                Expr::bin_op(Op::Div, Expr::Number(8), Expr::Number(2)),
                Expr::Number(3),
            )
        );
    }

    #[test]
    fn test_parse_star_and_x_are_equivalent() {
        assert_eq!(body("2*3"), body("2x3"));
    }

    #[test]
    fn test_parse_dice_binds_tighter_than_multiply() {
        assert_eq!(
            body("2d6*2"),
            Expr::bin_op(Op::Mul, Expr::dice(2, 6), Expr::Number(2))
        );
    }

    #[test]
    fn test_parse_unary_minus() {
        assert_eq!(body("-2d6"), Expr::neg(Expr::dice(2, 6)));
        assert_eq!(body("--3"), Expr::neg(Expr::neg(Expr::Number(3))));
        assert_eq!(
            body("-2+3"),
            Expr::Sum(vec![Expr::neg(Expr::Number(2)), Expr::Number(3)])
        );
    }

    #[test]
    fn test_parse_parens_leave_no_wrapper() {
        assert_eq!(body("((7))"), Expr::Number(7));
        assert_eq!(
            body("(1+2)*3"),
            Expr::bin_op(
                Op::Mul,
                Expr::Sum(vec![Expr::Number(1), Expr::Number(2)]),
                Expr::Number(3),
            )
        );
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            body("2d6, 1d20"),
            Expr::List(vec![Expr::dice(2, 6), Expr::dice(1, 20)])
        );
        match body("1, 2, 3+4") {
            Expr::List(items) => assert_eq!(items.len(), 3),
            other => panic!("Expected List, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_returns_root() {
        assert!(matches!(parse("1").unwrap(), Expr::Root(_)));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse(""), Err(Error::UnexpectedEof { .. })));
        assert!(matches!(parse("   "), Err(Error::UnexpectedEof { .. })));
    }

    #[test]
    fn test_parse_unbalanced_parens() {
        assert!(matches!(parse("(1+2"), Err(Error::UnexpectedEof { .. })));
        assert!(matches!(parse("1+2)"), Err(Error::Expected { .. })));
    }

    #[test]
    fn test_parse_missing_operand() {
        assert!(matches!(parse("1+"), Err(Error::UnexpectedEof { .. })));
        assert!(matches!(parse("*2"), Err(Error::Expected { .. })));
        assert!(matches!(parse("1,"), Err(Error::UnexpectedEof { .. })));
    }

    #[test]
    fn test_parse_trailing_tokens() {
        let err = parse("1 2").unwrap_err();
        match err {
            Error::Expected { found, pos, .. } => {
                assert_eq!(found, "integer 2");
                assert_eq!(pos, 2);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_dice_operands_must_be_literals() {
        assert!(parse("(1+2)d6").is_err());
        assert!(parse("2d(3)").is_err());
        assert!(parse("2d6d4").is_err());
        assert!(parse("2d").is_err());
    }

    #[test]
    fn test_parse_list_inside_parens_fails() {
        assert!(parse("(1, 2)").is_err());
    }

    #[test]
    fn test_parse_nesting_at_limit() {
        let input = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(body(&input), Expr::Number(1));

        let input = format!("{}1", "-".repeat(MAX_DEPTH));
        assert!(parse(&input).is_ok());
    }

    #[test]
    fn test_parse_deep_parens_fail() {
        let input = format!("{}1{}", "(".repeat(2_000), ")".repeat(2_000));
        assert!(matches!(parse(&input), Err(Error::TooDeep(MAX_DEPTH))));
    }

    #[test]
    fn test_parse_deep_negation_fails() {
        let input = format!("{}1", "-".repeat(2_000));
        assert!(matches!(parse(&input), Err(Error::TooDeep(MAX_DEPTH))));
    }

    #[test]
    fn test_parse_long_multiplicative_chain_fails() {
        let input = format!("1{}", "x1".repeat(2_000));
        assert!(matches!(parse(&input), Err(Error::TooDeep(MAX_DEPTH))));
    }

    #[test]
    fn test_parse_depth_is_released_between_groups() {
        let group = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        let input = vec![group; 10].join(" + ");
        assert!(parse(&input).is_ok());
    }

    #[test]
    fn test_parse_long_flat_sum_is_not_nested() {
        let input = format!("1{}", "+1".repeat(2_000));
        match body(&input) {
            Expr::Sum(items) => assert_eq!(items.len(), 2_001),
            other => panic!("Expected Sum, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_illegal_character() {
        match parse("2+#3") {
            Err(Error::IllegalCharacters(chars)) => {
                assert_eq!(chars.len(), 1);
                assert_eq!(chars[0].ch, '#');
                assert_eq!(chars[0].pos, 2);
            }
            other => panic!("Expected lexical error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_reports_every_illegal_character() {
        match parse("1 + ( ? ! 2") {
            Err(Error::IllegalCharacters(chars)) => {
                let found: Vec<char> = chars.iter().map(|c| c.ch).collect();
                assert_eq!(found, vec!['?', '!']);
            }
            other => panic!("Expected lexical error, got {:?}", other),
        }
    }
}
