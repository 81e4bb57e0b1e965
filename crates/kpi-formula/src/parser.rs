//! Tokenizer and recursive-descent parser for substituted formulas.
//!
//! Grammar (standard precedence, left associative):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | number | '(' expr ')'
//! ```
//!
//! Numbers are ASCII digits with at most one decimal point (`.5` and `5.`
//! are accepted). No identifiers, no exponent notation, no other operators.

use crate::types::{BinaryOp, Expr, FormulaError, Token};

/// Deepest allowed nesting of parentheses and unary signs.
const MAX_DEPTH: usize = 256;

/// Splits an arithmetic string into tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c.is_ascii_digit() || c == '.' {
            let mut end = start;
            while let Some(&(i, d)) = chars.peek() {
                if d.is_ascii_digit() || d == '.' {
                    end = i + d.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Number(parse_number(&input[start..end])?));
            continue;
        }
        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(FormulaError::invalid(format!(
                    "unexpected character '{}'",
                    other
                )));
            }
        };
        tokens.push(token);
        chars.next();
    }

    Ok(tokens)
}

fn parse_number(literal: &str) -> Result<f64, FormulaError> {
    let dots = literal.matches('.').count();
    if dots > 1 || literal == "." {
        return Err(FormulaError::invalid(format!(
            "malformed number '{}'",
            literal
        )));
    }
    let value: f64 = literal
        .parse()
        .map_err(|_| FormulaError::invalid(format!("malformed number '{}'", literal)))?;
    if !value.is_finite() {
        return Err(FormulaError::invalid(format!(
            "number out of range '{}'",
            literal
        )));
    }
    Ok(value)
}

/// Parses an arithmetic string into an expression tree.
pub fn parse(input: &str) -> Result<Expr, FormulaError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(FormulaError::invalid("empty expression"));
    }
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expr()?;
    if let Some(tok) = parser.peek() {
        return Err(FormulaError::invalid(format!("unexpected '{}'", tok)));
    }
    Ok(expr)
}

fn chain(first: Expr, rest: Vec<(BinaryOp, Expr)>) -> Expr {
    if rest.is_empty() {
        first
    } else {
        Expr::Chain {
            first: Box::new(first),
            rest,
        }
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expr(&mut self) -> Result<Expr, FormulaError> {
        let first = self.term()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(chain(first, rest)),
            };
            self.bump();
            rest.push((op, self.term()?));
        }
    }

    fn term(&mut self) -> Result<Expr, FormulaError> {
        let first = self.factor()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(chain(first, rest)),
            };
            self.bump();
            rest.push((op, self.factor()?));
        }
    }

    fn factor(&mut self) -> Result<Expr, FormulaError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(FormulaError::invalid("expression nested too deeply"));
        }
        let result = self.factor_inner();
        self.depth -= 1;
        result
    }

    fn factor_inner(&mut self) -> Result<Expr, FormulaError> {
        match self.bump() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Plus) => self.factor(),
            Some(Token::Minus) => Ok(Expr::Neg(Box::new(self.factor()?))),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                match self.bump() {
                    Some(Token::RParen) => Ok(inner),
                    Some(tok) => Err(FormulaError::invalid(format!(
                        "expected ')' but found '{}'",
                        tok
                    ))),
                    None => Err(FormulaError::invalid("unbalanced parentheses")),
                }
            }
            Some(Token::RParen) => Err(FormulaError::invalid("unexpected ')'")),
            Some(tok) => Err(FormulaError::invalid(format!(
                "missing operand before '{}'",
                tok
            ))),
            None => Err(FormulaError::invalid("missing operand at end of expression")),
        }
    }
}
