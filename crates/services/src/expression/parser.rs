use std::f64::consts::PI;

use crate::error::EvalError;
use crate::expression::token::{Func, Token};

/// Parsed form of a canonical expression.
///
/// The tree is restricted to exactly what the grammar allows: numeric
/// literals, π, the fixed unary functions, absolute value, negation and
/// the arithmetic operators. There is no way to express anything else,
/// which is the whole point of replacing generic code evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Pi,
    Unary(Func, Box<Expr>),
    Abs(Box<Expr>),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Rem(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluate the tree to a floating-point value.
    ///
    /// Plain IEEE semantics: division by zero yields an infinity, domain
    /// violations (√ of a negative, log of zero) yield NaN. The caller's
    /// formatting pass decides what becomes of those.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Expr::Num(n) => *n,
            Expr::Pi => PI,
            Expr::Unary(func, inner) => {
                let x = inner.value();
                match func {
                    Func::Sqrt => x.sqrt(),
                    Func::Cbrt => x.cbrt(),
                    Func::Log10 => x.log10(),
                    Func::Ln => x.ln(),
                    Func::Exp => x.exp(),
                }
            }
            Expr::Abs(inner) => inner.value().abs(),
            Expr::Neg(inner) => -inner.value(),
            Expr::Add(a, b) => a.value() + b.value(),
            Expr::Sub(a, b) => a.value() - b.value(),
            Expr::Mul(a, b) => a.value() * b.value(),
            Expr::Div(a, b) => a.value() / b.value(),
            Expr::Rem(a, b) => a.value() % b.value(),
            Expr::Pow(a, b) => a.value().powf(b.value()),
        }
    }
}

/// Recursive-descent parser over the token stream.
///
/// Grammar, loosest binding first:
///
/// ```text
/// expr   := term (("+" | "-") term)*
/// term   := factor (("*" | "/" | "%") factor)*
/// factor := "-" factor | power
/// power  := atom ("^" pow_arg)?          // right-associative
/// pow_arg:= "{" expr "}" | factor
/// atom   := number | "π" | func "(" expr ")" | "e^" factor
///         | "|" expr "|" | "(" expr ")"
/// ```
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse the whole token stream into a single expression.
    ///
    /// # Errors
    ///
    /// Returns `EvalError::ParseError` on any token outside the grammar or
    /// on trailing input.
    pub fn parse(mut self) -> Result<Expr, EvalError> {
        let expr = self.expr()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) => Err(EvalError::ParseError(format!(
                "trailing input at {token:?}"
            ))),
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, wanted: Token, context: &str) -> Result<(), EvalError> {
        match self.bump() {
            Some(token) if token == wanted => Ok(()),
            Some(token) => Err(EvalError::ParseError(format!(
                "expected {wanted:?} {context}, found {token:?}"
            ))),
            None => Err(EvalError::ParseError(format!(
                "expected {wanted:?} {context}, found end of input"
            ))),
        }
    }

    fn expr(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.term()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Plus => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    lhs = Expr::Add(Box::new(lhs), Box::new(rhs));
                }
                Token::Minus => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    lhs = Expr::Sub(Box::new(lhs), Box::new(rhs));
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.factor()?;
        while let Some(token) = self.peek() {
            match token {
                Token::Star => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    lhs = Expr::Mul(Box::new(lhs), Box::new(rhs));
                }
                Token::Slash => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    lhs = Expr::Div(Box::new(lhs), Box::new(rhs));
                }
                Token::Percent => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    lhs = Expr::Rem(Box::new(lhs), Box::new(rhs));
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Expr, EvalError> {
        if self.peek() == Some(Token::Minus) {
            self.pos += 1;
            let inner = self.factor()?;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, EvalError> {
        let base = self.atom()?;
        if self.peek() != Some(Token::Caret) {
            return Ok(base);
        }
        self.pos += 1;

        // The builder writes exponents in braces, `(2)^{3}`; a bare
        // factor is accepted too so `2^3` still parses.
        let exponent = if self.peek() == Some(Token::LBrace) {
            self.pos += 1;
            let inner = self.expr()?;
            self.expect(Token::RBrace, "to close exponent")?;
            inner
        } else {
            self.factor()?
        };
        Ok(Expr::Pow(Box::new(base), Box::new(exponent)))
    }

    fn atom(&mut self) -> Result<Expr, EvalError> {
        match self.bump() {
            Some(Token::Num(n)) => Ok(Expr::Num(n)),
            Some(Token::Pi) => Ok(Expr::Pi),
            Some(Token::Func(Func::Exp)) => {
                let operand = self.factor()?;
                Ok(Expr::Unary(Func::Exp, Box::new(operand)))
            }
            Some(Token::Func(func)) => {
                self.expect(Token::LPar, "after function name")?;
                let inner = self.expr()?;
                self.expect(Token::RPar, "to close function call")?;
                Ok(Expr::Unary(func, Box::new(inner)))
            }
            Some(Token::Bar) => {
                let inner = self.expr()?;
                self.expect(Token::Bar, "to close absolute value")?;
                Ok(Expr::Abs(Box::new(inner)))
            }
            Some(Token::LPar) => {
                let inner = self.expr()?;
                self.expect(Token::RPar, "to close group")?;
                Ok(inner)
            }
            Some(token) => Err(EvalError::ParseError(format!("unexpected {token:?}"))),
            None => Err(EvalError::ParseError("unexpected end of input".to_string())),
        }
    }
}
