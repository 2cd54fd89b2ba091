//! Tokenizer and recursive-descent parser for fitness expressions.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary ('^' unary)?
//! primary := number | 'x' | constant | function '(' args ')' | '(' expr ')'
//! ```
//!
//! Signs, parentheses, call arguments, exponents and every further operand of
//! a `+`/`-` or `*`/`/` chain each add one level of nesting. Input nested
//! deeper than [`MAX_DEPTH`] levels is rejected, which also bounds the depth
//! of the tree that evaluation walks.

use super::{BinaryOp, Function, Node};
use crate::error::{GeneticError, Result};

/// Deepest nesting the parser accepts.
pub(crate) const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(f64),
    Ident { name: String, qualified: bool },
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
    End,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    position: usize,
}

fn error(position: usize, message: impl Into<String>) -> GeneticError {
    GeneticError::Expression {
        position,
        message: message.into(),
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let start = i;
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            // `**` is accepted as a synonym for `^`
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                TokenKind::Caret
            }
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '^' => TokenKind::Caret,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            c if c.is_ascii_digit() || c == '.' => {
                let (value, end) = read_number(&chars, i)?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    position: start,
                });
                i = end;
                continue;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let (mut name, mut end) = read_ident(&chars, i);
                let mut qualified = false;
                if name == "Math" && chars.get(end) == Some(&'.') {
                    let next = end + 1;
                    if !chars
                        .get(next)
                        .is_some_and(|c| c.is_ascii_alphabetic() || *c == '_')
                    {
                        return Err(error(next, "expected a name after 'Math.'"));
                    }
                    (name, end) = read_ident(&chars, next);
                    qualified = true;
                }
                tokens.push(Token {
                    kind: TokenKind::Ident { name, qualified },
                    position: start,
                });
                i = end;
                continue;
            }
            other => return Err(error(start, format!("unexpected character '{}'", other))),
        };

        tokens.push(Token {
            kind,
            position: start,
        });
        i += 1;
    }

    tokens.push(Token {
        kind: TokenKind::End,
        position: chars.len(),
    });
    Ok(tokens)
}

fn read_ident(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_') {
        end += 1;
    }
    (chars[start..end].iter().collect(), end)
}

fn read_number(chars: &[char], start: usize) -> Result<(f64, usize)> {
    let mut end = start;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    if end < chars.len() && chars[end] == '.' {
        end += 1;
        while end < chars.len() && chars[end].is_ascii_digit() {
            end += 1;
        }
    }

    // An exponent only counts when digits follow, so `2e` stays a number and a name.
    if end < chars.len() && (chars[end] == 'e' || chars[end] == 'E') {
        let mut probe = end + 1;
        if probe < chars.len() && (chars[probe] == '+' || chars[probe] == '-') {
            probe += 1;
        }
        if probe < chars.len() && chars[probe].is_ascii_digit() {
            end = probe;
            while end < chars.len() && chars[end].is_ascii_digit() {
                end += 1;
            }
        }
    }

    let text: String = chars[start..end].iter().collect();
    text.parse::<f64>()
        .map(|value| (value, end))
        .map_err(|_| error(start, format!("invalid number '{}'", text)))
}

/// Parses `input` into an expression tree.
pub(crate) fn parse(input: &str) -> Result<Node> {
    let mut parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
        depth: 0,
    };
    let node = parser.parse_expr()?;
    let trailing = parser.peek();
    if trailing.kind != TokenKind::End {
        return Err(error(trailing.position, "unexpected trailing input"));
    }
    Ok(node)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // The token stream always ends with `End`, which is never consumed.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::End {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<()> {
        let token = self.advance();
        if token.kind == kind {
            Ok(())
        } else {
            Err(error(token.position, format!("expected {}", what)))
        }
    }

    fn descend(&mut self, position: usize) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(error(position, "expression nested too deeply"));
        }
        self.depth += 1;
        Ok(())
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        position: usize,
        parse: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.descend(position)?;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_expr(&mut self) -> Result<Node> {
        let depth = self.depth;
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            // Each operand pushes the chain built so far one level down.
            let token = self.advance();
            self.descend(token.position)?;
            let rhs = self.parse_term()?;
            lhs = Node::binary(op, lhs, rhs);
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Node> {
        let depth = self.depth;
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            let token = self.advance();
            self.descend(token.position)?;
            let rhs = self.parse_unary()?;
            lhs = Node::binary(op, lhs, rhs);
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Node> {
        match self.peek().kind {
            TokenKind::Minus => {
                let token = self.advance();
                let inner = self.nested(token.position, Self::parse_unary)?;
                Ok(Node::Negate(Box::new(inner)))
            }
            TokenKind::Plus => {
                let token = self.advance();
                self.nested(token.position, Self::parse_unary)
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Node> {
        let base = self.parse_primary()?;
        if self.peek().kind == TokenKind::Caret {
            let token = self.advance();
            // Right-associative; the exponent may carry its own sign: 2^-1.
            let exponent = self.nested(token.position, Self::parse_unary)?;
            return Ok(Node::binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Node> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(value) => Ok(Node::Number(value)),
            TokenKind::LParen => {
                let inner = self.nested(token.position, Self::parse_expr)?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Ident { name, qualified } => {
                if self.peek().kind == TokenKind::LParen {
                    self.advance();
                    return self.parse_call(&name, token.position);
                }
                match name.as_str() {
                    "x" if !qualified => Ok(Node::Variable),
                    "pi" | "PI" => Ok(Node::Number(std::f64::consts::PI)),
                    "e" | "E" => Ok(Node::Number(std::f64::consts::E)),
                    _ => Err(error(token.position, format!("unknown name '{}'", name))),
                }
            }
            TokenKind::End => Err(error(token.position, "unexpected end of expression")),
            _ => Err(error(token.position, "expected a number, 'x', a function or '('")),
        }
    }

    fn parse_call(&mut self, name: &str, position: usize) -> Result<Node> {
        let function = Function::lookup(name)
            .ok_or_else(|| error(position, format!("unknown function '{}'", name)))?;

        let mut args = Vec::new();
        if self.peek().kind != TokenKind::RParen {
            args.push(self.nested(position, Self::parse_expr)?);
            while self.peek().kind == TokenKind::Comma {
                self.advance();
                args.push(self.nested(position, Self::parse_expr)?);
            }
        }
        self.expect(TokenKind::RParen, "')' after function arguments")?;

        if !function.accepts(args.len()) {
            return Err(error(
                position,
                format!("'{}' does not take {} argument(s)", name, args.len()),
            ));
        }
        Ok(Node::Call { function, args })
    }
}
