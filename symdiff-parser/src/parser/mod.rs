//! The operator-precedence parser.
//!
//! The parser scans the tokens of the source left to right, keeping three stacks: the operands
//! parsed so far, the pending operators and opening parentheses, and the pending function calls.
//! When an operator is read, every pending operator that binds more tightly is applied first,
//! which pops its two operands and pushes the resulting node. A closing parenthesis applies every
//! pending operator back to the matching opening parenthesis, and if that parenthesis opened a
//! function call, applies the function to the operand inside.
//!
//! `+` and `-` bind loosest, then `*` and `/`, then `^`. All operators are left-associative,
//! except `^`, which is right-associative: `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`.
//!
//! The tree is built exactly as written; no simplification is done while parsing.

pub mod error;

use error::{InvalidCharacter, Malformation, MalformedExpression};
use log::trace;
use std::ops::Range;
use symdiff_error::Error;
use symdiff_expr::{Associativity, BinOpKind, Expr, FuncKind, Scalar};
use crate::tokenizer::{tokenize_complete, Token, TokenKind};

/// Parses the source into an expression tree in the domain of `T`.
pub fn parse<T: Scalar>(source: &str) -> Result<Expr<T>, Error> {
    Parser::new(source).parse()
}

/// A parser for a single source string.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens of the source.
    tokens: Box<[Token<'source>]>,

    /// The length of the source, in characters.
    len: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            len: source.chars().count(),
        }
    }

    /// Returns the tokens of the source.
    pub fn tokens(&self) -> &[Token<'source>] {
        &self.tokens
    }

    /// Parses the source into an expression tree in the domain of `T`.
    pub fn parse<T: Scalar>(&self) -> Result<Expr<T>, Error> {
        // an invalid character is reported even if the expression is malformed before it
        if let Some(token) = self.tokens.iter().find(|token| token.kind == TokenKind::Symbol) {
            return Err(invalid_character(token));
        }

        let mut state = State::<T>::default();

        for token in self.tokens.iter().filter(|token| !token.is_whitespace()) {
            trace!("token {:?} `{}` at {:?}", token.kind, token.lexeme, token.span);
            state.next_token(token)?;
        }

        state.finish(self.len)
    }
}

/// The error for a character that cannot appear in an expression.
fn invalid_character(token: &Token) -> Error {
    let character = token.lexeme.chars().next().unwrap_or(' ');
    Error::new(vec![token.span.clone()], InvalidCharacter {
        character,
        position: token.span.start,
    })
}

/// An operand, and the region of the source it was parsed from.
#[derive(Debug)]
struct Operand<T> {
    expr: Expr<T>,
    span: Range<usize>,
}

/// An entry of the operator stack.
#[derive(Debug, Clone)]
enum Pending {
    /// A binary operator.
    Op {
        kind: BinOpKind,
        span: Range<usize>,
    },

    /// An opening parenthesis. If `call` is true, the parenthesis encloses the argument of the
    /// function on top of the function stack.
    Paren {
        span: Range<usize>,
        call: bool,
    },
}

/// A function name waiting for its argument.
#[derive(Debug)]
struct PendingCall {
    func: FuncKind,
    span: Range<usize>,
}

/// The stacks of the parser.
#[derive(Debug)]
struct State<T> {
    values: Vec<Operand<T>>,
    operators: Vec<Pending>,
    functions: Vec<PendingCall>,

    /// If true, the next token must start an operand. Otherwise, it must be an operator or a
    /// closing parenthesis.
    expect_operand: bool,

    /// If true, a function name was just read, and the next token must be `(`.
    awaiting_call_paren: bool,

    /// The number of tokens read so far.
    read: usize,
}

impl<T> Default for State<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            operators: Vec::new(),
            functions: Vec::new(),
            expect_operand: true,
            awaiting_call_paren: false,
            read: 0,
        }
    }
}

/// Creates a [`MalformedExpression`] error pointing at the given span.
fn malformed(span: Range<usize>, reason: Malformation) -> Error {
    Error::new(vec![span], MalformedExpression { reason })
}

impl<T: Scalar> State<T> {
    fn next_token(&mut self, token: &Token) -> Result<(), Error> {
        self.read += 1;

        if self.awaiting_call_paren && token.kind != TokenKind::OpenParen {
            return Err(self.missing_argument());
        }

        match token.kind {
            TokenKind::Number => {
                let value = T::parse_literal(token.lexeme)
                    .ok_or_else(|| malformed(token.span.clone(), Malformation::InvalidNumber))?;
                self.push_operand(Expr::Constant(value), token.span.clone())
            },
            TokenKind::Imaginary => {
                let coefficient = &token.lexeme[..token.lexeme.len() - 1];
                let value = T::parse_imaginary(coefficient).ok_or_else(|| {
                    let reason = if T::imaginary_unit().is_some() {
                        Malformation::InvalidNumber
                    } else {
                        Malformation::ImaginaryInRealDomain
                    };
                    malformed(token.span.clone(), reason)
                })?;
                self.push_operand(Expr::Constant(value), token.span.clone())
            },
            TokenKind::Name => match token.lexeme.parse::<FuncKind>() {
                Ok(func) => {
                    self.require_operand(token)?;
                    self.functions.push(PendingCall { func, span: token.span.clone() });
                    self.awaiting_call_paren = true;
                    Ok(())
                },
                Err(_) => self.push_operand(Expr::var(token.lexeme), token.span.clone()),
            },
            TokenKind::OpenParen => {
                self.require_operand(token)?;
                self.operators.push(Pending::Paren {
                    span: token.span.clone(),
                    call: self.awaiting_call_paren,
                });
                self.awaiting_call_paren = false;
                Ok(())
            },
            TokenKind::CloseParen => self.close_paren(token),
            TokenKind::Add => self.push_operator(BinOpKind::Add, token),
            TokenKind::Sub => self.push_operator(BinOpKind::Sub, token),
            TokenKind::Mul => self.push_operator(BinOpKind::Mul, token),
            TokenKind::Div => self.push_operator(BinOpKind::Div, token),
            TokenKind::Exp => self.push_operator(BinOpKind::Pow, token),
            TokenKind::Symbol | TokenKind::Whitespace => Err(invalid_character(token)),
        }
    }

    /// Returns an error if an operand cannot start at this token.
    fn require_operand(&self, token: &Token) -> Result<(), Error> {
        if self.expect_operand {
            Ok(())
        } else {
            Err(malformed(token.span.clone(), Malformation::MissingOperator))
        }
    }

    fn push_operand(&mut self, expr: Expr<T>, span: Range<usize>) -> Result<(), Error> {
        if !self.expect_operand {
            return Err(malformed(span, Malformation::MissingOperator));
        }

        self.values.push(Operand { expr, span });
        self.expect_operand = false;
        Ok(())
    }

    fn push_operator(&mut self, kind: BinOpKind, token: &Token) -> Result<(), Error> {
        if self.expect_operand {
            return Err(malformed(token.span.clone(), Malformation::MissingOperand));
        }

        // apply the pending operators that bind at least as tightly as this one
        while let Some(Pending::Op { kind: top, span }) = self.operators.last().cloned() {
            let pops = top.precedence() > kind.precedence()
                || (top.precedence() == kind.precedence()
                    && kind.associativity() == Associativity::Left);
            if !pops {
                break;
            }
            self.operators.pop();
            self.apply_operator(top, span)?;
        }

        self.operators.push(Pending::Op { kind, span: token.span.clone() });
        self.expect_operand = true;
        Ok(())
    }

    fn close_paren(&mut self, token: &Token) -> Result<(), Error> {
        if self.expect_operand {
            return Err(match self.operators.last() {
                Some(Pending::Paren { call: true, .. }) => self.missing_argument(),
                Some(Pending::Paren { span, .. }) => {
                    malformed(span.start..token.span.end, Malformation::EmptyParenthesis)
                },
                Some(Pending::Op { span, .. }) => malformed(span.clone(), Malformation::MissingOperand),
                None => malformed(token.span.clone(), Malformation::UnmatchedParenthesis),
            });
        }

        let (span, call) = loop {
            match self.operators.pop() {
                Some(Pending::Op { kind, span }) => self.apply_operator(kind, span)?,
                Some(Pending::Paren { span, call }) => break (span, call),
                None => return Err(malformed(token.span.clone(), Malformation::UnmatchedParenthesis)),
            }
        };
        let Some(operand) = self.values.pop() else {
            return Err(malformed(span.start..token.span.end, Malformation::EmptyParenthesis));
        };

        let operand = if call {
            let Some(PendingCall { func, span: func_span }) = self.functions.pop() else {
                return Err(malformed(span, Malformation::MissingFunctionArgument));
            };
            trace!("apply `{}` to `{}`", func, operand.expr);
            Operand {
                expr: Expr::call(func, operand.expr),
                span: func_span.start..token.span.end,
            }
        } else {
            Operand {
                expr: operand.expr,
                span: span.start..token.span.end,
            }
        };

        self.values.push(operand);
        Ok(())
    }

    /// Pops the two operands of the operator, and pushes the resulting node.
    fn apply_operator(&mut self, kind: BinOpKind, span: Range<usize>) -> Result<(), Error> {
        let (Some(rhs), Some(lhs)) = (self.values.pop(), self.values.pop()) else {
            return Err(malformed(span, Malformation::MissingOperand));
        };

        trace!("apply `{}` to `{}` and `{}`", kind, lhs.expr, rhs.expr);
        self.values.push(Operand {
            expr: Expr::binary(kind, lhs.expr, rhs.expr),
            span: lhs.span.start..rhs.span.end,
        });
        Ok(())
    }

    /// The error for a function name that is not followed by its argument.
    fn missing_argument(&self) -> Error {
        let span = self.functions.last().map_or(0..0, |call| call.span.clone());
        malformed(span, Malformation::MissingFunctionArgument)
    }

    /// Applies the remaining operators and returns the single remaining operand.
    fn finish(mut self, len: usize) -> Result<Expr<T>, Error> {
        if self.awaiting_call_paren {
            return Err(self.missing_argument());
        }

        if self.read == 0 {
            return Err(malformed(0..len, Malformation::Empty));
        }

        if self.expect_operand {
            return Err(match self.operators.last() {
                Some(Pending::Op { span, .. }) => malformed(span.clone(), Malformation::MissingOperand),
                Some(Pending::Paren { call: true, .. }) => self.missing_argument(),
                Some(Pending::Paren { span, .. }) => malformed(span.clone(), Malformation::UnclosedParenthesis),
                None => malformed(0..len, Malformation::Empty),
            });
        }

        while let Some(top) = self.operators.pop() {
            match top {
                Pending::Op { kind, span } => self.apply_operator(kind, span)?,
                Pending::Paren { span, .. } => {
                    return Err(malformed(span, Malformation::UnclosedParenthesis));
                },
            }
        }

        match (self.values.pop(), self.values.is_empty(), self.functions.is_empty()) {
            (Some(operand), true, true) => Ok(operand.expr),
            _ => Err(malformed(0..len, Malformation::MissingOperator)),
        }
    }
}
