pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer.
///
/// Spans of the returned tokens are measured in characters, not bytes, which is what error
/// reports expect. Input the lexer cannot match is returned as a [`TokenKind::Symbol`].
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();
    let mut position = 0;

    while let Some(result) = lexer.next() {
        let lexeme = lexer.slice();
        let len = lexeme.chars().count();
        tokens.push(Token {
            span: position..position + len,
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme,
        });
        position += len;
    }

    tokens.into_boxed_slice()
}
