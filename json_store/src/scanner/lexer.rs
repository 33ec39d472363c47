use peekmore::PeekMore;

use super::{
    constants::{
        CLOSE_BRACE, CLOSE_SQUARE_BRACKET, COLON, COMMA, DOUBLE_QUOTE, OPEN_BRACE,
        OPEN_SQUARE_BRACKET,
    },
    stream::{CharStream, PeekableExt},
};
use crate::JsonKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// An opening bracket and its byte offset.
    Open(JsonKind, usize),
    /// A closing bracket and the offset just past it.
    Close(JsonKind, usize),
    /// Byte range between the quotes of a string.
    Str(usize, usize),
    /// Byte range of an unquoted literal together with its presumed kind.
    Scalar(JsonKind, usize, usize),
    Colon,
    Comma,
    /// Input that can not start any token.
    Invalid(usize),
}

/// Structural tokens of a JSON text, produced in one forward pass.
pub struct Lexer<'a> {
    stream: CharStream<'a>,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Lexer {
            stream: text.char_indices().peekmore(),
            done: false,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let (pos, c) = self.stream.next_significant()?;
        let token = match c {
            OPEN_BRACE => Token::Open(JsonKind::Object, pos),
            OPEN_SQUARE_BRACKET => Token::Open(JsonKind::Array, pos),
            CLOSE_BRACE => Token::Close(JsonKind::Object, pos + 1),
            CLOSE_SQUARE_BRACKET => Token::Close(JsonKind::Array, pos + 1),
            COLON => Token::Colon,
            COMMA => Token::Comma,
            DOUBLE_QUOTE => match self.stream.read_quoted_span() {
                Some((start, end)) => Token::Str(start, end),
                None => Token::Invalid(pos),
            },
            c => match JsonKind::of_scalar(c) {
                Some(kind) => {
                    let end = self.stream.read_bare_span(pos, c);
                    Token::Scalar(kind, pos, end)
                }
                None => Token::Invalid(pos),
            },
        };
        if let Token::Invalid(_) = token {
            self.done = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod test {
    use super::{Lexer, Token};
    use crate::JsonKind;

    #[test]
    fn lexes_structure_and_literals() {
        let tokens: Vec<Token> = Lexer::new(r#"{"a": [1, true, null]}"#).collect();
        assert_eq!(
            vec![
                Token::Open(JsonKind::Object, 0),
                Token::Str(2, 3),
                Token::Colon,
                Token::Open(JsonKind::Array, 6),
                Token::Scalar(JsonKind::Number, 7, 8),
                Token::Comma,
                Token::Scalar(JsonKind::Boolean, 10, 14),
                Token::Comma,
                Token::Scalar(JsonKind::Null, 16, 20),
                Token::Close(JsonKind::Array, 21),
                Token::Close(JsonKind::Object, 22),
            ],
            tokens
        );
    }

    #[test]
    fn brackets_inside_strings_are_text() {
        let tokens: Vec<Token> = Lexer::new(r#"["{]"]"#).collect();
        assert_eq!(
            vec![
                Token::Open(JsonKind::Array, 0),
                Token::Str(2, 4),
                Token::Close(JsonKind::Array, 6),
            ],
            tokens
        );
    }

    #[test]
    fn stops_after_invalid_input() {
        let tokens: Vec<Token> = Lexer::new("[x, 1]").collect();
        assert_eq!(
            vec![Token::Open(JsonKind::Array, 0), Token::Invalid(1)],
            tokens
        );
    }
}
