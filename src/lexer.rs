use crate::error::Error;
use crate::functions::KEYWORDS;
use crate::token::Token;
use log::trace;
use std::ops::Range;

#[must_use]
/// Check if `ident` is a valid variable name
///
/// A variable name starts with a letter (any Unicode letter), followed by
/// letters, decimal digits or `_`. Names starting with a function keyword are
/// not variables, the keyword is read first.
///
/// # Examples
///
/// ```
/// # use calcbot::is_identifier;
///
/// assert_eq!(is_identifier("a__45"), true);
/// assert_eq!(is_identifier("déjà_vu"), true);
/// assert_eq!(is_identifier("34zb"), false);
/// assert_eq!(is_identifier("_abc"), false);
/// assert_eq!(is_identifier("lnx"), false);
/// ```
pub fn is_identifier(ident: &str) -> bool {
    let mut lexer = Lexer::new(ident);
    match lexer.next_token() {
        Ok(Token::Identifier(ref name)) => name == ident,
        _ => false,
    }
}

/// Tokenizer for a program.
///
/// Tokens are read one at a time with [`next_token`](#method.next_token),
/// until it returns [`Token::End`](enum.Token.html). The lexer never goes
/// back: reading the same input again needs a new `Lexer`.
///
/// ```
/// # use calcbot::{Lexer, Token, Op};
/// let mut lexer = Lexer::new("x * 2");
/// assert_eq!(lexer.next_token(), Ok(Token::Identifier("x".into())));
/// assert_eq!(lexer.next_token(), Ok(Token::Op(Op::Mul)));
/// assert_eq!(lexer.next_token(), Ok(Token::Number(2.0)));
/// assert_eq!(lexer.next_token(), Ok(Token::End));
/// ```
pub struct Lexer<'a> {
    input: &'a str,
    /// Current position in `input`
    cursor: usize,
    /// Span of the last token returned
    span: Range<usize>,
    /// Set once `End` or an error was produced by the iterator
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer reading `input` from its start
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            input,
            cursor: 0,
            span: 0..0,
            done: false,
        }
    }

    /// Byte range in the input of the last token returned by `next_token`
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// The part of the input that has not been read yet
    pub fn remaining(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    /// Read the next token in the input
    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_whitespace();
        let start = self.cursor;
        let rest = self.remaining();

        let (token, length) = if let Some(c) = rest.chars().next() {
            if let Some(&(name, function)) = KEYWORDS.iter().find(|(name, _)| rest.starts_with(name)) {
                (Token::Function(function), name.len())
            } else if let Some(token) = Token::from_char(c) {
                (token, c.len_utf8())
            } else if is_identifier_start(c) {
                let length = rest
                    .char_indices()
                    .find(|&(_, c)| !is_identifier_part(c))
                    .map_or(rest.len(), |(i, _)| i);
                (Token::Identifier(rest[..length].to_owned()), length)
            } else if let Some(length) = number_length(rest) {
                let literal = &rest[..length];
                // too large literals give an infinity, not an error
                let value = literal.parse().map_err(|_| Error::Lexical {
                    position: start,
                    remaining: rest.to_owned(),
                })?;
                (Token::Number(value), length)
            } else {
                return Err(Error::Lexical {
                    position: start,
                    remaining: rest.to_owned(),
                });
            }
        } else {
            (Token::End, 0)
        };

        self.cursor += length;
        self.span = start..self.cursor;
        trace!("token {:?} at {:?}", token, self.span);
        Ok(token)
    }

    fn skip_whitespace(&mut self) {
        let rest = self.remaining();
        self.cursor += rest.len() - rest.trim_start_matches(is_whitespace).len();
    }
}

/// Tokens up to, but not including, `Token::End`. Iteration stops after the
/// first error.
impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(Token::End) => {
                self.done = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}

fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

/// Check if `c` can appear at the first character of a variable
fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic()
}

/// Check if `c` can appear inside a variable
fn is_identifier_part(c: char) -> bool {
    c == '_' || c.is_ascii_digit() || c.is_alphabetic()
}

/// Length of the number literal at the start of `text`, if there is one.
///
/// Accepts `12`, `12.`, `12.5`, `.5`, each optionally followed by an
/// exponent (`e10`, `E-3`, `e+2`). An `e` without digits after it is not
/// part of the number.
fn number_length(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let digits_end = |from: usize| {
        from + bytes[from.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let integer_end = digits_end(0);
    let mut end = integer_end;
    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_end(end + 1);
        if integer_end == 0 && fraction_end == end + 1 {
            // a lone '.'
            return None;
        }
        end = fraction_end;
    } else if integer_end == 0 {
        return None;
    }

    if let Some(b'e') | Some(b'E') = bytes.get(end) {
        let mut exponent = end + 1;
        if let Some(b'+') | Some(b'-') = bytes.get(exponent) {
            exponent += 1;
        }
        let exponent_end = digits_end(exponent);
        if exponent_end > exponent {
            end = exponent_end;
        }
    }
    Some(end)
}
