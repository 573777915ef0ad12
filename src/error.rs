use thiserror::Error;

/// Error type for the calcbot crate
///
/// Any error ends the evaluation of the program: there is no partial result
/// and no recovery.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The input at `position` does not start with any known token
    #[error("LexicalError: unexpected input at position {position}: '{remaining}'")]
    Lexical {
        /// Byte offset of the offending input
        position: usize,
        /// The input that could not be read, from `position` to the end
        remaining: String,
    },
    /// The parser found a token that no grammar rule accepts here
    #[error("SyntaxError: unexpected {found} at position {position}, expecting {}", .expected.join(" or "))]
    Syntax {
        /// Description of the unexpected token
        found: String,
        /// Byte offset of the unexpected token
        position: usize,
        /// Descriptions of the tokens that would have been accepted
        expected: Vec<&'static str>,
    },
    /// Negations, parenthesis, calls or operator chains are nested deeper
    /// than `limit`
    #[error("SyntaxError: expression nested too deeply at position {position}, the limit is {limit}")]
    TooDeep {
        /// Byte offset of the token going over the limit
        position: usize,
        /// Maximal nesting depth of an expression
        limit: usize,
    },
}

impl Error {
    /// Byte offset in the program text where the error was found
    pub fn position(&self) -> usize {
        match *self {
            Self::Lexical { position, .. }
            | Self::Syntax { position, .. }
            | Self::TooDeep { position, .. } => position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn messages() {
        let error = Error::Lexical {
            position: 4,
            remaining: "@ 2".into(),
        };
        assert_eq!(
            error.to_string(),
            "LexicalError: unexpected input at position 4: '@ 2'"
        );
        assert_eq!(error.position(), 4);

        let error = Error::Syntax {
            found: "')'".into(),
            position: 2,
            expected: vec!["a number", "'('"],
        };
        assert_eq!(
            error.to_string(),
            "SyntaxError: unexpected ')' at position 2, expecting a number or '('"
        );

        let error = Error::TooDeep {
            position: 7,
            limit: 512,
        };
        assert_eq!(
            error.to_string(),
            "SyntaxError: expression nested too deeply at position 7, the limit is 512"
        );
        assert_eq!(error.position(), 7);
    }
}
