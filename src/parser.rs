use crate::ast::{Ast, Statement};
use crate::error::Error;
use crate::lexer::Lexer;
use crate::token::{Function, Op, Token, NEGATION_PRECEDENCE};

/// Tokens that can start an expression
const OPERAND: &[&str] = &["number", "identifier", "function", "'-'", "'('"];
/// Tokens that can follow an expression, at the top level
const AFTER_STATEMENT: &[&str] = &["'+'", "'-'", "'*'", "'/'", "';'", "end of input"];
/// Tokens that can follow a statement made of a single identifier
const AFTER_IDENTIFIER: &[&str] = &["'='", "'+'", "'-'", "'*'", "'/'", "';'", "end of input"];
/// Tokens that can follow an expression, inside parenthesis
const AFTER_GROUP: &[&str] = &["'+'", "'-'", "'*'", "'/'", "')'"];
/// Tokens that can follow a function argument which is not the last one
const AFTER_ARGUMENT: &[&str] = &["'+'", "'-'", "'*'", "'/'", "','"];

/// Maximal nesting of negations, parenthesis and calls, and maximal height
/// of an expression tree. Evaluating and dropping the tree recurse once per
/// level.
pub const MAX_DEPTH: usize = 256;

/// Parse a whole program, made of statements separated by `;`
pub fn parse(input: &str) -> Result<Vec<Statement>, Error> {
    Parser::new(input)?.program()
}

/// Operator precedence parser, reading tokens from the lexer one at a time.
///
/// Binary operators are grouped according to `Op::precedence` and
/// `Op::is_left_associative`, negation binds tighter than all of them.
struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Token being looked at, and its position
    current: Token,
    position: usize,
    /// The token after `current`, when it was needed to pick a rule
    peeked: Option<(Token, usize)>,
    /// Current nesting of negations, parenthesis and calls
    depth: usize,
    /// Whether the last statement was a lone identifier, which could also
    /// have been followed by '='
    lone_identifier: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, Error> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        let position = lexer.span().start;
        Ok(Parser {
            lexer,
            current,
            position,
            peeked: None,
            depth: 0,
            lone_identifier: false,
        })
    }

    fn lex(&mut self) -> Result<(Token, usize), Error> {
        let token = self.lexer.next_token()?;
        Ok((token, self.lexer.span().start))
    }

    fn advance(&mut self) -> Result<(), Error> {
        let (token, position) = match self.peeked.take() {
            Some(peeked) => peeked,
            None => self.lex()?,
        };
        self.current = token;
        self.position = position;
        Ok(())
    }

    /// Check if the token after `current` is `=`
    fn assignment_follows(&mut self) -> Result<bool, Error> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lex()?);
        }
        Ok(matches!(self.peeked, Some((Token::Assign, _))))
    }

    fn unexpected(&self, expected: &[&'static str]) -> Error {
        Error::Syntax {
            found: self.current.to_string(),
            position: self.position,
            expected: expected.to_vec(),
        }
    }

    fn too_deep(&self) -> Error {
        Error::TooDeep {
            position: self.position,
            limit: MAX_DEPTH,
        }
    }

    /// Check that a tree of `height` levels is not too deep
    fn check_height(&self, height: usize) -> Result<usize, Error> {
        if height > MAX_DEPTH {
            Err(self.too_deep())
        } else {
            Ok(height)
        }
    }

    /// Go one level deeper in the input, before parsing the operand of a
    /// negation, a group or a call
    fn enter(&mut self) -> Result<(), Error> {
        if self.depth == MAX_DEPTH {
            return Err(self.too_deep());
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn expect(&mut self, token: Token, expected: &[&'static str]) -> Result<(), Error> {
        if self.current == token {
            self.advance()
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn program(mut self) -> Result<Vec<Statement>, Error> {
        let mut statements = vec![self.statement()?];
        loop {
            match self.current {
                Token::Semicolon => {
                    self.advance()?;
                    statements.push(self.statement()?);
                }
                Token::End => return Ok(statements),
                _ if self.lone_identifier => return Err(self.unexpected(AFTER_IDENTIFIER)),
                _ => return Err(self.unexpected(AFTER_STATEMENT)),
            }
        }
    }

    fn statement(&mut self) -> Result<Statement, Error> {
        self.lone_identifier = false;
        let name = match self.current {
            Token::Identifier(ref name) => Some(name.clone()),
            _ => None,
        };
        if let Some(name) = name {
            if self.assignment_follows()? {
                // identifier, then '='
                self.advance()?;
                self.advance()?;
                let (value, _) = self.expression(0)?;
                return Ok(Statement::Assign(name, value));
            }
            let (ast, _) = self.expression(0)?;
            self.lone_identifier = matches!(ast, Ast::Variable(_));
            return Ok(Statement::Expr(ast));
        }
        let (ast, _) = self.expression(0)?;
        Ok(Statement::Expr(ast))
    }

    /// Parse an expression, only consuming the binary operators with a
    /// precedence of at least `min_precedence`. Returns the expression and
    /// the height of its tree.
    fn expression(&mut self, min_precedence: u8) -> Result<(Ast, usize), Error> {
        let (mut left, mut height) = self.operand()?;
        while let Token::Op(op) = self.current {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.advance()?;
            let next_precedence = if op.is_left_associative() {
                precedence + 1
            } else {
                precedence
            };
            let (right, right_height) = self.expression(next_precedence)?;
            height = self.check_height(height.max(right_height) + 1)?;
            left = Ast::Binary(op, Box::new(left), Box::new(right));
        }
        Ok((left, height))
    }

    fn operand(&mut self) -> Result<(Ast, usize), Error> {
        let ast = match self.current {
            Token::Number(value) => Ast::Value(value),
            Token::Identifier(ref name) => Ast::Variable(name.clone()),
            Token::Op(Op::Minus) | Token::LParen | Token::Function(_) => {
                self.enter()?;
                let nested = self.nested();
                self.leave();
                return nested;
            }
            _ => return Err(self.unexpected(OPERAND)),
        };
        self.advance()?;
        Ok((ast, 1))
    }

    /// Parse a negation, a group or a call
    fn nested(&mut self) -> Result<(Ast, usize), Error> {
        match self.current {
            Token::Op(Op::Minus) => {
                self.advance()?;
                let (operand, height) = self.expression(NEGATION_PRECEDENCE)?;
                let height = self.check_height(height + 1)?;
                Ok((Ast::Neg(Box::new(operand)), height))
            }
            Token::Function(function) => self.call(function),
            _ => {
                self.expect(Token::LParen, OPERAND)?;
                let inner = self.expression(0)?;
                self.expect(Token::RParen, AFTER_GROUP)?;
                Ok(inner)
            }
        }
    }

    fn call(&mut self, function: Function) -> Result<(Ast, usize), Error> {
        self.advance()?;
        self.expect(Token::LParen, &["'('"])?;
        let mut args = Vec::with_capacity(function.arity());
        let mut height = 0;
        for i in 0..function.arity() {
            if i > 0 {
                self.expect(Token::Comma, AFTER_ARGUMENT)?;
            }
            let (arg, arg_height) = self.expression(0)?;
            height = height.max(arg_height);
            args.push(arg);
        }
        self.expect(Token::RParen, AFTER_GROUP)?;
        let height = self.check_height(height + 1)?;
        Ok((Ast::Call(function, args), height))
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, MAX_DEPTH};
    use crate::error::Error;
    use test_case::test_case;

    fn grouping(input: &str) -> String {
        let statements = parse(input).unwrap();
        statements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    #[test_case("1 + 2 * 3", "(1 + (2 * 3))" ; "product first")]
    #[test_case("1 * 2 + 3", "((1 * 2) + 3)" ; "product first on the left")]
    #[test_case("(1 + 2) * 3", "((1 + 2) * 3)" ; "parenthesis")]
    #[test_case("1 - 2 - 3", "((1 - 2) - 3)" ; "subtraction is left associative")]
    #[test_case("8 / 4 / 2", "((8 / 4) / 2)" ; "division is left associative")]
    #[test_case("1 - 2 + 3", "((1 - 2) + 3)" ; "mixed additive")]
    #[test_case("8 / 2 * 4", "((8 / 2) * 4)" ; "mixed multiplicative")]
    #[test_case("-2 * 3", "((-2) * 3)" ; "negation binds tighter than product")]
    #[test_case("-a + b", "((-a) + b)" ; "negation binds tighter than sum")]
    #[test_case("2 * -3", "(2 * (-3))" ; "negated right operand")]
    #[test_case("2 - -3", "(2 - (-3))" ; "minus minus")]
    #[test_case("--x", "(-(-x))" ; "double negation")]
    #[test_case("-(1 + 2)", "(-(1 + 2))" ; "negated group")]
    #[test_case("((x))", "x" ; "nested parenthesis")]
    fn precedence(input: &str, expected: &str) {
        assert_eq!(grouping(input), expected);
    }

    #[test_case("log(2, x + 1)", "log(2, (x + 1))" ; "log")]
    #[test_case("log10(x) * 2", "(log10(x) * 2)" ; "log10")]
    #[test_case("log2(8)", "log2(8)" ; "log2")]
    #[test_case("-ln(x)", "(-ln(x))" ; "negated ln")]
    #[test_case("pow(2, pow(3, 2))", "pow(2, pow(3, 2))" ; "nested pow")]
    #[test_case("exp(1) / e", "(exp(1) / e)" ; "exp")]
    fn calls(input: &str, expected: &str) {
        assert_eq!(grouping(input), expected);
    }

    #[test]
    fn statements() {
        assert_eq!(grouping("1; 2"), "1; 2");
        assert_eq!(grouping("a = 2; a + 1"), "a = 2; (a + 1)");
    }

    fn syntax_error(input: &str) -> (String, usize, Vec<&'static str>) {
        match parse(input) {
            Err(Error::Syntax {
                found,
                position,
                expected,
            }) => (found, position, expected),
            other => panic!("expected a syntax error for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn unexpected_tokens() {
        let (found, position, expected) = syntax_error("1 +");
        assert_eq!(found, "end of input");
        assert_eq!(position, 3);
        assert!(expected.contains(&"number"));

        let (found, position, expected) = syntax_error("(1 + 2");
        assert_eq!(found, "end of input");
        assert_eq!(position, 6);
        assert!(expected.contains(&"')'"));

        let (found, position, _) = syntax_error("1 2");
        assert_eq!(found, "number 2");
        assert_eq!(position, 2);

        let (found, _, expected) = syntax_error("log(2)");
        assert_eq!(found, "')'");
        assert!(expected.contains(&"','"));

        let (found, _, expected) = syntax_error("ln(1, 2)");
        assert_eq!(found, "','");
        assert!(expected.contains(&"')'"));

        let (found, _, expected) = syntax_error("exp 2");
        assert_eq!(found, "number 2");
        assert_eq!(expected, ["'('"]);

        let (found, position, _) = syntax_error("a = b = 2");
        assert_eq!(found, "'='");
        assert_eq!(position, 6);

        let (found, _, _) = syntax_error("(a) = 2");
        assert_eq!(found, "'='");

        let (found, _, _) = syntax_error("2 = 3");
        assert_eq!(found, "'='");
    }

    #[test]
    fn assignment_expected_after_lone_identifier() {
        let (found, position, expected) = syntax_error("a b");
        assert_eq!(found, "identifier 'b'");
        assert_eq!(position, 2);
        assert!(expected.contains(&"'='"));

        let (_, _, expected) = syntax_error("x = 1; y 2");
        assert!(expected.contains(&"'='"));

        for input in &["(a) b", "a + b c", "a = 1 2"] {
            let (_, _, expected) = syntax_error(input);
            assert!(!expected.contains(&"'='"), "{:?}", input);
        }
    }

    fn too_deep(input: &str) -> usize {
        match parse(input) {
            Err(Error::TooDeep { position, limit }) => {
                assert_eq!(limit, MAX_DEPTH);
                position
            }
            other => panic!("expected a nesting error, got {:?}", other.map(|s| s.len())),
        }
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let negations = format!("{}1", "-".repeat(100_000));
        assert_eq!(too_deep(&negations), MAX_DEPTH);

        let groups = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert_eq!(too_deep(&groups), MAX_DEPTH);

        let calls = format!("{}1{}", "exp(".repeat(100_000), ")".repeat(100_000));
        assert!(too_deep(&calls) > 0);

        let sum = format!("1{}", " + 1".repeat(100_000));
        too_deep(&sum);

        let power_tower = format!("{}2{}", "pow(2, ".repeat(100_000), ")".repeat(100_000));
        too_deep(&power_tower);
    }

    #[test]
    fn nesting_up_to_the_limit() {
        let negations = format!("{}1", "-".repeat(MAX_DEPTH - 1));
        assert!(parse(&negations).is_ok());

        let groups = format!("{}x{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(parse(&groups).is_ok());

        let sum = format!("1{}", " + 1".repeat(MAX_DEPTH - 1));
        assert!(parse(&sum).is_ok());
        let sum = format!("1{}", " + 1".repeat(MAX_DEPTH));
        assert!(parse(&sum).is_err());

        // the depth is counted per expression, not for the whole program
        let statements = vec![format!("{}1", "-".repeat(MAX_DEPTH - 1)); 10].join("; ");
        assert!(parse(&statements).is_ok());
    }

    #[test]
    fn empty_statements() {
        assert_eq!(syntax_error("").0, "end of input");
        assert_eq!(syntax_error("   ").0, "end of input");
        assert_eq!(syntax_error("1;").0, "end of input");
        assert_eq!(syntax_error("; 1").0, "';'");
        assert_eq!(syntax_error("1;;2").0, "';'");
        assert_eq!(syntax_error("()").0, "')'");
    }

    #[test]
    fn lexical_errors_surface() {
        assert!(matches!(
            parse("1 + @"),
            Err(Error::Lexical { position: 4, .. })
        ));
        // the syntax error comes first in the input
        assert!(matches!(parse(") @"), Err(Error::Syntax { position: 0, .. })));
    }
}
