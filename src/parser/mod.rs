pub mod ast;

use crate::{
    lexer::{
        token::{Token, TokenKind, TokenSlice},
        Lexer,
    },
    parser::ast::{
        AssertionError, Block, Expr, Ident, Infix, Literal, Precedence, Prefix, Program, Statement,
    },
};
use nom::{
    branch::alt,
    bytes::complete::take,
    combinator::{cut, map, opt, peek},
    error::{make_error, ErrorKind, ParseError},
    multi::many0,
    Err, IResult, InputIter,
};

type ParseResult<'a, O> = IResult<TokenSlice<'a>, O, SyntaxError<'a>>;

/// A parse failure pinned to the position it occurred at. It only lives
/// while the surrounding statement is being attempted; once the parser gives
/// up on the statement it is rendered into an `AssertionError`.
#[derive(Debug)]
struct SyntaxError<'a> {
    input: TokenSlice<'a>,
    cause: Cause,
}

#[derive(Debug)]
enum Cause {
    Expected(TokenKind),
    NoPrefixRule,
    BadIntLiteral(String),
    Other,
}

impl<'a> SyntaxError<'a> {
    fn new(input: TokenSlice<'a>, cause: Cause) -> Self {
        Self { input, cause }
    }

    fn offending_token(&self) -> Token {
        match self.input.first() {
            Some(token) => token.clone(),
            None => Token::new(TokenKind::Eof, "", 0, 0),
        }
    }

    fn into_assertion_error(self) -> AssertionError {
        let token = self.offending_token();
        let message = match self.cause {
            Cause::Expected(kind) => format!(
                "expected next token to be {}, got {} instead",
                kind, token.kind
            ),
            Cause::NoPrefixRule => format!("no prefix parse function for {} found", token.kind),
            Cause::BadIntLiteral(literal) => format!("could not parse {} as integer", literal),
            Cause::Other => format!("unexpected token {}", token.kind),
        };

        AssertionError { message, token }
    }
}

impl<'a> ParseError<TokenSlice<'a>> for SyntaxError<'a> {
    fn from_error_kind(input: TokenSlice<'a>, _kind: ErrorKind) -> Self {
        Self::new(input, Cause::Other)
    }

    fn append(_input: TokenSlice<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        // the later alternative carries the more specific diagnostic
        match other.cause {
            Cause::Other => self,
            _ => other,
        }
    }
}

pub struct Parser;

impl Parser {
    /// Lex and parse in one step.
    pub fn parse_program(input: &str) -> Program {
        let tokens = Lexer::new().lex_input(input);
        Self::parse(TokenSlice::from_tokens(&tokens))
    }

    /// Parsing is total: a malformed statement is recorded in
    /// `Program::errors` and the parser resynchronizes past the next `;`
    /// before continuing with the statements that remain.
    pub fn parse(tokens: TokenSlice<'_>) -> Program {
        let mut statements = Vec::new();
        let mut errors = Vec::new();
        let mut input = tokens;

        while !Self::at_eof(input.clone()) {
            match Self::parse_statement()(input.clone()) {
                Ok((rest, statement)) => {
                    statements.push(statement);
                    input = rest;
                }
                Err(Err::Error(e)) | Err(Err::Failure(e)) => {
                    errors.push(e.into_assertion_error());
                    input = Self::synchronize(input);
                }
                // token streams are complete by construction
                Err(Err::Incomplete(_)) => break,
            }
        }

        Program { statements, errors }
    }

    fn at_eof(input: TokenSlice<'_>) -> bool {
        matches!(input.first().map(|token| &token.kind), None | Some(TokenKind::Eof))
    }

    fn synchronize(mut input: TokenSlice<'_>) -> TokenSlice<'_> {
        loop {
            match input.first().map(|token| &token.kind) {
                None | Some(TokenKind::Eof) => return input,
                Some(TokenKind::Semicolon) => return input.skip_first(),
                Some(_) => input = input.skip_first(),
            }
        }
    }

    fn parse_statement<'a>() -> impl FnMut(TokenSlice<'a>) -> ParseResult<'a, Statement> {
        alt((
            Self::parse_let_statement,
            Self::parse_return_statement,
            Self::parse_expression_statement,
        ))
    }

    fn parse_let_statement(input: TokenSlice<'_>) -> ParseResult<'_, Statement> {
        let (i, _) = Self::tag(TokenKind::Let)(input)?;
        let (i, ident) = cut(Self::parse_ident())(i)?;
        let (i, _) = cut(Self::tag(TokenKind::Assign))(i)?;
        let (i, expr) = cut(Self::parse_expression(Precedence::Lowest))(i)?;
        let (i, _) = opt(Self::tag(TokenKind::Semicolon))(i)?;

        Ok((i, Statement::Let(ident, expr)))
    }

    fn parse_return_statement(input: TokenSlice<'_>) -> ParseResult<'_, Statement> {
        let (i, _) = Self::tag(TokenKind::Return)(input)?;
        let (i, expr) = cut(Self::parse_expression(Precedence::Lowest))(i)?;
        let (i, _) = opt(Self::tag(TokenKind::Semicolon))(i)?;

        Ok((i, Statement::Return(expr)))
    }

    fn parse_expression_statement(input: TokenSlice<'_>) -> ParseResult<'_, Statement> {
        let (i, expr) = Self::parse_expression(Precedence::Lowest)(input)?;
        let (i, _) = opt(Self::tag(TokenKind::Semicolon))(i)?;

        Ok((i, Statement::Expression(expr)))
    }

    /// The Pratt core: parse a prefix form, then keep folding infix forms
    /// into `left` while the next token binds tighter than `precedence`.
    /// The strict `<` makes equal-precedence operators left-associative.
    fn parse_expression<'a>(
        precedence: Precedence,
    ) -> impl FnMut(TokenSlice<'a>) -> ParseResult<'a, Expr> {
        move |input: TokenSlice<'_>| {
            let (mut i, mut left) = alt((
                map(Self::parse_literal(), Expr::Literal),
                map(Self::parse_ident(), Expr::Ident),
                Self::parse_prefix,
                Self::parse_grouped,
                Self::parse_if,
                Self::parse_function,
                Self::parse_array,
                Self::no_prefix_rule,
            ))(input)?;

            while !Self::peek_semicolon(i.clone()) && precedence < Self::peek_precedence(i.clone())
            {
                let (inner_i, inner_left) = Self::parse_infix(i.clone(), left.clone())?;
                left = inner_left;
                i = inner_i;
            }

            Ok((i, left))
        }
    }

    fn no_prefix_rule(input: TokenSlice<'_>) -> ParseResult<'_, Expr> {
        Err(Err::Error(SyntaxError::new(input, Cause::NoPrefixRule)))
    }

    fn parse_prefix(input: TokenSlice<'_>) -> ParseResult<'_, Expr> {
        let (i, prefix) = alt((
            map(Self::tag(TokenKind::Bang), |_| Prefix::Bang),
            map(Self::tag(TokenKind::Minus), |_| Prefix::Minus),
        ))(input)?;

        let (i, expr) = cut(Self::parse_expression(Precedence::Prefix))(i)?;

        Ok((i, Expr::Prefix(prefix, Box::new(expr))))
    }

    // Exactly one closing parenthesis; a second one is someone else's token.
    fn parse_grouped(input: TokenSlice<'_>) -> ParseResult<'_, Expr> {
        let (i, _) = Self::tag(TokenKind::LParen)(input)?;
        let (i, expr) = cut(Self::parse_expression(Precedence::Lowest))(i)?;
        let (i, _) = cut(Self::tag(TokenKind::RParen))(i)?;

        Ok((i, expr))
    }

    fn parse_if(input: TokenSlice<'_>) -> ParseResult<'_, Expr> {
        let (i, _) = Self::tag(TokenKind::If)(input)?;
        let (i, _) = cut(Self::tag(TokenKind::LParen))(i)?;
        let (i, condition) = cut(Self::parse_expression(Precedence::Lowest))(i)?;
        let (i, _) = cut(Self::tag(TokenKind::RParen))(i)?;
        let (i, consequence) = cut(Self::parse_block)(i)?;

        if !Self::peek_tag(i.clone(), TokenKind::Else) {
            return Ok((
                i,
                Expr::If {
                    condition: Box::new(condition),
                    consequence,
                    alternative: None,
                },
            ));
        }

        let (i, _) = Self::tag(TokenKind::Else)(i)?;
        let (i, alternative) = cut(Self::parse_block)(i)?;

        Ok((
            i,
            Expr::If {
                condition: Box::new(condition),
                consequence,
                alternative: Some(alternative),
            },
        ))
    }

    fn parse_function(input: TokenSlice<'_>) -> ParseResult<'_, Expr> {
        let (i, _) = Self::tag(TokenKind::Function)(input)?;
        let (i, _) = cut(Self::tag(TokenKind::LParen))(i)?;
        let (i, params) = cut(Self::parse_function_params())(i)?;
        let (i, _) = cut(Self::tag(TokenKind::RParen))(i)?;
        let (i, body) = cut(Self::parse_block)(i)?;

        Ok((i, Expr::Function { params, body }))
    }

    fn parse_block(input: TokenSlice<'_>) -> ParseResult<'_, Block> {
        let (i, _) = Self::tag(TokenKind::LBrace)(input)?;
        let (i, statements) = many0(Self::parse_statement())(i)?;
        let (i, _) = Self::tag(TokenKind::RBrace)(i)?;

        Ok((i, statements))
    }

    fn parse_function_params<'a>(
    ) -> impl FnMut(TokenSlice<'a>) -> ParseResult<'a, Vec<Ident>> {
        move |input: TokenSlice<'_>| {
            if Self::peek_tag(input.clone(), TokenKind::RParen) {
                return Ok((input, vec![]));
            }

            let (i, ident) = Self::parse_ident()(input)?;
            let (i, mut idents) = many0(Self::parse_identifier_list)(i)?;
            idents.insert(0, ident);

            Ok((i, idents))
        }
    }

    fn parse_call_args<'a>() -> impl FnMut(TokenSlice<'a>) -> ParseResult<'a, Vec<Expr>> {
        move |input: TokenSlice<'_>| {
            if Self::peek_tag(input.clone(), TokenKind::RParen) {
                return Ok((input, vec![]));
            }

            let (i, expr) = Self::parse_expression(Precedence::Lowest)(input)?;
            let (i, mut args) = many0(Self::parse_expr_list)(i)?;
            args.insert(0, expr);

            Ok((i, args))
        }
    }

    fn parse_identifier_list(input: TokenSlice<'_>) -> ParseResult<'_, Ident> {
        let (i, _) = Self::tag(TokenKind::Comma)(input)?;
        let (i, ident) = Self::parse_ident()(i)?;

        Ok((i, ident))
    }

    fn parse_expr_list(input: TokenSlice<'_>) -> ParseResult<'_, Expr> {
        let (i, _) = Self::tag(TokenKind::Comma)(input)?;
        let (i, expr) = Self::parse_expression(Precedence::Lowest)(i)?;

        Ok((i, expr))
    }

    fn parse_array(input: TokenSlice<'_>) -> ParseResult<'_, Expr> {
        let (i, _) = Self::tag(TokenKind::LBracket)(input)?;

        if Self::peek_tag(i.clone(), TokenKind::RBracket) {
            let (i, _) = Self::tag(TokenKind::RBracket)(i)?;
            return Ok((i, Expr::Array(vec![])));
        }

        let (i, expr) = cut(Self::parse_expression(Precedence::Lowest))(i)?;
        let (i, mut elements) = many0(Self::parse_expr_list)(i)?;
        elements.insert(0, expr);
        let (i, _) = cut(Self::tag(TokenKind::RBracket))(i)?;

        Ok((i, Expr::Array(elements)))
    }

    fn parse_infix(input: TokenSlice<'_>, left: Expr) -> ParseResult<'_, Expr> {
        if Self::peek_tag(input.clone(), TokenKind::LParen) {
            let (i, _) = Self::tag(TokenKind::LParen)(input)?;
            let (i, arguments) = Self::parse_call_args()(i)?;
            let (i, _) = cut(Self::tag(TokenKind::RParen))(i)?;

            Ok((
                i,
                Expr::Call {
                    function: Box::new(left),
                    arguments,
                },
            ))
        } else if Self::peek_tag(input.clone(), TokenKind::LBracket) {
            Self::parse_index(left)(input)
        } else {
            let (i, operator) = Self::parse_operator()(input.clone())?;
            let precedence = Self::peek_precedence(input);
            let (i, right) = cut(Self::parse_expression(precedence))(i)?;

            Ok((i, Expr::Infix(operator, Box::new(left), Box::new(right))))
        }
    }

    fn parse_index<'a>(left: Expr) -> impl FnMut(TokenSlice<'a>) -> ParseResult<'a, Expr> {
        move |input: TokenSlice<'_>| {
            let (i, _) = Self::tag(TokenKind::LBracket)(input)?;
            let (i, index) = cut(Self::parse_expression(Precedence::Lowest))(i)?;
            let (i, _) = cut(Self::tag(TokenKind::RBracket))(i)?;

            Ok((i, Expr::Index(Box::new(left.clone()), Box::new(index))))
        }
    }

    fn parse_operator<'a>() -> impl FnMut(TokenSlice<'a>) -> ParseResult<'a, Infix> {
        alt((
            map(Self::tag(TokenKind::Plus), |_| Infix::Plus),
            map(Self::tag(TokenKind::Minus), |_| Infix::Minus),
            map(Self::tag(TokenKind::Asterisk), |_| Infix::Multiply),
            map(Self::tag(TokenKind::Slash), |_| Infix::Divide),
            map(Self::tag(TokenKind::Eq), |_| Infix::Equal),
            map(Self::tag(TokenKind::NotEq), |_| Infix::NotEqual),
            map(Self::tag(TokenKind::GtEq), |_| Infix::GreaterThanEqual),
            map(Self::tag(TokenKind::LtEq), |_| Infix::LessThanEqual),
            map(Self::tag(TokenKind::Gt), |_| Infix::GreaterThan),
            map(Self::tag(TokenKind::Lt), |_| Infix::LessThan),
        ))
    }

    fn parse_ident<'a>() -> impl FnMut(TokenSlice<'a>) -> ParseResult<'a, Ident> {
        move |input: TokenSlice<'_>| {
            let (i, res) = take(1usize)(input.clone())?;

            match res.iter_elements().next() {
                Some(token) if token.kind == TokenKind::Ident => Ok((i, token.literal.clone())),
                Some(_) => Err(Err::Error(SyntaxError::new(
                    input,
                    Cause::Expected(TokenKind::Ident),
                ))),
                None => Err(Err::Error(make_error(input, ErrorKind::Eof))),
            }
        }
    }

    fn parse_literal<'a>() -> impl FnMut(TokenSlice<'a>) -> ParseResult<'a, Literal> {
        move |input: TokenSlice<'_>| {
            let (i, res) = take(1usize)(input.clone())?;

            match res.iter_elements().next() {
                Some(token) => match token.kind {
                    TokenKind::True => Ok((i, Literal::Bool(true))),
                    TokenKind::False => Ok((i, Literal::Bool(false))),
                    TokenKind::String => Ok((i, Literal::String(token.literal.clone()))),
                    TokenKind::Int => match token.literal.parse::<i64>() {
                        Ok(value) => Ok((i, Literal::Int(value))),
                        Err(_) => Err(Err::Failure(SyntaxError::new(
                            input,
                            Cause::BadIntLiteral(token.literal.clone()),
                        ))),
                    },
                    _ => Err(Err::Error(make_error(input, ErrorKind::Tag))),
                },
                None => Err(Err::Error(make_error(input, ErrorKind::Eof))),
            }
        }
    }

    fn tag<'a>(kind: TokenKind) -> impl Fn(TokenSlice<'a>) -> ParseResult<'a, TokenSlice<'a>> {
        move |input: TokenSlice<'_>| {
            let (i, res) = take(1usize)(input.clone())?;

            match res.iter_elements().next() {
                Some(token) if token.kind == kind => Ok((i, res)),
                Some(_) => Err(Err::Error(SyntaxError::new(
                    input,
                    Cause::Expected(kind.clone()),
                ))),
                None => Err(Err::Error(make_error(input, ErrorKind::Eof))),
            }
        }
    }

    fn peek_tag(input: TokenSlice<'_>, kind: TokenKind) -> bool {
        peek(Self::tag(kind))(input).is_ok()
    }

    fn peek_precedence(input: TokenSlice<'_>) -> Precedence {
        input
            .first()
            .map(|token| Precedence::of(&token.kind))
            .unwrap_or(Precedence::Lowest)
    }

    fn peek_semicolon(input: TokenSlice<'_>) -> bool {
        matches!(input.first(), Some(token) if token.kind == TokenKind::Semicolon)
    }
}

#[cfg(test)]
mod test {
    use crate::parser::{
        ast::{Expr, Ident, Infix, Literal, Prefix, Program, Statement},
        Parser,
    };

    #[test]
    fn let_statements() {
        struct TestData {
            input: &'static str,
            expected_ident: Ident,
            expected_expr: Expr,
        }

        let test_data = vec![
            TestData {
                input: "let x = 5;",
                expected_ident: "x".to_string(),
                expected_expr: Expr::Literal(Literal::Int(5)),
            },
            TestData {
                input: "let y = true;",
                expected_ident: "y".to_string(),
                expected_expr: Expr::Literal(Literal::Bool(true)),
            },
            TestData {
                input: r#"let greeting = "hello";"#,
                expected_ident: "greeting".to_string(),
                expected_expr: Expr::Literal(Literal::String("hello".to_string())),
            },
            TestData {
                input: "let foobar = y;",
                expected_ident: "foobar".to_string(),
                expected_expr: Expr::Ident("y".to_string()),
            },
        ];

        test_data.into_iter().for_each(|test_datum| {
            let program = parse(test_datum.input);

            assert_eq!(program.statements.len(), 1);
            assert!(matches!(program.statements[0], Statement::Let(_, _)));

            if let Statement::Let(ident, expr) = &program.statements[0] {
                assert_eq!(ident, &test_datum.expected_ident);
                assert_eq!(expr, &test_datum.expected_expr);
            }
        });
    }

    #[test]
    fn return_statements() {
        struct TestData {
            input: &'static str,
            expected_expr: Expr,
        }

        let test_data = vec![
            TestData {
                input: "return 5;",
                expected_expr: Expr::Literal(Literal::Int(5)),
            },
            TestData {
                input: "return 3 + 4;",
                expected_expr: Expr::Infix(
                    Infix::Plus,
                    Box::new(Expr::Literal(Literal::Int(3))),
                    Box::new(Expr::Literal(Literal::Int(4))),
                ),
            },
            TestData {
                input: "return add(3, 4);",
                expected_expr: Expr::Call {
                    function: Box::new(Expr::Ident("add".to_string())),
                    arguments: vec![
                        Expr::Literal(Literal::Int(3)),
                        Expr::Literal(Literal::Int(4)),
                    ],
                },
            },
        ];

        test_data.into_iter().for_each(|test_datum| {
            let program = parse(test_datum.input);

            assert_eq!(program.statements.len(), 1);
            assert!(matches!(program.statements[0], Statement::Return(_)));

            if let Statement::Return(expr) = &program.statements[0] {
                assert_eq!(expr, &test_datum.expected_expr);
            }
        });
    }

    #[test]
    fn identifier_expression() {
        let program = parse("foobar;");

        assert_eq!(program.statements.len(), 1);

        if let Statement::Expression(expr) = &program.statements[0] {
            assert_identifier(expr, "foobar");
        } else {
            panic!("expected expression statement, got {:?}", program.statements[0]);
        }
    }

    #[test]
    fn integer_literal_expression() {
        let program = parse("5;");

        assert_eq!(program.statements.len(), 1);
        assert_eq!(
            program.statements[0],
            Statement::Expression(Expr::Literal(Literal::Int(5)))
        );
    }

    #[test]
    fn string_literal_expression() {
        let program = parse(r#""hello world""#);

        assert_eq!(program.statements.len(), 1);
        assert_eq!(
            program.statements[0],
            Statement::Expression(Expr::Literal(Literal::String("hello world".to_string())))
        );
    }

    #[test]
    fn prefix_expressions() {
        struct TestData {
            input: &'static str,
            operator: Prefix,
            right: Expr,
        }

        let test_data = vec![
            TestData {
                input: "!5;",
                operator: Prefix::Bang,
                right: Expr::Literal(Literal::Int(5)),
            },
            TestData {
                input: "-15;",
                operator: Prefix::Minus,
                right: Expr::Literal(Literal::Int(15)),
            },
            TestData {
                input: "!true;",
                operator: Prefix::Bang,
                right: Expr::Literal(Literal::Bool(true)),
            },
            TestData {
                input: "!false;",
                operator: Prefix::Bang,
                right: Expr::Literal(Literal::Bool(false)),
            },
        ];

        test_data.into_iter().for_each(|test_datum| {
            let program = parse(test_datum.input);

            assert_eq!(program.statements.len(), 1);

            if let Statement::Expression(Expr::Prefix(operator, right)) = &program.statements[0] {
                assert_eq!(operator, &test_datum.operator);
                assert_eq!(right.as_ref(), &test_datum.right);
            } else {
                panic!("expected prefix expression, got {:?}", program.statements[0]);
            }
        })
    }

    #[test]
    fn infix_expressions() {
        struct TestData {
            input: &'static str,
            left: Expr,
            operator: Infix,
            right: Expr,
        }

        let five = || Expr::Literal(Literal::Int(5));

        let test_data = vec![
            TestData {
                input: "5 + 5",
                left: five(),
                operator: Infix::Plus,
                right: five(),
            },
            TestData {
                input: "5 - 5",
                left: five(),
                operator: Infix::Minus,
                right: five(),
            },
            TestData {
                input: "5 * 5",
                left: five(),
                operator: Infix::Multiply,
                right: five(),
            },
            TestData {
                input: "5 / 5",
                left: five(),
                operator: Infix::Divide,
                right: five(),
            },
            TestData {
                input: "5 > 5",
                left: five(),
                operator: Infix::GreaterThan,
                right: five(),
            },
            TestData {
                input: "5 < 5",
                left: five(),
                operator: Infix::LessThan,
                right: five(),
            },
            TestData {
                input: "5 >= 5",
                left: five(),
                operator: Infix::GreaterThanEqual,
                right: five(),
            },
            TestData {
                input: "5 <= 5",
                left: five(),
                operator: Infix::LessThanEqual,
                right: five(),
            },
            TestData {
                input: "5 == 5",
                left: five(),
                operator: Infix::Equal,
                right: five(),
            },
            TestData {
                input: "5 != 5",
                left: five(),
                operator: Infix::NotEqual,
                right: five(),
            },
            TestData {
                input: "true == true",
                left: Expr::Literal(Literal::Bool(true)),
                operator: Infix::Equal,
                right: Expr::Literal(Literal::Bool(true)),
            },
            TestData {
                input: "true != false",
                left: Expr::Literal(Literal::Bool(true)),
                operator: Infix::NotEqual,
                right: Expr::Literal(Literal::Bool(false)),
            },
        ];

        test_data.into_iter().for_each(|test_datum| {
            let program = parse(test_datum.input);

            assert_eq!(program.statements.len(), 1);

            if let Statement::Expression(expr) = &program.statements[0] {
                assert_infix_expression(
                    expr,
                    &test_datum.left,
                    test_datum.operator,
                    &test_datum.right,
                );
            }
        })
    }

    #[test]
    fn operator_precedence() {
        struct TestData {
            input: &'static str,
            ast: Expr,
        }

        let test_data = vec![
            TestData {
                input: "-a * b",
                ast: Expr::Infix(
                    Infix::Multiply,
                    Box::new(Expr::Prefix(
                        Prefix::Minus,
                        Box::new(Expr::Ident("a".to_string())),
                    )),
                    Box::new(Expr::Ident("b".to_string())),
                ),
            },
            TestData {
                input: "a + b / c",
                ast: Expr::Infix(
                    Infix::Plus,
                    Box::new(Expr::Ident("a".to_string())),
                    Box::new(Expr::Infix(
                        Infix::Divide,
                        Box::new(Expr::Ident("b".to_string())),
                        Box::new(Expr::Ident("c".to_string())),
                    )),
                ),
            },
            TestData {
                input: "5 > 4 == 3 < 4",
                ast: Expr::Infix(
                    Infix::Equal,
                    Box::new(Expr::Infix(
                        Infix::GreaterThan,
                        Box::new(Expr::Literal(Literal::Int(5))),
                        Box::new(Expr::Literal(Literal::Int(4))),
                    )),
                    Box::new(Expr::Infix(
                        Infix::LessThan,
                        Box::new(Expr::Literal(Literal::Int(3))),
                        Box::new(Expr::Literal(Literal::Int(4))),
                    )),
                ),
            },
            TestData {
                input: "(5 + 5) * 2",
                ast: Expr::Infix(
                    Infix::Multiply,
                    Box::new(Expr::Infix(
                        Infix::Plus,
                        Box::new(Expr::Literal(Literal::Int(5))),
                        Box::new(Expr::Literal(Literal::Int(5))),
                    )),
                    Box::new(Expr::Literal(Literal::Int(2))),
                ),
            },
            TestData {
                input: "-50 + 100 + -50",
                ast: Expr::Infix(
                    Infix::Plus,
                    Box::new(Expr::Infix(
                        Infix::Plus,
                        Box::new(Expr::Prefix(
                            Prefix::Minus,
                            Box::new(Expr::Literal(Literal::Int(50))),
                        )),
                        Box::new(Expr::Literal(Literal::Int(100))),
                    )),
                    Box::new(Expr::Prefix(
                        Prefix::Minus,
                        Box::new(Expr::Literal(Literal::Int(50))),
                    )),
                ),
            },
        ];

        test_data.into_iter().for_each(|test_datum| {
            let program = parse(test_datum.input);
            assert_eq!(program.statements.len(), 1);
            if let Statement::Expression(expr) = &program.statements[0] {
                assert_eq!(expr, &test_datum.ast);
            }
        });
    }

    #[test]
    fn operator_precedence_printing() {
        let test_data = vec![
            ("1 + 2 * 3", "(1 + (2 * 3))"),
            ("(1 + 2) * 3", "((1 + 2) * 3)"),
            ("10 - 3 - 2", "((10 - 3) - 2)"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4) ((-5) * 5)"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            (
                "a * [1, 2, 3, 4][b * c] * d",
                "((a * ([1, 2, 3, 4][(b * c)])) * d)",
            ),
            (
                "add(a * b[2], b[1], 2 * [1, 2][1])",
                "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
            ),
        ];

        test_data.into_iter().for_each(|(input, expected)| {
            let program = parse(input);
            assert_eq!(program.to_string(), expected);
        });
    }

    #[test]
    fn if_expression() {
        let program = parse("if (x < y) { x }");

        assert_eq!(program.statements.len(), 1);

        if let Statement::Expression(Expr::If {
            condition,
            consequence,
            alternative,
        }) = &program.statements[0]
        {
            assert_infix_expression(
                condition,
                &Expr::Ident("x".to_string()),
                Infix::LessThan,
                &Expr::Ident("y".to_string()),
            );
            assert_eq!(consequence.len(), 1);
            if let Statement::Expression(expr) = &consequence[0] {
                assert_identifier(expr, "x");
            }
            assert!(alternative.is_none());
        } else {
            panic!("expected if expression, got {:?}", program.statements[0]);
        }
    }

    #[test]
    fn if_else_expression() {
        let program = parse("if (x < y) { x } else { y }");

        assert_eq!(program.statements.len(), 1);

        if let Statement::Expression(Expr::If {
            condition,
            consequence,
            alternative,
        }) = &program.statements[0]
        {
            assert_infix_expression(
                condition,
                &Expr::Ident("x".to_string()),
                Infix::LessThan,
                &Expr::Ident("y".to_string()),
            );
            assert_eq!(consequence.len(), 1);
            if let Statement::Expression(expr) = &consequence[0] {
                assert_identifier(expr, "x");
            }
            assert!(alternative.is_some());
            if let Some(Statement::Expression(alt_expr)) =
                alternative.as_ref().and_then(|block| block.first())
            {
                assert_identifier(alt_expr, "y");
            }
        } else {
            panic!("expected if expression, got {:?}", program.statements[0]);
        }
    }

    #[test]
    fn function_literal() {
        let program = parse("fn(x, y) { x + y; }");

        assert_eq!(program.statements.len(), 1);

        if let Statement::Expression(Expr::Function { params, body }) = &program.statements[0] {
            assert_eq!(params, &vec!["x".to_string(), "y".to_string()]);

            assert_eq!(body.len(), 1);
            if let Statement::Expression(expr) = &body[0] {
                assert_infix_expression(
                    expr,
                    &Expr::Ident("x".to_string()),
                    Infix::Plus,
                    &Expr::Ident("y".to_string()),
                );
            }
        } else {
            panic!("expected function literal, got {:?}", program.statements[0]);
        }
    }

    #[test]
    fn function_parameter_parsing() {
        struct TestData {
            input: &'static str,
            params: Vec<Ident>,
        }

        let test_data = vec![
            TestData {
                input: "fn() {};",
                params: vec![],
            },
            TestData {
                input: "fn(x) {};",
                params: vec!["x".to_string()],
            },
            TestData {
                input: "fn(x, y, z) {};",
                params: vec!["x".to_string(), "y".to_string(), "z".to_string()],
            },
        ];

        test_data.into_iter().for_each(|test_datum| {
            let program = parse(test_datum.input);
            assert_eq!(program.statements.len(), 1);

            if let Statement::Expression(Expr::Function { params, .. }) = &program.statements[0] {
                assert_eq!(params, &test_datum.params);
            } else {
                panic!("expected function literal, got {:?}", program.statements[0]);
            }
        });
    }

    #[test]
    fn call_expression_parsing() {
        let program = parse("add(1, 2 * 3, 4 + 5);");

        assert_eq!(program.statements.len(), 1);

        if let Statement::Expression(Expr::Call {
            function,
            arguments,
        }) = &program.statements[0]
        {
            assert_identifier(function, "add");
            assert_eq!(arguments.len(), 3);
            assert_eq!(arguments[0], Expr::Literal(Literal::Int(1)));
            assert_infix_expression(
                &arguments[1],
                &Expr::Literal(Literal::Int(2)),
                Infix::Multiply,
                &Expr::Literal(Literal::Int(3)),
            );
            assert_infix_expression(
                &arguments[2],
                &Expr::Literal(Literal::Int(4)),
                Infix::Plus,
                &Expr::Literal(Literal::Int(5)),
            );
        } else {
            panic!("expected call expression, got {:?}", program.statements[0]);
        }
    }

    #[test]
    fn parsing_array_literals() {
        let program = parse("[1, 2 * 2, 3 + 3]");

        assert_eq!(program.statements.len(), 1);

        if let Statement::Expression(Expr::Array(elements)) = &program.statements[0] {
            assert_eq!(elements.len(), 3);
            assert_eq!(elements[0], Expr::Literal(Literal::Int(1)));
            assert_infix_expression(
                &elements[1],
                &Expr::Literal(Literal::Int(2)),
                Infix::Multiply,
                &Expr::Literal(Literal::Int(2)),
            );
            assert_infix_expression(
                &elements[2],
                &Expr::Literal(Literal::Int(3)),
                Infix::Plus,
                &Expr::Literal(Literal::Int(3)),
            );
        } else {
            panic!("expected array literal, got {:?}", program.statements[0]);
        }
    }

    #[test]
    fn parsing_empty_array_literal() {
        let program = parse("[]");

        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.statements[0], Statement::Expression(Expr::Array(vec![])));
    }

    #[test]
    fn parsing_index_expressions() {
        let program = parse("myArray[1 + 1]");

        assert_eq!(program.statements.len(), 1);

        if let Statement::Expression(Expr::Index(left, index_expr)) = &program.statements[0] {
            assert_identifier(left, "myArray");
            assert_infix_expression(
                index_expr,
                &Expr::Literal(Literal::Int(1)),
                Infix::Plus,
                &Expr::Literal(Literal::Int(1)),
            );
        } else {
            panic!("expected index expression, got {:?}", program.statements[0]);
        }
    }

    #[test]
    fn parse_errors_are_collected() {
        struct TestData {
            input: &'static str,
            expected_message: &'static str,
        }

        let test_data = vec![
            TestData {
                input: "let = 5;",
                expected_message: "expected next token to be IDENT, got = instead",
            },
            TestData {
                input: "let x 5;",
                expected_message: "expected next token to be =, got INT instead",
            },
            TestData {
                input: "let x = ;",
                expected_message: "no prefix parse function for ; found",
            },
            TestData {
                input: "(1 + 2;",
                expected_message: "expected next token to be ), got ; instead",
            },
            TestData {
                input: "(1 + 2",
                expected_message: "expected next token to be ), got EOF instead",
            },
            TestData {
                input: "if (x > 1) { x",
                expected_message: "expected next token to be }, got EOF instead",
            },
            TestData {
                input: "5 +",
                expected_message: "no prefix parse function for EOF found",
            },
            TestData {
                input: "let x = 99999999999999999999;",
                expected_message: "could not parse 99999999999999999999 as integer",
            },
        ];

        test_data.into_iter().for_each(|test_datum| {
            let program = Parser::parse_program(test_datum.input);

            assert!(
                !program.errors.is_empty(),
                "expected parse errors for {:?}",
                test_datum.input
            );
            assert_eq!(program.errors[0].message, test_datum.expected_message);
        });
    }

    #[test]
    fn extra_closing_parenthesis_is_not_swallowed() {
        let program = Parser::parse_program("(1 + 2));");

        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.errors.len(), 1);
        assert_eq!(
            program.errors[0].message,
            "no prefix parse function for ) found"
        );
    }

    #[test]
    fn parser_recovers_at_statement_boundaries() {
        let program = Parser::parse_program("let = 5; let y = 10; y;");

        assert_eq!(program.errors.len(), 1);
        assert_eq!(
            program.errors[0].message,
            "expected next token to be IDENT, got = instead"
        );

        assert_eq!(program.statements.len(), 2);
        assert!(matches!(program.statements[0], Statement::Let(_, _)));
        assert!(matches!(program.statements[1], Statement::Expression(_)));
    }

    #[test]
    fn errors_reference_the_offending_token() {
        let program = Parser::parse_program("let = 5;");

        assert_eq!(program.errors.len(), 1);
        let token = &program.errors[0].token;
        assert_eq!(token.literal, "=");
        assert_eq!(token.line, 1);
        assert_eq!(token.column, 5);
    }

    fn parse(input: &str) -> Program {
        let program = Parser::parse_program(input);
        assert!(
            program.errors.is_empty(),
            "unexpected parse errors for {:?}: {:?}",
            input,
            program.errors
        );
        program
    }

    fn assert_identifier(expr: &Expr, expected_ident: &str) {
        assert!(matches!(expr, Expr::Ident(_)), "expected identifier, got {:?}", expr);
        if let Expr::Ident(ident) = expr {
            assert_eq!(ident, expected_ident);
        }
    }

    fn assert_infix_expression(expr: &Expr, left: &Expr, op: Infix, right: &Expr) {
        assert!(
            matches!(expr, Expr::Infix(_, _, _)),
            "expected infix expression, got {:?}",
            expr
        );
        if let Expr::Infix(actual_op, actual_left, actual_right) = expr {
            assert_eq!(actual_left.as_ref(), left);
            assert_eq!(actual_op, &op);
            assert_eq!(actual_right.as_ref(), right);
        }
    }
}
