pub mod token;

use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_while, take_while1},
    character::complete::alpha1,
    combinator::{map, peek},
    multi::many0,
    sequence::preceded,
    IResult,
};
use nom_locate::LocatedSpan;
use self::token::{Token, TokenKind};

pub type Span<'a> = LocatedSpan<&'a str>;

type LexError<'a> = nom::error::Error<Span<'a>>;

pub struct Lexer;

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    pub fn new() -> Self {
        Self
    }

    /// Lexing is total: every character lands in some token, with anything
    /// no rule covers becoming an `Illegal` token, and the stream always
    /// ends with `Eof`.
    pub fn lex_input(&self, input: &str) -> Vec<Token> {
        let symbol_parsers = alt((
            Self::symbol_lexer("==", TokenKind::Eq),
            Self::symbol_lexer("=", TokenKind::Assign),
            Self::symbol_lexer("+", TokenKind::Plus),
            Self::symbol_lexer("-", TokenKind::Minus),
            Self::symbol_lexer("!=", TokenKind::NotEq),
            Self::symbol_lexer("!", TokenKind::Bang),
            Self::symbol_lexer("*", TokenKind::Asterisk),
            Self::symbol_lexer("/", TokenKind::Slash),
            Self::symbol_lexer("<=", TokenKind::LtEq),
            Self::symbol_lexer(">=", TokenKind::GtEq),
            Self::symbol_lexer("<", TokenKind::Lt),
            Self::symbol_lexer(">", TokenKind::Gt),
            Self::symbol_lexer("(", TokenKind::LParen),
            Self::symbol_lexer(")", TokenKind::RParen),
            Self::symbol_lexer("{", TokenKind::LBrace),
            Self::symbol_lexer("}", TokenKind::RBrace),
            Self::symbol_lexer("[", TokenKind::LBracket),
            Self::symbol_lexer("]", TokenKind::RBracket),
            Self::symbol_lexer(",", TokenKind::Comma),
            Self::symbol_lexer(";", TokenKind::Semicolon),
        ));

        let dynamic_parsers = alt((
            Self::string_literal_lexer(),
            Self::number_lexer(),
            Self::ident_lexer(),
            Self::illegal_lexer(),
        ));

        let parser_result = many0(alt((symbol_parsers, dynamic_parsers)))(Span::new(input));

        // many0 over complete, always-consuming parsers cannot fail
        let (rest, mut tokens) = match parser_result {
            Ok(result) => result,
            Err(_) => (Span::new(""), Vec::new()),
        };

        let end = Self::skip_trailing_whitespace(rest);
        tokens.push(Token::new(
            TokenKind::Eof,
            "",
            end.location_line(),
            end.get_utf8_column(),
        ));

        tokens
    }

    fn symbol_lexer<'a>(
        symbol: &'a str,
        kind: TokenKind,
    ) -> impl FnMut(Span<'a>) -> IResult<Span<'a>, Token, LexError<'a>> {
        map(
            preceded(Self::whitespace, tag(symbol)),
            move |span: Span<'a>| Self::token_at(kind.clone(), &span),
        )
    }

    fn ident_lexer<'a>() -> impl FnMut(Span<'a>) -> IResult<Span<'a>, Token, LexError<'a>> {
        map(
            preceded(
                Self::whitespace,
                preceded(
                    peek(alt((alpha1, tag("_")))),
                    take_while1(|c: char| c.is_alphanumeric() || c == '_'),
                ),
            ),
            |word: Span<'a>| Self::token_at(Self::keyword_kind(word.fragment()), &word),
        )
    }

    // Keywords are whole identifiers, so `lettuce` stays an identifier.
    fn keyword_kind(word: &str) -> TokenKind {
        match word {
            "fn" => TokenKind::Function,
            "let" => TokenKind::Let,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "return" => TokenKind::Return,
            _ => TokenKind::Ident,
        }
    }

    fn number_lexer<'a>() -> impl FnMut(Span<'a>) -> IResult<Span<'a>, Token, LexError<'a>> {
        map(
            preceded(Self::whitespace, take_while1(|c: char| c.is_ascii_digit())),
            |number: Span<'a>| Self::token_at(TokenKind::Int, &number),
        )
    }

    fn string_literal_lexer<'a>() -> impl FnMut(Span<'a>) -> IResult<Span<'a>, Token, LexError<'a>>
    {
        move |input: Span<'a>| {
            let (i, _) = preceded(Self::whitespace, tag("\""))(input)?;
            let (i, literal) = take_while(|c: char| c != '"')(i)?;
            let (i, _) = tag("\"")(i)?;

            Ok((i, Self::token_at(TokenKind::String, &literal)))
        }
    }

    // Last resort: a single character no other rule accepted.
    fn illegal_lexer<'a>() -> impl FnMut(Span<'a>) -> IResult<Span<'a>, Token, LexError<'a>> {
        map(
            preceded(Self::whitespace, take(1usize)),
            |span: Span<'a>| Self::token_at(TokenKind::Illegal, &span),
        )
    }

    fn token_at(kind: TokenKind, span: &Span<'_>) -> Token {
        Token::new(
            kind,
            *span.fragment(),
            span.location_line(),
            span.get_utf8_column(),
        )
    }

    fn skip_trailing_whitespace(input: Span<'_>) -> Span<'_> {
        match Self::whitespace(input) {
            Ok((rest, _)) => rest,
            Err(_) => input,
        }
    }

    fn whitespace(i: Span<'_>) -> IResult<Span<'_>, Span<'_>, LexError<'_>> {
        let whitespace_chars = " \t\r\n";

        take_while(move |c| whitespace_chars.contains(c))(i)
    }
}
