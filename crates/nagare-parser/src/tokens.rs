//! Token types produced by the [lexer](crate::lexer).

use std::fmt;

use winnow::stream::Location;

use crate::span::Span;

/// Token types for the Nagare language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'src> {
    /// A bare word. Hyphens that do not start an arrow are part of the word.
    Identifier(&'src str),

    /// Opening or closing quote of a quoted segment (`"` or `'`).
    Quote(char),
    /// The verbatim content between two quotes, whitespace included.
    Text(&'src str),

    LeftBrace,  // {
    RightBrace, // }
    Colon,      // :
    At,         // @
    LeftParen,  // (
    RightParen, // )
    Comma,      // ,
    Equals,     // =
    Dot,        // .
    Ampersand,  // &
    Arrow,      // -->
}

impl Token<'_> {
    /// Returns `true` for tokens whose text is a word, which need a separator
    /// when two of them are written next to each other.
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Identifier(_))
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(text) | Token::Text(text) => write!(f, "{text}"),
            Token::Quote(quote) => write!(f, "{quote}"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::Colon => write!(f, ":"),
            Token::At => write!(f, "@"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Equals => write!(f, "="),
            Token::Dot => write!(f, "."),
            Token::Ampersand => write!(f, "&"),
            Token::Arrow => write!(f, "-->"),
        }
    }
}

/// A token with position information for winnow integration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl<'src> From<(Token<'src>, Span)> for PositionedToken<'src> {
    fn from((token, span): (Token<'src>, Span)) -> Self {
        Self::new(token, span)
    }
}

impl fmt::Display for PositionedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)
    }
}

impl Location for PositionedToken<'_> {
    fn previous_token_end(&self) -> usize {
        self.span.start()
    }

    fn current_token_start(&self) -> usize {
        self.span.start()
    }
}

/// Writes tokens back out as text.
///
/// Quoted content is kept verbatim and adjacent words are separated by a
/// single space; every other token is written without surrounding whitespace.
///
/// ```
/// # use nagare_parser::{lexer::tokenize, tokens::render};
/// let tokens = tokenize(r#"title : "home @ ubuntu" , text: Home Page"#);
/// assert_eq!(render(&tokens), r#"title:"home @ ubuntu",text:Home Page"#);
/// ```
pub fn render(tokens: &[PositionedToken<'_>]) -> String {
    let mut text = String::new();
    let mut previous: Option<&Token<'_>> = None;
    for positioned in tokens {
        if previous.is_some_and(Token::is_word) && positioned.token.is_word() {
            text.push(' ');
        }
        text.push_str(&positioned.token.to_string());
        previous = Some(&positioned.token);
    }
    text
}
