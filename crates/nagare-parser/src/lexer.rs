//! Lexical analyzer for Nagare source text.
//!
//! The lexer converts source text into a flat stream of [`Token`]s. It splits
//! on whitespace and on the structural characters `{ } : @ ( ) , = . &`, with
//! the three-character arrow `-->` taking priority over a bare hyphen. Any
//! other character is part of an identifier.
//!
//! Quoted segments (`"..."` or `'...'`) become an opening [`Token::Quote`], a
//! [`Token::Text`] holding the content verbatim, and a closing quote. An
//! unterminated quote runs to the end of the input without a closing token.
//!
//! Lexing never fails.

use winnow::{
    Parser as _,
    combinator::{alt, not, opt, repeat},
    error::{ContextError, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{any, literal, none_of, one_of, take_till, take_while},
};

use crate::{
    span::Span,
    tokens::{PositionedToken, Token},
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<'a, O> = ModalResult<O, ContextError>;

const QUOTES: [char; 2] = ['"', '\''];

fn is_structural(c: char) -> bool {
    matches!(c, '{' | '}' | ':' | '@' | '(' | ')' | ',' | '=' | '.' | '&')
}

/// Parse the arrow operator
fn arrow<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    literal("-->").value(Token::Arrow).parse_next(input)
}

/// Parse single character structural tokens
fn structural<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    alt((
        '{'.value(Token::LeftBrace),
        '}'.value(Token::RightBrace),
        ':'.value(Token::Colon),
        '@'.value(Token::At),
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
        ','.value(Token::Comma),
        '='.value(Token::Equals),
        '.'.value(Token::Dot),
        '&'.value(Token::Ampersand),
    ))
    .parse_next(input)
}

/// Parse identifiers: runs of non-structural characters, including any
/// hyphen that does not begin `-->`
fn identifier<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    repeat(
        1..,
        alt((
            none_of(|c: char| {
                c.is_whitespace() || is_structural(c) || QUOTES.contains(&c) || c == '-'
            })
            .void(),
            ('-', not("->")).void(),
        )),
    )
    .map(|()| ())
    .take()
    .map(Token::Identifier)
    .parse_next(input)
}

/// Parse whitespace between tokens
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<'a, ()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<'a, PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        arrow,      // Must come before identifier, which accepts '-'
        structural, // Single character tokens
        identifier,
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    Ok(PositionedToken::new(token, Span::new(start_pos..end_pos)))
}

/// Parse a quoted segment into its quote, content and closing quote tokens
fn quoted_segment<'a>(input: &mut Input<'a>) -> IResult<'a, Vec<PositionedToken<'a>>> {
    let open_start = input.current_token_start();
    let quote = one_of(QUOTES).parse_next(input)?;
    let mut tokens = vec![PositionedToken::new(
        Token::Quote(quote),
        Span::new(open_start..input.current_token_start()),
    )];

    let content_start = input.current_token_start();
    let content = take_till(0.., quote).parse_next(input)?;
    if !content.is_empty() {
        tokens.push(PositionedToken::new(
            Token::Text(content),
            Span::new(content_start..input.current_token_start()),
        ));
    }

    let close_start = input.current_token_start();
    if opt(quote).parse_next(input)?.is_some() {
        tokens.push(PositionedToken::new(
            Token::Quote(quote),
            Span::new(close_start..input.current_token_start()),
        ));
    }

    Ok(tokens)
}

/// Lexer that accumulates tokens during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Tokenize the whole input.
    fn tokenize(&mut self, mut input: Input<'a>) {
        loop {
            // `take_while(0..)` cannot fail on a complete input
            let _ = whitespace(&mut input);
            if input.is_empty() {
                break;
            }

            let checkpoint = input.checkpoint();
            if let Ok(segment) = quoted_segment(&mut input) {
                self.tokens.extend(segment);
                continue;
            }
            input.reset(&checkpoint);

            match positioned_token(&mut input) {
                Ok(token) => self.tokens.push(token),
                Err(_) => {
                    input.reset(&checkpoint);
                    self.fold_unrecognized(&mut input);
                }
            }
        }
    }

    /// Fold a character no rule accepted into an identifier.
    fn fold_unrecognized(&mut self, input: &mut Input<'a>) {
        let start = input.current_token_start();
        let folded: IResult<'a, &'a str> = any.take().parse_next(input);
        if let Ok(text) = folded {
            let span = Span::new(start..input.current_token_start());
            self.tokens
                .push(PositionedToken::new(Token::Identifier(text), span));
        }
    }

    fn finish(self) -> Vec<PositionedToken<'a>> {
        self.tokens
    }
}

/// Converts source text into tokens.
///
/// Empty or whitespace-only input produces an empty vector.
///
/// # Examples
///
/// ```
/// # use nagare_parser::{lexer::tokenize, tokens::Token};
/// let tokens = tokenize("browser.e --> nginx.w");
/// let kinds: Vec<_> = tokens.iter().map(|t| t.token).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         Token::Identifier("browser"),
///         Token::Dot,
///         Token::Identifier("e"),
///         Token::Arrow,
///         Token::Identifier("nginx"),
///         Token::Dot,
///         Token::Identifier("w"),
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> Vec<PositionedToken<'_>> {
    let located_input = LocatingSlice::new(input);
    let mut lexer = Lexer::new();
    lexer.tokenize(located_input);
    lexer.finish()
}
