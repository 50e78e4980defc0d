//! Parser for Nagare source tokens.
//!
//! This module turns the token stream from the [`lexer`](super::lexer) into the
//! tree defined in [`ast`](super::ast). The grammar is line-insensitive:
//!
//! ```text
//! document    := statement*
//! statement   := state_decl | connection | declaration
//! state_decl  := '@' IDENT '(' tokens ')'            (top level only)
//! connection  := IDENT ('.' IDENT)? '-->' IDENT ('.' IDENT)? ('(' tokens ')')?
//! declaration := IDENT (':' IDENT)? ('@' IDENT)? ('{' statement* '}')?
//! ```
//!
//! Containers may only appear at the top level. Connections written inside a
//! container body are hoisted to the root. Every syntax error is fatal and is
//! reported as a single coded [`Diagnostic`].

use log::trace;
use winnow::{
    Parser as _,
    error::{AddContext, ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use nagare_core::anchor::Anchor;

use crate::{
    ast::{Connection, MAX_DEPTH, Node, NodeKind, PropertyBlock},
    error::{Diagnostic, ErrorCode},
    span::Span,
    tokens::{self, PositionedToken, Token},
};

/// A syntax error raised at a known location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fatal {
    code: ErrorCode,
    message: String,
    span: Span,
    label: &'static str,
    related: Option<(Span, &'static str)>,
    help: Option<&'static str>,
}

impl Fatal {
    fn new(code: ErrorCode, message: impl Into<String>, span: Span, label: &'static str) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            label,
            related: None,
            help: None,
        }
    }

    fn with_related(mut self, span: Span, label: &'static str) -> Self {
        self.related = Some((span, label));
        self
    }

    fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    fn into_diagnostic(self) -> Diagnostic {
        let mut diagnostic = Diagnostic::error(self.message)
            .with_code(self.code)
            .with_label(self.span, self.label);
        if let Some((span, label)) = self.related {
            diagnostic = diagnostic.with_secondary_label(span, label);
        }
        if let Some(help) = self.help {
            diagnostic = diagnostic.with_help(help);
        }
        diagnostic
    }
}

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what is currently being parsed
    Label(&'static str),
    /// A fully described syntax error
    Fatal(Fatal),
}

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

/// Build a Cut error carrying `fatal`.
fn cut<'src>(input: &Input<'src>, fatal: Fatal) -> ErrMode<ContextError<Context>> {
    ErrMode::Cut(ContextError::new().add_context(
        input,
        &input.checkpoint(),
        Context::Fatal(fatal),
    ))
}

/// Look at the `n`th upcoming token without consuming anything.
fn peek_nth<'src>(input: &mut Input<'src>, n: usize) -> Option<&'src PositionedToken<'src>> {
    let checkpoint = input.checkpoint();
    let mut token = None;
    for _ in 0..=n {
        token = input.next_token();
        if token.is_none() {
            break;
        }
    }
    input.reset(&checkpoint);
    token
}

fn peek<'src>(input: &mut Input<'src>) -> Option<&'src PositionedToken<'src>> {
    peek_nth(input, 0)
}

fn peek_is(input: &mut Input<'_>, expected: Token<'_>) -> bool {
    peek(input).is_some_and(|t| t.token == expected)
}

/// Consume the next token when it equals `expected`.
fn eat(input: &mut Input<'_>, expected: Token<'_>) -> Option<Span> {
    let checkpoint = input.checkpoint();
    match input.next_token() {
        Some(t) if t.token == expected => Some(t.span),
        _ => {
            input.reset(&checkpoint);
            None
        }
    }
}

/// Parse an identifier token
fn identifier<'src>(input: &mut Input<'src>) -> IResult<(&'src str, Span)> {
    any.verify_map(|t: &PositionedToken<'src>| match t.token {
        Token::Identifier(name) => Some((name, t.span)),
        _ => None,
    })
    .context(Context::Label("identifier"))
    .parse_next(input)
}

/// Returns `true` when the input starts with `@ IDENT (`.
fn at_state_declaration(input: &mut Input<'_>) -> bool {
    matches!(
        (peek_nth(input, 0), peek_nth(input, 1), peek_nth(input, 2)),
        (Some(at), Some(name), Some(paren))
            if at.token == Token::At
                && name.token.is_word()
                && paren.token == Token::LeftParen
    )
}

/// Builds the parse tree.
///
/// Statement parsers are methods so that every node can be matched against
/// the state declarations seen so far as soon as it is created.
struct TreeParser<'src> {
    tokens: &'src [PositionedToken<'src>],
    root: Node,
}

impl<'src> TreeParser<'src> {
    fn new(tokens: &'src [PositionedToken<'src>]) -> Self {
        Self {
            tokens,
            root: Node::root(),
        }
    }

    /// Span used for errors at end of input.
    fn eof_span(&self) -> Span {
        self.tokens
            .last()
            .map(|t| Span::new(t.span.end()..t.span.end()))
            .unwrap_or_default()
    }

    fn unexpected(
        &self,
        input: &Input<'src>,
        token: &PositionedToken<'src>,
    ) -> ErrMode<ContextError<Context>> {
        cut(
            input,
            Fatal::new(
                ErrorCode::E100,
                format!("unexpected token `{token}`"),
                token.span,
                "unexpected token",
            )
            .with_help("statements start with a component name, a connection or `@state(...)`"),
        )
    }

    fn unexpected_eof(
        &self,
        input: &Input<'src>,
        expected: &str,
    ) -> ErrMode<ContextError<Context>> {
        cut(
            input,
            Fatal::new(
                ErrorCode::E101,
                format!("unexpected end of input, expected {expected}"),
                self.eof_span(),
                "input ends here",
            ),
        )
    }

    /// Parse the whole document.
    fn document(&mut self, input: &mut Input<'src>) -> IResult<()> {
        while let Some(next) = peek(input) {
            match next.token {
                Token::At => {
                    let block = self.state_declaration(input)?;
                    self.register_state(block);
                }
                Token::RightBrace => {
                    return Err(cut(
                        input,
                        Fatal::new(
                            ErrorCode::E103,
                            "unmatched closing brace",
                            next.span,
                            "no container is open here",
                        ),
                    ));
                }
                Token::Identifier(_) => {
                    if let Some(connection) = self.connection(input)? {
                        self.root.connections.push(connection);
                    } else {
                        let node = self.declaration(input, 0, None)?;
                        self.root.children.push(node);
                    }
                }
                _ => return Err(self.unexpected(input, next)),
            }
        }
        Ok(())
    }

    /// Parse a container body after its opening brace, through the closing brace.
    fn container_body(
        &mut self,
        input: &mut Input<'src>,
        depth: usize,
        open: Span,
    ) -> IResult<Vec<Node>> {
        let mut children = Vec::new();
        loop {
            let Some(next) = peek(input) else {
                return Err(cut(
                    input,
                    Fatal::new(
                        ErrorCode::E104,
                        "expected closing brace",
                        self.eof_span(),
                        "input ends here",
                    )
                    .with_related(open, "container opened here")
                    .with_help("add `}` to close the container"),
                ));
            };

            match next.token {
                Token::RightBrace => {
                    input.next_token();
                    return Ok(children);
                }
                Token::At if at_state_declaration(input) => {
                    return Err(cut(
                        input,
                        Fatal::new(
                            ErrorCode::E106,
                            "state declarations are only allowed at the top level",
                            next.span,
                            "inside a container body",
                        )
                        .with_related(open, "container opened here")
                        .with_help("move the `@name(...)` declaration outside the braces"),
                    ));
                }
                Token::Identifier(_) => {
                    if let Some(connection) = self.connection(input)? {
                        self.root.connections.push(connection);
                    } else {
                        children.push(self.declaration(input, depth, Some(open))?);
                    }
                }
                _ => return Err(self.unexpected(input, next)),
            }
        }
    }

    /// Parse `IDENT (':' IDENT)? ('@' IDENT)? ('{' ... '}')?`.
    fn declaration(
        &mut self,
        input: &mut Input<'src>,
        depth: usize,
        parent: Option<Span>,
    ) -> IResult<Node> {
        let (name, name_span) = identifier(input)?;
        let mut node = Node::component(name, name_span, depth);

        if let Some(colon) = eat(input, Token::Colon) {
            match identifier(input) {
                Ok((type_name, span)) => {
                    node.type_name = Some(type_name.to_string());
                    node.span = node.span.union(span);
                }
                Err(_) => {
                    let span = peek(input).map_or(colon, |t| t.span);
                    return Err(cut(
                        input,
                        Fatal::new(
                            ErrorCode::E107,
                            format!("expected a component type after `{name}:`"),
                            span,
                            "expected a type name",
                        ),
                    ));
                }
            }
        }

        if peek_is(input, Token::At) && !at_state_declaration(input) {
            let at = eat(input, Token::At).unwrap_or(name_span);
            match identifier(input) {
                Ok((state, span)) => {
                    node.state_name = Some(state.to_string());
                    node.span = node.span.union(span);
                }
                Err(_) => {
                    let span = peek(input).map_or(at, |t| t.span);
                    return Err(cut(
                        input,
                        Fatal::new(
                            ErrorCode::E108,
                            format!("expected a state name after `{name}@`"),
                            span,
                            "expected a state name",
                        ),
                    ));
                }
            }
        }

        if let Some(brace) = peek(input).filter(|t| t.token == Token::LeftBrace) {
            if depth >= MAX_DEPTH {
                let mut fatal = Fatal::new(
                    ErrorCode::E102,
                    format!("nesting depth exceeded maximum of {MAX_DEPTH}"),
                    brace.span,
                    "nested container body",
                )
                .with_help("containers can only be declared at the top level");
                if let Some(parent) = parent {
                    fatal = fatal.with_related(parent, "inside this container");
                }
                return Err(cut(input, fatal));
            }
            input.next_token();
            node.kind = NodeKind::Container;
            node.children = self.container_body(input, depth + 1, brace.span)?;
        }

        for block in self.root.globals.values() {
            node.associate(block);
        }
        trace!(id = name, depth = depth; "Parsed declaration");
        Ok(node)
    }

    /// Try to parse a connection statement.
    ///
    /// Returns `Ok(None)` with the input untouched when the tokens ahead are
    /// not a connection, so the caller can parse a declaration instead. Once
    /// the arrow is seen the connection is committed and errors are fatal.
    fn connection(&mut self, input: &mut Input<'src>) -> IResult<Option<Connection>> {
        let checkpoint = input.checkpoint();
        let (from, from_span) = identifier(input)?;

        let from_anchor = if let Some(dot) = eat(input, Token::Dot) {
            let anchor = identifier(input).ok();
            if !peek_is(input, Token::Arrow) {
                input.reset(&checkpoint);
                return Ok(None);
            }
            match anchor {
                Some((anchor, _)) => anchor,
                None => return Err(self.missing_anchor(input, dot)),
            }
        } else if peek_is(input, Token::Arrow) {
            ""
        } else {
            input.reset(&checkpoint);
            return Ok(None);
        };

        let arrow = eat(input, Token::Arrow).unwrap_or(from_span);
        let (to, to_span) = match identifier(input) {
            Ok(target) => target,
            Err(_) => {
                let span = peek(input).map_or(arrow, |t| t.span);
                return Err(cut(
                    input,
                    Fatal::new(
                        ErrorCode::E109,
                        "expected a target component after `-->`",
                        span,
                        "expected an identifier",
                    ),
                ));
            }
        };

        let mut span = from_span.union(to_span);
        let to_anchor = match eat(input, Token::Dot) {
            Some(dot) => match identifier(input) {
                Ok((anchor, anchor_span)) => {
                    span = span.union(anchor_span);
                    anchor
                }
                Err(_) => return Err(self.missing_anchor(input, dot)),
            },
            None => "",
        };

        let style = if peek_is(input, Token::LeftParen) {
            let (raw, block_span) = self.paren_block(input)?;
            span = span.union(block_span);
            raw
        } else {
            String::new()
        };

        trace!(from = from, to = to; "Parsed connection");
        Ok(Some(Connection {
            from_id: from.to_string(),
            from_anchor: Anchor::parse(from_anchor),
            to_id: to.to_string(),
            to_anchor: Anchor::parse(to_anchor),
            style,
            span,
        }))
    }

    fn missing_anchor(
        &self,
        input: &mut Input<'src>,
        dot: Span,
    ) -> ErrMode<ContextError<Context>> {
        let span = peek(input).map_or(dot, |t| t.span);
        cut(
            input,
            Fatal::new(
                ErrorCode::E109,
                "expected an anchor after `.`",
                span,
                "expected an anchor such as `n`, `e` or `sw`",
            ),
        )
    }

    /// Parse `'@' IDENT '(' tokens ')'`.
    fn state_declaration(&mut self, input: &mut Input<'src>) -> IResult<PropertyBlock> {
        let at = eat(input, Token::At).unwrap_or_default();
        let name = match identifier(input) {
            Ok((name, _)) => name,
            Err(_) => {
                return Err(match peek(input) {
                    Some(next) => cut(
                        input,
                        Fatal::new(
                            ErrorCode::E108,
                            "expected a state name after `@`",
                            next.span,
                            "expected a state name",
                        ),
                    ),
                    None => self.unexpected_eof(input, "a state name"),
                });
            }
        };

        match peek(input) {
            Some(next) if next.token == Token::LeftParen => {}
            Some(next) => {
                return Err(cut(
                    input,
                    Fatal::new(
                        ErrorCode::E100,
                        format!("expected `(` after `@{name}`"),
                        next.span,
                        "expected `(`",
                    ),
                ));
            }
            None => return Err(self.unexpected_eof(input, "`(`")),
        }

        let (raw, block_span) = self.paren_block(input)?;
        trace!(state = name; "Parsed state declaration");
        Ok(PropertyBlock::new(name, raw, at.union(block_span)))
    }

    /// Collect the tokens between balanced parentheses and render them back
    /// to text. The outer parentheses are not part of the returned text.
    fn paren_block(&mut self, input: &mut Input<'src>) -> IResult<(String, Span)> {
        let open = match eat(input, Token::LeftParen) {
            Some(span) => span,
            None => {
                return Err(match peek(input) {
                    Some(next) => self.unexpected(input, next),
                    None => self.unexpected_eof(input, "`(`"),
                });
            }
        };

        let mut inner = Vec::new();
        let mut depth = 1usize;
        loop {
            let Some(token) = input.next_token() else {
                return Err(cut(
                    input,
                    Fatal::new(
                        ErrorCode::E105,
                        "expected closing parenthesis",
                        self.eof_span(),
                        "input ends here",
                    )
                    .with_related(open, "property block opened here"),
                ));
            };
            match token.token {
                Token::LeftParen => depth += 1,
                Token::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok((tokens::render(&inner), open.union(token.span)));
                    }
                }
                _ => {}
            }
            inner.push(*token);
        }
    }

    /// Record a state declaration and attach it to every node that refers to it.
    ///
    /// A later declaration with the same name replaces the earlier one.
    fn register_state(&mut self, block: PropertyBlock) {
        for node in &mut self.root.children {
            node.associate(&block);
            for child in &mut node.children {
                child.associate(&block);
            }
        }
        self.root.globals.insert(block.name().to_string(), block);
    }

    fn finish(self) -> Node {
        self.root
    }
}

/// Convert a winnow error into a [`Diagnostic`].
///
/// Errors raised through [`cut`] carry their own description. Anything else
/// is reported against the token the parser stopped at.
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken],
    current_remaining: usize,
) -> Diagnostic {
    let mut expected = Vec::new();
    if let ErrMode::Backtrack(e) | ErrMode::Cut(e) = error {
        for ctx in e.context() {
            match ctx {
                Context::Fatal(fatal) => return fatal.clone().into_diagnostic(),
                Context::Label(label) => expected.push(format!("expected {label}")),
            }
        }
    }

    let end_offset = tokens.len().saturating_sub(current_remaining);
    match tokens.get(end_offset) {
        Some(token) if !expected.is_empty() => Diagnostic::error(expected.join(", "))
            .with_code(ErrorCode::E100)
            .with_label(token.span, format!("found `{token}`")),
        Some(token) => Diagnostic::error(format!("unexpected token `{token}`"))
            .with_code(ErrorCode::E100)
            .with_label(token.span, "unexpected token"),
        None => {
            let span = tokens
                .last()
                .map(|t| Span::new(t.span.end()..t.span.end()))
                .unwrap_or_default();
            Diagnostic::error("unexpected end of input")
                .with_code(ErrorCode::E101)
                .with_label(span, "input ends here")
        }
    }
}

/// Parse a token stream into a tree rooted at a [`NodeKind::Root`] node.
///
/// # Errors
///
/// Returns a [`Diagnostic`] describing the first syntax error.
pub fn build_tree<'src>(tokens: &'src [PositionedToken<'src>]) -> Result<Node, Diagnostic> {
    let mut token_slice = TokenSlice::new(tokens);
    let mut parser = TreeParser::new(tokens);

    match parser.document(&mut token_slice) {
        Ok(()) => Ok(parser.finish()),
        Err(e) => {
            let current_remaining = token_slice.eof_offset();
            Err(convert_error(e, tokens, current_remaining))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_ok(source: &str) -> Node {
        let tokens = tokenize(source);
        build_tree(&tokens).expect("source should parse")
    }

    fn parse_err(source: &str) -> Diagnostic {
        let tokens = tokenize(source);
        build_tree(&tokens).expect_err("source should fail")
    }

    #[test]
    fn test_empty_document() {
        let root = parse_ok("");
        assert_eq!(root.kind, NodeKind::Root);
        assert!(root.children.is_empty());
        assert!(root.connections.is_empty());
    }

    #[test]
    fn test_declaration_forms() {
        let root = parse_ok("a\nb:Server\nc@tag\nd:Browser@home");
        let summary: Vec<_> = root
            .children
            .iter()
            .map(|n| (n.text.as_str(), n.type_name.as_deref(), n.state_name.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("a", None, None),
                ("b", Some("Server"), None),
                ("c", None, Some("tag")),
                ("d", Some("Browser"), Some("home")),
            ]
        );
    }

    #[test]
    fn test_declaration_span_covers_type_and_tag() {
        let root = parse_ok("vps:VM@big");
        assert_eq!(root.children[0].span, Span::new(0..10));
    }

    #[test]
    fn test_state_tag_vs_following_state_declaration() {
        let root = parse_ok("app:Server\n@app(x: 1)");
        let app = &root.children[0];
        assert_eq!(app.state_name, None);
        assert_eq!(app.own_block().map(PropertyBlock::raw), Some("x:1"));
    }

    #[test]
    fn test_container_children_depth() {
        let root = parse_ok("vps:VM { nginx:Server app:Server }");
        let vps = &root.children[0];
        assert!(vps.is_container());
        assert_eq!(vps.children.len(), 2);
        assert!(vps.children.iter().all(|c| c.depth == 1));
    }

    #[test]
    fn test_connection_forms() {
        let root = parse_ok("a.e --> b.w\na --> b\na.ne-->b");
        let anchors: Vec<_> = root
            .connections
            .iter()
            .map(|c| (c.from_anchor.raw(), c.to_anchor.raw()))
            .collect();
        assert_eq!(anchors, vec![("e", "w"), ("", ""), ("ne", "")]);
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_connection_style_block() {
        let root = parse_ok("a.s --> b.n(style: dashed, color: red)");
        assert_eq!(root.connections[0].style, "style:dashed,color:red");
    }

    #[test]
    fn test_dot_without_arrow_falls_back_to_declaration() {
        let err = parse_err("a.b c");
        assert_eq!(err.code(), Some(ErrorCode::E100));
        assert_eq!(err.labels()[0].span(), Span::new(1..2));
    }

    #[test]
    fn test_nested_parens_kept_in_raw_text() {
        let root = parse_ok("@a(bg: rgb(1, 2, 3))\na");
        assert_eq!(root.globals["a"].raw(), "bg:rgb(1,2,3)");
    }

    #[test]
    fn test_missing_arrow_target() {
        let err = parse_err("a.e --> ");
        assert_eq!(err.code(), Some(ErrorCode::E109));
    }

    #[test]
    fn test_missing_anchor_after_dot() {
        assert_eq!(parse_err("a. --> b").code(), Some(ErrorCode::E109));
        assert_eq!(parse_err("a --> b.").code(), Some(ErrorCode::E109));
    }

    #[test]
    fn test_missing_type_name() {
        let err = parse_err("a: { }");
        assert_eq!(err.code(), Some(ErrorCode::E107));
        assert_eq!(err.labels()[0].span(), Span::new(3..4));
    }

    #[test]
    fn test_missing_state_name() {
        assert_eq!(parse_err("a@ {}").code(), Some(ErrorCode::E108));
        assert_eq!(parse_err("a:VM@").code(), Some(ErrorCode::E108));
    }

    #[test]
    fn test_unexpected_leading_token() {
        let err = parse_err(", a");
        assert_eq!(err.code(), Some(ErrorCode::E100));
        assert_eq!(err.message(), "unexpected token `,`");
    }

    #[test]
    fn test_state_declaration_without_paren() {
        assert_eq!(parse_err("@layout a").code(), Some(ErrorCode::E100));
        assert_eq!(parse_err("@layout").code(), Some(ErrorCode::E101));
    }
}
