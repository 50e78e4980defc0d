use nagare_parser::{ErrorCode, NodeKind, ParseError, Span, parse, parse_source, tokenize};

fn first_code(err: &ParseError) -> Option<ErrorCode> {
    err.diagnostics().first().and_then(|d| d.code())
}

fn parse_fails_with(source: &str, code: ErrorCode) {
    let err = parse_source(source).expect_err("Expected parsing to fail");
    assert_eq!(first_code(&err), Some(code), "source: {source}\nerror: {err}");
}

#[test]
fn test_full_document() {
    let source = r##"
        browser:Browser@home
        vps:VM {
            nginx:Server
            app:Server@app_state
            nginx.e --> app.w
        }
        @layout(w: 950, h: 400)
        @home(x: 50, y: &vps.c, url: "https://www.nagare.com")
        @vps(x: 280, y: 30)
        @app_state(x: 40, y: &nginx.c, title: "App Server", port: 8080)
        browser.e --> vps.w(style: dashed)
    "##;

    let root = parse_source(source).expect("Failed to parse");

    assert_eq!(root.kind, NodeKind::Root);
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.component_count(), 4);
    assert_eq!(
        root.globals.keys().collect::<Vec<_>>(),
        vec!["layout", "home", "vps", "app_state"]
    );

    let browser = &root.children[0];
    assert_eq!(browser.type_name.as_deref(), Some("Browser"));
    assert_eq!(
        browser.state_block().map(|b| b.raw()),
        Some(r#"x:50,y:&vps.c,url:"https://www.nagare.com""#)
    );

    let vps = &root.children[1];
    assert!(vps.is_container());
    assert_eq!(vps.own_block().map(|b| b.raw()), Some("x:280,y:30"));
    assert_eq!(vps.children[1].state_block().map(|b| b.name()), Some("app_state"));

    // The connection inside the container body is hoisted to the root, in source order
    let ends: Vec<_> = root
        .connections
        .iter()
        .map(|c| (c.from_id.as_str(), c.to_id.as_str()))
        .collect();
    assert_eq!(ends, vec![("nginx", "app"), ("browser", "vps")]);
    assert_eq!(root.connections[1].style, "style:dashed");
}

#[test]
fn test_state_association_by_identifier_and_tag() {
    let root = parse_source("foo\nbar@foo\n@foo(x:1,y:2)").expect("Failed to parse");

    let foo = root.find("foo").expect("foo declared");
    let bar = root.find("bar").expect("bar declared");
    assert_eq!(foo.states.get("foo"), bar.states.get("foo"));
    assert_eq!(foo.states["foo"].raw(), "x:1,y:2");
}

#[test]
fn test_state_association_is_order_independent() {
    let before = parse_source("@foo(x:1,y:2)\nfoo\nbar@foo").expect("Failed to parse");
    let after = parse_source("foo\nbar@foo\n@foo(x:1,y:2)").expect("Failed to parse");

    for id in ["foo", "bar"] {
        let early = before.find(id).and_then(|n| n.states.get("foo")).map(|b| b.raw());
        let late = after.find(id).and_then(|n| n.states.get("foo")).map(|b| b.raw());
        assert_eq!(early, Some("x:1,y:2"));
        assert_eq!(early, late);
    }
}

#[test]
fn test_state_association_reaches_container_children() {
    let root = parse_source("vps:VM { nginx }\n@nginx(x: 10)").expect("Failed to parse");
    let nginx = root.find("nginx").expect("nginx declared");
    assert_eq!(nginx.own_block().map(|b| b.raw()), Some("x:10"));
}

#[test]
fn test_repeated_state_declaration_last_wins() {
    let root = parse_source("a\n@a(x: 1)\n@a(x: 2)").expect("Failed to parse");
    assert_eq!(root.globals["a"].raw(), "x:2");
    assert_eq!(root.children[0].own_block().map(|b| b.raw()), Some("x:2"));
}

#[test]
fn test_quoted_values_keep_whitespace() {
    let root = parse_source(r#"t:Terminal @t(title: "home @ ubuntu", prompt: '$  ')"#)
        .expect("Failed to parse");
    assert_eq!(
        root.globals["t"].raw(),
        r#"title:"home @ ubuntu",prompt:'$  '"#
    );
}

#[test]
fn test_parse_takes_tokens() {
    let tokens = tokenize("a --> b");
    let root = parse(&tokens).expect("Failed to parse");
    assert_eq!(root.connections.len(), 1);
    assert!(root.connections[0].from_anchor.is_center());
}

#[test]
fn test_whitespace_and_line_breaks_are_insignificant() {
    let compact = parse_source("vps:VM{nginx:Server}@vps(x:1)a.e-->b.w").expect("compact");
    let spread = parse_source("vps : VM {\n nginx : Server\n}\n@vps( x : 1 )\na . e --> b . w")
        .expect("spread");

    assert_eq!(compact.component_count(), spread.component_count());
    assert_eq!(compact.globals["vps"].raw(), spread.globals["vps"].raw());
    assert_eq!(compact.connections.len(), spread.connections.len());
}

#[test]
fn test_nesting_depth_exceeded() {
    let err = parse_source("outer:VM {\n  inner:VM {\n    leaf\n  }\n}").expect_err("nested");
    let diagnostic = &err.diagnostics()[0];
    assert_eq!(diagnostic.code(), Some(ErrorCode::E102));
    assert_eq!(diagnostic.message(), "nesting depth exceeded maximum of 1");
    // Primary label on the inner brace, secondary on the enclosing container
    assert_eq!(diagnostic.labels().len(), 2);
    assert_eq!(diagnostic.labels()[0].span(), Span::new(22..23));
}

#[test]
fn test_structural_errors() {
    parse_fails_with("}", ErrorCode::E103);
    parse_fails_with("a }", ErrorCode::E103);
    parse_fails_with("vps:VM {\n nginx", ErrorCode::E104);
    parse_fails_with("@a(x: 1", ErrorCode::E105);
    parse_fails_with("a --> b(style: dashed", ErrorCode::E105);
    parse_fails_with("vps { @a(x:1) }", ErrorCode::E106);
}

#[test]
fn test_committed_form_errors() {
    parse_fails_with("a:", ErrorCode::E107);
    parse_fails_with("a: @s", ErrorCode::E107);
    parse_fails_with("a@", ErrorCode::E108);
    parse_fails_with("@(x: 1)", ErrorCode::E108);
    parse_fails_with("a.e -->", ErrorCode::E109);
    parse_fails_with("a.e --> b.", ErrorCode::E109);
    parse_fails_with("a. --> b.w", ErrorCode::E109);
}

#[test]
fn test_unexpected_tokens() {
    parse_fails_with("= a", ErrorCode::E100);
    parse_fails_with("a.b", ErrorCode::E100);
    parse_fails_with("--> b", ErrorCode::E100);
    parse_fails_with("vps { , }", ErrorCode::E100);
}

#[test]
fn test_unterminated_container_points_at_opening_brace() {
    let err = parse_source("vps:VM {").expect_err("unterminated");
    let labels = err.diagnostics()[0].labels();
    assert!(labels.iter().any(|l| l.is_secondary() && l.span() == Span::new(7..8)));
}
