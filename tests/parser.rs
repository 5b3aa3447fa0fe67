use mtl::{
    Program,
    ast::{BinaryOperator, Binding, Expr, MetaValue, Position, Statement},
    error::ParseError,
    interpreter::{
        lexer::tokenize,
        parser::{parse, parse_with_limit},
    },
};

fn assert_success(src: &str) -> Program {
    let tokens = tokenize(src).unwrap_or_else(|e| panic!("Lexing failed: {e}\n{src}"));
    parse(&tokens).unwrap_or_else(|e| panic!("Parsing failed: {e}\n{src}"))
}

fn assert_failure(src: &str) -> ParseError {
    let tokens = tokenize(src).unwrap_or_else(|e| panic!("Lexing failed: {e}\n{src}"));
    match parse(&tokens) {
        Ok(program) => panic!("Parsing succeeded but was expected to fail: {program:?}"),
        Err(e) => e,
    }
}

fn body(src: &str) -> Vec<Statement> {
    assert_success(&format!("metadata {{ }}\nvariations {{\n{src}\n}}")).body
}

/// Strips positions so trees written in different layouts can be compared.
fn shape(statements: &[Statement]) -> String {
    statements.iter()
              .map(|s| match s {
                  Statement::Assignment { target, value, .. } => {
                      format!("{target} = {}", value.describe())
                  },
                  Statement::ForeachLoop { binding,
                                           source,
                                           body,
                                           .. } => {
                      format!("foreach {binding} in {} [{}]", source.describe(), shape(body))
                  },
                  Statement::FunctionCall { name, arguments, .. } => {
                      format!("{name}/{}", arguments.len())
                  },
              })
              .collect::<Vec<_>>()
              .join("; ")
}

#[test]
fn metadata_values() {
    let program = assert_success(
                                 "metadata {\n  name = \"Seven Pairs\"\n  catid = 7\n  ratio = 0.5\n  \
                                  concealed = true\n  note = null\n  suits = (b, c, d)\n}\nvariations { }",
    );
    let metadata = &program.metadata;

    assert_eq!(metadata.len(), 6);
    assert_eq!(metadata.get("name"), Some(&MetaValue::Text("Seven Pairs".into())));
    assert_eq!(metadata.get("catid"), Some(&MetaValue::Integer(7)));
    assert_eq!(metadata.get("concealed"), Some(&MetaValue::Bool(true)));
    assert_eq!(metadata.get("note"), Some(&MetaValue::Null));
    assert_eq!(metadata.get("suits"),
               Some(&MetaValue::List(vec![MetaValue::Text("b".into()),
                                          MetaValue::Text("c".into()),
                                          MetaValue::Text("d".into())])));
    assert!(program.body.is_empty());
}

#[test]
fn metadata_keeps_source_order_and_last_duplicate() {
    let program = assert_success("metadata { b = 1; a = 2, b = 3 }\nvariations { }");
    let keys: Vec<_> = program.metadata.iter().map(|(k, _)| k).collect();

    assert_eq!(keys, ["b", "a"]);
    assert_eq!(program.metadata.get("b"), Some(&MetaValue::Integer(3)));
}

#[test]
fn statement_forms() {
    let statements = body("x = 1\n(a, b) = complement(c, (b, c, d))\ny, z = p\npair(1, b)");

    assert_eq!(shape(&statements),
               "x = number 1; (a, b) = call to 'complement'; (y, z) = identifier 'p'; pair/2");
}

#[test]
fn foreach_header_forms_are_equivalent() {
    let forms = ["foreach (s in (b, c)) { single(s) }",
                 "foreach s in (b, c) { single(s) }",
                 "foreach s in (b, c): single(s) End",
                 "foreach s in (b, c):\n  single(s)\nEnd:"];

    let expected = shape(&body(forms[0]));
    assert_eq!(expected, "foreach s in tuple of 2 element(s) [single/1]");
    for form in forms {
        assert_eq!(shape(&body(form)), expected, "{form}");
    }
}

#[test]
fn foreach_tuple_bindings() {
    for form in ["foreach ((x, y) in pairs) { }",
                 "foreach (x, y) in pairs { }",
                 "foreach x, y in pairs { }"]
    {
        let statements = body(form);
        assert!(matches!(&statements[0],
                         Statement::ForeachLoop { binding: Binding::Tuple(names), .. }
                             if names == &["x", "y"]),
                "{form}");
    }
}

#[test]
fn operator_precedence() {
    let statements = body("x = 1 + n * 2");
    let Statement::Assignment { value, .. } = &statements[0] else {
        panic!("expected an assignment");
    };
    let Expr::BinaryOp { op: BinaryOperator::Add,
                         right,
                         .. } = value
    else {
        panic!("expected '+' at the root: {value:?}");
    };

    assert!(matches!(**right, Expr::BinaryOp { op: BinaryOperator::Mul, .. }));
}

#[test]
fn grouping_tuples_and_indexing() {
    let statements = body("a = (1)\nb = (1,)\nc = ()\nd = [b, c]\ne = suits[0]");
    let values: Vec<_> = statements.iter()
                                   .map(|s| match s {
                                       Statement::Assignment { value, .. } => value.describe(),
                                       other => panic!("unexpected {other:?}"),
                                   })
                                   .collect();

    assert_eq!(values,
               ["number 1",
                "tuple of 1 element(s)",
                "tuple of 0 element(s)",
                "tuple of 2 element(s)",
                "index expression"]);
}

#[test]
fn statements_keep_their_positions() {
    let statements = body("pair(1, b)\n  foreach n in 1..2 { }");

    assert_eq!(statements[0].position(), Position::new(3, 1));
    assert_eq!(statements[1].position(), Position::new(4, 3));
}

#[test]
fn separators_and_blank_lines() {
    let statements = body("\n\npair(1, b); pair(2, b);;\n\n pair(3, b)\n");

    assert_eq!(statements.len(), 3);
}

#[test]
fn missing_metadata_is_error() {
    assert!(matches!(assert_failure("variations { }"), ParseError::MissingMetadata { .. }));
    assert!(matches!(assert_failure(""), ParseError::UnexpectedEndOfInput { .. }));
}

#[test]
fn missing_variations_is_error() {
    assert!(matches!(assert_failure("metadata { }\nfoo { }"),
                     ParseError::MissingVariations { position: Position { line: 2, column: 1 },
                                                     .. }));
    assert!(matches!(assert_failure("metadata { }"), ParseError::UnexpectedEndOfInput { .. }));
}

#[test]
fn missing_in_is_error() {
    assert!(matches!(assert_failure("metadata { }\nvariations { foreach x (1, 2) { } }"),
                     ParseError::MissingIn { .. }));
}

#[test]
fn unclosed_delimiters_are_errors() {
    assert_eq!(assert_failure("metadata { }\nvariations {\n  pair(1, b)\n"),
               ParseError::UnclosedDelimiter { delimiter: '{',
                                               position:  Position::new(2, 12), });
    assert!(matches!(assert_failure("metadata { }\nvariations { pair(1, b }"),
                     ParseError::UnexpectedToken { .. }));
    assert!(matches!(assert_failure("metadata { }\nvariations { pair(1, b"),
                     ParseError::UnclosedDelimiter { delimiter: '(', .. }));
    assert!(matches!(assert_failure("metadata { a = 1"),
                     ParseError::UnclosedDelimiter { delimiter: '{', .. }));
}

#[test]
fn expected_statement_is_error() {
    assert!(matches!(assert_failure("metadata { }\nvariations { 42 }"),
                     ParseError::ExpectedStatement { .. }));
    assert!(matches!(assert_failure("metadata { }\nvariations { pair }"),
                     ParseError::UnexpectedToken { .. }));
}

#[test]
fn trailing_tokens_are_error() {
    assert!(matches!(assert_failure("metadata { }\nvariations { }\npair(1, b)"),
                     ParseError::UnexpectedTrailingTokens { .. }));
}

#[test]
fn nesting_limit_is_enforced() {
    let src = "metadata { }\nvariations { foreach a in 1..1 { foreach b in 1..1 { } } }";
    let tokens = tokenize(src).unwrap();

    assert!(parse_with_limit(&tokens, 2).is_ok());
    assert!(matches!(parse_with_limit(&tokens, 1),
                     Err(ParseError::NestingTooDeep { limit: 1, .. })));
}

#[test]
fn operator_chains_count_toward_the_nesting_limit() {
    let chain = |op: &str, terms: usize| {
        let expr = vec!["1"; terms].join(op);
        tokenize(&format!("metadata {{ }}\nvariations {{ x = {expr} }}")).unwrap()
    };

    assert!(parse_with_limit(&chain(" + ", 10), 64).is_ok());
    assert!(parse_with_limit(&chain(" * ", 10), 64).is_ok());
    assert!(matches!(parse_with_limit(&chain(" + ", 100), 64),
                     Err(ParseError::NestingTooDeep { limit: 64, .. })));
    assert!(matches!(parse_with_limit(&chain(" * ", 100), 64),
                     Err(ParseError::NestingTooDeep { limit: 64, .. })));

    // Long enough to overflow the stack when dropped if it were accepted.
    let huge = vec!["1"; 300_000].join("+");
    let tokens = tokenize(&format!("metadata {{ }}\nvariations {{ x = {huge} }}")).unwrap();
    assert!(matches!(parse(&tokens), Err(ParseError::NestingTooDeep { .. })));
}
