use mtl::{
    Variation,
    ast::Position,
    compile, compile_with,
    config::EngineConfig,
    error::{CompileError, EvalError},
    evaluate_with,
    interpreter::{
        evaluator::function::{complement::complement, permutations::permutations},
        lexer::tokenize,
        parser::parse,
        value::core::Value,
    },
};

fn run(body: &str) -> Vec<Variation> {
    let src = format!("metadata {{ }}\nvariations {{\n{body}\n}}");
    compile(&src).unwrap_or_else(|e| panic!("Template failed: {e}\n{src}"))
                 .variations
}

fn assert_failure(body: &str) -> EvalError {
    let src = format!("metadata {{ }}\nvariations {{\n{body}\n}}");
    match compile(&src) {
        Ok(template) => panic!("Template succeeded but was expected to fail: {template:?}"),
        Err(CompileError::Eval(e)) => e,
        Err(e) => panic!("Expected an evaluation error, got: {e}"),
    }
}

fn symbols(names: &[&str]) -> Value {
    Value::from(names.iter()
                     .map(|n| Value::Symbol((*n).to_string()))
                     .collect::<Vec<_>>())
}

#[test]
fn unbound_identifier_is_error() {
    let err = assert_failure("x = foo");

    assert!(matches!(&err, EvalError::UnboundIdentifier { name, .. } if name == "foo"));
    assert!(err.to_string().contains("line 3, column 5"), "{err}");
}

#[test]
fn unknown_function_is_error() {
    assert!(matches!(assert_failure("foo(1)"), EvalError::UnknownFunction { .. }));
    assert!(matches!(assert_failure("x = 1\nx(2)"), EvalError::UnknownFunction { .. }));
}

#[test]
fn metadata_may_shadow_builtins() {
    let err = compile("metadata { pair = 1 }\nvariations { pair(1, b) }").unwrap_err();

    assert!(matches!(err, CompileError::Eval(EvalError::UnknownFunction { .. })));
}

#[test]
fn non_iterable_source_is_error() {
    assert!(matches!(assert_failure("foreach x in 5 { }"),
                     EvalError::NotIterable { found: "integer", .. }));
    assert!(matches!(compile("metadata { t = true }\nvariations { foreach x in t { } }"),
                     Err(CompileError::Eval(EvalError::NotIterable { found: "boolean", .. }))));
}

#[test]
fn tile_groups_are_iterable() {
    let variations = run("foreach t in sequence(1, b, 3) { pair(t) }");

    assert_eq!(variations.len(), 3);
    assert_eq!(variations[2].tiles, ["3b", "3b"]);
}

#[test]
fn evaluation_depth_is_bounded() {
    let tokens = tokenize("metadata { }\nvariations { foreach a in 1..1 { foreach b in 1..1 { \
                           single(1, b) } } }").unwrap();
    let program = parse(&tokens).unwrap();

    let shallow = EngineConfig::default().with_max_depth(2);
    assert!(matches!(evaluate_with(&program, &shallow),
                     Err(EvalError::NestingTooDeep { limit: 2, .. })));

    let enough = EngineConfig::default().with_max_depth(3);
    assert_eq!(evaluate_with(&program, &enough).unwrap().len(), 1);
}

#[test]
fn argument_count_is_checked() {
    assert!(matches!(assert_failure("pair(1, b, c)"),
                     EvalError::ArgumentCountMismatch { ref expected, found: 3, .. } if expected == "1 or 2"));
    assert!(matches!(assert_failure("sequence(1, b)"),
                     EvalError::ArgumentCountMismatch { ref expected, found: 2, .. } if expected == "3"));
    assert!(matches!(assert_failure("x = permutations()"),
                     EvalError::ArgumentCountMismatch { found: 0, .. }));
}

#[test]
fn type_errors() {
    assert!(matches!(assert_failure("sequence(x, b, 3)"), EvalError::TypeError { .. }));
    assert!(matches!(assert_failure("x = (1, 2) * 2"), EvalError::TypeError { .. }));
    assert!(matches!(assert_failure("pair((1, 2))"), EvalError::TypeError { .. }));
    assert!(matches!(assert_failure("x = permutations(5)"), EvalError::TypeError { .. }));
}

#[test]
fn destructuring_must_match() {
    assert!(matches!(assert_failure("(a, b) = (1, 2, 3)"),
                     EvalError::DestructureMismatch { expected: 2, .. }));
    assert!(matches!(assert_failure("a, b = 5"),
                     EvalError::DestructureMismatch { expected: 2, .. }));
    assert!(matches!(assert_failure("foreach (x, y) in (1, 2) { }"),
                     EvalError::DestructureMismatch { .. }));
}

#[test]
fn tiles_after_a_loop_are_a_suffix() {
    let tiles: Vec<_> = run("foreach n in 1..2 { single(n, b) }\npair(F)").into_iter()
                                                                        .map(|v| v.tiles)
                                                                        .collect();
    assert_eq!(tiles, [["1b", "F", "F"], ["2b", "F", "F"]]);

    // Tiles keep source order around every loop of the block.
    let tiles: Vec<_> = run("single(E)\nforeach n in 1..2 { single(n, b) }\nsingle(S)\n\
                             foreach s in (c, d) { single(9, s) }\nsingle(W)").into_iter()
                                                                               .map(|v| v.tiles)
                                                                               .collect();
    assert_eq!(tiles,
               [vec!["E", "1b", "S", "W"],
                vec!["E", "2b", "S", "W"],
                vec!["E", "S", "9c", "W"],
                vec!["E", "S", "9d", "W"]]);

    // A suffix only reaches the variations of its own block.
    let tiles: Vec<_> = run("foreach a in 1..1 { single(a, b) }\n\
                             foreach s in (c,) { foreach n in 1..1 { single(n, s) }\npair(N) }")
                        .into_iter()
                        .map(|v| v.tiles)
                        .collect();
    assert_eq!(tiles, [vec!["1b"], vec!["1c", "N", "N"]]);

    assert_eq!(run("foreach n in 1..2 { single(n, b) }\nsequence(1, b, 0)\nx = 1").len(), 2);
}

#[test]
fn arithmetic_overflow_is_error() {
    assert!(matches!(assert_failure("x = 9223372036854775807 + 1"), EvalError::Overflow { .. }));
    assert!(matches!(assert_failure("x = 4611686018427387904 * 2"), EvalError::Overflow { .. }));
}

#[test]
fn index_out_of_bounds_is_error() {
    assert!(matches!(assert_failure("x = (b, c)[2]"),
                     EvalError::IndexOutOfBounds { len: 2, found: 2, .. }));
    assert_eq!(run("single((b, c)[1])")[0].tiles, ["c"]);
}

#[test]
fn list_concatenation() {
    let variations = run("honors = (E, S) + (W, N)\nforeach h in honors { single(h) }");

    assert_eq!(variations.iter().map(|v| v.tiles[0].as_str()).collect::<Vec<_>>(),
               ["E", "S", "W", "N"]);
}

#[test]
fn non_group_call_statements_add_nothing() {
    assert!(run("range(1, 3)\ncomplement(b, (b, c))").is_empty());
}

#[test]
fn strict_mode_requires_bindings() {
    let src = "metadata { }\nvariations { suits = (b, c) }";
    let strict = EngineConfig::default().with_symbol_atoms(false);

    assert!(compile(src).is_ok());
    assert!(matches!(compile_with(src, &strict),
                     Err(CompileError::Eval(EvalError::UnboundIdentifier { .. }))));
}

#[test]
fn variations_carry_name_and_description() {
    let template = compile("metadata { name = \"N\"; description = \"D\" }\nvariations { \
                            pair(1, b) }").unwrap();

    assert_eq!(template.variations[0].name.as_deref(), Some("N"));
    assert_eq!(template.variations[0].description.as_deref(), Some("D"));
}

#[test]
fn complement_builtin() {
    let at = Position::new(1, 1);
    let result = complement(&[Value::Symbol("c".into()), symbols(&["b", "c", "d", "c"])], at).unwrap();

    assert_eq!(result, symbols(&["b", "d", "c"]));

    let text_target = complement(&[Value::Text("b".into()), symbols(&["b", "c"])], at).unwrap();
    assert_eq!(text_target, symbols(&["c"]));
}

#[test]
fn permutations_builtin() {
    let at = Position::new(1, 1);
    let config = EngineConfig::default();

    let empty = permutations(&[Value::from(Vec::<Value>::new())], &config, at).unwrap();
    assert_eq!(empty.elements().map(|e| e.len()), Some(1));

    let two = permutations(&[symbols(&["x", "y"])], &config, at).unwrap();
    assert_eq!(two.to_string(), "((x, y), (y, x))");
}

#[test]
fn huge_foreach_range_is_refused_without_allocating() {
    let err = assert_failure("foreach n in 0..9223372036854775807 { single(n, b) }");

    assert!(matches!(err,
                     EvalError::TooManyItems { what: "range",
                                               found: 9_223_372_036_854_775_808,
                                               limit: 100_000,
                                               .. }));
    assert_eq!(run("foreach n in 9223372036854775806..9223372036854775807 { single(n, b) }").len(), 2);
}

#[test]
fn huge_sequence_is_refused_without_allocating() {
    assert!(matches!(assert_failure("sequence(1, b, 9223372036854775807)"),
                     EvalError::TooManyItems { what: "sequence", .. }));
    assert_eq!(run("sequence(1, b, 100000)")[0].tiles.len(), 100_000);
}

#[test]
fn range_values_are_bounded() {
    assert!(matches!(assert_failure("x = range(0, 10000000000)"),
                     EvalError::TooManyItems { what: "range", .. }));
    assert!(matches!(assert_failure("x = 0..10000000000"),
                     EvalError::TooManyItems { what: "range", .. }));
}

#[test]
fn permutations_input_is_bounded() {
    let err = assert_failure("x = permutations((1, 2, 3, 4, 5, 6, 7, 8, 9, 10))");
    assert!(matches!(err, EvalError::TooManyItems { what: "permutations", found: 3_628_800, .. }));

    let at = Position::new(1, 1);
    let list = Value::from((0..40).map(Value::Integer).collect::<Vec<_>>());
    assert!(matches!(permutations(&[list], &EngineConfig::default(), at),
                     Err(EvalError::TooManyItems { found: u128::MAX, .. })));
}

#[test]
fn item_limit_is_configurable() {
    let src = "metadata { }\nvariations { foreach a in 1..3 { foreach b in 1..3 { single(a, b) } } }";
    let tight = EngineConfig::default().with_max_items(5);

    assert_eq!(compile(src).unwrap().variations.len(), 9);
    assert!(matches!(compile_with(src, &tight),
                     Err(CompileError::Eval(EvalError::TooManyItems { what: "variations",
                                                                       found: 6,
                                                                       limit: 5,
                                                                       .. }))));

    let joined = "metadata { }\nvariations { x = (1, 2, 3) + (4, 5, 6) }";
    assert!(matches!(compile_with(joined, &tight),
                     Err(CompileError::Eval(EvalError::TooManyItems { what: "list", found: 6, .. }))));
    assert!(matches!(compile_with("metadata { }\nvariations { sequence(1, b, 6) }", &tight),
                     Err(CompileError::Eval(EvalError::TooManyItems { what: "sequence", .. }))));
}
