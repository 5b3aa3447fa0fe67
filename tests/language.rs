use std::{collections::HashSet, fs};

use mtl::{
    CompiledTemplate, compile, compile_with,
    config::EngineConfig,
    error::{CompileError, EvalError, LexError, ParseError},
};
use walkdir::WalkDir;

fn assert_success(src: &str) -> CompiledTemplate {
    compile(src).unwrap_or_else(|e| panic!("Template failed: {e}\n{src}"))
}

fn assert_failure(src: &str) -> CompileError {
    match compile(src) {
        Ok(template) => panic!("Template succeeded but was expected to fail: {template:?}"),
        Err(e) => e,
    }
}

fn template(body: &str) -> String {
    format!("metadata {{ name = \"test\" }}\nvariations {{\n{body}\n}}")
}

fn tiles(template: &CompiledTemplate) -> Vec<Vec<&str>> {
    template.variations
            .iter()
            .map(|v| v.tiles.iter().map(String::as_str).collect())
            .collect()
}

#[test]
fn bundled_templates_compile() {
    let mut count = 0;

    for entry in WalkDir::new("templates").sort_by_file_name()
                                          .into_iter()
                                          .filter_map(Result::ok)
                                          .filter(|e| {
                                              e.path().extension().is_some_and(|ext| ext == "mtl")
                                          })
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        count += 1;

        let compiled = compile(&content).unwrap_or_else(|e| panic!("{path:?} failed: {e}"));
        assert!(!compiled.variations.is_empty(), "{path:?} produced no variations");
        assert!(compiled.metadata.get("name").is_some(), "{path:?} has no name");
    }

    assert!(count >= 5, "Expected the bundled templates in templates/");
}

#[test]
fn bundled_template_sizes() {
    let cases = [("like_kong_kong_pair", 27, 14),
                 ("p3_k6_p6_k9", 6, 14),
                 ("sequence_and_kongs", 15, 14),
                 ("even_pungs_2468", 12, 14),
                 ("seven_pairs", 7, 2)];

    for (name, variations, tile_count) in cases {
        let source = fs::read_to_string(format!("templates/{name}.mtl")).unwrap();
        let compiled = assert_success(&source);
        assert_eq!(compiled.variations.len(), variations, "{name}");
        assert!(compiled.variations
                        .iter()
                        .all(|v| v.tiles.len() == tile_count),
                "{name}");
    }
}

#[test]
fn like_kong_kong_pair_scenario() {
    let compiled = assert_success(
                                  r"
metadata { name = LKKP }
variations {
    foreach s1 in (b,c,d): (s2,s3)=complement(s1,(b,c,d)); foreach n in 1..9: pair(F); kong(n,s2); single(D,s2); kong(n,s3); single(D,s3); pair(n,s1)
}
",
    );

    assert_eq!(compiled.variations.len(), 27);
    assert!(compiled.variations.iter().all(|v| v.tiles.len() == 14));

    let all = tiles(&compiled);
    assert_eq!(all[0],
               ["F", "F", "1c", "1c", "1c", "1c", "Dc", "1d", "1d", "1d", "1d", "Dd", "1b", "1b"]);
    assert_eq!(all[26],
               ["F", "F", "9b", "9b", "9b", "9b", "Db", "9c", "9c", "9c", "9c", "Dc", "9d", "9d"]);
}

#[test]
fn seven_pairs_scenario() {
    let compiled = assert_success(&template("foreach n in 1..7 { pair(n, s) }"));

    assert_eq!(compiled.variations.len(), 7);
    for (i, variation) in compiled.variations.iter().enumerate() {
        let code = format!("{}s", i + 1);
        assert_eq!(variation.tiles, [code.clone(), code]);
    }
}

#[test]
fn cartesian_product_is_row_major() {
    let compiled = assert_success(&template("foreach (s in (b, c)) {\n  foreach (n in 1..3) {\n    single(n, s)\n  }\n}"));

    assert_eq!(tiles(&compiled),
               [["1b"], ["2b"], ["3b"], ["1c"], ["2c"], ["3c"]]);
}

#[test]
fn cartesian_product_law() {
    for (m, n) in [(1, 1), (2, 3), (3, 9), (4, 2)] {
        let src = template(&format!("foreach a in 1..{m} {{ foreach b in 1..{n} {{ pair(a, b) }} }}"));
        assert_eq!(assert_success(&src).variations.len(), m * n);
    }
}

#[test]
fn tile_count_law() {
    let compiled = assert_success(&template(
        "foreach s in (b, c, d) {\n  foreach n in 1..4 {\n    single(n, s)\n    pair(n, s)\n    pung(n, s)\n    kong(n, s)\n    quint(J)\n    sequence(n, s, 3)\n  }\n}",
    ));

    assert_eq!(compiled.variations.len(), 12);
    assert!(compiled.variations
                    .iter()
                    .all(|v| v.tiles.len() == 1 + 2 + 3 + 4 + 5 + 3));
}

#[test]
fn outer_tiles_prefix_every_inner_variation() {
    let compiled = assert_success(&template("pair(F)\nforeach n in 1..2 { single(n, b) }"));

    assert_eq!(tiles(&compiled), [["F", "F", "1b"], ["F", "F", "2b"]]);
}

#[test]
fn sibling_loops_emit_independently() {
    let compiled = assert_success(&template("foreach n in 1..2 { single(n, b) }\nforeach n in 5..1 { single(n, c) }\nforeach n in 3..3 { single(n, d) }"));

    assert_eq!(tiles(&compiled), [["1b"], ["2b"], ["3d"]]);
}

#[test]
fn top_level_body_without_loops_is_one_variation() {
    let compiled = assert_success(&template("pung(RD)\nkong(1, b)"));

    assert_eq!(compiled.variations.len(), 1);
    assert_eq!(compiled.variations[0].tiles.len(), 7);
    assert_eq!(compiled.variations[0].name.as_deref(), Some("test"));
}

#[test]
fn empty_variations_block_is_empty_output() {
    assert!(assert_success("metadata { }\nvariations { }").variations.is_empty());
    assert!(assert_success("metadata { }\nvariations { x = 1 }").variations.is_empty());
}

#[test]
fn inverted_range_contributes_nothing() {
    assert!(assert_success(&template("foreach n in 5..1 { pair(n, b) }")).variations.is_empty());
    assert!(assert_success(&template("foreach n in range(5, 1) { pair(n, b) }")).variations.is_empty());
}

#[test]
fn zero_tile_passes_are_dropped() {
    let compiled = assert_success(&template("foreach n in 0..2 { sequence(1, b, n) }"));

    assert_eq!(tiles(&compiled), [vec!["1b"], vec!["1b", "2b"]]);
}

#[test]
fn complement_keeps_order_and_ignores_absent() {
    let compiled = assert_success(&template("(x, y) = complement(c, (b, c, d))\npair(x)\npair(y)"));
    assert_eq!(tiles(&compiled), [["b", "b", "d", "d"]]);

    let compiled = assert_success(&template("(x, y, z) = complement(w, (b, c, d))\nsingle(x)\nsingle(y)\nsingle(z)"));
    assert_eq!(tiles(&compiled), [["b", "c", "d"]]);

    let compiled = assert_success(&template("rest = complement((b, d), (b, c, d, b))\nforeach t in rest { single(t) }"));
    assert_eq!(tiles(&compiled), [["c"], ["b"]]);
}

#[test]
fn permutations_are_complete_and_ordered() {
    let compiled = assert_success(&template("foreach (p in permutations((a, b, c))) {\n  (x, y, z) = p\n  single(x)\n  single(y)\n  single(z)\n}"));

    let all = tiles(&compiled);
    assert_eq!(all.len(), 6);
    assert_eq!(all.iter().collect::<HashSet<_>>().len(), 6);
    assert_eq!(all,
               [["a", "b", "c"],
                ["a", "c", "b"],
                ["b", "a", "c"],
                ["b", "c", "a"],
                ["c", "a", "b"],
                ["c", "b", "a"]]);
}

#[test]
fn brace_and_colon_forms_are_equivalent() {
    let braces = assert_success(&template("foreach (s in (b, c)) {\n  foreach (n in 1..2) {\n    pair(n, s)\n  }\n}"));
    let colons = assert_success(&template("foreach s in (b, c):\n  foreach n in 1..2:\n    pair(n, s)\n  End:\nEnd"));
    let implicit = assert_success(&template("foreach s in (b, c): foreach n in 1..2: pair(n, s)"));

    assert_eq!(braces, colons);
    assert_eq!(braces, implicit);
}

#[test]
fn legacy_block_syntax_is_accepted() {
    let canonical = assert_success("metadata { a = 1 }\nvariations { pair(1, b) }");

    for src in ["metadata = { a = 1 }\nvariations = { pair(1, b) }",
                "METADATA {\n  a: 1\n}\nVariations: {\n  pair(1, b)\n}",
                "metadata { a 1 }\nvariations:\n  pair(1, b)\nEND:"]
    {
        assert_eq!(assert_success(src), canonical, "{src}");
    }
}

#[test]
fn metadata_is_visible_as_variables() {
    let compiled = assert_success("metadata {\n  suit = b\n  values = (1, 2)\n}\nvariations {\n  foreach v in values { pair(v, suit) }\n}");

    assert_eq!(tiles(&compiled), [["1b", "1b"], ["2b", "2b"]]);
}

#[test]
fn loop_variables_shadow_and_expire() {
    let compiled = assert_success(&template("n = 9\nforeach n in 1..2 { single(n, b) }\nforeach m in 1..1 { single(n, c) }"));

    assert_eq!(tiles(&compiled), [["1b"], ["2b"], ["9c"]]);
}

#[test]
fn strings_iterate_code_points() {
    let compiled = assert_success(&template("foreach ch in \"NEW\" { single(ch) }"));

    assert_eq!(tiles(&compiled), [["N"], ["E"], ["W"]]);
}

#[test]
fn arithmetic_and_indexing() {
    let compiled = assert_success(&template("suits = (b, c, d)\nforeach n in 1..2 { pung(n * 2 + 1, suits[n]) }"));

    assert_eq!(tiles(&compiled), [["3c", "3c", "3c"], ["5d", "5d", "5d"]]);
}

#[test]
fn tile_literals_pass_through() {
    let compiled = assert_success(&template("single('RD')\npair('it\\'s')"));

    assert_eq!(tiles(&compiled), [["RD", "it's", "it's"]]);
}

#[test]
fn compiling_twice_is_deterministic() {
    let source = fs::read_to_string("templates/like_kong_kong_pair.mtl").unwrap();

    assert_eq!(compile(&source), compile(&source));
}

#[test]
fn json_output_shape() {
    let compiled = assert_success("metadata { name = \"P\"; catid = 1 }\nvariations { pair(1, b) }");
    let json: serde_json::Value = serde_json::from_str(&compiled.to_json(false).unwrap()).unwrap();

    assert_eq!(json["metadata"]["catid"], 1);
    assert_eq!(json["variations"][0]["tiles"], serde_json::json!(["1b", "1b"]));
    assert_eq!(json["variations"][0]["name"], "P");
    assert!(json["variations"][0].get("description").is_none());
}

#[test]
fn lex_errors_abort_compilation() {
    assert!(matches!(assert_failure(&template("pair(\"1b)")),
                     CompileError::Lex(LexError::UnterminatedString { .. })));
    assert!(matches!(assert_failure(&template("pair(1, b) @")),
                     CompileError::Lex(LexError::IllegalCharacter { character: '@', .. })));
}

#[test]
fn parse_errors_abort_compilation() {
    assert!(matches!(assert_failure("variations { pair(1, b) }"),
                     CompileError::Parse(ParseError::MissingMetadata { .. })));
    assert!(matches!(assert_failure("metadata { }\npair(1, b)"),
                     CompileError::Parse(ParseError::MissingVariations { .. })));
    assert!(matches!(assert_failure(&template("foreach n 1..3 { pair(n, b) }")),
                     CompileError::Parse(ParseError::MissingIn { .. })));
    assert!(matches!(assert_failure("metadata { }\nvariations { pair(1, b)"),
                     CompileError::Parse(ParseError::UnclosedDelimiter { delimiter: '{', .. })));
}

#[test]
fn eval_errors_abort_compilation() {
    assert!(matches!(assert_failure(&template("foreach s in suits { pair(1, s) }")),
                     CompileError::Eval(EvalError::UnboundIdentifier { ref name, .. }) if name == "suits"));
    assert!(matches!(assert_failure(&template("triple(1, b)")),
                     CompileError::Eval(EvalError::UnknownFunction { ref name, .. }) if name == "triple"));
    assert!(matches!(assert_failure(&template("foreach s in 7 { pair(1, s) }")),
                     CompileError::Eval(EvalError::NotIterable { found: "integer", .. })));
}

#[test]
fn unbound_identifiers_are_rejected_in_strict_mode() {
    let strict = EngineConfig::default().with_symbol_atoms(false);

    assert!(compile_with(&template("pair(1, 2)"), &strict).is_ok());
    assert!(matches!(compile_with(&template("pair(1, b)"), &strict),
                     Err(CompileError::Eval(EvalError::UnboundIdentifier { .. }))));
}

#[test]
fn nesting_limit_is_an_error_not_a_crash() {
    let mut body = String::new();
    for i in 0..200 {
        body.push_str(&format!("foreach v{i} in 1..1 {{\n"));
    }
    body.push_str("single(1, b)\n");
    body.push_str(&"}\n".repeat(200));

    assert!(matches!(assert_failure(&template(&body)),
                     CompileError::Parse(ParseError::NestingTooDeep { limit: 64, .. })));

    let deep = format!("x = {}1{}", "(".repeat(500), ")".repeat(500));
    assert!(matches!(assert_failure(&template(&deep)),
                     CompileError::Parse(ParseError::NestingTooDeep { .. })));

    let shallow = EngineConfig::default().with_max_depth(256);
    let compiled = compile_with(&template(&body), &shallow).unwrap();
    assert_eq!(compiled.variations.len(), 1);
}
