//! The checked-in fixtures must match what the generator emits for their code-model documents.

use crate::{
  generator::{config::GeneratorConfig, orchestrator::Orchestrator},
  utils::loader::parse_code_model,
};

const FIXTURES: [(&str, &str, &str); 5] = [
  (
    "dispatch",
    include_str!("../../fixtures/dispatch.json"),
    include_str!("../../fixtures/dispatch.rs"),
  ),
  (
    "flatten",
    include_str!("../../fixtures/flatten.json"),
    include_str!("../../fixtures/flatten.rs"),
  ),
  (
    "merge_patch",
    include_str!("../../fixtures/merge_patch.json"),
    include_str!("../../fixtures/merge_patch.rs"),
  ),
  (
    "point",
    include_str!("../../fixtures/point.json"),
    include_str!("../../fixtures/point.rs"),
  ),
  (
    "xml_pets",
    include_str!("../../fixtures/xml_pets.json"),
    include_str!("../../fixtures/xml_pets.rs"),
  ),
];

/// Re-prints a source file so layout differences do not count.
fn normalize(name: &str, code: &str) -> String {
  let file = syn::parse_file(code).unwrap_or_else(|error| panic!("{name}: not valid Rust: {error}"));
  prettyplease::unparse(&file)
}

fn generate(name: &str, document: &str) -> String {
  let code_model = parse_code_model(document.as_bytes()).unwrap();
  let orchestrator = Orchestrator::new(code_model, GeneratorConfig::default());
  let (code, _) = orchestrator
    .generate_with_header(&format!("fixtures/{name}.json"))
    .unwrap();
  code
}

#[test]
fn test_fixture_headers_match_generated_headers() {
  for (name, document, fixture) in FIXTURES {
    let code = generate(name, document);
    let header: Vec<&str> = fixture.lines().take(9).collect();
    assert!(code.starts_with(&header.join("\n")), "{name}: header differs\n{code}");
  }
}

#[test]
fn test_fixtures_match_generated_code() {
  for (name, document, fixture) in FIXTURES {
    let expected = normalize(name, fixture);
    let generated = normalize(name, &generate(name, document));
    if let Some((line, (want, got))) = expected
      .lines()
      .zip(generated.lines())
      .enumerate()
      .find(|(_, (want, got))| want != got)
    {
      panic!("{name}: line {} differs\nfixture:   {want}\ngenerated: {got}", line + 1);
    }
    assert_eq!(
      expected.lines().count(),
      generated.lines().count(),
      "{name}: fixture and generated code differ in length"
    );
  }
}
