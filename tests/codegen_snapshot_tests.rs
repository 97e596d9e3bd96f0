//! Golden snapshot tests for codegen
//!
//! These tests generate C++ artifacts from the resolved document in
//! `tests/fixtures/` and compare the output against stored snapshots. This
//! ensures codegen changes are reviewed and intentional.
//!
//! Run with: `cargo test --test codegen_snapshot_tests`
//! Review changes: `cargo insta review`

use bridgegen::ast::Document;
use bridgegen::{Artifact, Generator, GeneratorConfig};
use std::fs;

/// Load a resolved document from the fixtures directory
fn load_fixture(name: &str) -> Document {
    let path = format!("tests/fixtures/{}.json", name);
    let text = fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read fixture: {}", path));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Invalid fixture {}: {}", path, e))
}

fn config() -> GeneratorConfig {
    GeneratorConfig::default()
        .with_namespace("geo")
        .with_component_namespace("Contoso.Geo")
}

fn generate(name: &str) -> Vec<Artifact> {
    Generator::new(config())
        .generate(&load_fixture(name))
        .expect("generation failed")
}

fn artifact<'a>(artifacts: &'a [Artifact], path: &str) -> &'a str {
    artifacts
        .iter()
        .find(|a| a.path.to_string_lossy() == path)
        .map(|a| a.contents.as_str())
        .unwrap_or_else(|| panic!("no artifact at {}", path))
}

#[test]
fn test_demo_artifact_paths() {
    let artifacts = generate("demo");
    let paths: Vec<String> = artifacts.iter().map(|a| a.path.to_string_lossy().into_owned()).collect();
    insta::assert_snapshot!("demo_paths", paths.join("\n"));
}

#[test]
fn test_enum_header_codegen() {
    let artifacts = generate("demo");
    insta::assert_snapshot!("color_header", artifact(&artifacts, "include/color.hpp").trim_end());
}

#[test]
fn test_record_bridge_codegen() {
    let artifacts = generate("demo");
    insta::assert_snapshot!("point_bridge_source", artifact(&artifacts, "src/point_bridge.cpp").trim_end());
}

#[test]
fn test_interface_header_codegen() {
    let artifacts = generate("demo");
    let header = artifact(&artifacts, "include/listener.hpp");
    assert!(header.contains("#include \"color.hpp\"\n#include \"point.hpp\"\n"));
    assert!(header.contains("class Listener {\npublic:\n    virtual ~Listener() = default;\n"));
    assert!(header.contains("    virtual void on_point(::geo::Point const& p, ::geo::Color tint) const = 0;\n"));
    // Records and enums are complete types here, so nothing is forward declared.
    assert!(!header.contains("struct Point;"));
}

#[test]
fn test_every_header_is_guarded_and_namespaced() {
    for artifact in generate("demo") {
        assert!(artifact.contents.starts_with("// AUTOGENERATED FILE - DO NOT MODIFY!\n"));
        assert!(artifact.contents.contains("// This file was generated by bridgegen from demo.idl\n"));
        assert!(artifact.contents.contains("namespace geo {\n"));
        if artifact.path.extension().is_some_and(|e| e == "hpp") {
            assert!(artifact.contents.contains("#pragma once\n"), "{}", artifact.path.display());
        } else {
            assert!(!artifact.contents.contains("#pragma once"), "{}", artifact.path.display());
        }
    }
}

#[test]
fn test_demo_generation_is_byte_identical_across_runs() {
    assert_eq!(generate("demo"), generate("demo"));
}
