use delphi_depend::core::{AnalysisError, Dependency, DependencyKind, MalformedReason};
use delphi_depend::parsers::PascalParser;

#[test]
fn extracts_interface_then_implementation_uses_in_order() {
    let source = r#"
unit M;

interface

uses
  A, B;

implementation

uses C;

end.
"#;
    let deps = PascalParser::new().parse_source(source).unwrap();

    assert_eq!(
        deps,
        vec![
            Dependency::interface("M", "A"),
            Dependency::interface("M", "B"),
            Dependency::implementation("M", "C"),
        ]
    );
}

#[test]
fn source_without_unit_declaration_yields_nothing() {
    let source = "program Project1;\nuses Forms, Unit1;\nbegin\nend.\n";
    assert!(PascalParser::new().parse_source(source).unwrap().is_empty());
}

#[test]
fn keywords_match_case_insensitively_names_keep_case() {
    let source = "UNIT Foo;\nINTERFACE\nUSES SysUtils;\nIMPLEMENTATION\nUses classes;\nEND.";
    let deps = PascalParser::new().parse_source(source).unwrap();

    assert_eq!(deps.len(), 2);
    assert_eq!(deps[0].to, "SysUtils");
    assert_eq!(deps[0].kind, DependencyKind::Interface);
    assert_eq!(deps[1].to, "classes");
    assert_eq!(deps[1].kind, DependencyKind::Implementation);
    assert!(deps.iter().all(|d| d.from == "Foo"));
}

#[test]
fn commented_out_uses_are_ignored() {
    let source = "unit A;\ninterface\n{ uses Old; }\nuses New; // uses Other;\nimplementation\n(* uses Gone; *)\nend.";
    let deps = PascalParser::new().parse_source(source).unwrap();

    assert_eq!(deps, vec![Dependency::interface("A", "New")]);
}

#[test]
fn only_first_uses_clause_per_section_counts() {
    let source = "unit A;\ninterface\nuses B;\nuses C;\nimplementation\nuses D;\nuses E;\nend.";
    let targets: Vec<String> = PascalParser::new()
        .parse_source(source)
        .unwrap()
        .into_iter()
        .map(|d| d.to)
        .collect();

    assert_eq!(targets, vec!["B", "D"]);
}

#[test]
fn sections_without_uses_yield_nothing() {
    let source = "unit Empty;\ninterface\nimplementation\nend.";
    assert!(PascalParser::new().parse_source(source).unwrap().is_empty());
}

#[test]
fn missing_implementation_is_malformed() {
    let err = PascalParser::new()
        .parse_source("unit Half;\ninterface\nuses A;\n")
        .unwrap_err();

    match err {
        AnalysisError::MalformedSource { unit, reason, path } => {
            assert_eq!(unit, "Half");
            assert_eq!(reason, MalformedReason::MissingImplementation);
            assert!(path.is_none());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_interface_is_malformed() {
    let err = PascalParser::new()
        .parse_source("unit Half;\nimplementation\nend.")
        .unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::MalformedSource {
            reason: MalformedReason::MissingInterface,
            ..
        }
    ));
}

#[test]
fn interface_after_implementation_is_malformed() {
    let err = PascalParser::new()
        .parse_source("unit Odd;\nimplementation\ninterface\nend.")
        .unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::MalformedSource {
            reason: MalformedReason::InterfaceAfterImplementation,
            ..
        }
    ));
}

#[test]
fn parse_unit_exposes_sections() {
    let text = "unit U;\ninterface\nuses A;\nimplementation\nuses B;\nend.";
    let unit = PascalParser::new().parse_unit(text).unwrap().unwrap();

    assert_eq!(unit.name, "U");
    assert_eq!(unit.interface, "interface\nuses A;\n");
    assert_eq!(unit.implementation, "implementation\nuses B;\nend.");
    assert_eq!(unit.interface_uses(), vec!["A"]);
    assert_eq!(unit.implementation_uses(), vec!["B"]);
}
