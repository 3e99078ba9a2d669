use delphi_depend::core::Dependency;
use delphi_depend::formatters::{EdgeDisplay, JsonCompactFormatter};
use serde_json::Value;

#[test]
fn json_compact_formatter_outputs_valid_json() {
    let deps = vec![
        Dependency::interface("UnitA", "UnitB"),
        Dependency::implementation("UnitA", "UnitC"),
        Dependency::interface("UnitB", "UnitA"),
    ];

    let tmp = tempfile::NamedTempFile::new().unwrap();
    let path = tmp.path().with_extension("json");

    JsonCompactFormatter::new()
        .format_to_file(&deps, &path)
        .unwrap();

    let data = std::fs::read_to_string(&path).unwrap();
    let v: Value = serde_json::from_str(&data).unwrap();

    assert_eq!(v["meta"]["units"].as_u64().unwrap(), 3);
    assert_eq!(v["meta"]["edges"].as_u64().unwrap(), 3);
    assert_eq!(v["meta"].as_object().unwrap().len(), 2);
    assert_eq!(v["units"], serde_json::json!(["UnitA", "UnitB", "UnitC"]));

    // Edge is [from_idx, to_idx, kind_code], where Implementation => 0
    assert_eq!(v["edges"][0], serde_json::json!([0, 1, 1]));
    assert_eq!(v["edges"][1], serde_json::json!([0, 2, 0]));
    assert_eq!(v["edges"][2], serde_json::json!([1, 0, 1]));

    std::fs::remove_file(&path).ok();
}

#[test]
fn json_compact_honours_display_flags() {
    let deps = vec![
        Dependency::interface("A", "B"),
        Dependency::implementation("A", "C"),
    ];

    let out = JsonCompactFormatter::new()
        .with_display(EdgeDisplay {
            implementation: true,
            interface: false,
        })
        .format_dependencies(&deps)
        .unwrap();
    let v: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(v["units"], serde_json::json!(["A", "C"]));
    assert_eq!(v["edges"], serde_json::json!([[0, 1, 0]]));
}
