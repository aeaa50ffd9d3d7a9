use litedef_core::{
    CanonicalColumnSpec, ColumnAffinity, DefaultValue, FlagSetting, RawColumnSpec, RawValue,
    TypeSetting, normalize,
};

fn renormalize(raw: &RawColumnSpec) {
    let first = normalize(raw);
    let second = normalize(&RawColumnSpec::from(&first.spec));

    assert_eq!(first.spec, second.spec, "canonical spec changed for {raw:?}");
    for issue in &second.errors {
        assert!(
            first.errors.contains(issue),
            "second pass introduced {issue:?} for {raw:?}"
        );
    }
}

#[test]
fn mixed_case_key_and_value_are_canonicalized() {
    let result = normalize(&RawColumnSpec::new().with("tYpE", "TeXt"));

    assert!(result.is_ok());
    assert_eq!(
        result.spec,
        CanonicalColumnSpec {
            column_type: TypeSetting::Valid(ColumnAffinity::Text),
            mandatory: FlagSetting::Valid(false),
            unique: FlagSetting::Valid(false),
            default: None,
        }
    );
}

#[test]
fn textual_and_native_booleans_agree() {
    let textual = normalize(&RawColumnSpec::new().with("unique", "TrUe"));
    let native = normalize(&RawColumnSpec::new().with("unique", true));

    assert!(textual.is_ok());
    assert!(native.is_ok());
    assert_eq!(textual.spec, native.spec);
}

#[test]
fn non_boolean_flag_yields_exactly_one_error() {
    let result = normalize(&RawColumnSpec::new().with("unique", "not a boolean"));

    assert_eq!(
        result.messages(),
        vec!["value for setting 'unique' is not correct (expected true or false)".to_string()]
    );
    assert_eq!(
        result.spec.unique,
        FlagSetting::Invalid(RawValue::from("not a boolean"))
    );
    assert!(result.into_definition().is_err());
}

#[test]
fn unique_conflicts_only_with_present_default() {
    let with_default = normalize(&RawColumnSpec::new().with("unique", true).with("default", 42));
    assert!(!with_default.is_ok());

    let with_null = normalize(
        &RawColumnSpec::new()
            .with("unique", true)
            .with("default", RawValue::Null),
    );
    assert!(with_null.is_ok());
    assert_eq!(with_null.spec.default, None);
}

#[test]
fn unknown_type_is_rejected_and_lowercase_type_accepted() {
    assert!(!normalize(&RawColumnSpec::new().with("type", "foo")).is_ok());

    let result = normalize(&RawColumnSpec::new().with("type", "text"));
    assert!(result.is_ok());
    assert_eq!(result.spec.column_type, TypeSetting::Valid(ColumnAffinity::Text));
}

#[test]
fn every_affinity_is_accepted_in_any_case() {
    for affinity in ColumnAffinity::ALL {
        let lower = affinity.as_str().to_lowercase();
        let result = normalize(&RawColumnSpec::new().with("type", lower));
        assert!(result.is_ok());
        assert_eq!(result.spec.column_type, TypeSetting::Valid(affinity));
    }
}

#[test]
fn parses_options_from_json() {
    let raw: RawColumnSpec = serde_json::from_str(
        r#"{"Type": "real", "MANDATORY": "false", "unique": false, "default": 1.5}"#,
    )
    .expect("parse spec");
    let result = normalize(&raw);

    assert!(result.is_ok());
    assert_eq!(result.spec.column_type, TypeSetting::Valid(ColumnAffinity::Real));
    assert_eq!(result.spec.default, Some(DefaultValue::Float(1.5)));
}

#[test]
fn canonical_spec_serializes_with_option_names() {
    let result = normalize(&RawColumnSpec::new().with("type", "integer").with("default", 7));
    let json = serde_json::to_value(&result.spec).expect("serialize spec");

    assert_eq!(
        json,
        serde_json::json!({
            "type": "INTEGER",
            "mandatory": false,
            "unique": false,
            "default": 7
        })
    );
}

#[test]
fn normalization_is_idempotent() {
    let samples = [
        RawColumnSpec::new(),
        RawColumnSpec::new().with("tYpE", "TeXt"),
        RawColumnSpec::new().with("unique", "TrUe"),
        RawColumnSpec::new().with("unique", true).with("default", 42),
        RawColumnSpec::new().with("unique", "not a boolean"),
        RawColumnSpec::new().with("type", "foo").with("mandatory", 3),
        RawColumnSpec::new().with("Type", "blob").with("type", "real"),
        RawColumnSpec::new()
            .with("MANDATORY", "TRUE")
            .with("Default", "null")
            .with("comment", "ignored"),
        RawColumnSpec::new().with("default", false).with("type", "numeric"),
    ];

    for raw in &samples {
        renormalize(raw);
    }
}

#[test]
fn canonical_input_renormalizes_without_errors() {
    let result = normalize(
        &RawColumnSpec::new()
            .with("type", "integer")
            .with("mandatory", true)
            .with("default", 5),
    );
    assert!(result.is_ok());

    let again = normalize(&RawColumnSpec::from(&result.spec));
    assert!(again.is_ok());
    assert_eq!(again, result);
}

#[test]
fn null_canonical_key_yields_to_case_variant() {
    let raw: RawColumnSpec =
        serde_json::from_str(r#"{"type": null, "Type": "integer"}"#).expect("parse options");
    let result = normalize(&raw);

    assert!(result.is_ok(), "unexpected errors: {:?}", result.messages());
    assert_eq!(result.spec.column_type, TypeSetting::Valid(ColumnAffinity::Integer));
    renormalize(&raw);

    let set = RawColumnSpec::new().with("type", "real").with("Type", "integer");
    let result = normalize(&set);
    assert_eq!(result.spec.column_type, TypeSetting::Valid(ColumnAffinity::Real));
    assert_eq!(result.errors.len(), 1);
}
