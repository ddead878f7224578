use std::sync::Arc;

use serde_json::json;

use rspostal::{
    CodeFormat, ConfigManager, Constraint, MatchEngine, OverrideStore, PostalCodeValidator, RspostalError,
    RuleLoader, RuleSetFactory,
};

fn validator() -> PostalCodeValidator {
    PostalCodeValidator::embedded()
}

#[test]
fn dutch_postal_code_passes() {
    assert!(validator().validate("1234 AB", &["NL"]).unwrap());
    assert!(!validator().validate("not-a-postal-code", &["NL"]).unwrap());
}

#[test]
fn null_value_never_passes() {
    let validator = validator();
    assert!(!validator.validate_postal_code(&json!(null), &["DE"]).unwrap());

    // 不限制格式的覆盖规则同样拒绝 null
    validator.override_pattern("DE", None).unwrap();
    assert!(!validator.validate_postal_code(&json!(null), &["DE"]).unwrap());
    assert!(validator.validate_postal_code(&json!("anything"), &["DE"]).unwrap());
}

#[test]
fn namespaces_do_not_mix() {
    let mut validator = validator();
    assert!(validator.validate("33380", &["FR"]).unwrap());

    validator.use_alpha3();
    assert!(validator.validate("33380", &["FRA"]).unwrap());
    assert!(!validator.validate("33380", &["FR"]).unwrap());

    validator.use_numeric();
    assert!(validator.validate("33380", &["250"]).unwrap());
}

#[test]
fn always_failing_override_rejects() {
    let validator = validator();
    validator.override_pattern("NL", Some(r"/\b\B/")).unwrap();
    assert!(!validator.validate("1234 AB", &["NL"]).unwrap());
}

#[test]
fn empty_parameter_list_is_an_error() {
    let err = validator()
        .validate_postal_code::<&str>(&json!("1234 AB"), &[])
        .unwrap_err();
    assert!(matches!(err, RspostalError::InvalidArgument(_)));
    assert_eq!(err.to_string(), "Validation rule postal_code requires at least 1 parameter.");

    let err = validator()
        .validate_postal_code_with::<_, &str>(&json!("1234 AB"), &[], &json!({}))
        .unwrap_err();
    assert_eq!(err.to_string(), "Validation rule postal_code_with requires at least 1 parameter.");
}

#[test]
fn non_ascii_digits_are_rejected() {
    let validator = validator();
    assert!(!validator.validate("\u{0661}\u{0662}\u{0663}\u{0664} AB", &["NL"]).unwrap());
    assert!(!validator.validate("\u{0967}\u{0968}\u{0969}\u{096A}\u{096B}", &["DE"]).unwrap());
    assert!(!validator.validate("\u{FF11}\u{FF12}\u{FF13}\u{FF14}\u{FF15}", &["US"]).unwrap());
    assert!(validator.validate("12345", &["US"]).unwrap());
}

#[test]
fn override_with_pcre_flags() {
    let validator = validator();
    validator.override_pattern("NL", Some(r"/\d{4}[a-z]{2}/i")).unwrap();
    assert!(validator.validate("1234AB", &["NL"]).unwrap());
    assert!(!validator.validate("1234 AB", &["NL"]).unwrap());

    assert!(matches!(
        validator.override_pattern("BE", Some(r"/\d{4}")),
        Err(RspostalError::InvalidArgument(_))
    ));
}

#[test]
fn padded_identifiers_are_skipped_in_every_namespace() {
    let mut validator = validator();
    assert!(!validator.validate("33380", &[" FR"]).unwrap());

    validator.use_alpha3();
    assert!(!validator.validate("33380", &[" FRA"]).unwrap());

    validator.use_numeric();
    assert!(!validator.validate("33380", &[" 250"]).unwrap());
}

#[test]
fn repeated_parameters_appear_once_in_messages() {
    assert_eq!(
        validator().replace_postal_code("The :attribute must be a valid :countries postal code (e.g. :examples).", "zip", &["NL", "NL"]),
        "The zip must be a valid NL postal code (e.g. 1234 AB)."
    );
}

#[test]
fn country_names_are_not_identifiers() {
    assert!(!validator().validate("1234 AB", &["Netherlands"]).unwrap());
}

#[test]
fn parameters_are_case_insensitive() {
    let validator = validator();
    assert!(validator.validate("1234 AB", &["nl"]).unwrap());
    assert!(validator.validate("1234 ab", &["NL"]).unwrap());
}

#[test]
fn any_parameter_may_match() {
    let validator = validator();
    assert!(validator.validate("1234 AB", &["BE", "NL"]).unwrap());
    assert!(validator.validate("1234 AB", &["XX", "NL"]).unwrap());
    assert!(!validator.validate("1234 AB", &["BE", "DE"]).unwrap());
}

#[test]
fn integer_values_are_accepted() {
    assert!(validator().validate_postal_code(&json!(10115), &["DE"]).unwrap());
    assert!(!validator().validate_postal_code(&json!(["10115"]), &["DE"]).unwrap());
}

#[test]
fn postal_code_with_reads_other_fields() {
    let validator = validator();

    assert!(validator
        .validate_postal_code_with(&json!("1234 AB"), &["country"], &json!({"country": "NL"}))
        .unwrap());
    assert!(validator
        .validate_postal_code_with(&json!("1234 AB"), &["country"], &json!({"country": "nl"}))
        .unwrap());
    assert!(!validator
        .validate_postal_code_with(&json!("1234 AB"), &["country"], &json!({"country": "DE"}))
        .unwrap());
}

#[test]
fn postal_code_with_fails_when_field_is_unusable() {
    let validator = validator();
    let value = json!("1234 AB");

    assert!(!validator
        .validate_postal_code_with(&value, &["country"], &json!({}))
        .unwrap());
    assert!(!validator
        .validate_postal_code_with(&value, &["country"], &json!({"country": null}))
        .unwrap());
    assert!(!validator
        .validate_postal_code_with(&value, &["country"], &json!({"country": ["NL"]}))
        .unwrap());
}

#[test]
fn postal_code_with_multiple_fields() {
    let validator = validator();
    let data = json!({
        "billing_country": "BE",
        "shipping_country": "NL",
        "empty": "",
        "null": null,
        "countries": ["DE", "NL"]
    });
    let value = json!("1234 AB");

    assert!(validator
        .validate_postal_code_with(&value, &["billing_country", "shipping_country"], &data)
        .unwrap());
    assert!(validator
        .validate_postal_code_with(&value, &["empty", "missing", "null", "shipping_country"], &data)
        .unwrap());
    assert!(validator
        .validate_postal_code_with(&value, &["countries.1"], &data)
        .unwrap());
    assert!(!validator
        .validate_postal_code_with(&value, &["countries.0"], &data)
        .unwrap());
}

#[test]
fn messages_list_recognized_countries_and_examples() {
    let validator = validator();
    let message = "The :attribute must be a valid :countries postal code (e.g. :examples).";

    assert_eq!(
        validator.replace_postal_code(message, "zip", &["NL", "Netherlands", "US"]),
        "The zip must be a valid NL, US postal code (e.g. 1234 AB, 95014)."
    );

    let data = json!({"country": "DE"});
    assert_eq!(
        validator.replace_postal_code_with(message, "zip", &["country", "missing"], &data),
        "The zip must be a valid DE postal code (e.g. 26133)."
    );
}

#[test]
fn engine_passes_and_fails() {
    let engine = MatchEngine::new(
        RuleSetFactory::embedded().build(CodeFormat::Alpha2),
        Arc::new(OverrideStore::new()),
    );

    assert!(engine.passes("NL", &[Some("1234 AB")]));
    assert!(engine.fails("NL", &[Some("1234 AB"), Some("nope")]));
    assert!(engine.fails("XX", &[Some("1234 AB")]));
}

#[test]
fn overrides_are_shared_between_engines() {
    let overrides = Arc::new(OverrideStore::new());
    let factory = RuleSetFactory::embedded();
    let a = MatchEngine::new(factory.build(CodeFormat::Alpha2), overrides.clone());
    let b = MatchEngine::new(factory.build(CodeFormat::Alpha2), overrides.clone());

    overrides
        .add_bulk([("us", Some(r"\d{3}")), ("NL", None)])
        .unwrap();

    assert!(a.passes("US", &[Some("123")]));
    assert!(b.passes("us", &[Some("123")]));
    assert!(b.passes("NL", &[Some("whatever")]));
    assert!(overrides.get("US").unwrap().is_some());
}

#[test]
fn constraint_strings() {
    assert_eq!(Constraint::postal_code_for(["NL", "BE"]).to_string(), "postal_code:NL,BE");
    assert_eq!(
        Constraint::postal_code_with(["billing.country"]).and("shipping.country").to_string(),
        "postal_code_with:billing.country,shipping.country"
    );
}

#[tokio::test]
async fn validator_from_local_rule_file() {
    let path = std::env::temp_dir().join(format!("rspostal_it_{}.mp", std::process::id()));
    let table = RuleLoader::from_json_str(r#"{"XX": {"pattern": "X\\d{2}", "example": "X12"}}"#).unwrap();
    RuleLoader::save_msgpack(&path, &table).await.unwrap();

    let config = ConfigManager::custom().rule_file(path.clone()).build();
    let validator = PostalCodeValidator::from_config(&config).await;
    let _ = tokio::fs::remove_file(&path).await;
    let validator = validator.unwrap();

    assert!(validator.validate("x12", &["xx"]).unwrap());
    assert!(!validator.validate("1234 AB", &["NL"]).unwrap());
    assert_eq!(
        validator.examples(&["XX", "NL"]),
        vec![("XX".to_string(), Some("X12".to_string()))]
    );
}
