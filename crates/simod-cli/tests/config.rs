use simod_cli::config::{CriteriaConfig, FilterConfig};
use simod_map::SemanticRole;
use simod_model::{ActivityScope, AttributeFilter};

const CONFIG: &str = r#"
[columns]
case_id = ["trace", "case_id"]
time_suffixes = ["_at"]

[criteria]
start = "2024-01-01T00:00:00Z"
exclude_activities = ["Cancel"]
activity_scope = "rows"

[[criteria.attributes]]
column = "priority"
type = "categorical"
allowed = ["high", "medium"]

[[criteria.attributes]]
column = "cost"
type = "numeric"
min = 0.0
max = 250.0
"#;

#[test]
fn parses_columns_and_criteria_tables() {
    let config = FilterConfig::from_toml_str(CONFIG).unwrap();

    assert_eq!(config.criteria.start.as_deref(), Some("2024-01-01T00:00:00Z"));
    assert_eq!(config.criteria.exclude_activities, ["Cancel"]);
    assert_eq!(config.criteria.activity_scope, Some(ActivityScope::Rows));
    assert_eq!(
        config.criteria.attributes,
        vec![
            AttributeFilter::categorical("priority", ["high", "medium"]),
            AttributeFilter::numeric("cost", 0.0, 250.0),
        ]
    );

    let mapper = config.columns.mapper();
    assert_eq!(mapper.variants(SemanticRole::CaseId), ["trace", "case_id"]);
    assert_eq!(mapper.variants(SemanticRole::Activity)[0], "activity");
}

#[test]
fn unknown_keys_are_rejected() {
    let err = FilterConfig::from_toml_str("[criteria]\nstart_date = \"2024-01-01\"\n").unwrap_err();
    assert!(format!("{err:#}").contains("start_date"));
}

#[test]
fn empty_file_is_the_default_config() {
    assert_eq!(FilterConfig::from_toml_str("").unwrap(), FilterConfig::default());
}

#[test]
fn flags_override_file_values() {
    let file = FilterConfig::from_toml_str(CONFIG).unwrap().criteria;
    let flags = CriteriaConfig {
        end: Some("2024-02-01".to_string()),
        exclude_activities: vec!["Reject".to_string()],
        attributes: vec![AttributeFilter::categorical("priority", ["low"])],
        ..CriteriaConfig::default()
    };

    let merged = file.merge(flags);

    assert_eq!(merged.start.as_deref(), Some("2024-01-01T00:00:00Z"));
    assert_eq!(merged.end.as_deref(), Some("2024-02-01"));
    assert_eq!(merged.exclude_activities, ["Reject"]);
    assert_eq!(merged.activity_scope, Some(ActivityScope::Rows));
    assert_eq!(merged.attributes[0], AttributeFilter::categorical("priority", ["low"]));
    assert_eq!(merged.attributes.len(), 2);
}
