// tests/config_test.rs
use pr_autotag::config::{load_config, Config};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

const INPUT_VARS: [&str; 6] = [
    "INPUT_V_PREFIX",
    "INPUT_CREATE_RELEASE",
    "INPUT_MARK_RELEASE_AS_LATEST",
    "INPUT_GENERATE_RELEASE_NOTES",
    "INPUT_COMMENT_PR",
    "INPUT_DRY_RUN",
];

fn clear_inputs() {
    for name in INPUT_VARS {
        std::env::remove_var(name);
    }
}

#[test]
fn test_default_values() {
    let config = Config::default();
    assert!(config.v_prefix);
    assert!(config.create_release);
    assert!(config.mark_release_as_latest);
    assert!(config.generate_release_notes);
    assert!(config.comment_pr);
    assert!(!config.dry_run);
    assert_eq!(config.conventional_commits.minor_types, vec!["feat"]);
    assert_eq!(config.conventional_commits.patch_types, vec!["fix"]);
    assert_eq!(config.comment.marker, "pr-autotag");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
v_prefix = false
create_release = false

[conventional_commits]
minor_types = ["feat", "feature"]
patch_types = ["fix", "perf", "refactor"]

[comment]
marker = "release-bot"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert!(!config.v_prefix);
    assert!(!config.create_release);
    assert!(config.comment_pr);
    assert!(config
        .conventional_commits
        .minor_types
        .contains(&"feature".to_string()));
    assert_eq!(config.conventional_commits.patch_types.len(), 3);
    assert_eq!(config.comment.marker, "release-bot");
}

#[test]
fn test_invalid_file_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"v_prefix = \"maybe\"").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("Cannot parse"));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let err = load_config(Some("/nonexistent/autotag.toml")).unwrap_err();
    assert!(err.to_string().contains("Cannot read"));
}

#[test]
#[serial]
fn test_env_inputs_override_file() {
    clear_inputs();
    std::env::set_var("INPUT_V_PREFIX", "false");
    std::env::set_var("INPUT_DRY_RUN", "True");
    std::env::set_var("INPUT_COMMENT_PR", "");

    let mut config = Config::default();
    config.apply_env_inputs();
    clear_inputs();

    assert!(!config.v_prefix);
    assert!(config.dry_run);
    assert!(config.comment_pr);
    assert!(config.create_release);
}

#[test]
#[serial]
fn test_non_true_input_disables_flag() {
    clear_inputs();
    std::env::set_var("INPUT_CREATE_RELEASE", "yes");

    let mut config = Config::default();
    config.apply_env_inputs();
    clear_inputs();

    assert!(!config.create_release);
}
