use moodline_config::MoodlineConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

const MINIMAL_YAML: &str = r#"
twitter:
  bearer_token: "file-token"
accounts: [BBCWorld, nytimes, Reuters]
"#;

#[test]
#[serial]
fn loads_typed_config_with_defaults() {
    let config = MoodlineConfigLoader::new()
        .with_yaml_str(MINIMAL_YAML)
        .load()
        .expect("load config");

    assert_eq!(config.twitter.bearer_token, "file-token");
    assert_eq!(config.accounts.len(), 3);
    assert_eq!(config.cycles, 1);
    assert_eq!(config.page_size, 10);
    assert!(config.version.is_none());
}

#[test]
#[serial]
fn missing_bearer_token_fails_to_load() {
    let result = MoodlineConfigLoader::new()
        .with_yaml_str("accounts: [BBCWorld]")
        .load();
    assert!(result.is_err());
}

#[test]
#[serial]
fn environment_overrides_the_file() {
    temp_env::with_var("MOODLINE_TWITTER__BEARER_TOKEN", Some("env-token"), || {
        let config = MoodlineConfigLoader::new()
            .with_yaml_str(MINIMAL_YAML)
            .load()
            .expect("load config");
        assert_eq!(config.twitter.bearer_token, "env-token");
    });
}

#[test]
#[serial]
fn placeholders_expand_from_the_environment() {
    temp_env::with_var("TW_BEARER", Some("injected"), || {
        let config = MoodlineConfigLoader::new()
            .with_yaml_str(
                r#"
twitter:
  bearer_token: "${TW_BEARER}"
accounts: [BBCWorld]
cycles: 3
"#,
            )
            .load()
            .expect("load config");

        assert_eq!(config.twitter.bearer_token, "injected");
        assert_eq!(config.cycles, 3);
    });
}

#[test]
#[serial]
fn loads_from_a_yaml_file_on_disk() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "moodline.yaml", MINIMAL_YAML);

    let config = MoodlineConfigLoader::new()
        .with_file(p)
        .load()
        .expect("load config");

    assert_eq!(config.accounts, vec!["BBCWorld", "nytimes", "Reuters"]);
}

#[test]
#[serial]
fn later_snippets_override_earlier_ones() {
    let config = MoodlineConfigLoader::new()
        .with_yaml_str(MINIMAL_YAML)
        .with_yaml_str("cycles: 7\npage_size: 25")
        .load()
        .expect("load config");

    assert_eq!(config.cycles, 7);
    assert_eq!(config.page_size, 25);
}

#[test]
#[serial]
fn missing_file_is_an_error() {
    let result = MoodlineConfigLoader::new()
        .with_file("/definitely/not/here/moodline.yaml")
        .load();
    assert!(result.is_err());
}
