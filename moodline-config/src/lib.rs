//! Loader for moodline configuration with YAML + environment overlays.
//!
//! Precedence, lowest to highest: attached files and YAML snippets in the
//! order added, then `MOODLINE_`-prefixed environment variables. `${VAR}`
//! placeholders in string values expand after the sources merge.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

fn default_cycles() -> u32 {
    1
}
fn default_page_size() -> u32 {
    10
}

/// Top-level schema of `moodline.yaml`.
#[derive(Debug, Deserialize)]
pub struct MoodlineConfig {
    pub version: Option<String>,
    pub twitter: TwitterAuth,

    /// Accounts to tabulate, in output order.
    #[serde(default)]
    pub accounts: Vec<String>,

    /// Timeline pages pulled per account.
    #[serde(default = "default_cycles")]
    pub cycles: u32,

    /// Posts requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Deserialize)]
pub struct TwitterAuth {
    /// App-only bearer token. Usually injected as
    /// `MOODLINE_TWITTER__BEARER_TOKEN` or via `${VAR}` expansion rather
    /// than written into the file.
    pub bearer_token: String,
}

// Values sourced from the environment arrive as strings, so expansion runs
// after the merge and can therefore see every source.
fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct MoodlineConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for MoodlineConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodlineConfigLoader {
    /// ```
    /// use moodline_config::MoodlineConfigLoader;
    ///
    /// let config = MoodlineConfigLoader::new()
    ///     .with_yaml_str("twitter:\n  bearer_token: \"token\"\naccounts: [BBCWorld, nytimes]")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.accounts, vec!["BBCWorld", "nytimes"]);
    /// assert_eq!(config.cycles, 1);
    /// assert_eq!(config.page_size, 10);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a config file; the `config` crate infers format by suffix.
    /// The file must exist, so callers with optional files check first.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Merge an inline YAML snippet. Later snippets override earlier ones.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Merge all sources and deserialize into the typed config.
    ///
    /// The environment source attaches here, after every file source, so
    /// `MOODLINE_`-prefixed variables always win.
    ///
    /// ```
    /// use moodline_config::MoodlineConfigLoader;
    ///
    /// unsafe { std::env::set_var("TW_BEARER", "injected-from-env"); }
    ///
    /// let config = MoodlineConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// twitter:
    ///   bearer_token: "${TW_BEARER}"
    /// accounts: [BBCWorld]
    /// cycles: 3
    /// "#,
    ///     )
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.twitter.bearer_token, "injected-from-env");
    /// assert_eq!(config.cycles, 3);
    ///
    /// unsafe { std::env::remove_var("TW_BEARER"); }
    /// ```
    pub fn load(self) -> Result<MoodlineConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(Environment::with_prefix("MOODLINE").separator("__"))
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: MoodlineConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
