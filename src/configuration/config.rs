#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

/// Held by tests that read or write the process wide config.
#[cfg(test)]
pub(crate) static TEST_LOCK: Lazy<tokio::sync::Mutex<()>> =
    Lazy::new(|| return tokio::sync::Mutex::new(()));

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiURL,
    BackendHealthCheckTimeout,
    ConfigFile,
    LangTag,
    RequestTimeout,
    StateDir,
    UserID,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    /// Parses a numeric key, falling back to its default when the stored value
    /// isn't a number.
    pub fn get_u64(key: ConfigKey) -> u64 {
        if let Ok(val) = Config::get(key).parse::<u64>() {
            return val;
        }

        return Config::default(key).parse::<u64>().unwrap_or_default();
    }

    pub fn get_i64(key: ConfigKey) -> i64 {
        if let Ok(val) = Config::get(key).parse::<i64>() {
            return val;
        }

        return Config::default(key).parse::<i64>().unwrap_or_default();
    }

    pub fn default(key: ConfigKey) -> String {
        let base_dir = |dir: Option<path::PathBuf>| {
            return dir.unwrap_or_else(env::temp_dir).join("curio");
        };

        #[cfg(not(target_os = "macos"))]
        let config_path = base_dir(dirs::config_dir()).join("config.toml");
        #[cfg(target_os = "macos")]
        let config_path = base_dir(dirs::home_dir().map(|home| return home.join(".config")))
            .join("config.toml");

        let state_dir = base_dir(dirs::data_local_dir());

        let res = match key {
            ConfigKey::ApiURL => "http://localhost:5000".to_string(),
            ConfigKey::BackendHealthCheckTimeout => "1000".to_string(),
            ConfigKey::RequestTimeout => "30000".to_string(),
            ConfigKey::UserID => "1".to_string(),

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
            ConfigKey::StateDir => state_dir.to_string_lossy().to_string(),
            ConfigKey::LangTag => "en".to_string(),
        };

        return res;
    }

    /// Keys that only exist at runtime and are never read from flags or the
    /// config file.
    fn is_internal(key: ConfigKey) -> bool {
        return key == ConfigKey::LangTag || key == ConfigKey::ConfigFile;
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if Config::is_internal(key) {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        Config::validate(&cmd, key, val_str)?;
                        Config::set(key, val_str);
                    } else {
                        bail!(format!(
                            "config.toml has an invalid value for key '{key}': {val}"
                        ));
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        for key in [
            ConfigKey::BackendHealthCheckTimeout,
            ConfigKey::RequestTimeout,
            ConfigKey::UserID,
        ] {
            let val = Config::get(key);
            if val.parse::<i64>().is_err() {
                bail!(format!("'{key}' must be a number, got: {val}"));
            }
        }

        tracing::debug!(
            api_url = Config::get(ConfigKey::ApiURL),
            user_id = Config::get(ConfigKey::UserID),
            request_timeout = Config::get(ConfigKey::RequestTimeout),
            state_dir = Config::get(ConfigKey::StateDir),
            "config"
        );

        return Ok(());
    }

    // Use clap value parsers to do validation.
    fn validate(cmd: &Command, key: ConfigKey, val: &str) -> Result<()> {
        let mut possible_values = vec![];
        if let Some(arg) = cmd
            .get_arguments()
            .find(|e| return e.get_long() == Some(key.to_string().as_str()))
        {
            possible_values = arg
                .get_possible_values()
                .iter()
                .map(|e| return e.get_name().to_string())
                .collect::<Vec<String>>();
        }

        if !possible_values.is_empty() && !possible_values.contains(&val.to_string()) {
            bail!(format!(
                "config.toml has an invalid value for key '{key}': {val}\nPossible values are: {}",
                possible_values.join(", ")
            ));
        }

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if Config::is_internal(key) {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg.get_help()?.to_string();
                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{}\"", val.replace('\\', "\\\\"));
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
