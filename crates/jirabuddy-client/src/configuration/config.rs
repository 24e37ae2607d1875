#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConfigFile,
    LogLevel,
    RequestTimeout,
    ServerUrl,
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

    pub fn default(key: ConfigKey) -> String {
        let res = match key {
            ConfigKey::LogLevel => "info".to_string(),
            ConfigKey::RequestTimeout => "60000".to_string(),
            ConfigKey::ServerUrl => "http://localhost:8000".to_string(),

            // Special
            ConfigKey::ConfigFile => default_config_path().to_string_lossy().to_string(),
        };

        return res;
    }

    /// Request timeout in milliseconds, as a duration.
    pub fn request_timeout() -> Result<Duration> {
        let raw = Config::get(ConfigKey::RequestTimeout);
        let millis = match raw.parse::<u64>() {
            Ok(millis) => millis,
            Err(_) => bail!("request-timeout must be a whole number of milliseconds, got '{raw}'"),
        };

        return Ok(Duration::from_millis(millis));
    }

    /// Resolves every key: defaults first, then the TOML config file, then
    /// whatever was passed on the command line.
    pub async fn load(cmd: &Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
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

        let config_path = path::PathBuf::from(&config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let possible_values = possible_values(cmd, key);

                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    } else {
                        bail!("config.toml has an unsupported value type for key '{key}'");
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

        Config::request_timeout()?;

        tracing::debug!(
            server_url = Config::get(ConfigKey::ServerUrl),
            request_timeout = Config::get(ConfigKey::RequestTimeout),
            config_file = Config::get(ConfigKey::ConfigFile),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: &Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}

fn possible_values(cmd: &Command, key: ConfigKey) -> Vec<String> {
    let Some(arg) = cmd
        .get_arguments()
        .find(|e| return e.get_long() == Some(key.to_string().as_str()))
    else {
        return vec![];
    };

    return arg
        .get_possible_values()
        .iter()
        .map(|e| return e.get_name().to_string())
        .collect::<Vec<String>>();
}

fn default_config_path() -> path::PathBuf {
    let base = dirs::config_local_dir()
        .or_else(dirs::config_dir)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| path::PathBuf::from("."));

    return base.join("jirabuddy/config.toml");
}
