use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::connection::Connection;

const APP_NAME: &str = "mailseed";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub conn: Connection,
    pub input: PathBuf,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_column")]
    pub column: String,
}

fn default_table() -> String {
    "user_table".to_string()
}

fn default_column() -> String {
    "email".to_string()
}

/// Return the application config directory path, creating it if missing.
pub fn app_config_dir() -> Result<PathBuf> {
    let mut path = if cfg!(target_os = "macos") {
        dirs_next::home_dir().map(|h| h.join(".config"))
    } else {
        dirs_next::config_dir()
    }
    .ok_or_else(|| anyhow::anyhow!("failed to find os config dir."))?;

    path.push(APP_NAME);
    fs::create_dir_all(&path)?;
    Ok(path)
}

impl Config {
    /// Load the config from `path`, or from the default location under the
    /// app config directory when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => app_config_dir()?.join(CONFIG_FILE),
        };
        let data = fs::read(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config: Config = serde_yaml::from_slice(&data)
            .with_context(|| format!("failed to parse YAML at {}", path.display()))?;
        config.input = expand_path(&config.input)
            .ok_or_else(|| anyhow::anyhow!("cannot expand input path"))?;
        Ok(config)
    }
}

/// Expand a leading `~` and `$VAR` / `%VAR%` segments in a path.
pub fn expand_path(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    let mut segments = path.iter();
    if path.starts_with("~") {
        segments.next()?;
        out.push(dirs_next::home_dir()?);
    }
    for segment in segments {
        let segment = segment.to_str()?;
        if cfg!(unix) && segment.starts_with('$') {
            out.push(std::env::var(segment.strip_prefix('$')?).unwrap_or_default());
        } else if cfg!(windows) && segment.starts_with('%') && segment.ends_with('%') {
            let name = segment.strip_prefix('%')?.strip_suffix('%')?;
            out.push(std::env::var(name).unwrap_or_default());
        } else {
            out.push(segment);
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = r#"
conn:
  type: postgres
  user: postgres
  host: localhost
  port: 5432
  password: secret
  database: adv_database
input: emails.txt
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.input, PathBuf::from("emails.txt"));
        assert_eq!(config.table, "user_table");
        assert_eq!(config.column, "email");
        assert_eq!(config.conn.database.as_deref(), Some("adv_database"));
    }

    #[test]
    fn table_and_column_can_be_overridden() {
        let yaml = r#"
conn:
  type: sqlite
  path: dev/sqlite/sample.db
input: emails.txt
table: subscribers
column: address
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.table, "subscribers");
        assert_eq!(config.column, "address");
    }

    #[test]
    fn plain_paths_expand_to_themselves() {
        let p = expand_path(Path::new("dev/sqlite/sample.db")).unwrap();
        assert_eq!(p, PathBuf::from("dev/sqlite/sample.db"));
    }
}
