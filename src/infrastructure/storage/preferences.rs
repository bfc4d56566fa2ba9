#[cfg(test)]
#[path = "preferences_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// Small string key-value store persisted as YAML in the state directory.
pub struct Preferences {
    pub state_dir: path::PathBuf,
}

impl Default for Preferences {
    fn default() -> Preferences {
        return Preferences::new(path::PathBuf::from(Config::get(ConfigKey::StateDir)));
    }
}

impl Preferences {
    pub fn new(state_dir: path::PathBuf) -> Preferences {
        return Preferences { state_dir };
    }

    pub fn file_path(&self) -> path::PathBuf {
        return self.state_dir.join("preferences.yaml");
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let file_path = self.file_path();
        if !file_path.exists() {
            return Ok(BTreeMap::new());
        }

        let payload = fs::read_to_string(file_path).await?;
        if payload.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let values: BTreeMap<String, String> = serde_yaml::from_str(&payload)?;
        return Ok(values);
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut values = self.read_all().await?;
        return Ok(values.remove(key));
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value.to_string());

        let payload = serde_yaml::to_string(&values)?;

        if !self.state_dir.exists() {
            fs::create_dir_all(&self.state_dir).await?;
        }

        let mut file = fs::File::create(self.file_path()).await?;
        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;

        return Ok(());
    }
}
