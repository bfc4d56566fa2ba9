#[cfg(test)]
#[path = "language_test.rs"]
mod tests;

use std::str::FromStr;

use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Language;
use crate::infrastructure::storage::Preferences;

pub const LANGUAGE_KEY: &str = "language";

/// Active display language, remembered between runs.
pub struct LanguageStore {
    language: Language,
    preferences: Preferences,
    subscribers: Vec<mpsc::UnboundedSender<Language>>,
}

impl LanguageStore {
    /// Restores the stored preference when it names a known language,
    /// otherwise starts in English.
    pub async fn load(preferences: Preferences) -> LanguageStore {
        let language = match preferences.get(LANGUAGE_KEY).await {
            Ok(Some(stored)) => Language::from_str(&stored).unwrap_or_else(|_| {
                tracing::warn!(stored, "Ignoring unknown stored language");
                return Language::default();
            }),
            Ok(None) => Language::default(),
            Err(err) => {
                tracing::error!(error = ?err, "Failed to read language preference");
                Language::default()
            }
        };

        Config::set(ConfigKey::LangTag, language.tag());

        return LanguageStore {
            language,
            preferences,
            subscribers: vec![],
        };
    }

    pub fn language(&self) -> Language {
        return self.language;
    }

    pub fn translate<'a>(&self, english: &'a str, bengali: &'a str) -> &'a str {
        if self.language == Language::English {
            return english;
        }

        return bengali;
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Language> {
        let (tx, rx) = mpsc::unbounded_channel::<Language>();
        self.subscribers.push(tx);
        return rx;
    }

    /// Switches to the other language. The switch always happens in memory;
    /// failing to persist it is only logged.
    pub async fn toggle(&mut self) -> Language {
        self.language = self.language.toggled();
        Config::set(ConfigKey::LangTag, self.language.tag());

        if let Err(err) = self
            .preferences
            .set(LANGUAGE_KEY, &self.language.to_string())
            .await
        {
            tracing::error!(error = ?err, "Failed to save language preference");
        }

        let language = self.language;
        self.subscribers
            .retain(|subscriber| return subscriber.send(language).is_ok());

        return language;
    }
}
