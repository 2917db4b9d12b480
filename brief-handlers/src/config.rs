//! Brief bot settings loaded from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_SESSIONS_FILE: &str = "sessions.json";
pub const DEFAULT_TRIGGER_TOKEN: &str = "/generate";
pub const DEFAULT_TRANSCRIPTION_LANGUAGE: &str = "ru";

#[derive(Debug, Clone, PartialEq)]
pub struct BriefConfig {
    pub sessions_file: PathBuf,
    pub trigger_token: String,
    /// `None` sends the full history; `Some(n)` only the last `n` entries.
    pub history_window: Option<usize>,
    pub transcription_language: String,
}

impl Default for BriefConfig {
    fn default() -> Self {
        Self {
            sessions_file: PathBuf::from(DEFAULT_SESSIONS_FILE),
            trigger_token: DEFAULT_TRIGGER_TOKEN.to_string(),
            history_window: None,
            transcription_language: DEFAULT_TRANSCRIPTION_LANGUAGE.to_string(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl BriefConfig {
    /// Reads `SESSIONS_FILE`, `BRIEF_TRIGGER_TOKEN`, `BRIEF_HISTORY_WINDOW`, `TRANSCRIPTION_LANGUAGE`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let history_window = match non_empty_var("BRIEF_HISTORY_WINDOW") {
            Some(raw) => {
                let n: usize = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid BRIEF_HISTORY_WINDOW: {}", raw))?;
                anyhow::ensure!(n > 0, "BRIEF_HISTORY_WINDOW must be positive");
                Some(n)
            }
            None => None,
        };
        Ok(Self {
            sessions_file: non_empty_var("SESSIONS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.sessions_file),
            trigger_token: non_empty_var("BRIEF_TRIGGER_TOKEN")
                .map(|s| s.trim().to_string())
                .unwrap_or(defaults.trigger_token),
            history_window,
            transcription_language: non_empty_var("TRANSCRIPTION_LANGUAGE")
                .unwrap_or(defaults.transcription_language),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for name in [
            "SESSIONS_FILE",
            "BRIEF_TRIGGER_TOKEN",
            "BRIEF_HISTORY_WINDOW",
            "TRANSCRIPTION_LANGUAGE",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        assert_eq!(BriefConfig::from_env().unwrap(), BriefConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var("SESSIONS_FILE", "data/briefs.json");
        env::set_var("BRIEF_TRIGGER_TOKEN", " ГОТОВО ");
        env::set_var("BRIEF_HISTORY_WINDOW", "20");
        env::set_var("TRANSCRIPTION_LANGUAGE", "en");

        let config = BriefConfig::from_env().unwrap();

        assert_eq!(config.sessions_file, PathBuf::from("data/briefs.json"));
        assert_eq!(config.trigger_token, "ГОТОВО");
        assert_eq!(config.history_window, Some(20));
        assert_eq!(config.transcription_language, "en");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_window() {
        clear_env();
        env::set_var("BRIEF_HISTORY_WINDOW", "zero");
        assert!(BriefConfig::from_env().is_err());
        env::set_var("BRIEF_HISTORY_WINDOW", "0");
        assert!(BriefConfig::from_env().is_err());
        clear_env();
    }
}
