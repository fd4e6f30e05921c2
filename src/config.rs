use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::generator::paragraph::DEFAULT_PARAGRAPH;
use crate::session::pool::LOOKBACK;
use crate::session::typing::CompletionPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CorpusMode {
    /// Loop a bundled paragraph forever.
    Looping,
    /// Draw random words from a word list.
    Random,
    /// Type a fixed text once.
    Finite,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u32,
    #[serde(default = "default_visible_word_count")]
    pub visible_word_count: usize,
    #[serde(default = "default_corpus_mode")]
    pub corpus_mode: CorpusMode,
    #[serde(default = "default_paragraph")]
    pub paragraph: String,
    #[serde(default)]
    pub word_list_url: Option<String>,
    #[serde(default)]
    pub result_url: Option<String>,
    #[serde(default)]
    pub participant_label: Option<String>,
    #[serde(default = "default_ask_participant")]
    pub ask_participant: bool,
    #[serde(default = "default_repeatable")]
    pub repeatable: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_duration_secs() -> u32 {
    60
}
fn default_visible_word_count() -> usize {
    30
}
fn default_corpus_mode() -> CorpusMode {
    CorpusMode::Looping
}
fn default_paragraph() -> String {
    DEFAULT_PARAGRAPH.to_string()
}
fn default_ask_participant() -> bool {
    true
}
fn default_repeatable() -> bool {
    false
}
fn default_theme() -> String {
    "default".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
            visible_word_count: default_visible_word_count(),
            corpus_mode: default_corpus_mode(),
            paragraph: default_paragraph(),
            word_list_url: None,
            result_url: None,
            participant_label: None,
            ask_participant: default_ask_participant(),
            repeatable: default_repeatable(),
            theme: default_theme(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordrush")
            .join("config.toml")
    }

    pub fn policy(&self) -> CompletionPolicy {
        if self.repeatable {
            CompletionPolicy::Repeatable
        } else {
            CompletionPolicy::OneShot
        }
    }

    /// Reject values no session can run with.
    pub fn validate(&self) -> Result<()> {
        if self.duration_secs == 0 {
            bail!("duration_secs must be at least 1");
        }
        if self.visible_word_count <= LOOKBACK {
            bail!(
                "visible_word_count must be greater than {LOOKBACK} (got {})",
                self.visible_word_count
            );
        }
        Ok(())
    }

    /// Reset `paragraph` to the default when it names no bundled paragraph.
    pub fn normalize_paragraph(&mut self, valid_names: &[String]) {
        if !valid_names.iter().any(|n| n == &self.paragraph) {
            self.paragraph = default_paragraph();
        }
    }

    /// Blank labels count as no label.
    pub fn normalized_label(&self) -> Option<String> {
        self.participant_label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
    }
}
