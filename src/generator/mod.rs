pub mod cache;
pub mod corpus;
pub mod dictionary;
pub mod paragraph;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} contains no typable words")]
    NoWords(PathBuf),
}

/// Split text into words on any run of whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(|w| w.to_string()).collect()
}

/// Whether every character of `word` can be produced by a letter keystroke.
pub fn is_typable(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// Reduce free text to words made of ASCII letters only.
///
/// Punctuation and digits are dropped from each token; tokens left empty are
/// skipped.
pub fn typable_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.chars().filter(char::is_ascii_alphabetic).collect::<String>())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Words of a user-supplied text file.
pub fn load_text_file(path: &Path) -> Result<Vec<String>, CorpusError> {
    let content = fs::read_to_string(path).map_err(|source| CorpusError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let words = typable_tokens(&content);
    if words.is_empty() {
        return Err(CorpusError::NoWords(path.to_path_buf()));
    }
    tracing::info!(path = %path.display(), count = words.len(), "text file loaded");
    Ok(words)
}
