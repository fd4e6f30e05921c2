use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread;

use rand::Rng;

use crate::generator::cache::{DiskCache, fetch_url};
use crate::generator::dictionary::Dictionary;
use crate::generator::is_typable;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorpusState {
    Loading,
    Ready(Vec<String>),
}

/// Word list shared between the session and a background loader.
///
/// Random draw mode reads from it on every new word; the loader swaps in the
/// fetched words once they arrive.
#[derive(Clone, Debug)]
pub struct SharedCorpus {
    inner: Arc<RwLock<CorpusState>>,
}

impl SharedCorpus {
    pub fn loading() -> Self {
        Self {
            inner: Arc::new(RwLock::new(CorpusState::Loading)),
        }
    }

    pub fn ready(words: Vec<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CorpusState::Ready(words))),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CorpusState> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CorpusState> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_ready(&self, words: Vec<String>) {
        *self.write() = CorpusState::Ready(words);
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.read(), CorpusState::Ready(_))
    }

    /// True once loaded with no usable words at all.
    pub fn is_empty_ready(&self) -> bool {
        matches!(&*self.read(), CorpusState::Ready(words) if words.is_empty())
    }

    /// Uniform draw; `None` while loading or when the list is empty.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<String> {
        match &*self.read() {
            CorpusState::Ready(words) if !words.is_empty() => {
                Some(words[rng.gen_range(0..words.len())].clone())
            }
            _ => None,
        }
    }
}

/// Accepts either a JSON array of strings or plain whitespace-separated text.
pub fn parse_word_list(content: &str) -> Vec<String> {
    let raw: Vec<String> = serde_json::from_str(content).unwrap_or_else(|_| {
        content
            .split_whitespace()
            .map(|w| w.to_string())
            .collect()
    });

    raw.into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| w.chars().count() >= 2 && is_typable(w))
        .collect()
}

/// Fill `corpus` from `url` on a background thread.
///
/// A cached copy is used when present. If neither the cache nor the network
/// yields any words, the bundled dictionary is used so the session is never
/// left on placeholders.
pub fn spawn_fetch(url: String, corpus: SharedCorpus) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let cache = DiskCache::new("word_lists");
        let cached = cache.as_ref().and_then(|c| c.get(&url));

        let content = match cached {
            Some(content) => {
                tracing::debug!(%url, "word list served from cache");
                Some(content)
            }
            None => {
                let fetched = fetch_url(&url);
                if let (Some(cache), Some(content)) = (cache.as_ref(), fetched.as_ref()) {
                    cache.put(&url, content);
                }
                fetched
            }
        };

        let words = content.map(|c| parse_word_list(&c)).unwrap_or_default();
        if words.is_empty() {
            tracing::warn!(%url, "word list unavailable, using bundled dictionary");
            corpus.set_ready(Dictionary::load().words_list());
        } else {
            tracing::info!(%url, count = words.len(), "word list loaded");
            corpus.set_ready(words);
        }
    })
}
