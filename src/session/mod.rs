pub mod clock;
pub mod highlight;
pub mod input;
pub mod pool;
pub mod result;
pub mod runner;
pub mod score;
pub mod typing;
pub mod word;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("word corpus is empty")]
    EmptyCorpus,
    #[error("visible word count {visible} must exceed the lookback of {lookback}")]
    WindowTooSmall { visible: usize, lookback: usize },
}
