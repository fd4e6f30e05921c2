//! Timed typing-test engine: word supply, keystroke state machine, scoring
//! and result reporting. The terminal front end lives in the binary target.

pub mod config;
pub mod generator;
pub mod report;
pub mod session;
