use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use wordrush::config::{Config, CorpusMode};
use wordrush::generator;
use wordrush::generator::corpus::{self, SharedCorpus};
use wordrush::generator::dictionary::Dictionary;
use wordrush::generator::paragraph;
use wordrush::report::reporter::{self, ReportTracker, ThreadedReporter};
use wordrush::report::sink::{HttpSink, LogSink};
use wordrush::report::{ReportStatus, ResultSink};
use wordrush::session::clock::SecondClock;
use wordrush::session::input::KeyInput;
use wordrush::session::pool::{WordPool, WordSupply};
use wordrush::session::runner::SessionRunner;
use wordrush::session::typing::TypingSession;

use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Participant,
    Typing,
    Results,
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub runner: SessionRunner<SecondClock, ThreadedReporter>,
    pub tracker: ReportTracker,
    pub theme: Theme,
    pub label_input: LineInput,
    pub should_quit: bool,
    corpus: Option<SharedCorpus>,
    awaiting_corpus: bool,
}

impl App {
    pub fn new(config: Config, text_file: Option<PathBuf>) -> Result<Self> {
        let theme = Theme::load(&config.theme).unwrap_or_else(|| {
            tracing::warn!(
                theme = %config.theme,
                available = ?Theme::available_themes(),
                "unknown theme, using default"
            );
            Theme::default()
        });

        let (supply, corpus) = build_supply(&config, text_file.as_deref())?;
        let pool = WordPool::new(supply, config.visible_word_count)?;
        let session = TypingSession::new(pool, config.duration_secs, config.policy())
            .with_participant_label(config.normalized_label());

        let (reporter, tracker) = reporter::channel(build_sink(&config));
        let runner = SessionRunner::new(session, SecondClock::new(), reporter);
        let label_input = LineInput::new(config.participant_label.as_deref().unwrap_or(""));

        let mut app = Self {
            screen: AppScreen::Participant,
            config,
            runner,
            tracker,
            theme,
            label_input,
            should_quit: false,
            corpus,
            awaiting_corpus: false,
        };
        if !app.config.ask_participant {
            app.begin_typing()?;
        }
        Ok(app)
    }

    /// Take the label from the prompt and start typing.
    pub fn submit_label(&mut self) -> Result<()> {
        let label = self.label_input.label();
        self.runner.session_mut().set_participant_label(label);
        self.begin_typing()
    }

    pub fn begin_typing(&mut self) -> Result<()> {
        if self.runner.start()? {
            self.awaiting_corpus = self.corpus.as_ref().is_some_and(|c| !c.is_ready());
            self.screen = AppScreen::Typing;
        }
        Ok(())
    }

    /// Start again from the results screen. Ignored unless repeatable.
    pub fn restart(&mut self) -> Result<()> {
        if self.screen == AppScreen::Results && self.config.repeatable {
            self.begin_typing()?;
        }
        Ok(())
    }

    /// Apply a keystroke. Seconds that fell due since the last tick are
    /// delivered first, so a key arriving after the deadline is rejected.
    pub fn type_key(&mut self, key: KeyInput) {
        self.type_key_at(key, Instant::now());
    }

    fn type_key_at(&mut self, key: KeyInput, now: Instant) {
        if self.screen != AppScreen::Typing {
            return;
        }
        self.deliver_due(now);
        self.runner.handle_key(key);
        self.tracker.poll();
        self.sync_screen();
    }

    /// Host tick: deliver whole seconds, pick up a late corpus and report status.
    pub fn on_tick(&mut self, now: Instant) {
        self.deliver_due(now);

        if self.awaiting_corpus && self.corpus.as_ref().is_some_and(SharedCorpus::is_ready) {
            let replaced = self.runner.session_mut().refresh_placeholders();
            tracing::debug!(replaced, "placeholders replaced");
            self.awaiting_corpus = false;
        }

        self.tracker.poll();
        self.sync_screen();
    }

    pub fn report_status(&self) -> &ReportStatus {
        self.tracker.status()
    }

    /// Block until every handed-over result has been submitted or `timeout`
    /// passes.
    pub fn wait_for_reports(&mut self, timeout: Duration) -> &ReportStatus {
        self.tracker.poll();
        if self.tracker.in_flight() > 0 {
            tracing::info!(in_flight = self.tracker.in_flight(), "waiting for result submission");
        }
        self.tracker.wait_settled(timeout)
    }

    fn deliver_due(&mut self, now: Instant) {
        let seconds = self.runner.clock_mut().due(now);
        for _ in 0..seconds {
            self.runner.on_second();
        }
    }

    pub fn mode_name(&self) -> &'static str {
        self.runner.session().pool.supply().as_str()
    }

    fn sync_screen(&mut self) {
        if self.screen == AppScreen::Typing && self.runner.session().is_completed() {
            self.screen = AppScreen::Results;
        }
    }
}

fn build_supply(
    config: &Config,
    text_file: Option<&Path>,
) -> Result<(WordSupply, Option<SharedCorpus>)> {
    match config.corpus_mode {
        CorpusMode::Looping => Ok((
            WordSupply::Looping(paragraph::load_tokens(&config.paragraph)),
            None,
        )),
        CorpusMode::Random => {
            let shared = match &config.word_list_url {
                Some(url) => {
                    let shared = SharedCorpus::loading();
                    corpus::spawn_fetch(url.clone(), shared.clone());
                    shared
                }
                None => SharedCorpus::ready(Dictionary::load().words_list()),
            };
            let supply = WordSupply::Random {
                corpus: shared.clone(),
                rng: SmallRng::from_entropy(),
            };
            Ok((supply, Some(shared)))
        }
        CorpusMode::Finite => {
            let tokens = match text_file {
                Some(path) => generator::load_text_file(path)?,
                None => paragraph::load_tokens(&config.paragraph),
            };
            Ok((WordSupply::Finite(tokens), None))
        }
    }
}

fn build_sink(config: &Config) -> Arc<dyn ResultSink> {
    match &config.result_url {
        Some(url) => match HttpSink::new(url) {
            Ok(sink) => {
                tracing::info!(url = sink.url(), "reporting results over http");
                Arc::new(sink)
            }
            Err(err) => {
                tracing::warn!(error = %err, "http sink unavailable, logging results instead");
                Arc::new(LogSink)
            }
        },
        None => Arc::new(LogSink),
    }
}
