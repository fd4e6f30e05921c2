use crate::report::ResultReporter;
use crate::session::SessionError;
use crate::session::clock::{Clock, SubscriptionId};
use crate::session::input::KeyInput;
use crate::session::result::ResultSummary;
use crate::session::typing::TypingSession;

/// Ties a session to its clock subscription and result reporter.
///
/// Holds at most one live subscription. It is canceled once when the
/// session completes and once before any restart, and the reporter sees
/// each completed session exactly once.
pub struct SessionRunner<C: Clock, R: ResultReporter> {
    session: TypingSession,
    clock: C,
    reporter: R,
    subscription: Option<SubscriptionId>,
    last_summary: Option<ResultSummary>,
}

impl<C: Clock, R: ResultReporter> SessionRunner<C, R> {
    pub fn new(session: TypingSession, clock: C, reporter: R) -> Self {
        Self {
            session,
            clock,
            reporter,
            subscription: None,
            last_summary: None,
        }
    }

    /// Start or restart the session. Returns `Ok(false)` if the session
    /// refuses to start (completed under the one-shot policy).
    ///
    /// The previous subscription is only replaced once seeding succeeded, so
    /// a failed restart leaves a running session on its clock.
    pub fn start(&mut self) -> Result<bool, SessionError> {
        if !self.session.can_start() {
            return Ok(false);
        }
        self.session.start()?;
        if let Some(id) = self.subscription.take() {
            self.clock.cancel(id);
        }
        self.last_summary = None;
        self.subscription = Some(self.clock.subscribe());
        Ok(true)
    }

    pub fn handle_key(&mut self, key: KeyInput) {
        if let Some(summary) = self.session.handle_key(key) {
            self.complete_with(summary);
        }
    }

    /// Deliver one elapsed second.
    pub fn on_second(&mut self) {
        if self.subscription.is_none() {
            return;
        }
        if let Some(summary) = self.session.on_tick() {
            self.complete_with(summary);
        }
    }

    /// End the session now. Safe to call repeatedly.
    pub fn complete(&mut self) {
        if let Some(summary) = self.session.finish() {
            self.complete_with(summary);
        }
    }

    fn complete_with(&mut self, summary: ResultSummary) {
        if let Some(id) = self.subscription.take() {
            self.clock.cancel(id);
        }
        self.reporter.report(&summary);
        self.last_summary = Some(summary);
    }

    pub fn session(&self) -> &TypingSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TypingSession {
        &mut self.session
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn has_live_subscription(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn last_summary(&self) -> Option<&ResultSummary> {
        self.last_summary.as_ref()
    }
}
