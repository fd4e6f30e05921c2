use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::report::{ReportStatus, ResultReporter, ResultSink};
use crate::session::result::ResultSummary;

/// Runs each submission on its own thread and publishes the outcome on a
/// status channel. The caller never blocks on the sink.
pub struct ThreadedReporter {
    sink: Arc<dyn ResultSink>,
    status_tx: Sender<ReportStatus>,
    in_flight: Arc<AtomicUsize>,
}

/// Receiving end of a [`ThreadedReporter`]'s status channel.
///
/// The in-flight count is raised before `report` returns and lowered only
/// after the worker has sent its final status.
pub struct ReportTracker {
    rx: Receiver<ReportStatus>,
    status: ReportStatus,
    in_flight: Arc<AtomicUsize>,
}

const WAIT_SLICE: Duration = Duration::from_millis(50);

/// Build a reporter around `sink` together with the tracker observing it.
pub fn channel(sink: Arc<dyn ResultSink>) -> (ThreadedReporter, ReportTracker) {
    let (status_tx, rx) = mpsc::channel();
    let in_flight = Arc::new(AtomicUsize::new(0));
    (
        ThreadedReporter {
            sink,
            status_tx,
            in_flight: Arc::clone(&in_flight),
        },
        ReportTracker {
            rx,
            status: ReportStatus::Idle,
            in_flight,
        },
    )
}

impl ResultReporter for ThreadedReporter {
    fn report(&mut self, summary: &ResultSummary) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _ = self.status_tx.send(ReportStatus::Pending);

        let sink = Arc::clone(&self.sink);
        let tx = self.status_tx.clone();
        let in_flight = Arc::clone(&self.in_flight);
        let summary = summary.clone();
        thread::spawn(move || {
            let status = match sink.submit(&summary) {
                Ok(()) => {
                    tracing::info!(wpm = summary.wpm, "result submitted");
                    ReportStatus::Success
                }
                Err(err) => {
                    tracing::warn!(error = %err, "result submission failed");
                    ReportStatus::Failed(err.to_string())
                }
            };
            let _ = tx.send(status);
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }
}

impl ReportTracker {
    /// Drain pending updates. Returns true if the status changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(status) = self.rx.try_recv() {
            changed |= status != self.status;
            self.status = status;
        }
        changed
    }

    pub fn status(&self) -> &ReportStatus {
        &self.status
    }

    /// Submissions handed to the reporter whose worker has not finished.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Block until no submission is in flight or `timeout` passes, then
    /// return the latest status.
    pub fn wait_settled(&mut self, timeout: Duration) -> &ReportStatus {
        let deadline = Instant::now() + timeout;
        while self.in_flight() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.rx.recv_timeout(remaining.min(WAIT_SLICE)) {
                Ok(status) => self.status = status,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.poll();
        &self.status
    }
}

/// Keeps every reported summary in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub reports: Vec<ResultSummary>,
}

impl ResultReporter for RecordingReporter {
    fn report(&mut self, summary: &ResultSummary) {
        self.reports.push(summary.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::report::ReportError;

    struct FailingSink;

    impl ResultSink for FailingSink {
        fn submit(&self, _summary: &ResultSummary) -> Result<(), ReportError> {
            Err(ReportError::Status(503))
        }
    }

    struct OkSink;

    impl ResultSink for OkSink {
        fn submit(&self, _summary: &ResultSummary) -> Result<(), ReportError> {
            Ok(())
        }
    }

    /// Blocks in `submit` until the test lets it go.
    struct GatedSink {
        release: Mutex<Receiver<()>>,
    }

    impl ResultSink for GatedSink {
        fn submit(&self, _summary: &ResultSummary) -> Result<(), ReportError> {
            let release = self.release.lock().unwrap();
            let _ = release.recv_timeout(Duration::from_secs(5));
            Ok(())
        }
    }

    fn gated() -> (Arc<GatedSink>, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        (
            Arc::new(GatedSink {
                release: Mutex::new(rx),
            }),
            tx,
        )
    }

    fn summary() -> ResultSummary {
        ResultSummary {
            participant_label: None,
            wpm: 30,
            accuracy: 90,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn tracker_starts_idle() {
        let (_reporter, mut tracker) = channel(Arc::new(OkSink));
        assert!(!tracker.poll());
        assert_eq!(tracker.status(), &ReportStatus::Idle);
    }

    #[test]
    fn successful_submission_settles_on_success() {
        let (mut reporter, mut tracker) = channel(Arc::new(OkSink));
        reporter.report(&summary());
        assert_eq!(
            tracker.wait_settled(Duration::from_secs(5)),
            &ReportStatus::Success
        );
    }

    #[test]
    fn failed_submission_is_observable() {
        let (mut reporter, mut tracker) = channel(Arc::new(FailingSink));
        reporter.report(&summary());
        let status = tracker.wait_settled(Duration::from_secs(5)).clone();
        assert!(matches!(status, ReportStatus::Failed(ref msg) if msg.contains("503")));
        assert_eq!(status.label(), "failed");
    }

    #[test]
    fn report_is_pending_as_soon_as_it_is_handed_over() {
        let (sink, release) = gated();
        let (mut reporter, mut tracker) = channel(sink);
        reporter.report(&summary());

        assert_eq!(tracker.in_flight(), 1);
        assert!(tracker.poll());
        assert_eq!(tracker.status(), &ReportStatus::Pending);

        release.send(()).unwrap();
        assert_eq!(
            tracker.wait_settled(Duration::from_secs(5)),
            &ReportStatus::Success
        );
        assert_eq!(tracker.in_flight(), 0);
    }

    #[test]
    fn wait_covers_a_new_report_after_an_earlier_success() {
        let (mut reporter, mut tracker) = channel(Arc::new(OkSink));
        reporter.report(&summary());
        tracker.wait_settled(Duration::from_secs(5));

        let (sink, release) = gated();
        reporter.sink = sink as Arc<dyn ResultSink>;
        reporter.report(&summary());
        let waiter = thread::spawn(move || {
            thread::sleep(Duration::from_millis(150));
            release.send(()).unwrap();
        });

        assert_eq!(
            tracker.wait_settled(Duration::from_secs(5)),
            &ReportStatus::Success
        );
        assert_eq!(tracker.in_flight(), 0);
        waiter.join().unwrap();
    }

    #[test]
    fn recording_reporter_keeps_summaries() {
        let mut reporter = RecordingReporter::default();
        reporter.report(&summary());
        assert_eq!(reporter.reports.len(), 1);
    }
}
