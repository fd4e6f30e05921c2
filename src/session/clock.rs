use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Source of "one second elapsed" signals.
pub trait Clock {
    fn subscribe(&mut self) -> SubscriptionId;
    fn cancel(&mut self, id: SubscriptionId);
}

struct LiveTick {
    id: SubscriptionId,
    armed_at: Instant,
    delivered: u64,
}

/// Wall-clock ticker polled by the host loop.
///
/// Holds at most one live subscription; `due` reports how many whole seconds
/// have elapsed since the last poll.
pub struct SecondClock {
    next_id: u64,
    live: Option<LiveTick>,
}

impl SecondClock {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            live: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Seconds to deliver as of `now`; zero without a live subscription.
    pub fn due(&mut self, now: Instant) -> u64 {
        let Some(live) = self.live.as_mut() else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(live.armed_at).as_secs();
        let due = elapsed.saturating_sub(live.delivered);
        live.delivered += due;
        due
    }

    fn subscribe_at(&mut self, now: Instant) -> SubscriptionId {
        if let Some(stale) = self.live.take() {
            tracing::warn!(id = stale.id.0, "replacing live tick subscription");
        }
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.live = Some(LiveTick {
            id,
            armed_at: now,
            delivered: 0,
        });
        id
    }
}

impl Default for SecondClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SecondClock {
    fn subscribe(&mut self) -> SubscriptionId {
        self.subscribe_at(Instant::now())
    }

    fn cancel(&mut self, id: SubscriptionId) {
        if self.live.as_ref().is_some_and(|live| live.id == id) {
            self.live = None;
        }
    }
}

/// Clock driven by hand; records every subscribe and cancel.
#[derive(Debug, Default)]
pub struct ManualClock {
    next_id: u64,
    live: Vec<SubscriptionId>,
    pub subscribe_calls: usize,
    pub cancel_calls: usize,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl Clock for ManualClock {
    fn subscribe(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribe_calls += 1;
        self.live.push(id);
        id
    }

    fn cancel(&mut self, id: SubscriptionId) {
        self.cancel_calls += 1;
        self.live.retain(|&live| live != id);
    }
}
