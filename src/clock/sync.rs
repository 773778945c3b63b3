//! The clock sync loop: periodically asks a [`SyncProvider`] for the
//! current time, backing off exponentially (capped at the nominal sync
//! period) on repeated failure, and driving an anti-wrap heartbeat between
//! syncs. See DESIGN.md for a note on one source-ambiguity resolution
//! around the backoff gate expression.
//!
//! Two sanctioned request shapes share the same backoff/timeout bookkeeping
//! (spec §5): [`tick`](SyncLoop::tick) drives the blocking "loop mode"
//! (`SyncProvider::get_now`, timed from just outside the call); the
//! [`send_request`](SyncLoop::send_request)/[`poll_cooperative`](SyncLoop::poll_cooperative)
//! pair drives the non-blocking coroutine mode
//! (`send_request`/`is_response_ready`/`read_response`), timed from the
//! moment the request was sent. Either path treats exceeding
//! `request_timeout_millis` as a sync failure (spec §7: `SyncFailure` from
//! "exceeded timeout"), absorbed into the same backoff schedule as a `0`
//! response.
use crate::clock::provider::{MillisSource, SyncProvider};
use crate::clock::system_clock::SystemClock;

pub struct SyncLoop<M: MillisSource, P: SyncProvider> {
    provider: P,
    sync_period_seconds: u32,
    initial_sync_period_seconds: u32,
    request_timeout_millis: u32,
    heartbeat_period_millis: u32,
    current_sync_period_seconds: u32,
    last_sync_millis: u32,
    last_heartbeat_millis: u32,
    /// Set while a cooperative request is outstanding, to the `millis()`
    /// reading at the moment it was sent.
    pending_request_millis: Option<u32>,
    _marker: std::marker::PhantomData<M>,
}

impl<M: MillisSource, P: SyncProvider> SyncLoop<M, P> {
    pub fn new(
        provider: P,
        sync_period_seconds: u32,
        initial_sync_period_seconds: u32,
        heartbeat_period_millis: u32,
        request_timeout_millis: u32,
    ) -> Self {
        Self {
            provider,
            sync_period_seconds,
            initial_sync_period_seconds,
            request_timeout_millis,
            heartbeat_period_millis,
            current_sync_period_seconds: initial_sync_period_seconds,
            last_sync_millis: 0,
            last_heartbeat_millis: 0,
            pending_request_millis: None,
            _marker: std::marker::PhantomData,
        }
    }

    /// One iteration of the sync loop: call this periodically from the
    /// host's own tick. Drives both the sync schedule and the anti-wrap
    /// heartbeat, using the blocking `SyncProvider::get_now` call (spec
    /// §5's "loop mode"). The call is timed against `request_timeout_millis`;
    /// a response that arrives late is treated the same as a failed one.
    pub fn tick(&mut self, clock: &mut SystemClock<M>) {
        let now_millis = clock.millis_now();

        if now_millis.wrapping_sub(self.last_heartbeat_millis) >= self.heartbeat_period_millis {
            let _ = clock.get_now();
            self.last_heartbeat_millis = now_millis;
        }

        let time_since_last_sync = now_millis.wrapping_sub(self.last_sync_millis);
        let due = time_since_last_sync >= self.current_sync_period_seconds.saturating_mul(1000) || !clock.is_initialized();
        if !due {
            return;
        }

        let call_started_millis = clock.millis_now();
        let synced = self.provider.get_now();
        let elapsed_millis = clock.millis_now().wrapping_sub(call_started_millis);
        self.finish_sync(clock, synced, elapsed_millis, now_millis);
    }

    /// Begin a non-blocking cooperative sync request (spec §5's
    /// "cooperative coroutine mode"): call once, then poll with
    /// [`poll_cooperative`](Self::poll_cooperative) from the host's yield
    /// loop until it returns `Some`.
    pub fn send_request(&mut self, clock: &SystemClock<M>) {
        self.provider.send_request();
        self.pending_request_millis = Some(clock.millis_now());
    }

    /// Poll a request started with [`send_request`](Self::send_request).
    /// Returns `None` while the caller should keep yielding and polling
    /// again later; `Some(true)` once the sync committed; `Some(false)` if
    /// the response timed out or reported failure (backoff has already
    /// been applied in both terminal cases). Cancellation is observational
    /// (spec §5): a caller that simply stops calling this leaves the
    /// pending request to be discarded at the next call, or at the next
    /// `send_request`.
    pub fn poll_cooperative(&mut self, clock: &mut SystemClock<M>) -> Option<bool> {
        let sent_at = self.pending_request_millis?;
        let now_millis = clock.millis_now();
        let elapsed = now_millis.wrapping_sub(sent_at);

        if !self.provider.is_response_ready() {
            if elapsed < self.request_timeout_millis {
                return None;
            }
            tracing::debug!(elapsed_ms = elapsed, limit_ms = self.request_timeout_millis, "cooperative sync request timed out");
            self.pending_request_millis = None;
            self.finish_sync(clock, 0, elapsed, now_millis);
            return Some(false);
        }

        let synced = self.provider.read_response();
        self.pending_request_millis = None;
        let success = synced != 0 && elapsed <= self.request_timeout_millis;
        self.finish_sync(clock, if success { synced } else { 0 }, elapsed, now_millis);
        Some(success)
    }

    /// Shared terminal handling for both request shapes: apply backoff on
    /// failure or timeout, commit the synced value and reset the period on
    /// success.
    fn finish_sync(&mut self, clock: &mut SystemClock<M>, synced: u32, elapsed_millis: u32, now_millis: u32) {
        let timed_out = elapsed_millis > self.request_timeout_millis;
        if timed_out {
            tracing::debug!(elapsed_ms = elapsed_millis, limit_ms = self.request_timeout_millis, "clock sync request exceeded timeout");
        }
        if synced == 0 || timed_out {
            tracing::debug!(retry_in_s = self.next_backoff(), "clock sync failed, backing off");
            self.current_sync_period_seconds = self.next_backoff();
        } else {
            tracing::info!(epoch_seconds = synced, "clock synced");
            clock.sync(synced);
            self.current_sync_period_seconds = self.sync_period_seconds;
        }
        self.last_sync_millis = now_millis;
    }

    fn next_backoff(&self) -> u32 {
        if self.current_sync_period_seconds >= self.sync_period_seconds / 2 {
            self.sync_period_seconds
        } else {
            self.current_sync_period_seconds * 2
        }
    }

    pub fn seconds_since_last_sync(&self, clock: &SystemClock<M>) -> u32 {
        clock.millis_now().wrapping_sub(self.last_sync_millis) / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct FakeMillis(Rc<Cell<u32>>);
    impl MillisSource for FakeMillis {
        fn millis(&self) -> u32 {
            self.0.get()
        }
    }

    struct ScriptedProvider {
        responses: RefCell<std::vec::IntoIter<u32>>,
    }
    impl ScriptedProvider {
        fn new(responses: Vec<u32>) -> Self {
            Self { responses: RefCell::new(responses.into_iter()) }
        }
    }
    impl SyncProvider for ScriptedProvider {
        fn get_now(&mut self) -> u32 {
            self.responses.borrow_mut().next().unwrap_or(0)
        }
    }

    #[test]
    fn successful_sync_then_elapsed_seconds_advance_get_now() {
        let time = Rc::new(Cell::new(1_000));
        let mut clock = SystemClock::new(FakeMillis(time.clone()), None);
        let mut loop_ = SyncLoop::new(ScriptedProvider::new(vec![5_000]), 3600, 5, 5_000, 1_000);

        loop_.tick(&mut clock); // t=1s (scaled below), forces first sync since uninitialized
        assert_eq!(clock.get_now(), 5_000);

        time.set(10_000); // +9s of fake millis
        assert_eq!(clock.get_now(), 5_009);
    }

    /// A provider that reports success but takes longer than
    /// `request_timeout_millis` to do so, by advancing the shared fake
    /// clock from inside `get_now`.
    struct SlowProvider {
        time: Rc<Cell<u32>>,
        advance_by: u32,
        response: u32,
    }
    impl SyncProvider for SlowProvider {
        fn get_now(&mut self) -> u32 {
            self.time.set(self.time.get() + self.advance_by);
            self.response
        }
    }

    #[test]
    fn a_blocking_call_that_exceeds_the_timeout_is_treated_as_a_failure() {
        let time = Rc::new(Cell::new(0));
        let mut clock = SystemClock::new(FakeMillis(time.clone()), None);
        let mut loop_ = SyncLoop::new(SlowProvider { time: time.clone(), advance_by: 2_000, response: 42 }, 3600, 5, 5_000, 1_000);

        loop_.tick(&mut clock);
        // The provider answered with a nonzero value, but took 2s against a
        // 1s budget, so the sync must still count as a failure.
        assert_eq!(loop_.current_sync_period_seconds, 10);
        assert!(!clock.is_initialized());
    }

    /// A cooperative provider whose response only becomes ready after the
    /// test flips a flag, to exercise `send_request`/`poll_cooperative`.
    struct CooperativeProvider {
        ready: Rc<Cell<bool>>,
        response: u32,
    }
    impl SyncProvider for CooperativeProvider {
        fn get_now(&mut self) -> u32 {
            self.response
        }
        fn is_response_ready(&self) -> bool {
            self.ready.get()
        }
        fn read_response(&mut self) -> u32 {
            self.response
        }
    }

    #[test]
    fn cooperative_poll_returns_none_until_ready_then_commits() {
        let time = Rc::new(Cell::new(0));
        let ready = Rc::new(Cell::new(false));
        let mut clock = SystemClock::new(FakeMillis(time.clone()), None);
        let mut loop_ = SyncLoop::new(CooperativeProvider { ready: ready.clone(), response: 9_000 }, 3600, 5, 5_000, 1_000);

        loop_.send_request(&clock);
        assert_eq!(loop_.poll_cooperative(&mut clock), None);

        time.set(500);
        ready.set(true);
        assert_eq!(loop_.poll_cooperative(&mut clock), Some(true));
        assert_eq!(clock.get_now(), 9_000);
    }

    #[test]
    fn cooperative_poll_times_out_if_never_ready_within_the_budget() {
        let time = Rc::new(Cell::new(0));
        let ready = Rc::new(Cell::new(false));
        let mut clock = SystemClock::new(FakeMillis(time.clone()), None);
        let mut loop_ = SyncLoop::new(CooperativeProvider { ready: ready.clone(), response: 9_000 }, 3600, 5, 5_000, 1_000);

        loop_.send_request(&clock);
        time.set(1_500);
        assert_eq!(loop_.poll_cooperative(&mut clock), Some(false));
        assert_eq!(loop_.current_sync_period_seconds, 10);
    }

    #[test]
    fn repeated_failures_double_the_backoff_up_to_the_cap() {
        crate::testing::init_test_logging();
        let time = Rc::new(Cell::new(0));
        let mut clock = SystemClock::new(FakeMillis(time.clone()), None);
        let mut loop_ = SyncLoop::new(ScriptedProvider::new(vec![0, 0, 0]), 3600, 5, 5_000, 1_000);

        loop_.tick(&mut clock);
        assert_eq!(loop_.current_sync_period_seconds, 10);
        time.set(time.get() + 10_000);
        loop_.tick(&mut clock);
        assert_eq!(loop_.current_sync_period_seconds, 20);
        time.set(time.get() + 20_000);
        loop_.tick(&mut clock);
        assert_eq!(loop_.current_sync_period_seconds, 40);
    }
}
