//! Fakes shared by the dispatch service tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::application::ports::outbound::{ClockPort, DispatchObserver, ItemOperation};
use crate::domain::value_objects::{ItemOutcome, ItemState};

/// Clock that records requested delays and returns immediately
#[derive(Default)]
pub struct RecordingClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingClock {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClockPort for RecordingClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Clock whose sleeps never finish
pub struct PendingClock;

#[async_trait]
impl ClockPort for PendingClock {
    async fn sleep(&self, _duration: Duration) {
        std::future::pending::<()>().await
    }
}

/// Operation with per-item scripted failures
///
/// Items succeed unless configured with `failing_first` or `always_failing`.
/// Every call yields to the scheduler once so sibling items interleave.
#[derive(Default)]
pub struct FlakyOperation {
    failures: HashMap<String, u32>,
    panicking: HashSet<String>,
    yields: HashMap<String, usize>,
    cancel_on_failure: Option<CancellationToken>,
    calls: Mutex<Vec<String>>,
    completions: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FlakyOperation {
    pub fn always_ok() -> Self {
        Self::default()
    }

    pub fn failing_first(mut self, item: &str, failures: u32) -> Self {
        self.failures.insert(item.to_string(), failures);
        self
    }

    pub fn always_failing(self, item: &str) -> Self {
        self.failing_first(item, u32::MAX)
    }

    pub fn panicking(mut self, item: &str) -> Self {
        self.panicking.insert(item.to_string());
        self
    }

    /// Yield `count` extra times before completing `item`
    pub fn yielding(mut self, item: &str, count: usize) -> Self {
        self.yields.insert(item.to_string(), count);
        self
    }

    pub fn cancelling_on_failure(mut self, cancel: CancellationToken) -> Self {
        self.cancel_on_failure = Some(cancel);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, item: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == item).count()
    }

    pub fn completions(&self) -> Vec<String> {
        self.completions.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemOperation for FlakyOperation {
    type Error = String;

    async fn apply(&self, item: &str) -> Result<(), Self::Error> {
        let previous_calls = {
            let mut calls = self.calls.lock().unwrap();
            let previous = calls.iter().filter(|c| c.as_str() == item).count();
            calls.push(item.to_string());
            previous as u32
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::task::yield_now().await;
        for _ in 0..self.yields.get(item).copied().unwrap_or(0) {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completions.lock().unwrap().push(item.to_string());

        if self.panicking.contains(item) {
            panic!("malformed request for {item}");
        }

        let failures = self.failures.get(item).copied().unwrap_or(0);
        if previous_calls < failures {
            if let Some(cancel) = &self.cancel_on_failure {
                cancel.cancel();
            }
            return Err("503 Service Unavailable".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    BatchStarted(usize),
    Transition(String, ItemState),
    BatchSettled(usize),
    Finished(usize),
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Observed>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<Observed> {
        self.events.lock().unwrap().clone()
    }

    pub fn transitions_for(&self, item: &str) -> Vec<ItemState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Observed::Transition(i, state) if i == item => Some(state),
                _ => None,
            })
            .collect()
    }
}

impl DispatchObserver for RecordingObserver {
    fn batch_started(&self, batch: usize, _total_batches: usize, _items: &[String]) {
        self.events.lock().unwrap().push(Observed::BatchStarted(batch));
    }

    fn item_transition(&self, item: &str, state: &ItemState, _last_error: Option<&str>) {
        self.events
            .lock()
            .unwrap()
            .push(Observed::Transition(item.to_string(), *state));
    }

    fn batch_settled(&self, batch: usize, _outcomes: &[ItemOutcome]) {
        self.events.lock().unwrap().push(Observed::BatchSettled(batch));
    }

    fn dispatch_finished(&self, outcomes: &[ItemOutcome]) {
        self.events
            .lock()
            .unwrap()
            .push(Observed::Finished(outcomes.len()));
    }
}
