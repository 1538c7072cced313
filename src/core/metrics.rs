use tokio::sync::watch;

use crate::core::{
    models::{
        CanonicalResult,
        ConsonantEntry,
    },
    session::SessionState,
};

pub fn consonant_list(result: Option<&CanonicalResult>) -> Vec<ConsonantEntry> {
    result.map(|result| result.consonant_counts.iter().cloned().collect()).unwrap_or_default()
}

pub fn slow_bike_count(result: Option<&CanonicalResult>) -> u64 {
    result.map(|result| result.slow_bike_count).unwrap_or(0)
}

/// Display projections of a session's result, recomputed only when the
/// session publishes a new state.
pub struct MetricsView {
    receiver: watch::Receiver<SessionState>,
    consonants: Vec<ConsonantEntry>,
    slow_bike_count: u64,
}

impl MetricsView {
    pub fn new(mut receiver: watch::Receiver<SessionState>) -> Self {
        let (consonants, slow_bike_count) = {
            let state = receiver.borrow_and_update();
            let result = state.canonical();
            (consonant_list(result), slow_bike_count(result))
        };

        Self { receiver, consonants, slow_bike_count }
    }

    /// Returns true when the projections were recomputed.
    pub fn refresh(&mut self) -> bool {
        if !self.receiver.has_changed().unwrap_or(false) {
            return false;
        }

        let state = self.receiver.borrow_and_update();
        let result = state.canonical();
        self.consonants = consonant_list(result);
        self.slow_bike_count = slow_bike_count(result);
        true
    }

    pub fn consonants(&self) -> &[ConsonantEntry] {
        &self.consonants
    }

    pub fn slow_bike_count(&self) -> u64 {
        self.slow_bike_count
    }
}
