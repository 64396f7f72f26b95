use crate::models::{ChangePointResult, EventRecord, PricePoint};

/// Everything the service answers queries from.
///
/// Built once at startup and never mutated afterwards; share it behind an
/// `Arc` and read it from any number of handlers without locking.
#[derive(Debug, Clone)]
pub struct Dataset {
    prices: Vec<PricePoint>,
    events: Vec<EventRecord>,
    change_points: ChangePointResult,
}

impl Dataset {
    /// `prices` must already be derived (sorted ascending by date).
    pub fn new(
        prices: Vec<PricePoint>,
        events: Vec<EventRecord>,
        change_points: ChangePointResult,
    ) -> Self {
        Self {
            prices,
            events,
            change_points,
        }
    }

    pub fn prices(&self) -> &[PricePoint] {
        &self.prices
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn change_points(&self) -> &ChangePointResult {
        &self.change_points
    }
}
