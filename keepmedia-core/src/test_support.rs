//! Test-only collaborators used by unit and behaviour tests across the
//! workspace.

use std::cell::{Cell, RefCell};

use crate::{
    AtRiskCandidate, BroadcastSite, ExposureEvent, ExposureLog, ExposureLogError, RandomSource,
    Station, StationId, StationStore, StoreError,
};

/// In-memory `StationStore` implementation used in tests.
///
/// Filtering is a linear scan and is intended only for small datasets.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    candidates: Vec<AtRiskCandidate>,
    sites: Vec<(Station, BroadcastSite)>,
    unavailable: bool,
}

impl MemoryStore {
    /// Create a store from candidates and sites.
    pub fn new<C, S>(candidates: C, sites: S) -> Self
    where
        C: IntoIterator<Item = AtRiskCandidate>,
        S: IntoIterator<Item = (Station, BroadcastSite)>,
    {
        Self {
            candidates: candidates.into_iter().collect(),
            sites: sites.into_iter().collect(),
            unavailable: false,
        }
    }

    /// Create a store whose every query fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable {
                message: "memory store switched off".to_owned(),
            });
        }
        Ok(())
    }
}

impl StationStore for MemoryStore {
    fn at_risk_pool(&self) -> Result<Vec<AtRiskCandidate>, StoreError> {
        self.check()?;
        Ok(self
            .candidates
            .iter()
            .filter(|candidate| candidate.station.is_at_risk())
            .cloned()
            .collect())
    }

    fn broadcast_sites(&self) -> Result<Vec<(Station, BroadcastSite)>, StoreError> {
        self.check()?;
        Ok(self.sites.clone())
    }
}

/// Deterministic `RandomSource` replaying a fixed sequence of draws.
///
/// The sequence wraps around once exhausted. An empty script yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedDraws {
    /// Replay `draws` in order.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            cursor: 0,
        }
    }
}

impl RandomSource for ScriptedDraws {
    fn next_unit(&mut self) -> f64 {
        if self.cursor >= self.draws.len() {
            self.cursor = 0;
        }
        let draw = self.draws.get(self.cursor).copied().unwrap_or(0.0);
        self.cursor = self.cursor.saturating_add(1);
        draw
    }
}

/// `ExposureLog` that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingExposureLog {
    events: RefCell<Vec<(StationId, ExposureEvent)>>,
    failing: Cell<bool>,
}

impl RecordingExposureLog {
    /// Create a log that rejects every event.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            events: RefCell::default(),
            failing: Cell::new(true),
        }
    }

    /// Return a snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<(StationId, ExposureEvent)> {
        self.events.borrow().clone()
    }
}

impl ExposureLog for RecordingExposureLog {
    fn record(&self, station: &StationId, event: ExposureEvent) -> Result<(), ExposureLogError> {
        if self.failing.get() {
            return Err(ExposureLogError::Rejected {
                station: station.clone(),
                message: "recording disabled".to_owned(),
            });
        }
        self.events.borrow_mut().push((station.clone(), event));
        Ok(())
    }
}
