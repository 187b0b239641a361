//! Exposure sink that reports events through the `log` facade.

use keepmedia_core::{ExposureEvent, ExposureLog, ExposureLogError, StationId};

/// Target used for every exposure record, so they can be filtered with
/// `RUST_LOG=keepmedia::exposure=info`.
pub(crate) const EXPOSURE_TARGET: &str = "keepmedia::exposure";

/// `ExposureLog` that writes each event as an `info` record.
///
/// Offline runs have no counters store to append to, so events are only
/// reported. Recording never fails.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LogExposureLog;

impl ExposureLog for LogExposureLog {
    fn record(&self, station: &StationId, event: ExposureEvent) -> Result<(), ExposureLogError> {
        match event {
            ExposureEvent::Impression { slot } => {
                log::info!(
                    target: EXPOSURE_TARGET,
                    "impression station={station} slot={}",
                    slot.as_str()
                );
            }
            ExposureEvent::Click { kind, slot } => {
                log::info!(
                    target: EXPOSURE_TARGET,
                    "click station={station} kind={kind:?} slot={}",
                    slot.as_str()
                );
            }
        }
        Ok(())
    }
}
