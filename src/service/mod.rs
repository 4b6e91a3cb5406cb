//! Request workflows: enrollment, attendance marking and the daily report.

use std::sync::Arc;

use crate::clock::Clock;
use crate::face::encoder::FaceEncoder;
use crate::store::AttendanceStore;

pub mod attendance;
pub mod enrollment;
pub mod report;

pub use attendance::AttendanceOutcome;
pub use enrollment::EnrollOutcome;

/// Dependencies shared by every workflow, injected once at start-up.
#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn AttendanceStore>,
    encoder: Arc<dyn FaceEncoder>,
    clock: Arc<dyn Clock>,
    match_threshold: f64,
}

impl AttendanceService {
    pub fn new(
        store: Arc<dyn AttendanceStore>,
        encoder: Arc<dyn FaceEncoder>,
        clock: Arc<dyn Clock>,
        match_threshold: f64,
    ) -> Self {
        Self {
            store,
            encoder,
            clock,
            match_threshold,
        }
    }
}
