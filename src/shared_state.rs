use std::sync::Arc;
use std::time::Instant;

use crate::models::sizing::SizingDefaults;

/// Read-only state shared by the HTTP handlers. The calculators themselves
/// hold no state; this only carries presentation defaults and uptime.
#[derive(Clone, Debug)]
pub struct AppState {
    pub defaults: Arc<SizingDefaults>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(defaults: SizingDefaults) -> Self {
        Self {
            defaults: Arc::new(defaults),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
