//! Health check use case.

use std::sync::Arc;

use ugclab_shared::HealthResponse;

use crate::infrastructure::ports::{ClockPort, ParticipantStore, StoreError};

/// Liveness plus the number of participants recorded so far.
pub struct CheckHealth {
    store: Arc<dyn ParticipantStore>,
    clock: Arc<dyn ClockPort>,
}

impl CheckHealth {
    pub fn new(store: Arc<dyn ParticipantStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    pub async fn execute(&self) -> Result<HealthResponse, StoreError> {
        let participants = self.store.count().await?;
        Ok(HealthResponse::ok(
            self.clock.now().timestamp_millis(),
            participants,
        ))
    }
}
