//! Export use cases - reading back what was collected.

use std::sync::Arc;

use ugclab_domain::ParticipantId;
use ugclab_shared::{ExportEnvelope, ParticipantData};

use crate::infrastructure::csv_export::render_csv;
use crate::infrastructure::ports::{ParticipantStore, StoreError};

/// Container for export use cases.
pub struct ExportUseCases {
    pub all: Arc<ExportAll>,
    pub participant: Arc<GetParticipant>,
}

impl ExportUseCases {
    pub fn new(all: Arc<ExportAll>, participant: Arc<GetParticipant>) -> Self {
        Self { all, participant }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// `csv` selects CSV; anything else, including no value, selects JSON.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutput {
    Json(ExportEnvelope),
    Csv(String),
}

/// Full export of every participant.
pub struct ExportAll {
    store: Arc<dyn ParticipantStore>,
}

impl ExportAll {
    pub fn new(store: Arc<dyn ParticipantStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, format: ExportFormat) -> Result<ExportOutput, StoreError> {
        let participants = self.store.list_all().await?;
        tracing::info!(
            participants = participants.len(),
            format = ?format,
            "Exporting participant data"
        );
        Ok(match format {
            ExportFormat::Json => ExportOutput::Json(ExportEnvelope::new(participants)),
            ExportFormat::Csv => ExportOutput::Csv(render_csv(&participants)),
        })
    }
}

/// Everything recorded for one participant.
pub struct GetParticipant {
    store: Arc<dyn ParticipantStore>,
}

impl GetParticipant {
    pub fn new(store: Arc<dyn ParticipantStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Option<ParticipantData>, StoreError> {
        self.store.get(participant_id).await
    }
}
