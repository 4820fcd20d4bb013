//! Response bodies returned by the collector

use serde::{Deserialize, Serialize};

use crate::ParticipantData;

/// Body of a 201 after a record was appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub message: String,
}

impl CreatedResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// JSON export of every participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    pub total_participants: usize,
    pub data: Vec<ParticipantData>,
}

impl ExportEnvelope {
    pub fn new(data: Vec<ParticipantData>) -> Self {
        Self {
            total_participants: data.len(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub participants: usize,
}

impl HealthResponse {
    pub fn ok(timestamp: i64, participants: usize) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp,
            participants,
        }
    }
}
