//! The single primary control shown under the tour transcript

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    StartTour,
    Locate,
    Finished,
    Ended,
}

impl ControlAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::StartTour => "start tour",
            Self::Locate => "locate",
            Self::Finished => "finished",
            Self::Ended => "ended",
        }
    }
}

/// What the primary control looks like right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourControl {
    pub action: ControlAction,
    /// Pressing performs the action
    pub enabled: bool,
    /// Disabled, but pressing shows the reply reminder
    pub reminds_on_press: bool,
}

impl TourControl {
    pub fn enabled(action: ControlAction) -> Self {
        Self {
            action,
            enabled: true,
            reminds_on_press: false,
        }
    }

    pub fn disabled(action: ControlAction) -> Self {
        Self {
            action,
            enabled: false,
            reminds_on_press: false,
        }
    }

    pub fn pressable(&self) -> bool {
        self.enabled || self.reminds_on_press
    }

    pub fn label(&self) -> &'static str {
        self.action.label()
    }
}
