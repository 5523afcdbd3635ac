use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;
use crate::location::{IpInfoResponse, SafetyScoreResponse};
use crate::model::{EmergencyAlert, SessionId};
use crate::FetchError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub enum Event {
    #[default]
    Noop,

    // Lifecycle
    ScreenMounted {
        config: DashboardConfig,
    },
    ScreenUnmounted,

    // Modals, by display name
    OpenModal {
        name: String,
    },
    CloseModal {
        name: String,
    },
    AddContactPressed,

    EmergencyButtonPressed {
        alert: EmergencyAlert,
    },

    /// Shell clock, used to expire the notification banner.
    Tick {
        now_ms: u64,
    },

    // Internal: responses to the core's own requests
    #[serde(skip)]
    LocationResponse {
        session: SessionId,
        result: Box<Result<IpInfoResponse, FetchError>>,
    },
    #[serde(skip)]
    SafetyScoreResponse {
        session: SessionId,
        result: Box<Result<SafetyScoreResponse, FetchError>>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::ScreenMounted { .. } => "screen_mounted",
            Self::ScreenUnmounted => "screen_unmounted",
            Self::OpenModal { .. } => "open_modal",
            Self::CloseModal { .. } => "close_modal",
            Self::AddContactPressed => "add_contact_pressed",
            Self::EmergencyButtonPressed { .. } => "emergency_button_pressed",
            Self::Tick { .. } => "tick",
            Self::LocationResponse { .. } => "location_response",
            Self::SafetyScoreResponse { .. } => "safety_score_response",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::OpenModal { .. }
                | Self::CloseModal { .. }
                | Self::AddContactPressed
                | Self::EmergencyButtonPressed { .. }
        )
    }
}
