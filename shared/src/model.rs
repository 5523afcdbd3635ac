use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::DashboardConfig;
use crate::location::ResolvedLocation;
use crate::{ConfigError, ValidatedCoordinate, LOCATION_ERROR_CITY};

/// Identifies one mount of the screen. Responses carry the id of the session
/// that issued them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    pub city: String,
    pub region: String,
    pub country: String,
    pub coordinate: Option<ValidatedCoordinate>,
}

impl LocationState {
    pub fn apply(&mut self, resolved: ResolvedLocation) {
        self.city = resolved.city;
        self.region = resolved.region;
        self.country = resolved.country;
        self.coordinate = resolved.coordinate;
    }

    /// Only the city shows the failure; the other fields keep whatever they held.
    pub fn mark_failed(&mut self) {
        self.city = LOCATION_ERROR_CITY.to_string();
    }

    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.coordinate.map(ValidatedCoordinate::lat)
    }

    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.coordinate.map(ValidatedCoordinate::lon)
    }

    /// `"city, region, country"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}, {}, {}", self.city, self.region, self.country)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModalName {
    CrimeRate,
    Reporting,
    EmergencyContacts,
}

impl ModalName {
    pub const ALL: [Self; 3] = [Self::CrimeRate, Self::Reporting, Self::EmergencyContacts];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CrimeRate => "Crime Rate",
            Self::Reporting => "Reporting",
            Self::EmergencyContacts => "Emergency Contacts",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }
}

impl fmt::Display for ModalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Independent visibility flags. Nothing stops several modals being open at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalVisibility {
    pub crime_rate: bool,
    pub reporting: bool,
    pub emergency_contacts: bool,
}

impl ModalVisibility {
    pub fn open(&mut self, modal: ModalName) {
        *self.flag_mut(modal) = true;
    }

    pub fn close(&mut self, modal: ModalName) {
        *self.flag_mut(modal) = false;
    }

    #[must_use]
    pub const fn is_visible(&self, modal: ModalName) -> bool {
        match modal {
            ModalName::CrimeRate => self.crime_rate,
            ModalName::Reporting => self.reporting,
            ModalName::EmergencyContacts => self.emergency_contacts,
        }
    }

    fn flag_mut(&mut self, modal: ModalName) -> &mut bool {
        match modal {
            ModalName::CrimeRate => &mut self.crime_rate,
            ModalName::Reporting => &mut self.reporting,
            ModalName::EmergencyContacts => &mut self.emergency_contacts,
        }
    }
}

/// Single-slot "Notification sent" banner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransientNotification {
    shown_at_ms: Option<u64>,
    visible_until_ms: Option<u64>,
}

impl TransientNotification {
    /// Shows the banner and (re)schedules its clear; an earlier pending clear
    /// is dropped.
    pub fn trigger(&mut self, now_ms: u64, duration_ms: u64) {
        self.shown_at_ms = Some(now_ms);
        self.visible_until_ms = Some(now_ms.saturating_add(duration_ms));
    }

    /// Clears the banner once its deadline has passed. Returns whether it did.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.visible_until_ms {
            Some(deadline) if now_ms >= deadline => {
                *self = Self::default();
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible_until_ms.is_some()
    }

    #[must_use]
    pub const fn shown_at_ms(&self) -> Option<u64> {
        self.shown_at_ms
    }

    #[must_use]
    pub const fn visible_until_ms(&self) -> Option<u64> {
        self.visible_until_ms
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyAlert {
    Unsafe,
    Uncomfortable,
    MedicalEmergency,
    Help,
}

impl EmergencyAlert {
    /// Button grid, row by row.
    pub const GRID: [[Self; 2]; 2] = [
        [Self::Unsafe, Self::Uncomfortable],
        [Self::MedicalEmergency, Self::Help],
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Unsafe => "Unsafe",
            Self::Uncomfortable => "Uncomfortable",
            Self::MedicalEmergency => "Medical Emergency",
            Self::Help => "Help",
        }
    }
}

#[derive(Debug, Default)]
pub struct Model {
    pub config: DashboardConfig,
    pub config_error: Option<ConfigError>,

    pub session: Option<SessionId>,
    pub sessions_started: u64,

    pub location: LocationState,
    pub safety_score: Option<f64>,
    pub modals: ModalVisibility,
    pub notification: TransientNotification,
}

impl Model {
    /// Resets every piece of screen state and opens a new session.
    pub fn begin_session(&mut self) -> SessionId {
        self.sessions_started += 1;
        let session = SessionId(self.sessions_started);

        *self = Self {
            session: Some(session),
            sessions_started: self.sessions_started,
            ..Self::default()
        };

        session
    }

    pub fn end_session(&mut self) {
        self.session = None;
    }

    #[must_use]
    pub fn is_current_session(&self, session: SessionId) -> bool {
        self.session == Some(session)
    }
}
