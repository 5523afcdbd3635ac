// lib.rs - Safety dashboard shared core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capabilities;
pub mod config;
pub mod event;
pub mod location;
pub mod model;
pub mod view;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::{DashboardConfig, Endpoints};
pub use crux_core::{render::Render, App as CruxApp};
pub use event::Event;
pub use model::{
    EmergencyAlert, LocationState, ModalName, ModalVisibility, Model, SessionId,
    TransientNotification,
};
pub use view::ViewModel;

pub const DEFAULT_IPINFO_URL: &str = "https://ipinfo.io/json";
pub const DEFAULT_SAFETY_URL: &str = "http://10.29.26.230:5000/api/safety";
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 1000;
pub const MAX_NOTIFICATION_DURATION_MS: u64 = 60_000;
pub const MAX_URL_LENGTH: usize = 2048;
pub const MAX_TOKEN_LENGTH: usize = 128;

pub const UNKNOWN_CITY: &str = "Unknown City";
pub const UNKNOWN_REGION: &str = "Unknown Region";
pub const UNKNOWN_COUNTRY: &str = "Unknown Country";
pub const LOCATION_ERROR_CITY: &str = "Error fetching city";
pub const NOTIFICATION_MESSAGE: &str = "Notification sent";
pub const LOGO_ASSET: &str = "Logo.png";

/// The two ways an outbound read can go wrong. Both are handled identically
/// by the dashboard; the distinction only shows up in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    Transport,
    Parse,
}

impl FailureKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Transport => "TRANSPORT_ERROR",
            Self::Parse => "PARSE_ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FetchError {
    #[error("request failed: {message}")]
    Transport { message: String },

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("invalid response body: {reason}")]
    Parse { reason: String },
}

impl FetchError {
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Transport { .. } | Self::Status { .. } => FailureKind::Transport,
            Self::Parse { .. } => FailureKind::Parse,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind().code()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("IP geolocation token is missing")]
    MissingToken,

    #[error("IP geolocation token is invalid: {reason}")]
    InvalidToken { reason: String },

    #[error("invalid {field} URL '{url}': {reason}")]
    InvalidUrl {
        field: String,
        url: String,
        reason: String,
    },

    #[error("configuration is not valid JSON: {reason}")]
    Malformed { reason: String },

    #[error("notification duration {ms}ms is outside 1..={max}ms")]
    InvalidNotificationDuration { ms: u64, max: u64 },
}

impl ConfigError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        "CONFIG_ERROR"
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self {
            Self::MissingToken | Self::InvalidToken { .. } => {
                "Location lookup is not configured. Please check the app settings.".into()
            }
            Self::InvalidUrl { field, .. } => {
                format!("The {field} service address is invalid. Please check the app settings.")
            }
            Self::Malformed { .. } => "The app settings could not be read.".into(),
            Self::InvalidNotificationDuration { .. } => {
                "The notification duration setting is invalid.".into()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("coordinate string '{0}' is not of the form \"lat,lon\"")]
    Malformed(String),
    #[error("Latitude {0} is out of valid range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("Longitude {0} is out of valid range [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("Coordinate value is not finite (NaN or Infinity)")]
    NonFinite,
}

impl From<CoordinateError> for FetchError {
    fn from(e: CoordinateError) -> Self {
        FetchError::Parse {
            reason: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidatedCoordinate {
    lat: f64,
    lon: f64,
}

impl ValidatedCoordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    #[must_use]
    pub const fn lon(self) -> f64 {
        self.lon
    }
}

impl TryFrom<(f64, f64)> for ValidatedCoordinate {
    type Error = CoordinateError;

    fn try_from((lat, lon): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(lat, lon)
    }
}

/// Wall-clock milliseconds since the Unix epoch, or 0 if the clock is before it.
#[must_use]
pub fn get_current_time_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

pub mod app {
    use tracing::{debug, error, info};

    use super::{
        get_current_time_ms, ConfigError, EmergencyAlert, FetchError, ModalName, Model,
        SessionId,
    };
    use crate::capabilities::{decode_json, Capabilities};
    use crate::config::{DashboardConfig, Endpoints};
    use crate::event::Event;
    use crate::location::{resolve_location, IpInfoResponse, SafetyScoreResponse};
    use crate::view::ViewModel;

    #[derive(Default)]
    pub struct App;

    impl App {
        fn fetch_safety_score(url: &str, session: SessionId, caps: &Capabilities) {
            caps.http.get(url).send(move |result| Event::SafetyScoreResponse {
                session,
                result: Box::new(decode_json::<SafetyScoreResponse>(result)),
            });
        }

        fn fetch_location(url: &str, session: SessionId, caps: &Capabilities) {
            caps.http.get(url).send(move |result| Event::LocationResponse {
                session,
                result: Box::new(decode_json::<IpInfoResponse>(result)),
            });
        }

        fn mount(model: &mut Model, config: DashboardConfig, caps: &Capabilities) {
            let session = model.begin_session();

            match config.validate() {
                Ok(Endpoints {
                    location_url,
                    safety_url,
                }) => {
                    model.config = config;
                    Self::fetch_safety_score(&safety_url, session, caps);
                    Self::fetch_location(&location_url, session, caps);
                }
                Err(e) => Self::reject_config(model, e),
            }
        }

        fn reject_config(model: &mut Model, e: ConfigError) {
            error!(error = %e, code = e.code(), "rejected dashboard configuration");
            model.location.mark_failed();
            model.config_error = Some(e);
        }

        fn apply_location(model: &mut Model, result: Result<IpInfoResponse, FetchError>) {
            match result.and_then(resolve_location) {
                Ok(resolved) => {
                    if resolved.coordinate.is_none() {
                        error!("Location data not found");
                    }
                    model.location.apply(resolved);
                }
                Err(e) => {
                    error!(error = %e, code = e.code(), "Error fetching location");
                    model.location.mark_failed();
                }
            }
        }

        fn apply_safety_score(model: &mut Model, result: Result<SafetyScoreResponse, FetchError>) {
            match result {
                Ok(data) => {
                    info!(safety_score = data.safety_score, "Safety Score Data");
                    model.safety_score = Some(data.safety_score);
                }
                Err(e) => {
                    error!(error = %e, code = e.code(), "Error fetching safety score");
                }
            }
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            debug!(
                event = event.name(),
                user_initiated = event.is_user_initiated(),
                "processing event"
            );

            match event {
                Event::Noop => {}

                Event::ScreenMounted { config } => {
                    Self::mount(model, config, caps);
                    caps.render.render();
                }

                Event::ScreenUnmounted => {
                    model.end_session();
                }

                Event::OpenModal { name } => match ModalName::from_label(&name) {
                    Some(modal) => {
                        model.modals.open(modal);
                        caps.render.render();
                    }
                    None => debug!(name = %name, "ignoring open for unknown modal"),
                },

                Event::CloseModal { name } => match ModalName::from_label(&name) {
                    Some(modal) => {
                        model.modals.close(modal);
                        caps.render.render();
                    }
                    None => debug!(name = %name, "ignoring close for unknown modal"),
                },

                Event::AddContactPressed => {
                    model.modals.open(ModalName::EmergencyContacts);
                    caps.render.render();
                }

                Event::EmergencyButtonPressed { alert } => {
                    info!(alert = alert.title(), "emergency button pressed");
                    if alert == EmergencyAlert::Unsafe {
                        let duration = model.config.notification_duration_ms;
                        model.notification.trigger(get_current_time_ms(), duration);
                        caps.render.render();
                    }
                }

                Event::Tick { now_ms } => {
                    if model.notification.expire(now_ms) {
                        caps.render.render();
                    }
                }

                Event::LocationResponse { session, result } => {
                    if !model.is_current_session(session) {
                        debug!(session = session.0, "discarding location response for ended session");
                        return;
                    }
                    Self::apply_location(model, *result);
                    caps.render.render();
                }

                Event::SafetyScoreResponse { session, result } => {
                    if !model.is_current_session(session) {
                        debug!(session = session.0, "discarding safety score response for ended session");
                        return;
                    }
                    Self::apply_safety_score(model, *result);
                    caps.render.render();
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            ViewModel::from(model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod coordinate_tests {
        use super::*;

        #[test]
        fn test_valid_coordinates() {
            assert!(ValidatedCoordinate::new(0.0, 0.0).is_ok());
            assert!(ValidatedCoordinate::new(90.0, 180.0).is_ok());
            assert!(ValidatedCoordinate::new(-90.0, -180.0).is_ok());
            assert!(ValidatedCoordinate::new(12.34, 56.78).is_ok());
        }

        #[test]
        fn test_invalid_latitude() {
            assert!(matches!(
                ValidatedCoordinate::new(91.0, 0.0),
                Err(CoordinateError::LatitudeOutOfRange(_))
            ));
            assert!(matches!(
                ValidatedCoordinate::try_from((-91.0, 0.0)),
                Err(CoordinateError::LatitudeOutOfRange(_))
            ));
        }

        #[test]
        fn test_invalid_longitude() {
            assert!(matches!(
                ValidatedCoordinate::new(0.0, 181.0),
                Err(CoordinateError::LongitudeOutOfRange(_))
            ));
        }

        #[test]
        fn test_non_finite_coordinates() {
            assert!(matches!(
                ValidatedCoordinate::new(f64::NAN, 0.0),
                Err(CoordinateError::NonFinite)
            ));
            assert!(matches!(
                ValidatedCoordinate::new(0.0, f64::INFINITY),
                Err(CoordinateError::NonFinite)
            ));
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_fetch_error_kinds() {
            let transport = FetchError::Transport {
                message: "connection refused".into(),
            };
            let status = FetchError::Status { status: 503 };
            let parse = FetchError::Parse {
                reason: "missing field".into(),
            };

            assert_eq!(transport.kind(), FailureKind::Transport);
            assert_eq!(status.kind(), FailureKind::Transport);
            assert_eq!(parse.kind(), FailureKind::Parse);
            assert_eq!(status.code(), "TRANSPORT_ERROR");
            assert_eq!(parse.code(), "PARSE_ERROR");
        }

        #[test]
        fn test_coordinate_error_is_parse_failure() {
            let err: FetchError = CoordinateError::NonFinite.into();
            assert_eq!(err.kind(), FailureKind::Parse);
        }

        #[test]
        fn test_config_error_user_message() {
            let err = ConfigError::InvalidUrl {
                field: "safety".into(),
                url: "ftp://x".into(),
                reason: "bad scheme".into(),
            };
            assert!(err.user_facing_message().contains("safety"));
            assert_eq!(err.code(), "CONFIG_ERROR");
        }
    }
}
