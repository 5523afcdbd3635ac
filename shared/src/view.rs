use serde::{Deserialize, Serialize};

use crate::model::{EmergencyAlert, ModalName, Model};
use crate::{LOGO_ASSET, NOTIFICATION_MESSAGE};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionButtonView {
    pub title: String,
    /// Label to send back in `OpenModal`.
    pub opens: String,
}

impl From<ModalName> for ActionButtonView {
    fn from(modal: ModalName) -> Self {
        Self {
            title: modal.label().into(),
            opens: modal.label().into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrimeRateModalView {
    pub visible: bool,
    pub location: String,
    pub crime_percentage: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportingModalView {
    pub visible: bool,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyContactsModalView {
    pub visible: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MapView {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyButtonView {
    pub title: String,
    pub alert: EmergencyAlert,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationView {
    pub message: String,
    /// The shell should send a `Tick` at or after this instant.
    pub visible_until_ms: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub logo: String,
    pub primary_actions: Vec<ActionButtonView>,
    pub crime_rate_modal: CrimeRateModalView,
    pub reporting_modal: ReportingModalView,
    pub emergency_contacts_modal: EmergencyContactsModalView,
    pub map: MapView,
    pub emergency_buttons: Vec<Vec<EmergencyButtonView>>,
    pub add_contact_button: ActionButtonView,
    pub notification: Option<NotificationView>,
    pub config_error: Option<String>,
}

impl From<&Model> for ViewModel {
    fn from(model: &Model) -> Self {
        let location = &model.location;

        Self {
            logo: LOGO_ASSET.into(),
            primary_actions: vec![ModalName::CrimeRate.into(), ModalName::Reporting.into()],
            crime_rate_modal: CrimeRateModalView {
                visible: model.modals.is_visible(ModalName::CrimeRate),
                location: location.label(),
                crime_percentage: model.safety_score.map(|score| score.to_string()),
            },
            reporting_modal: ReportingModalView {
                visible: model.modals.is_visible(ModalName::Reporting),
                latitude: location.latitude().map(|v| v.to_string()),
                longitude: location.longitude().map(|v| v.to_string()),
            },
            emergency_contacts_modal: EmergencyContactsModalView {
                visible: model.modals.is_visible(ModalName::EmergencyContacts),
            },
            map: MapView {
                latitude: location.latitude(),
                longitude: location.longitude(),
            },
            emergency_buttons: EmergencyAlert::GRID
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|&alert| EmergencyButtonView {
                            title: alert.title().into(),
                            alert,
                        })
                        .collect()
                })
                .collect(),
            add_contact_button: ModalName::EmergencyContacts.into(),
            notification: model
                .notification
                .visible_until_ms()
                .map(|visible_until_ms| NotificationView {
                    message: NOTIFICATION_MESSAGE.into(),
                    visible_until_ms,
                }),
            config_error: model
                .config_error
                .as_ref()
                .map(crate::ConfigError::user_facing_message),
        }
    }
}
