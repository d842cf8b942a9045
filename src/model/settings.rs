use serde::{Deserialize, Serialize};

/// Who may see a piece of information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Members,
    Private,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub privacy: PrivacySettings,
    pub communication: CommunicationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacySettings {
    pub profile_visibility: Visibility,
    pub show_email: bool,
    pub show_phone: bool,
    pub show_address: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            profile_visibility: Visibility::Members,
            show_email: false,
            show_phone: false,
            show_address: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationSettings {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub allow_messages_from: Visibility,
}

impl Default for CommunicationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: true,
            allow_messages_from: Visibility::Members,
        }
    }
}
