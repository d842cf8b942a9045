//! Profile record and its nested value objects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Full profile of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: u64,
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub social_media: SocialMedia,
    #[serde(default)]
    pub personal_details: Option<PersonalDetails>,
    #[serde(default)]
    pub professional_details: Option<ProfessionalDetails>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default)]
    pub district: Option<String>,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Links to the user's accounts elsewhere. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SocialMedia {
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonalDetails {
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub mother_name: Option<String>,
    #[serde(default)]
    pub gotra: Option<String>,
    #[serde(default)]
    pub relationship: Option<Relationship>,
    #[serde(default)]
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Single,
    Engaged,
    Married,
    Divorced,
    Widowed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field_of_study: Option<String>,
    pub start_year: u16,
    #[serde(default)]
    pub end_year: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfessionalDetails {
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub experience_years: Option<u8>,
}

/// The editable sections of a profile. One update touches one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "data", rename_all = "snake_case")]
pub enum ProfileUpdate {
    BasicInfo(BasicInfo),
    PersonalDetails(PersonalDetails),
    ProfessionalDetails(ProfessionalDetails),
    SocialLinks(SocialMedia),
    Address(Address),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub full_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoKind {
    Profile,
    Cover,
}

impl PhotoKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PhotoKind::Profile => "profile",
            PhotoKind::Cover => "cover",
        }
    }
}

/// Raw image to send as multipart form data.
#[derive(Clone, PartialEq)]
pub struct PhotoUpload {
    pub kind: PhotoKind,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for PhotoUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoUpload")
            .field("kind", &self.kind)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedPhoto {
    pub kind: PhotoKind,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_update_is_tagged_by_section() {
        let update = ProfileUpdate::SocialLinks(SocialMedia {
            instagram: Some("https://instagram.com/bishnoi".to_string()),
            ..SocialMedia::default()
        });
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["section"], "social_links");
        assert_eq!(json["data"]["instagram"], "https://instagram.com/bishnoi");
    }

    #[test]
    fn sparse_profile_payload_decodes_with_defaults() {
        let profile: Profile = serde_json::from_str(
            r#"{"user_id": 7, "username": "ravi_b", "full_name": "Ravi Bishnoi"}"#,
        )
        .unwrap();
        assert_eq!(profile.user_id, 7);
        assert_eq!(profile.social_media, SocialMedia::default());
        assert!(profile.address.is_none());
    }
}
