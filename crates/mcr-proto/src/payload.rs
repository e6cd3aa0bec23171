//! # Payload Shape
//!
//! The JSON form of the legacy `STATE_SUBMISSION` message. Only the fields
//! the upgrade chain reads or writes are typed; everything else lands in the
//! `other` maps and is written back out unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `protoName` every health plan form data payload should carry.
pub const STATE_SUBMISSION_PROTO_NAME: &str = "STATE_SUBMISSION";

/// A decoded health plan form data payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtoPayload {
    /// Schema version the payload was encoded with.
    pub proto_version: u32,
    /// Message type tag.
    pub proto_name: String,
    /// Rate certifications attached to the submission.
    #[serde(default)]
    pub rate_infos: Vec<RateInfo>,
    /// Actuaries other than the certifying one. Present from version 3.
    ///
    /// An explicit `null` decodes the same as a missing key and is omitted
    /// on encode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addtl_actuary_contacts: Option<Vec<ActuaryContact>>,
    /// How OACT should reach the actuaries. Present from version 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addtl_actuary_communication_preference: Option<ActuaryCommunicationPreference>,
    /// Every other field of the payload.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// One rate certification within a payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateInfo {
    /// Actuaries on this rate. The first is the certifying actuary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actuary_contacts: Option<Vec<ActuaryContact>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actuary_communication_preference: Option<ActuaryCommunicationPreference>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A named actuary attached to a rate submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActuaryContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title_role: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actuarial_firm: Option<ActuarialFirm>,
    /// Free-text firm name when `actuarial_firm` is `OTHER`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actuarial_firm_other: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Actuarial firms the submission form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActuarialFirm {
    Mercer,
    Milliman,
    Optumas,
    Guidehouse,
    Deloitte,
    StateInHouse,
    Other,
}

/// Who OACT should contact with questions about a rate certification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActuaryCommunicationPreference {
    /// OACT contacts the actuary directly.
    OactToActuary,
    /// OACT goes through the state.
    OactToState,
}

impl ProtoPayload {
    /// An empty payload at the given version. Mostly useful for fixtures.
    pub fn new(proto_version: u32) -> Self {
        Self {
            proto_version,
            proto_name: STATE_SUBMISSION_PROTO_NAME.to_string(),
            rate_infos: Vec::new(),
            addtl_actuary_contacts: None,
            addtl_actuary_communication_preference: None,
            other: Map::new(),
        }
    }

    /// Whether `protoName` is the expected message type.
    pub fn has_expected_name(&self) -> bool {
        self.proto_name == STATE_SUBMISSION_PROTO_NAME
    }
}

impl ActuaryContact {
    /// A contact with the three required fields set.
    pub fn new(name: impl Into<String>, title_role: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title_role: title_role.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}
