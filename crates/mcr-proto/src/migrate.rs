//! # Proto Version Upgrade Chain
//!
//! Brings a decoded payload of any historical version up to
//! [`CURRENT_PROTO_VERSION`].
//!
//! ## Chain
//!
//! [`UPGRADE_STEPS`] lists one pure function per schema bump, ordered by
//! target version. A step fires only when the payload's version is strictly
//! below its target, and it sets `protoVersion` to that target. Later steps
//! may therefore assume every earlier step has already run.
//!
//! ```text
//! v1 ─┐
//! v2 ─┴─▶ step→3 (addtl actuary contacts) ─▶ v3 (current)
//! ```
//!
//! Adding a version means appending a step and bumping the constant; the
//! `chain_ends_at_current_version` test enforces that the two agree.
//!
//! ## Known Assumption
//!
//! The →3 step reads only `rateInfos[0]`. Historical payloads with several
//! rate infos keep the actuaries of the later ones on those rate infos, but
//! none of them are promoted to `addtlActuaryContacts`.

use crate::payload::{ProtoPayload, STATE_SUBMISSION_PROTO_NAME};

/// The schema version every payload is upgraded to.
pub const CURRENT_PROTO_VERSION: u32 = 3;

/// One schema bump.
#[derive(Debug, Clone, Copy)]
pub struct UpgradeStep {
    /// Version the step produces.
    pub target_version: u32,
    /// What the step changes, for logs.
    pub description: &'static str,
    apply: fn(ProtoPayload) -> ProtoPayload,
}

impl UpgradeStep {
    /// Run the step if the payload is older than the step's target.
    pub fn apply_if_needed(&self, payload: ProtoPayload) -> (ProtoPayload, bool) {
        if payload.proto_version < self.target_version {
            let mut upgraded = (self.apply)(payload);
            upgraded.proto_version = self.target_version;
            (upgraded, true)
        } else {
            (payload, false)
        }
    }
}

/// The upgrade chain, ordered by target version.
pub const UPGRADE_STEPS: &[UpgradeStep] = &[UpgradeStep {
    target_version: 3,
    description: "split additional actuary contacts out of rateInfos[0]",
    apply: upgrade_to_v3,
}];

/// Outcome of a migration.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationReport {
    /// The upgraded payload.
    pub payload: ProtoPayload,
    /// Version before migration.
    pub from_version: u32,
    /// Target versions of the steps that ran, in order.
    pub applied_steps: Vec<u32>,
    /// Whether `protoName` was not `STATE_SUBMISSION`.
    pub name_mismatch: bool,
}

impl MigrationReport {
    /// Whether any step ran.
    pub fn upgraded(&self) -> bool {
        !self.applied_steps.is_empty()
    }
}

/// Upgrade a payload to [`CURRENT_PROTO_VERSION`].
pub fn to_latest_version(payload: ProtoPayload) -> ProtoPayload {
    migrate(payload).payload
}

/// Upgrade a payload and report what was done.
///
/// A payload already at the current version is returned as-is. A payload
/// claiming a newer version passes through unchanged as well; [`crate::decode`]
/// rejects those before they get here.
pub fn migrate(payload: ProtoPayload) -> MigrationReport {
    let name_mismatch = !payload.has_expected_name();
    if name_mismatch {
        tracing::warn!(
            proto_name = %payload.proto_name,
            expected = STATE_SUBMISSION_PROTO_NAME,
            "unboxing a proto with an unrecognized name; upgrading anyway"
        );
    }

    let from_version = payload.proto_version;
    if from_version == CURRENT_PROTO_VERSION {
        return MigrationReport {
            payload,
            from_version,
            applied_steps: Vec::new(),
            name_mismatch,
        };
    }
    if from_version > CURRENT_PROTO_VERSION {
        tracing::warn!(
            proto_version = from_version,
            current = CURRENT_PROTO_VERSION,
            "proto is newer than this build; leaving it untouched"
        );
    }

    let mut applied_steps = Vec::new();
    let payload = UPGRADE_STEPS.iter().fold(payload, |acc, step| {
        let (next, ran) = step.apply_if_needed(acc);
        if ran {
            tracing::debug!(
                target_version = step.target_version,
                step = step.description,
                "applied proto upgrade step"
            );
            applied_steps.push(step.target_version);
        }
        next
    });

    if !applied_steps.is_empty() {
        metrics::counter!(
            "mcr_proto_migrations_total",
            "from_version" => from_version.to_string()
        )
        .increment(1);
    }

    MigrationReport {
        payload,
        from_version,
        applied_steps,
        name_mismatch,
    }
}

// ─── Steps ───────────────────────────────────────────────────────────

/// →3: the first actuary on the first rate is the certifying actuary and is
/// shown on its own; the rest become submission-level additional contacts.
fn upgrade_to_v3(payload: ProtoPayload) -> ProtoPayload {
    let first_rate = payload.rate_infos.first();
    let addtl_contacts = first_rate
        .and_then(|rate| rate.actuary_contacts.as_deref())
        .and_then(|contacts| contacts.get(1..))
        .map(<[_]>::to_vec)
        .unwrap_or_default();
    let preference = first_rate.and_then(|rate| rate.actuary_communication_preference);

    ProtoPayload {
        addtl_actuary_contacts: Some(addtl_contacts),
        addtl_actuary_communication_preference: preference,
        ..payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{ActuaryCommunicationPreference, ActuaryContact, RateInfo};

    fn contact(n: u32) -> ActuaryContact {
        ActuaryContact::new(
            format!("Actuary {n}"),
            "Actuary",
            format!("actuary{n}@example.com"),
        )
    }

    fn payload_with_contacts(version: u32, contacts: Option<Vec<ActuaryContact>>) -> ProtoPayload {
        let mut payload = ProtoPayload::new(version);
        payload.rate_infos.push(RateInfo {
            actuary_contacts: contacts,
            actuary_communication_preference: Some(ActuaryCommunicationPreference::OactToState),
            ..RateInfo::default()
        });
        payload
    }

    #[test]
    fn chain_ends_at_current_version() {
        let last = UPGRADE_STEPS.last().map(|s| s.target_version);
        assert_eq!(last, Some(CURRENT_PROTO_VERSION));
    }

    #[test]
    fn chain_is_strictly_increasing() {
        for pair in UPGRADE_STEPS.windows(2) {
            assert!(pair[0].target_version < pair[1].target_version);
        }
    }

    #[test]
    fn current_version_is_returned_unchanged() {
        let mut payload = payload_with_contacts(CURRENT_PROTO_VERSION, Some(vec![contact(1), contact(2)]));
        payload.addtl_actuary_contacts = None;
        let report = migrate(payload.clone());
        assert_eq!(report.payload, payload);
        assert!(!report.upgraded());
    }

    #[test]
    fn v2_splits_contacts_after_the_first() {
        let payload = payload_with_contacts(2, Some(vec![contact(1), contact(2), contact(3)]));
        let report = migrate(payload);
        assert_eq!(report.payload.proto_version, 3);
        assert_eq!(report.applied_steps, vec![3]);
        assert_eq!(
            report.payload.addtl_actuary_contacts,
            Some(vec![contact(2), contact(3)])
        );
        assert_eq!(
            report.payload.addtl_actuary_communication_preference,
            Some(ActuaryCommunicationPreference::OactToState)
        );
        // The certifying actuary stays on the rate.
        assert_eq!(
            report.payload.rate_infos[0].actuary_contacts.as_ref().map(Vec::len),
            Some(3)
        );
    }

    #[test]
    fn single_contact_yields_no_additional_contacts() {
        let report = migrate(payload_with_contacts(1, Some(vec![contact(1)])));
        assert_eq!(report.payload.addtl_actuary_contacts, Some(vec![]));
    }

    #[test]
    fn empty_or_missing_contacts_yield_empty_list() {
        let empty = migrate(payload_with_contacts(2, Some(vec![])));
        assert_eq!(empty.payload.addtl_actuary_contacts, Some(vec![]));

        let missing = migrate(payload_with_contacts(2, None));
        assert_eq!(missing.payload.addtl_actuary_contacts, Some(vec![]));
    }

    #[test]
    fn no_rate_infos_still_upgrades() {
        let report = migrate(ProtoPayload::new(0));
        assert_eq!(report.payload.proto_version, 3);
        assert_eq!(report.payload.addtl_actuary_contacts, Some(vec![]));
        assert_eq!(report.payload.addtl_actuary_communication_preference, None);
    }

    #[test]
    fn only_first_rate_info_is_read() {
        let mut payload = payload_with_contacts(2, Some(vec![contact(1)]));
        payload.rate_infos.push(RateInfo {
            actuary_contacts: Some(vec![contact(7), contact(8)]),
            actuary_communication_preference: Some(ActuaryCommunicationPreference::OactToActuary),
            ..RateInfo::default()
        });
        let report = migrate(payload);
        assert_eq!(report.payload.addtl_actuary_contacts, Some(vec![]));
        assert_eq!(
            report.payload.addtl_actuary_communication_preference,
            Some(ActuaryCommunicationPreference::OactToState)
        );
    }

    #[test]
    fn wrong_name_is_flagged_but_upgraded() {
        let mut payload = payload_with_contacts(2, Some(vec![contact(1), contact(2)]));
        payload.proto_name = "RATE_SUBMISSION".to_string();
        let report = migrate(payload);
        assert!(report.name_mismatch);
        assert_eq!(report.payload.proto_version, 3);
        assert_eq!(report.payload.addtl_actuary_contacts, Some(vec![contact(2)]));
    }

    #[test]
    fn newer_version_passes_through() {
        let payload = ProtoPayload::new(CURRENT_PROTO_VERSION + 1);
        let report = migrate(payload.clone());
        assert_eq!(report.payload, payload);
        assert!(!report.upgraded());
    }

    #[test]
    fn to_latest_version_matches_migrate() {
        let payload = payload_with_contacts(1, Some(vec![contact(1), contact(2)]));
        assert_eq!(to_latest_version(payload.clone()), migrate(payload).payload);
    }
}
