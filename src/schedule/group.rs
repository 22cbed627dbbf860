//! Group consistency: detect sibling records that have drifted out of
//! sync (partial edits, failed writes) before any group schedule math
//! runs. Inconsistency is a first-class result value, never an error —
//! the evaluator fails closed and the caller decides whether to repair,
//! warn, or exclude.

use std::collections::BTreeSet;
use std::fmt;

use base64::Engine;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::models::{Frequency, GroupMember, Medicine};

/// A single consistency violation within one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum GroupIssue {
    Empty,
    /// A member passed in without group membership at all.
    NotGrouped { medicine_id: i64 },
    FrequencyMismatch {
        medicine_id: i64,
        expected: Frequency,
        found: Frequency,
    },
    StartDateMismatch {
        medicine_id: i64,
        expected_ms: i64,
        found_ms: i64,
    },
    DuplicateOrder { order: u32 },
    /// Order values are not the dense range 1..=N.
    OrderOutOfRange {
        medicine_id: i64,
        order: u32,
        member_count: usize,
    },
    MissingOrder { order: u32 },
    FingerprintMismatch { medicine_id: i64 },
}

impl fmt::Display for GroupIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "group has no members"),
            Self::NotGrouped { medicine_id } => {
                write!(f, "medicine {medicine_id} has no group membership")
            }
            Self::FrequencyMismatch { medicine_id, expected, found } => write!(
                f,
                "medicine {medicine_id} has group frequency '{found}', siblings have '{expected}'"
            ),
            Self::StartDateMismatch { medicine_id, expected_ms, found_ms } => write!(
                f,
                "medicine {medicine_id} has group start {found_ms} ms, siblings have {expected_ms} ms"
            ),
            Self::DuplicateOrder { order } => {
                write!(f, "order {order} is assigned to more than one member")
            }
            Self::OrderOutOfRange { medicine_id, order, member_count } => write!(
                f,
                "medicine {medicine_id} has order {order}, outside 1..={member_count}"
            ),
            Self::MissingOrder { order } => write!(f, "no member holds order {order}"),
            Self::FingerprintMismatch { medicine_id } => {
                write!(f, "medicine {medicine_id} carries a drifted fingerprint")
            }
        }
    }
}

/// Result of validating one group of sibling medicines.
#[derive(Debug, Clone, Serialize)]
pub struct GroupValidation {
    pub valid: bool,
    pub issues: Vec<GroupIssue>,
}

impl GroupValidation {
    fn ok() -> Self {
        Self { valid: true, issues: Vec::new() }
    }

    fn failed(issues: Vec<GroupIssue>) -> Self {
        Self { valid: false, issues }
    }

    /// First diagnostic reason, for callers that surface a single line.
    pub fn reason(&self) -> Option<String> {
        self.issues.first().map(|issue| issue.to_string())
    }
}

/// Stable drift-detection fingerprint over a member's group-level fields.
/// Sha256 of the canonical `id|name|start|frequency` string, base64
/// encoded. Deterministic within one deployment; never compared across
/// processes or runtimes.
pub fn group_fingerprint(member: &GroupMember) -> String {
    let canonical = format!(
        "{}|{}|{}|{}",
        member.id,
        member.name,
        member.start_date_ms,
        member.frequency.as_str()
    );
    let digest = Sha256::digest(canonical.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(digest)
}

/// Validate that sibling group records agree on their shared fields.
///
/// Rules, all of which must hold:
/// 1. every member shares the same group frequency
/// 2. every member shares the same group start date (exact ms equality)
/// 3. order values form the dense set {1, …, N}, no duplicate, no gap
/// 4. fingerprints, where present, all agree
pub fn validate_group(members: &[&Medicine]) -> GroupValidation {
    if members.is_empty() {
        return GroupValidation::failed(vec![GroupIssue::Empty]);
    }

    let mut issues = Vec::new();

    let mut reference: Option<&GroupMember> = None;
    for med in members {
        let Some(group) = med.group.as_ref() else {
            issues.push(GroupIssue::NotGrouped { medicine_id: med.id });
            continue;
        };
        let Some(first) = reference else {
            reference = Some(group);
            continue;
        };
        if group.frequency != first.frequency {
            issues.push(GroupIssue::FrequencyMismatch {
                medicine_id: med.id,
                expected: first.frequency,
                found: group.frequency,
            });
        }
        if group.start_date_ms != first.start_date_ms {
            issues.push(GroupIssue::StartDateMismatch {
                medicine_id: med.id,
                expected_ms: first.start_date_ms,
                found_ms: group.start_date_ms,
            });
        }
    }

    // Rule 3: dense order range 1..=N.
    let n = members.len();
    let mut seen = BTreeSet::new();
    for med in members {
        let Some(group) = med.group.as_ref() else { continue };
        if group.order < 1 || group.order as usize > n {
            issues.push(GroupIssue::OrderOutOfRange {
                medicine_id: med.id,
                order: group.order,
                member_count: n,
            });
        } else if !seen.insert(group.order) {
            issues.push(GroupIssue::DuplicateOrder { order: group.order });
        }
    }
    for order in 1..=n as u32 {
        if !seen.contains(&order) {
            issues.push(GroupIssue::MissingOrder { order });
        }
    }

    // Rule 4: stored fingerprints must all agree. A mismatch flags drift
    // even when the raw fields above superficially agree, which catches
    // a sibling whose fields were rewritten without its hash.
    let mut fingerprint: Option<&str> = None;
    for med in members {
        let Some(stored) = med.group.as_ref().and_then(|g| g.fingerprint.as_deref()) else {
            continue;
        };
        match fingerprint {
            None => fingerprint = Some(stored),
            Some(first) if first != stored => {
                issues.push(GroupIssue::FingerprintMismatch { medicine_id: med.id });
            }
            Some(_) => {}
        }
    }

    if issues.is_empty() {
        GroupValidation::ok()
    } else {
        GroupValidation::failed(issues)
    }
}

/// Repair an inconsistent group in place: re-number members by ascending
/// scheduled time-of-day (order = position + 1) and propagate the
/// canonical group id / name / start date / frequency — taken from the
/// earliest-scheduled member — to every sibling, recomputing each
/// fingerprint. The caller re-validates and persists.
pub fn repair_group(members: &mut [Medicine]) -> GroupValidation {
    if members.is_empty() {
        return GroupValidation::failed(vec![GroupIssue::Empty]);
    }

    members.sort_by_key(|m| m.scheduled_time);

    let Some(canonical) = members.iter().find_map(|m| m.group.clone()) else {
        let issues = members
            .iter()
            .map(|m| GroupIssue::NotGrouped { medicine_id: m.id })
            .collect();
        return GroupValidation::failed(issues);
    };

    for (position, med) in members.iter_mut().enumerate() {
        let mut group = GroupMember {
            id: canonical.id,
            name: canonical.name.clone(),
            order: position as u32 + 1,
            start_date_ms: canonical.start_date_ms,
            frequency: canonical.frequency,
            fingerprint: None,
        };
        group.fingerprint = Some(group_fingerprint(&group));
        med.group = Some(group);
    }

    let snapshot: Vec<&Medicine> = members.iter().collect();
    validate_group(&snapshot)
}
