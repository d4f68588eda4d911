//! Doctor-patient link lifecycle.

use serde::{Deserialize, Serialize};

/// Approval state of a doctor-patient link.
///
/// Transitions: Pending → Approved (doctor approval), any non-Approved →
/// Approved (pairing-code redemption), Approved → Revoked (patient revoke).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkStatus {
    Pending,
    Approved,
    Denied,
    Revoked,
}

impl LinkStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Denied => "Denied",
            Self::Revoked => "Revoked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Approved" => Some(Self::Approved),
            "Denied" => Some(Self::Denied),
            "Revoked" => Some(Self::Revoked),
            _ => None,
        }
    }
}

/// What a pairing-code redemption must do to the `(doctor, patient)` link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemLinkAction {
    /// No link exists yet: insert one already Approved.
    Create,
    /// A link exists in a non-Approved state: move it to Approved.
    Upgrade,
    /// The link is already Approved: leave it untouched.
    Keep,
}

impl RedeemLinkAction {
    pub fn for_existing(status: Option<LinkStatus>) -> Self {
        match status {
            None => Self::Create,
            Some(LinkStatus::Approved) => Self::Keep,
            Some(_) => Self::Upgrade,
        }
    }
}
