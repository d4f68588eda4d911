//! Authenticated session subject.

use uuid::Uuid;

/// The single identity a session is issued for.
///
/// A session always names exactly one doctor or one patient; a claim carrying
/// both or neither has no representation here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Doctor(Uuid),
    Patient(Uuid),
}

impl Subject {
    pub fn doctor_id(self) -> Option<Uuid> {
        match self {
            Self::Doctor(id) => Some(id),
            Self::Patient(_) => None,
        }
    }

    pub fn patient_id(self) -> Option<Uuid> {
        match self {
            Self::Patient(id) => Some(id),
            Self::Doctor(_) => None,
        }
    }
}
