//! Journal entry value types.

use serde::{Deserialize, Serialize};

/// One emotion recorded on an entry, with a self-reported intensity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emotion {
    pub name: String,
    #[serde(default)]
    pub intensity: i32,
}
