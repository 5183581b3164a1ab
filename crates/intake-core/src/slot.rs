use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three required document roles.
///
/// Serializes to the wire name the extraction service expects as a request
/// body key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UploadSlot {
    #[serde(rename = "rg_frente")]
    FrontId,
    #[serde(rename = "rg_verso")]
    BackId,
    #[serde(rename = "comprovante")]
    ProofOfAddress,
}

impl UploadSlot {
    /// All slots in display order.
    pub const ALL: [Self; 3] = [Self::FrontId, Self::BackId, Self::ProofOfAddress];

    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::FrontId => "rg_frente",
            Self::BackId => "rg_verso",
            Self::ProofOfAddress => "comprovante",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FrontId => "ID card (front)",
            Self::BackId => "ID card (back)",
            Self::ProofOfAddress => "Proof of address",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::FrontId => 0,
            Self::BackId => 1,
            Self::ProofOfAddress => 2,
        }
    }
}

impl fmt::Display for UploadSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown upload slot: {0}")]
pub struct UnknownSlot(pub String);

impl FromStr for UploadSlot {
    type Err = UnknownSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.wire_name() == s)
            .ok_or_else(|| UnknownSlot(s.to_owned()))
    }
}
