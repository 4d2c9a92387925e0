//! Trigger bitmask codec.
//!
//! Triggers name the cause of a session event. Each is bound to a fixed
//! power-of-two bit so a set of triggers packs into one integer for storage.
//! The encoding is an unordered-set encoding: duplicates collapse, and
//! decoding always yields triggers in ascending bit order regardless of the
//! order they were encoded in.

use serde::{Deserialize, Serialize};

/// Named cause of a session event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trigger {
    Filewatch,
    PreCommit,
    Manual,
    IdleFinalize,
}

/// All triggers in ascending bit order. Decode order is fixed by this table.
pub const ALL_TRIGGERS: [Trigger; 4] = [
    Trigger::Filewatch,
    Trigger::PreCommit,
    Trigger::Manual,
    Trigger::IdleFinalize,
];

impl Trigger {
    /// Fixed bit for this trigger.
    pub fn bit(&self) -> u32 {
        match self {
            Trigger::Filewatch => 1,
            Trigger::PreCommit => 2,
            Trigger::Manual => 4,
            Trigger::IdleFinalize => 8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Filewatch => "filewatch",
            Trigger::PreCommit => "pre-commit",
            Trigger::Manual => "manual",
            Trigger::IdleFinalize => "idle-finalize",
        }
    }

    /// Parse a wire name. Returns None for unknown names.
    pub fn parse(name: &str) -> Option<Trigger> {
        match name {
            "filewatch" => Some(Trigger::Filewatch),
            "pre-commit" => Some(Trigger::PreCommit),
            "manual" => Some(Trigger::Manual),
            "idle-finalize" => Some(Trigger::IdleFinalize),
            _ => None,
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Encode a set of triggers into a bitmask. Duplicates have no effect.
pub fn encode<I>(triggers: I) -> u32
where
    I: IntoIterator<Item = Trigger>,
{
    triggers.into_iter().fold(0, |mask, t| mask | t.bit())
}

/// Decode a bitmask into triggers in ascending bit order.
///
/// Bits outside the four known triggers are silently ignored.
pub fn decode(mask: u32) -> Vec<Trigger> {
    ALL_TRIGGERS
        .iter()
        .copied()
        .filter(|t| mask & t.bit() != 0)
        .collect()
}
