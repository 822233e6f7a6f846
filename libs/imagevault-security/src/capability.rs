//! Capability bits granted to a subject.
//!
//! A token carries an integer permission level; each bit of that integer is
//! one capability. Bits combine with OR and are tested with AND, so a grant
//! is a plain bitset and an operation's requirement is a mask.

use bitflags::bitflags;

bitflags! {
    /// Operation classes a subject may be granted.
    ///
    /// | Capability | Gates |
    /// |------------|-------|
    /// | [`READ`](Self::READ) | listing and fetching records |
    /// | [`CREATE`](Self::CREATE) | creating records |
    /// | [`UPDATE`](Self::UPDATE) | replacing or patching records |
    /// | [`DELETE`](Self::DELETE) | destroying records |
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Capability: u32 {
        const READ   = 0b0001;
        const CREATE = 0b0010;
        const UPDATE = 0b0100;
        const DELETE = 0b1000;
    }
}

impl Capability {
    /// All four capabilities.
    pub const ALL: Self = Self::READ
        .union(Self::CREATE)
        .union(Self::UPDATE)
        .union(Self::DELETE);

    /// Builds a capability set from a raw token claim.
    ///
    /// Bits outside the known range are dropped rather than rejected: an
    /// unknown bit grants nothing.
    #[must_use]
    pub fn from_level(level: u32) -> Self {
        Self::from_bits_truncate(level)
    }

    /// Parses a capability name (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "READ" => Some(Self::READ),
            "CREATE" => Some(Self::CREATE),
            "UPDATE" => Some(Self::UPDATE),
            "DELETE" => Some(Self::DELETE),
            "ALL" => Some(Self::ALL),
            _ => None,
        }
    }

    /// Human-readable names of the set bits.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.contains(Self::READ) {
            names.push("READ");
        }
        if self.contains(Self::CREATE) {
            names.push("CREATE");
        }
        if self.contains(Self::UPDATE) {
            names.push("UPDATE");
        }
        if self.contains(Self::DELETE) {
            names.push("DELETE");
        }
        names
    }
}

/// Serialized as the flag-name form (`"READ | UPDATE"`) so configuration
/// files can name bits instead of spelling integers.
impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut formatted = String::new();
        bitflags::parser::to_writer(self, &mut formatted)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> serde::Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let flags = String::deserialize(deserializer)?;
        bitflags::parser::from_str(&flags).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.names();
        if names.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}
