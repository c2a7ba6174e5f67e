//! Account role domain type.

use serde::{Deserialize, Serialize};

/// Account permission level.
///
/// Wire format: `i16` (1 = Admin, 2 = Member). The numeric values are the
/// role ids of the legacy schema and are part of the stored contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Admin = 1,
    Member = 2,
}

impl AccountRole {
    /// Convert from `i16` wire value. Returns `None` for unknown values.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            1 => Some(Self::Admin),
            2 => Some(Self::Member),
            _ => None,
        }
    }

    /// Convert to `i16` wire value.
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl Default for AccountRole {
    /// New registrations default to `Member`.
    fn default() -> Self {
        Self::Member
    }
}
