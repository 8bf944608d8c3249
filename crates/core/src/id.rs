//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Identifier of a travel fund (aggregate root).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FundId(Uuid);

/// Identifier of a single expense.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

/// Identifier of a single top-up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TopUpId(Uuid);

/// Namespace for ids written by stores that did not use UUIDs (short
/// base36 strings and the like).
const STORED_ID_NAMESPACE: Uuid = Uuid::from_u128(0x5f0c_2e7a_93b4_4d61_a8e2_1c7b_6d90_3f45);

/// UUIDs are taken as-is; any other non-blank string maps to a stable v5 UUID.
fn uuid_from_stored(raw: &str) -> Option<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let uuid = Uuid::parse_str(raw)
        .unwrap_or_else(|_| Uuid::new_v5(&STORED_ID_NAMESPACE, raw.as_bytes()));
    Some(uuid)
}

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Identifier from a persisted snapshot. Unlike `FromStr`, any
            /// non-blank string is accepted.
            pub fn from_stored(raw: &str) -> Result<Self, DomainError> {
                uuid_from_stored(raw)
                    .map(Self)
                    .ok_or_else(|| DomainError::invalid_id(format!("{}: blank", $name)))
            }
        }

        impl<'de> Deserialize<'de> for $t {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::from_stored(&raw).map_err(serde::de::Error::custom)
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

impl_uuid_newtype!(FundId, "FundId");
impl_uuid_newtype!(ExpenseId, "ExpenseId");
impl_uuid_newtype!(TopUpId, "TopUpId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_output() {
        let id = ExpenseId::new();
        let parsed: ExpenseId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn stored_short_ids_map_to_stable_uuids() {
        let a = ExpenseId::from_stored("k3j4h2x").unwrap();
        let b: ExpenseId = serde_json::from_str("\"k3j4h2x\"").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, ExpenseId::from_stored("k3j4h2y").unwrap());

        let id = TopUpId::new();
        assert_eq!(TopUpId::from_stored(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn blank_stored_id_is_rejected() {
        assert!(ExpenseId::from_stored("  ").is_err());
        assert!(serde_json::from_str::<TopUpId>("\"\"").is_err());
        assert!(serde_json::from_str::<TopUpId>("42").is_err());
    }

    #[test]
    fn rejects_malformed_identifier() {
        let err = "abc1234".parse::<TopUpId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("TopUpId")),
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }
}
