//! Strongly-typed UUID wrappers for appliance resources.
//!
//! The appliance hands out UUIDs for mitigations and attack events; wrapping
//! them in distinct types prevents mix-ups at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Macro to generate strongly-typed UUID wrapper types.
macro_rules! uuid_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new UUID wrapper from a [`Uuid`].
            #[must_use]
            pub const fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Creates a new random UUID (v4).
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Returns the inner [`Uuid`].
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Converts to the inner [`Uuid`].
            #[must_use]
            pub const fn into_uuid(self) -> Uuid {
                self.0
            }

            /// Parses a UUID from a string.
            ///
            /// # Errors
            ///
            /// Returns an error if the string is not a valid UUID.
            pub fn parse_str(input: &str) -> Result<Self> {
                Uuid::parse_str(input)
                    .map(Self)
                    .map_err(|_| Error::InvalidUuid(input.to_string()))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }
    };
}

uuid_type!(MitigationUuid, "Mitigation UUID assigned by the appliance to a set of FlowSpec announcements");
uuid_type!(AttackUuid, "Attack event UUID reported in callback payloads");

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_UUID: &str = "550e8400-e29b-41d4-a716-446655440000";
    const INVALID_UUID: &str = "not-a-uuid";

    #[test]
    fn parse_valid_uuid() {
        let uuid = MitigationUuid::parse_str(VALID_UUID).unwrap();
        assert_eq!(uuid.to_string(), VALID_UUID);
    }

    #[test]
    fn parse_invalid_uuid_fails() {
        let err = MitigationUuid::parse_str(INVALID_UUID).unwrap_err();
        assert!(matches!(err, Error::InvalidUuid(_)));
    }

    #[test]
    fn from_str_round_trip() {
        let uuid: AttackUuid = VALID_UUID.parse().unwrap();
        assert_eq!(uuid.to_string(), VALID_UUID);
    }

    #[test]
    fn wrapper_conversions() {
        let raw = Uuid::new_v4();
        let wrapped = MitigationUuid::new(raw);
        assert_eq!(wrapped.as_uuid(), &raw);
        assert_eq!(Uuid::from(wrapped), raw);
        assert_eq!(wrapped.into_uuid(), raw);
    }

    #[test]
    fn serde_is_transparent() {
        let uuid = MitigationUuid::parse_str(VALID_UUID).unwrap();
        let json = serde_json::to_string(&uuid).unwrap();
        assert_eq!(json, format!("\"{VALID_UUID}\""));

        let back: MitigationUuid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uuid);
    }

    #[test]
    fn distinct_types_are_not_interchangeable() {
        // Compile-time property; here we just check both parse the same text.
        let mitigation = MitigationUuid::parse_str(VALID_UUID).unwrap();
        let attack = AttackUuid::parse_str(VALID_UUID).unwrap();
        assert_eq!(mitigation.to_string(), attack.to_string());
    }
}
