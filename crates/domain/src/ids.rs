use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Session-level IDs
define_id!(PlayerId);
define_id!(CharacterId);

// Mission IDs
define_id!(ContractId);

// Cyberspace topology IDs
define_id!(SystemId);
define_id!(NodeId);

// Node-owned entity IDs
define_id!(IceId);
define_id!(SourceId);

// Inventory IDs
define_id!(ProgramId);

// Intrusion attempt IDs
define_id!(RunId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(NodeId::new(), NodeId::new());
    }

    #[test]
    fn id_roundtrips_through_uuid() {
        let id = IceId::new();
        assert_eq!(IceId::from_uuid(id.to_uuid()), id);
    }

    #[test]
    fn id_ordering_follows_uuid_bytes() {
        let low = IceId::from_uuid(Uuid::from_u128(1));
        let high = IceId::from_uuid(Uuid::from_u128(2));
        assert!(low < high);
    }
}
