use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
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

// Content hierarchy IDs
define_id!(ModuleId);
define_id!(StepId);

// Sorting step IDs
define_id!(BucketId);
define_id!(CardId);

// Poll and resource-list item IDs
define_id!(OptionId);
define_id!(ResourceId);

// Account IDs
define_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_json_as_strings() {
        let id = CardId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        let back: CardId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, back);
        assert!(json.starts_with('"'));
    }

    #[test]
    fn ids_are_distinct() {
        assert_ne!(StepId::new(), StepId::new());
    }
}
