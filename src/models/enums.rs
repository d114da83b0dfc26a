//! Shared domain enums
//!
//! Every enum serializes to the exact label shown in the forms and stored in
//! the collection files.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Declares a closed set of labelled values with `ALL`, `as_str`,
/// `from_label` and `Display`.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Exact, case-sensitive match against the labels
            pub fn from_label(value: &str) -> Option<Self> {
                match value {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

labelled_enum! {
    /// Plant department owning a piece of equipment
    Department {
        Machining => "Machining",
        Assembly => "Assembly",
        Packaging => "Packaging",
        Shipping => "Shipping",
    }
}

labelled_enum! {
    /// Operating status of a piece of equipment
    EquipmentStatus {
        Operational => "Operational",
        Down => "Down",
        Maintenance => "Maintenance",
        Retired => "Retired",
    }
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

labelled_enum! {
    MaintenanceType {
        Preventative => "Preventative",
        Repair => "Repair",
        Emergency => "Emergency",
    }
}

labelled_enum! {
    Priority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

labelled_enum! {
    CompletionStatus {
        Complete => "Complete",
        Incomplete => "Incomplete",
        PendingParts => "Pending Parts",
    }
}
