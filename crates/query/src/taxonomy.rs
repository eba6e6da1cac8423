//! Closed vocabularies describing photo content.
//!
//! Matching is exact and case-sensitive: `"Landscape"` is not a category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A value outside one of the closed sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {field}")]
pub struct UnknownValue {
    /// Which vocabulary was consulted
    pub field: &'static str,
    /// The rejected input
    pub value: String,
}

macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[doc = concat!("`", $text, "`")]
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Query parameter / column name for this vocabulary.
            pub const FIELD: &'static str = $field;

            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire spelling of every member, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($text),+];

            /// Wire spelling.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownValue {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

closed_set! {
    /// What a photo depicts.
    Category, "category" {
        Landscape => "landscape",
        Portrait => "portrait",
        Street => "street",
        Architecture => "architecture",
        Nature => "nature",
        Wildlife => "wildlife",
        Macro => "macro",
        Aerial => "aerial",
        Astrophotography => "astrophotography",
        Urban => "urban",
        Seascape => "seascape",
        Other => "other",
    }
}

closed_set! {
    /// Season the photo was taken in.
    Season, "season" {
        Spring => "spring",
        Summer => "summer",
        Autumn => "autumn",
        Winter => "winter",
    }
}

closed_set! {
    /// Light conditions of the shot.
    TimeOfDay, "time_of_day" {
        GoldenHourMorning => "golden_hour_morning",
        Morning => "morning",
        Midday => "midday",
        Afternoon => "afternoon",
        GoldenHourEvening => "golden_hour_evening",
        BlueHour => "blue_hour",
        Night => "night",
    }
}
