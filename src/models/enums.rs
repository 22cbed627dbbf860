use crate::models::ModelError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Frequency {
    Daily => "daily",
    EveryOtherDay => "every_other_day",
    TwiceAWeek => "twice_a_week",
    ThreeTimesAWeek => "three_times_a_week",
    Weekly => "weekly",
    Custom => "custom",
});

str_enum!(MedicineType {
    Tablet => "tablet",
    Capsule => "capsule",
    Liquid => "liquid",
    Injection => "injection",
    Drops => "drops",
    Inhaler => "inhaler",
    Other => "other",
});

str_enum!(DoseStatus {
    NotToday => "not_today",
    Upcoming => "upcoming",
    Overdue => "overdue",
    TakenToday => "taken_today",
});
