use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_uid {
    ($name:ident, $repr:ty) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name($repr);

        impl $name {
            /// Smallest value ever handed out; zero is reserved as "no identifier".
            pub const MIN: $name = $name(1);
            pub const MAX: $name = $name(<$repr>::MAX);

            pub const fn new(raw: $repr) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> $repr {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$repr> for $name {
            fn from(value: $repr) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $repr {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Wide space: every creature, item and container in every map.
define_uid!(EntityUid, u64);

// Narrow spaces: maps and loaded mods.
define_uid!(MapUid, u16);
define_uid!(ModUid, u16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uids_order_numerically() {
        assert!(EntityUid::new(2) < EntityUid::new(10));
        assert!(MapUid::new(255) < MapUid::new(256));
    }

    #[test]
    fn uid_round_trips_through_raw() {
        let uid = EntityUid::from(42u64);
        assert_eq!(u64::from(uid), 42);
        assert_eq!(uid.to_string(), "42");
        assert_eq!(MapUid::MAX.get(), u16::MAX);
    }
}
