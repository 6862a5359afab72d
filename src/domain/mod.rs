//! Closed vocabularies of the workforce domain.
//!
//! Every enumerated field that is persisted as text has a matching enum here,
//! so validation and role checks compare against one definition instead of
//! scattered string literals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried by an account and embedded in every issued token.
///
/// # Examples
///
/// ```rust
/// use workhub::domain::Role;
///
/// assert_eq!(Role::parse("store"), Some(Role::Store));
/// assert_eq!(Role::Admin.as_str(), "admin");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Worker,
    Store,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Worker => "worker",
            Self::Store => "store",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "worker" => Some(Self::Worker),
            "store" => Some(Self::Store),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares a text-backed enum with `parse`/`as_str` and a `ALL` listing
/// used in validation messages.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [&'static str] = &[$($text),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            #[must_use]
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(
    /// Employment status of a worker.
    WorkerStatus { Active => "Active", Inactive => "Inactive" }
);

text_enum!(
    /// Whether a worker is still in the trial period.
    OnTrial { Yes => "yes", No => "no" }
);

text_enum!(
    HolidayStatus { Pending => "Pending", Taken => "Taken" }
);

text_enum!(
    /// Clock-in or clock-out.
    Direction { Entry => "Entry", Exit => "Exit" }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Admin, Role::Worker, Role::Store] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("Admin"), None);
    }

    #[test]
    fn test_text_enums_are_case_sensitive() {
        assert_eq!(WorkerStatus::parse("Active"), Some(WorkerStatus::Active));
        assert_eq!(WorkerStatus::parse("active"), None);
        assert_eq!(OnTrial::parse("yes"), Some(OnTrial::Yes));
        assert_eq!(HolidayStatus::parse("Taken"), Some(HolidayStatus::Taken));
        assert_eq!(Direction::parse("Exit"), Some(Direction::Exit));
        assert_eq!(Direction::ALL, &["Entry", "Exit"]);
    }
}
