//! # leavehub-domain
//!
//! Pure domain model for the leavehub work-arrangement tracker.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, calendar helpers
//! - Define **Applications** (a request to work from home / away, possibly
//!   spanning several dates or recurring) and their status/state enums
//! - Define **Events** (one concrete dated occurrence of an application)
//! - Define **Employees** (owner and reporting manager of an application)
//! - Expand a **Schedule** into its dated occurrences
//! - Encode the **lifecycle transition table** used when a manager decides
//! - Describe **Notifications** sent on every transition
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

/// Closed enum with a fixed text form shared by serde, storage and `FromStr`.
macro_rules! text_enum {
    (
        $(#[doc = $doc:expr])*
        $name:ident {
            $($(#[doc = $vdoc:expr])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[doc = $vdoc])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Text form used on the wire and in storage.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::error::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(crate::error::ValidationError::InvalidValue {
                        field: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

pub mod error;
pub mod id;
pub mod time;

pub mod application;
pub mod employee;
pub mod event;
pub mod lifecycle;
pub mod notification;
pub mod schedule;
