//! Plain records managed by the resource actors, plus their create/update payloads.
//!
//! Every record serializes to camelCase JSON with its identifier under `id`.

pub mod contact;
pub mod menu;
pub mod order;
pub mod reservation;
pub mod session;
pub mod user;

pub use contact::*;
pub use menu::*;
pub use order::*;
pub use reservation::*;
pub use session::*;
pub use user::*;

/// Declares a string-backed identifier type.
///
/// Fresh ids are time-ordered UUIDv7 values in 32-char hex, so sorting by id
/// roughly follows creation order.
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn generate() -> Self {
                Self(uuid::Uuid::now_v7().simple().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

pub(crate) use record_id;

/// Trims a required text field, rejecting it when nothing is left.
pub(crate) fn required(field: &str, value: String) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Trims an optional text field; blank values become `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
