//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

use core::str::FromStr;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// BaseLinker hands out plain integer identifiers for every entity, so all
/// IDs share the `i64` representation.
///
/// # Example
///
/// ```rust
/// # use fieldhand_core::define_id;
/// define_id!(InventoryId);
/// define_id!(ProductId);
///
/// let inventory_id = InventoryId::new(1);
/// let product_id = ProductId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: InventoryId = product_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(InventoryId);
define_id!(ProductId);
define_id!(ExtraFieldId);

/// Error returned when a string is not a valid supplementary-field reference.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid supplementary field reference '{input}' (expected a field id or 'extra_field_<id>')")]
pub struct ParseExtraFieldIdError {
    /// The rejected input.
    pub input: String,
}

impl ExtraFieldId {
    /// Prefix BaseLinker uses for supplementary fields inside `text_fields`.
    pub const TEXT_FIELD_PREFIX: &'static str = "extra_field_";

    /// The `text_fields` key under which this field's value travels on the
    /// wire, e.g. `extra_field_484`.
    #[must_use]
    pub fn text_field_key(&self) -> String {
        format!("{}{}", Self::TEXT_FIELD_PREFIX, self.0)
    }

    /// Parse a `text_fields` key back into a field ID.
    ///
    /// Returns `None` for keys outside the supplementary-field namespace
    /// (BaseLinker stores the product name and descriptions in the same map).
    #[must_use]
    pub fn from_text_field_key(key: &str) -> Option<Self> {
        key.strip_prefix(Self::TEXT_FIELD_PREFIX)
            .and_then(|raw| raw.parse::<i64>().ok())
            .map(Self)
    }
}

impl FromStr for ExtraFieldId {
    type Err = ParseExtraFieldIdError;

    /// Accepts either a bare field id (`484`) or the wire key form
    /// (`extra_field_484`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix(Self::TEXT_FIELD_PREFIX).unwrap_or(s);
        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| ParseExtraFieldIdError {
                input: s.to_owned(),
            })
    }
}
