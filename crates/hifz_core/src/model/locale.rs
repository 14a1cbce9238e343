//! Display-language mapping tables.
//!
//! Persisted data never contains localized text; views pick a `Locale` and
//! resolve labels here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Arabic,
    English,
}
