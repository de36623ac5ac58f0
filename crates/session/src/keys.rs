//! Key-value store keys owned by this crate.
//!
//! The names are shared with the web front end's local storage, so
//! existing browser state can be imported as-is. Do not rename.

pub const PAST_SEARCHES: &str = "ol-past-searches";
pub const USER_ROLE: &str = "ol-user-role";
pub const THEME: &str = "theme";
pub const FILTER_FORMAT: &str = "ol-filter-format";
pub const FILTER_AVAILABLE_NOW: &str = "ol-filter-available-now";
pub const FILTER_LANGUAGE: &str = "ol-filter-language";
