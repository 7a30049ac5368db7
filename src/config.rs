//! Application-level configuration constants.

use log::Level;

// Map
pub const MAP_CONTAINER_ID: &str = "map";
pub const TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

// Form CSS classes
pub const FORM_HIDDEN_CLASS: &str = "hidden";
pub const ROW_HIDDEN_CLASS: &str = "form__row--hidden";

// Logging
pub const LOG_LEVEL: Level = Level::Debug;
