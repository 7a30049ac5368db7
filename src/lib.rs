//! Core of the workout map: data model, validation, the in-memory store and
//! the controller that drives the map and form. Nothing here touches the DOM;
//! the browser binary plugs its adapters into the traits in [`surface`].

use std::fmt;

pub mod controller;
pub mod store;
pub mod surface;
pub mod validation;
pub mod workout;

pub use controller::{start, with_controller, Controller, ControllerState, SharedController};
pub use store::WorkoutStore;
pub use workout::{Coords, Cycling, Running, Workout, WorkoutId, WorkoutKind};

/// Map and popup parameters
pub mod defaults {
    pub const MAP_ZOOM: u8 = 13;
    pub const POPUP_AUTO_CLOSE: bool = false;
    pub const POPUP_CLOSE_ON_CLICK: bool = false;
}

/// Failures the user is told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerError {
    /// Geolocation denied, failed, or not supported.
    LocationUnavailable,
    /// A required field is not a finite number greater than zero.
    InvalidInput,
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::LocationUnavailable => write!(f, "Could not get your position"),
            TrackerError::InvalidInput => write!(f, "Inputs have to be positive numbers!"),
        }
    }
}

impl std::error::Error for TrackerError {}

/// Format a metric with one decimal place, e.g. `5.7`.
pub fn format_metric(value: f64) -> String {
    format!("{:.1}", value)
}
