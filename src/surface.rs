//! Collaborators the controller drives. The browser binary backs these with
//! Leaflet, the DOM and `navigator.geolocation`; tests use in-memory fakes.

use crate::workout::{Coords, WorkoutKind};
use serde::Serialize;

pub type ClickHandler = Box<dyn FnMut(Coords)>;
pub type PositionCallback = Box<dyn FnOnce(Coords)>;
pub type PositionErrorCallback = Box<dyn FnOnce()>;

/// One-shot position lookup. At most one of the two callbacks fires.
pub trait GeolocationProvider {
    fn request_current_position(&self, on_success: PositionCallback, on_error: PositionErrorCallback);
}

/// How a marker's popup looks and behaves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerOptions {
    /// CSS class of the popup, `<kind>-popup`.
    pub class_name: String,
    pub popup_text: String,
    pub auto_close: bool,
    pub close_on_click: bool,
}

pub trait MapSurface {
    fn render(&mut self, center: Coords, zoom: u8);
    fn on_click(&mut self, handler: ClickHandler);
    fn place_marker(&mut self, coords: Coords, options: MarkerOptions);
}

/// Raw form contents at submission time.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    /// `None` when the activity selector holds an unrecognised value.
    pub kind: Option<WorkoutKind>,
    pub distance: String,
    pub duration: String,
    pub temperature: String,
    pub climb: String,
}

pub trait FormSurface {
    fn read(&self) -> FormSnapshot;
    fn clear_numeric_fields(&mut self);
    /// Show the field group for `kind` and hide the other one.
    fn show_fields_for(&mut self, kind: WorkoutKind);
    fn reveal(&mut self);
    fn hide(&mut self);
    fn focus_distance(&mut self);
}

/// Blocking, alert-style message to the user.
pub trait Notifier {
    fn alert(&self, message: &str);
}
