//! Interaction controller: turns a location fix, a map click and a form
//! submission into a stored, plotted workout.

use crate::defaults;
use crate::store::WorkoutStore;
use crate::surface::{ClickHandler, FormSurface, GeolocationProvider, MapSurface, MarkerOptions, Notifier};
use crate::validation::{parse_field, validate, FieldValues};
use crate::workout::{Coords, Workout, WorkoutId, WorkoutKind};
use crate::TrackerError;
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerState {
    AwaitingLocation,
    /// Map rendered and listening; handles events like `AwaitingClick`.
    MapReady,
    AwaitingClick,
    /// Form shown for the click at these coordinates.
    FormOpen(Coords),
}

/// The single controller of a page session.
pub type SharedController<M, F, N> = Rc<RefCell<Controller<M, F, N>>>;

pub struct Controller<M, F, N> {
    map: M,
    form: F,
    notifier: N,
    workouts: WorkoutStore,
    state: ControllerState,
}

impl<M, F, N> Controller<M, F, N>
where
    M: MapSurface,
    F: FormSurface,
    N: Notifier,
{
    pub fn new(map: M, form: F, notifier: N) -> Self {
        Self {
            map,
            form,
            notifier,
            workouts: WorkoutStore::new(),
            state: ControllerState::AwaitingLocation,
        }
    }

    pub fn into_shared(self) -> SharedController<M, F, N> {
        Rc::new(RefCell::new(self))
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn workouts(&self) -> &WorkoutStore {
        &self.workouts
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Center the map on the user's position and start listening for clicks.
    /// Only the first fix is used.
    pub fn location_resolved(&mut self, center: Coords, on_click: ClickHandler) {
        if self.state != ControllerState::AwaitingLocation {
            warn!("ignoring location fix in state {:?}", self.state);
            return;
        }
        debug!(
            "https://www.google.com/maps/@{},{},14z",
            center.lat, center.lng
        );
        self.map.render(center, defaults::MAP_ZOOM);
        self.map.on_click(on_click);
        self.state = ControllerState::MapReady;
        info!("map ready at {}", center);
    }

    pub fn location_failed(&mut self) {
        warn!("geolocation failed");
        self.notifier.alert(&TrackerError::LocationUnavailable.to_string());
    }

    /// Remember the click and open the form. A later click replaces an
    /// earlier one that was never submitted.
    pub fn map_clicked(&mut self, coords: Coords) {
        if self.state == ControllerState::AwaitingLocation {
            warn!("map click before map was rendered");
            return;
        }
        if let ControllerState::FormOpen(previous) = self.state {
            debug!("replacing pending click {} with {}", previous, coords);
        }
        self.state = ControllerState::FormOpen(coords);
        self.form.reveal();
        self.form.focus_distance();
        debug!("form open for {}", coords);
    }

    pub fn activity_changed(&mut self, kind: WorkoutKind) {
        self.form.show_fields_for(kind);
    }

    /// Handle a form submission.
    ///
    /// Returns the id of the new workout, `Ok(None)` when no map click is
    /// pending, or `InvalidInput` after alerting the user. A rejected
    /// submission leaves the form and the state untouched.
    pub fn submit(&mut self) -> Result<Option<WorkoutId>, TrackerError> {
        let ControllerState::FormOpen(coords) = self.state else {
            warn!("submit with no pending map click in state {:?}", self.state);
            return Ok(None);
        };

        let snapshot = self.form.read();
        let Some(kind) = snapshot.kind else {
            info!("rejected submission with unknown activity type");
            let e = TrackerError::InvalidInput;
            self.notifier.alert(&e.to_string());
            return Err(e);
        };
        let extra = match kind {
            WorkoutKind::Running => &snapshot.temperature,
            WorkoutKind::Cycling => &snapshot.climb,
        };
        let values = FieldValues {
            distance: parse_field(&snapshot.distance),
            duration: parse_field(&snapshot.duration),
            extra: parse_field(extra),
        };

        let entry = match validate(kind, values) {
            Ok(entry) => entry,
            Err(e) => {
                info!("rejected {} submission: {:?}", kind, values);
                self.notifier.alert(&e.to_string());
                return Err(e);
            }
        };

        let workout = Workout::new(entry.kind, coords, entry.distance, entry.duration, entry.extra);
        let id = workout.id();
        match serde_json::to_string(&workout) {
            Ok(json) => debug!("workout recorded: {}", json),
            Err(e) => warn!("could not serialise workout {}: {}", id, e),
        }

        let options = marker_options(&workout);
        self.workouts.append(workout);
        self.map.place_marker(coords, options);

        self.form.clear_numeric_fields();
        self.form.hide();
        self.state = ControllerState::AwaitingClick;
        Ok(Some(id))
    }
}

fn marker_options(workout: &Workout) -> MarkerOptions {
    MarkerOptions {
        class_name: format!("{}-popup", workout.kind()),
        popup_text: workout.description(),
        auto_close: defaults::POPUP_AUTO_CLOSE,
        close_on_click: defaults::POPUP_CLOSE_ON_CLICK,
    }
}

/// Ask for the user's position and wire the map click handler once it
/// arrives. Callbacks hold a weak reference, so a dropped controller simply
/// ignores late events.
pub fn start<M, F, N, G>(controller: &SharedController<M, F, N>, geolocation: &G)
where
    M: MapSurface + 'static,
    F: FormSurface + 'static,
    N: Notifier + 'static,
    G: GeolocationProvider + ?Sized,
{
    let on_success = {
        let weak = Rc::downgrade(controller);
        Box::new(move |center: Coords| {
            let Some(ctrl) = weak.upgrade() else { return };
            let on_click = click_handler(Rc::downgrade(&ctrl));
            with_controller(&ctrl, |c| c.location_resolved(center, on_click));
        })
    };
    let on_error = {
        let weak = Rc::downgrade(controller);
        Box::new(move || {
            if let Some(ctrl) = weak.upgrade() {
                with_controller(&ctrl, |c| c.location_failed());
            }
        })
    };
    geolocation.request_current_position(on_success, on_error);
}

/// Run `f` against the controller unless something else already holds it.
/// A busy controller drops the event with a warning instead of panicking.
pub fn with_controller<M, F, N, R>(
    controller: &SharedController<M, F, N>,
    f: impl FnOnce(&mut Controller<M, F, N>) -> R,
) -> Option<R> {
    let outcome = controller.try_borrow_mut();
    match outcome {
        Ok(mut ctrl) => Some(f(&mut ctrl)),
        Err(_) => {
            warn!("controller busy, dropping event");
            None
        }
    }
}

fn click_handler<M, F, N>(weak: std::rc::Weak<RefCell<Controller<M, F, N>>>) -> ClickHandler
where
    M: MapSurface + 'static,
    F: FormSurface + 'static,
    N: Notifier + 'static,
{
    Box::new(move |coords| {
        let Some(ctrl) = weak.upgrade() else { return };
        with_controller(&ctrl, |c| c.map_clicked(coords));
    })
}
