use std::cell::RefCell;
use std::rc::Rc;

use workout_map::surface::{
    ClickHandler, FormSnapshot, FormSurface, GeolocationProvider, MapSurface, MarkerOptions,
    Notifier, PositionCallback, PositionErrorCallback,
};
use workout_map::{start, Controller, ControllerState, Coords, SharedController, Workout, WorkoutKind};

#[derive(Default)]
struct MapLog {
    rendered: Option<(Coords, u8)>,
    markers: Vec<(Coords, MarkerOptions)>,
    handlers: Vec<ClickHandler>,
}

/// Map fake; the test keeps a clone of the log so it can fire clicks without
/// borrowing the controller.
#[derive(Clone, Default)]
struct FakeMap(Rc<RefCell<MapLog>>);

impl FakeMap {
    fn click(&self, coords: Coords) {
        let mut handlers = std::mem::take(&mut self.0.borrow_mut().handlers);
        for h in handlers.iter_mut() {
            h(coords);
        }
        self.0.borrow_mut().handlers = handlers;
    }
}

impl MapSurface for FakeMap {
    fn render(&mut self, center: Coords, zoom: u8) {
        self.0.borrow_mut().rendered = Some((center, zoom));
    }

    fn on_click(&mut self, handler: ClickHandler) {
        self.0.borrow_mut().handlers.push(handler);
    }

    fn place_marker(&mut self, coords: Coords, options: MarkerOptions) {
        self.0.borrow_mut().markers.push((coords, options));
    }
}

#[derive(Debug)]
struct FormState {
    kind: Option<WorkoutKind>,
    distance: String,
    duration: String,
    temperature: String,
    climb: String,
    visible: bool,
    focused_distance: bool,
    temperature_row_visible: bool,
    climb_row_visible: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            kind: Some(WorkoutKind::Running),
            distance: String::new(),
            duration: String::new(),
            temperature: String::new(),
            climb: String::new(),
            visible: false,
            focused_distance: false,
            temperature_row_visible: true,
            climb_row_visible: false,
        }
    }
}

#[derive(Clone, Default)]
struct FakeForm(Rc<RefCell<FormState>>);

impl FakeForm {
    fn fill(&self, kind: WorkoutKind, distance: &str, duration: &str, extra: &str) {
        let mut s = self.0.borrow_mut();
        s.kind = Some(kind);
        s.distance = distance.to_string();
        s.duration = duration.to_string();
        match kind {
            WorkoutKind::Running => s.temperature = extra.to_string(),
            WorkoutKind::Cycling => s.climb = extra.to_string(),
        }
    }
}

impl FormSurface for FakeForm {
    fn read(&self) -> FormSnapshot {
        let s = self.0.borrow();
        FormSnapshot {
            kind: s.kind,
            distance: s.distance.clone(),
            duration: s.duration.clone(),
            temperature: s.temperature.clone(),
            climb: s.climb.clone(),
        }
    }

    fn clear_numeric_fields(&mut self) {
        let mut s = self.0.borrow_mut();
        s.distance.clear();
        s.duration.clear();
        s.temperature.clear();
        s.climb.clear();
    }

    fn show_fields_for(&mut self, kind: WorkoutKind) {
        let mut s = self.0.borrow_mut();
        s.temperature_row_visible = kind == WorkoutKind::Running;
        s.climb_row_visible = kind == WorkoutKind::Cycling;
    }

    fn reveal(&mut self) {
        self.0.borrow_mut().visible = true;
    }

    fn hide(&mut self) {
        self.0.borrow_mut().visible = false;
    }

    fn focus_distance(&mut self) {
        self.0.borrow_mut().focused_distance = true;
    }
}

#[derive(Clone, Default)]
struct FakeNotifier(Rc<RefCell<Vec<String>>>);

impl Notifier for FakeNotifier {
    fn alert(&self, message: &str) {
        self.0.borrow_mut().push(message.to_string());
    }
}

enum FakeGeolocation {
    At(Coords),
    Denied,
}

impl GeolocationProvider for FakeGeolocation {
    fn request_current_position(&self, on_success: PositionCallback, on_error: PositionErrorCallback) {
        match self {
            FakeGeolocation::At(coords) => on_success(*coords),
            FakeGeolocation::Denied => on_error(),
        }
    }
}

struct Harness {
    controller: SharedController<FakeMap, FakeForm, FakeNotifier>,
    map: FakeMap,
    form: FakeForm,
    alerts: FakeNotifier,
}

fn harness(geolocation: FakeGeolocation) -> Harness {
    let map = FakeMap::default();
    let form = FakeForm::default();
    let alerts = FakeNotifier::default();
    let controller = Controller::new(map.clone(), form.clone(), alerts.clone()).into_shared();
    start(&controller, &geolocation);
    Harness { controller, map, form, alerts }
}

#[test]
fn location_centers_map_and_awaits_click() {
    let h = harness(FakeGeolocation::At(Coords::new(50.0, 39.0)));

    assert_eq!(h.controller.borrow().state(), ControllerState::MapReady);
    assert_eq!(h.map.0.borrow().rendered, Some((Coords::new(50.0, 39.0), 13)));
    assert_eq!(h.map.0.borrow().handlers.len(), 1);
    assert!(h.alerts.0.borrow().is_empty());
}

#[test]
fn location_failure_alerts_once_and_renders_nothing() {
    let h = harness(FakeGeolocation::Denied);

    assert_eq!(h.controller.borrow().state(), ControllerState::AwaitingLocation);
    assert!(h.map.0.borrow().rendered.is_none());
    assert_eq!(*h.alerts.0.borrow(), vec!["Could not get your position".to_string()]);
}

#[test]
fn map_click_opens_form_with_focus() {
    let h = harness(FakeGeolocation::At(Coords::new(50.0, 39.0)));
    h.map.click(Coords::new(51.0, 40.0));

    assert_eq!(
        h.controller.borrow().state(),
        ControllerState::FormOpen(Coords::new(51.0, 40.0))
    );
    let form = h.form.0.borrow();
    assert!(form.visible);
    assert!(form.focused_distance);
}

#[test]
fn running_submission_records_pace() {
    let h = harness(FakeGeolocation::At(Coords::new(50.0, 39.0)));
    h.map.click(Coords::new(51.0, 40.0));
    h.form.fill(WorkoutKind::Running, "7", "40", "170");

    let id = h.controller.borrow_mut().submit().unwrap().expect("workout recorded");

    let ctrl = h.controller.borrow();
    let workouts = ctrl.workouts();
    assert_eq!(workouts.len(), 1);
    let w = workouts.get(id).unwrap();
    assert_eq!(w.coords(), Coords::new(51.0, 40.0));
    match w {
        Workout::Running(r) => {
            assert!((r.pace() - 40.0 / 7.0).abs() < 1e-9);
            assert!((r.pace() - 5.714).abs() < 1e-3);
            assert_eq!(r.temperature(), 170.0);
        }
        other => panic!("expected running, got {other:?}"),
    }
    assert_eq!(ctrl.state(), ControllerState::AwaitingClick);
}

#[test]
fn cycling_submission_records_speed() {
    let h = harness(FakeGeolocation::At(Coords::new(50.0, 39.0)));
    h.map.click(Coords::new(51.0, 40.0));
    h.form.fill(WorkoutKind::Cycling, "30", "80", "370");

    h.controller.borrow_mut().submit().unwrap();

    let ctrl = h.controller.borrow();
    assert_eq!(ctrl.workouts().len(), 1);
    let w = &ctrl.workouts().all()[0];
    assert_eq!(w.kind(), WorkoutKind::Cycling);
    assert_eq!(w.coords(), Coords::new(51.0, 40.0));
    assert!((w.metric() - 0.00625).abs() < 1e-12);
    assert_eq!(w.extra(), 370.0);
}

#[test]
fn success_places_marker_clears_fields_and_hides_form() {
    let h = harness(FakeGeolocation::At(Coords::new(50.0, 39.0)));
    h.map.click(Coords::new(51.0, 40.0));
    h.form.fill(WorkoutKind::Running, "7", "40", "170");
    h.form.0.borrow_mut().climb = "12".to_string();

    h.controller.borrow_mut().submit().unwrap();

    let map = h.map.0.borrow();
    let markers = &map.markers;
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].0, Coords::new(51.0, 40.0));
    assert_eq!(markers[0].1.class_name, "running-popup");

    let form = h.form.0.borrow();
    assert!(form.distance.is_empty());
    assert!(form.duration.is_empty());
    assert!(form.temperature.is_empty());
    assert!(form.climb.is_empty());
    assert!(!form.visible);
}

#[test]
fn negative_distance_is_rejected_without_side_effects() {
    let h = harness(FakeGeolocation::At(Coords::new(50.0, 39.0)));
    h.map.click(Coords::new(51.0, 40.0));
    h.form.fill(WorkoutKind::Running, "-1", "40", "170");

    let result = h.controller.borrow_mut().submit();

    assert_eq!(result, Err(workout_map::TrackerError::InvalidInput));
    assert!(h.controller.borrow().workouts().is_empty());
    assert!(h.map.0.borrow().markers.is_empty());
    assert_eq!(
        *h.alerts.0.borrow(),
        vec!["Inputs have to be positive numbers!".to_string()]
    );
    let form = h.form.0.borrow();
    assert_eq!(form.distance, "-1");
    assert_eq!(form.temperature, "170");
    assert!(form.visible);
    assert_eq!(
        h.controller.borrow().state(),
        ControllerState::FormOpen(Coords::new(51.0, 40.0))
    );
}

#[test]
fn non_positive_climb_is_rejected() {
    let h = harness(FakeGeolocation::At(Coords::new(50.0, 39.0)));
    h.map.click(Coords::new(51.0, 40.0));
    h.form.fill(WorkoutKind::Cycling, "30", "80", "0");

    assert!(h.controller.borrow_mut().submit().is_err());
    assert!(h.controller.borrow().workouts().is_empty());
}

#[test]
fn non_numeric_input_is_rejected() {
    let h = harness(FakeGeolocation::At(Coords::new(50.0, 39.0)));
    h.map.click(Coords::new(51.0, 40.0));
    h.form.fill(WorkoutKind::Cycling, "thirty", "80", "370");

    assert!(h.controller.borrow_mut().submit().is_err());
    assert_eq!(h.alerts.0.borrow().len(), 1);
}

#[test]
fn unrecognised_activity_type_is_rejected() {
    let h = harness(FakeGeolocation::At(Coords::new(50.0, 39.0)));
    h.map.click(Coords::new(51.0, 40.0));
    h.form.fill(WorkoutKind::Running, "7", "40", "170");
    h.form.0.borrow_mut().kind = None;

    let result = h.controller.borrow_mut().submit();

    assert_eq!(result, Err(workout_map::TrackerError::InvalidInput));
    assert!(h.controller.borrow().workouts().is_empty());
    assert!(h.map.0.borrow().markers.is_empty());
    assert_eq!(h.alerts.0.borrow().len(), 1);
    assert_eq!(h.form.0.borrow().distance, "7");
}

#[test]
fn second_click_replaces_pending_coords() {
    let h = harness(FakeGeolocation::At(Coords::new(50.0, 39.0)));
    h.map.click(Coords::new(51.0, 40.0));
    h.map.click(Coords::new(52.0, 41.0));
    h.form.fill(WorkoutKind::Running, "5", "25", "18");

    h.controller.borrow_mut().submit().unwrap();

    let ctrl = h.controller.borrow();
    assert_eq!(ctrl.workouts().len(), 1);
    assert_eq!(ctrl.workouts().all()[0].coords(), Coords::new(52.0, 41.0));
}

#[test]
fn workouts_keep_submission_order() {
    let h = harness(FakeGeolocation::At(Coords::new(50.0, 39.0)));

    h.map.click(Coords::new(51.0, 40.0));
    h.form.fill(WorkoutKind::Running, "7", "40", "170");
    h.controller.borrow_mut().submit().unwrap();

    h.map.click(Coords::new(52.0, 41.0));
    h.form.fill(WorkoutKind::Cycling, "30", "80", "370");
    h.controller.borrow_mut().submit().unwrap();

    let kinds: Vec<_> = h.controller.borrow().workouts().iter().map(Workout::kind).collect();
    assert_eq!(kinds, vec![WorkoutKind::Running, WorkoutKind::Cycling]);
}

#[test]
fn activity_change_toggles_field_groups_both_ways() {
    let h = harness(FakeGeolocation::At(Coords::new(50.0, 39.0)));
    h.map.click(Coords::new(51.0, 40.0));

    h.controller.borrow_mut().activity_changed(WorkoutKind::Cycling);
    {
        let form = h.form.0.borrow();
        assert!(form.climb_row_visible);
        assert!(!form.temperature_row_visible);
    }

    h.controller.borrow_mut().activity_changed(WorkoutKind::Running);
    {
        let form = h.form.0.borrow();
        assert!(form.temperature_row_visible);
        assert!(!form.climb_row_visible);
    }
    assert_eq!(
        h.controller.borrow().state(),
        ControllerState::FormOpen(Coords::new(51.0, 40.0))
    );
}

#[test]
fn dropped_controller_ignores_late_clicks() {
    let h = harness(FakeGeolocation::At(Coords::new(50.0, 39.0)));
    let map = h.map.clone();
    drop(h);
    map.click(Coords::new(51.0, 40.0));
}
