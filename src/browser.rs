//! Browser-backed collaborators: the DOM form, `navigator.geolocation`,
//! and `window.alert`.

use crate::config::{FORM_HIDDEN_CLASS, ROW_HIDDEN_CLASS};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};
use workout_map::surface::{
    FormSnapshot, FormSurface, GeolocationProvider, Notifier, PositionCallback,
    PositionErrorCallback,
};
use workout_map::{Coords, WorkoutKind};
use yew::NodeRef;

/// Node references for every form element the controller touches.
#[derive(Clone, PartialEq, Default)]
pub struct FormRefs {
    pub form: NodeRef,
    pub kind: NodeRef,
    pub distance: NodeRef,
    pub duration: NodeRef,
    pub temperature: NodeRef,
    pub climb: NodeRef,
    pub temperature_row: NodeRef,
    pub climb_row: NodeRef,
}

/// Form surface over the rendered `<form>`. Unmounted nodes read as empty
/// and ignore writes.
pub struct DomForm {
    refs: FormRefs,
}

impl DomForm {
    pub fn new(refs: FormRefs) -> Self {
        Self { refs }
    }
}

fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

fn clear_input(node: &NodeRef) {
    if let Some(input) = node.cast::<HtmlInputElement>() {
        input.set_value("");
    }
}

fn set_class(node: &NodeRef, class: &str, present: bool) {
    let Some(el) = node.cast::<Element>() else {
        warn!("cannot toggle `{}`: node not mounted", class);
        return;
    };
    let list = el.class_list();
    let res = if present {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
    if let Err(e) = res {
        warn!("classList update failed: {:?}", e);
    }
}

impl FormSurface for DomForm {
    fn read(&self) -> FormSnapshot {
        let kind_value = self
            .refs
            .kind
            .cast::<HtmlSelectElement>()
            .map(|select| select.value())
            .unwrap_or_default();
        let kind = WorkoutKind::from_form_value(&kind_value);
        if kind.is_none() {
            warn!("unknown activity type {:?}", kind_value);
        }

        FormSnapshot {
            kind,
            distance: input_value(&self.refs.distance),
            duration: input_value(&self.refs.duration),
            temperature: input_value(&self.refs.temperature),
            climb: input_value(&self.refs.climb),
        }
    }

    fn clear_numeric_fields(&mut self) {
        clear_input(&self.refs.distance);
        clear_input(&self.refs.duration);
        clear_input(&self.refs.temperature);
        clear_input(&self.refs.climb);
    }

    fn show_fields_for(&mut self, kind: WorkoutKind) {
        set_class(
            &self.refs.temperature_row,
            ROW_HIDDEN_CLASS,
            kind != WorkoutKind::Running,
        );
        set_class(
            &self.refs.climb_row,
            ROW_HIDDEN_CLASS,
            kind != WorkoutKind::Cycling,
        );
    }

    fn reveal(&mut self) {
        set_class(&self.refs.form, FORM_HIDDEN_CLASS, false);
    }

    fn hide(&mut self) {
        set_class(&self.refs.form, FORM_HIDDEN_CLASS, true);
    }

    fn focus_distance(&mut self) {
        if let Some(input) = self.refs.distance.cast::<HtmlInputElement>() {
            if let Err(e) = input.focus() {
                warn!("focus failed: {:?}", e);
            }
        }
    }
}

/// `navigator.geolocation.getCurrentPosition`, one shot.
pub struct BrowserGeolocation;

type SharedErrorCallback = Rc<RefCell<Option<PositionErrorCallback>>>;

fn fire_error(on_error: &SharedErrorCallback) {
    let callback = on_error.borrow_mut().take();
    if let Some(callback) = callback {
        callback();
    }
}

fn coords_from_position(position: &JsValue) -> Option<Coords> {
    let coords = js_sys::Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let lat = js_sys::Reflect::get(&coords, &JsValue::from_str("latitude")).ok()?.as_f64()?;
    let lng = js_sys::Reflect::get(&coords, &JsValue::from_str("longitude")).ok()?.as_f64()?;
    Some(Coords::new(lat, lng))
}

impl GeolocationProvider for BrowserGeolocation {
    fn request_current_position(&self, on_success: PositionCallback, on_error: PositionErrorCallback) {
        let on_error: SharedErrorCallback = Rc::new(RefCell::new(Some(on_error)));

        let geolocation = match gloo_utils::window().navigator().geolocation() {
            Ok(geolocation) => geolocation,
            Err(e) => {
                warn!("geolocation not available: {:?}", e);
                fire_error(&on_error);
                return;
            }
        };

        let success = {
            let on_error = on_error.clone();
            Closure::once_into_js(move |position: JsValue| match coords_from_position(&position) {
                Some(coords) => on_success(coords),
                None => {
                    warn!("position without coordinates: {:?}", position);
                    fire_error(&on_error);
                }
            })
        };
        let failure = {
            let on_error = on_error.clone();
            Closure::once_into_js(move |err: JsValue| {
                warn!("geolocation error: {:?}", err);
                fire_error(&on_error);
            })
        };

        if let Err(e) = geolocation.get_current_position_with_error_callback(
            success.unchecked_ref(),
            Some(failure.unchecked_ref()),
        ) {
            warn!("getCurrentPosition threw: {:?}", e);
            fire_error(&on_error);
        }
    }
}

/// Blocking `window.alert`.
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn alert(&self, message: &str) {
        if let Err(e) = gloo_utils::window().alert_with_message(message) {
            warn!("alert failed: {:?}", e);
        }
    }
}
