use crate::browser::{AlertNotifier, BrowserGeolocation, DomForm, FormRefs};
use crate::map::LeafletMap;
use log::{debug, warn};
use std::rc::Rc;
use web_sys::HtmlSelectElement;
use workout_map::{start, with_controller, Controller, SharedController, WorkoutKind};
use yew::prelude::*;

pub type BrowserController = SharedController<LeafletMap, DomForm, AlertNotifier>;

/// The page's controller plus the callbacks the form needs.
#[derive(Clone)]
pub struct WorkoutTracker {
    pub controller: BrowserController,
    /// Node references the form must attach to its elements.
    pub refs: Rc<FormRefs>,
    /// Submit handler; prevents navigation and records the workout.
    pub on_submit: Callback<SubmitEvent>,
    /// `change` handler of the activity type `<select>`.
    pub on_kind_change: Callback<Event>,
}

/// Create the one controller of this page and request the user's position
/// after the first render, once `#map` and the form are mounted.
#[hook]
pub fn use_workout_tracker() -> WorkoutTracker {
    let refs = use_memo((), |_| FormRefs::default());
    let form_refs = (*refs).clone();
    let controller: BrowserController = use_mut_ref(move || {
        Controller::new(LeafletMap::default(), DomForm::new(form_refs), AlertNotifier)
    });
    let force_update = use_force_update();

    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            start(&controller, &BrowserGeolocation);
            || ()
        });
    }

    let on_submit = {
        let controller = controller.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let recorded = with_controller(&controller, |c| c.submit());
            if let Some(Ok(Some(id))) = recorded {
                debug!("workout {} added to list", id);
                force_update.force_update();
            }
        })
    };

    let on_kind_change = {
        let controller = controller.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match WorkoutKind::from_form_value(&select.value()) {
                Some(kind) => {
                    with_controller(&controller, |c| c.activity_changed(kind));
                }
                None => warn!("unknown activity type {:?}", select.value()),
            }
        })
    };

    WorkoutTracker {
        controller,
        refs,
        on_submit,
        on_kind_change,
    }
}
