//! Yew view components for the workout map UI.
//!
//! The form is rendered once and then driven through node references by the
//! controller; the list is a pure function of the stored workouts.

use crate::browser::FormRefs;
use std::rc::Rc;
use workout_map::{format_metric, Workout};
use yew::prelude::*;

/// Renders the recorded workouts, oldest first.
pub fn render_workouts(workouts: &[Workout]) -> Html {
    if workouts.is_empty() {
        return html! {
            <p class="workouts__empty">{ "Click on the map to log a workout" }</p>
        };
    }

    html! {
        <ul class="workouts">
            { workouts.iter().map(render_workout_item).collect::<Html>() }
        </ul>
    }
}

fn render_detail(icon: &str, value: String, unit: &str) -> Html {
    html! {
        <div class="workout__details">
            <span class="workout__icon">{ icon }</span>
            <span class="workout__value">{ value }</span>
            <span class="workout__unit">{ unit }</span>
        </div>
    }
}

/// Renders a single list entry
fn render_workout_item(workout: &Workout) -> Html {
    let specific = match workout {
        Workout::Running(r) => html! {
            <>
                { render_detail("⚡️", format_metric(r.pace()), "min/km") }
                { render_detail("🌡", format_metric(r.temperature()), "°C") }
            </>
        },
        Workout::Cycling(c) => html! {
            <>
                { render_detail("⚡️", format!("{:.5}", c.speed()), "km/min") }
                { render_detail("⛰", format_metric(c.climb()), "m") }
            </>
        },
    };
    let icon = match workout {
        Workout::Running(_) => "🏃‍♂️",
        Workout::Cycling(_) => "🚴‍♀️",
    };

    html! {
        <li class={classes!("workout", format!("workout--{}", workout.kind()))}
            data-id={workout.id().to_string()}>
            <h2 class="workout__title">{ workout.description() }</h2>
            { render_detail(icon, format_metric(workout.distance()), "km") }
            { render_detail("⏱", format_metric(workout.duration()), "min") }
            { specific }
        </li>
    }
}

#[derive(Properties, PartialEq)]
pub struct WorkoutFormProps {
    pub refs: Rc<FormRefs>,
    pub on_submit: Callback<SubmitEvent>,
    pub on_kind_change: Callback<Event>,
}

/// Entry form. Starts hidden; a map click reveals it.
#[function_component(WorkoutForm)]
pub fn workout_form(props: &WorkoutFormProps) -> Html {
    let refs = &props.refs;
    html! {
        <form class="form hidden" ref={refs.form.clone()} onsubmit={props.on_submit.clone()}>
            <div class="form__row">
                <label class="form__label">{ "Type" }</label>
                <select class="form__input form__input--type"
                    ref={refs.kind.clone()}
                    onchange={props.on_kind_change.clone()}>
                    <option value="running">{ "Running" }</option>
                    <option value="cycling">{ "Cycling" }</option>
                </select>
            </div>
            <div class="form__row">
                <label class="form__label">{ "Distance" }</label>
                <input class="form__input form__input--distance" placeholder="km"
                    ref={refs.distance.clone()} />
            </div>
            <div class="form__row">
                <label class="form__label">{ "Duration" }</label>
                <input class="form__input form__input--duration" placeholder="min"
                    ref={refs.duration.clone()} />
            </div>
            <div class="form__row" ref={refs.temperature_row.clone()}>
                <label class="form__label">{ "Temp" }</label>
                <input class="form__input form__input--temp" placeholder="°C"
                    ref={refs.temperature.clone()} />
            </div>
            <div class="form__row form__row--hidden" ref={refs.climb_row.clone()}>
                <label class="form__label">{ "Climb" }</label>
                <input class="form__input form__input--climb" placeholder="meters"
                    ref={refs.climb.clone()} />
            </div>
            <button class="form__btn">{ "OK" }</button>
        </form>
    }
}
