//! Main module for the workout map application using Yew.
//! Wires the controller hook, the entry form, the workout list and the map.

use log::info;
use yew::prelude::*;

mod browser;
mod components;
mod config;
mod hooks;
mod map;

use components::{render_workouts, WorkoutForm};
use config::{LOG_LEVEL, MAP_CONTAINER_ID};
use hooks::use_workout_tracker;

/// Primary application component: sidebar with form and list, map beside it.
#[function_component(App)]
fn app() -> Html {
    let tracker = use_workout_tracker();
    let list = match tracker.controller.try_borrow() {
        Ok(controller) => render_workouts(controller.workouts().all()),
        Err(_) => html! {},
    };

    html! {
        <div class="app">
            <div class="sidebar">
                <WorkoutForm
                    refs={tracker.refs.clone()}
                    on_submit={tracker.on_submit.clone()}
                    on_kind_change={tracker.on_kind_change.clone()}
                />
                { list }
            </div>
            <div id={MAP_CONTAINER_ID}></div>
        </div>
    }
}

/// Entry point: installs panic and log hooks, then renders the app.
fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(LOG_LEVEL));
    info!("starting workout map");
    yew::Renderer::<App>::new().render();
}
