//! JavaScript interop for the Leaflet map.
//! Provides Rust bindings to helper functions defined in leaflet_helpers.js.

use crate::config::{MAP_CONTAINER_ID, TILE_ATTRIBUTION, TILE_URL};
use log::warn;
use wasm_bindgen::prelude::*;
use workout_map::surface::{ClickHandler, MapSurface, MarkerOptions};
use workout_map::Coords;

#[wasm_bindgen(module = "/leaflet_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map(
        container_id: &str,
        lat: f64,
        lng: f64,
        zoom: u8,
        tile_url: &str,
        attribution: &str,
    ) -> JsValue;

    #[wasm_bindgen(js_name = onMapClick)]
    fn on_map_click(map: &JsValue, handler: &Closure<dyn FnMut(f64, f64)>);

    #[wasm_bindgen(js_name = addWorkoutMarker)]
    fn add_workout_marker(map: &JsValue, lat: f64, lng: f64, options: JsValue);
}

/// Map surface backed by a Leaflet map in the `#map` container.
#[derive(Default)]
pub struct LeafletMap {
    map: Option<JsValue>,
    // Leaflet holds references to these; they must live as long as the map.
    click_handlers: Vec<Closure<dyn FnMut(f64, f64)>>,
}

impl MapSurface for LeafletMap {
    fn render(&mut self, center: Coords, zoom: u8) {
        self.map = Some(init_map(
            MAP_CONTAINER_ID,
            center.lat,
            center.lng,
            zoom,
            TILE_URL,
            TILE_ATTRIBUTION,
        ));
    }

    fn on_click(&mut self, mut handler: ClickHandler) {
        let Some(map) = &self.map else {
            warn!("click listener registered before the map was rendered");
            return;
        };
        let closure = Closure::<dyn FnMut(f64, f64)>::new(move |lat: f64, lng: f64| {
            handler(Coords::new(lat, lng));
        });
        on_map_click(map, &closure);
        self.click_handlers.push(closure);
    }

    fn place_marker(&mut self, coords: Coords, options: MarkerOptions) {
        let Some(map) = &self.map else {
            warn!("marker at {} dropped, map not rendered", coords);
            return;
        };
        match serde_wasm_bindgen::to_value(&options) {
            Ok(js_options) => add_workout_marker(map, coords.lat, coords.lng, js_options),
            Err(e) => warn!("could not convert marker options: {}", e),
        }
    }
}
