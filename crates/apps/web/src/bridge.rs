use controller::{
    MARKER_CLASS, MEASURE_LINE_COLOR, MEASURE_LINE_WEIGHT, MapSurface, PopupContent, ViewState,
};
use foundation::geo::LatLng;
use store::{Point, PointId};
use wasm_bindgen::prelude::*;

use crate::ui::popup_json;

// The hosting page implements these on `window.mapBridge`, backed by the
// actual tile/map library. Popup JSON follows the `PopupContent` shape; the
// page renders it and routes action clicks back into the exported functions.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "mapBridge"], js_name = addMarker)]
    fn bridge_add_marker(id: f64, lat: f64, lng: f64, marker_class: &str, popup_json: &str);

    #[wasm_bindgen(js_namespace = ["window", "mapBridge"], js_name = removeMarker)]
    fn bridge_remove_marker(id: f64);

    #[wasm_bindgen(js_namespace = ["window", "mapBridge"], js_name = clearMarkers)]
    fn bridge_clear_markers();

    #[wasm_bindgen(js_namespace = ["window", "mapBridge"], js_name = drawLine)]
    fn bridge_draw_line(a_lat: f64, a_lng: f64, b_lat: f64, b_lng: f64, color: &str, weight: f32);

    #[wasm_bindgen(js_namespace = ["window", "mapBridge"], js_name = clearLine)]
    fn bridge_clear_line();

    #[wasm_bindgen(js_namespace = ["window", "mapBridge"], js_name = showPopup)]
    fn bridge_show_popup(lat: f64, lng: f64, popup_json: &str);

    #[wasm_bindgen(js_namespace = ["window", "mapBridge"], js_name = closePopup)]
    fn bridge_close_popup();

    #[wasm_bindgen(js_namespace = ["window", "mapBridge"], js_name = setView)]
    fn bridge_set_view(zoom: u8, lat: f64, lng: f64);
}

/// [`MapSurface`] that forwards every call across the JS bridge.
///
/// Point ids travel as `f64`; millisecond timestamps stay well inside the
/// 2^53 range JS numbers represent exactly.
#[derive(Debug, Default)]
pub struct BridgeSurface;

impl MapSurface for BridgeSurface {
    fn add_marker(&mut self, point: &Point, popup: &PopupContent) {
        bridge_add_marker(
            point.id.get() as f64,
            point.lat,
            point.lng,
            MARKER_CLASS,
            &popup_json(popup),
        );
    }

    fn remove_marker(&mut self, id: PointId) {
        bridge_remove_marker(id.get() as f64);
    }

    fn clear_markers(&mut self) {
        bridge_clear_markers();
    }

    fn draw_measure_line(&mut self, a: LatLng, b: LatLng) {
        bridge_draw_line(
            a.lat,
            a.lng,
            b.lat,
            b.lng,
            MEASURE_LINE_COLOR,
            MEASURE_LINE_WEIGHT,
        );
    }

    fn clear_measure_line(&mut self) {
        bridge_clear_line();
    }

    fn show_popup(&mut self, at: LatLng, popup: &PopupContent) {
        bridge_show_popup(at.lat, at.lng, &popup_json(popup));
    }

    fn close_popup(&mut self) {
        bridge_close_popup();
    }

    fn set_view(&mut self, view: ViewState) {
        bridge_set_view(view.zoom, view.center.lat, view.center.lng);
    }
}
