use std::cell::RefCell;

use console_error_panic_hook::set_once;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};

use controller::{AppController, ControllerConfig, StoreEvent};
use foundation::geo::LatLng;
use foundation::time::SystemClock;
use store::{DEFAULT_STORAGE_KEY, LocalStoragePointStore, PointId};

use crate::bridge::BridgeSurface;
use crate::prompts::WindowPrompts;
use crate::ui::base_layer_catalog_json;

type WebController =
    AppController<LocalStoragePointStore, BridgeSurface, WindowPrompts, SystemClock>;

thread_local! {
    static STATE: RefCell<WebController> = RefCell::new(AppController::new(
        LocalStoragePointStore::new(DEFAULT_STORAGE_KEY),
        BridgeSurface,
        WindowPrompts,
        SystemClock,
        ControllerConfig::default(),
    ));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Loads the stored points, renders their markers and applies the URL
/// fragment view state. Call once after the map bridge is ready.
#[wasm_bindgen]
pub fn init_app() {
    let fragment = web_sys::window().and_then(|win| win.location().hash().ok());
    STATE.with(|state| state.borrow_mut().init(fragment.as_deref()));
    log_store_events();
}

/// Base tile-style catalog for the layer-switcher control, as JSON.
#[wasm_bindgen]
pub fn base_layers() -> String {
    base_layer_catalog_json()
}

/// Primary map click: geocode the coordinate, then prompt and save.
///
/// The geocoding await keeps the UI responsive; overlapping clicks are
/// refused by the controller until this add resolves.
#[wasm_bindgen]
pub fn on_map_click(lat: f64, lng: f64) {
    let at = LatLng::new(lat, lng);
    let online = navigator_online();

    let proceed = STATE.with(|state| state.borrow_mut().begin_add(online).is_ok());
    if !proceed {
        return;
    }

    spawn_local(async move {
        match geocode::reverse_geocode(at).await {
            Ok(address) => {
                let result = STATE.with(|state| state.borrow_mut().complete_add(at, &address));
                if let Err(err) = result {
                    STATE.with(|state| {
                        state
                            .borrow_mut()
                            .notify(&format!("Saving the point failed: {err}"))
                    });
                }
                log_store_events();
            }
            Err(err) => {
                STATE.with(|state| state.borrow_mut().fail_add(&err.to_string()));
            }
        }
    });
}

/// Context click: advances the two-click distance measurement. The hosting
/// page suppresses the platform context menu before calling this.
#[wasm_bindgen]
pub fn on_context_click(lat: f64, lng: f64) {
    STATE.with(|state| state.borrow_mut().measure_click(LatLng::new(lat, lng)));
}

#[wasm_bindgen]
pub fn cancel_measurement() {
    STATE.with(|state| state.borrow_mut().cancel_measurement());
}

/// Popup delete action.
#[wasm_bindgen]
pub fn delete_point(id: f64) {
    let result = STATE.with(|state| state.borrow_mut().delete_point(PointId::new(id as u64)));
    if let Err(err) = result {
        STATE.with(|state| {
            state
                .borrow_mut()
                .notify(&format!("Deleting the point failed: {err}"))
        });
    }
    log_store_events();
}

/// Toolbar clear-all action; asks for confirmation first.
#[wasm_bindgen]
pub fn clear_all() {
    let result = STATE.with(|state| state.borrow_mut().clear_all());
    if let Err(err) = result {
        STATE.with(|state| {
            state
                .borrow_mut()
                .notify(&format!("Clearing the points failed: {err}"))
        });
    }
    log_store_events();
}

/// Popup copy-link action: writes a fixed-zoom link for the coordinate to
/// the system clipboard.
#[wasm_bindgen]
pub fn copy_share_link(lat: f64, lng: f64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let base = window.location().href().unwrap_or_default();
    let link = STATE.with(|state| state.borrow().share_link(&base, LatLng::new(lat, lng)));

    let clipboard = window.navigator().clipboard();
    spawn_local(async move {
        let message = match JsFuture::from(clipboard.write_text(&link)).await {
            Ok(_) => "Link copied to clipboard.".to_string(),
            Err(_) => "Could not write to the clipboard.".to_string(),
        };
        STATE.with(|state| state.borrow_mut().notify(&message));
    });
}

/// Viewport settled (pan/zoom finished): mirrors the view into the URL
/// fragment, replacing the current history entry.
#[wasm_bindgen]
pub fn on_view_settled(zoom: u8, lat: f64, lng: f64) -> Result<(), JsValue> {
    let fragment =
        STATE.with(|state| state.borrow_mut().view_settled(zoom, LatLng::new(lat, lng)));

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window
        .history()?
        .replace_state_with_url(&JsValue::NULL, "", Some(&format!("#{fragment}")))
}

/// Online/offline transitions from the hosting page's connectivity events.
#[wasm_bindgen]
pub fn on_connectivity_changed(online: bool) {
    STATE.with(|state| state.borrow_mut().connectivity_changed(online));
}

fn navigator_online() -> bool {
    web_sys::window()
        .map(|win| win.navigator().on_line())
        .unwrap_or(false)
}

fn log_store_events() {
    let events = STATE.with(|state| state.borrow_mut().drain_events());
    for event in events {
        let line = match event {
            StoreEvent::PointAdded(id) => format!("point {} added", id.get()),
            StoreEvent::PointRemoved(id) => format!("point {} removed", id.get()),
            StoreEvent::Cleared => "all points cleared".to_string(),
        };
        web_sys::console::log_1(&JsValue::from_str(&line));
    }
}
