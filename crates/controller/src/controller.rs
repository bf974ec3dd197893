use foundation::geo::{LatLng, surface_distance_km};
use foundation::time::Clock;
use store::{IdSource, Point, PointId, PointStore, StoreError};

use crate::events::{StoreEvent, StoreEvents};
use crate::measurement::{MeasureStep, Measurement};
use crate::prompts::UserPrompts;
use crate::surface::{MapSurface, PopupAction, PopupContent};
use crate::view_state::{ViewState, share_link};

const OFFLINE_ADD_NOTICE: &str =
    "You are offline and address lookup needs a connection. Try again once online.";
const ADD_IN_FLIGHT_NOTICE: &str =
    "Still looking up the address for the previous click. Try again in a moment.";
const OFFLINE_NOTICE: &str = "Connection lost. Saved points stay available on this device, \
but address lookup is disabled until you are back online.";
const CLEAR_ALL_CONFIRM: &str = "Really delete all saved points?";

/// Feature switches for the optional parts of the add flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Annotate each new point with its distance to the previously added one.
    pub annotate_distance: bool,
    /// Ask for an optional photo URL when adding a point.
    pub prompt_for_photo: bool,
    /// Refuse to start an add while offline (geocoding needs the network).
    pub require_online_for_add: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            annotate_distance: true,
            prompt_for_photo: true,
            require_online_for_add: true,
        }
    }
}

/// Why an add attempt did not reach the geocoding stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddRejected {
    Offline,
    AddInFlight,
}

/// The point store & view controller.
///
/// Owns the in-memory point collection and all transient interaction state,
/// keeps the collection synchronized with the [`PointStore`], and drives the
/// [`MapSurface`] incrementally on every change. All mutation goes through
/// methods here; nothing else touches the collection.
pub struct AppController<S, M, U, C> {
    store: S,
    surface: M,
    prompts: U,
    clock: C,
    config: ControllerConfig,
    points: Vec<Point>,
    ids: IdSource,
    measurement: Measurement,
    view: ViewState,
    events: StoreEvents,
    add_in_flight: bool,
    offline_notice_shown: bool,
}

impl<S, M, U, C> AppController<S, M, U, C>
where
    S: PointStore,
    M: MapSurface,
    U: UserPrompts,
    C: Clock,
{
    pub fn new(store: S, surface: M, prompts: U, clock: C, config: ControllerConfig) -> Self {
        Self {
            store,
            surface,
            prompts,
            clock,
            config,
            points: Vec::new(),
            ids: IdSource::default(),
            measurement: Measurement::default(),
            view: ViewState::default(),
            events: StoreEvents::new(),
            add_in_flight: false,
            offline_notice_shown: false,
        }
    }

    /// Loads the collection, renders one marker per stored point and applies
    /// the URL-fragment view state (or the default viewport).
    pub fn init(&mut self, fragment: Option<&str>) {
        self.points = self.store.load();
        self.ids = IdSource::seeded_from(&self.points);
        for point in &self.points {
            self.surface.add_marker(point, &point_popup(point));
        }
        self.view = fragment
            .and_then(ViewState::parse_fragment)
            .unwrap_or_default();
        self.surface.set_view(self.view);
    }

    /// Gate in front of the asynchronous geocoding call.
    ///
    /// On `Err` the user has already been notified and nothing changed. On
    /// `Ok` the add is marked in flight until [`complete_add`] or
    /// [`fail_add`] resolves it; further primary clicks are refused until
    /// then, which is how overlapping adds are kept from interleaving.
    ///
    /// [`complete_add`]: Self::complete_add
    /// [`fail_add`]: Self::fail_add
    pub fn begin_add(&mut self, online: bool) -> Result<(), AddRejected> {
        if self.config.require_online_for_add && !online {
            self.prompts.notify(OFFLINE_ADD_NOTICE);
            return Err(AddRejected::Offline);
        }
        if self.add_in_flight {
            self.prompts.notify(ADD_IN_FLIGHT_NOTICE);
            return Err(AddRejected::AddInFlight);
        }
        self.add_in_flight = true;
        Ok(())
    }

    /// Geocoding failed: surface the error and drop the pending add. No
    /// point is created and storage is untouched.
    pub fn fail_add(&mut self, error: &str) {
        self.add_in_flight = false;
        self.prompts.notify(&format!("Address lookup failed: {error}"));
    }

    /// Geocoding resolved. Prompts for the note (and optionally a photo URL)
    /// and, unless the user cancels, appends, persists and renders the new
    /// point. `Ok(None)` means the user cancelled; nothing changed.
    pub fn complete_add(
        &mut self,
        at: LatLng,
        address: &str,
    ) -> Result<Option<PointId>, StoreError> {
        self.add_in_flight = false;

        let Some(note) = self.prompts.prompt(&format!("{address}\n\nAdd a note")) else {
            return Ok(None);
        };

        let mut text = format!("{address}\n{note}");
        if self.config.annotate_distance {
            if let Some(prev) = self.points.last() {
                let km = surface_distance_km(prev.at(), at);
                text.push_str(&format!("\ndistance from previous: {km:.2} km"));
            }
        }

        let foto = if self.config.prompt_for_photo {
            self.prompts
                .prompt("Photo URL (optional)")
                .filter(|url| !url.trim().is_empty())
        } else {
            None
        };

        let point = Point {
            id: self.ids.next(self.clock.now_ms()),
            lat: at.lat,
            lng: at.lng,
            text,
            foto,
        };
        let id = point.id;

        self.points.push(point.clone());
        if let Err(err) = self.store.save(&self.points) {
            self.points.pop();
            return Err(err);
        }
        self.surface.add_marker(&point, &point_popup(&point));
        self.events.emit(StoreEvent::PointAdded(id));
        Ok(Some(id))
    }

    /// Removes exactly the point with `id` and its marker. Returns whether
    /// the point existed.
    pub fn delete_point(&mut self, id: PointId) -> Result<bool, StoreError> {
        let Some(index) = self.points.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        // Same rollback discipline as the add path: memory only diverges
        // from storage once the save has gone through.
        let removed = self.points.remove(index);
        if let Err(err) = self.store.save(&self.points) {
            self.points.insert(index, removed);
            return Err(err);
        }
        self.surface.remove_marker(id);
        self.events.emit(StoreEvent::PointRemoved(id));
        Ok(true)
    }

    /// Clears the whole collection after interactive confirmation. Returns
    /// whether anything was cleared.
    pub fn clear_all(&mut self) -> Result<bool, StoreError> {
        if !self.prompts.confirm(CLEAR_ALL_CONFIRM) {
            return Ok(false);
        }

        self.store.clear()?;
        self.points.clear();
        self.surface.clear_markers();
        self.events.emit(StoreEvent::Cleared);
        Ok(true)
    }

    /// Context-click: advances the two-click measurement.
    pub fn measure_click(&mut self, at: LatLng) {
        match self.measurement.click(at) {
            MeasureStep::Started { origin } => {
                self.surface.close_popup();
                self.surface.show_popup(origin, &measure_start_popup());
            }
            MeasureStep::Measured {
                origin,
                target,
                distance_m,
            } => {
                self.surface.clear_measure_line();
                self.surface.draw_measure_line(origin, target);
                self.surface
                    .show_popup(target, &measure_result_popup(distance_m));
            }
        }
    }

    /// Cancels any measurement in progress: line gone, popup closed, state
    /// idle. Safe to call at any time.
    pub fn cancel_measurement(&mut self) {
        self.measurement.cancel();
        self.surface.clear_measure_line();
        self.surface.close_popup();
    }

    /// Records the settled viewport and returns the fragment to publish
    /// (replacing the current one, no new history entry).
    pub fn view_settled(&mut self, zoom: u8, center: LatLng) -> String {
        self.view = ViewState { zoom, center };
        self.view.to_fragment()
    }

    /// Shareable fixed-zoom link for one coordinate.
    pub fn share_link(&self, base: &str, at: LatLng) -> String {
        share_link(base, at)
    }

    /// One-time offline notice; re-arms once connectivity returns.
    pub fn connectivity_changed(&mut self, online: bool) {
        if online {
            self.offline_notice_shown = false;
            return;
        }
        if !self.offline_notice_shown {
            self.offline_notice_shown = true;
            self.prompts.notify(OFFLINE_NOTICE);
        }
    }

    pub fn notify(&mut self, message: &str) {
        self.prompts.notify(message);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn is_measuring(&self) -> bool {
        self.measurement.is_armed()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn drain_events(&mut self) -> Vec<StoreEvent> {
        self.events.drain()
    }
}

/// Popup for a saved point: its label lines, photo if any, plus delete and
/// copy-link actions.
pub fn point_popup(point: &Point) -> PopupContent {
    PopupContent {
        lines: point.text.lines().map(str::to_string).collect(),
        photo_url: point
            .foto
            .clone()
            .filter(|url| !url.trim().is_empty()),
        actions: vec![
            PopupAction::DeletePoint { id: point.id },
            PopupAction::CopyLink {
                lat: point.lat,
                lng: point.lng,
            },
        ],
    }
}

fn measure_start_popup() -> PopupContent {
    PopupContent {
        lines: vec![
            "Measurement started.".to_string(),
            "Context-click the target, or cancel.".to_string(),
        ],
        photo_url: None,
        actions: vec![PopupAction::CancelMeasurement],
    }
}

fn measure_result_popup(distance_m: f64) -> PopupContent {
    PopupContent {
        lines: vec![format!("Distance: {:.2} km", distance_m / 1000.0)],
        photo_url: None,
        actions: vec![PopupAction::CancelMeasurement],
    }
}
