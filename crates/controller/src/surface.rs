use foundation::geo::LatLng;
use serde::Serialize;
use store::{Point, PointId};

use crate::view_state::ViewState;

/// Stroke used for the measurement line.
pub const MEASURE_LINE_COLOR: &str = "#8e1616";
pub const MEASURE_LINE_WEIGHT: f32 = 2.0;

/// Structured popup content.
///
/// The front end owns turning this into DOM and wiring the action buttons;
/// no markup strings and no globally exposed callbacks cross this seam.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PopupContent {
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub actions: Vec<PopupAction>,
}

/// A button inside a popup, routed back into the controller by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PopupAction {
    DeletePoint { id: PointId },
    CopyLink { lat: f64, lng: f64 },
    CancelMeasurement,
}

/// Rendering seam toward the tile/map library.
///
/// Clearing a line or closing a popup that does not exist is a no-op.
pub trait MapSurface {
    fn add_marker(&mut self, point: &Point, popup: &PopupContent);
    fn remove_marker(&mut self, id: PointId);
    fn clear_markers(&mut self);
    /// Draws the measurement line, replacing any previous one.
    fn draw_measure_line(&mut self, a: LatLng, b: LatLng);
    fn clear_measure_line(&mut self);
    fn show_popup(&mut self, at: LatLng, popup: &PopupContent);
    fn close_popup(&mut self);
    fn set_view(&mut self, view: ViewState);
}
