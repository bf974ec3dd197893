pub mod controller;
pub mod events;
pub mod layers;
pub mod measurement;
pub mod prompts;
pub mod surface;
pub mod view_state;

pub use controller::{AddRejected, AppController, ControllerConfig, point_popup};
pub use events::{StoreEvent, StoreEvents};
pub use layers::{BaseLayer, MARKER_CLASS};
pub use measurement::{MeasureStep, Measurement};
pub use prompts::UserPrompts;
pub use surface::{MEASURE_LINE_COLOR, MEASURE_LINE_WEIGHT, MapSurface, PopupAction, PopupContent};
pub use view_state::{SHARE_ZOOM, ViewState, share_link};
