mod ui;

pub use ui::{base_layer_catalog_json, popup_json};

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod bridge;
#[cfg(target_arch = "wasm32")]
mod prompts;

#[cfg(target_arch = "wasm32")]
pub use app::*;
