use controller::{BaseLayer, PopupContent};

/// JSON catalog of the selectable base tile styles, consumed by the hosting
/// page's layer-switcher control.
pub fn base_layer_catalog_json() -> String {
    let entries: Vec<serde_json::Value> = BaseLayer::ALL
        .iter()
        .map(|layer| {
            serde_json::json!({
                "id": layer,
                "label": layer.label(),
                "url": layer.url_template(),
                "attribution": layer.attribution(),
                "default": *layer == BaseLayer::default(),
            })
        })
        .collect();
    serde_json::Value::Array(entries).to_string()
}

/// Serializes popup content for the map bridge. The hosting page renders the
/// lines and wires one listener per action descriptor.
pub fn popup_json(popup: &PopupContent) -> String {
    serde_json::to_string(popup).unwrap_or_else(|_| "{}".to_string())
}
