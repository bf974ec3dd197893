use serde::Serialize;

/// CSS class applied to point markers by the front end.
pub const MARKER_CLASS: &str = "red-marker";

/// Selectable base tile styles, exposed to the front end's layer switcher.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseLayer {
    Light,
    #[default]
    Dark,
    Satellite,
}

impl BaseLayer {
    /// All styles, default first, in switcher order.
    pub const ALL: [BaseLayer; 3] = [BaseLayer::Dark, BaseLayer::Light, BaseLayer::Satellite];

    pub fn label(self) -> &'static str {
        match self {
            BaseLayer::Light => "Standard map",
            BaseLayer::Dark => "Dark map",
            BaseLayer::Satellite => "Satellite map",
        }
    }

    /// Tile URL template in `{z}/{x}/{y}` placeholder form.
    pub fn url_template(self) -> &'static str {
        match self {
            BaseLayer::Light => "https://tiles.stadiamaps.com/tiles/alidade_smooth/{z}/{x}/{y}{r}.png",
            BaseLayer::Dark => "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
            BaseLayer::Satellite => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
        }
    }

    pub fn attribution(self) -> &'static str {
        match self {
            BaseLayer::Light => {
                "&copy; <a href=\"https://stadiamaps.com/\">Stadia Maps</a>, &copy; <a href=\"https://openmaptiles.org/\">OpenMapTiles</a>"
            }
            BaseLayer::Dark => "© CARTO",
            BaseLayer::Satellite => "Tiles &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EBP, and the GIS User Community",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BaseLayer;

    #[test]
    fn dark_is_the_default_and_listed_first() {
        assert_eq!(BaseLayer::default(), BaseLayer::Dark);
        assert_eq!(BaseLayer::ALL[0], BaseLayer::Dark);
    }

    #[test]
    fn every_style_has_a_template_and_attribution() {
        for layer in BaseLayer::ALL {
            assert!(layer.url_template().starts_with("https://"));
            assert!(!layer.attribution().is_empty());
            assert!(!layer.label().is_empty());
        }
    }
}
