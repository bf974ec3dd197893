use foundation::geo::LatLng;

/// Default viewport when the URL fragment carries no usable view state.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 50.08,
    lng: 14.43,
};
pub const DEFAULT_ZOOM: u8 = 13;

/// Fixed zoom used by shareable single-point links.
pub const SHARE_ZOOM: u8 = 18;

/// The map viewport: center coordinate plus zoom level.
///
/// Round-trips through the URL fragment as `zoom,lat,lng` with coordinates
/// at four decimal places.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    pub zoom: u8,
    pub center: LatLng,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            center: DEFAULT_CENTER,
        }
    }
}

impl ViewState {
    /// Parses a URL fragment. Anything but exactly three well-formed
    /// components yields `None` and the caller keeps the default view.
    pub fn parse_fragment(fragment: &str) -> Option<Self> {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let parts: Vec<&str> = fragment.split(',').collect();
        let [zoom, lat, lng] = parts.as_slice() else {
            return None;
        };

        let zoom: u8 = zoom.trim().parse().ok()?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lng: f64 = lng.trim().parse().ok()?;
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }

        Some(Self {
            zoom,
            center: LatLng::new(lat, lng),
        })
    }

    pub fn to_fragment(&self) -> String {
        format!(
            "{},{:.4},{:.4}",
            self.zoom, self.center.lat, self.center.lng
        )
    }
}

/// Builds a shareable link for one coordinate: the page location with any
/// existing fragment replaced by a fixed-zoom view fragment.
pub fn share_link(base: &str, at: LatLng) -> String {
    let base = base.split('#').next().unwrap_or(base);
    let view = ViewState {
        zoom: SHARE_ZOOM,
        center: at,
    };
    format!("{base}#{}", view.to_fragment())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn well_formed_fragment_parses() {
        let view = ViewState::parse_fragment("15,50.0800,14.4300").unwrap();
        assert_eq!(view.zoom, 15);
        assert_eq!(view.center, LatLng::new(50.08, 14.43));
    }

    #[test]
    fn leading_hash_is_tolerated() {
        let view = ViewState::parse_fragment("#15,50.0800,14.4300").unwrap();
        assert_eq!(view.zoom, 15);
    }

    #[test]
    fn malformed_fragments_yield_none() {
        for frag in ["", "abc", "15,50.08", "15,50.08,14.43,1", "x,50.08,14.43", "15,NaN,14.43"] {
            assert_eq!(ViewState::parse_fragment(frag), None, "fragment {frag:?}");
        }
    }

    #[test]
    fn fragment_round_trips_at_four_decimals() {
        let view = ViewState {
            zoom: 15,
            center: LatLng::new(50.080049, 14.43),
        };
        let frag = view.to_fragment();
        assert_eq!(frag, "15,50.0800,14.4300");
        let back = ViewState::parse_fragment(&frag).unwrap();
        assert_eq!(back.zoom, 15);
        assert!((back.center.lat - 50.08).abs() < 1e-9);
    }

    #[test]
    fn default_view_matches_the_fixed_start_viewport() {
        let view = ViewState::default();
        assert_eq!(view.zoom, 13);
        assert_eq!(view.center, LatLng::new(50.08, 14.43));
    }

    #[test]
    fn share_link_replaces_an_existing_fragment() {
        let link = share_link(
            "https://example.test/map#13,1.0000,2.0000",
            LatLng::new(50.08, 14.43),
        );
        assert_eq!(link, "https://example.test/map#18,50.0800,14.4300");
    }

    #[test]
    fn share_link_appends_when_no_fragment_present() {
        let link = share_link("https://example.test/map", LatLng::new(-1.5, -2.25));
        assert_eq!(link, "https://example.test/map#18,-1.5000,-2.2500");
    }
}
