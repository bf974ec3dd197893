/// Mean Earth radius (meters), the spherical approximation used for
/// surface distances between pins.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geographic coordinate in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle surface distance between two coordinates (meters).
///
/// Haversine on a sphere of [`MEAN_EARTH_RADIUS_M`]; plenty for the
/// two-decimal kilometer labels shown to the user.
pub fn surface_distance_m(a: LatLng, b: LatLng) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lng * 0.5).sin().powi(2);
    2.0 * MEAN_EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Surface distance in kilometers.
pub fn surface_distance_km(a: LatLng, b: LatLng) -> f64 {
    surface_distance_m(a, b) / 1000.0
}

#[cfg(test)]
mod tests {
    use super::{LatLng, surface_distance_km, surface_distance_m};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn zero_distance_to_self() {
        let p = LatLng::new(50.08, 14.43);
        assert_close(surface_distance_m(p, p), 0.0, 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = LatLng::new(50.08, 14.43);
        let b = LatLng::new(48.85, 2.35);
        assert_close(
            surface_distance_m(a, b),
            surface_distance_m(b, a),
            1e-6,
        );
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(1.0, 0.0);
        assert_close(surface_distance_km(a, b), 111.19, 0.1);
    }

    #[test]
    fn prague_to_brno_is_about_185_km() {
        let prague = LatLng::new(50.0755, 14.4378);
        let brno = LatLng::new(49.1951, 16.6068);
        let km = surface_distance_km(prague, brno);
        assert!((180.0..190.0).contains(&km), "got {km}");
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.0, 180.0);
        let m = surface_distance_m(a, b);
        assert!(m.is_finite());
        assert_close(m, std::f64::consts::PI * super::MEAN_EARTH_RADIUS_M, 1.0);
    }
}
