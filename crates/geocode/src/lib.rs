use foundation::geo::LatLng;
use serde::Deserialize;

/// Reverse endpoint of the public Nominatim instance.
pub const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";

/// Label used when the service resolves the coordinate to nothing readable.
pub const UNKNOWN_PLACE: &str = "unknown place";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    /// Request failed or returned an unreadable body.
    Http(String),
    /// Body arrived but was not the JSON shape we expect.
    Parse(String),
}

impl std::fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocodeError::Http(msg) => write!(f, "reverse geocoding request failed: {msg}"),
            GeocodeError::Parse(msg) => write!(f, "reverse geocoding response unreadable: {msg}"),
        }
    }
}

impl std::error::Error for GeocodeError {}

/// The slice of the Nominatim `jsonv2` response we care about.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub display_name: Option<String>,
}

pub fn reverse_url(endpoint: &str, at: LatLng) -> String {
    format!(
        "{endpoint}?format=jsonv2&lat={lat}&lon={lng}",
        lat = at.lat,
        lng = at.lng
    )
}

/// Extracts the human-readable place name from a raw response body.
///
/// A missing or empty `display_name` is not an error; it falls back to
/// [`UNKNOWN_PLACE`]. Only an unparseable body fails.
pub fn place_name_from_body(body: &str) -> Result<String, GeocodeError> {
    let resp: ReverseGeocodeResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::Parse(e.to_string()))?;
    Ok(resp
        .display_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_PLACE.to_string()))
}

/// Resolves a coordinate to an address via the public Nominatim instance.
///
/// No timeout and no retry; a failed request is surfaced once and the user
/// retries by clicking again.
#[cfg(target_arch = "wasm32")]
pub async fn reverse_geocode(at: LatLng) -> Result<String, GeocodeError> {
    let url = reverse_url(NOMINATIM_ENDPOINT, at);
    let resp = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| GeocodeError::Http(e.to_string()))?;
    let body = resp
        .text()
        .await
        .map_err(|e| GeocodeError::Http(e.to_string()))?;
    place_name_from_body(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reverse_url_carries_coordinate_and_format() {
        let url = reverse_url(NOMINATIM_ENDPOINT, LatLng::new(50.08, 14.43));
        assert_eq!(
            url,
            "https://nominatim.openstreetmap.org/reverse?format=jsonv2&lat=50.08&lon=14.43"
        );
    }

    #[test]
    fn display_name_is_extracted() {
        let body = r#"{"place_id":123,"display_name":"Prague, Czechia","category":"place"}"#;
        assert_eq!(place_name_from_body(body).unwrap(), "Prague, Czechia");
    }

    #[test]
    fn missing_display_name_falls_back() {
        assert_eq!(place_name_from_body("{}").unwrap(), UNKNOWN_PLACE);
        assert_eq!(
            place_name_from_body(r#"{"display_name":"  "}"#).unwrap(),
            UNKNOWN_PLACE
        );
    }

    #[test]
    fn unparseable_body_is_an_error() {
        assert!(matches!(
            place_name_from_body("<html>rate limited</html>"),
            Err(GeocodeError::Parse(_))
        ));
    }
}
