use foundation::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Storage key the point snapshot lives under.
pub const DEFAULT_STORAGE_KEY: &str = "body";

/// Unique identifier of a saved point.
///
/// Ids are creation timestamps in milliseconds, bumped past the previously
/// issued id on clock collision, so they stay unique and monotonically
/// increasing within one collection.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PointId(u64);

impl PointId {
    pub fn new(n: u64) -> Self {
        PointId(n)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// A saved map annotation.
///
/// Points are never mutated after creation; the collection only appends or
/// removes by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: PointId,
    pub lat: f64,
    pub lng: f64,
    /// Formatted label: address line, user note, optional distance annotation.
    pub text: String,
    /// Optional photo URL; absent entries are omitted from the snapshot so
    /// old data without the field loads unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foto: Option<String>,
}

impl Point {
    pub fn at(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Issues fresh point ids from a wall-clock reading.
#[derive(Debug, Default, Clone)]
pub struct IdSource {
    last: u64,
}

impl IdSource {
    /// Seeds the source from an existing collection so reloaded collections
    /// keep issuing increasing ids.
    pub fn seeded_from(points: &[Point]) -> Self {
        let last = points.iter().map(|p| p.id.get()).max().unwrap_or(0);
        Self { last }
    }

    /// Next unique id. The clock is a hint; uniqueness is the invariant.
    pub fn next(&mut self, now_ms: u64) -> PointId {
        let id = now_ms.max(self.last + 1);
        self.last = id;
        PointId::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    StorageUnavailable,
    Encode(String),
    Io(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::StorageUnavailable => write!(f, "browser storage unavailable"),
            StoreError::Encode(msg) => write!(f, "point snapshot encoding failed: {msg}"),
            StoreError::Io(msg) => write!(f, "point storage error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Persistence seam for the point collection.
///
/// The snapshot is one JSON array, read once at startup and fully rewritten
/// on every mutation.
pub trait PointStore {
    /// Loads the collection. Missing or malformed data loads as the empty
    /// collection; this never fails toward the caller.
    fn load(&self) -> Vec<Point>;
    fn save(&mut self, points: &[Point]) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

pub fn encode_snapshot(points: &[Point]) -> Result<String, StoreError> {
    serde_json::to_string(points).map_err(|e| StoreError::Encode(e.to_string()))
}

/// Decodes a snapshot, treating anything unreadable as empty.
pub fn decode_snapshot(raw: &str) -> Vec<Point> {
    serde_json::from_str::<Vec<Point>>(raw).unwrap_or_default()
}

/// Store backed by a plain string slot; the native/test stand-in for
/// browser local storage. Round-trips through the same JSON codec.
#[derive(Debug, Default)]
pub struct InMemoryPointStore {
    raw: Option<String>,
}

impl InMemoryPointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a pre-existing raw snapshot, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl PointStore for InMemoryPointStore {
    fn load(&self) -> Vec<Point> {
        self.raw.as_deref().map(decode_snapshot).unwrap_or_default()
    }

    fn save(&mut self, points: &[Point]) -> Result<(), StoreError> {
        self.raw = Some(encode_snapshot(points)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.raw = None;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{Point, PointStore, StoreError, decode_snapshot, encode_snapshot};

    /// Store backed by `window.localStorage`.
    #[derive(Debug)]
    pub struct LocalStoragePointStore {
        key: String,
    }

    impl LocalStoragePointStore {
        pub fn new(key: impl Into<String>) -> Self {
            Self { key: key.into() }
        }
    }

    impl PointStore for LocalStoragePointStore {
        fn load(&self) -> Vec<Point> {
            // Unavailable storage degrades to the empty collection, same as
            // a missing or corrupt snapshot.
            let Ok(storage) = window_local_storage() else {
                return Vec::new();
            };
            match storage.get_item(&self.key) {
                Ok(Some(raw)) => decode_snapshot(&raw),
                _ => Vec::new(),
            }
        }

        fn save(&mut self, points: &[Point]) -> Result<(), StoreError> {
            let storage = window_local_storage()?;
            let raw = encode_snapshot(points)?;
            storage
                .set_item(&self.key, &raw)
                .map_err(|e| StoreError::Io(format!("set_item failed: {:?}", e)))
        }

        fn clear(&mut self) -> Result<(), StoreError> {
            let storage = window_local_storage()?;
            storage
                .remove_item(&self.key)
                .map_err(|e| StoreError::Io(format!("remove_item failed: {:?}", e)))
        }
    }

    fn window_local_storage() -> Result<web_sys::Storage, StoreError> {
        let win = web_sys::window().ok_or(StoreError::StorageUnavailable)?;
        win.local_storage()
            .map_err(|e| StoreError::Io(format!("localStorage error: {:?}", e)))?
            .ok_or(StoreError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::LocalStoragePointStore;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LocalStoragePointStore;

#[cfg(not(target_arch = "wasm32"))]
impl LocalStoragePointStore {
    pub fn new(_key: impl Into<String>) -> Self {
        Self
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PointStore for LocalStoragePointStore {
    fn load(&self) -> Vec<Point> {
        Vec::new()
    }

    fn save(&mut self, _points: &[Point]) -> Result<(), StoreError> {
        Err(StoreError::StorageUnavailable)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        Err(StoreError::StorageUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point(id: u64, text: &str) -> Point {
        Point {
            id: PointId::new(id),
            lat: 50.08,
            lng: 14.43,
            text: text.to_string(),
            foto: None,
        }
    }

    #[test]
    fn snapshot_round_trips() {
        let points = vec![point(1, "a"), point(2, "b")];
        let raw = encode_snapshot(&points).unwrap();
        assert_eq!(decode_snapshot(&raw), points);
    }

    #[test]
    fn malformed_snapshot_loads_empty() {
        assert!(decode_snapshot("not json").is_empty());
        assert!(decode_snapshot("{\"id\":1}").is_empty());
        assert!(decode_snapshot("").is_empty());
    }

    #[test]
    fn absent_photo_is_omitted_from_json() {
        let raw = encode_snapshot(&[point(1, "a")]).unwrap();
        assert!(!raw.contains("foto"));

        let mut with_photo = point(2, "b");
        with_photo.foto = Some("https://example.test/p.jpg".to_string());
        let raw = encode_snapshot(&[with_photo]).unwrap();
        assert!(raw.contains("\"foto\":\"https://example.test/p.jpg\""));
    }

    #[test]
    fn legacy_snapshot_without_photo_field_loads() {
        let raw = r#"[{"id":1700000000000,"lat":50.08,"lng":14.43,"text":"x"}]"#;
        let points = decode_snapshot(raw);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].foto, None);
    }

    #[test]
    fn in_memory_store_round_trips() {
        let mut store = InMemoryPointStore::new();
        assert!(store.load().is_empty());

        let points = vec![point(1, "a"), point(2, "b")];
        store.save(&points).unwrap();
        assert_eq!(store.load(), points);

        store.clear().unwrap();
        assert!(store.load().is_empty());
        assert_eq!(store.raw(), None);
    }

    #[test]
    fn in_memory_store_is_fail_soft_on_garbage() {
        let store = InMemoryPointStore::with_raw("][");
        assert!(store.load().is_empty());
    }

    #[test]
    fn id_source_tracks_the_clock() {
        let mut ids = IdSource::default();
        assert_eq!(ids.next(1_000).get(), 1_000);
        assert_eq!(ids.next(2_000).get(), 2_000);
    }

    #[test]
    fn id_source_bumps_on_clock_collision() {
        let mut ids = IdSource::default();
        assert_eq!(ids.next(1_000).get(), 1_000);
        assert_eq!(ids.next(1_000).get(), 1_001);
        // A clock that went backwards still yields a fresh id.
        assert_eq!(ids.next(500).get(), 1_002);
    }

    #[test]
    fn id_source_seeds_from_existing_points() {
        let mut ids = IdSource::seeded_from(&[point(10, "a"), point(30, "b"), point(20, "c")]);
        assert_eq!(ids.next(5).get(), 31);
    }
}
