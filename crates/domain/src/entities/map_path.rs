use crate::MapUid;

/// Where a map comes from and where its persisted data lives.
///
/// Recorded for every registered map, whether or not the map is resident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapPath {
    pub map: MapUid,
    /// Resource definition the map was generated from
    pub resource_path: String,
    /// Location of the map's persisted contents
    pub storage_path: String,
}

impl MapPath {
    pub fn new(
        map: MapUid,
        resource_path: impl Into<String>,
        storage_path: impl Into<String>,
    ) -> Self {
        Self {
            map,
            resource_path: resource_path.into(),
            storage_path: storage_path.into(),
        }
    }
}
