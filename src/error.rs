//! Crate error type.

/// Errors produced by the fallible parts of the public surface.
///
/// Hosts that hand over already-parsed GeoJSON values never see these;
/// only the string-parsing convenience constructors can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The supplied string was not valid GeoJSON.
    #[error("invalid GeoJSON geometry: {0}")]
    Geometry(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
