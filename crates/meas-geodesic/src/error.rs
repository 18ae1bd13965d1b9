use meas_core::StreetId;

#[derive(Debug, thiserror::Error)]
pub enum GeodesicError {
    #[error("waypoint references unknown street {0}")]
    UnknownStreet(StreetId),
}

pub type GeodesicResult<T> = Result<T, GeodesicError>;
