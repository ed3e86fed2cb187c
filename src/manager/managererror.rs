use serde::Deserialize;

use crate::time::holidayerror::HolidayError;

#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),

    #[error("key '{0}' not found")]
    NameNotFoundError(String),

    #[error(transparent)]
    HolidayError(#[from] HolidayError),
}

impl ManagerError {
    pub fn map_elem_not_found(name: &str) -> ManagerError {
        ManagerError::NameNotFoundError(name.to_owned())
    }

    pub fn invalid_catalog(message: impl Into<String>) -> ManagerError {
        ManagerError::HolidayError(HolidayError::InvalidCatalog(message.into()))
    }
}

pub fn parse_json_value<T>(json_value: serde_json::Value) -> Result<T, ManagerError>
    where T: for<'a> Deserialize<'a> {
    Ok(serde_json::from_value(json_value)?)
}
