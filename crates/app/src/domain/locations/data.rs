//! Location Data

use crate::domain::locations::records::LocationUuid;

/// New Location Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    /// UUID to assign to the location row.
    pub uuid: LocationUuid,

    /// Store name.
    pub name: String,
}
