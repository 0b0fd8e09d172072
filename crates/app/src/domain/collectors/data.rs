//! Collector Data

use crate::domain::collectors::records::CollectorUuid;

/// New Collector Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCollector {
    /// UUID to assign to the collector row.
    pub uuid: CollectorUuid,

    /// Display name of the food bank or volunteer.
    pub name: String,
}
