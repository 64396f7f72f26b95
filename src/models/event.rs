use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// An annotated historical event. `event_type` is free-form and not a closed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: u32,
    pub date: NaiveDate,
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub region: String,
    pub severity: String,
}

impl EventRecord {
    pub fn new(
        id: u32,
        date: NaiveDate,
        name: impl Into<String>,
        event_type: impl Into<String>,
        region: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date,
            name: name.into(),
            event_type: event_type.into(),
            region: region.into(),
            severity: severity.into(),
        }
    }
}
