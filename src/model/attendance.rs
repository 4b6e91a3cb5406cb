use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Daily attendance window. Declaration order is the report order.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash,
    Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Session {
    Morning,
    Afternoon,
}

impl Session {
    /// Strictly before noon is MORNING, everything from 12:00 on is AFTERNOON.
    pub fn at(time: NaiveTime) -> Self {
        if time.hour() < 12 {
            Session::Morning
        } else {
            Session::Afternoon
        }
    }
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, AsRefStr,
    ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// Whether an upsert created the session row or refreshed an existing one.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RecordChange {
    Inserted,
    Updated,
}

/// One line of the daily report.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "roll_no": "101",
    "name": "Asha",
    "session": "MORNING",
    "status": "Present",
    "time": "09:14:05"
}))]
pub struct ReportEntry {
    pub roll_no: String,
    pub name: String,
    pub session: Session,
    pub status: AttendanceStatus,
    #[schema(example = "09:14:05", value_type = String)]
    pub time: String,
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}
