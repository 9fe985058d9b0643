use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::record_id;

record_id!(
    /// Identifier of a table reservation.
    ReservationId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::Completed => "Completed",
            ReservationStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

/// A table booking. `date` and `time` are kept as entered by the guest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub name: String,
    pub phone: String,
    pub guests: u32,
    pub date: String,
    pub time: String,
    pub message: Option<String>,
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReservationCreate {
    pub name: String,
    pub phone: String,
    pub guests: u32,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub message: Option<String>,
}
