use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Active,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    /// A closed booking no longer holds its car.
    pub fn is_closed(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower: String = s.trim().to_ascii_lowercase();
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == lower)
            .ok_or_else(|| format!("unknown booking status: {s}"))
    }
}

/// Customer columns embedded into booking and review rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummary {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl CustomerSummary {
    pub fn full_name(&self) -> String {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

/// Car columns embedded into booking and review rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarSummary {
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CarSummary {
    pub fn label(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub car_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<CustomerSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cars: Option<CarSummary>,
}

impl Booking {
    /// Amount counted towards revenue. Missing amounts count as zero.
    pub fn amount(&self) -> f64 {
        self.total_amount.unwrap_or(0.0)
    }

    pub fn car_label(&self) -> String {
        self.cars
            .as_ref()
            .map(CarSummary::label)
            .unwrap_or_else(|| self.car_id.clone())
    }

    pub fn customer_name(&self) -> String {
        self.profiles
            .as_ref()
            .map(CustomerSummary::full_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.user_id.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBooking {
    pub user_id: String,
    pub car_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
}

impl BookingPatch {
    pub fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// True when the patch closes the booking and its car should be released.
    pub fn releases_car(&self) -> bool {
        self.status.is_some_and(BookingStatus::is_closed)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, booking: &mut Booking) {
        if let Some(start) = self.start_date {
            booking.start_date = start;
        }
        if let Some(end) = self.end_date {
            booking.end_date = end;
        }
        if let Some(amount) = self.total_amount {
            booking.total_amount = Some(amount);
        }
        if let Some(status) = self.status {
            booking.status = status;
        }
    }
}

pub(crate) fn join_name(first: Option<&str>, last: Option<&str>) -> String {
    [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}
