use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub daily_rate: f64,
    pub is_available: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Car {
    /// "Toyota Camry (2022)"
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.make, self.model, self.year)
    }
}

/// Row sent when adding a vehicle to the fleet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub daily_rate: f64,
    pub is_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CarPatch {
    /// Patch that only flips the availability flag.
    pub fn availability(is_available: bool) -> Self {
        Self {
            is_available: Some(is_available),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch to an in-memory row.
    pub fn apply(&self, car: &mut Car) {
        if let Some(make) = &self.make {
            car.make = make.clone();
        }
        if let Some(model) = &self.model {
            car.model = model.clone();
        }
        if let Some(year) = self.year {
            car.year = year;
        }
        if let Some(plate) = &self.license_plate {
            car.license_plate = plate.clone();
        }
        if let Some(rate) = self.daily_rate {
            car.daily_rate = rate;
        }
        if let Some(available) = self.is_available {
            car.is_available = available;
        }
        if let Some(url) = &self.image_url {
            car.image_url = Some(url.clone());
        }
    }
}
