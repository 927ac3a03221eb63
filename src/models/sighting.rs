use super::TargetType;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Sighting model; append-only record of a user spotting a species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Sighting {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_id: Uuid,
    pub target_type: String, // Stored as TEXT in DB, use TargetType enum for type safety
    pub is_validated: bool,
    pub is_flagged: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_path: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Sighting {
    /// Get the target type as an enum
    pub fn target_type_enum(&self) -> Result<TargetType, String> {
        TargetType::from_str(&self.target_type)
    }
}

/// Input for recording a sighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSighting {
    pub user_id: Uuid,
    pub target_id: Uuid,
    pub target_type: TargetType,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_path: Option<String>,
}

impl NewSighting {
    pub fn new(user_id: Uuid, target_id: Uuid, target_type: TargetType) -> Self {
        Self {
            user_id,
            target_id,
            target_type,
            latitude: None,
            longitude: None,
            image_path: None,
        }
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Validate the coordinates before insert
    pub fn validate(&self) -> Result<(), String> {
        match (self.latitude, self.longitude) {
            (None, None) => Ok(()),
            (Some(lat), Some(lon)) => {
                if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                    return Err(format!("Latitude must be between -90 and 90, got {}", lat));
                }
                if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
                    return Err(format!("Longitude must be between -180 and 180, got {}", lon));
                }
                Ok(())
            }
            _ => Err("Latitude and longitude must be provided together".to_string()),
        }
    }

    /// Materialize the row as the backend would store it
    pub fn into_sighting(self) -> Sighting {
        Sighting {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            target_id: self.target_id,
            target_type: self.target_type.as_str().to_string(),
            is_validated: false,
            is_flagged: false,
            latitude: self.latitude,
            longitude: self.longitude,
            image_path: self.image_path,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
