use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Kind of species a classification or sighting refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Plant,
    Insect,
}

impl TargetType {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "plant" => Ok(TargetType::Plant),
            "insect" => Ok(TargetType::Insect),
            _ => Err(format!("Invalid target type: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Plant => "plant",
            TargetType::Insect => "insect",
        }
    }
}

impl From<TargetType> for String {
    fn from(target_type: TargetType) -> Self {
        target_type.as_str().to_string()
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result attached to a leaf answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AnswerTarget {
    pub id: Uuid,
    pub answer_id: Uuid,
    pub target_id: Uuid,
    pub target_type: String, // Stored as TEXT in DB, use TargetType enum for type safety
}

impl AnswerTarget {
    /// Create a new AnswerTarget
    pub fn new(answer_id: Uuid, target_id: Uuid, target_type: TargetType) -> Self {
        Self {
            id: Uuid::new_v4(),
            answer_id,
            target_id,
            target_type: target_type.as_str().to_string(),
        }
    }

    /// Get the target type as an enum
    pub fn target_type_enum(&self) -> Result<TargetType, String> {
        TargetType::from_str(&self.target_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Plant {
    pub id: Uuid,
    pub common_name: String,
    pub scientific_name: String,
    pub description: Option<String>,
    pub image_path: Option<String>,
}

impl Plant {
    pub fn new(common_name: impl Into<String>, scientific_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            common_name: common_name.into(),
            scientific_name: scientific_name.into(),
            description: None,
            image_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Insect {
    pub id: Uuid,
    pub common_name: String,
    pub scientific_name: String,
    pub insect_order: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
}

impl Insect {
    pub fn new(common_name: impl Into<String>, scientific_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            common_name: common_name.into(),
            scientific_name: scientific_name.into(),
            insect_order: None,
            description: None,
            image_path: None,
        }
    }
}

/// A resolved classification: the species row selected by its type tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Target {
    Plant(Plant),
    Insect(Insect),
}

impl Target {
    pub fn id(&self) -> Uuid {
        match self {
            Target::Plant(plant) => plant.id,
            Target::Insect(insect) => insect.id,
        }
    }

    pub fn target_type(&self) -> TargetType {
        match self {
            Target::Plant(_) => TargetType::Plant,
            Target::Insect(_) => TargetType::Insect,
        }
    }

    pub fn common_name(&self) -> &str {
        match self {
            Target::Plant(plant) => &plant.common_name,
            Target::Insect(insect) => &insect.common_name,
        }
    }

    pub fn scientific_name(&self) -> &str {
        match self {
            Target::Plant(plant) => &plant.scientific_name,
            Target::Insect(insect) => &insect.scientific_name,
        }
    }
}
