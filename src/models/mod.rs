//! Domain models for the pollinator backend.
//!
//! This module contains all database-backed models: the identification
//! quiz graph, the species it resolves to, users and their sightings.

pub mod quiz;
pub mod sighting;
pub mod target;
pub mod user;

// Re-export all models for convenient access
pub use quiz::{Answer, Question, Quiz, FALLBACK_LOCALE};
pub use sighting::{NewSighting, Sighting};
pub use target::{AnswerTarget, Insect, Plant, Target, TargetType};
pub use user::User;
