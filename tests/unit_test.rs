mod helpers;

use helpers::*;
use pollinator_backend::error::{AppError, QuizError, RepositoryError};
use pollinator_backend::models::*;
use pollinator_backend::services::leaderboard::score;
use pollinator_backend::services::*;
use serde_json::json;
use uuid::Uuid;

/// Unit tests for models
#[test]
fn test_target_serializes_with_type_tag() {
    let plant = Plant::new("Dandelion", "Taraxacum officinale");
    let value = serde_json::to_value(Target::Plant(plant.clone())).unwrap();

    assert_eq!(value["type"], "plant");
    assert_eq!(value["common_name"], "Dandelion");

    let back: Target = serde_json::from_value(value).unwrap();
    assert_eq!(back.id(), plant.id);
    assert_eq!(back.target_type(), TargetType::Plant);
}

#[test]
fn test_unknown_target_type_is_rejected() {
    let mut row = AnswerTarget::new(Uuid::new_v4(), Uuid::new_v4(), TargetType::Insect);
    assert_eq!(row.target_type_enum(), Ok(TargetType::Insect));

    row.target_type = "fungus".to_string();
    assert!(row.target_type_enum().is_err());
}

#[test]
fn test_user_display_name_falls_back_to_username() {
    let mut user = test_user("anna");
    assert_eq!(user.display_name(), "anna");

    user.first_name = "Anna".to_string();
    user.last_name = "Berg".to_string();
    assert_eq!(user.display_name(), "Anna Berg");
}

#[test]
fn test_question_text_falls_back_to_english() {
    let question = Question::new(Uuid::new_v4(), "Flower colour?");
    assert_eq!(question.text("de"), "Flower colour?");
    assert_eq!(question.text(FALLBACK_LOCALE), "Flower colour?");
}

/// Unit tests for errors
#[test]
fn test_quiz_error_messages() {
    assert_eq!(QuizError::QuizNotFound("plant".into()).message(), "No data found");
    assert_eq!(
        QuizError::NoClassification(Uuid::new_v4()).message(),
        "No matching species found"
    );
    assert_eq!(
        QuizError::from(RepositoryError::Unavailable("down".into())).message(),
        "Something went wrong, please try again"
    );
}

#[test]
fn test_validation_message_reaches_user() {
    let err = AppError::Validation("latitude must be within [-90, 90]".into());
    assert_eq!(err.user_message(), "latitude must be within [-90, 90]");
    assert!(!err.is_not_found());
}

/// Unit tests for quiz state serialization
#[test]
fn test_quiz_state_serialization() {
    assert_eq!(serde_json::to_value(QuizState::Start).unwrap(), json!({ "state": "start" }));

    let failed = QuizState::Result(QuizOutcome::failed(QuizError::CycleDetected(Uuid::nil())));
    assert_eq!(
        serde_json::to_value(&failed).unwrap(),
        json!({
            "state": "result",
            "data": {
                "selected_target": null,
                "error": "Something went wrong, please try again"
            }
        })
    );
}

#[test]
fn test_reset_event_from_result() {
    let state = QuizState::Result(QuizOutcome::failed(QuizError::QuizNotFound("x".into())));
    assert_eq!(reduce(state, QuizEvent::Reset), QuizState::Start);
}

/// Unit tests for leaderboard scoring
#[test]
fn test_score_weights_diversity() {
    assert_eq!(score(0, 0), 0);
    assert_eq!(score(1, 1), 11);
    assert_eq!(score(3, 5), 35);
}

#[test]
fn test_leaderboard_serialization() {
    let anna = test_user("anna");
    let sightings = test_sightings(&anna, Uuid::new_v4(), 2);

    let entries = compute_leaderboard(&[anna.clone()], &sightings, Some(anna.id));
    let value = serde_json::to_value(&entries).unwrap();

    assert_eq!(value[0]["position"], 1);
    assert_eq!(value[0]["score"], 12);
    assert_eq!(value[0]["is_current_user"], true);
}
