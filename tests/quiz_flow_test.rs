mod helpers;

use helpers::*;
use pollinator_backend::error::QuizError;
use pollinator_backend::models::*;
use pollinator_backend::repositories::InMemoryStore;
use pollinator_backend::services::{QuizController, QuizOutcome, QuizState};
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// Start
// ============================================================================

#[tokio::test]
async fn test_start_enters_root_question() {
    let fx = InsectQuiz::create().await;
    let mut controller = QuizController::new(fx.store.clone());

    let QuizState::Question(step) = controller.start("insect").await else {
        panic!("expected a question");
    };
    assert_eq!(step.question.id, fx.root.id);
    assert_eq!(step.question.text("de"), "Wie sieht das Insekt aus?");
    let ids: Vec<Uuid> = step.answers.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![fx.fuzzy.id, fx.thin_wings.id]);
}

#[tokio::test]
async fn test_unknown_quiz_type_is_not_found() {
    let store = Arc::new(InMemoryStore::new());
    let mut controller = QuizController::new(store);

    let state = controller.start("insect").await;
    let outcome = state.outcome().expect("should end in Result");
    assert!(outcome.selected_target.is_none());
    assert_eq!(outcome.error, Some(QuizError::QuizNotFound("insect".into())));
    assert_eq!(outcome.message(), Some("No data found"));
}

#[tokio::test]
async fn test_missing_root_question_is_not_found() {
    let store = Arc::new(InMemoryStore::new());
    let dangling = Uuid::new_v4();
    store.add_quiz(Quiz::new("plant", Some(dangling))).await;
    store.add_quiz(Quiz::new("fungus", None)).await;
    let mut controller = QuizController::new(store);

    let outcome = controller.start("plant").await.outcome().cloned().unwrap();
    assert_eq!(outcome.error, Some(QuizError::QuestionNotFound(dangling)));

    let outcome = controller.start("fungus").await.outcome().cloned().unwrap();
    assert_eq!(
        outcome.error,
        Some(QuizError::RootQuestionMissing("fungus".into()))
    );
}

#[tokio::test]
async fn test_backend_failure_becomes_error_state() {
    let fx = InsectQuiz::create().await;
    fx.store.set_fail_reads(true);
    let mut controller = QuizController::new(fx.store.clone());

    let outcome = controller.start("insect").await.outcome().cloned().unwrap();
    assert!(matches!(outcome.error, Some(QuizError::Backend(_))));
    assert_eq!(
        outcome.message(),
        Some("Something went wrong, please try again")
    );
}

// ============================================================================
// Answer selection
// ============================================================================

#[tokio::test]
async fn test_single_target_resolves_directly() {
    let fx = InsectQuiz::create().await;
    let mut controller = QuizController::new(fx.store.clone());
    controller.start("insect").await;
    controller.select_answer(fx.fuzzy.id).await;

    let state = controller.select_answer(fx.baskets_yes.id).await;
    assert_eq!(
        state,
        &QuizState::Result(QuizOutcome::resolved(Target::Insect(fx.honey_bee.clone())))
    );
}

#[tokio::test]
async fn test_leaf_without_targets_is_empty_classification() {
    let fx = InsectQuiz::create().await;
    let mut controller = QuizController::new(fx.store.clone());
    controller.start("insect").await;

    let outcome = controller
        .select_answer(fx.thin_wings.id)
        .await
        .outcome()
        .cloned()
        .unwrap();
    assert!(outcome.selected_target.is_none());
    assert_eq!(
        outcome.error,
        Some(QuizError::NoClassification(fx.thin_wings.id))
    );
    assert!(outcome.message().is_some());
}

#[tokio::test]
async fn test_multiple_targets_wait_for_user_choice() {
    let fx = InsectQuiz::create().await;
    let mut controller = QuizController::new(fx.store.clone());
    controller.start("insect").await;
    controller.select_answer(fx.fuzzy.id).await;

    let QuizState::TargetSelection(step) = controller.select_answer(fx.baskets_no.id).await
    else {
        panic!("expected target selection");
    };
    let candidates: Vec<Uuid> = step.candidates.iter().map(Target::id).collect();
    assert_eq!(candidates, vec![fx.bumblebee.id, fx.mason_bee.id]);

    let state = controller.select_target(fx.mason_bee.id);
    assert_eq!(
        state,
        &QuizState::Result(QuizOutcome::resolved(Target::Insect(fx.mason_bee.clone())))
    );
}

#[tokio::test]
async fn test_foreign_answer_is_ignored() {
    let fx = InsectQuiz::create().await;
    let mut controller = QuizController::new(fx.store.clone());
    let before = controller.start("insect").await.clone();

    // Answer of the second question while still at the root
    let after = controller.select_answer(fx.baskets_yes.id).await;
    assert_eq!(&before, after);
}

#[tokio::test]
async fn test_answer_before_start_is_ignored() {
    let fx = InsectQuiz::create().await;
    let mut controller = QuizController::new(fx.store.clone());

    assert_eq!(controller.select_answer(fx.fuzzy.id).await, &QuizState::Start);
    assert_eq!(fx.store.fetch_count(), 0);
}

#[tokio::test]
async fn test_missing_species_rows_are_skipped() {
    let fx = InsectQuiz::create().await;
    fx.store.insects.lock().await.remove(&fx.mason_bee.id);
    let mut controller = QuizController::new(fx.store.clone());
    controller.start("insect").await;
    controller.select_answer(fx.fuzzy.id).await;

    // Only the bumblebee is left, so no selection is needed
    let state = controller.select_answer(fx.baskets_no.id).await;
    assert_eq!(
        state,
        &QuizState::Result(QuizOutcome::resolved(Target::Insect(fx.bumblebee.clone())))
    );
}

#[tokio::test]
async fn test_duplicate_target_rows_count_once() {
    let fx = InsectQuiz::create().await;
    fx.store
        .add_answer_target(AnswerTarget::new(fx.baskets_yes.id, fx.honey_bee.id, TargetType::Insect))
        .await;
    let mut controller = QuizController::new(fx.store.clone());
    controller.start("insect").await;
    controller.select_answer(fx.fuzzy.id).await;

    // Two rows for the honey bee still resolve without a selection step
    let state = controller.select_answer(fx.baskets_yes.id).await;
    assert_eq!(
        state,
        &QuizState::Result(QuizOutcome::resolved(Target::Insect(fx.honey_bee.clone())))
    );
}

#[tokio::test]
async fn test_plant_targets_resolve_by_tag() {
    let fx = InsectQuiz::create().await;
    let clover = Plant::new("White clover", "Trifolium repens");
    fx.store.add_plant(clover.clone()).await;
    fx.store
        .add_answer_target(AnswerTarget::new(fx.thin_wings.id, clover.id, TargetType::Plant))
        .await;
    let mut controller = QuizController::new(fx.store.clone());
    controller.start("insect").await;

    let state = controller.select_answer(fx.thin_wings.id).await;
    assert_eq!(
        state,
        &QuizState::Result(QuizOutcome::resolved(Target::Plant(clover)))
    );
}

// ============================================================================
// Cycles, back navigation and reset
// ============================================================================

#[tokio::test]
async fn test_cyclic_graph_terminates() {
    let store = Arc::new(InMemoryStore::new());
    let mut quiz = Quiz::new("plant", None);
    let first = Question::new(quiz.id, "Flower colour?");
    let second = Question::new(quiz.id, "Leaf shape?");
    quiz.root_question_id = Some(first.id);
    let forward = Answer::new(first.id, "Yellow", Some(second.id), 0);
    let backward = Answer::new(second.id, "Round", Some(first.id), 0);

    store.add_quiz(quiz).await;
    store.add_question(first.clone()).await;
    store.add_question(second).await;
    store.add_answer(forward.clone()).await;
    store.add_answer(backward.clone()).await;

    let mut controller = QuizController::new(store);
    controller.start("plant").await;
    controller.select_answer(forward.id).await;
    let outcome = controller
        .select_answer(backward.id)
        .await
        .outcome()
        .cloned()
        .unwrap();
    assert_eq!(outcome.error, Some(QuizError::CycleDetected(first.id)));
}

#[tokio::test]
async fn test_go_back_restores_previous_question() {
    let fx = InsectQuiz::create().await;
    let mut controller = QuizController::new(fx.store.clone());
    let at_root = controller.start("insect").await.clone();
    controller.select_answer(fx.fuzzy.id).await;
    let at_pollen = controller.state().clone();

    assert_eq!(controller.go_back(), &at_root);

    // Back from target selection lands on the question that produced it
    controller.select_answer(fx.fuzzy.id).await;
    controller.select_answer(fx.baskets_no.id).await;
    assert!(matches!(controller.state(), QuizState::TargetSelection(_)));
    assert_eq!(controller.go_back(), &at_pollen);
}

#[tokio::test]
async fn test_reset_returns_to_start_from_any_state() {
    let fx = InsectQuiz::create().await;
    let mut controller = QuizController::new(fx.store.clone());

    assert_eq!(controller.reset(), &QuizState::Start);

    controller.start("insect").await;
    assert_eq!(controller.reset(), &QuizState::Start);

    controller.start("insect").await;
    controller.select_answer(fx.fuzzy.id).await;
    controller.select_answer(fx.baskets_no.id).await;
    assert_eq!(controller.reset(), &QuizState::Start);

    controller.start("insect").await;
    controller.select_answer(fx.thin_wings.id).await;
    assert!(controller.state().is_finished());
    assert_eq!(controller.reset(), &QuizState::Start);
}

#[tokio::test]
async fn test_restart_after_result() {
    let fx = InsectQuiz::create().await;
    let mut controller = QuizController::new(fx.store.clone());
    controller.start("insect").await;
    controller.select_answer(fx.thin_wings.id).await;

    let QuizState::Question(step) = controller.start("insect").await else {
        panic!("expected a question");
    };
    assert_eq!(step.depth(), 0);
}
