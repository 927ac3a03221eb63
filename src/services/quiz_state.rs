//! Quiz traversal state machine.
//!
//! `Start → Question → {TargetSelection | Result}`. The state is a plain
//! value and every transition goes through [`reduce`], which never performs
//! I/O. Fetching is the job of [`QuizController`](super::QuizController).

use crate::error::QuizError;
use crate::models::{Answer, Question, Quiz, Target};
use serde::Serialize;
use uuid::Uuid;

/// A question that was answered on the way to the current step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnsweredQuestion {
    pub question: Question,
    pub answers: Vec<Answer>,
    pub chosen_answer_id: Uuid,
}

/// Waiting for the user to pick one of `answers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionStep {
    pub quiz: Quiz,
    pub question: Question,
    pub answers: Vec<Answer>,
    pub trail: Vec<AnsweredQuestion>,
}

impl QuestionStep {
    pub fn answer(&self, answer_id: Uuid) -> Option<&Answer> {
        self.answers.iter().find(|answer| answer.id == answer_id)
    }

    /// Check if a question already appears on the current path
    pub fn has_visited(&self, question_id: Uuid) -> bool {
        self.question.id == question_id
            || self.trail.iter().any(|step| step.question.id == question_id)
    }

    /// Number of questions answered so far
    pub fn depth(&self) -> usize {
        self.trail.len()
    }
}

/// A leaf answer matched several species; the user has to pick one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSelectionStep {
    pub quiz: Quiz,
    pub trail: Vec<AnsweredQuestion>,
    pub candidates: Vec<Target>,
}

/// Terminal outcome of a traversal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
    pub selected_target: Option<Target>,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<QuizError>,
}

impl QuizOutcome {
    pub fn resolved(target: Target) -> Self {
        Self {
            selected_target: Some(target),
            error: None,
        }
    }

    pub fn failed(error: QuizError) -> Self {
        Self {
            selected_target: None,
            error: Some(error),
        }
    }

    /// User-facing message, present whenever no target was selected
    pub fn message(&self) -> Option<&'static str> {
        self.error.as_ref().map(QuizError::message)
    }
}

fn serialize_error<S: serde::Serializer>(
    error: &Option<QuizError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(err) => serializer.serialize_some(err.message()),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum QuizState {
    #[default]
    Start,
    Question(QuestionStep),
    TargetSelection(TargetSelectionStep),
    Result(QuizOutcome),
}

impl QuizState {
    /// Check if the traversal has reached `Result`
    pub fn is_finished(&self) -> bool {
        matches!(self, QuizState::Result(_))
    }

    pub fn outcome(&self) -> Option<&QuizOutcome> {
        match self {
            QuizState::Result(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            QuizState::Start => "start",
            QuizState::Question(_) => "question",
            QuizState::TargetSelection(_) => "target_selection",
            QuizState::Result(_) => "result",
        }
    }
}

/// Inputs to [`reduce`]; the `*Loaded`/`*Resolved` events carry fetched data
#[derive(Debug, Clone)]
pub enum QuizEvent {
    /// Root question of a quiz fetched
    Loaded {
        quiz: Quiz,
        question: Question,
        answers: Vec<Answer>,
    },
    /// Follow-up question of a non-leaf answer fetched
    NextQuestion {
        answer_id: Uuid,
        question: Question,
        answers: Vec<Answer>,
    },
    /// Targets of a leaf answer fetched and resolved
    TargetsResolved {
        answer_id: Uuid,
        targets: Vec<Target>,
    },
    TargetChosen(Uuid),
    Back,
    Failed(QuizError),
    Reset,
}

/// Compute the next state. Events that do not apply to the current state
/// return it unchanged.
pub fn reduce(state: QuizState, event: QuizEvent) -> QuizState {
    match (state, event) {
        (_, QuizEvent::Reset) => QuizState::Start,
        (_, QuizEvent::Failed(error)) => QuizState::Result(QuizOutcome::failed(error)),
        (
            _,
            QuizEvent::Loaded {
                quiz,
                question,
                answers,
            },
        ) => QuizState::Question(QuestionStep {
            quiz,
            question,
            answers,
            trail: Vec::new(),
        }),
        (
            QuizState::Question(step),
            QuizEvent::NextQuestion {
                answer_id,
                question,
                answers,
            },
        ) => {
            let leads_there = step
                .answer(answer_id)
                .is_some_and(|answer| answer.next_question_id == Some(question.id));
            if !leads_there {
                return QuizState::Question(step);
            }
            if step.has_visited(question.id) {
                return QuizState::Result(QuizOutcome::failed(QuizError::CycleDetected(
                    question.id,
                )));
            }

            let QuestionStep {
                quiz,
                question: previous,
                answers: previous_answers,
                mut trail,
            } = step;
            trail.push(AnsweredQuestion {
                question: previous,
                answers: previous_answers,
                chosen_answer_id: answer_id,
            });
            QuizState::Question(QuestionStep {
                quiz,
                question,
                answers,
                trail,
            })
        }
        (QuizState::Question(step), QuizEvent::TargetsResolved { answer_id, targets }) => {
            if !step.answer(answer_id).is_some_and(Answer::is_leaf) {
                return QuizState::Question(step);
            }

            let mut targets = targets;
            match targets.len() {
                0 => QuizState::Result(QuizOutcome::failed(QuizError::NoClassification(
                    answer_id,
                ))),
                1 => QuizState::Result(QuizOutcome::resolved(targets.remove(0))),
                _ => {
                    let QuestionStep {
                        quiz,
                        question,
                        answers,
                        mut trail,
                    } = step;
                    trail.push(AnsweredQuestion {
                        question,
                        answers,
                        chosen_answer_id: answer_id,
                    });
                    QuizState::TargetSelection(TargetSelectionStep {
                        quiz,
                        trail,
                        candidates: targets,
                    })
                }
            }
        }
        (QuizState::TargetSelection(step), QuizEvent::TargetChosen(target_id)) => {
            match step.candidates.iter().find(|t| t.id() == target_id) {
                Some(target) => QuizState::Result(QuizOutcome::resolved(target.clone())),
                None => QuizState::TargetSelection(step),
            }
        }
        (QuizState::Question(mut step), QuizEvent::Back) => match step.trail.pop() {
            Some(previous) => QuizState::Question(QuestionStep {
                quiz: step.quiz,
                question: previous.question,
                answers: previous.answers,
                trail: step.trail,
            }),
            None => QuizState::Question(step),
        },
        (QuizState::TargetSelection(mut step), QuizEvent::Back) => match step.trail.pop() {
            Some(previous) => QuizState::Question(QuestionStep {
                quiz: step.quiz,
                question: previous.question,
                answers: previous.answers,
                trail: step.trail,
            }),
            None => QuizState::TargetSelection(step),
        },
        (state, _) => state,
    }
}
