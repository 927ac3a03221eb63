use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Locale used when a translation is missing
pub const FALLBACK_LOCALE: &str = "en";

/// Identification quiz for one subject type ("plant", "insect", ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Quiz {
    pub id: Uuid,
    pub quiz_type: String,
    pub root_question_id: Option<Uuid>,
}

impl Quiz {
    /// Create a new Quiz
    pub fn new(quiz_type: impl Into<String>, root_question_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            quiz_type: quiz_type.into(),
            root_question_id,
        }
    }
}

/// Question node of a quiz decision tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub text_en: String,
    pub text_de: Option<String>,
    pub image_path: Option<String>,
}

impl Question {
    /// Create a new Question with English text only
    pub fn new(quiz_id: Uuid, text_en: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            quiz_id,
            text_en: text_en.into(),
            text_de: None,
            image_path: None,
        }
    }

    /// Question text for a locale, falling back to English
    pub fn text(&self, locale: &str) -> &str {
        localized(&self.text_en, self.text_de.as_deref(), locale)
    }
}

/// Answer edge of a quiz decision tree.
///
/// An answer either points at the next question or is a leaf whose
/// classification lives in `answer_targets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: Uuid,
    pub question_id: Uuid,
    pub text_en: String,
    pub text_de: Option<String>,
    pub image_path: Option<String>,
    pub next_question_id: Option<Uuid>,
    pub sort_order: i32,
}

impl Answer {
    /// Create a new Answer
    pub fn new(
        question_id: Uuid,
        text_en: impl Into<String>,
        next_question_id: Option<Uuid>,
        sort_order: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            question_id,
            text_en: text_en.into(),
            text_de: None,
            image_path: None,
            next_question_id,
            sort_order,
        }
    }

    /// Answer text for a locale, falling back to English
    pub fn text(&self, locale: &str) -> &str {
        localized(&self.text_en, self.text_de.as_deref(), locale)
    }

    /// Check if the answer terminates the walk
    pub fn is_leaf(&self) -> bool {
        self.next_question_id.is_none()
    }
}

fn localized<'a>(en: &'a str, de: Option<&'a str>, locale: &str) -> &'a str {
    match locale.to_lowercase().as_str() {
        "de" => de.filter(|s| !s.is_empty()).unwrap_or(en),
        _ => en,
    }
}
