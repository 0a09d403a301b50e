use serde::Serialize;
use ts_rs::TS;

use super::entities::{Quiz, QuizQuestion};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizWithQuestions {
    #[serde(flatten)]
    #[ts(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<QuizQuestion>,
}
