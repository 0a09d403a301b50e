use serde::Serialize;
use ts_rs::TS;

use super::entities::Section;
use crate::models::lectures::entities::Lecture;
use crate::models::quizzes::responses::QuizWithQuestions;

// 章节及其下属的课时与测验，均按编号排序
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/section.ts")]
pub struct SectionWithContent {
    #[serde(flatten)]
    #[ts(flatten)]
    pub section: Section,
    pub lectures: Vec<Lecture>,
    pub quizzes: Vec<QuizWithQuestions>,
}
