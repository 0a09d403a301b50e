use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 测验
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct Quiz {
    pub id: i64,
    pub course_id: i64,
    pub section_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub quiz_number: i32,
    pub pass_mark: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 测验题目，同时给出答案序号和字母
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizQuestion {
    pub id: i64,
    pub quiz_id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
    pub correct_answer_letter: String,
    pub explanation: Option<String>,
    pub sort_order: i32,
}

/// 待写入的题目，答案已转换为 0..=3 序号
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i32,
    pub explanation: Option<String>,
}
