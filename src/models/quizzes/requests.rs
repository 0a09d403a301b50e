use serde::Deserialize;
use ts_rs::TS;

use super::entities::NewQuizQuestion;
use crate::models::FieldErrors;
use crate::utils::answer::{ANSWER_OPTION_COUNT, letter_to_index};
use crate::utils::validate::{add_error, validate_required_text};

// 题目输入，正确答案以字母 A-D 表示
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizQuestionInput {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct CreateQuizRequest {
    pub title: String,
    pub description: Option<String>,
    pub pass_mark: Option<i32>,
    #[serde(default)]
    pub questions: Vec<QuizQuestionInput>,
}

impl CreateQuizRequest {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate_required_text(&mut errors, "title", &self.title, 255);
        validate_pass_mark(&mut errors, self.pass_mark);
        validate_questions(&mut errors, &self.questions);
        errors
    }
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct UpdateQuizRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub pass_mark: Option<i32>,
    /// 提供时整体替换题目
    pub questions: Option<Vec<QuizQuestionInput>>,
}

impl UpdateQuizRequest {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            validate_required_text(&mut errors, "title", title, 255);
        }
        validate_pass_mark(&mut errors, self.pass_mark);
        if let Some(questions) = &self.questions {
            validate_questions(&mut errors, questions);
        }
        errors
    }
}

fn validate_pass_mark(errors: &mut FieldErrors, pass_mark: Option<i32>) {
    if let Some(mark) = pass_mark
        && !(0..=100).contains(&mark)
    {
        add_error(errors, "pass_mark", "The pass mark must be between 0 and 100");
    }
}

fn validate_questions(errors: &mut FieldErrors, questions: &[QuizQuestionInput]) {
    for (i, q) in questions.iter().enumerate() {
        if q.question.trim().is_empty() {
            add_error(
                errors,
                &format!("questions.{i}.question"),
                "The question field is required",
            );
        }
        if q.options.len() != ANSWER_OPTION_COUNT {
            add_error(
                errors,
                &format!("questions.{i}.options"),
                format!("Each question must have exactly {ANSWER_OPTION_COUNT} options"),
            );
        } else if q.options.iter().any(|o| o.trim().is_empty()) {
            add_error(
                errors,
                &format!("questions.{i}.options"),
                "Options must not be empty",
            );
        }
        if letter_to_index(&q.correct_answer).is_none() {
            add_error(
                errors,
                &format!("questions.{i}.correct_answer"),
                "The correct answer must be one of A, B, C, D",
            );
        }
    }
}

/// 测验的存储层修改，questions 为 Some 时整体替换
#[derive(Debug, Clone, Default)]
pub struct QuizChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub pass_mark: Option<i32>,
    pub questions: Option<Vec<NewQuizQuestion>>,
}

/// 将已校验的题目输入转换为存储结构
pub fn to_new_questions(questions: &[QuizQuestionInput]) -> Vec<NewQuizQuestion> {
    questions
        .iter()
        .filter_map(|q| {
            letter_to_index(&q.correct_answer).map(|answer| NewQuizQuestion {
                question: q.question.trim().to_string(),
                options: q.options.iter().map(|o| o.trim().to_string()).collect(),
                correct_answer: answer,
                explanation: q.explanation.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: &str) -> QuizQuestionInput {
        QuizQuestionInput {
            question: "2 + 2 = ?".to_string(),
            options: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            correct_answer: answer.to_string(),
            explanation: None,
        }
    }

    #[test]
    fn test_letters_map_to_indexes() {
        let inputs = vec![question("A"), question("b"), question(" C "), question("d")];
        let mapped = to_new_questions(&inputs);
        let answers: Vec<i32> = mapped.iter().map(|q| q.correct_answer).collect();
        assert_eq!(answers, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_invalid_letter_is_field_error() {
        let req = CreateQuizRequest {
            title: "Quiz".to_string(),
            description: None,
            pass_mark: Some(70),
            questions: vec![question("A"), question("E")],
        };
        let errors = req.validate();
        assert!(errors.contains_key("questions.1.correct_answer"));
        assert!(!errors.contains_key("questions.0.correct_answer"));
    }

    #[test]
    fn test_option_count_enforced() {
        let mut q = question("A");
        q.options.pop();
        let req = UpdateQuizRequest {
            questions: Some(vec![q]),
            pass_mark: Some(101),
            ..Default::default()
        };
        let errors = req.validate();
        assert!(errors.contains_key("questions.0.options"));
        assert!(errors.contains_key("pass_mark"));
    }
}
