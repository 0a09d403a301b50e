//! 测验题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    pub question: String,
    /// JSON 数组形式存储的四个选项
    #[sea_orm(column_type = "Text")]
    pub options: String,
    pub correct_answer: i32,
    pub explanation: Option<String>,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_quizzes::Entity",
        from = "Column::QuizId",
        to = "super::course_quizzes::Column::Id"
    )]
    Quiz,
}

impl Related<super::course_quizzes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_question(self) -> crate::models::quizzes::entities::QuizQuestion {
        use crate::utils::answer::index_to_letter;

        crate::models::quizzes::entities::QuizQuestion {
            id: self.id,
            quiz_id: self.quiz_id,
            question: self.question,
            options: serde_json::from_str(&self.options).unwrap_or_default(),
            correct_answer_letter: index_to_letter(self.correct_answer)
                .map(String::from)
                .unwrap_or_default(),
            correct_answer: self.correct_answer,
            explanation: self.explanation,
            sort_order: self.sort_order,
        }
    }
}
