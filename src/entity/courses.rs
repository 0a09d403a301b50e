//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub language: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub thumbnail_url: Option<String>,
    pub learning_outcomes: Option<String>,
    pub requirements: Option<String>,
    pub status: String,
    pub review_note: Option<String>,
    pub submitted_at: Option<i64>,
    pub published_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::course_sections::Entity")]
    Sections,
    #[sea_orm(has_many = "super::live_classes::Entity")]
    LiveClasses,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::course_sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sections.def()
    }
}

impl Related<super::live_classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LiveClasses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::courses::entities::{Course, CourseStatus};
        use super::to_datetime;

        Course {
            id: self.id,
            teacher_id: self.teacher_id,
            title: self.title,
            subtitle: self.subtitle,
            description: self.description,
            category: self.category,
            level: self.level.and_then(|l| l.parse().ok()),
            language: self.language,
            price: self.price,
            thumbnail_url: self.thumbnail_url,
            learning_outcomes: self.learning_outcomes,
            requirements: self.requirements,
            status: self.status.parse().unwrap_or(CourseStatus::Draft),
            review_note: self.review_note,
            submitted_at: self.submitted_at.map(to_datetime),
            published_at: self.published_at.map(to_datetime),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
