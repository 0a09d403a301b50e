//! 直播课实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "live_classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: i64,
    pub duration_minutes: i32,
    pub meeting_url: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_live_class(self) -> crate::models::live_classes::entities::LiveClass {
        use crate::models::live_classes::entities::{LiveClass, LiveClassStatus};
        use super::to_datetime;

        LiveClass {
            id: self.id,
            teacher_id: self.teacher_id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            scheduled_at: to_datetime(self.scheduled_at),
            duration_minutes: self.duration_minutes,
            meeting_url: self.meeting_url,
            status: self.status.parse().unwrap_or(LiveClassStatus::Scheduled),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
