//! 视频库实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "video_library")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub source: String,
    pub original_name: String,
    pub stored_path: Option<String>,
    pub mime_type: String,
    pub file_size: i64,
    pub youtube_video_id: Option<String>,
    pub duration_seconds: Option<i64>,
    pub status: String,
    pub status_message: Option<String>,
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
    #[sea_orm(has_many = "super::course_lectures::Entity")]
    Lectures,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::course_lectures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lectures.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_video(self) -> crate::models::videos::entities::Video {
        use crate::models::videos::entities::{Video, VideoSource, VideoStatus};
        use crate::youtube::duration::format_duration_hms;
        use super::to_datetime;

        Video {
            id: self.id,
            teacher_id: self.teacher_id,
            title: self.title,
            source: self.source.parse().unwrap_or(VideoSource::Upload),
            original_name: self.original_name,
            stored_path: self.stored_path,
            mime_type: self.mime_type,
            file_size: self.file_size,
            youtube_video_id: self.youtube_video_id,
            duration: self.duration_seconds.map(format_duration_hms),
            duration_seconds: self.duration_seconds,
            status: self.status.parse().unwrap_or(VideoStatus::Failed),
            status_message: self.status_message,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
