//! 课时实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_lectures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub section_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub lecture_number: i32,
    pub content_type: String,
    pub content: Option<String>,
    pub video_id: Option<i64>,
    pub youtube_url: Option<String>,
    pub youtube_video_id: Option<String>,
    pub duration_seconds: Option<i64>,
    pub is_preview: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_sections::Entity",
        from = "Column::SectionId",
        to = "super::course_sections::Column::Id"
    )]
    Section,
    #[sea_orm(
        belongs_to = "super::video_library::Entity",
        from = "Column::VideoId",
        to = "super::video_library::Column::Id"
    )]
    Video,
}

impl Related<super::course_sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::video_library::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Video.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_lecture(self) -> crate::models::lectures::entities::Lecture {
        use crate::models::lectures::entities::{Lecture, LectureContentType};
        use crate::youtube::duration::format_duration_hms;
        use super::to_datetime;

        Lecture {
            id: self.id,
            course_id: self.course_id,
            section_id: self.section_id,
            title: self.title,
            description: self.description,
            lecture_number: self.lecture_number,
            content_type: self
                .content_type
                .parse()
                .unwrap_or(LectureContentType::Text),
            content: self.content,
            video_id: self.video_id,
            youtube_url: self.youtube_url,
            youtube_video_id: self.youtube_video_id,
            duration: self.duration_seconds.map(format_duration_hms),
            duration_seconds: self.duration_seconds,
            is_preview: self.is_preview,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
