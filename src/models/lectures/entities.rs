use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课时内容类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/lecture.ts")]
pub enum LectureContentType {
    Text,
    Video,
    Youtube,
}

impl std::fmt::Display for LectureContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LectureContentType::Text => write!(f, "text"),
            LectureContentType::Video => write!(f, "video"),
            LectureContentType::Youtube => write!(f, "youtube"),
        }
    }
}

impl std::str::FromStr for LectureContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LectureContentType::Text),
            "video" => Ok(LectureContentType::Video),
            "youtube" => Ok(LectureContentType::Youtube),
            _ => Err(format!("Invalid lecture content type: {s}")),
        }
    }
}

// 课时实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lecture.ts")]
pub struct Lecture {
    pub id: i64,
    pub course_id: i64,
    pub section_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub lecture_number: i32,
    pub content_type: LectureContentType,
    pub content: Option<String>,
    pub video_id: Option<i64>,
    pub youtube_url: Option<String>,
    pub youtube_video_id: Option<String>,
    pub duration_seconds: Option<i64>,
    /// H:MM:SS 格式的时长
    pub duration: Option<String>,
    pub is_preview: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
