use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 视频来源
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/video.ts")]
pub enum VideoSource {
    Upload,
    Youtube,
}

impl std::fmt::Display for VideoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoSource::Upload => write!(f, "upload"),
            VideoSource::Youtube => write!(f, "youtube"),
        }
    }
}

impl std::str::FromStr for VideoSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upload" => Ok(VideoSource::Upload),
            "youtube" => Ok(VideoSource::Youtube),
            _ => Err(format!("Invalid video source: {s}")),
        }
    }
}

// 视频处理状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/video.ts")]
pub enum VideoStatus {
    Processing,
    Completed,
    Failed,
}

impl std::fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoStatus::Processing => write!(f, "processing"),
            VideoStatus::Completed => write!(f, "completed"),
            VideoStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for VideoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(VideoStatus::Processing),
            "completed" => Ok(VideoStatus::Completed),
            "failed" => Ok(VideoStatus::Failed),
            _ => Err(format!("Invalid video status: {s}")),
        }
    }
}

// 视频库条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/video.ts")]
pub struct Video {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub source: VideoSource,
    pub original_name: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub stored_path: Option<String>,
    pub mime_type: String,
    pub file_size: i64,
    pub youtube_video_id: Option<String>,
    pub duration_seconds: Option<i64>,
    /// H:MM:SS 格式的时长
    pub duration: Option<String>,
    pub status: VideoStatus,
    pub status_message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Video {
    pub fn is_ready(&self) -> bool {
        self.status == VideoStatus::Completed
    }

    pub fn youtube_url(&self) -> Option<String> {
        self.youtube_video_id
            .as_ref()
            .map(|id| format!("https://www.youtube.com/watch?v={id}"))
    }
}
