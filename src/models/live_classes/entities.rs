use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 直播课状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub enum LiveClassStatus {
    Scheduled,
    Cancelled,
    Completed,
}

impl std::fmt::Display for LiveClassStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiveClassStatus::Scheduled => write!(f, "scheduled"),
            LiveClassStatus::Cancelled => write!(f, "cancelled"),
            LiveClassStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for LiveClassStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(LiveClassStatus::Scheduled),
            "cancelled" => Ok(LiveClassStatus::Cancelled),
            "completed" => Ok(LiveClassStatus::Completed),
            _ => Err(format!("Invalid live class status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct LiveClass {
    pub id: i64,
    pub teacher_id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
    pub meeting_url: String,
    pub status: LiveClassStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
