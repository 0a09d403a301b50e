use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum CourseStatus {
    Draft,     // 草稿
    Pending,   // 待审核
    Published, // 已发布
    Rejected,  // 已驳回
}

impl CourseStatus {
    pub const DRAFT: &'static str = "draft";
    pub const PENDING: &'static str = "pending";
    pub const PUBLISHED: &'static str = "published";
    pub const REJECTED: &'static str = "rejected";

    /// 审核中的课程不可编辑
    pub fn is_editable(&self) -> bool {
        !matches!(self, CourseStatus::Pending)
    }

    /// 只有草稿和被驳回的课程可以提交审核或删除
    pub fn is_submittable(&self) -> bool {
        matches!(self, CourseStatus::Draft | CourseStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Draft => Self::DRAFT,
            CourseStatus::Pending => Self::PENDING,
            CourseStatus::Published => Self::PUBLISHED,
            CourseStatus::Rejected => Self::REJECTED,
        }
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CourseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::DRAFT => Ok(CourseStatus::Draft),
            Self::PENDING => Ok(CourseStatus::Pending),
            Self::PUBLISHED => Ok(CourseStatus::Published),
            Self::REJECTED => Ok(CourseStatus::Rejected),
            _ => Err(format!("Invalid course status: {s}")),
        }
    }
}

// 课程难度
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
    AllLevels,
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseLevel::Beginner => write!(f, "beginner"),
            CourseLevel::Intermediate => write!(f, "intermediate"),
            CourseLevel::Advanced => write!(f, "advanced"),
            CourseLevel::AllLevels => write!(f, "all_levels"),
        }
    }
}

impl std::str::FromStr for CourseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(CourseLevel::Beginner),
            "intermediate" => Ok(CourseLevel::Intermediate),
            "advanced" => Ok(CourseLevel::Advanced),
            "all_levels" => Ok(CourseLevel::AllLevels),
            _ => Err(format!("Invalid course level: {s}")),
        }
    }
}

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
    pub language: Option<String>,
    pub price: f64,
    pub thumbnail_url: Option<String>,
    pub learning_outcomes: Option<String>,
    pub requirements: Option<String>,
    pub status: CourseStatus,
    pub review_note: Option<String>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_rules() {
        assert!(CourseStatus::Draft.is_editable());
        assert!(CourseStatus::Published.is_editable());
        assert!(!CourseStatus::Pending.is_editable());

        assert!(CourseStatus::Draft.is_submittable());
        assert!(CourseStatus::Rejected.is_submittable());
        assert!(!CourseStatus::Pending.is_submittable());
        assert!(!CourseStatus::Published.is_submittable());
    }

    #[test]
    fn test_level_roundtrip_names() {
        assert_eq!(
            "all_levels".parse::<CourseLevel>().unwrap(),
            CourseLevel::AllLevels
        );
        assert_eq!(CourseLevel::AllLevels.to_string(), "all_levels");
        assert!("expert".parse::<CourseLevel>().is_err());
    }
}
