use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::LiveClassStatus;
use crate::models::{FieldErrors, PaginationQuery};
use crate::utils::validate::{add_error, is_http_url, validate_required_text};

pub const MIN_DURATION_MINUTES: i32 = 15;
pub const MAX_DURATION_MINUTES: i32 = 480;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct CreateLiveClassRequest {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub meeting_url: String,
}

impl CreateLiveClassRequest {
    pub fn validate(&self, now: DateTime<Utc>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate_required_text(&mut errors, "title", &self.title, 255);
        validate_schedule(&mut errors, Some(self.scheduled_at), now);
        validate_duration(&mut errors, Some(self.duration_minutes));
        validate_meeting_url(&mut errors, Some(&self.meeting_url));
        errors
    }
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct UpdateLiveClassRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub meeting_url: Option<String>,
}

impl UpdateLiveClassRequest {
    pub fn validate(&self, now: DateTime<Utc>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            validate_required_text(&mut errors, "title", title, 255);
        }
        validate_schedule(&mut errors, self.scheduled_at, now);
        validate_duration(&mut errors, self.duration_minutes);
        validate_meeting_url(&mut errors, self.meeting_url.as_deref());
        errors
    }
}

fn validate_schedule(errors: &mut FieldErrors, scheduled_at: Option<DateTime<Utc>>, now: DateTime<Utc>) {
    if let Some(at) = scheduled_at
        && at <= now
    {
        add_error(errors, "scheduled_at", "The scheduled time must be in the future");
    }
}

fn validate_duration(errors: &mut FieldErrors, duration: Option<i32>) {
    if let Some(minutes) = duration
        && !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes)
    {
        add_error(
            errors,
            "duration_minutes",
            format!(
                "The duration must be between {MIN_DURATION_MINUTES} and {MAX_DURATION_MINUTES} minutes"
            ),
        );
    }
}

fn validate_meeting_url(errors: &mut FieldErrors, url: Option<&str>) {
    if let Some(url) = url
        && !is_http_url(url)
    {
        add_error(errors, "meeting_url", "The meeting url must be a valid http(s) URL");
    }
}

// 直播课列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct LiveClassQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<i64>,
    pub status: Option<LiveClassStatus>,
    /// 只返回尚未开始的直播课
    #[serde(default)]
    pub upcoming: bool,
}

// 直播课列表查询（用于存储层）
#[derive(Debug, Clone)]
pub struct LiveClassListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
    pub course_id: Option<i64>,
    pub status: Option<LiveClassStatus>,
    pub scheduled_after: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request(now: DateTime<Utc>) -> CreateLiveClassRequest {
        CreateLiveClassRequest {
            course_id: 1,
            title: "Office hours".to_string(),
            description: None,
            scheduled_at: now + Duration::hours(2),
            duration_minutes: 60,
            meeting_url: "https://meet.example.com/abc".to_string(),
        }
    }

    #[test]
    fn test_valid_live_class() {
        let now = Utc::now();
        assert!(request(now).validate(now).is_empty());
    }

    #[test]
    fn test_past_schedule_rejected() {
        let now = Utc::now();
        let mut req = request(now);
        req.scheduled_at = now - Duration::minutes(1);
        assert!(req.validate(now).contains_key("scheduled_at"));
    }

    #[test]
    fn test_duration_bounds() {
        let now = Utc::now();
        let mut req = request(now);
        req.duration_minutes = 14;
        assert!(req.validate(now).contains_key("duration_minutes"));
        req.duration_minutes = 15;
        assert!(req.validate(now).is_empty());
        req.duration_minutes = 480;
        assert!(req.validate(now).is_empty());
        req.duration_minutes = 481;
        assert!(req.validate(now).contains_key("duration_minutes"));
    }

    #[test]
    fn test_meeting_url_scheme() {
        let now = Utc::now();
        let mut req = request(now);
        req.meeting_url = "ftp://meet.example.com".to_string();
        assert!(req.validate(now).contains_key("meeting_url"));
    }
}
