use serde::Deserialize;
use ts_rs::TS;

use super::entities::{Lecture, LectureContentType};
use crate::models::FieldErrors;
use crate::utils::validate::{add_error, extract_youtube_video_id, validate_required_text};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lecture.ts")]
pub struct CreateLectureRequest {
    pub title: String,
    pub description: Option<String>,
    pub content_type: String,
    pub content: Option<String>,
    pub video_id: Option<i64>,
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub is_preview: bool,
}

impl CreateLectureRequest {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate_required_text(&mut errors, "title", &self.title, 255);
        validate_lecture_content(
            &mut errors,
            &self.content_type,
            self.content.as_deref(),
            self.video_id,
            self.youtube_url.as_deref(),
        );
        errors
    }

    pub fn parsed_content_type(&self) -> Option<LectureContentType> {
        self.content_type.parse().ok()
    }
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lecture.ts")]
pub struct UpdateLectureRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub content: Option<String>,
    pub video_id: Option<i64>,
    pub youtube_url: Option<String>,
    pub is_preview: Option<bool>,
}

impl UpdateLectureRequest {
    /// 以现有课时补全缺省字段后，按最终的内容类型校验
    pub fn validate(&self, current: &Lecture) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            validate_required_text(&mut errors, "title", title, 255);
        }

        let touches_content = self.content_type.is_some()
            || self.content.is_some()
            || self.video_id.is_some()
            || self.youtube_url.is_some();
        if touches_content {
            let content_type = self
                .content_type
                .clone()
                .unwrap_or_else(|| current.content_type.to_string());
            validate_lecture_content(
                &mut errors,
                &content_type,
                self.content.as_deref().or(current.content.as_deref()),
                self.video_id.or(current.video_id),
                self.youtube_url
                    .as_deref()
                    .or(current.youtube_url.as_deref()),
            );
            if let Ok(content_type) = content_type.parse::<LectureContentType>() {
                reject_foreign_content_fields(
                    &mut errors,
                    content_type,
                    self.content.is_some(),
                    self.video_id.is_some(),
                    self.youtube_url.is_some(),
                );
            }
        }
        errors
    }

    pub fn parsed_content_type(&self) -> Option<LectureContentType> {
        self.content_type.as_deref().and_then(|t| t.parse().ok())
    }
}

/// 已解析的课时内容，新建与更新都以完整记录写入
#[derive(Debug, Clone)]
pub struct LectureRecord {
    pub title: String,
    pub description: Option<String>,
    pub content_type: LectureContentType,
    pub content: Option<String>,
    pub video_id: Option<i64>,
    pub youtube_url: Option<String>,
    pub youtube_video_id: Option<String>,
    pub duration_seconds: Option<i64>,
    pub is_preview: bool,
}

/// 按内容类型检查必填字段
pub fn validate_lecture_content(
    errors: &mut FieldErrors,
    content_type: &str,
    content: Option<&str>,
    video_id: Option<i64>,
    youtube_url: Option<&str>,
) {
    match content_type.parse::<LectureContentType>() {
        Ok(LectureContentType::Text) => {
            if content.is_none_or(|c| c.trim().is_empty()) {
                add_error(
                    errors,
                    "content",
                    "The content field is required when content type is text",
                );
            }
        }
        Ok(LectureContentType::Video) => {
            if video_id.is_none() {
                add_error(
                    errors,
                    "video_id",
                    "The video id field is required when content type is video",
                );
            }
        }
        Ok(LectureContentType::Youtube) => match youtube_url {
            Some(url) if extract_youtube_video_id(url).is_some() => {}
            Some(_) => add_error(errors, "youtube_url", "The youtube url format is invalid"),
            None => add_error(
                errors,
                "youtube_url",
                "The youtube url field is required when content type is youtube",
            ),
        },
        Err(_) => add_error(
            errors,
            "content_type",
            "The content type must be one of: text, video, youtube",
        ),
    }
}

/// 请求里携带了与最终内容类型不符的字段时报错，避免被静默丢弃
fn reject_foreign_content_fields(
    errors: &mut FieldErrors,
    content_type: LectureContentType,
    has_content: bool,
    has_video_id: bool,
    has_youtube_url: bool,
) {
    if has_content && content_type != LectureContentType::Text {
        add_error(
            errors,
            "content",
            "The content field is only allowed when content type is text",
        );
    }
    if has_video_id && content_type != LectureContentType::Video {
        add_error(
            errors,
            "video_id",
            "The video id field is only allowed when content type is video",
        );
    }
    if has_youtube_url && content_type != LectureContentType::Youtube {
        add_error(
            errors,
            "youtube_url",
            "The youtube url field is only allowed when content type is youtube",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(content_type: &str) -> CreateLectureRequest {
        CreateLectureRequest {
            title: "Intro".to_string(),
            description: None,
            content_type: content_type.to_string(),
            content: None,
            video_id: None,
            youtube_url: None,
            is_preview: false,
        }
    }

    #[test]
    fn test_text_requires_content() {
        let errors = create("text").validate();
        assert!(errors.contains_key("content"));

        let mut req = create("text");
        req.content = Some("Hello".to_string());
        assert!(req.validate().is_empty());
    }

    #[test]
    fn test_video_requires_video_id() {
        assert!(create("video").validate().contains_key("video_id"));
    }

    #[test]
    fn test_youtube_requires_valid_url() {
        let mut req = create("youtube");
        req.youtube_url = Some("https://example.com/watch".to_string());
        assert!(req.validate().contains_key("youtube_url"));

        req.youtube_url = Some("https://youtu.be/dQw4w9WgXcQ".to_string());
        assert!(req.validate().is_empty());
    }

    #[test]
    fn test_unknown_content_type() {
        assert!(create("audio").validate().contains_key("content_type"));
    }

    fn text_lecture() -> Lecture {
        let now = chrono::Utc::now();
        Lecture {
            id: 1,
            course_id: 1,
            section_id: 1,
            title: "Intro".to_string(),
            description: None,
            lecture_number: 1,
            content_type: LectureContentType::Text,
            content: Some("Welcome".to_string()),
            video_id: None,
            youtube_url: None,
            youtube_video_id: None,
            duration_seconds: None,
            duration: None,
            is_preview: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_update_rejects_fields_of_other_content_type() {
        let bare_video = UpdateLectureRequest {
            video_id: Some(7),
            ..Default::default()
        };
        let errors = bare_video.validate(&text_lecture());
        assert!(errors.contains_key("video_id"));

        let stray_url = UpdateLectureRequest {
            content: Some("Updated".to_string()),
            youtube_url: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
            ..Default::default()
        };
        let errors = stray_url.validate(&text_lecture());
        assert!(errors.contains_key("youtube_url"));
        assert!(!errors.contains_key("content"));

        let switch = UpdateLectureRequest {
            content_type: Some("video".to_string()),
            video_id: Some(7),
            ..Default::default()
        };
        assert!(switch.validate(&text_lecture()).is_empty());
    }
}
