//! 课时内容解析：把请求中的内容字段转换为可写入的记录字段

use actix_web::HttpResponse;
use std::sync::Arc;

use crate::models::lectures::entities::LectureContentType;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{internal_error, validation_error};
use crate::storage::Storage;
use crate::utils::validate::{add_error, extract_youtube_video_id};

/// 已解析的内容字段
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContent {
    pub content_type: LectureContentType,
    pub content: Option<String>,
    pub video_id: Option<i64>,
    pub youtube_url: Option<String>,
    pub youtube_video_id: Option<String>,
    pub duration_seconds: Option<i64>,
}

/// 按内容类型只保留相关字段，视频类型需查询视频库
pub async fn resolve_content(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
    content_type: LectureContentType,
    content: Option<String>,
    video_id: Option<i64>,
    youtube_url: Option<String>,
) -> Result<ResolvedContent, HttpResponse> {
    match content_type {
        LectureContentType::Text => Ok(ResolvedContent {
            content_type,
            content,
            video_id: None,
            youtube_url: None,
            youtube_video_id: None,
            duration_seconds: None,
        }),
        LectureContentType::Youtube => {
            let url = youtube_url.unwrap_or_default();
            let Some(youtube_video_id) = extract_youtube_video_id(&url) else {
                let mut errors = FieldErrors::new();
                add_error(&mut errors, "youtube_url", "The youtube url format is invalid");
                return Err(validation_error(errors));
            };
            Ok(ResolvedContent {
                content_type,
                content: None,
                video_id: None,
                youtube_url: Some(url),
                youtube_video_id: Some(youtube_video_id),
                duration_seconds: None,
            })
        }
        LectureContentType::Video => {
            let Some(id) = video_id else {
                let mut errors = FieldErrors::new();
                add_error(
                    &mut errors,
                    "video_id",
                    "The video id field is required when content type is video",
                );
                return Err(validation_error(errors));
            };

            let video = match storage.get_video_by_id(id).await {
                Ok(Some(video)) if video.teacher_id == teacher_id => video,
                Ok(_) => {
                    let mut errors = FieldErrors::new();
                    add_error(&mut errors, "video_id", "The selected video is invalid");
                    return Err(validation_error(errors));
                }
                Err(e) => {
                    return Err(internal_error(
                        ErrorCode::InternalServerError,
                        "Failed to load video",
                        e,
                    ));
                }
            };

            if !video.is_ready() {
                return Err(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                    ErrorCode::VideoNotReady,
                    format!("The selected video is {}", video.status),
                )));
            }

            Ok(ResolvedContent {
                content_type,
                content: None,
                video_id: Some(video.id),
                youtube_url: None,
                youtube_video_id: None,
                duration_seconds: video.duration_seconds,
            })
        }
    }
}
