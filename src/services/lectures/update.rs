use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::content::resolve_content;
use super::{LectureService, lecture_in_section};
use crate::models::lectures::entities::Lecture;
use crate::models::lectures::requests::{LectureRecord, UpdateLectureRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::sections::section_in_course;
use crate::services::{CourseService, ensure_course_editable, internal_error, validation_error};

/// 以现有课时为底合并请求中的字段
fn merged_record(current: &Lecture, update: &UpdateLectureRequest) -> LectureRecord {
    LectureRecord {
        title: update.title.clone().unwrap_or_else(|| current.title.clone()),
        description: update
            .description
            .clone()
            .or_else(|| current.description.clone()),
        content_type: update
            .parsed_content_type()
            .unwrap_or(current.content_type),
        content: update.content.clone().or_else(|| current.content.clone()),
        video_id: update.video_id.or(current.video_id),
        youtube_url: update
            .youtube_url
            .clone()
            .or_else(|| current.youtube_url.clone()),
        youtube_video_id: current.youtube_video_id.clone(),
        duration_seconds: current.duration_seconds,
        is_preview: update.is_preview.unwrap_or(current.is_preview),
    }
}

fn touches_content(update: &UpdateLectureRequest) -> bool {
    update.content_type.is_some()
        || update.content.is_some()
        || update.video_id.is_some()
        || update.youtube_url.is_some()
}

pub async fn update_lecture(
    service: &LectureService,
    request: &HttpRequest,
    section_id: i64,
    lecture_id: i64,
    update_request: UpdateLectureRequest,
) -> ActixResult<HttpResponse> {
    let course = match CourseService::course_from_request(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };
    if let Err(response) = ensure_course_editable(&course) {
        return Ok(response);
    }

    let storage = service.get_storage(request);
    if let Err(response) = section_in_course(&storage, course.id, section_id).await {
        return Ok(response);
    }
    let current = match lecture_in_section(&storage, section_id, lecture_id).await {
        Ok(lecture) => lecture,
        Err(response) => return Ok(response),
    };

    let errors = update_request.validate(&current);
    if !errors.is_empty() {
        return Ok(validation_error(errors));
    }

    let mut record = merged_record(&current, &update_request);

    // 内容字段有改动时按最终类型重新解析
    if touches_content(&update_request) {
        let resolved = match resolve_content(
            &storage,
            course.teacher_id,
            record.content_type,
            record.content.take(),
            record.video_id,
            record.youtube_url.take(),
        )
        .await
        {
            Ok(resolved) => resolved,
            Err(response) => return Ok(response),
        };
        record.content_type = resolved.content_type;
        record.content = resolved.content;
        record.video_id = resolved.video_id;
        record.youtube_url = resolved.youtube_url;
        record.youtube_video_id = resolved.youtube_video_id;
        record.duration_seconds = resolved.duration_seconds;
    }

    match storage.update_lecture(lecture_id, record).await {
        Ok(Some(lecture)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lecture,
            "Lecture updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LectureNotFound,
            "Lecture not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to update lecture",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lectures::entities::LectureContentType;

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
    fn test_title_only_update_keeps_content() {
        let update = UpdateLectureRequest {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let record = merged_record(&text_lecture(), &update);
        assert_eq!(record.title, "Renamed");
        assert_eq!(record.content.as_deref(), Some("Welcome"));
        assert_eq!(record.content_type, LectureContentType::Text);
        assert!(!touches_content(&update));
    }

    #[test]
    fn test_switching_to_youtube_touches_content() {
        let update = UpdateLectureRequest {
            content_type: Some("youtube".to_string()),
            youtube_url: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
            ..Default::default()
        };
        let record = merged_record(&text_lecture(), &update);
        assert_eq!(record.content_type, LectureContentType::Youtube);
        assert!(touches_content(&update));
    }
}
