use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LectureService;
use super::content::resolve_content;
use crate::models::lectures::entities::LectureContentType;
use crate::models::lectures::requests::{CreateLectureRequest, LectureRecord};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::sections::section_in_course;
use crate::services::{CourseService, ensure_course_editable, internal_error, validation_error};

/// 新课时编号为章节内最大编号加一
pub async fn create_lecture(
    service: &LectureService,
    request: &HttpRequest,
    section_id: i64,
    create_request: CreateLectureRequest,
) -> ActixResult<HttpResponse> {
    let course = match CourseService::course_from_request(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };
    if let Err(response) = ensure_course_editable(&course) {
        return Ok(response);
    }

    let errors = create_request.validate();
    if !errors.is_empty() {
        return Ok(validation_error(errors));
    }
    let content_type = create_request
        .parsed_content_type()
        .unwrap_or(LectureContentType::Text);

    let storage = service.get_storage(request);
    if let Err(response) = section_in_course(&storage, course.id, section_id).await {
        return Ok(response);
    }

    let resolved = match resolve_content(
        &storage,
        course.teacher_id,
        content_type,
        create_request.content,
        create_request.video_id,
        create_request.youtube_url,
    )
    .await
    {
        Ok(resolved) => resolved,
        Err(response) => return Ok(response),
    };

    let record = LectureRecord {
        title: create_request.title,
        description: create_request.description,
        content_type: resolved.content_type,
        content: resolved.content,
        video_id: resolved.video_id,
        youtube_url: resolved.youtube_url,
        youtube_video_id: resolved.youtube_video_id,
        duration_seconds: resolved.duration_seconds,
        is_preview: create_request.is_preview,
    };

    match storage.create_lecture(course.id, section_id, record).await {
        Ok(lecture) => Ok(HttpResponse::Created().json(ApiResponse::success(
            lecture,
            "Lecture created",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to create lecture",
            e,
        )),
    }
}
