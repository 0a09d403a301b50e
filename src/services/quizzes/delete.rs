use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QuizService, quiz_in_section};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::sections::section_in_course;
use crate::services::{CourseService, ensure_course_editable, internal_error};

pub async fn delete_quiz(
    service: &QuizService,
    request: &HttpRequest,
    section_id: i64,
    quiz_id: i64,
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
    if let Err(response) = quiz_in_section(&storage, section_id, quiz_id).await {
        return Ok(response);
    }

    match storage.delete_quiz(quiz_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Quiz deleted"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotFound,
            "Quiz not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to delete quiz",
            e,
        )),
    }
}
