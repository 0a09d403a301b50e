use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QuizService, quiz_in_section};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::sections::section_in_course;
use crate::services::{CourseService, internal_error};

pub async fn list_quizzes(
    service: &QuizService,
    request: &HttpRequest,
    section_id: i64,
) -> ActixResult<HttpResponse> {
    let course = match CourseService::course_from_request(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    if let Err(response) = section_in_course(&storage, course.id, section_id).await {
        return Ok(response);
    }

    match storage.list_quizzes(section_id).await {
        Ok(quizzes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            quizzes,
            "Quizzes retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to list quizzes",
            e,
        )),
    }
}

pub async fn get_quiz(
    service: &QuizService,
    request: &HttpRequest,
    section_id: i64,
    quiz_id: i64,
) -> ActixResult<HttpResponse> {
    let course = match CourseService::course_from_request(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    if let Err(response) = section_in_course(&storage, course.id, section_id).await {
        return Ok(response);
    }

    match quiz_in_section(&storage, section_id, quiz_id).await {
        Ok(quiz) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            quiz,
            "Quiz retrieved successfully",
        ))),
        Err(response) => Ok(response),
    }
}
