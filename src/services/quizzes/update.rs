use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{QuizService, quiz_in_section};
use crate::models::quizzes::requests::{QuizChanges, UpdateQuizRequest, to_new_questions};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::sections::section_in_course;
use crate::services::{CourseService, ensure_course_editable, internal_error, validation_error};

/// 提供 questions 时整体替换题目
pub async fn update_quiz(
    service: &QuizService,
    request: &HttpRequest,
    section_id: i64,
    quiz_id: i64,
    update_request: UpdateQuizRequest,
) -> ActixResult<HttpResponse> {
    let course = match CourseService::course_from_request(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };
    if let Err(response) = ensure_course_editable(&course) {
        return Ok(response);
    }

    let errors = update_request.validate();
    if !errors.is_empty() {
        return Ok(validation_error(errors));
    }

    let storage = service.get_storage(request);
    if let Err(response) = section_in_course(&storage, course.id, section_id).await {
        return Ok(response);
    }
    if let Err(response) = quiz_in_section(&storage, section_id, quiz_id).await {
        return Ok(response);
    }

    let changes = QuizChanges {
        questions: update_request.questions.as_deref().map(to_new_questions),
        title: update_request.title,
        description: update_request.description,
        pass_mark: update_request.pass_mark,
    };

    match storage.update_quiz(quiz_id, changes).await {
        Ok(Some(quiz)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            quiz,
            "Quiz updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotFound,
            "Quiz not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to update quiz",
            e,
        )),
    }
}
