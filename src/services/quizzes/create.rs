use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuizService;
use crate::models::quizzes::requests::{CreateQuizRequest, to_new_questions};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::sections::section_in_course;
use crate::services::{CourseService, ensure_course_editable, internal_error, validation_error};

pub async fn create_quiz(
    service: &QuizService,
    request: &HttpRequest,
    section_id: i64,
    create_request: CreateQuizRequest,
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

    let storage = service.get_storage(request);
    if let Err(response) = section_in_course(&storage, course.id, section_id).await {
        return Ok(response);
    }

    // 答案字母 A-D 转为 0-3
    let questions = to_new_questions(&create_request.questions);

    match storage
        .create_quiz(course.id, section_id, create_request, questions)
        .await
    {
        Ok(quiz) => Ok(HttpResponse::Created().json(ApiResponse::success(quiz, "Quiz created"))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to create quiz",
            e,
        )),
    }
}
