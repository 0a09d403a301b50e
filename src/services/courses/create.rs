use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, validation_error};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    create_request: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let errors = create_request.validate();
    if !errors.is_empty() {
        return Ok(validation_error(errors));
    }

    let storage = service.get_storage(request);
    match storage.create_course(user.id, create_request).await {
        Ok(course) => {
            tracing::info!("Teacher {} created draft course {}", user.id, course.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "Course created")))
        }
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to create course",
            e,
        )),
    }
}
