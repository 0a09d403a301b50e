use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::requests::UpdateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{ensure_course_editable, internal_error, validation_error};

/// 向导的详情与定价步骤，只更新提交的字段
pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    update_request: UpdateCourseRequest,
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
    match storage.update_course(course.id, update_request).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to update course",
            e,
        )),
    }
}
