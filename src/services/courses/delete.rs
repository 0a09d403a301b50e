use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::entities::CourseStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

/// 只有草稿或被驳回的课程可以删除
pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let course = match CourseService::course_from_request(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    if !matches!(course.status, CourseStatus::Draft | CourseStatus::Rejected) {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CourseStatusConflict,
            format!("A {} course cannot be deleted", course.status),
        )));
    }

    let storage = service.get_storage(request);
    match storage.delete_course(course.id).await {
        Ok(true) => {
            tracing::info!("Course {} deleted", course.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to delete course",
            e,
        )),
    }
}
