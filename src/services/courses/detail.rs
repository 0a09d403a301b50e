use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::responses::CourseDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

/// 课程详情，章节按顺序排列，每个章节内含课时与测验
pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let course = match CourseService::course_from_request(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    match storage.get_course_curriculum(course.id).await {
        Ok(sections) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseDetailResponse { course, sections },
            "Course retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to load course curriculum",
            e,
        )),
    }
}
