use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SectionService, section_in_course};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{CourseService, ensure_course_editable, internal_error};

/// 删除章节及其课时和测验，剩余章节重新编号
pub async fn delete_section(
    service: &SectionService,
    request: &HttpRequest,
    section_id: i64,
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

    match storage.delete_section(section_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Section deleted"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SectionNotFound,
            "Section not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to delete section",
            e,
        )),
    }
}
