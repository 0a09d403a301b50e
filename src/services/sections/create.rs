use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SectionService;
use crate::models::sections::requests::CreateSectionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{CourseService, ensure_course_editable, internal_error, validation_error};

/// 新章节追加到课程末尾
pub async fn create_section(
    service: &SectionService,
    request: &HttpRequest,
    create_request: CreateSectionRequest,
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
    match storage.create_section(course.id, create_request).await {
        Ok(section) => Ok(HttpResponse::Created().json(ApiResponse::success(
            section,
            "Section created",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to create section",
            e,
        )),
    }
}
