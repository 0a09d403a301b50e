use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SectionService, section_in_course};
use crate::models::sections::requests::UpdateSectionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{CourseService, ensure_course_editable, internal_error, validation_error};

pub async fn update_section(
    service: &SectionService,
    request: &HttpRequest,
    section_id: i64,
    update_request: UpdateSectionRequest,
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

    match storage.update_section(section_id, update_request).await {
        Ok(Some(section)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            section,
            "Section updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SectionNotFound,
            "Section not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to update section",
            e,
        )),
    }
}
