use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SectionService, reorder_mismatch};
use crate::models::sections::requests::ReorderRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{CourseService, ensure_course_editable, internal_error, validation_error};

pub async fn reorder_sections(
    service: &SectionService,
    request: &HttpRequest,
    reorder_request: ReorderRequest,
) -> ActixResult<HttpResponse> {
    let course = match CourseService::course_from_request(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };
    if let Err(response) = ensure_course_editable(&course) {
        return Ok(response);
    }

    let errors = reorder_request.validate();
    if !errors.is_empty() {
        return Ok(validation_error(errors));
    }

    let storage = service.get_storage(request);
    let existing: Vec<i64> = match storage.list_sections(course.id).await {
        Ok(sections) => sections.iter().map(|s| s.id).collect(),
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "Failed to list sections",
                e,
            ));
        }
    };
    if !reorder_request.matches(&existing) {
        return Ok(reorder_mismatch());
    }

    match storage.reorder_sections(course.id, &reorder_request.ids).await {
        Ok(sections) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            sections,
            "Sections reordered",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to reorder sections",
            e,
        )),
    }
}
