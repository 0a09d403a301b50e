use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LectureService;
use crate::models::sections::requests::ReorderRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::sections::{reorder_mismatch, section_in_course};
use crate::services::{CourseService, ensure_course_editable, internal_error, validation_error};

pub async fn reorder_lectures(
    service: &LectureService,
    request: &HttpRequest,
    section_id: i64,
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
    if let Err(response) = section_in_course(&storage, course.id, section_id).await {
        return Ok(response);
    }

    let existing: Vec<i64> = match storage.list_lectures(section_id).await {
        Ok(lectures) => lectures.iter().map(|l| l.id).collect(),
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "Failed to list lectures",
                e,
            ));
        }
    };
    if !reorder_request.matches(&existing) {
        return Ok(reorder_mismatch());
    }

    match storage.reorder_lectures(section_id, &reorder_request.ids).await {
        Ok(lectures) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lectures,
            "Lectures reordered",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to reorder lectures",
            e,
        )),
    }
}
