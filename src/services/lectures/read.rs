use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LectureService, lecture_in_section};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::sections::section_in_course;
use crate::services::{CourseService, internal_error};

pub async fn list_lectures(
    service: &LectureService,
    request: &HttpRequest,
    section_id: i64,
) -> ActixResult<HttpResponse> {
    let course = match CourseService::course_from_request(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    if let Err(response) = section_in_course(&storage, course.id, section_id).await {
        return Ok(response);
    }

    match storage.list_lectures(section_id).await {
        Ok(lectures) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lectures,
            "Lectures retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to list lectures",
            e,
        )),
    }
}

pub async fn get_lecture(
    service: &LectureService,
    request: &HttpRequest,
    section_id: i64,
    lecture_id: i64,
) -> ActixResult<HttpResponse> {
    let course = match CourseService::course_from_request(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    if let Err(response) = section_in_course(&storage, course.id, section_id).await {
        return Ok(response);
    }

    match lecture_in_section(&storage, section_id, lecture_id).await {
        Ok(lecture) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            lecture,
            "Lecture retrieved successfully",
        ))),
        Err(response) => Ok(response),
    }
}
