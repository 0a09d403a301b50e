//! 管理员审核：待审列表、通过、驳回

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::entities::{Course, CourseStatus};
use crate::models::courses::requests::{CourseListQuery, RejectCourseRequest};
use crate::models::{ApiResponse, ErrorCode, FieldErrors, PaginationQuery};
use crate::services::{internal_error, validation_error};
use crate::utils::validate::validate_required_text;

pub async fn list_pending_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: PaginationQuery,
) -> ActixResult<HttpResponse> {
    let list_query = CourseListQuery {
        page: Some(query.page),
        size: Some(query.size),
        teacher_id: None,
        status: Some(CourseStatus::Pending),
        search: None,
    };

    let storage = service.get_storage(request);
    match storage.list_courses_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Pending courses retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to list pending courses",
            e,
        )),
    }
}

fn pending_course(request: &HttpRequest) -> Result<Course, HttpResponse> {
    let course = CourseService::course_from_request(request)?;
    if course.status != CourseStatus::Pending {
        return Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CourseStatusConflict,
            format!("Only pending courses can be reviewed, this one is {}", course.status),
        )));
    }
    Ok(course)
}

pub async fn approve_course(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let course = match pending_course(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    match storage
        .update_course_status(course.id, CourseStatus::Published, None)
        .await
    {
        Ok(Some(course)) => {
            tracing::info!("Course {} approved and published", course.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "Course published")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to approve course",
            e,
        )),
    }
}

pub async fn reject_course(
    service: &CourseService,
    request: &HttpRequest,
    reject_request: RejectCourseRequest,
) -> ActixResult<HttpResponse> {
    let course = match pending_course(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    let mut errors = FieldErrors::new();
    validate_required_text(&mut errors, "note", &reject_request.note, 2000);
    if !errors.is_empty() {
        return Ok(validation_error(errors));
    }

    let storage = service.get_storage(request);
    match storage
        .update_course_status(
            course.id,
            CourseStatus::Rejected,
            Some(reject_request.note.trim().to_string()),
        )
        .await
    {
        Ok(Some(course)) => {
            tracing::info!("Course {} rejected", course.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "Course rejected")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to reject course",
            e,
        )),
    }
}
