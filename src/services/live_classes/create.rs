use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LiveClassService;
use crate::models::live_classes::requests::CreateLiveClassRequest;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{current_user, internal_error, validation_error};
use crate::utils::validate::add_error;

pub async fn create_live_class(
    service: &LiveClassService,
    request: &HttpRequest,
    create_request: CreateLiveClassRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let errors = create_request.validate(chrono::Utc::now());
    if !errors.is_empty() {
        return Ok(validation_error(errors));
    }

    let storage = service.get_storage(request);

    // 只能为自己的课程安排直播
    match storage.get_course_by_id(create_request.course_id).await {
        Ok(Some(course)) if course.teacher_id == user.id => {}
        Ok(_) => {
            let mut errors = FieldErrors::new();
            add_error(&mut errors, "course_id", "The selected course is invalid");
            return Ok(validation_error(errors));
        }
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "Failed to load course",
                e,
            ));
        }
    }

    match storage.create_live_class(user.id, create_request).await {
        Ok(live_class) => {
            tracing::info!(
                "Live class {} scheduled for course {} at {}",
                live_class.id,
                live_class.course_id,
                live_class.scheduled_at
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                live_class,
                "Live class scheduled",
            )))
        }
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to create live class",
            e,
        )),
    }
}
