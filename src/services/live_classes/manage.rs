use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LiveClassService, owned_live_class};
use crate::models::live_classes::entities::{LiveClass, LiveClassStatus};
use crate::models::live_classes::requests::UpdateLiveClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, validation_error};

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::LiveClassNotFound,
        "Live class not found",
    ))
}

/// 只有尚未开始的直播课可以修改或取消
fn ensure_scheduled(live_class: &LiveClass) -> Result<(), HttpResponse> {
    if live_class.status == LiveClassStatus::Scheduled {
        Ok(())
    } else {
        Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::LiveClassNotEditable,
            format!("A {} live class cannot be changed", live_class.status),
        )))
    }
}

pub async fn get_live_class(
    service: &LiveClassService,
    request: &HttpRequest,
    live_class_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    match owned_live_class(&storage, &user, live_class_id).await {
        Ok(live_class) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            live_class,
            "Live class retrieved successfully",
        ))),
        Err(response) => Ok(response),
    }
}

pub async fn update_live_class(
    service: &LiveClassService,
    request: &HttpRequest,
    live_class_id: i64,
    update_request: UpdateLiveClassRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    let live_class = match owned_live_class(&storage, &user, live_class_id).await {
        Ok(live_class) => live_class,
        Err(response) => return Ok(response),
    };
    if let Err(response) = ensure_scheduled(&live_class) {
        return Ok(response);
    }

    let errors = update_request.validate(chrono::Utc::now());
    if !errors.is_empty() {
        return Ok(validation_error(errors));
    }

    match storage.update_live_class(live_class_id, update_request).await {
        Ok(Some(live_class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            live_class,
            "Live class updated successfully",
        ))),
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to update live class",
            e,
        )),
    }
}

pub async fn cancel_live_class(
    service: &LiveClassService,
    request: &HttpRequest,
    live_class_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    let live_class = match owned_live_class(&storage, &user, live_class_id).await {
        Ok(live_class) => live_class,
        Err(response) => return Ok(response),
    };
    if let Err(response) = ensure_scheduled(&live_class) {
        return Ok(response);
    }

    match storage
        .update_live_class_status(live_class_id, LiveClassStatus::Cancelled)
        .await
    {
        Ok(Some(live_class)) => {
            tracing::info!("Live class {} cancelled", live_class.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                live_class,
                "Live class cancelled",
            )))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to cancel live class",
            e,
        )),
    }
}

pub async fn delete_live_class(
    service: &LiveClassService,
    request: &HttpRequest,
    live_class_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    if let Err(response) = owned_live_class(&storage, &user, live_class_id).await {
        return Ok(response);
    }

    match storage.delete_live_class(live_class_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Live class deleted"))),
        Ok(false) => Ok(not_found()),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to delete live class",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_class(status: LiveClassStatus) -> LiveClass {
        let now = chrono::Utc::now();
        LiveClass {
            id: 1,
            teacher_id: 1,
            course_id: 1,
            title: "Office hours".to_string(),
            description: None,
            scheduled_at: now,
            duration_minutes: 60,
            meeting_url: "https://meet.example.com/abc".to_string(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_only_scheduled_is_editable() {
        assert!(ensure_scheduled(&live_class(LiveClassStatus::Scheduled)).is_ok());

        let response = ensure_scheduled(&live_class(LiveClassStatus::Cancelled)).unwrap_err();
        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
        assert!(ensure_scheduled(&live_class(LiveClassStatus::Completed)).is_err());
    }
}
