use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LiveClassService;
use crate::models::live_classes::requests::{LiveClassListQuery, LiveClassQueryParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};

pub async fn list_live_classes(
    service: &LiveClassService,
    request: &HttpRequest,
    query: LiveClassQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let list_query = LiveClassListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        teacher_id: Some(user.id),
        course_id: query.course_id,
        status: query.status,
        scheduled_after: query.upcoming.then(|| chrono::Utc::now().timestamp()),
    };

    let storage = service.get_storage(request);
    match storage.list_live_classes_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Live classes retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to list live classes",
            e,
        )),
    }
}
