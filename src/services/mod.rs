pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod lectures;
pub mod live_classes;
pub mod quizzes;
pub mod sections;
pub mod videos;

pub use auth::AuthService;
pub use courses::CourseService;
pub use dashboard::DashboardService;
pub use lectures::LectureService;
pub use live_classes::LiveClassService;
pub use quizzes::QuizService;
pub use sections::SectionService;
pub use videos::VideoService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::courses::entities::Course;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::storage::Storage;

pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

/// 当前登录用户，路由未挂 RequireJWT 时返回 401
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

pub(crate) fn validation_error(errors: FieldErrors) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ApiResponse::validation_failed(errors))
}

pub(crate) fn internal_error(code: ErrorCode, context: &str, err: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(code, format!("{context}: {err}")))
}

/// 审核中的课程不允许修改详情和大纲
pub(crate) fn ensure_course_editable(course: &Course) -> Result<(), HttpResponse> {
    if course.status.is_editable() {
        Ok(())
    } else {
        Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CourseNotEditable,
            "Course is pending review and cannot be edited",
        )))
    }
}
