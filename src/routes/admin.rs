use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::courses::requests::RejectCourseRequest;
use crate::models::users::entities::UserRole;
use crate::services::CourseService;

static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_pending_courses(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .list_pending_courses(&req, query.into_inner())
        .await
}

pub async fn approve_course(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.approve_course(&req).await
}

pub async fn reject_course(
    req: HttpRequest,
    reject_data: web::Json<RejectCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .reject_course(&req, reject_data.into_inner())
        .await
}

// 配置路由，仅管理员可用
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .wrap(middlewares::RequireRole::new(&UserRole::Admin))
            .wrap(middlewares::RequireJWT)
            .route("/courses/pending", web::get().to(list_pending_courses))
            .service(
                web::scope("/courses/{course_id}")
                    .wrap(middlewares::RequireCourseOwner)
                    .route("/approve", web::post().to(approve_course))
                    .route("/reject", web::post().to(reject_course)),
            ),
    );
}
