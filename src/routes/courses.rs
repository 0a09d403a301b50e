use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{CourseQueryParams, CreateCourseRequest, UpdateCourseRequest};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;

use super::{lectures, quizzes, sections};

// 懒加载的全局 COURSE_SERVICE 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn get_course(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req).await
}

pub async fn update_course(
    req: HttpRequest,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, update_data.into_inner())
        .await
}

pub async fn delete_course(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req).await
}

pub async fn submit_course(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.submit_course(&req).await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(web::post().to(create_course)),
            )
            .service(
                // 以下路由都要求调用者拥有该课程（管理员除外）
                web::scope("/{course_id}")
                    .wrap(middlewares::RequireCourseOwner)
                    .service(
                        web::resource("")
                            .route(web::get().to(get_course))
                            .route(web::put().to(update_course))
                            .route(web::delete().to(delete_course)),
                    )
                    .route("/submit", web::post().to(submit_course))
                    .configure(lectures::configure_lecture_routes)
                    .configure(quizzes::configure_quiz_routes)
                    .configure(sections::configure_section_routes),
            ),
    );
}
