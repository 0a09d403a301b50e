use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::lectures::requests::{CreateLectureRequest, UpdateLectureRequest};
use crate::models::sections::requests::ReorderRequest;
use crate::services::LectureService;
use crate::utils::{SafeLectureIdI64, SafeSectionIdI64};

static LECTURE_SERVICE: Lazy<LectureService> = Lazy::new(LectureService::new_lazy);

pub async fn list_lectures(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE.list_lectures(&req, section_id.0).await
}

pub async fn create_lecture(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    lecture_data: web::Json<CreateLectureRequest>,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .create_lecture(&req, section_id.0, lecture_data.into_inner())
        .await
}

pub async fn get_lecture(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    lecture_id: SafeLectureIdI64,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .get_lecture(&req, section_id.0, lecture_id.0)
        .await
}

pub async fn update_lecture(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    lecture_id: SafeLectureIdI64,
    update_data: web::Json<UpdateLectureRequest>,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .update_lecture(&req, section_id.0, lecture_id.0, update_data.into_inner())
        .await
}

pub async fn delete_lecture(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    lecture_id: SafeLectureIdI64,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .delete_lecture(&req, section_id.0, lecture_id.0)
        .await
}

pub async fn reorder_lectures(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    reorder_data: web::Json<ReorderRequest>,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .reorder_lectures(&req, section_id.0, reorder_data.into_inner())
        .await
}

pub async fn upload_lecture_video(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    lecture_id: SafeLectureIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    LECTURE_SERVICE
        .upload_video(&req, section_id.0, lecture_id.0, payload)
        .await
}

// 挂在 /courses/{course_id} 之下
pub fn configure_lecture_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/sections/{section_id}/lectures")
            .route(web::get().to(list_lectures))
            .route(web::post().to(create_lecture)),
    )
    .route(
        "/sections/{section_id}/lectures/reorder",
        web::put().to(reorder_lectures),
    )
    .service(
        web::resource("/sections/{section_id}/lectures/{lecture_id}")
            .route(web::get().to(get_lecture))
            .route(web::put().to(update_lecture))
            .route(web::delete().to(delete_lecture)),
    )
    .route(
        "/sections/{section_id}/lectures/{lecture_id}/video",
        web::post()
            .to(upload_lecture_video)
            .wrap(middlewares::RateLimit::video_upload()),
    );
}
