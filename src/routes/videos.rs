use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::videos::requests::VideoQueryParams;
use crate::services::VideoService;
use crate::utils::SafeVideoIdI64;

static VIDEO_SERVICE: Lazy<VideoService> = Lazy::new(VideoService::new_lazy);

pub async fn list_videos(
    req: HttpRequest,
    query: web::Query<VideoQueryParams>,
) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.list_videos(&req, query.into_inner()).await
}

pub async fn upload_video(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.upload_video(&req, payload).await
}

pub async fn upload_youtube_video(
    req: HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.upload_youtube_video(&req, payload).await
}

pub async fn get_video(req: HttpRequest, video_id: SafeVideoIdI64) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.get_video(&req, video_id.0).await
}

pub async fn delete_video(
    req: HttpRequest,
    video_id: SafeVideoIdI64,
) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.delete_video(&req, video_id.0).await
}

// 配置路由
pub fn configure_video_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/videos")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_videos)).route(
                    web::post()
                        .to(upload_video)
                        .wrap(middlewares::RateLimit::video_upload()),
                ),
            )
            .route(
                "/youtube",
                web::post()
                    .to(upload_youtube_video)
                    .wrap(middlewares::RateLimit::video_upload()),
            )
            .service(
                web::resource("/{video_id}")
                    .route(web::get().to(get_video))
                    .route(web::delete().to(delete_video)),
            ),
    );
}
