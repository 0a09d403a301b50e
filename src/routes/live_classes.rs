use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::live_classes::requests::{
    CreateLiveClassRequest, LiveClassQueryParams, UpdateLiveClassRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::LiveClassService;
use crate::utils::SafeLiveClassIdI64;

static LIVE_CLASS_SERVICE: Lazy<LiveClassService> = Lazy::new(LiveClassService::new_lazy);

pub async fn list_live_classes(
    req: HttpRequest,
    query: web::Query<LiveClassQueryParams>,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE
        .list_live_classes(&req, query.into_inner())
        .await
}

pub async fn create_live_class(
    req: HttpRequest,
    live_class_data: web::Json<CreateLiveClassRequest>,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE
        .create_live_class(&req, live_class_data.into_inner())
        .await
}

pub async fn get_live_class(
    req: HttpRequest,
    live_class_id: SafeLiveClassIdI64,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE.get_live_class(&req, live_class_id.0).await
}

pub async fn update_live_class(
    req: HttpRequest,
    live_class_id: SafeLiveClassIdI64,
    update_data: web::Json<UpdateLiveClassRequest>,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE
        .update_live_class(&req, live_class_id.0, update_data.into_inner())
        .await
}

pub async fn cancel_live_class(
    req: HttpRequest,
    live_class_id: SafeLiveClassIdI64,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE
        .cancel_live_class(&req, live_class_id.0)
        .await
}

pub async fn delete_live_class(
    req: HttpRequest,
    live_class_id: SafeLiveClassIdI64,
) -> ActixResult<HttpResponse> {
    LIVE_CLASS_SERVICE
        .delete_live_class(&req, live_class_id.0)
        .await
}

// 配置路由
pub fn configure_live_class_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/live-classes")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_live_classes))
                    .route(web::post().to(create_live_class)),
            )
            .service(
                web::resource("/{live_class_id}")
                    .route(web::get().to(get_live_class))
                    .route(web::put().to(update_live_class))
                    .route(web::delete().to(delete_live_class)),
            )
            .route("/{live_class_id}/cancel", web::post().to(cancel_live_class)),
    );
}
