use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::sections::requests::{
    CreateSectionRequest, ReorderRequest, UpdateSectionRequest,
};
use crate::services::SectionService;
use crate::utils::SafeSectionIdI64;

static SECTION_SERVICE: Lazy<SectionService> = Lazy::new(SectionService::new_lazy);

pub async fn list_sections(req: HttpRequest) -> ActixResult<HttpResponse> {
    SECTION_SERVICE.list_sections(&req).await
}

pub async fn create_section(
    req: HttpRequest,
    section_data: web::Json<CreateSectionRequest>,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE
        .create_section(&req, section_data.into_inner())
        .await
}

pub async fn update_section(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    update_data: web::Json<UpdateSectionRequest>,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE
        .update_section(&req, section_id.0, update_data.into_inner())
        .await
}

pub async fn delete_section(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE.delete_section(&req, section_id.0).await
}

pub async fn reorder_sections(
    req: HttpRequest,
    reorder_data: web::Json<ReorderRequest>,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE
        .reorder_sections(&req, reorder_data.into_inner())
        .await
}

// 挂在 /courses/{course_id} 之下
pub fn configure_section_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/sections")
            .route(web::get().to(list_sections))
            .route(web::post().to(create_section)),
    )
    // 必须先于 /sections/{section_id} 注册
    .route("/sections/reorder", web::put().to(reorder_sections))
    .service(
        web::resource("/sections/{section_id}")
            .route(web::put().to(update_section))
            .route(web::delete().to(delete_section)),
    );
}
