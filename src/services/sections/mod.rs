pub mod create;
pub mod delete;
pub mod list;
pub mod reorder;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::sections::entities::Section;
use crate::models::sections::requests::{
    CreateSectionRequest, ReorderRequest, UpdateSectionRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct SectionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SectionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            super::storage_from_request(request)
        }
    }

    pub async fn create_section(
        &self,
        request: &HttpRequest,
        create_request: CreateSectionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_section(self, request, create_request).await
    }

    pub async fn list_sections(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_sections(self, request).await
    }

    pub async fn update_section(
        &self,
        request: &HttpRequest,
        section_id: i64,
        update_request: UpdateSectionRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_section(self, request, section_id, update_request).await
    }

    pub async fn delete_section(
        &self,
        request: &HttpRequest,
        section_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_section(self, request, section_id).await
    }

    pub async fn reorder_sections(
        &self,
        request: &HttpRequest,
        reorder_request: ReorderRequest,
    ) -> ActixResult<HttpResponse> {
        reorder::reorder_sections(self, request, reorder_request).await
    }
}

/// 加载属于该课程的章节，不存在或属于其他课程时返回 404
pub(crate) async fn section_in_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    section_id: i64,
) -> Result<Section, HttpResponse> {
    match storage.get_section_by_id(section_id).await {
        Ok(Some(section)) if section.course_id == course_id => Ok(section),
        Ok(_) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SectionNotFound,
            "Section not found",
        ))),
        Err(e) => Err(super::internal_error(
            ErrorCode::InternalServerError,
            "Failed to load section",
            e,
        )),
    }
}

/// 重排请求必须覆盖全部同级条目
pub(crate) fn reorder_mismatch() -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
        ErrorCode::ReorderMismatch,
        "The ids must list every existing item exactly once",
    ))
}
