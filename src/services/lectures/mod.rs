pub mod content;
pub mod create;
pub mod delete;
pub mod read;
pub mod reorder;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::lectures::entities::Lecture;
use crate::models::lectures::requests::{CreateLectureRequest, UpdateLectureRequest};
use crate::models::sections::requests::ReorderRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct LectureService {
    storage: Option<Arc<dyn Storage>>,
}

impl LectureService {
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

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn create_lecture(
        &self,
        request: &HttpRequest,
        section_id: i64,
        create_request: CreateLectureRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lecture(self, request, section_id, create_request).await
    }

    pub async fn list_lectures(
        &self,
        request: &HttpRequest,
        section_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::list_lectures(self, request, section_id).await
    }

    pub async fn get_lecture(
        &self,
        request: &HttpRequest,
        section_id: i64,
        lecture_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::get_lecture(self, request, section_id, lecture_id).await
    }

    pub async fn update_lecture(
        &self,
        request: &HttpRequest,
        section_id: i64,
        lecture_id: i64,
        update_request: UpdateLectureRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_lecture(self, request, section_id, lecture_id, update_request).await
    }

    pub async fn delete_lecture(
        &self,
        request: &HttpRequest,
        section_id: i64,
        lecture_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lecture(self, request, section_id, lecture_id).await
    }

    pub async fn reorder_lectures(
        &self,
        request: &HttpRequest,
        section_id: i64,
        reorder_request: ReorderRequest,
    ) -> ActixResult<HttpResponse> {
        reorder::reorder_lectures(self, request, section_id, reorder_request).await
    }

    // 直接上传课时视频（multipart）
    pub async fn upload_video(
        &self,
        request: &HttpRequest,
        section_id: i64,
        lecture_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_lecture_video(self, request, section_id, lecture_id, payload).await
    }
}

/// 加载章节内的课时
pub(crate) async fn lecture_in_section(
    storage: &Arc<dyn Storage>,
    section_id: i64,
    lecture_id: i64,
) -> Result<Lecture, HttpResponse> {
    match storage.get_lecture_by_id(lecture_id).await {
        Ok(Some(lecture)) if lecture.section_id == section_id => Ok(lecture),
        Ok(_) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LectureNotFound,
            "Lecture not found",
        ))),
        Err(e) => Err(super::internal_error(
            ErrorCode::InternalServerError,
            "Failed to load lecture",
            e,
        )),
    }
}
