pub mod create;
pub mod list;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::live_classes::entities::LiveClass;
use crate::models::live_classes::requests::{
    CreateLiveClassRequest, LiveClassQueryParams, UpdateLiveClassRequest,
};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct LiveClassService {
    storage: Option<Arc<dyn Storage>>,
}

impl LiveClassService {
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

    pub async fn create_live_class(
        &self,
        request: &HttpRequest,
        create_request: CreateLiveClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_live_class(self, request, create_request).await
    }

    pub async fn list_live_classes(
        &self,
        request: &HttpRequest,
        query: LiveClassQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_live_classes(self, request, query).await
    }

    pub async fn get_live_class(
        &self,
        request: &HttpRequest,
        live_class_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::get_live_class(self, request, live_class_id).await
    }

    pub async fn update_live_class(
        &self,
        request: &HttpRequest,
        live_class_id: i64,
        update_request: UpdateLiveClassRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_live_class(self, request, live_class_id, update_request).await
    }

    pub async fn cancel_live_class(
        &self,
        request: &HttpRequest,
        live_class_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::cancel_live_class(self, request, live_class_id).await
    }

    pub async fn delete_live_class(
        &self,
        request: &HttpRequest,
        live_class_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_live_class(self, request, live_class_id).await
    }
}

/// 加载当前用户自己的直播课，管理员可访问全部
pub(crate) async fn owned_live_class(
    storage: &Arc<dyn Storage>,
    user: &User,
    live_class_id: i64,
) -> Result<LiveClass, HttpResponse> {
    match storage.get_live_class_by_id(live_class_id).await {
        Ok(Some(live_class)) if live_class.teacher_id == user.id || user.is_admin() => {
            Ok(live_class)
        }
        Ok(_) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LiveClassNotFound,
            "Live class not found",
        ))),
        Err(e) => Err(super::internal_error(
            ErrorCode::InternalServerError,
            "Failed to load live class",
            e,
        )),
    }
}
