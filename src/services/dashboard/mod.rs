use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::dashboard::responses::DashboardResponse;
use crate::models::live_classes::entities::LiveClassStatus;
use crate::models::live_classes::requests::LiveClassListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};
use crate::storage::Storage;

// 工作台展示的近期直播课数量
const UPCOMING_LIVE_CLASS_LIMIT: i64 = 5;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
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

    /// 课程状态统计、视频库数量与近期直播课
    pub async fn get_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let user = match current_user(request) {
            Ok(user) => user,
            Err(response) => return Ok(response),
        };
        let storage = self.get_storage(request);

        let courses = match storage.count_courses_by_status(user.id).await {
            Ok(counts) => counts,
            Err(e) => {
                return Ok(internal_error(
                    ErrorCode::InternalServerError,
                    "Failed to count courses",
                    e,
                ));
            }
        };

        let videos = match storage.count_videos(user.id).await {
            Ok(count) => count as i64,
            Err(e) => {
                return Ok(internal_error(
                    ErrorCode::InternalServerError,
                    "Failed to count videos",
                    e,
                ));
            }
        };

        let upcoming = LiveClassListQuery {
            page: Some(1),
            size: Some(UPCOMING_LIVE_CLASS_LIMIT),
            teacher_id: Some(user.id),
            course_id: None,
            status: Some(LiveClassStatus::Scheduled),
            scheduled_after: Some(chrono::Utc::now().timestamp()),
        };
        let upcoming_live_classes = match storage.list_live_classes_with_pagination(upcoming).await {
            Ok(response) => response.items,
            Err(e) => {
                return Ok(internal_error(
                    ErrorCode::InternalServerError,
                    "Failed to list upcoming live classes",
                    e,
                ));
            }
        };

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            DashboardResponse {
                courses,
                videos,
                upcoming_live_classes,
            },
            "Dashboard retrieved successfully",
        )))
    }
}
