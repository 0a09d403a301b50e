use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{VideoService, owned_video};
use crate::models::videos::requests::{VideoListQuery, VideoQueryParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};
use crate::utils::upload::remove_stored_file;

pub async fn list_videos(
    service: &VideoService,
    request: &HttpRequest,
    query: VideoQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let list_query = VideoListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        teacher_id: user.id,
        status: query.status,
        source: query.source,
    };

    let storage = service.get_storage(request);
    match storage.list_videos_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Videos retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to list videos",
            e,
        )),
    }
}

pub async fn get_video(
    service: &VideoService,
    request: &HttpRequest,
    video_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    match owned_video(&storage, &user, video_id).await {
        Ok(video) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            video,
            "Video retrieved successfully",
        ))),
        Err(response) => Ok(response),
    }
}

/// 被课时引用的视频不能删除
pub async fn delete_video(
    service: &VideoService,
    request: &HttpRequest,
    video_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    let video = match owned_video(&storage, &user, video_id).await {
        Ok(video) => video,
        Err(response) => return Ok(response),
    };

    match storage.count_lectures_by_video(video.id).await {
        Ok(0) => {}
        Ok(count) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::VideoInUse,
                format!("The video is used by {count} lecture(s)"),
            )));
        }
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "Failed to check video usage",
                e,
            ));
        }
    }

    match storage.delete_video(video.id).await {
        Ok(true) => {
            if let Some(path) = &video.stored_path {
                remove_stored_file(&service.get_config().upload.dir, path).await;
            }
            tracing::info!("Video {} deleted", video.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Video deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::VideoNotFound,
            "Video not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to delete video",
            e,
        )),
    }
}
