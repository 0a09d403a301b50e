use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{VideoService, form_duration, video_title};
use crate::models::videos::entities::{VideoSource, VideoStatus};
use crate::models::videos::requests::NewVideo;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error, validation_error};
use crate::utils::upload::read_multipart;

/// 直接上传到视频库，落盘即视为处理完成
pub async fn upload_video(
    service: &VideoService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let upload_dir = service.get_config().upload.dir.as_str();
    let form = match read_multipart(payload, upload_dir, &[service.library_rule()]).await {
        Ok(form) => form,
        Err(e) => return Ok(e.into_response()),
    };

    let duration_seconds = match form_duration(&form) {
        Ok(duration) => duration,
        Err(errors) => {
            form.discard(upload_dir).await;
            return Ok(validation_error(errors));
        }
    };

    let Some(file) = form.files.get("video") else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "The video file is required",
        )));
    };

    let new_video = NewVideo {
        teacher_id: user.id,
        title: video_title(&form, &file.original_name),
        source: VideoSource::Upload,
        original_name: file.original_name.clone(),
        stored_path: Some(file.stored_path.clone()),
        mime_type: file.mime_type.clone(),
        file_size: file.size as i64,
        duration_seconds,
        status: VideoStatus::Completed,
    };

    let storage = service.get_storage(request);
    match storage.create_video(new_video).await {
        Ok(video) => {
            tracing::info!(
                "Teacher {} uploaded video {} ({} bytes)",
                user.id,
                video.id,
                video.file_size
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                video,
                "Video uploaded successfully",
            )))
        }
        Err(e) => {
            form.discard(upload_dir).await;
            Ok(internal_error(
                ErrorCode::FileUploadFailed,
                "Failed to save video",
                e,
            ))
        }
    }
}
