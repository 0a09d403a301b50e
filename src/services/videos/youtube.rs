//! 上传到 YouTube：本地暂存后用应用凭据推送，完成后删除本地文件

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{VideoService, video_title};
use crate::errors::Result;
use crate::models::videos::entities::{Video, VideoSource, VideoStatus};
use crate::models::videos::requests::{NewVideo, VideoStatusUpdate};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};
use crate::utils::upload::{read_multipart, remove_stored_file, stored_file_path};
use crate::storage::Storage;
use crate::youtube::{UploadMetadata, UploadedVideo, YoutubeError, classify_upload_error};

pub async fn upload_youtube_video(
    service: &VideoService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let Some(client) = service.youtube() else {
        return Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
            ErrorCode::YoutubeNotConfigured,
            "YouTube upload is not configured",
        )));
    };

    let upload_dir = service.get_config().upload.dir.as_str();
    let form = match read_multipart(payload, upload_dir, &[service.library_rule()]).await {
        Ok(form) => form,
        Err(e) => return Ok(e.into_response()),
    };
    let Some(file) = form.files.get("video") else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "The video file is required",
        )));
    };

    let title = video_title(&form, &file.original_name);
    let metadata = UploadMetadata {
        title: title.clone(),
        description: form.text("description").unwrap_or_default().to_string(),
    };

    // 1. 先记录为处理中
    let storage = service.get_storage(request);
    let video = match storage
        .create_video(NewVideo {
            teacher_id: user.id,
            title,
            source: VideoSource::Youtube,
            original_name: file.original_name.clone(),
            stored_path: Some(file.stored_path.clone()),
            mime_type: file.mime_type.clone(),
            file_size: file.size as i64,
            duration_seconds: None,
            status: VideoStatus::Processing,
        })
        .await
    {
        Ok(video) => video,
        Err(e) => {
            form.discard(upload_dir).await;
            return Ok(internal_error(
                ErrorCode::FileUploadFailed,
                "Failed to save video",
                e,
            ));
        }
    };

    // 2. 推送到 YouTube，不重试
    let local_path = stored_file_path(upload_dir, &file.stored_path);
    let result = client
        .upload_video(&local_path, &file.mime_type, &metadata)
        .await;

    // 3. 无论成功与否本地文件都不再需要
    remove_stored_file(upload_dir, &file.stored_path).await;

    let (video, failure) = match record_upload_result(&storage, video.id, result).await {
        Ok((Some(video), failure)) => (video, failure),
        Ok((None, _)) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::VideoNotFound,
                "Video not found",
            )));
        }
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "Failed to update video status",
                e,
            ));
        }
    };

    match failure {
        None => {
            tracing::info!(
                "Video {} published to YouTube as {:?}",
                video.id,
                video.youtube_video_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                video,
                "Video uploaded to YouTube",
            )))
        }
        Some(message) => Ok(HttpResponse::BadGateway().json(ApiResponse::error(
            ErrorCode::YoutubeUploadFailed,
            video,
            message,
        ))),
    }
}

/// 把推送结果写回视频记录，失败时一并返回给教师看的提示
pub(crate) async fn record_upload_result(
    storage: &Arc<dyn Storage>,
    video_id: i64,
    result: std::result::Result<UploadedVideo, YoutubeError>,
) -> Result<(Option<Video>, Option<&'static str>)> {
    let (update, failure) = match result {
        Ok(uploaded) => (
            VideoStatusUpdate {
                status: Some(VideoStatus::Completed),
                youtube_video_id: Some(uploaded.video_id),
                duration_seconds: uploaded.duration_seconds,
                clear_stored_path: true,
                ..Default::default()
            },
            None,
        ),
        Err(e) => {
            tracing::error!("YouTube upload for video {} failed: {}", video_id, e);
            let message = classify_upload_error(&e);
            (
                VideoStatusUpdate {
                    status: Some(VideoStatus::Failed),
                    status_message: Some(message.to_string()),
                    clear_stored_path: true,
                    ..Default::default()
                },
                Some(message),
            )
        }
    };

    let video = storage.update_video_status(video_id, update).await?;
    Ok((video, failure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserRole, UserStatus};
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::youtube::YoutubeClient;
    use crate::youtube::error::QUOTA_EXCEEDED_MESSAGE;
    use crate::youtube::mock_server::{ChunkReply, MockYoutube};

    async fn processing_video() -> (Arc<dyn Storage>, Video) {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::new_in_memory().await.unwrap());
        let teacher = storage
            .create_user(CreateUserRequest {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::Teacher,
                status: UserStatus::Active,
                phone: None,
                bio: None,
                profile_picture: None,
                cv_path: None,
                email_verified: true,
            })
            .await
            .unwrap();
        let video = storage
            .create_video(NewVideo {
                teacher_id: teacher.id,
                title: "Intro".to_string(),
                source: VideoSource::Youtube,
                original_name: "intro.mp4".to_string(),
                stored_path: Some("videos/intro.mp4".to_string()),
                mime_type: "video/mp4".to_string(),
                file_size: 300 * 1024,
                duration_seconds: None,
                status: VideoStatus::Processing,
            })
            .await
            .unwrap();
        (storage, video)
    }

    #[actix_web::test]
    async fn test_quota_rejection_marks_video_failed() {
        let (storage, video) = processing_video().await;
        let server = MockYoutube::start(
            vec![ChunkReply::error(
                403,
                r#"{"error":{"code":403,"errors":[{"reason":"quotaExceeded"}],"message":"The request cannot be completed because you have exceeded your quota."}}"#,
            )],
            "PT5S",
        )
        .await;
        let client = YoutubeClient::new(server.config()).unwrap();

        let file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        std::fs::write(file.path(), vec![0u8; 300 * 1024]).unwrap();
        let metadata = UploadMetadata {
            title: "Intro".to_string(),
            description: String::new(),
        };
        let result = client.upload_video(file.path(), "video/mp4", &metadata).await;
        assert!(matches!(result, Err(YoutubeError::Api(403, _))));

        let (stored, failure) = record_upload_result(&storage, video.id, result)
            .await
            .unwrap();
        let stored = stored.unwrap();
        assert_eq!(failure, Some(QUOTA_EXCEEDED_MESSAGE));
        assert_eq!(stored.status, VideoStatus::Failed);
        assert_eq!(stored.status_message.as_deref(), Some(QUOTA_EXCEEDED_MESSAGE));
        assert!(stored.youtube_video_id.is_none());
        assert!(stored.stored_path.is_none());
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_completed_upload_stores_youtube_id_and_duration() {
        let (storage, video) = processing_video().await;
        let uploaded = UploadedVideo {
            video_id: "yt-abc123".to_string(),
            duration_seconds: Some(754),
        };

        let (stored, failure) = record_upload_result(&storage, video.id, Ok(uploaded))
            .await
            .unwrap();
        let stored = stored.unwrap();
        assert_eq!(failure, None);
        assert_eq!(stored.status, VideoStatus::Completed);
        assert_eq!(stored.youtube_video_id.as_deref(), Some("yt-abc123"));
        assert_eq!(stored.duration.as_deref(), Some("0:12:34"));
    }
}
