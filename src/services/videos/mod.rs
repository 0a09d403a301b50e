pub mod manage;
pub mod upload;
pub mod youtube;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::users::entities::User;
use crate::models::videos::entities::Video;
use crate::models::videos::requests::VideoQueryParams;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::storage::Storage;
use crate::utils::upload::{FileRule, MultipartForm};
use crate::utils::validate::add_error;
use crate::youtube::YoutubeClient;

pub struct VideoService {
    storage: Option<Arc<dyn Storage>>,
    youtube: Option<YoutubeClient>,
}

impl VideoService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            youtube: YoutubeClient::from_app_config(),
        }
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

    pub(crate) fn youtube(&self) -> Option<&YoutubeClient> {
        self.youtube.as_ref()
    }

    // 视频库上传规则
    pub(crate) fn library_rule(&self) -> FileRule {
        let config = self.get_config();
        FileRule {
            field: "video",
            subdir: "videos",
            max_size: config.upload.library_video_max_size,
            allowed_mime: config.upload.video_mime_types.clone(),
            required: true,
        }
    }

    pub async fn upload_video(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_video(self, request, payload).await
    }

    pub async fn upload_youtube_video(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        youtube::upload_youtube_video(self, request, payload).await
    }

    pub async fn list_videos(
        &self,
        request: &HttpRequest,
        query: VideoQueryParams,
    ) -> ActixResult<HttpResponse> {
        manage::list_videos(self, request, query).await
    }

    pub async fn get_video(&self, request: &HttpRequest, video_id: i64) -> ActixResult<HttpResponse> {
        manage::get_video(self, request, video_id).await
    }

    pub async fn delete_video(
        &self,
        request: &HttpRequest,
        video_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_video(self, request, video_id).await
    }
}

/// 表单中可选的 duration_seconds 字段，必须是非负整数
pub(crate) fn form_duration(form: &MultipartForm) -> Result<Option<i64>, FieldErrors> {
    match form.text("duration_seconds") {
        None => Ok(None),
        Some(raw) => match raw.parse::<i64>() {
            Ok(seconds) if seconds >= 0 => Ok(Some(seconds)),
            _ => {
                let mut errors = FieldErrors::new();
                add_error(
                    &mut errors,
                    "duration_seconds",
                    "The duration seconds must be a non-negative integer",
                );
                Err(errors)
            }
        },
    }
}

/// 视频标题，缺省时使用原始文件名
pub(crate) fn video_title(form: &MultipartForm, original_name: &str) -> String {
    form.text("title")
        .map(|t| t.chars().take(255).collect())
        .unwrap_or_else(|| original_name.to_string())
}

pub(crate) async fn owned_video(
    storage: &Arc<dyn Storage>,
    user: &User,
    video_id: i64,
) -> Result<Video, HttpResponse> {
    match storage.get_video_by_id(video_id).await {
        Ok(Some(video)) if video.teacher_id == user.id || user.is_admin() => Ok(video),
        Ok(_) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::VideoNotFound,
            "Video not found",
        ))),
        Err(e) => Err(super::internal_error(
            ErrorCode::InternalServerError,
            "Failed to load video",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_with(field: &str, value: &str) -> MultipartForm {
        let mut form = MultipartForm::default();
        form.fields.insert(field.to_string(), value.to_string());
        form
    }

    #[test]
    fn test_form_duration() {
        assert_eq!(form_duration(&MultipartForm::default()).unwrap(), None);
        assert_eq!(form_duration(&form_with("duration_seconds", " 754 ")).unwrap(), Some(754));
        assert!(form_duration(&form_with("duration_seconds", "-5")).is_err());
        assert!(
            form_duration(&form_with("duration_seconds", "12:00"))
                .unwrap_err()
                .contains_key("duration_seconds")
        );
    }

    #[test]
    fn test_video_title_falls_back_to_file_name() {
        assert_eq!(video_title(&MultipartForm::default(), "intro.mp4"), "intro.mp4");
        assert_eq!(video_title(&form_with("title", "Welcome"), "intro.mp4"), "Welcome");
    }
}
