use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LectureService, lecture_in_section};
use crate::models::lectures::entities::LectureContentType;
use crate::models::lectures::requests::LectureRecord;
use crate::models::videos::entities::{VideoSource, VideoStatus};
use crate::models::videos::requests::NewVideo;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::sections::section_in_course;
use crate::services::videos::form_duration;
use crate::services::{CourseService, ensure_course_editable, internal_error, validation_error};
use crate::utils::upload::{FileRule, read_multipart};

/// 视频存入视频库后挂到课时上，课时内容类型随之变为 video
pub async fn upload_lecture_video(
    service: &LectureService,
    request: &HttpRequest,
    section_id: i64,
    lecture_id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let course = match CourseService::course_from_request(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };
    if let Err(response) = ensure_course_editable(&course) {
        return Ok(response);
    }

    let storage = service.get_storage(request);
    if let Err(response) = section_in_course(&storage, course.id, section_id).await {
        return Ok(response);
    }
    let lecture = match lecture_in_section(&storage, section_id, lecture_id).await {
        Ok(lecture) => lecture,
        Err(response) => return Ok(response),
    };

    let config = service.get_config();
    let upload_dir = config.upload.dir.as_str();
    let rules = [FileRule {
        field: "video",
        subdir: "videos",
        max_size: config.upload.lecture_video_max_size,
        allowed_mime: config.upload.video_mime_types.clone(),
        required: true,
    }];
    let form = match read_multipart(payload, upload_dir, &rules).await {
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

    let Some(file) = form.files.get("video").cloned() else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "The video file is required",
        )));
    };

    let new_video = NewVideo {
        teacher_id: course.teacher_id,
        title: form
            .text("title")
            .map(str::to_string)
            .unwrap_or_else(|| lecture.title.clone()),
        source: VideoSource::Upload,
        original_name: file.original_name.clone(),
        stored_path: Some(file.stored_path.clone()),
        mime_type: file.mime_type.clone(),
        file_size: file.size as i64,
        duration_seconds,
        status: VideoStatus::Completed,
    };
    let video = match storage.create_video(new_video).await {
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

    let record = LectureRecord {
        title: lecture.title,
        description: lecture.description,
        content_type: LectureContentType::Video,
        content: None,
        video_id: Some(video.id),
        youtube_url: None,
        youtube_video_id: None,
        duration_seconds: video.duration_seconds,
        is_preview: lecture.is_preview,
    };

    match storage.update_lecture(lecture_id, record).await {
        Ok(Some(lecture)) => {
            tracing::info!(
                "Video {} uploaded ({} bytes) and attached to lecture {}",
                video.id,
                file.size,
                lecture.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                lecture,
                "Video uploaded successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LectureNotFound,
            "Lecture not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to attach video to lecture",
            e,
        )),
    }
}
