use serde::Deserialize;
use ts_rs::TS;

use super::entities::{VideoSource, VideoStatus};
use crate::models::PaginationQuery;

// 视频列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/video.ts")]
pub struct VideoQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<VideoStatus>,
    pub source: Option<VideoSource>,
}

// 视频列表查询（用于存储层）
#[derive(Debug, Clone)]
pub struct VideoListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: i64,
    pub status: Option<VideoStatus>,
    pub source: Option<VideoSource>,
}

/// 新建视频记录
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub teacher_id: i64,
    pub title: String,
    pub source: VideoSource,
    pub original_name: String,
    pub stored_path: Option<String>,
    pub mime_type: String,
    pub file_size: i64,
    pub duration_seconds: Option<i64>,
    pub status: VideoStatus,
}

/// 更新视频处理结果
#[derive(Debug, Clone, Default)]
pub struct VideoStatusUpdate {
    pub status: Option<VideoStatus>,
    pub status_message: Option<String>,
    pub youtube_video_id: Option<String>,
    pub duration_seconds: Option<i64>,
    /// 推送到 YouTube 后本地文件已删除
    pub clear_stored_path: bool,
}
