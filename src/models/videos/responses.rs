use serde::Serialize;
use ts_rs::TS;

use super::entities::Video;
use crate::models::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/video.ts")]
pub struct VideoListResponse {
    pub items: Vec<Video>,
    pub pagination: PaginationInfo,
}
