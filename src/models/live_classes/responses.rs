use serde::Serialize;
use ts_rs::TS;

use super::entities::LiveClass;
use crate::models::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/live_class.ts")]
pub struct LiveClassListResponse {
    pub items: Vec<LiveClass>,
    pub pagination: PaginationInfo,
}
