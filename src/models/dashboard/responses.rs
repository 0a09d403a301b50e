use serde::Serialize;
use ts_rs::TS;

use crate::models::live_classes::entities::LiveClass;

// 各状态课程数量
#[derive(Debug, Default, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct CourseStatusCounts {
    pub draft: i64,
    pub pending: i64,
    pub published: i64,
    pub rejected: i64,
    pub total: i64,
}

// 教师工作台概览
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardResponse {
    pub courses: CourseStatusCounts,
    pub videos: i64,
    pub upcoming_live_classes: Vec<LiveClass>,
}
