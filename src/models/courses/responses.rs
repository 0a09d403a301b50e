use serde::Serialize;
use ts_rs::TS;

use super::entities::Course;
use crate::models::PaginationInfo;
use crate::models::sections::responses::SectionWithContent;

// 课程列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}

// 课程详情，包含完整大纲
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseDetailResponse {
    pub course: Course,
    pub sections: Vec<SectionWithContent>,
}

/// 课程大纲统计，用于提交审核前的检查
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CourseContentCounts {
    pub sections: u64,
    pub lectures: u64,
    pub quizzes: u64,
}

impl CourseContentCounts {
    /// 至少一个章节，且至少一个课时或测验
    pub fn is_submittable(&self) -> bool {
        self.sections > 0 && self.lectures + self.quizzes > 0
    }
}
