use serde::Deserialize;
use ts_rs::TS;

use super::entities::{CourseLevel, CourseStatus};
use crate::models::{FieldErrors, PaginationQuery};
use crate::utils::validate::{add_error, validate_optional_url, validate_required_text};

// 创建课程（向导第一步）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub title: String,
    pub category: Option<String>,
}

impl CreateCourseRequest {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate_required_text(&mut errors, "title", &self.title, 255);
        if let Some(category) = &self.category
            && category.chars().count() > 100
        {
            add_error(
                &mut errors,
                "category",
                "The category may not be greater than 100 characters",
            );
        }
        errors
    }
}

// 更新课程（向导后续步骤：详情、定价），字段均可选
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub language: Option<String>,
    pub price: Option<f64>,
    pub thumbnail_url: Option<String>,
    pub learning_outcomes: Option<String>,
    pub requirements: Option<String>,
}

impl UpdateCourseRequest {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if let Some(title) = &self.title {
            validate_required_text(&mut errors, "title", title, 255);
        }
        if let Some(subtitle) = &self.subtitle
            && subtitle.chars().count() > 255
        {
            add_error(
                &mut errors,
                "subtitle",
                "The subtitle may not be greater than 255 characters",
            );
        }
        if let Some(level) = &self.level
            && level.parse::<CourseLevel>().is_err()
        {
            add_error(
                &mut errors,
                "level",
                "The level must be one of: beginner, intermediate, advanced, all_levels",
            );
        }
        if let Some(price) = self.price
            && (!price.is_finite() || price < 0.0)
        {
            add_error(&mut errors, "price", "The price must be at least 0");
        }
        validate_optional_url(&mut errors, "thumbnail_url", self.thumbnail_url.as_deref());

        errors
    }

    pub fn parsed_level(&self) -> Option<CourseLevel> {
        self.level.as_deref().and_then(|l| l.parse().ok())
    }
}

// 课程列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<CourseStatus>,
    pub search: Option<String>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub teacher_id: Option<i64>,
    pub status: Option<CourseStatus>,
    pub search: Option<String>,
}

// 管理员驳回课程
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct RejectCourseRequest {
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_title() {
        let req = CreateCourseRequest {
            title: "   ".to_string(),
            category: None,
        };
        let errors = req.validate();
        assert!(errors.contains_key("title"));
    }

    #[test]
    fn test_update_rejects_negative_price_and_bad_level() {
        let req = UpdateCourseRequest {
            price: Some(-1.0),
            level: Some("expert".to_string()),
            ..Default::default()
        };
        let errors = req.validate();
        assert!(errors.contains_key("price"));
        assert!(errors.contains_key("level"));
    }

    #[test]
    fn test_update_accepts_free_course() {
        let req = UpdateCourseRequest {
            price: Some(0.0),
            level: Some("beginner".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_empty());
        assert_eq!(req.parsed_level(), Some(CourseLevel::Beginner));
    }
}
