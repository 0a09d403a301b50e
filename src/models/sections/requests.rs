use std::collections::HashSet;

use serde::Deserialize;
use ts_rs::TS;

use crate::models::FieldErrors;
use crate::utils::validate::{add_error, validate_required_text};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/section.ts")]
pub struct CreateSectionRequest {
    pub title: String,
    pub description: Option<String>,
}

impl CreateSectionRequest {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate_required_text(&mut errors, "title", &self.title, 255);
        errors
    }
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/section.ts")]
pub struct UpdateSectionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl UpdateSectionRequest {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            validate_required_text(&mut errors, "title", title, 255);
        }
        errors
    }
}

/// 重新排序请求：按新顺序给出全部同级条目的 ID
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/section.ts")]
pub struct ReorderRequest {
    pub ids: Vec<i64>,
}

impl ReorderRequest {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.ids.is_empty() {
            add_error(&mut errors, "ids", "The ids field is required");
        }
        let unique: HashSet<i64> = self.ids.iter().copied().collect();
        if unique.len() != self.ids.len() {
            add_error(&mut errors, "ids", "The ids field must not contain duplicates");
        }
        errors
    }

    /// 与现有的同级 ID 集合完全一致才允许重排
    pub fn matches(&self, existing: &[i64]) -> bool {
        let wanted: HashSet<i64> = self.ids.iter().copied().collect();
        let current: HashSet<i64> = existing.iter().copied().collect();
        self.ids.len() == existing.len() && wanted == current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_duplicates_rejected() {
        let req = ReorderRequest { ids: vec![1, 2, 2] };
        assert!(req.validate().contains_key("ids"));
    }

    #[test]
    fn test_reorder_matches_same_set() {
        let req = ReorderRequest { ids: vec![3, 1, 2] };
        assert!(req.matches(&[1, 2, 3]));
        assert!(!req.matches(&[1, 2]));
        assert!(!req.matches(&[1, 2, 4]));
    }
}
