//! 直播课存储操作

use super::SeaOrmStorage;
use crate::entity::live_classes::{ActiveModel, Column, Entity as LiveClasses};
use crate::errors::{CourseStudioError, Result};
use crate::models::{
    PaginationInfo,
    live_classes::{
        entities::{LiveClass, LiveClassStatus},
        requests::{CreateLiveClassRequest, LiveClassListQuery, UpdateLiveClassRequest},
        responses::LiveClassListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_live_class_impl(
        &self,
        teacher_id: i64,
        req: CreateLiveClassRequest,
    ) -> Result<LiveClass> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            course_id: Set(req.course_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            scheduled_at: Set(req.scheduled_at.timestamp()),
            duration_minutes: Set(req.duration_minutes),
            meeting_url: Set(req.meeting_url.trim().to_string()),
            status: Set(LiveClassStatus::Scheduled.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("创建直播课失败: {e}")))?;

        Ok(result.into_live_class())
    }

    pub async fn get_live_class_by_id_impl(&self, live_class_id: i64) -> Result<Option<LiveClass>> {
        let result = LiveClasses::find_by_id(live_class_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询直播课失败: {e}")))?;

        Ok(result.map(|m| m.into_live_class()))
    }

    /// 分页列出直播课，按开始时间升序
    pub async fn list_live_classes_with_pagination_impl(
        &self,
        query: LiveClassListQuery,
    ) -> Result<LiveClassListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = LiveClasses::find();

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(after) = query.scheduled_after {
            select = select.filter(Column::ScheduledAt.gt(after));
        }

        select = select.order_by_asc(Column::ScheduledAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            CourseStudioError::database_operation(format!("查询直播课总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            CourseStudioError::database_operation(format!("查询直播课页数失败: {e}"))
        })?;
        let rows = paginator.fetch_page(page - 1).await.map_err(|e| {
            CourseStudioError::database_operation(format!("查询直播课列表失败: {e}"))
        })?;

        Ok(LiveClassListResponse {
            items: rows.into_iter().map(|m| m.into_live_class()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_live_class_impl(
        &self,
        live_class_id: i64,
        update: UpdateLiveClassRequest,
    ) -> Result<Option<LiveClass>> {
        if self.get_live_class_by_id_impl(live_class_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(live_class_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(scheduled_at) = update.scheduled_at {
            model.scheduled_at = Set(scheduled_at.timestamp());
        }
        if let Some(duration) = update.duration_minutes {
            model.duration_minutes = Set(duration);
        }
        if let Some(url) = update.meeting_url {
            model.meeting_url = Set(url.trim().to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("更新直播课失败: {e}")))?;

        self.get_live_class_by_id_impl(live_class_id).await
    }

    pub async fn update_live_class_status_impl(
        &self,
        live_class_id: i64,
        status: LiveClassStatus,
    ) -> Result<Option<LiveClass>> {
        if self.get_live_class_by_id_impl(live_class_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(live_class_id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        model.update(&self.db).await.map_err(|e| {
            CourseStudioError::database_operation(format!("更新直播课状态失败: {e}"))
        })?;

        self.get_live_class_by_id_impl(live_class_id).await
    }

    pub async fn delete_live_class_impl(&self, live_class_id: i64) -> Result<bool> {
        let result = LiveClasses::delete_by_id(live_class_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("删除直播课失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
