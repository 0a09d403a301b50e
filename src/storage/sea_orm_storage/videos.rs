//! 视频库存储操作

use super::SeaOrmStorage;
use crate::entity::video_library::{ActiveModel, Column, Entity as VideoLibrary};
use crate::errors::{CourseStudioError, Result};
use crate::models::{
    PaginationInfo,
    videos::{
        entities::Video,
        requests::{NewVideo, VideoListQuery, VideoStatusUpdate},
        responses::VideoListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_video_impl(&self, video: NewVideo) -> Result<Video> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(video.teacher_id),
            title: Set(video.title),
            source: Set(video.source.to_string()),
            original_name: Set(video.original_name),
            stored_path: Set(video.stored_path),
            mime_type: Set(video.mime_type),
            file_size: Set(video.file_size),
            duration_seconds: Set(video.duration_seconds),
            status: Set(video.status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("创建视频记录失败: {e}")))?;

        Ok(result.into_video())
    }

    pub async fn get_video_by_id_impl(&self, video_id: i64) -> Result<Option<Video>> {
        let result = VideoLibrary::find_by_id(video_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询视频失败: {e}")))?;

        Ok(result.map(|m| m.into_video()))
    }

    pub async fn list_videos_with_pagination_impl(
        &self,
        query: VideoListQuery,
    ) -> Result<VideoListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = VideoLibrary::find().filter(Column::TeacherId.eq(query.teacher_id));

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(source) = query.source {
            select = select.filter(Column::Source.eq(source.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            CourseStudioError::database_operation(format!("查询视频总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            CourseStudioError::database_operation(format!("查询视频页数失败: {e}"))
        })?;
        let rows = paginator.fetch_page(page - 1).await.map_err(|e| {
            CourseStudioError::database_operation(format!("查询视频列表失败: {e}"))
        })?;

        Ok(VideoListResponse {
            items: rows.into_iter().map(|m| m.into_video()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 写入上传结果
    pub async fn update_video_status_impl(
        &self,
        video_id: i64,
        update: VideoStatusUpdate,
    ) -> Result<Option<Video>> {
        if self.get_video_by_id_impl(video_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(video_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(message) = update.status_message {
            model.status_message = Set(Some(message));
        }
        if let Some(youtube_video_id) = update.youtube_video_id {
            model.youtube_video_id = Set(Some(youtube_video_id));
        }
        if let Some(duration) = update.duration_seconds {
            model.duration_seconds = Set(Some(duration));
        }
        if update.clear_stored_path {
            model.stored_path = Set(None);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("更新视频状态失败: {e}")))?;

        self.get_video_by_id_impl(video_id).await
    }

    pub async fn delete_video_impl(&self, video_id: i64) -> Result<bool> {
        let result = VideoLibrary::delete_by_id(video_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("删除视频失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_videos_impl(&self, teacher_id: i64) -> Result<u64> {
        VideoLibrary::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .count(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("统计视频失败: {e}")))
    }
}
