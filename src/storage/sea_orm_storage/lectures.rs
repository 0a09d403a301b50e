//! 课时存储操作

use super::SeaOrmStorage;
use super::numbering::{next_number, renumber_plan, reorder_plan};
use crate::entity::course_lectures::{ActiveModel, Column, Entity as CourseLectures};
use crate::errors::{CourseStudioError, Result};
use crate::models::lectures::{entities::Lecture, requests::LectureRecord};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课时，lecture_number 为章节内当前最大值加一
    pub async fn create_lecture_impl(
        &self,
        course_id: i64,
        section_id: i64,
        record: LectureRecord,
    ) -> Result<Lecture> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let last = CourseLectures::find()
            .filter(Column::SectionId.eq(section_id))
            .order_by_desc(Column::LectureNumber)
            .one(&txn)
            .await?;

        let model = ActiveModel {
            course_id: Set(course_id),
            section_id: Set(section_id),
            title: Set(record.title.trim().to_string()),
            description: Set(record.description),
            lecture_number: Set(next_number(last.map(|l| l.lecture_number))),
            content_type: Set(record.content_type.to_string()),
            content: Set(record.content),
            video_id: Set(record.video_id),
            youtube_url: Set(record.youtube_url),
            youtube_video_id: Set(record.youtube_video_id),
            duration_seconds: Set(record.duration_seconds),
            is_preview: Set(record.is_preview),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("创建课时失败: {e}")))?;
        txn.commit().await?;

        Ok(result.into_lecture())
    }

    pub async fn get_lecture_by_id_impl(&self, lecture_id: i64) -> Result<Option<Lecture>> {
        let result = CourseLectures::find_by_id(lecture_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(result.map(|m| m.into_lecture()))
    }

    pub async fn list_lectures_impl(&self, section_id: i64) -> Result<Vec<Lecture>> {
        let lectures = CourseLectures::find()
            .filter(Column::SectionId.eq(section_id))
            .order_by_asc(Column::LectureNumber)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询课时列表失败: {e}")))?;

        Ok(lectures.into_iter().map(|m| m.into_lecture()).collect())
    }

    /// 以完整记录覆盖课时内容，编号与归属不变
    pub async fn update_lecture_impl(
        &self,
        lecture_id: i64,
        record: LectureRecord,
    ) -> Result<Option<Lecture>> {
        if self.get_lecture_by_id_impl(lecture_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(lecture_id),
            title: Set(record.title.trim().to_string()),
            description: Set(record.description),
            content_type: Set(record.content_type.to_string()),
            content: Set(record.content),
            video_id: Set(record.video_id),
            youtube_url: Set(record.youtube_url),
            youtube_video_id: Set(record.youtube_video_id),
            duration_seconds: Set(record.duration_seconds),
            is_preview: Set(record.is_preview),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("更新课时失败: {e}")))?;

        self.get_lecture_by_id_impl(lecture_id).await
    }

    /// 删除课时并将同章节剩余课时重新编号为 1..N-1
    pub async fn delete_lecture_impl(&self, lecture_id: i64) -> Result<bool> {
        let Some(lecture) = CourseLectures::find_by_id(lecture_id).one(&self.db).await? else {
            return Ok(false);
        };

        let txn = self.db.begin().await?;
        CourseLectures::delete_by_id(lecture_id)
            .exec(&txn)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("删除课时失败: {e}")))?;

        let siblings = Self::lecture_numbers(&txn, lecture.section_id).await?;
        Self::apply_lecture_numbers(&txn, &renumber_plan(&siblings)).await?;
        txn.commit().await?;

        Ok(true)
    }

    pub async fn reorder_lectures_impl(&self, section_id: i64, ids: &[i64]) -> Result<Vec<Lecture>> {
        let txn = self.db.begin().await?;
        let siblings = Self::lecture_numbers(&txn, section_id).await?;
        Self::apply_lecture_numbers(&txn, &reorder_plan(&siblings, ids)).await?;
        txn.commit().await?;

        self.list_lectures_impl(section_id).await
    }

    pub async fn count_lectures_by_video_impl(&self, video_id: i64) -> Result<u64> {
        CourseLectures::find()
            .filter(Column::VideoId.eq(video_id))
            .count(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("统计视频引用失败: {e}")))
    }

    async fn lecture_numbers<C: ConnectionTrait>(conn: &C, section_id: i64) -> Result<Vec<(i64, i32)>> {
        let rows = CourseLectures::find()
            .filter(Column::SectionId.eq(section_id))
            .order_by_asc(Column::LectureNumber)
            .order_by_asc(Column::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(|m| (m.id, m.lecture_number)).collect())
    }

    async fn apply_lecture_numbers<C: ConnectionTrait>(conn: &C, plan: &[(i64, i32)]) -> Result<()> {
        for &(id, number) in plan {
            CourseLectures::update_many()
                .col_expr(Column::LectureNumber, Expr::value(number))
                .filter(Column::Id.eq(id))
                .exec(conn)
                .await
                .map_err(|e| {
                    CourseStudioError::database_operation(format!("更新课时编号失败: {e}"))
                })?;
        }
        Ok(())
    }
}
