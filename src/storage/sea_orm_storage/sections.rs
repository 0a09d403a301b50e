//! 章节存储操作

use super::SeaOrmStorage;
use super::numbering::{next_number, renumber_plan, reorder_plan};
use crate::entity::course_sections::{ActiveModel, Column, Entity as CourseSections};
use crate::errors::{CourseStudioError, Result};
use crate::models::sections::{
    entities::Section,
    requests::{CreateSectionRequest, UpdateSectionRequest},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建章节，编号为当前最大值加一
    pub async fn create_section_impl(
        &self,
        course_id: i64,
        req: CreateSectionRequest,
    ) -> Result<Section> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let last = CourseSections::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::SortOrder)
            .one(&txn)
            .await?;

        let model = ActiveModel {
            course_id: Set(course_id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            sort_order: Set(next_number(last.map(|s| s.sort_order))),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("创建章节失败: {e}")))?;
        txn.commit().await?;

        Ok(result.into_section())
    }

    pub async fn get_section_by_id_impl(&self, section_id: i64) -> Result<Option<Section>> {
        let result = CourseSections::find_by_id(section_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询章节失败: {e}")))?;

        Ok(result.map(|m| m.into_section()))
    }

    pub async fn list_sections_impl(&self, course_id: i64) -> Result<Vec<Section>> {
        let sections = CourseSections::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询章节列表失败: {e}")))?;

        Ok(sections.into_iter().map(|m| m.into_section()).collect())
    }

    pub async fn update_section_impl(
        &self,
        section_id: i64,
        update: UpdateSectionRequest,
    ) -> Result<Option<Section>> {
        if self.get_section_by_id_impl(section_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(section_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("更新章节失败: {e}")))?;

        self.get_section_by_id_impl(section_id).await
    }

    /// 删除章节（课时、测验随外键级联删除），并重新编号剩余章节
    pub async fn delete_section_impl(&self, section_id: i64) -> Result<bool> {
        let Some(section) = CourseSections::find_by_id(section_id).one(&self.db).await? else {
            return Ok(false);
        };

        let txn = self.db.begin().await?;
        CourseSections::delete_by_id(section_id)
            .exec(&txn)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("删除章节失败: {e}")))?;

        let siblings = Self::section_numbers(&txn, section.course_id).await?;
        Self::apply_section_numbers(&txn, &renumber_plan(&siblings)).await?;
        txn.commit().await?;

        Ok(true)
    }

    /// 按给定顺序重排章节
    pub async fn reorder_sections_impl(&self, course_id: i64, ids: &[i64]) -> Result<Vec<Section>> {
        let txn = self.db.begin().await?;
        let siblings = Self::section_numbers(&txn, course_id).await?;
        Self::apply_section_numbers(&txn, &reorder_plan(&siblings, ids)).await?;
        txn.commit().await?;

        self.list_sections_impl(course_id).await
    }

    async fn section_numbers<C: ConnectionTrait>(conn: &C, course_id: i64) -> Result<Vec<(i64, i32)>> {
        let rows = CourseSections::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(|m| (m.id, m.sort_order)).collect())
    }

    async fn apply_section_numbers<C: ConnectionTrait>(conn: &C, plan: &[(i64, i32)]) -> Result<()> {
        for &(id, number) in plan {
            CourseSections::update_many()
                .col_expr(Column::SortOrder, Expr::value(number))
                .filter(Column::Id.eq(id))
                .exec(conn)
                .await
                .map_err(|e| {
                    CourseStudioError::database_operation(format!("更新章节顺序失败: {e}"))
                })?;
        }
        Ok(())
    }
}
