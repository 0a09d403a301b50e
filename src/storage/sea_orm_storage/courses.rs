//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{CourseStudioError, Result};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::{Course, CourseStatus},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::{CourseContentCounts, CourseListResponse},
    },
    dashboard::responses::CourseStatusCounts,
    sections::responses::SectionWithContent,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建课程草稿
    pub async fn create_course_impl(
        &self,
        teacher_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            title: Set(req.title.trim().to_string()),
            category: Set(req.category),
            price: Set(0.0),
            status: Set(CourseStatus::Draft.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Courses::find();

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Subtitle.contains(&escaped))
                    .add(Column::Category.contains(&escaped)),
            );
        }

        select = select.order_by_desc(Column::UpdatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            CourseStudioError::database_operation(format!("查询课程总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            CourseStudioError::database_operation(format!("查询课程页数失败: {e}"))
        })?;

        let courses = paginator.fetch_page(page - 1).await.map_err(|e| {
            CourseStudioError::database_operation(format!("查询课程列表失败: {e}"))
        })?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(course_id).await?.is_none() {
            return Ok(None);
        }

        let level = update.parsed_level();
        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title.trim().to_string());
        }
        if let Some(subtitle) = update.subtitle {
            model.subtitle = Set(Some(subtitle));
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(category) = update.category {
            model.category = Set(Some(category));
        }
        if let Some(level) = level {
            model.level = Set(Some(level.to_string()));
        }
        if let Some(language) = update.language {
            model.language = Set(Some(language));
        }
        if let Some(price) = update.price {
            model.price = Set(price);
        }
        if let Some(thumbnail_url) = update.thumbnail_url {
            model.thumbnail_url = Set(Some(thumbnail_url));
        }
        if let Some(learning_outcomes) = update.learning_outcomes {
            model.learning_outcomes = Set(Some(learning_outcomes));
        }
        if let Some(requirements) = update.requirements {
            model.requirements = Set(Some(requirements));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 变更课程状态
    pub async fn update_course_status_impl(
        &self,
        course_id: i64,
        status: CourseStatus,
        review_note: Option<String>,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(course_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let mut model = ActiveModel {
            id: Set(course_id),
            status: Set(status.to_string()),
            review_note: Set(review_note),
            updated_at: Set(now),
            ..Default::default()
        };

        match status {
            CourseStatus::Pending => model.submitted_at = Set(Some(now)),
            CourseStatus::Published => model.published_at = Set(Some(now)),
            CourseStatus::Draft | CourseStatus::Rejected => {}
        }

        model.update(&self.db).await.map_err(|e| {
            CourseStudioError::database_operation(format!("更新课程状态失败: {e}"))
        })?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 统计课程大纲中的章节、课时与测验数量
    pub async fn count_course_content_impl(&self, course_id: i64) -> Result<CourseContentCounts> {
        use crate::entity::prelude::{CourseLectures, CourseQuizzes, CourseSections};
        use crate::entity::{course_lectures, course_quizzes, course_sections};

        let sections = CourseSections::find()
            .filter(course_sections::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await?;
        let lectures = CourseLectures::find()
            .filter(course_lectures::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await?;
        let quizzes = CourseQuizzes::find()
            .filter(course_quizzes::Column::CourseId.eq(course_id))
            .count(&self.db)
            .await?;

        Ok(CourseContentCounts {
            sections,
            lectures,
            quizzes,
        })
    }

    /// 按状态统计教师的课程
    pub async fn count_courses_by_status_impl(&self, teacher_id: i64) -> Result<CourseStatusCounts> {
        let statuses: Vec<String> = Courses::find()
            .select_only()
            .column(Column::Status)
            .filter(Column::TeacherId.eq(teacher_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("统计课程失败: {e}")))?;

        let mut counts = CourseStatusCounts::default();
        for status in statuses {
            match status.parse::<CourseStatus>() {
                Ok(CourseStatus::Draft) => counts.draft += 1,
                Ok(CourseStatus::Pending) => counts.pending += 1,
                Ok(CourseStatus::Published) => counts.published += 1,
                Ok(CourseStatus::Rejected) => counts.rejected += 1,
                Err(_) => {}
            }
            counts.total += 1;
        }
        Ok(counts)
    }

    /// 获取课程完整大纲：章节按 sort_order，课时与测验按各自编号
    pub async fn get_course_curriculum_impl(
        &self,
        course_id: i64,
    ) -> Result<Vec<SectionWithContent>> {
        let sections = self.list_sections_impl(course_id).await?;

        let mut curriculum = Vec::with_capacity(sections.len());
        for section in sections {
            let lectures = self.list_lectures_impl(section.id).await?;
            let quizzes = self.list_quizzes_impl(section.id).await?;
            curriculum.push(SectionWithContent {
                section,
                lectures,
                quizzes,
            });
        }
        Ok(curriculum)
    }
}
