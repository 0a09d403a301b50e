//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod lectures;
mod live_classes;
mod numbering;
mod quizzes;
mod sections;
mod users;
mod videos;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{CourseStudioError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 测试用的内存数据库，单连接保证所有查询落在同一个库上
    #[cfg(test)]
    pub(crate) async fn new_in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(opt).await?;
        Migrator::up(&db, None).await?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseStudioError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CourseStudioError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CourseStudioError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseStudioError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    courses::{
        entities::{Course, CourseStatus},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::{CourseContentCounts, CourseListResponse},
    },
    dashboard::responses::CourseStatusCounts,
    lectures::{entities::Lecture, requests::LectureRecord},
    live_classes::{
        entities::{LiveClass, LiveClassStatus},
        requests::{CreateLiveClassRequest, LiveClassListQuery, UpdateLiveClassRequest},
        responses::LiveClassListResponse,
    },
    quizzes::{
        entities::NewQuizQuestion,
        requests::{CreateQuizRequest, QuizChanges},
        responses::QuizWithQuestions,
    },
    sections::{
        entities::Section,
        requests::{CreateSectionRequest, UpdateSectionRequest},
        responses::SectionWithContent,
    },
    users::{
        entities::{User, UserOtp},
        requests::{CreateUserRequest, UpdateProfileRequest},
    },
    videos::{
        entities::Video,
        requests::{NewVideo, VideoListQuery, VideoStatusUpdate},
        responses::VideoListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn update_user_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>> {
        self.update_user_profile_impl(id, update).await
    }

    async fn get_user_otp(&self, id: i64) -> Result<Option<UserOtp>> {
        self.get_user_otp_impl(id).await
    }

    async fn set_user_otp(&self, id: i64, code: &str, expires_at: i64) -> Result<bool> {
        self.set_user_otp_impl(id, code, expires_at).await
    }

    async fn mark_email_verified(&self, id: i64) -> Result<Option<User>> {
        self.mark_email_verified_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(teacher_id, course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    async fn update_course_status(
        &self,
        course_id: i64,
        status: CourseStatus,
        review_note: Option<String>,
    ) -> Result<Option<Course>> {
        self.update_course_status_impl(course_id, status, review_note)
            .await
    }

    async fn count_course_content(&self, course_id: i64) -> Result<CourseContentCounts> {
        self.count_course_content_impl(course_id).await
    }

    async fn count_courses_by_status(&self, teacher_id: i64) -> Result<CourseStatusCounts> {
        self.count_courses_by_status_impl(teacher_id).await
    }

    async fn get_course_curriculum(&self, course_id: i64) -> Result<Vec<SectionWithContent>> {
        self.get_course_curriculum_impl(course_id).await
    }

    // 章节模块
    async fn create_section(
        &self,
        course_id: i64,
        section: CreateSectionRequest,
    ) -> Result<Section> {
        self.create_section_impl(course_id, section).await
    }

    async fn get_section_by_id(&self, section_id: i64) -> Result<Option<Section>> {
        self.get_section_by_id_impl(section_id).await
    }

    async fn list_sections(&self, course_id: i64) -> Result<Vec<Section>> {
        self.list_sections_impl(course_id).await
    }

    async fn update_section(
        &self,
        section_id: i64,
        update: UpdateSectionRequest,
    ) -> Result<Option<Section>> {
        self.update_section_impl(section_id, update).await
    }

    async fn delete_section(&self, section_id: i64) -> Result<bool> {
        self.delete_section_impl(section_id).await
    }

    async fn reorder_sections(&self, course_id: i64, ids: &[i64]) -> Result<Vec<Section>> {
        self.reorder_sections_impl(course_id, ids).await
    }

    // 课时模块
    async fn create_lecture(
        &self,
        course_id: i64,
        section_id: i64,
        lecture: LectureRecord,
    ) -> Result<Lecture> {
        self.create_lecture_impl(course_id, section_id, lecture)
            .await
    }

    async fn get_lecture_by_id(&self, lecture_id: i64) -> Result<Option<Lecture>> {
        self.get_lecture_by_id_impl(lecture_id).await
    }

    async fn list_lectures(&self, section_id: i64) -> Result<Vec<Lecture>> {
        self.list_lectures_impl(section_id).await
    }

    async fn update_lecture(
        &self,
        lecture_id: i64,
        lecture: LectureRecord,
    ) -> Result<Option<Lecture>> {
        self.update_lecture_impl(lecture_id, lecture).await
    }

    async fn delete_lecture(&self, lecture_id: i64) -> Result<bool> {
        self.delete_lecture_impl(lecture_id).await
    }

    async fn reorder_lectures(&self, section_id: i64, ids: &[i64]) -> Result<Vec<Lecture>> {
        self.reorder_lectures_impl(section_id, ids).await
    }

    async fn count_lectures_by_video(&self, video_id: i64) -> Result<u64> {
        self.count_lectures_by_video_impl(video_id).await
    }

    // 测验模块
    async fn create_quiz(
        &self,
        course_id: i64,
        section_id: i64,
        quiz: CreateQuizRequest,
        questions: Vec<NewQuizQuestion>,
    ) -> Result<QuizWithQuestions> {
        self.create_quiz_impl(course_id, section_id, quiz, questions)
            .await
    }

    async fn get_quiz_by_id(&self, quiz_id: i64) -> Result<Option<QuizWithQuestions>> {
        self.get_quiz_by_id_impl(quiz_id).await
    }

    async fn list_quizzes(&self, section_id: i64) -> Result<Vec<QuizWithQuestions>> {
        self.list_quizzes_impl(section_id).await
    }

    async fn update_quiz(
        &self,
        quiz_id: i64,
        changes: QuizChanges,
    ) -> Result<Option<QuizWithQuestions>> {
        self.update_quiz_impl(quiz_id, changes).await
    }

    async fn delete_quiz(&self, quiz_id: i64) -> Result<bool> {
        self.delete_quiz_impl(quiz_id).await
    }

    async fn reorder_quizzes(
        &self,
        section_id: i64,
        ids: &[i64],
    ) -> Result<Vec<QuizWithQuestions>> {
        self.reorder_quizzes_impl(section_id, ids).await
    }

    // 直播课模块
    async fn create_live_class(
        &self,
        teacher_id: i64,
        live_class: CreateLiveClassRequest,
    ) -> Result<LiveClass> {
        self.create_live_class_impl(teacher_id, live_class).await
    }

    async fn get_live_class_by_id(&self, live_class_id: i64) -> Result<Option<LiveClass>> {
        self.get_live_class_by_id_impl(live_class_id).await
    }

    async fn list_live_classes_with_pagination(
        &self,
        query: LiveClassListQuery,
    ) -> Result<LiveClassListResponse> {
        self.list_live_classes_with_pagination_impl(query).await
    }

    async fn update_live_class(
        &self,
        live_class_id: i64,
        update: UpdateLiveClassRequest,
    ) -> Result<Option<LiveClass>> {
        self.update_live_class_impl(live_class_id, update).await
    }

    async fn update_live_class_status(
        &self,
        live_class_id: i64,
        status: LiveClassStatus,
    ) -> Result<Option<LiveClass>> {
        self.update_live_class_status_impl(live_class_id, status)
            .await
    }

    async fn delete_live_class(&self, live_class_id: i64) -> Result<bool> {
        self.delete_live_class_impl(live_class_id).await
    }

    // 视频库模块
    async fn create_video(&self, video: NewVideo) -> Result<Video> {
        self.create_video_impl(video).await
    }

    async fn get_video_by_id(&self, video_id: i64) -> Result<Option<Video>> {
        self.get_video_by_id_impl(video_id).await
    }

    async fn list_videos_with_pagination(
        &self,
        query: VideoListQuery,
    ) -> Result<VideoListResponse> {
        self.list_videos_with_pagination_impl(query).await
    }

    async fn update_video_status(
        &self,
        video_id: i64,
        update: VideoStatusUpdate,
    ) -> Result<Option<Video>> {
        self.update_video_status_impl(video_id, update).await
    }

    async fn delete_video(&self, video_id: i64) -> Result<bool> {
        self.delete_video_impl(video_id).await
    }

    async fn count_videos(&self, teacher_id: i64) -> Result<u64> {
        self.count_videos_impl(teacher_id).await
    }
}
