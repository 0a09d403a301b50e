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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 更新个人资料
    async fn update_user_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>>;
    // 获取邮箱验证码
    async fn get_user_otp(&self, id: i64) -> Result<Option<UserOtp>>;
    // 写入新的验证码，旧码随之失效
    async fn set_user_otp(&self, id: i64, code: &str, expires_at: i64) -> Result<bool>;
    // 标记邮箱已验证并清除验证码
    async fn mark_email_verified(&self, id: i64) -> Result<Option<User>>;

    /// 课程管理方法
    async fn create_course(&self, teacher_id: i64, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程，大纲与直播课级联删除
    async fn delete_course(&self, course_id: i64) -> Result<bool>;
    // 变更课程状态，同时维护提交与发布时间
    async fn update_course_status(
        &self,
        course_id: i64,
        status: CourseStatus,
        review_note: Option<String>,
    ) -> Result<Option<Course>>;
    async fn count_course_content(&self, course_id: i64) -> Result<CourseContentCounts>;
    async fn count_courses_by_status(&self, teacher_id: i64) -> Result<CourseStatusCounts>;
    // 获取课程完整大纲
    async fn get_course_curriculum(&self, course_id: i64) -> Result<Vec<SectionWithContent>>;

    /// 章节管理方法
    async fn create_section(&self, course_id: i64, section: CreateSectionRequest)
    -> Result<Section>;
    async fn get_section_by_id(&self, section_id: i64) -> Result<Option<Section>>;
    async fn list_sections(&self, course_id: i64) -> Result<Vec<Section>>;
    async fn update_section(
        &self,
        section_id: i64,
        update: UpdateSectionRequest,
    ) -> Result<Option<Section>>;
    // 删除章节并重新编号剩余章节
    async fn delete_section(&self, section_id: i64) -> Result<bool>;
    async fn reorder_sections(&self, course_id: i64, ids: &[i64]) -> Result<Vec<Section>>;

    /// 课时管理方法
    async fn create_lecture(
        &self,
        course_id: i64,
        section_id: i64,
        lecture: LectureRecord,
    ) -> Result<Lecture>;
    async fn get_lecture_by_id(&self, lecture_id: i64) -> Result<Option<Lecture>>;
    async fn list_lectures(&self, section_id: i64) -> Result<Vec<Lecture>>;
    async fn update_lecture(&self, lecture_id: i64, lecture: LectureRecord)
    -> Result<Option<Lecture>>;
    // 删除课时并重新编号同章节剩余课时
    async fn delete_lecture(&self, lecture_id: i64) -> Result<bool>;
    async fn reorder_lectures(&self, section_id: i64, ids: &[i64]) -> Result<Vec<Lecture>>;
    // 引用某个视频的课时数量
    async fn count_lectures_by_video(&self, video_id: i64) -> Result<u64>;

    /// 测验管理方法
    async fn create_quiz(
        &self,
        course_id: i64,
        section_id: i64,
        quiz: CreateQuizRequest,
        questions: Vec<NewQuizQuestion>,
    ) -> Result<QuizWithQuestions>;
    async fn get_quiz_by_id(&self, quiz_id: i64) -> Result<Option<QuizWithQuestions>>;
    async fn list_quizzes(&self, section_id: i64) -> Result<Vec<QuizWithQuestions>>;
    async fn update_quiz(
        &self,
        quiz_id: i64,
        changes: QuizChanges,
    ) -> Result<Option<QuizWithQuestions>>;
    async fn delete_quiz(&self, quiz_id: i64) -> Result<bool>;
    async fn reorder_quizzes(&self, section_id: i64, ids: &[i64])
    -> Result<Vec<QuizWithQuestions>>;

    /// 直播课管理方法
    async fn create_live_class(
        &self,
        teacher_id: i64,
        live_class: CreateLiveClassRequest,
    ) -> Result<LiveClass>;
    async fn get_live_class_by_id(&self, live_class_id: i64) -> Result<Option<LiveClass>>;
    async fn list_live_classes_with_pagination(
        &self,
        query: LiveClassListQuery,
    ) -> Result<LiveClassListResponse>;
    async fn update_live_class(
        &self,
        live_class_id: i64,
        update: UpdateLiveClassRequest,
    ) -> Result<Option<LiveClass>>;
    async fn update_live_class_status(
        &self,
        live_class_id: i64,
        status: LiveClassStatus,
    ) -> Result<Option<LiveClass>>;
    async fn delete_live_class(&self, live_class_id: i64) -> Result<bool>;

    /// 视频库管理方法
    async fn create_video(&self, video: NewVideo) -> Result<Video>;
    async fn get_video_by_id(&self, video_id: i64) -> Result<Option<Video>>;
    async fn list_videos_with_pagination(&self, query: VideoListQuery)
    -> Result<VideoListResponse>;
    async fn update_video_status(
        &self,
        video_id: i64,
        update: VideoStatusUpdate,
    ) -> Result<Option<Video>>;
    async fn delete_video(&self, video_id: i64) -> Result<bool>;
    async fn count_videos(&self, teacher_id: i64) -> Result<u64>;
}

/// 创建存储实例并完成数据库迁移
pub async fn create_storage() -> Result<std::sync::Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(std::sync::Arc::new(storage))
}
