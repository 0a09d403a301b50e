pub mod auth;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod lectures;
pub mod live_classes;
pub mod quizzes;
pub mod sections;
pub mod users;
pub mod videos;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::{ApiResponse, FieldErrors};

use serde::{Deserialize, Serialize};

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1005,
    InternalServerError = 1006,

    // 认证错误 2xxx
    AuthFailed = 2000,
    RegisterFailed = 2001,
    EmailAlreadyExists = 2002,
    EmailNotVerified = 2003,
    EmailAlreadyVerified = 2004,
    OtpInvalid = 2005,
    OtpExpired = 2006,
    UserNotFound = 2007,
    UserSuspended = 2008,

    // 课程错误 3xxx
    CourseNotFound = 3000,
    CoursePermissionDenied = 3001,
    CourseNotEditable = 3002,
    CourseSubmitFailed = 3003,
    CourseStatusConflict = 3004,

    // 课程大纲错误 4xxx
    SectionNotFound = 4000,
    LectureNotFound = 4001,
    QuizNotFound = 4002,
    ReorderMismatch = 4003,

    // 直播课错误 5xxx
    LiveClassNotFound = 5000,
    LiveClassNotEditable = 5001,

    // 文件与视频错误 6xxx
    FileUploadFailed = 6000,
    FileTypeNotAllowed = 6001,
    FileSizeExceeded = 6002,
    FileNotFound = 6003,
    MultifileUploadNotAllowed = 6004,
    VideoNotFound = 6005,
    VideoInUse = 6006,
    VideoNotReady = 6007,
    YoutubeNotConfigured = 6008,
    YoutubeUploadFailed = 6009,
}
