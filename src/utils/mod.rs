pub mod answer;
pub mod extractor;
pub mod file_magic;
pub mod jwt;
pub mod mailer;
pub mod parameter_error_handler;
pub mod password;
pub mod random_code;
pub mod sql;
pub mod upload;
pub mod validate;

pub use extractor::{
    SafeCourseIdI64, SafeLectureIdI64, SafeLiveClassIdI64, SafeQuizIdI64, SafeSectionIdI64,
    SafeVideoIdI64,
};
pub use file_magic::validate_magic_bytes;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
