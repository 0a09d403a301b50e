//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_course_studio_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CourseStudioError {
            $($variant(String),)*
        }

        impl CourseStudioError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(CourseStudioError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CourseStudioError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(CourseStudioError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl CourseStudioError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CourseStudioError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_course_studio_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Resource State Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    ExternalService("E014", "External Service Error"),
}

impl CourseStudioError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CourseStudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CourseStudioError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CourseStudioError {
    fn from(err: sea_orm::DbErr) -> Self {
        CourseStudioError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CourseStudioError {
    fn from(err: std::io::Error) -> Self {
        CourseStudioError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CourseStudioError {
    fn from(err: serde_json::Error) -> Self {
        CourseStudioError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CourseStudioError {
    fn from(err: chrono::ParseError) -> Self {
        CourseStudioError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CourseStudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CourseStudioError::cache_connection("test").code(), "E001");
        assert_eq!(CourseStudioError::database_config("test").code(), "E003");
        assert_eq!(CourseStudioError::validation("test").code(), "E007");
        assert_eq!(CourseStudioError::authentication("test").code(), "E012");
    }

    #[test]
    fn test_conflict_and_external_codes() {
        assert_eq!(CourseStudioError::conflict("pending").code(), "E010");
        assert_eq!(
            CourseStudioError::external_service("youtube").error_type(),
            "External Service Error"
        );
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CourseStudioError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            CourseStudioError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = CourseStudioError::validation("Course title is required");
        assert_eq!(err.message(), "Course title is required");
    }

    #[test]
    fn test_db_error_conversion() {
        let err: CourseStudioError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E005");
        assert!(err.message().contains("boom"));
    }

    #[test]
    fn test_format_simple() {
        let err = CourseStudioError::validation("Invalid meeting URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid meeting URL"));
    }
}
