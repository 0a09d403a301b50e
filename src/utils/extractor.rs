//! 安全的路径参数提取器
//!
//! 路径中的 ID 必须是正整数，否则直接返回 400，不进入业务逻辑。

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 路径参数解析失败
#[derive(Debug)]
pub struct InvalidPathParam {
    pub name: &'static str,
}

impl std::fmt::Display for InvalidPathParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid path parameter: {}", self.name)
    }
}

impl ResponseError for InvalidPathParam {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            self.to_string(),
        ))
    }
}

/// 解析为正整数 ID
pub fn parse_positive_id(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.parse::<i64>().ok()).filter(|id| *id > 0)
}

#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = $crate::utils::extractor::InvalidPathParam;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                std::future::ready(
                    $crate::utils::extractor::parse_positive_id(req.match_info().get($param))
                        .map($name)
                        .ok_or($crate::utils::extractor::InvalidPathParam { name: $param }),
                )
            }
        }
    };
}

define_safe_i64_extractor!(SafeCourseIdI64, "course_id");
define_safe_i64_extractor!(SafeSectionIdI64, "section_id");
define_safe_i64_extractor!(SafeLectureIdI64, "lecture_id");
define_safe_i64_extractor!(SafeQuizIdI64, "quiz_id");
define_safe_i64_extractor!(SafeLiveClassIdI64, "live_class_id");
define_safe_i64_extractor!(SafeVideoIdI64, "video_id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_id() {
        assert_eq!(parse_positive_id(Some("42")), Some(42));
        assert_eq!(parse_positive_id(Some("0")), None);
        assert_eq!(parse_positive_id(Some("-3")), None);
        assert_eq!(parse_positive_id(Some("1; DROP TABLE")), None);
        assert_eq!(parse_positive_id(None), None);
    }
}
