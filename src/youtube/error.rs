use thiserror::Error;

/// YouTube 上传客户端错误
#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("YouTube credentials are not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Token request failed: {0}")]
    Token(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Upload session response has no Location header")]
    MissingSessionUrl,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("File error: {0}")]
    File(String),
}

impl From<reqwest::Error> for YoutubeError {
    fn from(e: reqwest::Error) -> Self {
        YoutubeError::Network(e.to_string())
    }
}

impl From<std::io::Error> for YoutubeError {
    fn from(e: std::io::Error) -> Self {
        YoutubeError::File(e.to_string())
    }
}

pub const QUOTA_EXCEEDED_MESSAGE: &str =
    "YouTube upload quota has been exceeded. Please try again tomorrow.";
pub const LIMIT_REACHED_MESSAGE: &str =
    "YouTube upload limit has been reached. Please try again later.";
pub const GENERIC_UPLOAD_MESSAGE: &str = "Failed to upload the video to YouTube. Please try again.";

/// 把上传失败原因转换为给教师看的提示
pub fn classify_upload_error(err: &YoutubeError) -> &'static str {
    let text = err.to_string().to_lowercase();
    if text.contains("quota") {
        QUOTA_EXCEEDED_MESSAGE
    } else if text.contains("limit") {
        LIMIT_REACHED_MESSAGE
    } else {
        GENERIC_UPLOAD_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_upload_error() {
        let quota = YoutubeError::Api(403, "quotaExceeded: The request cannot be completed".into());
        assert_eq!(classify_upload_error(&quota), QUOTA_EXCEEDED_MESSAGE);

        let limit = YoutubeError::Api(400, "uploadLimitExceeded".into());
        assert_eq!(classify_upload_error(&limit), LIMIT_REACHED_MESSAGE);

        let other = YoutubeError::Network("connection reset".into());
        assert_eq!(classify_upload_error(&other), GENERIC_UPLOAD_MESSAGE);
    }

    #[test]
    fn test_quota_checked_before_limit() {
        let both = YoutubeError::Api(403, "rate limit: daily quota used".into());
        assert_eq!(classify_upload_error(&both), QUOTA_EXCEEDED_MESSAGE);
    }
}
