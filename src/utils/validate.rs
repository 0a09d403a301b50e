use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::FieldErrors;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static YOUTUBE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Invalid youtube id regex"));

/// 记录一条字段错误
pub fn add_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

/// 必填文本，去除空白后非空且不超过 max 个字符
pub fn validate_required_text(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    let label = field.replace('_', " ");
    let trimmed = value.trim();
    if trimmed.is_empty() {
        add_error(errors, field, format!("The {label} field is required"));
    } else if trimmed.chars().count() > max {
        add_error(
            errors,
            field,
            format!("The {label} may not be greater than {max} characters"),
        );
    }
}

pub fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !host.contains(char::is_whitespace)
        }
        None => false,
    }
}

pub fn validate_optional_url(errors: &mut FieldErrors, field: &str, url: Option<&str>) {
    if let Some(url) = url
        && !url.trim().is_empty()
        && !is_http_url(url)
    {
        add_error(
            errors,
            field,
            format!("The {} must be a valid URL", field.replace('_', " ")),
        );
    }
}

/// 从常见的 YouTube 链接形式中提取视频 ID
///
/// 支持 `watch?v=`、`youtu.be/`、`embed/`、`shorts/`。
pub fn extract_youtube_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let rest = rest.strip_prefix("m.").unwrap_or(rest);

    let candidate: Option<&str> = if let Some(path) = rest.strip_prefix("youtu.be/") {
        path.split(['?', '&', '#', '/']).next()
    } else if let Some(path) = rest.strip_prefix("youtube.com/") {
        if let Some(query) = path.strip_prefix("watch?") {
            query
                .split('&')
                .find_map(|pair| pair.strip_prefix("v="))
                .and_then(|v| v.split('#').next())
        } else if let Some(id) = path
            .strip_prefix("embed/")
            .or_else(|| path.strip_prefix("shorts/"))
        {
            id.split(['?', '&', '#', '/']).next()
        } else {
            None
        }
    } else {
        None
    };
    let candidate = candidate?;

    YOUTUBE_ID_RE
        .is_match(candidate)
        .then(|| candidate.to_string())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err("The name field is required");
    }
    if len > 255 {
        return Err("The name may not be greater than 255 characters");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 可选：特殊字符（增强安全性）
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    // 1. 长度检查：至少 8 个字符
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    // 2. 大写字母检查
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    // 3. 小写字母检查
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    // 4. 数字检查
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    // 5. 常见弱密码检查
    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_id_forms() {
        let id = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(
            extract_youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            id
        );
        assert_eq!(
            extract_youtube_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"),
            id
        );
        assert_eq!(extract_youtube_video_id("https://youtu.be/dQw4w9WgXcQ?t=42"), id);
        assert_eq!(
            extract_youtube_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            id
        );
        assert_eq!(
            extract_youtube_video_id("https://youtube.com/shorts/dQw4w9WgXcQ"),
            id
        );
        assert_eq!(extract_youtube_video_id("youtu.be/dQw4w9WgXcQ"), id);
    }

    #[test]
    fn test_youtube_id_rejects_other_urls() {
        assert_eq!(extract_youtube_video_id("https://vimeo.com/12345678901"), None);
        assert_eq!(extract_youtube_video_id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(extract_youtube_video_id("https://www.youtube.com/channel/abc"), None);
    }

    #[test]
    fn test_http_url() {
        assert!(is_http_url("https://meet.example.com/room"));
        assert!(is_http_url("http://localhost:8080"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("example.com"));
    }

    #[test]
    fn test_required_text() {
        let mut errors = FieldErrors::new();
        validate_required_text(&mut errors, "title", "  ", 10);
        validate_required_text(&mut errors, "subtitle", "this is way too long", 10);
        assert_eq!(errors["title"], vec!["The title field is required"]);
        assert!(errors["subtitle"][0].contains("10"));
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_no_uppercase() {
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
    }

    #[test]
    fn test_no_lowercase() {
        let result = validate_password("ABCD1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one lowercase letter")
        );
    }

    #[test]
    fn test_no_digit() {
        let result = validate_password("AbcdEfgh");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
