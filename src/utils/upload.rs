//! multipart 表单读取与文件落盘
//!
//! 每个文件字段按 [`FileRule`] 校验 MIME 白名单、魔术字节与大小上限，
//! 边读边写入上传目录，任何一步失败都会删除本次已写入的文件。

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::{StreamExt, TryStreamExt};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::errors::CourseStudioError;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::utils::file_magic::{extension_for_mime, validate_magic_bytes};
use crate::utils::validate::add_error;

// 识别所有支持格式所需的最少字节数
const MAGIC_HEADER_LEN: usize = 16;
// 普通文本字段的长度上限
const MAX_TEXT_FIELD_LEN: usize = 64 * 1024;

/// 单个文件字段的校验规则
#[derive(Debug, Clone)]
pub struct FileRule {
    pub field: &'static str,
    pub subdir: &'static str,
    pub max_size: usize,
    pub allowed_mime: Vec<String>,
    pub required: bool,
}

/// 已落盘的文件
#[derive(Debug, Clone)]
pub struct SavedFile {
    pub original_name: String,
    /// 相对上传目录的路径
    pub stored_path: String,
    pub mime_type: String,
    pub size: usize,
}

/// 解析后的表单
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, SavedFile>,
}

impl MultipartForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// 删除本次表单写入的全部文件
    pub async fn discard(&self, upload_dir: &str) {
        for file in self.files.values() {
            remove_stored_file(upload_dir, &file.stored_path).await;
        }
    }
}

#[derive(Debug)]
pub enum UploadError {
    TooLarge { field: String, max_size: usize },
    TypeNotAllowed { field: String },
    ContentMismatch { field: String },
    Duplicate { field: String },
    Missing { field: String },
    Malformed(String),
    Io(std::io::Error),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::TooLarge { field, max_size } => {
                write!(f, "{field} exceeds the limit of {max_size} bytes")
            }
            UploadError::TypeNotAllowed { field } => write!(f, "{field} file type not allowed"),
            UploadError::ContentMismatch { field } => {
                write!(f, "{field} content does not match its type")
            }
            UploadError::Duplicate { field } => write!(f, "only one {field} file is allowed"),
            UploadError::Missing { field } => write!(f, "{field} file is required"),
            UploadError::Malformed(msg) => write!(f, "malformed multipart payload: {msg}"),
            UploadError::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl From<std::io::Error> for UploadError {
    fn from(e: std::io::Error) -> Self {
        UploadError::Io(e)
    }
}

impl UploadError {
    /// 文件校验失败对应的字段错误
    pub fn field_errors(&self) -> Option<FieldErrors> {
        let mut errors = FieldErrors::new();
        match self {
            UploadError::TooLarge { field, max_size } => add_error(
                &mut errors,
                field,
                format!(
                    "The {} may not be greater than {} kilobytes",
                    field.replace('_', " "),
                    max_size / 1024
                ),
            ),
            UploadError::TypeNotAllowed { field } | UploadError::ContentMismatch { field } => {
                add_error(
                    &mut errors,
                    field,
                    format!("The {} must be a file of an allowed type", field.replace('_', " ")),
                )
            }
            UploadError::Duplicate { field } => add_error(
                &mut errors,
                field,
                format!("Only one {} file can be uploaded", field.replace('_', " ")),
            ),
            UploadError::Missing { field } => add_error(
                &mut errors,
                field,
                format!("The {} field is required", field.replace('_', " ")),
            ),
            UploadError::Malformed(_) | UploadError::Io(_) => return None,
        }
        Some(errors)
    }

    /// 转换为 HTTP 响应
    pub fn into_response(self) -> HttpResponse {
        if let UploadError::TooLarge { .. } = self
            && let Some(errors) = self.field_errors()
        {
            return HttpResponse::PayloadTooLarge().json(ApiResponse::<()> {
                code: ErrorCode::FileSizeExceeded as i32,
                ..ApiResponse::validation_failed(errors)
            });
        }
        if let Some(errors) = self.field_errors() {
            return HttpResponse::UnprocessableEntity().json(ApiResponse::validation_failed(errors));
        }
        match self {
            UploadError::Malformed(msg) => HttpResponse::BadRequest().json(
                ApiResponse::error_empty(ErrorCode::BadRequest, format!("Malformed upload: {msg}")),
            ),
            other => {
                tracing::error!("{}", CourseStudioError::file_operation(other.to_string()));
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Failed to store uploaded file",
                ))
            }
        }
    }
}

/// 读取整个 multipart 表单
pub async fn read_multipart(
    mut payload: Multipart,
    upload_dir: &str,
    rules: &[FileRule],
) -> Result<MultipartForm, UploadError> {
    let mut form = MultipartForm::default();

    let result = async {
        while let Some(mut field) = payload
            .try_next()
            .await
            .map_err(|e| UploadError::Malformed(e.to_string()))?
        {
            let content_disposition = field.content_disposition();
            let name = content_disposition
                .and_then(|cd| cd.get_name())
                .unwrap_or_default()
                .to_string();
            let filename = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string());

            match rules.iter().find(|r| r.field == name) {
                Some(rule) => {
                    if form.files.contains_key(&name) {
                        return Err(UploadError::Duplicate { field: name });
                    }
                    let mime_type = field
                        .content_type()
                        .map(|ct| ct.essence_str().to_lowercase())
                        .unwrap_or_default();
                    if !rule.allowed_mime.iter().any(|m| m.eq_ignore_ascii_case(&mime_type)) {
                        return Err(UploadError::TypeNotAllowed { field: name });
                    }

                    let saved = save_field(
                        &mut field,
                        upload_dir,
                        rule,
                        filename.unwrap_or_default(),
                        mime_type,
                    )
                    .await?;
                    form.files.insert(name, saved);
                }
                None => {
                    let mut value = Vec::new();
                    while let Some(chunk) = field.next().await {
                        let data = chunk.map_err(|e| UploadError::Malformed(e.to_string()))?;
                        if value.len() + data.len() > MAX_TEXT_FIELD_LEN {
                            return Err(UploadError::TooLarge {
                                field: name,
                                max_size: MAX_TEXT_FIELD_LEN,
                            });
                        }
                        value.extend_from_slice(&data);
                    }
                    form.fields
                        .insert(name, String::from_utf8_lossy(&value).into_owned());
                }
            }
        }

        if let Some(rule) = rules
            .iter()
            .find(|r| r.required && !form.files.contains_key(r.field))
        {
            return Err(UploadError::Missing {
                field: rule.field.to_string(),
            });
        }
        Ok(())
    }
    .await;

    match result {
        Ok(()) => Ok(form),
        Err(e) => {
            form.discard(upload_dir).await;
            Err(e)
        }
    }
}

async fn save_field(
    field: &mut actix_multipart::Field,
    upload_dir: &str,
    rule: &FileRule,
    original_name: String,
    mime_type: String,
) -> Result<SavedFile, UploadError> {
    let dir = Path::new(upload_dir).join(rule.subdir);
    tokio::fs::create_dir_all(&dir).await?;

    let stored_name = format!(
        "{}-{}{}",
        chrono::Utc::now().timestamp(),
        Uuid::new_v4(),
        extension_for_mime(&mime_type)
    );
    let full_path: PathBuf = dir.join(&stored_name);
    let mut file = tokio::fs::File::create(&full_path).await?;

    let outcome = async {
        let mut total_size: usize = 0;
        let mut header: Vec<u8> = Vec::with_capacity(MAGIC_HEADER_LEN);
        let mut header_checked = false;

        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| UploadError::Malformed(e.to_string()))?;

            total_size += data.len();
            if total_size > rule.max_size {
                return Err(UploadError::TooLarge {
                    field: rule.field.to_string(),
                    max_size: rule.max_size,
                });
            }

            // 收集到足够的头部字节后校验一次魔术字节
            if !header_checked {
                let take = (MAGIC_HEADER_LEN - header.len()).min(data.len());
                header.extend_from_slice(&data[..take]);
                if header.len() >= MAGIC_HEADER_LEN {
                    header_checked = true;
                    if !validate_magic_bytes(&header, &mime_type) {
                        return Err(UploadError::ContentMismatch {
                            field: rule.field.to_string(),
                        });
                    }
                }
            }

            file.write_all(&data).await?;
        }

        if !header_checked && !validate_magic_bytes(&header, &mime_type) {
            return Err(UploadError::ContentMismatch {
                field: rule.field.to_string(),
            });
        }

        file.flush().await?;
        Ok(total_size)
    }
    .await;

    match outcome {
        Ok(size) => Ok(SavedFile {
            original_name,
            stored_path: format!("{}/{}", rule.subdir, stored_name),
            mime_type,
            size,
        }),
        Err(e) => {
            drop(file);
            let _ = tokio::fs::remove_file(&full_path).await;
            Err(e)
        }
    }
}

/// 删除上传目录下的文件，文件不存在时忽略
pub async fn remove_stored_file(upload_dir: &str, stored_path: &str) {
    let path = Path::new(upload_dir).join(stored_path);
    if let Err(e) = tokio::fs::remove_file(&path).await
        && e.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!("删除文件失败 {}: {}", path.display(), e);
    }
}

/// 上传文件的绝对路径
pub fn stored_file_path(upload_dir: &str, stored_path: &str) -> PathBuf {
    Path::new(upload_dir).join(stored_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_large_maps_to_field_error() {
        let err = UploadError::TooLarge {
            field: "cv".to_string(),
            max_size: 5 * 1024 * 1024,
        };
        let errors = err.field_errors().unwrap();
        assert_eq!(errors["cv"], vec!["The cv may not be greater than 5120 kilobytes"]);
    }

    #[test]
    fn test_io_error_has_no_field_errors() {
        let err = UploadError::Io(std::io::Error::other("disk full"));
        assert!(err.field_errors().is_none());
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        remove_stored_file(dir.path().to_str().unwrap(), "videos/none.mp4").await;
    }

    #[test]
    fn test_form_text_trims_and_skips_empty() {
        let mut form = MultipartForm::default();
        form.fields.insert("name".into(), "  Ada ".into());
        form.fields.insert("bio".into(), "   ".into());
        assert_eq!(form.text("name"), Some("Ada"));
        assert_eq!(form.text("bio"), None);
        assert_eq!(form.text("phone"), None);
    }
}
