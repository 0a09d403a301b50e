//! YouTube Data API v3 上传客户端
//!
//! 使用应用级凭据，通过可续传会话按固定大小分块上传，完成后查询视频时长。

use std::io::SeekFrom;
use std::path::Path;
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use reqwest::header::{CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, LOCATION};
use serde::Deserialize;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::Mutex;

use super::duration::parse_iso8601_duration;
use super::error::YoutubeError;
use crate::config::{AppConfig, YoutubeConfig};

// 令牌在到期前 5 分钟视为失效
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(5 * 60);

// 除最后一块外，每块大小必须是 256 KiB 的整数倍
const CHUNK_GRANULARITY: usize = 256 * 1024;

// 连续多少次 308 没有推进进度后放弃
const MAX_STALLED_CHUNKS: u32 = 3;

/// 上传时写入 YouTube 的元数据
#[derive(Debug, Clone)]
pub struct UploadMetadata {
    pub title: String,
    pub description: String,
}

/// 上传结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedVideo {
    pub video_id: String,
    pub duration_seconds: Option<i64>,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct UploadedResource {
    id: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    #[serde(rename = "contentDetails")]
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

pub struct YoutubeClient {
    http: reqwest::Client,
    config: YoutubeConfig,
    token: Mutex<Option<CachedToken>>,
}

impl YoutubeClient {
    pub fn new(config: YoutubeConfig) -> Result<Self, YoutubeError> {
        // 308 是可续传上传的“继续”信号，不能被当成重定向跟随
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| YoutubeError::Network(e.to_string()))?;

        Ok(Self {
            http,
            config,
            token: Mutex::new(None),
        })
    }

    /// 按全局配置创建，未配置凭据时返回 None
    pub fn from_app_config() -> Option<Self> {
        let config = AppConfig::get();
        if !config.youtube_enabled() {
            return None;
        }
        match Self::new(config.youtube.clone()) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!("YouTube client init failed: {}", e);
                None
            }
        }
    }

    fn can_refresh(&self) -> bool {
        !self.config.refresh_token.is_empty()
            && !self.config.client_id.is_empty()
            && !self.config.client_secret.is_empty()
    }

    /// 取得访问令牌：有 refresh token 时走刷新并缓存，否则使用配置中的 access token
    pub async fn access_token(&self) -> Result<String, YoutubeError> {
        if !self.can_refresh() {
            if self.config.access_token.is_empty() {
                return Err(YoutubeError::NotConfigured);
            }
            return Ok(self.config.access_token.clone());
        }

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref()
            && token.is_fresh(Instant::now())
        {
            return Ok(token.access_token.clone());
        }

        let response = self
            .http
            .post(&self.config.token_uri)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("refresh_token", self.config.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(YoutubeError::Token(format!("{}: {}", status.as_u16(), body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| YoutubeError::Parse(e.to_string()))?;
        let expires_in = Duration::from_secs(token.expires_in.unwrap_or(3600));
        tracing::debug!("YouTube access token refreshed, expires in {:?}", expires_in);

        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Instant::now() + expires_in,
        });
        Ok(token.access_token)
    }

    /// 上传本地文件，返回 YouTube 视频 ID 和时长
    pub async fn upload_video(
        &self,
        path: &Path,
        mime_type: &str,
        metadata: &UploadMetadata,
    ) -> Result<UploadedVideo, YoutubeError> {
        let file_size = tokio::fs::metadata(path).await?.len();
        if file_size == 0 {
            return Err(YoutubeError::File("file is empty".to_string()));
        }

        let token = self.access_token().await?;
        let session_url = self
            .create_upload_session(&token, metadata, file_size, mime_type)
            .await?;
        let video_id = self
            .upload_chunks(&token, &session_url, path, file_size, mime_type)
            .await?;

        tracing::info!(video_id = %video_id, size = file_size, "YouTube upload completed");

        // 时长查询失败不影响上传结果
        let duration_seconds = match self.fetch_duration(&token, &video_id).await {
            Ok(duration) => duration,
            Err(e) => {
                tracing::warn!("Failed to fetch duration for {}: {}", video_id, e);
                None
            }
        };

        Ok(UploadedVideo {
            video_id,
            duration_seconds,
        })
    }

    async fn create_upload_session(
        &self,
        token: &str,
        metadata: &UploadMetadata,
        file_size: u64,
        mime_type: &str,
    ) -> Result<String, YoutubeError> {
        let url = format!(
            "{}/upload/youtube/v3/videos?uploadType=resumable&part=snippet,status",
            self.config.api_base
        );
        let body = json!({
            "snippet": {
                "title": metadata.title,
                "description": metadata.description,
                "categoryId": self.config.category_id,
            },
            "status": {
                "privacyStatus": self.config.privacy_status,
            },
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .header("X-Upload-Content-Length", file_size.to_string())
            .header("X-Upload-Content-Type", mime_type)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(YoutubeError::Api(status.as_u16(), text));
        }

        response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or(YoutubeError::MissingSessionUrl)
    }

    async fn upload_chunks(
        &self,
        token: &str,
        session_url: &str,
        path: &Path,
        file_size: u64,
        mime_type: &str,
    ) -> Result<String, YoutubeError> {
        let chunk_size = effective_chunk_size(self.config.chunk_size);
        let mut file = tokio::fs::File::open(path).await?;
        let mut buffer = vec![0u8; chunk_size];
        let mut offset: u64 = 0;
        let mut stalled = 0;

        loop {
            file.seek(SeekFrom::Start(offset)).await?;
            let len = read_full(&mut file, &mut buffer).await?;
            if len == 0 {
                return Err(YoutubeError::File(format!(
                    "unexpected end of file at byte {offset}"
                )));
            }
            let end = offset + len as u64 - 1;

            let response = self
                .http
                .put(session_url)
                .bearer_auth(token)
                .header(CONTENT_TYPE, mime_type)
                .header(CONTENT_LENGTH, len.to_string())
                .header(CONTENT_RANGE, content_range(offset, end, file_size))
                .body(buffer[..len].to_vec())
                .send()
                .await?;

            match response.status() {
                StatusCode::OK | StatusCode::CREATED => {
                    let resource: UploadedResource = response
                        .json()
                        .await
                        .map_err(|e| YoutubeError::Parse(e.to_string()))?;
                    return Ok(resource.id);
                }
                StatusCode::PERMANENT_REDIRECT => {
                    // 服务端确认已收到的范围，从其后继续；没有 Range 表示一个字节都未保存
                    let next = match response.headers().get("Range") {
                        Some(range) => range
                            .to_str()
                            .ok()
                            .and_then(next_offset_from_range)
                            .ok_or_else(|| {
                                YoutubeError::Parse(format!("invalid Range header: {range:?}"))
                            })?,
                        None => 0,
                    };
                    if next > offset {
                        stalled = 0;
                    } else {
                        stalled += 1;
                        if stalled >= MAX_STALLED_CHUNKS {
                            return Err(YoutubeError::Api(
                                308,
                                format!("upload made no progress past byte {next}"),
                            ));
                        }
                    }
                    offset = next;
                    tracing::debug!("YouTube upload progress: {}/{}", offset, file_size);
                    if offset >= file_size {
                        return Err(YoutubeError::Parse(
                            "server acknowledged all bytes without returning a video".to_string(),
                        ));
                    }
                }
                status => {
                    let text = response.text().await.unwrap_or_default();
                    return Err(YoutubeError::Api(status.as_u16(), text));
                }
            }
        }
    }

    /// 查询视频时长（秒）
    pub async fn fetch_duration(
        &self,
        token: &str,
        video_id: &str,
    ) -> Result<Option<i64>, YoutubeError> {
        let url = format!("{}/youtube/v3/videos", self.config.api_base);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("part", "contentDetails"), ("id", video_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(YoutubeError::Api(status.as_u16(), text));
        }

        let list: VideoListResponse = response
            .json()
            .await
            .map_err(|e| YoutubeError::Parse(e.to_string()))?;

        Ok(list
            .items
            .into_iter()
            .next()
            .and_then(|item| item.content_details)
            .and_then(|details| details.duration)
            .and_then(|d| parse_iso8601_duration(&d)))
    }
}

// 尽量填满缓冲区，文件结束时返回实际读取的字节数
async fn read_full(file: &mut tokio::fs::File, buffer: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        let n = file.read(&mut buffer[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

// 向下取整到 256 KiB 的整数倍，最少一块
fn effective_chunk_size(configured: usize) -> usize {
    (configured / CHUNK_GRANULARITY).max(1) * CHUNK_GRANULARITY
}

fn content_range(start: u64, end: u64, total: u64) -> String {
    format!("bytes {start}-{end}/{total}")
}

// Range: bytes=0-1048575 → 1048576
fn next_offset_from_range(range: &str) -> Option<u64> {
    let last = range.trim().strip_prefix("bytes=")?.split('-').nth(1)?;
    last.trim().parse::<u64>().ok().map(|n| n + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::mock_server::{ChunkReply, MockYoutube};

    fn config(access_token: &str, refresh_token: &str) -> YoutubeConfig {
        YoutubeConfig {
            client_id: "client".into(),
            client_secret: "secret".into(),
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            ..YoutubeConfig::default()
        }
    }

    #[tokio::test]
    async fn test_configured_access_token_used_without_refresh() {
        let client = YoutubeClient::new(config("ya29.static", "")).unwrap();
        assert_eq!(client.access_token().await.unwrap(), "ya29.static");
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let client = YoutubeClient::new(config("", "")).unwrap();
        assert!(matches!(
            client.access_token().await,
            Err(YoutubeError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_cached_token_reused_until_margin() {
        let client = YoutubeClient::new(config("", "refresh")).unwrap();
        *client.token.lock().await = Some(CachedToken {
            access_token: "cached".into(),
            expires_at: Instant::now() + Duration::from_secs(3600),
        });
        assert_eq!(client.access_token().await.unwrap(), "cached");
    }

    #[test]
    fn test_token_freshness_margin() {
        let now = Instant::now();
        let nearly_expired = CachedToken {
            access_token: String::new(),
            expires_at: now + Duration::from_secs(4 * 60),
        };
        assert!(!nearly_expired.is_fresh(now));

        let fresh = CachedToken {
            access_token: String::new(),
            expires_at: now + Duration::from_secs(10 * 60),
        };
        assert!(fresh.is_fresh(now));
    }

    #[test]
    fn test_chunk_size_rounds_down_to_granularity() {
        assert_eq!(effective_chunk_size(1024 * 1024), 1024 * 1024);
        assert_eq!(effective_chunk_size(1_000_000), 3 * 256 * 1024);
        assert_eq!(effective_chunk_size(100), 256 * 1024);
    }

    fn sample_file(size: usize) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
        let bytes: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        std::fs::write(file.path(), bytes).unwrap();
        file
    }

    fn metadata() -> UploadMetadata {
        UploadMetadata {
            title: "Intro".to_string(),
            description: String::new(),
        }
    }

    #[actix_web::test]
    async fn test_upload_follows_acknowledged_ranges() {
        let server = MockYoutube::start(
            vec![
                ChunkReply::resume(Some("bytes=0-262143")),
                ChunkReply::resume(Some("bytes=0-524287")),
                ChunkReply::created("yt-abc123"),
            ],
            "PT1M30S",
        )
        .await;
        let client = YoutubeClient::new(server.config()).unwrap();
        let file = sample_file(600 * 1024);

        let uploaded = client
            .upload_video(file.path(), "video/mp4", &metadata())
            .await
            .unwrap();
        assert_eq!(
            uploaded,
            UploadedVideo {
                video_id: "yt-abc123".to_string(),
                duration_seconds: Some(90),
            }
        );
        assert_eq!(
            server.received_ranges(),
            vec![
                "bytes 0-262143/614400",
                "bytes 262144-524287/614400",
                "bytes 524288-614399/614400",
            ]
        );
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_resume_without_range_resends_from_start() {
        let server = MockYoutube::start(
            vec![
                ChunkReply::resume(None),
                ChunkReply::resume(Some("bytes=0-262143")),
                ChunkReply::created("yt-def456"),
            ],
            "PT5S",
        )
        .await;
        let client = YoutubeClient::new(server.config()).unwrap();
        let file = sample_file(300 * 1024);

        let uploaded = client
            .upload_video(file.path(), "video/mp4", &metadata())
            .await
            .unwrap();
        assert_eq!(uploaded.video_id, "yt-def456");
        assert_eq!(
            server.received_ranges(),
            vec![
                "bytes 0-262143/307200",
                "bytes 0-262143/307200",
                "bytes 262144-307199/307200",
            ]
        );
        server.stop().await;
    }

    #[actix_web::test]
    async fn test_upload_gives_up_when_no_progress() {
        let server = MockYoutube::start(
            vec![
                ChunkReply::resume(None),
                ChunkReply::resume(None),
                ChunkReply::resume(None),
            ],
            "PT5S",
        )
        .await;
        let client = YoutubeClient::new(server.config()).unwrap();
        let file = sample_file(300 * 1024);

        let result = client
            .upload_video(file.path(), "video/mp4", &metadata())
            .await;
        assert!(matches!(result, Err(YoutubeError::Api(308, _))));
        assert_eq!(server.received_ranges().len(), 3);
        server.stop().await;
    }

    #[test]
    fn test_range_helpers() {
        assert_eq!(content_range(0, 1048575, 3000000), "bytes 0-1048575/3000000");
        assert_eq!(next_offset_from_range("bytes=0-1048575"), Some(1048576));
        assert_eq!(next_offset_from_range("garbage"), None);
    }
}
