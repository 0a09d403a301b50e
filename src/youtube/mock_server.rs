//! 测试用的本地 YouTube API：可续传会话、分块 PUT 与时长查询
//!
//! 分块请求按预设顺序应答，并记录收到的 Content-Range。

use std::collections::VecDeque;
use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::http::header::{CONTENT_RANGE, LOCATION};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};

use crate::config::YoutubeConfig;

/// 对一次分块 PUT 的预设应答
#[derive(Debug, Clone)]
pub(crate) struct ChunkReply {
    status: u16,
    range: Option<String>,
    body: String,
}

impl ChunkReply {
    /// 308，`range` 为服务端已确认的范围，None 表示没有 Range 头
    pub(crate) fn resume(range: Option<&str>) -> Self {
        Self {
            status: 308,
            range: range.map(str::to_string),
            body: String::new(),
        }
    }

    pub(crate) fn created(video_id: &str) -> Self {
        Self {
            status: 201,
            range: None,
            body: serde_json::json!({ "id": video_id }).to_string(),
        }
    }

    pub(crate) fn error(status: u16, body: &str) -> Self {
        Self {
            status,
            range: None,
            body: body.to_string(),
        }
    }
}

struct MockState {
    session_url: String,
    duration: String,
    replies: VecDeque<ChunkReply>,
    ranges: Vec<String>,
}

pub(crate) struct MockYoutube {
    base: String,
    state: web::Data<Mutex<MockState>>,
    handle: ServerHandle,
}

impl MockYoutube {
    /// 启动监听随机端口的服务，`duration` 为 contentDetails 返回的 ISO-8601 时长
    pub(crate) async fn start(replies: Vec<ChunkReply>, duration: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());

        let state = web::Data::new(Mutex::new(MockState {
            session_url: format!("{base}/upload-session"),
            duration: duration.to_string(),
            replies: replies.into(),
            ranges: Vec::new(),
        }));

        let data = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .app_data(web::PayloadConfig::new(8 * 1024 * 1024))
                .route("/upload/youtube/v3/videos", web::post().to(create_session))
                .route("/upload-session", web::put().to(put_chunk))
                .route("/youtube/v3/videos", web::get().to(list_videos))
        })
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base,
            state,
            handle,
        }
    }

    /// 指向本服务、使用固定 access token 的客户端配置
    pub(crate) fn config(&self) -> YoutubeConfig {
        YoutubeConfig {
            access_token: "ya29.test".to_string(),
            api_base: self.base.clone(),
            chunk_size: 256 * 1024,
            request_timeout: 10,
            ..YoutubeConfig::default()
        }
    }

    /// 按到达顺序收到的 Content-Range
    pub(crate) fn received_ranges(&self) -> Vec<String> {
        self.state.lock().unwrap().ranges.clone()
    }

    pub(crate) async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn create_session(state: web::Data<Mutex<MockState>>) -> HttpResponse {
    let session_url = state.lock().unwrap().session_url.clone();
    HttpResponse::Ok()
        .insert_header((LOCATION, session_url))
        .finish()
}

async fn put_chunk(
    req: HttpRequest,
    _body: web::Bytes,
    state: web::Data<Mutex<MockState>>,
) -> HttpResponse {
    let mut state = state.lock().unwrap();
    let range = req
        .headers()
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.ranges.push(range);

    let Some(reply) = state.replies.pop_front() else {
        return HttpResponse::InternalServerError().body("no reply scripted");
    };

    let mut builder = HttpResponse::build(StatusCode::from_u16(reply.status).unwrap());
    if let Some(range) = reply.range {
        builder.insert_header(("Range", range));
    }
    builder
        .content_type("application/json")
        .body(reply.body)
}

async fn list_videos(state: web::Data<Mutex<MockState>>) -> HttpResponse {
    let duration = state.lock().unwrap().duration.clone();
    HttpResponse::Ok().json(serde_json::json!({
        "items": [{ "contentDetails": { "duration": duration } }]
    }))
}
