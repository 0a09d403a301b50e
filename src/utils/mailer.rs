//! 邮件发送
//!
//! 目前只有写日志的实现，注册和重发验证码时通过它把验证码交给教师。

use std::sync::Arc;

use actix_web::{HttpRequest, web};
use async_trait::async_trait;

use crate::errors::Result;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_otp(&self, to: &str, name: &str, code: &str, expires_in_minutes: i64)
    -> Result<()>;
}

/// 把邮件内容写入日志
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_otp(
        &self,
        to: &str,
        name: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<()> {
        tracing::info!(
            to = %to,
            "发送邮箱验证码给 {}: {} ({} 分钟内有效)",
            name,
            code,
            expires_in_minutes
        );
        Ok(())
    }
}

/// 从 app data 取得邮件发送器，未注册时使用日志实现
pub fn get_mailer(req: &HttpRequest) -> Arc<dyn Mailer> {
    req.app_data::<web::Data<Arc<dyn Mailer>>>()
        .map(|data| data.get_ref().clone())
        .unwrap_or_else(|| Arc::new(LogMailer))
}
