/*!
 * JWT 认证中间件
 *
 * 验证 `Authorization: Bearer <token>` 中的 access token，并把当前用户放入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/v1/courses")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_courses))
 * ```
 *
 * 处理程序里通过 `RequireJWT::extract_user_claims(&req)` 取得用户。
 *
 * ## 拒绝规则
 *
 * - token 缺失、无效或过期：401
 * - 邮箱尚未通过验证码确认：403 `EmailNotVerified`
 * - 账号被停用：403 `UserSuspended`
 *
 * 用户信息按 token 缓存在 ObjectCache 中，TTL 为 `cache.default_ttl`。
 */

use crate::cache::{ObjectCache, get_object, insert_object};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserRole, UserStatus};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

/// 认证失败的原因
#[derive(Debug, PartialEq, Eq)]
enum AuthRejection {
    Unauthorized(&'static str),
    EmailNotVerified,
    Suspended,
}

impl AuthRejection {
    fn status(&self) -> StatusCode {
        match self {
            AuthRejection::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthRejection::EmailNotVerified | AuthRejection::Suspended => StatusCode::FORBIDDEN,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            AuthRejection::Unauthorized(_) => ErrorCode::Unauthorized,
            AuthRejection::EmailNotVerified => ErrorCode::EmailNotVerified,
            AuthRejection::Suspended => ErrorCode::UserSuspended,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            AuthRejection::Unauthorized(msg) => msg,
            AuthRejection::EmailNotVerified => "Please verify your email address first",
            AuthRejection::Suspended => "Your account has been suspended",
        }
    }
}

fn cache_key(token: &str) -> String {
    format!("user:{token}")
}

/// 已登录的用户仍需通过的状态检查
fn check_user_state(user: &User) -> Result<(), AuthRejection> {
    if user.status == UserStatus::Suspended {
        return Err(AuthRejection::Suspended);
    }
    if !user.is_verified() {
        return Err(AuthRejection::EmailNotVerified);
    }
    Ok(())
}

async fn authenticate(req: &ServiceRequest) -> Result<User, AuthRejection> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AuthRejection::Unauthorized(
            "Missing or invalid Authorization header",
        ))?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthRejection::Unauthorized("Invalid or expired token")
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());

    if let Some(cache) = &cache
        && let Some(user) = get_object::<User>(cache.as_ref(), &cache_key(token)).await
    {
        check_user_state(&user)?;
        return Ok(user);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let user_id = claims
        .user_id()
        .ok_or(AuthRejection::Unauthorized("Invalid user ID in token"))?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            info!("Failed to load user {} for token: {}", user_id, e);
            AuthRejection::Unauthorized("Failed to retrieve user")
        })?
        .ok_or(AuthRejection::Unauthorized("User not found"))?;

    check_user_state(&user)?;

    if let Some(cache) = &cache {
        insert_object(
            cache.as_ref(),
            &cache_key(token),
            &user,
            AppConfig::get().cache.default_ttl,
        )
        .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行给 CORS 处理
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            match authenticate(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(rejection) => {
                    info!(
                        "JWT authentication failed for request to {}: {:?}",
                        req.path(),
                        rejection
                    );
                    Ok(req.into_response(
                        create_error_response(
                            rejection.status(),
                            rejection.code(),
                            rejection.message(),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 从请求扩展中取出当前用户
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role.clone())
    }

    /// 让某个 token 的缓存失效，资料更新或注销后调用
    pub async fn invalidate_cached_user(req: &actix_web::HttpRequest) {
        let token = req
            .headers()
            .get(AUTHORIZATION_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix(BEARER_PREFIX))
            .map(str::trim);
        if let (Some(token), Some(cache)) =
            (token, req.app_data::<web::Data<Arc<dyn ObjectCache>>>())
        {
            cache.remove(&cache_key(token)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(verified: bool, status: UserStatus) -> User {
        let now = chrono::Utc::now();
        User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: String::new(),
            role: UserRole::Teacher,
            status,
            phone: None,
            bio: None,
            profile_picture: None,
            cv_path: None,
            email_verified_at: verified.then_some(now),
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_unverified_user_rejected() {
        let rejection = check_user_state(&user(false, UserStatus::Active)).unwrap_err();
        assert_eq!(rejection, AuthRejection::EmailNotVerified);
        assert_eq!(rejection.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_suspended_user_rejected() {
        let rejection = check_user_state(&user(true, UserStatus::Suspended)).unwrap_err();
        assert_eq!(rejection.code(), ErrorCode::UserSuspended);
    }

    #[test]
    fn test_verified_active_user_passes() {
        assert!(check_user_state(&user(true, UserStatus::Active)).is_ok());
    }
}
