use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::entities::{User, UserStatus};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::services::internal_error;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 根据邮箱获取用户
    let user = match storage.get_user_by_email(login_request.email.trim()).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(invalid_credentials()),
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                "Login failed",
                e,
            ));
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(invalid_credentials());
    }

    // 3. 未验证邮箱或已停用的账号不签发任何令牌
    if !user.is_verified() {
        tracing::info!("Login refused for unverified user {}", user.id);
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::EmailNotVerified,
            "Please verify your email address before logging in",
        )));
    }
    if user.status == UserStatus::Suspended {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::UserSuspended,
            "Your account has been suspended",
        )));
    }

    // 4. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.id, e);
    }

    Ok(issue_login_response(user, login_request.remember_me, "Login successful"))
}

/// 签发 token 对并写入 refresh cookie，验证码通过后也走这里
pub(crate) fn issue_login_response(user: User, remember_me: bool, message: &str) -> HttpResponse {
    let refresh_expiry = JwtUtils::refresh_token_expiry(remember_me);

    match user.generate_token_pair(Some(refresh_expiry)) {
        Ok(token_pair) => {
            tracing::info!("User {} logged in successfully", user.id);

            let refresh_cookie =
                JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_expiry);
            let response = LoginResponse {
                access_token: token_pair.access_token,
                expires_in: JwtUtils::access_token_ttl_seconds(),
                user,
                created_at: chrono::Utc::now(),
            };

            HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, message))
        }
        Err(e) => internal_error(
            ErrorCode::InternalServerError,
            "Login failed, unable to generate token",
            e,
        ),
    }
}

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Email or password is incorrect",
    ))
}
