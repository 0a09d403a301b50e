use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::auth::{OtpSentResponse, ResendOtpRequest, VerifyOtpRequest};
use crate::models::users::entities::{User, UserOtp, UserStatus};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;
use crate::storage::Storage;
use crate::utils::mailer::get_mailer;
use crate::utils::random_code::generate_numeric_code;

use super::AuthService;
use super::login::issue_login_response;

/// 验证码比对结果
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum OtpCheck {
    Valid,
    Invalid,
    Expired,
}

pub(crate) fn check_otp(stored: &UserOtp, submitted: &str, now: i64) -> OtpCheck {
    let (Some(code), Some(expires_at)) = (stored.code.as_deref(), stored.expires_at) else {
        return OtpCheck::Invalid;
    };
    if code != submitted.trim() {
        return OtpCheck::Invalid;
    }
    if now > expires_at {
        return OtpCheck::Expired;
    }
    OtpCheck::Valid
}

/// 生成新验证码并发送，返回有效期（秒）
pub(crate) async fn issue_otp(
    storage: &Arc<dyn Storage>,
    user: &User,
    request: &HttpRequest,
) -> Result<i64> {
    let otp_config = &AppConfig::get().otp;
    let code = generate_numeric_code(otp_config.length);
    let expires_in = otp_config.expiry_minutes * 60;
    let expires_at = chrono::Utc::now().timestamp() + expires_in;

    storage.set_user_otp(user.id, &code, expires_at).await?;
    get_mailer(request)
        .send_otp(&user.email, &user.name, &code, otp_config.expiry_minutes)
        .await?;

    Ok(expires_in)
}

pub async fn handle_verify_otp(
    service: &AuthService,
    verify_request: VerifyOtpRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_email(verify_request.email.trim()).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(user_not_found()),
        Err(e) => return Ok(internal_error(ErrorCode::InternalServerError, "Verification failed", e)),
    };

    if user.is_verified() {
        return Ok(already_verified());
    }

    let stored = match storage.get_user_otp(user.id).await {
        Ok(Some(stored)) => stored,
        Ok(None) => return Ok(user_not_found()),
        Err(e) => return Ok(internal_error(ErrorCode::InternalServerError, "Verification failed", e)),
    };

    match check_otp(&stored, &verify_request.otp, chrono::Utc::now().timestamp()) {
        OtpCheck::Valid => {}
        OtpCheck::Invalid => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::OtpInvalid,
                "The verification code is invalid",
            )));
        }
        OtpCheck::Expired => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::OtpExpired,
                "The verification code has expired, please request a new one",
            )));
        }
    }

    // 已停用的账号与登录一致，不签发令牌
    if user.status == UserStatus::Suspended {
        tracing::info!("OTP verification refused for suspended user {}", user.id);
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::UserSuspended,
            "Your account has been suspended",
        )));
    }

    let user = match storage.mark_email_verified(user.id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(user_not_found()),
        Err(e) => return Ok(internal_error(ErrorCode::InternalServerError, "Verification failed", e)),
    };
    tracing::info!("User {} verified email", user.id);

    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.id, e);
    }

    Ok(issue_login_response(user, false, "Email verified successfully"))
}

pub async fn handle_resend_otp(
    service: &AuthService,
    resend_request: ResendOtpRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_email(resend_request.email.trim()).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(user_not_found()),
        Err(e) => return Ok(internal_error(ErrorCode::InternalServerError, "Resend failed", e)),
    };

    if user.is_verified() {
        return Ok(already_verified());
    }

    match issue_otp(&storage, &user, request).await {
        Ok(expires_in) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            OtpSentResponse {
                email: user.email,
                otp_expires_in: expires_in,
            },
            "A new verification code has been sent",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to send verification code",
            e,
        )),
    }
}

fn user_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::UserNotFound,
        "No account found for this email",
    ))
}

fn already_verified() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::EmailAlreadyVerified,
        "Email is already verified",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(code: &str, expires_at: i64) -> UserOtp {
        UserOtp {
            code: Some(code.to_string()),
            expires_at: Some(expires_at),
        }
    }

    #[test]
    fn test_check_otp() {
        let now = 1_700_000_000;
        assert_eq!(check_otp(&stored("123456", now + 60), " 123456 ", now), OtpCheck::Valid);
        assert_eq!(check_otp(&stored("123456", now + 60), "654321", now), OtpCheck::Invalid);
        assert_eq!(check_otp(&stored("123456", now - 1), "123456", now), OtpCheck::Expired);
    }

    #[test]
    fn test_cleared_otp_never_matches() {
        let cleared = UserOtp {
            code: None,
            expires_at: None,
        };
        assert_eq!(check_otp(&cleared, "", 0), OtpCheck::Invalid);
    }
}
