use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::{LoginRequest, ResendOtpRequest, VerifyOtpRequest};
use crate::models::users::requests::UpdateProfileRequest;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn register(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(payload, &req).await
}

pub async fn verify_otp(
    req: HttpRequest,
    verify_data: web::Json<VerifyOtpRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.verify_otp(verify_data.into_inner(), &req).await
}

pub async fn resend_otp(
    req: HttpRequest,
    resend_data: web::Json<ResendOtpRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.resend_otp(resend_data.into_inner(), &req).await
}

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn logout(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&request).await
}

pub async fn get_user(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_user(&request).await
}

pub async fn update_profile(
    req: HttpRequest,
    profile_data: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .update_profile(profile_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .route(
                "/register",
                web::post()
                    .to(register)
                    .wrap(middlewares::RateLimit::register()),
            )
            .route(
                "/verify-otp",
                web::post()
                    .to(verify_otp)
                    .wrap(middlewares::RateLimit::otp_verify()),
            )
            .route(
                "/resend-otp",
                web::post()
                    .to(resend_otp)
                    .wrap(middlewares::RateLimit::otp_resend()),
            )
            .route(
                "/login",
                web::post().to(login).wrap(middlewares::RateLimit::login()),
            )
            .route(
                "/refresh",
                web::post()
                    .to(refresh_token)
                    .wrap(middlewares::RateLimit::refresh_token()),
            )
            // 令牌过期后也能退出登录
            .route("/logout", web::post().to(logout))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/me", web::get().to(get_user))
                    .route("/profile", web::put().to(update_profile)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::json;
    use std::sync::Arc;

    use crate::models::ErrorCode;
    use crate::models::users::entities::{UserRole, UserStatus};
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::utils::password::hash_password;

    const PASSWORD: &str = "Secret#123";

    async fn storage_with_teachers() -> Arc<dyn Storage> {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        for (email, verified, status) in [
            ("verified@example.com", true, UserStatus::Active),
            ("pending@example.com", false, UserStatus::Active),
            ("suspended@example.com", false, UserStatus::Suspended),
        ] {
            storage
                .create_user(CreateUserRequest {
                    name: "Teacher".to_string(),
                    email: email.to_string(),
                    password_hash: hash_password(PASSWORD).unwrap(),
                    role: UserRole::Teacher,
                    status,
                    phone: None,
                    bio: None,
                    profile_picture: None,
                    cv_path: Some("cvs/cv.pdf".to_string()),
                    email_verified: verified,
                })
                .await
                .unwrap();
        }
        Arc::new(storage)
    }

    fn login_request(email: &str, password: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": email, "password": password }))
    }

    #[actix_web::test]
    async fn test_login_states() {
        let storage = storage_with_teachers().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_auth_routes),
        )
        .await;

        // 密码错误
        let resp = test::call_service(
            &app,
            login_request("verified@example.com", "wrong").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // 密码正确但邮箱未验证，不签发任何令牌
        let resp = test::call_service(
            &app,
            login_request("pending@example.com", PASSWORD).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(resp.response().cookies().next().is_none());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::EmailNotVerified as i32);
        assert!(body.get("data").is_none());

        let resp = test::call_service(
            &app,
            login_request("verified@example.com", PASSWORD).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["data"]["access_token"].is_string());
        assert!(body["data"]["user"].get("password_hash").is_none());
    }

    #[actix_web::test]
    async fn test_verify_otp_refuses_suspended_account() {
        let storage = storage_with_teachers().await;
        let user = storage
            .get_user_by_email("suspended@example.com")
            .await
            .unwrap()
            .unwrap();
        let expires_at = chrono::Utc::now().timestamp() + 600;
        storage.set_user_otp(user.id, "123456", expires_at).await.unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage.clone()))
                .configure(configure_auth_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/verify-otp")
            .set_json(json!({ "email": "suspended@example.com", "otp": "123456" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(resp.response().cookies().next().is_none());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::UserSuspended as i32);

        // 邮箱仍保持未验证
        let user = storage
            .get_user_by_email("suspended@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(!user.is_verified());
    }
}
