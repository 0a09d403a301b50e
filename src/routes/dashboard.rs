use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::DashboardService;

static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn get_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.get_dashboard(&req).await
}

// 配置路由，RequireJWT 会拒绝邮箱未验证的教师
pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dashboard")
            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_dashboard)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    use crate::models::ErrorCode;
    use crate::models::users::entities::UserStatus;
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::utils::jwt::JwtUtils;

    async fn teacher(storage: &SeaOrmStorage, email: &str, verified: bool) -> String {
        let user = storage
            .create_user(CreateUserRequest {
                name: "Teacher".to_string(),
                email: email.to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::Teacher,
                status: UserStatus::Active,
                phone: None,
                bio: None,
                profile_picture: None,
                cv_path: None,
                email_verified: verified,
            })
            .await
            .unwrap();
        JwtUtils::generate_access_token(user.id, UserRole::TEACHER).unwrap()
    }

    fn dashboard_request(token: &str) -> test::TestRequest {
        test::TestRequest::get()
            .uri("/api/v1/dashboard")
            .insert_header(("Authorization", format!("Bearer {token}")))
    }

    #[actix_web::test]
    async fn test_dashboard_rejects_unverified_teacher() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let verified = teacher(&storage, "verified@example.com", true).await;
        let pending = teacher(&storage, "pending@example.com", false).await;

        let storage: Arc<dyn Storage> = Arc::new(storage);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_dashboard_routes),
        )
        .await;

        // 未携带令牌
        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/dashboard").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = test::call_service(&app, dashboard_request(&pending).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::EmailNotVerified as i32);

        let resp = test::call_service(&app, dashboard_request(&verified).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["courses"]["total"], 0);
        assert_eq!(body["data"]["videos"], 0);
        assert!(body["data"]["upcoming_live_classes"].as_array().unwrap().is_empty());
    }
}
