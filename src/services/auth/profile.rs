use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::UserInfoResponse;
use crate::models::users::requests::UpdateProfileRequest;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{current_user, internal_error, validation_error};
use crate::utils::validate::{add_error, validate_name};

use super::AuthService;

const MAX_PHONE_LEN: usize = 30;
const MAX_BIO_LEN: usize = 2000;

fn validate_profile(update: &UpdateProfileRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(name) = &update.name
        && let Err(msg) = validate_name(name)
    {
        add_error(&mut errors, "name", msg);
    }
    if let Some(phone) = &update.phone
        && phone.trim().chars().count() > MAX_PHONE_LEN
    {
        add_error(
            &mut errors,
            "phone",
            format!("The phone may not be greater than {MAX_PHONE_LEN} characters"),
        );
    }
    if let Some(bio) = &update.bio
        && bio.trim().chars().count() > MAX_BIO_LEN
    {
        add_error(
            &mut errors,
            "bio",
            format!("The bio may not be greater than {MAX_BIO_LEN} characters"),
        );
    }
    errors
}

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let current_user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let errors = validate_profile(&update_data);
    if !errors.is_empty() {
        return Ok(validation_error(errors));
    }

    let update = UpdateProfileRequest {
        name: update_data.name.map(|v| v.trim().to_string()),
        phone: update_data.phone.map(|v| v.trim().to_string()),
        bio: update_data.bio.map(|v| v.trim().to_string()),
    };

    let storage = service.get_storage(request);
    match storage.update_user_profile(current_user.id, update).await {
        Ok(Some(user)) => {
            RequireJWT::invalidate_cached_user(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserInfoResponse { user },
                "Profile updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            "Failed to update profile",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_validation() {
        let ok = UpdateProfileRequest {
            name: Some("Grace".into()),
            ..Default::default()
        };
        assert!(validate_profile(&ok).is_empty());

        let bad = UpdateProfileRequest {
            name: Some("   ".into()),
            phone: Some("1".repeat(40)),
            bio: None,
        };
        let errors = validate_profile(&bad);
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("phone"));
    }
}
