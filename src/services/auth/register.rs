use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::RegisterResponse;
use crate::models::users::entities::{UserRole, UserStatus};
use crate::models::users::requests::CreateUserRequest;
use crate::models::{ApiResponse, ErrorCode, FieldErrors};
use crate::services::{internal_error, validation_error};
use crate::utils::password::hash_password;
use crate::utils::upload::{FileRule, MultipartForm, read_multipart};
use crate::utils::validate::{add_error, validate_email, validate_name, validate_password};

use super::AuthService;
use super::otp::issue_otp;

const MAX_PHONE_LEN: usize = 30;
const MAX_BIO_LEN: usize = 2000;

pub async fn handle_register(
    service: &AuthService,
    payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();
    let upload_dir = config.upload.dir.as_str();

    // 1. 读取表单并保存简历与头像
    let rules = [
        FileRule {
            field: "cv",
            subdir: "cvs",
            max_size: config.upload.cv_max_size,
            allowed_mime: config.upload.cv_mime_types.clone(),
            required: true,
        },
        FileRule {
            field: "profile_picture",
            subdir: "profile_pictures",
            max_size: config.upload.profile_picture_max_size,
            allowed_mime: config.upload.image_mime_types.clone(),
            required: false,
        },
    ];
    let form = match read_multipart(payload, upload_dir, &rules).await {
        Ok(form) => form,
        Err(e) => return Ok(e.into_response()),
    };

    // 2. 校验文本字段
    let errors = validate_register_form(&form);
    if !errors.is_empty() {
        form.discard(upload_dir).await;
        return Ok(validation_error(errors));
    }

    let email = form.text("email").unwrap_or_default().to_lowercase();

    // 3. 邮箱唯一
    match storage.get_user_by_email(&email).await {
        Ok(Some(_)) => {
            form.discard(upload_dir).await;
            let mut errors = FieldErrors::new();
            add_error(&mut errors, "email", "The email has already been taken");
            return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::<()> {
                code: ErrorCode::EmailAlreadyExists as i32,
                ..ApiResponse::validation_failed(errors)
            }));
        }
        Ok(None) => {}
        Err(e) => {
            form.discard(upload_dir).await;
            return Ok(internal_error(ErrorCode::RegisterFailed, "Register failed", e));
        }
    }

    // 4. 哈希密码
    let password = form.fields.get("password").map(String::as_str).unwrap_or_default();
    let password_hash = match hash_password(password) {
        Ok(hash) => hash,
        Err(e) => {
            form.discard(upload_dir).await;
            return Ok(internal_error(ErrorCode::RegisterFailed, "Register failed", e));
        }
    };

    // 5. 创建未验证的教师账号
    let create_request = CreateUserRequest {
        name: form.text("name").unwrap_or_default().to_string(),
        email,
        password_hash,
        role: UserRole::Teacher,
        status: UserStatus::Active,
        phone: form.text("phone").map(str::to_string),
        bio: form.text("bio").map(str::to_string),
        profile_picture: form
            .files
            .get("profile_picture")
            .map(|f| f.stored_path.clone()),
        cv_path: form.files.get("cv").map(|f| f.stored_path.clone()),
        email_verified: false,
    };

    let user = match storage.create_user(create_request).await {
        Ok(user) => user,
        Err(e) => {
            form.discard(upload_dir).await;
            return Ok(internal_error(ErrorCode::RegisterFailed, "Register failed", e));
        }
    };
    tracing::info!("Teacher {} registered, awaiting email verification", user.id);

    // 6. 发送验证码，失败时教师可以重新获取
    let otp_expires_in = match issue_otp(&storage, &user, request).await {
        Ok(expires_in) => expires_in,
        Err(e) => {
            tracing::error!("Failed to issue OTP for user {}: {}", user.id, e);
            0
        }
    };

    Ok(HttpResponse::Created().json(ApiResponse::success(
        RegisterResponse {
            user,
            otp_expires_in,
        },
        "Registration successful, please check your email for the verification code",
    )))
}

fn validate_register_form(form: &MultipartForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Err(msg) = validate_name(form.text("name").unwrap_or_default()) {
        add_error(&mut errors, "name", msg);
    }

    match form.text("email") {
        None => add_error(&mut errors, "email", "The email field is required"),
        Some(email) => {
            if let Err(msg) = validate_email(email) {
                add_error(&mut errors, "email", msg);
            }
        }
    }

    // 密码不去除空白
    let password = form.fields.get("password").map(String::as_str).unwrap_or_default();
    if password.is_empty() {
        add_error(&mut errors, "password", "The password field is required");
    } else {
        for msg in validate_password(password).errors {
            add_error(&mut errors, "password", msg);
        }
        let confirmation = form
            .fields
            .get("password_confirmation")
            .map(String::as_str)
            .unwrap_or_default();
        if confirmation != password {
            add_error(
                &mut errors,
                "password_confirmation",
                "The password confirmation does not match",
            );
        }
    }

    if let Some(phone) = form.text("phone")
        && phone.chars().count() > MAX_PHONE_LEN
    {
        add_error(
            &mut errors,
            "phone",
            format!("The phone may not be greater than {MAX_PHONE_LEN} characters"),
        );
    }
    if let Some(bio) = form.text("bio")
        && bio.chars().count() > MAX_BIO_LEN
    {
        add_error(
            &mut errors,
            "bio",
            format!("The bio may not be greater than {MAX_BIO_LEN} characters"),
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(fields: &[(&str, &str)]) -> MultipartForm {
        let mut form = MultipartForm::default();
        for (k, v) in fields {
            form.fields.insert(k.to_string(), v.to_string());
        }
        form
    }

    #[test]
    fn test_valid_form() {
        let form = form(&[
            ("name", "Ada Lovelace"),
            ("email", "ada@example.com"),
            ("password", "Analytical9Engine"),
            ("password_confirmation", "Analytical9Engine"),
        ]);
        assert!(validate_register_form(&form).is_empty());
    }

    #[test]
    fn test_errors_keyed_by_field() {
        let form = form(&[
            ("email", "not-an-email"),
            ("password", "Analytical9Engine"),
            ("password_confirmation", "different"),
        ]);
        let errors = validate_register_form(&form);
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password_confirmation"));
        assert!(!errors.contains_key("password"));
    }

    #[test]
    fn test_weak_password_reported() {
        let form = form(&[
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("password", "short"),
            ("password_confirmation", "short"),
        ]);
        let errors = validate_register_form(&form);
        assert!(!errors["password"].is_empty());
    }
}
