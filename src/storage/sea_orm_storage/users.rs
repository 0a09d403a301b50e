//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{CourseStudioError, Result};
use crate::models::users::{
    entities::{User, UserOtp},
    requests::{CreateUserRequest, UpdateProfileRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email.to_lowercase()),
            password_hash: Set(req.password_hash),
            role: Set(req.role.to_string()),
            status: Set(req.status.to_string()),
            phone: Set(req.phone),
            bio: Set(req.bio),
            profile_picture: Set(req.profile_picture),
            cv_path: Set(req.cv_path),
            email_verified_at: Set(req.email_verified.then_some(now)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户，邮箱不区分大小写
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询用户总数失败: {e}")))
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                CourseStudioError::database_operation(format!("更新最后登录时间失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 更新个人资料
    pub async fn update_user_profile_impl(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone).filter(|p| !p.is_empty()));
        }
        if let Some(bio) = update.bio {
            model.bio = Set(Some(bio).filter(|b| !b.is_empty()));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    pub async fn get_user_otp_impl(&self, id: i64) -> Result<Option<UserOtp>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| UserOtp {
            code: m.otp_code,
            expires_at: m.otp_expires_at,
        }))
    }

    pub async fn set_user_otp_impl(&self, id: i64, code: &str, expires_at: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(Column::OtpCode, sea_orm::sea_query::Expr::value(code))
            .col_expr(Column::OtpExpiresAt, sea_orm::sea_query::Expr::value(expires_at))
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("写入验证码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn mark_email_verified_impl(&self, id: i64) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            id: Set(id),
            email_verified_at: Set(Some(now)),
            otp_code: Set(None),
            otp_expires_at: Set(None),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseStudioError::database_operation(format!("更新验证状态失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }
}
