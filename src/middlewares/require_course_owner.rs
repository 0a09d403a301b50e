/*!
 * 课程归属校验中间件
 *
 * 必须放在 RequireJWT 之后，作用于路径中带 `{course_id}` 的路由。
 * 课程不存在返回 404，调用者既不是课程所属教师也不是管理员返回 403。
 * 校验通过后把 [`Course`] 放入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/courses/{course_id}")
 *     .wrap(RequireCourseOwner)
 *     .wrap(RequireJWT)
 *     .route("/sections", web::post().to(create_section))
 * ```
 */

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

use crate::{
    models::{ErrorCode, courses::entities::Course, users::entities::User},
    storage::Storage,
    utils::extractor::parse_positive_id,
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireCourseOwner;

impl RequireCourseOwner {
    /// 取出中间件放入的课程
    pub fn extract_course(req: &actix_web::HttpRequest) -> Option<Course> {
        req.extensions().get::<Course>().cloned()
    }

    fn may_manage(user: &User, course: &Course) -> bool {
        user.is_admin() || course.teacher_id == user.id
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireCourseOwner
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireCourseOwnerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireCourseOwnerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireCourseOwnerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireCourseOwnerMiddleware<S>
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
            // 1. 当前用户
            let Some(user) = req.extensions().get::<User>().cloned() else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            // 2. 路径中的 course_id
            let Some(course_id) = parse_positive_id(req.match_info().get("course_id")) else {
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::BAD_REQUEST,
                        ErrorCode::BadRequest,
                        "Missing or invalid course_id",
                    )
                    .map_into_right_body(),
                ));
            };

            // 3. 查询课程
            let storage = req
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone();

            let course = match storage.get_course_by_id(course_id).await {
                Ok(Some(course)) => course,
                Ok(None) => {
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::NOT_FOUND,
                            ErrorCode::CourseNotFound,
                            "Course not found",
                        )
                        .map_into_right_body(),
                    ));
                }
                Err(e) => {
                    tracing::error!("Failed to load course {}: {}", course_id, e);
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Failed to load course",
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            // 4. 归属校验
            if !RequireCourseOwner::may_manage(&user, &course) {
                tracing::info!(
                    "User {} denied access to course {} owned by {}",
                    user.id,
                    course.id,
                    course.teacher_id
                );
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::FORBIDDEN,
                        ErrorCode::CoursePermissionDenied,
                        "You do not have permission to manage this course",
                    )
                    .map_into_right_body(),
                ));
            }

            req.extensions_mut().insert(course);
            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}
