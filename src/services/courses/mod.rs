pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod review;
pub mod submit;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireCourseOwner;
use crate::models::courses::entities::Course;
use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseRequest, RejectCourseRequest, UpdateCourseRequest,
};
use crate::models::{ApiResponse, ErrorCode, PaginationQuery};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            super::storage_from_request(request)
        }
    }

    /// RequireCourseOwner 放入的课程
    pub(crate) fn course_from_request(request: &HttpRequest) -> Result<Course, HttpResponse> {
        RequireCourseOwner::extract_course(request).ok_or_else(|| {
            HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            ))
        })
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        create_request: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, create_request).await
    }

    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    pub async fn get_course(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        detail::get_course(self, request).await
    }

    pub async fn update_course(
        &self,
        request: &HttpRequest,
        update_request: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, update_request).await
    }

    pub async fn delete_course(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request).await
    }

    pub async fn submit_course(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        submit::submit_course(self, request).await
    }

    pub async fn list_pending_courses(
        &self,
        request: &HttpRequest,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        review::list_pending_courses(self, request, query).await
    }

    pub async fn approve_course(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        review::approve_course(self, request).await
    }

    pub async fn reject_course(
        &self,
        request: &HttpRequest,
        reject_request: RejectCourseRequest,
    ) -> ActixResult<HttpResponse> {
        review::reject_course(self, request, reject_request).await
    }
}
