pub mod create;
pub mod delete;
pub mod read;
pub mod reorder;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::quizzes::requests::{CreateQuizRequest, UpdateQuizRequest};
use crate::models::quizzes::responses::QuizWithQuestions;
use crate::models::sections::requests::ReorderRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct QuizService {
    storage: Option<Arc<dyn Storage>>,
}

impl QuizService {
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

    pub async fn create_quiz(
        &self,
        request: &HttpRequest,
        section_id: i64,
        create_request: CreateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_quiz(self, request, section_id, create_request).await
    }

    pub async fn list_quizzes(
        &self,
        request: &HttpRequest,
        section_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::list_quizzes(self, request, section_id).await
    }

    pub async fn get_quiz(
        &self,
        request: &HttpRequest,
        section_id: i64,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        read::get_quiz(self, request, section_id, quiz_id).await
    }

    pub async fn update_quiz(
        &self,
        request: &HttpRequest,
        section_id: i64,
        quiz_id: i64,
        update_request: UpdateQuizRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_quiz(self, request, section_id, quiz_id, update_request).await
    }

    pub async fn delete_quiz(
        &self,
        request: &HttpRequest,
        section_id: i64,
        quiz_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_quiz(self, request, section_id, quiz_id).await
    }

    pub async fn reorder_quizzes(
        &self,
        request: &HttpRequest,
        section_id: i64,
        reorder_request: ReorderRequest,
    ) -> ActixResult<HttpResponse> {
        reorder::reorder_quizzes(self, request, section_id, reorder_request).await
    }
}

pub(crate) async fn quiz_in_section(
    storage: &Arc<dyn Storage>,
    section_id: i64,
    quiz_id: i64,
) -> Result<QuizWithQuestions, HttpResponse> {
    match storage.get_quiz_by_id(quiz_id).await {
        Ok(Some(quiz)) if quiz.quiz.section_id == section_id => Ok(quiz),
        Ok(_) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuizNotFound,
            "Quiz not found",
        ))),
        Err(e) => Err(super::internal_error(
            ErrorCode::InternalServerError,
            "Failed to load quiz",
            e,
        )),
    }
}
