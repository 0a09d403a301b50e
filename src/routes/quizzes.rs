use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::quizzes::requests::{CreateQuizRequest, UpdateQuizRequest};
use crate::models::sections::requests::ReorderRequest;
use crate::services::QuizService;
use crate::utils::{SafeQuizIdI64, SafeSectionIdI64};

static QUIZ_SERVICE: Lazy<QuizService> = Lazy::new(QuizService::new_lazy);

pub async fn list_quizzes(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.list_quizzes(&req, section_id.0).await
}

pub async fn create_quiz(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    quiz_data: web::Json<CreateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .create_quiz(&req, section_id.0, quiz_data.into_inner())
        .await
}

pub async fn get_quiz(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    quiz_id: SafeQuizIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.get_quiz(&req, section_id.0, quiz_id.0).await
}

pub async fn update_quiz(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    quiz_id: SafeQuizIdI64,
    update_data: web::Json<UpdateQuizRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .update_quiz(&req, section_id.0, quiz_id.0, update_data.into_inner())
        .await
}

pub async fn delete_quiz(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    quiz_id: SafeQuizIdI64,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE.delete_quiz(&req, section_id.0, quiz_id.0).await
}

pub async fn reorder_quizzes(
    req: HttpRequest,
    section_id: SafeSectionIdI64,
    reorder_data: web::Json<ReorderRequest>,
) -> ActixResult<HttpResponse> {
    QUIZ_SERVICE
        .reorder_quizzes(&req, section_id.0, reorder_data.into_inner())
        .await
}

// 挂在 /courses/{course_id} 之下
pub fn configure_quiz_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/sections/{section_id}/quizzes")
            .route(web::get().to(list_quizzes))
            .route(web::post().to(create_quiz)),
    )
    .route(
        "/sections/{section_id}/quizzes/reorder",
        web::put().to(reorder_quizzes),
    )
    .service(
        web::resource("/sections/{section_id}/quizzes/{quiz_id}")
            .route(web::get().to(get_quiz))
            .route(web::put().to(update_quiz))
            .route(web::delete().to(delete_quiz)),
    );
}
