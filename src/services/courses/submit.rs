use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::entities::CourseStatus;
use crate::models::courses::responses::CourseContentCounts;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

/// 提交审核前的大纲检查，返回失败原因
pub(crate) fn submission_problem(counts: &CourseContentCounts) -> Option<&'static str> {
    if counts.sections == 0 {
        Some("Add at least one section before submitting for review")
    } else if counts.lectures + counts.quizzes == 0 {
        Some("Add at least one lecture or quiz before submitting for review")
    } else {
        None
    }
}

pub async fn submit_course(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let course = match CourseService::course_from_request(request) {
        Ok(course) => course,
        Err(response) => return Ok(response),
    };

    if !course.status.is_submittable() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::CourseStatusConflict,
            format!("A {} course cannot be submitted for review", course.status),
        )));
    }

    let storage = service.get_storage(request);
    let counts = match storage.count_course_content(course.id).await {
        Ok(counts) => counts,
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::CourseSubmitFailed,
                "Failed to check course content",
                e,
            ));
        }
    };

    if let Some(problem) = submission_problem(&counts) {
        return Ok(HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(ErrorCode::CourseSubmitFailed, problem)));
    }

    match storage
        .update_course_status(course.id, CourseStatus::Pending, None)
        .await
    {
        Ok(Some(course)) => {
            tracing::info!("Course {} submitted for review", course.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                course,
                "Course submitted for review",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::CourseSubmitFailed,
            "Failed to submit course",
            e,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_requires_sections_and_content() {
        let empty = CourseContentCounts::default();
        assert!(submission_problem(&empty).unwrap().contains("section"));

        let no_content = CourseContentCounts {
            sections: 2,
            ..Default::default()
        };
        assert!(submission_problem(&no_content).unwrap().contains("lecture"));

        let quiz_only = CourseContentCounts {
            sections: 1,
            lectures: 0,
            quizzes: 1,
        };
        assert_eq!(submission_problem(&quiz_only), None);
    }
}
