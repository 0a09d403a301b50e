use super::SeaOrmStorage;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::lectures::{entities::LectureContentType, requests::LectureRecord};
use crate::models::quizzes::requests::{
    CreateQuizRequest, QuizChanges, QuizQuestionInput, to_new_questions,
};
use crate::models::sections::requests::CreateSectionRequest;
use crate::models::users::{
    entities::{UserRole, UserStatus},
    requests::CreateUserRequest,
};
use crate::models::videos::{
    entities::{VideoSource, VideoStatus},
    requests::NewVideo,
};
use crate::storage::Storage;

async fn setup() -> (SeaOrmStorage, i64, i64) {
    let storage = SeaOrmStorage::new_in_memory().await.unwrap();
    let teacher = storage
        .create_user(CreateUserRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Teacher,
            status: UserStatus::Active,
            phone: None,
            bio: None,
            profile_picture: None,
            cv_path: Some("cv/ada.pdf".to_string()),
            email_verified: true,
        })
        .await
        .unwrap();
    let course = storage
        .create_course(
            teacher.id,
            CreateCourseRequest {
                title: "Rust from scratch".to_string(),
                category: Some("programming".to_string()),
            },
        )
        .await
        .unwrap();
    (storage, teacher.id, course.id)
}

async fn add_section(storage: &SeaOrmStorage, course_id: i64, title: &str) -> i64 {
    storage
        .create_section(
            course_id,
            CreateSectionRequest {
                title: title.to_string(),
                description: None,
            },
        )
        .await
        .unwrap()
        .id
}

fn text_lecture(title: &str) -> LectureRecord {
    LectureRecord {
        title: title.to_string(),
        description: None,
        content_type: LectureContentType::Text,
        content: Some("body".to_string()),
        video_id: None,
        youtube_url: None,
        youtube_video_id: None,
        duration_seconds: None,
        is_preview: false,
    }
}

fn question(answer: &str) -> QuizQuestionInput {
    QuizQuestionInput {
        question: "Which keyword declares a binding?".to_string(),
        options: vec!["let".into(), "var".into(), "def".into(), "dim".into()],
        correct_answer: answer.to_string(),
        explanation: None,
    }
}

#[tokio::test]
async fn test_lectures_numbered_in_creation_order() {
    let (storage, _, course_id) = setup().await;
    let section_id = add_section(&storage, course_id, "Basics").await;

    for title in ["one", "two", "three", "four"] {
        storage
            .create_lecture(course_id, section_id, text_lecture(title))
            .await
            .unwrap();
    }

    let lectures = storage.list_lectures(section_id).await.unwrap();
    let numbers: Vec<i32> = lectures.iter().map(|l| l.lecture_number).collect();
    let titles: Vec<&str> = lectures.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
    assert_eq!(titles, vec!["one", "two", "three", "four"]);
}

#[tokio::test]
async fn test_delete_lecture_renumbers_remaining() {
    let (storage, _, course_id) = setup().await;
    let section_id = add_section(&storage, course_id, "Basics").await;

    let mut ids = Vec::new();
    for title in ["one", "two", "three", "four"] {
        let lecture = storage
            .create_lecture(course_id, section_id, text_lecture(title))
            .await
            .unwrap();
        ids.push(lecture.id);
    }

    assert!(storage.delete_lecture(ids[1]).await.unwrap());

    let lectures = storage.list_lectures(section_id).await.unwrap();
    let numbers: Vec<i32> = lectures.iter().map(|l| l.lecture_number).collect();
    let titles: Vec<&str> = lectures.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(titles, vec!["one", "three", "four"]);

    // 删除后新增的课时接在末尾
    let appended = storage
        .create_lecture(course_id, section_id, text_lecture("five"))
        .await
        .unwrap();
    assert_eq!(appended.lecture_number, 4);
}

#[tokio::test]
async fn test_reorder_lectures() {
    let (storage, _, course_id) = setup().await;
    let section_id = add_section(&storage, course_id, "Basics").await;

    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
        ids.push(
            storage
                .create_lecture(course_id, section_id, text_lecture(title))
                .await
                .unwrap()
                .id,
        );
    }

    let reordered = storage
        .reorder_lectures(section_id, &[ids[2], ids[0], ids[1]])
        .await
        .unwrap();
    let titles: Vec<&str> = reordered.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["c", "a", "b"]);
    assert_eq!(
        reordered.iter().map(|l| l.lecture_number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[tokio::test]
async fn test_delete_section_cascades_and_renumbers() {
    let (storage, _, course_id) = setup().await;
    let first = add_section(&storage, course_id, "First").await;
    let second = add_section(&storage, course_id, "Second").await;
    let third = add_section(&storage, course_id, "Third").await;

    let lecture = storage
        .create_lecture(course_id, second, text_lecture("inside"))
        .await
        .unwrap();

    assert!(storage.delete_section(second).await.unwrap());

    assert!(storage.get_lecture_by_id(lecture.id).await.unwrap().is_none());
    let sections = storage.list_sections(course_id).await.unwrap();
    let pairs: Vec<(i64, i32)> = sections.iter().map(|s| (s.id, s.sort_order)).collect();
    assert_eq!(pairs, vec![(first, 1), (third, 2)]);
}

#[tokio::test]
async fn test_content_counts_gate_submission() {
    let (storage, _, course_id) = setup().await;

    let counts = storage.count_course_content(course_id).await.unwrap();
    assert!(!counts.is_submittable());

    let section_id = add_section(&storage, course_id, "Only section").await;
    let counts = storage.count_course_content(course_id).await.unwrap();
    assert_eq!(counts.sections, 1);
    assert!(!counts.is_submittable());

    let questions = to_new_questions(&[question("a")]);
    storage
        .create_quiz(
            course_id,
            section_id,
            CreateQuizRequest {
                title: "Check".to_string(),
                description: None,
                pass_mark: None,
                questions: vec![question("a")],
            },
            questions,
        )
        .await
        .unwrap();
    let counts = storage.count_course_content(course_id).await.unwrap();
    assert!(counts.is_submittable());
}

#[tokio::test]
async fn test_quiz_answers_stored_as_indexes() {
    let (storage, _, course_id) = setup().await;
    let section_id = add_section(&storage, course_id, "Quizzes").await;

    let inputs = vec![question("A"), question("b"), question("C"), question("d")];
    let quiz = storage
        .create_quiz(
            course_id,
            section_id,
            CreateQuizRequest {
                title: "Mapping".to_string(),
                description: None,
                pass_mark: Some(50),
                questions: inputs.clone(),
            },
            to_new_questions(&inputs),
        )
        .await
        .unwrap();

    let answers: Vec<(i32, String)> = quiz
        .questions
        .iter()
        .map(|q| (q.correct_answer, q.correct_answer_letter.clone()))
        .collect();
    assert_eq!(
        answers,
        vec![
            (0, "A".to_string()),
            (1, "B".to_string()),
            (2, "C".to_string()),
            (3, "D".to_string())
        ]
    );

    // 更新时替换题目，映射规则相同
    let updated = storage
        .update_quiz(
            quiz.quiz.id,
            QuizChanges {
                questions: Some(to_new_questions(&[question("d")])),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.questions.len(), 1);
    assert_eq!(updated.questions[0].correct_answer, 3);
    assert_eq!(updated.quiz.pass_mark, Some(50));
}

#[tokio::test]
async fn test_quiz_delete_renumbers() {
    let (storage, _, course_id) = setup().await;
    let section_id = add_section(&storage, course_id, "Quizzes").await;

    let mut ids = Vec::new();
    for title in ["q1", "q2", "q3"] {
        let quiz = storage
            .create_quiz(
                course_id,
                section_id,
                CreateQuizRequest {
                    title: title.to_string(),
                    description: None,
                    pass_mark: None,
                    questions: vec![],
                },
                vec![],
            )
            .await
            .unwrap();
        ids.push(quiz.quiz.id);
    }

    assert!(storage.delete_quiz(ids[0]).await.unwrap());
    let quizzes = storage.list_quizzes(section_id).await.unwrap();
    let numbers: Vec<(String, i32)> = quizzes
        .iter()
        .map(|q| (q.quiz.title.clone(), q.quiz.quiz_number))
        .collect();
    assert_eq!(numbers, vec![("q2".to_string(), 1), ("q3".to_string(), 2)]);
}

#[tokio::test]
async fn test_video_reference_count() {
    let (storage, teacher_id, course_id) = setup().await;
    let section_id = add_section(&storage, course_id, "Videos").await;

    let video = storage
        .create_video(NewVideo {
            teacher_id,
            title: "Welcome".to_string(),
            source: VideoSource::Upload,
            original_name: "welcome.mp4".to_string(),
            stored_path: Some("videos/welcome.mp4".to_string()),
            mime_type: "video/mp4".to_string(),
            file_size: 1024,
            duration_seconds: Some(3723),
            status: VideoStatus::Completed,
        })
        .await
        .unwrap();
    assert_eq!(video.duration.as_deref(), Some("1:02:03"));

    let mut record = text_lecture("Watch");
    record.content_type = LectureContentType::Video;
    record.video_id = Some(video.id);
    storage
        .create_lecture(course_id, section_id, record)
        .await
        .unwrap();

    assert_eq!(storage.count_lectures_by_video(video.id).await.unwrap(), 1);
    assert_eq!(storage.count_videos(teacher_id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_otp_lifecycle() {
    let (storage, teacher_id, _) = setup().await;

    assert!(storage.set_user_otp(teacher_id, "123456", 42).await.unwrap());
    let otp = storage.get_user_otp(teacher_id).await.unwrap().unwrap();
    assert_eq!(otp.code.as_deref(), Some("123456"));
    assert_eq!(otp.expires_at, Some(42));

    let user = storage.mark_email_verified(teacher_id).await.unwrap().unwrap();
    assert!(user.is_verified());
    let otp = storage.get_user_otp(teacher_id).await.unwrap().unwrap();
    assert!(otp.code.is_none());
    assert!(otp.expires_at.is_none());
}

#[tokio::test]
async fn test_email_lookup_is_case_insensitive() {
    let (storage, teacher_id, _) = setup().await;
    let found = storage
        .get_user_by_email("ADA@Example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, teacher_id);
}
