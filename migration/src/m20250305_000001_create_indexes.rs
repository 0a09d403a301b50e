use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_tables::{
    CourseLectures, CourseQuizzes, CourseSections, Courses, LiveClasses, QuizQuestions,
    VideoLibrary,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_teacher_id")
                    .table(Courses::Table)
                    .col(Courses::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_status")
                    .table(Courses::Table)
                    .col(Courses::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_sections_course_id")
                    .table(CourseSections::Table)
                    .col(CourseSections::CourseId)
                    .col(CourseSections::SortOrder)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_lectures_section_id")
                    .table(CourseLectures::Table)
                    .col(CourseLectures::SectionId)
                    .col(CourseLectures::LectureNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_lectures_video_id")
                    .table(CourseLectures::Table)
                    .col(CourseLectures::VideoId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_quizzes_section_id")
                    .table(CourseQuizzes::Table)
                    .col(CourseQuizzes::SectionId)
                    .col(CourseQuizzes::QuizNumber)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_quiz_questions_quiz_id")
                    .table(QuizQuestions::Table)
                    .col(QuizQuestions::QuizId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_live_classes_teacher_scheduled")
                    .table(LiveClasses::Table)
                    .col(LiveClasses::TeacherId)
                    .col(LiveClasses::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_video_library_teacher_id")
                    .table(VideoLibrary::Table)
                    .col(VideoLibrary::TeacherId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_video_library_teacher_id")
                    .table(VideoLibrary::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_live_classes_teacher_scheduled")
                    .table(LiveClasses::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_quiz_questions_quiz_id")
                    .table(QuizQuestions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_quizzes_section_id")
                    .table(CourseQuizzes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_lectures_video_id")
                    .table(CourseLectures::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_lectures_section_id")
                    .table(CourseLectures::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_sections_course_id")
                    .table(CourseSections::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_status")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_courses_teacher_id")
                    .table(Courses::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}
