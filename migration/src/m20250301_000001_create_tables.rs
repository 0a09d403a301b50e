use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表（教师 / 管理员）
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::Phone).string().null())
                    .col(ColumnDef::new(Users::Bio).text().null())
                    .col(ColumnDef::new(Users::ProfilePicture).string().null())
                    .col(ColumnDef::new(Users::CvPath).string().null())
                    .col(ColumnDef::new(Users::EmailVerifiedAt).big_integer().null())
                    .col(ColumnDef::new(Users::OtpCode).string().null())
                    .col(ColumnDef::new(Users::OtpExpiresAt).big_integer().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Subtitle).string().null())
                    .col(ColumnDef::new(Courses::Description).text().null())
                    .col(ColumnDef::new(Courses::Category).string().null())
                    .col(ColumnDef::new(Courses::Level).string().null())
                    .col(ColumnDef::new(Courses::Language).string().null())
                    .col(
                        ColumnDef::new(Courses::Price)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Courses::ThumbnailUrl).string().null())
                    .col(ColumnDef::new(Courses::LearningOutcomes).text().null())
                    .col(ColumnDef::new(Courses::Requirements).text().null())
                    .col(ColumnDef::new(Courses::Status).string().not_null())
                    .col(ColumnDef::new(Courses::ReviewNote).text().null())
                    .col(ColumnDef::new(Courses::SubmittedAt).big_integer().null())
                    .col(ColumnDef::new(Courses::PublishedAt).big_integer().null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建章节表
        manager
            .create_table(
                Table::create()
                    .table(CourseSections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseSections::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseSections::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseSections::Title).string().not_null())
                    .col(ColumnDef::new(CourseSections::Description).text().null())
                    .col(
                        ColumnDef::new(CourseSections::SortOrder)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseSections::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseSections::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseSections::Table, CourseSections::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建视频库表
        manager
            .create_table(
                Table::create()
                    .table(VideoLibrary::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VideoLibrary::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VideoLibrary::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VideoLibrary::Title).string().not_null())
                    .col(ColumnDef::new(VideoLibrary::Source).string().not_null())
                    .col(
                        ColumnDef::new(VideoLibrary::OriginalName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VideoLibrary::StoredPath).string().null())
                    .col(ColumnDef::new(VideoLibrary::MimeType).string().not_null())
                    .col(
                        ColumnDef::new(VideoLibrary::FileSize)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VideoLibrary::YoutubeVideoId)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(VideoLibrary::DurationSeconds)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(VideoLibrary::Status).string().not_null())
                    .col(ColumnDef::new(VideoLibrary::StatusMessage).text().null())
                    .col(
                        ColumnDef::new(VideoLibrary::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VideoLibrary::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VideoLibrary::Table, VideoLibrary::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课时表
        manager
            .create_table(
                Table::create()
                    .table(CourseLectures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseLectures::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseLectures::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseLectures::SectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseLectures::Title).string().not_null())
                    .col(ColumnDef::new(CourseLectures::Description).text().null())
                    .col(
                        ColumnDef::new(CourseLectures::LectureNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseLectures::ContentType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseLectures::Content).text().null())
                    .col(ColumnDef::new(CourseLectures::VideoId).big_integer().null())
                    .col(ColumnDef::new(CourseLectures::YoutubeUrl).string().null())
                    .col(
                        ColumnDef::new(CourseLectures::YoutubeVideoId)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CourseLectures::DurationSeconds)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CourseLectures::IsPreview)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CourseLectures::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseLectures::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseLectures::Table, CourseLectures::SectionId)
                            .to(CourseSections::Table, CourseSections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseLectures::Table, CourseLectures::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseLectures::Table, CourseLectures::VideoId)
                            .to(VideoLibrary::Table, VideoLibrary::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建测验表
        manager
            .create_table(
                Table::create()
                    .table(CourseQuizzes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseQuizzes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseQuizzes::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseQuizzes::SectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseQuizzes::Title).string().not_null())
                    .col(ColumnDef::new(CourseQuizzes::Description).text().null())
                    .col(
                        ColumnDef::new(CourseQuizzes::QuizNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseQuizzes::PassMark).integer().null())
                    .col(
                        ColumnDef::new(CourseQuizzes::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseQuizzes::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseQuizzes::Table, CourseQuizzes::SectionId)
                            .to(CourseSections::Table, CourseSections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseQuizzes::Table, CourseQuizzes::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建测验题目表
        manager
            .create_table(
                Table::create()
                    .table(QuizQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuizQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QuizQuestions::QuizId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QuizQuestions::Question).text().not_null())
                    .col(ColumnDef::new(QuizQuestions::Options).text().not_null())
                    .col(
                        ColumnDef::new(QuizQuestions::CorrectAnswer)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QuizQuestions::Explanation).text().null())
                    .col(
                        ColumnDef::new(QuizQuestions::SortOrder)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuizQuestions::Table, QuizQuestions::QuizId)
                            .to(CourseQuizzes::Table, CourseQuizzes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建直播课表
        manager
            .create_table(
                Table::create()
                    .table(LiveClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LiveClasses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LiveClasses::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LiveClasses::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LiveClasses::Title).string().not_null())
                    .col(ColumnDef::new(LiveClasses::Description).text().null())
                    .col(
                        ColumnDef::new(LiveClasses::ScheduledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LiveClasses::DurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LiveClasses::MeetingUrl).string().not_null())
                    .col(ColumnDef::new(LiveClasses::Status).string().not_null())
                    .col(
                        ColumnDef::new(LiveClasses::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LiveClasses::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LiveClasses::Table, LiveClasses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(LiveClasses::Table, LiveClasses::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(LiveClasses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuizQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseQuizzes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseLectures::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VideoLibrary::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseSections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    Status,
    Phone,
    Bio,
    ProfilePicture,
    CvPath,
    EmailVerifiedAt,
    OtpCode,
    OtpExpiresAt,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    TeacherId,
    Title,
    Subtitle,
    Description,
    Category,
    Level,
    Language,
    Price,
    ThumbnailUrl,
    LearningOutcomes,
    Requirements,
    Status,
    ReviewNote,
    SubmittedAt,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum CourseSections {
    #[sea_orm(iden = "course_sections")]
    Table,
    Id,
    CourseId,
    Title,
    Description,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum CourseLectures {
    #[sea_orm(iden = "course_lectures")]
    Table,
    Id,
    CourseId,
    SectionId,
    Title,
    Description,
    LectureNumber,
    ContentType,
    Content,
    VideoId,
    YoutubeUrl,
    YoutubeVideoId,
    DurationSeconds,
    IsPreview,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum CourseQuizzes {
    #[sea_orm(iden = "course_quizzes")]
    Table,
    Id,
    CourseId,
    SectionId,
    Title,
    Description,
    QuizNumber,
    PassMark,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum QuizQuestions {
    #[sea_orm(iden = "quiz_questions")]
    Table,
    Id,
    QuizId,
    Question,
    Options,
    CorrectAnswer,
    Explanation,
    SortOrder,
}

#[derive(DeriveIden)]
pub(crate) enum LiveClasses {
    #[sea_orm(iden = "live_classes")]
    Table,
    Id,
    TeacherId,
    CourseId,
    Title,
    Description,
    ScheduledAt,
    DurationMinutes,
    MeetingUrl,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum VideoLibrary {
    #[sea_orm(iden = "video_library")]
    Table,
    Id,
    TeacherId,
    Title,
    Source,
    OriginalName,
    StoredPath,
    MimeType,
    FileSize,
    YoutubeVideoId,
    DurationSeconds,
    Status,
    StatusMessage,
    CreatedAt,
    UpdatedAt,
}
