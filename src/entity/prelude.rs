//! 预导入模块，方便使用

pub use super::course_lectures::{
    ActiveModel as LectureActiveModel, Entity as CourseLectures, Model as LectureModel,
};
pub use super::course_quizzes::{
    ActiveModel as QuizActiveModel, Entity as CourseQuizzes, Model as QuizModel,
};
pub use super::course_sections::{
    ActiveModel as SectionActiveModel, Entity as CourseSections, Model as SectionModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::live_classes::{
    ActiveModel as LiveClassActiveModel, Entity as LiveClasses, Model as LiveClassModel,
};
pub use super::quiz_questions::{
    ActiveModel as QuizQuestionActiveModel, Entity as QuizQuestions, Model as QuizQuestionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
pub use super::video_library::{
    ActiveModel as VideoActiveModel, Entity as VideoLibrary, Model as VideoModel,
};
