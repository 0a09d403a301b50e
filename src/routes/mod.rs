pub mod admin;

pub mod auth;

pub mod courses;

pub mod dashboard;

pub mod lectures;

pub mod live_classes;

pub mod quizzes;

pub mod sections;

pub mod videos;

pub use admin::configure_admin_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_courses_routes;
pub use dashboard::configure_dashboard_routes;
pub use live_classes::configure_live_class_routes;
pub use videos::configure_video_routes;
