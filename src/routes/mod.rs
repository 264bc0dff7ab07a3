pub mod auth;

pub mod courses;

pub mod contents;

pub mod quizzes;

pub mod attempts;

pub mod dashboard;

pub mod frontend;

pub use attempts::configure_attempts_routes;
pub use auth::configure_auth_routes;
pub use contents::configure_contents_routes;
pub use courses::configure_courses_routes;
pub use dashboard::configure_dashboard_routes;
pub use frontend::configure_frontend_routes;
pub use quizzes::configure_quizzes_routes;
