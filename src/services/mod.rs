pub mod access;
pub mod attempts;
pub mod auth;
pub mod contents;
pub mod courses;
pub mod dashboard;
pub mod enrollments;
pub mod quizzes;

pub use attempts::AttemptService;
pub use auth::AuthService;
pub use contents::ContentService;
pub use courses::CourseService;
pub use dashboard::DashboardService;
pub use enrollments::EnrollmentService;
pub use quizzes::QuizService;
