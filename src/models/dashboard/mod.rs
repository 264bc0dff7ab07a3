pub mod responses;

pub use responses::{CourseSummary, DashboardResponse, InstructorDashboard, StudentDashboard};
