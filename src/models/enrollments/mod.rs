pub mod entities;
pub mod responses;

pub use entities::{Enrollment, EnrollmentWithCourse};
pub use responses::EnrollResponse;
