pub mod entities;
pub mod responses;

pub use entities::{Content, ContentType, NewContent};
pub use responses::ContentListResponse;
