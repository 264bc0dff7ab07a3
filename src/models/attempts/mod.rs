pub mod entities;
pub mod responses;

pub use entities::{Attempt, AttemptAnswer, AttemptSummary, NewAttempt, NewAttemptAnswer};
pub use responses::{
    AttemptListResponse, AttemptResultResponse, QuestionResult, SubmitAttemptResponse,
};
