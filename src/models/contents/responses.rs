use super::entities::Content;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct ContentListResponse {
    pub items: Vec<Content>,
}
