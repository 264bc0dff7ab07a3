use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程资料类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub enum ContentType {
    Video,
    Pdf,
    #[default]
    Other,
}

impl ContentType {
    pub const VIDEO: &'static str = "video";
    pub const PDF: &'static str = "pdf";
    pub const OTHER: &'static str = "other";
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Video => write!(f, "{}", ContentType::VIDEO),
            ContentType::Pdf => write!(f, "{}", ContentType::PDF),
            ContentType::Other => write!(f, "{}", ContentType::OTHER),
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ContentType::VIDEO => Ok(ContentType::Video),
            ContentType::PDF => Ok(ContentType::Pdf),
            ContentType::OTHER => Ok(ContentType::Other),
            _ => Err(format!(
                "Invalid content type: '{s}'. Expected video, pdf or other"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct Content {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content_type: ContentType,
    // 上传目录下的存储文件名，不对外暴露
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub file_path: String,
    // 上传时的原始文件名
    pub original_name: String,
    // 文件大小（字节）
    pub file_size: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

// 新建课程资料（文件已落盘）
#[derive(Debug, Clone)]
pub struct NewContent {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content_type: ContentType,
    pub file_path: String,
    pub original_name: String,
    pub file_size: i64,
}
