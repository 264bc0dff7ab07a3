//! 课程资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub content_type: String,
    pub file_path: String,
    pub original_name: String,
    pub file_size: i64,
    pub uploaded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_content(self) -> crate::models::contents::entities::Content {
        use crate::models::contents::entities::{Content, ContentType};
        use chrono::{DateTime, Utc};

        Content {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            content_type: self.content_type.parse::<ContentType>().unwrap_or_default(),
            file_path: self.file_path,
            original_name: self.original_name,
            file_size: self.file_size,
            uploaded_at: DateTime::<Utc>::from_timestamp(self.uploaded_at, 0).unwrap_or_default(),
        }
    }
}
