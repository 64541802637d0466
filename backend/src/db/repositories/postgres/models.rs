use diesel::prelude::*;

use super::schema::posts;
use crate::api::PostId;
use crate::models::Post;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostRow {
    pub post_id: i64,
    pub title: String,
    pub content: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post::with_id(PostId(row.post_id), row.title, row.content)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPostRow<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub struct PostChangeset<'a> {
    pub title: &'a str,
    pub content: &'a str,
}
