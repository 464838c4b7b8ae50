//! Drill-down panel: one user's posts and a full article viewer.

use super::{Operator, Presenter};
use crate::app::{post_get, post_list_by_user, user_get, PostDto};
use crate::domain::preview;
use crate::error::AppError;

const MSG_PLEASE_SELECT_USER: &str = "Please select a user.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPostRow {
    pub id: i64,
    pub title: String,
    pub preview: String,
    pub created_at: String,
}

impl From<PostDto> for UserPostRow {
    fn from(p: PostDto) -> Self {
        Self {
            id: p.id,
            title: p.title,
            preview: preview(&p.body),
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserPostsPanel {
    pub user_id: i64,
    pub header: String,
    pub rows: Vec<UserPostRow>,
    /// Full text of the chosen article; empty until a row is picked.
    pub full_view: String,
}

impl Presenter {
    /// Open the panel for the user selected in the users tab.
    pub fn view_user_posts(&mut self, op: &mut dyn Operator) {
        if let Err(err) = self.try_view_user_posts() {
            super::report(op, "view_user_posts", err);
        }
    }

    fn try_view_user_posts(&mut self) -> Result<(), AppError> {
        let user_id = self
            .users
            .selected_id()
            .ok_or_else(|| AppError::NoSelection(MSG_PLEASE_SELECT_USER.to_string()))?;
        let listing = post_list_by_user(&self.db, user_id)?;
        self.user_posts = Some(UserPostsPanel {
            user_id,
            header: format!("News posted by {}", listing.author_label),
            rows: listing.posts.into_iter().map(UserPostRow::from).collect(),
            full_view: String::new(),
        });
        Ok(())
    }

    /// Re-read an open panel after a mutation. The panel closes when its user
    /// is gone; the article view is dropped with the old rows.
    pub(crate) fn reload_user_posts(&mut self) -> Result<(), AppError> {
        let Some(user_id) = self.user_posts.as_ref().map(|panel| panel.user_id) else {
            return Ok(());
        };
        match user_get(&self.db, user_id) {
            Ok(_) => {}
            Err(AppError::NotFound(_)) => {
                self.user_posts = None;
                return Ok(());
            }
            Err(err) => return Err(err),
        }
        let listing = post_list_by_user(&self.db, user_id)?;
        if let Some(panel) = self.user_posts.as_mut() {
            panel.header = format!("News posted by {}", listing.author_label);
            panel.rows = listing.posts.into_iter().map(UserPostRow::from).collect();
            panel.full_view.clear();
        }
        Ok(())
    }

    /// Back to browsing. The users tab keeps its list, form and selection.
    pub fn close_user_posts(&mut self) {
        self.user_posts = None;
    }

    pub fn select_user_post(&mut self, op: &mut dyn Operator, row: usize) {
        let Some(id) = self
            .user_posts
            .as_ref()
            .and_then(|panel| panel.rows.get(row))
            .map(|r| r.id)
        else {
            return;
        };
        let post = match post_get(&self.db, id) {
            Ok(post) => post,
            Err(AppError::NotFound(_)) => return,
            Err(err) => return super::report(op, "select_user_post", err),
        };
        if let Some(panel) = self.user_posts.as_mut() {
            panel.full_view = format!(
                "Title: {}\nDate: {}\n\n{}",
                post.title, post.created_at, post.body
            );
        }
    }
}
