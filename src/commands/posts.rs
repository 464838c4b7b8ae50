//! News tab: list with previews, full preview panel, form.

use super::{Operator, Outcome, Presenter};
use crate::app::{
    post_create, post_delete, post_get_with_author, post_list_with_author_names, post_update,
    PostCreateReq, PostUpdateReq, PostWithAuthorDto,
};
use crate::domain::{
    mutations_enabled, preview, view_state, MutationPolicy, PostForm, Selection, ViewState,
};
use crate::error::AppError;

const MSG_SELECT_NEWS: &str = "Select news.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub preview: String,
    pub created_at: String,
    pub author: String,
}

impl From<PostWithAuthorDto> for PostRow {
    fn from(p: PostWithAuthorDto) -> Self {
        let author = p.author_label().to_string();
        Self {
            id: p.post.id,
            title: p.post.title,
            preview: preview(&p.post.body),
            created_at: p.post.created_at,
            author,
        }
    }
}

#[derive(Debug, Default)]
pub struct PostsView {
    pub rows: Vec<PostRow>,
    pub form: PostForm,
    /// Display names offered by the author selector.
    pub author_choices: Vec<String>,
    /// Full text of the selected post.
    pub full_preview: String,
    selection: Option<Selection<PostForm>>,
}

impl PostsView {
    // Unlike the users tab, update/delete stay clickable without a selection.
    const POLICY: MutationPolicy = MutationPolicy::AlwaysEnabled;

    pub fn state(&self) -> ViewState {
        view_state(self.selection.as_ref(), &self.form)
    }

    pub fn mutations_enabled(&self) -> bool {
        mutations_enabled(Self::POLICY, self.selection.is_some())
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selection.as_ref().map(|s| s.id)
    }

    fn require_selection(&self) -> Result<i64, AppError> {
        self.selected_id()
            .ok_or_else(|| AppError::NoSelection(MSG_SELECT_NEWS.to_string()))
    }
}

fn render_full_preview(p: &PostWithAuthorDto) -> String {
    format!(
        "Author :{}\nTitle: {}\nCreated At: {}\n\n{}",
        p.author_label(),
        p.post.title,
        p.post.created_at,
        p.post.body
    )
}

impl Presenter {
    /// Show the full post and copy it into the form for editing.
    pub fn select_post(&mut self, op: &mut dyn Operator, row: usize) {
        let Some(id) = self.posts.rows.get(row).map(|r| r.id) else {
            return;
        };
        let post = match post_get_with_author(&self.db, id) {
            Ok(post) => post,
            Err(AppError::NotFound(_)) => return,
            Err(err) => return super::report(op, "select_post", err),
        };
        self.posts.full_preview = render_full_preview(&post);
        let form = PostForm {
            title: post.post.title,
            // An orphaned post leaves the selector empty rather than naming "Unknown".
            author: post.author_name.unwrap_or_default(),
            body: post.post.body,
        };
        self.posts.selection = Some(Selection {
            id,
            loaded: form.clone(),
        });
        self.posts.form = form;
    }

    /// Empties the form only; the list selection is kept.
    pub fn clear_post_form(&mut self) {
        self.posts.form = PostForm::default();
    }

    pub fn add_post(&mut self, op: &mut dyn Operator) {
        let result = self.try_add_post();
        self.finish(op, "add_post", result);
    }

    fn try_add_post(&mut self) -> Result<Outcome, AppError> {
        let fields = self.posts.form.validate()?;
        post_create(
            &self.db,
            PostCreateReq {
                title: fields.title,
                body: fields.body,
                author: fields.author,
                created_at: None,
            },
        )?;
        Ok(Outcome::settled("News added.", self.after_post_change()))
    }

    pub fn update_post(&mut self, op: &mut dyn Operator) {
        let result = self.try_update_post();
        self.finish(op, "update_post", result);
    }

    fn try_update_post(&mut self) -> Result<Outcome, AppError> {
        let id = self.posts.require_selection()?;
        let fields = self.posts.form.validate()?;
        post_update(
            &self.db,
            PostUpdateReq {
                id,
                title: fields.title,
                body: fields.body,
                author: fields.author,
            },
        )?;
        Ok(Outcome::settled("News updated.", self.after_post_change()))
    }

    pub fn delete_post(&mut self, op: &mut dyn Operator) {
        let result = self.try_delete_post(op);
        self.finish(op, "delete_post", result);
    }

    fn try_delete_post(&mut self, op: &mut dyn Operator) -> Result<Outcome, AppError> {
        let id = self.posts.require_selection()?;
        if !op.confirm("Confirm", "Delete this news?") {
            return Ok(Outcome::Cancelled);
        }
        post_delete(&self.db, id)?;
        Ok(Outcome::settled("News deleted.", self.after_post_change()))
    }

    fn after_post_change(&mut self) -> Result<(), AppError> {
        self.clear_post_form();
        self.reload_posts()?;
        self.reload_user_posts()
    }

    /// Redraw the whole list. The selection and preview go with the old rows.
    pub(crate) fn reload_posts(&mut self) -> Result<(), AppError> {
        let posts = post_list_with_author_names(&self.db)?;
        self.posts.rows = posts.into_iter().map(PostRow::from).collect();
        self.posts.selection = None;
        self.posts.full_preview.clear();
        Ok(())
    }
}
