//! Presenter: turns operator actions into store calls and keeps the views in sync.
//!
//! Every action runs to completion synchronously. A mutating action is always
//! followed by a full reload of the affected lists, never an in-place patch.

mod posts;
mod user_posts;
mod users;

pub use posts::{PostRow, PostsView};
pub use user_posts::{UserPostRow, UserPostsPanel};
pub use users::{UserRow, UsersView};

use crate::error::AppError;
use crate::infra::Database;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A blocking message for the operator, the equivalent of a message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: &str, message: &str) -> Self {
        Self::new(NoticeKind::Info, title, message)
    }

    pub fn warning(title: &str, message: &str) -> Self {
        Self::new(NoticeKind::Warning, title, message)
    }

    pub fn error(title: &str, message: &str) -> Self {
        Self::new(NoticeKind::Error, title, message)
    }

    fn new(kind: NoticeKind, title: &str, message: &str) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

/// The person at the keyboard: receives notices and answers confirmations.
pub trait Operator {
    fn notify(&mut self, notice: Notice);
    fn confirm(&mut self, title: &str, prompt: &str) -> bool;
}

/// One operator action. Row numbers are positions in the currently shown list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectUser(usize),
    ClearUserForm,
    AddUser,
    UpdateUser,
    DeleteUser,
    ViewUserPosts,
    CloseUserPosts,
    SelectUserPost(usize),
    SelectPost(usize),
    ClearPostForm,
    AddPost,
    UpdatePost,
    DeletePost,
}

/// Result of an action that may stop at a confirmation prompt.
enum Outcome {
    Done(&'static str),
    /// The store accepted the change but re-reading the lists failed.
    SavedNotRefreshed(&'static str, AppError),
    Cancelled,
}

impl Outcome {
    fn settled(message: &'static str, refreshed: Result<(), AppError>) -> Self {
        match refreshed {
            Ok(()) => Outcome::Done(message),
            Err(err) => Outcome::SavedNotRefreshed(message, err),
        }
    }
}

pub struct Presenter {
    db: Database,
    pub users: UsersView,
    pub posts: PostsView,
    /// Drill-down panel, open while `Some`.
    pub user_posts: Option<UserPostsPanel>,
}

impl Presenter {
    /// Build the presenter and perform the initial load of every list.
    pub fn new(db: Database) -> Result<Self, AppError> {
        let mut presenter = Self {
            db,
            users: UsersView::default(),
            posts: PostsView::default(),
            user_posts: None,
        };
        presenter.reload_users()?;
        presenter.reload_posts()?;
        presenter.reload_author_choices()?;
        Ok(presenter)
    }

    pub fn dispatch(&mut self, op: &mut dyn Operator, cmd: Command) {
        log::debug!("dispatch {:?}", cmd);
        match cmd {
            Command::SelectUser(row) => self.select_user(op, row),
            Command::ClearUserForm => self.clear_user_form(),
            Command::AddUser => self.add_user(op),
            Command::UpdateUser => self.update_user(op),
            Command::DeleteUser => self.delete_user(op),
            Command::ViewUserPosts => self.view_user_posts(op),
            Command::CloseUserPosts => self.close_user_posts(),
            Command::SelectUserPost(row) => self.select_user_post(op, row),
            Command::SelectPost(row) => self.select_post(op, row),
            Command::ClearPostForm => self.clear_post_form(),
            Command::AddPost => self.add_post(op),
            Command::UpdatePost => self.update_post(op),
            Command::DeletePost => self.delete_post(op),
        }
    }

    fn finish(&self, op: &mut dyn Operator, action: &str, result: Result<Outcome, AppError>) {
        match result {
            Ok(Outcome::Done(message)) => op.notify(Notice::info("Success", message)),
            Ok(Outcome::SavedNotRefreshed(message, err)) => {
                log::warn!("{} saved, refresh failed: {} ({})", action, err, err.code());
                op.notify(Notice::warning(
                    "Saved",
                    &format!("{} The lists could not be refreshed: {}", message, err),
                ));
            }
            Ok(Outcome::Cancelled) => log::debug!("{} cancelled by operator", action),
            Err(err) => report(op, action, err),
        }
    }
}

/// Surface an error to the operator. Never panics, never retries.
pub(crate) fn report(op: &mut dyn Operator, action: &str, err: AppError) {
    let notice = match &err {
        AppError::Validation(message) => Notice::warning("Input", message),
        AppError::NoSelection(message) => Notice::warning("Select", message),
        AppError::AuthorNotFound(_) => Notice::error("Error", "Author not found."),
        AppError::NotFound(what) => Notice::error("Error", &format!("{} no longer exists.", what)),
        AppError::Db(_) => Notice::error("Database Error", &err.to_string()),
        AppError::Config(_) | AppError::Io(_) => Notice::error("Error", &err.to_string()),
    };
    if err.is_operator_fixable() {
        log::debug!("{} rejected: {} ({})", action, err, err.code());
    } else {
        log::warn!("{} failed: {} ({})", action, err, err.code());
    }
    op.notify(notice);
}
