//! Users tab.

use super::{Operator, Outcome, Presenter};
use crate::app::{
    user_create, user_delete, user_get, user_list, user_names, user_update, UserCreateReq,
    UserDto, UserUpdateReq,
};
use crate::domain::{
    mutations_enabled, view_state, MutationPolicy, Selection, UserForm, ViewState,
};
use crate::error::AppError;

const MSG_SELECT_USER: &str = "Select a user.";

/// A row of the users list. The id is kept for lookups but never displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: String,
    pub contact: String,
}

impl From<UserDto> for UserRow {
    fn from(u: UserDto) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email.unwrap_or_default(),
            age: u.age.map(|a| a.to_string()).unwrap_or_default(),
            contact: u.contact.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct UsersView {
    pub rows: Vec<UserRow>,
    pub form: UserForm,
    selection: Option<Selection<UserForm>>,
}

impl UsersView {
    const POLICY: MutationPolicy = MutationPolicy::RequiresSelection;

    pub fn state(&self) -> ViewState {
        view_state(self.selection.as_ref(), &self.form)
    }

    /// Update and delete are only offered once a row is selected.
    pub fn mutations_enabled(&self) -> bool {
        mutations_enabled(Self::POLICY, self.selection.is_some())
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selection.as_ref().map(|s| s.id)
    }

    fn require_selection(&self, message: &str) -> Result<i64, AppError> {
        self.selected_id()
            .ok_or_else(|| AppError::NoSelection(message.to_string()))
    }
}

impl Presenter {
    /// Load the chosen row from the store, not from the cached row values.
    pub fn select_user(&mut self, op: &mut dyn Operator, row: usize) {
        let Some(id) = self.users.rows.get(row).map(|r| r.id) else {
            return;
        };
        let user = match user_get(&self.db, id) {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => return,
            Err(err) => return super::report(op, "select_user", err),
        };
        let form = UserForm {
            name: user.name,
            email: user.email.unwrap_or_default(),
            age: user.age.map(|a| a.to_string()).unwrap_or_default(),
            contact: user.contact.unwrap_or_default(),
        };
        self.users.selection = Some(Selection {
            id,
            loaded: form.clone(),
        });
        self.users.form = form;
    }

    pub fn clear_user_form(&mut self) {
        self.users.form = UserForm::default();
        self.users.selection = None;
    }

    pub fn add_user(&mut self, op: &mut dyn Operator) {
        let result = self.try_add_user();
        self.finish(op, "add_user", result);
    }

    fn try_add_user(&mut self) -> Result<Outcome, AppError> {
        let fields = self.users.form.validate()?;
        user_create(
            &self.db,
            UserCreateReq {
                name: fields.name,
                email: fields.email,
                age: fields.age,
                contact: fields.contact,
            },
        )?;
        Ok(Outcome::settled("User added.", self.after_user_change()))
    }

    pub fn update_user(&mut self, op: &mut dyn Operator) {
        let result = self.try_update_user();
        self.finish(op, "update_user", result);
    }

    fn try_update_user(&mut self) -> Result<Outcome, AppError> {
        let id = self.users.require_selection(MSG_SELECT_USER)?;
        let fields = self.users.form.validate()?;
        user_update(
            &self.db,
            UserUpdateReq {
                id,
                name: fields.name,
                email: fields.email,
                age: fields.age,
                contact: fields.contact,
            },
        )?;
        Ok(Outcome::settled("User updated.", self.after_user_change()))
    }

    pub fn delete_user(&mut self, op: &mut dyn Operator) {
        let result = self.try_delete_user(op);
        self.finish(op, "delete_user", result);
    }

    fn try_delete_user(&mut self, op: &mut dyn Operator) -> Result<Outcome, AppError> {
        let id = self.users.require_selection(MSG_SELECT_USER)?;
        if !op.confirm("Confirm", "Delete this user?") {
            return Ok(Outcome::Cancelled);
        }
        user_delete(&self.db, id)?;
        Ok(Outcome::settled("User deleted.", self.after_user_change()))
    }

    /// Users feed the posts list (author column, cascade) and the author selector.
    fn after_user_change(&mut self) -> Result<(), AppError> {
        self.clear_user_form();
        self.reload_users()?;
        self.reload_author_choices()?;
        self.reload_posts()?;
        self.reload_user_posts()
    }

    pub(crate) fn reload_users(&mut self) -> Result<(), AppError> {
        let users = user_list(&self.db)?;
        self.users.rows = users.into_iter().map(UserRow::from).collect();
        self.users.selection = None;
        Ok(())
    }

    pub(crate) fn reload_author_choices(&mut self) -> Result<(), AppError> {
        self.posts.author_choices = user_names(&self.db)?;
        Ok(())
    }
}
