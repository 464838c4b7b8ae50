//! Domain rules: form validation, previews, per-tab view state.

pub mod form;
pub mod selection;
pub mod text;

pub use form::{PostFields, PostForm, UserFields, UserForm};
pub use selection::{mutations_enabled, view_state, MutationPolicy, Selection, ViewState};
pub use text::{preview, ELLIPSIS, PREVIEW_CHARS};
