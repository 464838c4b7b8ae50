//! Per-tab view state: browsing, selected, editing.

/// Where a tab currently is with respect to its list selection and form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No row chosen.
    Browsing,
    /// A row is chosen and the form still matches the record loaded for it.
    Selected,
    /// A row is chosen and the form has been edited since it was loaded.
    Editing,
}

/// Whether update/delete buttons follow the selection or stay on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationPolicy {
    RequiresSelection,
    AlwaysEnabled,
}

/// A chosen row: its record id and the form content loaded from the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<F> {
    pub id: i64,
    pub loaded: F,
}

pub fn view_state<F: PartialEq>(selection: Option<&Selection<F>>, form: &F) -> ViewState {
    match selection {
        None => ViewState::Browsing,
        Some(sel) if sel.loaded == *form => ViewState::Selected,
        Some(_) => ViewState::Editing,
    }
}

pub fn mutations_enabled(policy: MutationPolicy, has_selection: bool) -> bool {
    match policy {
        MutationPolicy::AlwaysEnabled => true,
        MutationPolicy::RequiresSelection => has_selection,
    }
}
