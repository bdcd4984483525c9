//! View state, form selection and user actions

use licklog_common::api::types::LickQuery;
use licklog_common::SortStrategy;

/// Which view is live on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Index,
    Show { lick_id: i64 },
}

/// Current filter/sort selection of the index form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// Artist or tonality name, empty for no filter
    pub filter: String,
    pub sort: SortStrategy,
}

impl Selection {
    pub fn new(filter: impl Into<String>, sort: SortStrategy) -> Self {
        Self {
            filter: filter.into(),
            sort,
        }
    }

    pub fn to_query(&self) -> LickQuery {
        LickQuery::new(self.filter.clone(), self.sort.label())
    }
}

/// An element the page currently reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    ShowLick(i64),
    SubmitSelection,
    Back,
    Edit,
    Delete,
}

/// A user interaction, checked against the page bindings before it runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowLick(i64),
    SubmitSelection(Selection),
    Back,
    Edit,
    Delete,
}

impl Action {
    pub fn binding(&self) -> Binding {
        match self {
            Action::ShowLick(id) => Binding::ShowLick(*id),
            Action::SubmitSelection(_) => Binding::SubmitSelection,
            Action::Back => Binding::Back,
            Action::Edit => Binding::Edit,
            Action::Delete => Binding::Delete,
        }
    }
}
