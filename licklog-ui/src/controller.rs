//! View controller
//!
//! Two states, [`ViewState::Index`] and [`ViewState::Show`]. Entering one
//! clears the other's regions and bindings, so an action aimed at content
//! that is no longer on the page fails with [`ControllerError::StaleAction`].
//!
//! Fetch failures are rendered into the affected region and returned to the
//! caller; nothing is retried.

use std::future::Future;
use std::sync::Arc;

use licklog_common::api::types::{DeleteOutcome, IndexOptions};
use licklog_common::catalog::present_groups;
use licklog_common::db::Note;
use licklog_common::{SortStrategy, SortedLicks};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::{ClientError, LickClient};
use crate::detail;
use crate::page::{Page, Region};
use crate::render;
use crate::state::{Action, Binding, Selection, ViewState};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this lick?";
pub const DELETED_MESSAGE: &str = "Lick deleted.";
pub const ALREADY_DELETED_MESSAGE: &str = "Lick was already deleted.";

/// Controller errors
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The action's element is not on the current page
    #[error("Action {0:?} is not bound in the current view")]
    StaleAction(Binding),

    /// A fetch failed; its region shows the error
    #[error(transparent)]
    Fetch(#[from] ClientError),

    /// Response shape does not match the requested sort
    #[error("Unexpected response shape for sort {0}")]
    UnexpectedShape(SortStrategy),
}

pub type Result<T> = std::result::Result<T, ControllerError>;

/// Blocking yes/no prompt shown before a delete
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What an action led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The page has been updated
    Rendered,
    /// Detail view is rendered; its notes still have to be fetched
    NotesPending(NotesRequest),
    /// Leave the page for this location (edit form)
    Navigate(String),
    /// Confirmation declined, nothing happened
    Cancelled,
}

/// Notes fetch issued by entering the detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotesRequest {
    pub user_id: i64,
    pub lick_id: i64,
    generation: u64,
}

/// Completed notes fetch, handed back to [`ViewController::receive_notes`]
#[derive(Debug)]
pub struct NotesResponse {
    pub request: NotesRequest,
    pub result: std::result::Result<Vec<Note>, ClientError>,
}

pub struct ViewController<C> {
    client: Arc<C>,
    user_id: i64,
    confirm: Box<dyn Confirm>,
    state: ViewState,
    selection: Selection,
    /// Bumped on every view switch; notes for an older generation are dropped
    generation: u64,
    page: Page,
}

impl<C> ViewController<C>
where
    C: LickClient + 'static,
{
    pub fn new(client: Arc<C>, user_id: i64, confirm: impl Confirm + 'static) -> Self {
        Self {
            client,
            user_id,
            confirm: Box::new(confirm),
            state: ViewState::Index,
            selection: Selection::default(),
            generation: 0,
            page: Page::new(),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Run a user action if its element is bound on the current page
    pub async fn activate(&mut self, action: Action) -> Result<Outcome> {
        let binding = action.binding();
        if !self.page.is_bound(binding) {
            warn!(?binding, "Ignoring action on stale element");
            return Err(ControllerError::StaleAction(binding));
        }

        match action {
            Action::ShowLick(lick_id) => self.show_lick(lick_id).await,
            Action::SubmitSelection(selection) => self.submit_selection(selection).await,
            Action::Back => self.back().await,
            Action::Edit => Ok(self.edit()),
            Action::Delete => self.delete().await,
        }
    }

    /// Enter the index view and render it for the current selection
    pub async fn load_index(&mut self) -> Result<Outcome> {
        self.enter(ViewState::Index);
        self.page.set(Region::Header, render::header(render::INDEX_HEADER));

        // Without options the form still offers every sort and the unfiltered entry
        let form = match self.client.fetch_index_options(self.user_id).await {
            Ok(options) => render::selection_form(&options, &self.selection),
            Err(e) => {
                warn!(user_id = self.user_id, "Failed to fetch index options: {}", e);
                let fallback = IndexOptions {
                    sorts: SortStrategy::labels(),
                    ..IndexOptions::default()
                };
                let mut html = render::error_message(&e.to_string());
                html.push_str(&render::selection_form(&fallback, &self.selection));
                html
            }
        };
        self.page.set(Region::Options, form);
        self.page.bind(Binding::SubmitSelection);

        let query = self.selection.to_query();
        let sorted = match self.client.fetch_licks(self.user_id, &query).await {
            Ok(sorted) => sorted,
            Err(e) => {
                warn!(user_id = self.user_id, "Failed to fetch licks: {}", e);
                self.page.set(Region::Licks, render::error_message(&e.to_string()));
                return Err(e.into());
            }
        };

        self.render_licks(sorted)?;
        Ok(Outcome::Rendered)
    }

    /// Store a new form selection and re-run the index
    pub async fn submit_selection(&mut self, selection: Selection) -> Result<Outcome> {
        debug!(filter = %selection.filter, sort = %selection.sort, "Selection submitted");
        self.selection = selection;
        self.load_index().await
    }

    /// Back to the index with a fresh, unfiltered and unsorted form
    pub async fn back(&mut self) -> Result<Outcome> {
        self.selection = Selection::default();
        self.load_index().await
    }

    /// Enter the detail view of one lick
    ///
    /// The returned [`NotesRequest`] is fetched independently via
    /// [`ViewController::notes_task`].
    pub async fn show_lick(&mut self, lick_id: i64) -> Result<Outcome> {
        self.enter(ViewState::Show { lick_id });
        self.page.bind(Binding::Back);

        let lick = match self.client.fetch_lick(self.user_id, lick_id).await {
            Ok(lick) => lick,
            Err(e) => {
                warn!(user_id = self.user_id, lick_id, "Failed to fetch lick: {}", e);
                self.page.set(Region::Header, render::header(render::INDEX_HEADER));
                self.page.set(Region::Detail, render::error_message(&e.to_string()));
                return Err(e.into());
            }
        };

        self.page.set(Region::Header, render::header(&lick.name));
        self.page.set(Region::Detail, detail::assemble(&lick).to_html());
        self.page.bind(Binding::Edit);
        self.page.bind(Binding::Delete);

        Ok(Outcome::NotesPending(NotesRequest {
            user_id: self.user_id,
            lick_id,
            generation: self.generation,
        }))
    }

    /// Future fetching the notes for `request`, independent of the controller
    pub fn notes_task(
        &self,
        request: NotesRequest,
    ) -> impl Future<Output = NotesResponse> + Send + 'static {
        let client = Arc::clone(&self.client);
        async move {
            let result = client.fetch_notes(request.user_id).await;
            NotesResponse { request, result }
        }
    }

    /// Render notes if their detail view is still live
    ///
    /// Returns false when the response was discarded as stale.
    pub fn receive_notes(&mut self, response: NotesResponse) -> bool {
        let NotesResponse { request, result } = response;
        let live = request.generation == self.generation
            && self.state == ViewState::Show { lick_id: request.lick_id };
        if !live {
            debug!(lick_id = request.lick_id, "Discarding notes for a view that is gone");
            return false;
        }

        match result {
            Ok(notes) => self.page.set(Region::Notes, detail::notes_list(&notes)),
            Err(e) => {
                warn!(user_id = request.user_id, "Failed to fetch notes: {}", e);
                self.page.set(Region::Notes, render::error_message(&e.to_string()));
            }
        }
        true
    }

    /// Delete the shown lick after confirmation
    ///
    /// The detail view stays up; the options region reports the result and
    /// the delete button is unbound.
    pub async fn delete(&mut self) -> Result<Outcome> {
        let ViewState::Show { lick_id } = self.state else {
            return Err(ControllerError::StaleAction(Binding::Delete));
        };

        if !self.confirm.confirm(DELETE_PROMPT) {
            debug!(lick_id, "Delete cancelled");
            return Ok(Outcome::Cancelled);
        }

        match self.client.delete_lick(self.user_id, lick_id).await {
            Ok(outcome) => {
                let message = match outcome {
                    DeleteOutcome::Deleted => DELETED_MESSAGE,
                    DeleteOutcome::NotFound => ALREADY_DELETED_MESSAGE,
                };
                info!(user_id = self.user_id, lick_id, ?outcome, "Delete finished");
                self.page.set(Region::Options, render::status_message(message));
                self.page.unbind(Binding::Delete);
                self.page.unbind(Binding::Edit);
                Ok(Outcome::Rendered)
            }
            Err(e) => {
                warn!(user_id = self.user_id, lick_id, "Failed to delete lick: {}", e);
                self.page.set(Region::Options, render::error_message(&e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Edit form location for the shown lick
    pub fn edit(&self) -> Outcome {
        match self.state {
            ViewState::Show { lick_id } => {
                Outcome::Navigate(format!("/users/{}/licks/{}/edit", self.user_id, lick_id))
            }
            ViewState::Index => Outcome::Rendered,
        }
    }

    /// Switch state, clearing everything the previous view rendered or bound
    fn enter(&mut self, state: ViewState) {
        self.generation += 1;
        self.state = state;
        self.page.clear_bindings();

        for region in [Region::Options, Region::Licks, Region::Detail, Region::Notes] {
            self.page.clear(region);
        }
    }

    /// Dispatch to flat, date or grouped rendering by the selected sort
    fn render_licks(&mut self, sorted: SortedLicks) -> Result<()> {
        let sort = self.selection.sort;
        let (html, ids): (String, Vec<i64>) = match (sort, sorted) {
            (SortStrategy::None, SortedLicks::Flat(licks)) => {
                (render::flat_list(&licks), licks.iter().map(|l| l.id).collect())
            }
            (strategy, SortedLicks::Flat(licks)) if strategy.is_date() => (
                render::dated_list(&licks, strategy),
                licks.iter().map(|l| l.id).collect(),
            ),
            (strategy, SortedLicks::Grouped(groups)) if strategy.is_grouping() => {
                let groups = present_groups(groups, &self.selection.filter);
                let ids = groups.values().flatten().map(|l| l.id).collect();
                (render::grouped_list(&groups), ids)
            }
            (strategy, _) => {
                warn!(sort = %strategy, "Response shape does not match sort");
                self.page.set(
                    Region::Licks,
                    render::error_message("Unexpected response from the server"),
                );
                return Err(ControllerError::UnexpectedShape(strategy));
            }
        };

        self.page.set(Region::Licks, html);
        for id in ids {
            self.page.bind(Binding::ShowLick(id));
        }
        Ok(())
    }
}
