//! licklog-ui - client side of the lick catalog
//!
//! A [`ViewController`] keeps exactly one of two views live on a [`Page`]:
//! the index (filter/sort form plus lick list) or the detail view of one
//! lick. Data comes from a [`LickClient`]; [`HttpLickClient`] talks to
//! licklog-api.

pub mod client;
pub mod controller;
pub mod detail;
pub mod page;
pub mod render;
pub mod state;

pub use client::{ClientError, HttpLickClient, LickClient};
pub use controller::{Confirm, ControllerError, NotesRequest, NotesResponse, Outcome, ViewController};
pub use page::{Page, Region};
pub use state::{Action, Binding, Selection, ViewState};
