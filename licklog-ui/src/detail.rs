//! Lick detail assembler
//!
//! Builds the detail view of one lick in a fixed section order: basic info,
//! tonalities, backing tracks, action buttons. Notes are rendered
//! separately once their own request completes.

use licklog_common::db::{Lick, Note};
use licklog_common::time::format_practice_date;

use crate::render::escape_html;

pub const NO_DETAILS: &str = "There isn't any information available for this lick, yet!";
pub const NO_TONALITIES: &str = "This lick doesn't currently have any tonalities";
pub const NO_BACKING_TRACKS: &str = "This lick doesn't currently have any backing tracks";
pub const NO_NOTES: &str = "There aren't any notes yet";

/// Rendered sections of the detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub basic_info: String,
    pub tonalities: String,
    pub backing_tracks: String,
    pub actions: String,
}

impl DetailView {
    /// Sections in render order
    pub fn sections(&self) -> [&str; 4] {
        [
            self.basic_info.as_str(),
            self.tonalities.as_str(),
            self.backing_tracks.as_str(),
            self.actions.as_str(),
        ]
    }

    pub fn to_html(&self) -> String {
        self.sections().concat()
    }
}

pub fn assemble(lick: &Lick) -> DetailView {
    DetailView {
        basic_info: basic_info(lick),
        tonalities: tonalities(lick),
        backing_tracks: backing_tracks(lick),
        actions: actions(),
    }
}

fn basic_info(lick: &Lick) -> String {
    let name = escape_html(&lick.name);
    if lick.lacks_details() {
        return format!(
            r#"<section class="basic-info"><dl><dt>Name</dt><dd>{name}</dd></dl><p>{NO_DETAILS}</p></section>"#
        );
    }

    let mut rows: Vec<(&str, String)> = vec![("Name", name)];
    if let Some(artist) = lick.artist_name() {
        rows.push(("Artist", escape_html(artist)));
    }
    if let Some(key) = &lick.current_key {
        rows.push(("Key", escape_html(key)));
    }
    if let Some(bpm) = lick.bpm {
        rows.push(("BPM", bpm.to_string()));
    }
    if let Some(description) = &lick.description {
        rows.push(("Description", escape_html(description)));
    }
    if let Some(rating) = lick.performance_rating {
        rows.push(("Performance Rating", format!("{rating}/5")));
    }
    if let Some(date) = &lick.last_practiced {
        rows.push(("Last Practiced", format_practice_date(date)));
    }
    if let Some(date) = &lick.scheduled_practice {
        rows.push(("Scheduled Practice", format_practice_date(date)));
    }
    if let Some(link) = &lick.link {
        let link = escape_html(link);
        rows.push(("Link", format!(r#"<a href="{link}">{link}</a>"#)));
    }

    let mut html = String::from(r#"<section class="basic-info"><dl>"#);
    for (term, value) in rows {
        html.push_str(&format!("<dt>{term}</dt><dd>{value}</dd>"));
    }
    html.push_str("</dl></section>");
    html
}

fn tonalities(lick: &Lick) -> String {
    if lick.tonalities.is_empty() {
        return format!(r#"<section class="tonalities"><p>{NO_TONALITIES}</p></section>"#);
    }

    let items: String = lick
        .tonality_names()
        .map(|name| format!("<li>{}</li>", escape_html(name)))
        .collect();
    format!(r#"<section class="tonalities"><h2>Tonalities</h2><ul>{items}</ul></section>"#)
}

fn backing_tracks(lick: &Lick) -> String {
    if lick.backing_tracks.is_empty() {
        return format!(r#"<section class="backing-tracks"><p>{NO_BACKING_TRACKS}</p></section>"#);
    }

    let items: String = lick
        .backing_tracks
        .iter()
        .map(|track| {
            format!(
                r#"<li><a href="{}">{}</a></li>"#,
                escape_html(&track.link),
                escape_html(&track.name)
            )
        })
        .collect();
    format!(r#"<section class="backing-tracks"><h2>Backing Tracks</h2><ul>{items}</ul></section>"#)
}

fn actions() -> String {
    String::from(concat!(
        r#"<section class="actions">"#,
        r#"<button data-action="edit">Edit</button>"#,
        r#"<button data-action="delete">Delete</button>"#,
        r#"<button data-action="back">Back</button>"#,
        "</section>"
    ))
}

/// Notes list, newest last
pub fn notes_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return format!(r#"<section class="notes"><p>{NO_NOTES}</p></section>"#);
    }

    let items: String = notes
        .iter()
        .map(|note| {
            format!(
                "<li>{} ({})</li>",
                escape_html(&note.body),
                format_practice_date(&note.created_at)
            )
        })
        .collect();
    format!(r#"<section class="notes"><h2>Notes</h2><ul>{items}</ul></section>"#)
}
