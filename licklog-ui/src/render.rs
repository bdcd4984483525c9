//! HTML fragments for the index view
//!
//! Every piece of user text goes through [`escape_html`].

use chrono::{DateTime, Utc};
use licklog_common::api::types::IndexOptions;
use licklog_common::db::Lick;
use licklog_common::time::format_practice_date;
use licklog_common::{LickGroups, SortStrategy};

use crate::state::Selection;

/// Heading of the index view
pub const INDEX_HEADER: &str = "My Licks";

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn header(text: &str) -> String {
    format!("<h1>{}</h1>", escape_html(text))
}

/// One list entry: name, tonalities in parentheses, then the date if given
pub fn lick_entry(lick: &Lick, date: Option<&DateTime<Utc>>) -> String {
    let mut entry = format!(
        r##"<li><a href="#" class="lick-link" data-lick-id="{}">{}</a>"##,
        lick.id,
        escape_html(&lick.name)
    );

    let tonalities: Vec<&str> = lick.tonality_names().collect();
    if !tonalities.is_empty() {
        entry.push_str(&format!(" ({})", escape_html(&tonalities.join(", "))));
    }
    if let Some(date) = date {
        entry.push_str(&format!(" ({})", format_practice_date(date)));
    }

    entry.push_str("</li>");
    entry
}

/// Insertion-ordered list
pub fn flat_list(licks: &[Lick]) -> String {
    list(licks.iter().map(|lick| lick_entry(lick, None)))
}

/// List sorted by one of the date strategies, annotated with that date
pub fn dated_list(licks: &[Lick], strategy: SortStrategy) -> String {
    list(licks.iter().map(|lick| {
        let date = match strategy {
            SortStrategy::LastPracticed => lick.last_practiced.as_ref(),
            SortStrategy::ScheduledPractice => lick.scheduled_practice.as_ref(),
            _ => None,
        };
        lick_entry(lick, date)
    }))
}

/// One header and list per group label
pub fn grouped_list(groups: &LickGroups) -> String {
    groups
        .iter()
        .map(|(label, licks)| format!("<h2>{}</h2>{}", escape_html(label), flat_list(licks)))
        .collect()
}

fn list(entries: impl Iterator<Item = String>) -> String {
    let mut html = String::from(r#"<ul class="licks">"#);
    for entry in entries {
        html.push_str(&entry);
    }
    html.push_str("</ul>");
    html
}

/// Filter selector (two option groups) and sort selector, with the
/// current selection pre-selected
pub fn selection_form(options: &IndexOptions, selection: &Selection) -> String {
    let mut html = String::from(r#"<form class="lick-options"><select name="filter">"#);
    html.push_str(&option("", &selection.filter));

    for (group, names) in [
        ("Tonalities", &options.filters.tonalities),
        ("Artists", &options.filters.artists),
    ] {
        if names.is_empty() {
            continue;
        }
        html.push_str(&format!(r#"<optgroup label="{group}">"#));
        for name in names {
            html.push_str(&option(name, &selection.filter));
        }
        html.push_str("</optgroup>");
    }

    html.push_str(r#"</select><select name="sort">"#);
    for label in &options.sorts {
        html.push_str(&option(label, selection.sort.label()));
    }
    html.push_str(r#"</select><button type="submit">Go</button></form>"#);
    html
}

fn option(value: &str, selected: &str) -> String {
    let value = escape_html(value);
    let marker = if value == escape_html(selected) { " selected" } else { "" };
    format!(r#"<option value="{value}"{marker}>{value}</option>"#)
}

pub fn error_message(message: &str) -> String {
    format!(r#"<p class="error">{}</p>"#, escape_html(message))
}

pub fn status_message(message: &str) -> String {
    format!(r#"<p class="status">{}</p>"#, escape_html(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use licklog_common::catalog::FilterOptions;
    use licklog_common::db::Tonality;

    fn lick(id: i64, name: &str, tonalities: &[&str]) -> Lick {
        Lick {
            id,
            user_id: 1,
            artist: None,
            name: name.to_string(),
            bpm: None,
            current_key: None,
            description: None,
            link: None,
            performance_rating: None,
            last_practiced: None,
            scheduled_practice: None,
            tonalities: tonalities
                .iter()
                .enumerate()
                .map(|(i, n)| Tonality {
                    id: i as i64 + 1,
                    name: n.to_string(),
                })
                .collect(),
            backing_tracks: Vec::new(),
            genres: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_entry_lists_tonalities() {
        let entry = lick_entry(&lick(4, "Run", &["Dorian", "Mixolydian"]), None);
        assert!(entry.contains(r#"data-lick-id="4">Run</a> (Dorian, Mixolydian)</li>"#));

        let bare = lick_entry(&lick(5, "Bend", &[]), None);
        assert!(bare.ends_with(">Bend</a></li>"));
    }

    #[test]
    fn test_dated_list_shows_relevant_date() {
        let mut practiced = lick(1, "Rake", &[]);
        practiced.last_practiced = Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        practiced.scheduled_practice = Some(Utc.with_ymd_and_hms(2024, 4, 2, 0, 0, 0).unwrap());

        let html = dated_list(&[practiced.clone()], SortStrategy::LastPracticed);
        assert!(html.contains("Rake</a> (3/1/2024)"));

        let html = dated_list(&[practiced], SortStrategy::ScheduledPractice);
        assert!(html.contains("Rake</a> (4/2/2024)"));
    }

    #[test]
    fn test_grouped_list_headers() {
        let mut groups = LickGroups::new();
        groups.insert("Dorian".to_string(), vec![lick(1, "Run", &["Dorian"])]);
        groups.insert("No Tonality".to_string(), vec![lick(2, "Bend", &[])]);

        let html = grouped_list(&groups);
        let dorian = html.find("<h2>Dorian</h2>").unwrap();
        let none = html.find("<h2>No Tonality</h2>").unwrap();
        assert!(dorian < none);
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = flat_list(&[lick(1, "<script>", &[])]);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_selection_form_marks_current_choice() {
        let options = IndexOptions {
            filters: FilterOptions {
                tonalities: vec!["Dorian".to_string()],
                artists: vec!["Wes Montgomery".to_string()],
            },
            sorts: SortStrategy::labels(),
        };
        let selection = Selection::new("Wes Montgomery", SortStrategy::Artist);

        let html = selection_form(&options, &selection);
        assert!(html.contains(r#"<optgroup label="Tonalities">"#));
        assert!(html.contains(r#"<option value="Wes Montgomery" selected>"#));
        assert!(html.contains(r#"<option value="Artist" selected>"#));
        assert!(html.contains(r#"<option value="Dorian">"#));
    }

    #[test]
    fn test_selection_form_skips_empty_groups() {
        let options = IndexOptions {
            filters: FilterOptions::default(),
            sorts: SortStrategy::labels(),
        };
        let html = selection_form(&options, &Selection::default());
        assert!(!html.contains("optgroup"));
        assert!(html.contains(r#"<option value="" selected></option>"#));
    }
}
