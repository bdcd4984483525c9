//! Page regions and event bindings
//!
//! The page is plain data: rendered HTML per region plus the list of
//! elements that currently accept user actions. Clearing a region never
//! leaves a binding behind for content that is gone.

use std::collections::HashMap;

use crate::state::Binding;

/// Named region of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Page heading: "My Licks" or the lick name
    Header,
    /// Filter/sort form on the index, status line on the detail view
    Options,
    /// Index list
    Licks,
    /// Detail sections of one lick
    Detail,
    Notes,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    regions: HashMap<Region, String>,
    bindings: Vec<Binding>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered content of a region, empty if never set
    pub fn region(&self, region: Region) -> &str {
        self.regions.get(&region).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, region: Region, html: impl Into<String>) {
        self.regions.insert(region, html.into());
    }

    pub fn clear(&mut self, region: Region) {
        self.regions.remove(&region);
    }

    pub fn bind(&mut self, binding: Binding) {
        if !self.bindings.contains(&binding) {
            self.bindings.push(binding);
        }
    }

    pub fn unbind(&mut self, binding: Binding) {
        self.bindings.retain(|b| *b != binding);
    }

    pub fn clear_bindings(&mut self) {
        self.bindings.clear();
    }

    pub fn is_bound(&self, binding: Binding) -> bool {
        self.bindings.contains(&binding)
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}
