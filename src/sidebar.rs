//! Sidebar Model
//!
//! Menu links and collapsible sections in document order. Back references
//! are indices into the owning `Sidebar`, never owned values.

use std::collections::BTreeMap;

use crate::paths;

/// Section id → expanded flag, as persisted
pub type DropdownSnapshot = BTreeMap<String, bool>;

/// Arrow shown next to a section toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollapsibleSection {
    pub id: String,
    pub expanded: bool,
    /// Enclosing section, `None` for top-level sections
    pub parent: Option<usize>,
    /// Parent nav-item highlighted because the active link lives inside
    pub highlighted: bool,
}

impl CollapsibleSection {
    pub fn arrow(&self) -> Arrow {
        if self.expanded {
            Arrow::Up
        } else {
            Arrow::Down
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuLink {
    pub href: String,
    pub active: bool,
    /// Closest enclosing section
    pub section: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sidebar {
    sections: Vec<CollapsibleSection>,
    links: Vec<MenuLink>,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a section; `parent` must already be registered
    pub fn add_section(&mut self, id: impl Into<String>, parent: Option<usize>) -> usize {
        let parent = parent.filter(|p| *p < self.sections.len());
        self.sections.push(CollapsibleSection {
            id: id.into(),
            expanded: false,
            parent,
            highlighted: false,
        });
        self.sections.len() - 1
    }

    pub fn add_link(&mut self, href: impl Into<String>, section: Option<usize>) -> usize {
        let section = section.filter(|s| *s < self.sections.len());
        self.links.push(MenuLink {
            href: href.into(),
            active: false,
            section,
        });
        self.links.len() - 1
    }

    pub fn sections(&self) -> &[CollapsibleSection] {
        &self.sections
    }

    pub fn links(&self) -> &[MenuLink] {
        &self.links
    }

    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    pub fn section(&self, id: &str) -> Option<&CollapsibleSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn active_link(&self) -> Option<usize> {
        self.links.iter().position(|l| l.active)
    }

    /// Section indices from `idx` up to its top-level ancestor, inclusive
    fn lineage(&self, idx: usize) -> Vec<usize> {
        let mut chain = vec![idx];
        let mut cursor = self.sections[idx].parent;
        while let Some(parent) = cursor {
            if chain.contains(&parent) {
                break;
            }
            chain.push(parent);
            cursor = self.sections[parent].parent;
        }
        chain
    }

    fn top_level_of(&self, idx: usize) -> usize {
        *self.lineage(idx).last().unwrap_or(&idx)
    }

    /// Collapse every top-level section except `keep`; true if anything changed
    fn collapse_other_top_levels(&mut self, keep: usize) -> bool {
        let mut changed = false;
        for (i, section) in self.sections.iter_mut().enumerate() {
            if i != keep && section.parent.is_none() && section.expanded {
                section.expanded = false;
                changed = true;
            }
        }
        changed
    }

    /// Expand a section by user interaction
    ///
    /// Its ancestors stay open and every other top-level section collapses in
    /// the same step. Returns whether any flag changed.
    pub fn expand(&mut self, id: &str) -> bool {
        let Some(idx) = self.section_index(id) else { return false };
        let mut changed = false;
        for i in self.lineage(idx) {
            if !self.sections[i].expanded {
                self.sections[i].expanded = true;
                changed = true;
            }
        }
        let top = self.top_level_of(idx);
        changed |= self.collapse_other_top_levels(top);
        changed
    }

    pub fn collapse(&mut self, id: &str) -> bool {
        let Some(idx) = self.section_index(id) else { return false };
        let section = &mut self.sections[idx];
        let changed = section.expanded;
        section.expanded = false;
        changed
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(expanded) = self.section(id).map(|s| s.expanded) else { return false };
        if expanded {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    pub fn snapshot(&self) -> DropdownSnapshot {
        self.sections.iter().map(|s| (s.id.clone(), s.expanded)).collect()
    }

    /// Apply persisted flags; unknown ids are ignored
    ///
    /// If the snapshot opens several top-level sections, the first one in
    /// document order wins.
    pub fn apply_snapshot(&mut self, snapshot: &DropdownSnapshot) {
        for section in &mut self.sections {
            if let Some(expanded) = snapshot.get(&section.id) {
                section.expanded = *expanded;
            }
        }
        if let Some(first) = self.sections.iter().position(|s| s.is_top_level() && s.expanded) {
            self.collapse_other_top_levels(first);
        }
        self.refresh_highlights();
    }

    /// Mark the first link matching `current_path` active and open its sections
    ///
    /// With no match nothing is forced open and the current flags stand.
    pub fn resolve_active(&mut self, current_path: &str, origin: &str) -> Option<usize> {
        let current = paths::normalize(current_path, origin).unwrap_or_else(|| "/".to_string());
        for link in &mut self.links {
            link.active = false;
        }
        let found = self
            .links
            .iter()
            .position(|l| paths::normalize(&l.href, origin).as_deref() == Some(current.as_str()));
        if let Some(idx) = found {
            self.links[idx].active = true;
            if let Some(section) = self.links[idx].section {
                let id = self.sections[section].id.clone();
                self.expand(&id);
            }
        }
        self.refresh_highlights();
        found
    }

    /// Recompute nav-item highlighting from the active link
    fn refresh_highlights(&mut self) {
        for section in &mut self.sections {
            section.highlighted = false;
        }
        let Some(section) = self.active_link().and_then(|l| self.links[l].section) else { return };
        for i in self.lineage(section) {
            self.sections[i].highlighted = true;
        }
    }
}
