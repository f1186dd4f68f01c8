//! Widget Options
//!
//! Typed option records for the calendar, table and date-range picker
//! libraries. Each record only carries options the pages actually use.

use serde::{Serialize, Serializer};

use crate::error::{ConsoleError, Result};

// ========================
// Calendar
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarView {
    DayGridMonth,
    TimeGridWeek,
    TimeGridDay,
    ListMonth,
}

impl CalendarView {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarView::DayGridMonth => "dayGridMonth",
            CalendarView::TimeGridWeek => "timeGridWeek",
            CalendarView::TimeGridDay => "timeGridDay",
            CalendarView::ListMonth => "listMonth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarItem {
    Prev,
    Next,
    Today,
    Title,
    View(CalendarView),
}

impl ToolbarItem {
    fn as_str(&self) -> &'static str {
        match self {
            ToolbarItem::Prev => "prev",
            ToolbarItem::Next => "next",
            ToolbarItem::Today => "today",
            ToolbarItem::Title => "title",
            ToolbarItem::View(view) => view.as_str(),
        }
    }
}

/// One toolbar slot: groups are space separated, items in a group comma separated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolbarSlot(pub Vec<Vec<ToolbarItem>>);

impl ToolbarSlot {
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|group| group.iter().map(ToolbarItem::as_str).collect::<Vec<_>>().join(","))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Serialize for ToolbarSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderToolbar {
    pub left: ToolbarSlot,
    pub center: ToolbarSlot,
    pub right: ToolbarSlot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarOptions {
    pub theme_system: &'static str,
    pub nav_links: bool,
    pub editable: bool,
    pub selectable: bool,
    pub day_max_events: bool,
    pub header_toolbar: HeaderToolbar,
}

impl CalendarOptions {
    /// Reservation calendar: month/week/day/list views, read-only events
    pub fn reservations() -> Self {
        use ToolbarItem::*;
        Self {
            theme_system: "bootstrap5",
            nav_links: true,
            editable: false,
            selectable: true,
            day_max_events: true,
            header_toolbar: HeaderToolbar {
                left: ToolbarSlot(vec![vec![Prev, Next], vec![Today]]),
                center: ToolbarSlot(vec![vec![Title]]),
                right: ToolbarSlot(vec![vec![
                    View(CalendarView::DayGridMonth),
                    View(CalendarView::TimeGridWeek),
                    View(CalendarView::TimeGridDay),
                    View(CalendarView::ListMonth),
                ]]),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        let has_view = self
            .header_toolbar
            .right
            .0
            .iter()
            .chain(&self.header_toolbar.left.0)
            .chain(&self.header_toolbar.center.0)
            .flatten()
            .any(|item| matches!(item, ToolbarItem::View(_)));
        if !has_view {
            return Err(ConsoleError::Config("calendar toolbar offers no view".to_string()));
        }
        Ok(())
    }
}

// ========================
// Table
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnOption {
    /// Zero-based column index
    pub select: usize,
    pub sort: SortOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    pub searchable: bool,
    pub fixed_height: bool,
    pub columns: Vec<ColumnOption>,
}

impl TableOptions {
    pub fn new(searchable: bool, fixed_height: bool, columns: Vec<ColumnOption>) -> Result<Self> {
        let mut seen = Vec::with_capacity(columns.len());
        for column in &columns {
            if seen.contains(&column.select) {
                return Err(ConsoleError::Config(format!("column {} configured twice", column.select)));
            }
            seen.push(column.select);
        }
        Ok(Self { searchable, fixed_height, columns })
    }

    /// Reservation list: newest arrival date first
    pub fn reservations() -> Result<Self> {
        Self::new(
            true,
            true,
            vec![ColumnOption {
                select: 3,
                sort: SortOrder::Desc,
                format: Some("MM-DD-YYYY".to_string()),
            }],
        )
    }
}

// ========================
// Date-range picker
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePickerOptions {
    pub format: String,
    pub today_highlight: bool,
    pub clear_button: bool,
    pub button_class: String,
}

impl DatePickerOptions {
    pub fn new(format: impl Into<String>, today_highlight: bool, clear_button: bool) -> Result<Self> {
        let format = format.into();
        let recognised = |c: char| matches!(c, 'd' | 'm' | 'y' | 'D' | 'M' | '-' | '/' | '.' | ' ');
        if format.is_empty() || !format.chars().all(recognised) {
            return Err(ConsoleError::Config(format!("unsupported date format {format:?}")));
        }
        Ok(Self {
            format,
            today_highlight,
            clear_button,
            button_class: "btn".to_string(),
        })
    }

    pub fn booking() -> Result<Self> {
        Self::new("mm-dd-yyyy", true, true)
    }
}
