use anyhow::Context;
use chrono::{Local, NaiveDate};

/// Calendar day all tasks in one render pass are classified against.
#[must_use]
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[must_use]
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

pub fn parse_due_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid due date: {raw} (expected YYYY-MM-DD)"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    None,
    Overdue,
    DueToday,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueClass {
    pub status: DueStatus,
    pub formatted: Option<String>,
}

#[must_use]
pub fn classify(due_date: Option<NaiveDate>, today: NaiveDate) -> DueClass {
    let Some(due) = due_date else {
        return DueClass {
            status: DueStatus::None,
            formatted: None,
        };
    };

    let status = if due < today {
        DueStatus::Overdue
    } else if due == today {
        DueStatus::DueToday
    } else {
        DueStatus::Upcoming
    };

    DueClass {
        status,
        formatted: Some(format_due_date(due)),
    }
}
