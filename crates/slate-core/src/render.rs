use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use chrono::NaiveDate;
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::datetime::{DueStatus, classify};
use crate::task::Task;
use crate::theme::Theme;
use crate::view::Counts;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
    theme: Theme,
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    id: &'static str,
    overdue: &'static str,
    due_today: &'static str,
    done: &'static str,
}

const LIGHT_PALETTE: Palette = Palette {
    id: "33",
    overdue: "31",
    due_today: "36",
    done: "32",
};

const DARK_PALETTE: Palette = Palette {
    id: "93",
    overdue: "91",
    due_today: "96",
    done: "92",
};

impl Renderer {
    pub fn new(cfg: &Config, theme: Theme) -> anyhow::Result<Self> {
        let color_cfg = cfg.color.clone().unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color, theme })
    }

    /// Renders one projection pass: every row is classified against the same
    /// `today`.
    #[tracing::instrument(skip(self, tasks, counts, today))]
    pub fn print_projection(
        &mut self,
        tasks: &[Task],
        counts: &Counts,
        today: NaiveDate,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        if tasks.is_empty() {
            writeln!(out, "No tasks to show.")?;
        } else {
            let headers = vec![
                "ID".to_string(),
                "Due".to_string(),
                "Status".to_string(),
                "Text".to_string(),
            ];

            let palette = self.palette();
            let mut rows = Vec::with_capacity(tasks.len());

            for task in tasks {
                let class = classify(task.due_date, today);
                let due = class.formatted.clone().unwrap_or_default();

                let (due, status) = if task.completed {
                    (due, self.paint("done", palette.done))
                } else {
                    match class.status {
                        DueStatus::Overdue => {
                            (self.paint(&due, palette.overdue), self.paint("overdue", palette.overdue))
                        }
                        DueStatus::DueToday => {
                            (self.paint(&due, palette.due_today), self.paint("today", palette.due_today))
                        }
                        DueStatus::Upcoming | DueStatus::None => (due, String::new()),
                    }
                };

                let id = self.paint(&task.id.to_string(), palette.id);
                rows.push(vec![id, due, status, task.text.clone()]);
            }

            write_table(&mut out, headers, rows)?;
        }

        writeln!(
            out,
            "{} total, {} active, {} completed",
            counts.total, counts.active, counts.completed
        )?;
        Ok(())
    }

    fn palette(&self) -> Palette {
        match self.theme {
            Theme::Light => LIGHT_PALETTE,
            Theme::Dark => DARK_PALETTE,
        }
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if text.is_empty() || !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
