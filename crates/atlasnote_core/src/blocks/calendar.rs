//! Static month-calendar widget generator.
//!
//! # Responsibility
//! - Render the month of a given date as a self-contained, non-editable
//!   fragment.
//!
//! # Invariants
//! - One cell per day of the month, leap-year aware.
//! - The cell matching the given day-of-month carries the `today` mark.
//! - The widget is generated once and never updates afterwards.

use chrono::{Datelike, NaiveDate};

const WEEKDAY_HEADER: &str =
    "<span>S</span><span>M</span><span>T</span><span>W</span><span>T</span><span>F</span><span>S</span>";

/// Renders the month widget for `today`.
///
/// Header is `{month name} {year}`; the day grid is prefixed by a fixed
/// seven-column weekday row starting Sunday.
pub fn month_widget(today: NaiveDate) -> String {
    let header = today.format("%B %Y");
    let days = days_in_month(today.year(), today.month());

    let mut cells = String::new();
    for day in 1..=days {
        let class = if day == today.day() {
            "calendar-day today"
        } else {
            "calendar-day"
        };
        cells.push_str(&format!("<div class=\"{class}\">{day}</div>"));
    }

    format!(
        "<div class=\"calendar-widget\" contenteditable=\"false\">\
         <div class=\"calendar-header\">{header}</div>\
         <div class=\"calendar-grid\">{WEEKDAY_HEADER}{cells}</div>\
         </div>"
    )
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .expect("valid month boundary")
        .day()
}
