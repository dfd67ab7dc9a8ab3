//! Time-horizon planning views over flattened task items.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use crate::entities::{TaskItem, PRIORITY_HIGHEST};
use crate::errors::{PlannerError, PlannerResult};

/// Named planning horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    Today,
    Tomorrow,
    ThisWorkWeek,
    ThisWeekend,
    NextWeek,
    NextMonth,
    NextQuarter,
    NextYear,
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Today => write!(f, "today"),
            Self::Tomorrow => write!(f, "tomorrow"),
            Self::ThisWorkWeek => write!(f, "this-work-week"),
            Self::ThisWeekend => write!(f, "this-weekend"),
            Self::NextWeek => write!(f, "next-week"),
            Self::NextMonth => write!(f, "next-month"),
            Self::NextQuarter => write!(f, "next-quarter"),
            Self::NextYear => write!(f, "next-year"),
        }
    }
}

impl std::str::FromStr for Horizon {
    type Err = PlannerError;

    /// Unrecognized horizon names are a caller contract violation and are
    /// reported, never silently mapped to an empty view.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "today" => Ok(Self::Today),
            "tomorrow" => Ok(Self::Tomorrow),
            "this-work-week" | "thisworkweek" => Ok(Self::ThisWorkWeek),
            "this-weekend" | "thisweekend" => Ok(Self::ThisWeekend),
            "next-week" | "nextweek" => Ok(Self::NextWeek),
            "next-month" | "nextmonth" => Ok(Self::NextMonth),
            "next-quarter" | "nextquarter" => Ok(Self::NextQuarter),
            "next-year" | "nextyear" => Ok(Self::NextYear),
            _ => Err(PlannerError::InvalidHorizon {
                horizon: s.to_string(),
            }),
        }
    }
}

/// Inclusive calendar-day window. A `None` start means "no lower bound"
/// (overdue items belong to today's view).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DayWindow {
    start: Option<NaiveDate>,
    end: NaiveDate,
}

impl DayWindow {
    fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && date <= self.end
    }
}

/// First day of the month `offset` months after the one containing `date`.
fn month_start(date: NaiveDate, offset: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + offset as i32;
    let (year, month0) = (total.div_euclid(12), total.rem_euclid(12) as u32);
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).expect("month start is a valid date")
}

/// Last day of the month containing `first`, which must be a month start.
fn month_end(first: NaiveDate) -> NaiveDate {
    month_start(first, 1).pred_opt().expect("month end is a valid date")
}

impl Horizon {
    /// Compute the calendar window for this horizon relative to `now`.
    fn window(self, now: DateTime<Utc>) -> DayWindow {
        let today = now.date_naive();
        // Monday of the current week; Sunday wraps back to the prior Monday
        let monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));

        match self {
            Self::Today => DayWindow {
                start: None,
                end: today,
            },
            Self::Tomorrow => {
                let tomorrow = today + Days::new(1);
                DayWindow {
                    start: Some(tomorrow),
                    end: tomorrow,
                }
            }
            Self::ThisWorkWeek => DayWindow {
                start: Some(monday),
                end: monday + Days::new(4),
            },
            Self::ThisWeekend => DayWindow {
                start: Some(monday + Days::new(5)),
                end: monday + Days::new(6),
            },
            Self::NextWeek => DayWindow {
                start: Some(monday + Days::new(7)),
                end: monday + Days::new(13),
            },
            Self::NextMonth => {
                let first = month_start(today, 1);
                DayWindow {
                    start: Some(first),
                    end: month_end(first),
                }
            }
            Self::NextQuarter => DayWindow {
                start: Some(month_start(today, 3)),
                end: month_end(month_start(today, 5)),
            },
            Self::NextYear => {
                let year = today.year() + 1;
                DayWindow {
                    start: Some(
                        NaiveDate::from_ymd_opt(year, 1, 1).expect("january 1 is a valid date"),
                    ),
                    end: NaiveDate::from_ymd_opt(year, 12, 31)
                        .expect("december 31 is a valid date"),
                }
            }
        }
    }
}

/// View ordering: priority ascending, then due date ascending with dated
/// items before undated. Equal keys keep their original relative order.
fn compare_items(a: &TaskItem, b: &TaskItem) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| match (a.due_date, b.due_date) {
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Filter and sort a flat task collection into the given horizon's window.
///
/// Completed items are always excluded. Undated items are excluded except
/// for the today view, which treats undated highest-priority items as
/// perpetually due.
pub fn generate_view(items: &[TaskItem], horizon: Horizon, now: DateTime<Utc>) -> Vec<TaskItem> {
    let window = horizon.window(now);

    let mut view: Vec<TaskItem> = items
        .iter()
        .filter(|item| !item.completed)
        .filter(|item| match item.due_date {
            Some(due) => window.contains(due.date_naive()),
            None => horizon == Horizon::Today && item.priority == PRIORITY_HIGHEST,
        })
        .cloned()
        .collect();

    view.sort_by(compare_items);
    view
}

/// Parse a horizon name and generate its view.
///
/// This is the string-typed boundary: an unrecognized name yields
/// [`PlannerError::InvalidHorizon`].
pub fn generate_named_view(
    items: &[TaskItem],
    horizon: &str,
    now: DateTime<Utc>,
) -> PlannerResult<Vec<TaskItem>> {
    let horizon: Horizon = horizon.parse()?;
    Ok(generate_view(items, horizon, now))
}
