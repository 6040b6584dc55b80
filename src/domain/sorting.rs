use crate::{domain::task::Task, error::TasklyError};
use chrono::NaiveDate;
use std::{borrow::Borrow, cmp::Ordering, fmt, str::FromStr};

/// Sort modes available for a column's task list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOption {
    #[default]
    None,
    Priority,
    DueDate,
    Alphabetical,
    Created,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::None => "none",
            SortOption::Priority => "priority",
            SortOption::DueDate => "dueDate",
            SortOption::Alphabetical => "alphabetical",
            SortOption::Created => "created",
        }
    }
}

impl FromStr for SortOption {
    type Err = TasklyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(SortOption::None),
            "priority" => Ok(SortOption::Priority),
            "duedate" | "due-date" => Ok(SortOption::DueDate),
            "alphabetical" => Ok(SortOption::Alphabetical),
            "created" => Ok(SortOption::Created),
            _ => Err(TasklyError::InvalidSortOption(format!(
                "'{}'. Valid options: none, priority, dueDate, alphabetical, created",
                s
            ))),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sorts tasks in place.
///
/// The sort is stable, so ties keep their original relative order and
/// `SortOption::None` leaves the slice untouched.
///
/// # Examples
/// ```
/// use taskly_core::domain::sorting::{sort_tasks, SortOption};
/// use taskly_core::domain::task::{NewTask, Task, TaskPriority};
///
/// let mut tasks = vec![
///     Task::from_draft(NewTask::new("A").priority(TaskPriority::Low)),
///     Task::from_draft(NewTask::new("B").priority(TaskPriority::Urgent)),
/// ];
///
/// sort_tasks(&mut tasks, SortOption::Priority);
/// assert_eq!(tasks[0].title, "B");
/// ```
pub fn sort_tasks<T: Borrow<Task>>(tasks: &mut [T], sort_by: SortOption) {
    if sort_by == SortOption::None {
        return;
    }

    tasks.sort_by(|a, b| {
        let (a, b) = (a.borrow(), b.borrow());
        match sort_by {
            SortOption::None => Ordering::Equal,
            SortOption::Priority => b.priority.weight().cmp(&a.priority.weight()),
            SortOption::DueDate => compare_option_dates(a.due_date, b.due_date),
            SortOption::Alphabetical => compare_titles(&a.title, &b.title),
            SortOption::Created => b.created_at.cmp(&a.created_at),
        }
    });
}

/// Compare Option<NaiveDate> with None always sorting to end
fn compare_option_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a_date), Some(b_date)) => a_date.cmp(&b_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-folded comparison; titles that differ only by case put lowercase first
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
