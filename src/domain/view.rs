//! Derived, read-only views over the board: per-column filtering, searching
//! and sorting, plus due-date presentation helpers.

use crate::{
    domain::{
        sorting::{sort_tasks, SortOption},
        task::{ColorTag, Task, TaskId, TaskPriority},
    },
    error::TasklyError,
};
use chrono::NaiveDate;
use std::{collections::HashMap, fmt, str::FromStr};

/// Restricts a column's task list to a priority or a label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterOption {
    #[default]
    All,
    Priority(TaskPriority),
    Label(ColorTag),
}

impl FilterOption {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            FilterOption::All => true,
            FilterOption::Priority(priority) => task.priority == *priority,
            FilterOption::Label(label) => task.has_label(*label),
        }
    }
}

impl FromStr for FilterOption {
    type Err = TasklyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(FilterOption::All);
        }
        if let Some(priority) = TaskPriority::parse(s) {
            return Ok(FilterOption::Priority(priority));
        }
        if let Some(label) = ColorTag::parse(s) {
            return Ok(FilterOption::Label(label));
        }
        Err(TasklyError::InvalidFilterOption(format!(
            "'{}'. Valid options: all, a priority (low..urgent) or a label colour",
            s
        )))
    }
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOption::All => f.write_str("all"),
            FilterOption::Priority(priority) => write!(f, "{}", priority),
            FilterOption::Label(label) => write!(f, "{}", label),
        }
    }
}

/// UI-only view settings. Not part of the persisted board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub search_query: String,
    pub sort_by: SortOption,
    pub filter_by: FilterOption,
}

/// Applies the filter, then the search query; both must pass.
///
/// A blank query matches everything. Otherwise the trimmed query is matched
/// case-insensitively against title, description and label names.
pub fn filter_tasks<'a, I>(tasks: I, filter_by: FilterOption, search_query: &str) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let query = search_query.trim().to_lowercase();

    tasks
        .into_iter()
        .filter(|task| filter_by.matches(task))
        .filter(|task| query.is_empty() || task.matches_query(&query))
        .collect()
}

/// Resolves a column's id sequence against the task map, then filters, then sorts.
///
/// Ids that do not resolve are dropped.
pub fn get_tasks_by_column_id<'a>(
    tasks: &'a HashMap<TaskId, Task>,
    task_ids: &[TaskId],
    sort_by: SortOption,
    filter_by: FilterOption,
    search_query: &str,
) -> Vec<&'a Task> {
    let column_tasks = task_ids.iter().filter_map(|id| tasks.get(id));
    let mut visible = filter_tasks(column_tasks, filter_by, search_query);
    sort_tasks(&mut visible, sort_by);
    visible
}

/// True when the due date is strictly before `today`
pub fn is_overdue(due: NaiveDate, today: NaiveDate) -> bool {
    due < today
}

/// Human description of a due date relative to `today`
pub fn describe_due_date(due: NaiveDate, today: NaiveDate) -> String {
    let days = (due - today).num_days();
    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        d if d > 0 => format!("In {} days", d),
        d => format!("{} days ago", d.abs()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::NewTask;

    fn sample() -> Vec<Task> {
        vec![
            Task::from_draft(
                NewTask::new("Write spec")
                    .priority(TaskPriority::High)
                    .label(ColorTag::Blue),
            ),
            Task::from_draft(
                NewTask::new("Fix login")
                    .description("Session cookie expires early")
                    .priority(TaskPriority::Urgent)
                    .label(ColorTag::Red),
            ),
            Task::from_draft(NewTask::new("Tidy docs").priority(TaskPriority::Low)),
        ]
    }

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_filter_all_with_empty_query_is_identity() {
        let tasks = sample();
        let result = filter_tasks(&tasks, FilterOption::All, "");
        assert_eq!(titles(&result), vec!["Write spec", "Fix login", "Tidy docs"]);

        let result = filter_tasks(&tasks, FilterOption::All, "   ");
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_filter_by_priority() {
        let tasks = sample();
        let result = filter_tasks(&tasks, FilterOption::Priority(TaskPriority::Urgent), "");
        assert_eq!(titles(&result), vec!["Fix login"]);
    }

    #[test]
    fn test_filter_by_label() {
        let tasks = sample();
        let result = filter_tasks(&tasks, FilterOption::Label(ColorTag::Blue), "");
        assert_eq!(titles(&result), vec!["Write spec"]);
    }

    #[test]
    fn test_search_is_trimmed_and_case_insensitive() {
        let tasks = sample();
        assert_eq!(titles(&filter_tasks(&tasks, FilterOption::All, "  SPEC ")), vec!["Write spec"]);
        assert_eq!(titles(&filter_tasks(&tasks, FilterOption::All, "cookie")), vec!["Fix login"]);
        assert_eq!(titles(&filter_tasks(&tasks, FilterOption::All, "red")), vec!["Fix login"]);
    }

    #[test]
    fn test_filter_and_search_compose() {
        let tasks = sample();
        let result = filter_tasks(&tasks, FilterOption::Priority(TaskPriority::High), "login");
        assert!(result.is_empty());

        let result = filter_tasks(&tasks, FilterOption::Label(ColorTag::Red), "fix");
        assert_eq!(titles(&result), vec!["Fix login"]);
    }

    #[test]
    fn test_get_tasks_by_column_id_drops_unknown_and_sorts() {
        let tasks = sample();
        let ids: Vec<TaskId> = tasks.iter().map(|t| t.id.clone()).collect();
        let map: HashMap<TaskId, Task> = tasks.into_iter().map(|t| (t.id.clone(), t)).collect();

        let sequence = vec![
            ids[2].clone(),
            TaskId::from("missing"),
            ids[0].clone(),
            ids[1].clone(),
        ];

        let unsorted =
            get_tasks_by_column_id(&map, &sequence, SortOption::None, FilterOption::All, "");
        assert_eq!(titles(&unsorted), vec!["Tidy docs", "Write spec", "Fix login"]);

        let by_priority =
            get_tasks_by_column_id(&map, &sequence, SortOption::Priority, FilterOption::All, "");
        assert_eq!(titles(&by_priority), vec!["Fix login", "Write spec", "Tidy docs"]);

        let searched = get_tasks_by_column_id(
            &map,
            &sequence,
            SortOption::Alphabetical,
            FilterOption::All,
            "i",
        );
        assert_eq!(titles(&searched), vec!["Fix login", "Tidy docs", "Write spec"]);
    }

    #[test]
    fn test_filter_option_parsing() {
        assert_eq!("all".parse::<FilterOption>().unwrap(), FilterOption::All);
        assert_eq!(
            "urgent".parse::<FilterOption>().unwrap(),
            FilterOption::Priority(TaskPriority::Urgent)
        );
        assert_eq!(
            "pink".parse::<FilterOption>().unwrap(),
            FilterOption::Label(ColorTag::Pink)
        );
        assert!("orange".parse::<FilterOption>().is_err());
        assert_eq!(FilterOption::Label(ColorTag::Green).to_string(), "green");
    }

    #[test]
    fn test_due_date_helpers() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let day = |d: u32| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();

        assert_eq!(describe_due_date(day(10), today), "Today");
        assert_eq!(describe_due_date(day(11), today), "Tomorrow");
        assert_eq!(describe_due_date(day(9), today), "Yesterday");
        assert_eq!(describe_due_date(day(15), today), "In 5 days");
        assert_eq!(describe_due_date(day(3), today), "7 days ago");

        assert!(is_overdue(day(9), today));
        assert!(!is_overdue(day(10), today));
    }
}
