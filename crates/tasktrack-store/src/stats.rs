//! Derived views over the todo and group lists.
//!
//! Everything here is recomputed on each call; nothing is cached.

use chrono::{DateTime, Utc};
use tasktrack_services::{Group, Todo};

/// Todos in the selected group, or all todos when nothing is selected.
pub fn filtered_todos<'a>(todos: &'a [Todo], selected_group_id: Option<&str>) -> Vec<&'a Todo> {
    match selected_group_id {
        None => todos.iter().collect(),
        Some(id) => todos.iter().filter(|t| t.group_id == id).collect(),
    }
}

pub fn pending_todos(todos: &[Todo]) -> Vec<&Todo> {
    todos.iter().filter(|t| !t.is_complete).collect()
}

pub fn completed_todos(todos: &[Todo]) -> Vec<&Todo> {
    todos.iter().filter(|t| t.is_complete).collect()
}

pub fn starred_todos(todos: &[Todo]) -> Vec<&Todo> {
    todos.iter().filter(|t| t.is_starred).collect()
}

/// `completed / total * 100`, or 0 for an empty list.
pub fn completion_percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

/// Completion percentage rounded to a whole number, as shown on progress bars.
pub fn rounded_percentage(completed: usize, total: usize) -> u32 {
    completion_percentage(completed, total).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TodoStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_percentage: f64,
}

impl TodoStats {
    pub fn from_todos<'a>(todos: impl IntoIterator<Item = &'a Todo>) -> Self {
        let (total, completed) = todos
            .into_iter()
            .fold((0, 0), |(total, done), t| (total + 1, done + usize::from(t.is_complete)));
        Self {
            total_tasks: total,
            completed_tasks: completed,
            completion_percentage: completion_percentage(completed, total),
        }
    }

    pub fn pending_tasks(&self) -> usize {
        self.total_tasks - self.completed_tasks
    }
}

/// Sidebar progress for one group (or for "All Groups" when `group_id` is `None`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupProgress {
    pub group_id: Option<String>,
    pub name: String,
    pub total: usize,
    pub completed: usize,
    pub percent: u32,
}

/// Progress per group over the unfiltered todo list, in group order.
pub fn group_progress(groups: &[Group], todos: &[Todo]) -> Vec<GroupProgress> {
    groups
        .iter()
        .map(|group| {
            let stats = TodoStats::from_todos(todos.iter().filter(|t| t.group_id == group.id));
            GroupProgress {
                group_id: Some(group.id.clone()),
                name: group.name.clone(),
                total: stats.total_tasks,
                completed: stats.completed_tasks,
                percent: rounded_percentage(stats.completed_tasks, stats.total_tasks),
            }
        })
        .collect()
}

pub fn all_groups_progress(todos: &[Todo]) -> GroupProgress {
    let stats = TodoStats::from_todos(todos);
    GroupProgress {
        group_id: None,
        name: "All Groups".to_string(),
        total: stats.total_tasks,
        completed: stats.completed_tasks,
        percent: rounded_percentage(stats.completed_tasks, stats.total_tasks),
    }
}

/// A milestone card: heading plus one line of encouragement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub title: &'static str,
    pub message: String,
}

/// Milestone for work already done.
pub fn victory_milestone(stats: &TodoStats) -> Milestone {
    if stats.completed_tasks > 0 {
        Milestone {
            title: "First Victory",
            message: format!("You've completed {}!", plural(stats.completed_tasks as i64, "task")),
        }
    } else {
        Milestone {
            title: "Getting Started",
            message: "Complete your first task to begin your journey.".to_string(),
        }
    }
}

/// Milestone for the work left.
pub fn next_goal_milestone(stats: &TodoStats) -> Milestone {
    let message = if stats.total_tasks == 0 {
        "Add your first task to get going!".to_string()
    } else {
        format!("Only {} to 100%!", plural(stats.pending_tasks() as i64, "task"))
    };
    Milestone {
        title: "Next Goal",
        message,
    }
}

/// Caption under the progress chart.
pub fn progress_caption(stats: &TodoStats) -> String {
    if stats.completion_percentage >= 100.0 {
        "A Perfect Mastery!".to_string()
    } else {
        format!("You're {}% on your way", stats.completion_percentage.round())
    }
}

/// List header count, e.g. "3 / 5 Done".
pub fn done_summary(stats: &TodoStats, loading: bool) -> String {
    if loading {
        "Loading...".to_string()
    } else {
        format!("{} / {} Done", stats.completed_tasks, stats.total_tasks)
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Time between creation and completion, e.g. "2 days 3 hours".
pub fn time_to_complete(
    created: Option<DateTime<Utc>>,
    completed: Option<DateTime<Utc>>,
) -> String {
    let (Some(created), Some(completed)) = (created, completed) else {
        return "unknown".to_string();
    };
    let elapsed = completed - created;
    if elapsed < chrono::Duration::zero() {
        return "unknown".to_string();
    }

    let days = elapsed.num_days();
    let hours = elapsed.num_hours() % 24;
    match (days, hours) {
        (0, 0) => "less than an hour".to_string(),
        (0, h) => plural(h, "hour"),
        (d, 0) => plural(d, "day"),
        (d, h) => format!("{} {}", plural(d, "day"), plural(h, "hour")),
    }
}

pub fn todo_time_to_complete(todo: &Todo) -> String {
    time_to_complete(todo.created_date, todo.completed_date)
}

/// Rough relative age, e.g. "about 3 hours ago".
pub fn time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - date;
    let minutes = elapsed.num_minutes().max(0);
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "less than a minute ago".to_string()
    } else if minutes < 60 {
        format!("{} ago", plural(minutes, "minute"))
    } else if hours < 24 {
        format!("about {} ago", plural(hours, "hour"))
    } else if days < 30 {
        format!("{} ago", plural(days, "day"))
    } else if days < 365 {
        format!("{} ago", plural(days / 30, "month"))
    } else {
        format!("about {} ago", plural(days / 365, "year"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn todo(id: &str, group_id: &str, complete: bool) -> Todo {
        Todo {
            id: id.to_string(),
            heading: id.to_string(),
            body: String::new(),
            is_complete: complete,
            is_starred: false,
            group_id: group_id.to_string(),
            group_name: None,
            created_date: None,
            completed_date: None,
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn empty_list_is_zero_percent() {
        let stats = TodoStats::from_todos(&Vec::<Todo>::new());
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completion_percentage, 0.0);
    }

    #[test]
    fn all_complete_is_hundred_percent() {
        let todos = vec![todo("1", "g", true), todo("2", "g", true)];
        assert_eq!(TodoStats::from_todos(&todos).completion_percentage, 100.0);
    }

    #[test]
    fn percentage_is_monotonic() {
        let mut todos = vec![todo("1", "g", true), todo("2", "g", false), todo("3", "g", false)];
        let base = TodoStats::from_todos(&todos).completion_percentage;

        todos.push(todo("4", "g", true));
        let with_done = TodoStats::from_todos(&todos).completion_percentage;
        assert!(with_done >= base);

        todos.push(todo("5", "g", false));
        let with_pending = TodoStats::from_todos(&todos).completion_percentage;
        assert!(with_pending <= with_done);
    }

    #[test]
    fn filter_by_selected_group() {
        let todos = vec![todo("1", "a", false), todo("2", "b", true), todo("3", "a", true)];

        let a: Vec<&str> = filtered_todos(&todos, Some("a"))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(a, vec!["1", "3"]);
        assert_eq!(filtered_todos(&todos, None).len(), 3);
        assert!(filtered_todos(&todos, Some("zzz")).is_empty());
    }

    #[test]
    fn status_views() {
        let mut todos = vec![todo("1", "a", false), todo("2", "a", true)];
        todos[0].is_starred = true;
        assert_eq!(pending_todos(&todos)[0].id, "1");
        assert_eq!(completed_todos(&todos)[0].id, "2");
        assert_eq!(starred_todos(&todos).len(), 1);
        assert_eq!(TodoStats::from_todos(&todos).pending_tasks(), 1);
    }

    #[test]
    fn group_progress_handles_empty_groups() {
        let groups = vec![
            Group { id: "a".into(), name: "A".into() },
            Group { id: "b".into(), name: "B".into() },
        ];
        let todos = vec![todo("1", "a", true), todo("2", "a", false), todo("3", "a", false)];

        let progress = group_progress(&groups, &todos);
        assert_eq!(progress[0].percent, 33);
        assert_eq!(progress[0].total, 3);
        assert_eq!(progress[1].percent, 0);
        assert_eq!(progress[1].total, 0);

        let all = all_groups_progress(&todos);
        assert_eq!(all.group_id, None);
        assert_eq!(all.percent, 33);
    }

    #[test]
    fn milestones_before_any_work() {
        let stats = TodoStats::default();
        let victory = victory_milestone(&stats);
        assert_eq!(victory.title, "Getting Started");
        assert_eq!(victory.message, "Complete your first task to begin your journey.");
        assert_eq!(next_goal_milestone(&stats).message, "Add your first task to get going!");
        assert_eq!(progress_caption(&stats), "You're 0% on your way");
    }

    #[test]
    fn milestones_count_tasks() {
        let one_left = TodoStats::from_todos(&vec![todo("1", "g", true), todo("2", "g", false)]);
        let victory = victory_milestone(&one_left);
        assert_eq!(victory.title, "First Victory");
        assert_eq!(victory.message, "You've completed 1 task!");
        assert_eq!(next_goal_milestone(&one_left).message, "Only 1 task to 100%!");

        let todos = vec![
            todo("1", "g", true),
            todo("2", "g", true),
            todo("3", "g", false),
            todo("4", "g", false),
            todo("5", "g", false),
        ];
        let stats = TodoStats::from_todos(&todos);
        assert_eq!(victory_milestone(&stats).message, "You've completed 2 tasks!");
        assert_eq!(next_goal_milestone(&stats).message, "Only 3 tasks to 100%!");
    }

    #[test]
    fn caption_rounds_and_celebrates() {
        let third = TodoStats::from_todos(&vec![
            todo("1", "g", true),
            todo("2", "g", false),
            todo("3", "g", false),
        ]);
        assert_eq!(progress_caption(&third), "You're 33% on your way");

        let two_thirds = TodoStats::from_todos(&vec![
            todo("1", "g", true),
            todo("2", "g", true),
            todo("3", "g", false),
        ]);
        assert_eq!(progress_caption(&two_thirds), "You're 67% on your way");

        let all = TodoStats::from_todos(&vec![todo("1", "g", true)]);
        assert_eq!(progress_caption(&all), "A Perfect Mastery!");
        assert_eq!(next_goal_milestone(&all).message, "Only 0 tasks to 100%!");
    }

    #[test]
    fn done_summary_header() {
        let stats = TodoStats::from_todos(&vec![todo("1", "g", true), todo("2", "g", false)]);
        assert_eq!(done_summary(&stats, false), "1 / 2 Done");
        assert_eq!(done_summary(&stats, true), "Loading...");
        assert_eq!(done_summary(&TodoStats::default(), false), "0 / 0 Done");
    }

    #[test]
    fn time_to_complete_formats() {
        assert_eq!(time_to_complete(Some(at(1, 8)), Some(at(3, 11))), "2 days 3 hours");
        assert_eq!(time_to_complete(Some(at(1, 8)), Some(at(2, 8))), "1 day");
        assert_eq!(time_to_complete(Some(at(1, 8)), Some(at(1, 9))), "1 hour");
        assert_eq!(time_to_complete(Some(at(1, 8)), Some(at(1, 13))), "5 hours");
        assert_eq!(time_to_complete(Some(at(1, 8)), Some(at(1, 8))), "less than an hour");
        assert_eq!(time_to_complete(None, Some(at(1, 8))), "unknown");
        assert_eq!(time_to_complete(Some(at(1, 8)), None), "unknown");
        assert_eq!(time_to_complete(Some(at(2, 8)), Some(at(1, 8))), "unknown");
    }

    #[test]
    fn time_ago_formats() {
        let now = at(20, 12);
        assert_eq!(time_ago(now, now), "less than a minute ago");
        assert_eq!(time_ago(now - chrono::Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(time_ago(at(20, 9), now), "about 3 hours ago");
        assert_eq!(time_ago(at(19, 12), now), "1 day ago");
        assert_eq!(time_ago(now - chrono::Duration::days(65), now), "2 months ago");
        assert_eq!(time_ago(now - chrono::Duration::days(800), now), "about 2 years ago");
    }
}
