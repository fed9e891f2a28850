use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tasktrack_core::Config;
use tasktrack_store::{stats, App, TracingNotifier};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    tasktrack_core::init()?;

    let (config, _warnings) = Config::load_validated()?;
    let app = App::new(config, Arc::new(TracingNotifier))?;

    if let Err(e) = app.start().await {
        tracing::error!("Start-up failed: {}", e);
        eprintln!("{}", e.user_message());
        app.shutdown();
        return Err(e.into());
    }

    tracing::info!("TaskTrack started");

    let state = app.store().snapshot();
    let overall = state.stats();

    println!("TaskTrack - task groups and progress");
    println!("  API: {}", app.config().api.base_url);
    println!("  {}: {}", state.selection_title(), state.done_summary());
    println!("  {}", stats::progress_caption(&overall));
    for milestone in [
        stats::victory_milestone(&overall),
        stats::next_goal_milestone(&overall),
    ] {
        println!("  {}: {}", milestone.title, milestone.message);
    }

    println!();
    let all = stats::all_groups_progress(&state.todos.items);
    for progress in std::iter::once(all)
        .chain(stats::group_progress(&state.groups.items, &state.todos.items))
    {
        println!(
            "  {:<24} {:>3}%  ({}/{})",
            progress.name, progress.percent, progress.completed, progress.total
        );
    }

    let now = Utc::now();
    println!();
    for todo in stats::pending_todos(&state.todos.items) {
        let age = todo
            .created_date
            .map(|created| stats::time_ago(created, now))
            .unwrap_or_else(|| "unknown".to_string());
        println!("  [ ] {} (created {})", todo.heading, age);
    }

    match app.store().fetch_completed_todos().await {
        Ok(completed) => {
            for todo in &completed {
                println!(
                    "  [x] {} (took {})",
                    todo.heading,
                    stats::todo_time_to_complete(todo)
                );
            }
        }
        Err(e) => tracing::warn!("Could not load completed todos: {}", e),
    }

    app.shutdown();

    Ok(())
}
