//! Task command handlers

use colored::Colorize;
use tabled::{Table, Tabled};
use uuid::Uuid;

use crate::error::{Result, TaskApiError};
use crate::models::{NewTask, TaskChanges, TaskPriority, TaskRecord, TaskStatistics, TaskStatus};
use crate::services::TaskService;

/// Task display row for table output
#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&TaskRecord> for TaskRow {
    fn from(task: &TaskRecord) -> Self {
        Self {
            id: task.id.to_string()[..8].to_string(),
            title: truncate(&task.title, 40),
            priority: task.priority.to_string(),
            status: task.status.to_string(),
            created: task.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Accept a full UUID or the 8-character prefix shown by `task list`
async fn resolve_id(service: &TaskService, id: &str) -> Result<Uuid> {
    if let Ok(uuid) = Uuid::parse_str(id) {
        return Ok(uuid);
    }

    let prefix = id.to_ascii_lowercase();
    let matches: Vec<Uuid> = service
        .list_tasks()
        .await?
        .into_iter()
        .map(|t| t.id)
        .filter(|uuid| uuid.to_string().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [single] => Ok(*single),
        [] => Err(TaskApiError::NotFound(id.to_string())),
        _ => Err(TaskApiError::Validation(format!(
            "Task id prefix '{}' is ambiguous ({} matches)",
            id,
            matches.len()
        ))),
    }
}

fn print_task(task: &TaskRecord) {
    println!("  ID: {}", task.id);
    println!("  Title: {}", task.title);
    if let Some(description) = &task.description {
        println!("  Description: {}", description);
    }
    println!("  Priority: {}", task.priority);
    println!("  Status: {}", task.status);
    println!("  Created: {}", task.created_at.to_rfc3339());
    if let Some(updated_at) = task.updated_at {
        println!("  Updated: {}", updated_at.to_rfc3339());
    }
    if let Some(completed_at) = task.completed_at {
        println!("  Completed: {}", completed_at.to_rfc3339());
    }
}

/// Handle task create command
pub async fn handle_create(
    service: &TaskService,
    title: String,
    description: Option<String>,
    priority: Option<String>,
) -> Result<()> {
    let mut input = NewTask::new(title);
    input.description = description;
    input.priority = priority.map(|p| p.parse::<TaskPriority>()).transpose()?;

    let task = service.create_task(input).await?;

    println!("{}", "✓ Task created successfully".green().bold());
    print_task(&task);
    Ok(())
}

/// Handle task list command
pub async fn handle_list(service: &TaskService) -> Result<()> {
    let tasks = service.list_tasks().await?;

    if tasks.is_empty() {
        println!("{}", "No tasks found".yellow());
        return Ok(());
    }

    let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from).collect();
    let count = rows.len();
    println!("{}", Table::new(rows));
    println!("\n{} task(s)", count);
    Ok(())
}

/// Handle task show command
pub async fn handle_show(service: &TaskService, id: String) -> Result<()> {
    let id = resolve_id(service, &id).await?;
    let task = service
        .get_task(id)
        .await?
        .ok_or_else(|| TaskApiError::NotFound(id.to_string()))?;

    print_task(&task);
    Ok(())
}

/// Handle task update command
pub async fn handle_update(
    service: &TaskService,
    id: String,
    changes: TaskChanges,
) -> Result<()> {
    if !changes.has_updates() {
        return Err(TaskApiError::Validation(
            "Nothing to update. Pass at least one of --title, --description, --priority, --status"
                .to_string(),
        ));
    }

    let id = resolve_id(service, &id).await?;
    let existing = service
        .get_task(id)
        .await?
        .ok_or_else(|| TaskApiError::NotFound(id.to_string()))?;

    let task = service
        .update_task(changes.apply_to(existing))
        .await?
        .ok_or_else(|| TaskApiError::NotFound(id.to_string()))?;

    println!("{}", "✓ Task updated successfully".green().bold());
    print_task(&task);
    Ok(())
}

/// Build `TaskChanges` from raw CLI flags
pub fn parse_changes(
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    status: Option<String>,
) -> Result<TaskChanges> {
    Ok(TaskChanges {
        title,
        description,
        priority: priority.map(|p| p.parse::<TaskPriority>()).transpose()?,
        status: status.map(|s| s.parse::<TaskStatus>()).transpose()?,
    })
}

/// Handle task delete command
pub async fn handle_delete(service: &TaskService, id: String) -> Result<()> {
    let id = resolve_id(service, &id).await?;

    if !service.delete_task(id).await? {
        return Err(TaskApiError::NotFound(id.to_string()));
    }

    println!("{}", "✓ Task deleted".green().bold());
    Ok(())
}

/// Handle task stats command
pub async fn handle_stats(service: &TaskService) -> Result<()> {
    let stats = service.compute_statistics().await?;
    print!("{}", render_statistics(&stats));
    Ok(())
}

fn render_statistics(stats: &TaskStatistics) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total tasks: {}\n", stats.total_tasks));
    out.push_str(&format!("  Pending:     {}\n", stats.pending_tasks));
    out.push_str(&format!("  In progress: {}\n", stats.in_progress_tasks));
    out.push_str(&format!("  Completed:   {}\n", stats.completed_tasks));
    out.push_str(&format!("  Cancelled:   {}\n", stats.cancelled_tasks));

    if !stats.tasks_by_priority.is_empty() {
        out.push_str("By priority:\n");
        for (priority, count) in stats.tasks_by_priority.iter().rev() {
            out.push_str(&format!("  {:<12} {}\n", format!("{}:", priority), count));
        }
    }
    out
}
