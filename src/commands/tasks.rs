use anyhow::{Context, Result, bail};

use crate::api::tasks::TaskFilter;
use crate::cli::GlobalOpts;
use crate::commands::session;
use crate::models::task::{CreateTaskRequest, UpdateTaskRequest};
use crate::output;

pub async fn list(opts: &GlobalOpts, status: Option<&str>, platform: Option<&str>) -> Result<()> {
    let session = session(opts)?;
    let tasks = session
        .client
        .list_tasks(&TaskFilter { status, platform })
        .await
        .context("Failed to fetch tasks")?;

    if opts.json {
        return output::print_json(&serde_json::json!({ "tasks": tasks }));
    }

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    output::print_tasks(&tasks);
    Ok(())
}

pub async fn show(opts: &GlobalOpts, id: i64) -> Result<()> {
    let session = session(opts)?;
    let task = session
        .client
        .get_task(id)
        .await
        .with_context(|| format!("Failed to fetch task #{id}"))?;

    if opts.json {
        return output::print_json(&task);
    }

    output::print_task_detail(&task);
    Ok(())
}

pub async fn create(opts: &GlobalOpts, req: CreateTaskRequest) -> Result<()> {
    let session = session(opts)?;
    let task = session
        .client
        .create_task(&req)
        .await
        .context("Failed to create task")?;

    if opts.json {
        return output::print_json(&task);
    }

    println!("Created task #{} in '{}': {}", task.id, session.slug, task.title);
    if let Some(platform) = &task.platform {
        println!("  Platform: {platform}");
    }
    if let Some(date) = &task.suggested_post_date {
        println!("  Date: {date}");
    }
    Ok(())
}

pub async fn update(opts: &GlobalOpts, id: i64, req: UpdateTaskRequest) -> Result<()> {
    if req.is_empty() {
        bail!("at least one of --title, --description, or --status is required");
    }

    let session = session(opts)?;
    let task = session
        .client
        .update_task(id, &req)
        .await
        .with_context(|| format!("Failed to update task #{id}"))?;

    if opts.json {
        return output::print_json(&task);
    }

    println!("Updated task #{}: {}", task.id, task.title);
    Ok(())
}

pub async fn discard(opts: &GlobalOpts, id: i64) -> Result<()> {
    let session = session(opts)?;
    let result = session
        .client
        .discard_task(id)
        .await
        .with_context(|| format!("Failed to discard task #{id}"))?;

    if opts.json {
        return output::print_json(&result);
    }

    println!("Discarded task #{id}");
    Ok(())
}
