//! Human-readable and JSON rendering of API results.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::models::brand::BrandDna;
use crate::models::task::Task;

const DESCRIPTION_WIDTH: usize = 80;

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}

/// Shorten `text` to `width` characters, ending in `...` when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

pub fn print_tasks(tasks: &[Task]) {
    println!("Tasks ({} total)", tasks.len());
    println!("================");
    println!();

    let groups = [
        ("In Progress", &["in_progress"][..]),
        ("Pending", &["pending"][..]),
        ("Completed", &["completed", "shared"][..]),
    ];

    for (heading, statuses) in groups {
        let matching: Vec<&Task> = tasks
            .iter()
            .filter(|t| statuses.contains(&t.status.as_str()))
            .collect();
        if matching.is_empty() {
            continue;
        }

        println!("{heading}:");
        for task in matching {
            print_task_line(task);
        }
        println!();
    }
}

fn print_task_line(task: &Task) {
    let platform = task.platform.as_deref().unwrap_or("general");

    println!("  [{}] {}", task.id, task.title);
    match &task.suggested_post_date {
        Some(date) => println!("      Platform: {platform} | Date: {date}"),
        None => println!("      Platform: {platform}"),
    }
    if let Some(desc) = task.description.as_deref().filter(|d| !d.is_empty()) {
        println!("      {}", truncate(desc, DESCRIPTION_WIDTH));
    }
}

pub fn print_task_detail(task: &Task) {
    println!("Task #{}: {}", task.id, task.title);
    println!("Status: {}", task.status);
    if let Some(platform) = &task.platform {
        println!("Platform: {platform}");
    }
    if let Some(asset_type) = &task.asset_type {
        println!("Asset type: {asset_type}");
    }
    if let Some(date) = &task.suggested_post_date {
        println!("Date: {date}");
    }
    if let Some(desc) = task.description.as_deref().filter(|d| !d.is_empty()) {
        println!();
        println!("{desc}");
    }

    for (label, prompt) in [
        ("Image prompt", &task.image_prompt),
        ("Copy prompt", &task.copy_prompt),
        ("Video prompt", &task.video_prompt),
    ] {
        if let Some(prompt) = prompt.as_deref().filter(|p| !p.is_empty()) {
            println!();
            println!("{label}:");
            println!("  {prompt}");
        }
    }

    if let Some(copy) = &task.selected_copy {
        println!();
        println!("Selected copy:");
        println!("  {}", copy.content);
    }
    if let Some(count) = task.selected_images_count.filter(|c| *c > 0) {
        println!("Selected images: {count}");
    }
    if task.ready_for_completion == Some(true) {
        println!("Ready for completion: yes");
    }
}

pub fn print_brand(brand: &BrandDna) {
    println!("Brand DNA (v{})", brand.version);
    println!("================");
    println!();

    if !brand.company_name.is_empty() {
        println!("Company: {}", brand.company_name);
    }
    if !brand.source_url.is_empty() {
        println!("Source: {}", brand.source_url);
    }
    println!();

    println!("Color Palette:");
    match brand.palette.get("colors").and_then(Value::as_array) {
        Some(colors) => {
            for color in colors {
                println!(
                    "  - {} ({}): {}",
                    text(color, "name"),
                    text(color, "role"),
                    text(color, "hex")
                );
            }
        }
        None => println!("  (not available)"),
    }
    println!();

    println!("Typography:");
    match brand.fonts.get("fonts").and_then(Value::as_array) {
        Some(fonts) => {
            for font in fonts {
                println!("  - {}: {}", text(font, "usage"), text(font, "name"));
            }
        }
        None => println!("  (not available)"),
    }
    println!();

    println!("Brand Voice:");
    match brand.voice.get("voice").filter(|v| v.is_object()) {
        Some(voice) => {
            if let Some(tone) = voice.get("tone").and_then(Value::as_str) {
                println!("  Tone: {tone}");
            }
            if let Some(traits) = voice.get("personality").and_then(Value::as_array) {
                let traits: Vec<String> = traits.iter().map(plain).collect();
                println!("  Personality: {}", traits.join(", "));
            }
            if let Some(audience) = voice.get("target_audience").and_then(Value::as_str) {
                println!("  Target Audience: {audience}");
            }
        }
        None => println!("  (not available)"),
    }
}

pub fn print_brand_versions(versions: &[BrandDna]) {
    println!("Brand DNA versions ({} total)", versions.len());
    println!("================");
    for brand in versions {
        let marker = if brand.active { " (active)" } else { "" };
        let name = if brand.company_name.is_empty() {
            "unnamed"
        } else {
            brand.company_name.as_str()
        };
        let created = brand
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!("  v{}{marker}: {name} {created}", brand.version);
    }
}

fn text(value: &Value, key: &str) -> String {
    value.get(key).map(plain).unwrap_or_default()
}

/// Strings without their JSON quotes, anything else as JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
