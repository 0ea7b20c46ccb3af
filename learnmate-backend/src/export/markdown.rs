//! Markdown report generation for an analyzed task and its resources.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::Local;

use crate::models::{Category, LearningResource, Prerequisite, TaskBreakdown};

/// Filename returned by the HTTP export endpoint.
pub const EXPORT_FILENAME: &str = "learning_resources.md";

const TASK_SLUG_LIMIT: usize = 30;

/// Render the full report: task, complexity, prerequisites grouped by
/// category, suggested learning order and the discovered resources.
///
/// Resource sections follow the breakdown's prerequisite order so output is
/// deterministic and priority-ranked.
pub fn generate_markdown(
    breakdown: &TaskBreakdown,
    resources_by_concept: &HashMap<String, Vec<LearningResource>>,
) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    let mut md = String::new();
    let _ = write!(
        md,
        "# Learning Resources for: {}\n\n\
         **Generated:** {}  \n\
         **Estimated Complexity:** {}\n\n\
         ## Task Description\n\n\
         {}\n\n\
         ## Prerequisites\n\n",
        breakdown.task_description, timestamp, breakdown.estimated_complexity, breakdown.task_description
    );

    for (category, prerequisites) in group_by_category(&breakdown.prerequisites) {
        let _ = writeln!(md, "### {}\n", category);
        for prerequisite in prerequisites {
            let _ = writeln!(
                md,
                "- **{}** ({} priority)",
                prerequisite.name,
                priority_label(prerequisite.priority)
            );
            if !prerequisite.description.is_empty() {
                let _ = writeln!(md, "  - {}", prerequisite.description);
            }
        }
        md.push('\n');
    }

    if !breakdown.suggested_learning_order.is_empty() {
        md.push_str("## Suggested Learning Order\n\n");
        for (i, item) in breakdown.suggested_learning_order.iter().enumerate() {
            let _ = writeln!(md, "{}. {}", i + 1, item);
        }
        md.push('\n');
    }

    md.push_str("## Learning Resources\n\n");
    for prerequisite in &breakdown.prerequisites {
        let Some(resources) = resources_by_concept.get(&prerequisite.name) else {
            continue;
        };
        if resources.is_empty() {
            continue;
        }

        let _ = writeln!(md, "### {}\n", prerequisite.name);
        for (i, resource) in resources.iter().enumerate() {
            let _ = writeln!(md, "{}. [{}]({})", i + 1, resource.title, resource.url);
            if !resource.description.is_empty() {
                let _ = writeln!(md, "   - {}", resource.description);
            }
        }
        md.push('\n');
    }

    md.push_str("---\n\n*Generated by LearnMate*\n");
    md
}

/// Default save path for the CLI: `resources/learning_resources_<slug>_<ts>.md`.
pub fn default_export_path(task_description: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let slug = sanitize_task_slug(task_description);
    PathBuf::from("resources").join(format!("learning_resources_{}_{}.md", slug, timestamp))
}

/// First 30 characters of the task, keeping only filename-safe characters,
/// spaces collapsed to underscores.
fn sanitize_task_slug(task_description: &str) -> String {
    task_description
        .chars()
        .take(TASK_SLUG_LIMIT)
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_' || *c == '-')
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

fn priority_label(priority: u32) -> &'static str {
    match priority {
        0 => "High",
        1 => "Medium",
        _ => "Low",
    }
}

/// Prerequisites grouped by category, categories in first-seen order,
/// prerequisites in breakdown order within each group.
fn group_by_category(prerequisites: &[Prerequisite]) -> Vec<(Category, Vec<&Prerequisite>)> {
    let mut groups: Vec<(Category, Vec<&Prerequisite>)> = Vec::new();
    for prerequisite in prerequisites {
        match groups.iter_mut().find(|(c, _)| *c == prerequisite.category) {
            Some((_, members)) => members.push(prerequisite),
            None => groups.push((prerequisite.category, vec![prerequisite])),
        }
    }
    groups
}
