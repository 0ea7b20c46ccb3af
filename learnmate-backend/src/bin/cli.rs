//! Command-line mode: analyze a task, find resources and optionally save
//! the markdown report, without going through the HTTP API.

use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;

use learnmate_backend::agents::TaskAnalyzer;
use learnmate_backend::ai::OpenAIClient;
use learnmate_backend::config::Config;
use learnmate_backend::export::markdown;
use learnmate_backend::files;
use learnmate_backend::models::{LearningResource, Prerequisite, TaskBreakdown};
use learnmate_backend::search::{DuckDuckGoClient, ResourceFinder, SearchProvider};

#[derive(Parser)]
#[command(
    name = "learnmate-cli",
    about = "AI-powered learning resource discovery",
    after_help = "Examples:\n  \
        learnmate-cli \"Build a REST API with JWT authentication\"\n  \
        learnmate-cli --file my_task.txt\n  \
        learnmate-cli \"Create a machine learning model\" --save\n  \
        learnmate-cli \"Build a web scraper\" --save --output my_resources.md"
)]
struct Cli {
    /// Task or assignment description (optional if --file is used)
    task: Option<String>,

    /// Path to a .txt or .docx file containing the task description
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// 1-based indices of prerequisites you already know, e.g. -k 1,3,4
    #[arg(short, long, value_delimiter = ',')]
    known: Vec<usize>,

    /// Save the analysis to a markdown file
    #[arg(short, long)]
    save: bool,

    /// Custom output path for the markdown file (implies --save)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let task_description = match (&cli.file, &cli.task) {
        (Some(path), _) => files::read_task_file(path)?,
        (None, Some(task)) => task.clone(),
        (None, None) => {
            return Err("You must provide a task description or a file path.".to_string())
        }
    };
    let task_description = task_description.trim();
    if task_description.is_empty() {
        return Err("Task description cannot be empty.".to_string());
    }

    let config = Config::from_env();
    let ai = Arc::new(OpenAIClient::new(
        &config.openai_api_key,
        config.openai_endpoint.as_deref(),
        config.openai_model.as_deref(),
        None,
    )?);

    println!("{}", "Analyzing task...".cyan());
    let analyzer = TaskAnalyzer::new(ai);
    let breakdown = analyzer.analyze(task_description).await?;
    print_breakdown(&breakdown);

    // Displayed numbering is 1-based; the known-set is 0-based indices.
    let known: HashSet<usize> = cli.known.iter().filter(|i| **i >= 1).map(|i| i - 1).collect();
    let unknown: Vec<Prerequisite> = breakdown
        .prerequisites
        .iter()
        .enumerate()
        .filter(|(i, _)| !known.contains(i))
        .map(|(_, p)| p.clone())
        .collect();

    println!("{}", "Searching for learning resources...".cyan());
    let provider: Arc<dyn SearchProvider> = Arc::new(DuckDuckGoClient::new()?);
    let finder = ResourceFinder::new(provider, config.max_results_per_concept);
    let resources = finder.find_for_prerequisites(&unknown).await;
    print_resources(&breakdown, &resources);

    if cli.save || cli.output.is_some() {
        let content = markdown::generate_markdown(&breakdown, &resources);
        let path = cli
            .output
            .unwrap_or_else(|| markdown::default_export_path(&breakdown.task_description));
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
            }
        }
        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        println!(
            "{} Results saved to: {}",
            "✓".green().bold(),
            path.display().to_string().cyan()
        );
    }

    Ok(())
}

fn print_breakdown(breakdown: &TaskBreakdown) {
    println!();
    println!("{} {}", "Task:".bold(), breakdown.task_description);
    println!(
        "{} {}",
        "Estimated complexity:".bold(),
        breakdown.estimated_complexity.to_string().yellow()
    );

    if !breakdown.prerequisites.is_empty() {
        println!("\n{}", "Prerequisites:".bold().cyan());
        for (i, prerequisite) in breakdown.prerequisites.iter().enumerate() {
            let priority = match prerequisite.priority {
                0 => "high".red(),
                1 => "medium".yellow(),
                _ => "low".green(),
            };
            println!(
                "  {}. {} [{}] ({})",
                i + 1,
                prerequisite.name.bold(),
                prerequisite.category,
                priority
            );
            if !prerequisite.description.is_empty() {
                println!("     {}", prerequisite.description.dimmed());
            }
        }
    }

    if !breakdown.suggested_learning_order.is_empty() {
        println!("\n{}", "Suggested learning order:".bold().cyan());
        for (i, item) in breakdown.suggested_learning_order.iter().enumerate() {
            println!("  {}. {}", i + 1, item);
        }
    }
    println!();
}

fn print_resources(
    breakdown: &TaskBreakdown,
    resources: &std::collections::HashMap<String, Vec<LearningResource>>,
) {
    let total: usize = resources.values().map(Vec::len).sum();
    if total == 0 {
        println!(
            "{}",
            "No learning resources found. Try again or rephrase the task.".yellow()
        );
        return;
    }

    println!("\n{}", "Learning resources:".bold().green());
    for prerequisite in &breakdown.prerequisites {
        let Some(found) = resources.get(&prerequisite.name) else {
            continue;
        };
        if found.is_empty() {
            continue;
        }
        println!("\n  {}", prerequisite.name.bold().cyan());
        for resource in found {
            println!("    - {}", resource.title);
            println!("      {}", resource.url.blue());
        }
    }
    println!();
}
