use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod logging;
mod ui;

use app::App;
use helpcenter::completion::{CompletionTracker, KeyValueStore, MemoryStore};
use helpcenter::config::Config;
use helpcenter::content::{ContentSource, ContentStore};
use helpcenter::navigation::{NavigationController, ViewLocation};
use helpcenter::search::SearchIndex;
use helpcenter::view::sanitize;

#[derive(Parser)]
#[command(name = "helpcenter")]
#[command(about = "Browse help topics and check off troubleshooting steps")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Content document path or URL (overrides content.source)
    #[arg(long)]
    content: Option<String>,

    /// Keep completion flags in memory only
    #[arg(long)]
    ephemeral: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search categories, topics and steps
    Search {
        /// Search term (case-insensitive substring)
        term: Vec<String>,
    },

    /// List categories, or the topics of one category
    List {
        /// Category slug
        category: Option<String>,
    },

    /// Show the steps of a topic
    Show {
        /// Category slug
        category: String,

        /// Topic slug
        topic: String,
    },

    /// Mark a step done, or undo it
    Toggle {
        /// Category slug
        category: String,

        /// Topic slug
        topic: String,

        /// Zero-based step index
        index: usize,
    },

    /// Show content statistics and resolved paths
    Info,

    /// Write the current configuration to .helpcenter/config.toml
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(source) = cli.content {
        config.content.source = source;
    }

    // Determine if we're running in TUI mode (no subcommand)
    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Search { term }) => {
            let nav = build_navigation(&config, cli.ephemeral).await?;
            cmd_search(nav, &term.join(" "));
        }
        Some(Commands::List { category }) => {
            let nav = build_navigation(&config, cli.ephemeral).await?;
            cmd_list(&nav, category.as_deref())?;
        }
        Some(Commands::Show { category, topic }) => {
            let nav = build_navigation(&config, cli.ephemeral).await?;
            cmd_show(&nav, &category, &topic)?;
        }
        Some(Commands::Toggle {
            category,
            topic,
            index,
        }) => {
            let nav = build_navigation(&config, cli.ephemeral).await?;
            cmd_toggle(nav, &category, &topic, index)?;
        }
        Some(Commands::Info) => {
            cmd_info(&config).await;
        }
        Some(Commands::Init) => {
            config.save()?;
            println!(
                "Wrote configuration to {}",
                Config::local_config_path().display()
            );
        }
        None => {
            // No subcommand = launch TUI
            run_tui(config, cli.ephemeral, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

fn completion_store(config: &Config, ephemeral: bool) -> Box<dyn KeyValueStore> {
    if ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(config.file_store())
    }
}

fn navigation(config: &Config, store: ContentStore, ephemeral: bool) -> NavigationController {
    let tracker = CompletionTracker::load(completion_store(config, ephemeral));
    NavigationController::new(store, tracker, SearchIndex::new(config.search.max_results))
}

async fn build_navigation(config: &Config, ephemeral: bool) -> Result<NavigationController> {
    let source = config.content_source();
    let store = ContentStore::load(&source)
        .await
        .with_context(|| format!("The content could not be loaded from {source}"))?;
    Ok(navigation(config, store, ephemeral))
}

async fn run_tui(config: Config, ephemeral: bool, log_file_path: Option<PathBuf>) -> Result<()> {
    let (store, load_error) = match ContentStore::load(&config.content_source()).await {
        Ok(store) => (store, None),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load help content");
            (ContentStore::empty(), Some(e.to_string()))
        }
    };

    let nav = navigation(&config, store, ephemeral);
    let mut app = App::new(config, nav, load_error);
    let result = app.run().await;

    // Print log file path on exit if logs were written
    logging::report_log_file(log_file_path.as_deref());

    result
}

fn cmd_search(mut nav: NavigationController, term: &str) {
    nav.search(term);
    let hits = match nav.location() {
        ViewLocation::SearchResults { hits, .. } => hits.clone(),
        _ => Vec::new(),
    };

    if hits.is_empty() {
        println!("No matches");
        return;
    }

    for hit in hits {
        let mut path = hit.category_slug.clone();
        if let Some(topic) = &hit.topic_slug {
            path.push('/');
            path.push_str(topic);
        }
        if let Some(index) = hit.step_index {
            path.push_str(&format!("#{index}"));
        }
        println!(
            "{:<9} {}  ({})  [{}]",
            hit.kind,
            sanitize(&hit.title),
            sanitize(&hit.subtitle),
            path
        );
    }
}

fn cmd_list(nav: &NavigationController, category: Option<&str>) -> Result<()> {
    let store = nav.store();

    let Some(slug) = category else {
        if store.is_empty() {
            println!("No content available");
            return Ok(());
        }
        println!("Areas ({} categories)", store.categories().len());
        println!("{}", "─".repeat(60));
        for category in store.categories() {
            println!(
                "{:<30} {} ({} topics)",
                category.slug,
                sanitize(&category.title),
                category.topics.len()
            );
        }
        return Ok(());
    };

    let category = store
        .find_category(slug)
        .with_context(|| format!("Unknown category '{slug}'"))?;
    println!("{}", sanitize(&category.title));
    println!("{}", "─".repeat(60));
    for topic in &category.topics {
        let done = nav
            .tracker()
            .done_count(&category.slug, &topic.slug, topic.steps.len());
        println!(
            "{:<30} {} ({}/{} done)",
            topic.slug,
            sanitize(&topic.title),
            done,
            topic.steps.iter().filter(|s| s.is_completable()).count()
        );
    }
    Ok(())
}

fn cmd_show(nav: &NavigationController, category: &str, topic: &str) -> Result<()> {
    let found = nav
        .store()
        .topic(category, topic)
        .with_context(|| format!("Unknown topic '{category}/{topic}'"))?;

    println!("{}", sanitize(&found.title));
    if let Some(intro) = &found.intro {
        println!("{}", sanitize(intro));
    }
    println!("{}", "─".repeat(60));

    if found.steps.is_empty() {
        println!("No steps have been added for this topic yet.");
        return Ok(());
    }

    for (index, step) in found.steps.iter().enumerate() {
        let marker = if !step.is_completable() {
            "   "
        } else if nav.tracker().is_done(category, topic, index) {
            "[x]"
        } else {
            "[ ]"
        };
        let critical = if step.is_critical { " [Important]" } else { "" };
        println!(
            "{index:>2}. {marker} {} [{}]{critical}",
            sanitize(&step.title),
            step.action_type.label()
        );
        if let Some(description) = &step.description {
            println!("       {}", sanitize(description));
        }
    }
    Ok(())
}

fn cmd_toggle(mut nav: NavigationController, category: &str, topic: &str, index: usize) -> Result<()> {
    nav.select(category);
    if nav.current_category().is_none() {
        anyhow::bail!("Unknown category '{category}'");
    }
    nav.select(topic);
    if nav.current_topic().is_none() {
        anyhow::bail!("Unknown topic '{category}/{topic}'");
    }

    match nav.toggle_step(index) {
        Some(true) => println!("Step {index} marked as done"),
        Some(false) => println!("Step {index} marked as not done"),
        None => anyhow::bail!("Topic '{category}/{topic}' has no step {index}"),
    }
    Ok(())
}

async fn cmd_info(config: &Config) {
    let source = config.content_source();
    println!("Content:  {source}");
    if let ContentSource::File(path) = &source {
        if !path.exists() {
            println!("          (file not found)");
        }
    }
    let storage = config.file_store();
    println!("Storage:  {}", storage.path().display());
    let done = CompletionTracker::load(Box::new(storage)).done_keys();
    println!("Done:     {} steps", done.len());
    println!("Logs:     {}", config.logs_path().display());

    match ContentStore::load(&source).await {
        Ok(store) => {
            let stats = store.stats();
            println!(
                "Loaded:   {} categories, {} topics, {} steps",
                stats.categories, stats.topics, stats.steps
            );
        }
        Err(e) => println!("Loaded:   failed ({e})"),
    }
}
