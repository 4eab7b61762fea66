use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pr_autotag::analyzer::DecisionEngine;
use pr_autotag::cli::{context, run_publish_workflow, ActionContext};
use pr_autotag::config::{self, Config};
use pr_autotag::domain::tag;
use pr_autotag::git::{GitHubHost, LocalRepository};
use pr_autotag::ui;

#[derive(Parser)]
#[command(
    name = "pr-autotag",
    version,
    about = "Create semantic version tags and releases from merged pull requests"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Act on the pull request event of the current workflow run (default)
    Run {
        #[arg(long, help = "Preview what would happen without making changes")]
        dry_run: bool,
    },
    /// Preview the decision from a local checkout
    Plan {
        #[arg(long, default_value = ".", help = "Repository path")]
        path: String,

        #[arg(long, help = "Text consulted when no commit calls for a bump")]
        fallback: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    if let Err(e) = execute(args).await {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn execute(args: Args) -> Result<()> {
    let mut config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;
    config.apply_env_inputs();

    match args.command.unwrap_or(Command::Run { dry_run: false }) {
        Command::Run { dry_run } => {
            config.dry_run |= dry_run;
            run(&config).await
        }
        Command::Plan { path, fallback } => plan(&config, &path, fallback.as_deref()),
    }
}

async fn run(config: &Config) -> Result<()> {
    let ctx = ActionContext::from_env()?;
    let event = ctx.load_event().context("Failed to read the pull request event")?;
    let host = GitHubHost::new(&ctx.owner, &ctx.repo, &ctx.token, ctx.api_url.as_deref())?;

    ui::display_status(&format!(
        "Deciding version tag for {}/{}#{}",
        ctx.owner, ctx.repo, event.number
    ));
    let result = run_publish_workflow(&host, &event, config).await?;

    ui::display_decision(&result.decision);
    for warning in &result.warnings {
        ui::display_warning(warning);
    }
    if result.tag_created {
        if let Some(tag) = result.decision.tag() {
            ui::display_success(&format!("Created tag {}", tag));
        }
    }
    if let Some(url) = &result.release_url {
        ui::display_success(&format!("Created release {}", url));
    }

    if let Some(path) = &ctx.output_path {
        context::write_outputs(path, &result)
            .with_context(|| format!("Failed to write outputs to {}", path.display()))?;
    }
    Ok(())
}

fn plan(config: &Config, path: &str, fallback: Option<&str>) -> Result<()> {
    let local = LocalRepository::open(path)?;
    let tags = local.tag_names()?;
    let latest = tag::latest(&tags);
    let messages = local.commit_messages_since(latest.as_ref().map(|t| t.name.as_str()))?;

    let source = match &latest {
        Some(t) => format!("since {}", t.name),
        None => "from the start of history".to_string(),
    };
    ui::display_commit_analysis(&messages, &source);

    let engine = DecisionEngine::from_config(config);
    let decision = engine.decide(&messages, &tags, fallback);
    let exists = decision.tag().is_some_and(|t| local.tag_exists(t));
    let decision = engine.resolve_existing(decision, exists);

    ui::display_decision(&decision);
    Ok(())
}
