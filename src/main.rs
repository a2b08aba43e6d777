use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use vigil_core::VigilConfig;
use vigil_review::llm::LlmClient;
use vigil_review::ReviewRequester;

#[derive(Parser)]
#[command(
    name = "vigil",
    version,
    about = "AI pull-request reviews in CI",
    long_about = "Vigil reviews pull requests with any OpenAI-compatible endpoint.\n\n\
                   Diffs the checked-out branch against origin/<base>, sends the diff to a\n\
                   chat-completions endpoint, and prints the review. Built to run as a CI step:\n\
                   configuration comes from OPEN_WEBUI_URL, OPEN_WEBUI_TOKEN, and GITHUB_BASE_REF.\n\n\
                   Examples:\n  \
                     vigil                       Review the current branch against origin/main\n  \
                     vigil --base develop        Review against origin/develop\n  \
                     vigil init                  Create a .vigil.toml config file"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (default: .vigil.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Repository path
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Base branch to diff against (overrides GITHUB_BASE_REF)
    #[arg(long)]
    base: Option<String>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Create a default .vigil.toml configuration file
    #[command(long_about = "Create a default .vigil.toml configuration file.\n\n\
        Generates a commented-out template with all available options.\n\
        Fails if .vigil.toml already exists.")]
    Init,
}

const DEFAULT_CONFIG: &str = r#"# Vigil Configuration
# See: https://github.com/vigil-ci/vigil

[llm]
# Model identifier sent to the endpoint (or set OPEN_WEBUI_MODEL)
# model = "gpt-4o"
# base_url and api_key normally come from OPEN_WEBUI_URL / OPEN_WEBUI_TOKEN

[diff]
# Base branch to diff against (or set GITHUB_BASE_REF)
# base_branch = "main"
# Path patterns excluded from the diff
# exclude = ["package-lock.json", "yarn.lock", "pnpm-lock.yaml", "Cargo.lock", "*.svg"]
# Hard limit: diffs above this size are rejected, not truncated
# max_diff_chars = 30000
"#;

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    if let Some(Command::Init) = cli.command {
        let path = std::path::Path::new(".vigil.toml");
        if path.exists() {
            miette::bail!(".vigil.toml already exists");
        }
        std::fs::write(path, DEFAULT_CONFIG).into_diagnostic()?;
        println!("Created .vigil.toml with default configuration");
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => VigilConfig::from_file(path)?,
        None => {
            let default_path = std::path::Path::new(".vigil.toml");
            if default_path.exists() {
                VigilConfig::from_file(default_path)?
            } else {
                VigilConfig::default()
            }
        }
    };
    config.apply_env();
    if let Some(base) = &cli.base {
        config.diff.base_branch = base.clone();
    }

    // Sole fatal path: missing credentials exit 1 before any git or network
    // activity.
    config.validate()?;

    if cli.verbose {
        eprintln!("base branch: origin/{}", config.diff.base_branch);
        eprintln!("model: {}", config.llm.model);
        eprintln!("size limit: {} chars", config.diff.max_diff_chars);
    }

    let diff = match vigil_gitdiff::branch_diff(&cli.repo, &config.diff).await {
        Ok(diff) => {
            if cli.verbose {
                eprintln!("collected diff: {} chars", diff.chars().count());
            }
            Some(diff)
        }
        Err(e) => {
            eprintln!("warning: failed to collect diff, treating as no changes: {e}");
            None
        }
    };

    let llm = LlmClient::new(&config.llm)?;
    let requester = ReviewRequester::new(llm, config.diff.max_diff_chars);

    let is_tty = std::io::stderr().is_terminal();
    let spinner = if is_tty {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})")
                .expect("spinner template"),
        );
        pb.set_message("Requesting review...");
        pb.enable_steady_tick(std::time::Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    let outcome = requester.request(diff.as_deref()).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    // Upstream failures are printed as the review result; only configuration
    // errors fail the process.
    println!("{outcome}");
    Ok(())
}
