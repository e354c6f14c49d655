use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_core::logging::LoggingConfig;
use folio_core::{Config, Portfolio, Session, Speaker, StepKind, Timeline, TimingConfig, init_logging};
use folio_ui::App;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = "folio.toml";

/// folio - a chat-style portfolio for the terminal
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "A scripted chat portfolio that runs in your terminal", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to folio.toml (default: ./folio.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Portfolio content file (overrides [content] path)
    #[arg(long, value_name = "PATH")]
    content: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive conversation
    Start,
    /// Print when each message, typing indicator and the unlock fire
    Plan {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate config and content, then print a summary
    Check,
    /// Write an example folio.toml
    Init,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    if let Commands::Init = cli.command {
        return cmd_init(&config_path);
    }

    let config = load_config(&config_path, cli.content.clone())?;

    let mut logging = LoggingConfig::from(config.logging.clone());
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    if let Commands::Start = cli.command {
        logging = logging.without_stderr();
    }
    let _guard = init_logging(logging).context("Failed to initialize logging")?;

    if cli.verbose {
        let source = if config_path.exists() { config_path.display().to_string() } else { "built-in defaults".into() };
        println!("{} Using config: {}", "Info:".blue().bold(), source);
    }

    match cli.command {
        Commands::Start => cmd_start(&config),
        Commands::Plan { json } => cmd_plan(&config, json),
        Commands::Check => cmd_check(&config, cli.verbose),
        Commands::Init => cmd_init(&config_path),
    }
}

/// Load config (defaults when the file is missing) and apply CLI overrides
fn load_config(path: &Path, content: Option<PathBuf>) -> Result<Config> {
    let mut config =
        Config::load_or_default(path).with_context(|| format!("Failed to load config from {}", path.display()))?;
    if let Some(content) = content {
        config.content.path = Some(content);
    }
    Ok(config)
}

fn load_portfolio(config: &Config) -> Result<Portfolio> {
    Portfolio::load(&config.content).context("Failed to load portfolio content")
}

/// Run the interactive view
fn cmd_start(config: &Config) -> Result<()> {
    let portfolio = load_portfolio(config)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    tracing::info!(
        entries = portfolio.script.len(),
        articles = portfolio.articles.len(),
        policy = config.panels.load_policy.as_str(),
        "starting folio session"
    );

    runtime.block_on(async {
        let session = Session::new(portfolio, config);
        let mut app = App::new(session);
        app.run().await.context("Terminal UI failed")
    })
}

/// One row of the `plan` report
#[derive(Debug, Serialize)]
struct PlanStep {
    at_ms: u64,
    kind: StepKind,
    index: usize,
    speaker: Option<Speaker>,
    text: Option<String>,
}

fn plan_steps(portfolio: &Portfolio, timing: &TimingConfig) -> Vec<PlanStep> {
    let timeline = Timeline::plan(&portfolio.script, timing);
    timeline
        .steps()
        .iter()
        .map(|step| {
            let entry = portfolio.script.get(step.index);
            let describe = step.kind == StepKind::Reveal;
            PlanStep {
                at_ms: step.at_ms,
                kind: step.kind,
                index: step.index,
                speaker: entry.filter(|_| step.kind != StepKind::Unlock).map(|e| e.speaker),
                text: entry.filter(|_| describe).map(|e| e.summary()),
            }
        })
        .collect()
}

fn format_plan_step(step: &PlanStep) -> String {
    let speaker = step.speaker.map(|s| s.as_str()).unwrap_or("");
    let text = step.text.as_deref().map(|t| folio_core::logging::preview(t, 60)).unwrap_or_default();
    match step.kind {
        StepKind::Unlock => format!("{:>7} ms  {:<7}", step.at_ms, step.kind.as_str()),
        _ => format!("{:>7} ms  {:<7} #{:<2} {:<8} {}", step.at_ms, step.kind.as_str(), step.index, speaker, text)
            .trim_end()
            .to_string(),
    }
}

/// Print the reveal timeline without starting the UI
fn cmd_plan(config: &Config, json: bool) -> Result<()> {
    let portfolio = load_portfolio(config)?;
    let steps = plan_steps(&portfolio, &config.timing);

    if json {
        println!("{}", serde_json::to_string_pretty(&steps).context("Failed to serialize plan")?);
        return Ok(());
    }

    let total = steps.last().map(|s| s.at_ms).unwrap_or(0);
    println!(
        "{} {} entries, quick actions unlock at {} ms",
        "Plan:".green().bold(),
        portfolio.script.len(),
        total.to_string().cyan()
    );
    for step in &steps {
        let line = format_plan_step(step);
        match step.kind {
            StepKind::TypingStarted => println!("{}", line.dimmed()),
            StepKind::Reveal => println!("{line}"),
            StepKind::Unlock => println!("{}", line.green()),
        }
    }
    Ok(())
}

/// Validate everything and print a summary
fn cmd_check(config: &Config, verbose: bool) -> Result<()> {
    let portfolio = load_portfolio(config)?;
    let timeline = Timeline::plan(&portfolio.script, &config.timing);

    let persona_entries = portfolio.script.iter().filter(|e| e.is_persona()).count();
    let external = portfolio.articles.iter().filter(|a| a.is_external()).count();

    println!("{}", "folio check".green().bold().underline());
    println!();
    println!("{} {}", "Persona:".blue().bold(), portfolio.persona.name.cyan());
    println!("  {}", portfolio.persona.subtitle());
    println!(
        "{} {} entries ({} persona, {} visitor), {} ms until unlock",
        "Script:".blue().bold(),
        portfolio.script.len(),
        persona_entries,
        portfolio.script.len() - persona_entries,
        timeline.total_ms()
    );
    println!(
        "{} {} ({} internal, {} external)",
        "Articles:".blue().bold(),
        portfolio.articles.len(),
        portfolio.articles.len() - external,
        external
    );
    println!("{} {} groups", "Skills:".blue().bold(), portfolio.skills.len());
    println!("{} {} roles", "Experience:".blue().bold(), portfolio.experience.len());
    println!(
        "{} lead {} ms, grace {} ms, panel load {} ms ({})",
        "Timing:".blue().bold(),
        config.timing.typing_lead_ms,
        config.timing.unlock_grace_ms,
        config.timing.panel_load_ms,
        config.panels.load_policy
    );

    if verbose {
        let source = config.content.path.as_deref().map(folio_core::logging::sanitize_path);
        println!("{} {}", "Content:".blue().bold(), source.unwrap_or_else(|| "built-in".into()));
    }

    println!();
    println!("{} Config and content are valid", "Success:".green().bold());
    Ok(())
}

/// Write the example config, refusing to overwrite
fn cmd_init(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists; remove it first to regenerate", path.display());
    }
    std::fs::write(path, Config::example()).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{} Created {}", "Success:".green().bold(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use folio_core::LoadPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["folio", "start"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.content.is_none());
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Start));
    }

    #[test]
    fn test_cli_with_paths() {
        let cli =
            Cli::try_parse_from(["folio", "--config", "/etc/folio.toml", "--content", "me.toml", "-v", "check"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/folio.toml")));
        assert_eq!(cli.content, Some(PathBuf::from("me.toml")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Check));
    }

    #[test]
    fn test_cli_plan_json() {
        let cli = Cli::try_parse_from(["folio", "plan", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Plan { json: true }));
        let cli = Cli::try_parse_from(["folio", "plan"]).unwrap();
        assert!(matches!(cli.command, Commands::Plan { json: false }));
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["folio"]).is_err());
    }

    #[test]
    fn test_init_writes_example_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("folio.toml");

        cmd_init(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[timing]"));

        let err = cmd_init(&path).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_load_config_missing_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(&temp.path().join("folio.toml"), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_with_overrides() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("folio.toml");
        std::fs::write(&path, "[panels]\nload_policy = \"once\"\n").unwrap();

        let config = load_config(&path, Some(PathBuf::from("/tmp/me.toml"))).unwrap();
        assert_eq!(config.panels.load_policy, LoadPolicy::Once);
        assert_eq!(config.content.path, Some(PathBuf::from("/tmp/me.toml")));
    }

    #[test]
    fn test_load_config_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("folio.toml");
        std::fs::write(&path, "invalid toml").unwrap();
        assert!(load_config(&path, None).is_err());
    }

    #[test]
    fn test_plan_steps_for_builtin_content() {
        let portfolio = Portfolio::builtin().unwrap();
        let steps = plan_steps(&portfolio, &TimingConfig::default());

        let first = &steps[0];
        assert_eq!((first.at_ms, first.kind, first.index), (1000, StepKind::Reveal, 0));
        assert_eq!(first.speaker, Some(Speaker::Persona));

        let last = steps.last().unwrap();
        assert_eq!(last.kind, StepKind::Unlock);
        assert_eq!(last.at_ms, 15_400);
        assert!(last.speaker.is_none());

        let reveals = steps.iter().filter(|s| s.kind == StepKind::Reveal).count();
        assert_eq!(reveals, portfolio.script.len());
        assert!(steps.iter().filter(|s| s.kind == StepKind::TypingStarted).all(|s| s.text.is_none()));
    }

    #[test]
    fn test_format_plan_step() {
        let step = PlanStep {
            at_ms: 1000,
            kind: StepKind::Reveal,
            index: 0,
            speaker: Some(Speaker::Persona),
            text: Some("hi".into()),
        };
        assert_eq!(format_plan_step(&step), "   1000 ms  reveal  #0  persona  hi");

        let unlock = PlanStep { at_ms: 5000, kind: StepKind::Unlock, index: 2, speaker: None, text: None };
        assert_eq!(format_plan_step(&unlock), "   5000 ms  unlock ");
    }

    #[test]
    fn test_check_rejects_missing_content() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.content.path = Some(temp.path().join("missing.toml"));
        assert!(cmd_check(&config, false).is_err());
    }

    #[test]
    fn test_check_builtin_content() {
        assert!(cmd_check(&Config::default(), true).is_ok());
    }

    #[test]
    fn test_plan_json_output() {
        let portfolio = Portfolio::builtin().unwrap();
        let steps = plan_steps(&portfolio, &TimingConfig::default());
        let json = serde_json::to_value(&steps).unwrap();
        assert_eq!(json[0]["kind"], "reveal");
        assert_eq!(json[0]["speaker"], "persona");
        assert_eq!(json[0]["at_ms"], 1000);
    }
}
