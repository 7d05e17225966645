use crate::app::{interactive, report};
use crate::cli::{Cli, Commands, ConfigCommands};
use crate::config::Config;
use crate::orchestrator::{Orchestrator, SubmitOutcome};
use crate::ui::style;
use anyhow::{Context, Result, bail};
use std::process::ExitCode;

/// Exit status for a rejected command.
pub const BLOCKED_EXIT_CODE: u8 = 1;

/// Load config with env overrides, then apply flags on top.
pub fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config
        .validate()
        .context("Invalid configuration after command-line overrides")?;
    Ok(config)
}

pub async fn dispatch(cli: Cli) -> Result<ExitCode> {
    if let Some(Commands::Config { config_command }) = &cli.command {
        return run_config(&cli, *config_command);
    }

    let config = effective_config(&cli)?;
    let orchestrator = Orchestrator::new(&config).context("Failed to start orchestrator")?;

    if cli.interactive {
        interactive::run(&orchestrator, cli.json).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command_line() else {
        bail!("No command given. Pass a COMMAND or use --interactive (see --help).");
    };

    let outcome = orchestrator.submit(&command);
    print_outcome(&outcome, cli.json)?;
    Ok(exit_code(&outcome))
}

pub fn exit_code(outcome: &SubmitOutcome) -> ExitCode {
    match outcome {
        SubmitOutcome::Approved(_) => ExitCode::SUCCESS,
        SubmitOutcome::Blocked(_) => ExitCode::from(BLOCKED_EXIT_CODE),
    }
}

fn print_outcome(outcome: &SubmitOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        println!("{}", report::render_outcome(outcome));
    }
    Ok(())
}

fn run_config(cli: &Cli, command: ConfigCommands) -> Result<ExitCode> {
    match command {
        ConfigCommands::Show => {
            let config = effective_config(cli)?;
            println!(
                "{}",
                style::dim(format!("# {}", config.config_path.display()))
            );
            print!(
                "{}",
                toml::to_string_pretty(&config).context("Failed to serialize config")?
            );
        }
        ConfigCommands::Init { force } => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => Config::default_path()?,
            };
            let written = init_config(&path, force)?;
            println!(
                "{} {}",
                style::success("✓"),
                format_args!("Wrote default config to {}", style::value(written.display()))
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Write a default config to `path`. Refuses to clobber unless `force`.
pub fn init_config(path: &std::path::Path, force: bool) -> Result<std::path::PathBuf> {
    if path.exists() && !force {
        bail!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }
    let config = Config {
        config_path: path.to_path_buf(),
        ..Config::default()
    };
    config.save()?;
    tracing::info!(path = %path.display(), "default config written");
    Ok(config.config_path)
}
