use crate::config::Config;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// `orchestrate` - classify, plan and gate shell commands before they run.
#[derive(Parser, Debug)]
#[command(name = "orchestrate")]
#[command(version)]
#[command(
    about = "Classify a shell command, build a checkpointed plan and gate it on safety thresholds.",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Command to evaluate. Everything after the first word is taken literally.
    /// A command starting with `config` must follow `--`, as in
    /// `orchestrate -- config set x`.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub input: Vec<String>,

    /// Read commands line by line until `quit` or `exit`
    #[arg(short, long)]
    pub interactive: bool,

    /// Escalate accumulated warnings to a WARN verdict (default)
    #[arg(long, overrides_with = "no_strict")]
    pub strict: bool,

    /// Let warnings pass silently
    #[arg(long = "no-strict", overrides_with = "strict")]
    pub no_strict: bool,

    /// Block plans whose divergence estimate exceeds this (0.0 - 1.0)
    #[arg(long, value_name = "FLOAT")]
    pub divergence_cap: Option<f64>,

    /// Block plans whose recovery-rate estimate falls below this (0.0 - 1.0)
    #[arg(long, value_name = "FLOAT")]
    pub recovery_threshold: Option<f64>,

    /// Config file (default: ~/.orchestrate/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Append every history record to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub audit_log: Option<PathBuf>,

    /// Print plans and blocked results as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        config_command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the effective configuration after env and flag overrides
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// `Some` only when a strictness flag was given.
    pub fn strict_override(&self) -> Option<bool> {
        if self.no_strict {
            Some(false)
        } else if self.strict {
            Some(true)
        } else {
            None
        }
    }

    /// The evaluated command, words joined by single spaces.
    pub fn command_line(&self) -> Option<String> {
        (!self.input.is_empty()).then(|| self.input.join(" "))
    }

    /// Flags take precedence over env and file values.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(strict) = self.strict_override() {
            config.gating.strict_mode = strict;
        }
        if let Some(cap) = self.divergence_cap {
            config.gating.divergence_cap = cap;
        }
        if let Some(threshold) = self.recovery_threshold {
            config.gating.recovery_threshold = threshold;
        }
        if let Some(path) = &self.audit_log {
            config.audit.log_path = Some(path.display().to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("orchestrate").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_has_no_flag_conflicts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_words_form_the_command() {
        let cli = parse(&["git", "status"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.command_line().as_deref(), Some("git status"));
    }

    #[test]
    fn hyphenated_words_after_the_command_are_literal() {
        let cli = parse(&["--no-strict", "rm", "-rf", "/"]);
        assert_eq!(cli.command_line().as_deref(), Some("rm -rf /"));
        assert_eq!(cli.strict_override(), Some(false));
    }

    #[test]
    fn quoted_command_is_one_word() {
        let cli = parse(&["--divergence-cap", "0.01", "kubectl get pods"]);
        assert_eq!(cli.command_line().as_deref(), Some("kubectl get pods"));
        assert_eq!(cli.divergence_cap, Some(0.01));
    }

    #[test]
    fn strict_flags_override_each_other() {
        assert_eq!(parse(&["--strict", "--no-strict", "ls"]).strict_override(), Some(false));
        assert_eq!(parse(&["--no-strict", "--strict", "ls"]).strict_override(), Some(true));
        assert_eq!(parse(&["ls"]).strict_override(), None);
    }

    #[test]
    fn interactive_needs_no_command() {
        let cli = parse(&["--interactive", "-v"]);
        assert!(cli.interactive);
        assert!(cli.command_line().is_none());
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn config_subcommands_parse() {
        let cli = parse(&["config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                config_command: ConfigCommands::Init { force: true }
            })
        ));
        let cli = parse(&["--config", "/tmp/x.toml", "config", "show"]);
        assert!(cli.config.is_some());
    }

    #[test]
    fn double_dash_turns_config_into_a_command() {
        let cli = parse(&["--", "config", "show"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.command_line().as_deref(), Some("config show"));

        let cli = parse(&["git", "config", "--list"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.command_line().as_deref(), Some("git config --list"));
    }

    #[test]
    fn overrides_apply_on_top_of_config() {
        let cli = parse(&[
            "--no-strict",
            "--recovery-threshold",
            "0.9",
            "--audit-log",
            "/tmp/audit.jsonl",
            "ls",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert!(!config.gating.strict_mode);
        assert!((config.gating.recovery_threshold - 0.9).abs() < f64::EPSILON);
        assert!((config.gating.divergence_cap - 0.10).abs() < f64::EPSILON);
        assert_eq!(config.audit.log_path.as_deref(), Some("/tmp/audit.jsonl"));
    }
}
