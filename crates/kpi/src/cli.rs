//! Clap CLI definitions for the `kpi` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// kpi -- evaluate financial KPI formulas.
///
/// Built-in and user-defined KPIs are plain arithmetic formulas over named
/// financial variables, evaluated against one subject's snapshot.
#[derive(Parser, Debug)]
#[command(
    name = "kpi",
    about = "Evaluate financial KPI formulas",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Config file (default: .kpi/config.yaml if found).
    #[arg(long, global = true, env = "KPI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List KPI definitions.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one KPI definition.
    Show(ShowArgs),

    /// Evaluate a registered KPI.
    Eval(EvalArgs),

    /// Evaluate an ad-hoc formula.
    Calc(CalcArgs),

    /// Check a formula without evaluating it.
    Check(CheckArgs),

    /// Print the bindings snapshot in use.
    Vars(VarsArgs),

    /// Generate shell completion scripts.
    Completion(CompletionArgs),
}

/// Where variable values come from.
#[derive(Args, Debug, Clone, Default)]
pub struct BindingsArgs {
    /// Bindings file (JSON, TOML or YAML map of name to number).
    #[arg(short = 'b', long)]
    pub bindings: Option<PathBuf>,

    /// Override one variable (NAME=VALUE), repeatable.
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,
}

/// Arguments for `kpi list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show this category.
    #[arg(short = 'c', long)]
    pub category: Option<String>,

    /// Only show built-in KPIs.
    #[arg(long, conflicts_with = "user")]
    pub built_in: bool,

    /// Only show user-defined KPIs.
    #[arg(long)]
    pub user: bool,
}

/// Arguments for `kpi show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// KPI id.
    pub id: String,
}

/// Arguments for `kpi eval`.
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// KPI id.
    pub id: String,

    #[command(flatten)]
    pub bindings: BindingsArgs,

    /// Label of the entity the bindings describe.
    #[arg(short = 's', long)]
    pub subject: Option<String>,
}

/// Arguments for `kpi calc`.
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Formula, e.g. "Net_Income / Revenue * 100".
    pub formula: String,

    #[command(flatten)]
    pub bindings: BindingsArgs,
}

/// Arguments for `kpi check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Formula to check.
    pub formula: String,

    #[command(flatten)]
    pub bindings: BindingsArgs,
}

/// Arguments for `kpi vars`.
#[derive(Args, Debug)]
pub struct VarsArgs {
    #[command(flatten)]
    pub bindings: BindingsArgs,
}

/// Arguments for `kpi completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate bash completions.
    Bash,
    /// Generate zsh completions.
    Zsh,
    /// Generate fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_eval_with_vars() {
        let cli = Cli::try_parse_from([
            "kpi",
            "eval",
            "operating_cf_debt",
            "--var",
            "Total_Debt=100",
            "--var",
            "Revenue=5",
            "--subject",
            "Acme",
            "--json",
        ])
        .unwrap();
        assert!(cli.global.json);
        match cli.command {
            Some(Commands::Eval(args)) => {
                assert_eq!(args.id, "operating_cf_debt");
                assert_eq!(args.bindings.vars, vec!["Total_Debt=100", "Revenue=5"]);
                assert_eq!(args.subject.as_deref(), Some("Acme"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn built_in_conflicts_with_user() {
        assert!(Cli::try_parse_from(["kpi", "list", "--built-in", "--user"]).is_err());
    }
}
