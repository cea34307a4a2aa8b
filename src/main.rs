use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use linkpeel::config::{load_rules_dir, user_rules_dir};
use linkpeel::rules::{RuleSet, builtin_rule_set};

#[derive(Parser)]
#[command(name = "linkpeel")]
#[command(
	author,
	version,
	about = "Recover the original destination URL from link-protection redirects"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Only report whether the URL is recognized as a protected link
	#[arg(long, requires = "url")]
	check: bool,

	/// Load rules from this directory instead of the built-in set
	#[arg(long, value_name = "DIR", global = true)]
	rules: Option<PathBuf>,

	/// Enable debug logging
	#[arg(short, long, global = true)]
	verbose: bool,

	/// URL to unwrap
	url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
	/// Rule management commands
	Rules {
		#[command(subcommand)]
		action: RulesAction,
	},
}

#[derive(Subcommand)]
enum RulesAction {
	/// List the active rules in evaluation order
	List,
	/// Check a rules directory for errors without evaluating anything
	Validate {
		/// Directory of *.toml rule files
		#[arg(value_name = "DIR")]
		dir: PathBuf,
	},
}

/// The rules the current invocation evaluates against.
enum ActiveRules {
	Builtin(&'static RuleSet),
	Directory(RuleSet, PathBuf),
}

impl ActiveRules {
	fn rule_set(&self) -> &RuleSet {
		match self {
			ActiveRules::Builtin(rule_set) => rule_set,
			ActiveRules::Directory(rule_set, _) => rule_set,
		}
	}

	fn describe(&self) -> String {
		match self {
			ActiveRules::Builtin(_) => "built-in".to_string(),
			ActiveRules::Directory(_, dir) => dir.display().to_string(),
		}
	}
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	tracing_subscriber::fmt()
		.with_max_level(if cli.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::WARN
		})
		.with_writer(std::io::stderr)
		.init();

	// Handle subcommands
	if let Some(command) = cli.command {
		return match command {
			Commands::Rules { action } => match action {
				RulesAction::List => handle_rules_list(cli.rules.as_deref()),
				RulesAction::Validate { dir } => handle_rules_validate(&dir),
			},
		};
	}

	// Handle URL unwrapping
	if let Some(ref url) = cli.url {
		let active = resolve_rules(cli.rules.as_deref())?;
		return if cli.check {
			handle_check(active.rule_set(), url)
		} else {
			handle_unwrap(active.rule_set(), url)
		};
	}

	// No URL specified - this shouldn't happen due to arg_required_else_help
	Ok(ExitCode::SUCCESS)
}

/// Pick the rule source: an explicit directory beats the user rules
/// directory, which beats the built-in catalog.
fn resolve_rules(dir: Option<&Path>) -> Result<ActiveRules> {
	if let Some(dir) = dir {
		let rule_set = load_rules_dir(dir)
			.with_context(|| format!("Failed to load rules from {}", dir.display()))?;
		return Ok(ActiveRules::Directory(rule_set, dir.to_path_buf()));
	}

	if let Some(user_dir) = user_rules_dir()
		&& user_dir.is_dir()
	{
		let rule_set = load_rules_dir(&user_dir)
			.with_context(|| format!("Failed to load rules from {}", user_dir.display()))?;
		return Ok(ActiveRules::Directory(rule_set, user_dir));
	}

	Ok(ActiveRules::Builtin(builtin_rule_set()))
}

fn handle_unwrap(rule_set: &RuleSet, url: &str) -> Result<ExitCode> {
	match rule_set.evaluate(url) {
		Some(destination) => {
			println!("{destination}");
			Ok(ExitCode::SUCCESS)
		}
		None => {
			eprintln!("no rule matched");
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_check(rule_set: &RuleSet, url: &str) -> Result<ExitCode> {
	if rule_set.contains_match(url) {
		println!("protected");
		Ok(ExitCode::SUCCESS)
	} else {
		println!("not protected");
		Ok(ExitCode::FAILURE)
	}
}

fn handle_rules_list(dir: Option<&Path>) -> Result<ExitCode> {
	let active = resolve_rules(dir)?;

	println!("Rules (in evaluation order, from {}):", active.describe());
	for rule in active.rule_set().rules() {
		println!("  {}", rule.name());
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_rules_validate(dir: &Path) -> Result<ExitCode> {
	match load_rules_dir(dir) {
		Ok(rule_set) => {
			println!(
				"All rule files are valid: {} ({} rules)",
				dir.display(),
				rule_set.rules().len()
			);
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Rule error: {e}");
			Ok(ExitCode::FAILURE)
		}
	}
}
