//! CLI - Command Line Interface for cruisecast
//!
//! Every repository operation is scriptable. With `--json` (or when stdout
//! is not a terminal) output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Browse open castings
//! cruisecast list --status open
//!
//! # Create and apply
//! cruisecast create --title Host --description "Lead the show" \
//!     --requirement Confident --requirement Funny --deadline 2025-01-31
//! cruisecast apply 1 --name Jane --email j@x.com --role-fit "..." --experience "..."
//!
//! # Remove without prompting
//! cruisecast delete 1 --yes
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::{parse_date, CastingFields, CastingStatus};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Server unreachable
    NetworkError = 3,
    /// Server answered with an error status
    ApiError = 4,
    /// User declined a confirmation prompt
    Cancelled = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// cruisecast - Cruise TV casting calls in your terminal
///
/// Run without arguments to launch the interactive TUI.
/// Use subcommands for scripting.
#[derive(Parser, Debug)]
#[command(
    name = "cruisecast",
    version,
    about = "Browse and manage Cruise TV casting calls",
    long_about = "Browse open casting calls, apply to them, and manage the \
                  listings from the terminal.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  cruisecast                          Launch interactive TUI\n\
                  cruisecast --admin                  Launch TUI on the admin screen\n\
                  cruisecast list --json              List castings as JSON\n\
                  cruisecast delete 3 --yes           Delete without prompting"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Backend base URL (overrides config and CRUISECAST_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Open the TUI on the admin screen
    #[arg(long)]
    pub admin: bool,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List casting opportunities
    #[command(visible_alias = "ls")]
    List(ListCmd),

    /// Create a casting
    Create(CastingArgs),

    /// Replace every field of a casting
    Update(UpdateCmd),

    /// Delete a casting
    #[command(visible_alias = "rm")]
    Delete(DeleteCmd),

    /// Apply to a casting
    Apply(ApplyCmd),
}

/// List castings in server order
#[derive(Args, Debug)]
pub struct ListCmd {
    /// Only show castings with this status
    #[arg(long, short = 's', value_enum)]
    pub status: Option<StatusFilter>,
}

/// Status filter for listings
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusFilter {
    Open,
    Closed,
}

impl StatusFilter {
    pub fn matches(self, status: &CastingStatus) -> bool {
        match self {
            StatusFilter::Open => status.is_open(),
            StatusFilter::Closed => !status.is_open(),
        }
    }
}

/// Writable casting fields
#[derive(Args, Debug, Clone)]
pub struct CastingArgs {
    /// Casting title
    #[arg(long, short = 't')]
    pub title: String,

    /// Casting description
    #[arg(long, short = 'd')]
    pub description: String,

    /// One requirement; repeat for more
    #[arg(long = "requirement", short = 'r', required = true)]
    pub requirements: Vec<String>,

    /// Application deadline (YYYY-MM-DD)
    #[arg(long)]
    pub deadline: String,

    /// External link with more information
    #[arg(long, short = 'l')]
    pub link: Option<String>,

    /// Casting status
    #[arg(long, default_value = "open")]
    pub status: String,
}

impl CastingArgs {
    /// Validate into a request body
    pub fn to_fields(&self) -> Result<CastingFields, String> {
        let deadline = parse_date(&self.deadline).ok_or_else(|| {
            format!(
                "Invalid deadline '{}' (expected YYYY-MM-DD)",
                self.deadline
            )
        })?;

        let requirements: Vec<String> = self
            .requirements
            .iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        if requirements.is_empty() {
            return Err("At least one requirement is needed".to_string());
        }

        if self.status.trim().is_empty() {
            return Err("Status cannot be empty".to_string());
        }

        Ok(CastingFields {
            status: CastingStatus::parse(&self.status),
            ..CastingFields::new(
                self.title.trim(),
                self.description.trim(),
                requirements,
                deadline,
            )
            .with_external_link(self.link.clone())
        })
    }
}

/// Replace a casting by id
#[derive(Args, Debug)]
pub struct UpdateCmd {
    /// Casting id
    pub id: String,

    #[command(flatten)]
    pub fields: CastingArgs,
}

/// Delete a casting by id
#[derive(Args, Debug)]
pub struct DeleteCmd {
    /// Casting id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Submit an application
#[derive(Args, Debug)]
pub struct ApplyCmd {
    /// Casting id
    pub id: String,

    /// Full name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Contact email
    #[arg(long, short = 'e')]
    pub email: String,

    /// Phone number
    #[arg(long, short = 'p')]
    pub phone: Option<String>,

    /// Social media links (Instagram, TikTok, etc.)
    #[arg(long, short = 's')]
    pub social: Option<String>,

    /// Why you are a fit for this role
    #[arg(long)]
    pub role_fit: String,

    /// Relevant experience
    #[arg(long)]
    pub experience: String,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Status OK response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusOk {
    pub status: &'static str,
}

impl Default for StatusOk {
    fn default() -> Self {
        Self { status: "ok" }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["cruisecast"]);
        assert!(!cli.is_cli_mode());
        assert!(!cli.admin);

        let cli = Cli::parse_from(["cruisecast", "--admin"]);
        assert!(cli.admin);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "cruisecast",
            "list",
            "--json",
            "--quiet",
            "--api-url",
            "http://example.test/api",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.api_url.as_deref(), Some("http://example.test/api"));
    }

    #[test]
    fn test_list_status_filter() {
        let cli = Cli::parse_from(["cruisecast", "list", "--status", "closed"]);
        let Some(Command::List(cmd)) = cli.command else {
            panic!("Expected List command");
        };
        assert_eq!(cmd.status, Some(StatusFilter::Closed));
        assert!(StatusFilter::Closed.matches(&CastingStatus::Other("archived".into())));
        assert!(!StatusFilter::Closed.matches(&CastingStatus::Open));
    }

    #[test]
    fn test_create_collects_requirements() {
        let cli = Cli::parse_from([
            "cruisecast",
            "create",
            "--title",
            "Host",
            "--description",
            "Lead the show",
            "-r",
            "Confident",
            "-r",
            " ",
            "-r",
            "Funny",
            "--deadline",
            "2025-01-31",
            "--link",
            "",
        ]);
        let Some(Command::Create(args)) = cli.command else {
            panic!("Expected Create command");
        };

        let fields = args.to_fields().unwrap();
        assert_eq!(fields.requirements, vec!["Confident", "Funny"]);
        assert_eq!(fields.external_link, None);
        assert_eq!(fields.status, CastingStatus::Open);
    }

    #[test]
    fn test_create_rejects_bad_deadline() {
        let cli = Cli::parse_from([
            "cruisecast",
            "create",
            "-t",
            "Host",
            "-d",
            "x",
            "-r",
            "y",
            "--deadline",
            "31/01/2025",
        ]);
        let Some(Command::Create(args)) = cli.command else {
            panic!("Expected Create command");
        };
        assert!(args.to_fields().unwrap_err().contains("deadline"));
    }

    #[test]
    fn test_update_takes_id_and_status() {
        let cli = Cli::parse_from([
            "cruisecast",
            "update",
            "7",
            "-t",
            "Host",
            "-d",
            "x",
            "-r",
            "y",
            "--deadline",
            "2025-01-31",
            "--status",
            "Closed",
        ]);
        let Some(Command::Update(cmd)) = cli.command else {
            panic!("Expected Update command");
        };
        assert_eq!(cmd.id, "7");
        assert_eq!(cmd.fields.to_fields().unwrap().status, CastingStatus::Closed);
    }

    #[test]
    fn test_apply_optional_fields() {
        let cli = Cli::parse_from([
            "cruisecast",
            "apply",
            "1",
            "--name",
            "Jane",
            "--email",
            "j@x.com",
            "--role-fit",
            "I love boats",
            "--experience",
            "Ten years",
        ]);
        let Some(Command::Apply(cmd)) = cli.command else {
            panic!("Expected Apply command");
        };
        assert_eq!(cmd.name, "Jane");
        assert!(cmd.phone.is_none());
        assert!(cmd.social.is_none());
    }

    #[test]
    fn test_delete_requires_id() {
        assert!(Cli::try_parse_from(["cruisecast", "delete"]).is_err());
        let cli = Cli::parse_from(["cruisecast", "rm", "3", "-y"]);
        assert!(matches!(cli.command, Some(Command::Delete(DeleteCmd { yes: true, .. }))));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::ApiError), 4);
        assert_eq!(i32::from(ExitCode::Cancelled), 5);
    }
}
