//! CLI Command Handlers
//!
//! Each handler takes CLI args, the repository client and Output, and
//! returns ExitCode.

use std::io::{BufRead, Write};

use crate::api::{ApiError, CastingClient};
use crate::cli::{ApplyCmd, CastingArgs, DeleteCmd, ExitCode, ListCmd, Output, StatusOk, UpdateCmd};
use crate::models::{normalize_optional, ApplicationFields, Casting, CastingId};

/// Exit code for a repository failure
fn exit_code_for(err: &ApiError) -> ExitCode {
    match err {
        ApiError::Network(_) => ExitCode::NetworkError,
        ApiError::Api { .. } => ExitCode::ApiError,
        ApiError::InvalidResponse(_) => ExitCode::Error,
    }
}

fn fail(output: &Output, context: &str, err: ApiError) -> ExitCode {
    tracing::warn!(
        error = %err,
        status = ?err.status(),
        network = err.is_network(),
        "{}",
        context
    );
    output.error(format!("{}: {}", context, err), exit_code_for(&err))
}

fn print_casting(output: &Output, casting: &Casting) -> ExitCode {
    if output.json {
        if let Err(e) = output.print(casting) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        println!("{}", casting);
    }
    ExitCode::Success
}

// =============================================================================
// List Command
// =============================================================================

pub async fn list_cmd(cmd: ListCmd, client: &CastingClient, output: &Output) -> ExitCode {
    output.info(format!("Fetching castings from {}", client.base_url()));

    match client.list_castings().await {
        Ok(mut castings) => {
            if let Some(filter) = cmd.status {
                castings.retain(|c| filter.matches(&c.status));
            }

            if output.json {
                if let Err(e) = output.print(&castings) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            } else if castings.is_empty() {
                output.info("No castings found");
            } else {
                for casting in &castings {
                    println!("{}", casting);
                }
            }
            ExitCode::Success
        }
        Err(e) => fail(output, "Could not list castings", e),
    }
}

// =============================================================================
// Create / Update Commands
// =============================================================================

pub async fn create_cmd(args: CastingArgs, client: &CastingClient, output: &Output) -> ExitCode {
    let fields = match args.to_fields() {
        Ok(f) => f,
        Err(msg) => return output.error(msg, ExitCode::InvalidArgs),
    };

    match client.create_casting(&fields).await {
        Ok(casting) => {
            output.info(format!("Created casting {}", casting.id));
            print_casting(output, &casting)
        }
        Err(e) => fail(output, "Error saving casting", e),
    }
}

pub async fn update_cmd(cmd: UpdateCmd, client: &CastingClient, output: &Output) -> ExitCode {
    let fields = match cmd.fields.to_fields() {
        Ok(f) => f,
        Err(msg) => return output.error(msg, ExitCode::InvalidArgs),
    };
    let id = CastingId::parse(&cmd.id);

    match client.update_casting(&id, &fields).await {
        Ok(casting) => {
            output.info(format!("Updated casting {}", casting.id));
            print_casting(output, &casting)
        }
        Err(e) => fail(output, "Error saving casting", e),
    }
}

// =============================================================================
// Delete Command
// =============================================================================

/// Ask a yes/no question; anything but y/yes is a no
pub fn confirm(prompt: &str, input: &mut impl BufRead) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = std::io::stderr().flush();

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub async fn delete_cmd(
    cmd: DeleteCmd,
    client: &CastingClient,
    output: &Output,
    input: &mut impl BufRead,
) -> ExitCode {
    let id = CastingId::parse(&cmd.id);

    if !cmd.yes && !confirm(&format!("Delete casting {}?", id), input) {
        return output.error("Delete cancelled", ExitCode::Cancelled);
    }

    match client.delete_casting(&id).await {
        Ok(()) => {
            output.info(format!("Deleted casting {}", id));
            if output.json {
                if let Err(e) = output.print(StatusOk::default()) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            }
            ExitCode::Success
        }
        Err(e) => fail(output, "Error deleting casting", e),
    }
}

// =============================================================================
// Apply Command
// =============================================================================

pub async fn apply_cmd(cmd: ApplyCmd, client: &CastingClient, output: &Output) -> ExitCode {
    let required = [
        ("Full Name", &cmd.name),
        ("Email", &cmd.email),
        ("Role fit", &cmd.role_fit),
        ("Experience", &cmd.experience),
    ];
    if let Some((label, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return output.error(format!("{} is required", label), ExitCode::InvalidArgs);
    }

    let fields = ApplicationFields {
        casting: CastingId::parse(&cmd.id),
        full_name: cmd.name.trim().to_string(),
        email: cmd.email.trim().to_string(),
        phone: normalize_optional(cmd.phone),
        social_media_links: normalize_optional(cmd.social),
        role_fit: cmd.role_fit.trim().to_string(),
        experience: cmd.experience.trim().to_string(),
    };

    match client.create_application(&fields).await {
        Ok(()) => {
            output.info("Application submitted! We'll be in touch.");
            if output.json {
                if let Err(e) = output.print(StatusOk::default()) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            }
            ExitCode::Success
        }
        Err(e) => fail(output, "Error submitting application", e),
    }
}
