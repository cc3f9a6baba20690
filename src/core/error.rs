//! Error types for workspace-drift with contextual messages and exit codes
//!
//! Exit code 1 is reserved for a check that found drift, so fatal errors
//! use dedicated codes that CI can tell apart from a failed check.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for fatal errors (code 1 is reserved for drift findings)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (cascade map, scope, invalid args)
  User = 2,
  /// System error (workspace enumeration, I/O)
  System = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for workspace-drift
#[derive(Debug)]
pub enum DriftError {
  /// Configuration errors (cascade map, manifests, scope)
  Config(ConfigError),

  /// Workspace enumeration errors
  Enumeration(EnumerationError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl DriftError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    DriftError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      DriftError::Message { message, context, help } => DriftError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      DriftError::Config(_) => ExitCode::User,
      DriftError::Enumeration(_) => ExitCode::System,
      DriftError::Io(_) => ExitCode::System,
      DriftError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      DriftError::Config(e) => e.help_message(),
      DriftError::Enumeration(e) => e.help_message(),
      DriftError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for DriftError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DriftError::Config(e) => write!(f, "{}", e),
      DriftError::Enumeration(e) => write!(f, "{}", e),
      DriftError::Io(e) => write!(f, "I/O error: {}", e),
      DriftError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for DriftError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      DriftError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for DriftError {
  fn from(err: io::Error) -> Self {
    DriftError::Io(err)
  }
}

impl From<String> for DriftError {
  fn from(msg: String) -> Self {
    DriftError::message(msg)
  }
}

impl From<&str> for DriftError {
  fn from(msg: &str) -> Self {
    DriftError::message(msg)
  }
}

impl From<serde_json::Error> for DriftError {
  fn from(err: serde_json::Error) -> Self {
    DriftError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors (all fatal, all before any comparison)
#[derive(Debug)]
pub enum ConfigError {
  /// Cascade map file not found
  MapNotFound { path: PathBuf },

  /// Cascade map exists but cannot be parsed
  MapParse { path: PathBuf, message: String },

  /// A workspace member's package.json exists but cannot be parsed
  ManifestParse { path: PathBuf, message: String },

  /// Internal package scope could not be determined
  ScopeUnresolved { manifest: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::MapNotFound { .. } => Some(
        "Create the cascade map with one entry per internal package: {\"@scope/pkg\": [\"consumer-location\"]}."
          .to_string(),
      ),
      ConfigError::ScopeUnresolved { .. } => Some(
        "Pass --scope explicitly (e.g. --scope @acme) or give the root package.json a scoped name.".to_string(),
      ),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::MapNotFound { path } => {
        write!(f, "Cascade map not found at: {}", path.display())
      }
      ConfigError::MapParse { path, message } => {
        write!(f, "Failed to parse cascade map {}: {}", path.display(), message)
      }
      ConfigError::ManifestParse { path, message } => {
        write!(f, "Failed to parse manifest {}: {}", path.display(), message)
      }
      ConfigError::ScopeUnresolved { manifest } => {
        write!(
          f,
          "Could not determine the internal package scope from {}",
          manifest.display()
        )
      }
    }
  }
}

/// Workspace enumeration errors
#[derive(Debug)]
pub enum EnumerationError {
  /// The workspace lister command failed to run or exited non-zero
  CommandFailed { command: String, stderr: String },

  /// The workspace lister produced a record we cannot parse
  OutputParse { line: String, message: String },
}

impl EnumerationError {
  fn help_message(&self) -> Option<String> {
    match self {
      EnumerationError::CommandFailed { .. } => Some(
        "Workspace enumeration needs yarn on PATH and a root package.json that declares \"workspaces\".".to_string(),
      ),
      EnumerationError::OutputParse { .. } => None,
    }
  }
}

impl fmt::Display for EnumerationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EnumerationError::CommandFailed { command, stderr } => {
        write!(f, "Workspace enumeration failed: {}\n{}", command, stderr)
      }
      EnumerationError::OutputParse { line, message } => {
        write!(f, "Unexpected workspace list record: {}\n{}", line, message)
      }
    }
  }
}

/// Result type alias for workspace-drift
pub type DriftResult<T> = Result<T, DriftError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> DriftResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> DriftResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<DriftError>,
{
  fn context(self, ctx: impl Into<String>) -> DriftResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> DriftResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &DriftError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
