mod commands;
mod core;
mod drift;
mod graph;
mod workspace;

use clap::{Parser, Subcommand};
use crate::core::error::print_error;
use std::path::PathBuf;

/// Check a JS workspace dependency graph against its CI cascade map
#[derive(Parser)]
#[command(name = "workspace-drift")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compare workspace:* dependencies against dependency-map.json
  Check {
    /// Workspace root (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Cascade map path, relative to the workspace root
    #[arg(long, default_value = ".github/dependency-map.json")]
    map: PathBuf,

    /// Internal package scope (default: derived from the root package.json name)
    #[arg(long)]
    scope: Option<String>,

    /// Exclude an additional package from both directions of the comparison
    #[arg(long = "exclude", value_name = "PACKAGE")]
    exclude: Vec<String>,

    /// Output the drift report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Print the actual workspace:* dependency graph
  Graph {
    /// Workspace root (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Internal package scope (default: derived from the root package.json name)
    #[arg(long)]
    scope: Option<String>,

    /// Exclude an additional package from the graph
    #[arg(long = "exclude", value_name = "PACKAGE")]
    exclude: Vec<String>,

    /// Output the graph in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = match cli.command {
    Commands::Check {
      root,
      map,
      scope,
      exclude,
      json,
    } => commands::run_check(root, map, scope, exclude, json),
    Commands::Graph {
      root,
      scope,
      exclude,
      json,
    } => commands::run_graph(root, scope, exclude, json),
  };

  if let Err(err) = result {
    print_error(&err);
    std::process::exit(err.exit_code().as_i32());
  }
}
