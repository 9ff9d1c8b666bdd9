use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "streamgen")]
#[command(author, version, about = "Stream serialization code generator for polymorphic model graphs")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from a code-model document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate Rust models with streaming JSON and XML routines
  Generate(GenerateCommand),
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// Path to the code-model JSON document
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Path where the generated Rust code will be written
  #[arg(short, long, value_name = "FILE")]
  pub output: PathBuf,

  /// Visibility level for generated types (public, crate or file)
  #[arg(long, value_name = "VISIBILITY", default_value = "public")]
  pub visibility: String,

  /// Keep required properties out of `new(...)`; they get setters instead
  #[arg(long, default_value_t = false)]
  pub no_ctor_args: bool,

  /// Pass required read-only properties to `new(...)` as well
  #[arg(long, default_value_t = false)]
  pub read_only_in_ctor: bool,

  /// Path of the runtime crate used in the generated imports
  #[arg(long, value_name = "PATH", default_value = "streamgen_support")]
  pub support_crate: String,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all models with their parent, discriminator and role
  Models {
    /// Path to the code-model JSON document
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
}
