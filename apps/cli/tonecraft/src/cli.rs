use std::path::PathBuf;

use clap::Parser;

/// Rewrite text in one of nine tones using Mistral chat completions.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tonecraft", version)]
#[command(about = "Rewrite text in one of nine tones using Mistral chat completions")]
pub struct Args {
    /// Directory holding tonecraft.toml and preferences.json
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Load this file as the original text
    #[arg(long, short = 'f', value_name = "PATH")]
    pub text_file: Option<PathBuf>,

    /// Adjust once to this tone (id or grid number 1-9), print the result and exit
    #[arg(long, short = 't', value_name = "TONE")]
    pub tone: Option<String>,

    /// Model to request instead of the configured default
    #[arg(long, short = 'm', value_name = "NAME")]
    pub model: Option<String>,

    /// With --tone, print the result as JSON
    #[arg(long, requires = "tone")]
    pub json: bool,

    /// Keep the API key and tone in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Echo log records to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
