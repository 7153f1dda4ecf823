//! CLI command definitions

use clap::Parser;
use nico_application::NarrationMode;
use std::path::PathBuf;

/// CLI arguments for nico
#[derive(Parser, Debug)]
#[command(name = "nico")]
#[command(author, version, about = "Nico - voice assistant for the UMSNH, powered by Gemini")]
#[command(long_about = r#"
Nico answers questions with Google Gemini, reading the answer aloud word by
word while a background video loops.

Time-sensitive questions (containing words such as "hoy", "clima" or
"presidente") are first looked up on DuckDuckGo and the snippet is added to
the prompt.

Modes:
  nico "question"     Answer once and exit
  nico --chat         Interactive chat in the terminal
  nico --serve        Web page with video at http://127.0.0.1:8501

The API key is read from the GEMINI_API_KEY environment variable.

Configuration files are loaded from (in priority order):
1. --config <path>               Explicit config file
2. ./nico.toml or ./.nico.toml   Project-level config
3. ~/.config/nico/config.toml    Global config
NICO_* environment variables override all files (e.g. NICO_GEMINI__MODEL).

Example:
  nico "¿Qué carreras ofrece la UMSNH?"
  nico -m gemini-1.5-pro --temperature 0.3 "¿Quién es el rector hoy?"
  nico --chat --narration sequential
"#)]
pub struct Cli {
    /// The question to ask (not required in chat or serve mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long, conflicts_with = "serve")]
    pub chat: bool,

    /// Serve the web page
    #[arg(short, long)]
    pub serve: bool,

    /// Port for --serve (overrides [web] port)
    #[arg(long, value_name = "PORT", requires = "serve")]
    pub port: Option<u16>,

    /// Gemini model (e.g. gemini-1.5-flash, gemini-1.5-pro, gemini-2.0-flash-lite-001)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature (0.0 - 1.5)
    #[arg(long, value_name = "T")]
    pub temperature: Option<f32>,

    /// Nucleus sampling (0.05 - 1.0)
    #[arg(long, value_name = "P")]
    pub top_p: Option<f32>,

    /// Maximum output tokens (32 - 2048)
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<u32>,

    /// Narration mode
    #[arg(long, value_name = "MODE", value_parser = parse_narration)]
    pub narration: Option<NarrationMode>,

    /// Do not read answers aloud (same as --narration off)
    #[arg(long, conflicts_with = "narration")]
    pub no_voice: bool,

    /// Never search the web
    #[arg(long)]
    pub no_search: bool,

    /// Do not pick a background video
    #[arg(long)]
    pub no_video: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Narration requested on the command line, if any.
    pub fn narration_override(&self) -> Option<NarrationMode> {
        if self.no_voice {
            Some(NarrationMode::Off)
        } else {
            self.narration
        }
    }
}

fn parse_narration(s: &str) -> Result<NarrationMode, String> {
    s.parse()
}
