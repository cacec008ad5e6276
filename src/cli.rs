use std::path::PathBuf;

use clap::Parser;

use riffwalk::riff::config::ConfigError;
use riffwalk::{Padding, ReaderConfig, Tag};

#[derive(Parser)]
#[command(name = "riffwalk")]
#[command(about = "Dump the chunk structure of a RIFF file (WAV, AVI, WEBP, ...)")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// The RIFF file to read
    pub file: PathBuf,

    /// Expected form type, such as WAVE or AVI (short tags are space padded)
    pub format: Tag,

    /// Sets a custom reader config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip the pad byte after odd sized chunks
    #[arg(short, long)]
    pub pad: bool,

    /// Deepest LIST nesting to accept
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Payload bytes to show for each chunk
    #[arg(long, value_name = "BYTES", default_value_t = 16)]
    pub preview: usize,
}

impl Cli {
    // Config file first, flags on the command line win
    pub fn reader_config(&self) -> Result<ReaderConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ReaderConfig::from_toml_file(path)?,
            None => ReaderConfig::default(),
        };

        if self.pad {
            config.padding = Padding::Even;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        Ok(config)
    }
}
