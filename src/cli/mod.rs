// CLI module for altgen

use clap::Parser;

/// altgen - image alt-text generation service with pluggable captioning backends
#[derive(Parser, Debug)]
#[command(name = "altgen", version, about, long_about = None)]
pub struct Args {
    /// Rebuild the caption cache from the gallery directory before serving
    #[arg(long, env = "ALTGEN_WARM")]
    pub warm: bool,
}
