use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use bucketry_core::{Bucket, TextEncoding};

use crate::config::AppConfig;

#[derive(Args)]
pub struct GetArgs {
    key: String,

    /// Decode the object as text (utf8, utf16le, latin1, ascii, base64, base64url, hex)
    #[arg(long)]
    encoding: Option<TextEncoding>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: GetArgs, config_path: &Path) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let bucket = config.open_bucket()?;

    let data = match args.encoding {
        Some(encoding) => bucket
            .get_text(&args.key, encoding)
            .await
            .with_context(|| format!("failed to get {}", args.key))?
            .into_bytes(),
        None => bucket
            .get(&args.key)
            .await
            .with_context(|| format!("failed to get {}", args.key))?
            .to_vec(),
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, &data)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(key = %args.key, path = %path.display(), bytes = data.len(), "Object saved");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&data)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
