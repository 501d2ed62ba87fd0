//! Command line flags and the immutable run configuration built from them.

use clap::Parser;
use std::path::PathBuf;

/// Default folder with the original paintings
pub const DEFAULT_INPUT_DIR: &str = "assets/images";
/// Default folder for the signed copies
pub const DEFAULT_OUTPUT_DIR: &str = "assets/images_signed";
/// Signature shipped with the gallery theme
pub const DEFAULT_SIGNATURE: &str = "themes/gallery/static/images/artist_signature.svg";
/// One-time backup of the input folder
pub const BACKUP_DIR: &str = "assets/images_backup";

/// Add the artist's signature to gallery images
#[derive(Parser, Debug)]
#[command(name = "gallery-signer")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Folder with the source images
    #[arg(long, default_value = DEFAULT_INPUT_DIR)]
    pub input: PathBuf,

    /// Folder for the signed images
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Path to the SVG signature
    #[arg(long, default_value = DEFAULT_SIGNATURE)]
    pub signature: PathBuf,

    /// Do not create a backup copy of the input folder
    #[arg(long)]
    pub no_backup: bool,
}

/// Settings for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub signature_path: PathBuf,
    /// `None` when the backup is disabled
    pub backup_dir: Option<PathBuf>,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        Self {
            input_dir: args.input,
            output_dir: args.output,
            signature_path: args.signature,
            backup_dir: (!args.no_backup).then(|| PathBuf::from(BACKUP_DIR)),
        }
    }
}
