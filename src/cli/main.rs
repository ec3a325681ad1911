use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use sticker_exif::config::{Config, StickerMetadata};
use sticker_exif::exif::read_sticker_exif;
use sticker_exif::pipeline::{sticker_from_media, MediaKind};

#[derive(Parser, Debug)]
#[command(
    name = "sticker-exif",
    version,
    about = "WhatsApp sticker builder — convert images/videos to WebP stickers with embedded pack metadata"
)]
struct Cli {
    /// Input image, video, or WebP file
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output path (default: input with .webp extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Sticker-pack display name
    #[arg(long, value_name = "NAME")]
    pack_name: Option<String>,

    /// Publisher name
    #[arg(long, value_name = "NAME")]
    author: Option<String>,

    /// Emoji/category tag (repeatable)
    #[arg(long = "emoji", value_name = "EMOJI")]
    emojis: Vec<String>,

    /// Mark as an avatar sticker
    #[arg(long)]
    avatar: bool,

    /// Use the enlarged 640×640 canvas for small sources
    #[arg(long)]
    double_small: bool,

    /// Override MIME detection (e.g. "video/mp4")
    #[arg(long, value_name = "MIME")]
    mime: Option<String>,

    /// Print the embedded pack metadata of a WebP sticker and exit
    #[arg(long = "show-meta")]
    show_meta: bool,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    let Some(ref input) = cli.input else {
        anyhow::bail!("No input file specified. Use --help for usage.");
    };
    let media = std::fs::read(input)?;

    // Handle --show-meta
    if cli.show_meta {
        match read_sticker_exif(&media)? {
            Some(info) => {
                println!("Pack id:    {}", info.pack_id);
                println!("Pack name:  {}", info.pack_name);
                println!("Publisher:  {}", info.publisher);
                println!("Emojis:     {}", info.emojis.join(" "));
                println!("Avatar:     {}", info.is_avatar != 0);
            }
            None => println!("No sticker metadata found in {}", input.display()),
        }
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;

    // Resolve the MIME type: explicit flag wins, then the file extension.
    let mimetype = match cli.mime {
        Some(m) => m,
        None => match MediaKind::from_path(input) {
            Some(MediaKind::WebP) => "image/webp".to_string(),
            Some(MediaKind::Image) => "image/jpeg".to_string(),
            Some(MediaKind::Video) => "video/mp4".to_string(),
            None => anyhow::bail!(
                "Cannot infer media type of {}; pass --mime explicitly.",
                input.display()
            ),
        },
    };

    let metadata = StickerMetadata {
        pack_name: cli.pack_name,
        author: cli.author,
        categories: if cli.emojis.is_empty() { None } else { Some(cli.emojis) },
        is_avatar: cli.avatar.then_some(1),
        double_small: cli.double_small,
    };

    let sticker = sticker_from_media(&media, &mimetype, &metadata, &config).await?;

    let output = cli
        .output
        .unwrap_or_else(|| input.with_extension("webp"));
    std::fs::write(&output, &sticker)?;
    println!("Sticker written to {} ({} bytes)", output.display(), sticker.len());

    Ok(())
}
