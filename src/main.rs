use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use mdview::{Config, LinkHost, Preset, SystemHost};

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Preset {
    fn from(theme: ThemeArg) -> Self {
        match theme {
            ThemeArg::Light => Preset::Light,
            ThemeArg::Dark => Preset::Dark,
        }
    }
}

#[derive(Parser)]
#[command(name = "mdview")]
#[command(about = "Render Markdown into a themed presentation tree")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Theme config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme preset, overriding the config file
    #[arg(short, long, value_enum)]
    theme: Option<ThemeArg>,

    /// Base font size, overriding the config file
    #[arg(long)]
    font_size: Option<f32>,

    /// Base URL for relative links and images
    #[arg(short, long)]
    base: Option<String>,

    /// Print the tree as JSON
    #[arg(long)]
    json: bool,

    /// List every tappable block and its links
    #[arg(long, conflicts_with = "json")]
    links: bool,

    /// Tap the N-th tappable block (1-based)
    #[arg(long, value_name = "N", conflicts_with_all = ["json", "links"])]
    tap: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::compiled_default(),
    };
    if let Some(theme) = cli.theme {
        config.preset = theme.into();
    }
    if let Some(size) = cli.font_size {
        config.base_font_size = size;
    }
    if cli.base.is_some() {
        config.relative_url_host = cli.base.clone();
    }

    let markdown = fs::read_to_string(&cli.input)
        .map_err(|e| format!("reading {}: {}", cli.input.display(), e))?;
    let doc = mdview::markdown_to_tree_with_config(&markdown, &config);

    if let Some(n) = cli.tap {
        let tappable = doc.tappable();
        let block = n
            .checked_sub(1)
            .and_then(|i| tappable.get(i))
            .ok_or_else(|| format!("no tappable block {} (found {})", n, tappable.len()))?;
        if let Some(action) = &block.on_tap {
            let host: &dyn LinkHost = &SystemHost;
            action.activate(host);
        }
        return Ok(());
    }

    if cli.links {
        for (i, block) in doc.tappable().iter().enumerate() {
            println!("{}. {:?}", i + 1, block.text());
            if let Some(action) = &block.on_tap {
                for link in action.links() {
                    println!("   {} -> {}", link.label, link.url);
                }
            }
        }
    } else if cli.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        print!("{}", doc);
    }

    Ok(())
}
