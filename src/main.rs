//! rwtxd CLI - command-line tool for inspecting and editing texture
//! dictionaries.
//!
//! This is the main entry point for the rwtxd command-line application.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rwtxd::prelude::*;

/// rwtxd - GTA texture dictionary tool
#[derive(Parser)]
#[command(name = "rwtxd")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the texture names in a dictionary
    List {
        /// Path to the TXD file
        txd: PathBuf,
    },

    /// Show dictionary and texture details
    Info {
        /// Path to the TXD file
        txd: PathBuf,

        /// Show per-texture format details
        #[arg(short, long)]
        detailed: bool,
    },

    /// Remove a texture by name and save the result
    Remove {
        /// Path to the TXD file
        txd: PathBuf,

        /// Name of the texture to remove (case-insensitive)
        #[arg(short, long)]
        name: String,

        /// Output TXD file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Load a dictionary and write it back out
    Rewrite {
        /// Path to the TXD file
        txd: PathBuf,

        /// Output TXD file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List { txd } => cmd_list(&txd)?,
        Commands::Info { txd, detailed } => cmd_info(&txd, detailed)?,
        Commands::Remove { txd, name, output } => cmd_remove(&txd, &name, &output)?,
        Commands::Rewrite { txd, output } => cmd_rewrite(&txd, &output)?,
    }

    Ok(())
}

fn cmd_list(txd: &PathBuf) -> Result<()> {
    let dictionary = TextureDictionary::load(txd).context("Failed to load dictionary")?;

    for texture in dictionary.iter() {
        println!("{}", texture.name);
    }

    Ok(())
}

fn cmd_info(txd: &PathBuf, detailed: bool) -> Result<()> {
    let dictionary = TextureDictionary::load(txd).context("Failed to load dictionary")?;

    println!(
        "{}: {} textures, version {:#010x} ({})",
        txd.display(),
        dictionary.len(),
        dictionary.version(),
        dictionary.game_version()
    );

    if detailed {
        for texture in dictionary.iter() {
            let scheme = match texture.compression {
                Compression::None => "raw",
                Compression::Dxt1 => "DXT1",
                Compression::Dxt3 => "DXT3",
            };
            println!(
                "{:>5}x{:<5} {:>2}bpp {:>4} {} {} mips {}{}",
                texture.width(),
                texture.height(),
                texture.depth,
                scheme,
                texture.platform,
                texture.mipmap_count(),
                texture.name,
                if texture.has_alpha { " (alpha)" } else { "" },
            );
        }
    }

    Ok(())
}

fn cmd_remove(txd: &PathBuf, name: &str, output: &PathBuf) -> Result<()> {
    let mut dictionary = TextureDictionary::load(txd).context("Failed to load dictionary")?;

    let removed = dictionary
        .remove(name)
        .with_context(|| format!("No texture named {name:?}"))?;
    println!("Removed {}", removed.name);

    dictionary.save(output).context("Failed to save dictionary")?;
    println!("Wrote {} textures to {}", dictionary.len(), output.display());

    Ok(())
}

fn cmd_rewrite(txd: &PathBuf, output: &PathBuf) -> Result<()> {
    let dictionary = TextureDictionary::load(txd).context("Failed to load dictionary")?;

    dictionary.save(output).context("Failed to save dictionary")?;
    println!("Wrote {} textures to {}", dictionary.len(), output.display());

    Ok(())
}
