use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, ArgGroup, Parser};
use tracing::{Level, debug};
use tracing_subscriber::util::SubscriberInitExt;

use sspatcher::{SortMode, check_image_size, export_hex, extract, load_wavetables, patch, write_wav_previews};

#[derive(Parser)]
#[command(name = "sspatcher")]
#[command(version, about = "Shapeshifter EEPROM wavetable tool", long_about = None)]
#[command(group(ArgGroup::new("action").required(true).args(["extract", "patch", "intelhex"])))]
struct Cli {
    /// Extract wavetables from the image
    #[arg(short, long)]
    extract: bool,

    /// Patch the image file with new wavetables
    #[arg(short, long)]
    patch: bool,

    /// Derive wavetables and names from the directory and write them as Intel HEX
    #[arg(short = 'x', long)]
    intelhex: bool,

    /// Shapeshifter EEPROM image file
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Directory holding one file per wavetable; created on extract
    #[arg(short, long, default_value = "sstables")]
    directory: PathBuf,

    /// Order wavetable files by their `<index>_` filename prefix
    #[arg(long)]
    sortprefix: bool,

    /// Also write WAV previews of extracted wavetables here
    #[arg(long, conflicts_with_all = ["patch", "intelhex"])]
    wav_dir: Option<PathBuf>,

    /// More log output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn sort_mode(&self) -> SortMode {
        if self.sortprefix {
            SortMode::IndexPrefix
        } else {
            SortMode::Lexicographic
        }
    }

    fn image(&self) -> anyhow::Result<&Path> {
        self.image
            .as_deref()
            .context("an image file is required (--image)")
    }
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish()
        .init();
}

fn do_extract(cli: &Cli) -> anyhow::Result<()> {
    let image = cli.image()?;
    let extracted = extract(image, &cli.directory)?;

    if let Some(wav_dir) = &cli.wav_dir {
        write_wav_previews(&extracted, wav_dir)
            .with_context(|| format!("failed to write previews to {}", wav_dir.display()))?;
    }

    println!(
        "Successfully extracted wavetables from {} and put them in {}.",
        image.display(),
        cli.directory.display()
    );
    Ok(())
}

fn do_patch(cli: &Cli) -> anyhow::Result<()> {
    let image = cli.image()?;
    check_image_size(image)?;

    let set = load_wavetables(&cli.directory, cli.sort_mode())?;
    patch(&set, image)?;

    println!(
        "Successfully patched {} with wavetables found in {}.",
        image.display(),
        cli.directory.display()
    );
    Ok(())
}

fn do_intelhex(cli: &Cli) -> anyhow::Result<()> {
    let set = load_wavetables(&cli.directory, cli.sort_mode())?;
    let (names, waves) = export_hex(&set, &cli.directory)?;

    println!(
        "Derived names and waves from {} and wrote them to {} and {}.",
        cli.directory.display(),
        names.display(),
        waves.display()
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    debug!("wavetable directory: {}", cli.directory.display());

    let result = if cli.extract {
        do_extract(&cli)
    } else if cli.patch {
        do_patch(&cli)
    } else {
        do_intelhex(&cli)
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
