mod app;
mod color;
mod config;
mod data;
mod dsp;
mod error;
mod lfp;
mod locations;
mod render;
mod state;
#[cfg(test)]
mod test_support;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::{load_config, Config, SpectrogramConfig};
use lfp::{show_lfp_spectrogram, RenderTargets, SpectrogramRequest};
use locations::write_location_report;

/// Inspect NWB neurophysiology files.
#[derive(Parser, Debug)]
#[command(name = "nwb-inspect", version)]
struct Cli {
    /// TOML file with `[locations]` and `[spectrogram]` settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the electrode location of selected channels for every NWB file
    /// in a directory to a CSV report
    Locations {
        /// Directory holding the NWB files
        dir: PathBuf,

        /// Report path [default: <DIR>/output.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Comma-separated channel indices [default: 4,120]
        #[arg(short, long, value_delimiter = ',')]
        channels: Option<Vec<usize>>,
    },

    /// Draw the spectrogram of one LFP acquisition
    Spectrogram {
        /// NWB file to read
        file: PathBuf,

        #[command(flatten)]
        overrides: SpectrogramArgs,

        /// Also save the image to this PNG file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not open the viewer window
        #[arg(long)]
        no_window: bool,
    },
}

#[derive(clap::Args, Debug)]
struct SpectrogramArgs {
    /// Acquisition name [default: LFP]
    #[arg(short, long)]
    stream: Option<String>,

    /// Lowest frequency shown, in Hz [default: 1]
    #[arg(long)]
    freq_low: Option<f64>,

    /// Highest frequency shown, in Hz [default: 100]
    #[arg(long)]
    freq_high: Option<f64>,

    /// Column of a (time, channel) signal [default: 0]
    #[arg(long)]
    channel: Option<usize>,
}

impl SpectrogramArgs {
    fn apply(self, config: &mut SpectrogramConfig) {
        if let Some(stream) = self.stream {
            config.stream = stream;
        }
        if let Some(low) = self.freq_low {
            config.freq_low = low;
        }
        if let Some(high) = self.freq_high {
            config.freq_high = high;
        }
        if let Some(channel) = self.channel {
            config.channel = channel;
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    match cli.command {
        Command::Locations {
            dir,
            output,
            channels,
        } => {
            let channels = channels.unwrap_or(config.locations.channels);
            let output = output.unwrap_or_else(|| dir.join("output.csv"));
            log::info!(
                "Scanning {} for channels {channels:?}",
                dir.display()
            );
            write_location_report(&dir, &output, &channels, &config.locations.extension)
                .with_context(|| format!("writing location report for {}", dir.display()))?;
        }
        Command::Spectrogram {
            file,
            overrides,
            output,
            no_window,
        } => {
            let mut settings = config.spectrogram;
            overrides.apply(&mut settings);

            let targets = RenderTargets {
                window: !no_window,
                png: output,
            };
            if !targets.window && targets.png.is_none() {
                log::warn!("--no-window without --output: the spectrogram is computed but not shown");
            }

            let request = SpectrogramRequest::from_config(file, &settings);
            show_lfp_spectrogram(&request, &targets);
        }
    }

    Ok(())
}
