//! Normalize the vertical metrics of font files.
//!
//! ```text
//! vmetrics fix MyFont.ttf -o MyFont-fixed.ttf
//! vmetrics inspect MyFont.ttf --mode preserve --detailed
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use vmetrics::{FixConfig, FixError, FontModel, Metrics, Policy, TableMetrics};
use write_fonts::read::FontRef;

#[derive(Parser, Debug)]
#[command(version, about = "Normalize the vertical metrics of OpenType fonts.")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Rewrite the metrics of a font and save the result
    Fix {
        /// The input font file.
        input: PathBuf,
        /// The output font file.
        #[arg(short, long)]
        output: PathBuf,
        /// How the new metrics are computed
        #[arg(long, value_enum, default_value_t)]
        mode: Mode,
    },
    /// Print the current and fixed metrics of a font as JSON
    Inspect {
        /// The input font file.
        input: PathBuf,
        /// How the new metrics are computed
        #[arg(long, value_enum, default_value_t)]
        mode: Mode,
        /// Print every metrics field of the original and fixed font
        #[arg(long)]
        detailed: bool,
    },
}

/// Specifies how the new metrics are computed.
///
/// Mirrors [`Policy`] so the library does not depend on clap.
#[derive(clap::ValueEnum, Copy, Clone, Default, Debug, PartialEq, Eq)]
enum Mode {
    /// Ascender and descender at 80% and 20% of the em, no line gap.
    #[default]
    Proportional,
    /// Keep ascender and descender, drop the line gap.
    Preserve,
}

impl From<Mode> for Policy {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Proportional => Policy::Proportional,
            Mode::Preserve => Policy::Preserve,
        }
    }
}

#[derive(Debug)]
enum Error {
    Io { path: PathBuf, inner: std::io::Error },
    Fix { path: PathBuf, inner: FixError },
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io { path, inner } => write!(f, "'{}': {inner}", path.display()),
            Error::Fix { path, inner } => write!(f, "'{}': {inner}", path.display()),
            Error::Json(inner) => write!(f, "failed to write report: {inner}"),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(e) = run(args.command) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Error> {
    match command {
        Command::Fix {
            input,
            output,
            mode,
        } => {
            let config = FixConfig::new(mode.into());
            fix_file(&input, &output, &config)
        }
        Command::Inspect {
            input,
            mode,
            detailed,
        } => {
            let config = FixConfig::new(mode.into());
            let report = inspect_file(&input, &config, detailed)?;
            println!("{report}");
            Ok(())
        }
    }
}

fn read_font(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|inner| Error::Io {
        path: path.to_owned(),
        inner,
    })
}

fn fix_file(input: &Path, output: &Path, config: &FixConfig) -> Result<(), Error> {
    let data = read_font(input)?;
    let fix_err = |inner| Error::Fix {
        path: input.to_owned(),
        inner,
    };
    log::info!("fixing '{}' ({:?})", input.display(), config.mode);

    let font = FontRef::new(&data)
        .map_err(FixError::Decode)
        .map_err(fix_err)?;
    let report = vmetrics::inspect_font(&font, config).map_err(fix_err)?;
    log_metrics("original", &report.original);
    log_metrics("fixed", &report.fixed);

    let fixed = vmetrics::fix_font(&font, config).map_err(fix_err)?;
    std::fs::write(output, fixed).map_err(|inner| Error::Io {
        path: output.to_owned(),
        inner,
    })?;
    log::info!("wrote '{}'", output.display());
    Ok(())
}

fn log_metrics(label: &str, metrics: &Metrics) {
    log::info!(
        "{label:>8}: ascender {} descender {} line gap {} (upem {}, line height {})",
        metrics.ascender,
        metrics.descender,
        metrics.line_gap,
        metrics.units_per_em,
        metrics.line_height(),
    );
}

fn inspect_file(input: &Path, config: &FixConfig, detailed: bool) -> Result<String, Error> {
    let data = read_font(input)?;
    let fix_err = |inner| Error::Fix {
        path: input.to_owned(),
        inner,
    };
    if !detailed {
        let report = vmetrics::inspect(&data, config).map_err(fix_err)?;
        return serde_json::to_string_pretty(&report).map_err(Error::Json);
    }

    let original = FontModel::decode(&data)
        .map(|model| TableMetrics::from_model(&model))
        .map_err(fix_err)?;
    // a font that cannot be fixed still gets its original values reported
    let fixed = match vmetrics::fix(&data, config) {
        Ok(fixed_data) => Some(
            FontModel::decode(&fixed_data)
                .map(|model| TableMetrics::from_model(&model))
                .map_err(fix_err)?,
        ),
        Err(e) => {
            log::warn!("'{}' cannot be fixed: {e}", input.display());
            None
        }
    };
    let report = serde_json::json!({ "original": original, "fixed": fixed });
    serde_json::to_string_pretty(&report).map_err(Error::Json)
}
