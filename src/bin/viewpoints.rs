// command line options
use clap::Parser;
// others
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
// viewpoints
use viewpoints::core::avalanche::{measure_avalanche, ScrambleHash};
use viewpoints::core::discrepancy::star_discrepancy;
use viewpoints::core::plot::{fit_spectrum, render_points};
use viewpoints::core::pointset::PointSetBuilder;
use viewpoints::core::powerspectrum::SpectrumSynthesizer;
use viewpoints::core::rng::Rng;
use viewpoints::core::sequence::{selectable_families, SequenceProvider, SequenceRequest};
use viewpoints::core::viewpoints::Result;
use viewpoints::providers::builtin::BuiltinProvider;
use viewpoints::providers::native::{self, NativeConfig, NativeProvider};
// std
use std::path::{Path, PathBuf};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Largest accepted viewport side in pixels.
pub const MAX_VIEWPORT: u32 = 16384;

/// Generate a 2D point set from two axes of a sampling sequence and
/// report its star discrepancy and power spectrum.
#[derive(Parser, Debug)]
#[command(name = "viewpoints", version)]
struct Cli {
    /// sequence family
    #[arg(short = 's', long = "sequence", default_value = "sobol_owen")]
    sequence: String,
    /// number of points
    #[arg(short = 'n', long = "npoints", default_value_t = 64)]
    npoints: i64,
    /// sequence dimension used for the horizontal axis
    #[arg(short = 'u', long = "udim", default_value_t = 0)]
    udim: u32,
    /// sequence dimension used for the vertical axis
    #[arg(short = 'v', long = "vdim", default_value_t = 1)]
    vdim: u32,
    /// seed handed to the sequence generator
    #[arg(long = "seed", default_value_t = 1)]
    seed: u32,
    /// native library to load (overrides GENPOINTS_LIB)
    #[arg(long = "lib", conflicts_with = "builtin")]
    lib: Option<String>,
    /// use the sequences built into this program
    #[arg(long = "builtin")]
    builtin: bool,
    /// list the available sequences and exit
    #[arg(long = "list")]
    list: bool,
    /// viewport in pixels, WIDTHxHEIGHT
    #[arg(long = "size", default_value = "512x512", value_parser = parse_size)]
    size: (u32, u32),
    /// write the point plot to this PNG file
    #[arg(long = "points")]
    points: Option<PathBuf>,
    /// write the power spectrum to this PNG file
    #[arg(long = "fft")]
    fft: Option<PathBuf>,
    /// measure the avalanche bias of a scramble hash, write the bias
    /// matrix to this PNG file and exit
    #[arg(long = "avalanche")]
    avalanche: Option<PathBuf>,
    /// hash to analyse: laine_karras, nested_uniform or hash_u32
    #[arg(long = "hash", default_value = "laine_karras")]
    hash: ScrambleHash,
    /// number of random inputs for the avalanche analysis
    #[arg(long = "rounds", default_value_t = 1 << 16)]
    rounds: u32,
}

fn parse_size(s: &str) -> std::result::Result<(u32, u32), String> {
    let (width, height) = s
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|e| format!("bad width {:?}: {}", width, e))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|e| format!("bad height {:?}: {}", height, e))?;
    for side in [width, height] {
        if side == 0 || side > MAX_VIEWPORT {
            return Err(format!(
                "viewport side {} outside of 1..={}",
                side, MAX_VIEWPORT
            ));
        }
    }
    Ok((width, height))
}

fn run_avalanche(args: &Cli, path: &Path) -> Result<()> {
    let mut rng = Rng::with_sequence(args.seed as u64);
    let hash = args.hash;
    let stats = measure_avalanche(|n, seed| hash.hash(n, seed), args.rounds, &mut rng);
    println!("hash: {}", hash);
    println!("average bias: {:.3}", stats.average_bias());
    stats.to_luma_image().save(path)?;
    info!(path = %path.display(), "avalanche image written");
    Ok(())
}

fn run(args: &Cli, provider: &dyn SequenceProvider) -> Result<()> {
    if args.list {
        for family in selectable_families(provider) {
            println!("{}", family);
        }
        return Ok(());
    }
    let builder = PointSetBuilder::new(provider);
    let request = SequenceRequest::new(&args.sequence, args.npoints, args.udim, args.vdim, args.seed);
    let points = builder.build(&request)?;
    let discrepancy: f64 = star_discrepancy(&points);
    info!(
        sequence = args.sequence.as_str(),
        n = points.len(),
        "point set generated"
    );
    println!("star discrepancy: {:.6}", discrepancy);
    let (width, height) = args.size;
    if let Some(path) = &args.points {
        render_points(&points, &args.sequence, width, height).save(path)?;
        info!(path = %path.display(), "point plot written");
    }
    if let Some(path) = &args.fft {
        let spectrum = SpectrumSynthesizer::new().synthesize(&points, (width, height));
        fit_spectrum(&spectrum, width, height).save(path)?;
        info!(path = %path.display(), size = spectrum.size, "power spectrum written");
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    // handle command line options
    let args = Cli::parse();
    println!("viewpoints version {}", VERSION);
    let result = if let Some(path) = &args.avalanche {
        run_avalanche(&args, path)
    } else if args.builtin {
        run(&args, &BuiltinProvider::new())
    } else if let Some(lib) = &args.lib {
        NativeProvider::open(&NativeConfig::new(lib)).and_then(|provider| run(&args, &provider))
    } else {
        native::shared().and_then(|provider| run(&args, provider))
    };
    if let Err(err) = result {
        error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn size_parses_both_separators() {
        assert_eq!(parse_size("640x480"), Ok((640, 480)));
        assert_eq!(parse_size(" 32 X 16 "), Ok((32, 16)));
        assert!(parse_size("640").is_err());
        assert!(parse_size("ax480").is_err());
    }

    #[test]
    fn huge_or_empty_viewports_are_rejected() {
        assert!(parse_size("4294967295x4294967295").is_err());
        assert!(parse_size("16385x512").is_err());
        assert!(parse_size("0x512").is_err());
        assert_eq!(parse_size("16384x16384"), Ok((16384, 16384)));
    }

    #[test]
    fn avalanche_options() {
        let args = Cli::parse_from(["viewpoints", "--avalanche", "bias.png", "--hash", "hash_u32"]);
        assert_eq!(args.avalanche, Some(PathBuf::from("bias.png")));
        assert_eq!(args.hash, ScrambleHash::HashU32);
        assert_eq!(args.rounds, 1 << 16);
        assert!(Cli::try_parse_from(["viewpoints", "--hash", "blake3"]).is_err());
    }
}
