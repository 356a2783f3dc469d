use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use chrono::Local;
use clap::Parser;
use env_logger::Builder;
use log::{info, error, LevelFilter};

use simcheck::{
    Result,
    SimcheckConfig,
    SimilarityCalculator,
    encode,
    config::subsystems::generator::parse_level_filter,
    matcher::SimilarityBreakdown,
    utils::{read_document, write_result, StageProfiler},
};

/// Estimate how much of one document overlaps another.
#[derive(Parser, Debug)]
#[command(name = "check_similarity", version, about)]
struct Cli {
    /// Path to the original document
    original_path: PathBuf,

    /// Path to the suspected copy
    plagiarized_path: PathBuf,

    /// File that receives the two-decimal similarity
    output_path: PathBuf,

    /// Character n-gram size (overrides the config file)
    #[arg(long)]
    ngram_size: Option<usize>,

    /// INI configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable the frequency cache
    #[arg(long)]
    no_cache: bool,

    /// Record stage timings
    #[arg(long)]
    profile: bool,

    /// Where to write the timing report
    #[arg(long, default_value = "profile_output.json")]
    profile_output: PathBuf,

    /// Log level: none, error, warn, info, debug, trace (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(cli: &Cli) -> Result<SimcheckConfig> {
    let mut config = match &cli.config {
        Some(path) => SimcheckConfig::from_ini(path)?,
        None => SimcheckConfig::default(),
    };

    if let Some(ngram_size) = cli.ngram_size {
        config.generator.ngram_size = ngram_size;
    }
    if cli.no_cache {
        config.cache.enabled = false;
    }

    config.validate()?;
    Ok(config)
}

fn init_logging(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .target(env_logger::Target::Stderr)
        .init();
}

fn run_check(
    cli: &Cli,
    config: &SimcheckConfig,
    calculator: &SimilarityCalculator,
    profiler: &mut StageProfiler,
) -> Result<(SimilarityBreakdown, String)> {
    println!("Reading original document: {}", cli.original_path.display());
    let original = profiler.time("read_original", || read_document(&cli.original_path, &config.files))?;

    println!("Reading plagiarized document: {}", cli.plagiarized_path.display());
    let plagiarized = profiler.time("read_plagiarized", || read_document(&cli.plagiarized_path, &config.files))?;

    println!("Computing similarity...");
    let breakdown = profiler.time("similarity", || calculator.compare_texts_detailed(&original, &plagiarized))?;
    info!("{} shared of {} / {} distinct {}-grams",
        breakdown.shared_distinct,
        breakdown.source_distinct,
        breakdown.target_distinct,
        breakdown.ngram_size);

    let encoded = encode(breakdown.similarity)?;
    println!("Writing result to: {}", cli.output_path.display());
    profiler.time("write_result", || write_result(breakdown.similarity, &cli.output_path, &config.files))?;

    Ok((breakdown, encoded))
}

fn save_profile(
    cli: &Cli,
    profiler: &StageProfiler,
    calculator: &SimilarityCalculator,
    breakdown: Option<SimilarityBreakdown>,
) -> Result<()> {
    let report = profiler.report().with_outcome(breakdown, calculator.cache_stats());
    report.write_json(&cli.profile_output)?;
    if let Some(slowest) = report.slowest() {
        info!("Slowest stage: {} ({} us)", slowest.stage, slowest.micros);
    }
    println!("Profile saved to: {}", cli.profile_output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = match cli.log_level.as_deref() {
        Some(value) => match parse_level_filter(value) {
            Some(level) => level,
            None => {
                eprintln!("Error: invalid log level '{}'", value);
                return ExitCode::FAILURE;
            }
        },
        None => config.generator.get_log_level(),
    };
    init_logging(level);
    info!("Starting similarity check with log level: {:?}", level);
    info!("{}", config.describe());

    let calculator = match SimilarityCalculator::new(&config) {
        Ok(calculator) => calculator,
        Err(e) => {
            error!("Failed to build similarity calculator: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut profiler = StageProfiler::new(cli.profile);
    let outcome = run_check(&cli, &config, &calculator, &mut profiler);

    if let Some(stats) = calculator.cache_stats() {
        info!("Frequency cache: {} hits, {} misses ({:.0}% hit rate)",
            stats.hits, stats.misses, stats.hit_rate() * 100.0);
    }

    // The profile is saved for failed runs too
    let mut status = ExitCode::SUCCESS;
    if profiler.is_enabled() {
        let breakdown = outcome.as_ref().ok().map(|(breakdown, _)| *breakdown);
        if let Err(e) = save_profile(&cli, &profiler, &calculator, breakdown) {
            error!("Failed to save profile: {}", e);
            eprintln!("Error: {}", e);
            status = ExitCode::FAILURE;
        }
    }

    match outcome {
        Ok((_, similarity)) => {
            println!("Check complete, similarity: {}", similarity);
            status
        },
        Err(e) => {
            error!("Similarity check failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
