//! EmoLens CLI
//!
//! Usage:
//!   emolens --eye open --mouth smile --brow normal   # Single analysis
//!   emolens --eye tense --report                     # Full text report
//!   emolens --save ./reports                         # Write report file
//!   emolens --matrix                                 # All 27 combinations
//!   emolens --interactive                            # Session with history
//!   emolens --serve                                  # HTTP API server

use clap::Parser;
use colored::Colorize;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use emolens::core::{format_report, report_file_name, run_server, ApiConfig, EmotionClassifier, EmotionHistory};
use emolens::types::{
    ClassificationResult, EmotionCategory, EyeState, EyebrowPosition, FeatureSnapshot, MouthShape,
    RawFeatureSnapshot,
};
use emolens::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "emolens",
    version = VERSION,
    about = "EmoLens - Explainable emotion detection from facial features",
    long_about = "EmoLens maps three observed facial features to a ranked,\n\
                  explained distribution over five emotions.\n\n\
                  Features:\n  \
                  eye    open | relaxed | tense\n  \
                  mouth  smile | neutral | frown\n  \
                  brow   raised | normal | furrowed\n\n\
                  Emotions: happy, sad, angry, neutral, anxious\n\n\
                  Scores are deterministic rule weights renormalized to\n\
                  percentages, not calibrated probabilities."
)]
struct Args {
    /// Eye state (open, relaxed, tense)
    #[arg(short, long, default_value = "open")]
    eye: String,

    /// Mouth shape (smile, neutral, frown)
    #[arg(short, long, default_value = "neutral")]
    mouth: String,

    /// Eyebrow position (raised, normal, furrowed)
    #[arg(short, long, default_value = "normal")]
    brow: String,

    /// Interactive mode - read "eye mouth brow" lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Print every feature combination with its detected emotion
    #[arg(long)]
    matrix: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, env = "EMOLENS_ADDR", default_value = "127.0.0.1:3000")]
    addr: String,

    /// Pause before each API analysis (milliseconds)
    #[arg(long, env = "EMOLENS_ANALYSIS_DELAY_MS", default_value_t = 0)]
    analysis_delay_ms: u64,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Print the full text report
    #[arg(long)]
    report: bool,

    /// Save the text report to this file (or directory)
    #[arg(long)]
    save: Option<PathBuf>,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show raw scores and reason codes
    #[arg(long)]
    verbose: bool,

    /// Log filter (e.g. "debug", "emolens=trace")
    #[arg(long, env = "EMOLENS_LOG")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(&args);

    if args.no_color {
        colored::control::set_override(false);
    }

    let outcome = if args.serve {
        run_serve(&args).await
    } else if args.matrix {
        run_matrix(&args)
    } else if args.interactive {
        run_interactive(&args)
    } else {
        run_single(&args)
    };

    if let Err(e) = outcome {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Initialize tracing; logs go to stderr so stdout stays parseable
fn init_logging(args: &Args) {
    let default = if args.serve { "info" } else { "warn" };
    let (filter, rejected) = log_filter(args.log_level.as_deref(), default);
    if let Some(reason) = rejected {
        eprintln!(
            "{} invalid log filter {:?} ({}); using \"{}\"",
            "warning:".yellow().bold(),
            args.log_level.as_deref().unwrap_or_default(),
            reason,
            default
        );
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(!args.no_color)
        .init();
}

/// Pick the log filter; an unparseable request falls back to `default` and returns why
fn log_filter(requested: Option<&str>, default: &str) -> (EnvFilter, Option<String>) {
    match requested.map(EnvFilter::try_new) {
        Some(Ok(filter)) => (filter, None),
        Some(Err(e)) => (EnvFilter::new(default), Some(e.to_string())),
        None => (EnvFilter::new(default), None),
    }
}

/// Run single analysis
fn run_single(args: &Args) -> Result<(), Box<dyn Error>> {
    let snapshot = FeatureSnapshot::parse(&args.eye, &args.mouth, &args.brow)?;
    let result = EmotionClassifier::new().classify(snapshot);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if args.report {
        println!("{}", format_report(&result));
    } else if args.verbose {
        print_verbose(&result, args.no_color);
    } else {
        print_result(&result, args.no_color);
    }

    if let Some(path) = &args.save {
        let written = save_report(&result, path)?;
        println!("Report saved: {}", written.display());
    }

    Ok(())
}

/// Print all 27 combinations
fn run_matrix(args: &Args) -> Result<(), Box<dyn Error>> {
    let classifier = EmotionClassifier::new();
    let results: Vec<ClassificationResult> = FeatureSnapshot::all().map(|s| classifier.classify(s)).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    print_header("Feature Matrix", args.no_color);
    println!(
        "{:<9} {:<8} {:<9} | {:<8} {:>4} | happy sad angry neutral anxious",
        "eyes", "mouth", "brows", "emotion", "conf"
    );
    println!("{}", "-".repeat(78));
    for result in &results {
        let f = &result.features;
        let line = format!(
            "{:<9} {:<8} {:<9} | {:<8} {:>3}% | {:>5} {:>3} {:>5} {:>7} {:>7}",
            f.eye_state,
            f.mouth_shape,
            f.eyebrow_position,
            result.detected_emotion,
            result.confidence,
            category_score(result, EmotionCategory::Happy),
            category_score(result, EmotionCategory::Sad),
            category_score(result, EmotionCategory::Angry),
            category_score(result, EmotionCategory::Neutral),
            category_score(result, EmotionCategory::Anxious),
        );
        println!("{}", colorize(&line, result.detected_emotion, args.no_color));
    }
    Ok(())
}

/// Run interactive session with in-memory history
fn run_interactive(args: &Args) -> Result<(), Box<dyn Error>> {
    let classifier = EmotionClassifier::new();
    let mut history = EmotionHistory::new();

    print_header("Interactive Mode", args.no_color);
    println!("Enter features as: <eye> <mouth> <brow>");
    println!("Example: relaxed smile raised");
    println!("Commands: history, report, save <path>, help, quit");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("[{} analyses] > ", history.len());
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => return Err(e.into()),
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let first = tokens.next().unwrap_or_default().to_ascii_lowercase();

        match first.as_str() {
            "quit" | "exit" => {
                println!("\nSession ended. Analyses: {}", history.len());
                break;
            }
            "help" => print_interactive_help(),
            "history" => print_history(&history, args.no_color),
            "report" => match history.latest() {
                Some(result) => println!("{}", format_report(result)),
                None => println!("{}", "No analysis yet".yellow()),
            },
            "save" => match (history.latest(), tokens.next()) {
                (Some(result), Some(path)) => match save_report(result, Path::new(path)) {
                    Ok(written) => println!("Report saved: {}", written.display()),
                    Err(e) => println!("{} {}", "Save failed:".red(), e),
                },
                (None, _) => println!("{}", "No analysis yet".yellow()),
                (_, None) => println!("{}", "Usage: save <path>".yellow()),
            },
            _ => {
                let Some(raw) = parse_feature_line(line) else {
                    println!("{}", "Usage: <eye> <mouth> <brow>".yellow());
                    continue;
                };
                match raw.validate() {
                    Ok(snapshot) => {
                        let result = classifier.classify(snapshot);
                        if args.json {
                            println!("{}", serde_json::to_string(&result)?);
                        } else if args.verbose {
                            print_verbose(&result, args.no_color);
                        } else {
                            print_result(&result, args.no_color);
                        }
                        let index = history.record(result);
                        debug!(index, "recorded analysis");
                    }
                    Err(e) => {
                        warn!(error = %e, input = line, "rejected input line");
                        println!("{} {}", "⚠".yellow(), e.to_string().yellow());
                    }
                }
            }
        }
    }

    Ok(())
}

/// Run HTTP API server
async fn run_serve(args: &Args) -> Result<(), Box<dyn Error>> {
    print_header("API Server", args.no_color);
    let config = ApiConfig {
        analysis_delay_ms: args.analysis_delay_ms,
    };
    run_server(&args.addr, config).await?;
    Ok(())
}

/// Split "eye mouth brow" into an untyped snapshot; missing tokens stay None,
/// more than three tokens is not a feature line
fn parse_feature_line(line: &str) -> Option<RawFeatureSnapshot> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() > 3 {
        return None;
    }
    Some(RawFeatureSnapshot::from_text(
        tokens.first().copied(),
        tokens.get(1).copied(),
        tokens.get(2).copied(),
    ))
}

/// Write report; a directory target gets a timestamped file name
fn save_report(result: &ClassificationResult, path: &Path) -> io::Result<PathBuf> {
    let target = if path.is_dir() {
        path.join(report_file_name(result))
    } else {
        path.to_path_buf()
    };
    std::fs::write(&target, format_report(result))?;
    Ok(target)
}

fn category_score(result: &ClassificationResult, category: EmotionCategory) -> u32 {
    result.score_for(category).map(|s| s.score).unwrap_or(0)
}

fn colorize(text: &str, category: EmotionCategory, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        format!("{}{}{}", category.color_code(), text, EmotionCategory::color_reset())
    }
}

/// Print header
fn print_header(mode: &str, no_color: bool) {
    let title = format!("EmoLens v{} - {}", VERSION, mode);
    if no_color {
        println!("========================================");
        println!("  {}", title);
        println!("========================================");
    } else {
        println!("{}", "╔══════════════════════════════════════╗".bold());
        println!("{}", format!("  {}", title).bold());
        println!("{}", "╚══════════════════════════════════════╝".bold());
    }
    println!();
}

/// Print one result
fn print_result(result: &ClassificationResult, no_color: bool) {
    if no_color {
        println!("{}", result.to_parseable_string());
    } else {
        println!("{}", result.to_terminal_string());
    }
}

/// Print result with raw scores and reasons
fn print_verbose(result: &ClassificationResult, no_color: bool) {
    let color = if no_color { "" } else { result.detected_emotion.color_code() };
    let reset = if no_color { "" } else { EmotionCategory::color_reset() };

    println!("{}┌──────────────────────────────────────{}", color, reset);
    println!(
        "{}│ {} {} ({}% confidence){}",
        color,
        if no_color { "" } else { result.detected_emotion.emoji() },
        result.detected_emotion.label(),
        result.confidence,
        reset
    );
    println!("{}│ {}{}", color, result.features, reset);
    println!("{}├──────────────────────────────────────{}", color, reset);
    for score in &result.scores {
        println!(
            "{}│ {:<8} {:>3}%  (raw {:>2}){}",
            color,
            score.emotion.label(),
            score.score,
            score.raw_score,
            reset
        );
        for code in &score.reason_codes {
            println!("{}│   {}{}", color, code, reset);
        }
    }
    println!("{}└──────────────────────────────────────{}", color, reset);
}

/// Print session history
fn print_history(history: &EmotionHistory, no_color: bool) {
    if history.is_empty() {
        println!("{}", "No analysis yet".yellow());
        return;
    }

    println!("Session History ({})", history.len());
    for point in history.series() {
        let line = format!(
            "  {:<4} {}  {:<8} | happy={} sad={} angry={} neutral={} anxious={}",
            point.label,
            point.timestamp.format("%H:%M:%S"),
            point.detected_emotion,
            point.scores[EmotionCategory::Happy.index()],
            point.scores[EmotionCategory::Sad.index()],
            point.scores[EmotionCategory::Angry.index()],
            point.scores[EmotionCategory::Neutral.index()],
            point.scores[EmotionCategory::Anxious.index()],
        );
        println!("{}", colorize(&line, point.detected_emotion, no_color));
    }

    let counts = history.detected_counts();
    let summary: Vec<String> = EmotionCategory::ALL
        .iter()
        .filter(|c| counts[c.index()] > 0)
        .map(|c| format!("{}×{}", c, counts[c.index()]))
        .collect();
    println!("  Detected: {}", summary.join(", "));
}

fn print_interactive_help() {
    println!("  <eye> <mouth> <brow>  analyze (e.g. 'tense frown furrowed')");
    println!("  history               list analyses this session");
    println!("  report                print report for the last analysis");
    println!("  save <path>           write last report to a file or directory");
    println!("  quit                  end the session");
    println!();
    println!(
        "  eye: {}",
        EyeState::ALL.iter().map(|e| e.as_str()).collect::<Vec<_>>().join(" | ")
    );
    println!(
        "  mouth: {}",
        MouthShape::ALL.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(" | ")
    );
    println!(
        "  brow: {}",
        EyebrowPosition::ALL.iter().map(|b| b.as_str()).collect::<Vec<_>>().join(" | ")
    );
}
