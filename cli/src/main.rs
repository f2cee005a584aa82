//! docforge CLI - styled DOCX generation and style template extraction

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docforge::{rules, ConvertOptions, JsonFormat, ParseOptions, RenderStats, StyleRules};

#[derive(Parser)]
#[command(name = "docforge")]
#[command(version)]
#[command(about = "Generate styled DOCX from markup and extract style templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a style template from a DOCX file
    Extract {
        /// Source DOCX file
        #[arg(value_name = "SOURCE")]
        input: PathBuf,

        /// Destination JSON file
        #[arg(value_name = "DEST")]
        output: PathBuf,
    },

    /// Generate a styled DOCX file from markup
    #[command(alias = "gen")]
    Generate {
        /// Source markup file
        #[arg(value_name = "SOURCE")]
        input: PathBuf,

        /// Destination DOCX file
        #[arg(value_name = "DEST")]
        output: PathBuf,

        /// Style rule JSON file (full or partial)
        #[arg(short, long, value_name = "FILE", env = "DOCFORGE_STYLE")]
        style: Option<PathBuf>,

        /// Treat pipe-delimited lines as body text
        #[arg(long)]
        no_tables: bool,
    },

    /// Print parsed markup elements as JSON
    Inspect {
        /// Source markup file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the built-in style rules as JSON
    Defaults {
        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract { input, output } => cmd_extract(&input, &output),
        Commands::Generate {
            input,
            output,
            style,
            no_tables,
        } => cmd_generate(&input, &output, style.as_deref(), no_tables),
        Commands::Inspect {
            input,
            output,
            compact,
        } => cmd_inspect(&input, output.as_deref(), compact),
        Commands::Defaults { output } => cmd_defaults(output.as_deref()),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn require_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !path.is_file() {
        return Err(format!("file does not exist: {}", path.display()).into());
    }
    Ok(())
}

fn cmd_extract(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    require_file(input)?;

    let extraction = docforge::extract_styles(input);
    for warning in &extraction.warnings {
        eprintln!("{}: {}", "Warning".yellow().bold(), warning);
    }

    rules::save(output, &extraction.rules)?;
    println!("{} {}", "Styles extracted to".green(), output.display());

    Ok(())
}

fn cmd_generate(
    input: &Path,
    output: &Path,
    style: Option<&Path>,
    no_tables: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(input)?;

    let rules = match style {
        Some(path) => {
            require_file(path)?;
            log::debug!("loading style rules from {}", path.display());
            rules::load(path).map_err(|e| format!("invalid style file {}: {}", path.display(), e))?
        }
        None => StyleRules::builtin(),
    };

    let options = ConvertOptions::new()
        .with_rules(rules)
        .with_parse_options(ParseOptions::new().with_tables(!no_tables));

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(format!("Generating {}...", output.display()));

    let stats = match docforge::convert::convert_file(input, output, &options) {
        Ok(stats) => stats,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };
    pb.finish_and_clear();

    println!("{} {}", "DOCX generated:".green(), output.display());
    print_stats(&stats);

    Ok(())
}

fn print_stats(stats: &RenderStats) {
    let rows = [
        ("Headings", stats.heading_count),
        ("Paragraphs", stats.paragraph_count),
        ("List items", stats.list_item_count),
        ("Quotes", stats.quote_count),
        ("Code blocks", stats.code_block_count),
        ("Tables", stats.table_count),
        ("Words", stats.word_count),
    ];
    let last = rows.len() - 1;
    for (i, (label, count)) in rows.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        println!("  {} {}: {}", branch.dimmed(), label.bold(), count);
    }
}

fn cmd_inspect(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(input)?;

    let text = fs::read_to_string(input)?;
    let elements = docforge::parse_markup(&text);

    let json = if compact {
        serde_json::to_string(&elements)?
    } else {
        serde_json::to_string_pretty(&elements)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_defaults(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let rules = StyleRules::builtin();

    if let Some(path) = output {
        rules::save(path, &rules)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rules::to_json(&rules, JsonFormat::Pretty)?);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docforge".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Styled DOCX generation from markup");
    println!();
    println!("License: MIT");
}
