mod echo;

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use distill_core::{
    DistillError, ExtractConfig, ExtractedContent, FetchConfig, encode, extract_with_config, fetch_file, fetch_stdin,
    fetch_url, render_html,
};
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::echo::{
    format_size, print_banner, print_extraction_details, print_info, print_step, print_success, print_timing_summary,
};

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for extracted content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Compact,
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" | "text" | "txt" => Ok(Self::Compact),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: compact, html, json", s)),
        }
    }
}

/// Distill web pages into compact text for language models, and render it back to HTML
#[derive(Parser, Debug)]
#[command(name = "distill")]
#[command(version = VERSION)]
#[command(about = "Distill web pages into compact, model-friendly text", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (compact, html, json)
    #[arg(short, long, default_value = "compact", value_name = "FORMAT")]
    format: OutputFormat,

    /// Treat the input as compact text and render it to HTML
    #[arg(long)]
    decode: bool,

    /// Page URL used to resolve relative links (defaults to INPUT when it is a URL)
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Title whose repeated heading is dropped from HTML output
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Keep repeated blocks
    #[arg(long)]
    no_dedupe: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Print progress and debug logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn is_remote(&self) -> bool {
        Url::parse(&self.input).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
    }

    /// The page URL recorded on the output and used as the link base.
    fn page_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None if self.is_remote() => self.input.clone(),
            None => String::new(),
        }
    }

    fn fetch_config(&self) -> FetchConfig {
        let mut config = FetchConfig { timeout: self.timeout, ..Default::default() };
        if let Some(ua) = &self.user_agent {
            config.user_agent = ua.clone();
        }
        config
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("distill=debug,distill_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}

async fn read_input(args: &Args) -> anyhow::Result<String> {
    if args.input == "-" {
        if args.verbose {
            print_step(1, 3, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")
    } else if args.is_remote() {
        if args.verbose {
            print_step(1, 3, &format!("Fetching from {}", args.input.bright_white().underline()));
        }
        fetch_url(&args.input, &args.fetch_config()).await.context("Failed to fetch URL")
    } else {
        if args.verbose {
            print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))
    }
}

fn format_content(content: &ExtractedContent, args: &Args) -> anyhow::Result<String> {
    let output = match args.format {
        OutputFormat::Compact => encode(content),
        OutputFormat::Html => {
            let title = args.title.as_deref().or(Some(content.title())).filter(|t| !t.is_empty());
            render_html(&encode(content), title)
        }
        OutputFormat::Json => serde_json::to_string_pretty(content).context("Failed to serialize content")?,
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let start = Instant::now();
    let mut timings: Vec<(String, Duration)> = Vec::new();

    if args.verbose {
        init_logging();
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    debug!(input = %args.input, format = ?args.format, decode = args.decode, "starting");

    let step = Instant::now();
    let input = read_input(&args).await?;
    timings.push(("Read".to_string(), step.elapsed()));

    if args.verbose {
        eprintln!("  {} {}\n", "Size:".dimmed(), format_size(input.len()).bright_white());
    }

    let output = if args.decode {
        if args.verbose {
            print_step(2, 3, "Rendering compact text");
        }
        let step = Instant::now();
        let markup = render_html(&input, args.title.as_deref());
        timings.push(("Render".to_string(), step.elapsed()));
        markup
    } else {
        if args.verbose {
            print_step(2, 3, "Extracting content blocks");
        }
        let config = ExtractConfig::builder().dedupe(!args.no_dedupe).build();
        let step = Instant::now();
        let content = extract_with_config(&input, &args.page_url(), &config);
        timings.push(("Extract".to_string(), step.elapsed()));

        if content.is_empty() {
            return Err(DistillError::NoContent).context("Nothing to distill");
        }
        if args.verbose {
            print_extraction_details(&content);
        }

        let step = Instant::now();
        let output = format_content(&content, &args)?;
        timings.push(("Encode".to_string(), step.elapsed()));
        output
    };

    if args.verbose {
        print_step(3, 3, "Writing output");
        let format = if args.decode { OutputFormat::Html } else { args.format };
        eprintln!("  {} {}\n", "Format:".dimmed(), format!("{:?}", format).bright_white());
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            if args.verbose {
                print_success(&format!("Output written to {}", path.display().bright_white()));
            }
        }
        None => {
            if output.ends_with('\n') {
                print!("{}", output);
            } else {
                println!("{}", output);
            }
        }
    }

    if args.verbose {
        print_timing_summary(start.elapsed(), &timings);
    }

    Ok(())
}
