use std::time::Duration;

use owo_colors::OwoColorize;

use distill_core::ExtractedContent;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Distill".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Distill web pages into compact, model-friendly text\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print timing information, tagged fast, moderate, or slow
pub fn print_timing(label: &str, duration: Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let indicator = if ms < 50.0 {
        "fast".dimmed().to_string()
    } else if ms < 100.0 {
        "moderate".bright_yellow().to_string()
    } else {
        "slow".bright_red().to_string()
    };
    eprintln!("  {} {:>8.2}ms ({})", format!("{}:", label).dimmed(), ms, indicator);
}

/// Print extraction details summary
pub fn print_extraction_details(content: &ExtractedContent) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Extraction Details".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    if !content.title().is_empty() {
        eprintln!("  {} {}", "Title:".dimmed(), content.title().bright_white());
    }
    if let Some(site) = content.site_name() {
        eprintln!("  {} {}", "Site:".dimmed(), site.bright_white());
    }
    eprintln!("  {} {}", "Blocks:".dimmed(), content.blocks().len().to_string().bright_white());

    let media = content.blocks().iter().filter(|b| b.is_media()).count();
    if media > 0 {
        eprintln!("  {} {}", "Media:".dimmed(), media.to_string().bright_white());
    }
    eprintln!("  {} {}", "Words:".dimmed(), content.word_count().to_string().bright_white());
    eprintln!(
        "  {} {}\n",
        "Reading time:".dimmed(),
        format!("{:.1} min", content.reading_time()).bright_white()
    );
}

/// Print timing summary
pub fn print_timing_summary(total: Duration, timings: &[(String, Duration)]) {
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Timing Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());

    for (label, duration) in timings {
        print_timing(label, *duration);
    }

    eprintln!(
        "  {} {:>8.2}ms\n",
        format!("{}:", "Total").bold().dimmed(),
        total.as_secs_f64() * 1000.0
    );
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
