use std::{env, fs, path::PathBuf};

use clap_complete::shells::{Bash, Fish, PowerShell, Zsh};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("distill")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Distill web pages into compact, model-friendly text")
        .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (compact, html, json)")
                .value_name("FORMAT")
                .default_value("compact")
                .value_parser(["compact", "html", "json"]),
        )
        .arg(clap::arg!(--decode "Treat the input as compact text and render it to HTML"))
        .arg(clap::arg!(--url <URL> "Page URL used to resolve relative links").value_name("URL"))
        .arg(clap::arg!(--title <TITLE> "Title whose repeated heading is dropped from HTML output").value_name("TITLE"))
        .arg(clap::arg!(--"no-dedupe" "Keep repeated blocks"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(-v --verbose "Print progress and debug logs to stderr"));

    clap_complete::generate_to(Bash, &mut cmd, "distill", &completions_dir).unwrap();
    clap_complete::generate_to(Zsh, &mut cmd, "distill", &completions_dir).unwrap();
    clap_complete::generate_to(Fish, &mut cmd, "distill", &completions_dir).unwrap();
    clap_complete::generate_to(PowerShell, &mut cmd, "distill", &completions_dir).unwrap();

    println!("cargo:warning=Shell completions generated in: {}", completions_dir.display());
}
