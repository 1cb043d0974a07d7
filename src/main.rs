use anyhow::Result;
use client::cli::CliOptions;
use tokio;

mod client;
mod generator;
mod normalizer;
mod parser;
mod server;
mod validator;

async fn run_from_input(opts: &CliOptions) -> Result<()> {
    // Parse input file, JSON or YAML by extension
    let raw = match opts.input.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => parser::yaml::parse_yaml_file(&opts.input)?,
        _ => parser::json::parse_json_file(&opts.input)?,
    };

    // Normalize into a canonical configuration
    let canonical = normalizer::normalize(&raw);

    // Validate; every violation is surfaced in one pass
    let report = validator::validate_config(&canonical);
    for message in &report.messages {
        tracing::error!("{}", message);
    }
    report.into_result()?;

    // Emit the canonical flat JSON
    let json_str = generator::json::generate_canonical_json(&canonical)?;
    if opts.stdout {
        println!("{}", json_str);
    } else {
        tokio::fs::write(&opts.output, &json_str).await?;
        tracing::info!(
            "Canonical configuration written to {}",
            opts.output.display()
        );
    }

    Ok(())
}

async fn run_as_server(opts: &CliOptions) -> Result<()> {
    println!("Configuration parser service started:");
    println!("  - HTTP server running on port {}", opts.port);

    server::http::start_http_server(opts.port).await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Parse command line arguments
    let opts = client::cli::parse_cli_args();

    // If input file is provided, process it directly
    if opts.input.exists() {
        run_from_input(&opts).await?;
    } else {
        run_as_server(&opts).await?;
    }

    Ok(())
}
