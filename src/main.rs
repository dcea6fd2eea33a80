//! Docspace - canonical URL resolution for document-graph analysis.

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::{ColorChoice, Parser};
use serde_json::json;

use cli::{Cli, Commands};
use docspace::config::ResolverConfig;
use docspace::resolver::{ResolverChain, UrlResolver};
use docspace::{FileRelativeUrl, PackageRelativeUrl, ResolvedUrl, debug, log};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    docspace::logger::set_verbose(cli.verbose);

    if let Err(e) = run(&cli) {
        log!("error"; "{e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<()> {
    let chain = ResolverConfig::load(&cli.config)
        .with_context(|| format!("failed to load `{}`", cli.config.display()))?
        .into_chain();
    debug!("config"; "{} resolver(s) registered", chain.len());

    match &cli.command {
        Commands::Resolve { reference } => {
            let resolved = resolve(&chain, reference)?;
            emit(cli, "resolved", resolved.as_str())
        }
        Commands::Href { reference, base } => {
            let base = resolve(&chain, base)?;
            debug!("resolve"; "containing document: {base}");
            let resolved = chain.resolve_file_url(&FileRelativeUrl::new(reference.as_str()), &base)?;
            emit(cli, "resolved", resolved.as_str())
        }
        Commands::Relative { from, to } => {
            let from = resolve(&chain, from)?;
            let to = resolve(&chain, to)?;
            let text = chain.relative(&from, &to)?;
            emit(cli, "relative", text.as_str())
        }
    }
}

fn resolve(chain: &ResolverChain, reference: &str) -> Result<ResolvedUrl> {
    if !chain.can_resolve(reference) {
        return Err(anyhow!("no registered resolver handles `{reference}`"));
    }
    chain
        .resolve(&PackageRelativeUrl::new(reference))
        .ok_or_else(|| anyhow!("reference `{reference}` cannot be normalized"))
}

fn emit(cli: &Cli, key: &str, value: &str) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string(&json!({ key: value }))?);
    } else {
        println!("{value}");
    }
    Ok(())
}
