use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use layered_audit::{
    load_corpus, AnsiStyle, Audit, AuditConfig, AuditReport, PlainStyle, ReportRenderer,
    ReportStyle,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "layered-audit", version)]
#[command(about = "Report annotation inconsistencies in a TEI corpus")]
struct Cli {
    /// Directory containing the annotated documents
    corpus_dir: PathBuf,
    /// TOML file overriding the default audit configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// When to color the report
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => std::io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    print!("{}", run(&cli)?);
    Ok(())
}

/// Load, audit and render. Nothing is printed on error.
fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = match &cli.config {
        Some(path) => AuditConfig::load(path)?,
        None => AuditConfig::default(),
    };

    let corpus = load_corpus(&cli.corpus_dir, &config).with_context(|| {
        format!(
            "path not found or not a directory: {}",
            cli.corpus_dir.display()
        )
    })?;
    let report = Audit::new(&corpus, &config).run();
    let summary = report.summary();
    info!(
        tokens = summary.tokens,
        orphans = summary.with_orphans,
        ambiguous = summary.ambiguous,
        "audit finished"
    );

    Ok(render(&report, &config, cli.color))
}

fn render(report: &AuditReport, config: &AuditConfig, color: ColorChoice) -> String {
    if color.enabled() {
        // Output may still be piped with `--color always`.
        colored::control::set_override(true);
        renderer(AnsiStyle, config).render(report)
    } else {
        renderer(PlainStyle, config).render(report)
    }
}

fn renderer<S: ReportStyle>(style: S, config: &AuditConfig) -> ReportRenderer<S> {
    ReportRenderer::new(style).with_unavailable_marker(config.unavailable_marker.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    fn fixture_dir(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_corpus_dir_required() {
        assert!(Cli::try_parse_from(["layered-audit"]).is_err());
    }

    #[test]
    fn test_parse_options() {
        let cli = Cli::try_parse_from([
            "layered-audit",
            "corpus/",
            "--config",
            "audit.toml",
            "--color",
            "never",
        ])
        .unwrap();
        assert_eq!(cli.corpus_dir, PathBuf::from("corpus/"));
        assert_eq!(cli.config, Some(PathBuf::from("audit.toml")));
        assert!(!cli.color.enabled());
    }

    #[test]
    fn test_run_missing_directory() {
        let cli = Cli::try_parse_from(["layered-audit", "/nonexistent/corpus"]).unwrap();
        let err = run(&cli).unwrap_err();
        assert_eq!(
            err.to_string(),
            "path not found or not a directory: /nonexistent/corpus"
        );
        // The underlying cause is kept in the chain
        assert!(format!("{:#}", err).contains("cannot list corpus directory"));
    }

    #[test]
    fn test_run_invalid_config() {
        let corpus = fixture_dir("astro");
        let config = fixture_dir("missing.toml");
        let cli = Cli::try_parse_from([
            "layered-audit",
            corpus.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .unwrap();
        assert!(run(&cli).is_err());
    }

    #[test]
    fn test_run_fixture_corpus() {
        let corpus = fixture_dir("astro");
        let cli = Cli::try_parse_from(["layered-audit", corpus.to_str().unwrap(), "--color", "never"])
        .unwrap();
        let output = run(&cli).unwrap();
        assert!(output.contains("WR102  [astro-object] :"));
        assert!(output.ends_with(
            "2 documents, 6 tokens: 3 with orphan occurrences, 1 with multiple labels, 0 issues\n"
        ));
    }
}
