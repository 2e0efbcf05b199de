//! perfil CLI - demographic counts from lawyer profile reports

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use perfil::{
    render, BackendKind, JsonFormat, Perfil, RecordSource, RenderOptions, ResultSet,
    DEFAULT_REPORT_FILE,
};

#[derive(Parser)]
#[command(name = "perfil")]
#[command(version)]
#[command(about = "Gender and children counts from lawyer profile PDF reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every profile in the report and chart the counts
    Analyze {
        /// Input PDF file
        #[arg(value_name = "FILE", default_value = DEFAULT_REPORT_FILE)]
        input: PathBuf,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// Extraction backend, repeat to set the fallback order
        #[arg(long = "backend", value_enum)]
        backends: Vec<BackendArg>,

        /// Rows shown in the sample table
        #[arg(long, default_value = "50")]
        sample: usize,
    },

    /// Read the headline counts printed on a single page
    Page {
        /// Input PDF file
        #[arg(value_name = "FILE", default_value = DEFAULT_REPORT_FILE)]
        input: PathBuf,

        /// 1-based page number
        #[arg(long, default_value_t = perfil::DEFAULT_SUMMARY_PAGE)]
        page: u32,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the extracted text
    Text {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Extraction backend, repeat to set the fallback order
        #[arg(long = "backend", value_enum)]
        backends: Vec<BackendArg>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    /// Structure-aware extraction (lopdf)
    Lopdf,
    /// Lower fidelity extraction (pdf-extract)
    PdfExtract,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Lopdf => BackendKind::Lopdf,
            BackendArg::PdfExtract => BackendKind::PdfExtract,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Analyze {
            input,
            json,
            compact,
            backends,
            sample,
        }) => cmd_analyze(&input, json, compact, &backends, sample),
        Some(Commands::Page { input, page, json }) => cmd_page(&input, page, json),
        Some(Commands::Text { input, backends }) => cmd_text(&input, &backends),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Uso: perfil analyze [ARQUIVO]".yellow());
            println!("     perfil --help para mais informações");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        if let Some(err) = e.downcast_ref::<perfil::Error>() {
            for hint in err.suggestions() {
                eprintln!("  {} {}", "-".dimmed(), hint);
            }
        }
        std::process::exit(1);
    }
}

fn configure(backends: &[BackendArg]) -> Perfil {
    let perfil = Perfil::new();
    if backends.is_empty() {
        return perfil;
    }
    let kinds: Vec<BackendKind> = backends.iter().map(|&b| b.into()).collect();
    log::debug!("backend order: {:?}", kinds);
    perfil.with_backends(&kinds)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

fn cmd_analyze(
    input: &Path,
    json: bool,
    compact: bool,
    backends: &[BackendArg],
    sample: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = spinner("Extraindo texto...");
    let report = configure(backends).analyze(input);
    pb.finish_and_clear();
    let report = report?;

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", render::to_json(&report, format)?);
        return Ok(());
    }

    if let Some(backend) = &report.extraction.backend {
        println!(
            "{} {} ({} caracteres)",
            "Texto extraído com".green(),
            backend.as_str().bold(),
            report.extraction.char_count()
        );
    }
    if let Some(notice) = analysis_notice(&report.results) {
        println!("{}", notice.yellow());
    }
    println!();

    let options = RenderOptions::new().with_sample_size(sample);
    print!("{}", render::to_text(&report, &options)?);

    Ok(())
}

/// Warning shown above the report when no individual profile was classified.
fn analysis_notice(results: &ResultSet) -> Option<&'static str> {
    match results.source {
        RecordSource::Profiles => None,
        RecordSource::Aggregate => {
            Some("Perfis não segmentados; usando contagem de palavras-chave.")
        }
        RecordSource::Empty => Some("Nenhum perfil identificado."),
    }
}

fn cmd_page(input: &Path, page: u32, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pb = spinner(&format!("Lendo página {}...", page));
    let counts = Perfil::new().with_page_number(page).page_counts(input);
    pb.finish_and_clear();
    let counts = counts?;

    if json {
        println!("{}", render::to_json(&counts, JsonFormat::Pretty)?);
    } else {
        print!("{}", render::page_counts_to_text(&counts));
    }

    Ok(())
}

fn cmd_text(input: &Path, backends: &[BackendArg]) -> Result<(), Box<dyn std::error::Error>> {
    let pb = spinner("Extraindo texto...");
    let extraction = configure(backends).extract(input);
    pb.finish_and_clear();
    let extraction = extraction?;

    if extraction.is_blank() {
        eprintln!("{}", "Nenhum texto extraído.".yellow());
        for attempt in &extraction.attempts {
            eprintln!(
                "  {} {}: {:?}",
                "-".dimmed(),
                attempt.backend,
                attempt.outcome
            );
        }
    } else {
        print!("{}", extraction.text);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "perfil".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Análise de relatórios de perfil de advogados");
    println!();
    let backends: Vec<&str> = BackendKind::ALL
        .iter()
        .filter(|k| k.is_available())
        .map(|k| k.name())
        .collect();
    println!("Backends: {}", backends.join(", "));
    println!("Licença: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_defaults() {
        let cli = Cli::try_parse_from(["perfil", "analyze"]).unwrap();
        match cli.command {
            Some(Commands::Analyze {
                input,
                json,
                backends,
                sample,
                ..
            }) => {
                assert_eq!(input, PathBuf::from(DEFAULT_REPORT_FILE));
                assert!(!json);
                assert!(backends.is_empty());
                assert_eq!(sample, 50);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_backend_order_is_kept() {
        let cli = Cli::try_parse_from([
            "perfil",
            "text",
            "perfil.pdf",
            "--backend",
            "pdf-extract",
            "--backend",
            "lopdf",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Text { backends, .. }) => {
                let kinds: Vec<BackendKind> = backends.into_iter().map(Into::into).collect();
                assert_eq!(kinds, vec![BackendKind::PdfExtract, BackendKind::Lopdf]);
            }
            _ => panic!("expected text command"),
        }
    }

    #[test]
    fn test_compact_requires_json() {
        let result = Cli::try_parse_from(["perfil", "analyze", "--compact"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_analysis_notice_is_portuguese() {
        let mut results = ResultSet::default();
        let notice = analysis_notice(&results);
        assert_eq!(notice, Some("Nenhum perfil identificado."));

        results.source = RecordSource::Aggregate;
        let notice = analysis_notice(&results).unwrap();
        assert!(notice.starts_with("Perfis não segmentados"));

        results.source = RecordSource::Profiles;
        assert_eq!(analysis_notice(&results), None);
    }
}
