mod classify;
mod error;
mod output;
mod parser;
mod publishers;
mod settings;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use error::CatalogError;
use settings::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "hb_catalog",
    about = "Parse the saved HTML file from the Humble Bundle Library into a tab-separated catalog"
)]
struct Cli {
    /// The saved Humble Bundle Library file
    #[arg(short, long)]
    input_file: PathBuf,

    /// Include Steam Keys in output
    #[arg(long)]
    include_steam: bool,

    /// Output field delimiter (single ASCII character, "\t" or "tab")
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Debug-level diagnostics on stderr (added on top of RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

const VERBOSE_DIRECTIVE: &str = "hb_catalog=debug";

/// `RUST_LOG` (or `info`) as the base; `-v` always adds debug for this crate.
fn log_filter(env: Option<&str>, verbose: bool) -> EnvFilter {
    let base = env
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    if verbose {
        let directive: Directive = VERBOSE_DIRECTIVE
            .parse()
            .expect("BUG: hardcoded verbose directive is invalid");
        base.add_directive(directive)
    } else {
        base
    }
}

fn init_tracing(verbose: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(env.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("Verbose output enabled");

    let t0 = Instant::now();
    let mut settings = Settings::load()?;
    if let Some(d) = cli.delimiter {
        settings.delimiter = d;
    }
    let delimiter = settings.delimiter_byte()?;

    info!(
        "Opening [{}] to look for saved library HTML",
        cli.input_file.display()
    );
    let html = read_html(&cli.input_file)?;
    let table = publishers::load_category_table(&settings.publishers_file);

    let source = cli.input_file.display().to_string();
    let records = match parser::process_page(&source, &html, &table, cli.include_steam) {
        Ok(records) => records,
        Err(e @ CatalogError::NoEntries(_)) => {
            error!("There were no titles found in the file you pointed to");
            error!("Either the tool is out of date or something else is wrong with the HTML");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if records.is_empty() {
        warn!("Every entry was filtered out; nothing to print");
        return Ok(());
    }

    debug!("Printing {} records...", records.len());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::write_records(&mut out, &records, delimiter).context("Failed to write catalog")?;
    out.flush()?;

    debug!("Finished in {}", format_duration(t0.elapsed()));
    info!("All done. Bye!");
    Ok(())
}

/// Saved pages are not always valid UTF-8; decode lossily rather than fail.
fn read_html(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.3}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["hb_catalog", "-i", "library.html"]).unwrap();
        assert_eq!(cli.input_file, PathBuf::from("library.html"));
        assert!(!cli.include_steam);
        assert!(!cli.verbose);
        assert!(cli.delimiter.is_none());
    }

    #[test]
    fn cli_flags() {
        let cli = Cli::try_parse_from([
            "hb_catalog",
            "--input-file",
            "library.html",
            "--include-steam",
            "-v",
            "-d",
            ",",
        ])
        .unwrap();
        assert!(cli.include_steam);
        assert!(cli.verbose);
        assert_eq!(cli.delimiter.as_deref(), Some(","));
    }

    #[test]
    fn input_file_is_required() {
        assert!(Cli::try_parse_from(["hb_catalog"]).is_err());
    }

    #[test]
    fn verbose_overrides_rust_log() {
        let filter = log_filter(Some("warn"), true).to_string();
        assert!(filter.contains("warn"), "{filter}");
        assert!(filter.contains(VERBOSE_DIRECTIVE), "{filter}");
    }

    #[test]
    fn quiet_keeps_rust_log() {
        let filter = log_filter(Some("warn"), false).to_string();
        assert!(!filter.contains(VERBOSE_DIRECTIVE), "{filter}");
        assert!(log_filter(None, false).to_string().contains("info"));
    }

    #[test]
    fn end_to_end_fixture() {
        let html = read_html(Path::new("tests/fixtures/library.html")).unwrap();
        let table =
            publishers::load_category_table(Path::new("tests/fixtures/publishers.json"));
        let records = parser::process_page("library.html", &html, &table, false).unwrap();
        let mut buf = Vec::new();
        output::write_records(&mut buf, &records, b'\t').unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("title\ttitle_pub\ttype"));
        assert_eq!(
            lines.next(),
            Some("Hacking: The Art of Exploitation\tNo Starch Press\teBooks")
        );
        assert!(!text.contains("Steam Key"));
        assert!(text.contains("Baldur’s Gate: Enhanced Edition\tBeamdog\tPC Games"));
    }

    #[test]
    fn missing_input_file_errors() {
        assert!(read_html(Path::new("tests/fixtures/nope.html")).is_err());
    }
}
