use clap::{Parser, ValueEnum};
use pkgscan_core::{ArchiveMatch, Classpath, ScanConfig, ScanReport, TypeFilter};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "pkgscan",
    version,
    about = "Lists the JVM types under a package across class directories and jars",
    long_about = "Resolves a dotted package name against every directory and jar on the given \
                  classpath, loads each class file found there, and prints the types that pass \
                  the optional supertype and annotation filters."
)]
pub struct Cli {
    /// Dotted package name, e.g. com.acme.plugins
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    /// Lookup roots: directories and jars, in platform path-list form
    #[arg(long, short = 'c', value_name = "ROOTS")]
    pub classpath: std::ffi::OsString,

    /// Keep only types assignable to this fully-qualified type
    #[arg(long, value_name = "TYPE")]
    pub extends: Option<String>,

    /// Keep only types annotated with this fully-qualified annotation
    #[arg(long, value_name = "TYPE")]
    pub marker: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Skip nested types (names containing `$`)
    #[arg(long)]
    pub no_nested: bool,

    /// Match jar entries by package prefix instead of substring
    #[arg(long)]
    pub strict_archive_prefix: bool,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

impl Cli {
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            include_nested: !self.no_nested,
            archive_match: if self.strict_archive_prefix {
                ArchiveMatch::SegmentPrefix
            } else {
                ArchiveMatch::Substring
            },
            ..ScanConfig::default()
        }
    }

    /// `-v` lowers the default filter to debug; `RUST_LOG` overrides both.
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn filter(&self) -> TypeFilter {
        TypeFilter {
            supertype: self.extends.clone(),
            marker: self.marker.clone(),
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard =
        pkgscan_core::logging::init_logging("pkgscan", cli.log_level(), cli.log_dir.as_deref());

    let classpath = Classpath::parse(&cli.classpath);
    info!("Scanning {} over {} roots", cli.package, classpath.roots().len());

    let scanner = pkgscan_java::class_path_scanner(classpath, cli.scan_config());
    let report = scanner.scan(&cli.package, &cli.filter())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        Format::Text => render_text(&report, &mut out)?,
        Format::Json => render_json(&report, &mut out)?,
    }
    Ok(())
}

/// One type per line, then one `!`-prefixed line per skipped entry.
pub fn render_text(report: &ScanReport, out: &mut impl Write) -> std::io::Result<()> {
    for handle in report.types.iter() {
        writeln!(out, "{}", handle.name())?;
    }
    for failure in &report.failures {
        writeln!(out, "! {} ({}): {}", failure.type_name, failure.entry, failure.error)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ScanReport,
    count: usize,
}

pub fn render_json(report: &ScanReport, out: &mut impl Write) -> std::io::Result<()> {
    let doc = JsonReport {
        report,
        count: report.types.len(),
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}
