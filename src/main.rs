use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use annual_report::aggregate::{Aggregator, FinancialData};
use annual_report::config::{
    config_dir, load_config, resolve_dir, Config, SourceKind, CONFIG_TEMPLATE, LEDGER_TEMPLATE,
};
use annual_report::error::{ReportError, Result};
use annual_report::fiscal::FiscalYear;
use annual_report::format::{format_currency_with, format_per_share};
use annual_report::layout::PDF_MAGIC;
use annual_report::ledger::source_from_settings;
use annual_report::report::{compose_annual_report, ReportInput, SectionKind};

#[derive(Parser)]
#[command(name = "annual-report")]
#[command(version, about = "Statutory annual report generator", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.annual-report)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// Generate the annual report PDF for a fiscal year
    Generate {
        /// Fiscal year, e.g. 2024-25 or FY2024-25
        fiscal_year: String,

        /// Owner whose ledger is reported on
        owner: String,

        /// Custom output file path (default: output_dir/<owner>-annual-report-FY<year>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open generated PDF with system default viewer
        #[arg(long)]
        open: bool,
    },

    /// Print the aggregated figures without rendering a PDF
    Summary {
        /// Fiscal year, e.g. 2024-25 or FY2024-25
        fiscal_year: String,

        /// Owner whose ledger is reported on
        owner: String,
    },

    /// List report sections in the order they are composed
    Sections,

    /// Show configuration overview
    Status,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Generate {
            fiscal_year,
            owner,
            output,
            open,
        } => cmd_generate(&cfg_dir, &fiscal_year, &owner, output, open),
        Commands::Summary { fiscal_year, owner } => cmd_summary(&cfg_dir, &fiscal_year, &owner),
        Commands::Sections => cmd_sections(),
        Commands::Status => cmd_status(&cfg_dir),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    if cfg_dir.exists() {
        return Err(ReportError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir.join("ledger"))?;
    fs::create_dir_all(cfg_dir.join("output"))?;

    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("ledger").join("example.toml"), LEDGER_TEMPLATE)?;

    println!("Initialized annual-report config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit company, auditor and directors:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Record the ledger for an owner:        $EDITOR {}/ledger/<owner>.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then generate your first report:");
    println!("  annual-report generate 2024-25 example");

    Ok(())
}

struct Figures {
    config: Config,
    fiscal_year: FiscalYear,
    current: FinancialData,
    previous: Option<FinancialData>,
}

/// Fetch the owner's ledger and aggregate the requested year and the one before it.
fn load_figures(cfg_dir: &Path, fiscal_year: &str, owner: &str) -> Result<Figures> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let fiscal_year: FiscalYear = fiscal_year.parse()?;
    let config = load_config(cfg_dir)?;
    let source = source_from_settings(&config.source, cfg_dir)?;
    let records = source.fetch(owner)?;

    let aggregator = Aggregator::from_config(&config);
    let current = aggregator.aggregate(&records, fiscal_year);
    let previous = Some(aggregator.aggregate(&records, fiscal_year.previous()))
        .filter(FinancialData::has_activity);

    Ok(Figures {
        config,
        fiscal_year,
        current,
        previous,
    })
}

fn cmd_generate(
    cfg_dir: &Path,
    fiscal_year: &str,
    owner: &str,
    output: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let figures = load_figures(cfg_dir, fiscal_year, owner)?;
    let config = &figures.config;
    let compliance = config.compliance_items();

    let input = ReportInput {
        company: &config.company,
        auditor: &config.auditor,
        fiscal_year: figures.fiscal_year,
        current: &figures.current,
        previous: figures.previous.as_ref(),
        compliance: &compliance,
        layout: &config.layout,
        grouping: config.report.grouping,
        currency_label: &config.report.currency_label,
        signed_on: Some(chrono::Local::now().date_naive()),
        strict_balance: config.report.strict_balance,
    };

    let document = compose_annual_report(&input)?;
    let bytes = document.to_pdf_bytes()?;

    let pdf_path = match output {
        Some(path) => path,
        None => resolve_dir(&config.report.output_dir, cfg_dir).join(format!(
            "{}-annual-report-FY{}.pdf",
            owner,
            figures.fiscal_year.label()
        )),
    };
    write_pdf(&pdf_path, &bytes)?;

    println!(
        "Generated annual report for {} (FY {})",
        config.company.name, figures.fiscal_year
    );
    println!("  Pages: {}", document.page_count());
    println!("  Saved: {}", pdf_path.display());

    if open {
        open_path(&pdf_path)?;
    }
    Ok(())
}

/// Write `bytes` to `path` only if they look like a PDF. Anything else goes
/// to a `.failed.txt` sidecar and the primary path is left untouched.
fn write_pdf(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    if !bytes.starts_with(PDF_MAGIC) {
        let sidecar = path.with_extension("failed.txt");
        fs::write(&sidecar, bytes)?;
        return Err(ReportError::MalformedOutput(sidecar));
    }

    fs::write(path, bytes)?;
    Ok(())
}

#[derive(Tabled)]
struct FigureRow {
    #[tabled(rename = "PARTICULARS")]
    label: &'static str,
    #[tabled(rename = "CURRENT")]
    current: String,
    #[tabled(rename = "PREVIOUS")]
    previous: String,
}

fn cmd_summary(cfg_dir: &Path, fiscal_year: &str, owner: &str) -> Result<()> {
    let figures = load_figures(cfg_dir, fiscal_year, owner)?;
    let grouping = figures.config.report.grouping;

    let money_rows: [(&'static str, fn(&FinancialData) -> rust_decimal::Decimal); 14] = [
        ("Revenue from operations", |d| d.revenue_from_operations),
        ("Other income", |d| d.other_income),
        ("Total income", |d| d.total_revenue),
        ("Employee benefits", |d| d.employee_benefit),
        ("Finance costs", |d| d.financial_costs),
        ("Depreciation", |d| d.depreciation),
        ("Other expenses", |d| d.other_expenses),
        ("Total expenses", |d| d.total_expenses),
        ("Profit before tax", |d| d.profit_before_tax),
        ("Tax expense", |d| d.tax_expense),
        ("Profit after tax", |d| d.profit_after_tax),
        ("Total equity & liabilities", |d| d.total_liabilities),
        ("Total assets", |d| d.total_assets),
        ("TDS deducted", |d| d.total_tds),
    ];

    let mut rows: Vec<FigureRow> = money_rows
        .iter()
        .map(|&(label, pick)| FigureRow {
            label,
            current: format_currency_with(pick(&figures.current), grouping),
            previous: figures
                .previous
                .as_ref()
                .map(|p| format_currency_with(pick(p), grouping))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    rows.push(FigureRow {
        label: "Earnings per share",
        current: format_per_share(figures.current.earnings_per_share),
        previous: figures
            .previous
            .as_ref()
            .map(|p| format_per_share(p.earnings_per_share))
            .unwrap_or_else(|| "-".to_string()),
    });

    println!(
        "{} - FY {} ({})",
        figures.config.company.name, figures.fiscal_year, figures.config.report.currency_label
    );
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    let difference = figures.current.balance_difference();
    if !difference.is_zero() {
        println!(
            "Balance sheet difference: {}",
            format_currency_with(difference, grouping)
        );
    }

    Ok(())
}

fn cmd_sections() -> Result<()> {
    for (i, kind) in SectionKind::ALL.iter().enumerate() {
        println!("{:>2}. {}", i + 1, kind.title());
    }
    Ok(())
}

/// Show configuration overview
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;

    println!("Annual Report Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Company:          {}", config.company.name);
    println!("Directors:        {}", config.company.directors.len());
    println!("Auditor:          {}", config.auditor.firm_name);
    println!(
        "Output dir:       {}",
        resolve_dir(&config.report.output_dir, cfg_dir).display()
    );
    println!(
        "Tax rate:         {} (cess {})",
        annual_report::format::format_percent(config.tax.rate),
        annual_report::format::format_percent(config.tax.cess_rate)
    );

    match config.source.kind {
        SourceKind::File => {
            let ledger_dir = resolve_dir(&config.source.ledger_dir, cfg_dir);
            let owners = list_owners(&ledger_dir);
            println!("Data source:      file ({})", ledger_dir.display());
            if owners.is_empty() {
                println!("Owners:           none");
            } else {
                println!("Owners:           {}", owners.join(", "));
            }
        }
        SourceKind::Http => {
            println!(
                "Data source:      http ({})",
                config.source.url.as_deref().unwrap_or("no url configured")
            );
        }
    }

    Ok(())
}

/// Ledger owners available in a file source directory.
fn list_owners(ledger_dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(ledger_dir) else {
        return Vec::new();
    };
    let mut owners: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    owners.sort();
    owners
}

fn open_path(pdf_path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(pdf_path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", pdf_path.to_str().unwrap_or("")])
            .spawn()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn malformed_output_goes_to_sidecar() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.pdf");

        let err = write_pdf(&path, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, ReportError::MalformedOutput(_)));
        assert!(!path.exists());
        assert_eq!(
            fs::read(dir.path().join("report.failed.txt")).unwrap(),
            b"<html>oops</html>"
        );
    }

    #[test]
    fn valid_pdf_is_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("report.pdf");
        write_pdf(&path, b"%PDF-1.3\n...").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn owners_are_toml_stems() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("zeta.toml"), "").unwrap();
        fs::write(dir.path().join("acme.toml"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        assert_eq!(list_owners(dir.path()), vec!["acme", "zeta"]);
    }
}
