use clap::{Args, Parser, Subcommand};
use folio::{
    DirectorySink, ExportConfig, ExportError, ExportOptions, ExportReport, FilesystemRasterizer,
    Locale, PdfExporter,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Export pre-rendered report captures as paginated PDF documents.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a region by id as a report with header and page footers.
    Region {
        /// Element id, with or without a leading `#`.
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Export whatever a selector matches, oriented to fit, without decorations.
    View {
        selector: String,
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Directory holding the captured regions (`<slug>.png`, `.jpg`).
    #[arg(long, default_value = ".")]
    dir: PathBuf,
    /// Directory the PDF is written to.
    #[arg(long, default_value = ".")]
    out: PathBuf,
    /// Output name, without the `.pdf` extension.
    #[arg(long)]
    filename: String,
    /// JSON export configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured locale (`es` or `en`).
    #[arg(long)]
    locale: Option<Locale>,
    /// Overrides the configured footer brand.
    #[arg(long)]
    brand: Option<String>,
}

impl CommonArgs {
    fn load_config(&self) -> Result<ExportConfig, ExportError> {
        let mut config = match &self.config {
            Some(path) => ExportConfig::from_file(path)?,
            None => ExportConfig::default(),
        };
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Some(brand) = &self.brand {
            config.brand = brand.clone();
        }
        Ok(config)
    }
}

async fn run(
    common: &CommonArgs,
    config: ExportConfig,
    command: &Command,
) -> Result<ExportReport, ExportError> {
    let exporter = PdfExporter::builder(
        FilesystemRasterizer::new(&common.dir),
        DirectorySink::new(&common.out),
    )
    .with_config(config)
    .build()?;

    match command {
        Command::Region {
            id,
            title,
            subtitle,
            ..
        } => {
            let options = ExportOptions {
                filename: common.filename.clone(),
                title: title.clone(),
                subtitle: subtitle.clone(),
            };
            exporter.export_region(id, options).await
        }
        Command::View { selector, .. } => exporter.export_view(selector, &common.filename).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let common = match &cli.command {
        Command::Region { common, .. } | Command::View { common, .. } => common,
    };

    let (locale, result) = match common.load_config() {
        Ok(config) => (config.locale, run(common, config, &cli.command).await),
        Err(e) => (common.locale.unwrap_or_default(), Err(e)),
    };

    match result {
        Ok(report) => {
            let location = report
                .saved
                .location
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or(report.saved.filename);
            println!("{}: {} ({} pages)", locale.export_success(), location, report.pages);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", locale.export_failure(), e);
            ExitCode::FAILURE
        }
    }
}
