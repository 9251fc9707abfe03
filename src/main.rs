use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vultable::common::config::{apply_overrides, load_config, ConfigOverrides};
use vultable::common::config_commands::{run_config_path, run_config_show};
use vultable::gateway::HttpGateway;
use vultable::session::{ReportFile, SubmitOutcome};
use vultable::ui::{indicator_bar, spinner, spinner_error, spinner_success, ReportView, UiLanguage};

#[derive(Parser)]
#[command(name = "vultable")]
#[command(about = "Turn vulnerability-scanner reports into exploits tables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a report and print the download link of the generated table
    Submit {
        #[arg(help = "Scanner report (.xml or .pdf)")]
        file: PathBuf,

        #[arg(long, help = "Table language: ENG or RUS")]
        lang: Option<String>,

        #[arg(long, help = "Interface language: ENG or RUS")]
        ui_lang: Option<UiLanguage>,

        #[arg(long, help = "Base URL of the conversion service")]
        api_url: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the config file location
    Path,
    /// Print the config file, or the defaults when there is none
    Show,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Submit {
            file,
            lang,
            ui_lang,
            api_url,
        } => {
            let overrides = ConfigOverrides {
                api_url,
                ui_language: ui_lang,
            };
            run_submit(file, lang, overrides).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => run_config_path(),
            ConfigCommands::Show => run_config_show(),
        },
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run_submit(path: PathBuf, lang: Option<String>, overrides: ConfigOverrides) -> Result<()> {
    let config = apply_overrides(load_config()?, &overrides)?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    if !ReportFile::is_accepted_name(&file_name) {
        bail!("Only .xml and .pdf reports are accepted: {}", path.display());
    }

    let gateway = HttpGateway::from_config(&config)?;
    let mut view = ReportView::mount(&config);
    let labels = view.labels();

    if let Some(lang) = lang {
        view.choose_language(&lang)?;
    }

    eprintln!("{}", style(labels.title).bold());
    eprintln!(
        "{}: {}",
        labels.table_language,
        labels.table_language_name(view.session().output_language())
    );

    let loading = spinner(labels.upload);
    let report = match ReportFile::from_path(&path).await {
        Ok(report) => report,
        Err(err) => {
            spinner_error(&loading, &labels.file_line(None));
            view.teardown().await;
            return Err(err);
        }
    };
    view.pick_file(report);
    spinner_success(
        &loading,
        &labels.file_line(view.session().selected_file().map(ReportFile::name)),
    );

    // Indicator rendering runs beside the submission and ends when the view stops it.
    let bar = indicator_bar(labels.processing);
    let mut ticks = view.indicator();
    let render = {
        let bar = bar.clone();
        tokio::spawn(async move {
            while ticks.changed().await.is_ok() {
                let value = *ticks.borrow();
                bar.set_position(u64::from(value));
            }
        })
    };

    let outcome = view.submit(&gateway).await;
    view.teardown().await;
    render.await.context("Indicator renderer panicked")?;

    match outcome {
        SubmitOutcome::Ready(link) => {
            spinner_success(&bar, labels.download);
            println!("{link}");
            Ok(())
        }
        SubmitOutcome::Failed => {
            spinner_error(&bar, labels.failed);
            bail!("{} ({})", labels.failed, gateway.endpoint())
        }
        SubmitOutcome::Rejected => {
            spinner_error(&bar, labels.no_file);
            bail!("Nothing to submit")
        }
    }
}
