use clap::Parser;
use launch_dash::config::cli::{Command, SelectionArgs};
use launch_dash::core::dashboard::{Dashboard, SliderSpec};
use launch_dash::core::{RecordSource, SiteSelection};
use launch_dash::domain::model::PayloadRange;
use launch_dash::server::{self, AppState};
use launch_dash::utils::{logger, validation::Validate};
use launch_dash::{
    CliConfig, CsvSource, LocalStorage, RecordStore, Result, SelectionReport, SnapshotExporter,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting launch-dash");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ launch-dash failed: {} (Severity: {:?})",
            e,
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    let settings = cli.resolve_settings()?;
    settings.validate()?;

    // Load failures are fatal: nothing is served without the full table.
    let source = CsvSource::new(LocalStorage::new(""), settings.data_path.clone())
        .with_delimiter(settings.delimiter_byte()?);
    let store = Arc::new(source.load().await?);
    let slider = settings.slider_for(&store)?;
    tracing::debug!(
        "Payload slider {} - {} kg, step {}",
        slider.min(),
        slider.max(),
        slider.step()
    );

    match cli.command {
        Command::Serve { .. } => {
            let state = AppState::new(store, slider).with_chart_size(settings.chart_size);
            server::serve(state, &settings.bind).await
        }
        Command::Summary { selection, json } => {
            let mut dashboard = Dashboard::new(store, slider);
            dashboard.apply_controls(Some(&selection.site), selection.min, selection.max)?;
            let report = SelectionReport::from_dashboard(&dashboard);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.to_text());
            }
            Ok(())
        }
        Command::Export { selection, .. } => {
            let range = requested_range(&store, slider, &selection)?;
            let exporter = SnapshotExporter::new(
                LocalStorage::new(settings.output_path.clone()),
                settings.output_path.clone(),
            )
            .with_chart_size(settings.chart_size);

            let output_path = exporter
                .export(store, slider, &SiteSelection::parse(&selection.site), range)
                .await?;
            println!("✅ Snapshot saved to: {}", output_path);
            Ok(())
        }
    }
}

/// Range asked for on the command line; a missing bound keeps the default.
fn requested_range(
    store: &Arc<RecordStore>,
    slider: SliderSpec,
    selection: &SelectionArgs,
) -> Result<Option<PayloadRange>> {
    if selection.min.is_none() && selection.max.is_none() {
        return Ok(None);
    }
    let initial = Dashboard::new(store.clone(), slider).state().range;
    PayloadRange::new(
        selection.min.unwrap_or(initial.min()),
        selection.max.unwrap_or(initial.max()),
    )
    .map(Some)
}
