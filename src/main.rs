use age_counter::core::live::{run_live, LiveOptions};
use age_counter::core::render::{self, OutputFormat};
use age_counter::core::ConfigProvider;
use age_counter::utils::error::AgeError;
use age_counter::utils::{logger, validation::Validate};
use age_counter::{AgeCounter, CliConfig, CsvHistory, Settings, SystemClock};
use clap::Parser;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let settings = match config.settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌
    logger::init_cli_logger(config.verbose, settings.log_level(), settings.log_format());

    tracing::info!("Starting age-counter");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
        tracing::debug!("Effective settings: {:?}", settings);
    }

    if let Err(e) = config.validate() {
        fail(e);
    }

    if let Err(e) = run(&config, &settings).await {
        fail(e);
    }

    Ok(())
}

async fn run(config: &CliConfig, settings: &Settings) -> age_counter::Result<()> {
    let history = CsvHistory::new(settings.history_path());
    let mut counter = AgeCounter::new(history, SystemClock);

    if config.list {
        let saved = counter.saved_dobs().await?;
        if saved.is_empty() {
            println!("No saved DOBs");
        }
        for dob in saved {
            println!("{}", dob);
        }
        return Ok(());
    }

    match &config.dob {
        Some(dob) => counter.start(dob).await?,
        None => counter.resume_latest().await?,
    };

    let format = settings.output_format();
    if !config.live {
        let tick = counter.tick()?;
        println!("{}", render::render(&tick.breakdown, format)?);
        return Ok(());
    }

    let options = LiveOptions {
        interval: Duration::from_millis(settings.refresh_interval_ms()),
        max_ticks: config.ticks,
    };
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    run_live(&mut counter, options, shutdown, |tick| {
        println!("{}", render::render(&tick.breakdown, format)?);
        if format == OutputFormat::Text {
            println!();
        }
        Ok(())
    })
    .await?;

    Ok(())
}

fn fail(e: AgeError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
