//! # Zakatly CLI
//!
//! A terminal front end for the Zakat calculator.
//!
//! ## Usage
//! ```bash
//! # Guided form
//! zakatly
//!
//! # One-shot calculation
//! zakatly calculate --cash 25000 --gold 2 --gold-unit vori --gold-karat 22 --debts 5000
//!
//! # Export a summary
//! zakatly calculate --gold 10 --gold-karat 22 --export . --format text
//!
//! # Show the rates in use
//! zakatly rates --offline
//! ```

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use zakatly_core::prelude::*;
use zakatly_providers::fetch_with_fallback;

#[cfg(feature = "live-pricing")]
use zakatly_providers::{GoldApiConfig, GoldApiRateProvider};

mod config_loader;
mod output;
mod wizard;

use config_loader::{CliConfig, TOKEN_ENV_VAR};

/// Zakat calculator with live gold/silver rates
#[derive(Parser, Debug)]
#[command(name = "zakatly")]
#[command(author = "Zakatly contributors")]
#[command(version)]
#[command(about = "Zakat calculator with live gold/silver rates and summary export", long_about = None)]
struct Args {
    /// Enable file logging to logs/ directory
    #[arg(long, default_value = "false", global = true)]
    log: bool,

    /// Use default rates instead of fetching live
    #[arg(long, default_value = "false", global = true)]
    offline: bool,

    /// 24K gold price per gram (overrides live/default)
    #[arg(long, global = true)]
    gold_price: Option<Decimal>,

    /// Silver price per gram (overrides live/default)
    #[arg(long, global = true)]
    silver_price: Option<Decimal>,

    /// Currency code for rates and output
    #[arg(long, global = true)]
    currency: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate Zakat from the given holdings
    Calculate(CalculateArgs),
    /// Show the gold/silver rates and Nisab currently in effect
    Rates,
    /// Write a sample configuration file
    InitConfig,
}

#[derive(ClapArgs, Debug, Default)]
struct CalculateArgs {
    /// Cash & savings
    #[arg(long, default_value = "0")]
    cash: String,

    /// Gold weight
    #[arg(long, default_value = "0")]
    gold: String,

    /// Unit of the gold weight (gram, vori)
    #[arg(long, default_value = "gram")]
    gold_unit: WeightUnit,

    /// Gold purity: 24, 22, 21 or 18
    #[arg(long, default_value = "24")]
    gold_karat: Karat,

    /// Silver weight
    #[arg(long, default_value = "0")]
    silver: String,

    /// Unit of the silver weight (gram, vori)
    #[arg(long, default_value = "gram")]
    silver_unit: WeightUnit,

    /// Debts & liabilities
    #[arg(long, default_value = "0")]
    debts: String,

    /// Fill the form interactively
    #[arg(long, default_value = "false")]
    wizard: bool,

    /// Print the summary as JSON instead of a table
    #[arg(long, default_value = "false")]
    json: bool,

    /// Write a summary document to this file or directory
    #[arg(long)]
    export: Option<PathBuf>,

    /// Format of the exported summary
    #[arg(long, value_enum, default_value_t = ExportFormat::Text)]
    format: ExportFormat,

    /// Print the step-by-step calculation
    #[arg(long, default_value = "false")]
    explain: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    #[default]
    Text,
    Json,
}

impl ExportFormat {
    fn exporter(self) -> Box<dyn SummaryExporter> {
        match self {
            ExportFormat::Text => Box::new(TextSummaryExporter),
            ExportFormat::Json => Box::new(JsonSummaryExporter),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let loaded = CliConfig::load();
    let wants_file_log = args.log
        || loaded
            .as_ref()
            .ok()
            .and_then(|c| c.enable_logging)
            .unwrap_or(false);

    // Keep stdout clean for --json: console logs go to stderr.
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>;
    let env_filter = tracing_subscriber::EnvFilter::from_default_env().add_directive("zakatly=info".parse()?);

    if wants_file_log {
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        std::fs::create_dir_all("logs")?;

        let file_appender = tracing_appender::rolling::daily("logs", "zakatly.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        _file_guard = Some(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false),
            )
            .init();

        info!("--- Zakat Calculation Session Started [{}] ---", chrono::Utc::now());
    } else {
        _file_guard = None;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = CliConfig::or_warn(loaded);

    match args.command {
        Some(Commands::InitConfig) => run_init_config(),
        Some(Commands::Rates) => {
            let currency = currency(&args, &config);
            let quote = resolve_quote(&args, &config, true).await;
            println!("{}", output::render_rates(&quote, &currency));
            Ok(())
        }
        Some(Commands::Calculate(ref calc)) => run_calculate(&args, &config, calc).await,
        None => {
            let calc = CalculateArgs {
                wizard: true,
                ..Default::default()
            };
            run_calculate(&args, &config, &calc).await
        }
    }
}

fn currency(args: &Args, config: &CliConfig) -> String {
    args.currency
        .clone()
        .or_else(|| config.currency.clone())
        .unwrap_or_else(|| zakatly_core::summary::DEFAULT_CURRENCY.to_string())
        .to_uppercase()
}

async fn run_calculate(args: &Args, config: &CliConfig, calc: &CalculateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let currency = currency(args, config);
    let quote = resolve_quote(args, config, !calc.json).await;
    let mut session = CalculatorSession::new(quote);

    if calc.wizard {
        if !calc.json {
            println!("{}", output::render_rates(session.quote(), &currency));
        }
        wizard::run_wizard_mode(&mut session)?;
    } else {
        session.set_field_text(AmountField::Cash, &calc.cash);
        session.set_field_text(AmountField::Gold, &calc.gold);
        session.set_gold_unit(calc.gold_unit);
        session.set_gold_karat(calc.gold_karat);
        session.set_field_text(AmountField::Silver, &calc.silver);
        session.set_silver_unit(calc.silver_unit);
        session.set_field_text(AmountField::Debts, &calc.debts);
    }

    let result = session.result();
    let summary = ZakatSummary::new(
        chrono::Local::now().date_naive(),
        session.quote().clone(),
        session.holdings().clone(),
        result,
    )
    .with_currency(currency.clone());

    if calc.json {
        let mut stdout = std::io::stdout().lock();
        JsonSummaryExporter.export(&summary, &mut stdout)?;
    } else {
        if !calc.wizard {
            println!("{}", output::render_rates(&summary.quote, &currency));
        }
        println!("{}", output::render_result(&summary.holdings, &summary.result, &currency));
        if calc.explain {
            println!("{}", summary.result.explain());
        }
    }

    if let Some(target) = &calc.export {
        let exporter = calc.format.exporter();
        let path = export_path(target, exporter.file_name());
        let mut file = std::fs::File::create(&path)?;
        exporter.export(&summary, &mut file)?;
        info!("Exported summary to {:?}", path);
        if !calc.json {
            println!("Summary written to {}", path.display());
        }
    }

    Ok(())
}

/// A directory target gets the exporter's default file name.
fn export_path(target: &Path, file_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(file_name)
    } else {
        target.to_path_buf()
    }
}

/// Decides which rates to use. Never fails: every problem ends in the default rates.
async fn resolve_quote(args: &Args, config: &CliConfig, show_spinner: bool) -> RateQuote {
    let gold_override = args.gold_price.or(config.gold_price);
    let silver_override = args.silver_price.or(config.silver_price);

    if gold_override.is_some() || silver_override.is_some() {
        let gold = gold_override.unwrap_or(MarketRates::FALLBACK.gold_price_per_gram_24k());
        let silver = silver_override.unwrap_or(MarketRates::FALLBACK.silver_price_per_gram());
        return match MarketRates::new(gold, silver) {
            Ok(rates) => {
                info!(%gold, %silver, "using manual rates");
                RateQuote::manual(rates)
            }
            Err(e) => {
                warn!("Ignoring manual rates: {}", e);
                RateQuote::fallback(format!("manual rates rejected: {}", e))
            }
        };
    }

    if args.offline || config.offline.unwrap_or(false) {
        return RateQuote::fallback("offline mode");
    }

    fetch_live(config, &currency(args, config), show_spinner).await
}

#[cfg(feature = "live-pricing")]
async fn fetch_live(config: &CliConfig, currency: &str, show_spinner: bool) -> RateQuote {
    let Some(token) = config.resolve_token(std::env::var(TOKEN_ENV_VAR).ok()) else {
        warn!("No GoldAPI token configured (set {} or api-token in config); using default rates", TOKEN_ENV_VAR);
        return RateQuote::fallback("no GoldAPI token configured");
    };

    let mut gold_api = GoldApiConfig::new(token)
        .with_currency(currency)
        .with_timeout_seconds(config.timeout_seconds);
    if let Some(base_url) = &config.api_base_url {
        gold_api = gold_api.with_base_url(base_url.clone());
    }

    let provider = match GoldApiRateProvider::new(gold_api) {
        Ok(provider) => provider,
        Err(e) => {
            warn!("Cannot create GoldAPI provider: {}", e);
            return RateQuote::fallback(e.to_string());
        }
    };

    let spinner = show_spinner.then(|| {
        let bar = indicatif::ProgressBar::new_spinner();
        bar.set_message("Fetching live gold & silver rates...");
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        bar
    });

    let quote = fetch_with_fallback(&provider).await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    quote
}

#[cfg(not(feature = "live-pricing"))]
async fn fetch_live(config: &CliConfig, _currency: &str, _show_spinner: bool) -> RateQuote {
    let _ = config.resolve_token(std::env::var(TOKEN_ENV_VAR).ok());
    RateQuote::fallback("compiled without 'live-pricing'")
}

fn run_init_config() -> Result<(), Box<dyn std::error::Error>> {
    let path = CliConfig::create_sample()?;
    println!("Sample configuration written to {}", path.display());
    println!("Set api-token (or {}) to enable live rates.", TOKEN_ENV_VAR);
    Ok(())
}
