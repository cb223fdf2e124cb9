use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Utc;
use structopt::StructOpt;

use disaster_risk::config::Config;
use disaster_risk::input::RequestReader;
use disaster_risk::models::{Coordinates, HazardType, RiskLevel, RiskRequest};
use disaster_risk::output::{OutputFormat, OutputHandler};
use disaster_risk::report::RiskReport;
use disaster_risk::scoring::{current_month, RiskScorer, RngJitter};

/// Options shared by the scoring subcommands
#[derive(StructOpt, Debug)]
pub struct CommonOpts {
    /// Path to configuration file
    #[structopt(short, long, default_value = "config.toml")]
    config: PathBuf,
    /// Seed for the random draws (overrides the config file)
    #[structopt(long)]
    seed: Option<u64>,
    /// Calendar month 1-12 (overrides the config file and the clock)
    #[structopt(long)]
    month: Option<u32>,
    /// Output format: json, jsonl or console (overrides the config file)
    #[structopt(short, long)]
    format: Option<String>,
    /// Enable debug logging
    #[structopt(short, long)]
    verbose: bool,
}

/// Disaster risk scoring command line interface
#[derive(StructOpt, Debug)]
#[structopt(name = "risk", about = "Disaster risk scoring CLI")]
pub enum Cli {
    /// Score a single request
    Assess {
        #[structopt(flatten)]
        common: CommonOpts,
        /// JSON file holding the request; flags below are ignored when given
        #[structopt(short, long)]
        request: Option<PathBuf>,
        /// Hazard type (flood, cyclone, earthquake, drought, wildfire, ...)
        #[structopt(long, default_value = "other")]
        hazard: String,
        /// Location as "lat,lng"
        #[structopt(long)]
        coordinates: Option<Coordinates>,
        #[structopt(long)]
        population_density: Option<f64>,
        #[structopt(long)]
        infrastructure_age: Option<f64>,
        #[structopt(long)]
        economic_index: Option<f64>,
        #[structopt(long)]
        historical_frequency: Option<f64>,
    },
    /// Score every request in a JSON or JSONL file
    Batch {
        #[structopt(flatten)]
        common: CommonOpts,
        /// Input file (.json holds an object or array, .jsonl one request per line)
        #[structopt(short, long)]
        input: PathBuf,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
}

/// Everything a scoring run needs once flags and config are merged
struct Session {
    scorer: RiskScorer,
    /// Pinned month; the clock decides when absent
    month: Option<u32>,
    jitter: RngJitter<rand::rngs::StdRng>,
    config: Config,
    output: OutputHandler,
}

impl Session {
    fn open(common: &CommonOpts) -> Result<Self, Box<dyn std::error::Error>> {
        init_logging(common.verbose);

        let mut config = if common.config.exists() {
            let config = Config::from_file(&common.config)?;
            log::info!("Configuration loaded from {:?}", common.config);
            config
        } else {
            log::debug!("Config file {:?} not found, using defaults", common.config);
            Config::default()
        };

        if common.seed.is_some() {
            config.scoring.seed = common.seed;
        }
        if common.month.is_some() {
            config.scoring.month = common.month;
        }
        if let Some(ref format) = common.format {
            config.output.format = format.clone();
        }
        config.validate()?;

        let output = OutputHandler::new(
            OutputFormat::from_str(&config.output.format),
            config.output.file_path.clone(),
        )?;

        Ok(Session {
            scorer: RiskScorer::with_defaults(config.scoring.defaults),
            month: config.scoring.month,
            jitter: RngJitter::from_optional_seed(config.scoring.seed),
            config,
            output,
        })
    }

    /// Score one request, write its report, and write a notice when it crosses the threshold
    fn run(&mut self, request: &RiskRequest) -> Result<RiskLevel, Box<dyn std::error::Error>> {
        let assessment = match self.month {
            Some(month) => self.scorer.assess(request, month, &mut self.jitter),
            None => self.scorer.assess_now(request, &mut self.jitter),
        };
        let now = Utc::now();

        self.output.write_report(&RiskReport::new(request, &assessment, now))?;

        if let Some(notice) = self.config.alerting.evaluate(request, &assessment, now) {
            log::warn!(
                "HIGH RISK: {} at {} - probability {:.3} ({})",
                notice.hazard_type,
                notice
                    .location
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "unknown location".to_string()),
                notice.probability,
                notice.risk_level
            );
            self.output.write_notice(&notice)?;
        }

        Ok(assessment.risk_level)
    }

    fn month_label(&self) -> String {
        match self.month {
            Some(month) => month.to_string(),
            None => format!("{} (current)", current_month()),
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::from_args();

    match cli {
        Cli::Assess {
            common,
            request,
            hazard,
            coordinates,
            population_density,
            infrastructure_age,
            economic_index,
            historical_frequency,
        } => {
            let mut session = Session::open(&common)?;

            let request = match request {
                Some(path) => {
                    let mut batch = RequestReader::new(path).read_requests()?;
                    if batch.requests.len() > 1 {
                        log::warn!(
                            "Request file holds {} requests, scoring the first; use 'batch' for all",
                            batch.requests.len()
                        );
                    }
                    batch.requests.swap_remove(0)
                }
                None => RiskRequest {
                    coordinates,
                    hazard_type: HazardType::from_name(&hazard),
                    hazard_name: Some(hazard),
                    population_density,
                    infrastructure_age,
                    economic_index,
                    historical_frequency,
                },
            };

            log::info!("Scoring {} for month {}", request.hazard_label(), session.month_label());
            session.run(&request)?;
            session.output.flush()?;
        }
        Cli::Batch { common, input } => {
            let mut session = Session::open(&common)?;
            let batch = RequestReader::new(input).read_requests()?;

            log::info!(
                "Scoring {} request(s) for month {}",
                batch.requests.len(),
                session.month_label()
            );

            let mut by_level: BTreeMap<RiskLevel, usize> = BTreeMap::new();
            for request in &batch.requests {
                let level = session.run(request)?;
                *by_level.entry(level).or_insert(0) += 1;
            }
            session.output.flush()?;

            let summary: Vec<String> = by_level
                .iter()
                .map(|(level, count)| format!("{}={}", level, count))
                .collect();
            log::info!(
                "Batch complete: {} scored, {} skipped [{}]",
                batch.requests.len(),
                batch.skipped,
                summary.join(", ")
            );
        }
        Cli::Config { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
    }

    Ok(())
}
