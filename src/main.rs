use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use hako_app::{App, CalculatorService};
use hako_core::Config;

#[derive(Parser)]
#[command(name = "hako")]
#[command(about = "Calculator and JMA weather forecast viewer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Press calculator keys in order and print the display
    Calc {
        /// Key labels, e.g. `2 + 3 =` or `5 n! M+`
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        keys: Vec<String>,
    },

    /// List forecast areas grouped by regional center
    Areas,

    /// Fetch, show and store the current forecast for an area
    Forecast {
        /// Office area code, e.g. 130000
        code: String,
    },

    /// Show stored forecasts for an area on a given day
    History {
        /// Office area code
        code: String,

        /// Forecast day (YYYY-MM-DD)
        date: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    hako_core::init()?;

    match cli.command {
        Commands::Calc { keys } => {
            let (config, _) = Config::load_validated()?;
            let mut calculator = CalculatorService::new(&config.calculator);
            match calculator.run(keys.iter().map(String::as_str)) {
                Ok(display) => {
                    println!("{}", display);
                    if let Some(memory) = calculator.memory_label() {
                        println!("{}", memory);
                    }
                }
                Err(e) => {
                    tracing::debug!("{}", e);
                    eprintln!("{}", e.user_message());
                    std::process::exit(2);
                }
            }
        }
        Commands::Areas => {
            let mut app = App::new()?;
            if let Err(e) = app.initialize() {
                eprintln!("{}", app.forecasts().last_error().unwrap_or(e.user_message()));
                std::process::exit(1);
            }
            for group in app.forecasts().groups() {
                println!("{} ({})", group.center.name, group.center.code);
                for office in &group.offices {
                    println!("  {}  {}", office.code, office.name);
                }
            }
            app.shutdown()?;
        }
        Commands::Forecast { code } => {
            let mut app = App::new()?;
            if let Err(e) = app.forecasts().refresh(&code).await {
                eprintln!("{}", app.forecasts().last_error().unwrap_or(e.user_message()));
                std::process::exit(1);
            }
            if let Some(summary) = app.forecasts().summary() {
                if let Some(heading) = summary.heading() {
                    println!("{}", heading);
                }
                if summary.is_empty() {
                    println!("No forecast data");
                }
                for area in &summary.areas {
                    println!();
                    println!("{}", area.title());
                    for line in area.lines() {
                        println!("  {}", line);
                    }
                }
            }
            app.shutdown()?;
        }
        Commands::History { code, date } => {
            let mut app = App::new()?;
            let records = match app.forecasts().history(&code, date) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                }
            };
            if records.is_empty() {
                println!("No stored forecasts for {} on {}", code, date);
            } else {
                println!("Forecast history for {}", date.format("%Y-%m-%d"));
                for record in &records {
                    println!();
                    println!("{}", record.area_name);
                    for line in record.detail_lines() {
                        println!("  {}", line);
                    }
                }
            }
            app.shutdown()?;
        }
    }

    Ok(())
}
