use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;

use dqreport::config::{self, Config};
use dqreport::report::{self, ReportFormat};

const BANNER_RULE: &str = "-------------------------------------";

/// Data quality reports for newline-delimited JSON datasets
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Generate data quality reports from newline-delimited JSON datasets"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report on the brand catalog
    Brands {
        /// Path for Brands JSON data [default: <data_dir>/brands.json]
        #[arg(long = "json_path")]
        json_path: Option<PathBuf>,

        /// Path for Brands Report [default: <report_dir>/brands.txt]
        #[arg(long = "report_path")]
        report_path: Option<PathBuf>,

        /// Report encoding (overrides the config file)
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
    },

    /// Report on users and their receipts
    UsersReceipts {
        /// Path for Users JSON data [default: <data_dir>/users.json]
        #[arg(long = "user_json_path")]
        user_json_path: Option<PathBuf>,

        /// Path for Receipts JSON data [default: <data_dir>/receipts.json]
        #[arg(long = "receipts_json_path")]
        receipts_json_path: Option<PathBuf>,

        /// Path for Users and Receipts Report [default: <report_dir>/users_receipts.txt]
        #[arg(long = "report_path")]
        report_path: Option<PathBuf>,

        /// Report encoding (overrides the config file)
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
    },
}

fn main() -> Result<()> {
    dqreport::logging::init();
    color_eyre::install()?;

    let config_result = config::load_config();
    if let Some(warning) = &config_result.warning {
        log::warn!("{}", warning);
        eprintln!("Warning: {}", warning);
    }
    let config = config_result.config;

    let args = Args::parse();

    match args.command {
        Command::Brands {
            json_path,
            report_path,
            format,
        } => {
            print_banner("Generate Report on Brands data!");
            let json_path = json_path.unwrap_or_else(|| config.data_path("brands.json"));
            let report_path = report_path.unwrap_or_else(|| config.report_path("brands.txt"));
            let format = resolve_format(format, &config);

            println!(
                "Arguments: json_path={}, report_path={}, format={}",
                json_path.display(),
                report_path.display(),
                format
            );
            println!("{}", BANNER_RULE);

            report::brands::generate(&json_path, &report_path, format)?;
            print_banner("Successfully generated report for Brands!");
        }
        Command::UsersReceipts {
            user_json_path,
            receipts_json_path,
            report_path,
            format,
        } => {
            print_banner("Generate Report on Users and Receipts data!");
            let users_path = user_json_path.unwrap_or_else(|| config.data_path("users.json"));
            let receipts_path =
                receipts_json_path.unwrap_or_else(|| config.data_path("receipts.json"));
            let report_path =
                report_path.unwrap_or_else(|| config.report_path("users_receipts.txt"));
            let format = resolve_format(format, &config);

            println!(
                "Arguments: user_json_path={}, receipts_json_path={}, report_path={}, format={}",
                users_path.display(),
                receipts_path.display(),
                report_path.display(),
                format
            );
            println!("{}", BANNER_RULE);

            report::users_receipts::generate(&users_path, &receipts_path, &report_path, format)?;
            print_banner("Successfully generated report for Users and Receipts!");
        }
    }

    Ok(())
}

/// CLI flag wins over the config file
fn resolve_format(flag: Option<ReportFormat>, config: &Config) -> ReportFormat {
    flag.unwrap_or(config.report.format)
}

fn print_banner(message: &str) {
    println!("\n{}\n{}\n{}\n", BANNER_RULE, message, BANNER_RULE);
}
