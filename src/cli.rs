use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::{ReportOptions, report, serve};

#[derive(Parser)]
#[command(name = "salesops-dashboard")]
#[command(about = "Sales and shipping report dashboard with CLI tools and web server")]
#[command(version)]
pub struct Cli {
    /// Settings file without extension (e.g. `dashboard` for dashboard.toml)
    #[arg(short, long, global = true, env = "DASHBOARD_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the dashboard web server
    Serve {
        /// Base URL of the report API
        ///
        /// Examples:
        ///   http://127.0.0.1:8000
        ///   https://reports.internal/api
        #[arg(short, long)]
        api_base_url: Option<String>,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long)]
        bind_address: Option<String>,
    },
    /// Load the dashboard once and print the weekly digest
    ///
    /// Dates default to the startup window ending today. Exits with an
    /// error when the load fails.
    Report {
        /// Base URL of the report API
        #[arg(short, long)]
        api_base_url: Option<String>,

        /// Window start (YYYY-MM-DD)
        #[arg(short, long)]
        start_date: Option<String>,

        /// Window end, inclusive (YYYY-MM-DD)
        #[arg(short, long)]
        end_date: Option<String>,

        /// Top products limit
        #[arg(short, long)]
        limit: Option<String>,

        /// Data-quality mismatch tolerance
        #[arg(short, long)]
        tol: Option<String>,

        /// Write the rendered HTML dashboard to this file
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = self.config.as_deref();
        match self.command {
            Commands::Serve { api_base_url, bind_address } => {
                serve(config, api_base_url, bind_address).await?;
            }
            Commands::Report {
                api_base_url,
                start_date,
                end_date,
                limit,
                tol,
                output,
            } => {
                let options = ReportOptions {
                    api_base_url,
                    start_date,
                    end_date,
                    limit,
                    tol,
                    output,
                };
                report(config, options).await?;
            }
        }
        Ok(())
    }
}
