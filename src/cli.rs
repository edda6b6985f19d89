use clap::{Parser, Subcommand};
use donation_ledger::config::{Config, OutputFormat};
use donation_ledger::error::{Error, Result};
use donation_ledger::logger::Logger;
use donation_ledger::state::{DonationStore, NewDonation};
use donation_ledger::storage::FileBackend;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "donation-ledger")]
#[command(about = "Donation Ledger CLI - track charitable donations and their status")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: "human" or "json"
    #[arg(short, long)]
    pub format: Option<String>,

    /// Data directory path
    #[arg(short, long)]
    pub data_dir: Option<String>,

    /// Log level: "error", "warn", "info" or "debug"
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the data directory and an empty ledger
    Init,

    /// Record a new donation (status starts as Created)
    Create {
        /// Donation id, also the ledger key
        #[arg(long)]
        id: String,

        #[arg(long)]
        donor: String,

        #[arg(long)]
        ngo: String,

        #[arg(long)]
        purpose: String,

        /// Date as given by the caller, stored verbatim
        #[arg(long)]
        date: String,

        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
    },

    /// Change the status of an existing donation
    UpdateStatus {
        id: String,
        status: String,
    },

    /// Show one donation
    Get {
        id: String,
    },

    /// List all donations in id order
    List,
}

/// Format output based on format type
fn format_output<T>(data: &T, format: OutputFormat) -> Result<String>
where
    T: serde::Serialize + std::fmt::Debug,
{
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(data).map_err(Error::Output),
        OutputFormat::Human => Ok(format!("{:#?}", data)),
    }
}

fn open_store(config: &Config) -> Result<DonationStore<FileBackend>> {
    let backend = FileBackend::new(config).map_err(Error::Open)?;
    Ok(DonationStore::new(backend))
}

pub fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(dir) = cli.data_dir {
        config.set_data_dir(PathBuf::from(dir));
    }
    if let Some(format) = cli.format {
        config.set_output_format(format);
    }
    if let Some(level) = cli.log_level {
        config.set_log_level(level);
    }
    Logger::set_level(config.parsed_log_level()?);

    let format = config.parsed_output_format()?;

    match cli.command {
        Commands::Init => {
            let store = open_store(&config)?;
            let created = store.backend().init().map_err(Error::Open)?;
            if created {
                println!("Initialized ledger at: {}", store.backend().path().display());
            } else {
                println!("Ledger already exists at: {}", store.backend().path().display());
            }
            Ok(())
        }

        Commands::Create {
            id,
            donor,
            ngo,
            purpose,
            date,
            amount,
        } => {
            let mut store = open_store(&config)?;
            let donation =
                store.create_donation(NewDonation::new(id, donor, ngo, purpose, date, amount))?;
            Logger::info(&format!("Donation {} recorded", donation.id));
            println!("{}", format_output(&donation, format)?);
            Ok(())
        }

        Commands::UpdateStatus { id, status } => {
            let mut store = open_store(&config)?;
            let donation = store.update_status(&id, &status)?;
            Logger::info(&format!("Donation {} is now {}", donation.id, donation.status));
            println!("{}", format_output(&donation, format)?);
            Ok(())
        }

        Commands::Get { id } => {
            let store = open_store(&config)?;
            let donation = store.get_donation(&id)?;
            println!("{}", format_output(&donation, format)?);
            Ok(())
        }

        Commands::List => {
            let store = open_store(&config)?;
            let donations = store.get_all_donations()?;
            println!("{}", format_output(&donations, format)?);
            Ok(())
        }
    }
}
