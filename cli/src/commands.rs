pub mod account;
pub mod bookings;
pub mod customers;
pub mod dashboard;
pub mod reports;
pub mod reviews;
pub mod vehicles;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};
use fleetdash_common::config::{BackendConfig, Config, default_session_path};
use fleetdash_common::models::report::TrendPeriod;
use fleetdash_common::models::{BookingStatus, Identity};
use fleetdash_core::backend::RestBackend;
use fleetdash_core::services::{AuthService, Repositories};
use fleetdash_core::session::FileSessionStore;

use tracing::debug;

use crate::terminal::spinner;

#[derive(Parser)]
#[command(name = "fleetdash", version)]
#[command(about = "Admin console for a car-rental fleet.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Project URL of the rental backend
    #[arg(long, global = true, env = "FLEETDASH_URL")]
    pub url: Option<String>,

    /// Public (anon) API key of the project
    #[arg(long, global = true, env = "FLEETDASH_ANON_KEY", hide_env_values = true)]
    pub anon_key: Option<String>,

    /// Where the signed-in session is kept
    #[arg(long, global = true, env = "FLEETDASH_SESSION")]
    pub session_file: Option<PathBuf>,

    /// Seconds to wait for each backend request
    #[arg(long, global = true, env = "FLEETDASH_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Less output; repeat for bare rows
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Skip the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with e-mail and password
    Login {
        email: String,
        #[arg(long, env = "FLEETDASH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account and its customer profile
    Signup {
        email: String,
        #[arg(long, env = "FLEETDASH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in account
    #[command(alias = "me")]
    Whoami,
    /// Update your own profile
    Profile {
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Fleet and revenue counters
    #[command(alias = "d")]
    Dashboard,
    /// Manage the fleet
    #[command(alias = "v", subcommand)]
    Vehicles(VehicleCommand),
    /// Manage reservations
    #[command(alias = "b", subcommand)]
    Bookings(BookingCommand),
    /// Manage customer records
    #[command(alias = "c", subcommand)]
    Customers(CustomerCommand),
    /// Manage car reviews
    #[command(alias = "r", subcommand)]
    Reviews(ReviewCommand),
    /// Revenue and fleet reports
    #[command(subcommand)]
    Reports(ReportCommand),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Subcommand)]
pub enum VehicleCommand {
    /// List the fleet
    #[command(alias = "ls")]
    List {
        /// Only cars that can be booked now
        #[arg(long)]
        available: bool,
    },
    /// Show one vehicle with its reviews
    Show { id: String },
    /// Add a vehicle
    Add {
        #[arg(long)]
        make: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        plate: String,
        /// Daily rate
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        image_url: Option<String>,
        /// Add the car as already rented out
        #[arg(long)]
        unavailable: bool,
    },
    /// Change a vehicle
    Update {
        id: String,
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        plate: Option<String>,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        available: Option<bool>,
    },
    /// Remove a vehicle
    #[command(alias = "rm")]
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum BookingCommand {
    /// List bookings (all of them for admins)
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        status: Option<BookingStatus>,
    },
    /// Show one booking
    Show { id: String },
    /// Book a car
    Create {
        #[arg(long)]
        car: String,
        /// YYYY-MM-DD or RFC 3339
        #[arg(long, value_parser = parse_instant)]
        start: DateTime<Utc>,
        /// YYYY-MM-DD or RFC 3339
        #[arg(long, value_parser = parse_instant)]
        end: DateTime<Utc>,
        /// Book on behalf of another customer (admins)
        #[arg(long)]
        customer: Option<String>,
        /// Total price; quoted from the daily rate when omitted
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        status: Option<BookingStatus>,
    },
    /// Change a booking
    Update {
        id: String,
        #[arg(long, value_parser = parse_instant)]
        start: Option<DateTime<Utc>>,
        #[arg(long, value_parser = parse_instant)]
        end: Option<DateTime<Utc>>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        status: Option<BookingStatus>,
    },
    /// Cancel a booking and release its car
    Cancel { id: String },
    /// Close a booking and release its car
    Complete { id: String },
    /// Delete a booking (admins)
    #[command(alias = "rm")]
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum CustomerCommand {
    /// List customers (admins)
    #[command(alias = "ls")]
    List,
    /// Show a customer and their bookings
    Show { id: String },
    /// Change a customer record
    Update {
        id: String,
        #[command(flatten)]
        profile: ProfileArgs,
        /// Grant or revoke admin rights (admins)
        #[arg(long)]
        admin: Option<bool>,
    },
    /// Delete a customer record (admins)
    #[command(alias = "rm")]
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum ReviewCommand {
    /// List reviews, optionally for one car, customer or booking
    #[command(alias = "ls")]
    List {
        #[arg(long, conflicts_with_all = ["customer", "booking"])]
        car: Option<String>,
        #[arg(long, conflicts_with = "booking")]
        customer: Option<String>,
        #[arg(long)]
        booking: Option<String>,
    },
    /// Show one review
    Show { id: String },
    /// Review a car
    Add {
        #[arg(long)]
        car: String,
        #[arg(long)]
        booking: Option<String>,
        /// 1 to 5 stars
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
        rating: i32,
        #[arg(long)]
        comment: Option<String>,
        /// Review on behalf of another customer (admins)
        #[arg(long)]
        customer: Option<String>,
    },
    /// Change a review
    Update {
        id: String,
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
        rating: Option<i32>,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Delete a review
    #[command(alias = "rm")]
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum ReportCommand {
    /// Revenue of bookings starting in a window (defaults to this month)
    Revenue {
        #[arg(long, value_parser = parse_instant)]
        from: Option<DateTime<Utc>>,
        #[arg(long, value_parser = parse_instant)]
        to: Option<DateTime<Utc>>,
    },
    /// Fleet size, utilization and average daily rate
    Utilization,
    /// Bookings per day or month, split by status (defaults to the last 6 months)
    Trends {
        #[arg(long, value_parser = parse_instant)]
        from: Option<DateTime<Utc>>,
        #[arg(long, value_parser = parse_instant)]
        to: Option<DateTime<Utc>>,
        /// Bucket size: day or month
        #[arg(long, default_value = "month")]
        by: TrendPeriod,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw: &str = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc())
            .ok_or_else(|| format!("invalid date: {raw}"));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|_| format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got {raw}"))
}

/// What every command runs against.
pub struct App {
    pub cfg: Config,
    pub repos: Repositories,
    pub auth: AuthService,
}

impl App {
    pub fn connect(cli: &CommandLine) -> anyhow::Result<Self> {
        let mut backend_cfg: BackendConfig =
            BackendConfig::new(cli.url.clone(), cli.anon_key.clone())
                .context("backend is not configured")?;
        if let Some(secs) = cli.timeout {
            backend_cfg = backend_cfg.with_timeout(Duration::from_secs(secs));
        }
        let backend: Arc<RestBackend> = Arc::new(RestBackend::new(&backend_cfg)?);
        let store: FileSessionStore = FileSessionStore::new(
            cli.session_file
                .clone()
                .unwrap_or_else(default_session_path),
        );
        debug!(
            url = backend.base_url(),
            session = %store.path().display(),
            timeout = ?backend_cfg.timeout,
            "backend configured"
        );

        let repos: Repositories = Repositories::from_backend(backend);
        let auth: AuthService = AuthService::new(&repos, Arc::new(store));

        Ok(Self {
            cfg: Config {
                no_banner: cli.no_banner,
                quiet: cli.quiet,
            },
            repos,
            auth,
        })
    }

    /// The signed-in caller, restored from the stored session.
    pub async fn identity(&self) -> anyhow::Result<Identity> {
        let identity: Identity = spinner::run("Restoring session...", self.auth.require()).await?;
        Ok(identity)
    }
}
