mod error;
mod explore;
mod paths;

use std::fs;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use attendance_lib::AttendanceClient;
use attendance_lib::BASE_URL_ENV;
use attendance_lib::ClientConfig;
use attendance_lib::DEFAULT_BASE_URL;
use attendance_lib::api::DateRange;
use attendance_lib::explorer::Explorer;
use attendance_lib::model::Value;
use attendance_lib::normalize;
use attendance_lib::views;
use attendance_lib::views::Shape;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::error::CliError;
use crate::explore::ExploreArgs;
use crate::explore::ExportName;

#[derive(Parser)]
#[command(name = "attendance")]
#[command(about = "Search, sort, page and export attendance records", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend base URL
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<u64>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search attendance records for a date range
    Attendance {
        #[command(flatten)]
        range: RangeArgs,

        /// Only this employee
        #[arg(long)]
        empcode: Option<String>,

        /// Pull from the device feed and store before listing
        #[arg(long)]
        save: bool,

        #[command(flatten)]
        explore: ExploreArgs,
    },

    /// MCID punch data
    Mcid {
        #[command(subcommand)]
        command: McidCommand,
    },

    /// Stored punch-data files
    Files {
        #[command(subcommand)]
        command: FilesCommand,
    },

    /// Explore a JSON payload saved on disk
    View {
        /// JSON file: an array of records or a response envelope
        file: PathBuf,

        /// Record shape of the payload
        #[arg(long, value_enum, default_value_t = ViewShape::Generic)]
        shape: ViewShape,

        #[command(flatten)]
        explore: ExploreArgs,
    },
}

#[derive(Subcommand)]
enum McidCommand {
    /// Fetch punches for a date range and save them
    Fetch {
        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        explore: ExploreArgs,
    },

    /// Compute per-employee operational summaries
    Process {
        #[command(flatten)]
        range: RangeArgs,

        /// Only this employee
        #[arg(long)]
        empcode: Option<String>,

        #[command(flatten)]
        explore: ExploreArgs,
    },
}

#[derive(Subcommand)]
enum FilesCommand {
    /// List stored files
    List {
        /// Maximum number of files
        #[arg(long)]
        limit: Option<u64>,

        /// Number of files to skip
        #[arg(long)]
        offset: Option<u64>,

        #[command(flatten)]
        explore: ExploreArgs,
    },

    /// Process a stored file
    Process {
        /// File ID
        id: u64,
    },
}

#[derive(Args, Debug, Clone)]
struct RangeArgs {
    /// First day, DD/MM/YYYY (default: today)
    #[arg(long, value_name = "DD/MM/YYYY")]
    from: Option<String>,

    /// Last day, DD/MM/YYYY (default: today)
    #[arg(long, value_name = "DD/MM/YYYY")]
    to: Option<String>,
}

impl RangeArgs {
    fn range(&self) -> Result<DateRange, CliError> {
        match (&self.from, &self.to) {
            (None, None) => Ok(DateRange::today()),
            (from, to) => Ok(DateRange::parse(
                from.as_deref().unwrap_or_default(),
                to.as_deref().unwrap_or_default(),
            )?),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ViewShape {
    Attendance,
    Mcid,
    Operational,
    Files,
    Generic,
}

impl ViewShape {
    fn shape(self) -> Option<Shape> {
        match self {
            ViewShape::Attendance => Some(Shape::Attendance),
            ViewShape::Mcid => Some(Shape::McidPunches),
            ViewShape::Operational => Some(Shape::Operational),
            ViewShape::Files => Some(Shape::Files),
            ViewShape::Generic => None,
        }
    }
}

fn init_logging(verbose: bool) {
    let Some(log_path) = paths::log_file() else { return };
    if let Some(dir) = log_path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    paths::rotate_logs();

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Ok(file) = File::create(&log_path) {
        let _ = WriteLogger::init(level, Config::default(), file);
    }
}

fn client(cli: &Cli) -> Result<AttendanceClient, CliError> {
    let config = ClientConfig {
        base_url: cli.base_url.clone(),
        timeout: cli.timeout.map(Duration::from_secs),
        connect_timeout: None,
    };
    Ok(AttendanceClient::new(config)?)
}

fn export_name<'a>(prefix: &'a str, range: &DateRange) -> ExportName<'a> {
    ExportName {
        prefix,
        from: Some(range.from_param()),
        to: Some(range.to_param()),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut out = io::stdout().lock();

    match &cli.command {
        Commands::Attendance {
            range,
            empcode,
            save,
            explore,
        } => {
            let range = range.range()?;
            let client = client(&cli)?;
            let rows = if *save {
                client.attendance().fetch_and_save(&range).await?
            } else {
                client
                    .attendance()
                    .load(&range, empcode.as_deref().unwrap_or_default())
                    .await?
            };
            let explorer = Explorer::with_rows(views::attendance(), rows);
            explore::explore(&mut out, explorer, explore, &export_name("attendance", &range))
        }

        Commands::Mcid { command } => match command {
            McidCommand::Fetch { range, explore } => {
                let range = range.range()?;
                let fetch = client(&cli)?.mcid_data().fetch(&range).await?;
                let stats = fetch.stats;
                writeln!(
                    out,
                    "Saved: {}  Already stored: {}  Duplicates in batch: {}  Fetched: {}  Employees: {}",
                    stats.saved_count,
                    stats.already_similar_count,
                    stats.duplicate_in_batch_count,
                    stats.punches(),
                    stats.employees()
                )?;
                let explorer = Explorer::with_rows(views::mcid_for(&fetch.rows), fetch.rows);
                explore::explore(&mut out, explorer, explore, &export_name("mcid_data", &range))
            }
            McidCommand::Process {
                range,
                empcode,
                explore,
            } => {
                let range = range.range()?;
                let client = client(&cli)?;
                let mut request = client.mcid_data().process(&range);
                if let Some(empcode) = empcode {
                    request = request.empcode(empcode.as_str());
                }
                let process = request.await?;
                writeln!(
                    out,
                    "Employees: {}  Punches: {}",
                    process.total_employees, process.total_punches
                )?;
                let explorer = Explorer::with_rows(views::mcid_for(&process.rows), process.rows);
                explore::explore(&mut out, explorer, explore, &export_name("mcid_data", &range))
            }
        },

        Commands::Files { command } => match command {
            FilesCommand::List {
                limit,
                offset,
                explore,
            } => {
                let client = client(&cli)?;
                let mut request = client.files().list();
                if let Some(limit) = limit {
                    request = request.limit(*limit);
                }
                if let Some(offset) = offset {
                    request = request.offset(*offset);
                }
                let list = request.await?;
                let name = ExportName {
                    prefix: "stored_files",
                    from: None,
                    to: None,
                };
                explore::explore(&mut out, Explorer::with_rows(views::files(), list.files), explore, &name)
            }
            FilesCommand::Process { id } => {
                let body = client(&cli)?.files().process(*id).await?;
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("File processed successfully!");
                writeln!(out, "{}", message)?;
                Ok(())
            }
        },

        Commands::View {
            file,
            shape,
            explore,
        } => {
            let payload: serde_json::Value = serde_json::from_str(&fs::read_to_string(file)?)?;
            let (config, rows, prefix) = match shape.shape() {
                Some(shape) => {
                    let rows = normalize::rows_with(payload, shape.normalizer());
                    (shape.config(), rows, shape.name())
                }
                None => {
                    let rows = normalize::collection(payload);
                    (views::generic(&rows), rows, "export")
                }
            };
            log::info!("loaded {} rows from {}", rows.len(), file.display());
            let name = ExportName {
                prefix,
                from: None,
                to: None,
            };
            explore::explore(&mut out, Explorer::with_rows(config, rows), explore, &name)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
