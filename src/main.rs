use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use fieldops_daemon::composition::{compose_form_document, DocumentArtifact, MarkdownComposer};
use fieldops_daemon::config::load_store_config;
use fieldops_daemon::logging::{init_logging, parse_rotation, LogConfig, LOG_FILENAME};
use fieldops_daemon::model::{CreateTicketOptions, Identity, Priority, Role, WorkOrderStatus};
use fieldops_daemon::store::Store;
use fieldops_daemon::utils::fieldops_home;
use fieldops_daemon::views::ReportFilter;
use fieldops_daemon::workflow::{ConvertTicketOptions, TicketWorkflow};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Fieldops - field-service tickets, work orders and forms
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data directory (overrides the config file)
    #[arg(long, env = "FIELDOPS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Config file (default: ~/.fieldops/config.toml)
    #[arg(long, env = "FIELDOPS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable JSON log format
    #[arg(long, env = "FIELDOPS_LOG_JSON", default_value = "false")]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "FIELDOPS_LOG_ROTATION", default_value = "daily")]
    log_rotation: String,

    /// Custom log directory (default: ~/.fieldops/logs)
    #[arg(long, env = "FIELDOPS_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the data directory and seed the form templates
    Init,
    /// Aggregate work orders for reporting
    Report {
        /// First creation date included (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Last creation date included (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    #[command(subcommand)]
    Ticket(TicketCommand),
    /// Work orders visible to a user
    Orders {
        #[arg(long)]
        user: String,
        /// admin, supervisor, tecnician or client
        #[arg(long)]
        role: String,
    },
    /// A user's notifications, newest first
    Notifications {
        #[arg(long)]
        user: String,
    },
    /// Render a completed form as Markdown
    Compose {
        form_id: String,
        #[arg(long)]
        technician: String,
        #[arg(long)]
        client: String,
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum TicketCommand {
    /// Open a support ticket
    Create {
        #[arg(long)]
        client_name: String,
        #[arg(long)]
        client_email: String,
        #[arg(long, default_value = "")]
        client_phone: String,
        #[arg(long)]
        client_company: Option<String>,
        #[arg(long)]
        subject: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "general")]
        category: String,
        #[arg(long, default_value = "medium")]
        priority: String,
    },
    /// Assign a ticket to a technician
    Assign {
        ticket_id: String,
        #[arg(long)]
        technician: String,
    },
    /// Convert a ticket into a scheduled work order
    Convert {
        ticket_id: String,
        #[arg(long = "technician", required = true)]
        technicians: Vec<String>,
        /// Scheduled date (YYYY-MM-DD)
        #[arg(long)]
        scheduled: String,
        #[arg(long)]
        notes: Option<String>,
    },
}

/// Parse a lowercase wire tag ("high", "in_progress") into a model enum.
fn parse_tag<T: DeserializeOwned>(tag: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(tag.to_lowercase()))
        .map_err(|_| eyre!("Unknown value '{tag}'"))
}

fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .wrap_err_with(|| format!("Invalid date '{s}', expected YYYY-MM-DD"))?;
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| eyre!("Invalid date '{s}'"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_ticket(workflow: &TicketWorkflow, command: TicketCommand) -> Result<()> {
    match command {
        TicketCommand::Create {
            client_name,
            client_email,
            client_phone,
            client_company,
            subject,
            description,
            category,
            priority,
        } => {
            let result = workflow
                .create_ticket(CreateTicketOptions {
                    client_name,
                    client_email,
                    client_phone,
                    client_company,
                    subject,
                    description,
                    category,
                    priority: parse_tag::<Priority>(&priority)?,
                })
                .await?;
            print_json(&result.ticket)
        }
        TicketCommand::Assign {
            ticket_id,
            technician,
        } => {
            let result = workflow.assign_to_technician(&ticket_id, &technician).await?;
            print_json(&result.ticket)
        }
        TicketCommand::Convert {
            ticket_id,
            technicians,
            scheduled,
            notes,
        } => {
            let result = workflow
                .convert_to_work_order(
                    &ticket_id,
                    ConvertTicketOptions {
                        technician_ids: technicians,
                        scheduled_date: parse_date(&scheduled)?,
                        notes,
                        supervisor_id: None,
                    },
                )
                .await?;
            print_json(&result.work_order)
        }
    }
}

async fn run(workflow: &TicketWorkflow, command: Command) -> Result<()> {
    let store = workflow.store();
    match command {
        Command::Init => {
            let templates = store.list_templates().await;
            info!("Initialized {}", store.data_dir().display());
            println!(
                "Data directory {} ready with {} templates",
                store.data_dir().display(),
                templates.len()
            );
            Ok(())
        }
        Command::Report { from, to, status } => {
            let filter = ReportFilter {
                from: from.as_deref().map(parse_date).transpose()?,
                to: to.as_deref().map(parse_date).transpose()?,
                status: status
                    .as_deref()
                    .map(parse_tag::<WorkOrderStatus>)
                    .transpose()?,
            };
            print_json(&store.operations_report(&filter).await)
        }
        Command::Ticket(command) => run_ticket(workflow, command).await,
        Command::Orders { user, role } => {
            let identity = Identity::new(user, Role::from_tag(&role));
            print_json(&store.work_orders_for(&identity).await)
        }
        Command::Notifications { user } => print_json(&store.notifications_for(&user).await),
        Command::Compose {
            form_id,
            technician,
            client,
            out,
        } => {
            let composer = MarkdownComposer::new()?;
            let artifact =
                compose_form_document(store, &composer, &form_id, &technician, &client).await?;
            match (artifact, out) {
                (DocumentArtifact::Bytes(bytes), Some(path)) => {
                    tokio::fs::write(&path, bytes).await?;
                    println!("Wrote {}", path.display());
                }
                (DocumentArtifact::Bytes(bytes), None) => {
                    println!("{}", String::from_utf8_lossy(&bytes));
                }
                (DocumentArtifact::Uri(uri), _) => println!("{uri}"),
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let log_dir = args
        .log_dir
        .clone()
        .unwrap_or_else(|| fieldops_home().join("logs"));
    let log_file = log_dir.join(LOG_FILENAME);
    let log_config = LogConfig {
        log_dir,
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        ..Default::default()
    };
    if let Err(e) = init_logging(log_config) {
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!("Logs: {}", log_file.display());
        return Err(e);
    }

    let mut config = load_store_config(args.config.as_deref())?;
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    let store = Arc::new(Store::open(config.to_store_options().await?).await?);
    let workflow = TicketWorkflow::new(Arc::clone(&store), config.workflow_settings());

    let result = run(&workflow, args.command).await;
    store.flush().await?;
    result
}
