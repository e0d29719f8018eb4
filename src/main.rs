use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_appender::rolling;

use leave_desk::state::pagination::PAGE_SIZE_OPTIONS;
use leave_desk::state::{
    LeaveRequestFilter, LeaveRequestForm, LeaveRequestList, LeaveRow, ListQuery, PaginationModel,
};
use leave_desk::utils::formatters::parse_instant;
use leave_desk::{ApiClient, Config};

#[derive(Parser)]
#[command(name = "leave-desk", version, about = "Manage employee leave requests")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List leave requests, one page at a time
    List(ListArgs),
    /// Submit a new leave request
    Create(FormArgs),
    /// Replace an existing leave request; every field must be given again
    /// since the current values are not fetched first
    Update {
        id: u64,
        #[command(flatten)]
        form: FormArgs,
    },
    Delete {
        id: u64,
    },
    /// Show the available leave types
    Types,
    /// Show the users leave can be assigned to
    Users,
}

#[derive(Args)]
struct ListArgs {
    /// assigned user id
    #[arg(long)]
    user: Option<u64>,
    #[arg(long, value_parser = parse_instant)]
    start: Option<DateTime<Utc>>,
    #[arg(long, value_parser = parse_instant)]
    end: Option<DateTime<Utc>>,
    /// search by reason
    #[arg(long, default_value = "")]
    search: String,
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long)]
    page_size: Option<u32>,
}

#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    leave_type: Option<u64>,
    #[arg(long)]
    user: Option<u64>,
    #[arg(long, value_parser = parse_instant)]
    start: Option<DateTime<Utc>>,
    #[arg(long, value_parser = parse_instant)]
    end: Option<DateTime<Utc>>,
    #[arg(long, default_value = "")]
    reason: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    log::debug!(
        "Configuration loaded: api_base_url={}, page_size={}, log_dir={}",
        config.api_base_url,
        config.page_size,
        config.log_dir
    );

    let client = ApiClient::from_config(&config)
        .with_context(|| format!("cannot build client for {}", config.api_base_url))?;
    info!(api = %client.base_url(), "leave-desk starting");

    match cli.command {
        Command::List(args) => list(&client, &config, args).await,
        Command::Create(args) => {
            let mut form = fill_form(LeaveRequestForm::new(), &args);
            let payload = submission(&mut form)?;
            let created = client.create_leave_request(&payload).await?;
            println!("Your request was submitted (#{})", created.id);
            Ok(())
        }
        Command::Update { id, form: args } => {
            let mut form = fill_form(LeaveRequestForm::new(), &args);
            let payload = submission(&mut form)?;
            let updated = client.update_leave_request(id, &payload).await?;
            print_rows(&[LeaveRow::from(&updated)]);
            Ok(())
        }
        Command::Delete { id } => {
            client.delete_leave_request(id).await?;
            println!("Leave request #{id} deleted");
            Ok(())
        }
        Command::Types => {
            for leave_type in client.fetch_leave_types().await? {
                println!("{:>4}  {}", leave_type.id, leave_type.name);
            }
            Ok(())
        }
        Command::Users => {
            for user in client.fetch_users().await? {
                println!("{:>4}  {}", user.id, user.full_name());
            }
            Ok(())
        }
    }
}

async fn list(client: &ApiClient, config: &Config, args: ListArgs) -> Result<()> {
    let page_size = args.page_size.unwrap_or(config.page_size);
    if !PAGE_SIZE_OPTIONS.contains(&page_size) {
        warn!(page_size, "page size is not one of the grid options");
    }
    let pagination =
        PaginationModel::with_page_size(page_size).change(args.page.saturating_sub(1), page_size);

    let filter = LeaveRequestFilter {
        start_date: args.start,
        end_date: args.end,
        user: args.user,
        search_query: args.search,
    };
    let query = ListQuery::build(&filter, &pagination);

    let mut list = LeaveRequestList::default();
    list.begin_load();
    match client.fetch_leave_requests(&query).await {
        Ok(page) => list.finish_load(page),
        Err(e) => {
            list.fail_load();
            return Err(e).context("Error fetching leave requests");
        }
    }

    print_rows(&list.view());
    println!(
        "page {} · {} of {} request(s)",
        pagination.page + 1,
        list.rows.len(),
        list.total
    );
    Ok(())
}

fn fill_form(mut form: LeaveRequestForm, args: &FormArgs) -> LeaveRequestForm {
    if let Some(leave_type) = args.leave_type {
        form.set_leave_type(leave_type);
    }
    if let Some(user) = args.user {
        form.set_user(user);
    }
    if let Some(start) = args.start {
        form.set_start_date(start);
    }
    if let Some(end) = args.end {
        form.set_end_date(end);
    }
    form.set_reason(args.reason.as_str());
    form
}

fn submission(form: &mut LeaveRequestForm) -> Result<leave_desk::Mapping> {
    match form.submission() {
        Ok(payload) => {
            println!("Number of days: {}", form.days);
            Ok(payload)
        }
        Err(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("{field}: {message}");
            }
            bail!("leave request was not submitted")
        }
    }
}

fn print_rows(rows: &[LeaveRow]) {
    println!(
        "{:<6} {:<30} {:>6}  {:<17} {:<17} {:<14} {}",
        "ID", "User", "Days", "Start Date", "End Date", "Leave Type", "Reason"
    );
    for row in rows {
        println!(
            "{:<6} {:<30} {:>6}  {:<17} {:<17} {:<14} {}",
            row.id, row.user, row.days, row.start_date, row.end_date, row.leave_type, row.reason
        );
    }
}
