//! # guest-client
//!
//! Command line front end for reporters.
//!
//! ```text
//! guest-client login -u guest        # password read from stdin
//! guest-client assignments --status offered
//! guest-client accept <assignment id>
//! guest-client progress <report id>
//! guest-client answer <report id> --set 12=yes --set 13=4
//! guest-client submit <report id>
//! guest-client reorder <section id> 31 30 32   # staff
//! ```

use std::io::{self, BufRead};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use guest_client::checklist::{parse_rating_meta, progress, reorder, AnswerKind, DraftAnswers};
use guest_client::config::ClientConfig;
use guest_client::core::error::{ApiError, AppError};
use guest_client::core::service::TokenStore;
use guest_client::debug::{init_logger, DebugConfig};
use guest_client::services::api::{self, ActionOutcome, ApiClient};
use guest_client::services::mutation_queue::QueueConfig;
use guest_client::services::session::{FileTokenStore, MemoryTokenStore, Session};
use guest_client::services::{DraftAutosaver, MutationQueue};
use shared::{format_price, Assignment, AssignmentState, ChecklistItem, ChecklistSchema, Page, Report};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "guest-client")]
#[command(about = "Secret Guest reporter client")]
#[command(version)]
struct Cli {
    /// Backend base URL (overrides SG_API_URL)
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Mirror logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        username: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Assignments offered to or accepted by you
    Assignments {
        /// offered, accepted, cancelled, declined or expired
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Open assignments anyone may take
    Available {
        #[arg(long)]
        listing_type: Option<i64>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Accept an offered assignment
    Accept { id: String },
    /// Decline an offered assignment
    Decline { id: String },
    /// Take an open assignment
    Take { id: String },
    /// Your reports
    Reports {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Checklist completion of a report draft
    Progress { id: String },
    /// Answer checklist items of a report draft
    ///
    /// Without --set, reads one ITEM=VALUE per line from stdin and saves
    /// after each pause in typing.
    Answer {
        id: String,
        /// yes/no (no: remark), a rating or text
        #[arg(long = "set", value_name = "ITEM=VALUE")]
        set: Vec<String>,
    },
    /// Submit a report draft for review
    Submit {
        id: String,
        /// Submit even when items are unanswered
        #[arg(long)]
        force: bool,
    },
    /// Reorder the items of a checklist section
    Reorder {
        section_id: i64,
        /// Item ids in the new order; unlisted items keep their relative order after them
        #[arg(required = true)]
        items: Vec<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut debug_config = DebugConfig::from_env().unwrap_or_default();
    debug_config.log_to_stderr |= cli.verbose;
    let _log_guard = init_logger(&debug_config);

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    config.validate()?;

    let store: Arc<dyn TokenStore> = match &config.token_file {
        Some(path) => Arc::new(FileTokenStore::new(path)),
        None => Arc::new(MemoryTokenStore::default()),
    };
    let session = Arc::new(Session::load(store).context("failed to restore session")?);
    let client = ApiClient::new(&config, session)?;

    match run(&client, &config, cli.command).await {
        Ok(()) => Ok(()),
        Err(AppError::Api(err)) => {
            tracing::debug!(error = %err, "Command failed");
            bail!("{}", err.user_message())
        }
        Err(err) => Err(err.into()),
    }
}

async fn run(client: &ApiClient, config: &ClientConfig, command: Command) -> Result<(), AppError> {
    match command {
        Command::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password()?,
            };
            api::auth::login(client, &username, &password).await?;
            println!("Вы вошли как {username}");
        }
        Command::Logout => {
            api::auth::logout(client);
            println!("Сессия завершена");
        }
        Command::Whoami => {
            require_session(client)?;
            let me = api::auth::validate(client).await?;
            let role = client
                .session()
                .role()
                .map_or("неизвестна", |role| role.display_name());
            println!("{} ({}), роль: {role}", me.username, me.user_id);
        }
        Command::Assignments { status, page, limit } => {
            require_session(client)?;
            let status = status
                .map(|slug| {
                    AssignmentState::from_slug(&slug)
                        .ok_or_else(|| AppError::Validation(format!("unknown assignment status: {slug}")))
                })
                .transpose()?;
            let response = api::assignments::my_assignments(client, Page::new(page, limit), status).await?;
            print_assignments(&response.assignments, response.total);
        }
        Command::Available {
            listing_type,
            page,
            limit,
        } => {
            require_session(client)?;
            let response = api::assignments::available(client, Page::new(page, limit), listing_type).await?;
            print_assignments(&response.assignments, response.total);
        }
        Command::Accept { id } => {
            require_session(client)?;
            match api::assignments::accept(client, &id).await? {
                ActionOutcome::Done(_) => println!("Задание принято"),
                ActionOutcome::AlreadyHandled => println!("Задание уже было принято или отклонено"),
            }
        }
        Command::Decline { id } => {
            require_session(client)?;
            api::assignments::decline(client, &id).await?;
            println!("Задание отклонено");
        }
        Command::Take { id } => {
            require_session(client)?;
            match api::assignments::take(client, &id).await? {
                ActionOutcome::Done(_) => println!("Задание взято"),
                ActionOutcome::AlreadyHandled => println!("Задание уже взято другим участником"),
            }
        }
        Command::Reports { page, limit } => {
            require_session(client)?;
            let response = api::reports::my_reports(client, Page::new(page, limit)).await?;
            if response.reports.is_empty() {
                println!("Отчетов нет");
            }
            for report in &response.reports {
                print_report_line(report);
            }
        }
        Command::Progress { id } => {
            require_session(client)?;
            let report = api::reports::my_report(client, &id).await?;
            print_progress(&report);
        }
        Command::Answer { id, set } => {
            require_session(client)?;
            let report = api::reports::my_report(client, &id).await?;
            if !report.state().is_some_and(|state| state.is_editable()) {
                return Err(AppError::State(format!("report is {}, not a draft", report.status.slug)));
            }
            let Some(schema) = report.generated_schema().cloned() else {
                return Err(AppError::State("checklist is still being generated".to_string()));
            };

            let autosaver = DraftAutosaver::new(Arc::new(client.clone()), &id, config.autosave_delay)?;
            let edited = edit_answers(&autosaver, &schema, &set).await;
            let saved = autosaver.flush().await;
            autosaver.close().await;
            edited?;
            match saved? {
                Some(report) => print_progress(&report),
                None => println!("Изменений нет"),
            }
        }
        Command::Submit { id, force } => {
            require_session(client)?;
            let report = api::reports::my_report(client, &id).await?;
            if !report.state().is_some_and(|state| state.is_editable()) {
                return Err(AppError::State(format!("report is {}, not a draft", report.status.slug)));
            }
            let percent = report.generated_schema().map_or(0, progress::completion_percent);
            if percent < 100 && !force {
                print_progress(&report);
                return Err(AppError::Validation(
                    "checklist is incomplete, pass --force to submit anyway".to_string(),
                ));
            }
            let submitted = api::reports::submit(client, &id).await?;
            let message = submitted.and_then(|r| r.message);
            println!("{}", message.as_deref().unwrap_or("Отчет отправлен на проверку"));
        }
        Command::Reorder { section_id, items } => {
            require_session(client)?;
            let mut original: Vec<ChecklistItem> = api::checklist::list_items(client)
                .await?
                .into_iter()
                .filter(|item| item.section.id == section_id)
                .collect();
            reorder::sort(&mut original);
            let updated = reorder::arrange(&original, &items).ok_or_else(|| {
                AppError::Validation(format!("not every item belongs to section {section_id}"))
            })?;

            let queue = MutationQueue::new(Arc::new(client.clone()), QueueConfig::from(config));
            queue.add_reorder(section_id, &updated, Some(original.as_slice()));
            queue.wait_idle().await;
            let stats = queue.statistics();
            queue.shutdown().await;
            if stats.success_rate < 1.0 && stats.total_processed > 0 {
                return Err(AppError::State("item order was not saved".to_string()));
            }
            for item in &updated {
                println!("{}. {}", item.sort_order, item.title);
            }
        }
    }
    Ok(())
}

/// Feed `set`, or stdin lines when it is empty, to the autosaver.
async fn edit_answers(autosaver: &DraftAutosaver, schema: &ChecklistSchema, set: &[String]) -> Result<(), AppError> {
    let mut answers = DraftAnswers::restore(schema);
    if !set.is_empty() {
        for entry in set {
            answer_item(&mut answers, schema, entry)?;
            autosaver.edit(answers.apply(schema))?;
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match answer_item(&mut answers, schema, &line) {
            Ok(()) => autosaver.edit(answers.apply(schema))?,
            Err(err) => eprintln!("{err}"),
        }
    }
    Ok(())
}

fn answer_item(answers: &mut DraftAnswers, schema: &ChecklistSchema, entry: &str) -> Result<(), AppError> {
    let (item_id, value) = entry
        .split_once('=')
        .and_then(|(id, value)| Some((id.trim().parse::<i64>().ok()?, value)))
        .ok_or_else(|| AppError::Validation(format!("expected ITEM=VALUE, got {entry:?}")))?;
    let item = schema
        .items()
        .find(|item| item.id == item_id)
        .ok_or_else(|| AppError::Validation(format!("no checklist item {item_id}")))?;
    answers
        .set_input(item, value)
        .map_err(|err| AppError::Validation(format!("{}: {err}", item.title)))
}

fn require_session(client: &ApiClient) -> Result<(), AppError> {
    if client.session().is_authenticated() || client.session().refresh_token().is_some() {
        Ok(())
    } else {
        Err(AppError::Api(ApiError::AuthRequired))
    }
}

fn read_password() -> Result<String, AppError> {
    eprint!("Пароль: ");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_assignments(assignments: &[Assignment], total: u64) {
    if assignments.is_empty() {
        println!("Заданий нет");
        return;
    }
    let now = lib_utils::now_utc();
    for a in assignments {
        let state = a.state().map_or(a.status.name.as_str(), |s| s.label());
        let dates = match (a.checkin(), a.checkout()) {
            (Some(checkin), Some(checkout)) => format!("{checkin} - {checkout}"),
            _ => "даты не указаны".to_string(),
        };
        let price = a
            .pricing
            .as_ref()
            .map(|p| format_price(p.total, &p.currency))
            .unwrap_or_default();
        let expired = if a.is_offer_expired(now) { " (истекло)" } else { "" };
        println!("{}  {}  [{state}{expired}]  {dates}  {price}", a.id, a.listing.title);
    }
    println!("Всего: {total}");
}

fn print_report_line(report: &Report) {
    let state = report.state().map_or(report.status.name.as_str(), |s| s.label());
    let percent = report.generated_schema().map(progress::completion_percent);
    match percent {
        Some(percent) => println!("{}  {}  [{state}]  {percent}%", report.id, report.listing.title),
        None => println!("{}  {}  [{state}]", report.id, report.listing.title),
    }
}

fn print_progress(report: &Report) {
    let Some(schema) = report.generated_schema() else {
        println!("Чек-лист еще генерируется");
        return;
    };
    let (done, total) = progress::counts(schema);
    println!("Заполнено {}% ({done} из {total})", progress::completion_percent(schema));
    for section in &schema.sections {
        println!("  {}: {}%", section.title, progress::section_percent(section));
    }
    let missing = progress::incomplete_items(schema);
    if !missing.is_empty() {
        println!("Не заполнено:");
        for item in missing {
            if AnswerKind::from_slug(&item.answer_types.slug) == AnswerKind::Rating {
                let scale = parse_rating_meta(item.answer_types.meta.as_ref());
                println!("  - {} (оценка {}-{})", item.title, scale.min, scale.max);
            } else {
                println!("  - {}", item.title);
            }
        }
    }
}
