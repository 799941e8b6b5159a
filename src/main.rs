use clap::Parser;
use study_plan_form::core::subject_list::SubjectList;
use study_plan_form::core::view::render_text;
use study_plan_form::domain::model::{EntryHandle, DEFAULT_WEIGHT};
use study_plan_form::domain::ports::{ConfigProvider, RawResponse};
use study_plan_form::utils::error::ErrorSeverity;
use study_plan_form::utils::{logger, validation::Validate};
use study_plan_form::{CliConfig, ConsoleNotifier, FileStore, HttpBackend, PlannerPage};
use tokio::io::{AsyncBufReadExt, BufReader};

type Page = PlannerPage<HttpBackend, ConsoleNotifier, FileStore>;

const HELP: &str = "\
Commands:
  list                               show the subject list
  add [after] [name] [weight] [major] add a subject (a leading entry number inserts after it)
  rm <n>                             delete subject n
  name <n> <text>                    rename subject n
  weight <n> <0-100>                 set importance of subject n
  major <n> on|off                   toggle the major flag
  open | close                       show / hide the timetable URL dialog
  url <text>                         type into the URL dialog
  fetch                              load the timetable from the dialog URL
  load                               load the stored timetable
  hours <n>                          set total study hours
  plan                               submit the planning form
  help | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting study-plan-form");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let initial = cli.load_initial_data().unwrap_or_else(|e| {
        tracing::warn!("⚠️ Could not read initial page data: {}", e);
        Default::default()
    });

    let backend = HttpBackend::from_config(&config)?;
    let store = FileStore::new(config.storage_path());
    let mut page = PlannerPage::new(backend, ConsoleNotifier::new(), store)
        .with_total_hours_key(config.total_hours_key());
    page.initialize(&initial);

    println!("{}", render_text(page.subjects()));
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }
        run_command(&mut page, line).await;
    }

    tracing::info!("👋 Session ended");
    Ok(())
}

async fn run_command(page: &mut Page, line: &str) {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match command {
        "help" => println!("{}", HELP),
        "list" => print!("{}", render_text(page.subjects())),
        "add" => {
            let args = parse_add_args(page.subjects(), rest);
            let handle = page.add_subject(args.after, args.name, DEFAULT_WEIGHT, args.major);
            if let Some(weight) = args.weight {
                page.set_subject_weight(handle, weight);
            }
            println!("Added subject {}", handle);
        }
        "rm" => match find_handle(page, rest) {
            Some(handle) => {
                if page.remove_subject(handle) {
                    println!("Removed subject {}", handle);
                }
            }
            None => println!("No subject '{}'", rest),
        },
        "name" => with_entry(page, rest, |page, handle, value| {
            page.set_subject_name(handle, value);
        }),
        "weight" => with_entry(page, rest, |page, handle, value| match value.parse::<i64>() {
            Ok(weight) => {
                page.set_subject_weight(handle, weight);
            }
            Err(_) => println!("Weight must be a number"),
        }),
        "major" => with_entry(page, rest, |page, handle, value| {
            page.set_subject_major(handle, parse_switch(value));
        }),
        "open" => page.open_modal(),
        "close" => page.close_modal(),
        "url" => page.set_modal_url(rest),
        "fetch" => {
            if page.submit_timetable_url().await {
                print!("{}", render_text(page.subjects()));
            }
        }
        "load" => {
            if page.load_stored_timetable().await {
                print!("{}", render_text(page.subjects()));
            }
        }
        "hours" => page.set_total_hours(rest),
        "plan" => match page.submit_plan().await {
            Ok(response) => report_plan(&response),
            Err(e) => {
                tracing::error!(
                    "❌ Plan submission failed: {} (Severity: {:?})",
                    e,
                    e.severity()
                );
                eprintln!("❌ {}", e.user_friendly_message());
                if e.severity() >= ErrorSeverity::Medium {
                    eprintln!("💡 {}", e.recovery_suggestion());
                }
            }
        },
        other => println!("Unknown command '{}'. Type 'help'.", other),
    }
}

fn report_plan(response: &RawResponse) {
    if response.is_success() {
        println!("✅ Plan submitted ({} bytes returned)", response.body.len());
    } else {
        println!("❌ Plan submission returned status {}", response.status);
    }
}

fn with_entry(page: &mut Page, rest: &str, apply: impl FnOnce(&mut Page, EntryHandle, &str)) {
    let (id, value) = rest.split_once(' ').unwrap_or((rest, ""));
    match find_handle(page, id) {
        Some(handle) => apply(page, handle, value.trim()),
        None => println!("No subject '{}'", id),
    }
}

#[derive(Debug, PartialEq, Eq)]
struct AddArgs<'a> {
    after: Option<EntryHandle>,
    name: &'a str,
    weight: Option<i64>,
    major: bool,
}

/// 第一個參數是現有項目編號時才視為插入位置，否則當作科目名稱
fn parse_add_args<'a>(list: &SubjectList, rest: &'a str) -> AddArgs<'a> {
    let mut args = rest.split_whitespace().peekable();
    let after = args.peek().and_then(|first| lookup_handle(list, first));
    if after.is_some() {
        args.next();
    }
    AddArgs {
        after,
        name: args.next().unwrap_or(""),
        weight: args.next().and_then(|w| w.parse::<i64>().ok()),
        major: args.next().is_some_and(parse_switch),
    }
}

fn find_handle(page: &Page, id: &str) -> Option<EntryHandle> {
    lookup_handle(page.subjects(), id)
}

fn lookup_handle(list: &SubjectList, id: &str) -> Option<EntryHandle> {
    let id = id.parse::<u64>().ok()?;
    list.iter()
        .map(|entry| entry.handle)
        .find(|handle| handle.value() == id)
}

fn parse_switch(value: &str) -> bool {
    matches!(value, "on" | "yes" | "true" | "1")
}
