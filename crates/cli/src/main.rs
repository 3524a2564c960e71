mod commands;

use chrono::Utc;
use clap::{Parser, Subcommand};
use commands::{DiaryCommand, ViciousCircleCommand, DIARY_HELP, VICIOUS_CIRCLE_HELP};
use kogito_core::diary::DiaryPersistor;
use kogito_core::memory::{InMemoryBackend, RecordingEventBus};
use kogito_core::ports::Tracker;
use kogito_core::screens::{DiaryScreen, ViciousCircleScreen};
use kogito_core::tracking::TracingTracker;
use kogito_core::{
    CoreConfig, EditorController, EntryId, Persistor, Platform, Section, Sections,
    ViciousCircleEntry,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kogito")]
#[command(about = "Kogito diary and vicious-circle editor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit a vicious circle
    ViciousCircle {
        /// Entry id to open (a new entry when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Preload a sample entry and open it
        #[arg(long)]
        demo: bool,
    },
    /// Edit a diary entry
    Diary {
        /// Entry id to open (a new entry when omitted)
        #[arg(long)]
        id: Option<String>,
    },
}

/// Entry point for the interactive editor.
///
/// # Environment Variables
/// - `KOGITO_PLATFORM`: `ios` or `android` (default: `android`)
/// - `KOGITO_TRACKING_PROJECT`: analytics project tag (default: `kogito`)
/// - `KOGITO_SERIALISE_SAVES`: run exit saves one at a time (default: `true`)
/// - `RUST_LOG`: log filter
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kogito=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = CoreConfig::from_env_values(
        std::env::var("KOGITO_PLATFORM").ok(),
        std::env::var("KOGITO_TRACKING_PROJECT").ok(),
        std::env::var("KOGITO_SERIALISE_SAVES").ok(),
    )?;
    tracing::debug!(?cfg, "configuration resolved");

    let backend = Arc::new(InMemoryBackend::new());
    let tracker: Arc<dyn Tracker> = Arc::new(TracingTracker::new(cfg.tracking_project().clone()));

    match Cli::parse().command {
        Some(Commands::ViciousCircle { id, demo }) => {
            let mut id = id.map(EntryId::new).transpose()?;
            if demo {
                id = Some(insert_demo_entry(&backend)?);
            }
            run_vicious_circle(&cfg, backend, tracker, id).await?;
        }
        Some(Commands::Diary { id }) => {
            let id = id.map(EntryId::new).transpose()?;
            run_diary(&cfg, backend, tracker, id).await?;
        }
        None => {
            println!("Use 'kogito --help' for commands");
        }
    }

    Ok(())
}

fn insert_demo_entry(backend: &InMemoryBackend) -> anyhow::Result<EntryId> {
    let id = EntryId::new("demo")?;
    backend.insert_vicious_circle(ViciousCircleEntry {
        id: id.clone(),
        date: Utc::now(),
        sections: Sections {
            trigger: vec!["loud noise".into()],
            ..Sections::default()
        },
    })?;
    Ok(id)
}

async fn run_vicious_circle(
    cfg: &CoreConfig,
    backend: Arc<InMemoryBackend>,
    tracker: Arc<dyn Tracker>,
    id: Option<EntryId>,
) -> anyhow::Result<()> {
    let persistor = Persistor::new(backend.clone(), tracker.clone(), cfg.serialise_saves());
    let mut screen =
        ViciousCircleScreen::mount(backend.as_ref(), id.as_ref(), persistor, tracker).await;
    screen.on_focus();
    print_circle(screen.controller());
    println!("{VICIOUS_CIRCLE_HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let save = loop {
        let Some(line) = lines.next_line().await? else {
            break screen.on_header_back();
        };
        let command = match line.parse::<ViciousCircleCommand>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        let controller = screen.controller_mut();
        match command {
            ViciousCircleCommand::Add { section, text } => {
                controller.open_add(section);
                controller.commit_item(text);
            }
            ViciousCircleCommand::Edit {
                section,
                index,
                text,
            } => match controller.item(section, index).map(str::to_string) {
                Some(current) => {
                    controller.open_edit(section, index, current);
                    controller.commit_item(text);
                }
                None => eprintln!("{section} has no item {index}"),
            },
            ViciousCircleCommand::Open { section, index } => {
                match controller.item(section, index).map(str::to_string) {
                    Some(current) => controller.open_edit(section, index, current),
                    None => eprintln!("{section} has no item {index}"),
                }
            }
            ViciousCircleCommand::Save { text } => controller.commit_item(text),
            ViciousCircleCommand::Remove => controller.remove_item(),
            ViciousCircleCommand::Close => controller.close_editor(),
            ViciousCircleCommand::Overview { section } => {
                controller.open_overview(section);
                if controller.overview_target().is_none() {
                    println!("{} is empty", section.title());
                }
            }
            ViciousCircleCommand::CloseOverview => controller.close_overview(),
            ViciousCircleCommand::Show => {}
            ViciousCircleCommand::Help => {
                println!("{VICIOUS_CIRCLE_HELP}");
                continue;
            }
            ViciousCircleCommand::Back => break screen.on_hardware_back().save,
            ViciousCircleCommand::Quit => break screen.on_header_back(),
        }
        print_circle(screen.controller());
    };

    wait_for_save(save).await;
    screen.sync_saved_ids();
    match screen.controller().document().id() {
        Some(id) => println!("Saved vicious circle {id}"),
        None => println!("Nothing saved"),
    }
    Ok(())
}

fn print_circle(controller: &EditorController) {
    if let Some(date) = controller.document().heading_date() {
        println!("Bludný kruh · {date}");
    } else {
        println!("Bludný kruh");
    }
    for section in Section::ALL {
        let items = controller.document().section(section);
        println!("  {} ({})", section.title(), items.len());
        for (index, item) in items.iter().enumerate() {
            println!("    [{index}] {item}");
        }
    }
    if let Some(overview) = controller.overview_target() {
        println!("-- overview: {} --", overview.section.title());
        for (index, item) in controller.document().section(overview.section).iter().enumerate() {
            println!("  [{index}] {item}");
        }
    }
    if let Some(target) = controller.edit_target() {
        println!(
            "-- {}: \"{}\" --",
            target.section.prompt(),
            target.init_text()
        );
    }
}

async fn run_diary(
    cfg: &CoreConfig,
    backend: Arc<InMemoryBackend>,
    tracker: Arc<dyn Tracker>,
    id: Option<EntryId>,
) -> anyhow::Result<()> {
    let events = Arc::new(RecordingEventBus::new());
    let persistor = DiaryPersistor::new(
        backend.clone(),
        tracker.clone(),
        events,
        cfg.serialise_saves(),
    );
    let mut screen = DiaryScreen::mount(
        backend.as_ref(),
        id,
        persistor,
        tracker.as_ref(),
        cfg.platform(),
    )
    .await;
    println!("{DIARY_HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let save = loop {
        let Some(line) = lines.next_line().await? else {
            break screen.on_header_back();
        };
        match line.parse::<DiaryCommand>() {
            Ok(DiaryCommand::Write { text }) => screen.set_content(text),
            Ok(DiaryCommand::Append { text }) => {
                let content = match screen.editor().content() {
                    "" => text,
                    existing => format!("{existing}\n{text}"),
                };
                screen.set_content(content);
            }
            Ok(DiaryCommand::Show) => {}
            Ok(DiaryCommand::Help) => println!("{DIARY_HELP}"),
            Ok(DiaryCommand::Back) => {
                // iOS has no hardware back button; leaving goes through navigation.
                break match cfg.platform() {
                    Platform::Ios => screen.on_before_remove(),
                    Platform::Android => screen.on_hardware_back().save,
                };
            }
            Ok(DiaryCommand::Quit) => break screen.on_header_back(),
            Err(e) => eprintln!("{e}"),
        }
        if let Some(date) = screen.editor().heading_date() {
            println!("Deník · {date}");
        }
        println!("{}", screen.editor().content());
    };

    wait_for_save(save).await;
    screen.sync_outcomes();
    match screen.editor().id() {
        Some(id) => println!("Saved diary entry {id}"),
        None => println!("Nothing saved"),
    }
    Ok(())
}

async fn wait_for_save(save: Option<JoinHandle<()>>) {
    if let Some(handle) = save {
        if let Err(e) = handle.await {
            tracing::error!("save task failed: {:?}", e);
        }
    }
}
