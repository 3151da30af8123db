//! CLI walkthrough of the to-do app.
//!
//! Drives the app through a scripted sequence of user intents, redrawing the
//! screen after each one and logging every snapshot the store publishes,
//! then prints the final state as JSON.

use todo::{App, AppConfig, Field, Intent, Screen, TodoId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn render(screen: &Screen<'_>) {
    match screen {
        Screen::List { title, items } => {
            println!("--- {title} ---");
            if items.is_empty() {
                println!("  (empty)");
            }
            for item in *items {
                let status = if item.done { "✓" } else { " " };
                println!("  [{status}] #{} {} - {}", item.id, item.title, item.subtitle);
            }
        },
        Screen::Form {
            title,
            submit_label,
            form,
        } => {
            println!("--- {title} ---");
            println!("  Todo:    {:?}", form.title());
            if let Some(error) = form.error(Field::Title) {
                println!("           ! {error}");
            }
            println!("  Details: {:?}", form.subtitle());
            if let Some(error) = form.error(Field::Subtitle) {
                println!("           ! {error}");
            }
            let enabled = if form.can_submit() { "enabled" } else { "disabled" };
            println!("  [{submit_label}] ({enabled})");
        },
        Screen::Blank => println!("--- (nothing to show) ---"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_filter)?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Todo Walkthrough (id policy: {}) ===\n", config.id_policy);

    let mut app = App::new(&config);
    let mut snapshots = app.store().subscribe();

    let script = [
        Intent::OpenAdd,
        Intent::TitleChanged("Hi".to_string()),
        Intent::Submit,
        Intent::TitleChanged("Buy milk".to_string()),
        Intent::SubtitleChanged("2% milk, 1 gallon".to_string()),
        Intent::Submit,
        Intent::OpenAdd,
        Intent::TitleChanged("Write documentation".to_string()),
        Intent::SubtitleChanged("Cover the store API".to_string()),
        Intent::Submit,
        Intent::ToggleDone(TodoId::new(0)),
        Intent::OpenEdit(TodoId::new(1)),
        Intent::TitleChanged("Write the README".to_string()),
        Intent::Submit,
        Intent::OpenEdit(TodoId::new(42)),
        Intent::Back,
        Intent::Delete(TodoId::new(0)),
    ];

    render(&app.screen());
    for intent in script {
        println!("\n> {intent:?}");
        app.dispatch(intent)?;

        if snapshots.has_changed()? {
            let state = snapshots.borrow_and_update();
            tracing::info!(
                revision = state.revision,
                items = state.count(),
                done = state.done_count(),
                "Store changed"
            );
        }
        render(&app.screen());
    }

    println!("\nFinal state:");
    println!("{}", serde_json::to_string_pretty(app.store().state())?);

    println!("\n=== Walkthrough Complete ===");
    Ok(())
}
