use anyhow::Context;
use clap::Parser;
use place_picker::core::view::ERROR_TITLE;
use place_picker::utils::{logger, validation::Validate};
use place_picker::{
    CliConfig, Command, ConfigProvider, HttpPlaceStore, ListPanel, PickerError, PickerView, Place,
    PlaceCatalog, PlacePicker, TomlConfig,
};
use std::io::{self, Write};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let verbose = cli.verbose || file_config.as_ref().is_some_and(|c| c.verbose());
    if cli.json_logs || file_config.as_ref().is_some_and(|c| c.json_logs()) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting place-picker");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let validated = match &file_config {
        Some(config) => config.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validated {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let provider: &dyn ConfigProvider = match &file_config {
        Some(config) => config,
        None => &cli,
    };
    let store = match HttpPlaceStore::from_config(provider) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ {}", e.user_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("selection endpoint: {}", store.selected_url());

    let picker = PlacePicker::new(store);

    if let Err(e) = run(&picker, &cli.command).await {
        tracing::error!("❌ {:#}", e);
        eprintln!("❌ {:#}", e);

        let exit_code = match e.downcast_ref::<PickerError>() {
            Some(err) => {
                eprintln!("💡 {}", err.recovery_suggestion());
                if err.is_remote() {
                    2
                } else {
                    1
                }
            }
            None => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn run(picker: &PlacePicker<HttpPlaceStore>, command: &Command) -> anyhow::Result<()> {
    if let Err(e) = picker.load().await {
        render(&picker.view());
        return Err(e).context("could not load the selected places");
    }

    match command {
        Command::List => render(&picker.view()),
        Command::Catalog => {
            let available = picker
                .store()
                .fetch_available()
                .await
                .context("could not load the catalog")?;
            let selected = picker.selected();
            println!("Available places");
            for place in &available {
                let marker = if selected.contains(&place.id) { "*" } else { " " };
                println!(" {} {} [{}]", marker, place.name, place.id);
            }
        }
        Command::Select { id } => {
            let available = picker
                .store()
                .fetch_available()
                .await
                .context("could not load the catalog")?;
            let place = available
                .into_iter()
                .find(|p| &p.id == id)
                .ok_or_else(|| PickerError::PlaceNotFound { id: id.clone() })?;

            let outcome = picker.select(place).await;
            show_and_dismiss(picker);
            outcome.context("the selection was rolled back")?;
        }
        Command::Remove { id, yes } => {
            picker.request_removal_by_id(id)?;
            let target = picker.view().pending_removal;

            let confirmed = match (&target, *yes) {
                (_, true) => true,
                (Some(place), false) => ask_confirmation(place)?,
                (None, false) => false,
            };

            if !confirmed {
                picker.cancel_removal();
                println!("Removal cancelled");
                render(&picker.view());
                return Ok(());
            }

            if let Some(pending) = picker.confirm_removal() {
                let outcome = pending.await;
                show_and_dismiss(picker);
                outcome.context("the removal was rolled back")?;
            }
        }
    }

    Ok(())
}

/// Prints the view, then clears the overlay the way a user acknowledging it would.
fn show_and_dismiss(picker: &PlacePicker<HttpPlaceStore>) {
    render(&picker.view());
    if let Some(error) = picker.dismiss_mutation_error() {
        tracing::debug!(kind = ?error.kind, "mutation error dismissed");
    }
}

fn render(view: &PickerView) {
    match view.list_panel() {
        ListPanel::Failed(error) => println!("❌ {}: {}", ERROR_TITLE, error.message),
        ListPanel::Loading(text) | ListPanel::Empty(text) => println!("{}", text),
        ListPanel::Places(places) => {
            println!("I'd like to visit ...");
            for (position, place) in places.iter().enumerate() {
                println!("  {}. {} [{}]", position + 1, place.name, place.id);
            }
        }
    }

    if let Some(error) = view.error_overlay() {
        eprintln!("❌ {}: {}", ERROR_TITLE, error.message);
    }
}

fn ask_confirmation(place: &Place) -> io::Result<bool> {
    println!("Are you sure?");
    print!("Do you really want to remove {}? [y/N] ", place.name);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
