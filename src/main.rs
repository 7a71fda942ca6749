//! Catalog Client - command-line front end for a book catalog service

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_client::{
    cli::{Cli, Command},
    config::AppConfig,
    models::{Book, ManualBook, NewBookByIsbn, Notification},
    services::{catalog::LocalSearch, Mutation, RefreshOutcome},
    view_model::ListView,
    AppError, CatalogClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("catalog_client={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting Catalog Client v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Catalog service at {}", config.api.base_url);

    let client = CatalogClient::new(config)?;

    if let Err(e) = run(&client, cli.command).await {
        println!("{}", Notification::from(&e));
        std::process::exit(1);
    }

    Ok(())
}

async fn run(client: &CatalogClient, command: Command) -> Result<(), AppError> {
    let catalog = &client.services.catalog;
    let loans = &client.services.loans;

    match command {
        Command::List {
            filter,
            page,
            page_size,
            json,
        } => {
            if let Some(size) = page_size {
                catalog.set_page_size(size).await?;
            }
            if let Some(kind) = filter {
                catalog.set_filter(kind).await;
            }
            catalog.refresh().await?;
            catalog.go_to_page(page).await;

            let vm = catalog.view_model().read().await;
            let view = vm.view();
            if json {
                let body = serde_json::to_string_pretty(&view)
                    .map_err(|e| AppError::MalformedResponse(e.to_string()))?;
                println!("{}", body);
            } else {
                print_view(&view);
            }
        }
        Command::Search { query } => {
            catalog.refresh().await?;
            match catalog.search(&query).await? {
                LocalSearch::NotLoaded => {
                    println!("{}", Notification::info("No books loaded. Try again once the catalog is reachable."));
                }
                LocalSearch::Matches(found) if found.is_empty() => {
                    println!("{}", Notification::info(format!("No books match \"{}\"", query.trim())));
                }
                LocalSearch::Matches(found) => {
                    println!("Found {} book(s):", found.len());
                    for book in &found {
                        print_book(book);
                    }
                }
            }
        }
        Command::Show { isbn } => {
            let book = catalog.lookup(&isbn).await?;
            print_details(&book);
        }
        Command::Add { isbn, format } => {
            let mutation = catalog
                .add_by_isbn(NewBookByIsbn::new(&isbn, format.into_format()))
                .await?;
            report(&mutation, |b| format!("Added \"{}\"", b.title));
        }
        Command::AddManual {
            isbn,
            title,
            authors,
            format,
        } => {
            let mutation = catalog
                .add_manual(ManualBook::new(&isbn, &title, authors.as_slice(), format.into_format()))
                .await?;
            report(&mutation, |b| format!("Added \"{}\"", b.title));
        }
        Command::Delete { isbn } => {
            let mutation = catalog.delete(&isbn).await?;
            report(&mutation, |_| format!("Deleted book {}", isbn.trim()));
        }
        Command::Borrow { isbn } => {
            let mutation = loans.borrow(&isbn).await?;
            report(&mutation, |b| format!("Borrowed \"{}\"", b.title));
        }
        Command::Return { isbn } => {
            let mutation = loans.return_book(&isbn).await?;
            report(&mutation, |b| format!("Returned \"{}\"", b.title));
        }
        Command::Toggle { isbn } => {
            catalog.refresh().await?;
            let mutation = loans.toggle(&isbn).await?;
            report(&mutation, |b| {
                if b.is_borrowed {
                    format!("Borrowed \"{}\"", b.title)
                } else {
                    format!("Returned \"{}\"", b.title)
                }
            });
        }
        Command::Status => {
            println!("Catalog service: {}", catalog.connection_status().await);
        }
    }

    Ok(())
}

fn report<T>(mutation: &Mutation<T>, describe: impl FnOnce(&T) -> String) {
    println!("{}", Notification::success(describe(&mutation.value)));
    if let RefreshOutcome::Failed(e) = &mutation.refresh {
        println!("{}", Notification::from(e));
    }
}

fn print_view(view: &ListView<'_>) {
    if view.is_empty() {
        println!("No books found ({})", view.filter);
    } else {
        for book in &view.items {
            print_book(book);
        }
        println!(
            "Page {} of {} ({} matching {})",
            view.page, view.total_pages, view.matching, view.filter
        );
    }

    let s = &view.summary;
    println!(
        "Total {} | available {} | borrowed {} | physical {} | digital {} | audio {}",
        s.total, s.available, s.borrowed, s.physical, s.digital, s.audio
    );
}

fn print_book(book: &Book) {
    println!(
        "{:<17} {:<40} {:<25} {:<9} {}",
        book.isbn,
        book.title,
        book.primary_author(),
        book.format.tag(),
        if book.is_borrowed { "borrowed" } else { "available" }
    );
}

fn print_details(book: &Book) {
    println!("{}", book);
    if let Ok(details) = serde_json::to_string_pretty(book) {
        println!("{}", details);
    }
}
