use book_browser::config::{Config, Mode, PrintOptions, USAGE};
use book_browser::models::state::{Action, ViewState};
use book_browser::router;
use book_browser::services::source::OpenLibrarySource;
use book_browser::services::store::{load_action, spawn_initial_load, Store};
use book_browser::utils::render::render_text;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("book_browser=info,tower_http=info")
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = match Mode::from_args(&args) {
        Ok(mode) => mode,
        Err(e) => {
            error!("Invalid arguments: {}", e);
            info!("{}", USAGE);
            std::process::exit(1);
        }
    };

    match mode {
        Mode::Serve => serve(config).await,
        Mode::Print(options) => print_page(config, options).await,
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::new(ViewState::new(config.sort_key, config.page_size));
    let source = Arc::new(OpenLibrarySource::new(config.source_url.clone()));

    // The view is served right away; rows appear once the read resolves.
    spawn_initial_load(store.clone(), source);

    let addr = config.addr();
    info!("Book browser starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(store)).await?;
    Ok(())
}

async fn print_page(config: Config, options: PrintOptions) -> Result<(), Box<dyn std::error::Error>> {
    let source = OpenLibrarySource::new(config.source_url.clone());

    let mut state = ViewState::new(config.sort_key, options.page_size.unwrap_or(config.page_size))
        .reduce(Action::LoadStarted)
        .reduce(load_action(&source).await);

    if options.descending {
        state.apply(Action::ToggleSort);
    }
    if let Some(page) = options.page {
        state.apply(Action::SetPage(page));
        if state.current_page() != page {
            info!(
                "Page {} is out of range, showing page {} of {}",
                page,
                state.current_page(),
                state.total_pages()
            );
        }
    }

    print!("{}", render_text(&state));
    Ok(())
}
