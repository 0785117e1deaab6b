use clap::Parser;
use pantry_search::{
    api::{handlers::AppState, routes},
    cli::{commands, commands::SearchArgs, Cli, Commands},
    config::Settings,
    Error, Result,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pantry_search=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration; CLI flags win over the environment
    let mut settings = Settings::from_env()?;
    if let Some(data) = cli.data {
        settings.data.path = data;
    }
    if cli.sample {
        settings.data.sample = true;
    }
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Search {
            ingredients,
            duration,
            recipe_type,
            vegetarian,
            beginner,
            cuisine,
            title,
            page,
            limit,
        } => {
            let (index, _) = commands::load(&settings)?;
            let args = SearchArgs {
                ingredients,
                duration,
                recipe_type,
                vegetarian,
                beginner,
                cuisine,
                title,
            };
            let limit = limit.unwrap_or(settings.pagination.default_page_size);
            commands::search(&index, &args, limit, page)?;
        }
        Commands::Ingredients { top } => {
            let (index, _) = commands::load(&settings)?;
            commands::ingredients(&index, top);
        }
        Commands::Stats => {
            let (index, report) = commands::load(&settings)?;
            commands::stats(&index, &report);
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Pantry Search server");
    info!("Data: {:?}", settings.data.path);

    // Build the index once; it is read-only from here on
    let (index, report) = commands::load(&settings)?;
    info!("Recipe index ready: {} recipes", index.len());

    let state = AppState {
        index: Arc::new(index),
        report: Arc::new(report),
        settings: settings.clone(),
    };

    let app = routes::create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Pantry Search Server");
    println!("========================================");
    println!("Address: http://{addr}");
    println!("\nAPI Endpoints:");
    println!("  GET  /api/search");
    println!("  GET  /api/recipes/:id");
    println!("  GET  /api/ingredients");
    println!("  GET  /api/stats");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
