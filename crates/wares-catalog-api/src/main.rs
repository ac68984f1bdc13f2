use wares_catalog_api::setup;
use wares_core::CatalogConfig;

// Use mimalloc as the global allocator for better performance and lower
// fragmentation, especially when running on musl-based systems inside containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = CatalogConfig::from_env()?;
    let server_port = config.server_port;

    // Initialize the application (telemetry, storage client, routes)
    let (_state, router) = setup::initialize_app(config)?;

    // Start the server
    setup::server::start_server(server_port, router).await?;

    Ok(())
}
