use metro_chat::app::AppState;
use metro_chat::domain::Coordinate;
use metro_chat::odpt::{
    CatalogCache, CatalogCacheConfig, OdptClient, OdptClientConfig, load_catalog,
    tokyo_metro_names,
};
use metro_chat::store::{FileProvider, MessageStore};
use tracing_subscriber::EnvFilter;

/// Tokyo city centre, the fallback position when no location is supplied.
const TOKYO_CENTER: Coordinate = Coordinate {
    lat: 35.6895,
    lng: 139.6917,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Get the consumer key from the environment
    let api_key = std::env::var("ODPT_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: ODPT_API_KEY not set. Catalog fetches will fail.");
        String::new()
    });

    // Create the ODPT client and catalog cache
    let client =
        OdptClient::new(OdptClientConfig::new(&api_key)).expect("Failed to create ODPT client");
    let cache = CatalogCache::new(CatalogCacheConfig::default());

    // Load the catalog, cache-first; an unreachable API leaves the map
    // empty but the stored notes still work
    let names = tokyo_metro_names();
    let catalog = match load_catalog(&client, &cache, &names).await {
        Ok(stations) => stations,
        Err(e) => {
            eprintln!("Warning: could not load station catalog: {e}");
            Vec::new()
        }
    };

    // Open the message store from local data
    let store = MessageStore::load(FileProvider::new("."))
        .expect("Failed to load message store");

    let mut app = AppState::new(store);
    app.load_catalog(catalog);

    println!("Loaded {} Tokyo Metro stations", app.catalog_len());
    println!();

    println!("Stations by proximity to central Tokyo:");
    for (station, tier) in app.classified(TOKYO_CENTER) {
        println!("  [{tier:?}] {} ({})", station.name, station.railway);
    }
    println!();

    let noted = app.stations_with_messages();
    if noted.is_empty() {
        println!("No stations have notes yet.");
    } else {
        println!("Stations with notes:");
        for entry in noted {
            let view = app.station_view(&entry.station);
            println!("  {} - {}", entry.railway, entry.station);
            for message in view.messages {
                println!("    {} ({})", message.text, message.posted_at);
            }
        }
    }
}
