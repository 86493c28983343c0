use crate::config::mongo_conf::MongoConfig;
use mongodb::{options::{ClientOptions, Credential, ResolverConfig}, Client, Database};
use tracing::info;

/// Builds the one client (and connection pool) the process uses and returns
/// the configured database; repositories borrow their collections from it.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("LectureHubBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));
    client_options.server_selection_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));

    if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
        client_options.credential = Some(Credential::builder()
            .username(username.clone())
            .password(password.clone())
            .build());
    }

    let client = Client::with_options(client_options)?;
    let db = client.database(&config.database);
    info!(database = %config.database, "MongoDB client initialised");
    Ok(db)
}
