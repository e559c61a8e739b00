use crate::core::config::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Pool sizing and timeouts taken from `DB_*` settings
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
}

/// Connect the pool backing every `PgStore`
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        "Connecting to Postgres: max_connections={}, min_connections={}, acquire_timeout={}s",
        config.max_connections,
        config.min_connections,
        config.acquire_timeout_secs
    );

    pool_options(config).connect(&config.url).await.map_err(|e| {
        tracing::error!("Failed to connect to Postgres: {:?}", e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_options_follow_config() {
        let config = DatabaseConfig {
            url: "postgres://localhost/stockhive".to_string(),
            max_connections: 20,
            min_connections: 2,
            acquire_timeout_secs: 7,
            idle_timeout_secs: 300,
            max_lifetime_secs: 900,
        };

        let options = pool_options(&config);
        assert_eq!(options.get_max_connections(), 20);
        assert_eq!(options.get_min_connections(), 2);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(7));
        assert_eq!(options.get_idle_timeout(), Some(Duration::from_secs(300)));
        assert_eq!(options.get_max_lifetime(), Some(Duration::from_secs(900)));
    }
}
