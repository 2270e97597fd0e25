use crate::{
    config::RuntimeConfiguration,
    error::{GetDatabaseConnectionSnafu, MigrateSnafu, OpenDatabaseSnafu, RosterResult},
};
use snafu::ResultExt;
use sqlx::{Pool, Sqlite, pool::PoolConnection, sqlite::SqlitePoolOptions};

#[derive(Clone, Debug)]
pub struct RosterState {
    pool: Pool<Sqlite>,
    config: RuntimeConfiguration,
}

impl RosterState {
    pub async fn new(options: SqlitePoolOptions, config: RuntimeConfiguration) -> RosterResult<Self> {
        let db_config = config.db_config();
        let pool = options
            .max_connections(db_config.max_connections())
            .connect_with(db_config.connect_options())
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;
        info!("Database ready");

        Ok(Self { pool, config })
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    ///goes back to the pool on drop, however the request ends
    pub async fn get_connection(&self) -> RosterResult<PoolConnection<Sqlite>> {
        self.pool
            .acquire()
            .await
            .context(GetDatabaseConnectionSnafu)
    }

    pub async fn sensible_shutdown(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
