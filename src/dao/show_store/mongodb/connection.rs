//! Client construction for the MongoDB show store.

use std::time::Duration;

use mongodb::{Client, Database, bson::doc};
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use super::{
    config::MongoConfig,
    error::{MongoDaoError, MongoResult},
};

/// Pause between pings while the connect window is still open.
const PING_BACKOFF: Duration = Duration::from_millis(200);

/// Build a client for `config` and ping it until it answers or `timeouts.connect` elapses.
///
/// Each ping is capped by the driver's server selection timeout, which `config` sets to
/// the same window, so a dead server fails this call after at most two windows.
pub async fn establish_connection(config: &MongoConfig) -> MongoResult<(Client, Database)> {
    let client = Client::with_options(config.options.clone())
        .map_err(|source| MongoDaoError::ClientConstruction { source })?;
    let database = client.database(&config.database_name);
    let deadline = Instant::now() + config.timeouts.connect;

    let mut attempts = 0;
    loop {
        attempts += 1;
        match database.run_command(doc! { "ping": 1 }).await {
            Ok(_) => {
                debug!(attempts, database = %config.database_name, "MongoDB answered ping");
                return Ok((client, database));
            }
            Err(source) if Instant::now() + PING_BACKOFF >= deadline => {
                return Err(MongoDaoError::InitialPing { attempts, source });
            }
            Err(err) => {
                warn!(attempts, error = %err, "MongoDB ping failed; retrying within connect window");
                sleep(PING_BACKOFF).await;
            }
        }
    }
}
