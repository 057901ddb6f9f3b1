use serde::Deserialize;

use crate::db::DatabaseType;

/// Connection parameters as they appear in the config file. Which fields are
/// required depends on the backend: postgres and mysql need user/host/port,
/// sqlite needs path.
#[derive(Debug, Deserialize, Clone)]
pub struct Connection {
    pub r#type: DatabaseType,
    pub user: Option<String>,
    pub host: Option<String>,
    pub port: Option<u64>,
    pub path: Option<std::path::PathBuf>,
    pub password: Option<String>,
    pub database: Option<String>,
}
