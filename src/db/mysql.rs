use anyhow::Result;
use mysql::prelude::Queryable;

use crate::db::{DBBehavior, LoadJob};
use crate::loader::{self, RowOutcome};
use crate::logger::debug;
use crate::connection::Connection;

pub struct Mysql {}

impl DBBehavior for Mysql {
    fn database_url(conn: &Connection) -> Result<String> {
        let user = conn
            .user
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("type mysql needs the user field"))?;
        let host = conn
            .host
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("type mysql needs the host field"))?;
        let port = conn
            .port
            .ok_or_else(|| anyhow::anyhow!("type mysql needs the port field"))?;
        let password = conn.password.as_deref().unwrap_or_default();

        let mut url = format!("mysql://{user}:{password}@{host}:{port}");
        if let Some(database) = conn.database.as_deref() {
            url.push('/');
            url.push_str(database);
        }
        Ok(url)
    }

    fn load_emails(conn: &Connection, job: &LoadJob) -> Result<Vec<RowOutcome>> {
        debug("mysql: connecting");
        let url = Mysql::database_url(conn)?;
        let opts = mysql::Opts::from_url(&url)?;
        let mut client = mysql::Conn::new(opts)?;
        debug("mysql: connected");

        let stmt = format!(
            "INSERT INTO {} ({}) VALUES (?)",
            quote_ident(&job.table),
            quote_ident(&job.column)
        );

        let mut tx = client.start_transaction(mysql::TxOpts::default())?;
        let outcomes = loader::run(&job.emails, |email| {
            // The server rolls back only the failed statement; the enclosing
            // transaction stays usable, so no savepoint is needed here.
            tx.exec_drop(stmt.as_str(), (email,))?;
            Ok(())
        });
        tx.commit()?;

        Ok(outcomes)
    }
}

/// Quote an identifier for mysql by doubling embedded backticks.
fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_uses_backticks() {
        assert_eq!(quote_ident("user_table"), "`user_table`");
        assert_eq!(quote_ident("odd`name"), "`odd``name`");
    }
}
