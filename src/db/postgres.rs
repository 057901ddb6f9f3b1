use anyhow::Result;

use crate::db::{quote_ident, DBBehavior, LoadJob};
use crate::loader::{self, RowOutcome};
use crate::logger::debug;
use crate::connection::Connection;

pub struct Postgres {}

impl DBBehavior for Postgres {
    fn database_url(conn: &Connection) -> Result<String> {
        let user = conn
            .user
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("type postgres needs the user field"))?;
        let host = conn
            .host
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("type postgres needs the host field"))?;
        let port = conn
            .port
            .ok_or_else(|| anyhow::anyhow!("type postgres needs the port field"))?;
        let password = conn.password.as_deref().unwrap_or_default();

        let mut url = format!("postgres://{user}:{password}@{host}:{port}");
        if let Some(database) = conn.database.as_deref() {
            url.push('/');
            url.push_str(database);
        }
        Ok(url)
    }

    fn load_emails(conn: &Connection, job: &LoadJob) -> Result<Vec<RowOutcome>> {
        debug("postgres: connecting");
        let url = Postgres::database_url(conn)?;
        let mut client = postgres::Client::connect(&url, postgres::NoTls)?;
        debug("postgres: connected");

        let stmt = format!(
            "INSERT INTO {} ({}) VALUES ($1)",
            quote_ident(&job.table),
            quote_ident(&job.column)
        );

        let mut tx = client.transaction()?;
        let outcomes = loader::run(&job.emails, |email| {
            // A failed statement puts the whole postgres transaction into an
            // aborted state, so each row runs inside its own savepoint.
            let mut sp = tx.savepoint("row")?;
            match sp.execute(stmt.as_str(), &[&email]) {
                Ok(_) => {
                    sp.commit()?;
                    Ok(())
                }
                Err(err) => {
                    sp.rollback()?;
                    Err(err.into())
                }
            }
        });

        // Commit and close errors are not recovered; they abort the run.
        tx.commit()?;
        client.close()?;

        Ok(outcomes)
    }
}
