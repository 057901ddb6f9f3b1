use anyhow::Result;

use crate::config::expand_path;
use crate::db::{quote_ident, DBBehavior, LoadJob};
use crate::loader::{self, RowOutcome};
use crate::logger::debug;
use crate::connection::Connection;

pub struct Sqlite {}

impl DBBehavior for Sqlite {
    fn database_url(conn: &Connection) -> Result<String> {
        let path = conn
            .path
            .as_ref()
            .and_then(|p| expand_path(p))
            .ok_or_else(|| anyhow::anyhow!("type sqlite needs the path field"))?;
        let path = path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("sqlite path is not valid UTF-8"))?;

        Ok(format!("sqlite://{path}"))
    }

    fn load_emails(conn: &Connection, job: &LoadJob) -> Result<Vec<RowOutcome>> {
        debug("sqlite: opening file");
        let path = conn
            .path
            .as_ref()
            .and_then(|p| expand_path(p))
            .ok_or_else(|| anyhow::anyhow!("invalid sqlite path"))?;
        let mut sc = rusqlite::Connection::open(path)?;
        debug("sqlite: opened");

        let stmt = format!(
            "INSERT INTO {} ({}) VALUES (?1)",
            quote_ident(&job.table),
            quote_ident(&job.column)
        );

        let mut tx = sc.transaction()?;
        let outcomes = loader::run(&job.emails, |email| {
            let mut sp = tx.savepoint()?;
            match sp.execute(&stmt, [email]) {
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
        tx.commit()?;
        sc.close().map_err(|(_, err)| err)?;

        Ok(outcomes)
    }
}
