use anyhow::Result;

fn main() -> Result<()> {
    let path = std::path::Path::new("dev/sqlite");
    std::fs::create_dir_all(path)?;
    let db_path = path.join("sample.db");
    let conn = rusqlite::Connection::open(&db_path)?;
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS user_table (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT UNIQUE
        );
        DELETE FROM user_table;
        INSERT INTO user_table (email) VALUES
          ('alice@example.com'),
          ('bob@example.com');
        "#,
    )?;
    println!("Seeded SQLite at {}", db_path.display());
    Ok(())
}
