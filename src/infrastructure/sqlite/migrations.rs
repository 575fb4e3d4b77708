use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS articles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            status TEXT NOT NULL,
            added TEXT NOT NULL,
            author TEXT,
            author_name TEXT,
            modified_by TEXT,
            modified_by_name TEXT,
            modified_at TEXT,
            knowledge_article_id TEXT
        );

        CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS article_tags (
            article_id INTEGER NOT NULL,
            tag_id INTEGER NOT NULL,
            PRIMARY KEY (article_id, tag_id),
            FOREIGN KEY (article_id) REFERENCES articles(id) ON DELETE CASCADE,
            FOREIGN KEY (tag_id) REFERENCES tags(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS authorized_users (
            username TEXT PRIMARY KEY,
            added_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_articles_added ON articles(added);
        CREATE INDEX IF NOT EXISTS idx_articles_modified ON articles(modified_at);
        CREATE INDEX IF NOT EXISTS idx_article_tags_tag ON article_tags(tag_id);
        "
    ).map_err(|e| format!("Migration failed: {e}"))
}
