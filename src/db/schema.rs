pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS expenses (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id         TEXT NOT NULL,
    amount          TEXT NOT NULL,
    category        TEXT NOT NULL,
    date            TEXT NOT NULL,
    description     TEXT,
    payment_method  TEXT,
    created_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_expenses_user_date ON expenses(user_id, date);

CREATE TABLE IF NOT EXISTS budgets (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id   TEXT NOT NULL,
    month     TEXT NOT NULL,
    category  TEXT NOT NULL,
    amount    TEXT NOT NULL,
    UNIQUE(user_id, category, month)
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;
