//! PostgreSQL table definitions
//!
//! One entry per entity, in foreign-key dependency order. Table names are
//! case-sensitive: the dashboard tables are quoted identifiers.

/// A table the application owns, with the statement that creates it
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    /// Name as it appears in `information_schema.tables`
    pub name: &'static str,
    pub create_sql: &'static str,
}

pub const SCHOOL: TableDef = TableDef {
    name: "School",
    create_sql: r#"
CREATE TABLE "School" (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    city VARCHAR(255) NOT NULL
)"#,
};

pub const STUDENT: TableDef = TableDef {
    name: "Student",
    create_sql: r#"
CREATE TABLE "Student" (
    id SERIAL PRIMARY KEY,
    school_id INT NOT NULL REFERENCES "School"(id),
    name VARCHAR(255),
    grade VARCHAR(10),
    math_units INT
)"#,
};

pub const GRADE: TableDef = TableDef {
    name: "Grade",
    create_sql: r#"
CREATE TABLE "Grade" (
    id SERIAL PRIMARY KEY,
    student_id INT NOT NULL REFERENCES "Student"(id),
    subject VARCHAR(255),
    score INT,
    exam_date DATE
)"#,
};

pub const DASHBOARD_USER: TableDef = TableDef {
    name: "User",
    create_sql: r#"
CREATE TABLE "User" (
    id SERIAL PRIMARY KEY,
    email VARCHAR(64) NOT NULL UNIQUE,
    password VARCHAR(64) NOT NULL
)"#,
};

pub const USERS: TableDef = TableDef {
    name: "users",
    create_sql: r#"
CREATE TABLE users (
    id SERIAL PRIMARY KEY,
    username VARCHAR(64) NOT NULL,
    email VARCHAR(64) NOT NULL UNIQUE,
    password VARCHAR(64) NOT NULL,
    profile_image_url TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)"#,
};

pub const OFFERS: TableDef = TableDef {
    name: "offers",
    create_sql: r#"
CREATE TABLE offers (
    id SERIAL PRIMARY KEY,
    user_id INT NOT NULL REFERENCES users(id),
    title VARCHAR(255) NOT NULL,
    description TEXT NOT NULL,
    category VARCHAR(50) NOT NULL,
    image_url TEXT,
    status VARCHAR(20) NOT NULL DEFAULT 'available'
        CHECK (status IN ('available', 'exchanged')),
    estimated_value DECIMAL(10, 2),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)"#,
};

pub const TRADES: TableDef = TableDef {
    name: "trades",
    create_sql: r#"
CREATE TABLE trades (
    id SERIAL PRIMARY KEY,
    offer_id_1 INT NOT NULL REFERENCES offers(id),
    offer_id_2 INT NOT NULL REFERENCES offers(id),
    status VARCHAR(20) NOT NULL DEFAULT 'in_process'
        CHECK (status IN ('in_process', 'completed', 'pending')),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (offer_id_1 <> offer_id_2)
)"#,
};

pub const MESSAGES: TableDef = TableDef {
    name: "messages",
    create_sql: r#"
CREATE TABLE messages (
    id SERIAL PRIMARY KEY,
    sender_id INT NOT NULL REFERENCES users(id),
    recipient_id INT NOT NULL REFERENCES users(id),
    content TEXT NOT NULL,
    sent_at TIMESTAMPTZ NOT NULL DEFAULT now()
)"#,
};

/// Every table, referenced tables before the tables that reference them
pub const TABLES: [TableDef; 8] = [
    SCHOOL,
    STUDENT,
    GRADE,
    DASHBOARD_USER,
    USERS,
    OFFERS,
    TRADES,
    MESSAGES,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::{OfferStatus, TradeStatus};

    /// Names referenced via `REFERENCES x(` or `REFERENCES "x"(`
    fn referenced_tables(sql: &str) -> Vec<String> {
        sql.split("REFERENCES ")
            .skip(1)
            .filter_map(|rest| rest.split('(').next())
            .map(|name| name.trim().trim_matches('"').to_string())
            .collect()
    }

    #[test]
    fn test_tables_are_in_dependency_order() {
        for (idx, table) in TABLES.iter().enumerate() {
            for target in referenced_tables(table.create_sql) {
                let pos = TABLES
                    .iter()
                    .position(|t| t.name == target)
                    .unwrap_or_else(|| panic!("{} references unknown table {}", table.name, target));
                assert!(
                    pos < idx,
                    "{} must be created after {}",
                    table.name,
                    target
                );
            }
        }
    }

    #[test]
    fn test_table_names_unique() {
        let mut names: Vec<_> = TABLES.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TABLES.len());
    }

    #[test]
    fn test_create_sql_names_its_table() {
        for table in TABLES {
            let quoted = format!("CREATE TABLE \"{}\" (", table.name);
            let bare = format!("CREATE TABLE {} (", table.name);
            assert!(
                table.create_sql.contains(&quoted) || table.create_sql.contains(&bare),
                "create_sql for {} creates a different table",
                table.name
            );
        }
    }

    #[test]
    fn test_account_emails_unique() {
        assert!(DASHBOARD_USER.create_sql.contains("email VARCHAR(64) NOT NULL UNIQUE"));
        assert!(USERS.create_sql.contains("email VARCHAR(64) NOT NULL UNIQUE"));
    }

    #[test]
    fn test_status_checks_cover_enums() {
        for status in OfferStatus::ALL {
            assert!(OFFERS.create_sql.contains(&format!("'{}'", status.as_str())));
        }
        for status in TradeStatus::ALL {
            assert!(TRADES.create_sql.contains(&format!("'{}'", status.as_str())));
        }
    }
}
