//! SQLite access for the local `correction` table.
//!
//! The table has no uniqueness constraint on `cin`: duplicates are prevented
//! by the form's check-then-insert loop, exactly as with the hosted table.

use common::model::record::{FieldKey, Record};
use log::warn;
use rusqlite::{params, params_from_iter, Connection};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS correction (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        cin             TEXT NOT NULL,
        nom             TEXT NOT NULL DEFAULT '',
        prenoms         TEXT NOT NULL DEFAULT '',
        date_naissance  TEXT NOT NULL DEFAULT '',
        lieu_naissance  TEXT NOT NULL DEFAULT '',
        domicile        TEXT NOT NULL DEFAULT '',
        arrondissement  TEXT NOT NULL DEFAULT '',
        profession      TEXT NOT NULL DEFAULT '',
        pere            TEXT NOT NULL DEFAULT '',
        mere            TEXT NOT NULL DEFAULT '',
        lieu_delivrance TEXT NOT NULL DEFAULT '',
        date_delivrance TEXT NOT NULL DEFAULT '',
        created_at      TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
    CREATE INDEX IF NOT EXISTS correction_cin ON correction (cin);
";

/// Opens the database file and makes sure the table exists.
pub fn open(path: &str) -> Result<Connection, String> {
    let conn = Connection::open(path).map_err(|e| e.to_string())?;
    conn.execute_batch(SCHEMA).map_err(|e| e.to_string())?;
    Ok(conn)
}

/// `cin` of every row matching `cin`.
pub fn find_cins(conn: &Connection, cin: &str) -> Result<Vec<String>, String> {
    let mut stmt = conn
        .prepare("SELECT cin FROM correction WHERE cin = ?1")
        .map_err(|e| e.to_string())?;
    let rows = stmt
        .query_map(params![cin], |row| row.get::<_, String>(0))
        .map_err(|e| e.to_string())?;
    rows.collect::<Result<Vec<_>, _>>().map_err(|e| e.to_string())
}

/// Inserts one row. Keys outside the card layout have no column and are dropped.
pub fn insert(conn: &Connection, record: &Record) -> Result<(), String> {
    if !record.extra.is_empty() {
        warn!(
            "cin {:?}: ignoring fields without a column: {:?}",
            record.cin,
            record.extra.keys().collect::<Vec<_>>()
        );
    }

    let columns = FieldKey::ALL.map(FieldKey::as_str).join(", ");
    let placeholders = (1..=FieldKey::ALL.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("INSERT INTO correction ({columns}) VALUES ({placeholders})");

    conn.execute(&sql, params_from_iter(FieldKey::ALL.map(|key| record.field(key))))
        .map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn
    }

    #[test]
    fn lookup_returns_every_matching_row() {
        let conn = memory();
        let record = Record::from_pairs([("cin", "101"), ("nom", "Rabe")]);
        insert(&conn, &record).unwrap();
        insert(&conn, &record).unwrap();
        insert(&conn, &Record::from_pairs([("cin", "102")])).unwrap();

        assert_eq!(find_cins(&conn, "101").unwrap(), ["101", "101"]);
        assert_eq!(find_cins(&conn, "102").unwrap(), ["102"]);
        assert!(find_cins(&conn, "103").unwrap().is_empty());
    }

    #[test]
    fn insert_stores_every_card_field() {
        let conn = memory();
        let pairs: Vec<(&str, String)> = FieldKey::ALL
            .iter()
            .map(|key| (key.as_str(), format!("v-{}", key.as_str())))
            .collect();
        insert(&conn, &Record::from_pairs(pairs)).unwrap();

        let (mere, date_delivrance): (String, String) = conn
            .query_row(
                "SELECT mere, date_delivrance FROM correction WHERE cin = 'v-cin'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(mere, "v-mere");
        assert_eq!(date_delivrance, "v-date_delivrance");
    }

    #[test]
    fn extra_fields_do_not_break_the_insert() {
        let conn = memory();
        insert(&conn, &Record::from_pairs([("cin", "7"), ("sexe", "F")])).unwrap();
        assert_eq!(find_cins(&conn, "7").unwrap(), ["7"]);
    }

    #[test]
    fn open_creates_the_table_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.sqlite");
        let path = path.to_str().unwrap();

        insert(&open(path).unwrap(), &Record::from_pairs([("cin", "1")])).unwrap();
        assert_eq!(find_cins(&open(path).unwrap(), "1").unwrap(), ["1"]);
    }
}
