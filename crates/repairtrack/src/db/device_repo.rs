//! Device repository — CRUD operations for the `devices` table.
//!
//! The attachment list is stored in the `attachments` column as a JSON
//! array of destination paths and decoded on read.

use rusqlite::{params, types::Type, Row};

use super::{Database, DatabaseError};
use crate::record::{DeviceFields, DeviceRecord};

/// Filter parameters for the advanced search. An absent predicate is
/// omitted from the query entirely, not treated as "match all".
#[derive(Debug, Default, Clone)]
pub struct SearchFilter {
    /// Substring match on the barcode column.
    pub barcode: Option<String>,
    /// Exact match on the status column.
    pub status: Option<String>,
}

fn text(row: &Row<'_>, column: &str) -> Result<String, rusqlite::Error> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}

fn from_row(row: &Row<'_>) -> Result<DeviceRecord, rusqlite::Error> {
    let raw: Option<String> = row.get("attachments")?;
    let attachments = match raw.as_deref() {
        None | Some("") => Vec::new(),
        Some(json) => serde_json::from_str(json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(11, Type::Text, Box::new(e))
        })?,
    };

    Ok(DeviceRecord {
        id: row.get("id")?,
        fields: DeviceFields {
            barcode: row.get("barcode")?,
            region: text(row, "region")?,
            person_name: text(row, "person_name")?,
            badge_number: text(row, "badge_number")?,
            device_type: text(row, "device_type")?,
            serial_number: text(row, "serial_number")?,
            sent_date: text(row, "sent_date")?,
            returned_date: text(row, "returned_date")?,
            status: text(row, "status")?,
            note: text(row, "note")?,
        },
        attachments,
    })
}

fn encode_attachments(attachments: &[String]) -> Result<String, DatabaseError> {
    Ok(serde_json::to_string(attachments)?)
}

fn collect<I>(rows: I) -> Result<Vec<DeviceRecord>, DatabaseError>
where
    I: Iterator<Item = Result<DeviceRecord, rusqlite::Error>>,
{
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Inserts a new record row, returning the store-assigned id.
pub fn insert(
    db: &Database,
    fields: &DeviceFields,
    attachments: &[String],
) -> Result<i64, DatabaseError> {
    let encoded = encode_attachments(attachments)?;
    let id = db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO devices (barcode, region, person_name, badge_number, device_type,
             serial_number, sent_date, returned_date, status, note, attachments)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                fields.barcode,
                fields.region,
                fields.person_name,
                fields.badge_number,
                fields.device_type,
                fields.serial_number,
                fields.sent_date,
                fields.returned_date,
                fields.status,
                fields.note,
                encoded,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    })?;

    log::info!(
        "Device saved: {} (sent {})",
        fields.barcode,
        fields.sent_date
    );
    Ok(id)
}

/// Overwrites the full row for `id`. Updating a non-existent id is a
/// silent no-op success.
pub fn update(
    db: &Database,
    id: i64,
    fields: &DeviceFields,
    attachments: &[String],
) -> Result<(), DatabaseError> {
    let encoded = encode_attachments(attachments)?;
    db.with_conn(|conn| {
        conn.execute(
            "UPDATE devices SET barcode=?2, region=?3, person_name=?4, badge_number=?5,
             device_type=?6, serial_number=?7, sent_date=?8, returned_date=?9,
             status=?10, note=?11, attachments=?12
             WHERE id=?1",
            params![
                id,
                fields.barcode,
                fields.region,
                fields.person_name,
                fields.badge_number,
                fields.device_type,
                fields.serial_number,
                fields.sent_date,
                fields.returned_date,
                fields.status,
                fields.note,
                encoded,
            ],
        )?;
        Ok(())
    })?;

    log::info!("Device updated: id {}", id);
    Ok(())
}

/// Deletes the row unconditionally. No existence check, and attachment
/// files on disk are not touched.
pub fn delete(db: &Database, id: i64) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM devices WHERE id = ?1", params![id])?;
        Ok(())
    })?;

    log::info!("Device deleted: id {}", id);
    Ok(())
}

/// Finds a record by its id.
pub fn find_by_id(db: &Database, id: i64) -> Result<Option<DeviceRecord>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM devices WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// Returns every service cycle recorded for `barcode`, in insertion order.
pub fn find_by_barcode(db: &Database, barcode: &str) -> Result<Vec<DeviceRecord>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt =
            conn.prepare("SELECT * FROM devices WHERE barcode = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![barcode], from_row)?;
        collect(rows)
    })
}

/// Lists records in insertion order. An empty `filter` returns every row;
/// otherwise rows whose barcode OR person name contains `filter` as a
/// substring.
///
/// Substring matching uses SQLite `LIKE`, which is case-insensitive for
/// ASCII letters under the default collation. That behavior is pinned by a
/// test.
pub fn list(db: &Database, filter: &str) -> Result<Vec<DeviceRecord>, DatabaseError> {
    db.with_conn(|conn| {
        if filter.is_empty() {
            let mut stmt = conn.prepare("SELECT * FROM devices ORDER BY id")?;
            let rows = stmt.query_map([], from_row)?;
            collect(rows)
        } else {
            let pattern = format!("%{}%", filter);
            let mut stmt = conn.prepare(
                "SELECT * FROM devices WHERE barcode LIKE ?1 OR person_name LIKE ?1 ORDER BY id",
            )?;
            let rows = stmt.query_map(params![pattern], from_row)?;
            collect(rows)
        }
    })
}

/// Advanced search: AND-combined barcode substring and exact status.
pub fn search(db: &Database, filter: &SearchFilter) -> Result<Vec<DeviceRecord>, DatabaseError> {
    db.with_conn(|conn| {
        let mut sql = String::from("SELECT * FROM devices WHERE 1=1");
        let mut values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(ref barcode) = filter.barcode {
            sql.push_str(&format!(" AND barcode LIKE ?{}", values.len() + 1));
            values.push(Box::new(format!("%{}%", barcode)));
        }
        if let Some(ref status) = filter.status {
            sql.push_str(&format!(" AND status = ?{}", values.len() + 1));
            values.push(Box::new(status.clone()));
        }
        sql.push_str(" ORDER BY id");

        let mut stmt = conn.prepare(&sql)?;
        let refs: Vec<&dyn rusqlite::types::ToSql> = values.iter().map(|v| v.as_ref()).collect();
        let rows = stmt.query_map(refs.as_slice(), from_row)?;
        collect(rows)
    })
}
