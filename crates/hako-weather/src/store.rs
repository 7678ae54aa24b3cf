//! SQLite-backed forecast history and area table.

use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use crate::areas::AreaDataset;
use crate::error::Result;
use crate::types::{Area, AreaKind, ForecastRecord};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Persistent forecast store.
///
/// Records are unique on `(area_code, forecast_date, report_datetime)`; a
/// later upsert with the same key replaces the stored row. The key columns
/// hold the instants in UTC, so the same moment written with different
/// offsets is one key. The `*_local` columns keep the text as published.
///
/// Replacement is whole-row: when two records in one batch share a key, the
/// later one wins even if it carries fewer fields (a temperature-only entry
/// replaces a weather entry for the same time).
pub struct ForecastStore {
    conn: Connection,
}

impl ForecastStore {
    /// Open (or create) a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        let store = Self { conn };
        store.init_schema()?;
        tracing::debug!("Opened forecast store at {:?}", path.as_ref());
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS areas (
                code TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                parent_code TEXT,
                kind TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS forecasts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                area_code TEXT NOT NULL,
                area_name TEXT NOT NULL,
                forecast_date TEXT NOT NULL,
                forecast_local TEXT NOT NULL,
                forecast_day TEXT NOT NULL,
                report_datetime TEXT NOT NULL,
                report_local TEXT NOT NULL,
                report_ts INTEGER NOT NULL,
                weather TEXT,
                temperature_high REAL,
                temperature_low REAL,
                precipitation_probability INTEGER,
                wind_direction TEXT,
                wind_speed TEXT,
                stored_at INTEGER NOT NULL,
                UNIQUE(area_code, forecast_date, report_datetime)
            );

            CREATE INDEX IF NOT EXISTS idx_forecasts_area_day ON forecasts(area_code, forecast_day);
            "#,
        )?;
        Ok(())
    }

    /// Insert records, replacing any stored row with the same key.
    ///
    /// Runs in one transaction: either every record lands or none does.
    pub fn upsert(&self, records: &[ForecastRecord]) -> Result<usize> {
        let now = Utc::now().timestamp_millis();
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR REPLACE INTO forecasts
                (area_code, area_name, forecast_date, forecast_local, forecast_day,
                 report_datetime, report_local, report_ts,
                 weather, temperature_high, temperature_low, precipitation_probability,
                 wind_direction, wind_speed, stored_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
                "#,
            )?;
            for record in records {
                stmt.execute(params![
                    record.area_code,
                    record.area_name,
                    utc_key(&record.forecast_date),
                    record.forecast_date.to_rfc3339(),
                    record.forecast_day().format(DAY_FORMAT).to_string(),
                    utc_key(&record.report_datetime),
                    record.report_datetime.to_rfc3339(),
                    record.report_datetime.timestamp(),
                    record.weather,
                    record.temperature_high,
                    record.temperature_low,
                    record.precipitation_probability,
                    record.wind_direction,
                    record.wind_speed,
                    now,
                ])?;
            }
        }
        tx.commit()?;
        tracing::info!("Stored {} forecast records", records.len());
        Ok(records.len())
    }

    /// Records for an area whose forecast falls on `date`, newest report first.
    pub fn query(&self, area_code: &str, date: NaiveDate) -> Result<Vec<ForecastRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT area_code, area_name, forecast_local, report_local, weather,
                   temperature_high, temperature_low, precipitation_probability,
                   wind_direction, wind_speed
            FROM forecasts
            WHERE area_code = ?1 AND forecast_day = ?2
            ORDER BY report_ts DESC, forecast_date ASC
            "#,
        )?;

        let rows = stmt.query_map(
            params![area_code, date.format(DAY_FORMAT).to_string()],
            Self::row_to_record,
        )?;
        let records = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        tracing::debug!(
            "History for {} on {}: {} records",
            area_code,
            date,
            records.len()
        );
        Ok(records)
    }

    /// Write the dataset's areas. Running it again updates names and parents
    /// in place.
    pub fn load_areas(&self, dataset: &AreaDataset) -> Result<usize> {
        let now = Utc::now().timestamp_millis();
        let tx = self.conn.unchecked_transaction()?;
        let mut count = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO areas (code, name, parent_code, kind, updated_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(code) DO UPDATE SET
                    name = excluded.name,
                    parent_code = excluded.parent_code,
                    kind = excluded.kind,
                    updated_at = excluded.updated_at
                "#,
            )?;
            for area in dataset.areas() {
                stmt.execute(params![
                    area.code,
                    area.name,
                    area.parent_code,
                    area.kind.as_str(),
                    now
                ])?;
                count += 1;
            }
        }
        tx.commit()?;
        tracing::info!("Loaded {} areas into store", count);
        Ok(count)
    }

    /// Centers first, then offices, each ordered by code.
    pub fn all_areas(&self) -> Result<Vec<Area>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT code, name, parent_code, kind FROM areas
            ORDER BY CASE kind WHEN 'center' THEN 0 ELSE 1 END, code
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            let kind: String = row.get(3)?;
            Ok(Area {
                code: row.get(0)?,
                name: row.get(1)?,
                parent_code: row.get(2)?,
                kind: kind.parse::<AreaKind>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into())
                })?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn forecast_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM forecasts", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn row_to_record(row: &Row) -> rusqlite::Result<ForecastRecord> {
        Ok(ForecastRecord {
            area_code: row.get(0)?,
            area_name: row.get(1)?,
            forecast_date: timestamp_column(row, 2)?,
            report_datetime: timestamp_column(row, 3)?,
            weather: row.get(4)?,
            temperature_high: row.get(5)?,
            temperature_low: row.get(6)?,
            precipitation_probability: row.get(7)?,
            wind_direction: row.get(8)?,
            wind_speed: row.get(9)?,
        })
    }
}

fn utc_key(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<DateTime<FixedOffset>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
