//! SQLite-backed catalog implementation.

use std::fmt;
use std::path::{Path, PathBuf};

use geo::Coord;
use rusqlite::{params_from_iter, Connection, OpenFlags, Row};
use thiserror::Error;
use tripsmith_core::{CatalogError, OpeningHours, Poi, PoiCatalog, PoiId};

use super::record::StringOrList;

/// SQLite limits bound parameters per statement to 999 by default. The
/// catalog chunks `IN` queries to remain below that ceiling.
const SQLITE_MAX_VARIABLE_NUMBER: usize = 999;

/// Error raised when opening a catalog database.
#[derive(Debug, Error)]
pub enum SqliteCatalogError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Generic SQLite error when preparing the connection.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only POI catalog backed by a SQLite `pois` table.
///
/// Expected columns: `id`, `city`, `name`, `latitude`, `longitude`,
/// `category`, `tags`, `activities`, `entry_fee`, `visit_minutes`,
/// `rating`, `popularity`, `opening_hours`, `wheelchair_accessible`,
/// `address`, `best_time`. List columns hold either a JSON array or a
/// comma-joined string; `city` comparison is case-insensitive.
pub struct SqliteCatalog {
    connection: Connection,
}

impl fmt::Debug for SqliteCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCatalog").finish_non_exhaustive()
    }
}

impl SqliteCatalog {
    /// Open a catalog database read-only.
    ///
    /// # Errors
    /// Returns [`SqliteCatalogError::OpenDatabase`] when the file cannot
    /// be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SqliteCatalogError> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteCatalogError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { connection })
    }

    /// Wrap an existing connection, e.g. an in-memory database in tests.
    #[must_use]
    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    fn query(
        &self,
        filter_column: &str,
        city: &str,
        values: &[String],
    ) -> Result<Vec<Poi>, CatalogError> {
        if values.is_empty() {
            return Ok(Vec::new());
        }
        let mut pois = Vec::new();
        for chunk in values.chunks(SQLITE_MAX_VARIABLE_NUMBER - 1) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "SELECT id, name, latitude, longitude, category, tags, activities, \
                 entry_fee, visit_minutes, rating, popularity, opening_hours, \
                 wheelchair_accessible, address, best_time \
                 FROM pois WHERE city = ? COLLATE NOCASE AND {filter_column} IN ({placeholders})"
            );
            let mut statement = self
                .connection
                .prepare(&sql)
                .map_err(|err| CatalogError::backend(err.to_string()))?;
            let params = std::iter::once(city.to_owned()).chain(chunk.iter().cloned());
            let rows = statement
                .query_map(params_from_iter(params), poi_from_row)
                .map_err(|err| CatalogError::backend(err.to_string()))?;
            for row in rows {
                let poi = row.map_err(|err| CatalogError::backend(err.to_string()))?;
                pois.push(poi);
            }
        }
        Ok(pois)
    }
}

fn list_column(raw: Option<String>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    // JSON arrays first, comma-joined strings second.
    serde_json::from_str::<Vec<String>>(&raw)
        .map_or_else(|_| StringOrList::One(raw).into_vec(), |items| items)
}

fn hours_column(raw: Option<String>) -> OpeningHours {
    match raw.as_deref().map(str::trim) {
        None | Some("") => OpeningHours::Unknown,
        Some(raw) if raw.eq_ignore_ascii_case("24x7") || raw.eq_ignore_ascii_case("24/7") => {
            OpeningHours::AlwaysOpen
        }
        Some(raw) => OpeningHours::parse(raw),
    }
}

fn poi_from_row(row: &Row<'_>) -> rusqlite::Result<Poi> {
    let opening_hours = hours_column(row.get("opening_hours")?);
    Ok(Poi {
        id: PoiId::new(row.get::<_, String>("id")?),
        name: row.get("name")?,
        location: Coord {
            x: row.get("longitude")?,
            y: row.get("latitude")?,
        },
        category: row.get::<_, Option<String>>("category")?.unwrap_or_default(),
        tags: list_column(row.get("tags")?),
        activities: list_column(row.get("activities")?),
        entry_fee: row.get("entry_fee")?,
        visit_minutes: row.get("visit_minutes")?,
        rating: row.get("rating")?,
        popularity: row.get("popularity")?,
        opening_hours,
        wheelchair_accessible: row
            .get::<_, Option<bool>>("wheelchair_accessible")?
            .unwrap_or(false),
        address: row.get::<_, Option<String>>("address")?.unwrap_or_default(),
        best_time: list_column(row.get("best_time")?),
    })
}

impl PoiCatalog for SqliteCatalog {
    fn pois_in_categories(
        &self,
        city: &str,
        categories: &[String],
    ) -> Result<Vec<Poi>, CatalogError> {
        self.query("category", city, categories)
    }

    fn pois_by_ids(&self, city: &str, ids: &[PoiId]) -> Result<Vec<Poi>, CatalogError> {
        let values: Vec<String> = ids.iter().map(|id| id.as_str().to_owned()).collect();
        self.query("id", city, &values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn seeded_connection() -> Connection {
        let connection = Connection::open_in_memory().expect("in-memory database");
        connection
            .execute_batch(
                r#"
                CREATE TABLE pois (
                    id TEXT PRIMARY KEY,
                    city TEXT NOT NULL,
                    name TEXT NOT NULL,
                    latitude REAL,
                    longitude REAL,
                    category TEXT,
                    tags TEXT,
                    activities TEXT,
                    entry_fee REAL,
                    visit_minutes INTEGER,
                    rating REAL,
                    popularity REAL,
                    opening_hours TEXT,
                    wheelchair_accessible INTEGER,
                    address TEXT,
                    best_time TEXT
                );
                INSERT INTO pois VALUES
                    ('marina-beach', 'Chennai', 'Marina Beach', 13.0487, 80.2824,
                     'beach', '["beach","sunset"]', 'jogging, food_stalls',
                     0.0, 90, 4.3, 0.95, '05:00-21:00', 1, 'Marina Beach Rd',
                     'morning'),
                    ('fort-st-george', 'Chennai', 'Fort St. George', 13.0796,
                     80.2875, 'heritage', 'fort,colonial', NULL, 15.0, 90, 4.4,
                     0.8, NULL, 0, 'Rajaji Salai', NULL);
                "#,
            )
            .expect("schema should apply");
        connection
    }

    #[fixture]
    fn catalog() -> SqliteCatalog {
        SqliteCatalog::from_connection(seeded_connection())
    }

    #[rstest]
    fn filters_by_category(catalog: SqliteCatalog) {
        let pois = catalog
            .pois_in_categories("chennai", &["beach".to_owned()])
            .expect("query should succeed");
        assert_eq!(pois.len(), 1);
        assert_eq!(pois[0].id.as_str(), "marina-beach");
        assert_eq!(pois[0].tags, vec!["beach", "sunset"]);
        assert_eq!(pois[0].activities, vec!["jogging", "food_stalls"]);
        assert!(pois[0].wheelchair_accessible);
    }

    #[rstest]
    fn comma_joined_lists_split(catalog: SqliteCatalog) {
        let pois = catalog
            .pois_by_ids("Chennai", &[PoiId::new("fort-st-george")])
            .expect("query should succeed");
        assert_eq!(pois[0].tags, vec!["fort", "colonial"]);
        assert!(pois[0].activities.is_empty());
    }

    #[rstest]
    fn null_hours_fail_open(catalog: SqliteCatalog) {
        let pois = catalog
            .pois_by_ids("Chennai", &[PoiId::new("fort-st-george")])
            .expect("query should succeed");
        assert_eq!(pois[0].opening_hours, OpeningHours::Unknown);
    }

    #[rstest]
    fn empty_filters_short_circuit(catalog: SqliteCatalog) {
        let pois = catalog
            .pois_in_categories("Chennai", &[])
            .expect("query should succeed");
        assert!(pois.is_empty());
    }

    #[rstest]
    fn opening_a_missing_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = SqliteCatalog::open(dir.path().join("absent.sqlite")).unwrap_err();
        assert!(matches!(err, SqliteCatalogError::OpenDatabase { .. }));
    }
}
