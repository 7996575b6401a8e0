use chrono::{DateTime, Utc};
use everynote_auth::OwnerId;
use everynote_storage::parse_timestamp;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub owner_id: OwnerId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub(crate) const COLUMNS: &'static str = "id, name, user_id, created_at, updated_at";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let created_str: String = row.get(3)?;
        let updated_str: String = row.get(4)?;

        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            owner_id: OwnerId::new(row.get::<_, String>(2)?),
            created_at: parse_timestamp(3, &created_str)?,
            updated_at: parse_timestamp(4, &updated_str)?,
        })
    }
}
