use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Symbicode {
    pub id: i64,
    pub code: Uuid,
    #[serde(skip_serializing)]
    pub secret_key: String,
    pub product_id: i64,
    pub order_id: Option<i64>,
    pub is_activated: bool,
    pub activated_ip: Option<String>,
    pub created_at: DateTime<Utc>,
    pub activated_at: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow)]
pub(super) struct SymbicodeRow {
    pub id: i64,
    pub code: Vec<u8>,
    pub secret_key: String,
    pub product_id: i64,
    pub order_id: Option<i64>,
    pub is_activated: i64,
    pub activated_ip: Option<String>,
    pub created_at: DateTime<Utc>,
    pub activated_at: Option<DateTime<Utc>>,
}

impl TryFrom<SymbicodeRow> for Symbicode {
    type Error = uuid::Error;

    fn try_from(row: SymbicodeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            code: Uuid::from_slice(&row.code)?,
            secret_key: row.secret_key,
            product_id: row.product_id,
            order_id: row.order_id,
            is_activated: row.is_activated != 0,
            activated_ip: row.activated_ip,
            created_at: row.created_at,
            activated_at: row.activated_at,
        })
    }
}
