use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema, sqlx::FromRow)]
pub struct Drop {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_stock: i64,
    pub drop_size: i64,
    pub sold: i64,
    pub is_active: bool,
}

impl Drop {
    pub fn is_sold_out(&self) -> bool {
        self.sold >= self.total_stock
    }

    pub fn drop_size_reached(&self) -> bool {
        self.sold >= self.drop_size
    }
}
