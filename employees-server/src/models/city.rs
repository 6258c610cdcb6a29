//! City lookup table

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Cities inserted on first startup, in id order.
pub const SEED_CITIES: [&str; 5] = ["Almaty", "Astana", "Taraz", "Jerusalem", "Kyiv"];

/// City record (read-only reference data)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct City {
    pub id: i32,
    pub name: String,
}
