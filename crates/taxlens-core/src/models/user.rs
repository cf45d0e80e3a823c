use serde::{Deserialize, Serialize};

/// Demographic record, one row per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub occupation_category: String,
    pub region: String,
    pub age_range: String,
    pub family_status: String,
}
