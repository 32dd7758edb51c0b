use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRoleStat {
    pub role: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    #[serde(default)]
    pub approval_rate: f64,
    #[serde(default)]
    pub recent_count: u64,
    #[serde(default)]
    pub top_roles: Vec<TopRoleStat>,
}
