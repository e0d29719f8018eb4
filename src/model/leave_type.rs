use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveType {
    pub id: u64,
    /// display name, e.g. "Sick leave"
    #[serde(rename = "type")]
    pub name: String,
}
