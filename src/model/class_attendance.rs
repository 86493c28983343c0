use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAttendance {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub lecture_id: ObjectId,
    /// Class names or the class ids handed out by the class listing
    #[serde(default)]
    pub attended_classes: Vec<String>,
    pub date: String,
}
