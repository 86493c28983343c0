use crate::model::class_attendance::ClassAttendance;
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw body of `POST /api/class-attendance/mark`.
///
/// `attended_classes` stays untyped so a non-array value is reported as a bad
/// request instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub lecture_id: Option<String>,
    pub attended_classes: Option<Value>,
    pub date: Option<String>,
}

/// Shape-checked attendance input handed to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    pub lecture_id: ObjectId,
    pub attended_classes: Vec<String>,
    pub date: Option<String>,
}

impl TryFrom<MarkAttendanceRequest> for NewAttendance {
    type Error = String;

    fn try_from(request: MarkAttendanceRequest) -> Result<Self, Self::Error> {
        const REQUIRED: &str = "lectureId and attendedClasses array are required";

        let lecture_id = request
            .lecture_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| REQUIRED.to_string())?;
        let lecture_id = ObjectId::parse_str(lecture_id)
            .map_err(|_| format!("Invalid lectureId: {}", lecture_id))?;

        let entries = match request.attended_classes {
            Some(Value::Array(entries)) => entries,
            _ => return Err(REQUIRED.to_string()),
        };
        let attended_classes = entries
            .into_iter()
            .map(|entry| match entry {
                Value::String(class_ref) => Ok(class_ref),
                other => Err(format!("attendedClasses entries must be strings, got {}", other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewAttendance {
            lecture_id,
            attended_classes,
            date: request.date.filter(|d| !d.trim().is_empty()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub lecture_id: String,
    pub attended_classes: Vec<String>,
    pub date: String,
}

impl From<ClassAttendance> for AttendanceRecordResponse {
    fn from(record: ClassAttendance) -> Self {
        AttendanceRecordResponse {
            id: record.id.map(|id| id.to_hex()).unwrap_or_default(),
            lecture_id: record.lecture_id.to_hex(),
            attended_classes: record.attended_classes,
            date: record.date,
        }
    }
}
