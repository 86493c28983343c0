use crate::model::lecture::{Lecture, LectureUpdate};
use crate::util::upload::UploadedFile;
use serde::{Deserialize, Serialize};

/// Parsed multipart body of the lecture create and update routes.
///
/// `fields` holds the allow-listed text fields exactly as received (the
/// `date` value is normalized by the service); `images` and `banner` hold the
/// first file sent under each name.
#[derive(Debug, Clone, Default)]
pub struct LectureForm {
    pub fields: LectureUpdate,
    pub images: Option<UploadedFile>,
    pub banner: Option<UploadedFile>,
}

impl LectureForm {
    /// Records a text field if its name is on the allow-list; returns `false` otherwise.
    pub fn set_text_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "teacher" => &mut self.fields.teacher,
            "venue" => &mut self.fields.venue,
            "class" => &mut self.fields.class_name,
            "time" => &mut self.fields.time,
            "strength" => &mut self.fields.strength,
            "resourcePerson" => &mut self.fields.resource_person,
            "company" => &mut self.fields.company,
            "location" => &mut self.fields.location,
            "designation" => &mut self.fields.designation,
            "topic" => &mut self.fields.topic,
            "date" => &mut self.fields.date,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Keeps the first file per field; later files under the same name are dropped.
    pub fn set_file_field(&mut self, name: &str, file: UploadedFile) -> bool {
        let slot = match name {
            "images" => &mut self.images,
            "banner" => &mut self.banner,
            _ => return false,
        };
        if slot.is_none() {
            *slot = Some(file);
        }
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub teacher: Option<String>,
    pub venue: Option<String>,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
    pub time: Option<String>,
    pub strength: Option<String>,
    pub resource_person: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub designation: Option<String>,
    pub topic: Option<String>,
    pub images: String,
    pub banner: String,
    pub date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// Only present in the list view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_marked: Option<bool>,
}

impl From<Lecture> for LectureResponse {
    fn from(lecture: Lecture) -> Self {
        LectureResponse {
            id: lecture.id.map(|id| id.to_hex()).unwrap_or_default(),
            teacher: lecture.teacher,
            venue: lecture.venue,
            class_name: lecture.class_name,
            time: lecture.time,
            strength: lecture.strength,
            resource_person: lecture.resource_person,
            company: lecture.company,
            location: lecture.location,
            designation: lecture.designation,
            topic: lecture.topic,
            images: lecture.images,
            banner: lecture.banner,
            date: lecture.date,
            created_at: lecture.created_at,
            updated_at: lecture.updated_at,
            attendance_marked: None,
        }
    }
}

impl LectureResponse {
    pub fn with_attendance(lecture: Lecture, attendance_marked: bool) -> Self {
        LectureResponse {
            attendance_marked: Some(attendance_marked),
            ..LectureResponse::from(lecture)
        }
    }
}

/// One entry of the derived class list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSummary {
    /// Id of a lecture carrying this class
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}
