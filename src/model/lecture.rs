use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
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
    /// Stored upload name, empty when no image was sent
    #[serde(default)]
    pub images: String,
    #[serde(default)]
    pub banner: String,
    pub date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Allow-listed lecture changes; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LectureUpdate {
    pub teacher: Option<String>,
    pub venue: Option<String>,
    pub class_name: Option<String>,
    pub time: Option<String>,
    pub strength: Option<String>,
    pub resource_person: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub designation: Option<String>,
    pub topic: Option<String>,
    pub images: Option<String>,
    pub banner: Option<String>,
    pub date: Option<String>,
}

impl LectureUpdate {
    /// Stored field name and new value for every field that is set.
    pub fn changes(&self) -> Vec<(&'static str, &str)> {
        [
            ("teacher", &self.teacher),
            ("venue", &self.venue),
            ("class", &self.class_name),
            ("time", &self.time),
            ("strength", &self.strength),
            ("resourcePerson", &self.resource_person),
            ("company", &self.company),
            ("location", &self.location),
            ("designation", &self.designation),
            ("topic", &self.topic),
            ("images", &self.images),
            ("banner", &self.banner),
            ("date", &self.date),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }

    pub fn apply_to(&self, lecture: &mut Lecture) {
        fn set(target: &mut Option<String>, value: &Option<String>) {
            if let Some(v) = value {
                *target = Some(v.clone());
            }
        }
        set(&mut lecture.teacher, &self.teacher);
        set(&mut lecture.venue, &self.venue);
        set(&mut lecture.class_name, &self.class_name);
        set(&mut lecture.time, &self.time);
        set(&mut lecture.strength, &self.strength);
        set(&mut lecture.resource_person, &self.resource_person);
        set(&mut lecture.company, &self.company);
        set(&mut lecture.location, &self.location);
        set(&mut lecture.designation, &self.designation);
        set(&mut lecture.topic, &self.topic);
        set(&mut lecture.date, &self.date);
        if let Some(images) = &self.images {
            lecture.images = images.clone();
        }
        if let Some(banner) = &self.banner {
            lecture.banner = banner.clone();
        }
    }
}
