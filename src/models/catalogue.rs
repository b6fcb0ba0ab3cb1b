use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A member's project, as published by the projects feature.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Project {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Organizer {
    #[serde(default)]
    pub username: Option<String>,
}

/// A published event. Slug and organizer are optional upstream.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Event {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub organizer_id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub organizer: Option<Organizer>,
    #[serde(default)]
    pub is_published: bool,
}

impl Event {
    pub fn organizer_username(&self) -> Option<&str> {
        self.organizer
            .as_ref()
            .and_then(|o| o.username.as_deref())
            .filter(|u| !u.is_empty())
    }
}
