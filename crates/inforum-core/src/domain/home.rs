use serde::{Deserialize, Serialize};

/// Home page hero content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Home {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewHome {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}
