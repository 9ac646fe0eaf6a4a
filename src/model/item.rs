use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category tag of a leaf item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Note,
    Textbook,
    Exam,
    Translation,
    Essay,
    Image,
    File,
    Mindmap,
}

impl ResourceType {
    pub const ALL: [ResourceType; 8] = [
        ResourceType::Note,
        ResourceType::Textbook,
        ResourceType::Exam,
        ResourceType::Translation,
        ResourceType::Essay,
        ResourceType::Image,
        ResourceType::File,
        ResourceType::Mindmap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Note => "note",
            ResourceType::Textbook => "textbook",
            ResourceType::Exam => "exam",
            ResourceType::Translation => "translation",
            ResourceType::Essay => "essay",
            ResourceType::Image => "image",
            ResourceType::File => "file",
            ResourceType::Mindmap => "mindmap",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown resource type: {}", s))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Folder,
    Resource(ResourceType),
}

impl ItemKind {
    pub fn is_folder(&self) -> bool {
        matches!(self, ItemKind::Folder)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ItemKind::Folder => "folder",
            ItemKind::Resource(ty) => ty.as_str(),
        }
    }
}

/// A displayable entry: either a folder or a typed resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub kind: ItemKind,
    pub name: String,
    pub parent_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn resource(
        id: impl Into<String>,
        ty: ResourceType,
        name: impl Into<String>,
        parent_id: Option<&str>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            kind: ItemKind::Resource(ty),
            name: name.into(),
            parent_id: parent_id.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_times(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }
}

/// Folder metadata as returned by `list_folders`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub title: String,
    pub parent_id: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    pub fn new(id: impl Into<String>, title: impl Into<String>, parent_id: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            parent_id: parent_id.map(str::to_string),
            icon: None,
            color: None,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_item(&self) -> Item {
        Item {
            id: self.id.clone(),
            kind: ItemKind::Folder,
            name: self.title.clone(),
            parent_id: self.parent_id.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_parse() {
        assert_eq!("Exam".parse::<ResourceType>(), Ok(ResourceType::Exam));
        assert!("folder".parse::<ResourceType>().is_err());
    }

    #[test]
    fn test_folder_to_item() {
        let folder = Folder::new("f1", "Physics", None);
        let item = folder.to_item();
        assert!(item.is_folder());
        assert_eq!(item.name, "Physics");
        assert_eq!(item.kind.type_name(), "folder");
    }
}
