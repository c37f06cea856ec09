use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::services::trash_naming;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrashedItemType {
    #[serde(rename = "file")]
    File,
    #[serde(rename = "dir")]
    Directory,
}

impl TrashedItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrashedItemType::File => "file",
            TrashedItemType::Directory => "dir",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "file" => Some(TrashedItemType::File),
            "dir" => Some(TrashedItemType::Directory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrashedItem {
    /// Nombre base del elemento; junto con deleted_at identifica el artefacto
    pub name: String,
    /// Marca de borrado en segundos Unix, única por (usuario, nombre)
    pub deleted_at: i64,
    /// Directorio padre original, relativo a la vista del usuario
    pub location: String,
    pub item_type: TrashedItemType,
    /// Vacío para directorios
    pub mime_type: Option<String>,
    pub user_id: Uuid,
}

impl TrashedItem {
    pub fn new(
        user_id: Uuid,
        name: String,
        deleted_at: i64,
        location: String,
        item_type: TrashedItemType,
        mime_type: Option<String>,
    ) -> Self {
        Self {
            name,
            deleted_at,
            location,
            item_type,
            mime_type,
            user_id,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.item_type == TrashedItemType::Directory
    }

    /// Nombre del artefacto retenido en el área de papelera
    pub fn artifact_name(&self) -> String {
        trash_naming::artifact_name(&self.name, self.deleted_at)
    }
}
