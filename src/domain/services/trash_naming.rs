//! Esquema de nombres de la papelera
//!
//! Los artefactos retenidos llevan la marca de borrado en el nombre
//! ("informe.txt.d1700000000"), de modo que el área de papelera tolera
//! borrados repetidos del mismo nombre sin colisiones.

use crate::domain::services::path_service::StoragePath;

/// Área de contenido activo de la vista de un usuario
pub const FILES_DIR: &str = "files";
/// Área de retención para el contenido borrado
pub const TRASH_DIR: &str = "files_trashbin";
/// Área de versiones del contenido activo
pub const VERSIONS_DIR: &str = "files_versions";
/// Área de retención para las versiones de elementos borrados
pub const VERSIONS_TRASH_DIR: &str = "versions_trashbin";

/// Nombre del artefacto retenido: "<nombre>.d<marca>"
pub fn artifact_name(name: &str, deleted_at: i64) -> String {
    format!("{}.d{}", name, deleted_at)
}

/// Descompone un nombre de artefacto en (nombre, marca de borrado)
///
/// La marca es el sufijo ".d<dígitos>" final; un nombre puede contener
/// ".d" internos y se toma siempre el último.
pub fn parse_artifact_name(artifact: &str) -> Option<(String, i64)> {
    let idx = artifact.rfind(".d")?;
    let (name, suffix) = (&artifact[..idx], &artifact[idx + 2..]);
    if name.is_empty() || suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let deleted_at = suffix.parse::<i64>().ok()?;
    Some((name.to_string(), deleted_at))
}

/// Nombre de una versión en el área de versiones activas: "<nombre>.v<versión>"
pub fn version_file_name(name: &str, version: &str) -> String {
    format!("{}.v{}", name, version)
}

/// Nombre de una versión retenida: "<nombre>.v<versión>.d<marca>"
pub fn version_artifact_name(name: &str, version: &str, deleted_at: i64) -> String {
    format!("{}.v{}.d{}", name, version, deleted_at)
}

/// Separa "<base>.v<versión>" por el último ".v"
///
/// El nombre base puede contener ".v" internos ("app.v2.tar.v13" es la
/// versión "13" de "app.v2.tar").
pub fn split_version_suffix(file_name: &str) -> Option<(&str, &str)> {
    let idx = file_name.rfind(".v")?;
    let (base, version) = (&file_name[..idx], &file_name[idx + 2..]);
    if base.is_empty() || version.is_empty() {
        return None;
    }
    Some((base, version))
}

/// Nombre candidato para una restauración: "", ".restored", ".restored1", ...
pub fn restored_name(base: &str, attempt: usize) -> String {
    match attempt {
        0 => base.to_string(),
        1 => format!("{}.restored", base),
        n => format!("{}.restored{}", base, n - 1),
    }
}

/// Ruta del artefacto retenido dentro del área de retención
pub fn trash_artifact_path(name: &str, deleted_at: i64) -> StoragePath {
    StoragePath::from_string(TRASH_DIR).join(&artifact_name(name, deleted_at))
}

/// Ruta de la vista con el área antepuesta
pub fn in_area(area: &str, rel: &StoragePath) -> StoragePath {
    let mut path = StoragePath::from_string(area);
    for segment in rel.segments() {
        path = path.join(segment);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_name_round_trip() {
        let artifact = artifact_name("informe.txt", 1700000000);
        assert_eq!(artifact, "informe.txt.d1700000000");
        assert_eq!(
            parse_artifact_name(&artifact),
            Some(("informe.txt".to_string(), 1700000000))
        );
    }

    #[test]
    fn test_parse_takes_last_stamp() {
        // El nombre original ya contenía un sufijo ".d<dígitos>"
        assert_eq!(
            parse_artifact_name("backup.d100.d200"),
            Some(("backup.d100".to_string(), 200))
        );
    }

    #[test]
    fn test_parse_rejects_malformed_names() {
        assert_eq!(parse_artifact_name("informe.txt"), None);
        assert_eq!(parse_artifact_name("informe.txt.d"), None);
        assert_eq!(parse_artifact_name("informe.txt.dabc"), None);
        assert_eq!(parse_artifact_name(".d1700000000"), None);
    }

    #[test]
    fn test_split_version_suffix_takes_last_marker() {
        assert_eq!(split_version_suffix("a.txt.v42"), Some(("a.txt", "42")));
        assert_eq!(
            split_version_suffix("app.v2.tar.v13"),
            Some(("app.v2.tar", "13"))
        );
        assert_eq!(split_version_suffix("sin_version"), None);
        assert_eq!(split_version_suffix("colgante.v"), None);
    }

    #[test]
    fn test_version_artifact_name() {
        assert_eq!(
            version_artifact_name("a.txt", "42", 1700000000),
            "a.txt.v42.d1700000000"
        );
        assert_eq!(version_file_name("a.txt", "42"), "a.txt.v42");
    }

    #[test]
    fn test_in_area() {
        let rel = StoragePath::from_string("docs/a.txt");
        assert_eq!(in_area(FILES_DIR, &rel).to_string(), "/files/docs/a.txt");
        assert_eq!(
            in_area(TRASH_DIR, &StoragePath::root()).to_string(),
            "/files_trashbin"
        );
    }

    #[test]
    fn test_restored_name_sequence() {
        assert_eq!(restored_name("a.txt", 0), "a.txt");
        assert_eq!(restored_name("a.txt", 1), "a.txt.restored");
        assert_eq!(restored_name("a.txt", 2), "a.txt.restored1");
        assert_eq!(restored_name("a.txt", 3), "a.txt.restored2");
    }
}
