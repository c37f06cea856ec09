/// Representa una ruta relativa dentro de la vista de un usuario,
/// sin dependencias del sistema de archivos
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoragePath {
    segments: Vec<String>,
}

impl StoragePath {
    /// Crea una ruta vacía (raíz de la vista)
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Crea una ruta a partir de una cadena con segmentos separados por /
    ///
    /// Los segmentos vacíos, "." y ".." se descartan, por lo que "/a//b/"
    /// y "a/b" denotan la misma ruta y ninguna ruta puede salir de la
    /// vista del usuario.
    pub fn from_string(path: &str) -> Self {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .map(|s| s.to_string())
            .collect();
        Self { segments }
    }

    /// Añade un segmento a la ruta
    pub fn join(&self, segment: &str) -> Self {
        let mut new_segments = self.segments.clone();
        new_segments.push(segment.to_string());
        Self {
            segments: new_segments,
        }
    }

    /// Obtiene el nombre base (último segmento)
    pub fn file_name(&self) -> Option<String> {
        self.segments.last().cloned()
    }

    /// Obtiene la ruta del directorio padre
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            let parent_segments = self.segments[..self.segments.len() - 1].to_vec();
            Some(Self {
                segments: parent_segments,
            })
        }
    }

    /// Verifica si la ruta está vacía (es la raíz)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Obtiene los segmentos de la ruta
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl std::fmt::Display for StoragePath {
    /// Formato "/segmento1/segmento2/...", "/" para la raíz
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "/{}", self.segments.join("/"))
        }
    }
}
