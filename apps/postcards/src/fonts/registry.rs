#![allow(dead_code)]

//! Font Registry: name → drawable face, plus a distinguished default.
//!
//! The registry is built once by the host (usually from a fonts directory)
//! and is read-only afterwards. Postcards borrow faces from it and never own
//! font data themselves.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::fonts::outline::OutlineFace;
use crate::fonts::typeface::Typeface;

const FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font path {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font file {path}")]
    Parse { path: PathBuf },

    #[error("no usable fonts found in {0}")]
    NoFonts(PathBuf),

    #[error("font registry is empty")]
    Empty,

    #[error("unknown font {0:?}")]
    UnknownFont(String),

    #[error("unable to find font(s): {}", .names.join(", "))]
    NoPreferredFont { names: Vec<String> },
}

/// What to do with a font file that exists but cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Log the file and keep loading the rest of the directory.
    #[default]
    Skip,
    /// Abort the whole load.
    Strict,
}

/// Immutable collection of loaded faces, keyed by name.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    faces: BTreeMap<String, Arc<dyn Typeface>>,
    default: Arc<dyn Typeface>,
}

impl FontRegistry {
    /// Builds a registry from already-constructed faces. The first face
    /// becomes the default; a repeated name keeps the first face seen.
    pub fn from_faces(
        faces: impl IntoIterator<Item = Arc<dyn Typeface>>,
    ) -> Result<Self, FontError> {
        let mut map = BTreeMap::new();
        let mut default = None;
        for face in faces {
            default.get_or_insert_with(|| Arc::clone(&face));
            map.entry(face.name().to_string()).or_insert(face);
        }
        let default = default.ok_or(FontError::Empty)?;
        Ok(Self {
            faces: map,
            default,
        })
    }

    /// Walks `dir` recursively and loads every `.ttf` / `.otf` file, naming
    /// each face after its file stem. Files are visited in sorted path order
    /// so the default (the first loaded face) is stable across runs.
    pub fn load_dir(dir: &Path, policy: LoadPolicy) -> Result<Self, FontError> {
        let mut paths = Vec::new();
        collect_font_paths(dir, &mut paths)?;
        paths.sort();

        let mut faces: Vec<Arc<dyn Typeface>> = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let data = std::fs::read(&path).map_err(|source| FontError::Io {
                path: path.clone(),
                source,
            })?;
            match OutlineFace::from_bytes(name, data) {
                Ok(face) => {
                    debug!(font = name, path = %path.display(), "Loaded font");
                    faces.push(Arc::new(face));
                }
                Err(e) => match policy {
                    LoadPolicy::Skip => {
                        warn!(path = %path.display(), "Skipping unparseable font: {e}");
                    }
                    LoadPolicy::Strict => return Err(FontError::Parse { path }),
                },
            }
        }

        let registry = Self::from_faces(faces).map_err(|e| match e {
            FontError::Empty => FontError::NoFonts(dir.to_path_buf()),
            other => other,
        })?;
        info!(
            fonts = registry.faces.len(),
            default = registry.default_name(),
            "Font registry loaded from {}",
            dir.display()
        );
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Typeface> {
        self.faces.get(name).map(|face| face.as_ref())
    }

    pub fn default_face(&self) -> &dyn Typeface {
        self.default.as_ref()
    }

    pub fn default_name(&self) -> &str {
        self.default.name()
    }

    /// Changes which face is the default. Unknown names leave it unchanged.
    pub fn set_default(&mut self, name: &str) -> Result<(), FontError> {
        let face = self
            .faces
            .get(name)
            .ok_or_else(|| FontError::UnknownFont(name.to_string()))?;
        self.default = Arc::clone(face);
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.faces.keys().map(String::as_str)
    }
}

fn collect_font_paths(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), FontError> {
    let io_err = |source| FontError::Io {
        path: dir.to_path_buf(),
        source,
    };
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            collect_font_paths(&path, out)?;
        } else if is_font_file(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            FONT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::testing::{BlockFace, DEJAVU_SANS};

    fn block(name: &str) -> Arc<dyn Typeface> {
        Arc::new(BlockFace::named(name))
    }

    #[test]
    fn test_from_faces_first_face_is_default() {
        let registry = FontRegistry::from_faces([block("Alpha"), block("Beta")]).unwrap();
        assert_eq!(registry.default_name(), "Alpha");
        assert_eq!(registry.default_face().name(), "Alpha");
        assert_eq!(registry.names().count(), 2);
    }

    #[test]
    fn test_from_faces_empty_is_error() {
        let result = FontRegistry::from_faces(Vec::<Arc<dyn Typeface>>::new());
        assert!(matches!(result, Err(FontError::Empty)));
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let registry = FontRegistry::from_faces([block("Alpha")]).unwrap();
        assert!(registry.get("Alpha").is_some());
        assert!(registry.get("alpha").is_none(), "lookups are case-sensitive");
        assert!(registry.get("Missing").is_none());
    }

    #[test]
    fn test_set_default_rejects_unknown_name() {
        let mut registry = FontRegistry::from_faces([block("Alpha"), block("Beta")]).unwrap();
        match registry.set_default("Gamma") {
            Err(FontError::UnknownFont(name)) => assert_eq!(name, "Gamma"),
            other => panic!("expected UnknownFont, got {other:?}"),
        }
        assert_eq!(registry.default_name(), "Alpha");
        registry.set_default("Beta").unwrap();
        assert_eq!(registry.default_face().name(), "Beta");
    }

    #[test]
    fn test_names_are_sorted() {
        let registry =
            FontRegistry::from_faces([block("Zeta"), block("Alpha"), block("Mu")]).unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["Alpha", "Mu", "Zeta"]);
    }

    #[test]
    fn test_load_dir_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let result = FontRegistry::load_dir(&missing, LoadPolicy::Skip);
        assert!(matches!(result, Err(FontError::Io { .. })));
    }

    #[test]
    fn test_load_dir_skip_policy_ignores_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.ttf"), b"not a font").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"hello").unwrap();

        // Only an unparseable font is present, so nothing is loaded.
        let result = FontRegistry::load_dir(dir.path(), LoadPolicy::Skip);
        match result {
            Err(FontError::NoFonts(path)) => assert_eq!(path, dir.path()),
            other => panic!("expected NoFonts, got {other:?}"),
        }
    }

    #[test]
    fn test_load_dir_recurses_and_keeps_valid_faces_beside_broken_ones() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("b.ttf"), DEJAVU_SANS).unwrap();
        std::fs::write(dir.path().join("broken.ttf"), b"not a font").unwrap();
        std::fs::write(nested.join("a.otf"), DEJAVU_SANS).unwrap();

        let registry = FontRegistry::load_dir(dir.path(), LoadPolicy::Skip).unwrap();

        // Sorted paths put `b.ttf` ahead of `nested/a.otf`, so it is the default.
        assert_eq!(registry.default_name(), "b");
        assert_eq!(registry.get("a").map(|face| face.name()), Some("a"));
        assert_eq!(registry.get("b").map(|face| face.name()), Some("b"));
        assert!(registry.get("broken").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_load_dir_strict_policy_fails_on_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("broken.OTF"), b"not a font").unwrap();

        let result = FontRegistry::load_dir(dir.path(), LoadPolicy::Strict);
        match result {
            Err(FontError::Parse { path }) => assert!(path.ends_with("nested/broken.OTF")),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_is_font_file_extension_matching() {
        assert!(is_font_file(Path::new("/fonts/Inter.ttf")));
        assert!(is_font_file(Path::new("/fonts/Lato.OTF")));
        assert!(!is_font_file(Path::new("/fonts/Inter.woff2")));
        assert!(!is_font_file(Path::new("/fonts/ttf")));
    }

    #[test]
    fn test_no_preferred_font_message_lists_names() {
        let err = FontError::NoPreferredFont {
            names: vec!["A".into(), "B".into()],
        };
        assert_eq!(err.to_string(), "unable to find font(s): A, B");
    }
}
