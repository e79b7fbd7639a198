//! Persistence of rendered floor plans.
//!
//! Artifacts land under a well-known directory relative to the serving root.
//! File names carry a short content hash of the request so concurrent
//! requests never overwrite each other's plans.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::floorplan::FloorPlanLayout;
use crate::input::ProjectInput;
use crate::render::SvgRenderer;

pub type ArtifactResult<T> = std::result::Result<T, ArtifactError>;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot write floor plan to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where rendered plans are stored and how they are named.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    /// Directory that relative artifact paths are resolved against.
    root: PathBuf,
    /// Directory under `root` holding the plans, e.g. `static`.
    dir: PathBuf,
    stem: String,
    renderer: SvgRenderer,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>, dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dir: dir.into(),
            stem: "floorplan".to_string(),
            renderer: SvgRenderer::default(),
        }
    }

    /// `static/` under the current working directory.
    pub fn with_default() -> Self {
        Self::new(".", "static")
    }

    pub fn with_stem(mut self, stem: impl Into<String>) -> Self {
        self.stem = stem.into();
        self
    }

    pub fn with_renderer(mut self, renderer: SvgRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative path the plan for `input` is stored under.
    pub fn relative_path(&self, input: &ProjectInput) -> PathBuf {
        self.dir
            .join(format!("{}-{}.svg", self.stem, request_key(input)))
    }

    /// Render and persist the plan, returning its relative path.
    ///
    /// The file is written to a uniquely named sibling and renamed into
    /// place so readers never observe a partial document.
    pub fn store(&self, input: &ProjectInput, layout: &FloorPlanLayout) -> ArtifactResult<PathBuf> {
        let relative = self.relative_path(input);
        let target = self.root.join(&relative);
        let parent = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());

        let write_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| ArtifactError::Write { path, source }
        };

        fs::create_dir_all(&parent).map_err(write_err(&parent))?;
        let mut staging = NamedTempFile::new_in(&parent).map_err(write_err(&parent))?;
        {
            let mut writer = BufWriter::new(staging.as_file_mut());
            self.renderer
                .render(&mut writer, layout)
                .and_then(|()| writer.flush())
                .map_err(write_err(&target))?;
        }

        staging
            .persist(&target)
            .map_err(|err| ArtifactError::Write {
                path: target.clone(),
                source: err.error,
            })?;

        Ok(relative)
    }
}

/// Short stable key derived from the request values.
pub fn request_key(input: &ProjectInput) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&input.area.to_le_bytes());
    hasher.update(&input.total_floors.to_le_bytes());
    hasher.update(&input.wage.to_le_bytes());
    hasher.update(&input.cost.to_le_bytes());
    let hash = hasher.finalize();
    hash.to_hex()[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FloorPlanConfig;
    use crate::floorplan::generate_layout;

    fn input(area: f64) -> ProjectInput {
        ProjectInput::new(area, "G+1", 500.0, 2000.0).unwrap()
    }

    #[test]
    fn request_key_depends_on_every_value() {
        let base = request_key(&input(1000.0));
        assert_eq!(base.len(), 16);
        assert_eq!(base, request_key(&input(1000.0)));
        assert_ne!(base, request_key(&input(1001.0)));
        let other_wage = ProjectInput::new(1000.0, "G+1", 501.0, 2000.0).unwrap();
        assert_ne!(base, request_key(&other_wage));
    }

    #[test]
    fn equivalent_floor_specs_share_a_key() {
        let spelled = ProjectInput::new(1000.0, "G+1", 500.0, 2000.0).unwrap();
        let counted = ProjectInput::new(1000.0, "2", 500.0, 2000.0).unwrap();
        assert_eq!(request_key(&spelled), request_key(&counted));
    }

    #[test]
    fn store_writes_svg_under_relative_path() {
        let root = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(root.path(), "static");
        let input = input(1000.0);
        let layout = generate_layout(input.total_area(), &FloorPlanConfig::default()).unwrap();

        let relative = store.store(&input, &layout).unwrap();
        assert!(relative.starts_with("static"));
        assert!(relative.to_string_lossy().ends_with(".svg"));

        let written = fs::read_to_string(root.path().join(&relative)).unwrap();
        assert!(written.contains("Living Room"));
        let entries = fs::read_dir(root.path().join("static")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn concurrent_identical_requests_both_succeed() {
        let root = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(root.path(), "static");
        let input = input(1000.0);
        let layout = generate_layout(input.total_area(), &FloorPlanConfig::default()).unwrap();

        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| store.store(&input, &layout)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for result in &results {
            assert_eq!(result.as_ref().unwrap(), &store.relative_path(&input));
        }
        let entries = fs::read_dir(root.path().join("static")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn unwritable_location_is_reported() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("static");
        fs::write(&blocker, b"not a directory").unwrap();

        let store = ArtifactStore::new(root.path(), "static");
        let input = input(1000.0);
        let layout = generate_layout(input.total_area(), &FloorPlanConfig::default()).unwrap();

        let err = store.store(&input, &layout).unwrap_err();
        assert!(err.to_string().contains("cannot write floor plan"));
    }
}
