use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary source and destination trees for mirroring tests
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// Create a workspace with empty `src/` and `out/` roots
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(dir.path().join("src")).expect("Failed to create source root");
        fs::create_dir(dir.path().join("out")).expect("Failed to create destination root");
        Self { dir }
    }

    pub fn source_root(&self) -> PathBuf {
        self.dir.path().join("src")
    }

    pub fn dest_root(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    pub fn root_path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file under the source root, creating parent directories
    pub fn create_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.source_root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    #[allow(dead_code)]
    pub fn create_dir(&self, relative: &str) -> PathBuf {
        let path = self.source_root().join(relative);
        fs::create_dir_all(&path).expect("Failed to create dir");
        path
    }

    /// Read a file under the destination root
    pub fn read_output(&self, relative: &str) -> String {
        let path = self.dest_root().join(relative);
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("Missing output: {}", path.display()))
    }

    #[allow(dead_code)]
    pub fn output_exists(&self, relative: &str) -> bool {
        self.dest_root().join(relative).exists()
    }
}
