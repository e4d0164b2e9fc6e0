//! Helpers for tests that need to touch the file system.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// `<workspace>/target/test_output`, created on first use.
pub fn test_output_dir() -> &'static Path {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("target")
            .join("test_output");
        std::fs::create_dir_all(&dir).expect("Failed to create test_output directory");
        dir
    })
}

/// Returns the path to a test output file.
pub fn test_output_path(name: &str) -> PathBuf {
    test_output_dir().join(name)
}

/// Writes `bytes` to a test output file and returns its path.
pub fn write_test_file(name: &str, bytes: &[u8]) -> PathBuf {
    let path = test_output_path(name);
    std::fs::write(&path, bytes)
        .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
    path
}
