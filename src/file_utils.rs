use std::path::{Path, PathBuf};

// @module: File and path utilities

/// Suffix appended to the input file's stem for the output name
const OUTPUT_SUFFIX: &str = "_translated";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Output path for the translated copy of `input` in `output_dir`
    pub fn translated_output_path<P: AsRef<Path>, Q: AsRef<Path>>(
        input: P,
        output_dir: Q,
    ) -> PathBuf {
        let input = input.as_ref();
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("presentation");
        let name = match input.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext),
            None => format!("{}{}", stem, OUTPUT_SUFFIX),
        };
        output_dir.as_ref().join(name)
    }
}
