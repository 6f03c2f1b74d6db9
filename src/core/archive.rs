use crate::utils::error::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::{SimpleFileOptions, ZipWriter};

pub const ARCHIVE_FILE_NAME: &str = "robot_orders.zip";

/// Bundle every receipt PDF and robot screenshot into one ZIP under the
/// output root. Entry names are prefixed with their source directory and
/// sorted for a stable archive layout. Absent directories contribute no
/// entries; the archive file is written either way.
pub fn archive_artifacts(output_root: &Path) -> Result<PathBuf> {
    let archive_path = output_root.join(ARCHIVE_FILE_NAME);
    fs::create_dir_all(output_root)?;

    let file = fs::File::create(&archive_path)?;
    let mut zip = ZipWriter::new(file);

    for prefix in ["receipts", "screenshots"] {
        let dir = output_root.join(prefix);
        if !dir.is_dir() {
            continue;
        }

        let mut names: Vec<String> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        for name in names {
            zip.start_file(format!("{}/{}", prefix, name), SimpleFileOptions::default())?;
            let data = fs::read(dir.join(&name))?;
            zip.write_all(&data)?;
        }
    }

    zip.finish()?;
    tracing::debug!(archive = %archive_path.display(), "artifact archive written");
    Ok(archive_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed(root: &Path, sub: &str, name: &str, data: &[u8]) {
        let dir = root.join(sub);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), data).unwrap();
    }

    fn entry_names(path: &Path) -> Vec<String> {
        let file = fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_archive_collects_receipts_and_screenshots() {
        let root = TempDir::new().unwrap();
        seed(root.path(), "receipts", "receipt_1.pdf", b"%PDF-1.7");
        seed(root.path(), "receipts", "receipt_2.pdf", b"%PDF-1.7");
        seed(root.path(), "screenshots", "robot_1.png", b"\x89PNG");
        seed(root.path(), "screenshots", "robot_2.png", b"\x89PNG");

        let archive = archive_artifacts(root.path()).unwrap();

        assert_eq!(
            entry_names(&archive),
            vec![
                "receipts/receipt_1.pdf",
                "receipts/receipt_2.pdf",
                "screenshots/robot_1.png",
                "screenshots/robot_2.png",
            ]
        );
    }

    #[test]
    fn test_archive_content_round_trips() {
        let root = TempDir::new().unwrap();
        seed(root.path(), "receipts", "receipt_9.pdf", b"receipt bytes");

        let archive = archive_artifacts(root.path()).unwrap();

        let file = fs::File::open(&archive).unwrap();
        let mut zip = zip::ZipArchive::new(file).unwrap();
        let mut entry = zip.by_name("receipts/receipt_9.pdf").unwrap();
        let mut data = Vec::new();
        std::io::Read::read_to_end(&mut entry, &mut data).unwrap();
        assert_eq!(data, b"receipt bytes");
    }

    #[test]
    fn test_archive_without_artifact_dirs_is_empty() {
        let root = TempDir::new().unwrap();

        let archive = archive_artifacts(root.path()).unwrap();

        assert!(archive.exists());
        assert!(entry_names(&archive).is_empty());
    }
}
