//! 归档服务 - 业务能力层
//!
//! 把收据目录下的所有文件打成一个 zip

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{AppError, AppResult, FileError};

/// 归档结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub archive_path: PathBuf,
    /// 压缩包内的文件名（按名称排序）
    pub entries: Vec<String>,
}

/// 把 `folder` 下的所有文件（不含子目录）压缩到 `archive_path`
///
/// 空目录会生成一个空的压缩包
pub fn archive_folder_with_zip(folder: &Path, archive_path: &Path) -> AppResult<ArchiveSummary> {
    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder.display().to_string(),
        }
        .into());
    }

    let files = list_files(folder)?;
    let archive_name = archive_path.display().to_string();
    let archive_err = |e: zip::result::ZipError| {
        AppError::File(FileError::ArchiveFailed {
            path: archive_name.clone(),
            source: Box::new(e),
        })
    };

    if let Some(parent) = archive_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
    }
    let out = File::create(archive_path).map_err(|e| AppError::file_write_failed(&archive_name, e))?;

    let mut zip = ZipWriter::new(out);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = Vec::with_capacity(files.len());
    for (name, path) in files {
        debug!("添加到压缩包: {}", name);
        zip.start_file(name.as_str(), options).map_err(archive_err)?;
        let mut input = File::open(&path).map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        io::copy(&mut input, &mut zip).map_err(|e| AppError::file_write_failed(&archive_name, e))?;
        entries.push(name);
    }
    zip.finish().map_err(archive_err)?;

    info!("🗜️ 已归档 {} 个文件到 {}", entries.len(), archive_path.display());

    Ok(ArchiveSummary {
        archive_path: archive_path.to_path_buf(),
        entries,
    })
}

/// 列出目录下的普通文件，按文件名排序
fn list_files(folder: &Path) -> AppResult<Vec<(String, PathBuf)>> {
    let read_err = |e: io::Error| AppError::file_read_failed(folder.display().to_string(), e);

    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        if !entry.file_type().map_err(read_err)?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        files.push((name, entry.path()));
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn zip_names(path: &Path) -> Vec<String> {
        let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        names
    }

    #[test]
    fn test_archives_every_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let receipts = dir.path().join("receipts");
        std::fs::create_dir_all(receipts.join("nested")).unwrap();
        std::fs::write(receipts.join("2.pdf"), b"two").unwrap();
        std::fs::write(receipts.join("1.pdf"), b"one").unwrap();
        std::fs::write(receipts.join("nested/ignored.pdf"), b"x").unwrap();

        let zip_path = dir.path().join("receipts.zip");
        let summary = archive_folder_with_zip(&receipts, &zip_path).unwrap();

        assert_eq!(summary.entries, vec!["1.pdf", "2.pdf"]);
        assert_eq!(zip_names(&zip_path), vec!["1.pdf", "2.pdf"]);

        let mut archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        let mut content = String::new();
        archive.by_name("2.pdf").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "two");
    }

    #[test]
    fn test_empty_folder_gives_empty_archive() {
        let dir = tempfile::tempdir().unwrap();
        let receipts = dir.path().join("receipts");
        std::fs::create_dir_all(&receipts).unwrap();

        let zip_path = dir.path().join("receipts.zip");
        let summary = archive_folder_with_zip(&receipts, &zip_path).unwrap();

        assert!(summary.entries.is_empty());
        assert!(zip_path.exists());
        assert!(zip_names(&zip_path).is_empty());
    }

    #[test]
    fn test_missing_folder_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = archive_folder_with_zip(&dir.path().join("missing"), &dir.path().join("r.zip")).unwrap_err();
        assert!(matches!(err, AppError::File(FileError::DirectoryNotFound { .. })));
    }
}
