use crate::error::{LensError, Result};
use image::ImageFormat;
use ingredient_lens_common::LabelImage;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const UNKNOWN_MIME: &str = "application/octet-stream";

/// ディスク上のラベル画像
#[derive(Debug, Clone)]
pub struct LabelFile {
    pub path: PathBuf,
    pub image: LabelImage,
}

/// 拡張子からMIMEタイプを判定
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    ImageFormat::from_path(path).ok().map(|f| f.to_mime_type())
}

/// 1ファイル読み込み（内容は読まない）
pub fn load_label(path: &Path) -> Result<LabelFile> {
    if !path.is_file() {
        return Err(LensError::FileNotFound(path.display().to_string()));
    }

    let size_bytes = std::fs::metadata(path)?.len();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mime_type = mime_for_path(path).unwrap_or(UNKNOWN_MIME);

    Ok(LabelFile {
        path: path.to_path_buf(),
        image: LabelImage::new(file_name, mime_type, size_bytes),
    })
}

/// フォルダ直下の画像をファイル名順で列挙
pub fn scan_folder(folder: &Path) -> Result<Vec<LabelFile>> {
    if !folder.is_dir() {
        return Err(LensError::FileNotFound(folder.display().to_string()));
    }

    let mut labels = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && mime_for_path(path).is_some() {
            labels.push(load_label(path)?);
        }
    }

    labels.sort_by(|a, b| a.image.file_name.cmp(&b.image.file_name));

    Ok(labels)
}

/// 引数のパス一覧を解決（フォルダは展開）
pub fn collect_labels(paths: &[PathBuf]) -> Result<Vec<LabelFile>> {
    let mut labels = Vec::new();

    for path in paths {
        if path.is_dir() {
            let found = scan_folder(path)?;
            if found.is_empty() {
                return Err(LensError::NoImagesFound(path.display().to_string()));
            }
            labels.extend(found);
        } else {
            labels.push(load_label(path)?);
        }
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("label.jpg")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("label.JPEG")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("label.png")), Some("image/png"));
        assert_eq!(mime_for_path(Path::new("notes.txt")), None);
        assert_eq!(mime_for_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_load_label_not_found() {
        let result = load_label(Path::new("/nonexistent/label.jpg"));
        assert!(matches!(result, Err(LensError::FileNotFound(_))));
    }

    #[test]
    fn test_load_label_reads_size_and_mime() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snack.png");
        File::create(&path).unwrap().write_all(b"dummy-bytes").unwrap();

        let label = load_label(&path).unwrap();
        assert_eq!(label.image.file_name, "snack.png");
        assert_eq!(label.image.mime_type, "image/png");
        assert_eq!(label.image.size_bytes, 11);
    }

    #[test]
    fn test_load_label_non_image_keeps_unknown_mime() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("readme.txt");
        File::create(&path).unwrap().write_all(b"text").unwrap();

        let label = load_label(&path).unwrap();
        assert!(!label.image.is_image());
    }

    #[test]
    fn test_scan_folder_sorted_images_only() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("c.jpg")).unwrap();
        File::create(dir.path().join("a.png")).unwrap();
        File::create(dir.path().join("b.JPG")).unwrap();
        File::create(dir.path().join("readme.txt")).unwrap();

        let labels = scan_folder(dir.path()).unwrap();
        let names: Vec<&str> = labels.iter().map(|l| l.image.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.JPG", "c.jpg"]);
    }

    #[test]
    fn test_collect_labels_empty_folder_is_error() {
        let dir = tempdir().unwrap();
        let result = collect_labels(&[dir.path().to_path_buf()]);
        assert!(matches!(result, Err(LensError::NoImagesFound(_))));
    }
}
