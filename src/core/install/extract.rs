use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::error::{LauncherError, LauncherResult};

/// Unpack `zip_path` into `dest`, overwriting existing entries. Top-level
/// entries named in `reserved` are skipped so the archive cannot replace
/// files the installer owns.
pub async fn unpack_archive(
    zip_path: &Path,
    dest: &Path,
    reserved: &'static [&'static str],
) -> LauncherResult<usize> {
    let zip_path = zip_path.to_path_buf();
    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || extract_zip_file(&zip_path, &dest, reserved))
        .await
        .map_err(|e| LauncherError::Other(format!("Task join error: {e}")))?
}

/// Blocking worker behind [`unpack_archive`]. Returns the number of files
/// written.
pub fn extract_zip_file(
    zip_path: &Path,
    dest: &Path,
    reserved: &[&str],
) -> LauncherResult<usize> {
    let zip_file = std::fs::File::open(zip_path).map_err(|source| LauncherError::Io {
        path: zip_path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(zip_file)?;
    let mut written = 0;

    for index in 0..archive.len() {
        let mut zipped = archive.by_index(index)?;
        let rel_path: PathBuf = zipped.enclosed_name().ok_or_else(|| {
            LauncherError::UnpackFailed(format!("unsafe entry path {:?}", zipped.name()))
        })?;

        if is_reserved(&rel_path, reserved) {
            warn!("Skipping reserved archive entry {:?}", rel_path);
            continue;
        }

        let out_path = dest.join(&rel_path);
        if zipped.is_dir() {
            std::fs::create_dir_all(&out_path).map_err(|e| unpack_io(&out_path, e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| unpack_io(parent, e))?;
        }

        let mut out = std::fs::File::create(&out_path).map_err(|e| unpack_io(&out_path, e))?;
        std::io::copy(&mut zipped, &mut out).map_err(|e| unpack_io(&out_path, e))?;
        debug!("Extracted {:?}", rel_path);
        written += 1;
    }

    Ok(written)
}

// Case-insensitive: the mod directory usually lives on NTFS.
fn is_reserved(rel_path: &Path, reserved: &[&str]) -> bool {
    let mut components = rel_path.components();
    match (components.next(), components.next()) {
        (Some(first), None) => reserved
            .iter()
            .any(|name| first.as_os_str().to_string_lossy().eq_ignore_ascii_case(name)),
        _ => false,
    }
}

fn unpack_io(path: &Path, source: std::io::Error) -> LauncherError {
    LauncherError::UnpackFailed(format!("{:?}: {}", path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (name, bytes) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(bytes).unwrap();
        }
        writer.finish().unwrap();
    }

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("neosplus-extract-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn unpacks_nested_entries_and_overwrites() {
        let dir = temp_dir();
        let zip_path = dir.join("asset.zip");
        let dest = dir.join("mod");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("NeosPlus.dll"), b"old").unwrap();

        write_zip(
            &zip_path,
            &[("NeosPlus.dll", b"new"), ("Assets/readme.txt", b"hi")],
        );

        let count = unpack_archive(&zip_path, &dest, &[]).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(std::fs::read(dest.join("NeosPlus.dll")).unwrap(), b"new");
        assert_eq!(std::fs::read(dest.join("Assets/readme.txt")).unwrap(), b"hi");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn entries_escaping_the_destination_are_rejected() {
        let dir = temp_dir();
        let zip_path = dir.join("evil.zip");
        write_zip(&zip_path, &[("../escape.txt", b"x")]);

        let result = unpack_archive(&zip_path, &dir.join("mod"), &[]).await;
        assert!(matches!(result, Err(LauncherError::UnpackFailed(_))));
        assert!(!dir.join("escape.txt").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn garbage_is_an_unpack_failure() {
        let dir = temp_dir();
        let zip_path = dir.join("broken.zip");
        std::fs::write(&zip_path, b"this is not a zip").unwrap();

        let result = unpack_archive(&zip_path, &dir, &[]).await;
        assert!(matches!(result, Err(LauncherError::UnpackFailed(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn reserved_top_level_entries_are_skipped() {
        let dir = temp_dir();
        let zip_path = dir.join("asset.zip");
        let dest = dir.join("mod");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("version.txt"), b"v1.0.0").unwrap();

        write_zip(
            &zip_path,
            &[
                ("VERSION.TXT", b"bogus"),
                ("docs/version.txt", b"nested"),
                ("NeosPlus.dll", b"dll"),
            ],
        );

        let count = unpack_archive(&zip_path, &dest, &["version.txt"]).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(std::fs::read(dest.join("version.txt")).unwrap(), b"v1.0.0");
        assert_eq!(std::fs::read(dest.join("docs/version.txt")).unwrap(), b"nested");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
