//! Unpacking downloaded release assets.
//!
//! Dispatches on [`ArtifactKind`]: archives are extracted in full into
//! the destination directory, raw executables are written under the
//! tool's own name with mode 755 so downstream path resolution finds
//! them by a known name.

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use relkit_core::{ArtifactKind, Error, Result};
use tar::Archive;
use tracing::debug;

/// Unpack downloaded bytes into `dest` and return the directory
/// containing the runnable executable.
///
/// `binary_name` is only used for [`ArtifactKind::Binary`], where the
/// downloaded bytes are the executable itself and need a predictable
/// file name.
pub fn unpack(data: &[u8], kind: ArtifactKind, binary_name: &str, dest: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dest).map_err(|e| Error::io(e, format!("creating {}", dest.display())))?;

    match kind {
        ArtifactKind::Zip => unpack_zip(data, dest)?,
        ArtifactKind::TarGz => unpack_tar_gz(data, dest)?,
        ArtifactKind::Binary => place_binary(data, binary_name, dest)?,
    }

    debug!(dir = %dest.display(), %kind, "Unpacked release asset");
    Ok(dest.to_path_buf())
}

fn unpack_zip(data: &[u8], dest: &Path) -> Result<()> {
    let cursor = Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| Error::extract_failed(format!("failed to open zip: {e}")))?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| Error::extract_failed(format!("failed to read zip entry: {e}")))?;

        // Entries with paths escaping the destination are skipped.
        let Some(relative) = file.enclosed_name() else {
            continue;
        };
        let outpath = dest.join(relative);

        if file.is_dir() {
            std::fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut content = Vec::new();
            file.read_to_end(&mut content)
                .map_err(|e| Error::extract_failed(format!("failed to read zip entry: {e}")))?;
            std::fs::write(&outpath, &content)?;

            #[cfg(unix)]
            if let Some(mode) = file.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                let mut perms = std::fs::metadata(&outpath)?.permissions();
                perms.set_mode(mode);
                std::fs::set_permissions(&outpath, perms)?;
            }
        }
    }

    Ok(())
}

fn unpack_tar_gz(data: &[u8], dest: &Path) -> Result<()> {
    let cursor = Cursor::new(data);
    let decoder = GzDecoder::new(cursor);
    let mut archive = Archive::new(decoder);

    archive
        .unpack(dest)
        .map_err(|e| Error::extract_failed(format!("failed to extract tar: {e}")))
}

/// The downloaded bytes ARE the executable; set permissions and place
/// it under a fixed name.
fn place_binary(data: &[u8], binary_name: &str, dest: &Path) -> Result<()> {
    let binary_path = dest.join(binary_name);
    std::fs::write(&binary_path, data)
        .map_err(|e| Error::io(e, format!("writing {}", binary_path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&binary_path)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&binary_path, perms)?;
    }

    Ok(())
}
