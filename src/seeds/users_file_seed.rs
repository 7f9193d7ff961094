use std::path::Path;
use tokio::fs;

/// Creates an empty user collection (`[]`) when the storage file does not exist yet.
/// An existing file is never touched, even if it is corrupt.
pub async fn seed_users_file(path: &Path) -> std::io::Result<bool> {
    if fs::try_exists(path).await? {
        log::info!("📋 Users file {} already present — skipping seed", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    fs::write(path, b"[]\n").await?;
    log::info!("   ✅ Initialised empty users file at {}", path.display());

    Ok(true)
}
