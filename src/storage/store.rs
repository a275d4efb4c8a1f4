use rand::Rng;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Builds `video_<unix_seconds>_<4 digits>.mp4`. Two uploads in the same
/// second can collide when they draw the same suffix.
pub fn generate_filename<R: Rng + ?Sized>(rng: &mut R, unix_seconds: i64) -> String {
    format!(
        "video_{}_{}.mp4",
        unix_seconds,
        rng.random_range(1000..=9999)
    )
}

/// Flat directory of uploaded videos. Writes are not synchronized and an
/// existing file with the same name is overwritten.
#[derive(Clone, Debug)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    /// Opens `filename` for writing, creating the directory if it went
    /// missing since startup.
    pub async fn create(&self, filename: &str) -> std::io::Result<PendingUpload> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(filename);
        let file = File::create(&path).await?;
        Ok(PendingUpload {
            path,
            file,
            written: 0,
        })
    }
}

/// A file being filled chunk by chunk. Either `finish` or `discard` it.
#[derive(Debug)]
pub struct PendingUpload {
    path: PathBuf,
    file: File,
    written: u64,
}

impl PendingUpload {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> std::io::Result<()> {
        self.file.write_all(chunk).await?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub async fn finish(mut self) -> std::io::Result<PathBuf> {
        self.file.flush().await?;
        Ok(self.path)
    }

    /// Drops the partial file. Removal failures are logged, not returned.
    pub async fn discard(self) {
        let PendingUpload { path, file, .. } = self;
        drop(file);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("Failed to remove partial upload {}: {}", path.display(), e);
        }
    }
}
