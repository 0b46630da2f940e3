use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use anyhow::Context;
use async_trait::async_trait;
use tracing::info;

/// Final destination for synthesized audio.
#[async_trait]
pub trait AudioSink: Send + Sync {
    async fn play(&self, text: &str, audio: Vec<u8>) -> anyhow::Result<()>;
}

/// Stores every clip as `prompt-NNNN.mp3` inside a directory.
pub struct DirectorySink {
    dir: PathBuf,
    next_index: AtomicU64,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            next_index: AtomicU64::new(1),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl AudioSink for DirectorySink {
    async fn play(&self, text: &str, audio: Vec<u8>) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create audio dir '{}'", self.dir.display()))?;

        let index = self.next_index.fetch_add(1, Ordering::Relaxed);
        let path = self.dir.join(format!("prompt-{index:04}.mp3"));
        tokio::fs::write(&path, &audio)
            .await
            .with_context(|| format!("failed to write '{}'", path.display()))?;

        info!(
            path = %path.display(),
            size_bytes = audio.len(),
            text,
            "voice: prompt audio stored"
        );
        Ok(())
    }
}
