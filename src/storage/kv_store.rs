use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Result;
use fs4::tokio::AsyncFileExt;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};
use tracing::debug;

/// Keyed JSON documents on disk, one file per key. Readers take a shared
/// lock, writers an exclusive one, so a read never observes a half-written
/// document and a read-modify-write commits as a unit.
#[derive(Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    pub fn new(dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key);
        let mut file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        file.lock_shared()?;
        let result = Self::read_document(&mut file).await;
        file.unlock_async().await?;
        result
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path_for(key);
        let mut file = Self::open_writable(&path).await?;
        file.lock_exclusive()?;
        let result = Self::overwrite(&mut file, value).await;
        file.unlock_async().await?;
        result
    }

    /// Applies `apply` to the current document (default when absent) and
    /// writes the result back, all inside one exclusive-lock critical
    /// section. An error from `apply` leaves the document untouched.
    pub async fn update<T, F>(&self, key: &str, apply: F) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(T) -> Result<T>,
    {
        let path = self.path_for(key);
        let mut file = Self::open_writable(&path).await?;
        file.lock_exclusive()?;
        let result = Self::update_with_file(&mut file, apply).await;
        file.unlock_async().await?;
        result
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn open_writable(path: &Path) -> Result<File, std::io::Error> {
        File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .await
    }

    async fn read_document<T: DeserializeOwned>(file: &mut File) -> Result<Option<T>> {
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer).await?;
        // A concurrent update may have created the file without writing yet.
        if buffer.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&buffer)?))
    }

    async fn update_with_file<T, F>(file: &mut File, apply: F) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Default,
        F: FnOnce(T) -> Result<T>,
    {
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer).await?;
        let current: T = if buffer.is_empty() {
            T::default()
        } else {
            serde_json::from_slice(&buffer)?
        };

        let next = apply(current)?;
        Self::overwrite(file, &next).await
    }

    async fn overwrite<T: Serialize>(file: &mut File, value: &T) -> Result<()> {
        let buffer = serde_json::to_vec(value)?;
        debug!("Writing {} bytes", buffer.len());
        file.set_len(0).await?;
        file.seek(std::io::SeekFrom::Start(0)).await?;
        file.write_all(&buffer).await?;
        file.flush().await?;
        Ok(())
    }
}
