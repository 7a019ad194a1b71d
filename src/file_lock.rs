//! 数据文件旁的 `.lock` 文件锁
//!
//! 数据文件会被 rename 替换，锁不能加在数据文件本身上：
//! 等锁的进程持有的是旧 inode，拿到锁后会写进已被替换的文件。

use anyhow::Result;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// `calls.jsonl` -> `calls.jsonl.lock`
pub fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// 持有期间独占，drop 时释放
pub struct FileLock {
    file: File,
}

impl FileLock {
    /// 阻塞直到拿到 `path` 对应的独占锁
    pub fn exclusive(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(lock_path(path))?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_lock_path() {
        assert_eq!(
            lock_path(Path::new("/tmp/calls.jsonl")),
            PathBuf::from("/tmp/calls.jsonl.lock")
        );
    }

    #[test]
    fn test_second_lock_waits_for_first() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("data/calls.jsonl");

        let held = FileLock::exclusive(&path).unwrap();
        assert!(lock_path(&path).exists());

        let (tx, rx) = mpsc::channel();
        let waiter_path = path.clone();
        let waiter = thread::spawn(move || {
            let _lock = FileLock::exclusive(&waiter_path).unwrap();
            tx.send(()).unwrap();
        });

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        drop(held);
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
        waiter.join().unwrap();
    }
}
