//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rasterlab::codec::ppm;
use rasterlab::PixelBuffer;
use tempfile::TempDir;

/// Scratch directory holding images and scripts for one test.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `buffer` as a P3 file and return its path.
    pub fn write_ppm(&self, name: &str, buffer: &PixelBuffer) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, ppm::encode(buffer)).expect("write ppm");
        path
    }

    /// Write a script, substituting `{dir}` with the workspace directory.
    pub fn write_script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.path(name);
        let body = body.replace("{dir}", &self.dir.path().display().to_string());
        std::fs::write(&path, body).expect("write script");
        path
    }

    pub fn read_ppm(&self, path: &Path) -> PixelBuffer {
        let text = std::fs::read_to_string(path).expect("read ppm");
        ppm::decode(&text).expect("decode ppm")
    }
}

/// 3x3 image with every channel away from the clamp limits.
pub fn koala() -> PixelBuffer {
    PixelBuffer::from_fn(3, 3, |y, x| {
        [
            (40 + 30 * x + 10 * y) as u8,
            (90 + 20 * y) as u8,
            (150 - 15 * x) as u8,
        ]
    })
}

/// 6x4 image with a bit more structure for spatial filters.
pub fn landscape() -> PixelBuffer {
    PixelBuffer::from_fn(6, 4, |y, x| {
        [
            ((x * 41 + y * 7) % 256) as u8,
            ((y * 63 + 12) % 256) as u8,
            ((x * y * 17 + 80) % 256) as u8,
        ]
    })
}
