// Copyright 2024-2026 devicefit Contributors
// SPDX-License-Identifier: Apache-2.0

//! Probes backed by the host operating system.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sysinfo::System;

use super::DeviceProbe;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Reads memory with sysinfo and free disk space with `statvfs`.
///
/// Local serving is derived from the configured origin, since a native host
/// has no page location to inspect.
#[derive(Debug, Clone)]
pub struct NativeProbe {
    storage_dir: PathBuf,
    origin: Option<String>,
    gpu_api: bool,
}

impl NativeProbe {
    /// `storage_dir` is where model weights and history live; free space is
    /// measured on its filesystem.
    pub fn new(storage_dir: impl Into<PathBuf>, origin: Option<String>, gpu_api: bool) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            origin,
            gpu_api,
        }
    }
}

#[async_trait]
impl DeviceProbe for NativeProbe {
    fn estimate_system_memory_gb(&self) -> f64 {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.total_memory() as f64 / BYTES_PER_GB
    }

    async fn estimate_available_storage_gb(&self) -> f64 {
        let dir = self.storage_dir.clone();
        match tokio::task::spawn_blocking(move || free_space_bytes(&dir)).await {
            Ok(Some(bytes)) => bytes as f64 / BYTES_PER_GB,
            Ok(None) => 0.0,
            Err(e) => {
                tracing::warn!(error = %e, "storage probe task failed");
                0.0
            }
        }
    }

    fn is_serving_locally(&self) -> bool {
        self.origin.as_deref().is_some_and(is_local_origin)
    }

    fn has_gpu_api(&self) -> bool {
        self.gpu_api
    }
}

/// True for `localhost`, loopback addresses, and `*.localhost`, with or
/// without scheme, port, or path.
pub fn is_local_origin(origin: &str) -> bool {
    let without_scheme = origin.split_once("://").map_or(origin, |(_, rest)| rest);
    let authority = without_scheme.split('/').next().unwrap_or_default();
    let host = if let Some(bracketed) = authority.strip_prefix('[') {
        bracketed.split(']').next().unwrap_or_default()
    } else {
        authority.split(':').next().unwrap_or_default()
    };
    let host = host.to_ascii_lowercase();
    host == "localhost"
        || host.ends_with(".localhost")
        || host == "::1"
        || host.starts_with("127.")
}

/// Free bytes on the filesystem holding `dir`, walking up to the nearest
/// existing ancestor.
#[cfg(unix)]
fn free_space_bytes(dir: &Path) -> Option<u64> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let existing = dir.ancestors().find(|p| p.exists())?;
    let c_path = CString::new(existing.as_os_str().as_bytes()).ok()?;
    // SAFETY: statvfs is a plain C struct of integers; all-zero is a valid value.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    // SAFETY: c_path is NUL-terminated and stat is a valid out-pointer.
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        tracing::debug!(path = %existing.display(), "statvfs failed");
        return None;
    }
    Some(stat.f_bavail as u64 * stat.f_frsize as u64)
}

#[cfg(not(unix))]
fn free_space_bytes(_dir: &Path) -> Option<u64> {
    None
}
