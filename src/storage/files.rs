//! Artifact writers.
//!
//! Every writer replaces the target file, so rerunning into the same folder
//! never accumulates stale content.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Writes `content` to `path`.
pub async fn write_text(path: &Path, content: &str) -> io::Result<PathBuf> {
    tokio::fs::write(path, content.as_bytes()).await?;
    Ok(path.to_path_buf())
}

/// Writes one item per line, each terminated by `\n`.
pub async fn write_lines(path: &Path, lines: &[String]) -> io::Result<PathBuf> {
    let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    write_text(path, &content).await
}

/// Writes `value` as pretty JSON (four-space indent, UTF-8, non-ASCII kept).
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<PathBuf> {
    let content = to_pretty_json(value)?;
    write_text(path, &content).await
}

pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> io::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer).map_err(io::Error::other)?;
    String::from_utf8(buf).map_err(io::Error::other)
}
