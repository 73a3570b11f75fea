//! Loading of tagged text files

use crate::{
    progress::{ProgressConfig, ProgressReport, Work},
    Result,
};
use anyhow::Context;
use async_compression::tokio::bufread::GzipDecoder;
use std::path::Path;
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, AsyncReadExt, BufReader},
};

/// Read a whole tagged text file into memory
///
/// Files with a `.gz` extension are decompressed on the fly. Progress is
/// tracked in terms of bytes read from storage.
pub async fn read_tagged_text(path: &Path, report: &ProgressReport) -> Result<String> {
    let context = || format!("reading tagged text from {}", path.display());
    let file = File::open(path).await.with_context(context)?;
    let size = file.metadata().await.with_context(context)?.len();
    let progress = report.add(
        format!("Reading {}", path.display()),
        ProgressConfig::new(Work::Bytes(size)),
    );

    // Load raw bytes, tracking progress up to the initial file size
    let mut raw = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
    let mut remaining = size;
    let mut file = BufReader::new(file);
    loop {
        let chunk = file.fill_buf().await.with_context(context)?;
        if chunk.is_empty() {
            break;
        }
        raw.extend_from_slice(chunk);
        let len = chunk.len();
        file.consume(len);
        let step = remaining.min(len as u64);
        if step > 0 {
            remaining -= step;
            progress.make_progress(step);
        }
    }

    // Decompress if needed
    let bytes = if path.extension().is_some_and(|ext| ext == "gz") {
        let mut decompressed = Vec::new();
        GzipDecoder::new(&raw[..])
            .read_to_end(&mut decompressed)
            .await
            .with_context(|| format!("decompressing {}", path.display()))?;
        decompressed
    } else {
        raw
    };
    log::debug!("Loaded {} bytes of tagged text from {}", bytes.len(), path.display());
    String::from_utf8(bytes).with_context(|| format!("decoding {} as UTF-8", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_compression::tokio::write::GzipEncoder;
    use tokio::io::AsyncWriteExt;

    const TEXT: &str = "The/DT cat/NN sat/VBD ./.\n\nA/DT dog/NN ./.\n";

    #[tokio::test]
    async fn plain_and_compressed() {
        let dir = std::env::temp_dir().join(format!("tagrank-input-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let report = ProgressReport::new();

        let plain = dir.join("corpus.txt");
        tokio::fs::write(&plain, TEXT).await.unwrap();
        assert_eq!(read_tagged_text(&plain, &report).await.unwrap(), TEXT);

        let mut encoder = GzipEncoder::new(Vec::new());
        encoder.write_all(TEXT.as_bytes()).await.unwrap();
        encoder.shutdown().await.unwrap();
        let compressed = dir.join("corpus.txt.gz");
        tokio::fs::write(&compressed, encoder.into_inner()).await.unwrap();
        assert_eq!(read_tagged_text(&compressed, &report).await.unwrap(), TEXT);

        let empty = dir.join("empty.txt");
        tokio::fs::write(&empty, "").await.unwrap();
        assert_eq!(read_tagged_text(&empty, &report).await.unwrap(), "");

        let invalid = dir.join("invalid.txt");
        tokio::fs::write(&invalid, b"caf\xe9/NN").await.unwrap();
        assert!(read_tagged_text(&invalid, &report).await.is_err());

        assert!(read_tagged_text(&dir.join("missing.txt"), &report).await.is_err());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
