//! Encode/decode pipeline: parse → motif-encode → select mode → compress, and back.

use crate::codec;
use crate::motif::{self, EncodedTranscript, MotifDictionary};
use crate::reconstruct::{self, Reconstruction};
use crate::selector::{CompressionMode, ModeSelector};
use gp_core::config::GlampressConfig;
use gp_core::{fsio, Result};
use gp_parser::{ChatExportParser, ParseStats};
use std::fmt;
use std::path::{Path, PathBuf};

/// Compression report with statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    pub mode: CompressionMode,
    /// UTF-8 bytes of the input text.
    pub original_len: usize,
    pub compressed_len: usize,
    pub reduction_pct: f64,
    /// Messages kept after parsing (M).
    pub message_count: usize,
    /// Distinct motifs (D).
    pub motif_count: usize,
}

impl CompressionReport {
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 { return 1.0; }
        self.compressed_len as f64 / self.original_len as f64
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original size: {} bytes", self.original_len)?;
        writeln!(f, "Compressed size: {} bytes", self.compressed_len)?;
        write!(f, "Space saved after compression: {:.2}%", self.reduction_pct)
    }
}

/// What encoding would do with a transcript, without compressing.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub parse: ParseStats,
    pub groups: usize,
    pub message_count: usize,
    pub motif_count: usize,
    pub mode: CompressionMode,
}

impl Analysis {
    /// D / M, or 0 for an empty transcript.
    pub fn motif_ratio(&self) -> f64 {
        if self.message_count == 0 { return 0.0; }
        self.motif_count as f64 / self.message_count as f64
    }
}

#[derive(Debug, Clone)]
pub struct EncodeOutput {
    pub artifact: Vec<u8>,
    pub report: CompressionReport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFile {
    pub path: PathBuf,
    pub report: CompressionReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFile {
    pub path: PathBuf,
    pub mode: CompressionMode,
    pub lines: usize,
    pub unknown_symbols: usize,
}

struct Prepared {
    parse: ParseStats,
    groups: usize,
    encoded: EncodedTranscript,
    dictionary: MotifDictionary,
    mode: CompressionMode,
}

/// The main GLaMpress pipeline.
#[derive(Debug, Clone)]
pub struct GlampressPipeline {
    config: GlampressConfig,
    parser: ChatExportParser,
    selector: ModeSelector,
}

impl GlampressPipeline {
    pub fn new(config: GlampressConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            parser: ChatExportParser::from_config(&config.parser),
            selector: ModeSelector::from_config(&config.motif),
            config,
        })
    }

    pub fn config(&self) -> &GlampressConfig {
        &self.config
    }

    fn prepare(&self, text: &str) -> Prepared {
        let (transcript, parse) = self.parser.parse_with_stats(text);
        let groups = transcript.groups.len();
        let (encoded, dictionary) = motif::encode(transcript);
        let mode = self.selector.select(encoded.message_count(), dictionary.len());
        Prepared { parse, groups, encoded, dictionary, mode }
    }

    /// Parse and encode in memory and report the mode that would be chosen.
    pub fn analyze(&self, text: &str) -> Analysis {
        let p = self.prepare(text);
        Analysis {
            parse: p.parse,
            groups: p.groups,
            message_count: p.encoded.message_count(),
            motif_count: p.dictionary.len(),
            mode: p.mode,
        }
    }

    /// Encode transcript text into an artifact.
    pub fn encode(&self, text: &str) -> Result<EncodeOutput> {
        let p = self.prepare(text);
        let message_count = p.encoded.message_count();
        let motif_count = p.dictionary.len();

        let payload = match p.mode {
            CompressionMode::Plain => codec::plain_payload(text),
            CompressionMode::Motif => codec::motif_payload(&p.encoded, &p.dictionary)?,
        };
        let artifact = codec::compress(&payload, self.config.codec.preset)?;

        let original_len = text.len();
        let compressed_len = artifact.len();
        let reduction_pct = if original_len > 0 {
            (1.0 - compressed_len as f64 / original_len as f64) * 100.0
        } else {
            0.0
        };
        tracing::info!(
            mode = p.mode.tag(),
            messages = message_count,
            motifs = motif_count,
            original_len,
            compressed_len,
            "encoded transcript"
        );

        Ok(EncodeOutput {
            artifact,
            report: CompressionReport {
                mode: p.mode,
                original_len,
                compressed_len,
                reduction_pct,
                message_count,
                motif_count,
            },
        })
    }

    /// Decode an artifact. Fails only if it cannot be decompressed.
    pub fn decode(&self, artifact: &[u8]) -> Result<Reconstruction> {
        reconstruct::reconstruct(artifact)
    }

    /// `<dir>/glampress_<mode>_compressed.<ext>`.
    pub fn artifact_path(&self, dir: &Path, mode: CompressionMode) -> PathBuf {
        dir.join(format!("glampress_{}_compressed.{}", mode.tag(), self.config.codec.extension))
    }

    /// Output path next to `artifact`: `.<ext>` replaced by the mode suffix and `.txt`.
    pub fn restored_path(&self, artifact: &Path, mode: CompressionMode) -> PathBuf {
        let name = artifact
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = format!(".{}", self.config.codec.extension);
        let stem = name.strip_suffix(ext.as_str()).unwrap_or(&name);
        artifact.with_file_name(format!("{stem}{}.txt", mode.restored_suffix()))
    }

    /// Read a transcript, encode it and write the artifact.
    ///
    /// The artifact goes to `out_dir`, or next to the input when `None`.
    pub fn encode_file(&self, input: &Path, out_dir: Option<&Path>) -> Result<EncodedFile> {
        let text = fsio::read_text_lossy(input)?;
        let output = self.encode(&text)?;
        let dir = match out_dir {
            Some(d) => d.to_path_buf(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        let path = self.artifact_path(&dir, output.report.mode);
        fsio::write_bytes(&path, &output.artifact)?;
        tracing::info!(path = %path.display(), "wrote artifact");
        Ok(EncodedFile { path, report: output.report })
    }

    /// Read an artifact, decode it and write the restored text next to it.
    pub fn decode_file(&self, artifact: &Path) -> Result<DecodedFile> {
        let bytes = fsio::read_bytes(artifact)?;
        let reconstruction = self.decode(&bytes)?;
        let path = self.restored_path(artifact, reconstruction.mode);
        fsio::write_bytes(&path, reconstruction.text.as_bytes())?;
        tracing::info!(path = %path.display(), mode = reconstruction.mode.tag(), "wrote restored transcript");
        Ok(DecodedFile {
            path,
            mode: reconstruction.mode,
            lines: reconstruction.lines,
            unknown_symbols: reconstruction.unknown_symbols,
        })
    }
}

impl Default for GlampressPipeline {
    fn default() -> Self {
        let config = GlampressConfig::default();
        Self {
            parser: ChatExportParser::from_config(&config.parser),
            selector: ModeSelector::from_config(&config.motif),
            config,
        }
    }
}
