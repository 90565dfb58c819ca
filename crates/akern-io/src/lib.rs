use akern_core::{DegreeAgeFit, DegreeFit};
use akern_graph::GrowingGraph;
use arrow::array::{Array, Float64Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

pub mod cli;
pub use cli::*;

/// Run manifest for complete reproducibility
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub timestamp: String,
    pub variant: String, // "degree" | "degree-age"
    pub iterations: usize,
    pub age_bins: Option<usize>,
    pub input: String,
    pub vcount: usize,
    pub ecount: usize,
    pub max_in_degree: usize,
    pub logprob: Option<f64>,
    pub lognull: Option<f64>,
    pub commit_hash: Option<String>,
    pub rust_version: String,
}

impl RunManifest {
    pub fn new(
        variant: &str,
        iterations: usize,
        age_bins: Option<usize>,
        input: &str,
        graph: &GrowingGraph,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            variant: variant.to_string(),
            iterations,
            age_bins,
            input: input.to_string(),
            vcount: graph.vcount(),
            ecount: graph.ecount(),
            max_in_degree: graph.max_in_degree(),
            logprob: None,
            lognull: None,
            commit_hash: get_git_commit(),
            rust_version: get_rust_version(),
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let manifest = serde_json::from_str(&json)?;
        Ok(manifest)
    }
}

/// One per-class row of a fitted kernel table.
#[derive(Clone, Debug)]
pub struct KernelRow {
    pub degree: u32,
    pub age_bin: Option<u32>,
    pub kernel: f64,
    pub sd: Option<f64>,
    pub normfact: Option<f64>,
    pub cites: Option<f64>,
    pub expected: Option<f64>,
}

/// Flatten a degree fit into kernel-table rows, one per degree class.
pub fn degree_rows(fit: &DegreeFit) -> Vec<KernelRow> {
    (0..fit.kernel.len())
        .map(|k| KernelRow {
            degree: k as u32,
            age_bin: None,
            kernel: fit.kernel[k],
            sd: fit.sd.as_ref().map(|v| v[k]),
            normfact: fit.normfact.as_ref().map(|v| v[k]),
            cites: fit.cites.as_ref().map(|v| v[k]),
            expected: fit.expected.as_ref().map(|v| v[k]),
        })
        .collect()
}

/// Flatten a degree-age fit into kernel-table rows, one per (degree, bin)
/// class.
pub fn degree_age_rows(fit: &DegreeAgeFit) -> Vec<KernelRow> {
    let (classes, agebins) = fit.kernel.shape();
    let mut rows = Vec::with_capacity(classes * agebins);
    for degree in 0..classes {
        for bin in 0..agebins {
            let cell = (degree, bin);
            rows.push(KernelRow {
                degree: degree as u32,
                age_bin: Some(bin as u32),
                kernel: fit.kernel[cell],
                sd: fit.sd.as_ref().map(|m| m[cell]),
                normfact: fit.normfact.as_ref().map(|m| m[cell]),
                cites: fit.cites.as_ref().map(|m| m[cell]),
                expected: fit.expected.as_ref().map(|m| m[cell]),
            });
        }
    }
    rows
}

/// Parquet writer for kernel tables.
pub struct ParquetWriter {
    writer: ArrowWriter<File>,
    schema: Arc<Schema>,
}

impl ParquetWriter {
    pub fn new(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)?;
        let schema = Arc::new(Schema::new(vec![
            Field::new("run_id", DataType::Utf8, false),
            Field::new("degree", DataType::UInt32, false),
            Field::new("age_bin", DataType::UInt32, true),
            Field::new("kernel", DataType::Float64, false),
            Field::new("sd", DataType::Float64, true),
            Field::new("normfact", DataType::Float64, true),
            Field::new("cites", DataType::Float64, true),
            Field::new("expected", DataType::Float64, true),
        ]));
        let writer = ArrowWriter::try_new(file, schema.clone(), None)?;
        Ok(Self { writer, schema })
    }

    pub fn write_rows(&mut self, rows: &[KernelRow], run_id: &str) -> anyhow::Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let run_ids: Vec<&str> = rows.iter().map(|_| run_id).collect();
        let arrays: Vec<Arc<dyn Array>> = vec![
            Arc::new(StringArray::from(run_ids)),
            Arc::new(UInt32Array::from(
                rows.iter().map(|r| r.degree).collect::<Vec<_>>(),
            )),
            Arc::new(UInt32Array::from(
                rows.iter().map(|r| r.age_bin).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.kernel).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.sd).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.normfact).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.cites).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.expected).collect::<Vec<_>>(),
            )),
        ];

        let batch = RecordBatch::try_new(self.schema.clone(), arrays)?;
        self.writer.write(&batch)?;
        Ok(())
    }

    pub fn close(self) -> anyhow::Result<()> {
        self.writer.close()?;
        Ok(())
    }
}

/// Write a kernel table to Parquet with its manifest beside it.
pub fn write_fit_with_manifest(
    rows: &[KernelRow],
    manifest: &RunManifest,
    parquet_path: &Path,
    manifest_path: &Path,
) -> anyhow::Result<()> {
    let mut writer = ParquetWriter::new(parquet_path)?;
    writer.write_rows(rows, &manifest.run_id)?;
    writer.close()?;
    manifest.save_to_file(manifest_path)?;

    println!("Wrote {} kernel rows to {}", rows.len(), parquet_path.display());
    println!("Wrote manifest to {}", manifest_path.display());
    Ok(())
}

/// Read a growing network from a whitespace edge list.
///
/// Each line is `source target`; `#` starts a comment. A `# nodes: N`
/// comment pins the vertex count so trailing uncited, unciting nodes
/// survive a round trip; otherwise the count is the largest id seen + 1.
/// Edge order within a source is kept as arrival order.
pub fn read_edge_list(path: &Path) -> anyhow::Result<GrowingGraph> {
    let file = File::open(path)?;
    let mut edges: Vec<(usize, usize)> = Vec::new();
    let mut vcount = 0usize;

    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if let Some(comment) = trimmed.strip_prefix('#') {
            if let Some(count) = comment.trim().strip_prefix("nodes:") {
                vcount = vcount.max(count.trim().parse()?);
            }
            continue;
        }
        if trimmed.is_empty() {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (src, dst) = match (fields.next(), fields.next()) {
            (Some(s), Some(d)) => (s.parse::<usize>()?, d.parse::<usize>()?),
            _ => anyhow::bail!("line {}: expected `source target`", lineno + 1),
        };
        vcount = vcount.max(src + 1).max(dst + 1);
        edges.push((src, dst));
    }

    let mut citations = vec![Vec::new(); vcount];
    for (src, dst) in edges {
        citations[src].push(dst);
    }
    Ok(GrowingGraph::from_citations(citations)?)
}

/// Write a growing network as a whitespace edge list.
pub fn write_edge_list(graph: &GrowingGraph, path: &Path) -> anyhow::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "# nodes: {}", graph.vcount())?;
    for (src, dst) in graph.edges() {
        writeln!(out, "{src} {dst}")?;
    }
    out.flush()?;
    Ok(())
}

/// Get git commit hash for reproducibility
fn get_git_commit() -> Option<String> {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
}

fn get_rust_version() -> String {
    std::process::Command::new("rustc")
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use akern_models::{GrowthModel, PreferentialAttachment};

    #[test]
    fn test_edge_list_round_trip() {
        let graph = PreferentialAttachment::standard().generate(60, 9);
        let path = std::env::temp_dir().join("akern_edge_list_round_trip.txt");
        write_edge_list(&graph, &path).unwrap();
        let back = read_edge_list(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(graph, back);
    }

    #[test]
    fn test_read_rejects_forward_edges() {
        let path = std::env::temp_dir().join("akern_forward_edge.txt");
        std::fs::write(&path, "0 1\n").unwrap();
        let result = read_edge_list(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
