//! Parquet I/O for graph persistence
//!
//! # Format
//!
//! Graphs are stored as two Parquet files:
//! - `{path}_edges.parquet`: (source, target, color), one row per edge line
//! - `{path}_meta.parquet`: one row (`num_vertices`, `num_colors`, `symmetric`)
//!
//! A symmetric graph stores each live undirected edge once and is rebuilt in
//! both directions. Any other graph stores every live `(v, neighbor)` pair
//! and is rebuilt without symmetrization, so one-sided adjacency and
//! self-loops survive the round trip.
//!
//! Only live edges are written, so pending tombstones and reconstructed
//! removals are both dropped from the persisted graph.

use super::{Color, ColoredCsr, LoadOptions, NodeId};
use anyhow::{bail, Context, Result};
use arrow::array::{BooleanArray, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

impl ColoredCsr {
    /// Write graph to Parquet files
    ///
    /// Creates two files:
    /// - `{path}_edges.parquet`: Edge list (source, target, color)
    /// - `{path}_meta.parquet`: Dimensions and symmetry flag
    ///
    /// # Errors
    ///
    /// Returns error if file I/O fails or Arrow conversion fails
    #[allow(clippy::unused_async)] // Async API for future I/O operations
    pub async fn write_parquet<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let base_path = path.as_ref();

        self.write_edges_parquet(base_path)?;
        self.write_meta_parquet(base_path)?;

        Ok(())
    }

    /// Read graph from Parquet files
    ///
    /// # Errors
    ///
    /// Returns error if files don't exist, Arrow conversion fails, or the
    /// stored edges do not fit the stored dimensions
    #[allow(clippy::unused_async)] // Async API for future I/O operations
    pub async fn read_parquet<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref();

        let (num_vertices, num_colors, symmetric) = Self::read_meta_parquet(base_path)?;
        let edges = Self::read_edges_parquet(base_path)?;

        let options = LoadOptions::new().with_symmetrize(symmetric);
        Self::from_edges_with(num_vertices, num_colors, &edges, &options)
            .context("Stored edges do not match stored dimensions")
    }

    fn write_edges_parquet(&self, base_path: &Path) -> Result<()> {
        let edges_path = format!("{}_edges.parquet", base_path.display());

        let mut sources = Vec::new();
        let mut targets = Vec::new();
        let mut colors = Vec::new();

        for color in self.colors() {
            let pairs = if self.is_symmetric() {
                self.undirected_edges(color)?
            } else {
                self.export_edges(color)?
            };
            for (src, dst) in pairs {
                sources.push(src.0);
                targets.push(dst.0);
                colors.push(color.0);
            }
        }

        let schema = Arc::new(Schema::new(vec![
            Field::new("source", DataType::UInt32, false),
            Field::new("target", DataType::UInt32, false),
            Field::new("color", DataType::UInt32, false),
        ]));

        let source_array = Arc::new(UInt32Array::from(sources));
        let target_array = Arc::new(UInt32Array::from(targets));
        let color_array = Arc::new(UInt32Array::from(colors));

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![source_array, target_array, color_array],
        )
        .context("Failed to create RecordBatch")?;

        write_batch(&edges_path, schema, &batch)
    }

    fn write_meta_parquet(&self, base_path: &Path) -> Result<()> {
        let meta_path = format!("{}_meta.parquet", base_path.display());

        let schema = Arc::new(Schema::new(vec![
            Field::new("num_vertices", DataType::UInt64, false),
            Field::new("num_colors", DataType::UInt64, false),
            Field::new("symmetric", DataType::Boolean, false),
        ]));

        let vertices_array = Arc::new(UInt64Array::from(vec![self.num_vertices() as u64]));
        let colors_array = Arc::new(UInt64Array::from(vec![self.num_colors() as u64]));
        let symmetric_array = Arc::new(BooleanArray::from(vec![self.is_symmetric()]));

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![vertices_array, colors_array, symmetric_array],
        )
        .context("Failed to create meta RecordBatch")?;

        write_batch(&meta_path, schema, &batch)
    }

    fn read_edges_parquet(base_path: &Path) -> Result<Vec<(NodeId, NodeId, Color)>> {
        let edges_path = format!("{}_edges.parquet", base_path.display());

        let file =
            File::open(&edges_path).with_context(|| format!("Failed to open {edges_path}"))?;

        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

        let mut edges = Vec::new();

        for batch_result in reader {
            let batch: RecordBatch = batch_result?;

            let sources = batch
                .column(0)
                .as_any()
                .downcast_ref::<UInt32Array>()
                .context("Invalid source column type")?;

            let targets = batch
                .column(1)
                .as_any()
                .downcast_ref::<UInt32Array>()
                .context("Invalid target column type")?;

            let colors = batch
                .column(2)
                .as_any()
                .downcast_ref::<UInt32Array>()
                .context("Invalid color column type")?;

            for i in 0..batch.num_rows() {
                edges.push((
                    NodeId(sources.value(i)),
                    NodeId(targets.value(i)),
                    Color(colors.value(i)),
                ));
            }
        }

        Ok(edges)
    }

    fn read_meta_parquet(base_path: &Path) -> Result<(usize, usize, bool)> {
        let meta_path = format!("{}_meta.parquet", base_path.display());

        let file =
            File::open(&meta_path).with_context(|| format!("Failed to open {meta_path}"))?;

        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

        for batch_result in reader {
            let batch: RecordBatch = batch_result?;
            if batch.num_rows() == 0 {
                continue;
            }

            let vertices = batch
                .column(0)
                .as_any()
                .downcast_ref::<UInt64Array>()
                .context("Invalid num_vertices column type")?;

            let colors = batch
                .column(1)
                .as_any()
                .downcast_ref::<UInt64Array>()
                .context("Invalid num_colors column type")?;

            let symmetric = batch
                .column(2)
                .as_any()
                .downcast_ref::<BooleanArray>()
                .context("Invalid symmetric column type")?;

            let num_vertices = usize::try_from(vertices.value(0))?;
            let num_colors = usize::try_from(colors.value(0))?;
            return Ok((num_vertices, num_colors, symmetric.value(0)));
        }

        bail!("Empty meta file {meta_path}")
    }
}

fn write_batch(path: &str, schema: Arc<Schema>, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {path}"))?;

    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::ZSTD(
            parquet::basic::ZstdLevel::try_new(3)?,
        ))
        .build();

    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_parquet_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test_graph");

        let edges = [
            (NodeId(0), NodeId(1), Color(0)),
            (NodeId(1), NodeId(2), Color(0)),
            (NodeId(2), NodeId(0), Color(1)),
            (NodeId(3), NodeId(3), Color(1)),
        ];
        let graph = ColoredCsr::from_edges(5, 2, &edges).unwrap();

        graph.write_parquet(&path).await.unwrap();
        let loaded = ColoredCsr::read_parquet(&path).await.unwrap();

        assert_eq!(loaded.num_vertices(), 5);
        assert_eq!(loaded.num_colors(), 2);
        assert_eq!(loaded.num_edges(), 4);
        for color in graph.colors() {
            assert_eq!(
                loaded.csr_components(color).unwrap(),
                graph.csr_components(color).unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_parquet_drops_removed_edges() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("removed");

        let edges = [
            (NodeId(0), NodeId(1), Color(0)),
            (NodeId(1), NodeId(2), Color(0)),
        ];
        let mut graph = ColoredCsr::from_edges(3, 1, &edges).unwrap();
        graph.remove_edge(NodeId(0), NodeId(1), Color(0)).unwrap();
        graph.reconstruct(Color(0)).unwrap();

        graph.write_parquet(&path).await.unwrap();
        let loaded = ColoredCsr::read_parquet(&path).await.unwrap();

        assert_eq!(loaded.num_edges(), 1);
        assert_eq!(loaded.neighbors(NodeId(1), Color(0)).unwrap(), &[2]);
        assert_eq!(loaded.degree(NodeId(0), Color(0)).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_parquet_roundtrip_unsymmetrized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("directed");

        // Self-loop stored once, 0 -> 1 without its reverse
        let edges = [
            (NodeId(0), NodeId(0), Color(0)),
            (NodeId(0), NodeId(1), Color(0)),
        ];
        let options = LoadOptions::new().with_symmetrize(false);
        let graph = ColoredCsr::from_edges_with(2, 1, &edges, &options).unwrap();

        graph.write_parquet(&path).await.unwrap();
        let loaded = ColoredCsr::read_parquet(&path).await.unwrap();

        assert!(!loaded.is_symmetric());
        assert_eq!(loaded.neighbors(NodeId(0), Color(0)).unwrap(), &[0, 1]);
        assert_eq!(loaded.neighbors(NodeId(1), Color(0)).unwrap(), &[] as &[u32]);
        assert_eq!(loaded, graph);
    }

    #[tokio::test]
    async fn test_empty_graph_parquet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty_graph");

        let graph = ColoredCsr::from_edges(0, 1, &[]).unwrap();
        graph.write_parquet(&path).await.unwrap();

        let loaded = ColoredCsr::read_parquet(&path).await.unwrap();
        assert_eq!(loaded.num_vertices(), 0);
        assert_eq!(loaded.num_edges(), 0);
    }
}
