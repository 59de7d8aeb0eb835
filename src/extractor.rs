use std::path::Path;

use derive_more::IsVariant;
use glam::UVec2;
use image::ImageFormat;

use crate::{
    config::Config,
    error::ExtractError,
    grid::Grid,
    mapping::{Batch, MappingEntry},
    tool::ImageTool,
};

#[derive(Debug, IsVariant)]
pub enum BatchStatus {
    Sliced { dims: UVec2, tile_size: UVec2 },
    Skipped(ExtractError),
}

/// What happened to one sheet
#[derive(Debug)]
pub struct BatchReport {
    pub sheet: String,
    pub status: BatchStatus,
    pub created: Vec<&'static str>,
    pub failed: Vec<&'static str>,
}

impl BatchReport {
    fn skipped(sheet: &str, err: ExtractError) -> Self {
        log::error!("{err}");
        return Self {
            sheet: sheet.to_owned(),
            status: BatchStatus::Skipped(err),
            created: Vec::new(),
            failed: Vec::new(),
        };
    }
}

/// Cuts sheets into tiles through an [`ImageTool`]
pub struct Extractor<T: ImageTool> {
    tool: T,
    config: Config,
}

impl<T: ImageTool> Extractor<T> {
    pub fn new(tool: T, config: Config) -> Self {
        return Self { tool, config };
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Dimensions of the image at `path`, or `None` after logging why not
    pub fn measure(&self, path: &Path) -> Option<UVec2> {
        match self.tool.measure(path) {
            Ok(dims) => Some(dims),
            Err(err) => {
                log::error!("Error getting dims for {}: {err}", path.display());
                None
            }
        }
    }

    /// Writes one `<id>.png` per entry of `mapping`, in order.
    ///
    /// A missing or unreadable sheet skips the whole batch, a failed crop
    /// skips only that tile. Nothing here is fatal.
    pub fn extract_all(&self, sheet: &str, mapping: &[MappingEntry]) -> BatchReport {
        let input = self.config.input_dir.join(sheet);
        if !input.exists() {
            return BatchReport::skipped(sheet, ExtractError::Missing(input));
        }

        let Some(dims) = self.measure(&input) else {
            return BatchReport::skipped(sheet, ExtractError::Unmeasurable(sheet.to_owned()));
        };

        let tile_size = self.config.grid.tile_size(dims);
        log::info!(
            "Processing {sheet} ({}x{}) -> {}x{} tiles",
            dims.x,
            dims.y,
            tile_size.x,
            tile_size.y
        );

        let mut report = BatchReport {
            sheet: sheet.to_owned(),
            status: BatchStatus::Sliced { dims, tile_size },
            created: Vec::with_capacity(mapping.len()),
            failed: Vec::new(),
        };
        for entry in mapping {
            let out_name = entry.file_name();
            let output = self.config.output_dir.join(&out_name);
            let Some(offset) = Grid::offset(tile_size, entry.row, entry.col) else {
                log::error!(
                    "Failed to create {out_name}: offset of row {} col {} overflows",
                    entry.row,
                    entry.col
                );
                report.failed.push(entry.id);
                continue;
            };
            let res = self
                .tool
                .crop_and_save(&input, &output, ImageFormat::Png, tile_size, offset);
            match res {
                Ok(()) => {
                    log::info!("Created {out_name}");
                    report.created.push(entry.id);
                }
                Err(err) => {
                    log::error!("Failed to create {out_name}: {err}");
                    report.failed.push(entry.id);
                }
            }
        }
        return report;
    }

    /// Runs each batch to completion before starting the next
    pub fn extract_batches(&self, batches: &[Batch]) -> Vec<BatchReport> {
        return batches
            .iter()
            .map(|batch| {
                let report = self.extract_all(batch.sheet, batch.mapping);
                if report.status.is_sliced() {
                    log::info!(
                        "{}: {} created, {} failed",
                        report.sheet,
                        report.created.len(),
                        report.failed.len()
                    );
                }
                report
            })
            .collect();
    }
}
