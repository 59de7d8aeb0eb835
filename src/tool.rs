//! Image tools the extractor can drive.
//!
//! All geometry crosses this boundary as `(x, y)` / `(width, height)`.
//! Backends translate to whatever order their tool expects.

use std::{
    cell::RefCell,
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    sync::LazyLock,
};

use glam::UVec2;
use image::{DynamicImage, GenericImageView, ImageFormat};
use regex::Regex;

use crate::error::ToolError;

pub trait ImageTool {
    /// Pixel dimensions of the image at `path`
    fn measure(&self, path: &Path) -> Result<UVec2, ToolError>;

    /// Write the `size` region at `offset` of `input` to `output`.
    /// `input` is never modified.
    fn crop_and_save(
        &self,
        input: &Path,
        output: &Path,
        format: ImageFormat,
        size: UVec2,
        offset: UVec2,
    ) -> Result<(), ToolError>;
}

impl<T: ImageTool + ?Sized> ImageTool for Box<T> {
    fn measure(&self, path: &Path) -> Result<UVec2, ToolError> {
        (**self).measure(path)
    }

    fn crop_and_save(
        &self,
        input: &Path,
        output: &Path,
        format: ImageFormat,
        size: UVec2,
        offset: UVec2,
    ) -> Result<(), ToolError> {
        (**self).crop_and_save(input, output, format, size, offset)
    }
}

static PIXEL_WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pixelWidth: (\d+)").expect("Invalid regex pattern"));
static PIXEL_HEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pixelHeight: (\d+)").expect("Invalid regex pattern"));

fn report_field(report: &str, pattern: &Regex, field: &'static str) -> Result<u32, ToolError> {
    return pattern
        .captures(report)
        .and_then(|caps| caps[1].parse().ok())
        .ok_or(ToolError::MissingField(field));
}

/// Reads `pixelWidth: <n>` and `pixelHeight: <n>` out of a `sips -g` report
pub fn parse_dimensions(report: &str) -> Result<UVec2, ToolError> {
    let x = report_field(report, &PIXEL_WIDTH, "pixelWidth")?;
    let y = report_field(report, &PIXEL_HEIGHT, "pixelHeight")?;
    return Ok(UVec2 { x, y });
}

/// macOS `sips`, run once per call
#[derive(Debug, Clone)]
pub struct Sips {
    program: String,
}

impl Default for Sips {
    fn default() -> Self {
        return Self::with_program("sips");
    }
}

impl Sips {
    pub fn with_program(program: impl Into<String>) -> Self {
        return Self {
            program: program.into(),
        };
    }

    fn format_name(format: ImageFormat) -> Result<&'static str, ToolError> {
        match format {
            ImageFormat::Png => Ok("png"),
            ImageFormat::Jpeg => Ok("jpeg"),
            ImageFormat::Tiff => Ok("tiff"),
            ImageFormat::Gif => Ok("gif"),
            ImageFormat::Bmp => Ok("bmp"),
            other => Err(ToolError::UnsupportedFormat(other)),
        }
    }

    /// sips takes both the crop size and the crop offset vertical first
    pub fn crop_args(
        format: ImageFormat,
        input: &Path,
        output: &Path,
        size: UVec2,
        offset: UVec2,
    ) -> Result<Vec<OsString>, ToolError> {
        let format = Self::format_name(format)?;
        let args: Vec<OsString> = vec![
            "-s".into(),
            "format".into(),
            format.into(),
            "--cropToHeightWidth".into(),
            size.y.to_string().into(),
            size.x.to_string().into(),
            "--cropOffset".into(),
            offset.y.to_string().into(),
            offset.x.to_string().into(),
            input.into(),
            "--out".into(),
            output.into(),
        ];
        return Ok(args);
    }

    fn run(&self, command: &mut Command) -> Result<Vec<u8>, ToolError> {
        log::debug!("running {command:?}");
        let output = command.output().map_err(|source| ToolError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(ToolError::Exit {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        return Ok(output.stdout);
    }
}

impl ImageTool for Sips {
    fn measure(&self, path: &Path) -> Result<UVec2, ToolError> {
        let stdout = self.run(
            Command::new(&self.program)
                .args(["-g", "pixelWidth", "-g", "pixelHeight"])
                .arg(path),
        )?;
        return parse_dimensions(&String::from_utf8_lossy(&stdout));
    }

    fn crop_and_save(
        &self,
        input: &Path,
        output: &Path,
        format: ImageFormat,
        size: UVec2,
        offset: UVec2,
    ) -> Result<(), ToolError> {
        let args = Self::crop_args(format, input, output, size, offset)?;
        // sips reports every file it touches on stdout
        self.run(
            Command::new(&self.program)
                .args(args)
                .stdout(Stdio::null())
                .stderr(Stdio::piped()),
        )?;
        return Ok(());
    }
}

/// In process cropping with the `image` crate, for hosts without sips.
///
/// Keeps the last decoded sheet, so a batch decodes its sheet once rather
/// than once per tile.
#[derive(Debug, Default)]
pub struct Native {
    sheet: RefCell<Option<(PathBuf, DynamicImage)>>,
}

impl Native {
    fn with_sheet<R>(
        &self,
        input: &Path,
        f: impl FnOnce(&DynamicImage) -> Result<R, ToolError>,
    ) -> Result<R, ToolError> {
        let mut cached = self.sheet.borrow_mut();
        let sheet = match cached.take() {
            Some((path, sheet)) if path == input => sheet,
            _ => image::open(input)?,
        };
        let res = f(&sheet);
        *cached = Some((input.to_owned(), sheet));
        return res;
    }
}

/// `pierce.png` -> `pierce.png.part`, next to the final file
fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_owned();
    name.push(".part");
    return output.with_file_name(name);
}

impl ImageTool for Native {
    fn measure(&self, path: &Path) -> Result<UVec2, ToolError> {
        return Ok(image::image_dimensions(path)?.into());
    }

    fn crop_and_save(
        &self,
        input: &Path,
        output: &Path,
        format: ImageFormat,
        size: UVec2,
        offset: UVec2,
    ) -> Result<(), ToolError> {
        let tile = self.with_sheet(input, |sheet| {
            let dims: UVec2 = sheet.dimensions().into();
            let fits = |size: u32, offset: u32, dim: u32| {
                size > 0 && size <= dim && offset <= dim - size
            };
            if !fits(size.x, offset.x, dims.x) || !fits(size.y, offset.y, dims.y) {
                return Err(ToolError::OutOfBounds { size, offset, dims });
            }
            return Ok(sheet.crop_imm(offset.x, offset.y, size.x, size.y));
        })?;

        // the encoder creates its file before it can fail
        let partial = partial_path(output);
        if let Err(err) = tile.save_with_format(&partial, format) {
            let _ = std::fs::remove_file(&partial);
            return Err(err.into());
        }
        if let Err(source) = std::fs::rename(&partial, output) {
            let _ = std::fs::remove_file(&partial);
            return Err(ToolError::Write {
                path: output.to_owned(),
                source,
            });
        }
        return Ok(());
    }
}
