pub mod config;
pub mod error;
pub mod extractor;
pub mod grid;
pub mod mapping;
pub mod tool;

#[cfg(test)]
pub(crate) mod test_util {
    use std::path::{Path, PathBuf};

    use glam::UVec2;
    use image::{Rgba, RgbaImage};

    /// Fresh, empty directory for one test
    pub fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "upgrade-slicer-{}-{name}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("scratch dir created");
        return dir;
    }

    /// Sheet whose pixel at (x, y) is `[x, y, 0, 255]`
    pub fn write_gradient_sheet(path: &Path, dims: UVec2) {
        let image = RgbaImage::from_fn(dims.x, dims.y, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        image.save(path).expect("sheet saved");
    }

    /// Sorted file names in `dir`
    pub fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("dir readable")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        return names;
    }
}
