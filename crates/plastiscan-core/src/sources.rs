use std::path::{Path, PathBuf};

use ndarray::Array3;
use tracing::debug;

use crate::capture::FrameSource;
use crate::error::{Result, ScanError};
use crate::frame::Frame;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "tiff"];

/// Frame source backed by a directory of still images, served in sorted
/// filename order. Stands in for a live camera during offline sessions and
/// tests.
pub struct ImageFolderSource {
    dir: PathBuf,
    files: Vec<PathBuf>,
    next: usize,
    /// Serve the file list repeatedly instead of ending the stream.
    pub loop_frames: bool,
}

impl ImageFolderSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: Vec::new(),
            next: 0,
            loop_frames: false,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.files.len()
    }
}

impl FrameSource for ImageFolderSource {
    fn open(&mut self) -> Result<()> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.dir)
            .map_err(|e| {
                ScanError::DeviceUnavailable(format!("cannot open {}: {e}", self.dir.display()))
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();

        if files.is_empty() {
            return Err(ScanError::DeviceUnavailable(format!(
                "no image files in {}",
                self.dir.display()
            )));
        }

        debug!(frames = files.len(), dir = %self.dir.display(), "Folder source opened");
        self.files = files;
        self.next = 0;
        Ok(())
    }

    fn read(&mut self) -> Result<Option<Frame>> {
        if self.next >= self.files.len() {
            if self.loop_frames && !self.files.is_empty() {
                self.next = 0;
            } else {
                return Ok(None);
            }
        }
        let path = &self.files[self.next];
        self.next += 1;
        load_frame(path).map(Some)
    }

    fn release(&mut self) {
        self.files.clear();
        self.next = 0;
    }
}

/// Decode one image file into an RGB [`Frame`].
pub fn load_frame(path: &Path) -> Result<Frame> {
    let rgb = image::open(path)
        .map_err(|e| ScanError::FrameRead(format!("{}: {e}", path.display())))?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    let data = Array3::from_shape_vec((height as usize, width as usize, 3), rgb.into_raw())
        .map_err(|e| ScanError::FrameRead(format!("{}: {e}", path.display())))?;
    Ok(Frame::new(data))
}
