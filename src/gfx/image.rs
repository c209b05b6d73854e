use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

/// Failure to turn an asset path into something drawable
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to upload {path:?}: {reason}")]
    Upload { path: PathBuf, reason: String },
    #[error("{failed} of {total} frames failed to load")]
    Incomplete { failed: usize, total: usize },
}

/// Decoded RGBA image, top row first
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl Image {
    /// Open an image file, guessing the format from the extension
    pub fn open(path: &Path) -> Result<Self, AssetError> {
        let image = image::open(path).map_err(|err| match err {
            image::ImageError::IoError(source) => AssetError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => AssetError::Decode {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let image = image.into_rgba8();
        let (width, height) = image.dimensions();

        Ok(Self {
            width: width as usize,
            height: height as usize,
            pixels: image.into_raw(),
        })
    }

    /// Decode every path in parallel, keeping the input order
    /// At most one decoder thread per available core runs at a time
    pub fn open_all(paths: &[PathBuf]) -> Vec<Result<Self, AssetError>> {
        let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        Self::open_batched(paths, workers)
    }

    fn open_batched(paths: &[PathBuf], workers: usize) -> Vec<Result<Self, AssetError>> {
        let mut images = Vec::with_capacity(paths.len());
        for batch in paths.chunks(workers.max(1)) {
            thread::scope(|scope| {
                let decoders: Vec<_> = batch
                    .iter()
                    .map(|path| {
                        let decoder = thread::Builder::new()
                            .name("image-decode".into())
                            .spawn_scoped(scope, move || Image::open(path));
                        (path, decoder)
                    })
                    .collect();

                for (path, decoder) in decoders {
                    let image = match decoder {
                        Ok(handle) => handle.join().unwrap_or_else(|_| {
                            Err(AssetError::Io {
                                path: path.clone(),
                                source: io::Error::new(io::ErrorKind::Other, "decoder panicked"),
                            })
                        }),
                        // Out of threads, decode on this one instead
                        Err(err) => {
                            log::debug!("Decoding {:?} inline: {}", path, err);
                            Image::open(path)
                        }
                    };
                    images.push(image);
                }
            });
        }
        images
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn png_decodes_to_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let image = Image::open(&path).unwrap();

        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.pixels.len(), 3 * 2 * 4);
        assert_eq!(&image.pixels[..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Image::open(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }), "{:?}", err);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = Image::open(&path).unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }), "{:?}", err);
    }

    #[test]
    fn open_all_keeps_order_and_failures() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (1..=3)
            .map(|i| dir.path().join(format!("frame_{}.png", i)))
            .collect();
        RgbaImage::from_pixel(1, 1, Rgba([1, 0, 0, 255]))
            .save(&paths[0])
            .unwrap();
        RgbaImage::from_pixel(2, 1, Rgba([3, 0, 0, 255]))
            .save(&paths[2])
            .unwrap();

        let images = Image::open_all(&paths);

        assert_eq!(images.len(), 3);
        assert_eq!(images[0].as_ref().unwrap().dimensions(), (1, 1));
        assert!(images[1].is_err());
        assert_eq!(images[2].as_ref().unwrap().dimensions(), (2, 1));
    }

    #[test]
    fn formats_without_a_decoder_are_decode_errors() {
        let dir = tempfile::tempdir().unwrap();
        // Only the JPEG and PNG decoders are built in
        for name in ["frame.pcx", "frame.bmp"] {
            let path = dir.path().join(name);
            std::fs::write(&path, [0x0a, 0x05, 0x01, 0x08]).unwrap();

            let err = Image::open(&path).unwrap_err();
            assert!(matches!(err, AssetError::Decode { .. }), "{}: {:?}", name, err);
        }
    }

    #[test]
    fn more_paths_than_workers_are_decoded_in_batches() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (1..=9)
            .map(|i| dir.path().join(format!("11zon_{}.png", i)))
            .collect();
        for (i, path) in paths.iter().enumerate().step_by(2) {
            RgbaImage::from_pixel(i as u32 + 1, 1, Rgba([0, 0, 0, 255]))
                .save(path)
                .unwrap();
        }

        let images = Image::open_batched(&paths, 2);

        assert_eq!(images.len(), paths.len());
        for (i, (image, path)) in images.iter().zip(&paths).enumerate() {
            match image {
                Ok(image) => {
                    assert_eq!(i % 2, 0);
                    assert_eq!(image.width, i + 1);
                }
                Err(AssetError::Io { path: failed, .. }) => {
                    assert_eq!(i % 2, 1);
                    assert_eq!(failed, path);
                }
                Err(err) => panic!("unexpected error {:?}", err),
            }
        }
    }

    #[test]
    fn thousands_of_missing_frames_do_not_exhaust_threads() {
        let paths: Vec<PathBuf> = (1..=4000)
            .map(|i| PathBuf::from(format!("/nonexistent/11zon_{}.jpeg", i)))
            .collect();

        let images = Image::open_all(&paths);

        assert_eq!(images.len(), 4000);
        assert!(images
            .iter()
            .all(|image| matches!(image, Err(AssetError::Io { .. }))));
    }
}
