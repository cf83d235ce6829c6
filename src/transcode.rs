//! Image transcoding: decode, normalize, resize, encode WebP.
//!
//! One source file in, one compressed WebP out. Color is flattened to plain
//! 8-bit RGB first (alpha and palettes are gone for good after this), then the
//! image is optionally center-cropped and downscaled before encoding.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageReader, RgbImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("source not found: {0}")]
    SourceMissing(PathBuf),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Target geometry and quality for one output variant.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub width: u32,
    /// When set, the output is center-cropped to the `width / height` aspect
    /// and forced to exactly these dimensions
    pub height: Option<u32>,
    /// WebP quality factor, 0-100
    pub quality: f32,
}

impl Target {
    /// Downscale-only target: sources wider than `width` are resized down,
    /// narrower ones pass through at their native size.
    pub fn width_limit(width: u32, quality: f32) -> Self {
        Target {
            width,
            height: None,
            quality,
        }
    }

    /// Fixed-frame target: center crop to the aspect, then resize to exactly
    /// `width` x `height`.
    pub fn exact(width: u32, height: u32, quality: f32) -> Self {
        Target {
            width,
            height: Some(height),
            quality,
        }
    }
}

/// Transcode one image file to a WebP at `dest`.
///
/// Parent directories are created as needed and an existing destination is
/// overwritten. Returns the output dimensions.
pub fn transcode(src: &Path, dest: &Path, target: Target) -> Result<(u32, u32), TranscodeError> {
    if !src.exists() {
        return Err(TranscodeError::SourceMissing(src.to_path_buf()));
    }

    let reader = ImageReader::open(src)
        .map_err(|e| TranscodeError::Io {
            path: src.to_path_buf(),
            source: e,
        })?
        .with_guessed_format()
        .map_err(|e| TranscodeError::Io {
            path: src.to_path_buf(),
            source: e,
        })?;

    let decoded = reader.decode().map_err(|e| TranscodeError::Decode {
        path: src.to_path_buf(),
        source: e,
    })?;

    // RGBA / palette sources lose their alpha here, like it or not
    let mut img: RgbImage = decoded.to_rgb8();

    img = match target.height {
        Some(height) => {
            let (x, y, w, h) =
                center_crop_box(img.width(), img.height(), target.width, height);
            let cropped = imageops::crop_imm(&img, x, y, w, h).to_image();
            imageops::resize(&cropped, target.width, height, FilterType::Lanczos3)
        }
        None if img.width() > target.width => {
            let ratio = target.width as f32 / img.width() as f32;
            let new_height = (img.height() as f32 * ratio) as u32;
            imageops::resize(&img, target.width, new_height.max(1), FilterType::Lanczos3)
        }
        // Already narrow enough: never upscale
        None => img,
    };

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| TranscodeError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let encoded =
        webp::Encoder::from_rgb(img.as_raw(), img.width(), img.height()).encode(target.quality);
    fs::write(dest, &*encoded).map_err(|e| TranscodeError::Io {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok((img.width(), img.height()))
}

/// Centered crop box `(x, y, w, h)` matching the target aspect ratio.
/// The larger dimension keeps its center and loses its edges.
fn center_crop_box(width: u32, height: u32, target_w: u32, target_h: u32) -> (u32, u32, u32, u32) {
    let target_ratio = target_w as f32 / target_h as f32;
    let ratio = width as f32 / height as f32;

    if ratio > target_ratio {
        // too wide: trim the sides
        let new_width = ((height as f32 * target_ratio) as u32).min(width);
        ((width - new_width) / 2, 0, new_width, height)
    } else {
        // too tall: trim top and bottom
        let new_height = ((width as f32 / target_ratio) as u32).min(height);
        (0, (height - new_height) / 2, width, new_height)
    }
}
