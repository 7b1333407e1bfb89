//! The image drawn on the quad
//!
//! Images are decoded with `image`, optionally flipped so that row 0 is the
//! bottom of the picture (matching the quad's v = 0 at the bottom), and
//! uploaded with a full mip chain generated on the CPU.

use std::fmt;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Texture loading errors
#[derive(Debug)]
pub enum TextureError {
    /// The file could not be opened or decoded
    Decode(image::ImageError),
    /// The image exceeds the device's texture limit
    TooLarge { width: u32, height: u32, max: u32 },
    /// The image has a zero dimension
    Empty,
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Decode(err) => write!(f, "Error loading image: {}", err),
            TextureError::TooLarge { width, height, max } => write!(
                f,
                "Image is {}x{}, larger than the device limit of {}",
                width, height, max
            ),
            TextureError::Empty => write!(f, "Image has no pixels"),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(err: image::ImageError) -> Self {
        TextureError::Decode(err)
    }
}

/// Number of mip levels down to 1x1
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Build the mip chain for an image, level 0 first
pub fn build_mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(base.width(), base.height());
    let mut chain = Vec::with_capacity(levels as usize);
    chain.push(base);

    for _ in 1..levels {
        let Some(prev) = chain.last() else { break };
        let width = (prev.width() / 2).max(1);
        let height = (prev.height() / 2).max(1);
        let next = imageops::resize(prev, width, height, FilterType::Triangle);
        chain.push(next);
    }

    chain
}

/// Decode an image file to RGBA8, flipping it so row 0 is the bottom when
/// `flip_vertically` is set
pub fn decode<P: AsRef<Path>>(path: P, flip_vertically: bool) -> Result<RgbaImage, TextureError> {
    let mut rgba = image::open(path)?.into_rgba8();
    if flip_vertically {
        imageops::flip_vertical_in_place(&mut rgba);
    }
    Ok(rgba)
}

/// Procedural checkerboard used when the image cannot be loaded
pub fn checkerboard(size: u32, cells: u32) -> RgbaImage {
    let cell = (size / cells.max(1)).max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Rgba([255, 0, 255, 255])
        } else {
            Rgba([32, 32, 32, 255])
        }
    })
}

/// Sampled texture plus its sampler
pub struct QuadTexture {
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    size: (u32, u32),
}

impl QuadTexture {
    /// Load an image file
    pub fn from_path<P: AsRef<Path>>(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: P,
        flip_vertically: bool,
    ) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let rgba = decode(path, flip_vertically)?;
        let texture = Self::from_image(device, queue, rgba, path.to_string_lossy().as_ref())?;
        log::info!(
            "Loaded texture {} ({}x{})",
            path.display(),
            texture.size.0,
            texture.size.1
        );
        Ok(texture)
    }

    /// Upload a decoded image
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: RgbaImage,
        label: &str,
    ) -> Result<Self, TextureError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        let max = device.limits().max_texture_dimension_2d;
        if width > max || height > max {
            return Err(TextureError::TooLarge { width, height, max });
        }

        Ok(Self::upload(device, queue, image, label))
    }

    fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: RgbaImage, label: &str) -> Self {
        let (width, height) = image.dimensions();
        let chain = build_mip_chain(image);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: chain.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, mip) in chain.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                mip.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * mip.width()),
                    rows_per_image: Some(mip.height()),
                },
                wgpu::Extent3d {
                    width: mip.width(),
                    height: mip.height(),
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Quad Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            view,
            sampler,
            size: (width, height),
        }
    }

    /// Magenta/gray checkerboard
    pub fn fallback(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        // 64x64 is below every device limit
        Self::upload(device, queue, checkerboard(64, 8), "Fallback Texture")
    }

    /// Load `path`, or log the error and use the fallback
    pub fn load_or_fallback<P: AsRef<Path>>(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: P,
        flip_vertically: bool,
    ) -> Self {
        let path = path.as_ref();
        Self::from_path(device, queue, path, flip_vertically).unwrap_or_else(|e| {
            log::error!("{} ({}), using fallback texture", e, path.display());
            Self::fallback(device, queue)
        })
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}
