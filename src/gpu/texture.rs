//! Depth attachments and image-backed sampled textures.

use std::path::Path;

use image::RgbaImage;

use crate::error::OrbitViewError;
use crate::scene::images::CubeFaces;

/// Format of every depth attachment the renderer creates.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// A depth attachment sized to the surface.
pub struct DepthTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// Create a depth texture with the given dimensions (clamped to 1).
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Format of image-backed textures. Texels are sampled as stored, without
/// sRGB decoding, and the surface is non-sRGB too, so image bytes reach the
/// screen unchanged.
pub const COLOR_TEXTURE_FORMAT: wgpu::TextureFormat =
    wgpu::TextureFormat::Rgba8Unorm;

/// A color texture with a view and sampler, ready to bind.
pub struct SampledTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// View with the dimension the shader expects (2D or cube).
    pub view: wgpu::TextureView,
    /// Linear, clamp-to-edge sampler.
    pub sampler: wgpu::Sampler,
}

impl SampledTexture {
    /// Upload a single RGBA image, decoded from `source`, as a 2D texture.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitViewError::Texture`] naming `source` if the image
    /// exceeds the device's maximum 2D texture dimension.
    pub fn from_rgba_2d(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        source: &Path,
        image: &RgbaImage,
    ) -> Result<Self, OrbitViewError> {
        let label = "Panorama Texture";
        let (width, height) = image.dimensions();
        check_dimensions(
            device.limits().max_texture_dimension_2d,
            source,
            width,
            height,
        )?;

        let texture = create_color_texture(device, label, width, height, 1);
        write_layer(queue, &texture, image, 0);

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(label),
            dimension: Some(wgpu::TextureViewDimension::D2),
            ..Default::default()
        });
        let sampler = super::pipeline_helpers::linear_sampler(device, label);
        Ok(Self {
            texture,
            view,
            sampler,
        })
    }

    /// Upload six faces, loaded from the `source` directory, as one cube
    /// texture with the +X face in layer 0.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitViewError::Texture`] naming `source` if the face size
    /// exceeds the device's maximum 2D texture dimension.
    pub fn cube(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        source: &Path,
        faces: &CubeFaces,
    ) -> Result<Self, OrbitViewError> {
        let label = "Skybox Texture";
        check_dimensions(
            device.limits().max_texture_dimension_2d,
            source,
            faces.size,
            faces.size,
        )?;

        let texture =
            create_color_texture(device, label, faces.size, faces.size, 6);
        for (layer, face) in (0u32..).zip(&faces.faces) {
            write_layer(queue, &texture, face, layer);
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some(label),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let sampler = super::pipeline_helpers::linear_sampler(device, label);
        Ok(Self {
            texture,
            view,
            sampler,
        })
    }
}

fn check_dimensions(
    max: u32,
    source: &Path,
    width: u32,
    height: u32,
) -> Result<(), OrbitViewError> {
    if width == 0 || height == 0 || width > max || height > max {
        return Err(OrbitViewError::Texture {
            path: source.display().to_string(),
            message: format!(
                "{width}x{height} is outside the supported range 1..={max}"
            ),
        });
    }
    Ok(())
}

fn create_color_texture(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
    layers: u32,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: layers,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: COLOR_TEXTURE_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}

fn write_layer(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    image: &RgbaImage,
    layer: u32,
) {
    let (width, height) = image.dimensions();
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: 0,
                y: 0,
                z: layer,
            },
            aspect: wgpu::TextureAspect::All,
        },
        image.as_raw(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}
