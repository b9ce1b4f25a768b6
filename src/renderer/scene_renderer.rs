use wgpu::util::DeviceExt;

use super::frame::{FrameMatrices, MeshUniform};
use super::shaders;
use crate::camera::CameraUniform;
use crate::error::OrbitViewError;
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::{DepthTexture, SampledTexture};
use crate::options::DisplayOptions;
use crate::scene::images::{load_cube_faces, load_rgba};
use crate::scene::mesh::{CUBE_VERTEX_COUNT, CUBE_VERTICES};
use crate::scene::{Scene, SceneKind};

/// Draws one scene: the cube mesh with the scene's shader and texture.
pub struct SceneRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    depth: DepthTexture,
    depth_size: (u32, u32),
    clear_color: wgpu::Color,
    // Held so the bound texture outlives the bind group.
    _texture: Option<SampledTexture>,
}

impl SceneRenderer {
    /// Load the scene's assets and build its pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`OrbitViewError::Texture`] if an image cannot be loaded or
    /// uploaded, and [`OrbitViewError::Shader`] if the shader or pipeline
    /// fails validation.
    pub async fn new(
        context: &RenderContext,
        scene: &Scene,
        display: &DisplayOptions,
    ) -> Result<Self, OrbitViewError> {
        let device = &context.device;
        let kind = scene.kind();
        let label = format!("{kind} Scene");

        let texture = Self::load_texture(context, scene)?;

        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::bytes_of(&CameraUniform::new()),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let mesh_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Uniform Buffer"),
                contents: bytemuck::bytes_of(&MeshUniform::for_scene(
                    scene, display,
                )),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Vertex Buffer"),
                contents: bytemuck::cast_slice(&CUBE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let (bind_group_layout, bind_group) = Self::create_bind_group(
            device,
            kind,
            &camera_buffer,
            &mesh_buffer,
            texture.as_ref(),
        );

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{label} Shader")),
                source: wgpu::ShaderSource::Wgsl(
                    shaders::shader_source(kind).into(),
                ),
            });
        let pipeline = pipeline_helpers::create_mesh_pipeline(
            device,
            &label,
            &shader,
            context.format(),
            &[&bind_group_layout],
        );
        if let Some(error) = device.pop_error_scope().await {
            log::error!("{label} pipeline failed validation");
            return Err(OrbitViewError::Shader {
                label,
                message: error.to_string(),
            });
        }

        let (width, height) = context.size();
        let [r, g, b] = display.clear_color;
        log::info!("{label} ready ({width}x{height})");

        Ok(Self {
            pipeline,
            bind_group,
            camera_buffer,
            vertex_buffer,
            depth: DepthTexture::new(device, width, height),
            depth_size: (width, height),
            clear_color: wgpu::Color {
                r: f64::from(r),
                g: f64::from(g),
                b: f64::from(b),
                a: 1.0,
            },
            _texture: texture,
        })
    }

    fn load_texture(
        context: &RenderContext,
        scene: &Scene,
    ) -> Result<Option<SampledTexture>, OrbitViewError> {
        let (device, queue) = (&context.device, &context.queue);
        let texture = match scene {
            Scene::Cube => None,
            Scene::Skybox { faces_dir } => Some(SampledTexture::cube(
                device,
                queue,
                faces_dir,
                &load_cube_faces(faces_dir)?,
            )?),
            Scene::Panorama { image } => Some(SampledTexture::from_rgba_2d(
                device,
                queue,
                image,
                &load_rgba(image)?,
            )?),
        };
        Ok(texture)
    }

    fn create_bind_group(
        device: &wgpu::Device,
        kind: SceneKind,
        camera_buffer: &wgpu::Buffer,
        mesh_buffer: &wgpu::Buffer,
        texture: Option<&SampledTexture>,
    ) -> (wgpu::BindGroupLayout, wgpu::BindGroup) {
        let mut layout_entries = vec![
            pipeline_helpers::uniform_buffer(0),
            pipeline_helpers::uniform_buffer(1),
        ];
        if let Some(dimension) = shaders::texture_dimension(kind) {
            layout_entries.push(pipeline_helpers::texture(2, dimension));
            layout_entries.push(pipeline_helpers::filtering_sampler(3));
        }
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{kind} Scene Bind Group Layout")),
                entries: &layout_entries,
            });

        let mut entries = vec![
            wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: mesh_buffer.as_entire_binding(),
            },
        ];
        if let Some(texture) = texture {
            entries.push(wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            });
            entries.push(wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            });
        }
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{kind} Scene Bind Group")),
            layout: &layout,
            entries: &entries,
        });
        (layout, bind_group)
    }

    /// Recreate the depth attachment for a new surface size. Ignores
    /// zero-sized dimensions.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.depth_size {
            return;
        }
        self.depth = DepthTexture::new(device, width, height);
        self.depth_size = (width, height);
    }

    /// Upload the frame's camera block and draw into the next surface
    /// texture.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if no surface texture could be
    /// acquired; the caller decides whether to reconfigure or give up.
    pub fn render(
        &mut self,
        context: &RenderContext,
        frame: &FrameMatrices,
    ) -> Result<(), wgpu::SurfaceError> {
        let (width, height) = context.size();
        self.resize(&context.device, width, height);

        let uniform = frame.uniform(width as f32 / height.max(1) as f32);
        context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&uniform),
        );

        let (output, view) = context.acquire_frame()?;

        let mut encoder = context.encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.clear_color),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.draw(0..CUBE_VERTEX_COUNT, 0..1);
        }
        context.submit(encoder);
        output.present();
        Ok(())
    }
}
