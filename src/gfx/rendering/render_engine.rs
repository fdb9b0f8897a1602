//! WGPU-based rendering engine
//!
//! Owns the surface, device and every GPU resource a frame needs, and replays
//! a recorded [`DrawList`] into a single depth-tested, alpha-blended pass.

use std::sync::Arc;

use cgmath::Point3;
use wgpu::TextureFormat;

use crate::error::RenderError;
use crate::gfx::resources::{texture_resource::TextureResource, GpuTextures, TextureRegistry};
use crate::wgpu_utils::{binding_types, DynamicUniformBuffer, UniformBuffer};

use super::draw_list::{DrawList, GlobalUniform, ObjectUniform};
use super::mesh_buffers::{DrawMesh, MeshLibrary};
use super::pipeline_manager::{PipelineConfig, PipelineManager};

const SCENE_PIPELINE: &str = "Scene";
/// Per-draw records allocated up front; the buffer doubles when exceeded
const INITIAL_DRAW_CAPACITY: usize = 64;

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline_manager: PipelineManager,

    global_buffer: UniformBuffer<GlobalUniform>,
    global_bind_group: wgpu::BindGroup,
    object_buffer: DynamicUniformBuffer<ObjectUniform>,
    object_layout: wgpu::BindGroupLayout,
    object_bind_group: wgpu::BindGroup,
    object_records: Vec<ObjectUniform>,

    textures: GpuTextures,
    meshes: MeshLibrary,
}

impl RenderEngine {
    /// Creates a render engine drawing to `window`
    ///
    /// Uploads the primitive mesh library and builds the scene pipeline.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .unwrap_or(TextureFormat::Bgra8Unorm);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync),
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Global Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: binding_types::uniform(),
                count: None,
            }],
        });
        let global_buffer = UniformBuffer::<GlobalUniform>::new(&device);
        let global_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &global_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_buffer.binding_resource(),
            }],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: binding_types::uniform_dynamic(std::mem::size_of::<ObjectUniform>() as u64),
                count: None,
            }],
        });
        let object_buffer = DynamicUniformBuffer::<ObjectUniform>::new(&device, INITIAL_DRAW_CAPACITY);
        let object_bind_group = create_object_bind_group(&device, &object_layout, &object_buffer);

        let textures = GpuTextures::new(&device, &queue);
        let meshes = MeshLibrary::new(&device);

        let device_handle: Arc<wgpu::Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("scene", include_str!("scene.wgsl"));
        // Some parts are seen from both sides, so nothing is culled
        pipeline_manager.register_pipeline(
            SCENE_PIPELINE,
            PipelineConfig::default()
                .with_label("Scene")
                .with_shader("scene")
                .with_cull_mode(None)
                .with_depth_stencil(TextureResource::DEPTH_FORMAT, wgpu::CompareFunction::Less)
                .with_alpha_blended_target(format)
                .with_bind_group_layouts(vec![
                    global_layout,
                    object_layout.clone(),
                    textures.layout().clone(),
                ]),
        );
        pipeline_manager.create_all_pipelines();

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            pipeline_manager,
            global_buffer,
            global_bind_group,
            object_buffer,
            object_layout,
            object_bind_group,
            object_records: Vec::new(),
            textures,
            meshes,
        })
    }

    /// Uploads textures registered since the last call
    ///
    /// The registry's copy of each uploaded image is freed afterwards.
    pub fn sync_textures(&mut self, registry: &mut TextureRegistry) {
        self.textures.sync(&self.device, &self.queue, registry);
        registry.discard_pixels(self.textures.len());
    }

    /// Frees the GPU copies of every registered texture
    pub fn release_textures(&mut self) {
        self.textures.release();
    }

    /// Renders one frame of `draws` as seen from `eye`
    ///
    /// Opaque draws are submitted in recorded order, translucent ones after
    /// them from farthest to nearest.
    pub fn render_frame(
        &mut self,
        draws: &DrawList,
        global: GlobalUniform,
        eye: Point3<f32>,
        clear_color: wgpu::Color,
    ) -> Result<(), wgpu::SurfaceError> {
        let ordered = draws.ordered(eye);

        self.global_buffer.update_content(&self.queue, global);

        self.object_records.clear();
        self.object_records
            .extend(ordered.iter().map(|command| command.object));
        if self
            .object_buffer
            .ensure_capacity(&self.device, self.object_records.len())
        {
            self.object_bind_group =
                create_object_bind_group(&self.device, &self.object_layout, &self.object_buffer);
        }
        self.object_buffer.write(&self.queue, &self.object_records);

        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(pipeline) = self.pipeline_manager.get_pipeline(SCENE_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &self.global_bind_group, &[]);

                for (index, command) in ordered.iter().enumerate() {
                    let Some(mesh) = self.meshes.get(command.mesh.kind()) else {
                        log::debug!("Skipping '{}': mesh not uploaded", command.label);
                        continue;
                    };
                    render_pass.set_bind_group(
                        1,
                        &self.object_bind_group,
                        &[self.object_buffer.offset(index)],
                    );
                    render_pass.set_bind_group(2, self.textures.bind_group(command.texture_slot), &[]);
                    render_pass.draw_mesh_parts(mesh, &command.mesh);
                }
            } else {
                log::error!("Scene pipeline is missing; nothing drawn");
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Reconfigures the surface and depth buffer for a new window size
    ///
    /// Zero-sized windows (minimised) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Reconfigures the surface at its current size
    pub fn reconfigure(&mut self) {
        self.resize(self.config.width, self.config.height);
    }
}

/// Presentation mode for the requested vsync setting
///
/// Both modes fall back to a supported one on every backend.
pub fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

fn create_object_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &DynamicUniformBuffer<ObjectUniform>,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Object Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.binding_resource(),
        }],
    })
}
