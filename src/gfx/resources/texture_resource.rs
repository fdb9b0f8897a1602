//! Texture resource management for wgpu
//!
//! Provides utilities for creating GPU textures, views and samplers, the depth
//! buffer, and the per-slot bind groups used by textured draws.

use super::texture_registry::{TextureRegistry, TextureSlot};

/// GPU texture resource containing texture, view, and sampler
///
/// The wgpu texture is destroyed when the last clone is dropped.
#[derive(Clone)]
pub struct TextureResource {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl TextureResource {
    /// Standard depth buffer format used throughout the renderer
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Creates a depth texture matching the surface configuration
    pub fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[Self::DEPTH_FORMAT],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            lod_min_clamp: 0.0,
            lod_max_clamp: 100.0,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Creates a 2D texture from raw RGBA data with configurable filtering
    ///
    /// The sampler repeats in both directions so UV scales above 1 tile the
    /// image.
    ///
    /// # Arguments
    /// * `data` - Raw RGBA8 pixel data (4 bytes per pixel)
    /// * `filter_mode` - Texture filtering mode (Nearest for sharp, Linear for smooth)
    pub fn create_from_rgba_data_with_filter(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
        width: u32,
        height: u32,
        label: &str,
        filter_mode: wgpu::FilterMode,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(&format!("{} Sampler", label)),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: filter_mode,
            min_filter: filter_mode,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// 1x1 white texture bound by untextured draws
    pub fn create_placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::create_from_rgba_data_with_filter(
            device,
            queue,
            &[255, 255, 255, 255],
            1,
            1,
            "Placeholder Texture",
            wgpu::FilterMode::Nearest,
        )
    }
}

/// Texture and sampler layout shared by every slot's bind group
pub fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Texture Bind Group Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: crate::wgpu_utils::binding_types::texture_2d(),
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: crate::wgpu_utils::binding_types::sampler(
                    wgpu::SamplerBindingType::Filtering,
                ),
                count: None,
            },
        ],
    })
}

/// GPU copies of every registered texture, one bind group per slot
pub struct GpuTextures {
    layout: wgpu::BindGroupLayout,
    placeholder: (TextureResource, wgpu::BindGroup),
    slots: Vec<(TextureResource, wgpu::BindGroup)>,
}

impl GpuTextures {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let layout = texture_bind_group_layout(device);
        let placeholder_texture = TextureResource::create_placeholder(device, queue);
        let placeholder_group =
            Self::create_bind_group(device, &layout, &placeholder_texture, "Placeholder");

        Self {
            layout,
            placeholder: (placeholder_texture, placeholder_group),
            slots: Vec::new(),
        }
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        texture: &TextureResource,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    }

    /// Uploads registry entries that do not have a GPU copy yet
    ///
    /// Slots are append-only, so only the tail past the uploaded count is new.
    pub fn sync(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, registry: &TextureRegistry) {
        let max_dimension = device.limits().max_texture_dimension_2d;
        for entry in registry.entries().iter().skip(self.slots.len()) {
            if entry.image.width > max_dimension || entry.image.height > max_dimension {
                log::warn!(
                    "Texture '{}' is {}x{}, larger than the device limit of {max_dimension}; using placeholder",
                    entry.tag,
                    entry.image.width,
                    entry.image.height
                );
                let texture = self.placeholder.0.clone();
                let bind_group = Self::create_bind_group(device, &self.layout, &texture, &entry.tag);
                self.slots.push((texture, bind_group));
                continue;
            }
            let texture = TextureResource::create_from_rgba_data_with_filter(
                device,
                queue,
                &entry.image.rgba,
                entry.image.width,
                entry.image.height,
                &entry.tag,
                wgpu::FilterMode::Linear,
            );
            let bind_group = Self::create_bind_group(device, &self.layout, &texture, &entry.tag);
            log::debug!("Uploaded texture '{}' to slot {}", entry.tag, entry.slot.0);
            self.slots.push((texture, bind_group));
        }
    }

    /// Drops every slot's texture, releasing its GPU memory
    pub fn release(&mut self) {
        if !self.slots.is_empty() {
            log::info!("Releasing {} textures", self.slots.len());
        }
        self.slots.clear();
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind group for `slot`, or the placeholder for untextured draws
    pub fn bind_group(&self, slot: Option<TextureSlot>) -> &wgpu::BindGroup {
        slot.and_then(|slot| self.slots.get(slot.index()))
            .map(|(_, group)| group)
            .unwrap_or(&self.placeholder.1)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
