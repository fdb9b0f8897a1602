//! Render pipeline management
//!
//! Pipelines are described with a [`PipelineConfig`] builder, registered by
//! name, and built from WGSL modules loaded into the [`PipelineManager`].

use std::collections::HashMap;
use std::sync::Arc;

use wgpu::{
    BindGroupLayout, BlendState, ColorTargetState, CompareFunction, Device, Face,
    PrimitiveTopology, RenderPipeline, ShaderModule, TextureFormat,
};

use crate::gfx::rendering::vertex::Vertex3D;

/// Description of one render pipeline
#[derive(Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub shader: String,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub primitive_topology: PrimitiveTopology,
    pub cull_mode: Option<Face>,
    pub depth_format: Option<TextureFormat>,
    pub depth_compare: CompareFunction,
    pub color_targets: Vec<Option<ColorTargetState>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Pipeline".to_string(),
            shader: "default".to_string(),
            bind_group_layouts: Vec::new(),
            primitive_topology: PrimitiveTopology::TriangleList,
            cull_mode: Some(Face::Back),
            depth_format: None,
            depth_compare: CompareFunction::Less,
            color_targets: Vec::new(),
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_shader(mut self, shader: &str) -> Self {
        self.shader = shader.to_string();
        self
    }

    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    pub fn with_cull_mode(mut self, cull_mode: Option<Face>) -> Self {
        self.cull_mode = cull_mode;
        self
    }

    pub fn with_depth_stencil(mut self, format: TextureFormat, compare: CompareFunction) -> Self {
        self.depth_format = Some(format);
        self.depth_compare = compare;
        self
    }

    pub fn with_color_targets(mut self, targets: Vec<Option<ColorTargetState>>) -> Self {
        self.color_targets = targets;
        self
    }

    /// Single colour target of `format` using straight alpha blending
    pub fn with_alpha_blended_target(self, format: TextureFormat) -> Self {
        self.with_color_targets(vec![Some(ColorTargetState {
            format,
            blend: Some(BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        })])
    }
}

/// Owns shader modules and the pipelines built from them
pub struct PipelineManager {
    device: Arc<Device>,
    pipelines: HashMap<String, RenderPipeline>,
    pipeline_configs: HashMap<String, PipelineConfig>,
    shader_modules: HashMap<String, ShaderModule>,
}

impl PipelineManager {
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            device,
            pipelines: HashMap::new(),
            pipeline_configs: HashMap::new(),
            shader_modules: HashMap::new(),
        }
    }

    /// Compiles WGSL `source` and stores it under `name`
    pub fn load_shader(&mut self, name: &str, source: &str) {
        let module = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(name),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });
        self.shader_modules.insert(name.to_string(), module);
        log::debug!("Loaded shader '{name}'");
    }

    /// Registers a pipeline to be built by [`create_all_pipelines`]
    ///
    /// [`create_all_pipelines`]: PipelineManager::create_all_pipelines
    pub fn register_pipeline(&mut self, name: &str, config: PipelineConfig) {
        self.pipelines.remove(name);
        self.pipeline_configs.insert(name.to_string(), config);
    }

    /// Builds every registered pipeline that is not built yet
    ///
    /// Pipelines whose shader was never loaded are logged and skipped.
    pub fn create_all_pipelines(&mut self) {
        let pending: Vec<String> = self
            .pipeline_configs
            .keys()
            .filter(|name| !self.pipelines.contains_key(*name))
            .cloned()
            .collect();

        for name in pending {
            match self.create_pipeline(&name) {
                Ok(pipeline) => {
                    self.pipelines.insert(name, pipeline);
                }
                Err(message) => log::error!("Failed to create pipeline '{name}': {message}"),
            }
        }
    }

    pub fn get_pipeline(&self, name: &str) -> Option<&RenderPipeline> {
        self.pipelines.get(name)
    }

    fn create_pipeline(&self, name: &str) -> Result<RenderPipeline, String> {
        let config = self
            .pipeline_configs
            .get(name)
            .ok_or_else(|| format!("pipeline '{name}' is not registered"))?;
        let shader = self
            .shader_modules
            .get(&config.shader)
            .ok_or_else(|| format!("shader '{}' is not loaded", config.shader))?;

        let layout_refs: Vec<&BindGroupLayout> = config.bind_group_layouts.iter().collect();
        let layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{} Layout", config.label)),
                bind_group_layouts: &layout_refs,
                push_constant_ranges: &[],
            });

        let depth_stencil = config.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: config.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex3D::desc()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &config.color_targets,
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: config.primitive_topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: config.cull_mode,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        log::debug!("Created pipeline '{name}'");
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PipelineConfig::default()
            .with_label("Scene")
            .with_shader("scene")
            .with_cull_mode(None)
            .with_depth_stencil(TextureFormat::Depth32Float, CompareFunction::Less)
            .with_alpha_blended_target(TextureFormat::Bgra8Unorm);

        assert_eq!(config.label, "Scene");
        assert_eq!(config.cull_mode, None);
        assert_eq!(config.depth_format, Some(TextureFormat::Depth32Float));
        assert_eq!(config.color_targets.len(), 1);
        let target = config.color_targets[0].as_ref().unwrap();
        assert_eq!(target.blend, Some(BlendState::ALPHA_BLENDING));
    }
}
