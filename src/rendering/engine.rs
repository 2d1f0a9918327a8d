use crate::error::{CubefallError, CubefallResult};
use crate::rendering::camera_uniform::CameraUniform;
use crate::rendering::frame::FrameData;
use crate::rendering::light::LightUniform;
use crate::rendering::mesh::{cube_indices, cube_vertices, InstanceRaw, Vertex};
use crate::utils::logging::log_adapter_info;
use eframe::egui;
use eframe::egui_wgpu;
use std::collections::HashMap;
use tracing::{debug, info};
use wgpu::util::DeviceExt;

/// Depth bits requested from eframe; the pipelines must agree with the
/// attachment eframe creates from it.
pub const DEPTH_BITS: u8 = 24;

const INITIAL_INSTANCE_CAPACITY: usize = 64;

/// A growable vertex buffer of [`InstanceRaw`].
struct InstanceBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: usize) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, capacity),
            capacity,
            len: 0,
        }
    }

    fn allocate(device: &wgpu::Device, label: &'static str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[InstanceRaw]) {
        if instances.len() > self.capacity {
            self.capacity = instances.len().next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.capacity);
            debug!(label = self.label, capacity = self.capacity, "Instance buffer grown");
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(instances));
        }
        self.len = instances.len() as u32;
    }
}

/// GPU side of the scene. Lives in egui's callback resources and is driven
/// by [`SceneCallback`] once per frame.
pub struct RenderEngine {
    lit_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    num_indices: u32,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
    opaque_instances: InstanceBuffer,
    translucent_instances: InstanceBuffer,
}

impl RenderEngine {
    pub fn new(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Self {
        info!(?target_format, ?depth_format, "Creating scene render engine");

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Uniform Buffer"),
            contents: bytemuck::cast_slice(&[LightUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout = uniform_layout(
            device,
            "camera_bind_group_layout",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let light_bind_group_layout =
            uniform_layout(device, "light_bind_group_layout", wgpu::ShaderStages::FRAGMENT);

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });
        let light_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &light_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
            label: Some("light_bind_group"),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &light_bind_group_layout],
            push_constant_ranges: &[],
        });

        let mut constants = HashMap::new();
        let encode_srgb = if target_format.is_srgb() { 0.0 } else { 1.0 };
        constants.insert("encode_srgb".to_string(), encode_srgb);

        let lit_pipeline = create_pipeline(
            device,
            &layout,
            &shader,
            PipelineVariant {
                label: "Lit Pipeline",
                fragment_entry: "fs_lit",
                blend: wgpu::BlendState::REPLACE,
                depth_write: true,
                cull_mode: Some(wgpu::Face::Back),
            },
            target_format,
            depth_format,
            &constants,
        );
        // Panels are seen from inside and outside; they test depth against the
        // boxes but never write it.
        let translucent_pipeline = create_pipeline(
            device,
            &layout,
            &shader,
            PipelineVariant {
                label: "Translucent Pipeline",
                fragment_entry: "fs_translucent",
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_write: false,
                cull_mode: None,
            },
            target_format,
            depth_format,
            &constants,
        );

        let vertices = cube_vertices();
        let indices = cube_indices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        info!("Scene render engine ready");
        Self {
            lit_pipeline,
            translucent_pipeline,
            vertex_buffer,
            index_buffer,
            num_indices: indices.len() as u32,
            camera_buffer,
            camera_bind_group,
            light_buffer,
            light_bind_group,
            opaque_instances: InstanceBuffer::new(
                device,
                "Opaque Instance Buffer",
                INITIAL_INSTANCE_CAPACITY,
            ),
            translucent_instances: InstanceBuffer::new(device, "Translucent Instance Buffer", 8),
        }
    }

    /// Creates the engine on eframe's device and registers it with egui.
    pub fn install(render_state: Option<&egui_wgpu::RenderState>) -> CubefallResult<()> {
        let render_state = render_state.ok_or(CubefallError::WgpuUnavailable)?;
        log_adapter_info(&render_state.adapter);
        let depth_format = egui_wgpu::depth_format_from_bits(DEPTH_BITS, 0);
        let engine =
            RenderEngine::new(&render_state.device, render_state.target_format, depth_format);
        render_state
            .renderer
            .write()
            .callback_resources
            .insert(engine);
        Ok(())
    }

    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame: &FrameData) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[frame.camera]));
        queue.write_buffer(&self.light_buffer, 0, bytemuck::cast_slice(&[frame.light]));
        self.opaque_instances.upload(device, queue, &frame.opaque);
        self.translucent_instances.upload(device, queue, &frame.translucent);
    }

    /// Opaque boxes first, then the panels blended over them.
    pub fn paint(&self, render_pass: &mut wgpu::RenderPass<'static>) {
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.light_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

        for (pipeline, instances) in [
            (&self.lit_pipeline, &self.opaque_instances),
            (&self.translucent_pipeline, &self.translucent_instances),
        ] {
            if instances.len == 0 {
                continue;
            }
            render_pass.set_pipeline(pipeline);
            render_pass.set_vertex_buffer(1, instances.buffer.slice(..));
            render_pass.draw_indexed(0..self.num_indices, 0, 0..instances.len);
        }
    }
}

struct PipelineVariant {
    label: &'static str,
    fragment_entry: &'static str,
    blend: wgpu::BlendState,
    depth_write: bool,
    cull_mode: Option<wgpu::Face>,
}

fn uniform_layout(
    device: &wgpu::Device,
    label: &str,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    variant: PipelineVariant,
    target_format: wgpu::TextureFormat,
    depth_format: Option<wgpu::TextureFormat>,
    constants: &HashMap<String, f64>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(variant.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc(), InstanceRaw::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(variant.fragment_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: target_format,
                blend: Some(variant.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions {
                constants,
                ..Default::default()
            },
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: variant.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: variant.depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

/// Carries one frame's [`FrameData`] into egui's wgpu pass.
pub struct SceneCallback {
    frame: FrameData,
}

impl SceneCallback {
    pub fn new(frame: FrameData) -> Self {
        Self { frame }
    }
}

impl egui_wgpu::CallbackTrait for SceneCallback {
    fn prepare(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        _screen_descriptor: &egui_wgpu::ScreenDescriptor,
        _egui_encoder: &mut wgpu::CommandEncoder,
        callback_resources: &mut egui_wgpu::CallbackResources,
    ) -> Vec<wgpu::CommandBuffer> {
        if let Some(engine) = callback_resources.get_mut::<RenderEngine>() {
            engine.prepare(device, queue, &self.frame);
        }
        Vec::new()
    }

    fn paint(
        &self,
        _info: egui::PaintCallbackInfo,
        render_pass: &mut wgpu::RenderPass<'static>,
        callback_resources: &egui_wgpu::CallbackResources,
    ) {
        if let Some(engine) = callback_resources.get::<RenderEngine>() {
            engine.paint(render_pass);
        }
    }
}

/// Queues the scene to be drawn into `rect` when egui paints this frame.
pub fn paint_scene(painter: &egui::Painter, rect: egui::Rect, frame: FrameData) {
    painter.add(egui_wgpu::Callback::new_paint_callback(rect, SceneCallback::new(frame)));
}
