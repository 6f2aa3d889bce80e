//! [`RenderBackend`] on top of wgpu.
//!
//! Draws are collected during the frame and encoded into a single render pass
//! by [`WgpuBackend::render_frame`]. Each draw resolves its [`RenderState`],
//! program and mesh topology into a cached pipeline; per-draw data lives in
//! one uniform buffer addressed with dynamic offsets.
//!
//! Bind group layout shared by every program:
//!
//! | group | binding | contents                                   |
//! |-------|---------|--------------------------------------------|
//! | 0     | 0       | [`FrameUniform`] (view, projection, light) |
//! | 1     | 0       | [`DrawUniform`] (model, color, flags)      |
//! | 2     | 0, 1    | diffuse texture + sampler (unit 0)         |
//! | 2     | 2, 3    | normal map + sampler (unit 1)              |

use std::collections::HashMap;
use std::num::NonZeroU64;
use std::path::Path;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::backend::{DrawCommand, LightParams, RenderBackend, RenderError, TextureUsage};
use crate::buffer::GpuMesh;
use crate::depth::DepthBuffer;
use crate::gpu::RenderContext;
use crate::handle::{MeshHandle, ProgramHandle, TextureHandle};
use crate::mesh::{MeshData, Topology, Vertex};
use crate::shader::{self, FRAGMENT_ENTRY, ShaderError, VERTEX_ENTRY};
use crate::state::{BlendMode, CullMode, RenderState};
use crate::texture::{TextureError, TextureStore};

/// Per-frame uniform at `@group(0) @binding(0)`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// xyz = light position in camera space, w = ambient factor.
    pub light: [f32; 4],
}

/// Per-draw uniform at `@group(1) @binding(0)`, addressed by dynamic offset.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x = texturing, y = lighting (1.0 or 0.0).
    pub flags: [f32; 4],
}

impl DrawUniform {
    pub fn new(command: &DrawCommand, state: &RenderState) -> Self {
        Self {
            model: command.model.to_cols_array_2d(),
            color: command.color,
            flags: [
                if state.texturing { 1.0 } else { 0.0 },
                if state.lighting { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }
}

/// WGSL declarations every program shares. Custom programs may copy these.
pub const SHARED_BINDINGS_SOURCE: &str = r#"
struct FrameUniform {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    light: vec4<f32>,
};

struct DrawUniform {
    model: mat4x4<f32>,
    color: vec4<f32>,
    flags: vec4<f32>,
};

@group(0) @binding(0) var<uniform> frame: FrameUniform;
@group(1) @binding(0) var<uniform> draw: DrawUniform;
@group(2) @binding(0) var diffuse_texture: texture_2d<f32>;
@group(2) @binding(1) var diffuse_sampler: sampler;
@group(2) @binding(2) var normal_texture: texture_2d<f32>;
@group(2) @binding(3) var normal_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
    @location(3) color: vec4<f32>,
};
"#;

/// The program used while `RenderState::program` is `None`: vertex color ×
/// draw color, optionally × diffuse texel, optionally Lambert-lit.
const BUILTIN_BODY_SOURCE: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) normal_view: vec3<f32>,
    @location(3) position_view: vec3<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    let model_view = frame.view * draw.model;
    let position_view = model_view * vec4<f32>(in.position, 1.0);
    var out: VertexOutput;
    out.clip_position = frame.projection * position_view;
    out.color = in.color * draw.color;
    out.uv = in.uv;
    out.normal_view = (model_view * vec4<f32>(in.normal, 0.0)).xyz;
    out.position_view = position_view.xyz;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(diffuse_texture, diffuse_sampler, in.uv);
    var color = in.color;
    if (draw.flags.x > 0.5) {
        color = color * texel;
    }
    if (draw.flags.y > 0.5) {
        let n = normalize(in.normal_view);
        let l = normalize(frame.light.xyz - in.position_view);
        let shade = frame.light.w + max(dot(n, l), 0.0);
        color = vec4<f32>(color.rgb * shade, color.a);
    }
    return color;
}
"#;

/// Everything that selects a distinct `wgpu::RenderPipeline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub program: Option<ProgramHandle>,
    pub blend: BlendMode,
    pub cull: CullMode,
    pub depth_test: bool,
    pub topology: Topology,
}

impl PipelineKey {
    pub fn new(state: &RenderState, topology: Topology) -> Self {
        Self {
            program: state.program,
            blend: state.blend,
            cull: state.cull,
            depth_test: state.depth_test,
            topology,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TextureKey {
    diffuse: Option<TextureHandle>,
    normal_map: Option<TextureHandle>,
}

struct Program {
    name: String,
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
}

struct PendingDraw {
    pipeline: PipelineKey,
    mesh: MeshHandle,
    textures: TextureKey,
    uniform_offset: u32,
}

/// Round `size` up to a multiple of `alignment`.
pub fn align_to(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// Failures while creating the backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendInitError {
    #[error("built-in shader: {0}")]
    Shader(#[from] ShaderError),

    #[error("fallback textures: {0}")]
    Texture(#[from] TextureError),
}

/// wgpu implementation of [`RenderBackend`].
pub struct WgpuBackend {
    context: RenderContext,
    depth: DepthBuffer,
    state: RenderState,
    clear_color: wgpu::Color,

    meshes: Vec<GpuMesh>,
    textures: TextureStore,
    programs: Vec<Program>,
    builtin: wgpu::ShaderModule,

    texture_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    texture_bind_groups: HashMap<TextureKey, wgpu::BindGroup>,

    frame_uniform: FrameUniform,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,

    draw_layout: wgpu::BindGroupLayout,
    draw_stride: u64,
    draw_capacity: u64,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    draw_data: Vec<u8>,
    pending: Vec<PendingDraw>,
}

impl WgpuBackend {
    const INITIAL_DRAW_CAPACITY: u64 = 64;

    pub fn new(context: RenderContext, clear_color: [f32; 3]) -> Result<Self, BackendInitError> {
        let device = &context.device;
        let (width, height) = context.size();
        let depth = DepthBuffer::new(device, width, height);

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame-bind-group-layout"),
            entries: &[uniform_layout_entry(
                false,
                std::mem::size_of::<FrameUniform>() as u64,
            )],
        });
        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw-bind-group-layout"),
            entries: &[uniform_layout_entry(
                true,
                std::mem::size_of::<DrawUniform>() as u64,
            )],
        });
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture-bind-group-layout"),
            entries: &[
                texture_layout_entry(0),
                sampler_layout_entry(1),
                texture_layout_entry(2),
                sampler_layout_entry(3),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("orrery-pipeline-layout"),
            bind_group_layouts: &[&frame_layout, &draw_layout, &texture_layout],
            immediate_size: 0,
        });

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame-uniform"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame-bind-group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let draw_stride = align_to(
            std::mem::size_of::<DrawUniform>() as u64,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let (draw_buffer, draw_bind_group) = create_draw_buffer(
            device,
            &draw_layout,
            draw_stride,
            Self::INITIAL_DRAW_CAPACITY,
        );

        let builtin_source = format!("{SHARED_BINDINGS_SOURCE}{BUILTIN_BODY_SOURCE}");
        let builtin = shader::compile_module(device, "builtin-unlit", &builtin_source)?;
        let textures = TextureStore::new(device, &context.queue)?;

        let [r, g, b] = clear_color;
        Ok(Self {
            depth,
            state: RenderState::default(),
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
            meshes: Vec::new(),
            textures,
            programs: Vec::new(),
            builtin,
            texture_layout,
            pipeline_layout,
            pipelines: HashMap::new(),
            texture_bind_groups: HashMap::new(),
            frame_uniform: FrameUniform {
                view: Mat4::IDENTITY.to_cols_array_2d(),
                projection: Mat4::IDENTITY.to_cols_array_2d(),
                light: [0.0, 0.0, 0.0, LightParams::default().ambient],
            },
            frame_buffer,
            frame_bind_group,
            draw_layout,
            draw_stride,
            draw_capacity: Self::INITIAL_DRAW_CAPACITY,
            draw_buffer,
            draw_bind_group,
            draw_data: Vec::new(),
            pending: Vec::new(),
            context,
        })
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Resize the surface and depth buffer.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.depth.resize(&self.context.device, width, height);
    }

    /// Number of draws queued for the current frame.
    pub fn pending_draws(&self) -> usize {
        self.pending.len()
    }

    /// Number of distinct pipelines built so far.
    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }

    /// Encode every queued draw into one pass, submit it and present.
    ///
    /// The queue is emptied whether or not presenting succeeds.
    pub fn render_frame(&mut self) -> Result<(), RenderError> {
        let result = self.encode_and_present();
        self.pending.clear();
        self.draw_data.clear();
        result
    }

    fn encode_and_present(&mut self) -> Result<(), RenderError> {
        let frame = self.context.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.prepare()?;

        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("orrery-frame-encoder"),
                });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("orrery-scene-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            for draw in &self.pending {
                let (Some(pipeline), Some(textures), Some(mesh)) = (
                    self.pipelines.get(&draw.pipeline),
                    self.texture_bind_groups.get(&draw.textures),
                    self.meshes.get(draw.mesh.0 as usize),
                ) else {
                    continue;
                };
                pass.set_pipeline(pipeline);
                pass.set_bind_group(1, &self.draw_bind_group, &[draw.uniform_offset]);
                pass.set_bind_group(2, textures, &[]);
                mesh.draw(&mut pass);
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Upload uniforms and build any pipelines or bind groups the queued
    /// draws need.
    fn prepare(&mut self) -> Result<(), RenderError> {
        let needed = self.pending.len() as u64;
        if needed > self.draw_capacity {
            let capacity = needed.next_power_of_two();
            let (buffer, bind_group) = create_draw_buffer(
                &self.context.device,
                &self.draw_layout,
                self.draw_stride,
                capacity,
            );
            log::debug!("Grew draw uniform buffer to {capacity} draws");
            self.draw_buffer = buffer;
            self.draw_bind_group = bind_group;
            self.draw_capacity = capacity;
        }

        self.context.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&self.frame_uniform),
        );
        if !self.draw_data.is_empty() {
            self.context
                .queue
                .write_buffer(&self.draw_buffer, 0, &self.draw_data);
        }

        let keys: Vec<(PipelineKey, TextureKey)> = self
            .pending
            .iter()
            .map(|d| (d.pipeline, d.textures))
            .collect();
        for (pipeline_key, texture_key) in keys {
            if !self.pipelines.contains_key(&pipeline_key) {
                let pipeline = self.create_pipeline(&pipeline_key)?;
                self.pipelines.insert(pipeline_key, pipeline);
            }
            if !self.texture_bind_groups.contains_key(&texture_key) {
                let bind_group = self.create_texture_bind_group(&texture_key)?;
                self.texture_bind_groups.insert(texture_key, bind_group);
            }
        }
        Ok(())
    }

    fn create_pipeline(&self, key: &PipelineKey) -> Result<wgpu::RenderPipeline, RenderError> {
        let (label, vertex, fragment) = match key.program {
            None => ("builtin-unlit", &self.builtin, &self.builtin),
            Some(handle) => {
                let program = self
                    .programs
                    .get(handle.0 as usize)
                    .ok_or(RenderError::UnknownProgram(handle))?;
                (program.name.as_str(), &program.vertex, &program.fragment)
            }
        };
        log::debug!("Building pipeline '{label}' for {key:?}");
        Ok(build_pipeline(
            &self.context.device,
            &self.pipeline_layout,
            self.context.surface_format,
            label,
            vertex,
            fragment,
            key,
        ))
    }

    fn create_texture_bind_group(&self, key: &TextureKey) -> Result<wgpu::BindGroup, RenderError> {
        let diffuse = match key.diffuse {
            Some(handle) => self
                .textures
                .get(handle)
                .ok_or(RenderError::UnknownTexture(handle))?,
            None => self.textures.white(),
        };
        let normal_map = match key.normal_map {
            Some(handle) => self
                .textures
                .get(handle)
                .ok_or(RenderError::UnknownTexture(handle))?,
            None => self.textures.flat_normal(),
        };
        let sampler = self.textures.sampler();

        Ok(self
            .context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("texture-bind-group"),
                layout: &self.texture_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&diffuse.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(&normal_map.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                ],
            }))
    }
}

impl RenderBackend for WgpuBackend {
    fn state(&self) -> RenderState {
        self.state
    }

    fn set_state(&mut self, state: RenderState) {
        self.state = state;
    }

    fn upload_mesh(&mut self, label: &str, mesh: &MeshData) -> MeshHandle {
        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes
            .push(GpuMesh::upload(&self.context.device, label, mesh));
        log::debug!(
            "Uploaded mesh '{label}' ({} vertices, {} indices)",
            mesh.vertex_count(),
            mesh.index_count()
        );
        handle
    }

    fn load_texture(&mut self, path: &Path, usage: TextureUsage) -> Option<TextureHandle> {
        match self
            .textures
            .load_file(&self.context.device, &self.context.queue, path, usage)
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::debug!("Texture unavailable: {e}");
                None
            }
        }
    }

    fn compile_program(
        &mut self,
        name: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramHandle, ShaderError> {
        shader::require_entry_point(name, vertex_source, VERTEX_ENTRY)?;
        shader::require_entry_point(name, fragment_source, FRAGMENT_ENTRY)?;

        let device = &self.context.device;
        let vertex = shader::compile_module(device, &format!("{name}-vertex"), vertex_source)?;
        let fragment =
            shader::compile_module(device, &format!("{name}-fragment"), fragment_source)?;

        // Interface mismatches only surface at pipeline creation
        let handle = ProgramHandle(self.programs.len() as u32);
        let key = PipelineKey::new(
            &RenderState {
                program: Some(handle),
                ..RenderState::default()
            },
            Topology::TriangleList,
        );
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let probe = build_pipeline(
            device,
            &self.pipeline_layout,
            self.context.surface_format,
            name,
            &vertex,
            &fragment,
            &key,
        );
        if let Some(error) = pollster::block_on(scope.pop()) {
            return Err(ShaderError::CompilationFailed {
                name: name.to_string(),
                message: error.to_string(),
            });
        }

        log::info!("Compiled program '{name}'");
        self.pipelines.insert(key, probe);
        self.programs.push(Program {
            name: name.to_string(),
            vertex,
            fragment,
        });
        Ok(handle)
    }

    fn set_camera(&mut self, view: Mat4, projection: Mat4) {
        self.frame_uniform.view = view.to_cols_array_2d();
        self.frame_uniform.projection = projection.to_cols_array_2d();
    }

    fn set_light(&mut self, light: LightParams) {
        let p = light.position_view;
        self.frame_uniform.light = [p.x, p.y, p.z, light.ambient];
    }

    fn draw(&mut self, command: DrawCommand) -> Result<(), RenderError> {
        let topology = self
            .meshes
            .get(command.mesh.0 as usize)
            .ok_or(RenderError::UnknownMesh(command.mesh))?
            .topology;
        for handle in [command.diffuse, command.normal_map].into_iter().flatten() {
            if !self.textures.contains(handle) {
                return Err(RenderError::UnknownTexture(handle));
            }
        }
        if let Some(program) = self.state.program
            && program.0 as usize >= self.programs.len()
        {
            return Err(RenderError::UnknownProgram(program));
        }

        let uniform_offset = self.pending.len() as u64 * self.draw_stride;
        let uniform = DrawUniform::new(&command, &self.state);
        self.draw_data
            .resize(uniform_offset as usize + self.draw_stride as usize, 0);
        let start = uniform_offset as usize;
        self.draw_data[start..start + std::mem::size_of::<DrawUniform>()]
            .copy_from_slice(bytemuck::bytes_of(&uniform));

        self.pending.push(PendingDraw {
            pipeline: PipelineKey::new(&self.state, topology),
            mesh: command.mesh,
            textures: TextureKey {
                diffuse: command.diffuse,
                normal_map: command.normal_map,
            },
            uniform_offset: uniform_offset as u32,
        });
        Ok(())
    }
}

fn uniform_layout_entry(dynamic: bool, size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: dynamic,
            min_binding_size: NonZeroU64::new(size),
        },
        count: None,
    }
}

fn texture_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

fn create_draw_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    stride: u64,
    capacity: u64,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("draw-uniforms"),
        size: stride * capacity,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("draw-bind-group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: NonZeroU64::new(std::mem::size_of::<DrawUniform>() as u64),
            }),
        }],
    });
    (buffer, bind_group)
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
    label: &str,
    vertex: &wgpu::ShaderModule,
    fragment: &wgpu::ShaderModule,
    key: &PipelineKey,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: vertex,
            entry_point: Some(VERTEX_ENTRY),
            buffers: &[Vertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: key.topology.to_wgpu(),
            strip_index_format: key.topology.strip_index_format(),
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: key.cull.to_wgpu(),
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(DepthBuffer::stencil_state(key.depth_test)),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: fragment,
            entry_point: Some(FRAGMENT_ENTRY),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: key.blend.to_wgpu(),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview_mask: None,
        cache: None,
    })
}
