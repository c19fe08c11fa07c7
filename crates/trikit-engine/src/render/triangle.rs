use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget, ShaderProgram};
use crate::scene::{DrawCmd, DrawList, TriangleCmd, TriangleList};

/// Size of one vertex: `vec2<f32>`, tightly packed.
const VERTEX_STRIDE: wgpu::BufferAddress = std::mem::size_of::<[f32; 2]>() as u64;

/// Draws every point of a [`TriangleList`] as a solid triangle.
///
/// The frame is expected to be cleared already (see `core::FrameCtx::render`);
/// this renderer only loads and draws over it.
///
/// Each triangle gets its own short-lived vertex buffer and its own draw call,
/// in list order. Volumes are click-driven, so nothing is pooled.
pub struct TriangleRenderer {
    program: ShaderProgram,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    draw_list: DrawList,
}

impl TriangleRenderer {
    pub fn new(program: ShaderProgram) -> Self {
        Self {
            program,
            pipeline_format: None,
            pipeline: None,
            draw_list: DrawList::new(),
        }
    }

    /// Renders `triangles` into `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        triangles: &TriangleList,
    ) {
        self.draw_list.rerecord(triangles);
        if self.draw_list.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        let Some(pipeline) = self.pipeline.as_ref() else { return };

        // Buffers are created up front so they outlive the pass that reads them.
        let buffers: Vec<wgpu::Buffer> = self
            .draw_list
            .items()
            .iter()
            .map(|cmd| match cmd {
                DrawCmd::Triangle(tri) => upload_triangle(ctx, tri),
            })
            .collect();

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("trikit triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        for vbo in &buffers {
            rpass.set_vertex_buffer(0, vbo.slice(..));
            rpass.draw(0..TriangleCmd::VERTEX_COUNT, 0..1);
        }

        log::trace!("drew {} triangles", buffers.len());
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let vertex_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trikit triangle vertex shader"),
            source: wgpu::ShaderSource::Wgsl(self.program.vertex_source().into()),
        });

        let fragment_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trikit triangle fragment shader"),
            source: wgpu::ShaderSource::Wgsl(self.program.fragment_source().into()),
        });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("trikit triangle pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let attributes = [position_attribute(self.program.position_location())];

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trikit triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(self.program.vertex_entry()),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: VERTEX_STRIDE,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &attributes,
                }],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(self.program.fragment_entry()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("triangle pipeline created for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }
}

/// `a_position`: two 32-bit floats, unnormalized, at the start of each vertex.
fn position_attribute(location: u32) -> wgpu::VertexAttribute {
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 0,
        shader_location: location,
    }
}

fn upload_triangle(ctx: &RenderCtx<'_>, tri: &TriangleCmd) -> wgpu::Buffer {
    ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("trikit triangle vbo"),
        contents: bytemuck::cast_slice(&tri.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    })
}
