//! Pipeline state shared by the demo pipelines.

/// Triangle list, CCW front faces, no culling (GL's default state).
pub fn primitive_state() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

/// `src * a + dst`, used for glowing particles.
pub fn additive_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

pub fn pipeline_layout(
    device: &wgpu::Device,
    label: &str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::PipelineLayout {
    device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts,
        immediate_size: 0,
    })
}

/// Everything the demo pipelines vary on.
///
/// `color_format: None` builds a depth-only pipeline without a fragment stage.
pub struct PipelineSpec<'a> {
    pub label: &'a str,
    pub module: &'a wgpu::ShaderModule,
    pub vs_entry: &'a str,
    pub fs_entry: &'a str,
    pub vertex_buffers: &'a [wgpu::VertexBufferLayout<'a>],
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub color_format: Option<wgpu::TextureFormat>,
    pub blend: Option<wgpu::BlendState>,
    pub depth: Option<wgpu::DepthStencilState>,
}

impl<'a> PipelineSpec<'a> {
    /// Color pipeline with `vs_main`/`fs_main`, no blending, no depth.
    pub fn new(
        label: &'a str,
        module: &'a wgpu::ShaderModule,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            label,
            module,
            vs_entry: "vs_main",
            fs_entry: "fs_main",
            vertex_buffers: &[],
            bind_group_layouts: &[],
            color_format: Some(color_format),
            blend: None,
            depth: None,
        }
    }

    pub fn vertex_buffers(mut self, buffers: &'a [wgpu::VertexBufferLayout<'a>]) -> Self {
        self.vertex_buffers = buffers;
        self
    }

    pub fn bind_group_layouts(mut self, layouts: &'a [&'a wgpu::BindGroupLayout]) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    pub fn blend(mut self, blend: wgpu::BlendState) -> Self {
        self.blend = Some(blend);
        self
    }

    pub fn depth(mut self, depth: wgpu::DepthStencilState) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn build(&self, device: &wgpu::Device) -> wgpu::RenderPipeline {
        let layout = pipeline_layout(device, self.label, self.bind_group_layouts);

        let targets = [self.color_format.map(|format| wgpu::ColorTargetState {
            format,
            blend: self.blend,
            write_mask: wgpu::ColorWrites::ALL,
        })];

        let fragment = self.color_format.map(|_| wgpu::FragmentState {
            module: self.module,
            entry_point: Some(self.fs_entry),
            compilation_options: Default::default(),
            targets: &targets,
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: self.module,
                entry_point: Some(self.vs_entry),
                compilation_options: Default::default(),
                buffers: self.vertex_buffers,
            },
            fragment,
            primitive: primitive_state(),
            depth_stencil: self.depth.clone(),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn additive_blend_adds_destination() {
        let b = additive_blend();
        assert_eq!(b.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(b.color.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(b.color.operation, wgpu::BlendOperation::Add);
    }

    #[test]
    fn primitive_state_does_not_cull() {
        let p = primitive_state();
        assert_eq!(p.cull_mode, None);
        assert_eq!(p.topology, wgpu::PrimitiveTopology::TriangleList);
    }
}
