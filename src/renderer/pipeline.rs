//! WebGPU render pipeline setup

use std::fmt;

use wgpu::util::DeviceExt;

use super::vertex::Vertex;

/// Renderer setup failure
#[derive(Debug)]
pub enum RenderInitError {
    Device(wgpu::RequestDeviceError),
    /// Surface reports no usable texture format
    NoSurfaceFormat,
}

impl fmt::Display for RenderInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(e) => write!(f, "failed to create device: {e}"),
            Self::NoSurfaceFormat => write!(f, "surface has no supported format"),
        }
    }
}

impl std::error::Error for RenderInitError {}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Arena size in game units
    pub arena: (f32, f32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        arena: (f32, f32),
    ) -> Result<Self, RenderInitError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("bounce-dodge-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .map_err(RenderInitError::Device)?;

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        // Colors are authored in sRGB, so write them through unconverted
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderInitError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Create shader module
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        // Create pipeline
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
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

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vertex_buffer"),
            contents: bytemuck::cast_slice(&[Vertex::new(0.0, 0.0, [0.0; 4])]),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_count: 0,
            size: (width, height),
            arena,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Convert game coordinates to normalized device coordinates
    pub fn game_to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        arena_to_ndc(x, y, self.arena, self.size)
    }

    /// Upload vertices and render
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let ndc_vertices: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let (x, y) = self.game_to_ndc(v.position[0], v.position[1]);
                Vertex::new(x, y, v.color)
            })
            .collect();

        // Recreate buffer each frame; the scene is a few thousand vertices
        if !ndc_vertices.is_empty() {
            self.vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("vertex_buffer"),
                    contents: bytemuck::cast_slice(&ndc_vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
        }
        self.vertex_count = ndc_vertices.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Letterbox bars
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.06,
                            g: 0.1,
                            b: 0.2,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if self.vertex_count > 0 {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..self.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Map an arena point (origin top-left, y down) into clip space, fitting the
/// whole arena in the viewport with its aspect ratio preserved.
pub fn arena_to_ndc(x: f32, y: f32, arena: (f32, f32), viewport: (u32, u32)) -> (f32, f32) {
    let (aw, ah) = arena;
    let (vw, vh) = (viewport.0.max(1) as f32, viewport.1.max(1) as f32);
    if aw <= 0.0 || ah <= 0.0 {
        return (0.0, 0.0);
    }
    let scale = (vw / aw).min(vh / ah);

    let px = (x - aw * 0.5) * scale;
    let py = (y - ah * 0.5) * scale;
    (px / (vw * 0.5), -py / (vh * 0.5))
}

/// Inverse of [`arena_to_ndc`] for a point in viewport pixels (origin
/// top-left), e.g. a mouse offset inside the canvas
pub fn viewport_to_arena(px: f32, py: f32, arena: (f32, f32), viewport: (f32, f32)) -> (f32, f32) {
    let (aw, ah) = arena;
    let (vw, vh) = (viewport.0.max(1.0), viewport.1.max(1.0));
    let scale = (vw / aw).min(vh / ah);
    if !scale.is_finite() || scale <= 0.0 {
        return (aw * 0.5, ah * 0.5);
    }
    (
        (px - vw * 0.5) / scale + aw * 0.5,
        (py - vh * 0.5) / scale + ah * 0.5,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-5 && (a.1 - b.1).abs() < 1e-5
    }

    #[test]
    fn test_arena_fills_matching_viewport() {
        let arena = (800.0, 600.0);
        assert!(close(arena_to_ndc(0.0, 0.0, arena, (800, 600)), (-1.0, 1.0)));
        assert!(close(arena_to_ndc(800.0, 600.0, arena, (1600, 1200)), (1.0, -1.0)));
        assert!(close(arena_to_ndc(400.0, 300.0, arena, (800, 600)), (0.0, 0.0)));
    }

    #[test]
    fn test_wide_viewport_letterboxes_sides() {
        // 1600x600: height limits, arena spans half the width
        let (x, y) = arena_to_ndc(0.0, 0.0, (800.0, 600.0), (1600, 600));
        assert!((x + 0.5).abs() < 1e-5);
        assert!((y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_mouse_maps_back_into_arena() {
        let arena = (800.0, 600.0);
        // Half-size canvas
        let (x, y) = viewport_to_arena(200.0, 150.0, arena, (400.0, 300.0));
        assert!(close((x, y), (400.0, 300.0)));
        // Letterboxed canvas: left bar maps outside the arena
        let (x, _) = viewport_to_arena(50.0, 0.0, arena, (1000.0, 600.0));
        assert!(x < 0.0);
        let (x, y) = viewport_to_arena(900.0, 600.0, arena, (1000.0, 600.0));
        assert!(close((x, y), (800.0, 600.0)));
    }
}
