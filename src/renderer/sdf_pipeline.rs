//! SDF-based WebGPU render pipeline
//!
//! Renders the entire scene in the fragment shader using signed distance
//! fields. The playfield is a torus, so the shader evaluates every shape
//! at its wrapped nearest image; nothing pops at the seams.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{EntityKind, GamePhase, GameState};

/// Maximum number of entities the GPU scene holds
const MAX_ENTITIES: usize = 64;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    resolution: [f32; 2], // offset 0
    field: [f32; 2],      // offset 8
    time: f32,            // offset 16
    entity_count: u32,    // offset 20
    phase: u32,           // offset 24 - 0 playing, 1 paused, 2 game over
    starfield: u32,       // offset 28
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct EntityData {
    pos: [f32; 2],
    rotation: f32,  // radians, math convention
    footprint: f32, // sprite extent in field units
    shape: u32,
    flame: u32, // 1 = draw the thrust flame (ship only)
    aux: f32,   // remaining-fuse fraction, 1.0 for ageless entities
    _pad: u32,
}

// ============================================================================
// SDF RENDER STATE
// ============================================================================

pub struct SdfRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    entities_buffer: wgpu::Buffer,

    bind_group: wgpu::BindGroup,

    pub size: (u32, u32),
}

impl SdfRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Self {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sdf-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);
        log::info!("Surface alpha modes: {:?}", surface_caps.alpha_modes);
        log::info!("Surface present modes: {:?}", surface_caps.present_modes);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        log::info!(
            "Surface config: {}x{}, alpha: {:?}",
            width,
            height,
            config.alpha_mode
        );
        surface.configure(&device, &config);

        log::info!("Creating shader module...");
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene_shader.wgsl").into()),
        });
        log::info!("Shader module created");

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals {
                resolution: [width as f32, height as f32],
                field: [FIELD_WIDTH, FIELD_HEIGHT],
                time: 0.0,
                entity_count: 0,
                phase: 0,
                starfield: 1,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let entities_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("entities"),
            size: (std::mem::size_of::<EntityData>() * MAX_ENTITIES) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sdf_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sdf_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: entities_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sdf_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sdf_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            entities_buffer,
            bind_group,
            size: (width, height),
        }
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Update GPU buffers from game state and render
    pub fn render(
        &mut self,
        state: &GameState,
        settings: &Settings,
        thrust: bool,
        time: f64,
    ) -> Result<(), wgpu::SurfaceError> {
        // time is ms since page load from requestAnimationFrame, convert to seconds
        let elapsed = (time / 1000.0) as f32;

        let entity_count = state.entities.len().min(MAX_ENTITIES) as u32;
        let phase = match state.phase {
            GamePhase::Playing => 0,
            GamePhase::Paused => 1,
            GamePhase::GameOver => 2,
        };

        let globals = Globals {
            resolution: [self.size.0 as f32, self.size.1 as f32],
            field: [FIELD_WIDTH, FIELD_HEIGHT],
            time: elapsed,
            entity_count,
            phase,
            starfield: if settings.starfield { 1 } else { 0 },
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let mut entities_data = vec![
            EntityData {
                pos: [0.0; 2],
                rotation: 0.0,
                footprint: 0.0,
                shape: 0,
                flame: 0,
                aux: 1.0,
                _pad: 0,
            };
            MAX_ENTITIES
        ];
        for (i, entity) in state.entities.iter().take(MAX_ENTITIES).enumerate() {
            let (flame, aux) = match entity.kind {
                EntityKind::Ship { .. } => (u32::from(thrust), 1.0),
                EntityKind::Enemy { .. } => (0, 1.0),
                EntityKind::Laser { fuse } => (0, (fuse / LASER_FUSE).clamp(0.0, 1.0)),
                EntityKind::GummiBear { fuse } => (0, (fuse / GUMMI_FUSE).clamp(0.0, 1.0)),
                EntityKind::Wreckage { fuse } => (0, (fuse / WRECKAGE_FUSE).clamp(0.0, 1.0)),
            };
            entities_data[i] = EntityData {
                pos: [entity.pos.x, entity.pos.y],
                rotation: entity.rotation.to_radians(),
                footprint: entity.sprite.footprint(),
                shape: entity.sprite.shape_index(),
                flame,
                aux,
                _pad: 0,
            };
        }
        self.queue.write_buffer(
            &self.entities_buffer,
            0,
            bytemuck::cast_slice(&entities_data),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sdf_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sdf_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
