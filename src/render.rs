mod helpers;

use field_core::{
    Blending, FieldError, FieldResult, ParticleField, PerspectiveCamera, Rasterizer,
    RasterizerOptions, Scene, ViewportSize, POINTS_WGSL,
};
use crate::dom::MountedCanvas;
use glam::Mat4;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PointsUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 4],
    viewport: [f32; 2],
    point_size: f32,
    size_scale: f32,
    attenuate: f32,
    _pad: [f32; 3],
}

/// Geometry and pipeline created by [`Rasterizer::upload`].
struct PointCloud {
    pipeline: wgpu::RenderPipeline,
    instances: wgpu::Buffer,
    count: u32,
    color: [f32; 4],
    point_size: f32,
    attenuate: bool,
}

/// WebGPU point-sprite rasterizer drawing into a canvas.
pub struct PointsRenderer {
    canvas: MountedCanvas,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    shader: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    msaa: Option<(wgpu::Texture, wgpu::TextureView)>,
    sample_count: u32,
    cloud: Option<PointCloud>,
    clear_color: wgpu::Color,
    // CSS pixels
    width: u32,
    height: u32,
    pixel_ratio: f64,
}

impl PointsRenderer {
    pub async fn new(
        canvas: MountedCanvas,
        viewport: ViewportSize,
        options: RasterizerOptions,
    ) -> anyhow::Result<Self> {
        let (phys_w, phys_h) = viewport.physical_size();
        canvas.element().set_width(phys_w);
        canvas.element().set_height(phys_h);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.element().clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no texture formats"))?;
        // Transparent canvas composites over the page with premultiplied alpha
        let alpha_mode = if options.transparent
            && caps
                .alpha_modes
                .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: phys_w,
            height: phys_h,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(POINTS_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("points_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("points_uniforms"),
            size: std::mem::size_of::<PointsUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("points_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let sample_count = options.sample_count.max(1);
        let msaa = (sample_count > 1).then(|| {
            helpers::create_msaa_target(&device, phys_w, phys_h, format, sample_count)
        });
        let clear_color = if options.transparent {
            wgpu::Color::TRANSPARENT
        } else {
            wgpu::Color::BLACK
        };
        log::info!(
            "[gpu] surface {}x{} {:?} alpha={:?} msaa={}",
            phys_w,
            phys_h,
            format,
            alpha_mode,
            sample_count
        );

        Ok(Self {
            canvas,
            surface,
            device,
            queue,
            config,
            shader,
            pipeline_layout,
            uniform_buffer,
            bind_group,
            msaa,
            sample_count,
            cloud: None,
            clear_color,
            width: viewport.width,
            height: viewport.height,
            pixel_ratio: viewport.pixel_ratio,
        })
    }

    /// Reconfigure the surface if the backing-store size changed.
    fn resize_if_needed(&mut self) {
        let (w, h) = ViewportSize::new(self.width, self.height, self.pixel_ratio).physical_size();
        let canvas = self.canvas.element();
        let style = canvas.style();
        _ = style.set_property("width", &format!("{}px", self.width));
        _ = style.set_property("height", &format!("{}px", self.height));
        if w == self.config.width && h == self.config.height {
            return;
        }
        canvas.set_width(w);
        canvas.set_height(h);
        self.config.width = w;
        self.config.height = h;
        self.surface.configure(&self.device, &self.config);
        if self.sample_count > 1 {
            self.msaa = Some(helpers::create_msaa_target(
                &self.device,
                w,
                h,
                self.config.format,
                self.sample_count,
            ));
        }
        log::debug!("[gpu] resized to {}x{}", w, h);
    }
}

impl Rasterizer for PointsRenderer {
    fn set_pixel_ratio(&mut self, ratio: f64) {
        // applied by the next set_size, so the backing store is rebuilt once
        if ratio > 0.0 {
            self.pixel_ratio = ratio;
        }
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.resize_if_needed();
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn upload(&mut self, field: &ParticleField) -> FieldResult<()> {
        let instances = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("points_instances"),
                contents: bytemuck::cast_slice(field.flat_positions()),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let material = field.material();
        let blend = helpers::blend_state(material.blending);
        let pipeline = helpers::make_points_pipeline(
            &self.device,
            &self.pipeline_layout,
            &self.shader,
            self.config.format,
            blend,
            self.sample_count,
        );
        let count = u32::try_from(field.len())
            .map_err(|_| FieldError::BackendUnavailable("too many points".into()))?;
        self.cloud = Some(PointCloud {
            pipeline,
            instances,
            count,
            color: [
                material.color[0],
                material.color[1],
                material.color[2],
                material.opacity,
            ],
            point_size: material.size,
            attenuate: material.size_attenuation,
        });
        if material.blending == Blending::Additive {
            log::debug!("[gpu] uploaded {} additive points", count);
        }
        Ok(())
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> FieldResult<()> {
        let Some(cloud) = &self.cloud else {
            return Err(FieldError::Render("no geometry uploaded".into()));
        };
        let phys_w = self.config.width as f32;
        let phys_h = self.config.height as f32;
        let model = Mat4::from_translation(scene.position) * scene.particles.model_matrix();
        let u = PointsUniforms {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            color: cloud.color,
            viewport: [phys_w, phys_h],
            point_size: cloud.point_size,
            size_scale: phys_h * 0.5,
            attenuate: if cloud.attenuate { 1.0 } else { 0.0 },
            _pad: [0.0; 3],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Err(FieldError::Render("surface lost; reconfigured".into()));
            }
            Err(e) => return Err(FieldError::Render(format!("{:?}", e))),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let (target, resolve_target) = match &self.msaa {
            Some((_, msaa_view)) => (msaa_view, Some(&view)),
            None => (&view, None),
        };
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("points_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("points_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&cloud.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, cloud.instances.slice(..));
            rpass.draw(0..6, 0..cloud.count);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
