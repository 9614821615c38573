use anyhow::Result;
use bouquet_assets::{AssetRequest, LoadOutcome};
use bouquet_render_wgpu::{GpuContext, WgpuRenderer};
use bouquet_scene::{Viewer, ViewerConfig};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "bouquet-viewer", about = "Spinning, auto-framed glTF model viewer")]
struct Cli {
    /// Model to display (.glb or .gltf)
    #[arg(default_value = "lily.glb")]
    model: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Skip the glow billboard
    #[arg(long)]
    no_glow: bool,

    /// Tint every material with a cyan emissive colour
    #[arg(long)]
    emissive: bool,

    /// Give up on the model after this many seconds
    #[arg(long)]
    load_timeout_secs: Option<u64>,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "720")]
    height: u32,
}

/// Events delivered into the window loop from other threads.
#[derive(Debug)]
enum AppEvent {
    ModelLoaded(LoadOutcome),
}

struct GpuApp {
    viewer: Viewer,
    initial_size: LogicalSize<u32>,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<WgpuRenderer>,
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(config: ViewerConfig, width: u32, height: u32) -> Self {
        Self {
            viewer: Viewer::new(config, width as f32, height as f32, 1.0),
            initial_size: LogicalSize::new(width, height),
            window: None,
            gpu: None,
            renderer: None,
            fatal: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Bouquet")
            .with_transparent(true)
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let gpu = pollster::block_on(GpuContext::new(window.clone(), size.width, size.height))?;
        let renderer = WgpuRenderer::new(&gpu.device, gpu.format(), size.width, size.height);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        self.handle_resize(size);
        Ok(())
    }

    fn handle_resize(&mut self, physical: PhysicalSize<u32>) {
        let Some(window) = &self.window else {
            return;
        };
        let scale = window.scale_factor();
        let logical = physical.to_logical::<f32>(scale);
        let Some(surface) = self.viewer.resize(logical.width, logical.height, scale as f32) else {
            return;
        };
        if let (Some(gpu), Some(renderer)) = (&mut self.gpu, &mut self.renderer) {
            gpu.resize(surface.width, surface.height);
            renderer.resize(&gpu.device, surface.width, surface.height);
        }
        tracing::debug!(
            width = surface.width,
            height = surface.height,
            aspect = self.viewer.camera().aspect,
            "viewport resized"
        );
    }

    fn redraw(&mut self) {
        self.viewer.tick();

        let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) else {
            return;
        };
        renderer.prepare(&gpu.device, &gpu.queue, &self.viewer);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        renderer.render(&gpu.device, &gpu.queue, &view, &self.viewer);
        output.present();
    }
}

impl ApplicationHandler<AppEvent> for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_gpu(event_loop) {
            tracing::error!("failed to initialize renderer: {e}");
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::ModelLoaded(outcome) => {
                self.viewer.on_load(outcome);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.handle_resize(new_size);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Kick off the one model fetch; its outcome comes back as a user event.
fn request_model(
    path: PathBuf,
    timeout: Option<Duration>,
    proxy: EventLoopProxy<AppEvent>,
) -> Result<()> {
    AssetRequest::new(path)
        .with_timeout(timeout)
        .spawn(move |outcome| {
            // Fails only once the event loop is gone; nothing left to notify.
            if proxy.send_event(AppEvent::ModelLoaded(outcome)).is_err() {
                tracing::debug!("event loop closed before the model arrived");
            }
        })?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("bouquet-viewer starting");

    let config = ViewerConfig {
        glow: !cli.no_glow,
        emissive: cli.emissive,
        ..ViewerConfig::default()
    };

    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    request_model(
        cli.model,
        cli.load_timeout_secs.map(Duration::from_secs),
        event_loop.create_proxy(),
    )?;

    let mut app = GpuApp::new(config, cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::try_parse_from(["bouquet-viewer", "--no-glow", "--emissive", "rose.glb"])
            .unwrap();
        assert_eq!(cli.model, PathBuf::from("rose.glb"));
        assert!(cli.no_glow);
        assert!(cli.emissive);
        assert_eq!((cli.width, cli.height), (1280, 720));
    }
}
