//! Windowed host: winit event handling and the redraw loop.
//!
//! Every `RedrawRequested` runs exactly one driver tick, presents the
//! result and requests the next redraw, so there is always a single
//! pending frame. Resizing rebuilds the whole field for the new size.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::{Config, Viewport};
use crate::driver::Driver;
use crate::error::SimulationError;
use crate::gpu::Presenter;
use crate::interaction::Interaction;
use crate::pixmap::Pixmap;
use crate::time::Millis;

/// Frames between window title FPS refreshes.
const TITLE_REFRESH_FRAMES: u64 = 60;

pub(crate) struct App {
    config: Config,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    driver: Option<Driver<Pixmap>>,
    interaction: Interaction,
    start: Instant,
    error: Option<SimulationError>,
}

impl App {
    pub(crate) fn new(config: Config) -> Self {
        Self {
            config,
            window: None,
            presenter: None,
            driver: None,
            interaction: Interaction::default(),
            start: Instant::now(),
            error: None,
        }
    }

    /// The error that ended the event loop, if any.
    pub(crate) fn take_error(&mut self) -> Option<SimulationError> {
        self.error.take()
    }

    fn now(&self) -> Millis {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: SimulationError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    /// Throw the field away and spawn a new one sized to the window.
    fn reinitialize(&mut self, size: PhysicalSize<u32>, scale_factor: f64) {
        if size.width == 0 || size.height == 0 {
            // Minimized; keep the old field until there is something to draw
            return;
        }
        let viewport = Viewport::from_physical(size.width, size.height, scale_factor);
        log::info!(
            "Spawning {} particles in {}x{} (dpr {:.2})",
            self.config.particle_count,
            size.width,
            size.height,
            scale_factor
        );
        self.driver = Some(Driver::new(
            self.config.clone(),
            Pixmap::new(size.width, size.height),
            viewport,
            self.now(),
        ));
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = self.now();
        let (Some(driver), Some(presenter)) = (&mut self.driver, &mut self.presenter) else {
            return;
        };

        driver.tick(now, &self.interaction);

        match presenter.present(driver.scene().surface()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                presenter.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }

        let clock = driver.clock();
        if clock.frame() % TITLE_REFRESH_FRAMES == 0 {
            log::debug!("{:.1} fps", clock.fps());
            if let Some(window) = &self.window {
                window.set_title(&format!("{} - {:.0} fps", self.config.window.title, clock.fps()));
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(self.config.window.width, self.config.window.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match pollster::block_on(Presenter::new(window.clone())) {
            Ok(presenter) => self.presenter = Some(presenter),
            Err(e) => return self.fail(event_loop, e.into()),
        }

        self.reinitialize(window.inner_size(), window.scale_factor());
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.interaction.handle_event(&event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(physical_size);
                }
                let scale_factor = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                self.reinitialize(physical_size, scale_factor);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
