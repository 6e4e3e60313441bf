use std::sync::Arc;
use std::time::{Duration, Instant};

use error_iter::ErrorIter as _;
use log::error;
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use sim_grid::EngineError;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const BACKGROUND_COLOR: Color = Color::BLACK;

/// What the renderer needs from a simulation: its grid dimensions, one
/// tick of advancement, and a way to paint the committed grid into an
/// RGBA frame. The pixel buffer is grid-sized; the surface scales each
/// logical pixel up to one cell-sized screen rectangle.
pub trait World {
    fn grid_width(&self) -> u32;
    fn grid_height(&self) -> u32;
    fn num_cells(&self) -> usize;
    fn advance(&mut self) -> Result<(), EngineError>;
    fn draw(&self, frame: &mut [u8]);
}

pub fn animate<W: World>(
    title: &str,
    window_size: PhysicalSize<u32>,
    tick_interval: Duration,
    world: W,
) {
    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop
        .run_app(&mut AppEventHandler::new(
            title,
            window_size,
            tick_interval,
            world,
        ))
        .unwrap();
}

struct App<W: World> {
    world: W,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    tick_interval: Duration,
    next_update: Instant,
}

impl<W: World> App<W> {
    fn new(
        event_loop: &ActiveEventLoop,
        title: &str,
        window_size: PhysicalSize<u32>,
        tick_interval: Duration,
        world: W,
    ) -> Self {
        let window = Arc::new(Self::build_window(event_loop, title, window_size));
        let pixels = Self::build_pixels(&window, world.grid_width(), world.grid_height());
        Self {
            world,
            window,
            pixels,
            tick_interval,
            next_update: Instant::now(),
        }
    }

    fn build_window(
        event_loop: &ActiveEventLoop,
        title: &str,
        window_size: PhysicalSize<u32>,
    ) -> Window {
        let window_attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(window_size)
            .with_resizable(false)
            .with_visible(false);
        event_loop.create_window(window_attributes).unwrap()
    }

    fn build_pixels(window: &Arc<Window>, width: u32, height: u32) -> Pixels<'static> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(width, height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
            .unwrap()
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_time_step(&mut self) -> Result<(), EngineError> {
        self.world.advance()?;
        self.window.request_redraw();

        while self.next_update < Instant::now() {
            self.next_update += self.tick_interval;
        }
        Ok(())
    }

    fn on_redraw(&mut self) -> Result<(), pixels::Error> {
        let frame = self.pixels.frame_mut();
        debug_assert_eq!(frame.len(), 4 * self.world.num_cells());
        self.world.draw(frame);
        self.pixels.render()
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) -> Result<(), pixels::TextureError> {
        self.pixels.resize_surface(size.width, size.height)
    }
}

struct AppEventHandler<W: World> {
    title: String,
    window_size: PhysicalSize<u32>,
    tick_interval: Duration,
    world: Option<W>,
    app: Option<App<W>>,
}

impl<W: World> AppEventHandler<W> {
    fn new(title: &str, window_size: PhysicalSize<u32>, tick_interval: Duration, world: W) -> Self {
        Self {
            title: title.to_owned(),
            window_size,
            tick_interval,
            world: Some(world),
            app: None,
        }
    }

    fn app(&mut self) -> &mut App<W> {
        self.app.as_mut().unwrap()
    }
}

impl<W: World> ApplicationHandler for AppEventHandler<W> {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Err(err) = self.app().on_time_step()
        {
            log_error("step", &err);
            event_loop.exit();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_none() {
            let world = self.world.take().unwrap();
            self.app = Some(App::new(
                event_loop,
                &self.title,
                self.window_size,
                self.tick_interval,
                world,
            ));
            self.app().on_create();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX => {
                    event_loop.exit();
                }
                _ => (),
            },
            WindowEvent::Resized(size) => {
                if let Err(err) = self.app().on_resize(size) {
                    log_error("resize_surface", &err);
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.app().on_redraw() {
                    log_error("render", &err);
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.as_ref() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_update));
        }
    }
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: &E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  caused by: {source}");
    }
}
