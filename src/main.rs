mod config;
mod dump;
mod editor;
mod graphics;
mod grid;
mod input;
mod input_mapping;
mod raster;
mod surface;
mod timing;
mod transmit;

use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Window, WindowBuilder},
};
use std::time::Instant;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::editor::{Editor, Flow};
use crate::graphics::GraphicsRenderer;
use crate::input::PointerEvent;
use crate::input_mapping::InputMapper;
use crate::timing::{FixedStep, Simulation};
use crate::transmit::{HttpTransmitter, LogTransmitter, Transmit};

struct App {
    editor: Editor,
    graphics: GraphicsRenderer,
    window: Window,
    title: String,
    render_failed: bool,
    // dumps are spawned onto this runtime
    _runtime: Runtime,
}

impl Simulation for App {
    fn update(&mut self, step: f64) {
        self.editor.update(step);
    }

    fn render(&mut self, _alpha: f64) {
        self.graphics.render(self.editor.surface());

        let dump = self.editor.serialize();
        if dump != self.title {
            self.title = dump.to_string();
            self.window.set_title(&format!("pixelpad [{}]", self.title));
        }

        if let Err(err) = self.graphics.present() {
            log::error!("Render error: {}", err);
            self.render_failed = true;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::load()?;
    let runtime = Runtime::new()?;

    let transmitter: Box<dyn Transmit> = match &config.endpoint {
        Some(endpoint) => {
            log::info!("Sending dumps to {}", endpoint);
            Box::new(HttpTransmitter::new(endpoint, config.request_timeout(), runtime.handle().clone())?)
        }
        None => {
            log::info!("No endpoint configured, dumps are only logged");
            Box::new(LogTransmitter)
        }
    };

    let editor = Editor::new(&config, transmitter);
    let (width, height) = editor.surface().canvas_size();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("pixelpad")
        .with_inner_size(LogicalSize::new(width * config.scale, height * config.scale))
        .with_resizable(true)
        .build(&event_loop)?;

    let graphics = GraphicsRenderer::new(&window, width, height)?;
    let mut app = App {
        editor,
        graphics,
        window,
        title: String::new(),
        render_failed: false,
        _runtime: runtime,
    };

    let mapper = InputMapper::new();
    let mut driver = FixedStep::new(config.fps, config.slow);
    let mut cursor = (0, 0);
    driver.start(Instant::now());

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    driver.stop();
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    app.graphics.resize(size.width, size.height);
                }
                WindowEvent::CursorEntered { .. } => {
                    app.editor.push_pointer(PointerEvent::Enter { x: cursor.0, y: cursor.1 });
                }
                WindowEvent::CursorLeft { .. } => {
                    cursor = (0, 0);
                    app.editor.push_pointer(PointerEvent::Leave);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    cursor = app.graphics.window_to_canvas(position.x, position.y);
                    app.editor.push_pointer(PointerEvent::Move { x: cursor.0, y: cursor.1 });
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    let (x, y) = cursor;
                    let pointer = match state {
                        ElementState::Pressed => PointerEvent::Press { x, y, button: button.into() },
                        ElementState::Released => PointerEvent::Release { x, y },
                    };
                    app.editor.push_pointer(pointer);
                }
                WindowEvent::KeyboardInput { input, .. } => {
                    if app.editor.apply(mapper.map_keyboard_input(&input)) == Flow::Quit {
                        driver.stop();
                        *control_flow = ControlFlow::Exit;
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared if driver.is_running() => {
                driver.frame(Instant::now(), &mut app);

                if app.render_failed {
                    driver.stop();
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}
