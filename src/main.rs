use std::collections::HashSet;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::map::Map;
use crate::player::{Input, Player};
use crate::renderer::{SCREEN_HEIGHT, SCREEN_WIDTH, render_frame};
use crate::scaler::{ScaleLut, blit_stretch, build_scale_lut};

mod map;
mod player;
mod renderer;
mod scaler;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    map: Map,
    player: Player,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Internal 640x480 buffer, stretched to the window on present
    fb: Vec<u32>,
    scale_lut: ScaleLut,

    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
}

impl Default for App {
    fn default() -> Self {
        Self {
            window: None,
            surface: None,
            map: Map::new(),
            player: Player::new(3.5, 3.5, 0.0),

            frame_counter: 0,
            last_fps_print: Instant::now(),

            fb: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            scale_lut: ScaleLut::empty(),

            keys_down: HashSet::new(),
            last_tick: Instant::now(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("Raycasting Engine")
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64));

        let window = Rc::new(event_loop.create_window(attributes).expect("create window"));

        let context = softbuffer::Context::new(window.clone()).expect("softbuffer context");
        let surface =
            softbuffer::Surface::new(&context, window.clone()).expect("softbuffer surface");

        let size = window.inner_size();
        self.scale_lut = build_scale_lut(
            size.width as usize,
            size.height as usize,
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
        );

        self.surface = Some(surface);
        self.window = Some(window);

        self.last_tick = Instant::now();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => {
                if let PhysicalKey::Code(code) = physical_key {
                    match state {
                        ElementState::Pressed => {
                            self.keys_down.insert(code);
                        }
                        ElementState::Released => {
                            self.keys_down.remove(&code);
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if !self.tick() {
                    event_loop.exit();
                    return;
                }

                let (window, surface) = match (&self.window, &mut self.surface) {
                    (Some(w), Some(s)) if w.id() == id => (w, s),
                    _ => return,
                };

                let size = window.inner_size();
                let (dw, dh) = (size.width as usize, size.height as usize);
                if dw == 0 || dh == 0 {
                    return; // Minimized window, skip drawing
                }

                surface
                    .resize(
                        NonZeroU32::new(dw as u32).unwrap(),
                        NonZeroU32::new(dh as u32).unwrap(),
                    )
                    .unwrap();

                render_frame(&mut self.fb, &self.map, &self.player);

                let mut buf = surface.buffer_mut().expect("buffer_mut");
                blit_stretch(&mut buf, dw, &self.fb, SCREEN_WIDTH, &self.scale_lut);

                buf.present().unwrap();

                // Print FPS
                self.frame_counter += 1;
                let now = Instant::now();
                if now.duration_since(self.last_fps_print).as_secs_f32() >= 1.0 {
                    let fps = self.frame_counter as f32
                        / now.duration_since(self.last_fps_print).as_secs_f32();
                    println!("FPS: {fps:.1}");
                    self.frame_counter = 0;
                    self.last_fps_print = now;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::Resized(new_size) => {
                let (dw, dh) = (new_size.width as usize, new_size.height as usize);
                self.scale_lut = build_scale_lut(dw, dh, SCREEN_WIDTH, SCREEN_HEIGHT);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl App {
    /// Advance the simulation one frame from the currently held keys.
    /// Returns false once the quit key is seen.
    fn tick(&mut self) -> bool {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        let input = Input {
            quit: self.keys_down.contains(&KeyCode::Escape),
            turn_left: self.keys_down.contains(&KeyCode::ArrowLeft),
            turn_right: self.keys_down.contains(&KeyCode::ArrowRight),
            forward: self.keys_down.contains(&KeyCode::ArrowUp),
            backward: self.keys_down.contains(&KeyCode::ArrowDown),
        };

        self.player.update(&input, dt, &self.map)
    }
}

fn main() {
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            // The one initialization failure we report; everything past
            // this point assumes a working display.
            println!("Failed to initialize graphics: {err}");
            std::process::exit(1);
        }
    };

    // Poll continuously: this is a game loop, frames are produced even
    // without OS events.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::default();
    let _ = event_loop.run_app(&mut app);
}
