//! Roto Box entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_toy {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use glam::Vec2;
    use roto_box::consts::*;
    use roto_box::renderer::{RenderState, build_scene};
    use roto_box::sim::{TickInput, WorldState, tick};
    use roto_box::tuning::Tuning;

    /// Toy instance holding all state
    struct Toy {
        state: WorldState,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// CSS pixel to canvas pixel scale
        dpr: f32,
    }

    impl Toy {
        fn new(seed: u64, screen_size: Vec2, dpr: f32) -> Self {
            Self {
                state: WorldState::new(seed, screen_size, Tuning::load()),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                dpr,
            }
        }

        /// Run simulation ticks at the fixed timestep
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.left_pressed = false;
                self.input.left_released = false;
                self.input.right_pressed = false;
                self.input.reset_camera = false;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state);
                match render_state.render(&vertices, &self.state.camera) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Roto Box starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size in physical pixels; all screen-space math
        // (camera offset, pointer) uses physical pixels too
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let toy = Rc::new(RefCell::new(Toy::new(
            seed,
            Vec2::new(width as f32, height as f32),
            dpr as f32,
        )));

        log::info!("World initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        toy.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, toy.clone());

        request_animation_frame(toy);

        log::info!("Roto Box running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, toy: Rc<RefCell<Toy>>) {
        // Mouse move: track the pointer in physical pixels
        {
            let toy = toy.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut t = toy.borrow_mut();
                let dpr = t.dpr;
                t.input.pointer =
                    Vec2::new(event.offset_x() as f32 * dpr, event.offset_y() as f32 * dpr);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down: left drags/spawns balls, right drops an obstacle
        {
            let toy = toy.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut t = toy.borrow_mut();
                match event.button() {
                    0 => {
                        t.input.left_pressed = true;
                        t.input.left_held = true;
                    }
                    2 => t.input.right_pressed = true,
                    _ => {}
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up
        {
            let toy = toy.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() == 0 {
                    let mut t = toy.borrow_mut();
                    t.input.left_released = true;
                    t.input.left_held = false;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Right click is obstacle spawn, not a context menu
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: arrows rotate/zoom the camera, R resets it
        {
            let toy = toy.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut t = toy.borrow_mut();
                match event.key().as_str() {
                    "ArrowRight" => {
                        t.input.rotate_cw = true;
                        event.prevent_default();
                    }
                    "ArrowLeft" => {
                        t.input.rotate_ccw = true;
                        event.prevent_default();
                    }
                    "ArrowUp" => {
                        t.input.zoom_in = true;
                        event.prevent_default();
                    }
                    "ArrowDown" => {
                        t.input.zoom_out = true;
                        event.prevent_default();
                    }
                    "r" | "R" => t.input.reset_camera = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut t = toy.borrow_mut();
                match event.key().as_str() {
                    "ArrowRight" => t.input.rotate_cw = false,
                    "ArrowLeft" => t.input.rotate_ccw = false,
                    "ArrowUp" => t.input.zoom_in = false,
                    "ArrowDown" => t.input.zoom_out = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(toy: Rc<RefCell<Toy>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(toy, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(toy: Rc<RefCell<Toy>>, time: f64) {
        {
            let mut t = toy.borrow_mut();

            let dt = if t.last_time > 0.0 {
                ((time - t.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            t.last_time = time;

            t.update(dt);
            t.render();
        }

        request_animation_frame(toy);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_toy::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Roto Box (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    // Headless smoke run so the native binary does something useful
    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use glam::Vec2;
    use roto_box::consts::SIM_DT;
    use roto_box::sim::{TickInput, WorldState, tick};
    use roto_box::tuning::Tuning;

    let mut state = WorldState::new(0xB0B0, Vec2::new(800.0, 600.0), Tuning::load());

    // Hold the left button for a second, then let things settle
    let spawning = TickInput {
        left_held: true,
        ..Default::default()
    };
    for _ in 0..120 {
        tick(&mut state, &spawning, SIM_DT);
    }
    for _ in 0..600 {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }

    log::info!(
        "Simulated {} ticks: {} balls, {} obstacles",
        state.time_ticks,
        state.balls.len(),
        state.obstacles.len()
    );
    assert_eq!(state.balls.len(), 120);
    println!("Headless demo OK: {} balls in the box", state.balls.len());
}
