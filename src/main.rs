//! Gateroids entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use gateroids::consts::*;
    use gateroids::renderer::SdfRenderState;
    use gateroids::settings::Settings;
    use gateroids::sim::{GamePhase, GameState, InputState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<SdfRenderState>,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: InputState,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                settings: Settings::load(),
                accumulator: 0.0,
                last_time: 0.0,
                input: InputState::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.pause = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_idx = self.frame_index;
            let oldest_time = self.frame_times[oldest_idx];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let thrust = self.input.thrust && self.state.phase == GamePhase::Playing;
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, &self.settings, thrust, time) {
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

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            // Update enemy count
            if let Some(el) = document
                .query_selector("#hud-enemies .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&self.state.enemy_count().to_string()));
            }

            // Update FPS
            if let Some(el) = document.get_element_by_id("hud-fps") {
                let class = if self.settings.show_fps {
                    "hud-item"
                } else {
                    "hud-item hidden"
                };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.fps.to_string()));
            }

            // Show/hide pause menu
            if let Some(el) = document.get_element_by_id("pause-menu") {
                if self.state.phase == GamePhase::Paused {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Show/hide game over
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed);
            self.accumulator = 0.0;
            self.input = InputState::default();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gateroids starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        log::info!("Game initialized with seed: {}", seed);

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

        let render_state = SdfRenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        // Set up input handlers
        setup_input_handlers(game.clone());

        // Set up restart button
        setup_restart_button(game.clone());

        // Set up auto-pause on visibility change
        setup_auto_pause(game.clone());

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Gateroids running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        // Keyboard down - held flags set, one-shots latched
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => {
                        g.input.rotate_left = true;
                        event.prevent_default();
                    }
                    "ArrowRight" => {
                        g.input.rotate_right = true;
                        event.prevent_default();
                    }
                    "ArrowUp" => {
                        g.input.thrust = true;
                        event.prevent_default();
                    }
                    "ArrowDown" => {
                        g.input.reverse = true;
                        event.prevent_default();
                    }
                    " " => {
                        g.input.fire_laser = true;
                        event.prevent_default();
                    }
                    "g" | "G" => g.input.fire_gummi = true,
                    "Escape" => g.input.pause = true,
                    "r" | "R" => {
                        if g.state.phase == GamePhase::GameOver {
                            let seed = js_sys::Date::now() as u64;
                            g.restart(seed);
                            log::info!("Game restarted with seed: {}", seed);
                        }
                    }
                    "f" | "F" => {
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    "s" | "S" => {
                        g.settings.starfield = !g.settings.starfield;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up - held flags released
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.rotate_left = false,
                    "ArrowRight" => g.input.rotate_right = false,
                    "ArrowUp" => g.input.thrust = false,
                    "ArrowDown" => g.input.reverse = false,
                    " " => g.input.fire_laser = false,
                    "g" | "G" => g.input.fire_gummi = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        // Key-up events are lost while hidden, so drop held keys too
                        g.input = InputState {
                            pause: true,
                            ..Default::default()
                        };
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.input = InputState {
                        pause: true,
                        ..Default::default()
                    };
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gateroids (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning headless demo...");
    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use gateroids::consts::SIM_DT;
    use gateroids::sim::{GameState, InputState, tick};

    // Ten seconds of a pilot holding thrust and the trigger
    let mut state = GameState::new(0xC0FFEE);
    let input = InputState {
        thrust: true,
        fire_laser: true,
        ..Default::default()
    };

    let ticks = (10.0 / SIM_DT) as u64;
    for _ in 0..ticks {
        tick(&mut state, &input, SIM_DT);
    }

    println!(
        "✓ {} ticks simulated: phase {:?}, {} entities live, {} enemies left",
        state.time_ticks,
        state.phase,
        state.entities.len(),
        state.enemy_count()
    );
}
