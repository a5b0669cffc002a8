//! Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use invaders::audio::{self, AudioManager};
    use invaders::platform::{Keyboard, viewport_size};
    use invaders::renderer::{FrameBuilder, RenderState};
    use invaders::sim::{GameEvent, World};
    use invaders::{GameError, Settings};

    /// Element id of the full-window canvas
    const CANVAS_ID: &str = "playground";

    /// Game instance holding all state
    struct Game {
        world: World,
        render_state: RenderState,
        frame: FrameBuilder,
        keyboard: Keyboard,
        audio: AudioManager,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Advance one frame and react to what happened
        fn update(&mut self) {
            let input = self.keyboard.snapshot();
            self.world.tick(&input);

            for event in self.world.take_events() {
                match event {
                    GameEvent::PlayerFired => self.audio.play(),
                    GameEvent::PlayerDestroyed => log::info!(
                        "Player destroyed after {} ticks",
                        self.world.tick_count()
                    ),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.world.draw(&mut self.frame);
            match self.render_state.render(&self.frame) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Fit canvas, surface and world to the window, then redraw once
        fn resize_canvas(&mut self, width: u32, height: u32) {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.render_state.resize(width, height);

            let size = Vec2::new(width as f32, height as f32);
            self.frame.resize(size);
            self.world.resize(size);
            self.render();
        }
    }

    fn platform(msg: &str) -> GameError {
        GameError::Platform(msg.to_string())
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Invaders starting...");

        if let Err(e) = start().await {
            log::error!("Invaders failed to start: {e}");
        }
    }

    async fn start() -> Result<(), GameError> {
        let settings = Settings::load();
        // Write back so every key is visible (and editable) in LocalStorage
        settings.save();

        let window = web_sys::window().ok_or_else(|| platform("no window"))?;
        let document = window.document().ok_or_else(|| platform("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| platform("no #playground canvas"))?
            .dyn_into()
            .map_err(|_| platform("#playground is not a canvas"))?;

        let (width, height) = viewport_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| GameError::Platform(format!("failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GameError::Platform(format!("failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let size = Vec2::new(width as f32, height as f32);
        let game = Rc::new(RefCell::new(Game {
            world: World::new(size, seed),
            render_state,
            frame: FrameBuilder::new(size),
            keyboard: Keyboard::new(),
            audio: AudioManager::new(&settings),
            canvas,
        }));

        setup_input_handlers(&window, game.clone());
        setup_resize_handler(&window, game.clone());
        game.borrow_mut().render();

        // The loop waits for the laser, but never longer than the timeout
        match audio::load_sound(&settings.sound_url, settings.sound_timeout_ms).await {
            Ok(sound) => game.borrow_mut().audio.set_sound(sound),
            Err(e) => log::warn!("{e}; using synthesized laser"),
        }

        request_animation_frame(game);
        log::info!("Invaders running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        for (event_name, down) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let handled = game
                    .borrow_mut()
                    .keyboard
                    .handle(&event.key(), event.key_code(), down);
                if handled {
                    // Arrows and space would otherwise scroll the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-ups are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keyboard.release_all();
                log::debug!("Released keys (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = viewport_size(&window_clone);
            game.borrow_mut().resize_canvas(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window disappeared; stopping the game loop");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
        }

        request_animation_frame(game);
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
    log::info!("Invaders (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    run_headless(HEADLESS_TICKS, HEADLESS_SEED);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Length of the headless demo (one minute at 60 fps)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_TICKS: u64 = 3600;
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_SEED: u64 = 1978;

/// Play a scripted game without a browser and report what happened
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(ticks: u64, seed: u64) {
    use glam::Vec2;
    use invaders::platform::viewport_size;
    use invaders::renderer::FrameBuilder;
    use invaders::sim::{GameEvent, TickInput, World};

    let (width, height) = viewport_size();
    let size = Vec2::new(width as f32, height as f32);
    let mut world = World::new(size, seed);
    let mut frame = FrameBuilder::new(size);
    let mut shots_fired = 0u64;

    for tick in 0..ticks {
        // Sweep left and right while firing in bursts
        let sweep_right = (tick / 240) % 2 == 0;
        let input = TickInput {
            left: !sweep_right,
            right: sweep_right,
            fire: tick % 20 < 5,
        };
        world.tick(&input);

        for event in world.take_events() {
            match event {
                GameEvent::PlayerFired => shots_fired += 1,
                GameEvent::PlayerDestroyed => {
                    log::info!("Player destroyed at tick {}", world.tick_count());
                }
            }
        }

        if world.tick_count() % 600 == 0 {
            world.draw(&mut frame);
            log::info!(
                "tick {:>5}: {:>2} invaders, {:>3} bullets, {} rects drawn",
                world.tick_count(),
                world.invader_count(),
                world.bullet_count(),
                frame.rect_count()
            );
        }
    }

    println!(
        "\nHeadless run: {} ticks, {} shots fired, {} invaders left, player {}",
        world.tick_count(),
        shots_fired,
        world.invader_count(),
        if world.player().is_some() { "alive" } else { "destroyed" }
    );
}
