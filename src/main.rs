//! Jellyfish Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use jellyfish_dash::Tuning;
    use jellyfish_dash::consts::*;
    use jellyfish_dash::input::InputState;
    use jellyfish_dash::platform::assets::Assets;
    use jellyfish_dash::platform::browser;
    use jellyfish_dash::renderer::{CanvasRenderer, scene};
    use jellyfish_dash::sim::{GameEvent, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        input: InputState,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, renderer: CanvasRenderer) -> Self {
            Self {
                state: GameState::new(seed, tuning),
                renderer,
                input: InputState::default(),
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let tuning = &self.state.tuning;
                let input = self.input.snapshot(
                    tuning.touch_sensitivity,
                    tuning.player_speed,
                    self.state.paused,
                );
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                // Drop the backlog rather than fast-forwarding
                self.accumulator = 0.0;
            }

            for event in self.state.drain_events() {
                if let GameEvent::GameOver { score } = event {
                    log::info!("Run ended at {} points (seed {})", score, self.state.seed);
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            let cmds = scene::build(&self.state);
            if let Err(e) = self.renderer.render(&cmds) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    pub async fn run() -> anyhow::Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| anyhow::anyhow!("failed to init logger: {}", e))?;

        log::info!("Jellyfish Dash starting...");

        let canvas = browser::canvas()?;
        let ctx = browser::context(&canvas)?;
        let tuning = Tuning::load(canvas.get_attribute("data-tuning"));

        // Block on images so the first frame never draws a missing sprite
        let assets = Assets::load().await?;
        let renderer =
            CanvasRenderer::new(ctx, assets, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, renderer)));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone())?;
        setup_touch(&canvas, game.clone())?;
        setup_auto_pause(game.clone())?;

        request_animation_frame(game);

        log::info!("Jellyfish Dash running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> anyhow::Result<()> {
        let window = browser::window()?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.keys.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow::anyhow!("keydown listener: {:?}", e))?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.keys.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow::anyhow!("keyup listener: {:?}", e))?;
            closure.forget();
        }
        Ok(())
    }

    /// First touch point in canvas logical coordinates
    fn touch_point(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        // Scale CSS pixels to the fixed logical resolution
        let x = (touch.client_x() as f64 - rect.left()) * CANVAS_WIDTH as f64 / rect.width();
        let y = (touch.client_y() as f64 - rect.top()) * CANVAS_HEIGHT as f64 / rect.height();
        Some(Vec2::new(x as f32, y as f32))
    }

    fn setup_touch(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> anyhow::Result<()> {
        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(point) = touch_point(&canvas_clone, &event) {
                    game.borrow_mut().input.touch.start(point);
                }
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow::anyhow!("touchstart listener: {:?}", e))?;
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(point) = touch_point(&canvas_clone, &event) {
                    game.borrow_mut().input.touch.move_to(point);
                }
            });
            canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow::anyhow!("touchmove listener: {:?}", e))?;
            closure.forget();
        }

        // Touch end / cancel
        for name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input.touch.end();
            });
            canvas
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow::anyhow!("{} listener: {:?}", name, e))?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> anyhow::Result<()> {
        let window = browser::window()?;
        let document = browser::document()?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().input.request_auto_pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            document
                .add_event_listener_with_callback(
                    "visibilitychange",
                    closure.as_ref().unchecked_ref(),
                )
                .map_err(|e| anyhow::anyhow!("visibilitychange listener: {:?}", e))?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.request_auto_pause();
                log::info!("Auto-paused (window blur)");
            });
            window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow::anyhow!("blur listener: {:?}", e))?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Ok(window) = browser::window() else {
            log::error!("No window, game loop stopped");
            return;
        };
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

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), wasm_bindgen::JsValue> {
    wasm_game::run().await.map_err(|e| {
        log::error!("Startup failed: {:#}", e);
        jellyfish_dash::platform::browser::to_js(e)
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Jellyfish Dash (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted smoke run of the simulation without a canvas
#[cfg(not(target_arch = "wasm32"))]
fn headless_run() {
    use jellyfish_dash::Tuning;
    use jellyfish_dash::consts::SIM_DT;
    use jellyfish_dash::sim::{GameEvent, GameState, TickInput, tick};

    const TICKS: u32 = 60 * 60;

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    let mut state = GameState::new(seed, Tuning::load());

    // Sweep around the arena, changing direction every two seconds
    let patterns = [
        (true, false, false, true),
        (false, true, true, false),
        (false, false, true, false),
        (true, false, false, false),
    ];
    let (mut hits, mut catches, mut game_overs) = (0u32, 0u32, 0u32);
    for t in 0..TICKS {
        let (up, down, left, right) = patterns[(t / 120) as usize % patterns.len()];
        let input = TickInput {
            up,
            down,
            left,
            right,
            ..Default::default()
        };
        tick(&mut state, &input);
        for event in state.drain_events() {
            match event {
                GameEvent::Hit { .. } => hits += 1,
                GameEvent::JellyfishCaught { .. } => catches += 1,
                GameEvent::GameOver { .. } => game_overs += 1,
                _ => {}
            }
        }
    }

    log::info!(
        "Simulated {:.0}s: {} jellyfish, {} hits, {} game overs",
        TICKS as f32 * SIM_DT,
        catches,
        hits,
        game_overs
    );
    match serde_json::to_string(&state.player) {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Could not serialize player: {}", e),
    }
}
