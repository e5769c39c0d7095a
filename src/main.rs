//! Bounce Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use bounce_dodge::Settings;
    use bounce_dodge::audio::{AudioManager, SoundEffect};
    use bounce_dodge::consts::*;
    use bounce_dodge::persistence::{BestTimeStore, LocalStorageStore};
    use bounce_dodge::renderer::pipeline::viewport_to_arena;
    use bounce_dodge::renderer::{RenderState, scene};
    use bounce_dodge::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        store: LocalStorageStore,
        settings: Settings,
        accumulator: f64,
        last_time: f64,
        input: TickInput,
        last_phase: GamePhase,
        /// Last finished round beat the best time
        new_record: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let store = LocalStorageStore::new();
            let best = store.get_best_time();

            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_muted(!settings.sound_enabled);

            Self {
                state: GameState::new(seed, settings.tuning(), best),
                render_state: None,
                audio,
                store,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                last_phase: GamePhase::Welcome,
                new_record: false,
            }
        }

        /// Run simulation ticks for `dt_ms` of wall time
        fn update(&mut self, dt_ms: f64) {
            self.accumulator += dt_ms.clamp(0.0, MAX_FRAME_MS);

            let mut substeps = 0;
            while self.accumulator >= TICK_MS && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, TICK_MS);
                self.accumulator -= TICK_MS;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.use_slow = false;
                self.input.start = false;
                self.input.home = false;
            }

            for event in self.state.drain_events() {
                self.handle_event(&event);
            }

            let phase = self.state.phase;
            if phase != self.last_phase {
                if let Some(document) = document() {
                    show_screen(&document, screen_for(phase));
                }
                self.last_phase = phase;
            }
        }

        fn handle_event(&mut self, event: &GameEvent) {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
            match *event {
                GameEvent::RoundStarted => self.new_record = false,
                GameEvent::NewRecord { seconds } => {
                    self.new_record = true;
                    if let Err(e) = self.store.set_best_time(seconds) {
                        log::warn!("Best time not saved: {}", e);
                    }
                }
                _ => {}
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene::build(&self.state);
                match render_state.render(&vertices) {
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
            let Some(document) = document() else { return };
            let hud = self.state.hud();

            set_text(&document, "timer", &format!("Time: {}s", hud.elapsed_secs));
            set_text(&document, "enemyCount", &format!("Enemies: {}", hud.enemy_count));
            set_text(
                &document,
                "speed",
                &format!("Speed: {:.1}x", hud.speed_multiplier),
            );
            set_text(
                &document,
                "powerUpCounter",
                &format!("Slow charges: {}", hud.slow_charges),
            );
            set_text(&document, "bestScore", &format!("Best: {}s", hud.best_secs));

            if let Some(score) = hud.last_score {
                set_text(&document, "finalTime", &format!("Time survived: {}s", score));
                set_hidden(&document, "newRecord", !self.new_record);
            }
        }

        /// Begin a round with the current settings applied
        fn request_start(&mut self) {
            if self.state.phase != GamePhase::Playing {
                self.state.tuning = self.settings.tuning();
            }
            self.audio.resume();
            self.input.start = true;
        }

        fn toggle_sound(&mut self) -> bool {
            let enabled = self.settings.toggle_sound();
            self.audio.set_muted(!enabled);
            self.settings.save();
            enabled
        }
    }

    fn document() -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = if hidden {
                el.class_list().add_1("hidden")
            } else {
                el.class_list().remove_1("hidden")
            };
        }
    }

    fn screen_for(phase: GamePhase) -> &'static str {
        match phase {
            GamePhase::Welcome => "welcomeScreen",
            GamePhase::Playing => "gameScreen",
            GamePhase::GameOver => "gameOverScreen",
        }
    }

    /// Hide every `.screen` and reveal one
    fn show_screen(document: &Document, id: &str) {
        if let Ok(screens) = document.query_selector_all(".screen") {
            for i in 0..screens.length() {
                if let Some(el) = screens
                    .get(i)
                    .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
                {
                    let _ = el.class_list().add_1("hidden");
                }
            }
        }
        set_hidden(document, id, false);
    }

    fn sound_label(enabled: bool) -> String {
        format!("Sound: {}", if enabled { "ON" } else { "OFF" })
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Bounce Dodge starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(ARENA_WIDTH as u32);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(ARENA_HEIGHT as u32);
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (falls back to WebGL2)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                match instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await
                {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        let arena = (ARENA_WIDTH, ARENA_HEIGHT);
                        match RenderState::new(surface, &adapter, width, height, arena).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Renderer disabled: {}", e),
                        }
                    }
                    Err(e) => log::error!("No graphics adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        {
            let g = game.borrow();
            set_text(&document, "soundToggle", &sound_label(g.settings.sound_enabled));
            g.update_hud();
        }
        show_screen(&document, screen_for(GamePhase::Welcome));

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Bounce Dodge running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - canvas offset mapped into arena space
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let viewport = (
                    canvas_clone.client_width() as f32,
                    canvas_clone.client_height() as f32,
                );
                let (x, y) = viewport_to_arena(
                    event.offset_x() as f32,
                    event.offset_y() as f32,
                    (ARENA_WIDTH, ARENA_HEIGHT),
                    viewport,
                );
                game.borrow_mut().input.pointer = Some(glam::Vec2::new(x, y));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(document) = document() else { return };

        // Keyboard - arrows steer, R spends a slow charge
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                match code.as_str() {
                    "ArrowUp" => g.input.keys.up = true,
                    "ArrowDown" => g.input.keys.down = true,
                    "ArrowLeft" => g.input.keys.left = true,
                    "ArrowRight" => g.input.keys.right = true,
                    "KeyR" if g.state.phase == GamePhase::Playing => g.input.use_slow = true,
                    _ => return,
                }
                event.prevent_default();
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowUp" => g.input.keys.up = false,
                    "ArrowDown" => g.input.keys.down = false,
                    "ArrowLeft" => g.input.keys.left = false,
                    "ArrowRight" => g.input.keys.right = false,
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing #{} button", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["startButton", "restartButton"] {
            let game = game.clone();
            on_click(document, id, move || game.borrow_mut().request_start());
        }

        {
            let game = game.clone();
            on_click(document, "homeButton", move || {
                game.borrow_mut().input.home = true;
            });
        }

        on_click(document, "soundToggle", move || {
            let enabled = game.borrow_mut().toggle_sound();
            if let Some(document) = self::document() {
                set_text(&document, "soundToggle", &sound_label(enabled));
            }
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
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
            let dt_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                TICK_MS
            };
            g.last_time = time;

            g.update(dt_ms);
            g.render();
            g.update_hud();
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
    log::info!("Bounce Dodge (native) starting...");
    log::info!("Native mode runs a headless demo round - build for wasm32 to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5eed);
    demo::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use bounce_dodge::Tuning;
    use bounce_dodge::consts::TICK_MS;
    use bounce_dodge::persistence::{BestTimeStore, MemoryStore};
    use bounce_dodge::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use glam::Vec2;

    /// Give up after two simulated minutes
    const MAX_TICKS: u64 = 7_500;

    /// Point the pointer away from the closest enemy
    fn flee_target(state: &GameState) -> Vec2 {
        let player = state.player.pos;
        let nearest = state
            .enemies
            .iter()
            .min_by(|a, b| a.pos.distance_squared(player).total_cmp(&b.pos.distance_squared(player)));
        match nearest {
            Some(enemy) => {
                let away = (player - enemy.pos).normalize_or_zero();
                let center = Vec2::new(state.tuning.width, state.tuning.height) * 0.5;
                // Lean toward the middle so walls don't pin the ball
                player + away * 120.0 + (center - player) * 0.2
            }
            None => player,
        }
    }

    pub fn run(seed: u64) {
        let mut store = MemoryStore::new();
        let mut state = GameState::new(seed, Tuning::default(), store.get_best_time());

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, TICK_MS);

        let mut bounces = 0u32;
        let mut pickups = 0u32;
        while state.phase == GamePhase::Playing && state.time_ticks < MAX_TICKS {
            let input = TickInput {
                pointer: Some(flee_target(&state)),
                use_slow: state.slow_charges > 0,
                ..Default::default()
            };
            tick(&mut state, &input, TICK_MS);

            for event in state.drain_events() {
                match event {
                    GameEvent::EnemyBounced => bounces += 1,
                    GameEvent::PowerUpCollected { kind } => {
                        pickups += 1;
                        log::info!("Picked up {:?} at {:.1}s", kind, state.elapsed_ms / 1000.0);
                    }
                    GameEvent::SpeedIncreased { multiplier } => {
                        log::info!("Enemies now at {:.1}x", multiplier);
                    }
                    GameEvent::NewRecord { seconds } => {
                        if let Err(e) = store.set_best_time(seconds) {
                            log::warn!("Best time not saved: {}", e);
                        }
                    }
                    _ => {}
                }
            }
        }

        let hud = state.hud();
        log::info!(
            "Demo finished: {}s survived, {} enemies, {} bounces, {} power-ups, best {}s",
            hud.last_score.unwrap_or(hud.elapsed_secs),
            hud.enemy_count,
            bounces,
            pickups,
            store.get_best_time()
        );
    }
}
