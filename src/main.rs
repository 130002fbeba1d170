//! Gone Fishing entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(any(target_arch = "wasm32", test))]
use std::cell::RefCell;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Run `f` on the value unless something up the stack already borrows it.
/// Returns whether `f` ran.
#[cfg(any(target_arch = "wasm32", test))]
fn try_with_mut<T>(cell: &RefCell<T>, f: impl FnOnce(&mut T)) -> bool {
    match cell.try_borrow_mut() {
        Ok(mut value) => {
            f(&mut value);
            true
        }
        Err(_) => false,
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent};

    use gone_fishing::consts::*;
    use gone_fishing::sim::{GameEvent, GameState, TickInput, tick};
    use gone_fishing::{GameConfig, Hud, Overlay, Snapshot};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Events gathered since the last render
        events: Vec<GameEvent>,
        /// Pending animation frame request
        frame_id: Option<i32>,
        running: bool,
    }

    impl Game {
        fn new(seed: u64, config: GameConfig) -> Self {
            Self {
                state: GameState::new(seed, config),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                events: Vec::new(),
                frame_id: None,
                running: true,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.activate = false;
                self.input.pointer_x = None;
            }

            self.events.extend(self.state.take_events());
        }

        /// Hand the frame to the page's renderer, if it installed one
        fn render(&mut self) {
            let events = std::mem::take(&mut self.events);
            let Some(window) = web_sys::window() else {
                return;
            };
            let Ok(callback) = js_sys::Reflect::get(&window, &JsValue::from_str("renderFishing"))
            else {
                return;
            };
            let Some(callback) = callback.dyn_ref::<js_sys::Function>() else {
                return;
            };

            let snapshot = match Snapshot::capture(&self.state).to_json() {
                Ok(json) => json,
                Err(e) => {
                    log::warn!("Snapshot encode failed: {e}");
                    return;
                }
            };
            let events = serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string());
            if let Err(e) = callback.call2(
                &JsValue::NULL,
                &JsValue::from_str(&snapshot),
                &JsValue::from_str(&events),
            ) {
                log::warn!("renderFishing threw: {e:?}");
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = Hud::from_state(&self.state);

            let set = |id: &str, text: Option<&str>, class: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    match text {
                        Some(text) => {
                            el.set_text_content(Some(text));
                            let _ = el.set_attribute("class", class);
                        }
                        None => {
                            let _ = el.set_attribute("class", "hidden");
                        }
                    }
                }
            };

            set("fishing-score", hud.score.as_deref(), "hud-item");
            set(
                "fishing-timer",
                hud.timer.as_deref(),
                if hud.time_low { "hud-item low" } else { "hud-item" },
            );
            set(
                "fishing-instruction",
                hud.instruction.as_deref(),
                if hud.urgent { "hud-prompt urgent" } else { "hud-prompt" },
            );

            let start = matches!(hud.overlay, Some(Overlay::Start { .. }));
            let over = matches!(hud.overlay, Some(Overlay::GameOver { .. }));
            if let Some(el) = document.get_element_by_id("fishing-start") {
                let _ = el.set_attribute("class", if start { "" } else { "hidden" });
            }
            if let Some(el) = document.get_element_by_id("fishing-over") {
                let _ = el.set_attribute("class", if over { "" } else { "hidden" });
            }
            if let Some(Overlay::GameOver { final_score, .. }) = &hud.overlay {
                if let Some(el) = document.get_element_by_id("fishing-final-score") {
                    el.set_text_content(Some(final_score));
                }
            }
        }
    }

    /// An attached DOM listener, detached again on drop
    struct Listener {
        target: EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    }

    impl Listener {
        fn attach(target: &EventTarget, kind: &'static str, f: impl FnMut(Event) + 'static) -> Self {
            let callback = Closure::<dyn FnMut(Event)>::new(f);
            let _ = target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref());
            Self {
                target: target.clone(),
                kind,
                callback,
            }
        }
    }

    impl Drop for Listener {
        fn drop(&mut self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
        }
    }

    /// A mounted game: its state plus everything wired to the page
    struct App {
        game: Rc<RefCell<Game>>,
        _listeners: Vec<Listener>,
    }

    thread_local! {
        static APP: RefCell<Option<App>> = const { RefCell::new(None) };
        /// A halt arrived while the frame loop held the game
        static HALT_PENDING: Cell<bool> = const { Cell::new(false) };
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        // A second mount keeps the logger from the first
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Gone Fishing starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("fishing-canvas")
            .ok_or_else(|| JsValue::from_str("no #fishing-canvas"))?
            .dyn_into()?;

        // Replace any previous mount
        teardown();

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, GameConfig::load())));
        fit_canvas(&canvas, &mut game.borrow_mut());
        log::info!("Game initialized with seed: {}", seed);

        let listeners = setup_input_handlers(&window, &document, &canvas, game.clone());

        game.borrow_mut().update_hud();
        APP.with(|app| {
            *app.borrow_mut() = Some(App {
                game: game.clone(),
                _listeners: listeners,
            })
        });

        request_animation_frame(game);
        log::info!("Gone Fishing running!");
        Ok(())
    }

    /// Stop the loop, cancel session timers, and detach every listener
    pub fn teardown() {
        let Some(app) = APP.with(|app| app.borrow_mut().take()) else {
            return;
        };
        halt(&app.game);
        drop(app);
        log::info!("Gone Fishing unmounted");
    }

    /// Stop the loop and the session clock, leaving listeners attached.
    /// Called from inside `renderFishing`, the frame loop finishes the job.
    fn halt(game: &Rc<RefCell<Game>>) {
        let halted = super::try_with_mut(game, |g| {
            g.running = false;
            g.state.stop();
            if let (Some(window), Some(id)) = (web_sys::window(), g.frame_id.take()) {
                let _ = window.cancel_animation_frame(id);
            }
        });
        if !halted {
            log::debug!("Game busy, halting after this frame");
            HALT_PENDING.with(|pending| pending.set(true));
        }
    }

    /// Whether `game` is still the mounted one
    fn is_mounted(game: &Rc<RefCell<Game>>) -> bool {
        APP.with(|app| {
            app.borrow()
                .as_ref()
                .is_some_and(|a| Rc::ptr_eq(&a.game, game))
        })
    }

    /// Size the canvas to its container and tell the simulation
    fn fit_canvas(canvas: &HtmlCanvasElement, game: &mut Game) {
        let (w, h) = match canvas.parent_element() {
            Some(parent) => (parent.client_width(), parent.client_height()),
            None => (canvas.client_width(), canvas.client_height()),
        };
        canvas.set_width(w.max(0) as u32);
        canvas.set_height(h.max(0) as u32);
        game.state.resize(w as f32, h as f32);
    }

    /// Touch x relative to the canvas
    fn touch_x(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<f32> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(touch.client_x() as f32 - rect.left() as f32)
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        document: &web_sys::Document,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Vec<Listener> {
        let mut listeners = Vec::new();

        // Viewport resize
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listeners.push(Listener::attach(window, "resize", move |_event| {
                fit_canvas(&canvas_clone, &mut game.borrow_mut());
            }));
        }

        // Mouse move - aim the rod
        {
            let game = game.clone();
            listeners.push(Listener::attach(canvas, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    game.borrow_mut().input.pointer_x = Some(event.offset_x() as f32);
                }
            }));
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listeners.push(Listener::attach(canvas, "touchmove", move |event| {
                event.prevent_default();
                if let Some(x) = event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|e| touch_x(&canvas_clone, e))
                {
                    game.borrow_mut().input.pointer_x = Some(x);
                }
            }));
        }

        // Click - cast or reel
        {
            let game = game.clone();
            listeners.push(Listener::attach(canvas, "click", move |_event| {
                game.borrow_mut().input.activate = true;
            }));
        }

        // Touch start - cast or reel
        {
            let game = game.clone();
            listeners.push(Listener::attach(canvas, "touchstart", move |event| {
                event.prevent_default();
                game.borrow_mut().input.activate = true;
            }));
        }

        // Start / play-again buttons
        for id in ["fishing-start-btn", "fishing-again-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                listeners.push(Listener::attach(&btn, "click", move |_event| {
                    let mut g = game.borrow_mut();
                    g.state.start();
                    g.accumulator = 0.0;
                    g.input = TickInput::default();
                }));
            }
        }

        // Page going away; a listener cannot detach itself mid-call
        {
            let game = game.clone();
            listeners.push(Listener::attach(window, "pagehide", move |_event| {
                halt(&game);
            }));
        }

        // Restored from the back/forward cache: restart the loop on the start screen
        listeners.push(Listener::attach(window, "pageshow", move |_event| {
            let resume = {
                let mut g = game.borrow_mut();
                if g.running {
                    false
                } else {
                    g.running = true;
                    g.last_time = 0.0;
                    g.accumulator = 0.0;
                    g.input = TickInput::default();
                    true
                }
            };
            if resume {
                log::info!("Page restored, resuming");
                request_animation_frame(game.clone());
            }
        }));

        listeners
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let id = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
        handle.borrow_mut().frame_id = id.ok();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame_id = None;
            if !g.running {
                return;
            }

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        // The page may have unmounted or hidden us from inside renderFishing
        if !is_mounted(&game) || HALT_PENDING.with(|pending| pending.replace(false)) {
            halt(&game);
            return;
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Detach the game from the page (for hosts that unmount the canvas)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn unmount() {
    wasm_game::teardown();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gone_fishing::GameConfig;
    use gone_fishing::consts::SIM_DT;
    use gone_fishing::sim::{GameEvent, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Gone Fishing (native) starting...");
    log::info!("Native mode runs a headless autopilot session - run with `trunk serve` for web version");

    // Usage: gone-fishing [config.json] [seed]
    let args: Vec<String> = std::env::args().collect();
    let config = GameConfig::load(args.get(1).map(std::path::Path::new));
    let seed = args
        .get(2)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let max_ticks = (u64::from(config.session_seconds) + 2) * 60;
    let mut state = GameState::with_field(seed, config, 800.0, 600.0);
    state.start();

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut catches = 0u32;
    let mut ticks = 0u64;
    while !state.game_over && ticks < max_ticks {
        tick(&mut state, &input, SIM_DT);
        ticks += 1;
        for event in state.take_events() {
            if let GameEvent::Caught { points, .. } = event {
                catches += 1;
                log::debug!("Catch #{catches} worth {points}");
            }
        }
    }

    println!(
        "seed {seed}: {catches} fish landed, final score {}",
        state.score
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_with_mut_runs_when_free() {
        let cell = RefCell::new(1);
        assert!(try_with_mut(&cell, |v| *v += 1));
        assert_eq!(*cell.borrow(), 2);
    }

    #[test]
    fn test_try_with_mut_skips_while_borrowed() {
        let cell = RefCell::new(1);
        let held = cell.borrow_mut();
        assert!(!try_with_mut(&cell, |v| *v += 1));
        drop(held);
        assert_eq!(*cell.borrow(), 1);
    }
}
