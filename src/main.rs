//! Catch Me entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, EventTarget, KeyboardEvent, PageTransitionEvent, PointerEvent};

    use catch_me::Tuning;
    use catch_me::consts::MAX_FRAME_MS;
    use catch_me::sim::{ArenaState, GameEvent, InputEvent, ShapeKind, advance, apply_input, resume, teardown};
    use catch_me::ui::DomView;

    /// Game instance holding all state
    struct Game {
        state: ArenaState,
        view: DomView,
        last_time: f64,
    }

    impl Game {
        fn new(state: ArenaState, view: DomView) -> Self {
            Self {
                state,
                view,
                last_time: 0.0,
            }
        }

        /// Advance the arena clock by the frame delta
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;
            advance(&mut self.state, dt);
        }

        /// Log notable events and refresh the DOM
        fn render(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::TargetMoved { .. } | GameEvent::MoveBlocked => {}
                    other => log::debug!("{:?}", other),
                }
            }
            self.view.sync(&self.state);
        }

        fn input(&mut self, input: InputEvent) {
            apply_input(&mut self.state, &input);
        }
    }

    fn window_size() -> (f32, f32) {
        let Some(window) = web_sys::window() else {
            return (0.0, 0.0);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as f32, h as f32)
    }

    /// Register `handler` for `event` on `target` for the page lifetime
    fn listen<F>(target: &EventTarget, event: &str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Failed to listen for {}", event);
        }
        closure.forget();
    }

    /// Client coordinates of a pointer event
    fn pointer_xy(event: &Event) -> Option<(f32, f32)> {
        let event = event.dyn_ref::<PointerEvent>()?;
        Some((event.client_x() as f32, event.client_y() as f32))
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Catch Me starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - nothing to render into");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(view) = DomView::new(document.clone()) else {
            log::error!("Arena markup missing (#arena, #target, #drag-preview, #modal)");
            return;
        };

        let mut state = ArenaState::new(Tuning::load());
        let (w, h) = window_size();
        apply_input(&mut state, &InputEvent::Resize { width: w, height: h });

        let game = Rc::new(RefCell::new(Game::new(state, view)));
        log::info!("Arena ready ({}x{})", w, h);

        setup_pointer_handlers(game.clone());
        setup_palette(game.clone());
        setup_buttons(&document, game.clone());
        setup_window_handlers(game.clone());

        request_animation_frame(game);

        log::info!("Catch Me running!");
    }

    fn setup_pointer_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            listen(&window, "pointermove", move |event: Event| {
                if let Some((x, y)) = pointer_xy(&event) {
                    game.borrow_mut().input(InputEvent::PointerMove { x, y });
                }
            });
        }

        listen(&window, "pointerup", move |event: Event| {
            if let Some((x, y)) = pointer_xy(&event) {
                game.borrow_mut().input(InputEvent::PointerUp { x, y });
            }
        });
    }

    fn setup_palette(game: Rc<RefCell<Game>>) {
        for kind in ShapeKind::ALL {
            let Some(item) = game.borrow().view.palette_item(kind) else {
                log::warn!("No palette item for {}", kind.as_str());
                continue;
            };
            let game = game.clone();
            listen(&item, "pointerdown", move |event: Event| {
                event.prevent_default();
                if let Some((x, y)) = pointer_xy(&event) {
                    game.borrow_mut().input(InputEvent::PaletteDown { kind, x, y });
                }
            });
        }
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let buttons = [
            ("target", InputEvent::TargetClick),
            ("switch-btn", InputEvent::SwitchRoles),
            ("close-btn", InputEvent::CloseModal),
        ];
        for (id, input) in buttons {
            let Some(el) = document.get_element_by_id(id) else {
                log::warn!("Missing #{}", id);
                continue;
            };
            let game = game.clone();
            listen(&el, "click", move |_event: Event| {
                game.borrow_mut().input(input.clone());
            });
        }
    }

    fn setup_window_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard: rotate the dragged shape, dismiss the modal
        {
            let game = game.clone();
            listen(&window, "keydown", move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let input = match event.key().as_str() {
                    "r" | "R" => InputEvent::RotateDrag,
                    "Escape" => InputEvent::CloseModal,
                    _ => return,
                };
                game.borrow_mut().input(input);
            });
        }

        {
            let game = game.clone();
            listen(&window, "resize", move |_event: Event| {
                let (width, height) = window_size();
                game.borrow_mut().input(InputEvent::Resize { width, height });
            });
        }

        // Page unloading for good: cancel every pending arena timer.
        // A page kept in the back/forward cache stays paused instead.
        {
            let game = game.clone();
            listen(&window, "pagehide", move |event: Event| {
                let persisted = event
                    .dyn_ref::<PageTransitionEvent>()
                    .is_some_and(|e| e.persisted());
                if persisted {
                    log::info!("Page cached - arena paused");
                    return;
                }
                teardown(&mut game.borrow_mut().state);
                log::info!("Arena timers cancelled");
            });
        }

        // Restored from the back/forward cache
        listen(&window, "pageshow", move |_event: Event| {
            let mut g = game.borrow_mut();
            // Skip the frame gap spent in the cache
            g.last_time = 0.0;
            resume(&mut g.state);
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
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
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Catch Me (native) starting...");
    log::info!("Native mode has no renderer - run with `trunk serve` for the web version");

    println!("\nRunning scripted arena session...");
    scripted_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless smoke run through both modes
#[cfg(not(target_arch = "wasm32"))]
fn scripted_session() {
    use catch_me::Tuning;
    use catch_me::sim::{ArenaState, GameMode, InputEvent, ShapeKind, advance, apply_input};

    let mut state = ArenaState::new(Tuning::default());
    let script = [
        InputEvent::Resize { width: 1280.0, height: 720.0 },
        InputEvent::PaletteDown { kind: ShapeKind::T, x: 100.0, y: 680.0 },
        InputEvent::PointerMove { x: 900.0, y: 300.0 },
        InputEvent::PointerUp { x: 900.0, y: 300.0 },
        // Sneak up on the target from the left
        InputEvent::PointerMove { x: 560.0, y: 360.0 },
        InputEvent::PointerMove { x: 600.0, y: 360.0 },
        InputEvent::TargetClick,
        InputEvent::SwitchRoles,
        InputEvent::PointerMove { x: 200.0, y: 200.0 },
    ];
    for input in &script {
        apply_input(&mut state, input);
        advance(&mut state, 16.0);
    }

    // Let the target hunt the pointer down
    let mut elapsed = 0.0;
    while !state.is_captured() && elapsed < 10_000.0 {
        advance(&mut state, 16.0);
        elapsed += 16.0;
    }

    for event in state.drain_events() {
        println!("  {:?}", event);
    }

    assert_eq!(state.mode, GameMode::Chase);
    assert!(state.is_captured(), "chase should catch a stationary pointer");
    assert_eq!(state.obstacles.len(), 1);
    println!("✓ Scripted session passed ({:.0}ms of chase)", elapsed);
}
