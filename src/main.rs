//! RPS Arena entry point
//!
//! Web: creates the canvas, wires buttons and HUD, drives frames with
//! requestAnimationFrame. Native: runs a headless simulation to completion.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

    use rps_arena::render::CanvasRenderer;
    use rps_arena::sim::{Driver, Engine, FrameScheduler, PlayerKind, PopulationCounts};
    use rps_arena::{Settings, SimError};

    type FrameCallback = Closure<dyn FnMut(f64)>;
    type App = Driver<RafScheduler, CanvasRenderer>;

    /// Frames come from requestAnimationFrame
    struct RafScheduler {
        window: Window,
        /// Filled once the app exists; the callback holds a weak ref to it
        callback: Rc<RefCell<Option<FrameCallback>>>,
    }

    impl FrameScheduler for RafScheduler {
        type Handle = i32;

        fn request_frame(&mut self) -> Option<i32> {
            let slot = self.callback.borrow();
            let callback = slot.as_ref()?;
            match self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                Ok(handle) => Some(handle),
                Err(e) => {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                    None
                }
            }
        }

        fn cancel_frame(&mut self, handle: i32) {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }

    fn platform(e: JsValue) -> SimError {
        SimError::Platform(format!("{:?}", e))
    }

    pub fn run() -> Result<(), SimError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&format!("logger init: {}", e)));
        }

        log::info!("RPS Arena starting...");

        let window = web_sys::window().ok_or_else(|| SimError::Platform("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| SimError::Platform("no document".into()))?;
        let body = document
            .body()
            .ok_or_else(|| SimError::Platform("no body".into()))?;

        let settings = Settings::load();

        // Canvas fills the window minus a margin, sized once
        let inner_w = window.inner_width().map_err(platform)?.as_f64().unwrap_or(0.0);
        let inner_h = window.inner_height().map_err(platform)?.as_f64().unwrap_or(0.0);
        let (width, height) = settings.canvas_size(inner_w as f32, inner_h as f32);

        // Bounds are validated before anything touches the page
        let engine = Engine::new(settings, width, height)?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(platform)?
            .dyn_into()
            .map_err(|_| SimError::Platform("not a canvas".into()))?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let renderer = CanvasRenderer::new(&canvas)?;
        body.append_child(&canvas).map_err(platform)?;

        let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            window: window.clone(),
            callback: slot.clone(),
        };
        let app: Rc<RefCell<App>> = Rc::new(RefCell::new(Driver::new(engine, scheduler, renderer)));

        {
            let weak = Rc::downgrade(&app);
            *slot.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                if let Some(app) = weak.upgrade() {
                    app.borrow_mut().on_frame();
                }
            }));
        }

        bind_hud(&document, &app);
        setup_buttons(&document, &app);
        setup_keyboard(&window, &app);

        app.borrow_mut().init();

        log::info!("RPS Arena running!");
        Ok(())
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Push counts, winner and pause state into the DOM as they change
    fn bind_hud(document: &Document, app: &Rc<RefCell<App>>) {
        let mut app = app.borrow_mut();
        let publisher = app.publisher_mut();

        let doc = document.clone();
        publisher.subscribe_counts(move |counts: &PopulationCounts| {
            set_text(&doc, "count-rock", &counts.rock.to_string());
            set_text(&doc, "count-paper", &counts.paper.to_string());
            set_text(&doc, "count-scissors", &counts.scissors.to_string());
        });

        let doc = document.clone();
        publisher.subscribe_winner(move |winner: &Option<PlayerKind>| {
            let text = winner.map(|k| format!("{} wins!", k.as_str())).unwrap_or_default();
            set_text(&doc, "winner", &text);
        });

        let doc = document.clone();
        publisher.subscribe_paused(move |paused: &bool| {
            set_text(&doc, "pause-btn", if *paused { "Resume" } else { "Pause" });
        });
    }

    fn setup_buttons(document: &Document, app: &Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().toggle_pause();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(window: &Window, app: &Rc<RefCell<App>>) {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut app = app.borrow_mut();
            match event.key().as_str() {
                " " | "Escape" => app.toggle_pause(),
                "r" | "R" => app.restart(),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = web_app::run() {
        log::error!("RPS Arena failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Native: headless run, optional settings JSON path as the first argument
#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), rps_arena::SimError> {
    use rps_arena::render::FrameRecorder;
    use rps_arena::sim::{Driver, Engine, ManualScheduler, run_headless};
    use rps_arena::Settings;

    /// Canvas size for headless runs
    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 600.0;
    /// Frames per progress log line
    const BATCH: u64 = 500;
    /// Give up after this many frames
    const MAX_FRAMES: u64 = 200_000;

    env_logger::init();
    log::info!("RPS Arena (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading settings from {}", path);
            Settings::from_json(&std::fs::read_to_string(path)?)?
        }
        None => Settings::default(),
    };

    let engine = Engine::new(settings, WIDTH, HEIGHT)?;
    let mut driver = Driver::new(engine, ManualScheduler::new(), FrameRecorder::new());
    driver.init();

    let mut frames = 0;
    while driver.is_scheduled() && frames < MAX_FRAMES {
        frames += run_headless(&mut driver, BATCH);
        let counts = driver.engine().counts();
        log::info!(
            "frame {}: rock {} / paper {} / scissors {}",
            frames,
            counts.rock,
            counts.paper,
            counts.scissors
        );
    }

    let snapshot = driver.engine().snapshot();
    match snapshot.winner {
        Some(kind) => log::info!("{} wins after {} ticks", kind.as_str(), snapshot.ticks),
        None => log::warn!("No winner after {} frames", frames),
    }
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
