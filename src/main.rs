//! Lane Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use lane_catch::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use lane_catch::renderer::CanvasRender;
    use lane_catch::sim::LaneTable;
    use lane_catch::{Game, Settings};

    /// Browser-side state: the game plus its renderer
    struct App {
        game: Game,
        renderer: CanvasRender,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Catch starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let settings = Settings::load();
        let lanes = LaneTable::for_canvas(CANVAS_WIDTH, CANVAS_HEIGHT);
        // Bad lane geometry or bindings is a build error, not something to play through
        let game = Game::new(settings, lanes).expect("invalid game configuration");
        let renderer = CanvasRender::new(&canvas).expect("Failed to get 2d context");

        log::info!(
            "Game initialized ({} controls)",
            game.settings.scheme.as_str()
        );

        let app = Rc::new(RefCell::new(App { game, renderer }));

        setup_input_handlers(app.clone());

        // Start game loop
        request_animation_frame(app);

        log::info!("Lane Catch running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                app.borrow_mut().game.key_down(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-ups are lost while unfocused, so release everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.input.clear();
                log::info!("Input cleared (window blur)");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut app = app.borrow_mut();
            let App { game, renderer } = &mut *app;
            game.frame(time, renderer);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_catch::renderer::TextRender;
    use lane_catch::sim::LaneTable;
    use lane_catch::{Game, Settings};

    env_logger::init();
    log::info!("Lane Catch (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    let mut game = match Game::new(Settings::load(), LaneTable::default()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    game.set_demo_mode(true);

    // Two simulated minutes at 60 Hz
    let mut render = TextRender::new();
    let frame_ms = 1000.0 / 60.0;
    for frame in 0..(120 * 60) {
        game.frame(frame as f64 * frame_ms, &mut render);
    }

    println!(
        "\nDemo finished: {:?} after {:.1}s with {} balls",
        game.session.phase(),
        game.session.elapsed_ms / 1000.0,
        game.session.ball_count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
