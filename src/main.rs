//! Memory Tiles entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, MouseEvent};

    use memory_tiles::assets::{ATLAS_SLOT, CardAtlas, image_path};
    use memory_tiles::platform::{Clock, InputEvent, WebClock};
    use memory_tiles::renderer::{RenderState, StatusText, scene_vertices};
    use memory_tiles::{App, AssetError, Settings, SetupError};

    /// Game instance holding all state
    struct Game {
        app: App,
        atlas: CardAtlas,
        render_state: RenderState,
        clock: WebClock,
        /// Input queued by DOM callbacks until the next frame
        pending: Vec<InputEvent>,
        status_shown: bool,
    }

    impl Game {
        fn frame(&mut self) -> bool {
            let now = self.clock.now_ms();
            let events = std::mem::take(&mut self.pending);
            let frame = self.app.frame(&events, now);

            let vertices = scene_vertices(&frame.scene, &self.atlas);
            match self.render_state.render(&vertices, frame.scene.background) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }

            self.update_status(frame.scene.status.as_ref());
            frame.running
        }

        /// Show or hide the header message (touches the DOM only on change)
        fn update_status(&mut self, status: Option<&StatusText>) {
            if status.is_some() == self.status_shown {
                return;
            }
            self.status_shown = status.is_some();
            match status {
                Some(status) => set_status(status.text, status.color),
                None => hide_status(),
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn css_color(color: [f32; 4]) -> String {
        let [r, g, b, _] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("rgb({}, {}, {})", r, g, b)
    }

    fn set_status(text: &str, color: [f32; 4]) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id("status")) {
            el.set_text_content(Some(text));
            let _ = el.set_attribute("style", &format!("color: {}", css_color(color)));
            let _ = el.set_attribute("class", "");
        }
    }

    fn hide_status() {
        if let Some(el) = document().and_then(|d| d.get_element_by_id("status")) {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    /// Fetch and decode one card image
    async fn load_image(value: u8) -> Result<HtmlImageElement, AssetError> {
        let path = image_path(value);
        let fail = |e: JsValue| AssetError::Load {
            path: path.clone(),
            reason: format!("{:?}", e),
        };

        let image = HtmlImageElement::new().map_err(fail)?;
        image.set_src(&path);
        JsFuture::from(image.decode()).await.map_err(fail)?;
        Ok(image)
    }

    /// Load every card image into the atlas texture
    async fn load_atlas(
        render_state: &RenderState,
        atlas: &mut CardAtlas,
        values: &[u8],
    ) -> Result<(), AssetError> {
        for &value in values {
            let image = load_image(value).await?;
            let (width, height) = (image.natural_width(), image.natural_height());
            let origin = atlas.place(value, width, height)?;
            render_state.write_atlas_image(origin, &image, width, height);
            log::debug!("Loaded {} ({}x{})", image_path(value), width, height);
        }
        atlas.check_complete()
    }

    /// Build the game: settings, board, GPU state, card art
    async fn setup(canvas: &HtmlCanvasElement) -> Result<Game, SetupError> {
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let app = App::new(settings, seed)?;

        let window = web_sys::window().expect("no window");
        let layout = app.layout;
        let dpr = window.device_pixel_ratio();
        let _ = canvas.set_attribute(
            "style",
            &format!("width: {}px; height: {}px", layout.width, layout.height),
        );
        let width = (layout.width as f64 * dpr) as u32;
        let height = (layout.height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
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

        let mut atlas = CardAtlas::new(&app.settings.values, ATLAS_SLOT);
        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            glam::Vec2::new(layout.width, layout.height),
            atlas.size(),
        )
        .await
        .expect("Failed to create device");

        let values = app.settings.values.clone();
        load_atlas(&render_state, &mut atlas, &values).await?;

        Ok(Game {
            app,
            atlas,
            render_state,
            clock: WebClock::new().expect("no performance clock"),
            pending: Vec::new(),
            status_shown: false,
        })
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Memory Tiles starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let game = match setup(&canvas).await {
            Ok(game) => game,
            Err(e) => {
                log::error!("Startup failed: {}", e);
                set_status(&e.to_string(), [1.0, 0.0, 0.0, 1.0]);
                return;
            }
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let game = Rc::new(RefCell::new(game));
        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Memory Tiles running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Clicks are queued and hit-tested on the next frame
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            game.borrow_mut().pending.push(InputEvent::Click {
                x: event.offset_x() as f32,
                y: event.offset_y() as f32,
            });
        });
        let _ = canvas
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let running = game.borrow_mut().frame();
        if running {
            request_animation_frame(game);
        } else {
            log::info!("Memory Tiles stopped");
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
    use memory_tiles::Settings;
    use memory_tiles::headless::run_headless;
    use memory_tiles::platform::{Clock, SystemClock};

    env_logger::init();
    log::info!("Memory Tiles (native) starting...");
    log::info!("Native mode plays a scripted headless game - run with `trunk serve` for the web version");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });

    let wall = SystemClock::new();
    match run_headless(settings, seed, 16) {
        Ok(report) => log::info!(
            "Seed {}: {} pairs, {} misses, won at {:?}ms, {} frames, simulated in {}ms",
            report.seed,
            report.pairs_found,
            report.misses,
            report.won_at,
            report.frames,
            wall.now_ms()
        ),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
