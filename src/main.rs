//! Be My Valentine entry point
//!
//! Wires the page to the session and the catch game, and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::{Cell, RefCell};
    use std::rc::{Rc, Weak};

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlAudioElement,
        HtmlCanvasElement, HtmlElement, HtmlImageElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use be_my_valentine::audio::{AudioManager, MusicCommand};
    use be_my_valentine::consts::SIM_DT;
    use be_my_valentine::effects::{AMBIENT_HEART_INITIAL, AMBIENT_HEART_INTERVAL_MS, FloatingHeart};
    use be_my_valentine::evasion::{EvasionBounds, EvasionDisplay};
    use be_my_valentine::lightbox::LightboxTarget;
    use be_my_valentine::platform::{GAME_CANVAS_ID, blocks_touch_scroll};
    use be_my_valentine::platform::web::{
        CanvasArea, DomResultSink, by_id, by_id_as, document, set_display, set_text,
    };
    use be_my_valentine::renderer::CanvasRenderer;
    use be_my_valentine::screens::Screen;
    use be_my_valentine::session::{Celebration, KeyOutcome, Navigation, PageSession};
    use be_my_valentine::{CatchGame, Settings};

    type Game = CatchGame<CanvasArea, CanvasRenderer, DomResultSink>;

    /// Everything the event handlers share
    struct Page {
        document: Document,
        session: RefCell<PageSession>,
        game: RefCell<Game>,
        audio: AudioManager,
        canvas: HtmlCanvasElement,
        last_frame: Cell<f64>,
        /// Present only while a round is live
        pointer: RefCell<Option<PointerListeners>>,
    }

    /// Canvas pointer subscriptions; dropping them unsubscribes
    struct PointerListeners {
        canvas: HtmlCanvasElement,
        mouse: Closure<dyn FnMut(Event)>,
        touch: Closure<dyn FnMut(Event)>,
    }

    impl PointerListeners {
        fn attach(page: &Rc<Page>) -> Result<Self, JsValue> {
            let canvas = page.canvas.clone();

            let weak = Rc::downgrade(page);
            let mouse = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let (Some(page), Some(e)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                    return;
                };
                let left = page.canvas.get_bounding_client_rect().left();
                page.game
                    .borrow_mut()
                    .pointer_moved((e.client_x() as f64 - left) as f32);
            });

            let weak = Rc::downgrade(page);
            let touch = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let (Some(page), Some(e)) = (weak.upgrade(), event.dyn_ref::<TouchEvent>()) else {
                    return;
                };
                if let Some(touch) = e.touches().get(0) {
                    let left = page.canvas.get_bounding_client_rect().left();
                    page.game
                        .borrow_mut()
                        .pointer_moved((touch.client_x() as f64 - left) as f32);
                }
            });

            canvas.add_event_listener_with_callback("mousemove", mouse.as_ref().unchecked_ref())?;
            canvas.add_event_listener_with_callback("touchmove", touch.as_ref().unchecked_ref())?;
            Ok(Self {
                canvas,
                mouse,
                touch,
            })
        }
    }

    impl Drop for PointerListeners {
        fn drop(&mut self) {
            let _ = self.canvas.remove_event_listener_with_callback(
                "mousemove",
                self.mouse.as_ref().unchecked_ref(),
            );
            let _ = self.canvas.remove_event_listener_with_callback(
                "touchmove",
                self.touch.as_ref().unchecked_ref(),
            );
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Be My Valentine starting...");

        let document = document()?;
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;

        let canvas: HtmlCanvasElement = by_id_as(&document, GAME_CANVAS_ID)?;
        let area = CanvasArea::new(canvas.clone());
        area.sync_size();
        let game = CatchGame::new(
            settings.game_config(),
            area,
            CanvasRenderer::new(canvas.clone())?,
            DomResultSink::new(document.clone()),
            seed,
        );

        let session = PageSession::new(settings, seed);
        let audio = AudioManager::new(
            by_id_as::<HtmlAudioElement>(&document, "bgMusic")?,
            by_id_as::<HtmlAudioElement>(&document, "yesSound")?,
            session.music().volume(),
        );

        let page = Rc::new(Page {
            document,
            session: RefCell::new(session),
            game: RefCell::new(game),
            audio,
            canvas,
            last_frame: Cell::new(0.0),
            pointer: RefCell::new(None),
        });

        setup_navigation(&page)?;
        setup_question(&page)?;
        setup_music(&page)?;
        setup_game(&page)?;
        setup_touch_guard(&page)?;
        setup_lightbox(&page)?;
        setup_keyboard(&page)?;
        start_ambient_hearts(&page);

        log::info!("Be My Valentine running with seed {}", seed);
        Ok(())
    }

    /// Subscribe for the page's lifetime
    fn on(
        target: &EventTarget,
        event: &str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn after(ms: u32, f: impl FnOnce() + 'static) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(f);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms as i32,
        );
        closure.forget();
    }

    fn elements(document: &Document, selector: &str) -> Vec<Element> {
        let Ok(list) = document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    // --- Screens ---------------------------------------------------------------

    fn setup_navigation(page: &Rc<Page>) -> Result<(), JsValue> {
        for el in elements(&page.document, "[data-goto]") {
            let Some(screen) = el.get_attribute("data-goto").and_then(|id| Screen::from_id(&id))
            else {
                log::warn!("Ignoring unknown data-goto target");
                continue;
            };
            let page = page.clone();
            on(&el, "click", move |_| {
                let nav = page.session.borrow_mut().show(screen);
                apply_navigation(&page, &nav);
            })?;
        }
        Ok(())
    }

    fn apply_navigation(page: &Page, nav: &Navigation) {
        for section in elements(&page.document, ".section") {
            let _ = section.class_list().remove_1("active");
        }
        if let Some(el) = page.document.get_element_by_id(nav.change.to.id()) {
            let _ = el.class_list().add_1("active");
        }
        if let Some(display) = &nav.evasion {
            apply_evasion(&page.document, display);
        }
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }

    // --- Question --------------------------------------------------------------

    fn setup_question(page: &Rc<Page>) -> Result<(), JsValue> {
        let no_btn = by_id(&page.document, "noBtn")?;
        {
            let page = page.clone();
            let btn = no_btn.clone();
            on(&no_btn, "click", move |_| {
                let container_width = btn
                    .parent_element()
                    .map(|p| p.get_bounding_client_rect().width())
                    .unwrap_or(0.0);
                let bounds = EvasionBounds {
                    container_width: container_width as f32,
                    button_width: btn.get_bounding_client_rect().width() as f32,
                };
                let display = page.session.borrow_mut().reject(bounds);
                apply_evasion(&page.document, &display);
            })?;
        }

        let yes_btn = by_id(&page.document, "yesBtn")?;
        let page = page.clone();
        on(&yes_btn, "click", move |_| {
            let party = page.session.borrow_mut().accept();
            celebrate(&page, party);
        })
    }

    fn apply_evasion(document: &Document, display: &EvasionDisplay) {
        if let Some(btn) = document
            .get_element_by_id("noBtn")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let style = btn.style();
            let _ = style.set_property("transform", &display.transform());
            let _ = style.set_property("opacity", &display.opacity.to_string());
            let _ = style.set_property(
                "display",
                if display.visible { "inline-block" } else { "none" },
            );
        }
        set_text(document, "noMessage", display.message);
    }

    fn celebrate(page: &Rc<Page>, party: Celebration) {
        page.audio.play_yes();
        apply_navigation(page, &party.navigation);
        if let Some(command) = party.music {
            apply_music(page, command);
        }

        for piece in party.confetti {
            let document = page.document.clone();
            after(piece.spawn_at_ms, move || {
                let Ok(el) = document.create_element("div") else {
                    return;
                };
                el.set_class_name("confetti-piece");
                if let Ok(el) = el.dyn_into::<HtmlElement>() {
                    let style = el.style();
                    let _ = style.set_property("left", &format!("{}%", piece.left_pct));
                    let _ = style.set_property("background", piece.color);
                    let _ = style.set_property("animation-delay", &format!("{}s", piece.delay_secs));
                    let _ = style
                        .set_property("animation-duration", &format!("{}s", piece.duration_secs));
                    if let Some(container) = document.get_element_by_id("confetti") {
                        let _ = container.append_child(&el);
                        after(piece.lifetime_ms, move || el.remove());
                    }
                }
            });
        }

        for heart in party.hearts {
            let document = page.document.clone();
            after(heart.spawn_at_ms, move || spawn_heart(&document, &heart));
        }
    }

    // --- Decorations -----------------------------------------------------------

    fn spawn_heart(document: &Document, heart: &FloatingHeart) {
        let Some(container) = document.get_element_by_id("floatingHearts") else {
            return;
        };
        let Some(el) = document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        el.set_class_name("floating-heart");
        el.set_text_content(Some(heart.glyph));
        let style = el.style();
        let _ = style.set_property("left", &format!("{}%", heart.left_pct));
        let _ = style.set_property("font-size", &format!("{}rem", heart.font_rem));
        let _ = style.set_property("animation-duration", &format!("{}s", heart.duration_secs));
        let _ = container.append_child(&el);
        after(heart.lifetime_ms, move || el.remove());
    }

    fn start_ambient_hearts(page: &Rc<Page>) {
        for _ in 0..AMBIENT_HEART_INITIAL {
            if let Some(heart) = page.session.borrow_mut().ambient_heart() {
                spawn_heart(&page.document, &heart);
            }
        }

        let Some(window) = web_sys::window() else {
            return;
        };
        let page = page.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(heart) = page.session.borrow_mut().ambient_heart() {
                spawn_heart(&page.document, &heart);
            }
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            AMBIENT_HEART_INTERVAL_MS as i32,
        );
        closure.forget();
    }

    // --- Music -----------------------------------------------------------------

    fn setup_music(page: &Rc<Page>) -> Result<(), JsValue> {
        let toggle = by_id(&page.document, "musicToggle")?;
        {
            let page = page.clone();
            on(&toggle, "click", move |_| {
                let command = page.session.borrow_mut().toggle_music();
                apply_music(&page, command);
            })?;
        }

        // Autoplay is usually refused until the first gesture; retry then
        for event in ["click", "touchstart"] {
            let page = page.clone();
            on(&page.document.clone(), event, move |_| {
                let retry = page.session.borrow_mut().music_mut().gesture_retry();
                if let Some(command) = retry {
                    apply_music(&page, command);
                }
            })?;
        }

        let autoplay = page.session.borrow().settings().autoplay;
        if autoplay {
            let command = page.session.borrow_mut().music_mut().autoplay();
            if let Some(command) = command {
                apply_music(page, command);
            }
        }
        update_music_label(page);
        Ok(())
    }

    fn apply_music(page: &Rc<Page>, command: MusicCommand) {
        match command {
            MusicCommand::Play => {
                let weak: Weak<Page> = Rc::downgrade(page);
                page.audio.play_music(move |ok| {
                    let Some(page) = weak.upgrade() else {
                        return;
                    };
                    {
                        let mut session = page.session.borrow_mut();
                        if ok {
                            session.music_mut().play_succeeded();
                        } else {
                            session.music_mut().play_blocked();
                        }
                    }
                    update_music_label(&page);
                });
            }
            MusicCommand::Pause => page.audio.pause_music(),
        }
        update_music_label(page);
    }

    fn update_music_label(page: &Page) {
        let (icon, text) = page.session.borrow().music().label();
        set_text(&page.document, "musicIcon", icon);
        set_text(&page.document, "musicText", text);
    }

    // --- Catch game ------------------------------------------------------------

    fn setup_game(page: &Rc<Page>) -> Result<(), JsValue> {
        for id in ["startGameBtn", "playAgainBtn"] {
            let Some(btn) = page.document.get_element_by_id(id) else {
                continue;
            };
            let page = page.clone();
            on(&btn, "click", move |_| {
                if let Err(e) = start_game(&page) {
                    log::error!("Could not start game: {:?}", e);
                }
            })?;
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let page = page.clone();
        on(&window, "resize", move |_| {
            let mut game = page.game.borrow_mut();
            if game.is_running() {
                game.area().sync_size();
                game.resize();
            }
        })
    }

    /// Touch drags on the canvas never scroll the page. Registered non-passive
    /// so `prevent_default` is honoured.
    fn setup_touch_guard(page: &Rc<Page>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(|event: Event| {
            let on_canvas = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|el| blocks_touch_scroll(&el.id()));
            if on_canvas {
                event.prevent_default();
            }
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        page.document
            .add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
        closure.forget();
        Ok(())
    }

    fn start_game(page: &Rc<Page>) -> Result<(), JsValue> {
        set_display(&page.document, "gameStart", "none");
        set_display(&page.document, "gameArea", "block");
        set_display(&page.document, "gameEnd", "none");

        let looping = {
            let mut game = page.game.borrow_mut();
            let looping = game.needs_frame();
            game.area().sync_size();
            game.start();
            looping
        };

        *page.pointer.borrow_mut() = Some(PointerListeners::attach(page)?);
        page.last_frame.set(0.0);
        if !looping {
            request_animation_frame(page.clone());
        }
        Ok(())
    }

    fn request_animation_frame(page: Rc<Page>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(page, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(page: Rc<Page>, time: f64) {
        let last = page.last_frame.get();
        let dt = if last > 0.0 {
            ((time - last) / 1000.0) as f32
        } else {
            SIM_DT
        };
        page.last_frame.set(time);

        let more = {
            let mut game = page.game.borrow_mut();
            game.advance(dt);
            game.needs_frame()
        };

        if more {
            request_animation_frame(page);
        } else {
            // Round over: stop listening to the pointer
            page.pointer.borrow_mut().take();
        }
    }

    // --- Lightbox --------------------------------------------------------------

    fn setup_lightbox(page: &Rc<Page>) -> Result<(), JsValue> {
        for img in elements(&page.document, "[data-lightbox]") {
            let page = page.clone();
            let src = img
                .clone()
                .dyn_into::<HtmlImageElement>()
                .map(|img| img.src())
                .unwrap_or_default();
            on(&img, "click", move |_| {
                page.session.borrow_mut().open_lightbox(src.clone());
                if let Some(el) = page.document.get_element_by_id("lightbox-img") {
                    let _ = el.set_attribute("src", &src);
                }
                if let Some(el) = page.document.get_element_by_id("lightbox") {
                    let _ = el.class_list().add_1("active");
                }
                apply_scroll_lock(&page);
            })?;
        }

        let Some(lightbox) = page.document.get_element_by_id("lightbox") else {
            return Ok(());
        };
        let page = page.clone();
        let el = lightbox.clone();
        on(&lightbox, "click", move |event| {
            let target = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|t| {
                    if t.id() == "lightbox" {
                        LightboxTarget::Backdrop
                    } else if t.class_list().contains("lightbox-close") {
                        LightboxTarget::CloseButton
                    } else {
                        LightboxTarget::Image
                    }
                })
                .unwrap_or(LightboxTarget::Image);
            let closed = page.session.borrow_mut().lightbox_click(target);
            if closed {
                let _ = el.class_list().remove_1("active");
                apply_scroll_lock(&page);
            }
        })
    }

    fn apply_scroll_lock(page: &Page) {
        let locked = page.session.borrow().lightbox().scroll_locked();
        if let Some(body) = page.document.body() {
            let _ = body
                .style()
                .set_property("overflow", if locked { "hidden" } else { "" });
        }
    }

    // --- Keyboard --------------------------------------------------------------

    fn setup_keyboard(page: &Rc<Page>) -> Result<(), JsValue> {
        let page = page.clone();
        on(&page.document.clone(), "keydown", move |event| {
            let Some(e) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let outcome = page.session.borrow_mut().key(&e.key());
            match outcome {
                Some(KeyOutcome::Navigated(nav)) => apply_navigation(&page, &nav),
                Some(KeyOutcome::Accepted(party)) => celebrate(&page, party),
                None => {}
            }
        })
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_page::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Be My Valentine (native) starting...");
    log::info!("The page itself needs a browser - run with `trunk serve` for the web version");

    println!("\nRunning headless catch game...");
    demo_catch_game();

    println!("\nAsking the question...");
    demo_question();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one round with a catcher that chases the lowest heart
#[cfg(not(target_arch = "wasm32"))]
fn demo_catch_game() {
    use be_my_valentine::consts::SIM_DT;
    use be_my_valentine::platform::{FixedArea, ResultSink};
    use be_my_valentine::renderer::NullRenderer;
    use be_my_valentine::{CatchGame, GameResult, Settings};
    use glam::Vec2;

    struct PrintSink;

    impl ResultSink for PrintSink {
        fn finished(&mut self, result: &GameResult) {
            println!("{}", result.title);
            println!("{}", result.detail);
        }

        fn time_changed(&mut self, time_left: u32) {
            log::debug!("{}s left", time_left);
        }
    }

    let settings = Settings::load();
    let mut game = CatchGame::new(
        settings.game_config(),
        FixedArea(Vec2::new(800.0, 600.0)),
        NullRenderer,
        PrintSink,
        0x5eed,
    );
    game.start();

    while game.needs_frame() {
        let target = game
            .state()
            .hearts
            .iter()
            .max_by(|a, b| a.rect.pos.y.total_cmp(&b.rect.pos.y))
            .map(|h| h.rect.pos.x + h.rect.size.x / 2.0);
        if let Some(x) = target {
            game.pointer_moved(x);
        }
        game.advance(SIM_DT);
    }
}

/// Say no until the button gives up
#[cfg(not(target_arch = "wasm32"))]
fn demo_question() {
    use be_my_valentine::screens::Screen;
    use be_my_valentine::{EvasionBounds, PageSession, Settings};

    let mut session = PageSession::new(Settings::default(), 0x5eed);
    session.show(Screen::Question);

    let bounds = EvasionBounds {
        container_width: 360.0,
        button_width: 100.0,
    };
    loop {
        let display = session.reject(bounds);
        println!(
            "No #{}: {} (scale {:.1}, opacity {:.2})",
            session.evasion().count(),
            display.message,
            display.scale,
            display.opacity
        );
        if !display.visible {
            break;
        }
    }

    let party = session.accept();
    println!("Yes! {} pieces of confetti", party.confetti.len());
}
