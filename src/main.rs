//! Joystick Pan entry point
//!
//! On the web: wires pointer events and animation frames to the controller.
//! Natively: plays a seeded drag session and prints what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_screen {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use glam::Vec2;
    use web_sys::{Document, Element, HtmlElement, PointerEvent};

    use joystick_pan::consts::*;
    use joystick_pan::renderer::RenderFrame;
    use joystick_pan::settings::BoundsShape;
    use joystick_pan::sim::{GestureEvent, ScreenState, TickInput, tick};
    use joystick_pan::{Settings, TileGrid, Variant};

    /// Screen instance holding controller state and the views it drives
    struct Screen {
        state: ScreenState,
        input: TickInput,
        accumulator: f32,
        last_time: f64,
        /// Client position of the active pointer at touch down
        touch_origin: Option<(f32, f32)>,
        avatar: HtmlElement,
        map: HtmlElement,
        heading: Option<HtmlElement>,
        grid: TileGrid,
        /// Cell views in `TileGrid::cells` order
        cells: Vec<Element>,
        /// Cells currently shown, same order as `cells`
        shown: Vec<bool>,
    }

    impl Screen {
        /// Run controller ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                // Gestures are consumed by the first substep
                let input = std::mem::take(&mut self.input);
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            for event in self.state.drain_events() {
                log::trace!("{:?}", event);
            }
        }

        /// Apply the current transforms to the views
        fn render(&self) {
            let frame = RenderFrame::capture(&self.state);
            let _ = self
                .avatar
                .style()
                .set_property("transform", &frame.avatar_transform());
            let _ = self
                .map
                .style()
                .set_property("transform", &frame.map_transform());
            if let (Some(el), Some(transform)) = (&self.heading, frame.heading_transform()) {
                let _ = el.style().set_property("transform", &transform);
            }
        }

        /// Hide cells that have left the viewport, show the ones coming in
        fn cull(&mut self, viewport: Vec2) {
            let n = self.grid.tiles_per_side;
            let mut visible = vec![false; self.cells.len()];
            for cell in self.grid.visible_cells(self.state.map, viewport) {
                if let Some(slot) = visible.get_mut((cell.row * n + cell.col) as usize) {
                    *slot = true;
                }
            }
            for ((el, shown), now) in self.cells.iter().zip(self.shown.iter_mut()).zip(visible) {
                if *shown != now {
                    let _ = el.set_attribute("class", if now { "cell" } else { "cell hidden" });
                    *shown = now;
                }
            }
        }
    }

    /// Inner size of the browser window in CSS pixels
    fn viewport() -> Option<Vec2> {
        let window = web_sys::window()?;
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        Some(Vec2::new(width as f32, height as f32))
    }

    fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }

    /// `?variant=disc-heading` overrides the stored variant
    fn variant_from_query() -> Option<Variant> {
        let search = web_sys::window()?.location().search().ok()?;
        search
            .trim_start_matches('?')
            .split('&')
            .find_map(|pair| pair.strip_prefix("variant="))
            .and_then(Variant::from_str)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Joystick Pan starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let mut settings = Settings::load();
        if let Some(variant) = variant_from_query() {
            if variant != settings.variant {
                settings.variant = variant;
                settings.save();
            }
        }
        log::info!("Variant: {}", settings.variant.as_str());

        let stage = html_element(&document, "stage").expect("no stage");
        let avatar = html_element(&document, "avatar").expect("no avatar");
        let map = html_element(&document, "map").expect("no map");
        let heading = html_element(&document, "heading");

        build_bounds(&document, &settings);
        let grid = TileGrid::from_settings(&settings);
        let cells = build_tile(&document, &map, &grid);

        if let Some(ref el) = heading {
            let class = if settings.variant.shows_heading() { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }

        let screen = Rc::new(RefCell::new(Screen {
            state: ScreenState::new(&settings),
            input: TickInput::default(),
            accumulator: 0.0,
            last_time: 0.0,
            touch_origin: None,
            avatar,
            map,
            heading,
            grid,
            shown: vec![true; cells.len()],
            cells,
        }));

        setup_pointer_handlers(&stage, screen.clone());

        request_animation_frame(screen);

        log::info!("Joystick Pan running!");
    }

    /// Size and shape the joystick bounds indicator
    fn build_bounds(document: &Document, settings: &Settings) {
        let Some(bounds) = html_element(document, "bounds") else {
            return;
        };
        let size = match settings.variant.bounds_shape() {
            BoundsShape::Box => settings.bounds_size,
            BoundsShape::Disc => settings.disc_radius * 2.0,
        };
        let style = bounds.style();
        let _ = style.set_property("width", &format!("{}px", size));
        let _ = style.set_property("height", &format!("{}px", size));
        if settings.variant.bounds_shape() == BoundsShape::Disc {
            let _ = style.set_property("border-radius", "50%");
        }
    }

    /// Fill the map view with the labelled tile grid
    fn build_tile(document: &Document, map: &HtmlElement, grid: &TileGrid) -> Vec<Element> {
        let style = map.style();
        let _ = style.set_property("width", &format!("{}px", grid.tile_size));
        let _ = style.set_property("height", &format!("{}px", grid.tile_size));

        let cell_size = format!("{}px", grid.cell_size());
        let mut cells = Vec::new();
        for cell in grid.cells() {
            let Ok(el) = document.create_element("div") else {
                continue;
            };
            let _ = el.set_attribute("class", "cell");
            let _ = el.set_attribute(
                "style",
                &format!(
                    "left:{}px;top:{}px;width:{cs};height:{cs}",
                    cell.origin.x + grid.tile_size / 2.0,
                    cell.origin.y + grid.tile_size / 2.0,
                    cs = cell_size
                ),
            );
            el.set_text_content(Some(&cell.label));
            let _ = map.append_child(&el);
            cells.push(el);
        }
        cells
    }

    fn setup_pointer_handlers(stage: &HtmlElement, screen: Rc<RefCell<Screen>>) {
        // Touch down
        {
            let screen = screen.clone();
            let stage_clone = stage.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let _ = stage_clone.set_pointer_capture(event.pointer_id());
                let mut s = screen.borrow_mut();
                s.touch_origin = Some((event.client_x() as f32, event.client_y() as f32));
                s.input.gestures.push(GestureEvent::Start);
            });
            let _ = stage
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Drag: deltas are cumulative from touch down
        {
            let screen = screen.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut s = screen.borrow_mut();
                if let Some((x0, y0)) = s.touch_origin {
                    let dx = event.client_x() as f32 - x0;
                    let dy = event.client_y() as f32 - y0;
                    s.input.gestures.push(GestureEvent::Move { dx, dy });
                }
            });
            let _ = stage
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Lift (or the browser took the pointer away)
        for kind in ["pointerup", "pointercancel"] {
            let screen = screen.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut s = screen.borrow_mut();
                if s.touch_origin.take().is_some() {
                    s.input.gestures.push(GestureEvent::End);
                }
            });
            let _ = stage.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(screen: Rc<RefCell<Screen>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(screen, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(screen: Rc<RefCell<Screen>>, time: f64) {
        {
            let mut s = screen.borrow_mut();

            let dt = if s.last_time > 0.0 {
                ((time - s.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            s.last_time = time;

            s.update(dt);
            s.render();
            if let Some(viewport) = viewport() {
                s.cull(viewport);
            }
        }

        request_animation_frame(screen);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_screen::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use joystick_pan::renderer::RenderFrame;
    use joystick_pan::session::{self, DragScript};
    use joystick_pan::sim::ScreenState;
    use joystick_pan::{Settings, TileGrid, Variant};

    /// Phone-sized viewport used for the culling summary
    const REPORT_VIEWPORT: glam::Vec2 = glam::Vec2::new(390.0, 844.0);

    env_logger::init();
    log::info!("Joystick Pan (native) starting...");

    // Usage: joystick-pan [--save] [variant] [seed] [strokes]
    let mut args = std::env::args().skip(1).peekable();
    let save = args.next_if(|a| a == "--save").is_some();
    let mut settings = Settings::load();
    if let Some(name) = args.next() {
        match Variant::from_str(&name) {
            Some(variant) => settings.variant = variant,
            None => {
                let names: Vec<&str> = Variant::ALL.iter().map(|v| v.as_str()).collect();
                eprintln!("Unknown variant '{}', expected one of: {}", name, names.join(", "));
                std::process::exit(2);
            }
        }
    }
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let strokes = args.next().and_then(|s| s.parse().ok()).unwrap_or(8);

    if let Err(e) = settings.validate() {
        eprintln!("Invalid settings: {}", e);
        std::process::exit(2);
    }

    if save {
        settings.save();
    }

    log::info!("Variant {} with seed {}", settings.variant.as_str(), seed);

    let mut state = ScreenState::new(&settings);
    let script = DragScript::random(seed, strokes);
    // Long enough for the release spring and the last map cycle to finish
    let report = session::play(&mut state, &script, 120 * 30);

    let frame = RenderFrame::capture(&state);
    let grid = TileGrid::from_settings(&settings);

    println!("\nSession ({}, seed {}):", settings.variant.as_str(), seed);
    println!("  strokes played:     {}", report.strokes);
    println!("  ticks:              {}", report.ticks);
    println!("  map retargets:      {}", report.retargets);
    println!("  stale completions:  {}", report.stale_completions);
    println!("  springs settled:    {}", report.settles);
    println!("  max joystick reach: {:.1}px", report.max_reach);
    println!("  map transform:      {}", frame.map_transform());
    if let Some(heading) = frame.heading_transform() {
        println!("  heading transform:  {}", heading);
    }
    match grid.cell_under_center(state.map) {
        Some((row, col)) => println!("  joystick over cell: {}", grid.label(row, col)),
        None => println!("  joystick over cell: (off the tile)"),
    }
    println!(
        "  cells in viewport:  {} of {}",
        grid.visible_cells(state.map, REPORT_VIEWPORT).len(),
        grid.tiles_per_side * grid.tiles_per_side
    );
    println!("  at rest:            {}", state.is_at_rest());
}
