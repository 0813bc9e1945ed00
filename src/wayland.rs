// Wayland integration
// Layer-shell windows, input routing and the dispatch loop

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};
use smithay_client_toolkit::{
    compositor::{CompositorHandler, CompositorState, Region},
    delegate_compositor, delegate_keyboard, delegate_layer, delegate_output, delegate_pointer,
    delegate_registry, delegate_seat, delegate_shm,
    output::{OutputHandler, OutputState},
    reexports::calloop::{channel, EventLoop},
    reexports::calloop_wayland_source::WaylandSource,
    registry::{ProvidesRegistryState, RegistryState},
    registry_handlers,
    seat::{
        keyboard::{KeyEvent, KeyboardHandler, Keysym, Modifiers},
        pointer::{PointerEvent, PointerEventKind, PointerHandler},
        Capability, SeatHandler, SeatState,
    },
    shell::{
        wlr_layer::{
            Anchor, KeyboardInteractivity, Layer, LayerShell, LayerShellHandler, LayerSurface,
            LayerSurfaceConfigure,
        },
        WaylandSurface as _,
    },
    shm::{
        slot::{Buffer, SlotPool},
        Shm, ShmHandler,
    },
};
use wayland_client::{
    backend::ObjectId,
    globals::registry_queue_init,
    protocol::{wl_keyboard, wl_output, wl_pointer, wl_seat, wl_shm, wl_surface},
    Connection, Proxy, QueueHandle,
};

use crate::app::TransientSticker;
use crate::compositor::SENTINEL_BGRA;
use crate::image_loader::{self, LoadError, LoadResult};
use crate::library::ImageLibrary;
use crate::model::ImageItem;
use crate::overlay::{HostAction, StickerWindow};
use crate::prompt;
use crate::registry::OverlayRegistry;
use crate::surface::{KeyCommand, PointerButton, WindowSurface};
use crate::transform::Rect;

/// Mouse button constants
const BTN_LEFT: u32 = 272;
const BTN_RIGHT: u32 = 273;

/// Maximum window size to prevent buffer allocation failures
const MAX_SIZE: u32 = 4096;

/// Maximum buffer size (64MB to avoid Wayland buffer issues)
const MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;

/// Opacity step for scroll-wheel adjustment, in percent
const OPACITY_STEP: i16 = 5;

/// Dispatch tick driving fades, debounced saves and throttled redraws.
const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// One layer-shell window backing a sticker. Position is expressed as
/// top/left margins, topmost-ness as the shell layer, click-through as an
/// empty input region.
pub struct WaylandWindow {
    layer: LayerSurface,
    empty_region: Region,
    pool: SlotPool,
    buffer: Option<Buffer>,
    bounds: Rect,
    hidden: bool,
    pin_guard: bool,
    configured: bool,
    /// Pointer grab position and window origin when a native move started.
    move_grab: Option<((f64, f64), (i32, i32))>,
}

impl WaylandWindow {
    fn wl_id(&self) -> ObjectId {
        self.layer.wl_surface().id()
    }

    pub fn set_configured(&mut self) {
        self.configured = true;
    }

    fn apply_margins(&self) {
        self.layer.set_margin(self.bounds.y, 0, 0, self.bounds.x);
        self.layer.commit();
    }
}

impl WindowSurface for WaylandWindow {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.layer.set_margin(bounds.y, 0, 0, bounds.x);
        self.layer.set_size(bounds.width, bounds.height);
        self.layer.commit();
    }

    fn set_always_on_top(&mut self, on_top: bool) {
        let layer = if on_top { Layer::Overlay } else { Layer::Top };
        self.layer.set_layer(layer);
        self.layer.commit();
    }

    fn set_click_through(&mut self, click_through: bool) {
        let surface = self.layer.wl_surface();
        if click_through {
            surface.set_input_region(Some(self.empty_region.wl_region()));
        } else {
            surface.set_input_region(None);
        }
        surface.commit();
    }

    fn set_pin_guard(&mut self, pinned: bool) {
        self.pin_guard = pinned;
    }

    fn begin_move(&mut self, pointer: (f64, f64)) {
        self.move_grab = Some((pointer, (self.bounds.x, self.bounds.y)));
    }

    fn move_drag(&mut self, pointer: (f64, f64)) {
        if let Some((grab, origin)) = self.move_grab {
            self.bounds.x = origin.0 + (pointer.0 - grab.0) as i32;
            self.bounds.y = origin.1 + (pointer.1 - grab.1) as i32;
            self.apply_margins();
        }
    }

    fn request_hide(&mut self) -> bool {
        if self.pin_guard {
            debug!("Hide request ignored while pinned");
            return false;
        }
        self.hidden = true;
        let surface = self.layer.wl_surface();
        surface.attach(None, 0, 0);
        surface.commit();
        true
    }

    fn request_minimize(&mut self) -> bool {
        // Layer surfaces have no minimized state; the request is converted
        // straight back to normal. Pinned windows refuse it outright.
        !self.pin_guard
    }

    fn show(&mut self) {
        self.hidden = false;
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }

    fn present(&mut self, draw: &mut dyn FnMut(&mut [u8], u32, u32)) {
        if !self.configured || self.hidden {
            return;
        }

        let width = self.bounds.width.clamp(1, MAX_SIZE);
        let height = self.bounds.height.clamp(1, MAX_SIZE);
        let stride = width as i32 * 4;
        let buffer_size = (stride * height as i32) as usize;
        if buffer_size > MAX_BUFFER_SIZE {
            error!(
                "Frame of {}x{} exceeds the {} byte buffer limit",
                width, height, MAX_BUFFER_SIZE
            );
            return;
        }

        if self.pool.len() < buffer_size {
            if let Err(e) = self.pool.resize(buffer_size) {
                error!("Failed to resize buffer pool to {} bytes: {}", buffer_size, e);
                return;
            }
        }

        let (buffer, canvas) = match self.pool.create_buffer(
            width as i32,
            height as i32,
            stride,
            wl_shm::Format::Argb8888,
        ) {
            Ok(buffer) => buffer,
            Err(e) => {
                error!("Failed to create {}x{} buffer: {}", width, height, e);
                return;
            }
        };

        draw(canvas, width, height);

        // Transparency key pass: sentinel-marked pixels become fully clear.
        for pixel in canvas.chunks_exact_mut(4) {
            if pixel[..3] == SENTINEL_BGRA[..3] {
                pixel.copy_from_slice(&[0, 0, 0, 0]);
            }
        }

        let surface = self.layer.wl_surface();
        if let Err(e) = buffer.attach_to(surface) {
            error!("Failed to attach buffer: {}", e);
            return;
        }
        surface.damage_buffer(0, 0, width as i32, height as i32);
        surface.commit();
        // The previous buffer's slot is released only after the new frame is
        // committed; the compositor may still be reading it.
        let previous = self.buffer.replace(buffer);
        drop(previous);
    }
}

/// Host state for the whole session: Wayland globals plus every open sticker.
pub struct WaylandHost {
    registry_state: RegistryState,
    seat_state: SeatState,
    output_state: OutputState,
    shm: Shm,
    layer_shell: LayerShell,
    compositor_state: CompositorState,

    library: ImageLibrary,
    items: Vec<ImageItem>,
    open: OverlayRegistry<ObjectId>,
    windows: HashMap<ObjectId, StickerWindow<WaylandWindow>>,
    keyboard_focus: Option<ObjectId>,
    should_exit: bool,
}

impl WaylandHost {
    fn create_window(&mut self, item: &ImageItem, qh: &QueueHandle<Self>) -> Result<WaylandWindow> {
        let surface = self.compositor_state.create_surface(qh);
        let layer = self.layer_shell.create_layer_surface(
            qh,
            surface,
            Layer::Top,
            Some("stickpin"),
            None,
        );
        layer.set_anchor(Anchor::TOP | Anchor::LEFT);
        layer.set_keyboard_interactivity(KeyboardInteractivity::OnDemand);

        let empty_region =
            Region::new(&self.compositor_state).context("Failed to create input region")?;

        // Sized for the saved geometry up front; grown on demand.
        let width = item
            .last_width
            .unwrap_or(crate::transform::DEFAULT_SIZE.0)
            .max(crate::transform::MIN_SIZE);
        let height = item
            .last_height
            .unwrap_or(crate::transform::DEFAULT_SIZE.1)
            .max(crate::transform::MIN_SIZE);
        let pool = SlotPool::new((width * height * 4) as usize, &self.shm)
            .context("Failed to create buffer pool")?;

        Ok(WaylandWindow {
            layer,
            empty_region,
            pool,
            buffer: None,
            bounds: Rect::EMPTY,
            hidden: false,
            pin_guard: false,
            configured: false,
            move_grab: None,
        })
    }

    fn open_sticker(
        &mut self,
        item_id: uuid::Uuid,
        qh: &QueueHandle<Self>,
        loader: &channel::Sender<LoadResult>,
    ) {
        if self.open.try_get(item_id).is_some() {
            info!("Item {} already has an open overlay", item_id);
            return;
        }
        let Some(item) = self.items.iter().find(|item| item.id == item_id).cloned() else {
            warn!("Item {} vanished before its overlay opened", item_id);
            return;
        };

        let window = match self.create_window(&item, qh) {
            Ok(window) => window,
            Err(e) => {
                prompt::notify_error(
                    "Overlay failed",
                    &format!("Could not create a window for '{}': {}", item.display_name, e),
                );
                return;
            }
        };

        let engine = StickerWindow::new(&item, window, false, Instant::now());
        let key = engine.surface().wl_id();
        self.open.insert(item_id, key.clone());
        self.windows.insert(key, engine);

        image_loader::spawn_load(item_id, item.file_path.clone(), loader.clone());
        info!("Opened sticker '{}'", item.display_name);
    }

    fn open_transient(&mut self, sticker: TransientSticker, qh: &QueueHandle<Self>) {
        let window = match self.create_window(&sticker.item, qh) {
            Ok(window) => window,
            Err(e) => {
                prompt::notify_error(
                    "Overlay failed",
                    &format!("Could not create a window: {}", e),
                );
                return;
            }
        };
        let mut engine = StickerWindow::new(&sticker.item, window, true, Instant::now());
        engine.set_image(sticker.image, Instant::now());
        let key = engine.surface().wl_id();
        self.windows.insert(key, engine);
    }

    fn on_image_loaded(&mut self, result: LoadResult) {
        let Some(key) = self.open.try_get(result.item_id) else {
            debug!("Decode finished for {} after its window closed", result.item_id);
            return;
        };

        match result.result {
            Ok(image) => {
                if let Some(engine) = self.windows.get_mut(&key) {
                    info!(
                        "Image loaded for '{}': {}x{}",
                        engine.display_name(),
                        image.width,
                        image.height
                    );
                    engine.set_image(image, Instant::now());
                }
            }
            Err(LoadError::Missing(path)) => {
                let name = self
                    .windows
                    .get(&key)
                    .map(|engine| engine.display_name().to_string())
                    .unwrap_or_default();
                let remove = self.confirm_above_overlays(
                    "File not found",
                    &format!(
                        "Image file not found:\n{}\n\nRemove entry '{}' from the library?",
                        path.display(),
                        name
                    ),
                );
                if remove {
                    self.items.retain(|item| item.id != result.item_id);
                    self.library.save(&self.items);
                }
                self.close_window(&key);
            }
            Err(e) => {
                self.notify_above_overlays("Image load failed", &e.to_string());
                self.close_window(&key);
            }
        }
    }

    /// Pinned stickers live in the overlay layer and would cover a dialog;
    /// drop them below while one is up and restore them afterwards.
    fn confirm_above_overlays(&mut self, title: &str, text: &str) -> bool {
        for engine in self.windows.values_mut() {
            engine.lower_temporarily();
        }
        let result = prompt::confirm(title, text);
        for engine in self.windows.values_mut() {
            engine.restore_topmost();
        }
        result
    }

    fn notify_above_overlays(&mut self, title: &str, text: &str) {
        for engine in self.windows.values_mut() {
            engine.lower_temporarily();
        }
        prompt::notify_error(title, text);
        for engine in self.windows.values_mut() {
            engine.restore_topmost();
        }
    }

    fn handle_action(&mut self, key: &ObjectId, action: HostAction) {
        match action {
            HostAction::SaveLibrary => self.save_window_state(key),
            HostAction::CloseWindow => self.close_window(key),
            HostAction::RemoveFromLibrary => {
                let Some((name, item_id)) = self
                    .windows
                    .get(key)
                    .map(|engine| (engine.display_name().to_string(), engine.item_id()))
                else {
                    return;
                };
                let confirmed = self.confirm_above_overlays(
                    "Remove",
                    &format!("Remove '{}' from the library?", name),
                );
                if confirmed {
                    self.items.retain(|item| item.id != item_id);
                    self.library.save(&self.items);
                    self.close_window(key);
                }
            }
        }
    }

    /// Write one window's state back into the shared collection and save it.
    fn save_window_state(&mut self, key: &ObjectId) {
        if let Some(engine) = self.windows.get(key) {
            if let Some(item) = self
                .items
                .iter_mut()
                .find(|item| item.id == engine.item_id())
            {
                engine.sync_item(item);
            }
            self.library.save(&self.items);
        }
    }

    fn close_window(&mut self, key: &ObjectId) {
        if let Some(mut engine) = self.windows.remove(key) {
            if engine.close() == Some(HostAction::SaveLibrary) {
                if let Some(item) = self
                    .items
                    .iter_mut()
                    .find(|item| item.id == engine.item_id())
                {
                    engine.sync_item(item);
                }
                self.library.save(&self.items);
            }
            self.open.remove_on_close(engine.item_id());
            info!("Closed sticker '{}'", engine.display_name());
        }
        if self.windows.is_empty() {
            self.should_exit = true;
        }
    }

    /// The periodic tick: fades, due saves and throttled redraws.
    fn tick(&mut self) {
        let now = Instant::now();
        let actions: Vec<(ObjectId, HostAction)> = self
            .windows
            .iter_mut()
            .filter_map(|(key, engine)| engine.tick(now).map(|action| (key.clone(), action)))
            .collect();
        for (key, action) in actions {
            self.handle_action(&key, action);
        }
    }

    fn key_command(keysym: Keysym) -> Option<KeyCommand> {
        if keysym == Keysym::Escape || keysym == Keysym::q {
            Some(KeyCommand::Close)
        } else if keysym == Keysym::r {
            Some(KeyCommand::ToggleRotationMode)
        } else if keysym == Keysym::m {
            Some(KeyCommand::Minimize)
        } else {
            None
        }
    }
}

/// Run the session: one dispatch loop for every open sticker window.
pub fn run(
    library: ImageLibrary,
    items: Vec<ImageItem>,
    open_ids: Vec<uuid::Uuid>,
    transient: Option<TransientSticker>,
) -> Result<()> {
    info!("Connecting to Wayland display");
    let conn = Connection::connect_to_env().context("Failed to connect to Wayland display")?;

    let (globals, event_queue) =
        registry_queue_init(&conn).context("Failed to initialize registry")?;
    let qh = event_queue.handle();

    let compositor_state =
        CompositorState::bind(&globals, &qh).context("Failed to bind compositor")?;
    let layer_shell = LayerShell::bind(&globals, &qh).context("Failed to bind layer shell")?;
    let shm = Shm::bind(&globals, &qh).context("Failed to bind shm")?;

    let mut host = WaylandHost {
        registry_state: RegistryState::new(&globals),
        seat_state: SeatState::new(&globals, &qh),
        output_state: OutputState::new(&globals, &qh),
        shm,
        layer_shell,
        compositor_state,
        library,
        items,
        open: OverlayRegistry::new(),
        windows: HashMap::new(),
        keyboard_focus: None,
        should_exit: false,
    };

    let mut event_loop: EventLoop<WaylandHost> =
        EventLoop::try_new().context("Failed to create event loop")?;
    WaylandSource::new(conn.clone(), event_queue)
        .insert(event_loop.handle())
        .map_err(|e| anyhow!("Failed to insert Wayland source: {}", e))?;

    let (loader_tx, loader_rx) = channel::channel();
    event_loop
        .handle()
        .insert_source(loader_rx, |event, _, host: &mut WaylandHost| {
            if let channel::Event::Msg(result) = event {
                host.on_image_loaded(result);
            }
        })
        .map_err(|e| anyhow!("Failed to insert loader channel: {}", e))?;

    for item_id in open_ids {
        host.open_sticker(item_id, &qh, &loader_tx);
    }
    if let Some(sticker) = transient {
        host.open_transient(sticker, &qh);
    }
    if host.windows.is_empty() {
        anyhow::bail!("No overlay windows could be created");
    }

    info!("Starting event loop with {} windows", host.windows.len());
    info!("Controls: drag to move, drag handles to resize, R for rotation mode");
    info!("Right-click for the menu, scroll to adjust opacity, Escape to close");

    let signal = event_loop.get_signal();
    event_loop
        .run(TICK_INTERVAL, &mut host, move |host| {
            host.tick();
            if host.should_exit {
                signal.stop();
            }
        })
        .context("Event loop failed")?;

    info!("All stickers closed, exiting");
    Ok(())
}

impl CompositorHandler for WaylandHost {
    fn scale_factor_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _new_factor: i32,
    ) {
        debug!("Scale factor changed");
    }

    fn transform_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _new_transform: wl_output::Transform,
    ) {
        debug!("Transform changed");
    }

    fn frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _time: u32,
    ) {
        // Redraws are driven by the dispatch tick.
    }

    fn surface_enter(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _output: &wl_output::WlOutput,
    ) {
    }

    fn surface_leave(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _output: &wl_output::WlOutput,
    ) {
    }
}

impl OutputHandler for WaylandHost {
    fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    fn new_output(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
        debug!("New output detected");
    }

    fn update_output(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
    }

    fn output_destroyed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: wl_output::WlOutput,
    ) {
        debug!("Output destroyed");
    }
}

impl LayerShellHandler for WaylandHost {
    fn closed(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, layer: &LayerSurface) {
        info!("Layer surface closed by the compositor");
        let key = layer.wl_surface().id();
        self.close_window(&key);
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        layer: &LayerSurface,
        configure: LayerSurfaceConfigure,
        _serial: u32,
    ) {
        debug!("Layer surface configured: {:?}", configure);
        let key = layer.wl_surface().id();
        if let Some(engine) = self.windows.get_mut(&key) {
            engine.surface_mut().set_configured();
            engine.surface_configured(configure.new_size, Instant::now());
        }
    }
}

impl SeatHandler for WaylandHost {
    fn seat_state(&mut self) -> &mut SeatState {
        &mut self.seat_state
    }

    fn new_seat(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _seat: wl_seat::WlSeat) {
        debug!("New seat");
    }

    fn new_capability(
        &mut self,
        _conn: &Connection,
        qh: &QueueHandle<Self>,
        seat: wl_seat::WlSeat,
        capability: Capability,
    ) {
        debug!("New capability: {:?}", capability);

        if capability == Capability::Keyboard {
            if let Err(e) = self.seat_state.get_keyboard(qh, &seat, None) {
                error!("Failed to get keyboard: {}", e);
            }
        }
        if capability == Capability::Pointer {
            if let Err(e) = self.seat_state.get_pointer(qh, &seat) {
                error!("Failed to get pointer: {}", e);
            }
        }
    }

    fn remove_capability(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _seat: wl_seat::WlSeat,
        _capability: Capability,
    ) {
        debug!("Capability removed");
    }

    fn remove_seat(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _seat: wl_seat::WlSeat) {
        debug!("Seat removed");
    }
}

impl KeyboardHandler for WaylandHost {
    fn enter(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        surface: &wl_surface::WlSurface,
        _serial: u32,
        _raw: &[u32],
        _keysyms: &[Keysym],
    ) {
        self.keyboard_focus = Some(surface.id());
    }

    fn leave(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        surface: &wl_surface::WlSurface,
        _serial: u32,
    ) {
        if self.keyboard_focus == Some(surface.id()) {
            self.keyboard_focus = None;
        }
    }

    fn press_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        event: KeyEvent,
    ) {
        debug!("Key pressed: {:?}", event.keysym);
        let Some(command) = Self::key_command(event.keysym) else {
            return;
        };
        let Some(key) = self.keyboard_focus.clone() else {
            return;
        };
        let action = self
            .windows
            .get_mut(&key)
            .and_then(|engine| engine.key(command));
        if let Some(action) = action {
            self.handle_action(&key, action);
        }
    }

    fn release_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        _event: KeyEvent,
    ) {
    }

    fn update_modifiers(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        _modifiers: Modifiers,
        _layout: u32,
    ) {
    }
}

impl PointerHandler for WaylandHost {
    fn pointer_frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _pointer: &wl_pointer::WlPointer,
        events: &[PointerEvent],
    ) {
        for event in events {
            let key = event.surface.id();
            let now = Instant::now();
            let action = match self.windows.get_mut(&key) {
                Some(engine) => match event.kind {
                    PointerEventKind::Enter { .. } => {
                        engine.pointer_enter();
                        None
                    }
                    PointerEventKind::Leave { .. } => engine.pointer_leave(),
                    PointerEventKind::Motion { .. } => engine.pointer_motion(event.position, now),
                    PointerEventKind::Press { button, .. } => match pointer_button(button) {
                        Some(button) => engine.pointer_press(button, event.position, now),
                        None => None,
                    },
                    PointerEventKind::Release { button, .. } => match pointer_button(button) {
                        Some(button) => engine.pointer_release(button),
                        None => None,
                    },
                    PointerEventKind::Axis { vertical, .. } => {
                        if vertical.absolute != 0.0 {
                            let step = if vertical.absolute > 0.0 {
                                -OPACITY_STEP
                            } else {
                                OPACITY_STEP
                            };
                            engine.adjust_opacity(step)
                        } else {
                            None
                        }
                    }
                },
                None => None,
            };
            if let Some(action) = action {
                self.handle_action(&key, action);
            }
        }
    }
}

fn pointer_button(button: u32) -> Option<PointerButton> {
    match button {
        BTN_LEFT => Some(PointerButton::Primary),
        BTN_RIGHT => Some(PointerButton::Secondary),
        _ => None,
    }
}

impl ShmHandler for WaylandHost {
    fn shm_state(&mut self) -> &mut Shm {
        &mut self.shm
    }
}

impl ProvidesRegistryState for WaylandHost {
    fn registry(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    registry_handlers![OutputState, SeatState];
}

// Delegate macros
delegate_compositor!(WaylandHost);
delegate_output!(WaylandHost);
delegate_layer!(WaylandHost);
delegate_seat!(WaylandHost);
delegate_keyboard!(WaylandHost);
delegate_pointer!(WaylandHost);
delegate_shm!(WaylandHost);
delegate_registry!(WaylandHost);
