//! Main application state and logic.

mod constants;
mod host;
mod render;
pub mod state;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use compact_str::{CompactString, format_compact};
use crossterm::event::{Event, EventStream, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use futures::StreamExt;
use ratatui::layout::Rect;
use ratatui::{DefaultTerminal, Frame};
use slidelist_core::{ReorderConfig, apply_reorder};
use slidelist_gesture::{GestureController, LongPressDetector, PressEvent, SlideStore};
use tokio::sync::mpsc;
use tokio_stream::wrappers::WatchStream;

use crate::TuiConfig;
use crate::event::KeyAction;
use crate::theme::Theme;
use crate::ui::{AppLayout, RowGeometry};

pub use self::constants::{DEFAULT_ITEM_COUNT, DEFAULT_ROWS_PER_ITEM};
pub use self::host::HostEvent;
use self::constants::{STATUS_TICKS, TICK_INTERVAL_MS};
use self::host::ListHost;
use self::render::{RenderContext, render_app};
use self::state::{AppMode, UserSettings};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Identity of a list item.
pub type ItemId = CompactString;

/// A header message and whether it reports success.
#[derive(Debug, Clone)]
struct Status {
    ok: bool,
    message: String,
    ticks_left: u32,
}

/// Main application state.
pub struct App {
    /// Current mode.
    mode: AppMode,
    /// Color theme.
    theme: Theme,
    /// User settings (persistent configuration).
    settings: UserSettings,
    /// Where settings are saved; `None` disables saving.
    settings_path: Option<PathBuf>,
    /// Effective reorder config (settings plus command line overrides).
    config: ReorderConfig,
    /// Row/pixel mapping.
    geometry: RowGeometry,
    /// Order the list started in, for reset.
    original: Vec<ItemId>,
    /// Current list order.
    items: Vec<ItemId>,
    /// Slide state of every displaced item.
    slides: SlideStore<ItemId>,
    /// Shared host handed to every controller.
    host: Arc<ListHost>,
    /// Lifecycle events from controllers.
    host_rx: mpsc::UnboundedReceiver<HostEvent>,
    /// One controller per item that has been dragged at least once.
    controllers: HashMap<ItemId, GestureController<ItemId>>,
    /// Long-press recognition for the pointer.
    press: LongPressDetector,
    /// Item under the pointer when it went down.
    pressed: Option<ItemId>,
    /// Index of the first visible item.
    scroll: usize,
    /// List area from the last draw, for hit testing.
    list_area: Rect,
    /// Header message.
    status: Option<Status>,
    /// Flag indicating UI needs redraw.
    needs_redraw: bool,
}

impl App {
    /// Create a new application, loading user settings from disk.
    pub fn new(config: TuiConfig) -> Self {
        Self::with_settings(config, UserSettings::load(), UserSettings::config_path())
    }

    /// Create an application from explicit settings.
    ///
    /// Settings changes are written to `settings_path` when it is set.
    pub fn with_settings(
        config: TuiConfig,
        settings: UserSettings,
        settings_path: Option<PathBuf>,
    ) -> Self {
        let mut reorder = settings.reorder.clone();
        if let Some(mode) = config.commit_mode {
            reorder.commit_mode = mode;
        }

        let count = config.item_count.unwrap_or(DEFAULT_ITEM_COUNT);
        let items: Vec<ItemId> = (0..count).map(|i| format_compact!("Item {i}")).collect();

        let slides = SlideStore::new();
        let (host, host_rx) = ListHost::new(slides.clone());

        tracing::info!(
            items = count,
            item_height = reorder.item_height,
            commit_mode = %reorder.commit_mode,
            "Starting list"
        );

        Self {
            mode: AppMode::default(),
            theme: Theme::from_variant(settings.theme),
            geometry: RowGeometry::new(reorder.item_height, settings.rows_per_item),
            press: LongPressDetector::from_config(&reorder),
            config: reorder,
            settings,
            settings_path,
            original: items.clone(),
            items,
            slides,
            host: Arc::new(host),
            host_rx,
            controllers: HashMap::new(),
            pressed: None,
            scroll: 0,
            list_area: Rect::default(),
            status: None,
            needs_redraw: true,
        }
    }

    /// Run the application with async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        let period = Duration::from_millis(TICK_INTERVAL_MS);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();
        let mut slide_changes = WatchStream::from_changes(self.slides.subscribe());

        while self.mode != AppMode::Quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(event) = events.next() => {
                    self.handle_event(event?).await?;
                    self.needs_redraw = true;
                }

                Some(event) = self.host_rx.recv() => {
                    self.handle_host_event(event);
                    self.needs_redraw = true;
                }

                Some(_) = slide_changes.next() => {
                    self.needs_redraw = true;
                }

                _ = interval.tick() => {
                    self.on_tick().await?;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    async fn handle_event(&mut self, event: Event) -> AppResult<()> {
        match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                let action = KeyAction::from_key_event(key_event);
                self.handle_action(action).await?;
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse).await?,
            Event::FocusLost => {
                if let Some(event) = self.press.cancel() {
                    self.dispatch(event).await?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: KeyAction) -> AppResult<()> {
        if self.mode == AppMode::Help {
            if matches!(
                action,
                KeyAction::ToggleHelp | KeyAction::Cancel | KeyAction::Quit
            ) {
                self.mode = AppMode::Normal;
            }
            return Ok(());
        }

        match action {
            KeyAction::ScrollDown => self.scroll_by(1),
            KeyAction::ScrollUp => self.scroll_by(-1),
            KeyAction::JumpToTop => self.scroll = 0,
            KeyAction::JumpToBottom => self.scroll = self.max_scroll(),
            KeyAction::Cancel => {
                if let Some(event) = self.press.cancel() {
                    self.dispatch(event).await?;
                }
            }
            KeyAction::ToggleCommitMode => {
                let mode = self.config.commit_mode.toggled();
                self.config.commit_mode = mode;
                self.settings.reorder.commit_mode = mode;
                self.save_settings();
                self.set_status(true, format!("Commit mode: {mode}"));
            }
            KeyAction::ResetOrder => self.reset_order(),
            KeyAction::ToggleTheme => {
                self.theme = self.theme.toggle();
                self.settings.theme = self.theme.variant;
                self.save_settings();
            }
            KeyAction::ToggleHelp => self.mode = AppMode::Help,
            KeyAction::Quit | KeyAction::ForceQuit => self.mode = AppMode::Quit,
            KeyAction::None => {}
        }
        Ok(())
    }

    async fn handle_mouse(&mut self, mouse: MouseEvent) -> AppResult<()> {
        let now = Instant::now();
        let y = self.geometry.row_to_px(mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // The release of the previous drag never arrived (button let
                // go outside the window); abandon it before re-targeting.
                if self.press.is_dragging()
                    && let Some(event) = self.press.cancel()
                {
                    self.dispatch(event).await?;
                }

                self.pressed = self
                    .geometry
                    .hit_test(
                        self.list_area,
                        self.scroll,
                        self.items.len(),
                        mouse.column,
                        mouse.row,
                    )
                    .and_then(|index| self.items.get(index).cloned());

                if self.pressed.is_some()
                    && let Some(event) = self.press.press(y, now)
                {
                    self.dispatch(event).await?;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                for event in self.press.move_to(y, now) {
                    self.dispatch(event).await?;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(event) = self.press.release() {
                    self.dispatch(event).await?;
                }
            }
            MouseEventKind::ScrollDown if !self.press.is_dragging() => self.scroll_by(1),
            MouseEventKind::ScrollUp if !self.press.is_dragging() => self.scroll_by(-1),
            _ => {}
        }
        Ok(())
    }

    /// Forward a recognized gesture to the pressed item's controller.
    async fn dispatch(&mut self, event: PressEvent) -> AppResult<()> {
        let Some(item) = self.pressed.clone() else {
            return Ok(());
        };

        match event {
            PressEvent::DragStart => {
                let items: Arc<[ItemId]> = self.items.as_slice().into();
                self.controller(&item).start(items).await?;
            }
            PressEvent::DragMove { delta_y } => {
                self.controller(&item).drag(delta_y).await?;
            }
            PressEvent::DragEnd => self.controller(&item).end().await?,
            PressEvent::DragCancel => {
                self.controller(&item).cancel().await?;
                self.set_status(false, format!("Cancelled drag of {item}"));
            }
        }
        Ok(())
    }

    fn controller(&mut self, item: &ItemId) -> &GestureController<ItemId> {
        self.controllers.entry(item.clone()).or_insert_with(|| {
            tracing::debug!(%item, "Attaching gesture controller");
            GestureController::spawn(item.clone(), Arc::clone(&self.host), &self.config)
        })
    }

    /// Apply a controller event. Returns the dropped item for a stop.
    fn handle_host_event(&mut self, event: HostEvent) -> Option<ItemId> {
        match event {
            HostEvent::Started { origin } => {
                tracing::debug!(origin, "Drag started");
                None
            }
            HostEvent::Stopped { from, to } => {
                let dropped = self.items.get(from).cloned();
                let mode = self.config.commit_mode;
                match apply_reorder(&mut self.items, from, to, mode) {
                    Ok(()) if from == to => {}
                    Ok(()) => {
                        let name = self.items.get(to).cloned().unwrap_or_default();
                        self.set_status(true, format!("Moved {name} from {from} to {to} ({mode})"));
                    }
                    Err(e) => {
                        tracing::warn!("Dropping reorder: {}", e);
                        self.set_status(false, e.to_string());
                    }
                }
                self.slides.reset_all();
                dropped
            }
        }
    }

    async fn on_tick(&mut self) -> AppResult<()> {
        if let Some(event) = self.press.poll(Instant::now()) {
            self.dispatch(event).await?;
            self.needs_redraw = true;
        }

        if self.any_drag_active() {
            self.needs_redraw = true;
        }

        if let Some(status) = &mut self.status {
            status.ticks_left = status.ticks_left.saturating_sub(1);
            if status.ticks_left == 0 {
                self.status = None;
                self.needs_redraw = true;
            }
        }
        Ok(())
    }

    fn any_drag_active(&self) -> bool {
        self.controllers
            .values()
            .any(|controller| controller.phase().is_active())
    }

    fn reset_order(&mut self) {
        if self.press.is_dragging() || self.any_drag_active() {
            self.set_status(false, "Finish the drag first".to_string());
            return;
        }
        self.items = self.original.clone();
        self.slides.reset_all();
        self.set_status(true, "Order reset".to_string());
    }

    fn scroll_by(&mut self, delta: isize) {
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        let visible = self.geometry.visible_items(self.list_area.height);
        self.items.len().saturating_sub(visible.max(1))
    }

    fn set_status(&mut self, ok: bool, message: String) {
        self.status = Some(Status {
            ok,
            message,
            ticks_left: STATUS_TICKS,
        });
    }

    fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save_to(path) {
            tracing::warn!("Failed to save settings to {}: {}", path.display(), e);
        }
    }

    /// Items being dragged or settling, with their offsets, after applying
    /// any drops that are already queued.
    ///
    /// Controllers are read before the queue is drained: a controller reports
    /// its drop before it resets its offset and goes idle, so an item seen
    /// idle here has its reorder applied below, and an item that lands during
    /// the drain is drawn at rest in its new slot.
    fn frame_drags(&mut self) -> Vec<(usize, f32)> {
        let mut active: Vec<(ItemId, f32)> = self
            .controllers
            .iter()
            .filter(|(_, controller)| controller.phase().is_active())
            .map(|(item, controller)| (item.clone(), controller.offset()))
            .collect();

        while let Ok(event) = self.host_rx.try_recv() {
            if let Some(dropped) = self.handle_host_event(event) {
                active.retain(|(item, _)| *item != dropped);
            }
        }

        active
            .into_iter()
            .filter_map(|(item, offset)| {
                let index = self.items.iter().position(|candidate| *candidate == item)?;
                Some((index, offset))
            })
            .collect()
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.list_area = AppLayout::new(area).main;

        let dragged = self.frame_drags();
        let slides = self.slides.snapshot();
        let ctx = RenderContext {
            mode: self.mode,
            theme: &self.theme,
            items: &self.items,
            slides: &slides,
            dragged: &dragged,
            geometry: self.geometry,
            scroll: self.scroll,
            commit_mode: self.config.commit_mode,
            status: self
                .status
                .as_ref()
                .map(|status| (status.ok, status.message.as_str())),
        };
        render_app(&ctx, area, frame.buffer_mut());
    }

    async fn shutdown(&mut self) {
        for (_, controller) in self.controllers.drain() {
            controller.shutdown().await;
        }
        tracing::debug!("App shut down");
    }
}
