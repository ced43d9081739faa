//! Main egui application: routes between screens and drives the session.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use egui::{self, CentralPanel, RichText, TopBottomPanel};

use chat_core::context::ChatContext;
use chat_core::event_bus::EventBus;
use chat_core::identity::validate_username;
use chat_core::session::SessionManager;
use chat_ui::panels::{agent_selection_panel, chat_panel, header_bar, login_panel};
use chat_ui::panels::{ChatAction, HeaderAction};
use chat_ui::route::Route;
use chat_ui::state::UiState;
use chat_ui::theme;

use crate::bootstrap::build_context;

/// How often to repaint while a request is in flight; timers fire outside egui.
const PENDING_REPAINT: Duration = Duration::from_millis(200);

type Slot<T> = Rc<RefCell<Option<T>>>;

/// The main application state
pub struct ChatApp {
    ui_state: UiState,
    event_bus: EventBus,
    /// Filled once start-up finishes
    context: Slot<ChatContext>,
    /// The open conversation, if any
    session: Slot<SessionManager>,
    /// Bumped on every conversation switch; a late `initialize` for an older
    /// generation disposes itself instead of taking the slot.
    generation: Rc<Cell<u64>>,
    /// Last hash this app wrote or saw
    hash: String,
    first_frame: bool,
}

impl ChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let event_bus = EventBus::new();
        let context: Slot<ChatContext> = Rc::new(RefCell::new(None));

        let slot = context.clone();
        let bus = event_bus.clone();
        let egui_ctx = cc.egui_ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let ctx = build_context(bus).await;
            *slot.borrow_mut() = Some(ctx);
            egui_ctx.request_repaint();
        });

        Self {
            ui_state: UiState::new(),
            event_bus,
            context,
            session: Rc::new(RefCell::new(None)),
            generation: Rc::new(Cell::new(0)),
            hash: String::new(),
            first_frame: true,
        }
    }

    fn read_hash() -> String {
        gloo_utils::window().location().hash().unwrap_or_default()
    }

    fn write_hash(&mut self, route: &Route) {
        let hash = format!("#{}", route.to_path());
        if hash != self.hash {
            if let Err(e) = gloo_utils::window().location().set_hash(&hash) {
                log::warn!("Could not update location hash: {:?}", e);
            }
            self.hash = hash;
        }
    }

    /// Pick up hash edits (back button, typed URL) and apply the route guard.
    fn sync_route(&mut self, ctx: &ChatContext) {
        let hash = Self::read_hash();
        let requested = if hash != self.hash {
            self.hash = hash;
            Route::from_path(&self.hash)
        } else {
            self.ui_state.route.clone()
        };

        let allowed = requested.guard(ctx.identity.is_logged_in(), &ctx.catalog);
        if allowed != self.ui_state.route {
            self.navigate(ctx, allowed);
        } else {
            let route = self.ui_state.route.clone();
            self.write_hash(&route);
        }
    }

    fn navigate(&mut self, ctx: &ChatContext, route: Route) {
        let leaving = self.ui_state.route.agent_id().map(str::to_string);
        let entering = route.agent_id().map(str::to_string);

        if leaving.is_some() && leaving != entering {
            self.close_session();
        }
        if let Some(agent_id) = entering {
            if self.ui_state.agent_id.as_deref() != Some(agent_id.as_str()) {
                self.open_session(ctx, &agent_id);
            }
        }

        log::debug!("Route {:?} -> {:?}", self.ui_state.route, route);
        self.write_hash(&route);
        self.ui_state.route = route;
    }

    fn open_session(&mut self, ctx: &ChatContext, agent_id: &str) {
        self.close_session();
        let generation = self.generation.get();
        self.ui_state.agent_id = Some(agent_id.to_string());

        if let Some(agent) = ctx.catalog.get(agent_id) {
            if ctx.identity.selected_agent().as_ref() != Some(agent) {
                let identity = ctx.identity.clone();
                let agent = agent.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = identity.select_agent(&agent).await {
                        log::warn!("Could not persist agent selection: {}", e);
                    }
                });
            }
        }

        let ctx = ctx.clone();
        let slot = self.session.clone();
        let current = self.generation.clone();
        let agent_id = agent_id.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            match SessionManager::initialize(&ctx, &agent_id).await {
                Ok(session) if current.get() == generation => {
                    *slot.borrow_mut() = Some(session);
                }
                Ok(session) => session.dispose().await,
                Err(e) => log::error!("Could not open conversation: {}", e),
            }
        });
    }

    fn close_session(&mut self) {
        self.generation.set(self.generation.get() + 1);
        if let Some(session) = self.session.borrow_mut().take() {
            wasm_bindgen_futures::spawn_local(async move { session.dispose().await });
        }
        self.ui_state.close_conversation();
    }

    fn current_session(&self) -> Option<SessionManager> {
        self.session.borrow().clone()
    }

    fn login(&mut self, ctx: &ChatContext, input: &str) {
        match validate_username(input) {
            Ok(user) => {
                self.ui_state.login_error = None;
                self.ui_state.login_input.clear();
                let identity = ctx.identity.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = identity.login(&user.username).await {
                        log::warn!("Could not persist user: {}", e);
                    }
                });
                self.navigate(ctx, Route::AgentSelection);
            }
            Err(e) => self.ui_state.login_error = Some(e.to_string()),
        }
    }

    fn logout(&mut self, ctx: &ChatContext) {
        self.close_session();
        let identity = ctx.identity.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = identity.logout().await {
                log::warn!("Logout left data behind: {}", e);
            }
        });
        self.navigate(ctx, Route::Login);
    }

    fn send(&self, text: String, egui_ctx: &egui::Context) {
        let Some(session) = self.current_session() else {
            log::warn!("No open conversation; message dropped");
            return;
        };
        let egui_ctx = egui_ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(outcome) = session.send(&text).await {
                log::debug!("Send finished: {:?}", outcome);
            }
            egui_ctx.request_repaint();
        });
    }

    fn clear(&self, egui_ctx: &egui::Context) {
        let Some(session) = self.current_session() else {
            return;
        };
        let egui_ctx = egui_ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = session.clear().await {
                log::warn!("Clearing the conversation failed: {}", e);
            }
            egui_ctx.request_repaint();
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, egui_ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(egui_ctx);
            self.first_frame = false;
        }

        let Some(ctx) = self.context.borrow().clone() else {
            CentralPanel::default().show(egui_ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("Loading...").color(theme::TEXT_SECONDARY));
                });
            });
            return;
        };

        if self.event_bus.has_pending() {
            self.ui_state.process_events(self.event_bus.drain());
            egui_ctx.request_repaint();
        }
        if self.ui_state.pending {
            egui_ctx.request_repaint_after(PENDING_REPAINT);
        }

        self.sync_route(&ctx);

        // ── Top bar ──────────────────────────────────────────
        let username = ctx.identity.user().map(|u| u.username);
        let mut logout = false;
        TopBottomPanel::top("top_bar").show(egui_ctx, |ui| {
            if let HeaderAction::Logout = header_bar(ui, username.as_deref()) {
                logout = true;
            }
        });
        if logout {
            self.logout(&ctx);
        }

        // ── Main content ─────────────────────────────────────
        let route = self.ui_state.route.clone();
        CentralPanel::default().show(egui_ctx, |ui| match &route {
            Route::Login => {
                if let Some(input) = login_panel(ui, &mut self.ui_state) {
                    self.login(&ctx, &input);
                }
            }
            Route::AgentSelection => {
                let selected = ctx.identity.selected_agent().map(|a| a.id);
                if let Some(agent_id) =
                    agent_selection_panel(ui, ctx.catalog.all(), selected.as_deref())
                {
                    self.navigate(&ctx, Route::Chat { agent_id });
                }
            }
            Route::Chat { agent_id } => {
                let Some(agent) = ctx.catalog.get(agent_id).cloned() else {
                    return;
                };
                match chat_panel(ui, &mut self.ui_state, &agent) {
                    ChatAction::Send(text) => self.send(text, egui_ctx),
                    ChatAction::Clear => self.clear(egui_ctx),
                    ChatAction::Back => self.navigate(&ctx, Route::AgentSelection),
                    ChatAction::None => {}
                }
            }
        });
    }
}
