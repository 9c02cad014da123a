use crate::config::{self, MonitorName};
use crate::events::AppEvent;
use crate::gui::state::WheelState;
use crate::gui::surface::CairoSurface;
use crate::gui::{theme, window};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use spinwheel::label::Label;
use spinwheel::wheel::render;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub state: Rc<RefCell<WheelState>>,
    pub visible: bool,
    pub monitor: Option<MonitorName>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    tick_callback: Rc<RefCell<Option<gtk::TickCallbackId>>>,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Spin,
    SpinFinished(Label),
    AddLabel(Label),
    RemoveLabel(Label),
    ClearLabels,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Spin => AppMsg::Spin,
            AppEvent::AddLabel(l) => AppMsg::AddLabel(l),
            AppEvent::RemoveLabel(l) => AppMsg::RemoveLabel(l),
            AppEvent::ClearLabels => AppMsg::ClearLabels,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn status_text(&self) -> String {
        self.state.borrow().status_text()
    }

    fn show(&mut self) {
        if let Some(name) = &self.monitor {
            window::set_window_monitor(&self.root, name);
        }
        self.visible = true;
        self.drawing_area.queue_draw();
    }

    /// Drives the wheel from the widget's frame clock until the spin ends.
    fn start_ticking(&self) {
        let state = self.state.clone();
        let handle = self.tick_callback.clone();
        let id = self.drawing_area.add_tick_callback(move |area, clock| {
            let now_ms = clock.frame_time() as f64 / 1000.0;
            let tick = state.borrow_mut().tick(now_ms);
            area.queue_draw();
            if tick.wants_next_frame() {
                glib::ControlFlow::Continue
            } else {
                handle.borrow_mut().take();
                glib::ControlFlow::Break
            }
        });
        *self.tick_callback.borrow_mut() = Some(id);
    }

    /// Abandons a running spin; its completion callback never fires.
    fn dispose_spin(&self) {
        self.state.borrow_mut().wheel.dispose();
        if let Some(id) = self.tick_callback.borrow_mut().take() {
            id.remove();
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        WheelState,
        Option<MonitorName>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Class Wheel"),
            #[watch]
            set_visible: model.visible,
            #[watch]
            set_opacity: if model.visible { 1.0 } else { 0.0 },
            add_css_class: "classwheel-window",
            set_decorated: false,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    if key == gtk::gdk::Key::space || key == gtk::gdk::Key::Return {
                        sender.input(AppMsg::Spin);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "overlay"]
            gtk::Overlay {
                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "classwheel-drawing-area",

                    add_controller = gtk::GestureClick {
                        set_button: gtk::gdk::BUTTON_PRIMARY,
                        connect_released[sender] => move |_, _, _, _| {
                            sender.input(AppMsg::Spin);
                        }
                    }
                },

                add_overlay = &gtk::Label {
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::End,
                    set_margin_bottom: 48,
                    add_css_class: "classwheel-status",
                    #[watch]
                    set_label: &model.status_text(),
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, monitor, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let model = AppModel {
            state: Rc::new(RefCell::new(state)),
            visible: false,
            monitor,
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            tick_callback: Rc::new(RefCell::new(None)),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style = theme::wheel_style(&drawing_area.style_context());
                let scene = state_draw.borrow().scene(width as f64, height as f64);
                if let Err(e) = render(&scene, &mut CairoSurface::new(cr), &style) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => self.show(),
            AppMsg::Hide => {
                self.dispose_spin();
                self.visible = false;
            }
            AppMsg::Spin => {
                if !self.visible {
                    self.show();
                }
                let input = sender.clone();
                let started = self.state.borrow_mut().start_spin(move |selection| {
                    input.input(AppMsg::SpinFinished(selection.clone()));
                });
                if started {
                    self.start_ticking();
                }
            }
            AppMsg::SpinFinished(selection) => {
                log::info!("Selected '{}'", selection);
                self.drawing_area.queue_draw();
            }
            AppMsg::AddLabel(label) => {
                self.state.borrow_mut().add_label(&label);
                self.drawing_area.queue_draw();
            }
            AppMsg::RemoveLabel(label) => {
                self.state.borrow_mut().remove_label(&label);
                self.drawing_area.queue_draw();
            }
            AppMsg::ClearLabels => {
                self.state.borrow_mut().clear_labels();
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.state.borrow_mut().reload(&new_config);
                    self.monitor = new_config.monitor;
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
