use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::{ChildLabel, ITEM_SIZE_DP, PADDING_DP, view};
use gtk::prelude::*;
use gtk4 as gtk;
use raymenu::config;
use raymenu::geometry::dp_to_px;
use raymenu::{Padding, Point, RayMenu, Rect, Size, TouchAction, TouchEvent};
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

pub struct AppInit {
    pub menu: RayMenu<ChildLabel>,
    pub config_path: PathBuf,
    /// Command-line density, reapplied over every reloaded config.
    pub density_override: Option<f64>,
    pub rx: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub menu: Rc<RefCell<RayMenu<ChildLabel>>>,
    pub config_path: PathBuf,
    pub density_override: Option<f64>,
    pub drawing_area: gtk::DrawingArea,
    last_frame: Option<i64>,
}

#[derive(Debug)]
pub enum AppMsg {
    Resize(i32, i32),
    Touch(TouchAction, Point),
    /// Frame clock timestamp in microseconds.
    Frame(i64),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("RayMenu"),
            set_default_width: 360,
            set_default_height: 640,

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "raymenu-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::GestureClick {
                    connect_pressed[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Touch(TouchAction::Down, Point::new(x, y)));
                    },
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Touch(TouchAction::Up, Point::new(x, y)));
                    },
                    connect_cancel[sender] => move |_, _| {
                        sender.input(AppMsg::Touch(TouchAction::Cancel, Point::default()));
                    }
                },

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::Touch(TouchAction::Move, Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            mut menu,
            config_path,
            density_override,
            rx,
        } = init;

        theme::load_css();

        menu.set_on_menu_item_click(|child, pos| {
            log::info!("pos = {} ({})", pos, child);
        });

        let model = AppModel {
            menu: Rc::new(RefCell::new(menu)),
            config_path,
            density_override,
            drawing_area: gtk::DrawingArea::default(),
            last_frame: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let menu_draw = model.menu.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = view::draw(cr, &menu_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let tick_sender = sender.clone();
        widgets.drawing_area.add_tick_callback(move |_, clock| {
            tick_sender.input(AppMsg::Frame(clock.frame_time()));
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Resize(width, height) => {
                let mut menu = self.menu.borrow_mut();
                let density = menu.config().layout.density;
                let item = dp_to_px(ITEM_SIZE_DP, density);
                let padding = Padding::all(dp_to_px(PADDING_DP, density));
                let sizes = vec![Size::new(item, item); menu.children().len()];

                match menu.measure(Size::new(width, height), padding, &sizes) {
                    Ok(()) => {
                        if menu.layout(Rect::new(0, 0, width, height)) {
                            self.drawing_area.queue_draw();
                        }
                    }
                    Err(e) => log::error!("Measure failed: {}", e),
                }
            }
            AppMsg::Touch(action, point) => {
                self.menu
                    .borrow_mut()
                    .on_touch(TouchEvent::new(action, point));
                self.drawing_area.queue_draw();
            }
            AppMsg::Frame(frame_time) => {
                let dt = self
                    .last_frame
                    .map(|last| Duration::from_micros(frame_time.saturating_sub(last).max(0) as u64))
                    .unwrap_or_default();
                self.last_frame = Some(frame_time);

                let mut menu = self.menu.borrow_mut();
                let was_animating = menu.is_animating();
                menu.advance(dt);
                if was_animating || menu.is_animating() {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::ConfigReload => match config::load_config(&self.config_path) {
                Ok(mut new_config) => {
                    if let Some(density) = self.density_override {
                        new_config.layout.density = density;
                    }
                    self.menu.borrow_mut().apply_config(new_config);
                    sender.input(AppMsg::Resize(
                        self.drawing_area.width(),
                        self.drawing_area.height(),
                    ));
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}
