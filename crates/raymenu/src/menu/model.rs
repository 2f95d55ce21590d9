use super::TOGGLE;
use super::anim::{Animation, Animator, AnimatorEvent, Cue, Motion, Sequence, SequenceId, Transform};
use super::layout::MenuLayout;
use crate::config::MenuConfig;
use crate::geometry::{Measurement, MeasureError, Padding, Point, Rect, Size, dp_to_px};
use crate::input::{TouchAction, TouchEvent};
use std::fmt;
use std::time::Duration;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum MenuStatus {
    #[default]
    Closed,
    Open,
}

/// Per-item flags the renderer and hit testing read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemFlags {
    pub visible: bool,
    /// Clickable and focusable.
    pub enabled: bool,
}

/// All mutable menu state, changed only by the transitions below.
#[derive(Debug, Clone, Default)]
struct MenuFlags {
    status: MenuStatus,
    /// Indexed by child index; entry 0 (the toggle) is unused.
    items: Vec<ItemFlags>,
    toggle_armed: bool,
}

/// What the host needs to draw one child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildVisual {
    pub index: usize,
    pub rect: Rect,
    pub transform: Transform,
    pub visible: bool,
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Toggle,
    Item(usize),
}

type ClickListener<V> = Box<dyn FnMut(&V, usize)>;

/// Fan-out menu: child 0 toggles the grid of items above it.
///
/// The host owns rendering, measurement and the clock. It reports sizes through
/// [`RayMenu::measure`] and [`RayMenu::layout`], feeds touches to
/// [`RayMenu::on_touch`], advances time with [`RayMenu::advance`] and draws whatever
/// [`RayMenu::visuals`] returns. `V` is the host's handle for a child and is handed
/// back to the click listener.
pub struct RayMenu<V> {
    config: MenuConfig,
    children: Vec<V>,
    measurement: Option<Measurement>,
    last_bounds: Option<Rect>,
    layout: Option<MenuLayout>,
    flags: MenuFlags,
    animator: Animator,
    selection: Option<usize>,
    pressed: Option<Hit>,
    listener: Option<ClickListener<V>>,
}

impl<V> RayMenu<V> {
    pub fn new() -> Self {
        Self::with_config(MenuConfig::default())
    }

    pub fn with_config(config: MenuConfig) -> Self {
        Self::from_children(Vec::new(), config)
    }

    pub fn from_children(children: Vec<V>, config: MenuConfig) -> Self {
        let mut menu = Self {
            config,
            children: Vec::new(),
            measurement: None,
            last_bounds: None,
            layout: None,
            flags: MenuFlags::default(),
            animator: Animator::new(),
            selection: None,
            pressed: None,
            listener: None,
        };
        menu.set_children(children);
        menu
    }

    /// Replaces all children. The menu closes and waits for a new measure pass.
    pub fn set_children(&mut self, children: Vec<V>) {
        self.flags = MenuFlags {
            items: vec![ItemFlags::default(); children.len()],
            ..MenuFlags::default()
        };
        self.children = children;
        self.measurement = None;
        self.layout = None;
        self.animator.reset();
        self.selection = None;
        self.pressed = None;
        self.invalidate_layout();
    }

    /// Appends a child. Sizes must be measured again before the next layout.
    pub fn push_child(&mut self, child: V) {
        self.children.push(child);
        self.flags.items.push(ItemFlags::default());
        self.measurement = None;
        self.invalidate_layout();
    }

    pub fn set_on_menu_item_click(&mut self, listener: impl FnMut(&V, usize) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_on_menu_item_click(&mut self) {
        self.listener = None;
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Swaps in new constants; placement reruns on the next layout pass.
    pub fn apply_config(&mut self, config: MenuConfig) {
        self.config = config;
        self.invalidate_layout();
    }

    pub fn children(&self) -> &[V] {
        &self.children
    }

    pub fn status(&self) -> MenuStatus {
        self.flags.status
    }

    pub fn is_open(&self) -> bool {
        self.flags.status == MenuStatus::Open
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn current_layout(&self) -> Option<&MenuLayout> {
        self.layout.as_ref()
    }

    pub fn item_flags(&self, index: usize) -> Option<ItemFlags> {
        (index != TOGGLE)
            .then(|| self.flags.items.get(index).copied())
            .flatten()
    }

    // Layout

    /// Records the container and natural child sizes reported by the host.
    pub fn measure(
        &mut self,
        container: Size,
        padding: Padding,
        child_sizes: &[Size],
    ) -> Result<(), MeasureError> {
        if child_sizes.len() != self.children.len() {
            return Err(MeasureError::ChildCountMismatch {
                expected: self.children.len(),
                got: child_sizes.len(),
            });
        }
        self.measurement = Some(Measurement::new(
            container,
            padding,
            child_sizes.to_vec(),
        )?);
        Ok(())
    }

    /// Places every child if `bounds` moved or resized since the last pass.
    /// Returns whether placement ran.
    pub fn layout(&mut self, bounds: Rect) -> bool {
        if self.last_bounds == Some(bounds) {
            return false;
        }
        let Some(measurement) = &self.measurement else {
            log::trace!("layout before measure, skipping");
            return false;
        };

        let vertical_gap = dp_to_px(
            self.config.layout.vertical_gap_dp,
            self.config.layout.density,
        );
        let layout = MenuLayout::calculate(measurement, vertical_gap);
        log::trace!(
            "layout {}: toggle {}, {} items in {} rows, gaps {}x{}",
            bounds,
            layout.toggle,
            layout.items.len(),
            layout.rows,
            layout.horizontal_gap,
            layout.vertical_gap
        );

        for item in &layout.items {
            if let Some(flags) = self.flags.items.get_mut(item.index) {
                flags.visible = false;
            }
        }

        self.layout = Some(layout);
        self.last_bounds = Some(bounds);
        self.flags.toggle_armed = true;
        true
    }

    pub fn invalidate_layout(&mut self) {
        self.last_bounds = None;
    }

    // Input

    pub fn on_touch(&mut self, event: TouchEvent) {
        let hit = self.hit_test(event.position);
        match event.action {
            TouchAction::Down => {
                self.pressed = hit;
                if hit.is_none() && self.is_open() && !self.guarded() {
                    log::debug!("background touch, closing");
                    self.close();
                }
            }
            TouchAction::Move => {
                if self.pressed.is_some() && hit != self.pressed {
                    self.pressed = None;
                }
            }
            TouchAction::Up => {
                match self.pressed.take().filter(|&p| Some(p) == hit) {
                    Some(Hit::Toggle) => {
                        self.tap_toggle();
                    }
                    Some(Hit::Item(index)) => {
                        self.tap_item(index);
                    }
                    None => {}
                }
            }
            TouchAction::Cancel => self.pressed = None,
        }
    }

    fn hit_test(&self, point: Point) -> Option<Hit> {
        let layout = self.layout.as_ref()?;

        // later children draw on top, so they win
        let item = layout.items.iter().rev().find(|slot| {
            self.flags
                .items
                .get(slot.index)
                .is_some_and(|f| f.visible && f.enabled)
                && slot.rect.contains(point)
        });
        if let Some(slot) = item {
            return Some(Hit::Item(slot.index));
        }

        (self.flags.toggle_armed && layout.toggle.contains(point)).then_some(Hit::Toggle)
    }

    fn guarded(&self) -> bool {
        if self.config.behavior.guard_transitions && self.animator.is_animating() {
            log::debug!("tap ignored, sequence still playing");
            return true;
        }
        false
    }

    /// Toggle control clicked: opens when closed, closes when open.
    /// Returns whether a transition started.
    pub fn tap_toggle(&mut self) -> bool {
        if !self.flags.toggle_armed || self.guarded() {
            return false;
        }
        match self.flags.status {
            MenuStatus::Closed => self.open(),
            MenuStatus::Open => self.close(),
        }
        true
    }

    /// Menu item clicked. Ignored unless the item is visible and enabled.
    pub fn tap_item(&mut self, index: usize) -> bool {
        let tappable = self
            .item_flags(index)
            .is_some_and(|f| f.visible && f.enabled);
        if !tappable || self.guarded() {
            return false;
        }
        self.select(index);
        true
    }

    // Transitions

    fn open(&mut self) {
        log::debug!("menu opening");
        let seq = self.animator.begin(Sequence::Open);
        self.toggle_menu(seq);
        self.change_status(MenuStatus::Open, seq);
    }

    fn close(&mut self) {
        log::debug!("menu closing");
        let seq = self.animator.begin(Sequence::Close);
        self.toggle_menu(seq);
        self.change_status(MenuStatus::Closed, seq);
    }

    /// Starts the staggered item travel. Direction comes from the current status,
    /// so this must run before the status flips.
    fn toggle_menu(&mut self, seq: SequenceId) {
        let Some(layout) = &self.layout else {
            return;
        };
        let child_count = self.children.len();
        if child_count <= 1 {
            return;
        }

        let anim_cfg = &self.config.animation;
        let opening = self.flags.status == MenuStatus::Closed;

        for slot in &layout.items {
            let Some(flags) = self.flags.items.get_mut(slot.index) else {
                continue;
            };
            flags.visible = true;
            flags.enabled = opening;

            let offset = slot.collapse_offset() as f64;
            let (motion, interpolator) = if opening {
                (
                    Motion::TranslateY {
                        from: offset,
                        to: 0.0,
                    },
                    anim_cfg.open_interpolator(),
                )
            } else {
                (
                    Motion::TranslateY {
                        from: 0.0,
                        to: offset,
                    },
                    anim_cfg.close_interpolator(),
                )
            };

            let animation = Animation::new(motion, anim_cfg.duration())
                .delay(anim_cfg.stagger(slot.index, child_count))
                .interpolator(interpolator)
                .fill_after(true);
            self.animator
                .start(slot.index, animation, Cue::HideIfClosed, seq);
        }
    }

    fn change_status(&mut self, status: MenuStatus, seq: SequenceId) {
        self.flags.status = status;

        let motion = match status {
            MenuStatus::Closed => Motion::Scale { from: 0.0, to: 1.0 },
            MenuStatus::Open => Motion::Scale { from: 1.0, to: 0.0 },
        };
        let animation = Animation::new(motion, self.config.animation.selection_duration())
            .fill_after(true);
        self.animator.start(TOGGLE, animation, Cue::None, seq);
    }

    /// Tapped item fades, the rest shrink, the toggle grows back. The listener
    /// hears about it once the toggle has finished growing.
    fn select(&mut self, pos: usize) {
        log::debug!("item {} selected", pos);
        self.selection = Some(pos);

        let seq = self.animator.begin(Sequence::Select);
        let duration = self.config.animation.selection_duration();
        let indices: Vec<usize> = self
            .layout
            .as_ref()
            .map(|l| l.items.iter().map(|s| s.index).collect())
            .unwrap_or_default();

        for index in indices {
            let motion = if index == pos {
                Motion::Alpha { from: 1.0, to: 0.0 }
            } else {
                Motion::Scale { from: 1.0, to: 0.0 }
            };
            self.animator.start(
                index,
                Animation::new(motion, duration).fill_after(true),
                Cue::None,
                seq,
            );
            if let Some(flags) = self.flags.items.get_mut(index) {
                flags.enabled = false;
            }
        }

        self.flags.status = MenuStatus::Closed;

        let regrow = Animation::new(Motion::Scale { from: 0.0, to: 1.0 }, duration).fill_after(true);
        self.animator
            .start(TOGGLE, regrow, Cue::DeliverSelection, seq);
    }

    // Clock

    /// Moves the animation clock forward and runs whatever finished.
    pub fn advance(&mut self, dt: Duration) {
        for event in self.animator.advance(dt) {
            match event {
                AnimatorEvent::Ended { view, cue } => self.on_animation_end(view, cue),
                AnimatorEvent::SequenceComplete { kind, interrupted } => {
                    if interrupted {
                        log::debug!("{} sequence finished (interrupted)", kind);
                    } else {
                        log::debug!("{} sequence finished", kind);
                    }
                }
            }
        }
    }

    fn on_animation_end(&mut self, view: usize, cue: Cue) {
        match cue {
            Cue::None => {}
            Cue::HideIfClosed => {
                if self.flags.status == MenuStatus::Closed
                    && let Some(flags) = self.flags.items.get_mut(view)
                {
                    flags.visible = false;
                    self.animator.clear(view);
                }
            }
            Cue::DeliverSelection => {
                let Some(pos) = self.selection.take() else {
                    return;
                };
                let Some(child) = self.children.get(pos) else {
                    log::warn!("selection {} dropped, child no longer exists", pos);
                    return;
                };
                match self.listener.as_mut() {
                    Some(listener) => listener(child, pos),
                    None => log::debug!("selection {} dropped, no listener", pos),
                }
            }
        }
    }

    // Rendering

    pub fn visual(&self, index: usize) -> Option<ChildVisual> {
        let rect = self.layout.as_ref()?.rect(index)?;
        let (visible, enabled) = if index == TOGGLE {
            (true, self.flags.toggle_armed)
        } else {
            let flags = self.flags.items.get(index)?;
            (flags.visible, flags.enabled)
        };
        Some(ChildVisual {
            index,
            rect,
            transform: self.animator.transform(index),
            visible,
            enabled,
        })
    }

    /// Visuals of every placed child in draw order, toggle first.
    pub fn visuals(&self) -> Vec<ChildVisual> {
        (0..self.children.len())
            .filter_map(|i| self.visual(i))
            .collect()
    }
}

impl<V> Default for RayMenu<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for RayMenu<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RayMenu")
            .field("status", &self.flags.status)
            .field("children", &self.children)
            .field("layout", &self.layout)
            .field("selection", &self.selection)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const ITEM: i32 = 80;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn menu_with(count: usize, config: MenuConfig) -> RayMenu<&'static str> {
        const NAMES: [&str; 10] = [
            "toggle", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
        ];
        let mut menu = RayMenu::from_children(NAMES[..count].to_vec(), config);
        menu.measure(
            Size::new(300, 400),
            Padding::horizontal(10, 10),
            &vec![Size::new(ITEM, ITEM); count],
        )
        .unwrap();
        assert!(menu.layout(Rect::new(0, 0, 300, 400)));
        menu
    }

    fn menu(count: usize) -> RayMenu<&'static str> {
        menu_with(count, MenuConfig::default())
    }

    fn recorder(menu: &mut RayMenu<&'static str>) -> Rc<RefCell<Vec<(&'static str, usize)>>> {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        menu.set_on_menu_item_click(move |child, pos| sink.borrow_mut().push((*child, pos)));
        calls
    }

    fn touch(menu: &mut RayMenu<&'static str>, action: TouchAction, x: f64, y: f64) {
        menu.on_touch(TouchEvent::new(action, Point::new(x, y)));
    }

    fn click(menu: &mut RayMenu<&'static str>, x: f64, y: f64) {
        touch(menu, TouchAction::Down, x, y);
        touch(menu, TouchAction::Up, x, y);
    }

    fn item_states(menu: &RayMenu<&'static str>) -> Vec<(bool, bool, Rect, Transform)> {
        menu.visuals()
            .into_iter()
            .skip(1)
            .map(|v| (v.visible, v.enabled, v.rect, v.transform))
            .collect()
    }

    #[test]
    fn test_layout_hides_items_and_arms_toggle() {
        let menu = menu(7);
        let layout = menu.current_layout().unwrap();
        assert_eq!(layout.toggle, Rect::new(210, 280, 290, 360));
        assert!((1..7).all(|i| !menu.item_flags(i).unwrap().visible));
        assert!(menu.visual(TOGGLE).unwrap().enabled);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let mut menu = menu(7);
        assert!(menu.tap_toggle());
        menu.advance(ms(500));
        assert!(menu.item_flags(1).unwrap().visible);

        assert!(!menu.layout(Rect::new(0, 0, 300, 400)));
        assert!(menu.item_flags(1).unwrap().visible);

        assert!(menu.layout(Rect::new(0, 10, 300, 410)));
        assert!(!menu.item_flags(1).unwrap().visible);
    }

    #[test]
    fn test_toggle_needs_layout() {
        let mut menu: RayMenu<&str> = RayMenu::from_children(vec!["toggle", "one"], MenuConfig::default());
        assert!(!menu.tap_toggle());
        assert!(!menu.layout(Rect::new(0, 0, 300, 400)));
        assert_eq!(menu.status(), MenuStatus::Closed);
    }

    #[test]
    fn test_measure_checks_child_count() {
        let mut menu = RayMenu::from_children(vec!["toggle", "one"], MenuConfig::default());
        assert_eq!(
            menu.measure(Size::new(300, 400), Padding::default(), &[Size::new(80, 80)]),
            Err(MeasureError::ChildCountMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_open_sequence() {
        let mut menu = menu(7);
        assert!(menu.tap_toggle());
        assert!(menu.is_open());

        // enabled at start, not on completion
        for i in 1..7 {
            let flags = menu.item_flags(i).unwrap();
            assert!(flags.visible && flags.enabled);
        }

        // items start from their collapse offset, the toggle from full size
        let v1 = menu.visual(1).unwrap();
        assert_eq!(v1.transform.dy, 160.0);
        assert_eq!(menu.visual(TOGGLE).unwrap().transform.scale, 1.0);

        menu.advance(ms(400));
        assert!(!menu.is_animating());
        for v in menu.visuals().iter().skip(1) {
            assert!(v.transform.dy.abs() < 1e-9);
            assert!(v.visible);
        }
        assert_eq!(menu.visual(TOGGLE).unwrap().transform.scale, 0.0);
    }

    #[test]
    fn test_open_is_staggered() {
        let mut menu = menu(7);
        menu.tap_toggle();
        menu.advance(ms(10));

        // item 1 starts at 16ms, item 6 at 100ms; both still hold the start value
        assert_eq!(menu.visual(1).unwrap().transform.dy, 160.0);
        menu.advance(ms(50));
        assert!(menu.visual(1).unwrap().transform.dy < 160.0);
        assert_eq!(menu.visual(6).unwrap().transform.dy, 400.0);
    }

    #[test]
    fn test_open_close_round_trip() {
        let mut menu = menu(7);
        let before = item_states(&menu);

        menu.tap_toggle();
        menu.advance(ms(500));
        assert!(menu.tap_toggle());
        assert_eq!(menu.status(), MenuStatus::Closed);

        // disabled at start of close, still visible until each finishes
        assert!((1..7).all(|i| {
            let f = menu.item_flags(i).unwrap();
            f.visible && !f.enabled
        }));

        menu.advance(ms(500));
        assert_eq!(item_states(&menu), before);
        assert_eq!(menu.visual(TOGGLE).unwrap().transform.scale, 1.0);
    }

    #[test]
    fn test_selection_delivers_after_toggle_regrows() {
        let mut menu = menu(7);
        let calls = recorder(&mut menu);

        menu.tap_toggle();
        menu.advance(ms(500));
        assert!(menu.tap_item(4));

        // closed right away, taps disabled right away
        assert_eq!(menu.status(), MenuStatus::Closed);
        assert!((1..7).all(|i| !menu.item_flags(i).unwrap().enabled));
        assert!(!menu.tap_item(4));

        menu.advance(ms(299));
        assert!(calls.borrow().is_empty());

        menu.advance(ms(1));
        assert_eq!(*calls.borrow(), vec![("four", 4)]);

        menu.advance(ms(1000));
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_selection_animations() {
        let mut menu = menu(4);
        menu.tap_toggle();
        menu.advance(ms(500));
        menu.tap_item(2);
        menu.advance(ms(300));

        let tapped = menu.visual(2).unwrap().transform;
        assert_eq!(tapped.alpha, 0.0);
        assert_eq!(tapped.scale, 1.0);

        for i in [1, 3] {
            let t = menu.visual(i).unwrap().transform;
            assert_eq!(t.scale, 0.0);
            assert_eq!(t.alpha, 1.0);
        }
        assert_eq!(menu.visual(TOGGLE).unwrap().transform.scale, 1.0);
    }

    #[test]
    fn test_selection_without_listener() {
        let mut menu = menu(3);
        menu.tap_toggle();
        menu.advance(ms(500));
        assert!(menu.tap_item(1));
        menu.advance(ms(500));
        assert_eq!(menu.status(), MenuStatus::Closed);
    }

    #[test]
    fn test_reopen_during_selection_drops_callback() {
        let mut menu = menu(7);
        let calls = recorder(&mut menu);

        menu.tap_toggle();
        menu.advance(ms(500));
        menu.tap_item(1);
        menu.advance(ms(100));

        // state already flipped, so the toggle opens again and replaces the regrow
        assert!(menu.tap_toggle());
        assert!(menu.is_open());
        menu.advance(ms(1000));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_outside_touch_closes_only_when_open() {
        let mut menu = menu(7);
        let calls = recorder(&mut menu);

        touch(&mut menu, TouchAction::Down, 150.0, 20.0);
        assert_eq!(menu.status(), MenuStatus::Closed);
        assert!(!menu.is_animating());

        menu.tap_toggle();
        menu.advance(ms(500));
        touch(&mut menu, TouchAction::Down, 150.0, 20.0);
        assert_eq!(menu.status(), MenuStatus::Closed);
        assert!(menu.is_animating());

        menu.advance(ms(500));
        assert!(calls.borrow().is_empty());
        assert!((1..7).all(|i| !menu.item_flags(i).unwrap().visible));
    }

    #[test]
    fn test_touch_routes_clicks() {
        let mut menu = menu(7);
        let calls = recorder(&mut menu);

        // toggle centre
        click(&mut menu, 250.0, 320.0);
        assert!(menu.is_open());
        menu.advance(ms(500));

        // item 2 sits at [110,160][190,240]
        click(&mut menu, 150.0, 200.0);
        assert_eq!(menu.status(), MenuStatus::Closed);
        menu.advance(ms(300));
        assert_eq!(*calls.borrow(), vec![("two", 2)]);
    }

    #[test]
    fn test_drag_off_target_cancels_click() {
        let mut menu = menu(7);
        touch(&mut menu, TouchAction::Down, 250.0, 320.0);
        touch(&mut menu, TouchAction::Move, 100.0, 20.0);
        touch(&mut menu, TouchAction::Up, 250.0, 320.0);
        assert_eq!(menu.status(), MenuStatus::Closed);
    }

    #[test]
    fn test_hidden_items_do_not_take_touches() {
        let mut menu = menu(7);
        click(&mut menu, 150.0, 200.0);
        assert_eq!(menu.status(), MenuStatus::Closed);
        assert!(!menu.is_animating());
    }

    #[test]
    fn test_toggle_only_menu() {
        let mut menu = menu(1);
        assert!(menu.tap_toggle());
        assert!(menu.is_open());
        assert_eq!(menu.visuals().len(), 1);
        menu.advance(ms(300));
        assert!(menu.tap_toggle());
        menu.advance(ms(300));
        assert_eq!(menu.status(), MenuStatus::Closed);
    }

    #[test]
    fn test_retap_mid_animation_last_wins() {
        let mut menu = menu(7);
        menu.tap_toggle();
        menu.advance(ms(50));
        assert!(menu.tap_toggle());
        assert_eq!(menu.status(), MenuStatus::Closed);

        menu.advance(ms(500));
        assert!((1..7).all(|i| !menu.item_flags(i).unwrap().visible));
    }

    #[test]
    fn test_guarded_transitions() {
        let mut config = MenuConfig::default();
        config.behavior.guard_transitions = true;
        let mut menu = menu_with(7, config);

        menu.tap_toggle();
        menu.advance(ms(50));
        assert!(!menu.tap_toggle());
        assert!(menu.is_open());

        menu.advance(ms(500));
        assert!(menu.tap_toggle());
        assert_eq!(menu.status(), MenuStatus::Closed);
    }

    #[test]
    fn test_guarded_background_touch_mid_open() {
        let mut config = MenuConfig::default();
        config.behavior.guard_transitions = true;
        let mut menu = menu_with(7, config);

        menu.tap_toggle();
        menu.advance(ms(50));
        assert!(menu.is_animating());
        touch(&mut menu, TouchAction::Down, 150.0, 20.0);
        assert_eq!(menu.status(), MenuStatus::Open);

        menu.advance(ms(500));
        assert!(!menu.is_animating());
        touch(&mut menu, TouchAction::Down, 150.0, 20.0);
        assert_eq!(menu.status(), MenuStatus::Closed);
    }

    #[test]
    fn test_selection_for_removed_child_is_dropped() {
        let mut menu = menu(7);
        let calls = recorder(&mut menu);

        menu.tap_toggle();
        menu.advance(ms(500));
        assert!(menu.tap_item(6));
        menu.selection = Some(42);
        menu.advance(ms(500));
        assert!(calls.borrow().is_empty());
        assert_eq!(menu.status(), MenuStatus::Closed);
    }

    #[test]
    fn test_apply_config_relayouts() {
        let mut menu = menu(7);
        let mut config = MenuConfig::default();
        config.layout.density = 2.0;
        menu.apply_config(config);

        assert!(menu.layout(Rect::new(0, 0, 300, 400)));
        assert_eq!(menu.current_layout().unwrap().vertical_gap, 80);
    }
}
