//! Pan input state for chart cameras.
//!
//! Keyboard (w/a/s/d held) and mouse-drag events are reduced into four
//! directional flags that the render loop samples once per tick. Only
//! one input mode drives movement at a time: keyboard takes precedence
//! while a key is held, and releasing the mouse button clears every
//! flag.

/// A pan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the top of the chart.
    Up,
    /// Towards the bottom of the chart.
    Down,
    /// Towards the left edge.
    Left,
    /// Towards the right edge.
    Right,
}

/// Default camera movement per tick, in canvas units.
pub const DEFAULT_PAN_SPEED: f64 = 12.0;

/// Directional pan state sampled by the chart render loop.
#[derive(Debug, Clone)]
pub struct PanInput {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    /// Movement per tick for each active direction.
    pub speed: f64,
    focused: bool,
    keyboard_held: bool,
    dragging: bool,
    last_mouse: Option<(f64, f64)>,
    last_direction: Option<Direction>,
}

impl Default for PanInput {
    fn default() -> Self {
        Self::new()
    }
}

impl PanInput {
    /// Create a pan state with the default speed, focused.
    #[must_use]
    pub fn new() -> Self {
        Self {
            up: false,
            down: false,
            left: false,
            right: false,
            speed: DEFAULT_PAN_SPEED,
            focused: true,
            keyboard_held: false,
            dragging: false,
            last_mouse: None,
            last_direction: None,
        }
    }

    /// Give this chart input focus.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Remove input focus; key events are ignored until refocused.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Whether this chart currently has input focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// A pan key (`w`, `a`, `s`, `d`) was pressed.
    pub fn key_down(&mut self, key: char) {
        if !self.focused {
            return;
        }
        let Some(direction) = Self::direction_for(key) else {
            return;
        };
        self.set_flag(direction, true);
        self.keyboard_held = true;
        self.dragging = false;
    }

    /// A pan key was released.
    pub fn key_up(&mut self, key: char) {
        if !self.focused {
            return;
        }
        let Some(direction) = Self::direction_for(key) else {
            return;
        };
        self.set_flag(direction, false);
        self.keyboard_held = false;
    }

    /// The mouse button was pressed (drag start).
    pub fn mouse_down(&mut self) {
        self.dragging = true;
    }

    /// The mouse button was released; all movement stops.
    pub fn mouse_up(&mut self) {
        self.dragging = false;
        self.clear_flags();
    }

    /// The pointer moved to a new position.
    ///
    /// The drag direction derives from the delta against the previous
    /// position; vertical movement wins when both axes changed. While a
    /// key is held the keyboard keeps control and drag motion is
    /// ignored.
    pub fn mouse_moved(&mut self, x: f64, y: f64) {
        if let Some((old_x, old_y)) = self.last_mouse {
            if x < old_x {
                self.last_direction = Some(Direction::Left);
            } else if x > old_x {
                self.last_direction = Some(Direction::Right);
            }
            if y > old_y {
                self.last_direction = Some(Direction::Down);
            } else if y < old_y {
                self.last_direction = Some(Direction::Up);
            }
        }
        self.last_mouse = Some((x, y));

        if self.keyboard_held {
            return;
        }
        if self.dragging {
            if let Some(direction) = self.last_direction {
                self.set_flag(direction, true);
            }
        } else {
            self.clear_flags();
        }
    }

    /// The camera delta for one tick given the current flags.
    #[must_use]
    pub fn camera_delta(&self) -> (f64, f64) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.left {
            dx -= self.speed;
        }
        if self.right {
            dx += self.speed;
        }
        if self.up {
            dy -= self.speed;
        }
        if self.down {
            dy += self.speed;
        }
        (dx, dy)
    }

    /// Whether any directional flag is active.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    fn direction_for(key: char) -> Option<Direction> {
        match key {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }

    fn set_flag(&mut self, direction: Direction, value: bool) {
        match direction {
            Direction::Up => self.up = value,
            Direction::Down => self.down = value,
            Direction::Left => self.left = value,
            Direction::Right => self.right = value,
        }
    }

    fn clear_flags(&mut self) {
        self.up = false;
        self.down = false;
        self.left = false;
        self.right = false;
    }
}
