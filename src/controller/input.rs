/// Platform-agnostic input handling: host events in, one snapshot per frame out
use std::collections::HashSet;

use glam::Vec2;

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),

    /// Relative pointer motion; screen-space, +y is down.
    MouseMove { dx: f32, dy: f32 },

    FocusLost,
    VisibilityChanged { visible: bool },
    PointerLockChanged { locked: bool },
}

/// Everything the movement controller reads for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// x = strafe right, y = forward; each axis in [-1, 1].
    pub move_axis: Vec2,
    /// x = turn right, y = look up, in input units (scaled by sensitivity).
    pub look_delta: Vec2,
    /// True only on the frame the jump binding goes down.
    pub jump_pressed: bool,
    pub run_held: bool,
}

/// Accumulated input between two frames
pub struct InputState {
    pub pressed_keys: HashSet<String>,
    pub look_delta: (f32, f32),
    pub pointer_locked: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            look_delta: (0.0, 0.0),
            pointer_locked: false,
        }
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(key.clone());
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(key.as_str());
            }
            InputEvent::MouseMove { dx, dy } => {
                if self.pointer_locked {
                    self.look_delta.0 += dx;
                    self.look_delta.1 += dy;
                }
            }
            InputEvent::FocusLost | InputEvent::VisibilityChanged { .. } => {
                self.clear_keys();
            }
            InputEvent::PointerLockChanged { locked } => {
                self.pointer_locked = *locked;
                if !locked {
                    self.look_delta = (0.0, 0.0);
                }
            }
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }

    pub fn consume_look(&mut self) -> (f32, f32) {
        let result = self.look_delta;
        self.look_delta = (0.0, 0.0);
        result
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Key mapping configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
    pub jump: String,
    pub run: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            backward: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
            jump: " ".to_string(),
            run: "Shift".to_string(),
        }
    }
}

/// Turns the accumulated [`InputState`] into per-frame snapshots.
///
/// Holds the previous jump key state so the snapshot reports a press edge
/// rather than a held key.
#[derive(Debug, Clone)]
pub struct InputProcessor {
    bindings: KeyBindings,
    jump_was_down: bool,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings, jump_was_down: false }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    fn pressed(&self, input: &InputState, binding: &str, alternate: &str) -> bool {
        input.is_key_pressed(binding)
            || input.is_key_pressed(&binding.to_uppercase())
            || input.is_key_pressed(alternate)
    }

    pub fn move_axis(&self, input: &InputState) -> Vec2 {
        let axis = |positive: bool, negative: bool| match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        let x = axis(
            self.pressed(input, &self.bindings.right, "ArrowRight"),
            self.pressed(input, &self.bindings.left, "ArrowLeft"),
        );
        let y = axis(
            self.pressed(input, &self.bindings.forward, "ArrowUp"),
            self.pressed(input, &self.bindings.backward, "ArrowDown"),
        );
        // diagonals must not exceed unit length
        Vec2::new(x, y).clamp_length_max(1.0)
    }

    pub fn is_jump_down(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.jump) || input.is_key_pressed("Space")
    }

    pub fn is_running(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.run)
            || input.is_key_pressed("ShiftLeft")
            || input.is_key_pressed("ShiftRight")
    }

    /// Build this frame's snapshot and consume the accumulated look delta.
    pub fn snapshot(&mut self, input: &mut InputState) -> InputSnapshot {
        let jump_down = self.is_jump_down(input);
        let jump_pressed = jump_down && !self.jump_was_down;
        self.jump_was_down = jump_down;

        let (dx, dy) = input.consume_look();
        InputSnapshot {
            move_axis: self.move_axis(input),
            // screen y grows downward, look-up is positive
            look_delta: Vec2::new(dx, -dy),
            jump_pressed,
            run_held: self.is_running(input),
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}
