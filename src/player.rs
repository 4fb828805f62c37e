use crate::map::Map;

pub const ROTATION_SPEED: f32 = 180.0; // degrees per second
pub const MOVE_SPEED: f32 = 2.5; // map units per second
pub const COLLISION_BUFFER: f32 = 0.2; // keep-out distance from wall faces
pub const MAX_DELTA_TIME: f32 = 0.05; // cap dt so stalls don't teleport

/// Per-frame snapshot of the keys the simulation consumes, decoupled
/// from the windowing layer so the update step runs without a display.
#[derive(Default, Clone, Copy)]
pub struct Input {
    pub quit: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
    pub backward: bool,
}

pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Facing angle in degrees, kept in [0, 360).
    pub angle: f32,
}

/// Wrap an angle into [0, 360).
#[inline]
pub fn normalize_angle(a: f32) -> f32 {
    a.rem_euclid(360.0)
}

/// Offset a collision probe a buffer's distance ahead of the travel
/// direction along one axis.
#[inline]
fn probe_offset(axis_move: f32) -> f32 {
    if axis_move > 0.0 {
        COLLISION_BUFFER
    } else {
        -COLLISION_BUFFER
    }
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            x,
            y,
            angle: normalize_angle(angle),
        }
    }

    /// Advance the pose one frame from an input snapshot and a raw delta
    /// time. Returns false when the quit key is down; the pose is left
    /// untouched in that case and the caller stops the loop.
    pub fn update(&mut self, input: &Input, dt: f32, map: &Map) -> bool {
        if input.quit {
            return false;
        }

        let dt = dt.min(MAX_DELTA_TIME);

        if input.turn_left {
            self.angle -= ROTATION_SPEED * dt;
        }
        if input.turn_right {
            self.angle += ROTATION_SPEED * dt;
        }
        self.angle = normalize_angle(self.angle);

        let (sin, cos) = self.angle.to_radians().sin_cos();
        let mut move_x = 0.0;
        let mut move_y = 0.0;
        if input.forward {
            move_x += cos;
            move_y += sin;
        }
        if input.backward {
            move_x -= cos;
            move_y -= sin;
        }

        // Renormalize so a combined move can never exceed unit length
        if move_x != 0.0 && move_y != 0.0 {
            let len = (move_x * move_x + move_y * move_y).sqrt();
            move_x /= len;
            move_y /= len;
        }

        move_x *= MOVE_SPEED * dt;
        move_y *= MOVE_SPEED * dt;

        // Axis-separated sliding collision: each axis is probed a buffer
        // ahead of the travel direction and accepted on its own, so a
        // wall blocking one axis still lets the other slide. The Y probe
        // reads the X that may just have been accepted.
        let new_x = self.x + move_x;
        let new_y = self.y + move_y;

        if !map.solid_at(new_x + probe_offset(move_x), self.y) {
            self.x = new_x;
        }
        if !map.solid_at(self.x, new_y + probe_offset(move_y)) {
            self.y = new_y;
        }

        true
    }
}
