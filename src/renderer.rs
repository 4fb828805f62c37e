use crate::map::Map;
use crate::player::Player;

pub const SCREEN_WIDTH: usize = 640;
pub const SCREEN_HEIGHT: usize = 480;

pub const FOV: f32 = 60.0; // degrees, spread evenly across the columns
pub const RAY_STEP: f32 = 0.05; // march increment; coarser = faster, blockier
/// Hard cap on march iterations. Generous for an 8x8 grid, but a
/// misconfigured map must not be able to hang the frame.
pub const MAX_RAY_STEPS: usize = 4096;

#[inline]
const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory, alpha at 0
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

const BACKGROUND: u32 = pack_rgb(0, 0, 0);
const WALL: u32 = pack_rgb(255, 255, 255);

/// March a ray from (x0, y0) until it samples a solid cell or runs out
/// of steps, and return the Euclidean distance to the stopping point.
pub fn cast_ray(map: &Map, x0: f32, y0: f32, angle_deg: f32) -> f32 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let mut x = x0;
    let mut y = y0;

    for _ in 0..MAX_RAY_STEPS {
        x += cos * RAY_STEP;
        y += sin * RAY_STEP;
        if map.solid_at(x, y) {
            break;
        }
    }

    let dx = x - x0;
    let dy = y - y0;
    (dx * dx + dy * dy).sqrt()
}

/// Remove the fisheye distortion of the flat projection plane. At the
/// screen-center column the ray and facing angles coincide and the
/// distance passes through unchanged.
#[inline]
pub fn fisheye_correct(distance: f32, ray_deg: f32, player_deg: f32) -> f32 {
    distance * (ray_deg - player_deg).to_radians().cos()
}

/// Perspective-project a corrected distance to a wall-segment height in
/// pixels, capped at the screen height so near walls can't overflow the
/// vertical draw region.
#[inline]
pub fn wall_height(corrected_distance: f32) -> f32 {
    if corrected_distance <= 0.0 {
        return SCREEN_HEIGHT as f32;
    }
    (SCREEN_HEIGHT as f32 / corrected_distance).min(SCREEN_HEIGHT as f32)
}

/// Render one frame: cast a ray per column and draw a centered vertical
/// wall segment scaled by corrected distance. `buf` is the internal
/// SCREEN_WIDTH x SCREEN_HEIGHT framebuffer.
pub fn render_frame(buf: &mut [u32], map: &Map, player: &Player) {
    buf.fill(BACKGROUND);

    let half_h = SCREEN_HEIGHT as f32 * 0.5;

    for i in 0..SCREEN_WIDTH {
        let ray_angle = (player.angle - FOV / 2.0) + (i as f32 / SCREEN_WIDTH as f32) * FOV;

        let distance = cast_ray(map, player.x, player.y, ray_angle);
        let corrected = fisheye_correct(distance, ray_angle, player.angle);
        let half_segment = wall_height(corrected) * 0.5;

        let top = (half_h - half_segment).max(0.0) as usize;
        let bottom = ((half_h + half_segment).min(SCREEN_HEIGHT as f32)) as usize;

        // Vertical draw, stride per row
        let mut idx = top * SCREEN_WIDTH + i;
        for _y in top..bottom {
            buf[idx] = WALL;
            idx += SCREEN_WIDTH;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn center_column_has_no_fisheye_correction() {
        for d in [0.3, 1.0, 7.25] {
            assert!((fisheye_correct(d, 123.0, 123.0) - d).abs() < EPS);
        }
    }

    #[test]
    fn correction_shrinks_off_center_distances() {
        let corrected = fisheye_correct(4.0, 30.0, 60.0);
        assert!((corrected - 4.0 * 30.0_f32.to_radians().cos()).abs() < EPS);
        assert!(corrected < 4.0);
    }

    #[test]
    fn wall_height_never_exceeds_screen_height() {
        let cap = SCREEN_HEIGHT as f32;
        assert_eq!(wall_height(0.0), cap);
        assert_eq!(wall_height(f32::MIN_POSITIVE), cap);
        assert_eq!(wall_height(-1.0), cap);
        let mut d = 0.01;
        while d < 20.0 {
            assert!(wall_height(d) <= cap, "height overflows at distance {d}");
            d += 0.07;
        }
        assert!((wall_height(2.0) - cap / 2.0).abs() < EPS);
    }

    #[test]
    fn rays_terminate_on_the_enclosing_walls() {
        let map = Map::new();
        // Longest possible interior sight line is under the grid diagonal
        let max = (2.0 * 64.0_f32).sqrt() + RAY_STEP;
        let mut a = 0.0;
        while a < 360.0 {
            let d = cast_ray(&map, 3.5, 3.5, a);
            assert!(d.is_finite());
            assert!(d > 0.0 && d < max, "distance {d} at angle {a}");
            a += 7.0;
        }
    }

    #[test]
    fn ray_from_outside_the_grid_stops_immediately() {
        let map = Map::new();
        let d = cast_ray(&map, -5.0, -5.0, 45.0);
        assert!((d - RAY_STEP).abs() < EPS);
    }

    #[test]
    fn straight_ray_distance_matches_wall_position() {
        let map = Map::new();
        // Facing +x from (3.5, 3.5): wall cell starts at x = 5, so the
        // march stops within one step of 1.5 units out.
        let d = cast_ray(&map, 3.5, 3.5, 0.0);
        assert!((d - 1.5).abs() <= RAY_STEP + EPS, "distance {d}");
    }

    #[test]
    fn frame_draws_centered_wall_columns() {
        let map = Map::new();
        let player = Player::new(3.5, 3.5, 0.0);
        let mut buf = vec![0u32; SCREEN_WIDTH * SCREEN_HEIGHT];
        render_frame(&mut buf, &map, &player);

        for col in [0, SCREEN_WIDTH / 2, SCREEN_WIDTH - 1] {
            let lit: Vec<usize> = (0..SCREEN_HEIGHT)
                .filter(|&y| buf[y * SCREEN_WIDTH + col] == WALL)
                .collect();
            assert!(!lit.is_empty(), "column {col} drew no wall");
            // Contiguous run, centered on the horizon
            let (first, last) = (lit[0], lit[lit.len() - 1]);
            assert_eq!(last - first + 1, lit.len(), "column {col} has gaps");
            let mid = SCREEN_HEIGHT as i32 / 2;
            assert!((first as i32 + last as i32 + 1 - 2 * mid).abs() <= 2);
        }
    }
}
