//! Shared window-manager transition helpers used by the desktop reducer.

use crate::model::{DesktopState, ResizeCorner, WindowId, WindowRect, WindowSize, WindowState};

/// Smallest size any managed window may take.
pub const MIN_WINDOW_SIZE: WindowSize = WindowSize {
    width: 400,
    height: 300,
};

/// Raises `window_id` to the top of the stack and makes it the sole active window.
///
/// A minimized window is restored to [`WindowState::Normal`]. Returns `false` when the window
/// does not exist.
pub fn focus_window_internal(state: &mut DesktopState, window_id: WindowId) -> bool {
    let top = state.top_z_order();
    let Some(window) = state.window(window_id) else {
        return false;
    };

    let already_focused_top = state.active_window == Some(window_id)
        && Some(window.z_order) == top
        && window.state != WindowState::Minimized;
    if already_focused_top {
        return true;
    }

    let z_order = next_z_order(state);
    let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) else {
        return false;
    };
    window.z_order = z_order;
    if window.state == WindowState::Minimized {
        window.state = WindowState::Normal;
        if let Some(saved) = window.saved_geometry.take() {
            window.rect = saved;
        }
    }
    state.active_window = Some(window_id);
    true
}

/// Hands out the next stacking value. Values only ever grow.
pub fn next_z_order(state: &mut DesktopState) -> u64 {
    let z_order = state.next_z_order;
    state.next_z_order = state.next_z_order.saturating_add(1);
    z_order
}

pub fn next_window_id(state: &mut DesktopState) -> WindowId {
    let id = WindowId(state.next_window_id);
    state.next_window_id = state.next_window_id.saturating_add(1);
    id
}

/// Applies a corner-drag delta, keeping the opposite corner anchored when clamping to `min`.
pub fn resize_rect(
    start: WindowRect,
    corner: ResizeCorner,
    dx: i32,
    dy: i32,
    min: WindowSize,
) -> WindowRect {
    let (west, north) = match corner {
        ResizeCorner::NorthWest => (true, true),
        ResizeCorner::NorthEast => (false, true),
        ResizeCorner::SouthWest => (true, false),
        ResizeCorner::SouthEast => (false, false),
    };

    let w = if west {
        start.w.saturating_sub(dx)
    } else {
        start.w.saturating_add(dx)
    }
    .max(min.width);
    let h = if north {
        start.h.saturating_sub(dy)
    } else {
        start.h.saturating_add(dy)
    }
    .max(min.height);

    WindowRect {
        x: if west {
            start.x.saturating_add(start.w).saturating_sub(w)
        } else {
            start.x
        },
        y: if north {
            start.y.saturating_add(start.h).saturating_sub(h)
        } else {
            start.y
        },
        w,
        h,
    }
}

/// How many viewports away from the origin a restored window may sit, and how many it may span.
const RESTORE_REACH: i32 = 4;

/// Pulls saved geometry back into a range the desktop can still show and arrange.
pub fn within_restore_reach(rect: WindowRect, viewport: WindowRect) -> WindowRect {
    let max_w = viewport.w.max(MIN_WINDOW_SIZE.width).saturating_mul(RESTORE_REACH);
    let max_h = viewport.h.max(MIN_WINDOW_SIZE.height).saturating_mul(RESTORE_REACH);
    WindowRect {
        x: rect.x.clamp(-max_w, max_w),
        y: rect.y.clamp(0, max_h),
        w: rect.w.clamp(MIN_WINDOW_SIZE.width, max_w),
        h: rect.h.clamp(MIN_WINDOW_SIZE.height, max_h),
    }
}

/// Pins a layout rectangle to non-negative coordinates.
pub fn non_negative(rect: WindowRect) -> WindowRect {
    WindowRect {
        x: rect.x.max(0),
        y: rect.y.max(0),
        ..rect
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const MIN: WindowSize = MIN_WINDOW_SIZE;

    fn start() -> WindowRect {
        WindowRect {
            x: 100,
            y: 100,
            w: 600,
            h: 400,
        }
    }

    #[test]
    fn south_east_grows_without_moving_origin() {
        assert_eq!(
            resize_rect(start(), ResizeCorner::SouthEast, 40, 25, MIN),
            WindowRect {
                x: 100,
                y: 100,
                w: 640,
                h: 425
            }
        );
    }

    #[test]
    fn north_west_moves_origin_with_pointer() {
        assert_eq!(
            resize_rect(start(), ResizeCorner::NorthWest, -20, -10, MIN),
            WindowRect {
                x: 80,
                y: 90,
                w: 620,
                h: 410
            }
        );
    }

    #[test]
    fn clamping_keeps_the_opposite_edge_fixed() {
        let rect = resize_rect(start(), ResizeCorner::NorthEast, -500, 500, MIN);
        assert_eq!(rect.w, 400);
        assert_eq!(rect.h, 300);
        assert_eq!(rect.x, 100);
        assert_eq!(rect.y + rect.h, 500);
    }

    #[test]
    fn extreme_deltas_saturate_instead_of_wrapping() {
        let far = WindowRect {
            x: i32::MAX - 10,
            y: 0,
            w: i32::MAX - 5,
            h: 400,
        };
        let grown = resize_rect(far, ResizeCorner::SouthEast, i32::MAX, 0, MIN);
        assert_eq!(grown.w, i32::MAX);

        let shrunk = resize_rect(far, ResizeCorner::NorthWest, i32::MIN, 0, MIN);
        assert_eq!(shrunk.w, i32::MAX);
        assert!(shrunk.x <= far.x);

        assert_eq!(far.offset(100, 0).x, i32::MAX);
    }

    #[test]
    fn restore_reach_bounds_position_and_size() {
        let viewport = WindowRect {
            x: 0,
            y: 0,
            w: 1200,
            h: 800,
        };
        let wild = WindowRect {
            x: i32::MIN,
            y: -50,
            w: i32::MAX,
            h: 10,
        };
        assert_eq!(
            within_restore_reach(wild, viewport),
            WindowRect {
                x: -4800,
                y: 0,
                w: 4800,
                h: 300
            }
        );
        assert_eq!(within_restore_reach(start(), viewport), start());
    }

    #[test]
    fn non_negative_only_touches_position() {
        let rect = non_negative(WindowRect {
            x: -3,
            y: 7,
            w: 10,
            h: 20,
        });
        assert_eq!(
            rect,
            WindowRect {
                x: 0,
                y: 7,
                w: 10,
                h: 20
            }
        );
    }
}
