//! Viewport Scroller
//!
//! Keeps the input boundary on screen. After each layout pass only the last
//! filled cell and the next cell to fill are checked; when either is clipped
//! the row scrolls so that cell sits one slot in from the leading edge.

use std::time::Instant;

use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

use super::config::CellLayout;

/// Animations stop once the remaining distance is below this many columns
const SETTLE_DISTANCE: f32 = 0.5;

/// Compose's "medium-low" spring stiffness
pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;

// ============================================================================
// Geometry
// ============================================================================

/// Screen rectangle that may extend past the viewport on any side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    /// Leading edge inside the scrolled row, unaffected by the offset
    pub container_x: usize,
    pub screen: CellRect,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowMeasure {
    pub left_pad: usize,
    pub container_width: usize,
    pub max_offset: usize,
    pub cells: Vec<CellGeometry>,
}

/// Lay out `count` slots in `area`, centering the row when it fits
pub fn measure_row(count: usize, layout: CellLayout, area: Rect, offset: usize) -> RowMeasure {
    let content = layout.row_width(count);
    let container_width = content.max(area.width as usize);
    let left_pad = (container_width - content) / 2;
    let max_offset = container_width - area.width as usize;
    let shift = offset.min(max_offset) as i32;
    let stride = layout.stride() as usize;

    let cells = (0..count)
        .map(|i| {
            let container_x = left_pad + i * stride;
            CellGeometry {
                container_x,
                screen: CellRect {
                    x: area.x as i32 + container_x as i32 - shift,
                    y: area.y as i32,
                    width: layout.stride(),
                    height: layout.height,
                },
            }
        })
        .collect();

    RowMeasure { left_pad, container_width, max_offset, cells }
}

pub fn is_fully_visible(rect: CellRect, viewport: Rect) -> bool {
    let left = viewport.x as i32;
    let top = viewport.y as i32;
    let right = left + viewport.width as i32;
    let bottom = top + viewport.height as i32;
    rect.x >= left && rect.y >= top && rect.right() <= right && rect.bottom() <= bottom
}

/// Raw scroll target for a clipped cell, or `None` when already at the bound
/// in that direction
pub fn scroll_target(cell: &CellGeometry, current: usize, max: usize) -> Option<i32> {
    let target = cell.container_x as i32 - cell.screen.width as i32;
    let current_i = current as i32;
    let backward = target < current_i && current != 0;
    let forward = target > current_i && current != max;
    (backward || forward).then_some(target)
}

// ============================================================================
// ScrollState
// ============================================================================

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrollState {
    pub h_scroll: usize,
    pub max_h_scroll: usize,
}

impl ScrollState {
    pub fn set_max(&mut self, max: usize) {
        self.max_h_scroll = max;
        self.h_scroll = self.h_scroll.min(max);
    }

    pub fn set(&mut self, offset: usize) {
        self.h_scroll = offset.min(self.max_h_scroll);
    }

    pub fn h_end(&mut self) {
        self.h_scroll = self.max_h_scroll;
    }
}

// ============================================================================
// Animation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScrollCurve {
    /// Damped spring with unit mass
    Spring { stiffness: f32, damping_ratio: f32 },
    /// Cubic ease-out over a fixed duration
    EaseOut { duration_ms: u64 },
    /// Jump straight to the target
    Snap,
}

impl Default for ScrollCurve {
    fn default() -> Self {
        Self::Spring { stiffness: STIFFNESS_MEDIUM_LOW, damping_ratio: 1.0 }
    }
}

impl ScrollCurve {
    /// Remaining displacement from the target `elapsed` seconds after starting
    /// `distance` away at rest, and whether the motion has settled
    fn displacement(&self, distance: f32, elapsed: f32) -> (f32, bool) {
        match *self {
            Self::Snap => (0.0, true),
            Self::EaseOut { duration_ms } => {
                if duration_ms == 0 {
                    return (0.0, true);
                }
                let progress = (elapsed * 1000.0 / duration_ms as f32).min(1.0);
                (distance * (1.0 - progress).powi(3), progress >= 1.0)
            }
            Self::Spring { stiffness, damping_ratio } => {
                let (x, envelope) = spring(distance, stiffness, damping_ratio, elapsed);
                if envelope < SETTLE_DISTANCE { (0.0, true) } else { (x, false) }
            }
        }
    }
}

/// Position and an upper bound on |position| of a released spring
fn spring(d0: f32, stiffness: f32, damping_ratio: f32, t: f32) -> (f32, f32) {
    let w0 = stiffness.max(f32::EPSILON).sqrt();
    let zeta = damping_ratio.max(0.1);

    if (zeta - 1.0).abs() < 1e-3 {
        let x = d0 * (1.0 + w0 * t) * (-w0 * t).exp();
        return (x, x.abs());
    }

    if zeta < 1.0 {
        let root = (1.0 - zeta * zeta).sqrt();
        let wd = w0 * root;
        let decay = (-zeta * w0 * t).exp();
        let x = decay * (d0 * (wd * t).cos() + (zeta * w0 * d0 / wd) * (wd * t).sin());
        return (x, d0.abs() * decay / root);
    }

    let s = (zeta * zeta - 1.0).sqrt();
    let r1 = -w0 * (zeta - s);
    let r2 = -w0 * (zeta + s);
    let c2 = -r1 * d0 / (r2 - r1);
    let c1 = d0 - c2;
    let x = c1 * (r1 * t).exp() + c2 * (r2 * t).exp();
    (x, x.abs())
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: usize,
    to: usize,
    started: Instant,
}

/// At most one animation in flight; a new target replaces the running one
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    curve: ScrollCurve,
    active: Option<Animation>,
}

impl ScrollAnimator {
    pub fn new(curve: ScrollCurve) -> Self {
        Self { curve, active: None }
    }

    pub fn target(&self) -> Option<usize> {
        self.active.map(|a| a.to)
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Returns false when nothing new was started
    pub fn animate_to(&mut self, from: usize, to: usize, now: Instant) -> bool {
        if self.target() == Some(to) || (self.active.is_none() && from == to) {
            return false;
        }
        self.active = Some(Animation { from, to, started: now });
        true
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Current offset of the running animation, `None` when idle
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        let anim = self.active?;
        let elapsed = now.saturating_duration_since(anim.started).as_secs_f32();
        let distance = anim.from as f32 - anim.to as f32;
        let (x, settled) = self.curve.displacement(distance, elapsed);
        if settled {
            self.active = None;
            return Some(anim.to);
        }
        Some((anim.to as f32 + x).round().max(0.0) as usize)
    }
}

// ============================================================================
// ViewportScroller
// ============================================================================

#[derive(Debug, Clone)]
pub struct ViewportScroller {
    pub state: ScrollState,
    animator: ScrollAnimator,
}

impl ViewportScroller {
    pub fn new(curve: ScrollCurve) -> Self {
        Self { state: ScrollState::default(), animator: ScrollAnimator::new(curve) }
    }

    pub fn offset(&self) -> usize {
        self.state.h_scroll
    }

    pub fn max_offset(&self) -> usize {
        self.state.max_h_scroll
    }

    /// A resize that leaves the running animation's target out of range stops it
    pub fn set_max_offset(&mut self, max: usize) {
        self.state.set_max(max);
        if self.animator.target().is_some_and(|to| to > max) {
            self.animator.cancel();
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Check the boundary cells of a fresh layout; true when a scroll was issued
    pub fn layout_pass(&mut self, cells: &[CellGeometry], text_len: usize, viewport: Rect, now: Instant) -> bool {
        let mut issued = false;
        for (i, cell) in cells.iter().enumerate() {
            let boundary = i == text_len || i + 1 == text_len;
            if !boundary || is_fully_visible(cell.screen, viewport) {
                continue;
            }
            let current = self.state.h_scroll;
            let max = self.state.max_h_scroll;
            let Some(target) = scroll_target(cell, current, max) else { continue };

            let clamped = target.clamp(0, max as i32) as usize;
            tracing::trace!(index = i, target, current, clamped, "boundary cell clipped");
            issued |= self.animator.animate_to(current, clamped, now);
        }
        issued
    }

    /// Advance a running animation; true when the offset moved
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(offset) = self.animator.tick(now) else { return false };
        let before = self.state.h_scroll;
        self.state.set(offset);
        before != self.state.h_scroll
    }
}
