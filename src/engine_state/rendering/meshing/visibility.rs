//! Per-slice display policy.
//!
//! In explore mode every slice is drawn at full brightness with its hidden
//! batches off. In focus mode only the active slice and the five below it are
//! drawn, dimmed by their distance to the active slice, and only the active
//! slice reveals its hidden batches.

/// Slices further below the active one than this are not drawn in focus mode.
pub const FOCUS_DEPTH: i32 = 5;

/// Display state of one slice.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SliceVisibility {
    /// Whether the slice is drawn at all.
    pub shown: bool,
    /// Brightness multiplier; `None` draws at full brightness.
    pub color_scale: Option<f32>,
    /// Whether the hidden batches of the slice are drawn.
    pub hidden_shown: bool,
}

impl Default for SliceVisibility {
    fn default() -> Self {
        SliceVisibility {
            shown: true,
            color_scale: None,
            hidden_shown: false,
        }
    }
}

impl SliceVisibility {
    /// Recomputes the policy of slice `index` when `current` is the active
    /// slice. A slice that is not drawn keeps its previous colour scale.
    pub fn apply(&mut self, index: i32, current: i32, explore: bool) {
        if explore {
            *self = SliceVisibility::default();
            return;
        }

        let d = (current - index).abs();
        self.hidden_shown = d == 0;

        if index > current || d > FOCUS_DEPTH {
            self.shown = false;
        } else {
            self.shown = true;
            self.color_scale = (d > 0).then(|| 0.5 - d as f32 / 15.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focused(index: i32, current: i32) -> SliceVisibility {
        let mut visibility = SliceVisibility::default();
        visibility.apply(index, current, false);
        visibility
    }

    #[test]
    fn explore_shows_everything_plainly() {
        let mut visibility = focused(3, 5);
        visibility.apply(3, 5, true);
        assert_eq!(visibility, SliceVisibility::default());
    }

    #[test]
    fn active_slice_reveals_hidden_geometry() {
        let visibility = focused(5, 5);
        assert!(visibility.shown);
        assert!(visibility.hidden_shown);
        assert_eq!(visibility.color_scale, None);
    }

    #[test]
    fn slices_above_and_far_below_are_hidden() {
        assert!(!focused(6, 5).shown);
        assert!(!focused(-1, 5).shown);
        assert!(focused(0, 5).shown);
    }

    #[test]
    fn lower_slices_are_dimmed_by_distance() {
        let visibility = focused(2, 5);
        assert!(!visibility.hidden_shown);
        let scale = visibility.color_scale.unwrap();
        assert!((scale - (0.5 - 3.0 / 15.0)).abs() < 1e-6);
    }
}
