//! Page-window arithmetic and the navigation model rendered by paginated lists.

use serde::{Deserialize, Serialize};

/// Returns the bounded run of 1-indexed page numbers shown around `current_page`.
///
/// The window holds `min(window_size, total_pages)` consecutive pages. It is pinned to the start
/// while `current_page` sits in the leading half, pinned to the end while it sits in the trailing
/// half, and otherwise centered so that `current_page` is preceded by `(window_size - 1) / 2`
/// pages. With the default width of 5 the current page is the third entry.
///
/// `total_pages` below 1 is treated as 1 and `current_page` is clamped into range.
pub fn compute_window(current_page: u32, total_pages: u32, window_size: u32) -> Vec<u32> {
    if window_size == 0 {
        return Vec::new();
    }
    let total = total_pages.max(1);
    let current = current_page.clamp(1, total);
    if total <= window_size {
        return (1..=total).collect();
    }

    let lead = (window_size - 1) / 2;
    let start = if current <= lead + 1 {
        1
    } else if current >= total - lead {
        total - window_size + 1
    } else {
        current - lead
    };
    (start..=start + (window_size - 1)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Navigation request issued by a pagination control.
pub enum PageNav {
    /// Jump to page 1.
    First,
    /// Step back one page.
    Prev,
    /// Step forward one page.
    Next,
    /// Jump to the last page.
    Last,
    /// Jump to a specific page.
    Page(u32),
}

impl PageNav {
    /// Resolves the destination page, or `None` when the request would leave `1..=total_pages`
    /// or stay on `current_page`.
    pub fn target(self, current_page: u32, total_pages: u32) -> Option<u32> {
        let total = total_pages.max(1);
        let target = match self {
            Self::First => 1,
            Self::Prev => current_page.checked_sub(1)?,
            Self::Next => current_page.checked_add(1)?,
            Self::Last => total,
            Self::Page(page) => page,
        };
        (target >= 1 && target <= total && target != current_page).then_some(target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// One navigation affordance and whether it is actionable.
pub struct NavControl {
    /// Page the control leads to.
    pub target: u32,
    /// `false` when activating the control would be a no-op.
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// One numbered page link inside the window.
pub struct PageLink {
    /// Page number.
    pub number: u32,
    /// `true` for the current page.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Everything a pagination bar needs to render.
pub struct Pagination {
    /// Current page (1-indexed).
    pub current_page: u32,
    /// Total page count (at least 1).
    pub total_pages: u32,
    /// Numbered links for the visible window.
    pub pages: Vec<PageLink>,
    /// Jump-to-first control.
    pub first: NavControl,
    /// Previous-page control.
    pub prev: NavControl,
    /// Next-page control.
    pub next: NavControl,
    /// Jump-to-last control.
    pub last: NavControl,
    /// `false` when there is only one page and no bar should be shown.
    pub visible: bool,
}

impl Pagination {
    /// Builds the navigation model for `current_page` of `total_pages`.
    pub fn new(current_page: u32, total_pages: u32, window_size: u32) -> Self {
        let total = total_pages.max(1);
        let current = current_page.clamp(1, total);
        let control = |nav: PageNav, fallback: u32| NavControl {
            target: nav.target(current, total).unwrap_or(fallback),
            enabled: nav.target(current, total).is_some(),
        };
        Self {
            current_page: current,
            total_pages: total,
            pages: compute_window(current, total, window_size)
                .into_iter()
                .map(|number| PageLink {
                    number,
                    active: number == current,
                })
                .collect(),
            first: control(PageNav::First, 1),
            prev: control(PageNav::Prev, current),
            next: control(PageNav::Next, current),
            last: control(PageNav::Last, total),
            visible: total > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // Literal five-wide rule the generalized window must reproduce.
    fn five_wide_reference(current: u32, total: u32) -> Vec<u32> {
        (0..5.min(total))
            .map(|i| {
                if total <= 5 || current <= 3 {
                    i + 1
                } else if current >= total - 2 {
                    total - 4 + i
                } else {
                    current - 2 + i
                }
            })
            .collect()
    }

    #[test]
    fn window_boundary_table() {
        assert_eq!(compute_window(2, 3, 5), vec![1, 2, 3]);
        assert_eq!(compute_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(compute_window(5, 10, 5), vec![3, 4, 5, 6, 7]);
        assert_eq!(compute_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(compute_window(9, 10, 5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn window_edges_around_the_pinning_thresholds() {
        assert_eq!(compute_window(3, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(compute_window(4, 10, 5), vec![2, 3, 4, 5, 6]);
        assert_eq!(compute_window(7, 10, 5), vec![5, 6, 7, 8, 9]);
        assert_eq!(compute_window(8, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(compute_window(1, 1, 5), vec![1]);
        assert_eq!(compute_window(5, 5, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(compute_window(4, 6, 5), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn window_matches_five_wide_rule_exhaustively() {
        for total in 1..=60 {
            for current in 1..=total {
                let window = compute_window(current, total, 5);
                assert_eq!(
                    window,
                    five_wide_reference(current, total),
                    "current={current} total={total}"
                );
                assert_eq!(window.len() as u32, 5.min(total));
                assert!(window.contains(&current));
                assert!(window.windows(2).all(|pair| pair[1] == pair[0] + 1));
                assert!(window[0] >= 1 && *window.last().unwrap() <= total);
            }
        }
    }

    #[test]
    fn window_invariants_hold_for_other_widths() {
        for width in 1..=9 {
            for total in 1..=40 {
                for current in 1..=total {
                    let window = compute_window(current, total, width);
                    assert_eq!(window.len() as u32, width.min(total), "w={width} t={total}");
                    assert!(window.contains(&current), "w={width} t={total} c={current}");
                    assert!(window[0] >= 1 && *window.last().unwrap() <= total);
                }
            }
        }
    }

    #[test]
    fn window_normalizes_degenerate_input() {
        assert_eq!(compute_window(1, 0, 5), vec![1]);
        assert_eq!(compute_window(0, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(compute_window(99, 10, 5), vec![6, 7, 8, 9, 10]);
        assert!(compute_window(3, 10, 0).is_empty());
    }

    #[test]
    fn window_pinned_to_the_largest_page_count() {
        let max = u32::MAX;
        let tail: Vec<u32> = (max - 4..=max).collect();
        assert_eq!(compute_window(max, max, 5), tail);
        assert_eq!(compute_window(max - 1, max, 5), tail);
        assert_eq!(compute_window(1, max, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(compute_window(max / 2, max, 1), vec![max / 2]);
        let model = Pagination::new(max, max, 5);
        assert!(!model.next.enabled && model.prev.enabled);
        assert_eq!(model.pages.last().map(|link| link.number), Some(max));
    }

    #[test]
    fn nav_targets_are_noops_at_boundaries() {
        assert_eq!(PageNav::Prev.target(1, 10), None);
        assert_eq!(PageNav::First.target(1, 10), None);
        assert_eq!(PageNav::Next.target(10, 10), None);
        assert_eq!(PageNav::Last.target(10, 10), None);
        assert_eq!(PageNav::Page(11).target(3, 10), None);
        assert_eq!(PageNav::Page(0).target(3, 10), None);
        assert_eq!(PageNav::Page(3).target(3, 10), None);

        assert_eq!(PageNav::First.target(7, 10), Some(1));
        assert_eq!(PageNav::Last.target(7, 10), Some(10));
        assert_eq!(PageNav::Prev.target(7, 10), Some(6));
        assert_eq!(PageNav::Next.target(7, 10), Some(8));
    }

    #[test]
    fn pagination_model_marks_active_and_disabled_controls() {
        let model = Pagination::new(1, 10, 5);
        assert!(model.visible);
        assert!(!model.first.enabled && !model.prev.enabled);
        assert!(model.next.enabled && model.last.enabled);
        assert_eq!(model.last.target, 10);
        assert_eq!(
            model.pages.iter().filter(|link| link.active).count(),
            1
        );
        assert_eq!(model.pages[0], PageLink { number: 1, active: true });

        let last = Pagination::new(10, 10, 5);
        assert!(last.first.enabled && !last.next.enabled && !last.last.enabled);
        assert_eq!(last.first.target, 1);
    }

    #[test]
    fn single_page_hides_pagination() {
        let model = Pagination::new(1, 1, 5);
        assert!(!model.visible);
        assert_eq!(model.pages, vec![PageLink { number: 1, active: true }]);
    }
}
