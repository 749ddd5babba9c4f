//! Drill-down view state machine and scene builder.
//!
//! Two states: `Overview` (all categories tiled over the canvas, children
//! laid out inside each category box) and `Drilldown(category)` (that
//! category's children tiled over the whole canvas below a breadcrumb band).
//! The single transition is `select_category`, a toggle: re-selecting the
//! drilled category returns to `Overview`; selecting a different one switches
//! drill-downs directly.
//!
//! Entering a drill-down, each cell carries an animation start rectangle:
//! the cell's overview position remapped from its parent category's box into
//! the full-canvas drill-down frame, so cells appear to grow out of their
//! overview location.

use serde::{Deserialize, Serialize};

use super::layout::{squarify, Rect};
use crate::engine::aggregate::CategoryNode;
use crate::engine::classify::ShotCategory;

/// Default square canvas edge, matching the rendered widget.
pub const DEFAULT_CANVAS: f32 = 280.0;

/// Height of the category label band in the overview.
pub const CATEGORY_LABEL_BAND: f32 = 14.0;

/// Height of the breadcrumb band in a drill-down.
pub const DRILLDOWN_HEADER: f32 = 24.0;

const PAD_OUTER_OVERVIEW: f32 = 1.0;
const PAD_OUTER_DRILLDOWN: f32 = 2.0;
const PAD_INNER: f32 = 2.0;

/// View state. A tagged union so an "overview with a selected category" is
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreemapState {
    Overview,
    Drilldown(ShotCategory),
}

/// Breadcrumb band shown in a drill-down; clicking it goes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderBand {
    pub rect: Rect,
    pub label: String,
}

/// One category box in the overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScene {
    pub category: ShotCategory,
    pub rect: Rect,
    pub label_band: Rect,
}

/// One positioned action-type cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellScene {
    pub name: String,
    pub category: ShotCategory,
    pub rect: Rect,
    /// Animation start rectangle when entering a drill-down; `None` in the
    /// overview (the overview is always drawn from scratch).
    pub enter_from: Option<Rect>,
    pub attempts: u32,
    pub makes: u32,
    pub fg: f32,
    pub efg: f32,
}

/// Positioned view-model for one treemap render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapScene {
    pub state: TreemapState,
    pub header: Option<HeaderBand>,
    pub categories: Vec<CategoryScene>,
    pub cells: Vec<CellScene>,
}

struct OverviewLayout {
    /// Full category boxes (label band included), in tree order.
    categories: Vec<(ShotCategory, Rect)>,
    /// (category, child index, rect) for every laid-out cell.
    cells: Vec<(ShotCategory, usize, Rect)>,
}

/// Per-segment treemap view. Owns the drill-down state and the last-computed
/// overview rectangle per category (the animation-start cache).
#[derive(Debug, Clone)]
pub struct TreemapView {
    width: f32,
    height: f32,
    state: TreemapState,
    overview_rects: Vec<(ShotCategory, Rect)>,
}

impl TreemapView {
    pub fn new() -> Self {
        Self::with_size(DEFAULT_CANVAS, DEFAULT_CANVAS)
    }

    pub fn with_size(width: f32, height: f32) -> Self {
        Self { width, height, state: TreemapState::Overview, overview_rects: Vec::new() }
    }

    pub fn state(&self) -> TreemapState {
        self.state
    }

    /// Cached overview category boxes from the last layout pass.
    pub fn overview_cache(&self) -> &[(ShotCategory, Rect)] {
        &self.overview_rects
    }

    /// Back to `Overview`, dropping cached positions. Must be called whenever
    /// the underlying filtered shot set changes so stale rectangles are never
    /// reused across a data change.
    pub fn reset(&mut self) {
        self.state = TreemapState::Overview;
        self.overview_rects.clear();
    }

    /// The single state transition: drill into `category`, switch drill-downs
    /// directly, or toggle back to the overview when the drilled category is
    /// re-selected. Each call completes a full transition; there is no
    /// intermediate state to observe.
    pub fn select_category(&mut self, category: ShotCategory) {
        self.state = match self.state {
            TreemapState::Drilldown(current) if current == category => TreemapState::Overview,
            _ => TreemapState::Drilldown(category),
        };
    }

    /// Build the positioned scene for the current state over `tree`.
    ///
    /// A drill-down whose category is absent from `tree` (the shot set
    /// changed underneath it) resets to the overview instead of failing.
    pub fn scene(&mut self, tree: &[CategoryNode]) -> TreemapScene {
        if let TreemapState::Drilldown(category) = self.state {
            let present = tree.iter().any(|n| n.category == category && n.attempts > 0);
            if !present {
                log::debug!("drill-down category {} absent from hierarchy; back to overview", category);
                self.state = TreemapState::Overview;
            }
        }

        match self.state {
            TreemapState::Overview => self.overview_scene(tree),
            TreemapState::Drilldown(category) => self.drilldown_scene(tree, category),
        }
    }

    fn compute_overview(&self, tree: &[CategoryNode]) -> OverviewLayout {
        let visible: Vec<&CategoryNode> = tree.iter().filter(|n| n.attempts > 0).collect();
        let outer = Rect::new(0.0, 0.0, self.width, self.height).inset(PAD_OUTER_OVERVIEW);
        let weights: Vec<f32> = visible.iter().map(|n| n.attempts as f32).collect();
        let boxes: Vec<Rect> =
            squarify(&weights, outer).into_iter().map(|r| r.inset(PAD_INNER / 2.0)).collect();

        let mut categories = Vec::with_capacity(boxes.len());
        let mut cells = Vec::new();

        for (node, cat_box) in visible.iter().zip(boxes) {
            categories.push((node.category, cat_box));

            // Reserve the label band, then pad the remaining content area.
            let content = Rect::new(
                cat_box.x + 1.0,
                cat_box.y + CATEGORY_LABEL_BAND,
                (cat_box.w - 2.0).max(0.0),
                (cat_box.h - CATEGORY_LABEL_BAND - 1.0).max(0.0),
            );
            let child_weights: Vec<f32> = node
                .children
                .iter()
                .filter(|c| c.attempts > 0)
                .map(|c| c.attempts as f32)
                .collect();
            let child_rects = squarify(&child_weights, content);

            let mut rect_iter = child_rects.into_iter();
            for (idx, child) in node.children.iter().enumerate() {
                if child.attempts == 0 {
                    continue;
                }
                if let Some(rect) = rect_iter.next() {
                    cells.push((node.category, idx, rect.inset(PAD_INNER / 2.0)));
                }
            }
        }

        OverviewLayout { categories, cells }
    }

    fn overview_scene(&mut self, tree: &[CategoryNode]) -> TreemapScene {
        let layout = self.compute_overview(tree);
        self.overview_rects = layout.categories.clone();

        let categories = layout
            .categories
            .iter()
            .map(|&(category, rect)| CategoryScene {
                category,
                rect,
                label_band: Rect::new(rect.x, rect.y, rect.w, CATEGORY_LABEL_BAND.min(rect.h)),
            })
            .collect();

        let cells = layout
            .cells
            .into_iter()
            .map(|(category, idx, rect)| {
                let node = tree.iter().find(|n| n.category == category);
                let child = node.map(|n| &n.children[idx]);
                cell_scene(category, child, rect, None)
            })
            .collect();

        TreemapScene { state: self.state, header: None, categories, cells }
    }

    fn drilldown_scene(&mut self, tree: &[CategoryNode], category: ShotCategory) -> TreemapScene {
        let header = Some(HeaderBand {
            rect: Rect::new(0.0, 0.0, self.width, DRILLDOWN_HEADER),
            label: category.label().to_string(),
        });

        // scene() already verified presence.
        let node = match tree.iter().find(|n| n.category == category) {
            Some(n) => n,
            None => return TreemapScene { state: self.state, header, categories: vec![], cells: vec![] },
        };

        // Children tile the canvas below the breadcrumb band.
        let body_frame =
            Rect::new(0.0, DRILLDOWN_HEADER, self.width, (self.height - DRILLDOWN_HEADER).max(0.0));
        let body = body_frame.inset(PAD_OUTER_DRILLDOWN);

        let visible: Vec<(usize, &crate::engine::aggregate::ActionTypeStat)> =
            node.children.iter().enumerate().filter(|(_, c)| c.attempts > 0).collect();
        let weights: Vec<f32> = visible.iter().map(|(_, c)| c.attempts as f32).collect();
        let rects: Vec<Rect> =
            squarify(&weights, body).into_iter().map(|r| r.inset(PAD_INNER / 2.0)).collect();

        // Recompute the overview layout for animation start positions; this
        // also refreshes the cache, so leaving the drill-down later starts
        // from the same geometry.
        let overview = self.compute_overview(tree);
        self.overview_rects = overview.categories.clone();
        let cat_box =
            overview.categories.iter().find(|(c, _)| *c == category).map(|&(_, r)| r);

        let cells = visible
            .into_iter()
            .zip(rects)
            .map(|((idx, child), rect)| {
                let orig = overview
                    .cells
                    .iter()
                    .find(|(c, i, _)| *c == category && *i == idx)
                    .map(|&(_, _, r)| r);
                let enter_from = match (orig, cat_box) {
                    (Some(orig), Some(cat_box)) if cat_box.w > 0.0 && cat_box.h > 0.0 => {
                        Some(orig.remap(&cat_box, &body_frame))
                    }
                    // No overview position to grow from: start collapsed at
                    // the target location.
                    _ => Some(Rect::new(rect.x, rect.y, rect.w * 0.3, rect.h * 0.3)),
                };
                cell_scene(category, Some(child), rect, enter_from)
            })
            .collect();

        TreemapScene { state: self.state, header, categories: vec![], cells }
    }
}

impl Default for TreemapView {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_scene(
    category: ShotCategory,
    child: Option<&crate::engine::aggregate::ActionTypeStat>,
    rect: Rect,
    enter_from: Option<Rect>,
) -> CellScene {
    match child {
        Some(c) => CellScene {
            name: c.name.clone(),
            category,
            rect,
            enter_from,
            attempts: c.attempts,
            makes: c.made,
            fg: c.fg,
            efg: c.efg,
        },
        None => CellScene {
            name: String::new(),
            category,
            rect,
            enter_from,
            attempts: 0,
            makes: 0,
            fg: 0.0,
            efg: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::aggregate::{aggregate_hierarchical, ActionTypeStat};
    use crate::models::{ShotRecord, ShotValue};

    fn shot(action: &str, made: bool) -> ShotRecord {
        ShotRecord {
            player_id: 7,
            player_name: String::new(),
            loc_x: 0.0,
            loc_y: 0.0,
            made,
            period: 1,
            minutes_remaining: 0,
            seconds_remaining: 0,
            action_type: Some(action.to_string()),
            value: ShotValue::TwoPoint,
            teammates_on_court: vec![],
            opponents_on_court: vec![],
            elapsed_min: 0.0,
        }
    }

    fn sample_tree() -> Vec<crate::engine::aggregate::CategoryNode> {
        let shots = vec![
            shot("Jump Shot", true),
            shot("Jump Shot", false),
            shot("Fadeaway Jump Shot", true),
            shot("Driving Layup Shot", true),
            shot("Cutting Layup Shot", false),
            shot("Slam Dunk Shot", true),
        ];
        aggregate_hierarchical(&shots)
    }

    #[test]
    fn test_initial_state_is_overview() {
        let view = TreemapView::new();
        assert_eq!(view.state(), TreemapState::Overview);
        assert!(view.overview_cache().is_empty());
    }

    #[test]
    fn test_toggle_and_switch() {
        let mut view = TreemapView::new();

        view.select_category(ShotCategory::Layup);
        assert_eq!(view.state(), TreemapState::Drilldown(ShotCategory::Layup));

        // Different category switches directly, no intermediate overview.
        view.select_category(ShotCategory::Dunk);
        assert_eq!(view.state(), TreemapState::Drilldown(ShotCategory::Dunk));

        // Re-selecting toggles back.
        view.select_category(ShotCategory::Dunk);
        assert_eq!(view.state(), TreemapState::Overview);
    }

    #[test]
    fn test_toggle_idempotence_restores_cache() {
        let tree = sample_tree();
        let mut view = TreemapView::new();

        view.scene(&tree);
        let cache_before: Vec<_> = view.overview_cache().to_vec();
        assert!(!cache_before.is_empty());

        view.select_category(ShotCategory::JumpShot);
        view.scene(&tree);
        view.select_category(ShotCategory::JumpShot);
        assert_eq!(view.state(), TreemapState::Overview);
        view.scene(&tree);

        assert_eq!(view.overview_cache(), cache_before.as_slice());
    }

    #[test]
    fn test_overview_scene_shape() {
        let tree = sample_tree();
        let mut view = TreemapView::new();
        let scene = view.scene(&tree);

        assert_eq!(scene.state, TreemapState::Overview);
        assert!(scene.header.is_none());
        assert_eq!(scene.categories.len(), 3);
        // One cell per distinct action type.
        assert_eq!(scene.cells.len(), 5);
        assert!(scene.cells.iter().all(|c| c.enter_from.is_none()));

        // Category areas scale with attempts: Jump Shot (3) biggest.
        let jump = scene
            .categories
            .iter()
            .find(|c| c.category == ShotCategory::JumpShot)
            .unwrap();
        for c in &scene.categories {
            assert!(jump.rect.area() >= c.rect.area() - 1e-3);
        }
        // Label band sits at the top of its category box.
        assert!((jump.label_band.y - jump.rect.y).abs() < 1e-6);
        assert!((jump.label_band.h - CATEGORY_LABEL_BAND).abs() < 1e-6);
    }

    #[test]
    fn test_drilldown_scene_has_header_and_enter_rects() {
        let tree = sample_tree();
        let mut view = TreemapView::new();
        view.scene(&tree);

        view.select_category(ShotCategory::JumpShot);
        let scene = view.scene(&tree);

        assert_eq!(scene.state, TreemapState::Drilldown(ShotCategory::JumpShot));
        let header = scene.header.expect("drill-down carries a breadcrumb band");
        assert_eq!(header.label, "Jump Shot");
        assert!((header.rect.h - DRILLDOWN_HEADER).abs() < 1e-6);
        assert!(scene.categories.is_empty());

        assert_eq!(scene.cells.len(), 2);
        for cell in &scene.cells {
            // Final rects live below the header band.
            assert!(cell.rect.y >= DRILLDOWN_HEADER);
            assert!(cell.enter_from.is_some());
        }
    }

    #[test]
    fn test_enter_rect_is_overview_position_remapped() {
        let tree = sample_tree();
        let mut view = TreemapView::new();
        let overview = view.scene(&tree);

        let cat_box = overview
            .categories
            .iter()
            .find(|c| c.category == ShotCategory::JumpShot)
            .unwrap()
            .rect;
        let ov_cell = overview
            .cells
            .iter()
            .find(|c| c.name == "Jump Shot")
            .unwrap()
            .rect;

        view.select_category(ShotCategory::JumpShot);
        let drill = view.scene(&tree);
        let enter = drill
            .cells
            .iter()
            .find(|c| c.name == "Jump Shot")
            .unwrap()
            .enter_from
            .unwrap();

        // Same relative position within the category box, rescaled to the
        // full-canvas body frame.
        let rel_ov = (ov_cell.x - cat_box.x) / cat_box.w;
        let rel_enter = enter.x / DEFAULT_CANVAS;
        assert!((rel_ov - rel_enter).abs() < 1e-3, "{} vs {}", rel_ov, rel_enter);
        assert!(enter.y >= DRILLDOWN_HEADER - 1e-3);
    }

    #[test]
    fn test_absent_category_resets_to_overview() {
        let tree = sample_tree();
        let mut view = TreemapView::new();
        view.scene(&tree);

        // Floater never appears in the sample data.
        view.select_category(ShotCategory::Floater);
        let scene = view.scene(&tree);
        assert_eq!(scene.state, TreemapState::Overview);
        assert_eq!(view.state(), TreemapState::Overview);
        assert!(scene.header.is_none());
    }

    #[test]
    fn test_zero_children_drilldown_is_header_only() {
        // Hand-built node: present with attempts but no positive children.
        let node = crate::engine::aggregate::CategoryNode {
            category: ShotCategory::Dunk,
            made: 0,
            attempts: 1,
            freq: 1.0,
            fg: 0.0,
            efg: 0.0,
            children: vec![ActionTypeStat {
                name: "Dunk Shot".to_string(),
                made: 0,
                attempts: 0,
                is_three: false,
                freq: 0.0,
                fg: 0.0,
                efg: 0.0,
            }],
        };
        let mut view = TreemapView::new();
        view.select_category(ShotCategory::Dunk);
        let scene = view.scene(&[node]);
        assert_eq!(scene.state, TreemapState::Drilldown(ShotCategory::Dunk));
        assert!(scene.header.is_some());
        assert!(scene.cells.is_empty());
    }

    #[test]
    fn test_reset_clears_cache_and_state() {
        let tree = sample_tree();
        let mut view = TreemapView::new();
        view.scene(&tree);
        view.select_category(ShotCategory::Layup);
        view.reset();
        assert_eq!(view.state(), TreemapState::Overview);
        assert!(view.overview_cache().is_empty());
    }

    #[test]
    fn test_empty_tree_yields_empty_overview() {
        let mut view = TreemapView::new();
        let scene = view.scene(&[]);
        assert_eq!(scene.state, TreemapState::Overview);
        assert!(scene.categories.is_empty());
        assert!(scene.cells.is_empty());
    }
}
