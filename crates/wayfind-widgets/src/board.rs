//! A media-browser style tile board: a fixed sidebar menu beside a column of
//! content sections. Rows scroll horizontally like carousels; grids wrap.
//!
//! The board is the rendering layer the navigation engine talks to. It
//! implements [`GeometryProvider`] and [`FocusHost`] from its live layout, so
//! every bounds query reflects the current terminal size and scroll offsets.
//!
//! Geometry is reported in points rather than cells. A cell is
//! [`BoardMetrics::cell_width`] by [`BoardMetrics::cell_height`] points
//! (8x16 by default, a typical terminal font), which keeps the engine's row
//! tolerance meaningful on a character grid.
//!
//! # Example
//!
//! ```
//! use ratatui::layout::Rect;
//! use wayfind_core::{Dispatcher, Direction, Disposition};
//! use wayfind_widgets::board::{SectionKind, TileBoard};
//!
//! let mut board = TileBoard::new();
//! let row = board.add_section("Continue Watching", SectionKind::Row);
//! let first = board.push_tile(row, "Dune").unwrap();
//! let second = board.push_tile(row, "Arrival").unwrap();
//! board.resize(Rect::new(0, 0, 80, 24));
//!
//! let mut dispatcher = Dispatcher::default();
//! dispatcher.activate(TileBoard::CONTENT, &mut board);
//! assert_eq!(board.focused(), Some(first));
//!
//! let d = dispatcher.handle(&mut board, Direction::Right.into());
//! assert_eq!(d, Disposition::Moved { from: first, to: second });
//! ```

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tracing::{debug, trace};
use wayfind_core::{BoundingBox, FocusHost, GeometryProvider, NodeId, RegionId, ScrollOptions};

use crate::label;
use crate::scroll::{aligned_offset, ScrollAxis};

/// A focusable tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: NodeId,
    pub label: String,
    /// Hidden tiles are not rendered and take no space.
    pub hidden: bool,
    /// How many times the tile has been activated.
    pub opened: u32,
}

impl Tile {
    fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            hidden: false,
            opened: 0,
        }
    }
}

/// How a section lays out its tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// A single line of tiles that scrolls horizontally.
    Row,
    /// Tiles wrap after `columns` per line.
    Grid { columns: u16 },
}

/// A titled group of tiles in the content column.
#[derive(Debug, Clone)]
pub struct Section {
    title: String,
    kind: SectionKind,
    tiles: Vec<Tile>,
    scroll_x: ScrollAxis,
}

impl Section {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Current horizontal scroll offset in cells. Always 0 for grids.
    pub fn scroll_offset(&self) -> i32 {
        self.scroll_x.offset()
    }

    fn visible_count(&self) -> i32 {
        self.tiles.iter().filter(|t| !t.hidden).count() as i32
    }

    fn line_count(&self) -> i32 {
        let n = self.visible_count();
        match self.kind {
            _ if n == 0 => 0,
            SectionKind::Row => 1,
            SectionKind::Grid { columns } => {
                let columns = i32::from(columns.max(1));
                (n + columns - 1) / columns
            }
        }
    }
}

/// Tile sizes and spacing, in cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardMetrics {
    pub tile_width: u16,
    pub tile_height: u16,
    /// Columns between neighbouring tiles.
    pub gap: u16,
    /// Lines between tile lines and between sections.
    pub row_gap: u16,
    pub sidebar_width: u16,
    pub sidebar_item_height: u16,
    /// Points per cell, horizontally.
    pub cell_width: f64,
    /// Points per cell, vertically.
    pub cell_height: f64,
}

impl Default for BoardMetrics {
    fn default() -> Self {
        Self {
            tile_width: 18,
            tile_height: 3,
            gap: 1,
            row_gap: 1,
            sidebar_width: 16,
            sidebar_item_height: 3,
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

/// Style configuration for the board.
#[derive(Debug, Clone)]
pub struct BoardStyle {
    /// Border style of an unfocused tile.
    pub tile: Style,
    /// Border and label style of the focused tile.
    pub focused_tile: Style,
    /// Label style of a tile that has been opened.
    pub opened: Style,
    /// Section title style.
    pub title: Style,
    /// Border style of the sidebar.
    pub sidebar: Style,
    /// Appended to labels cut short to fit a tile.
    pub ellipsis: String,
}

impl Default for BoardStyle {
    fn default() -> Self {
        Self {
            tile: Style::default().fg(Color::DarkGray),
            focused_tile: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            opened: Style::default().fg(Color::Green),
            title: Style::default().add_modifier(Modifier::BOLD),
            sidebar: Style::default().fg(Color::DarkGray),
            ellipsis: "…".to_string(),
        }
    }
}

/// Where a tile landed in the current layout.
#[derive(Debug, Clone, Copy)]
struct Placement {
    id: NodeId,
    /// `None` for sidebar items.
    section: Option<usize>,
    /// Viewport rectangle in cells. May lie partly or wholly off screen.
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    /// Unscrolled offset inside the section's line.
    line_x: i32,
    /// Unscrolled offset from the top of the content column.
    content_y: i32,
}

/// A signed rectangle in cells.
#[derive(Debug, Clone, Copy)]
struct CellRect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

/// Sidebar plus sections of tiles, with live geometry.
#[derive(Debug, Clone)]
pub struct TileBoard {
    sidebar: Vec<Tile>,
    sections: Vec<Section>,
    focused: Option<NodeId>,
    focus_changes: Vec<Option<NodeId>>,
    scroll_y: ScrollAxis,
    area: Rect,
    metrics: BoardMetrics,
    style: BoardStyle,
    next_id: u64,
}

impl Default for TileBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TileBoard {
    /// Region covering the sidebar menu.
    pub const SIDEBAR: RegionId = RegionId(0);
    /// Region covering the content column.
    pub const CONTENT: RegionId = RegionId(1);

    pub fn new() -> Self {
        Self {
            sidebar: Vec::new(),
            sections: Vec::new(),
            focused: None,
            focus_changes: Vec::new(),
            scroll_y: ScrollAxis::new(),
            area: Rect::default(),
            metrics: BoardMetrics::default(),
            style: BoardStyle::default(),
            next_id: 1,
        }
    }

    /// Builder: set tile metrics.
    pub fn with_metrics(mut self, metrics: BoardMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Builder: set the style.
    pub fn with_style(mut self, style: BoardStyle) -> Self {
        self.style = style;
        self
    }

    pub fn metrics(&self) -> &BoardMetrics {
        &self.metrics
    }

    fn allocate(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an entry to the sidebar menu.
    pub fn add_sidebar_item(&mut self, label: impl Into<String>) -> NodeId {
        let id = self.allocate();
        self.sidebar.push(Tile::new(id, label));
        id
    }

    /// Append an empty section and return its index.
    pub fn add_section(&mut self, title: impl Into<String>, kind: SectionKind) -> usize {
        self.sections.push(Section {
            title: title.into(),
            kind,
            tiles: Vec::new(),
            scroll_x: ScrollAxis::new(),
        });
        self.sections.len() - 1
    }

    /// Append a tile to `section`. Returns `None` if there is no such
    /// section.
    pub fn push_tile(&mut self, section: usize, label: impl Into<String>) -> Option<NodeId> {
        if section >= self.sections.len() {
            return None;
        }
        let id = self.allocate();
        self.sections[section].tiles.push(Tile::new(id, label));
        Some(id)
    }

    pub fn sidebar(&self) -> &[Tile] {
        &self.sidebar
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn tile(&self, id: NodeId) -> Option<&Tile> {
        self.sidebar
            .iter()
            .chain(self.sections.iter().flat_map(|s| s.tiles.iter()))
            .find(|t| t.id == id)
    }

    fn tile_mut(&mut self, id: NodeId) -> Option<&mut Tile> {
        self.sidebar
            .iter_mut()
            .chain(self.sections.iter_mut().flat_map(|s| s.tiles.iter_mut()))
            .find(|t| t.id == id)
    }

    /// The tile holding focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Vertical scroll offset of the content column, in cells.
    pub fn scroll_offset(&self) -> i32 {
        self.scroll_y.offset()
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Lay the board out for `area`. Call on every terminal resize.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.clamp_scroll();
    }

    /// Drain the focus changes recorded since the last call, oldest first.
    ///
    /// `None` entries mean focus was lost (the focused tile was removed or
    /// hidden). The runtime forwards each one to the dispatcher.
    pub fn take_focus_changes(&mut self) -> Vec<Option<NodeId>> {
        std::mem::take(&mut self.focus_changes)
    }

    fn set_focus(&mut self, node: Option<NodeId>) {
        if self.focused != node {
            self.focused = node;
            self.focus_changes.push(node);
        }
    }

    /// Remove a tile. Removing the focused tile leaves nothing focused.
    pub fn remove_tile(&mut self, id: NodeId) -> Option<Tile> {
        let removed = if let Some(pos) = self.sidebar.iter().position(|t| t.id == id) {
            Some(self.sidebar.remove(pos))
        } else {
            self.sections.iter_mut().find_map(|section| {
                let pos = section.tiles.iter().position(|t| t.id == id)?;
                Some(section.tiles.remove(pos))
            })
        };
        if removed.is_some() {
            debug!(node = %id, "tile removed");
            if self.focused == Some(id) {
                self.set_focus(None);
            }
            self.clamp_scroll();
        }
        removed
    }

    /// Show or hide a tile. Hiding the focused tile leaves nothing focused.
    /// Returns `false` if there is no such tile.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> bool {
        let Some(tile) = self.tile_mut(id) else {
            return false;
        };
        tile.hidden = hidden;
        if hidden && self.focused == Some(id) {
            self.set_focus(None);
        }
        self.clamp_scroll();
        true
    }

    /// Move focus to the first visible sidebar entry, as a pointer click or
    /// an outside control would.
    pub fn focus_sidebar(&mut self) -> Option<NodeId> {
        let id = self.sidebar.iter().find(|t| !t.hidden)?.id;
        self.set_focus(Some(id));
        Some(id)
    }

    /// Run the focused tile's own activation behavior.
    pub fn activate_focused(&mut self) -> Option<NodeId> {
        let id = self.focused?;
        let tile = self.tile_mut(id)?;
        tile.opened += 1;
        debug!(node = %id, label = %tile.label, opened = tile.opened, "tile activated");
        Some(id)
    }

    /// Advance scroll animations by one frame. Returns `true` if anything
    /// moved.
    pub fn tick(&mut self) -> bool {
        let mut moved = self.scroll_y.tick();
        for section in &mut self.sections {
            moved |= section.scroll_x.tick();
        }
        moved
    }

    /// Whether any scroll animation is still running.
    pub fn is_animating(&self) -> bool {
        !self.scroll_y.is_settled() || self.sections.iter().any(|s| !s.scroll_x.is_settled())
    }

    fn sidebar_width(&self) -> i32 {
        if self.sidebar.is_empty() {
            0
        } else {
            i32::from(self.metrics.sidebar_width.min(self.area.width))
        }
    }

    fn content_viewport(&self) -> CellRect {
        let sidebar = self.sidebar_width();
        let offset = if sidebar > 0 { sidebar + 1 } else { 0 };
        CellRect {
            x: i32::from(self.area.x) + offset,
            y: i32::from(self.area.y),
            width: (i32::from(self.area.width) - offset).max(0),
            height: i32::from(self.area.height),
        }
    }

    fn section_height(&self, section: &Section) -> i32 {
        let lines = section.line_count();
        let th = i32::from(self.metrics.tile_height);
        let gap = i32::from(self.metrics.row_gap);
        1 + lines * th + (lines - 1).max(0) * gap
    }

    fn content_height(&self) -> i32 {
        let gap = i32::from(self.metrics.row_gap);
        let total: i32 = self
            .sections
            .iter()
            .map(|s| self.section_height(s) + gap)
            .sum();
        (total - gap).max(0)
    }

    fn line_width(&self, section: &Section) -> i32 {
        let n = section.visible_count();
        let tw = i32::from(self.metrics.tile_width);
        let gap = i32::from(self.metrics.gap);
        (n * tw + (n - 1).max(0) * gap).max(0)
    }

    fn clamp_scroll(&mut self) {
        let viewport = self.content_viewport();
        let max_y = self.content_height() - viewport.height;
        self.scroll_y.clamp(max_y);
        for i in 0..self.sections.len() {
            let max_x = match self.sections[i].kind {
                SectionKind::Row => self.line_width(&self.sections[i]) - viewport.width,
                SectionKind::Grid { .. } => 0,
            };
            self.sections[i].scroll_x.clamp(max_x);
        }
    }

    /// Place every visible tile for the current area and scroll offsets.
    fn layout(&self) -> Vec<Placement> {
        let m = &self.metrics;
        let (tw, th) = (i32::from(m.tile_width), i32::from(m.tile_height));
        let (gap, row_gap) = (i32::from(m.gap), i32::from(m.row_gap));
        let mut placed = Vec::new();

        let sidebar = self.sidebar_width();
        let item_height = i32::from(m.sidebar_item_height);
        let visible_items = self.sidebar.iter().filter(|t| !t.hidden);
        for (k, tile) in visible_items.enumerate() {
            let y = 1 + k as i32 * (item_height + row_gap);
            placed.push(Placement {
                id: tile.id,
                section: None,
                x: i32::from(self.area.x) + 1,
                y: i32::from(self.area.y) + y,
                width: (sidebar - 2).max(0),
                height: item_height,
                line_x: 0,
                content_y: y,
            });
        }

        let viewport = self.content_viewport();
        let mut top = 0;
        for (index, section) in self.sections.iter().enumerate() {
            let tiles_top = top + 1;
            let visible_tiles = section.tiles.iter().filter(|t| !t.hidden);
            for (k, tile) in visible_tiles.enumerate() {
                let k = k as i32;
                let (column, line, scroll_x) = match section.kind {
                    SectionKind::Row => (k, 0, section.scroll_x.offset()),
                    SectionKind::Grid { columns } => {
                        let columns = i32::from(columns.max(1));
                        (k % columns, k / columns, 0)
                    }
                };
                let line_x = column * (tw + gap);
                let content_y = tiles_top + line * (th + row_gap);
                placed.push(Placement {
                    id: tile.id,
                    section: Some(index),
                    x: viewport.x + line_x - scroll_x,
                    y: viewport.y + content_y - self.scroll_y.offset(),
                    width: tw,
                    height: th,
                    line_x,
                    content_y,
                });
            }
            top += self.section_height(section) + row_gap;
        }
        placed
    }

    fn placement(&self, id: NodeId) -> Option<Placement> {
        self.layout().into_iter().find(|p| p.id == id)
    }

    fn to_points(&self, p: &Placement) -> BoundingBox {
        let (cw, ch) = (self.metrics.cell_width, self.metrics.cell_height);
        BoundingBox::from_xywh(
            f64::from(p.x) * cw,
            f64::from(p.y) * ch,
            f64::from(p.width) * cw,
            f64::from(p.height) * ch,
        )
    }

    /// Render the board into the area last passed to [`resize`](Self::resize).
    pub fn view(&self, frame: &mut Frame) {
        let area = self.area.intersection(frame.area());
        if area.is_empty() {
            return;
        }

        let sidebar = self.sidebar_width() as u16;
        if sidebar > 0 {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(self.style.sidebar);
            frame.render_widget(block, Rect::new(area.x, area.y, sidebar, area.height));
        }

        let viewport = self.content_viewport();
        let mut top = 0;
        for section in &self.sections {
            let y = viewport.y + top - self.scroll_y.offset();
            if let Some(rect) = clip(viewport, viewport.x, y, viewport.width, 1) {
                let title = label::truncate(&section.title, rect.width as usize, &self.style.ellipsis);
                frame.render_widget(Paragraph::new(title).style(self.style.title), rect);
            }
            top += self.section_height(section) + i32::from(self.metrics.row_gap);
        }

        for p in self.layout() {
            let bounds = match p.section {
                None => CellRect {
                    x: i32::from(area.x),
                    y: i32::from(area.y) + 1,
                    width: i32::from(sidebar),
                    height: i32::from(area.height) - 2,
                },
                Some(_) => viewport,
            };
            let Some(rect) = clip(bounds, p.x, p.y, p.width, p.height) else {
                continue;
            };
            let Some(tile) = self.tile(p.id) else {
                continue;
            };
            self.render_tile(frame, tile, rect, p.section.is_none());
        }
    }

    fn render_tile(&self, frame: &mut Frame, tile: &Tile, rect: Rect, in_sidebar: bool) {
        let focused = self.focused == Some(tile.id);
        let border = if focused {
            self.style.focused_tile
        } else {
            self.style.tile
        };
        let block = if in_sidebar && !focused {
            Block::default()
        } else {
            Block::default().borders(Borders::ALL).border_style(border)
        };
        let inner = block.inner(rect);
        let text = if tile.opened > 0 {
            format!("✓ {}", tile.label)
        } else {
            tile.label.clone()
        };
        let text = label::truncate(&text, inner.width as usize, &self.style.ellipsis);
        let text = if in_sidebar {
            text
        } else {
            label::center(&text, inner.width as usize)
        };
        let style = match (focused, tile.opened > 0) {
            (true, _) => self.style.focused_tile,
            (false, true) => self.style.opened,
            (false, false) => Style::default(),
        };
        let paragraph = Paragraph::new(Line::styled(text, style)).block(block);
        frame.render_widget(paragraph, rect);
    }
}

/// The rectangle as a `Rect` if it lies entirely inside `bounds`.
fn clip(bounds: CellRect, x: i32, y: i32, width: i32, height: i32) -> Option<Rect> {
    let inside = width > 0
        && height > 0
        && x >= bounds.x
        && y >= bounds.y
        && x + width <= bounds.x + bounds.width
        && y + height <= bounds.y + bounds.height;
    if !inside {
        return None;
    }
    Some(Rect::new(
        u16::try_from(x).ok()?,
        u16::try_from(y).ok()?,
        u16::try_from(width).ok()?,
        u16::try_from(height).ok()?,
    ))
}

impl GeometryProvider for TileBoard {
    fn focusable_nodes(&self, region: RegionId) -> Vec<NodeId> {
        match region {
            Self::SIDEBAR => self.sidebar.iter().map(|t| t.id).collect(),
            Self::CONTENT => self
                .sections
                .iter()
                .flat_map(|s| s.tiles.iter().map(|t| t.id))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn bounds(&self, node: NodeId) -> Option<BoundingBox> {
        let tile = self.tile(node)?;
        if tile.hidden {
            return Some(BoundingBox::default());
        }
        self.placement(node).map(|p| self.to_points(&p))
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.tile(node).is_some_and(|t| !t.hidden)
    }
}

impl FocusHost for TileBoard {
    fn active_node(&self) -> Option<NodeId> {
        self.focused
    }

    fn request_focus(&mut self, node: NodeId) {
        if !self.is_visible(node) {
            trace!(node = %node, "ignoring focus request for a missing or hidden tile");
            return;
        }
        self.set_focus(Some(node));
    }

    fn scroll_into_view(&mut self, node: NodeId, options: ScrollOptions) {
        let Some(p) = self.placement(node) else {
            return;
        };
        let Some(index) = p.section else {
            // The sidebar does not scroll.
            return;
        };
        let viewport = self.content_viewport();
        let (tw, th) = (
            i32::from(self.metrics.tile_width),
            i32::from(self.metrics.tile_height),
        );

        let y = aligned_offset(p.content_y, th, viewport.height, self.scroll_y.offset(), options.block);
        self.scroll_y.scroll_to(y, options.behavior);

        let section = &mut self.sections[index];
        if section.kind == SectionKind::Row {
            let x = aligned_offset(p.line_x, tw, viewport.width, section.scroll_x.offset(), options.inline);
            section.scroll_x.scroll_to(x, options.behavior);
        }
        self.clamp_scroll();
        trace!(
            node = %node,
            y = self.scroll_y.target(),
            "scrolling tile into view"
        );
    }
}
