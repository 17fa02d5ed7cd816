// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! An interactive ratatui + crossterm host for the gesture engines. Mouse events from the whole
//! terminal drive the [`GestureHost`]; every commit is persisted through the [`Workspace`] and
//! the forest is laid out again in terminal cells.

use std::collections::BTreeMap;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use thiserror::Error;

use crate::gesture::{GestureContext, GestureEvent, GestureHost};
use crate::layout::{
    layout_forest, ForestLayout, LayoutError, LayoutMetrics, Point, ValidationPolicy,
};
use crate::model::BranchId;
use crate::render::{
    render_forest_unicode_annotated, AnnotatedRender, RenderError, RenderOptions,
};
use crate::store::{StoreError, ViewState, Workspace};

mod theme;

pub use theme::ThemeError;
use theme::TuiTheme;

const HORIZONTAL_SCROLL_STEP: u16 = 4;
const FOOTER_HINTS: &str = " q quit  f filter  Tab select  m mark  ←↑↓→ scroll ";

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Runs the interactive terminal UI until the user quits.
pub fn run(workspace: Workspace, policy: ValidationPolicy) -> Result<(), TuiError> {
    let theme = TuiTheme::from_env()?;
    let mut app = App::new(workspace, policy, theme)?;
    let mut terminal = TerminalSession::new()?;

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Info(String),
    Error(String),
}

struct App {
    workspace: Workspace,
    policy: ValidationPolicy,
    metrics: LayoutMetrics,
    layout: ForestLayout,
    host: GestureHost,
    theme: TuiTheme,
    selected: Option<BranchId>,
    scroll_x: u16,
    scroll_y: u16,
    /// Where the diagram was last drawn; mouse positions are relative to it.
    viewport: Rect,
    status: Option<Status>,
    should_quit: bool,
}

fn gesture_context<'a>(
    layout: &'a ForestLayout,
    workspace: &'a Workspace,
    metrics: &'a LayoutMetrics,
) -> GestureContext<'a> {
    GestureContext {
        layout,
        sibling_order: &workspace.view().sibling_order,
        separator_index: workspace.view().focus_separator_index,
        metrics,
    }
}

impl App {
    fn new(
        workspace: Workspace,
        policy: ValidationPolicy,
        theme: TuiTheme,
    ) -> Result<Self, TuiError> {
        let metrics = workspace.metrics(LayoutMetrics::cells())?;
        let layout = layout_forest(&workspace.forest(), &metrics, policy)?;
        Ok(Self {
            workspace,
            policy,
            metrics,
            layout,
            host: GestureHost::new(),
            theme,
            selected: None,
            scroll_x: 0,
            scroll_y: 0,
            viewport: Rect::default(),
            status: None,
            should_quit: false,
        })
    }

    fn relayout(&mut self) {
        match layout_forest(&self.workspace.forest(), &self.metrics, self.policy) {
            Ok(layout) => {
                self.layout = layout;
                if self.selected.as_ref().is_some_and(|id| self.layout.node(id.as_str()).is_none())
                {
                    self.selected = None;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "layout failed; keeping the previous one");
                self.status = Some(Status::Error(err.to_string()));
            }
        }
    }

    fn render(&self) -> Result<AnnotatedRender, RenderError> {
        let ctx = gesture_context(&self.layout, &self.workspace, &self.metrics);
        let offsets = self.host.offsets(&ctx);
        let options = RenderOptions {
            separator_index: self.workspace.view().focus_separator_index,
            hide_separator: false,
        };
        render_forest_unicode_annotated(&self.layout, &offsets, options)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if !self.host.is_idle() {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('f') => self.update_view(|view| {
                view.minimize.filter_enabled = !view.minimize.filter_enabled;
            }),
            KeyCode::Char('m') => {
                let Some(id) = self.selected.clone() else {
                    self.status = Some(Status::Info("select a branch with Tab first".to_owned()));
                    return;
                };
                self.update_view(|view| view.minimize.toggle(&id));
            }
            KeyCode::Tab => self.select_step(true),
            KeyCode::BackTab => self.select_step(false),
            KeyCode::Left => self.scroll_x = self.scroll_x.saturating_sub(HORIZONTAL_SCROLL_STEP),
            KeyCode::Right => {
                self.scroll_x =
                    self.scroll_x.saturating_add(HORIZONTAL_SCROLL_STEP).min(self.canvas_width())
            }
            KeyCode::Up => self.scroll_y = self.scroll_y.saturating_sub(1),
            KeyCode::Down => {
                self.scroll_y = self.scroll_y.saturating_add(1).min(self.canvas_height())
            }
            _ => {}
        }
    }

    fn canvas_width(&self) -> u16 {
        u16::try_from(self.layout.width().ceil() as i64).unwrap_or(u16::MAX)
    }

    fn canvas_height(&self) -> u16 {
        u16::try_from(self.layout.height().ceil() as i64).unwrap_or(u16::MAX)
    }

    fn update_view(&mut self, edit: impl FnOnce(&mut ViewState)) {
        match self.workspace.update_view(edit) {
            Ok(true) => self.relayout(),
            Ok(false) => {}
            Err(err) => self.status = Some(Status::Error(err.to_string())),
        }
    }

    /// Moves the selection through real branches in layout order.
    fn select_step(&mut self, forward: bool) {
        let ids = self
            .layout
            .nodes()
            .iter()
            .filter(|node| !node.is_tentative())
            .map(|node| node.id())
            .collect::<Vec<_>>();
        if ids.is_empty() {
            return;
        }
        let current =
            self.selected.as_ref().and_then(|id| ids.iter().position(|other| *other == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => ids.len() - 1,
            (Some(idx), true) => (idx + 1) % ids.len(),
            (Some(idx), false) => (idx + ids.len() - 1) % ids.len(),
        };
        self.selected = Some(ids[next].clone());
    }

    /// The layout point under a terminal cell, sampled at the cell center.
    fn canvas_point(&self, column: u16, row: u16) -> Point {
        Point::new(
            f64::from(column) - f64::from(self.viewport.x) + f64::from(self.scroll_x) + 0.5,
            f64::from(row) - f64::from(self.viewport.y) + f64::from(self.scroll_y) + 0.5,
        )
    }

    fn in_viewport(&self, column: u16, row: u16) -> bool {
        let area = self.viewport;
        column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let point = self.canvas_point(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left)
                if self.in_viewport(mouse.column, mouse.row) =>
            {
                self.pointer_down(point)
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let mut events = Vec::<GestureEvent>::new();
                let ctx = gesture_context(&self.layout, &self.workspace, &self.metrics);
                self.host.pointer_move(&ctx, point, &mut events);
                self.commit(events);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let mut events = Vec::<GestureEvent>::new();
                let ctx = gesture_context(&self.layout, &self.workspace, &self.metrics);
                self.host.pointer_move(&ctx, point, &mut events);
                self.host.pointer_up(&ctx, &mut events);
                self.commit(events);
            }
            MouseEventKind::ScrollDown => self.scroll_y = self.scroll_y.saturating_add(1),
            MouseEventKind::ScrollUp => self.scroll_y = self.scroll_y.saturating_sub(1),
            _ => {}
        }
    }

    /// Separator rule first, then a node's top border (column drag), then its body (link).
    fn pointer_down(&mut self, point: Point) {
        let ctx = gesture_context(&self.layout, &self.workspace, &self.metrics);
        let offsets = self.host.offsets(&ctx);

        if offsets.separator().is_some_and(|rect| rect.contains(point)) {
            self.host.start_separator(&ctx);
            return;
        }

        let Some(node) = offsets.node_at(&self.layout, point) else {
            return;
        };
        let id = node.id().clone();
        let on_top_border = point.y < offsets.rendered_rect(node).top() + 1.0;
        let started = if on_top_border {
            self.host.start_reorder(&ctx, id.as_str(), point)
        } else {
            self.host.start_link(&ctx, id.as_str(), point)
        };
        if !node.is_tentative() {
            self.selected = Some(id.clone());
        }
        tracing::debug!(branch = %id, on_top_border, started, "pointer down on node");
    }

    fn commit(&mut self, events: Vec<GestureEvent>) {
        let mut relayout = false;
        for event in &events {
            match self.workspace.apply(event) {
                Ok(changed) => relayout |= changed,
                Err(err) => {
                    tracing::warn!(error = %err, "cannot persist gesture result");
                    self.status = Some(Status::Error(err.to_string()));
                    continue;
                }
            }
            if let GestureEvent::EdgeRequested { parent, child } = event {
                self.status = Some(Status::Info(format!("{child} now branches from {parent}")));
            }
        }
        if relayout {
            self.relayout();
        }
    }

    fn title(&self) -> String {
        match self.workspace.document_file() {
            Some(file) => format!(" canopy: {} ", file.path().display()),
            None => " canopy: demo ".to_owned(),
        }
    }

    /// Node id → style for every box that is drawn differently from plain text.
    fn box_styles(&self, render: &AnnotatedRender) -> BTreeMap<BranchId, Style> {
        let dragging = self.host.reorder().map(|gesture| gesture.dragging());
        let checked = &self.workspace.view().minimize.checked;

        let mut styles = BTreeMap::new();
        for node in self.layout.nodes() {
            let id = node.id();
            let style = if dragging == Some(id) {
                self.theme.dragging_style()
            } else if self.selected.as_ref() == Some(id) {
                self.theme.selection_style()
            } else if checked.contains(id) {
                self.theme.checked_style()
            } else if render.unfocused.contains(id) {
                self.theme.unfocused_style()
            } else {
                continue;
            };
            styles.insert(id.clone(), style);
        }
        styles
    }

    fn diagram_text(&self) -> Text<'static> {
        match self.render() {
            Ok(render) => {
                let styles = self.box_styles(&render);
                Text::from(styled_lines(&render, &styles, self.theme.base_style()))
            }
            Err(err) => Text::from(Line::from(Span::styled(
                format!("render failed: {err}"),
                self.theme.error_style(),
            ))),
        }
    }

    fn footer_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(FOOTER_HINTS.to_owned(), self.theme.status_style())];
        match &self.status {
            Some(Status::Info(message)) => {
                spans.push(Span::styled(message.clone(), self.theme.base_style()))
            }
            Some(Status::Error(message)) => {
                spans.push(Span::styled(message.clone(), self.theme.error_style()))
            }
            None => {}
        }
        Line::from(spans)
    }
}

/// Splits rendered text into runs of equal style using the highlight index.
fn styled_lines(
    render: &AnnotatedRender,
    styles: &BTreeMap<BranchId, Style>,
    base: Style,
) -> Vec<Line<'static>> {
    let mut lines = render
        .text
        .split('\n')
        .map(|line| line.chars().map(|ch| (ch, base)).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    for (id, spans) in &render.highlight_index {
        let Some(style) = styles.get(id) else {
            continue;
        };
        for &(y, x0, x1) in spans {
            if let Some(cells) = lines.get_mut(y) {
                for cell in cells.iter_mut().take(x1 + 1).skip(x0) {
                    cell.1 = *style;
                }
            }
        }
    }

    lines
        .into_iter()
        .map(|cells| {
            let mut spans = Vec::new();
            let mut buf = String::new();
            let mut current = base;
            for (ch, style) in cells {
                if style != current && !buf.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut buf), current));
                }
                current = style;
                buf.push(ch);
            }
            if !buf.is_empty() {
                spans.push(Span::styled(buf, current));
            }
            Line::from(spans)
        })
        .collect()
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.size());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.title())
        .border_style(app.theme.base_style());
    app.viewport = block.inner(chunks[0]);

    let diagram = Paragraph::new(app.diagram_text())
        .style(app.theme.base_style())
        .block(block)
        .scroll((app.scroll_y, app.scroll_x));
    frame.render_widget(diagram, chunks[0]);
    frame.render_widget(Paragraph::new(app.footer_line()), chunks[1]);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
