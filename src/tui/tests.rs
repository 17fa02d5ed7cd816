// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::{Rect, Style};
use ratatui::style::Modifier;

use super::theme::TuiTheme;
use super::{gesture_context, styled_lines, App, Status};
use crate::layout::{Rect as LayoutRect, ValidationPolicy};
use crate::model::fixtures::bid;
use crate::model::{demo_forest, SiblingKey};
use crate::render::AnnotatedRender;
use crate::store::{ForestDocument, Workspace};

fn demo_app() -> App {
    let workspace =
        Workspace::in_memory(ForestDocument::from_forest(&demo_forest()), None).expect("workspace");
    let mut app =
        App::new(workspace, ValidationPolicy::Strict, TuiTheme::default()).expect("app");
    app.viewport = Rect::new(0, 0, 240, 80);
    app
}

fn rendered(app: &App, id: &str) -> LayoutRect {
    let ctx = gesture_context(&app.layout, &app.workspace, &app.metrics);
    let offsets = app.host.offsets(&ctx);
    offsets.rendered_rect(app.layout.node(id).expect("node"))
}

fn separator(app: &App) -> LayoutRect {
    let ctx = gesture_context(&app.layout, &app.workspace, &app.metrics);
    app.host.offsets(&ctx).separator().expect("separator")
}

fn cell(value: f64) -> u16 {
    value.floor() as u16
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

#[test]
fn dragging_a_top_border_reorders_root_siblings() {
    let mut app = demo_app();
    assert_eq!(
        app.layout.root_siblings(),
        [bid("develop"), bid("feature/billing"), bid("fix/typo"), bid("spike/cache")]
    );

    let rect = rendered(&app, "fix/typo");
    app.handle_mouse(mouse(
        MouseEventKind::Down(MouseButton::Left),
        cell(rect.x) + 1,
        cell(rect.y),
    ));
    assert!(app.host.reorder().is_some());

    for _ in 0..3 {
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 0, cell(rect.y)));
    }
    assert_eq!(app.host.reorder().map(|gesture| gesture.insert_index()), Some(0));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 0, cell(rect.y)));

    let expected = [bid("fix/typo"), bid("develop"), bid("feature/billing"), bid("spike/cache")];
    assert!(app.host.is_idle());
    let key = SiblingKey::Parent(bid("main"));
    assert_eq!(app.workspace.view().sibling_order.get(&key), Some(&expected[..]));
    assert_eq!(app.layout.root_siblings(), expected);
}

#[test]
fn dragging_the_separator_unfocuses_root_subtrees() {
    let mut app = demo_app();
    let rule = separator(&app);
    let row = cell(rule.y) + 1;
    app.handle_mouse(mouse(
        MouseEventKind::Down(MouseButton::Left),
        cell(rule.center_x()),
        row,
    ));
    assert!(app.host.separator().is_some());

    for _ in 0..5 {
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 0, row));
    }
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 0, row));

    assert_eq!(app.workspace.view().focus_separator_index, Some(0));
    let render = app.render().expect("render");
    assert!(render.unfocused.contains(&bid("develop")));
    assert!(render.unfocused.contains(&bid("feature/auth-ui")));
    assert!(!render.unfocused.contains(&bid("main")));
}

#[test]
fn dragging_a_body_onto_another_node_reparents() {
    let mut app = demo_app();
    let source = rendered(&app, "spike/cache");
    let target = rendered(&app, "fix/typo");

    app.handle_mouse(mouse(
        MouseEventKind::Down(MouseButton::Left),
        cell(source.x) + 2,
        cell(source.y) + 1,
    ));
    assert!(app.host.link().is_some());
    app.handle_mouse(mouse(
        MouseEventKind::Drag(MouseButton::Left),
        cell(target.x) + 2,
        cell(target.y) + 1,
    ));
    app.handle_mouse(mouse(
        MouseEventKind::Up(MouseButton::Left),
        cell(target.x) + 2,
        cell(target.y) + 1,
    ));

    assert_eq!(app.layout.children_of("fix/typo"), [bid("spike/cache")]);
    assert!(!app.layout.root_siblings().contains(&bid("spike/cache")));
    assert_eq!(
        app.status,
        Some(Status::Info("spike/cache now branches from fix/typo".to_owned()))
    );
}

#[test]
fn releasing_a_link_on_empty_canvas_changes_nothing() {
    let mut app = demo_app();
    let source = rendered(&app, "fix/typo");
    let edges_before = app.workspace.document().edges.clone();

    app.handle_mouse(mouse(
        MouseEventKind::Down(MouseButton::Left),
        cell(source.x) + 2,
        cell(source.y) + 1,
    ));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0));

    assert!(app.host.is_idle());
    assert_eq!(app.workspace.document().edges, edges_before);
    assert_eq!(app.status, None);
}

#[test]
fn pointer_down_outside_the_viewport_is_ignored() {
    let mut app = demo_app();
    app.viewport = Rect::new(10, 5, 20, 10);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 2));
    assert!(app.host.is_idle());
}

#[test]
fn keys_select_mark_filter_and_quit() {
    let mut app = demo_app();

    press(&mut app, KeyCode::Char('m'));
    assert!(matches!(app.status, Some(Status::Info(_))));

    press(&mut app, KeyCode::Tab);
    let first = app.selected.clone().expect("selected");
    assert!(!app.layout.node(first.as_str()).expect("node").is_tentative());
    press(&mut app, KeyCode::BackTab);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.selected.as_ref(), Some(&first));

    press(&mut app, KeyCode::Char('m'));
    assert_eq!(app.workspace.view().minimize.checked, BTreeSet::from([first.clone()]));

    press(&mut app, KeyCode::Char('f'));
    assert!(app.workspace.view().minimize.filter_enabled);

    press(&mut app, KeyCode::Left);
    press(&mut app, KeyCode::Down);
    assert_eq!((app.scroll_x, app.scroll_y), (0, 1));

    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[test]
fn keys_are_ignored_while_a_gesture_runs() {
    let mut app = demo_app();
    let rule = separator(&app);
    app.handle_mouse(mouse(
        MouseEventKind::Down(MouseButton::Left),
        cell(rule.center_x()),
        cell(rule.y) + 1,
    ));

    press(&mut app, KeyCode::Char('q'));
    assert!(!app.should_quit);
}

#[test]
fn selected_box_is_styled() {
    let mut app = demo_app();
    app.selected = Some(bid("main"));
    let selection = app.theme.selection_style();

    let text = app.diagram_text();
    let styled = text
        .lines
        .iter()
        .flat_map(|line| line.spans.iter())
        .filter(|span| span.style == selection)
        .map(|span| span.content.to_string())
        .collect::<String>();
    assert!(styled.contains("main"));
}

#[test]
fn styled_lines_split_runs_at_highlight_edges() {
    let render = AnnotatedRender {
        text: "ab┌─┐\n  └─┘".to_owned(),
        highlight_index: BTreeMap::from([(bid("x"), vec![(0, 2, 4), (1, 2, 4)])]),
        unfocused: BTreeSet::new(),
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = styled_lines(&render, &BTreeMap::from([(bid("x"), bold)]), Style::default());

    assert_eq!(lines.len(), 2);
    let first = lines[0]
        .spans
        .iter()
        .map(|span| (span.content.to_string(), span.style))
        .collect::<Vec<_>>();
    assert_eq!(first, vec![("ab".to_owned(), Style::default()), ("┌─┐".to_owned(), bold)]);
    assert_eq!(lines[1].spans.len(), 2);
}
