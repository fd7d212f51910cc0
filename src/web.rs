//! Browser shell: the dashboard rendered into the DOM by ratzilla.

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use crate::agency::rules::RuleSet;
use crate::agency::AgencyGame;
use crate::input::{pixel_to_cell, ClickState, InputEvent};

/// Map a page-level pointer position onto a grid cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let document = web_sys::window()?.document()?;

    // DomBackend renders the grid into a <div> directly under <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_to_cell(mouse_x as f64 - rect.left(), rect.width(), cs.cols);
    let row = pixel_to_cell(mouse_y as f64 - rect.top(), rect.height(), cs.rows);

    web_sys::console::log_1(
        &format!(
            "click: x={mouse_x} y={mouse_y} cell={col:?},{row:?} targets={}",
            cs.targets.len()
        )
        .into(),
    );

    Some((col?, row?))
}

pub fn run(rules: RuleSet) -> io::Result<()> {
    let game = Rc::new(RefCell::new(AgencyGame::new(rules)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                if cs.rows == 0 || cs.cols == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(action_id) = action {
                game.borrow_mut()
                    .handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let key = match key_event.code {
                KeyCode::Char(c) => c.to_ascii_lowercase(),
                KeyCode::Esc => 'q',
                _ => return,
            };
            game.borrow_mut().handle_input(&InputEvent::Key(key));
        }
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        click_state.borrow_mut().reset(area);

        let mut game = game.borrow_mut();
        let show_banner = game.banner_visible(js_sys::Date::now());
        game.render(show_banner, f, area, &click_state);
    });

    Ok(())
}
