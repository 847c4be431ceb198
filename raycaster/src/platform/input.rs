use macroquad::prelude::*;
use raycore::{Cell, FrameInput, Turn, Walk};

/// Forward wins when both directions are held.
fn walk_from(forward: bool, backward: bool) -> Walk {
    if forward {
        Walk::Forward
    } else if backward {
        Walk::Backward
    } else {
        Walk::Still
    }
}

/// Left wins when both directions are held.
fn turn_from(left: bool, right: bool) -> Turn {
    if left {
        Turn::Left
    } else if right {
        Turn::Right
    } else {
        Turn::None
    }
}

fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

fn paint_from(paint_held: bool, erase_modifier: bool) -> Option<Cell> {
    match (paint_held, erase_modifier) {
        (false, _) => None,
        (true, false) => Some(Cell::Wall),
        (true, true) => Some(Cell::Empty),
    }
}

/// Reads keyboard and mouse state for this frame. Mouse buttons are ignored
/// while the pointer is captured by the UI.
pub fn poll_input(pointer_captured: bool) -> FrameInput {
    let quit = is_quit_requested() || is_key_pressed(KeyCode::Escape);

    let forward = is_key_down(KeyCode::W);
    let backward = is_key_down(KeyCode::S);
    let left = is_key_down(KeyCode::A);
    let right = is_key_down(KeyCode::D);
    let shift = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);

    let (toggle_aim, paint) = if pointer_captured {
        (false, None)
    } else {
        (
            is_mouse_button_pressed(MouseButton::Left),
            paint_from(is_mouse_button_down(MouseButton::Right), shift),
        )
    };

    FrameInput {
        quit,
        walk: walk_from(forward, backward),
        turn: turn_from(is_key_down(KeyCode::Left), is_key_down(KeyCode::Right)),
        nudge: (axis(left, right), axis(forward, backward)),
        pointer: mouse_position(),
        toggle_aim,
        paint,
    }
}
