//! Immediate-mode scene building
//!
//! Turns a `GameState` into an ordered list of draw commands. The whole
//! canvas is redrawn every frame, back to front.

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::sim::{GamePhase, GameState};

pub const CREDITS: &str = "Made by MJK, OFSJ, CJSK.";

/// Image assets referenced by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// 20px black, left aligned
    Hud,
    /// 50px red banner
    Banner,
}

/// One primitive for the canvas backend
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Image {
        sprite: Sprite,
        pos: Vec2,
        size: Vec2,
    },
    /// Black center fading to transparent at the rim
    BlackHole { center: Vec2, radius: f32 },
    /// Bell plus trailing tentacles; `sway` is the wobble phase
    Jellyfish { pos: Vec2, size: f32, sway: f32 },
    Text {
        text: String,
        pos: Vec2,
        style: TextStyle,
    },
}

/// Build the full frame for the current state
pub fn build(state: &GameState) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(state.jellyfish.len() + 8);

    cmds.push(DrawCmd::Image {
        sprite: Sprite::Background,
        pos: Vec2::ZERO,
        size: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
    });

    cmds.push(DrawCmd::BlackHole {
        center: state.black_hole.center,
        radius: state.black_hole.radius,
    });

    for jelly in &state.jellyfish {
        cmds.push(DrawCmd::Jellyfish {
            pos: jelly.pos,
            size: jelly.size,
            sway: jelly.drift.wobble.phase,
        });
    }

    if player_visible(state) {
        cmds.push(DrawCmd::Image {
            sprite: Sprite::Player,
            pos: state.player.pos,
            size: Vec2::splat(state.player.size),
        });
    }

    cmds.push(hud(format!("Score: {}", state.player.score), Vec2::new(10.0, 20.0)));
    cmds.push(hud(
        format!("Lives: {}", state.player.lives),
        Vec2::new(CANVAS_WIDTH - 100.0, 20.0),
    ));
    cmds.push(hud(CREDITS.to_string(), Vec2::new(CANVAS_WIDTH / 2.0 - 150.0, 50.0)));

    let banner_pos = Vec2::new(CANVAS_WIDTH / 2.0 - 150.0, CANVAS_HEIGHT / 2.0);
    match state.phase {
        GamePhase::GameOver(blink) if blink.visible() => {
            cmds.push(DrawCmd::Text {
                text: "Game Over!".to_string(),
                pos: banner_pos,
                style: TextStyle::Banner,
            });
        }
        _ if state.paused => {
            cmds.push(DrawCmd::Text {
                text: "Paused".to_string(),
                pos: banner_pos,
                style: TextStyle::Banner,
            });
        }
        _ => {}
    }

    cmds
}

/// The sprite is hidden on odd toggles while flashing and during game over
fn player_visible(state: &GameState) -> bool {
    match state.phase {
        GamePhase::Playing => true,
        GamePhase::Flashing(blink) => blink.visible(),
        GamePhase::GameOver(_) => false,
    }
}

fn hud(text: String, pos: Vec2) -> DrawCmd {
    DrawCmd::Text {
        text,
        pos,
        style: TextStyle::Hud,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{TickInput, tick};
    use crate::tuning::Tuning;

    fn has_player(cmds: &[DrawCmd]) -> bool {
        cmds.iter().any(|c| {
            matches!(
                c,
                DrawCmd::Image {
                    sprite: Sprite::Player,
                    ..
                }
            )
        })
    }

    fn has_text(cmds: &[DrawCmd], needle: &str) -> bool {
        cmds.iter()
            .any(|c| matches!(c, DrawCmd::Text { text, .. } if text == needle))
    }

    #[test]
    fn test_draw_order() {
        let state = GameState::new(1, Tuning::default());
        let cmds = build(&state);
        assert!(matches!(
            cmds[0],
            DrawCmd::Image {
                sprite: Sprite::Background,
                ..
            }
        ));
        assert!(matches!(cmds[1], DrawCmd::BlackHole { .. }));
        let jellies = cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Jellyfish { .. }))
            .count();
        assert_eq!(jellies, JELLYFISH_COUNT);
        let player_idx = cmds.iter().position(|c| {
            matches!(
                c,
                DrawCmd::Image {
                    sprite: Sprite::Player,
                    ..
                }
            )
        });
        let first_text = cmds.iter().position(|c| matches!(c, DrawCmd::Text { .. }));
        assert!(player_idx < first_text);
    }

    #[test]
    fn test_hud_text() {
        let mut state = GameState::new(1, Tuning::default());
        state.player.score = 35;
        state.player.lives = 2;
        let cmds = build(&state);
        assert!(has_text(&cmds, "Score: 35"));
        assert!(has_text(&cmds, "Lives: 2"));
        assert!(has_text(&cmds, CREDITS));
        assert!(!has_text(&cmds, "Paused"));
    }

    #[test]
    fn test_player_blinks_while_flashing() {
        let mut state = GameState::new(2, Tuning::default());
        state.black_hole.center = Vec2::new(60.0, 60.0);
        state.start_flashing();
        let mut visibility = Vec::new();
        for _ in 0..FLASH_INTERVAL_TICKS * FLASH_TOGGLES {
            visibility.push(has_player(&build(&state)));
            tick(&mut state, &TickInput::default());
        }
        // Visible for the first interval, hidden for the second
        let interval = FLASH_INTERVAL_TICKS as usize;
        assert!(visibility[..interval].iter().all(|v| *v));
        assert!(visibility[interval..2 * interval].iter().all(|v| !*v));
        assert!(has_player(&build(&state)));
    }

    #[test]
    fn test_game_over_banner_blinks() {
        let mut state = GameState::new(3, Tuning::default());
        state.start_game_over();
        assert!(has_text(&build(&state), "Game Over!"));
        for _ in 0..GAME_OVER_INTERVAL_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert!(!has_text(&build(&state), "Game Over!"));
        assert!(!has_player(&build(&state)));
    }

    #[test]
    fn test_paused_overlay() {
        let mut state = GameState::new(4, Tuning::default());
        state.paused = true;
        let cmds = build(&state);
        assert!(has_text(&cmds, "Paused"));
        assert!(has_player(&cmds));
    }
}
