//! Turning game state into terminal output.
//!
//! [`Frame::capture`] is a pure projection of the [`World`]; the `paint_*`
//! functions queue crossterm commands onto any writer and flush it.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::player::Stance;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Obstacle,
    Player,
}

impl Cell {
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Obstacle => '#',
            Cell::Player => 'O',
        }
    }
}

/// The play field plus the numbers shown under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<Vec<Cell>>,
    pub score: u32,
    pub highscore: u32,
    pub lives: u32,
}

impl Frame {
    pub fn capture(world: &World, highscore: u32) -> Self {
        let tuning = world.tuning();
        let ground = tuning.height - 1;
        let mut rows = vec![vec![Cell::Empty; tuning.width]; tuning.height];

        for (x, occupied) in world.terrain.cells().enumerate() {
            if occupied {
                rows[ground][x] = Cell::Obstacle;
            }
        }

        let y = match world.player.stance {
            Stance::Grounded => ground,
            Stance::Airborne(_) => ground - 1,
        };
        rows[y][tuning.player_column] = Cell::Player;

        Self {
            rows,
            score: world.score,
            highscore,
            lives: world.lives,
        }
    }

    pub fn status_line(&self) -> String {
        format!(
            "Score: {} | Highscore: {} | Lives: {}",
            self.score, self.highscore, self.lives
        )
    }

    /// The frame without colors, one line per row.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for row in &self.rows {
            text.extend(row.iter().map(|c| c.glyph()));
            text.push('\n');
        }
        text.push_str(&self.status_line());
        text
    }
}

fn clear(out: &mut impl Write) -> io::Result<()> {
    queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))
}

fn lines(out: &mut impl Write, text: &[&str]) -> io::Result<()> {
    for line in text {
        queue!(out, style::Print(line), style::Print("\r\n"))?;
    }
    Ok(())
}

pub fn paint_frame(out: &mut impl Write, frame: &Frame) -> io::Result<()> {
    clear(out)?;
    for row in &frame.rows {
        for &cell in row {
            match cell {
                Cell::Empty => queue!(out, style::Print(' '))?,
                Cell::Obstacle => queue!(
                    out,
                    style::PrintStyledContent('#'.with(Color::Red).attribute(Attribute::Bold))
                )?,
                Cell::Player => queue!(
                    out,
                    style::PrintStyledContent('O'.with(Color::Green).attribute(Attribute::Bold))
                )?,
            }
        }
        queue!(out, style::Print("\r\n"))?;
    }
    queue!(out, style::Print(frame.status_line()), style::Print("\r\n"))?;
    out.flush()
}

pub fn paint_menu(out: &mut impl Write) -> io::Result<()> {
    clear(out)?;
    lines(
        out,
        &[
            "=== TERMINAL JUMP ===",
            "[1] Start game",
            "[2] Show highscore",
            "[3] Quit",
        ],
    )?;
    queue!(out, style::Print("> "))?;
    out.flush()
}

pub fn paint_life_lost(out: &mut impl Write, lives: u32) -> io::Result<()> {
    let msg = format!("You lost a life, {lives} left. Get ready...");
    lines(out, &[msg.as_str()])?;
    out.flush()
}

pub fn paint_game_over(
    out: &mut impl Write,
    score: u32,
    highscore: u32,
    new_record: bool,
) -> io::Result<()> {
    clear(out)?;
    let result = if new_record {
        format!("New highscore: {score}!")
    } else {
        format!("Final score: {score} | Highscore: {highscore}")
    };
    lines(out, &["Game over!", result.as_str(), ""])?;
    queue!(out, style::Print("Press any key for the menu..."))?;
    out.flush()
}

pub fn paint_highscore(out: &mut impl Write, highscore: u32) -> io::Result<()> {
    clear(out)?;
    let msg = format!("Current highscore: {highscore}");
    lines(out, &[msg.as_str(), ""])?;
    queue!(out, style::Print("Press any key to go back..."))?;
    out.flush()
}

pub fn paint_goodbye(out: &mut impl Write) -> io::Result<()> {
    clear(out)?;
    lines(out, &["See you!"])?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;

    fn world() -> World {
        World::new(&Tuning {
            width: 8,
            height: 3,
            spawn_chance: 0.0,
            ..Tuning::default()
        })
    }

    #[test]
    fn grounded_player_and_obstacles_on_bottom_row() {
        let mut world = world();
        world.terrain.set(4, true);
        world.terrain.set(7, true);
        let frame = Frame::capture(&world, 9);
        assert_eq!(frame.to_text(), "        \n        \n O  #  #\nScore: 0 | Highscore: 9 | Lives: 3");
    }

    #[test]
    fn airborne_player_one_row_up() {
        let mut world = world();
        world.player.stance = Stance::Airborne(0);
        world.terrain.set(1, true);
        let frame = Frame::capture(&world, 0);
        assert_eq!(frame.rows[1][1], Cell::Player);
        assert_eq!(frame.rows[2][1], Cell::Obstacle);
    }

    #[test]
    fn player_covers_obstacle_in_same_cell() {
        let mut world = world();
        world.terrain.set(1, true);
        let frame = Frame::capture(&world, 0);
        assert_eq!(frame.rows[2][1], Cell::Player);
    }

    #[test]
    fn paint_colors_cells_and_ends_with_status() {
        let mut world = world();
        world.terrain.set(3, true);
        world.score = 4;
        let mut out = Vec::new();
        paint_frame(&mut out, &Frame::capture(&world, 11)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("\x1b[2J"));
        assert_eq!(text.matches('#').count(), 1);
        assert_eq!(text.matches('O').count(), 1);
        assert_eq!(text.matches("\r\n").count(), 4);
        assert!(text.ends_with("Score: 4 | Highscore: 11 | Lives: 3\r\n"));
    }

    #[test]
    fn game_over_mentions_new_record() {
        let mut out = Vec::new();
        paint_game_over(&mut out, 30, 30, true).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("New highscore: 30!"));

        let mut out = Vec::new();
        paint_game_over(&mut out, 5, 30, false).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Final score: 5 | Highscore: 30"));
    }
}
