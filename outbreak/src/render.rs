use std::{
    io::Write,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use outbreak_core::{world::commons::HealthType, World};

/// Full-screen grid view: one glyph per agent, colored by health, with a
/// status line below the field. Takes over the terminal on creation and
/// restores it on drop.
pub struct Screen<W: Write> {
    out: W,
}

impl<W: Write> Screen<W> {
    pub fn new(mut out: W) -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { out })
    }

    pub fn draw(&mut self, world: &World) -> Result<()> {
        let day = world.runtime_params.day;
        queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        for agent in world.agents() {
            let (glyph, color) = style(agent.health(day));
            queue!(
                self.out,
                cursor::MoveTo((agent.pt.x - 1) as u16, (agent.pt.y - 1) as u16),
                SetForegroundColor(color),
                Print(glyph),
            )?;
        }
        let cnt = world.health_count;
        queue!(
            self.out,
            cursor::MoveTo(0, world.world_params.field_height as u16),
            ResetColor,
            Print(format!(
                "day {day}  infected {}  recovered {}  dead {}  (q to stop)",
                cnt.infected, cnt.recovered, cnt.dead
            )),
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// Sleeps through the inter-frame interval, returning true if the user
    /// asked to stop (q, Esc or ctrl-c).
    pub fn wait_for_quit(&mut self, interval: Duration) -> Result<bool> {
        let deadline = Instant::now() + interval;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(false);
            }
            if event::poll(deadline - now)? {
                if let Event::Key(key) = event::read()? {
                    let ctrl_c = key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL);
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) || ctrl_c {
                        return Ok(true);
                    }
                }
            }
        }
    }
}

impl<W: Write> Drop for Screen<W> {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn style(health: HealthType) -> (char, Color) {
    match health {
        HealthType::Infected => ('*', Color::Red),
        HealthType::Recovered => ('*', Color::Green),
        HealthType::Dead => ('+', Color::DarkGrey),
        HealthType::Healthy => ('*', Color::White),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_colors() {
        assert_eq!(style(HealthType::Infected), ('*', Color::Red));
        assert_eq!(style(HealthType::Recovered), ('*', Color::Green));
        assert_eq!(style(HealthType::Dead), ('+', Color::DarkGrey));
        assert_eq!(style(HealthType::Healthy), ('*', Color::White));
    }
}
