//! Single-key operator commands.

use crossterm::event::KeyCode;
use tracing::debug;
use wormsim_world::Arena;

use crate::pacer::Pacer;

/// Something the operator asked for with one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `Esc`: end the current run.
    EndRun,
    /// `space`: pause or resume.
    TogglePause,
    /// `+`: shorten the delay between steps.
    Faster,
    /// `-`: lengthen the delay between steps.
    Slower,
    /// `f`: no delay between steps.
    FullSpeed,
    /// `w`: add a random worm.
    AddWorm,
    /// `s`: highlight the next living worm.
    HighlightNext,
    /// `k`: kill the highlighted worm.
    KillHighlighted,
}

impl Command {
    /// The command bound to `code`, if any.
    pub const fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Esc => Some(Self::EndRun),
            KeyCode::Char(' ') => Some(Self::TogglePause),
            KeyCode::Char('+') => Some(Self::Faster),
            KeyCode::Char('-') => Some(Self::Slower),
            KeyCode::Char('f') => Some(Self::FullSpeed),
            KeyCode::Char('w') => Some(Self::AddWorm),
            KeyCode::Char('s') => Some(Self::HighlightNext),
            KeyCode::Char('k') => Some(Self::KillHighlighted),
            _ => None,
        }
    }

    /// Carry out the command. Returns `true` if the run should end.
    pub fn apply(self, pacer: &mut Pacer, arena: &mut Arena) -> bool {
        debug!(command = ?self, "operator command");
        match self {
            Self::EndRun => return true,
            Self::TogglePause => pacer.toggle_pause(),
            Self::Faster => pacer.faster(),
            Self::Slower => pacer.slower(),
            Self::FullSpeed => pacer.full_speed(),
            Self::AddWorm => {
                arena.create_worm();
                arena.refresh_screen();
            }
            Self::HighlightNext => {
                arena.highlight_next();
            }
            Self::KillHighlighted => {
                arena.kill_highlighted();
            }
        }
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wormsim_agents::WormKind;
    use wormsim_core::config::PacingConfig;
    use wormsim_types::{BoardSize, Position};

    fn setup() -> (Pacer, Arena) {
        (
            Pacer::new(&PacingConfig::default()),
            Arena::new(BoardSize::clamped(10, 10), Some(9)),
        )
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(Command::from_key(KeyCode::Esc), Some(Command::EndRun));
        assert_eq!(Command::from_key(KeyCode::Char('+')), Some(Command::Faster));
        assert_eq!(Command::from_key(KeyCode::Char('k')), Some(Command::KillHighlighted));
        assert_eq!(Command::from_key(KeyCode::Char('q')), None);
        assert_eq!(Command::from_key(KeyCode::Enter), None);
    }

    #[test]
    fn only_escape_ends_the_run() {
        let (mut pacer, mut arena) = setup();
        assert!(Command::EndRun.apply(&mut pacer, &mut arena));
        assert!(!Command::TogglePause.apply(&mut pacer, &mut arena));
        assert!(pacer.is_paused());
    }

    #[test]
    fn speed_commands_adjust_pacer() {
        let (mut pacer, mut arena) = setup();
        Command::Slower.apply(&mut pacer, &mut arena);
        assert_eq!(pacer.slowness_ms(), 110);
        Command::Faster.apply(&mut pacer, &mut arena);
        Command::Faster.apply(&mut pacer, &mut arena);
        assert_eq!(pacer.slowness_ms(), 0);
        pacer.set_slowness(500);
        Command::FullSpeed.apply(&mut pacer, &mut arena);
        assert_eq!(pacer.slowness_ms(), 0);
    }

    #[test]
    fn add_worm_appears_on_screen() {
        let (mut pacer, mut arena) = setup();
        Command::AddWorm.apply(&mut pacer, &mut arena);
        assert_eq!(arena.kinds().total(), 1);
        let head = arena.worm(0).unwrap().head().position;
        assert!(!arena.screen().get(head).is_some_and(|c| c.is_carrot()));
    }

    #[test]
    fn highlight_then_kill() {
        let (mut pacer, mut arena) = setup();
        arena.spawn_worm(WormKind::Cannibal, "hi", Position::new(1, 1));

        Command::HighlightNext.apply(&mut pacer, &mut arena);
        assert_eq!(arena.highlighted(), Some(0));
        Command::KillHighlighted.apply(&mut pacer, &mut arena);
        assert_eq!(arena.kinds().total(), 0);
    }
}
