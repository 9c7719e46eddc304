/// Outbound contract with the presentation layer.
///
/// Game logic never draws.  Each state transition returns the commands it
/// produced and the host feeds them to a `Presenter`.

use crate::config::GameConfig;
use crate::entities::{EntityId, EntityKind};
use crate::geometry::{Size, Vector};

#[derive(Clone, Debug, PartialEq)]
pub enum RenderCommand {
    /// A new entity needs a visual representation.
    Attach {
        id: EntityId,
        kind: EntityKind,
        size: Size,
    },
    /// Lower-left corner of the sprite, board-relative, y-up.
    Place { id: EntityId, offset: Vector },
    /// The entity is gone; drop its visual representation.
    Remove { id: EntityId },
}

impl RenderCommand {
    pub fn id(&self) -> EntityId {
        match self {
            RenderCommand::Attach { id, .. }
            | RenderCommand::Place { id, .. }
            | RenderCommand::Remove { id } => *id,
        }
    }
}

/// Named dimension handed to the presentation layer once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConstant {
    pub name: &'static str,
    pub value: f32,
}

pub fn layout_constants(config: &GameConfig) -> Vec<LayoutConstant> {
    let entries = [
        ("board-width", config.board.width),
        ("board-height", config.board.height),
        ("shooter-width", config.shooter.width),
        ("shooter-height", config.shooter.height),
        ("bullet-width", config.bullet.width),
        ("bullet-height", config.bullet.height),
    ];
    entries
        .into_iter()
        .map(|(name, value)| LayoutConstant { name, value })
        .collect()
}

pub trait Presenter {
    /// Called once before any command.
    fn layout(&mut self, constants: &[LayoutConstant]);

    fn present(&mut self, command: &RenderCommand);

    fn present_all(&mut self, commands: &[RenderCommand]) {
        for command in commands {
            self.present(command);
        }
    }
}
