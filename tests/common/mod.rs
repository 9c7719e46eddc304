//! Shared test helpers.
#![allow(dead_code)]

use board_shooter::entities::EntityId;
use board_shooter::render::{LayoutConstant, Presenter, RenderCommand};

/// Presenter that only remembers what it was told.
#[derive(Default)]
pub struct Recorder {
    pub layout: Vec<LayoutConstant>,
    pub commands: Vec<RenderCommand>,
}

impl Presenter for Recorder {
    fn layout(&mut self, constants: &[LayoutConstant]) {
        self.layout = constants.to_vec();
    }

    fn present(&mut self, command: &RenderCommand) {
        self.commands.push(command.clone());
    }
}

impl Recorder {
    pub fn for_entity(&self, id: EntityId) -> Vec<&RenderCommand> {
        self.commands.iter().filter(|c| c.id() == id).collect()
    }
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
