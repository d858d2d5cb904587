/// Keyboard control panel: keys to scene commands, with bounded inputs
use crossterm::event::KeyCode;
use glyph3d_core::{Axis, Command, DisplayMode, LetterId, LetterParam, SceneConfig};
use std::ops::RangeInclusive;

pub const ROTATION_STEP: f32 = 10.0;
pub const PARAM_STEP: f32 = 10.0;
pub const PARAM_RANGE: RangeInclusive<f32> = 10.0..=200.0;
pub const SCALE_STEP: f32 = 0.1;
pub const SCALE_RANGE: RangeInclusive<f32> = 0.5..=2.0;

/// What rotation keys act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Letter(LetterId),
    Camera,
}

/// Result of one key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    Apply(Command),
    /// Panel-only change; nothing to redraw in the scene
    Select,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LetterInputs {
    scale: f32,
    height: f32,
    width: f32,
    depth: f32,
}

/// Holds the current value of every bounded input so that commands always
/// carry absolute, in-range values
#[derive(Debug, Clone)]
pub struct ControlPanel {
    target: Target,
    mode: DisplayMode,
    inputs: [LetterInputs; 2],
    defaults: [LetterInputs; 2],
    default_mode: DisplayMode,
}

impl ControlPanel {
    pub fn new(config: &SceneConfig) -> Self {
        let inputs = config.letters.map(|spec| LetterInputs {
            scale: spec.scale,
            height: spec.params.height,
            width: spec.params.width,
            depth: spec.params.depth,
        });
        Self {
            target: Target::Letter(LetterId::A),
            mode: config.display_mode,
            inputs,
            defaults: inputs,
            default_mode: config.display_mode,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('1') => self.select(Target::Letter(LetterId::A)),
            KeyCode::Char('2') => self.select(Target::Letter(LetterId::B)),
            KeyCode::Char('c') | KeyCode::Char('C') => self.select(Target::Camera),
            KeyCode::Char('w') | KeyCode::Up => self.rotate(Axis::X, ROTATION_STEP),
            KeyCode::Char('s') | KeyCode::Down => self.rotate(Axis::X, -ROTATION_STEP),
            KeyCode::Char('d') | KeyCode::Right => self.rotate(Axis::Y, ROTATION_STEP),
            KeyCode::Char('a') | KeyCode::Left => self.rotate(Axis::Y, -ROTATION_STEP),
            KeyCode::Char('e') => self.rotate(Axis::Z, ROTATION_STEP),
            KeyCode::Char('r') => self.rotate(Axis::Z, -ROTATION_STEP),
            KeyCode::Char('+') | KeyCode::Char('=') => self.scale(SCALE_STEP),
            KeyCode::Char('-') => self.scale(-SCALE_STEP),
            KeyCode::Char('h') => self.param(LetterParam::Height, -PARAM_STEP),
            KeyCode::Char('H') => self.param(LetterParam::Height, PARAM_STEP),
            KeyCode::Char('j') => self.param(LetterParam::Width, -PARAM_STEP),
            KeyCode::Char('J') => self.param(LetterParam::Width, PARAM_STEP),
            KeyCode::Char('k') => self.param(LetterParam::Depth, -PARAM_STEP),
            KeyCode::Char('K') => self.param(LetterParam::Depth, PARAM_STEP),
            KeyCode::Char('x') | KeyCode::Char('X') => {
                Action::Apply(Command::ToggleMirror(Axis::X))
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                Action::Apply(Command::ToggleMirror(Axis::Y))
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.mode = self.mode.next();
                Action::Apply(Command::SetDisplayMode(self.mode))
            }
            KeyCode::Char('0') => {
                self.inputs = self.defaults;
                self.mode = self.default_mode;
                Action::Apply(Command::Reset)
            }
            _ => Action::Ignore,
        }
    }

    fn select(&mut self, target: Target) -> Action {
        self.target = target;
        Action::Select
    }

    fn rotate(&self, axis: Axis, degrees: f32) -> Action {
        let command = match self.target {
            Target::Letter(letter) => Command::RotateLetter {
                letter,
                axis,
                degrees,
            },
            Target::Camera => Command::RotateCamera { axis, degrees },
        };
        Action::Apply(command)
    }

    fn scale(&mut self, delta: f32) -> Action {
        let Target::Letter(letter) = self.target else {
            return Action::Ignore;
        };
        let inputs = &mut self.inputs[letter.index()];
        inputs.scale = clamp(inputs.scale + delta, &SCALE_RANGE);
        Action::Apply(Command::ScaleLetter {
            letter,
            factor: inputs.scale,
        })
    }

    fn param(&mut self, param: LetterParam, delta: f32) -> Action {
        let Target::Letter(letter) = self.target else {
            return Action::Ignore;
        };
        let inputs = &mut self.inputs[letter.index()];
        let slot = match param {
            LetterParam::Height => &mut inputs.height,
            LetterParam::Width => &mut inputs.width,
            LetterParam::Depth => &mut inputs.depth,
        };
        *slot = clamp(*slot + delta, &PARAM_RANGE);
        Action::Apply(Command::SetLetterParam {
            letter,
            param,
            value: *slot,
        })
    }
}

fn clamp(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}
