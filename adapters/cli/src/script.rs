use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};
use noahs_ark_core::{Direction, Movement, Vec2};

/// Delimiter between a step's verb and its argument.
const VERB_DELIMITER: char = ':';

/// Single instruction of a sandbox movement script.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Step {
    /// Cardinal movement resolved by the directional stepper.
    Move(Movement),
    /// Free movement along a vector over walkable tiles.
    Vector(Vec2),
    /// Fully extended axe swing centred on a world position.
    Chop(Vec2),
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let (verb, argument) = value
            .split_once(VERB_DELIMITER)
            .with_context(|| format!("step '{value}' must look like <verb>:<argument>"))?;

        let direction = match verb.trim() {
            "up" => Direction::Up,
            "down" => Direction::Down,
            "left" => Direction::Left,
            "right" => Direction::Right,
            "vec" => return parse_point(argument).map(Self::Vector),
            "chop" => return parse_point(argument).map(Self::Chop),
            other => bail!("unknown step '{other}'"),
        };

        let distance = argument
            .trim()
            .parse::<f32>()
            .with_context(|| format!("could not parse distance '{argument}'"))?;
        if !distance.is_finite() || distance < 0.0 {
            bail!("distance '{argument}' must be a non-negative number");
        }
        Ok(Self::Move(Movement::new(direction, distance)))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(movement) => {
                let verb = match movement.direction() {
                    Direction::Up => "up",
                    Direction::Down => "down",
                    Direction::Left => "left",
                    Direction::Right => "right",
                    Direction::Invalid => "stay",
                };
                write!(f, "{verb}:{}", movement.distance())
            }
            Self::Vector(offset) => write!(f, "vec:{},{}", offset.x, offset.y),
            Self::Chop(point) => write!(f, "chop:{},{}", point.x, point.y),
        }
    }
}

/// Parses an `X,Y` pair of finite numbers.
pub(crate) fn parse_point(value: &str) -> Result<Vec2> {
    let (x, y) = value
        .split_once(',')
        .with_context(|| format!("point '{value}' must look like X,Y"))?;
    let point = Vec2::new(parse_coordinate(x, value)?, parse_coordinate(y, value)?);
    Ok(point)
}

/// Parses a `WxH` size with strictly positive dimensions.
pub(crate) fn parse_size(value: &str) -> Result<Vec2> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .with_context(|| format!("size '{value}' must look like WxH"))?;
    let size = Vec2::new(parse_coordinate(width, value)?, parse_coordinate(height, value)?);
    if size.x <= 0.0 || size.y <= 0.0 {
        bail!("size '{value}' must have positive dimensions");
    }
    Ok(size)
}

fn parse_coordinate(component: &str, whole: &str) -> Result<f32> {
    let parsed = component
        .trim()
        .parse::<f32>()
        .with_context(|| format!("could not parse '{component}' in '{whole}'"))?;
    if !parsed.is_finite() {
        bail!("'{whole}' contains a non-finite number");
    }
    Ok(parsed)
}
