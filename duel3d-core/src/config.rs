/// Parser for the `duel3d.conf` settings file
///
/// ```text
/// # comment
/// [rules]
/// attack_distance = 0.2
/// resolve_delay_ms = 2000
/// [camera]
/// eye = 1.0 1.0 2.0
/// [viewer]
/// mode = perspective
/// [bindings]
/// ArrowLeft = player1.left
/// ```
///
/// Keys left out keep their defaults. A `[bindings]` section replaces the
/// default key map instead of extending it.
use std::str::FromStr;
use std::time::Duration;

use nom::{
    branch::alt,
    bytes::complete::{take_till1, take_while1},
    character::complete::{char, space0, space1, u64 as integer},
    combinator::{all_consuming, map, rest},
    number::complete::float,
    sequence::{delimited, separated_pair, tuple},
    IResult,
};

use crate::arena::{Binding, KeyBindings, Rules};
use crate::projection::{Camera, ClipVolume, ProjectionMode};
use crate::vector::Vector;
use crate::viewer::ViewerSettings;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("line {line}: cannot parse `{text}`")]
    Syntax { line: usize, text: String },
    #[error("line {line}: unknown section [{name}]")]
    UnknownSection { line: usize, name: String },
    #[error("line {line}: `{key}` is not inside a section")]
    OutsideSection { line: usize, key: String },
    #[error("line {line}: unknown key `{key}` in [{section}]")]
    UnknownKey {
        line: usize,
        section: &'static str,
        key: String,
    },
    #[error("line {line}: invalid value `{value}` for `{key}`")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
}

/// Everything the frontends can tune
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub rules: Rules,
    pub bindings: KeyBindings,
    pub camera: Camera,
    pub clip: ClipVolume,
    pub viewer: ViewerSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Rules,
    Camera,
    Viewer,
    Bindings,
}

impl Section {
    fn name(self) -> &'static str {
        match self {
            Section::Rules => "rules",
            Section::Camera => "camera",
            Section::Viewer => "viewer",
            Section::Bindings => "bindings",
        }
    }
}

#[derive(Debug, PartialEq)]
enum Line<'a> {
    Section(&'a str),
    Entry(&'a str, &'a str),
}

fn section(input: &str) -> IResult<&str, &str> {
    delimited(
        char('['),
        delimited(space0, take_while1(|c: char| c.is_alphanumeric() || c == '_'), space0),
        char(']'),
    )(input)
}

fn entry(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        take_till1(|c: char| c == '=' || c.is_whitespace()),
        delimited(space0, char('='), space0),
        rest,
    )(input)
}

fn line(input: &str) -> IResult<&str, Line<'_>> {
    alt((map(section, Line::Section), map(entry, |(k, v)| Line::Entry(k, v))))(input)
}

fn vector(input: &str) -> IResult<&str, Vector> {
    map(
        tuple((float, space1, float, space1, float)),
        |(x, _, y, _, z)| [x, y, z],
    )(input)
}

/// Run `parser` over the whole of `value`
fn parse_value<'a, T>(
    parser: impl FnMut(&'a str) -> IResult<&'a str, T>,
    value: &'a str,
) -> Option<T> {
    all_consuming(parser)(value).ok().map(|(_, v)| v)
}

impl Config {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let mut current: Option<Section> = None;
        // last ring_limit or start_player* entry, blamed if the starts do not fit
        let mut placement: Option<(usize, String, String)> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let parsed = all_consuming(line)(trimmed)
                .map(|(_, parsed)| parsed)
                .map_err(|_| ConfigError::Syntax {
                    line: line_no,
                    text: trimmed.to_string(),
                })?;

            match parsed {
                Line::Section(name) => {
                    let section = match name {
                        "rules" => Section::Rules,
                        "camera" => Section::Camera,
                        "viewer" => Section::Viewer,
                        "bindings" => Section::Bindings,
                        _ => {
                            return Err(ConfigError::UnknownSection {
                                line: line_no,
                                name: name.to_string(),
                            })
                        }
                    };
                    if section == Section::Bindings {
                        config.bindings = KeyBindings::empty();
                    }
                    current = Some(section);
                }
                Line::Entry(key, value) => {
                    let section = current.ok_or_else(|| ConfigError::OutsideSection {
                        line: line_no,
                        key: key.to_string(),
                    })?;
                    let value = value.trim_end();
                    config.apply(section, line_no, key, value)?;
                    if section == Section::Rules
                        && matches!(key, "ring_limit" | "start_player1" | "start_player2")
                    {
                        placement = Some((line_no, key.to_string(), value.to_string()));
                    }
                }
            }
        }

        if let Some((line, key, value)) = placement {
            if !config.rules.starts_fit() {
                return Err(ConfigError::InvalidValue { line, key, value });
            }
        }
        Ok(config)
    }

    fn apply(&mut self, section: Section, line: usize, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            line,
            key: key.to_string(),
            value: value.to_string(),
        };
        let unknown = || ConfigError::UnknownKey {
            line,
            section: section.name(),
            key: key.to_string(),
        };
        let number = || parse_value(float, value).ok_or_else(invalid);
        let length = || number().and_then(|n| if n >= 0.0 { Ok(n) } else { Err(invalid()) });
        let point = || parse_value(vector, value).ok_or_else(invalid);

        match section {
            Section::Rules => {
                let rules = &mut self.rules;
                match key {
                    "attack_distance" => rules.attack_distance = length()?,
                    "push_distance" => rules.push_distance = length()?,
                    "push_step" => rules.push_step = length()?,
                    "move_step" => rules.move_step = length()?,
                    "ring_limit" => {
                        let limit = number()?;
                        if limit.is_nan() || limit <= 0.0 {
                            return Err(invalid());
                        }
                        rules.ring_limit = limit;
                    }
                    "start_player1" => rules.start_positions[0] = number()?,
                    "start_player2" => rules.start_positions[1] = number()?,
                    "max_health" => {
                        let health = parse_value(integer, value).ok_or_else(invalid)?;
                        rules.max_health = u32::try_from(health).map_err(|_| invalid())?;
                    }
                    "resolve_delay_ms" => {
                        let millis = parse_value(integer, value).ok_or_else(invalid)?;
                        rules.resolve_delay = Duration::from_millis(millis);
                    }
                    _ => return Err(unknown()),
                }
            }
            Section::Camera => match key {
                "eye" => self.camera.eye = point()?,
                "reference" => self.camera.reference = point()?,
                "up" => self.camera.up = point()?,
                "x_min" => self.clip.x_min = number()?,
                "x_max" => self.clip.x_max = number()?,
                "y_min" => self.clip.y_min = number()?,
                "y_max" => self.clip.y_max = number()?,
                "z_near" => self.clip.z_near = number()?,
                "z_far" => self.clip.z_far = number()?,
                _ => return Err(unknown()),
            },
            Section::Viewer => match key {
                "spin" => self.viewer.spin = number()?,
                "mode" => {
                    self.viewer.mode = match value {
                        "orthographic" => ProjectionMode::Orthographic,
                        "perspective" => ProjectionMode::Perspective,
                        _ => return Err(invalid()),
                    }
                }
                _ => return Err(unknown()),
            },
            Section::Bindings => {
                let binding: Binding = value.parse().map_err(|_| invalid())?;
                self.bindings.bind(key, binding.side, binding.command);
            }
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Config::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Command, Side};

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(
            Config::parse("# nothing here\n\n   \n").unwrap(),
            Config::default()
        );
    }

    #[test]
    fn test_parse_all_sections() {
        let text = "
            [rules]
            attack_distance = 0.25
            ring_limit=0.9
            max_health = 50
            resolve_delay_ms = 1500

            [ camera ]
            eye = 0.0 2.0 4.5
            z_far = -40

            [viewer]
            mode = perspective
            spin = 2.5

            [bindings]
            j = player1.left
            ArrowUp = player2.attack
        ";
        let config: Config = text.parse().unwrap();
        assert_eq!(config.rules.attack_distance, 0.25);
        assert_eq!(config.rules.ring_limit, 0.9);
        assert_eq!(config.rules.max_health, 50);
        assert_eq!(config.rules.resolve_delay, Duration::from_millis(1500));
        assert_eq!(config.rules.push_distance, Rules::default().push_distance);
        assert_eq!(config.camera.eye, [0.0, 2.0, 4.5]);
        assert_eq!(config.clip.z_far, -40.0);
        assert_eq!(config.viewer.mode, ProjectionMode::Perspective);
        assert_eq!(config.viewer.spin, 2.5);

        assert_eq!(config.bindings.iter().count(), 2);
        let binding = config.bindings.lookup("ArrowUp").unwrap();
        assert_eq!(binding.side, Side::Two);
        assert_eq!(binding.command, Command::Attack);
        assert!(config.bindings.lookup("a").is_none());
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        assert_eq!(
            Config::parse("[rules]\nattack_distance = far"),
            Err(ConfigError::InvalidValue {
                line: 2,
                key: "attack_distance".into(),
                value: "far".into(),
            })
        );
        assert_eq!(
            Config::parse("\n\n[physics]"),
            Err(ConfigError::UnknownSection {
                line: 3,
                name: "physics".into(),
            })
        );
        assert_eq!(
            Config::parse("[camera]\nfov = 45"),
            Err(ConfigError::UnknownKey {
                line: 2,
                section: "camera",
                key: "fov".into(),
            })
        );
        assert!(matches!(
            Config::parse("eye = 1 2 3"),
            Err(ConfigError::OutsideSection { line: 1, .. })
        ));
        assert!(matches!(
            Config::parse("[rules"),
            Err(ConfigError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn test_vector_needs_three_components() {
        assert!(Config::parse("[camera]\nup = 0 1").is_err());
        assert!(Config::parse("[camera]\nup = 0 1 0 1").is_err());
        assert!(Config::parse("[bindings]\nq = player1.fly").is_err());
        assert!(Config::parse("[rules]\nmax_health = -3").is_err());
    }

    fn invalid(line: usize, key: &str, value: &str) -> Result<Config, ConfigError> {
        Err(ConfigError::InvalidValue {
            line,
            key: key.into(),
            value: value.into(),
        })
    }

    #[test]
    fn test_ring_limit_must_be_positive() {
        assert_eq!(Config::parse("[rules]\nring_limit = -0.5"), invalid(2, "ring_limit", "-0.5"));
        assert_eq!(Config::parse("[rules]\nring_limit = 0"), invalid(2, "ring_limit", "0"));
    }

    #[test]
    fn test_ring_limit_rejects_nan() {
        assert_eq!(Config::parse("[rules]\nring_limit = nan"), invalid(2, "ring_limit", "nan"));
    }

    #[test]
    fn test_swapped_starts_rejected() {
        assert_eq!(
            Config::parse("[rules]\nstart_player1 = 0.6\nstart_player2 = -0.6"),
            invalid(3, "start_player2", "-0.6")
        );
    }

    #[test]
    fn test_start_outside_ring_rejected() {
        assert_eq!(
            Config::parse("[rules]\nstart_player2 = 0.9"),
            invalid(2, "start_player2", "0.9")
        );
        // shrinking the ring under the default starts blames the ring
        assert_eq!(
            Config::parse("[rules]\nring_limit = 0.4"),
            invalid(2, "ring_limit", "0.4")
        );
        // a later entry can make earlier ones fit again
        let config = Config::parse("[rules]\nstart_player2 = 0.9\nring_limit = 1.0").unwrap();
        assert_eq!(config.rules.start_positions, [-0.5, 0.9]);
    }

    #[test]
    fn test_negative_distance_rejected() {
        assert_eq!(
            Config::parse("[rules]\nattack_distance = -0.2"),
            invalid(2, "attack_distance", "-0.2")
        );
        assert_eq!(
            Config::parse("[rules]\npush_distance = -0.08"),
            invalid(2, "push_distance", "-0.08")
        );
    }

    #[test]
    fn test_negative_step_rejected() {
        assert_eq!(Config::parse("[rules]\npush_step = -0.015"), invalid(2, "push_step", "-0.015"));
        assert_eq!(Config::parse("[rules]\nmove_step = -1"), invalid(2, "move_step", "-1"));
        assert!(Config::parse("[rules]\nmove_step = 0").is_ok());
    }
}
