//! Text command grammar.
//!
//! A command line is a whitespace-separated token list. The first token names
//! the command (case-insensitive), the rest are positional arguments. Several
//! commands accept a trailing `split <percentage>` that previews the result
//! against its source.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::SessionError;
use crate::filters::{FlipDirection, GreyscaleComponent, Kernel};
use crate::operations;

/// One parsed command. Numeric arguments are parsed but only range-checked
/// when the command executes, except the split percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load {
        path: PathBuf,
        name: String,
    },
    Save {
        path: PathBuf,
        name: String,
    },
    Run {
        path: PathBuf,
    },
    Flip {
        direction: FlipDirection,
        source: String,
        destination: String,
    },
    Brighten {
        increment: i32,
        source: String,
        destination: String,
    },
    Greyscale {
        component: GreyscaleComponent,
        source: String,
        destination: String,
        split: Option<u8>,
    },
    Sepia {
        source: String,
        destination: String,
        split: Option<u8>,
    },
    Filter {
        kernel: Kernel,
        source: String,
        destination: String,
        split: Option<u8>,
    },
    ColorCorrect {
        source: String,
        destination: String,
        split: Option<u8>,
    },
    Histogram {
        source: String,
        destination: String,
    },
    Compress {
        percentage: i32,
        source: String,
        destination: String,
    },
    RgbSplit {
        source: String,
        red: String,
        green: String,
        blue: String,
    },
    RgbCombine {
        destination: String,
        red: String,
        green: String,
        blue: String,
    },
    LevelsAdjust {
        black: i32,
        mid: i32,
        white: i32,
        source: String,
        destination: String,
        split: Option<u8>,
    },
}

impl Command {
    /// Parse a single command line.
    pub fn parse(line: &str) -> Result<Self, SessionError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = tokens.first() else {
            return Err(SessionError::UnknownCommand(String::new()));
        };
        let keyword = first.to_ascii_lowercase();

        let arity = |allowed: &[usize]| -> Result<(), SessionError> {
            if allowed.contains(&tokens.len()) {
                Ok(())
            } else {
                Err(SessionError::Arity {
                    command: keyword.clone(),
                    found: tokens.len(),
                })
            }
        };
        let name = |i: usize| tokens[i].to_string();

        let command = match keyword.as_str() {
            "load" => {
                arity(&[3])?;
                Command::Load {
                    path: PathBuf::from(tokens[1]),
                    name: name(2),
                }
            }
            "save" => {
                arity(&[3])?;
                Command::Save {
                    path: PathBuf::from(tokens[1]),
                    name: name(2),
                }
            }
            "run" => {
                arity(&[2])?;
                Command::Run {
                    path: PathBuf::from(tokens[1]),
                }
            }
            "horizontal-flip" | "vertical-flip" => {
                arity(&[3])?;
                Command::Flip {
                    direction: FlipDirection::from_token(&keyword),
                    source: name(1),
                    destination: name(2),
                }
            }
            "histogram" => {
                arity(&[3])?;
                Command::Histogram {
                    source: name(1),
                    destination: name(2),
                }
            }
            "brighten" => {
                arity(&[4])?;
                Command::Brighten {
                    increment: parse_int(tokens[1])?,
                    source: name(2),
                    destination: name(3),
                }
            }
            "compress" => {
                arity(&[4])?;
                Command::Compress {
                    percentage: parse_int(tokens[1])?,
                    source: name(2),
                    destination: name(3),
                }
            }
            "rgb-split" => {
                arity(&[5])?;
                Command::RgbSplit {
                    source: name(1),
                    red: name(2),
                    green: name(3),
                    blue: name(4),
                }
            }
            "rgb-combine" => {
                arity(&[5])?;
                Command::RgbCombine {
                    destination: name(1),
                    red: name(2),
                    green: name(3),
                    blue: name(4),
                }
            }
            "levels-adjust" => {
                arity(&[6, 8])?;
                Command::LevelsAdjust {
                    black: parse_int(tokens[1])?,
                    mid: parse_int(tokens[2])?,
                    white: parse_int(tokens[3])?,
                    source: name(4),
                    destination: name(5),
                    split: split_suffix(&keyword, &tokens, 6)?,
                }
            }
            "sepia" => {
                arity(&[3, 5])?;
                Command::Sepia {
                    source: name(1),
                    destination: name(2),
                    split: split_suffix(&keyword, &tokens, 3)?,
                }
            }
            "color-correct" => {
                arity(&[3, 5])?;
                Command::ColorCorrect {
                    source: name(1),
                    destination: name(2),
                    split: split_suffix(&keyword, &tokens, 3)?,
                }
            }
            "blur" | "sharpen" => {
                arity(&[3, 5])?;
                Command::Filter {
                    kernel: keyword.parse::<Kernel>()?,
                    source: name(1),
                    destination: name(2),
                    split: split_suffix(&keyword, &tokens, 3)?,
                }
            }
            other => match other.parse::<GreyscaleComponent>() {
                Ok(component) => {
                    arity(&[3, 5])?;
                    Command::Greyscale {
                        component,
                        source: name(1),
                        destination: name(2),
                        split: split_suffix(&keyword, &tokens, 3)?,
                    }
                }
                Err(_) => return Err(SessionError::UnknownCommand(first.to_string())),
            },
        };
        Ok(command)
    }

    /// Command keyword as typed in a script, e.g. `levels-adjust`.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Load { .. } => "load",
            Command::Save { .. } => "save",
            Command::Run { .. } => "run",
            Command::Flip { direction, .. } => match direction {
                FlipDirection::Horizontal => "horizontal-flip",
                FlipDirection::Vertical => "vertical-flip",
                FlipDirection::Both => "flip",
            },
            Command::Brighten { .. } => "brighten",
            Command::Greyscale { component, .. } => component.name(),
            Command::Sepia { .. } => "sepia",
            Command::Filter { kernel, .. } => kernel.name(),
            Command::ColorCorrect { .. } => "color-correct",
            Command::Histogram { .. } => "histogram",
            Command::Compress { .. } => "compress",
            Command::RgbSplit { .. } => "rgb-split",
            Command::RgbCombine { .. } => "rgb-combine",
            Command::LevelsAdjust { .. } => "levels-adjust",
        }
    }
}

impl FromStr for Command {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

fn parse_int(token: &str) -> Result<i32, SessionError> {
    token
        .parse::<i32>()
        .map_err(|_| SessionError::InvalidNumber(token.to_string()))
}

/// Parse an optional `split <percentage>` starting at token `at`.
fn split_suffix(keyword: &str, tokens: &[&str], at: usize) -> Result<Option<u8>, SessionError> {
    if tokens.len() <= at {
        return Ok(None);
    }
    if !tokens[at].eq_ignore_ascii_case("split") {
        return Err(SessionError::Arity {
            command: keyword.to_string(),
            found: tokens.len(),
        });
    }
    let percentage = operations::percentage(parse_int(tokens[at + 1])?)?;
    Ok(Some(percentage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditError;

    #[test]
    fn test_parse_load_and_save() {
        assert_eq!(
            Command::parse("load images/koala.ppm koala").unwrap(),
            Command::Load {
                path: PathBuf::from("images/koala.ppm"),
                name: "koala".to_string()
            }
        );
        assert!(matches!(
            Command::parse("SAVE out.png koala").unwrap(),
            Command::Save { .. }
        ));
    }

    #[test]
    fn test_parse_greyscale_with_split() {
        assert_eq!(
            Command::parse("luma-component koala koala-luma split 40").unwrap(),
            Command::Greyscale {
                component: GreyscaleComponent::Luma,
                source: "koala".to_string(),
                destination: "koala-luma".to_string(),
                split: Some(40),
            }
        );
    }

    #[test]
    fn test_parse_flip_directions() {
        let horizontal = Command::parse("horizontal-flip a b").unwrap();
        assert!(matches!(
            horizontal,
            Command::Flip {
                direction: FlipDirection::Horizontal,
                ..
            }
        ));
        assert_eq!(horizontal.keyword(), "horizontal-flip");
        let vertical = Command::parse("vertical-flip a b").unwrap();
        assert_eq!(vertical.keyword(), "vertical-flip");
    }

    #[test]
    fn test_parse_numeric_arguments() {
        assert_eq!(
            Command::parse("brighten -25 a b").unwrap(),
            Command::Brighten {
                increment: -25,
                source: "a".to_string(),
                destination: "b".to_string()
            }
        );
        assert_eq!(
            Command::parse("levels-adjust 20 100 255 a b").unwrap(),
            Command::LevelsAdjust {
                black: 20,
                mid: 100,
                white: 255,
                source: "a".to_string(),
                destination: "b".to_string(),
                split: None,
            }
        );
    }

    #[test]
    fn test_reject_unknown_command() {
        assert!(matches!(
            Command::parse("emboss a b"),
            Err(SessionError::UnknownCommand(token)) if token == "emboss"
        ));
        assert!(matches!(
            Command::parse("   "),
            Err(SessionError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_reject_wrong_arity() {
        assert!(matches!(
            Command::parse("blur a"),
            Err(SessionError::Arity { found: 2, .. })
        ));
        assert!(matches!(
            Command::parse("horizontal-flip a b split 50"),
            Err(SessionError::Arity { found: 5, .. })
        ));
        assert!(matches!(
            Command::parse("sepia a b 50 split"),
            Err(SessionError::Arity { .. })
        ));
    }

    #[test]
    fn test_reject_bad_numbers() {
        assert!(matches!(
            Command::parse("brighten ten a b"),
            Err(SessionError::InvalidNumber(token)) if token == "ten"
        ));
        assert!(matches!(
            Command::parse("blur a b split 150"),
            Err(SessionError::Edit(EditError::InvalidParameter(_)))
        ));
    }

    #[test]
    fn test_keyword_matches_token() {
        for line in [
            "blur a b",
            "sharpen a b",
            "sepia a b",
            "color-correct a b",
            "histogram a b",
            "compress 10 a b",
            "rgb-split a r g b",
            "rgb-combine c r g b",
            "value-component a b",
            "run script.txt",
        ] {
            let command: Command = line.parse().unwrap();
            assert_eq!(command.to_string(), line.split(' ').next().unwrap());
        }
    }
}
