//! Level File Parsing
//!
//! Text format for maze levels. A file declares its extent in a header
//! line, then lists one 2D grid per color-dimension tuple:
//!
//! ```text
//! LAB 3 3 2
//! # comment lines and blank lines are skipped
//! floor 1
//! ...
//! .x.
//! ..g
//! end
//! ```
//!
//! `x` or `b` marks an occupied cell, `g` or `*` the unique goal, any
//! other character is filler. Rows are 1-based from the top of each floor
//! block; a file may leave entire floors out. `end` terminates parsing.
//! All failures are fatal and abort the load.

pub mod scenario;

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::core::coord::Coord;
use crate::core::rotation::SPATIAL_DIMS;
use crate::game::grid::{Labyrinth, ValidationError};

/// Marker token that introduces a level header.
const HEADER_TOKEN: &str = "lab";
/// Directive that positions the following rows in the color dimensions.
const FLOOR_DIRECTIVE: &str = "floor";
/// Terminator line.
const END_TOKEN: &str = "end";

/// Malformed level or scenario text. Fatal; aborts the load.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The first line is not a `LAB` header.
    #[error("line 1: not a labyrinth file (expected 'LAB <sizes>')")]
    BadHeader,

    /// A header size token is not a positive integer.
    #[error("line {line}: invalid dimension size '{token}'")]
    BadSize {
        /// 1-based source line.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// The header declares fewer than three dimensions.
    #[error("a labyrinth needs at least 3 dimensions, got {0}")]
    TooFewDimensions(usize),

    /// A floor directive does not carry one integer per color dimension.
    #[error("line {line}: malformed floor directive (expected {expected} color coordinates)")]
    BadFloorDirective {
        /// 1-based source line.
        line: usize,
        /// Color coordinates required by the header.
        expected: usize,
    },

    /// A floor block carries more rows than the declared Y extent.
    #[error("line {line}: row exceeds the declared height of {height}")]
    TooManyRows {
        /// 1-based source line.
        line: usize,
        /// Declared Y extent.
        height: i32,
    },

    /// A tile row appeared before any floor directive.
    #[error("line {line}: tile row before any floor directive")]
    RowOutsideFloor {
        /// 1-based source line.
        line: usize,
    },

    /// A second goal marker was found.
    #[error("line {line}: goal marker but the goal is already at {first}")]
    DuplicateGoal {
        /// 1-based source line.
        line: usize,
        /// Where the first marker put the goal.
        first: Coord,
    },

    /// The file ended without a goal marker.
    #[error("no goal marker found")]
    MissingGoal,

    /// A scenario line names an unknown stage kind.
    #[error("line {line}: unknown stage kind '{kind}'")]
    UnknownStageKind {
        /// 1-based source line.
        line: usize,
        /// The offending kind token.
        kind: String,
    },

    /// A scenario line has no file name after the kind.
    #[error("line {line}: stage is missing a file name")]
    MissingStageFile {
        /// 1-based source line.
        line: usize,
    },

    /// The parsed data violates a grid invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The file could not be read.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Parse level text into a [`Labyrinth`].
pub fn parse_level(text: &str) -> Result<Labyrinth, FormatError> {
    let mut lines = text.lines().enumerate();

    let (_, header) = lines.next().ok_or(FormatError::BadHeader)?;
    let mut tokens = header.split_whitespace();
    if tokens
        .next()
        .is_none_or(|token| !token.eq_ignore_ascii_case(HEADER_TOKEN))
    {
        return Err(FormatError::BadHeader);
    }
    let mut size = Vec::new();
    for token in tokens {
        let extent: i32 = token.parse().map_err(|_| FormatError::BadSize {
            line: 1,
            token: token.to_string(),
        })?;
        size.push(extent);
    }
    if size.len() < SPATIAL_DIMS + 1 {
        return Err(FormatError::TooFewDimensions(size.len()));
    }
    let color_dims = size.len() - SPATIAL_DIMS;
    let height = size[1];

    let mut blocks = Vec::new();
    let mut goal: Option<Coord> = None;
    // Color position of the floor block being read, and the next row in it.
    let mut floor: Option<Vec<i32>> = None;
    let mut y = 1;

    for (index, raw) in lines {
        let line_no = index + 1;
        let line = raw.trim().to_ascii_lowercase();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == END_TOKEN {
            break;
        }
        if let Some(rest) = line
            .strip_prefix(FLOOR_DIRECTIVE)
            .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            let coords: Vec<i32> = rest
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<_, _>>()
                .map_err(|_| FormatError::BadFloorDirective {
                    line: line_no,
                    expected: color_dims,
                })?;
            if coords.len() != color_dims {
                return Err(FormatError::BadFloorDirective {
                    line: line_no,
                    expected: color_dims,
                });
            }
            floor = Some(coords);
            y = 1;
            continue;
        }

        let Some(color_pos) = &floor else {
            return Err(FormatError::RowOutsideFloor { line: line_no });
        };
        if y > height {
            return Err(FormatError::TooManyRows { line: line_no, height });
        }
        for (column, marker) in line.chars().enumerate() {
            let cell = || {
                let mut components = vec![column as i32 + 1, y];
                components.extend_from_slice(color_pos);
                Coord::new(components)
            };
            match marker {
                'x' | 'b' => blocks.push(cell()),
                'g' | '*' => {
                    if let Some(first) = &goal {
                        return Err(FormatError::DuplicateGoal {
                            line: line_no,
                            first: first.clone(),
                        });
                    }
                    goal = Some(cell());
                }
                _ => {}
            }
        }
        y += 1;
    }

    let goal = goal.ok_or(FormatError::MissingGoal)?;
    Ok(Labyrinth::new(size, blocks, goal)?)
}

/// Read and parse a level file.
pub fn load_level(path: impl AsRef<Path>) -> Result<Labyrinth, FormatError> {
    let path = path.as_ref();
    let lab = parse_level(&std::fs::read_to_string(path)?)?;
    info!(
        path = %path.display(),
        dimensions = lab.ndim(),
        blocks = lab.block_count(),
        "level loaded"
    );
    Ok(lab)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "\
LAB 3 3 2
# the pillar level
floor 1
...
.x.
..g

floor 2
...
...
...
end
";

    #[test]
    fn test_parses_blocks_and_goal() {
        let lab = parse_level(SIMPLE).unwrap();
        assert_eq!(lab.size(), &[3, 3, 2]);
        assert_eq!(lab.block_count(), 1);
        assert!(lab.is_occupied(&Coord::from([2, 2, 1])));
        assert_eq!(lab.goal(), &Coord::from([3, 3, 1]));
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        let lab = parse_level("LAB 2 2 2\nfloor 1\nXB\n.G\nend\n").unwrap();
        assert_eq!(lab.block_count(), 2);
        assert_eq!(lab.goal(), &Coord::from([2, 2, 1]));
    }

    #[test]
    fn test_floors_may_be_sparse() {
        let lab = parse_level("lab 2 2 3\nfloor 3\nx.\n.g\nend\n").unwrap();
        assert!(lab.is_occupied(&Coord::from([1, 1, 3])));
        assert_eq!(lab.goal(), &Coord::from([2, 2, 3]));
    }

    #[test]
    fn test_four_dimensional_floors() {
        let text = "lab 2 2 2 2\nfloor 1 2\nx.\n..\nfloor 2 2\n..\n.g\nend\n";
        let lab = parse_level(text).unwrap();
        assert!(lab.is_occupied(&Coord::from([1, 1, 1, 2])));
        assert_eq!(lab.goal(), &Coord::from([2, 2, 2, 2]));
    }

    #[test]
    fn test_rejects_bad_header() {
        assert!(matches!(parse_level("MAZE 3 3 2\n"), Err(FormatError::BadHeader)));
        assert!(matches!(parse_level(""), Err(FormatError::BadHeader)));
    }

    #[test]
    fn test_rejects_bad_size_token() {
        assert!(matches!(
            parse_level("lab 3 three 2\n"),
            Err(FormatError::BadSize { line: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_too_few_dimensions() {
        assert!(matches!(
            parse_level("lab 3 3\nfloor\n..g\nend\n"),
            Err(FormatError::TooFewDimensions(2))
        ));
    }

    #[test]
    fn test_rejects_row_overflow() {
        let text = "lab 2 2 2\nfloor 1\n..\n.g\nxx\nend\n";
        assert!(matches!(
            parse_level(text),
            Err(FormatError::TooManyRows { height: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_row_before_floor() {
        assert!(matches!(
            parse_level("lab 2 2 2\n.g\nend\n"),
            Err(FormatError::RowOutsideFloor { line: 2 })
        ));
    }

    #[test]
    fn test_rejects_malformed_floor_directive() {
        assert!(matches!(
            parse_level("lab 2 2 2\nfloor one\n.g\nend\n"),
            Err(FormatError::BadFloorDirective { expected: 1, .. })
        ));
        assert!(matches!(
            parse_level("lab 2 2 2 2\nfloor 1\n.g\nend\n"),
            Err(FormatError::BadFloorDirective { expected: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_goal() {
        let text = "lab 2 2 2\nfloor 1\ng.\nfloor 2\n.g\nend\n";
        assert!(matches!(
            parse_level(text),
            Err(FormatError::DuplicateGoal { .. })
        ));
    }

    #[test]
    fn test_rejects_missing_goal() {
        assert!(matches!(
            parse_level("lab 2 2 2\nfloor 1\nx.\n..\nend\n"),
            Err(FormatError::MissingGoal)
        ));
    }

    #[test]
    fn test_out_of_bounds_marker_fails_validation() {
        // Three columns of markers in a two-wide level.
        let text = "lab 2 2 2\nfloor 1\n..x\n.g\nend\n";
        assert!(matches!(
            parse_level(text),
            Err(FormatError::Validation(ValidationError::BlockOutOfBounds(_)))
        ));
    }

    #[test]
    fn test_content_after_end_is_ignored() {
        let lab = parse_level("lab 2 2 2\nfloor 1\n.g\nend\nnot a row\n").unwrap();
        assert_eq!(lab.goal(), &Coord::from([2, 1, 1]));
    }
}
