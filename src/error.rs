//! Render errors
//!
//! Every failure is local to a single render call. Nothing is retried.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A pixel write landed outside the canvas rectangle
    OutOfRangeCoordinate {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    /// Field or app configuration rejected before generation
    InvalidConfiguration(String),
    /// Seed point storage could not be reserved
    AllocationFailure { requested: usize },
    /// Canvas geometry does not fit its backing slice, or the window refused a lock
    Surface(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRangeCoordinate {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "coordinate ({}, {}) outside {}x{} canvas",
                x, y, width, height
            ),
            Self::InvalidConfiguration(msg) => write!(f, "invalid configuration: {}", msg),
            Self::AllocationFailure { requested } => {
                write!(f, "could not allocate storage for {} seed points", requested)
            },
            Self::Surface(msg) => write!(f, "surface error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_coordinate() {
        let err = RenderError::OutOfRangeCoordinate {
            x: -1,
            y: 7,
            width: 100,
            height: 50,
        };
        assert_eq!(err.to_string(), "coordinate (-1, 7) outside 100x50 canvas");
    }

    #[test]
    fn test_display_allocation_failure() {
        let err = RenderError::AllocationFailure { requested: 625 };
        assert!(err.to_string().contains("625"));
    }
}
