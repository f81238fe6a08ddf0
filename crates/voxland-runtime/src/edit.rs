use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditError {
    OutOfBounds { x: i32, z: i32, y: i32 },
    Occupied { x: i32, z: i32, y: i32 },
    Empty { x: i32, z: i32, y: i32 },
    /// Tree cells only come from planting; a bare one would have no geometry.
    TreeBlock { x: i32, z: i32, y: i32 },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::OutOfBounds { x, z, y } => {
                write!(f, "cell ({x}, {z}, {y}) is outside the world")
            }
            EditError::Occupied { x, z, y } => write!(f, "cell ({x}, {z}, {y}) is already occupied"),
            EditError::Empty { x, z, y } => write!(f, "cell ({x}, {z}, {y}) is empty"),
            EditError::TreeBlock { x, z, y } => {
                write!(f, "cell ({x}, {z}, {y}): tree blocks cannot be placed directly")
            }
        }
    }
}

impl std::error::Error for EditError {}
