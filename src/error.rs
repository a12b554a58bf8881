use std::error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A line of the puzzle input didn't match the expected format. `line` is 1-based.
    MalformedInput { line: usize, text: String },
    DuplicateValveIdentifier(String),
    /// A tunnel or the start valve names a valve that's never defined.
    UnknownValve(String),
    /// Valve sets are u64 bitmasks, so there can't be more interesting valves than that.
    TooManyValves(usize),
    /// Handles are u16, which caps the size of the whole network.
    NetworkTooLarge(usize),
    /// Only valves with positive flow can be part of an opening sequence.
    NotInteresting(String),
    /// Released pressure doesn't fit in a u64.
    PressureOverflow,
    UnknownSource(String),
    NotReachable { from: String, to: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedInput { line, text } => {
                write!(f, "unexpected line format at line {line}: {text}")
            },
            Error::DuplicateValveIdentifier(name) => write!(f, "valve {name} defined twice"),
            Error::UnknownValve(name) => write!(f, "no definition for valve {name}"),
            Error::TooManyValves(n) => {
                write!(f, "too many valves with positive flow: {n} (max {})", u64::BITS)
            },
            Error::NetworkTooLarge(n) => {
                write!(f, "too many valves: {n} (max {})", u16::MAX)
            },
            Error::NotInteresting(name) => write!(f, "valve {name} has no flow to release"),
            Error::PressureOverflow => write!(f, "released pressure overflows"),
            Error::UnknownSource(name) => {
                write!(f, "distances from {name} weren't computed")
            },
            Error::NotReachable { from, to } => write!(f, "no path from {from} to {to}"),
        }
    }
}

impl error::Error for Error {}
