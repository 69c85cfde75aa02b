use std::fmt;
use std::str::FromStr;

/// Everything a pilot can ask of a vessel.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Thrust along the vessel's heading.
    #[cfg_attr(feature = "serde", serde(rename = "accel"))]
    Accelerate,
    /// Rotate counter-clockwise.
    #[cfg_attr(feature = "serde", serde(rename = "left"))]
    TurnLeft,
    /// Rotate clockwise.
    #[cfg_attr(feature = "serde", serde(rename = "right"))]
    TurnRight,
    /// Turn to face away from the current direction of travel.
    #[cfg_attr(feature = "serde", serde(rename = "reverse"))]
    Reverse,
    /// Turn towards the current target.
    #[cfg_attr(feature = "serde", serde(rename = "align"))]
    Align,
    /// Select the next ship on the scanner.
    #[cfg_attr(feature = "serde", serde(rename = "targetNext"))]
    TargetNext,
    /// Select the previous ship on the scanner.
    #[cfg_attr(feature = "serde", serde(rename = "targetPrev"))]
    TargetPrevious,
    /// Select the next celestial on the scanner.
    #[cfg_attr(feature = "serde", serde(rename = "targetCelestialNext"))]
    TargetCelestialNext,
    /// Drop the current ship target, or the celestial target if there is none.
    #[cfg_attr(feature = "serde", serde(rename = "clearTarget"))]
    ClearTarget,
    /// Request docking. Picks a celestial to land on.
    #[cfg_attr(feature = "serde", serde(rename = "targetLand"))]
    Land,
}

/// Array of all action kinds.
pub const ACTIONS: &[ActionKind] = &[
    ActionKind::Accelerate,
    ActionKind::TurnLeft,
    ActionKind::TurnRight,
    ActionKind::Reverse,
    ActionKind::Align,
    ActionKind::TargetNext,
    ActionKind::TargetPrevious,
    ActionKind::TargetCelestialNext,
    ActionKind::ClearTarget,
    ActionKind::Land,
];

impl ActionKind {
    /// Every action kind, in declaration order.
    pub const ALL: &'static [ActionKind] = ACTIONS;

    /// Stable token used in settings files.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Accelerate => "accel",
            ActionKind::TurnLeft => "left",
            ActionKind::TurnRight => "right",
            ActionKind::Reverse => "reverse",
            ActionKind::Align => "align",
            ActionKind::TargetNext => "targetNext",
            ActionKind::TargetPrevious => "targetPrev",
            ActionKind::TargetCelestialNext => "targetCelestialNext",
            ActionKind::ClearTarget => "clearTarget",
            ActionKind::Land => "targetLand",
        }
    }

    /// Whether a held key keeps producing this action every frame.
    ///
    /// Steering actions repeat. Targeting actions only fire when the key goes
    /// down, otherwise holding Tab would sweep through every contact.
    pub fn repeats(self) -> bool {
        matches!(
            self,
            ActionKind::Accelerate
                | ActionKind::Align
                | ActionKind::TurnLeft
                | ActionKind::TurnRight
                | ActionKind::Reverse
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not the token of any [ActionKind].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParseActionError {
    /// The rejected token.
    pub token: String,
}

impl fmt::Display for ParseActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action {:?}", self.token)
    }
}

impl std::error::Error for ParseActionError {}

impl FromStr for ActionKind {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ACTIONS
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseActionError {
                token: s.to_string(),
            })
    }
}

/// A single command issued to a vessel.
///
/// `dt` is the length of the frame the command was produced in, in seconds.
/// Turning left and right both use a positive `dt`; the receiving system
/// decides the direction.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PilotAction {
    /// What is being asked for.
    pub kind: ActionKind,
    /// Frame time in seconds.
    pub dt: f64,
}

impl PilotAction {
    /// Creates an action of `kind` for a frame of `dt` seconds.
    pub fn new(kind: ActionKind, dt: f64) -> Self {
        Self { kind, dt }
    }
}
