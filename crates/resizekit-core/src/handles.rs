//! Handle definitions for box resizing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Orientation of a handle's own visual bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Attribute value for the orientation.
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// A drag handle on the border or a corner of a resizable box.
///
/// Variant order is the canonical order handles are resolved and rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Handle {
    // Edge handles
    Top,
    Right,
    Bottom,
    Left,
    // Corner handles
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Error returned when parsing an unrecognised handle id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown resize handle: {0}")]
pub struct UnknownHandle(pub String);

impl Handle {
    /// All handles in canonical order.
    pub const ALL: [Handle; 8] = [
        Handle::Top,
        Handle::Right,
        Handle::Bottom,
        Handle::Left,
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
    ];

    /// Sign of the width's response to positive horizontal pointer movement.
    ///
    /// Left-side handles grow the box when dragged toward negative x.
    pub fn horizontal_sign(self) -> f64 {
        match self {
            Handle::Right | Handle::TopRight | Handle::BottomRight => 1.0,
            Handle::Left | Handle::TopLeft | Handle::BottomLeft => -1.0,
            Handle::Top | Handle::Bottom => 0.0,
        }
    }

    /// Sign of the height's response to positive vertical pointer movement.
    pub fn vertical_sign(self) -> f64 {
        match self {
            Handle::Bottom | Handle::BottomLeft | Handle::BottomRight => 1.0,
            Handle::Top | Handle::TopLeft | Handle::TopRight => -1.0,
            Handle::Left | Handle::Right => 0.0,
        }
    }

    /// Orientation of the handle's bar. Corners have none.
    pub fn orientation(self) -> Option<Orientation> {
        match self {
            Handle::Top | Handle::Bottom => Some(Orientation::Horizontal),
            Handle::Left | Handle::Right => Some(Orientation::Vertical),
            _ => None,
        }
    }

    /// Check if this is a corner handle (drives both dimensions).
    pub fn is_corner(self) -> bool {
        self.horizontal_sign() != 0.0 && self.vertical_sign() != 0.0
    }

    /// Stable identifier, as used in configuration.
    pub fn id(self) -> &'static str {
        match self {
            Handle::Top => "top",
            Handle::Right => "right",
            Handle::Bottom => "bottom",
            Handle::Left => "left",
            Handle::TopLeft => "topLeft",
            Handle::TopRight => "topRight",
            Handle::BottomLeft => "bottomLeft",
            Handle::BottomRight => "bottomRight",
        }
    }

    /// Accessible label for the handle element.
    pub fn label(self) -> String {
        format!("Resize {}", self.id())
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Handle {
    type Err = UnknownHandle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Handle::ALL
            .into_iter()
            .find(|handle| handle.id() == s)
            .ok_or_else(|| UnknownHandle(s.to_string()))
    }
}

/// A subset of the eight handles, always iterated in canonical order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct HandleSet {
    bits: u8,
}

impl HandleSet {
    /// A set with no handles. The box is then not user-resizable.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// A set with all eight handles.
    pub const fn all() -> Self {
        Self { bits: u8::MAX }
    }

    /// Add a handle to the set.
    pub fn insert(&mut self, handle: Handle) {
        self.bits |= handle.bit();
    }

    /// Remove a handle from the set.
    pub fn remove(&mut self, handle: Handle) {
        self.bits &= !handle.bit();
    }

    /// Builder-style insert.
    pub fn with(mut self, handle: Handle) -> Self {
        self.insert(handle);
        self
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.bits & handle.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate the handles in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Handle> + '_ {
        Handle::ALL.into_iter().filter(|handle| self.contains(*handle))
    }
}

impl Default for HandleSet {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Debug for HandleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Handle> for HandleSet {
    fn from_iter<I: IntoIterator<Item = Handle>>(iter: I) -> Self {
        let mut set = HandleSet::empty();
        for handle in iter {
            set.insert(handle);
        }
        set
    }
}

impl From<Vec<String>> for HandleSet {
    fn from(ids: Vec<String>) -> Self {
        resolve_handles(ids).into_iter().collect()
    }
}

impl From<HandleSet> for Vec<String> {
    fn from(set: HandleSet) -> Self {
        set.iter().map(|handle| handle.id().to_string()).collect()
    }
}

/// Resolve requested handle ids into canonical order.
///
/// Unknown ids are dropped and duplicates collapse. An empty request yields
/// an empty list.
pub fn resolve_handles<I, S>(requested: I) -> Vec<Handle>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = HandleSet::empty();
    for id in requested {
        match id.as_ref().parse::<Handle>() {
            Ok(handle) => set.insert(handle),
            Err(e) => log::debug!("Ignoring handle: {}", e),
        }
    }
    set.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_canonical_order() {
        let handles = resolve_handles(["bottomRight", "left", "top"]);
        assert_eq!(handles, vec![Handle::Top, Handle::Left, Handle::BottomRight]);
    }

    #[test]
    fn test_resolve_drops_unknown_and_duplicates() {
        let handles = resolve_handles(["right", "diagonal", "right", ""]);
        assert_eq!(handles, vec![Handle::Right]);
    }

    #[test]
    fn test_resolve_empty() {
        let handles = resolve_handles(Vec::<String>::new());
        assert!(handles.is_empty());
    }

    #[test]
    fn test_resolve_all() {
        let ids: Vec<_> = Handle::ALL.iter().rev().map(|h| h.id()).collect();
        assert_eq!(resolve_handles(ids), Handle::ALL.to_vec());
    }

    #[test]
    fn test_signs() {
        assert_eq!(Handle::Left.horizontal_sign(), -1.0);
        assert_eq!(Handle::Right.horizontal_sign(), 1.0);
        assert_eq!(Handle::Top.vertical_sign(), -1.0);
        assert_eq!(Handle::Bottom.vertical_sign(), 1.0);
        assert_eq!(Handle::Top.horizontal_sign(), 0.0);
        assert_eq!(Handle::Left.vertical_sign(), 0.0);

        assert_eq!(Handle::TopLeft.horizontal_sign(), -1.0);
        assert_eq!(Handle::TopLeft.vertical_sign(), -1.0);
        assert_eq!(Handle::BottomRight.horizontal_sign(), 1.0);
        assert_eq!(Handle::BottomRight.vertical_sign(), 1.0);
        assert_eq!(Handle::TopRight.vertical_sign(), -1.0);
        assert_eq!(Handle::BottomLeft.horizontal_sign(), -1.0);
    }

    #[test]
    fn test_orientation() {
        assert_eq!(Handle::Top.orientation(), Some(Orientation::Horizontal));
        assert_eq!(Handle::Bottom.orientation(), Some(Orientation::Horizontal));
        assert_eq!(Handle::Left.orientation(), Some(Orientation::Vertical));
        assert_eq!(Handle::Right.orientation(), Some(Orientation::Vertical));
        for corner in [Handle::TopLeft, Handle::TopRight, Handle::BottomLeft, Handle::BottomRight] {
            assert!(corner.is_corner());
            assert_eq!(corner.orientation(), None);
        }
    }

    #[test]
    fn test_parse_and_label() {
        assert_eq!("topLeft".parse::<Handle>(), Ok(Handle::TopLeft));
        assert_eq!("TopLeft".parse::<Handle>(), Err(UnknownHandle("TopLeft".to_string())));
        assert_eq!(Handle::BottomRight.label(), "Resize bottomRight");
    }

    #[test]
    fn test_handle_set() {
        let mut set = HandleSet::empty().with(Handle::BottomLeft).with(Handle::Top);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Handle::Top, Handle::BottomLeft]);

        set.remove(Handle::Top);
        assert!(!set.contains(Handle::Top));
        assert_eq!(HandleSet::default().len(), 8);
    }

    #[test]
    fn test_handle_set_serde() {
        let set: HandleSet = serde_json::from_str(r#"["left", "nope", "top"]"#).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Handle::Top, Handle::Left]);

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["top","left"]"#);
    }
}
