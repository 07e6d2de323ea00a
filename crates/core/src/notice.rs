//! Confirmation notices shown on the home page after a successful submission.
//!
//! The notice travels through the `success` query parameter of the redirect
//! target. Only the exact literals `"1"` and `"2"` are recognised; anything
//! else (including `"01"`, `" 1"` or an absent parameter) shows no notice.

/// A confirmation shown on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeNotice {
    InstanceAdded,
    InstanceUpdated,
}

impl HomeNotice {
    /// Parse the raw `success` query parameter.
    pub fn from_query(value: Option<&str>) -> Option<Self> {
        match value? {
            "1" => Some(Self::InstanceAdded),
            "2" => Some(Self::InstanceUpdated),
            _ => None,
        }
    }

    /// Human-readable confirmation text.
    pub fn message(self) -> &'static str {
        match self {
            Self::InstanceAdded => "Instance Added Successfully",
            Self::InstanceUpdated => "Instance Updated Successfully",
        }
    }

    /// Redirect location that displays this notice on the home page.
    pub fn redirect_path(self) -> &'static str {
        match self {
            Self::InstanceAdded => "/?success=1",
            Self::InstanceUpdated => "/?success=2",
        }
    }
}
