use serde::{Deserialize, Serialize};

use crate::core::Interval;
use crate::interaction::ViewportAction;

/// What the host shows: visible X range, brushed selection, hover value.
///
/// A plain value; applying an action returns the next state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub x_domain: Interval,
    #[serde(default)]
    pub selection: Option<Interval>,
    #[serde(default)]
    pub hover: Option<f64>,
}

impl ViewState {
    #[must_use]
    pub const fn new(x_domain: Interval) -> Self {
        Self {
            x_domain,
            selection: None,
            hover: None,
        }
    }

    #[must_use]
    pub fn apply(self, action: ViewportAction) -> Self {
        match action {
            ViewportAction::SetXDomain(x_domain) => Self { x_domain, ..self },
            ViewportAction::SetSelection(selection) => Self { selection, ..self },
            ViewportAction::SetHover(hover) => Self { hover, ..self },
        }
    }

    #[must_use]
    pub fn apply_all<I>(self, actions: I) -> Self
    where
        I: IntoIterator<Item = ViewportAction>,
    {
        actions.into_iter().fold(self, Self::apply)
    }
}
