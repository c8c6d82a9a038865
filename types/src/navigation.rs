//! Locations, routes and section anchors supplied by the router.

use std::fmt;

/// Path of the landing view.
pub const LANDING_PATH: &str = "/";
/// Path of the structural analysis view that hosts the anchored sections.
pub const ANALYSIS_PATH: &str = "/vigilum";

/// A router location: path plus optional hash fragment (without the `#`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    path: String,
    fragment: String,
}

impl Location {
    /// Split `"/vigilum#demo"` into path `/vigilum` and fragment `demo`.
    ///
    /// An empty path is treated as `/`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (path, fragment) = match raw.split_once('#') {
            Some((path, fragment)) => (path, fragment),
            None => (raw, ""),
        };
        let path = if path.is_empty() { LANDING_PATH } else { path };
        Self {
            path: path.to_owned(),
            fragment: fragment.to_owned(),
        }
    }

    #[must_use]
    pub fn landing() -> Self {
        Self::parse(LANDING_PATH)
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fragment without the leading `#`; empty when absent.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// The fragment as the router reports it, with its `#` marker (`"#demo"`),
    /// or an empty string when there is none.
    #[must_use]
    pub fn hash(&self) -> String {
        if self.fragment.is_empty() {
            String::new()
        } else {
            format!("#{}", self.fragment)
        }
    }

    #[must_use]
    pub fn route(&self) -> Route {
        Route::from_path(&self.path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.path, self.hash())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Analysis,
    NotFound,
}

impl Route {
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Landing,
            p if p == ANALYSIS_PATH => Route::Analysis,
            _ => Route::NotFound,
        }
    }
}

/// Anchored sections of the analysis view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Modules,
    Demo,
    Cases,
    About,
}

impl SectionId {
    #[must_use]
    pub const fn all() -> &'static [SectionId] {
        &[
            SectionId::Modules,
            SectionId::Demo,
            SectionId::Cases,
            SectionId::About,
        ]
    }

    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            SectionId::Modules => "modules",
            SectionId::Demo => "demo",
            SectionId::Cases => "cases",
            SectionId::About => "about",
        }
    }

    #[must_use]
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.anchor() == anchor)
    }

    /// Location of this section on the analysis view, e.g. `/vigilum#demo`.
    #[must_use]
    pub fn location(self) -> Location {
        Location {
            path: ANALYSIS_PATH.to_owned(),
            fragment: self.anchor().to_owned(),
        }
    }
}

/// Entry of the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub section: SectionId,
}

pub const NAV_LINKS: [NavLink; 4] = [
    NavLink {
        label: "MODULES",
        section: SectionId::Modules,
    },
    NavLink {
        label: "CLAVIS",
        section: SectionId::Demo,
    },
    NavLink {
        label: "CASE STUDIES",
        section: SectionId::Cases,
    },
    NavLink {
        label: "METHODOLOGY",
        section: SectionId::About,
    },
];

/// Open/closed state of the compact navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    Open,
    #[default]
    Closed,
}

impl MenuState {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            MenuState::Open => MenuState::Closed,
            MenuState::Closed => MenuState::Open,
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, MenuState::Open)
    }
}
