use crate::keys;
use crate::toggle::{Toggle, TwoValued};
use derive_more::Display;

/// Who is using the catalog. Librarians see editing tools.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    #[display("reader")]
    Reader,
    #[display("librarian")]
    Librarian,
}
impl TwoValued for Role {
    const KEY: &'static str = keys::USER_ROLE;

    fn flipped(self) -> Self {
        match self {
            Self::Reader => Self::Librarian,
            Self::Librarian => Self::Reader,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Reader => "reader",
            Self::Librarian => "librarian",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "reader" => Some(Self::Reader),
            "librarian" => Some(Self::Librarian),
            _ => None,
        }
    }
}

/// The reader/librarian switch.
pub type RoleState = Toggle<Role>;

impl Toggle<Role> {
    pub fn role(&self) -> Role {
        self.get()
    }

    pub fn is_librarian(&self) -> bool {
        self.get() == Role::Librarian
    }
}

/// Colour scheme preference.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    #[display("light")]
    Light,
    #[display("dark")]
    Dark,
}
impl TwoValued for Theme {
    const KEY: &'static str = keys::THEME;

    fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// The light/dark switch.
pub type ThemeState = Toggle<Theme>;

impl Toggle<Theme> {
    pub fn theme(&self) -> Theme {
        self.get()
    }

    pub fn is_dark(&self) -> bool {
        self.get() == Theme::Dark
    }
}
