/// Columns the admin list can be ordered by
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Email,
    Source,
    CreatedAt,
}

impl SortColumn {
    /// Parse a user-supplied column name, ignoring anything outside the allow-list
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "email" => Some(Self::Email),
            "source" => Some(Self::Source),
            "created_at" | "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    /// Column name as used in request parameters
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Source => "source",
            Self::CreatedAt => "created_at",
        }
    }

    /// Column identifier as used in SQL
    pub const fn as_sql(self) -> &'static str {
        self.as_str()
    }
}

/// Sort direction
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a user-supplied direction, defaulting to ascending
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(d) if d.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    /// Direction keyword as used in request parameters
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Direction keyword as used in SQL
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Opposite direction
    pub const fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Requested ordering of the admin list
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Sort {
    /// Build an ordering from `orderby`/`order` request parameters
    ///
    /// Returns `None`, meaning insertion order, when the column is missing or not sortable.
    pub fn from_params(orderby: Option<&str>, order: Option<&str>) -> Option<Self> {
        let column = SortColumn::parse(orderby?)?;
        Some(Self {
            column,
            direction: SortDirection::parse(order),
        })
    }
}
