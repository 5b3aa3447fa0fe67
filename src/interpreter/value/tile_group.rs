use std::fmt;

/// The shape of a tile group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// One tile.
    Single,
    /// Two identical tiles.
    Pair,
    /// Three identical tiles.
    Pung,
    /// Four identical tiles.
    Kong,
    /// Five identical tiles.
    Quint,
    /// Consecutive tiles of one suit.
    Sequence,
}

impl GroupKind {
    /// Number of copies a repeated group holds, or `None` for sequences,
    /// whose length is given at the call.
    #[must_use]
    pub const fn multiplicity(self) -> Option<usize> {
        match self {
            Self::Single => Some(1),
            Self::Pair => Some(2),
            Self::Pung => Some(3),
            Self::Kong => Some(4),
            Self::Quint => Some(5),
            Self::Sequence => None,
        }
    }

    /// The builtin name that builds this kind of group.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Pair => "pair",
            Self::Pung => "pung",
            Self::Kong => "kong",
            Self::Quint => "quint",
            Self::Sequence => "sequence",
        }
    }
}

/// Tiles produced by one tile-group builtin, in generation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGroup {
    /// Which builtin produced the group.
    pub kind:  GroupKind,
    /// The tile codes.
    pub tiles: Vec<String>,
}

impl TileGroup {
    /// Builds a group of `code` repeated as often as `kind` requires.
    ///
    /// # Example
    /// ```
    /// use mtl::interpreter::value::tile_group::{GroupKind, TileGroup};
    ///
    /// let kong = TileGroup::repeated(GroupKind::Kong, "5b");
    /// assert_eq!(kong.tiles, ["5b", "5b", "5b", "5b"]);
    /// ```
    #[must_use]
    pub fn repeated(kind: GroupKind, code: &str) -> Self {
        let count = kind.multiplicity().unwrap_or(1);
        Self { kind,
               tiles: vec![code.to_string(); count] }
    }

    /// Builds `len` ascending tiles `start`, `start + 1`, ... in `suit`.
    ///
    /// Returns `None` if a tile value would overflow.
    ///
    /// # Example
    /// ```
    /// use mtl::interpreter::value::tile_group::TileGroup;
    ///
    /// let run = TileGroup::sequence(3, "c", 3).unwrap();
    /// assert_eq!(run.tiles, ["3c", "4c", "5c"]);
    /// ```
    #[must_use]
    pub fn sequence(start: i64, suit: &str, len: usize) -> Option<Self> {
        let mut tiles = Vec::new();
        let mut value = start;
        for i in 0..len {
            if i > 0 {
                value = value.checked_add(1)?;
            }
            tiles.push(format!("{value}{suit}"));
        }
        Some(Self { kind: GroupKind::Sequence,
                    tiles })
    }

    /// Number of tiles in the group.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if the group holds no tiles.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl fmt::Display for TileGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind.name(), self.tiles.join(" "))
    }
}
