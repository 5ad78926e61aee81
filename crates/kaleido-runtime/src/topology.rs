#![forbid(unsafe_code)]

//! Grid topology: which cells mirror each other.
//!
//! The topology is built once from configuration. Group names are resolved
//! to dense [`GroupId`]s at construction so that no state transition ever has
//! to look at a string. Each group owns `cells` member positions; a cell is
//! addressed as `(group, position)`.
//!
//! # Invariants
//!
//! 1. At least one group.
//! 2. Group names are unique.
//! 3. Every group has at least one cell.
//! 4. `GroupId(i)` is valid iff `i < len()`.

use std::fmt;

use ahash::AHashMap;

/// Dense index of a mirrored group (a "slice").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u32);

impl GroupId {
    /// Wrap a raw index. Validity is checked against a topology, not here.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Raw index.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// One hexagon: a position inside a mirrored group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    /// Owning group.
    pub group: GroupId,
    /// Position within the group (`0..cells`).
    pub position: u16,
}

impl CellId {
    /// Create a cell id.
    #[must_use]
    pub const fn new(group: GroupId, position: u16) -> Self {
        Self { group, position }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group, self.position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GroupEntry {
    name: String,
    cells: u16,
}

/// The set of valid groups and their member cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTopology {
    groups: Vec<GroupEntry>,
    by_name: AHashMap<String, GroupId>,
}

impl GridTopology {
    /// Build from `(name, cell_count)` pairs in order.
    pub fn new<I, S>(groups: I) -> Result<Self, TopologyError>
    where
        I: IntoIterator<Item = (S, u16)>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        let mut by_name = AHashMap::new();
        for (name, cells) in groups {
            let name = name.into();
            if cells == 0 {
                return Err(TopologyError::EmptyGroup(name));
            }
            let id = u32::try_from(entries.len())
                .map(GroupId)
                .map_err(|_| TopologyError::TooManyGroups)?;
            if by_name.insert(name.clone(), id).is_some() {
                return Err(TopologyError::DuplicateGroup(name));
            }
            entries.push(GroupEntry { name, cells });
        }
        if entries.is_empty() {
            return Err(TopologyError::EmptyTopology);
        }
        Ok(Self {
            groups: entries,
            by_name,
        })
    }

    /// `count` groups named `g0..`, each with `cells_per_group` cells.
    pub fn uniform(count: u32, cells_per_group: u16) -> Result<Self, TopologyError> {
        Self::new((0..count).map(|i| (format!("g{i}"), cells_per_group)))
    }

    /// The default hexagon layout: four rings (`a`..`d`) of six groups,
    /// each group mirrored across the six slices of the kaleidoscope.
    #[must_use]
    pub fn kaleidoscope() -> Self {
        const RINGS: [char; 4] = ['a', 'b', 'c', 'd'];
        const SLICES: u16 = 6;
        let mut groups = Vec::with_capacity(RINGS.len() * 6);
        let mut by_name = AHashMap::with_capacity(RINGS.len() * 6);
        for ring in RINGS {
            for spoke in 1..=6 {
                let name = format!("{ring}{spoke}");
                by_name.insert(name.clone(), GroupId(groups.len() as u32));
                groups.push(GroupEntry {
                    name,
                    cells: SLICES,
                });
            }
        }
        Self { groups, by_name }
    }

    /// Number of groups (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether `group` is part of this topology.
    #[must_use]
    pub fn contains(&self, group: GroupId) -> bool {
        group.index() < self.groups.len()
    }

    /// Whether `cell` is part of this topology.
    #[must_use]
    pub fn contains_cell(&self, cell: CellId) -> bool {
        self.cell_count(cell.group)
            .is_some_and(|count| cell.position < count)
    }

    /// All group ids in order.
    pub fn groups(&self) -> impl ExactSizeIterator<Item = GroupId> + '_ {
        (0..self.groups.len()).map(|i| GroupId(i as u32))
    }

    /// Look up a group by its configured name.
    #[must_use]
    pub fn group_by_name(&self, name: &str) -> Option<GroupId> {
        self.by_name.get(name).copied()
    }

    /// Configured name of `group`.
    #[must_use]
    pub fn name(&self, group: GroupId) -> Option<&str> {
        self.groups.get(group.index()).map(|g| g.name.as_str())
    }

    /// Number of mirrored cells in `group`.
    #[must_use]
    pub fn cell_count(&self, group: GroupId) -> Option<u16> {
        self.groups.get(group.index()).map(|g| g.cells)
    }

    /// Member cells of `group`.
    #[must_use]
    pub fn cells(&self, group: GroupId) -> Option<Vec<CellId>> {
        self.cell_count(group)
            .map(|count| (0..count).map(|p| CellId::new(group, p)).collect())
    }

    /// Group owning `cell`, if the cell exists.
    #[must_use]
    pub fn group_of(&self, cell: CellId) -> Option<GroupId> {
        self.contains_cell(cell).then_some(cell.group)
    }

    /// Total number of cells across all groups.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.groups.iter().map(|g| usize::from(g.cells)).sum()
    }
}

impl Default for GridTopology {
    fn default() -> Self {
        Self::kaleidoscope()
    }
}

/// Errors building a [`GridTopology`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// No groups were given.
    EmptyTopology,
    /// Two groups share a name.
    DuplicateGroup(String),
    /// A group has zero cells.
    EmptyGroup(String),
    /// More groups than a [`GroupId`] can address.
    TooManyGroups,
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTopology => f.write_str("topology has no groups"),
            Self::DuplicateGroup(name) => write!(f, "duplicate group name {name:?}"),
            Self::EmptyGroup(name) => write!(f, "group {name:?} has no cells"),
            Self::TooManyGroups => f.write_str("too many groups"),
        }
    }
}

impl std::error::Error for TopologyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kaleidoscope_layout() {
        let t = GridTopology::kaleidoscope();
        assert_eq!(t.len(), 24);
        assert_eq!(t.total_cells(), 24 * 6);
        assert_eq!(t.group_by_name("a1"), Some(GroupId::new(0)));
        assert_eq!(t.group_by_name("d6"), Some(GroupId::new(23)));
        assert_eq!(t.name(GroupId::new(6)), Some("b1"));
        // Same table as the validating constructor would build.
        let rebuilt = GridTopology::new(t.groups().map(|g| {
            (t.name(g).unwrap().to_owned(), t.cell_count(g).unwrap())
        }))
        .unwrap();
        assert_eq!(rebuilt, t);
    }

    #[test]
    fn cells_are_enumerated_per_group() {
        let t = GridTopology::new([("hub", 1), ("spoke", 3)]).unwrap();
        let spoke = t.group_by_name("spoke").unwrap();
        assert_eq!(
            t.cells(spoke).unwrap(),
            vec![
                CellId::new(spoke, 0),
                CellId::new(spoke, 1),
                CellId::new(spoke, 2)
            ]
        );
        assert!(t.contains_cell(CellId::new(spoke, 2)));
        assert!(!t.contains_cell(CellId::new(spoke, 3)));
        assert_eq!(t.group_of(CellId::new(spoke, 1)), Some(spoke));
        assert_eq!(t.group_of(CellId::new(spoke, 3)), None);
        assert!(t.cells(GroupId::new(2)).is_none());
    }

    #[test]
    fn construction_errors() {
        assert_eq!(
            GridTopology::new(Vec::<(String, u16)>::new()),
            Err(TopologyError::EmptyTopology)
        );
        assert_eq!(
            GridTopology::new([("x", 2), ("x", 2)]),
            Err(TopologyError::DuplicateGroup("x".into()))
        );
        assert_eq!(
            GridTopology::new([("x", 0)]),
            Err(TopologyError::EmptyGroup("x".into()))
        );
    }

    #[test]
    fn uniform_names_match_ids() {
        let t = GridTopology::uniform(8, 6).unwrap();
        assert_eq!(t.group_by_name("g7"), Some(GroupId::new(7)));
        assert_eq!(GroupId::new(7).to_string(), "g7");
        assert!(t.contains(GroupId::new(7)));
        assert!(!t.contains(GroupId::new(8)));
        assert_eq!(t.groups().len(), 8);
    }
}
