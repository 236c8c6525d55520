//! Hard cluster assignments produced by thresholding an ultrametric.

use std::{collections::HashMap, fmt, io};

use crate::graph::VertexId;

/// Identifier assigned to a cluster.
///
/// # Examples
/// ```
/// use ccedit_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// assert_eq!(id.to_string(), "4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u64);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Assignment of every vertex to exactly one cluster.
///
/// Cluster ids are contiguous from `0` and ordered by each cluster's smallest
/// member, so equal partitions compare equal regardless of merge order.
///
/// # Examples
/// ```
/// use ccedit_core::{ClusterId, Partition, VertexId};
///
/// let v = VertexId::new;
/// let partition = Partition::from_groups([vec![v(5), v(2)], vec![v(1)]]);
/// assert_eq!(partition.cluster_count(), 2);
/// assert_eq!(partition.cluster_of(v(5)), Some(ClusterId::new(1)));
/// assert_eq!(partition.clusters(), vec![vec![v(1)], vec![v(2), v(5)]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    vertices: Vec<VertexId>,
    assignments: Vec<ClusterId>,
    cluster_count: usize,
}

impl Partition {
    /// Builds a partition from `vertices` (ascending) and an arbitrary group
    /// label per vertex.
    pub(crate) fn from_labels(vertices: Vec<VertexId>, labels: &[usize]) -> Self {
        let mut renumbered: HashMap<usize, ClusterId> = HashMap::new();
        let assignments = labels
            .iter()
            .map(|label| {
                let next = ClusterId::new(renumbered.len() as u64);
                *renumbered.entry(*label).or_insert(next)
            })
            .collect();
        Self {
            vertices,
            assignments,
            cluster_count: renumbered.len(),
        }
    }

    /// Builds a partition from explicit member lists.
    ///
    /// A vertex listed in several groups stays in the first one; empty
    /// groups are ignored.
    #[must_use]
    pub fn from_groups<G>(groups: impl IntoIterator<Item = G>) -> Self
    where
        G: IntoIterator<Item = VertexId>,
    {
        let mut owner: HashMap<VertexId, usize> = HashMap::new();
        for (group, members) in groups.into_iter().enumerate() {
            for vertex in members {
                owner.entry(vertex).or_insert(group);
            }
        }
        let mut pairs: Vec<(VertexId, usize)> = owner.into_iter().collect();
        pairs.sort_unstable();
        let (vertices, labels): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self::from_labels(vertices, &labels)
    }

    /// Vertices in ascending order.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Cluster of each vertex, aligned with [`Partition::vertices`].
    #[must_use]
    pub fn assignments(&self) -> &[ClusterId] {
        &self.assignments
    }

    /// Number of clusters.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Cluster holding `vertex`.
    #[must_use]
    pub fn cluster_of(&self, vertex: VertexId) -> Option<ClusterId> {
        let position = self.vertices.binary_search(&vertex).ok()?;
        self.assignments.get(position).copied()
    }

    /// Whether `a` and `b` share a cluster; `None` if either is unknown.
    #[must_use]
    pub fn same_cluster(&self, a: VertexId, b: VertexId) -> Option<bool> {
        Some(self.cluster_of(a)? == self.cluster_of(b)?)
    }

    /// Members of each cluster, indexed by cluster id, ascending.
    #[must_use]
    pub fn clusters(&self) -> Vec<Vec<VertexId>> {
        let mut clusters = vec![Vec::new(); self.cluster_count];
        for (&vertex, cluster) in self.vertices.iter().zip(&self.assignments) {
            if let Some(members) = usize::try_from(cluster.get())
                .ok()
                .and_then(|index| clusters.get_mut(index))
            {
                members.push(vertex);
            }
        }
        clusters
    }

    /// Returns `true` when both partitions cover the same vertices and every
    /// cluster of `finer` lies inside one cluster of `self`.
    #[must_use]
    pub fn is_coarsening_of(&self, finer: &Self) -> bool {
        if self.vertices != finer.vertices {
            return false;
        }
        let mut image: HashMap<ClusterId, ClusterId> = HashMap::new();
        finer
            .assignments
            .iter()
            .zip(&self.assignments)
            .all(|(fine, coarse)| *image.entry(*fine).or_insert(*coarse) == *coarse)
    }

    /// Writes one `#Cluster: <n>` header per cluster (1-based) followed by its
    /// comma-separated members.
    ///
    /// # Errors
    /// Propagates failures from `writer`.
    ///
    /// # Examples
    /// ```
    /// use ccedit_core::{Partition, VertexId};
    ///
    /// let v = VertexId::new;
    /// let partition = Partition::from_groups([vec![v(1), v(3)], vec![v(2)]]);
    /// let mut out = Vec::new();
    /// partition.write_listing(&mut out)?;
    /// assert_eq!(String::from_utf8(out)?, "#Cluster: 1\n1,3\n#Cluster: 2\n2\n");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_listing<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        for (index, members) in self.clusters().iter().enumerate() {
            writeln!(writer, "#Cluster: {}", index + 1)?;
            let line = members
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            writeln!(writer, "{line}")?;
        }
        writer.flush()
    }
}
