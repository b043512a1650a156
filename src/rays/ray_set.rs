//! In-memory trace sessions.

use std::ops::{Add, AddAssign};

use super::{CastHitQuery, CastMissQuery, ShadowQuery};

/// All queries recorded during one trace session, grouped by category.
///
/// Each category keeps the order in which the queries were recorded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RaySet {
    cast_hits: Vec<CastHitQuery>,
    cast_misses: Vec<CastMissQuery>,
    shadows: Vec<ShadowQuery>,
    hits_not_annotated: bool,
}

impl RaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        cast_hits: Vec<CastHitQuery>,
        cast_misses: Vec<CastMissQuery>,
        shadows: Vec<ShadowQuery>,
    ) -> Self {
        Self { cast_hits, cast_misses, shadows, hits_not_annotated: false }
    }

    /// Set with shadow queries only.
    pub fn from_shadows(shadows: Vec<ShadowQuery>) -> Self {
        Self::from_parts(Vec::new(), Vec::new(), shadows)
    }

    /// Mark that the source carried no hit distances, so every shadow
    /// query reads as occluded regardless of what happened at render time.
    pub fn with_hits_not_annotated(mut self, value: bool) -> Self {
        self.hits_not_annotated = value;
        self
    }

    #[inline]
    pub fn hits_not_annotated(&self) -> bool {
        self.hits_not_annotated
    }

    #[inline]
    pub fn cast_hits(&self) -> &[CastHitQuery] {
        &self.cast_hits
    }

    #[inline]
    pub fn cast_misses(&self) -> &[CastMissQuery] {
        &self.cast_misses
    }

    #[inline]
    pub fn shadow_queries(&self) -> &[ShadowQuery] {
        &self.shadows
    }

    pub fn push_cast_hit(&mut self, q: CastHitQuery) {
        self.cast_hits.push(q);
    }

    pub fn push_cast_miss(&mut self, q: CastMissQuery) {
        self.cast_misses.push(q);
    }

    pub fn push_shadow(&mut self, q: ShadowQuery) {
        self.shadows.push(q);
    }

    /// Number of cast queries (hits and misses).
    #[inline]
    pub fn num_casts(&self) -> usize {
        self.cast_hits.len() + self.cast_misses.len()
    }

    /// Total number of queries in every category.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_casts() + self.shadows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of shadow queries that reached their light unoccluded.
    pub fn count_connected(&self) -> usize {
        self.shadows.iter().filter(|q| q.connected).count()
    }

    pub fn shadow_stats(&self) -> ShadowStats {
        ShadowStats {
            total: self.shadows.len(),
            connected: self.count_connected(),
        }
    }

    /// Copy the queries accepted by each predicate into a new set.
    ///
    /// Predicates receive the query and its index within its own category.
    /// A `None` predicate drops the whole category.
    pub fn filter<H, M, S>(
        &self,
        cast_hit: Option<H>,
        cast_miss: Option<M>,
        shadow: Option<S>,
    ) -> RaySet
    where
        H: FnMut(&CastHitQuery, usize) -> bool,
        M: FnMut(&CastMissQuery, usize) -> bool,
        S: FnMut(&ShadowQuery, usize) -> bool,
    {
        RaySet {
            cast_hits: keep(&self.cast_hits, cast_hit),
            cast_misses: keep(&self.cast_misses, cast_miss),
            shadows: keep(&self.shadows, shadow),
            hits_not_annotated: self.hits_not_annotated,
        }
    }

    /// Keep only the shadow queries accepted by `pred`, dropping casts.
    pub fn shadow_filter(&self, pred: impl FnMut(&ShadowQuery, usize) -> bool) -> RaySet {
        self.filter(
            None::<fn(&CastHitQuery, usize) -> bool>,
            None::<fn(&CastMissQuery, usize) -> bool>,
            Some(pred),
        )
    }

    /// Keep only the cast queries accepted by `pred`, dropping shadows.
    pub fn cast_filter(
        &self,
        mut hit: impl FnMut(&CastHitQuery, usize) -> bool,
        mut miss: impl FnMut(&CastMissQuery, usize) -> bool,
    ) -> RaySet {
        self.filter(
            Some(|q: &CastHitQuery, i| hit(q, i)),
            Some(|q: &CastMissQuery, i| miss(q, i)),
            None::<fn(&ShadowQuery, usize) -> bool>,
        )
    }
}

fn keep<T: Copy, F>(items: &[T], pred: Option<F>) -> Vec<T>
where
    F: FnMut(&T, usize) -> bool,
{
    match pred {
        Some(mut f) => items
            .iter()
            .enumerate()
            .filter(|&(i, q)| f(q, i))
            .map(|(_, q)| *q)
            .collect(),
        None => Vec::new(),
    }
}

impl AddAssign for RaySet {
    /// Append every category of `rhs` after the queries already held.
    fn add_assign(&mut self, rhs: RaySet) {
        self.cast_hits.extend(rhs.cast_hits);
        self.cast_misses.extend(rhs.cast_misses);
        self.shadows.extend(rhs.shadows);
        self.hits_not_annotated |= rhs.hits_not_annotated;
    }
}

impl Add for RaySet {
    type Output = RaySet;

    fn add(mut self, rhs: RaySet) -> RaySet {
        self += rhs;
        self
    }
}

impl Extend<RaySet> for RaySet {
    fn extend<I: IntoIterator<Item = RaySet>>(&mut self, iter: I) {
        for set in iter {
            *self += set;
        }
    }
}

/// Shadow connectivity totals for one ray set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShadowStats {
    pub total: usize,
    pub connected: usize,
}

impl ShadowStats {
    #[inline]
    pub fn occluded(&self) -> usize {
        self.total - self.connected
    }

    /// Fraction of shadow queries that were connected; 0.0 for none.
    pub fn connected_fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.connected as f64 / self.total as f64
        }
    }
}
