//! User × dish-key rating matrices and the dish catalog.
//!
//! Observations pivot into three matrix views sharing one pair of axes:
//!
//! - [`RatingMatrix`]: raw visit-averaged ratings, absent = unknown
//! - [`CenteredMatrix`]: raw minus each user's mean over present cells;
//!   absence preserved
//! - [`FilledMatrix`]: centered with absences as 0.0, used only for
//!   similarity math
//!
//! Cells are `Option<f32>`: "unknown" can never be confused with a
//! legitimate value of zero. Axes are sorted, so column order and every
//! downstream iteration is deterministic regardless of input order.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use tracing::debug;

use crate::types::{DishKey, DishMeta, Observation, UserId};

/// Shared row/column axes for the three matrix views.
#[derive(Debug)]
pub(crate) struct Axes {
    users: Vec<UserId>,
    dishes: Vec<DishKey>,
    user_index: HashMap<UserId, usize>,
    dish_index: HashMap<DishKey, usize>,
}

impl Axes {
    fn from_observations(observations: &[Observation]) -> Self {
        let user_set: BTreeSet<UserId> = observations.iter().map(|o| o.user).collect();
        let dish_set: BTreeSet<DishKey> = observations.iter().map(|o| o.dish_key()).collect();

        let users: Vec<UserId> = user_set.into_iter().collect();
        let dishes: Vec<DishKey> = dish_set.into_iter().collect();
        let user_index = users.iter().enumerate().map(|(i, u)| (*u, i)).collect();
        let dish_index = dishes
            .iter()
            .enumerate()
            .map(|(i, d)| (d.clone(), i))
            .collect();

        Self {
            users,
            dishes,
            user_index,
            dish_index,
        }
    }
}

/// Raw user × dish-key rating matrix.
///
/// Duplicate (user, dish key) observations are averaged during the pivot,
/// so each cell holds at most one value.
#[derive(Debug)]
pub struct RatingMatrix {
    axes: Arc<Axes>,
    cells: Vec<Option<f32>>,
}

impl RatingMatrix {
    /// Pivot observations into a matrix with sorted axes.
    #[must_use]
    pub fn from_observations(observations: &[Observation]) -> Self {
        let axes = Arc::new(Axes::from_observations(observations));
        let width = axes.dishes.len();
        let mut sums = vec![0.0f32; axes.users.len() * width];
        let mut counts = vec![0u32; axes.users.len() * width];

        for observation in observations {
            let ui = axes.user_index[&observation.user];
            let di = axes.dish_index[&observation.dish_key()];
            sums[ui * width + di] += observation.rating.as_f32();
            counts[ui * width + di] += 1;
        }

        let cells = sums
            .into_iter()
            .zip(counts)
            .map(|(sum, count)| (count > 0).then(|| sum / count as f32))
            .collect();

        debug!(
            users = axes.users.len(),
            dishes = axes.dishes.len(),
            observations = observations.len(),
            "pivoted observations into rating matrix"
        );
        Self { axes, cells }
    }

    /// Users on the row axis, sorted.
    #[must_use]
    pub fn users(&self) -> &[UserId] {
        &self.axes.users
    }

    /// Dish keys on the column axis, sorted.
    #[must_use]
    pub fn dishes(&self) -> &[DishKey] {
        &self.axes.dishes
    }

    /// Row index of a user, if present in the matrix.
    #[must_use]
    pub fn user_index(&self, user: UserId) -> Option<usize> {
        self.axes.user_index.get(&user).copied()
    }

    /// Cell by user id and dish key. `None` = unknown user, unknown dish,
    /// or absent rating.
    #[must_use]
    pub fn get(&self, user: UserId, dish: &DishKey) -> Option<f32> {
        let ui = self.axes.user_index.get(&user)?;
        let di = self.axes.dish_index.get(dish)?;
        self.cells[ui * self.axes.dishes.len() + *di]
    }

    /// Cell by row/column index.
    #[must_use]
    pub fn get_at(&self, user_idx: usize, dish_idx: usize) -> Option<f32> {
        self.cells[user_idx * self.axes.dishes.len() + dish_idx]
    }

    /// Mean of a user's present cells. `None` for a user not in the matrix.
    #[must_use]
    pub fn row_mean(&self, user: UserId) -> Option<f32> {
        let ui = self.axes.user_index.get(&user)?;
        let width = self.axes.dishes.len();
        let row = &self.cells[ui * width..(ui + 1) * width];
        let present: Vec<f32> = row.iter().flatten().copied().collect();
        // A user only enters the matrix through an observation, so the row
        // always has at least one present cell.
        (!present.is_empty()).then(|| present.iter().sum::<f32>() / present.len() as f32)
    }

    /// Mean-centered view: each present cell minus its row mean.
    #[must_use]
    pub fn center(&self) -> CenteredMatrix {
        let width = self.axes.dishes.len();
        let row_means: Vec<f32> = self
            .axes
            .users
            .iter()
            .map(|user| self.row_mean(*user).unwrap_or(0.0))
            .collect();

        let cells = self
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| cell.map(|value| value - row_means[i / width.max(1)]))
            .collect();

        CenteredMatrix {
            axes: Arc::clone(&self.axes),
            cells,
            row_means,
        }
    }
}

/// Mean-centered matrix; absence preserved, raw row means retained.
#[derive(Debug)]
pub struct CenteredMatrix {
    axes: Arc<Axes>,
    cells: Vec<Option<f32>>,
    row_means: Vec<f32>,
}

impl CenteredMatrix {
    /// Centered cell by user id and dish key.
    #[must_use]
    pub fn get(&self, user: UserId, dish: &DishKey) -> Option<f32> {
        let ui = self.axes.user_index.get(&user)?;
        let di = self.axes.dish_index.get(dish)?;
        self.cells[ui * self.axes.dishes.len() + *di]
    }

    /// The raw row mean that was subtracted from a user's cells.
    #[must_use]
    pub fn row_mean(&self, user: UserId) -> Option<f32> {
        self.axes
            .user_index
            .get(&user)
            .map(|ui| self.row_means[*ui])
    }

    /// Dense view with absences as 0.0, for similarity math only.
    #[must_use]
    pub fn fill_absent(&self) -> FilledMatrix {
        let rows = self
            .cells
            .iter()
            .map(|cell| cell.unwrap_or(0.0))
            .collect();
        FilledMatrix {
            axes: Arc::clone(&self.axes),
            rows,
        }
    }
}

/// Zero-filled centered matrix: the similarity engine's only input.
#[derive(Debug)]
pub struct FilledMatrix {
    axes: Arc<Axes>,
    rows: Vec<f32>,
}

impl FilledMatrix {
    /// Users on the row axis, sorted.
    #[must_use]
    pub fn users(&self) -> &[UserId] {
        &self.axes.users
    }

    /// One user's dense row.
    #[must_use]
    pub fn row(&self, user_idx: usize) -> &[f32] {
        let width = self.axes.dishes.len();
        &self.rows[user_idx * width..(user_idx + 1) * width]
    }

    /// Number of dish columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.axes.dishes.len()
    }
}

/// Ordered dish-key → metadata lookup.
///
/// First occurrence in input order wins for duplicate keys, enforced by an
/// explicit insert-if-absent rather than incidental construction order.
#[derive(Debug, Default)]
pub struct DishCatalog {
    entries: BTreeMap<DishKey, DishMeta>,
}

impl DishCatalog {
    /// Build the catalog from observations in input order.
    #[must_use]
    pub fn from_observations(observations: &[Observation]) -> Self {
        let mut entries = BTreeMap::new();
        for observation in observations {
            entries
                .entry(observation.dish_key())
                .or_insert_with(|| DishMeta {
                    dish_name: observation.dish_name.clone(),
                    restaurant_name: observation.restaurant_name.clone(),
                    restaurant_id: observation.restaurant_id,
                    cuisine: observation.cuisine.clone(),
                });
        }
        Self { entries }
    }

    /// Metadata for one dish key.
    #[must_use]
    pub fn get(&self, key: &DishKey) -> Option<&DishMeta> {
        self.entries.get(key)
    }

    /// All catalog entries in dish-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&DishKey, &DishMeta)> {
        self.entries.iter()
    }

    /// Number of distinct dishes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All per-request matrix state, built fresh for each request.
#[derive(Debug)]
pub struct MatrixSet {
    /// Raw visit-averaged ratings.
    pub raw: RatingMatrix,
    /// Mean-centered ratings plus raw row means.
    pub centered: CenteredMatrix,
    /// Zero-filled centered rows for similarity.
    pub filled: FilledMatrix,
    /// Dish metadata lookup.
    pub catalog: DishCatalog,
}

impl MatrixSet {
    /// Pivot, center, fill, and index a batch of observations.
    #[must_use]
    pub fn from_observations(observations: &[Observation]) -> Self {
        let raw = RatingMatrix::from_observations(observations);
        let centered = raw.center();
        let filled = centered.fill_absent();
        let catalog = DishCatalog::from_observations(observations);
        Self {
            raw,
            centered,
            filled,
            catalog,
        }
    }
}
