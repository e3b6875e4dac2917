//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Square meters
pub type Area = f64;

/// Facility category a program mix allocates floor area to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Rental dormitory (임대형기숙사)
    Dorm,
    Officetel,
    /// Tourist hotel (관광호텔)
    Hotel,
    /// Neighborhood retail (근린생활시설)
    Retail,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Dorm,
        Category::Officetel,
        Category::Hotel,
        Category::Retail,
    ];

    /// Categories that produce unit counts
    pub const OCCUPIED: [Category; 3] = [Category::Dorm, Category::Officetel, Category::Hotel];

    /// Whether this category produces units (and so drives shared space)
    pub fn is_occupied(&self) -> bool {
        !matches!(self, Category::Retail)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Dorm => "기숙사",
            Category::Officetel => "오피스텔",
            Category::Hotel => "호텔",
            Category::Retail => "근생",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per facility category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerCategory<T> {
    pub dorm: T,
    pub officetel: T,
    pub hotel: T,
    pub retail: T,
}

impl<T> PerCategory<T> {
    pub fn new(dorm: T, officetel: T, hotel: T, retail: T) -> Self {
        Self { dorm, officetel, hotel, retail }
    }

    /// Build by evaluating `f` once per category, in `Category::ALL` order
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            dorm: f(Category::Dorm),
            officetel: f(Category::Officetel),
            hotel: f(Category::Hotel),
            retail: f(Category::Retail),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Category, &T) -> U) -> PerCategory<U> {
        PerCategory::from_fn(|c| f(c, &self[c]))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().map(move |c| (c, &self[c]))
    }
}

impl PerCategory<f64> {
    pub fn sum(&self) -> f64 {
        self.dorm + self.officetel + self.hotel + self.retail
    }
}

impl PerCategory<i64> {
    /// Saturates at the `i64` bounds instead of overflowing
    pub fn sum(&self) -> i64 {
        self.iter().fold(0, |acc, (_, &count)| acc.saturating_add(count))
    }
}

impl<T> Index<Category> for PerCategory<T> {
    type Output = T;

    fn index(&self, category: Category) -> &T {
        match category {
            Category::Dorm => &self.dorm,
            Category::Officetel => &self.officetel,
            Category::Hotel => &self.hotel,
            Category::Retail => &self.retail,
        }
    }
}

impl<T> IndexMut<Category> for PerCategory<T> {
    fn index_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Dorm => &mut self.dorm,
            Category::Officetel => &mut self.officetel,
            Category::Hotel => &mut self.hotel,
            Category::Retail => &mut self.retail,
        }
    }
}
