//! Category listing and seeding.

use domains::{Category, CategoryRepository, Result};
use std::sync::Arc;
use tracing::info;

/// Categories installed by `seed categories`.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Programming",
    "Health",
    "Education",
    "Lifestyle",
    "Technology",
    "Science",
    "Business",
    "Entertainment",
    "Sports",
    "Travel",
    "Food",
    "News",
    "Music",
    "Movies",
    "Books",
    "Fashion",
    "Art",
    "Design",
    "Photography",
    "Gaming",
    "Fitness",
    "Parenting",
    "Home",
    "Gardening",
    "DIY",
    "Auto",
    "Outdoors",
    "Pets",
    "Crafts",
    "Beauty",
    "Wedding",
    "Dating",
    "Relationships",
    "Family",
    "Self-Improvement",
    "Spirituality",
    "History",
    "Culture",
    "Language",
    "Politics",
    "Philosophy",
    "Psychology",
    "Sociology",
    "Economics",
    "Marketing",
    "Management",
    "Leadership",
    "Productivity",
    "Motivation",
    "Inspiration",
    "Creativity",
    "Innovation",
    "Startups",
    "Entrepreneurship",
    "Freelancing",
    "Remote Work",
    "Work-Life Balance",
    "Career",
    "Job Search",
    "Interviews",
];

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.categories.list().await
    }

    /// Inserts the default categories that are missing. Returns how many
    /// were created; a second run creates none.
    pub async fn seed_defaults(&self) -> Result<u64> {
        let names = DEFAULT_CATEGORIES.iter().map(|n| n.to_string()).collect();
        let created = self.categories.insert_missing(names).await?;
        info!(created, "default categories seeded");
        Ok(created)
    }
}
