//! Static menu catalog.
//!
//! The catalog is read-only at runtime; cart lines copy the item they were built from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a menu item, unique within its category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub description: String,
}

impl MenuItem {
    /// Creates a new MenuItem.
    ///
    /// # Arguments
    /// * `id` - Identifier, unique within the category
    /// * `name` - Display name
    /// * `price` - Unit price
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            description: String::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub title: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    categories: Vec<Category>,
}

impl Menu {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The cafeteria's standing menu.
    pub fn cafeteria() -> Self {
        let price = |whole: i64| Decimal::new(whole * 100, 2);
        Self::new(vec![
            Category {
                slug: "ice-cream".into(),
                title: "Ice Cream".into(),
                items: vec![
                    MenuItem::new("vanilla-ice-cream", "Vanilla Ice Cream", price(55))
                        .with_image("img/vanilla.avif")
                        .with_description("A scoop of vanilla ice cream."),
                    MenuItem::new("chocolate-ice-cream", "Chocolate Ice Cream", price(45))
                        .with_image("img/chocolate-ice-cream.jpg")
                        .with_description("A scoop of chocolate ice cream."),
                    MenuItem::new("strawberry-ice-cream", "Strawberry Ice Cream", price(35))
                        .with_image("img/strawberry.jpg")
                        .with_description("A scoop of strawberry ice cream."),
                ],
            },
            Category {
                slug: "hot-drinks".into(),
                title: "Hot Drinks".into(),
                items: vec![
                    MenuItem::new("espresso", "Espresso", price(30))
                        .with_image("img/espresso.jpg")
                        .with_description("A concentrated shot of coffee."),
                    MenuItem::new("latte", "Latte", price(45))
                        .with_image("img/latte.jpg")
                        .with_description("Coffee with frothed milk."),
                    MenuItem::new("hot-chocolate", "Hot Chocolate", price(40))
                        .with_image("img/hot-chocolate.jpg")
                        .with_description("A creamy chocolate drink."),
                ],
            },
            Category {
                slug: "desserts".into(),
                title: "Desserts".into(),
                items: vec![
                    MenuItem::new("chocolate-cake", "Chocolate Cake", price(25))
                        .with_image("img/chocolate-cake.jpg")
                        .with_description("A rich slice of chocolate cake."),
                    MenuItem::new("tres-leches-cake", "Tres Leches Cake", price(30))
                        .with_image("img/tres-leches.jpg")
                        .with_description("Sponge cake soaked in three milks."),
                    MenuItem::new("cheesecake", "Cheesecake", price(25))
                        .with_image("img/cheesecake.jpg")
                        .with_description("A slice of baked cheesecake."),
                ],
            },
        ])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// Items of a category; empty for an unknown category.
    pub fn items(&self, slug: &str) -> &[MenuItem] {
        self.category(slug).map(|c| c.items.as_slice()).unwrap_or(&[])
    }

    /// Looks an item up by category and ID, as the "add to cart" buttons do.
    pub fn find(&self, slug: &str, item_id: &ItemId) -> Option<&MenuItem> {
        self.items(slug).iter().find(|item| &item.id == item_id)
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::cafeteria()
    }
}
