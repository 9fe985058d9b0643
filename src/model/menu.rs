use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use super::record_id;

record_id!(
    /// Identifier of a menu item.
    MenuItemId
);

pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpg";

/// Menu section a dish is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Snacks,
    Main,
    Breads,
    Dessert,
    Drinks,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Snacks => "snacks",
            Category::Main => "main",
            Category::Breads => "breads",
            Category::Dessert => "dessert",
            Category::Drinks => "drinks",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snacks" => Ok(Category::Snacks),
            "main" => Ok(Category::Main),
            "breads" => Ok(Category::Breads),
            "dessert" => Ok(Category::Dessert),
            "drinks" => Ok(Category::Drinks),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// A dish on the menu.
///
/// Managed by a [`ResourceActor`](resource_store::ResourceActor); see
/// [`crate::menu_actor`] for its validation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: f64,
    pub img: String,
    pub category: Category,
}

/// Payload for adding a dish.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub img: Option<String>,
    pub category: Category,
}

/// Payload for editing a dish. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub img: Option<String>,
    pub category: Option<Category>,
}
